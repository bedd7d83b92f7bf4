//! Tile grid geometry shared by the simulation and the renderer.

/// Tile size in pixels
pub const TILE_WIDTH: f32 = 32.0;
pub const TILE_HEIGHT: f32 = 32.0;

/// Character sprite size in pixels
pub const CHARACTER_WIDTH: f32 = 32.0;
pub const CHARACTER_HEIGHT: f32 = 32.0;

/// Level width, in tiles
pub const LEVEL_WIDTH: usize = 20;

/// Level height, in tiles
pub const LEVEL_HEIGHT: usize = 14;

/// Position in the world as (x pixel, y pixel)
pub type Xy = (f32, f32);

/// Tile index as (row, column). Signed so that neighbours of edge tiles can
/// be expressed and rejected by [`in_bounds`].
pub type RowColumn = (i32, i32);

/// Walking and looking directions of the actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Lowercase name as used in sprite file names
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

/// Return true if the two inclusive bounding boxes intersect.
#[allow(clippy::too_many_arguments)]
pub fn intersect(
    xmin_a: f32,
    ymin_a: f32,
    xmax_a: f32,
    ymax_a: f32,
    xmin_b: f32,
    ymin_b: f32,
    xmax_b: f32,
    ymax_b: f32,
) -> bool {
    debug_assert!(xmin_a <= xmax_a && ymin_a <= ymax_a);
    debug_assert!(xmin_b <= xmax_b && ymin_b <= ymax_b);

    (xmin_a <= xmax_b && xmax_a >= xmin_b) && (ymin_a <= ymax_b && ymax_a >= ymin_b)
}

/// Return true if two characters standing at `a` and `b` overlap.
pub fn characters_touch(a: Xy, b: Xy) -> bool {
    intersect(
        a.0,
        a.1,
        a.0 + CHARACTER_WIDTH - 1.0,
        a.1 + CHARACTER_HEIGHT - 1.0,
        b.0,
        b.1,
        b.0 + CHARACTER_WIDTH - 1.0,
        b.1 + CHARACTER_HEIGHT - 1.0,
    )
}

pub fn xy_to_row_column(xy: Xy) -> RowColumn {
    ((xy.1 / TILE_HEIGHT) as i32, (xy.0 / TILE_WIDTH) as i32)
}

pub fn row_column_to_xy(row_column: RowColumn) -> Xy {
    (
        row_column.1 as f32 * TILE_WIDTH,
        row_column.0 as f32 * TILE_HEIGHT,
    )
}

pub fn in_bounds(row_column: RowColumn) -> bool {
    (0..LEVEL_HEIGHT as i32).contains(&row_column.0)
        && (0..LEVEL_WIDTH as i32).contains(&row_column.1)
}

/// The tile next to `row_column` in `direction`. May be out of bounds.
pub fn next_row_column(row_column: RowColumn, direction: Direction) -> RowColumn {
    match direction {
        Direction::North => (row_column.0 - 1, row_column.1),
        Direction::East => (row_column.0, row_column.1 + 1),
        Direction::South => (row_column.0 + 1, row_column.1),
        Direction::West => (row_column.0, row_column.1 - 1),
    }
}

/// Neighbouring tiles in the order north, east, south, west
pub fn neighbours(row_column: RowColumn) -> impl Iterator<Item = RowColumn> {
    Direction::ALL
        .into_iter()
        .map(move |direction| next_row_column(row_column, direction))
}

/// Direction of the dominant axis of the vector from `origin` to `target`.
///
/// Ties, including the zero vector, resolve to the horizontal axis.
pub fn direction_between(origin: Xy, target: Xy) -> Direction {
    let x_delta = target.0 - origin.0;
    let y_delta = target.1 - origin.1;

    if x_delta.abs() < y_delta.abs() {
        if y_delta > 0.0 {
            Direction::South
        } else {
            Direction::North
        }
    } else if x_delta > 0.0 {
        Direction::East
    } else {
        Direction::West
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_intersect() {
        assert!(intersect(0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 20.0, 20.0));
        assert!(!intersect(0.0, 0.0, 10.0, 10.0, 11.0, 0.0, 20.0, 10.0));
        assert!(!intersect(0.0, 0.0, 10.0, 10.0, 0.0, 11.0, 10.0, 20.0));
    }

    #[test]
    fn adjacent_tiles_do_not_touch() {
        assert!(!characters_touch((0.0, 0.0), (32.0, 0.0)));
        assert!(characters_touch((0.0, 0.0), (31.0, 0.0)));
        assert!(characters_touch((64.0, 64.0), (64.0, 64.0)));
    }

    #[test]
    fn converts_between_pixels_and_tiles() {
        assert_eq!(xy_to_row_column((64.0, 32.0)), (1, 2));
        assert_eq!(xy_to_row_column((63.9, 31.9)), (0, 1));
        assert_eq!(row_column_to_xy((1, 2)), (64.0, 32.0));
    }

    #[test]
    fn neighbours_go_clockwise_from_north() {
        let all: Vec<_> = neighbours((5, 5)).collect();
        assert_eq!(all, vec![(4, 5), (5, 6), (6, 5), (5, 4)]);
    }

    #[test]
    fn bounds_reject_the_outside() {
        assert!(in_bounds((0, 0)));
        assert!(in_bounds((LEVEL_HEIGHT as i32 - 1, LEVEL_WIDTH as i32 - 1)));
        assert!(!in_bounds((-1, 0)));
        assert!(!in_bounds((0, LEVEL_WIDTH as i32)));
    }

    #[test]
    fn direction_follows_the_dominant_axis() {
        assert_eq!(direction_between((0.0, 0.0), (0.0, 32.0)), Direction::South);
        assert_eq!(direction_between((0.0, 32.0), (0.0, 0.0)), Direction::North);
        assert_eq!(direction_between((0.0, 0.0), (32.0, 0.0)), Direction::East);
        assert_eq!(direction_between((32.0, 0.0), (0.0, 0.0)), Direction::West);
        assert_eq!(direction_between((5.0, 5.0), (5.0, 5.0)), Direction::West);
    }
}
