//! Level maps: the textual initial map and the tile grid built from it.

use super::geometry::{in_bounds, RowColumn, LEVEL_HEIGHT, LEVEL_WIDTH};

/// The built-in level.
///
/// `#` is a block, `.` a floor, `c` the cat, `m` a mouse and `d` a dog.
pub const DEFAULT_MAP: [&str; LEVEL_HEIGHT] = [
    "##..#########...####",
    "#......m...........#",
    "#....##...##...#..##",
    "#...#########.......",
    "#....##.m......#...#",
    "#..d........#..#...#",
    "#...####...###......",
    "#...###.......#.#..#",
    "#.......#.....m....#",
    "....m...##..........",
    ".......###....###..#",
    "#.....##...##.......",
    "#........c.........#",
    "###.####...###.#####",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Expected {expected} rows in the map, got {actual}")]
    Height { expected: usize, actual: usize },

    #[error("Expected {expected} cells in row {row}, got {actual}")]
    Width {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown cell {cell:?} at row {row}, column {column}")]
    UnknownCell { row: usize, column: usize, cell: char },

    #[error("Exactly one cat expected in the map, got {0}")]
    CatCount(usize),
}

/// A single character of the initial map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Block,
    Floor,
    Cat,
    Mouse,
    Dog,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Block),
            '.' => Some(Cell::Floor),
            'c' => Some(Cell::Cat),
            'm' => Some(Cell::Mouse),
            'd' => Some(Cell::Dog),
            _ => None,
        }
    }
}

/// A validated initial level map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialMap {
    cells: Vec<Vec<Cell>>,
    cat: RowColumn,
}

impl InitialMap {
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        if rows.len() != LEVEL_HEIGHT {
            return Err(MapError::Height {
                expected: LEVEL_HEIGHT,
                actual: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(LEVEL_HEIGHT);
        let mut cats = Vec::new();

        for (row_i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != LEVEL_WIDTH {
                return Err(MapError::Width {
                    row: row_i,
                    expected: LEVEL_WIDTH,
                    actual: width,
                });
            }

            let mut cell_row = Vec::with_capacity(LEVEL_WIDTH);
            for (column_i, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(MapError::UnknownCell {
                    row: row_i,
                    column: column_i,
                    cell: c,
                })?;
                if cell == Cell::Cat {
                    cats.push((row_i as i32, column_i as i32));
                }
                cell_row.push(cell);
            }
            cells.push(cell_row);
        }

        match cats.as_slice() {
            [cat] => Ok(Self { cells, cat: *cat }),
            _ => Err(MapError::CatCount(cats.len())),
        }
    }

    /// Starting tile of the cat
    pub fn cat(&self) -> RowColumn {
        self.cat
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (RowColumn, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row_i, row)| {
            row.iter()
                .enumerate()
                .map(move |(column_i, cell)| ((row_i as i32, column_i as i32), *cell))
        })
    }
}

impl Default for InitialMap {
    fn default() -> Self {
        Self::parse(&DEFAULT_MAP).expect("built-in map is valid")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Blocks every character
    Block,
    Floor,
}

/// The tile grid of a running game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    tiles: Vec<Vec<Tile>>,
}

impl Level {
    pub fn from_map(map: &InitialMap) -> Self {
        let tiles = map
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Block => Tile::Block,
                        _ => Tile::Floor,
                    })
                    .collect()
            })
            .collect();

        Self { tiles }
    }

    /// The tile at `row_column`, `None` outside of the level
    pub fn tile(&self, row_column: RowColumn) -> Option<Tile> {
        if !in_bounds(row_column) {
            return None;
        }
        Some(self.tiles[row_column.0 as usize][row_column.1 as usize])
    }

    pub fn blocks(&self) -> impl Iterator<Item = RowColumn> + '_ {
        self.tiles().filter_map(|(rc, tile)| (tile == Tile::Block).then_some(rc))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (RowColumn, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row_i, row)| {
            row.iter()
                .enumerate()
                .map(move |(column_i, tile)| ((row_i as i32, column_i as i32), *tile))
        })
    }
}
