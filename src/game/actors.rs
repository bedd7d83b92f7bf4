//! The cat, the mice and the dogs.

use super::geometry::{direction_between, xy_to_row_column, Direction, RowColumn, Xy};

/// An ongoing walk from one tile to a neighbouring one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walking {
    /// Start time, in seconds
    pub start: f64,
    /// Estimated time of arrival, in seconds
    pub eta: f64,
    pub origin_xy: Xy,
    pub target_xy: Xy,
}

impl Walking {
    /// Progress of the walk at `now`, clamped to `[0, 1]`
    pub fn fraction(&self, now: f64) -> f32 {
        let span = self.eta - self.start;
        if span <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / span).clamp(0.0, 1.0) as f32
    }

    pub fn direction(&self) -> Direction {
        direction_between(self.origin_xy, self.target_xy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Cat,
    Mouse,
    Dog,
}

impl ActorKind {
    pub const ALL: [ActorKind; 3] = [ActorKind::Cat, ActorKind::Mouse, ActorKind::Dog];

    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Cat => "cat",
            ActorKind::Mouse => "mouse",
            ActorKind::Dog => "dog",
        }
    }
}

/// Position and motion shared by every character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub xy: Xy,
    pub walking: Option<Walking>,
    /// Facing direction while standing
    pub direction: Direction,
}

impl Body {
    pub fn new(xy: Xy, direction: Direction) -> Self {
        Self {
            xy,
            walking: None,
            direction,
        }
    }

    /// The tile this body occupies or is about to occupy
    pub fn reserved_tile(&self) -> RowColumn {
        match &self.walking {
            Some(walking) => xy_to_row_column(walking.target_xy),
            None => xy_to_row_column(self.xy),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.walking.is_none()
    }

    /// Advance the walk, if any, to `now`.
    pub fn advance(&mut self, now: f64) {
        let Some(walking) = self.walking else {
            return;
        };

        if now < walking.start {
            return;
        }

        if now < walking.eta {
            let fraction = walking.fraction(now);
            self.xy = (
                walking.origin_xy.0 + (walking.target_xy.0 - walking.origin_xy.0) * fraction,
                walking.origin_xy.1 + (walking.target_xy.1 - walking.origin_xy.1) * fraction,
            );
        } else {
            self.xy = walking.target_xy;
            self.direction = walking.direction();
            self.walking = None;
        }
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cat {
    pub body: Body,
    /// Instruction to walk in the given direction at the next tick
    pub direction_to_walk: Option<Direction>,
}

/// A mouse or a dog, wandering on its own schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Npc {
    pub kind: ActorKind,
    pub body: Body,
    /// When to perform the next walk, in seconds
    pub next_walk: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(start: f64, eta: f64) -> Walking {
        Walking {
            start,
            eta,
            origin_xy: (0.0, 0.0),
            target_xy: (32.0, 0.0),
        }
    }

    #[test]
    fn advance_interpolates_then_snaps() {
        let mut body = Body::new((0.0, 0.0), Direction::North);
        body.walking = Some(walk(1.0, 1.25));

        body.advance(0.5);
        assert_eq!(body.xy, (0.0, 0.0));

        body.advance(1.125);
        assert_eq!(body.xy, (16.0, 0.0));
        assert_eq!(body.direction, Direction::North);
        assert_eq!(body.reserved_tile(), (0, 1));

        body.advance(1.25);
        assert_eq!(body.xy, (32.0, 0.0));
        assert_eq!(body.direction, Direction::East);
        assert!(body.is_idle());
    }

    #[test]
    fn fraction_is_clamped() {
        let walking = walk(2.0, 3.0);
        assert_eq!(walking.fraction(1.0), 0.0);
        assert_eq!(walking.fraction(2.5), 0.5);
        assert_eq!(walking.fraction(4.0), 1.0);
    }
}
