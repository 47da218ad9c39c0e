use serde::{Deserialize, Serialize};

/// One of the six adjacency directions on a hexagonal grid.
///
/// Assumes that the major orientation is horizontal. The declaration order
/// is the canonical exploration order used by the search algorithms, and
/// doubles as the slot order in neighbour tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Iterate through all `Direction`s in canonical order, from `Left`.
    pub fn iter() -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(Direction::Left), |direction| {
            use Direction::*;

            match direction {
                Left => Some(Right),
                Right => Some(UpLeft),
                UpLeft => Some(UpRight),
                UpRight => Some(DownLeft),
                DownLeft => Some(DownRight),
                DownRight => None,
            }
        })
    }

    /// The direction pointing the opposite way.
    ///
    /// This is an involution: `d.opposite().opposite() == d`.
    pub fn opposite(self) -> Direction {
        use Direction::*;

        match self {
            Left => Right,
            Right => Left,
            UpLeft => DownRight,
            UpRight => DownLeft,
            DownLeft => UpRight,
            DownRight => UpLeft,
        }
    }

    /// Slot index of this direction in a six-element neighbour table.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::iter() {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::UpLeft.opposite(), Direction::DownRight);
        assert_eq!(Direction::UpRight.opposite(), Direction::DownLeft);
    }

    #[test]
    fn iter_visits_all_six_in_slot_order() {
        use Direction::*;

        let all: Vec<_> = Direction::iter().collect();
        assert_eq!(all, vec![Left, Right, UpLeft, UpRight, DownLeft, DownRight]);
        for (index, direction) in all.into_iter().enumerate() {
            assert_eq!(direction.index(), index);
        }
    }
}
