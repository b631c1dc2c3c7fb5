use serde::{Serialize, Deserialize};
use std::fmt;

use crate::error::{Result, GridError};

/// A point of the grid. `x` grows eastwards, `y` grows southwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Decode a flat state index into a coordinate of a `size x size` grid
    pub fn from_state(state: usize, size: usize) -> Self {
        Coord {
            x: (state % size) as i32,
            y: (state / size) as i32,
        }
    }

    /// Flat state index `y * size + x`
    ///
    /// Panics if the coordinate lies outside the grid, a negative
    /// component must never wrap into a valid index.
    pub fn to_state(&self, size: usize) -> usize {
        assert!(
            self.in_bounds(size),
            "coordinate {} outside a {}x{} grid",
            self,
            size,
            size
        );
        self.y as usize * size + self.x as usize
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// Add a displacement, clamping each component to `[0, size)`
    pub fn offset(&self, dx: i32, dy: i32, size: usize) -> Self {
        let max = size as i32 - 1;
        Coord {
            x: (self.x + dx).clamp(0, max),
            y: (self.y + dy).clamp(0, max),
        }
    }

    /// Coordinate reached by moving along `action` on a `size x size` grid
    pub fn shifted(&self, action: Action, size: usize) -> Self {
        let (dx, dy) = action.displacement();
        self.offset(dx, dy, size)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The four cardinal moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    North,
    East,
    South,
    West,
}

impl Action {
    /// All actions, in index order
    pub const ALL: [Action; 4] = [Action::North, Action::East, Action::South, Action::West];

    pub const COUNT: usize = 4;

    pub fn index(&self) -> usize {
        match self {
            Action::North => 0,
            Action::East => 1,
            Action::South => 2,
            Action::West => 3,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(GridError::InvalidAction {
                action: index,
                max_actions: Action::COUNT,
            })
    }

    /// Unit displacement `(dx, dy)`
    pub fn displacement(&self) -> (i32, i32) {
        match self {
            Action::North => (0, -1),
            Action::East => (1, 0),
            Action::South => (0, 1),
            Action::West => (-1, 0),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self {
            Action::North => "⬆",
            Action::East => "➡",
            Action::South => "⬇",
            Action::West => "⬅",
        };
        write!(f, "{}", arrow)
    }
}

/// Tile type of a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Start,
    Trap,
    Goal,
}

impl CellKind {
    /// Reward collected when landing on a cell of this kind in a `size x size` grid
    pub fn reward(&self, size: usize) -> f64 {
        let span = 2.0 * (size as f64 - 1.0);
        match self {
            CellKind::Empty | CellKind::Start => -1.0,
            CellKind::Trap => -span,
            CellKind::Goal => span,
        }
    }

    /// Only the goal ends an episode
    pub fn is_terminal(&self) -> bool {
        *self == CellKind::Goal
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            CellKind::Empty => " ",
            CellKind::Start => "S",
            CellKind::Trap => "X",
            CellKind::Goal => "G",
        };
        write!(f, "{}", glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip_uses_row_major_layout() {
        let coord = Coord::new(2, 3);
        assert_eq!(coord.to_state(5), 17);
        assert_eq!(Coord::from_state(17, 5), coord);
    }

    #[test]
    fn test_offset_clamps_each_axis() {
        assert_eq!(Coord::new(0, 2).offset(-1, 0, 4), Coord::new(0, 2));
        assert_eq!(Coord::new(3, 3).offset(1, 1, 4), Coord::new(3, 3));
        assert_eq!(Coord::new(3, 0).offset(1, 1, 4), Coord::new(3, 1));
    }

    #[test]
    #[should_panic]
    fn test_to_state_rejects_out_of_grid() {
        Coord::new(-1, 0).to_state(3);
    }

    #[test]
    fn test_action_index_conversion() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i).unwrap(), *action);
        }
        assert!(matches!(
            Action::from_index(4),
            Err(GridError::InvalidAction { action: 4, max_actions: 4 })
        ));
    }

    #[test]
    fn test_cell_rewards() {
        assert_eq!(CellKind::Empty.reward(5), -1.0);
        assert_eq!(CellKind::Start.reward(5), -1.0);
        assert_eq!(CellKind::Trap.reward(5), -8.0);
        assert_eq!(CellKind::Goal.reward(5), 8.0);
        assert!(CellKind::Goal.is_terminal());
        assert!(!CellKind::Trap.is_terminal());
    }
}
