use crate::error::{Result, SawError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The seven walker actions, in index order.
///
/// Labels follow the walk's historical naming table; the actual
/// displacement of each action is given by [`WalkAction::delta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WalkAction {
    Right,
    Down,
    Left,
    Up,
    LowerNext,
    UpperNext,
    Stop,
}

impl WalkAction {
    pub const COUNT: usize = 7;

    pub const ALL: [WalkAction; Self::COUNT] = [
        WalkAction::Right,
        WalkAction::Down,
        WalkAction::Left,
        WalkAction::Up,
        WalkAction::LowerNext,
        WalkAction::UpperNext,
        WalkAction::Stop,
    ];

    /// Actions that move the walker (everything but `Stop`).
    pub const MOVES: [WalkAction; 6] = [
        WalkAction::Right,
        WalkAction::Down,
        WalkAction::Left,
        WalkAction::Up,
        WalkAction::LowerNext,
        WalkAction::UpperNext,
    ];

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SawError::InvalidAction(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_action_str(action: &str) -> Result<Self> {
        match action {
            "right" => Ok(WalkAction::Right),
            "down" => Ok(WalkAction::Down),
            "left" => Ok(WalkAction::Left),
            "up" => Ok(WalkAction::Up),
            "lower_next" => Ok(WalkAction::LowerNext),
            "upper_next" => Ok(WalkAction::UpperNext),
            "noop" | "stop" => Ok(WalkAction::Stop),
            other => Err(SawError::UnknownActionName(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WalkAction::Right => "right",
            WalkAction::Down => "down",
            WalkAction::Left => "left",
            WalkAction::Up => "up",
            WalkAction::LowerNext => "lower_next",
            WalkAction::UpperNext => "upper_next",
            WalkAction::Stop => "noop",
        }
    }

    pub fn is_move(self) -> bool {
        self != WalkAction::Stop
    }

    /// `(dx, dy)` applied from a site whose `x + y` parity is `even`.
    /// Only the two diagonals look at parity.
    pub fn delta(self, even: bool) -> (isize, isize) {
        match self {
            WalkAction::Right => (0, -1),
            WalkAction::Down => (0, 1),
            WalkAction::Left => (1, 0),
            WalkAction::Up => (-1, 0),
            WalkAction::LowerNext if even => (1, 1),
            WalkAction::LowerNext => (-1, 1),
            WalkAction::UpperNext if even => (-1, -1),
            WalkAction::UpperNext => (1, -1),
            WalkAction::Stop => (0, 0),
        }
    }
}

impl TryFrom<usize> for WalkAction {
    type Error = SawError;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}

impl std::str::FromStr for WalkAction {
    type Err = SawError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_action_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_table() {
        for (i, a) in WalkAction::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
            assert_eq!(WalkAction::from_index(i).unwrap(), *a);
            assert_eq!(WalkAction::from_action_str(a.as_str()).unwrap(), *a);
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(matches!(
            WalkAction::from_index(7),
            Err(SawError::InvalidAction(7))
        ));
        assert!(WalkAction::try_from(usize::MAX).is_err());
    }

    #[test]
    fn stop_has_two_names() {
        assert_eq!("stop".parse::<WalkAction>().unwrap(), WalkAction::Stop);
        assert_eq!("noop".parse::<WalkAction>().unwrap(), WalkAction::Stop);
        assert!(matches!(
            "sideways".parse::<WalkAction>(),
            Err(SawError::UnknownActionName(_))
        ));
    }

    #[test]
    fn diagonals_depend_on_parity() {
        assert_eq!(WalkAction::LowerNext.delta(true), (1, 1));
        assert_eq!(WalkAction::LowerNext.delta(false), (-1, 1));
        assert_eq!(WalkAction::UpperNext.delta(true), (-1, -1));
        assert_eq!(WalkAction::UpperNext.delta(false), (1, -1));
        assert_eq!(WalkAction::Up.delta(true), WalkAction::Up.delta(false));
    }
}
