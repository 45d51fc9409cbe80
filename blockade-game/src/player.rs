use std::{fmt::Display, ops::Not};

/// a single-character "icon" that an object can have
pub trait Icon {
    fn icon(&self) -> char;
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerId {
    #[default]
    One,
    Two,
}

impl Not for PlayerId {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::One => write!(f, "Player One"),
            PlayerId::Two => write!(f, "Player Two"),
        }
    }
}

impl Icon for PlayerId {
    fn icon(&self) -> char {
        match self {
            PlayerId::One => 'X',
            PlayerId::Two => 'O',
        }
    }
}

/// What one cell holds. Cells only ever go Empty -> Occupied -> Blocked;
/// a blocked cell stays blocked for the rest of the game.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Occupied(PlayerId),
    Blocked,
}

impl CellState {
    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

impl TryFrom<char> for CellState {
    type Error = &'static str;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            '.' => Self::Empty,
            'X' => Self::Occupied(PlayerId::One),
            'O' => Self::Occupied(PlayerId::Two),
            '~' => Self::Blocked,
            _ => return Err("Unrecognized cell."),
        })
    }
}

impl Icon for CellState {
    fn icon(&self) -> char {
        match self {
            CellState::Empty => ' ',
            CellState::Occupied(player) => player.icon(),
            CellState::Blocked => '~',
        }
    }
}
