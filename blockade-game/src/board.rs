use crate::player::{CellState, Icon, PlayerId};
use crate::util::{column_index, column_letter, MAX_COLUMNS};
use std::{
    fmt::Display,
    ops::{Index, IndexMut},
    str::FromStr,
};

use thiserror::Error;


/// A 0-indexed cell coordinate. The text form puts the column letter first
/// and counts rows from 1, so "A7" is row 6, column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Parses a board label: one column letter, then one or two row digits.
    pub fn parse(token: &str, size: u8) -> Result<Self, InvalidMoveSyntax> {
        let mut chars = token.chars();
        let letter = chars.next().ok_or(InvalidMoveSyntax::Malformed)?;
        let digits = chars.as_str();
        if !letter.is_ascii_alphabetic() || digits.is_empty() || digits.len() > 2 {
            return Err(InvalidMoveSyntax::Malformed);
        }

        let col = column_index(letter).ok_or(InvalidMoveSyntax::Malformed)?;
        if col >= size {
            return Err(InvalidMoveSyntax::UnknownColumn(letter.to_ascii_uppercase()));
        }

        let row: u8 = digits
            .parse()
            .map_err(|_| InvalidMoveSyntax::RowOutOfRange(digits.to_owned()))?;
        if row < 1 || row > size {
            return Err(InvalidMoveSyntax::RowOutOfRange(digits.to_owned()));
        }

        Ok(Self::new(row - 1, col))
    }

    /// The inverse of [`Pos::parse`]: row 6, column 0 labels itself "A7".
    pub fn label(self) -> String {
        format!("{}{}", column_letter(self.col), self.row + 1)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[test]
fn test_pos_label() {
    assert_eq!(Pos::new(0, 0).label(), "A1");
    assert_eq!(Pos::new(6, 0).label(), "A7");
    assert_eq!(Pos::new(0, 7).label(), "H1");
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is outside the board.")]
pub struct OutOfBounds(pub Pos);

/// A square board of cells, `size` per side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grid {
    size: u8,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![CellState::Empty; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Pos) -> Result<CellState, OutOfBounds> {
        self.contains(pos)
            .then(|| self[pos])
            .ok_or(OutOfBounds(pos))
    }

    /// Writes one cell. Cells only ever go Empty -> Occupied -> Blocked;
    /// [`Game::make_move`] owns that rule, `set` does not re-check it.
    pub fn set(&mut self, pos: Pos, state: CellState) -> Result<(), OutOfBounds> {
        if !self.contains(pos) {
            return Err(OutOfBounds(pos));
        }
        self[pos] = state;
        Ok(())
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|c| c.is_empty())
    }

    /// Where `player` currently stands, if anywhere.
    pub fn position_of(&self, player: PlayerId) -> Option<Pos> {
        let size = self.size as usize;
        self.cells
            .iter()
            .position(|&c| c == CellState::Occupied(player))
            .map(|i| Pos::new((i / size) as u8, (i % size) as u8))
    }

    fn index_of(&self, pos: Pos) -> usize {
        pos.row as usize * self.size as usize + pos.col as usize
    }
}

impl Index<Pos> for Grid {
    type Output = CellState;

    /// Panics out of bounds; [`Grid::get`] is the checked form.
    fn index(&self, index: Pos) -> &Self::Output {
        assert!(self.contains(index), "position {index} out of bounds");
        &self.cells[self.index_of(index)]
    }
}

impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        assert!(self.contains(index), "position {index} out of bounds");
        let i = self.index_of(index);
        &mut self.cells[i]
    }
}

impl FromStr for Grid {
    type Err = &'static str;

    /// Reads a square diagram, one row per line: '.' empty, 'X'/'O' the
    /// players, '~' blocked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let size = rows.len();
        if size < 2 || size > MAX_COLUMNS as usize {
            return Err("Boards are 2 to 26 cells per side.");
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.chars().count() != size {
                return Err("Boards must be square.");
            }
            for c in row.chars() {
                cells.push(c.try_into()?);
            }
        }

        Ok(Self {
            size: size as u8,
            cells,
        })
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, " {}", column_letter(col))?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                write!(f, "|{}", self[Pos::new(row, col)].icon())?;
            }
            writeln!(f, "|")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Claim an empty cell, walling off the one left behind.
    To(Pos),
    /// Concede the game to the opponent.
    Resign,
}

impl Move {
    pub const SYNTAX: &'static str = "\
        Valid moves:\n\
          \ta position, column letter then row number (like A7)\n\
          \tresign (also: quit, exit)";

    /// Parses one line of player input against a board `size` cells wide.
    pub fn parse(input: &str, size: u8) -> Result<Self, InvalidMoveSyntax> {
        let token = input.trim();
        match token.to_ascii_lowercase().as_str() {
            "resign" | "quit" | "exit" => Ok(Self::Resign),
            _ => Pos::parse(token, size).map(Self::To),
        }
    }
}

/// proof that a move has already been checked against the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedMove(Move);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveSyntax {
    #[error("That is not a valid position. Try something like A7.")]
    Malformed,
    #[error("Column {0} does not exist on the board.")]
    UnknownColumn(char),
    #[error("Row {0} does not exist on the board.")]
    RowOutOfRange(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("You cannot move after the game is over.")]
    GameOver,
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    #[error("{0} is walled off.")]
    Blocked(Pos),
    #[error("Your opponent is standing on {0}.")]
    OccupiedByOpponent(Pos),
    #[error("You are already standing on {0}.")]
    OccupiedBySelf(Pos),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveCommand {
    #[error("Invalid move syntax: {0}\n{}", Move::SYNTAX)]
    InvalidSyntax(#[from] InvalidMoveSyntax),
    #[error("That move is illegal: {0}")]
    InvalidMove(#[from] InvalidMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Winner(pub Option<PlayerId>);

impl Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(player) => write!(f, "{player} wins."),
            None => write!(f, "Draw."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameState {
    Ongoing,
    Finished(Winner),
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "Ongoing match."),
            GameState::Finished(winner) => write!(f, "{winner}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub state: GameState,
    pub turn: PlayerId,
    grid: Grid,
    positions: [Option<Pos>; 2],
}

impl Game {
    pub fn new(size: u8) -> Self {
        Self {
            state: GameState::Ongoing,
            turn: PlayerId::default(),
            grid: Grid::new(size),
            positions: [None; 2],
        }
    }

    /// Rebuilds a game from a board diagram. The side to move gets `turn`;
    /// player positions are read off the grid. A position that leaves the
    /// side to move with nowhere to go starts finished as a draw.
    pub fn from_position(turn: PlayerId, grid: Grid) -> Self {
        let positions = [
            grid.position_of(PlayerId::One),
            grid.position_of(PlayerId::Two),
        ];
        let state = if grid.has_empty_cell() {
            GameState::Ongoing
        } else {
            GameState::Finished(Winner(None))
        };
        Self {
            state,
            turn,
            grid,
            positions,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position_of(&self, player: PlayerId) -> Option<Pos> {
        self.positions[player as usize]
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(self.state, GameState::Ongoing)
    }

    pub fn verify_move_str(&self, input: &str) -> Result<VerifiedMove, InvalidMoveCommand> {
        let p_move = Move::parse(input, self.grid.size())?;
        self.verify_move(p_move).map_err(InvalidMoveCommand::from)
    }

    /// Checks a move against the current position without applying it.
    pub fn verify_move(&self, p_move: Move) -> Result<VerifiedMove, InvalidMove> {
        if !self.is_ongoing() {
            return Err(InvalidMove::GameOver);
        }

        if let Move::To(pos) = p_move {
            match self.grid.get(pos)? {
                CellState::Empty => {}
                CellState::Blocked => return Err(InvalidMove::Blocked(pos)),
                CellState::Occupied(owner) if owner == self.turn => {
                    return Err(InvalidMove::OccupiedBySelf(pos))
                }
                CellState::Occupied(_) => return Err(InvalidMove::OccupiedByOpponent(pos)),
            }
        }

        Ok(VerifiedMove(p_move))
    }

    pub fn make_move(&mut self, p_move: VerifiedMove) {
        if !self.is_ongoing() {
            panic!("make_move must only be called while the game is ongoing.");
        }

        match p_move.0 {
            Move::Resign => {
                self.state = GameState::Finished(Winner(Some(!self.turn)));
            }
            Move::To(pos) => {
                if let Some(prev) = self.positions[self.turn as usize] {
                    self.grid[prev] = CellState::Blocked;
                }
                self.grid[pos] = CellState::Occupied(self.turn);
                self.positions[self.turn as usize] = Some(pos);
                self.post_move_checks();
            }
        }
    }

    /// The opponent may claim any empty cell anywhere, so they are stuck
    /// only once the whole grid is spent. A stuck opponent loses.
    fn post_move_checks(&mut self) {
        if !self.grid.has_empty_cell() {
            self.state = GameState::Finished(Winner(Some(self.turn)));
            return;
        }

        self.turn = !self.turn;
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state {
            GameState::Ongoing => writeln!(f, "{}'s turn.", self.turn)?,
            GameState::Finished(winner) => writeln!(f, "{winner}")?,
        }
        write!(f, "{}", self.grid)
    }
}
