use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BoardError, SetupViolation};

/// The number of cells on a board.
pub const BOARD_CELLS: usize = 25;
/// Cells owned by the starting team after a full setup.
pub const STARTING_TEAM_CELLS: usize = 9;
/// Cells owned by the other team after a full setup.
pub const SECOND_TEAM_CELLS: usize = 8;
pub const NEUTRAL_CELLS: usize = 7;
pub const ASSASSIN_CELLS: usize = 1;

/// One of the two teams, and the perspective hints are requested from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

/// The category of a board cell.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Blue,
    Red,
    Neutral,
    Assassin,
    #[default]
    Unassigned,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

impl From<Team> for Role {
    fn from(team: Team) -> Role {
        match team {
            Team::Blue => Role::Blue,
            Team::Red => Role::Red,
        }
    }
}

impl Role {
    /// The team owning this role, if it is a team role.
    pub fn team(self) -> Option<Team> {
        match self {
            Role::Blue => Some(Team::Blue),
            Role::Red => Some(Team::Red),
            _ => None,
        }
    }

    pub fn is_assigned(self) -> bool {
        self != Role::Unassigned
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Blue => write!(f, "blue"),
            Team::Red => write!(f, "red"),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Blue => write!(f, "blue"),
            Role::Red => write!(f, "red"),
            Role::Neutral => write!(f, "neutral"),
            Role::Assassin => write!(f, "assassin"),
            Role::Unassigned => write!(f, "unassigned"),
        }
    }
}

/// The error type for the [`FromStr`] instances of [`Role`] and [`Team`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl std::error::Error for UnknownRole {}

impl std::fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown role '{}'", self.0)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" | "b" => Ok(Role::Blue),
            "red" | "r" => Ok(Role::Red),
            "neutral" | "n" => Ok(Role::Neutral),
            "assassin" | "a" => Ok(Role::Assassin),
            "unassigned" | "none" | "-" => Ok(Role::Unassigned),
            _ => Err(UnknownRole(String::from(s))),
        }
    }
}

impl FromStr for Team {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_str(s)?
            .team()
            .ok_or_else(|| UnknownRole(String::from(s)))
    }
}

/// A stable identifier of a cell.
///
/// It survives edits of the cell's word and role, but a board that is
/// replaced wholesale gets fresh identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    /// The word as typed, whitespace is only trimmed when a request is built.
    pub word: String,
    pub role: Role,
}

/// How many cells hold each role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub blue: usize,
    pub red: usize,
    pub neutral: usize,
    pub assassin: usize,
    pub unassigned: usize,
}

impl RoleCounts {
    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Blue => self.blue,
            Role::Red => self.red,
            Role::Neutral => self.neutral,
            Role::Assassin => self.assassin,
            Role::Unassigned => self.unassigned,
        }
    }
}

/// The 25 cells of a game layout.
///
/// Mutations either replace a single cell or the whole board, never anything
/// in between. No role counts are enforced here; see [`Board::check_setup()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
    /// The id given to the next cell that is created.
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with empty words and no roles.
    pub fn new() -> Self {
        let mut next_id = 0;
        let cells = Self::fresh_cells(&mut next_id, |_| String::new());
        Self { cells, next_id }
    }

    fn fresh_cells(
        next_id: &mut u32,
        mut word_at: impl FnMut(usize) -> String,
    ) -> [Cell; BOARD_CELLS] {
        std::array::from_fn(|idx| {
            let id = CellId(*next_id);
            *next_id += 1;
            Cell {
                id,
                word: word_at(idx),
                role: Role::Unassigned,
            }
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// The position of the cell with this id, if it is still on the board.
    pub fn index_of(&self, id: CellId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id == id)
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Cell, BoardError> {
        self.cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index })
    }

    /// Replaces the word of one cell, keeping its role.
    pub fn set_word(&mut self, index: usize, text: &str) -> Result<(), BoardError> {
        self.cell_mut(index)?.word = String::from(text);
        Ok(())
    }

    /// Replaces the role of one cell, keeping its word.
    pub fn set_role(&mut self, index: usize, role: Role) -> Result<(), BoardError> {
        self.cell_mut(index)?.role = role;
        Ok(())
    }

    /// Empties every word and unassigns every role.
    pub fn reset(&mut self) {
        self.cells = Self::fresh_cells(&mut self.next_id, |_| String::new());
    }

    /// Replaces the whole board with these words, all unassigned.
    pub(crate) fn replace_words(&mut self, words: [String; BOARD_CELLS]) {
        let mut words = words.into_iter();
        self.cells = Self::fresh_cells(&mut self.next_id, |_| words.next().unwrap_or_default());
    }

    /// Replaces every role at once, keeping words and ids.
    pub(crate) fn replace_roles(&mut self, roles: [Role; BOARD_CELLS]) {
        for (cell, role) in self.cells.iter_mut().zip(roles) {
            cell.role = role;
        }
    }

    pub fn role_counts(&self) -> RoleCounts {
        let mut counts = RoleCounts::default();
        for cell in &self.cells {
            match cell.role {
                Role::Blue => counts.blue += 1,
                Role::Red => counts.red += 1,
                Role::Neutral => counts.neutral += 1,
                Role::Assassin => counts.assassin += 1,
                Role::Unassigned => counts.unassigned += 1,
            }
        }
        counts
    }

    /// Checks the role counts of a completed setup, and returns the
    /// starting team (the one with the extra cell).
    pub fn check_setup(&self) -> Result<Team, SetupViolation> {
        let counts = self.role_counts();
        if counts.unassigned > 0 {
            return Err(SetupViolation::UnassignedCells {
                count: counts.unassigned,
            });
        }
        if counts.assassin != ASSASSIN_CELLS {
            return Err(SetupViolation::AssassinCount {
                count: counts.assassin,
            });
        }
        if counts.neutral != NEUTRAL_CELLS {
            return Err(SetupViolation::NeutralCount {
                count: counts.neutral,
            });
        }
        match (counts.blue, counts.red) {
            (STARTING_TEAM_CELLS, SECOND_TEAM_CELLS) => Ok(Team::Blue),
            (SECOND_TEAM_CELLS, STARTING_TEAM_CELLS) => Ok(Team::Red),
            (blue, red) => Err(SetupViolation::TeamCounts { blue, red }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty_and_unassigned() {
        let board = Board::new();
        assert_eq!(board.cells().len(), BOARD_CELLS);
        for cell in board.cells() {
            assert_eq!(cell.word, "");
            assert_eq!(cell.role, Role::Unassigned);
        }
        assert_eq!(board.role_counts().unassigned, BOARD_CELLS);
    }

    #[test]
    fn edits_keep_the_other_half_of_the_cell() {
        let mut board = Board::new();
        board.set_role(3, Role::Assassin).unwrap();
        board.set_word(3, "  poison ").unwrap();
        let cell = board.cell(3).unwrap();
        assert_eq!(cell.word, "  poison ");
        assert_eq!(cell.role, Role::Assassin);

        board.set_word(3, "apple").unwrap();
        assert_eq!(board.cell(3).unwrap().role, Role::Assassin);
    }

    #[test]
    fn free_editing_allows_any_role_counts() {
        let mut board = Board::new();
        board.set_role(0, Role::Assassin).unwrap();
        board.set_role(1, Role::Assassin).unwrap();
        board.set_word(2, "tree").unwrap();
        board.set_word(4, "tree").unwrap();
        assert_eq!(board.role_counts().assassin, 2);
        assert!(board.check_setup().is_err());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(
            board.set_word(25, "x"),
            Err(BoardError::IndexOutOfRange { index: 25 })
        );
        assert_eq!(
            board.set_role(100, Role::Red),
            Err(BoardError::IndexOutOfRange { index: 100 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn edits_keep_ids_and_reset_replaces_them() {
        let mut board = Board::new();
        let id = board.cell(7).unwrap().id;
        board.set_word(7, "car").unwrap();
        board.set_role(7, Role::Red).unwrap();
        assert_eq!(board.cell(7).unwrap().id, id);
        assert_eq!(board.index_of(id), Some(7));

        board.reset();
        assert_eq!(board.index_of(id), None);
        let cell = board.cell(7).unwrap();
        assert_eq!(cell.word, "");
        assert_eq!(cell.role, Role::Unassigned);
    }

    #[test]
    fn check_setup_reports_the_starting_team() {
        let mut board = Board::new();
        let mut roles = [Role::Neutral; BOARD_CELLS];
        roles[..9].fill(Role::Red);
        roles[9..17].fill(Role::Blue);
        roles[24] = Role::Assassin;
        board.replace_roles(roles);
        assert_eq!(board.check_setup(), Ok(Team::Red));

        board.set_role(0, Role::Blue).unwrap();
        assert_eq!(board.check_setup(), Ok(Team::Blue));

        board.set_role(1, Role::Blue).unwrap();
        assert_eq!(
            board.check_setup(),
            Err(SetupViolation::TeamCounts { blue: 10, red: 7 })
        );

        board.set_role(24, Role::Neutral).unwrap();
        assert_eq!(
            board.check_setup(),
            Err(SetupViolation::AssassinCount { count: 0 })
        );

        board.set_role(24, Role::Unassigned).unwrap();
        assert_eq!(
            board.check_setup(),
            Err(SetupViolation::UnassignedCells { count: 1 })
        );
    }

    #[test]
    fn roles_and_teams_parse() {
        assert_eq!("Blue".parse::<Role>(), Ok(Role::Blue));
        assert_eq!("a".parse::<Role>(), Ok(Role::Assassin));
        assert_eq!("red".parse::<Team>(), Ok(Team::Red));
        assert!("neutral".parse::<Team>().is_err());
        assert!("purple".parse::<Role>().is_err());
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Role::from(Team::Red), Role::Red);
    }
}
