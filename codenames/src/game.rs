use rand::Rng;

use crate::{
    randomize_setup, randomize_words, Board, BoardError, Completion, HintError, HintResult,
    HintSession, PendingHint, RequestToken, Role, Team, WordPool,
};

/// The board, the team hints are requested for, and the hint session.
///
/// All mutations of a game in progress go through this type.
#[derive(Clone, Debug)]
pub struct Game {
    pub board: Board,
    pub hint_team: Team,
    pub hints: HintSession,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            hint_team: Team::Blue,
            hints: HintSession::new(),
        }
    }

    pub fn set_word(&mut self, index: usize, text: &str) -> Result<(), BoardError> {
        self.board.set_word(index, text)
    }

    pub fn set_role(&mut self, index: usize, role: Role) -> Result<(), BoardError> {
        self.board.set_role(index, role)
    }

    pub fn set_hint_team(&mut self, team: Team) {
        self.hint_team = team;
    }

    /// Empties the board and forgets all hints.
    pub fn reset(&mut self) {
        self.board.reset();
        self.hints.clear();
    }

    pub fn randomize_words<R: Rng + ?Sized>(
        &mut self,
        pool: &WordPool,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        randomize_words(&mut self.board, pool, rng)
    }

    /// Deals out roles, and requests hints for the starting team from now on.
    pub fn randomize_setup<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Team {
        let starting_team = randomize_setup(&mut self.board, rng);
        self.hint_team = starting_team;
        starting_team
    }

    pub fn request_hints(&mut self) -> PendingHint {
        self.hints.begin(&self.board, self.hint_team)
    }

    pub fn complete_hints(
        &mut self,
        token: RequestToken,
        outcome: Result<HintResult, HintError>,
    ) -> Completion {
        self.hints.complete(token, outcome)
    }
}
