use crate::BOARD_CELLS;

/// The error type for board edits and randomization.
///
/// None of these leave the board partially modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    IndexOutOfRange { index: usize },
    InsufficientPool { available: usize, required: usize },
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::IndexOutOfRange { index } => write!(
                f,
                "Cell index {} is out of range, the board has {} cells",
                index, BOARD_CELLS
            ),
            BoardError::InsufficientPool {
                available,
                required,
            } => write!(
                f,
                "The word pool has {} distinct words, but {} are needed to fill the board",
                available, required
            ),
        }
    }
}

/// Describes which constraint of a completed setup a board violates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupViolation {
    UnassignedCells { count: usize },
    AssassinCount { count: usize },
    NeutralCount { count: usize },
    TeamCounts { blue: usize, red: usize },
}

impl std::error::Error for SetupViolation {}

impl std::fmt::Display for SetupViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupViolation::UnassignedCells { count } => {
                write!(f, "{} cells have no role", count)
            }
            SetupViolation::AssassinCount { count } => {
                write!(f, "Expected exactly one assassin, found {}", count)
            }
            SetupViolation::NeutralCount { count } => {
                write!(f, "Expected 7 neutral cells, found {}", count)
            }
            SetupViolation::TeamCounts { blue, red } => write!(
                f,
                "Expected 9 and 8 team cells, found {} blue and {} red",
                blue, red
            ),
        }
    }
}

/// Why a hint request did not produce a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintError {
    /// The service could not be reached, or did not answer in time.
    Network(String),
    /// The service answered with a non-2xx status.
    Status { code: u16, message: Option<String> },
    /// The response body is not a valid hint result.
    InvalidResponse(String),
}

impl HintError {
    /// The text shown to the player. Every kind of failure can be retried.
    pub fn user_message(&self) -> &'static str {
        "Failed to generate hints. Please try again."
    }
}

impl std::error::Error for HintError {}

impl std::fmt::Display for HintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HintError::Network(msg) => write!(f, "Could not reach the hint service: {}", msg),
            HintError::Status {
                code,
                message: Some(msg),
            } => write!(f, "The hint service responded with status {}: {}", code, msg),
            HintError::Status {
                code,
                message: None,
            } => write!(f, "The hint service responded with status {}", code),
            HintError::InvalidResponse(msg) => {
                write!(f, "The hint service sent an invalid response: {}", msg)
            }
        }
    }
}
