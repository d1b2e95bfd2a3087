use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::{
    Board, BoardError, Role, Team, WordPool, ASSASSIN_CELLS, BOARD_CELLS, NEUTRAL_CELLS,
    SECOND_TEAM_CELLS, STARTING_TEAM_CELLS,
};

/// Fills the board with 25 distinct words drawn uniformly from the pool,
/// and unassigns all roles.
///
/// If the pool is too small, the board is left unchanged.
pub fn randomize_words<R: Rng + ?Sized>(
    board: &mut Board,
    pool: &WordPool,
    rng: &mut R,
) -> Result<(), BoardError> {
    if pool.len() < BOARD_CELLS {
        return Err(BoardError::InsufficientPool {
            available: pool.len(),
            required: BOARD_CELLS,
        });
    }
    // A full Fisher-Yates shuffle, then the first 25 words
    let mut words = pool.words().to_vec();
    words.shuffle(rng);
    words.truncate(BOARD_CELLS);
    let words: [String; BOARD_CELLS] = match words.try_into() {
        Ok(words) => words,
        Err(words) => unreachable!("truncated to {} words, got {}", BOARD_CELLS, words.len()),
    };
    debug!(pool_size = pool.len(), "Randomized board words");
    board.replace_words(words);
    Ok(())
}

/// Assigns roles to all 25 cells so that a completed setup results, and
/// returns the starting team.
///
/// A coin flip decides which team starts. The starting team gets 9 cells,
/// the other 8, and there are 7 neutral cells and a single assassin.
/// Words are not touched.
pub fn randomize_setup<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Team {
    let mut indices: [usize; BOARD_CELLS] = std::array::from_fn(|idx| idx);
    indices.shuffle(rng);

    let starting_team = if rng.gen::<bool>() {
        Team::Blue
    } else {
        Team::Red
    };
    let allotment = [
        (Role::from(starting_team), STARTING_TEAM_CELLS),
        (Role::from(starting_team.opponent()), SECOND_TEAM_CELLS),
        (Role::Neutral, NEUTRAL_CELLS),
        (Role::Assassin, ASSASSIN_CELLS),
    ];

    let mut roles = [Role::Unassigned; BOARD_CELLS];
    let mut shuffled = indices.iter();
    for (role, count) in allotment {
        for &idx in shuffled.by_ref().take(count) {
            roles[idx] = role;
        }
    }
    debug_assert!(shuffled.next().is_none());

    board.replace_roles(roles);
    debug!(%starting_team, "Randomized board setup");
    starting_team
}
