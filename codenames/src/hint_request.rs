use tracing::warn;

use crate::{Board, HintRequest, Role, Team};

/// Partitions the board's words by role, seen from `team`'s perspective.
///
/// Words are trimmed here, not when they are edited. Unassigned cells are
/// left out. If several cells are marked as the assassin, the first one
/// is sent.
pub fn build_hint_request(board: &Board, team: Team) -> HintRequest {
    let mut req = HintRequest::default();
    let mut assassin: Option<&str> = None;
    for cell in board.cells() {
        let word = cell.word.trim();
        match cell.role {
            Role::Blue | Role::Red if cell.role == Role::from(team) => {
                req.my_words.push(String::from(word))
            }
            Role::Blue | Role::Red => req.opponent_words.push(String::from(word)),
            Role::Neutral => req.neutral_words.push(String::from(word)),
            Role::Assassin => {
                if assassin.is_some() {
                    warn!(word, "More than one assassin on the board, ignoring this one");
                } else {
                    assassin = Some(word);
                }
            }
            Role::Unassigned => {}
        }
    }
    req.assassin_word = String::from(assassin.unwrap_or_default());
    req
}
