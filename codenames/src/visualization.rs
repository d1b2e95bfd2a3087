use crate::{Board, HintResult, HintSession, HintState, Role, CLUE_SIZES};

const BOARD_SIDE: usize = 5;
const CELL_WIDTH: usize = 14;

fn role_tag(role: Role) -> &'static str {
    match role {
        Role::Blue => "B",
        Role::Red => "R",
        Role::Neutral => "N",
        Role::Assassin => "X",
        Role::Unassigned => " ",
    }
}

/// Draws the board as a 5 x 5 grid. Every cell shows its index, role and word.
pub fn visualize_board(board: &Board) -> String {
    let horizontal = "─".repeat((CELL_WIDTH + 1) * BOARD_SIDE - 1);
    let mut result = format!("╭{}╮\n", horizontal);
    for (row_idx, row) in board.cells().chunks(BOARD_SIDE).enumerate() {
        result += "│";
        for (col, cell) in row.iter().enumerate() {
            let label: String = cell.word.chars().take(CELL_WIDTH - 6).collect();
            result += &format!(
                "{:>2} {} {:<width$}│",
                row_idx * BOARD_SIDE + col,
                role_tag(cell.role),
                label,
                width = CELL_WIDTH - 5
            );
        }
        result += "\n";
    }
    result += &format!("╰{}╯", horizontal);
    result
}

/// Lists the hints from the largest clue size to the smallest.
pub fn visualize_hints(result: &HintResult) -> String {
    let mut lines = Vec::new();
    for size in CLUE_SIZES {
        lines.push(format!("{}-Word Hints:", size));
        let hints = result.hints(size);
        if hints.is_empty() {
            lines.push(format!("  No hints generated for {} words.", size));
        }
        for hint in hints {
            lines.push(format!("  {} (Score: {:.2})", hint.hint, hint.score));
            lines.push(format!("    Words: {}", hint.words.join(", ")));
        }
    }
    lines.join("\n")
}

/// A short status line for the hint session, followed by the hints if any.
pub fn visualize_session(session: &HintSession) -> String {
    let mut result = match session.state() {
        HintState::Idle => String::from("No hints requested yet."),
        HintState::Loading => String::from("Generating..."),
        HintState::Success => String::from("Generated Hints:"),
        HintState::Failure => String::new(),
    };
    if let Some(err) = session.error() {
        result += err.user_message();
    }
    if let Some(hints) = session.result() {
        result += "\n";
        result += &visualize_hints(hints);
    }
    result
}
