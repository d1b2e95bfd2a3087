use quickcheck::Arbitrary;

use crate::{Board, Role, Team, BOARD_CELLS};

/// A board as it may look during free editing, with at most one assassin.
#[derive(Clone, Debug)]
pub struct ArbitraryBoard(pub Board);

const WORDS: [&str; 10] = [
    "apple", " tree", "green ", "car", "road", "wheel", "house", " window ", "", "apple",
];

impl Arbitrary for Role {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[
            Role::Blue,
            Role::Red,
            Role::Neutral,
            Role::Assassin,
            Role::Unassigned,
        ])
        .unwrap()
    }
}

impl Arbitrary for Team {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Team::Blue, Team::Red]).unwrap()
    }
}

impl Arbitrary for ArbitraryBoard {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut board = Board::new();
        let mut has_assassin = false;
        for idx in 0..BOARD_CELLS {
            board.set_word(idx, g.choose(&WORDS).unwrap()).unwrap();
            let mut role = Role::arbitrary(g);
            if role == Role::Assassin {
                if has_assassin {
                    role = Role::Neutral;
                }
                has_assassin = true;
            }
            board.set_role(idx, role).unwrap();
        }
        ArbitraryBoard(board)
    }
}
