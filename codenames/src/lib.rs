pub use board::*;
pub use errors::*;
pub use game::*;
pub use hint_request::*;
pub use protocol::*;
pub use randomize::*;
pub use session::*;
pub use visualization::*;
pub use word_pool::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game;
mod hint_request;
mod protocol;
mod randomize;
mod session;
mod visualization;
mod word_pool;
