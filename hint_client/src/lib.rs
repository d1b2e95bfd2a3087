mod config;
mod dispatcher;
mod recording;
mod service;
mod shell;
pub use config::*;
pub use dispatcher::*;
pub use recording::*;
pub use service::*;
pub use shell::*;
