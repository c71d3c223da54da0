mod analysis;
mod backend;
mod confidence;
mod message;
mod role;
mod slash_commands;

pub use analysis::*;
pub use backend::*;
pub use confidence::*;
pub use message::*;
pub use role::*;
pub use slash_commands::*;
