mod analysis_session;
mod confidence_model;
mod conversation_store;
mod history_browser;
mod payload_parser;

pub use analysis_session::*;
pub use confidence_model::*;
pub use conversation_store::*;
pub use history_browser::*;
pub use payload_parser::*;
