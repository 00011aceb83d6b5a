pub mod config;
pub mod error;
pub mod prompts;
pub mod state;
pub mod types;

pub use config::BoardroomConfig;
pub use error::{BoardroomError, Result};
pub use state::{ChatState, RequestState, ToolState};
pub use types::*;
