pub mod api;
pub mod assistants;
pub mod config;
pub mod error;
pub mod run;
pub mod session;
pub mod types;

pub use api::{create_router, AppState};
pub use assistants::{AssistantsApi, MockAssistants, OpenAiClient};
pub use config::Config;
pub use error::ChatError;
pub use run::RunDriver;
pub use session::{open_session, Session};
pub use types::*;
