pub mod client;
pub mod error;
pub mod prompts;
pub mod retry;
pub mod schemas;
pub mod session;
pub mod settings;

pub use client::{ChatTransport, CompletionClient, CompletionOptions, TransportFault, TransportReply};
pub use error::{CompletionError, SessionError};
pub use schemas::chat::ChatMessage;
pub use session::{BlogDraft, Session};
pub use settings::Settings;
