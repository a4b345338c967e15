//! 上游 Provider

pub mod chatgot;
pub mod error;

pub use chatgot::{ChatGotProvider, ConversationRequest};
pub use error::ProviderError;
