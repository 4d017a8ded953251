pub mod config;
pub mod error;
pub mod openrouter;
pub mod traits;
pub mod types;

pub use config::{ClientFactory, ProviderConfig};
pub use error::{LlmError, Result};
pub use openrouter::OpenRouterClient;
pub use reqwest::StatusCode;
pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
pub use types::Message;
