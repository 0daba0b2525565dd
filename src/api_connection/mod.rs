pub mod connection;
pub mod endpoints;

pub use connection::{extract_json_payload, ApiConnectionError, ChatCompletionClient};
pub use endpoints::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
