pub mod chat_endpoint;

pub use chat_endpoint::{ChatCompletion, ChatEndpoint};
