//! Outbound HTTP clients.

pub mod openai;

pub use openai::OpenAiInterpreter;
