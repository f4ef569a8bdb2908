//! NumoChat: natural-language revenue and expense entry.
//!
//! A [`CommandInterpreter`] turns a free-text command into an
//! [`InterpretedCommand`]; [`NumoChatService`] checks it against the
//! account's options and turns it into a ledger input.

pub mod error;
pub mod prompt;
pub mod service;
pub mod types;

pub use error::NumoChatError;
pub use prompt::{parse_reply, system_prompt};
pub use service::NumoChatService;
pub use types::{CommandContext, CommandInterpreter, InterpretedCommand, NamedOption, ResolvedEntry};
