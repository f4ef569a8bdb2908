//! Prompt construction and reply parsing for language-model interpreters.

use std::fmt::Write;

use super::error::NumoChatError;
use super::types::{CommandContext, InterpretedCommand};

/// Builds the system prompt listing the account's options.
#[must_use]
pub fn system_prompt(context: &CommandContext) -> String {
    let mut prompt = String::from(
        "You turn short personal-finance commands into a single ledger entry.\n\
         Reply with one JSON object and nothing else, using these fields:\n\
         - type: \"revenue\" or \"expense\"\n\
         - description: short description of the entry\n\
         - amount: integer amount in cents (\"R$ 12,50\" is 1250)\n\
         - category_id: id of the best matching category, or null (expenses only)\n\
         - payment_option_id: id of the best matching payment option, or null\n\
         - month, year, day: when the entry happened\n\
         - fixed: true only for recurring expenses\n",
    );

    let _ = writeln!(
        prompt,
        "Today is {}. Resolve relative dates against it.",
        context.today.format("%Y-%m-%d")
    );

    prompt.push_str("\nCategories:\n");
    if context.categories.is_empty() {
        prompt.push_str("(none)\n");
    }
    for option in &context.categories {
        let _ = writeln!(prompt, "- {}: {}", option.id, option.name);
    }

    prompt.push_str("\nPayment options:\n");
    if context.payment_options.is_empty() {
        prompt.push_str("(none)\n");
    }
    for option in &context.payment_options {
        let _ = writeln!(prompt, "- {}: {}", option.id, option.name);
    }

    prompt
}

/// Parses the interpreter's JSON reply.
///
/// # Errors
///
/// Returns `NumoChatError::Unparseable` if the reply is not the expected JSON.
pub fn parse_reply(content: &str) -> Result<InterpretedCommand, NumoChatError> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(trimmed).map_err(|e| NumoChatError::Unparseable(e.to_string()))
}
