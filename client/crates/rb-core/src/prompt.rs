use crate::{CoreError, Result as CoreResult};

pub const EMPTY_PROMPT_MESSAGE: &str =
    "Please enter a prompt or ingredients to suggest a recipe.";

/// Reject blank prompts before they reach the network.
#[track_caller]
pub fn validate_prompt(prompt: &str) -> CoreResult<&str> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(EMPTY_PROMPT_MESSAGE));
    }
    Ok(trimmed)
}
