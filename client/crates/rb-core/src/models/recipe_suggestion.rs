use serde::{Deserialize, Serialize};

/// Recipe produced for a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub recipe: String,
}
