//! Failure classification configuration.

use serde::{Deserialize, Serialize};

/// How a permission refusal is split between "cancelled" and "denied".
///
/// A refusal whose message contains any of the keywords (case-insensitive)
/// counts as the user cancelling; anything else is a denial.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub permission_cancel_keywords: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            permission_cancel_keywords: vec!["cancel".into()],
        }
    }
}
