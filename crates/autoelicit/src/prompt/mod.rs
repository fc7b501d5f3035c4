//! Prompt templates and prompt pairs.
//!
//! A prompt pair combines one system role with one user role. User roles are
//! templates: `{feature_names}` is replaced with the dataset's feature names
//! before the pair is sent.

pub mod breast_cancer;
mod template;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use template::{FEATURE_NAME_SEPARATOR, FEATURE_NAMES_PLACEHOLDER, PromptTemplate};

/// A fully rendered (system, user) prompt combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    /// Position in the elicitation run.
    pub index: usize,
    /// Index of the system role in the input list.
    pub system_index: usize,
    /// Index of the user role in the input list.
    pub user_index: usize,
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// Render every combination of system and user role.
    ///
    /// System roles form the outer loop: with systems `[s0, s1]` and users
    /// `[u0, u1]` the order is `(s0,u0), (s0,u1), (s1,u0), (s1,u1)`. System
    /// roles are sent verbatim.
    pub fn all(
        system_roles: &[PromptTemplate],
        user_roles: &[PromptTemplate],
        feature_names: &[String],
    ) -> Result<Vec<PromptPair>> {
        let rendered_users = user_roles
            .iter()
            .map(|u| u.render(feature_names))
            .collect::<Result<Vec<_>>>()?;

        let mut pairs = Vec::with_capacity(system_roles.len() * user_roles.len());
        for (system_index, system) in system_roles.iter().enumerate() {
            for (user_index, user) in rendered_users.iter().enumerate() {
                pairs.push(PromptPair {
                    index: pairs.len(),
                    system_index,
                    user_index,
                    system: system.as_str().trim().to_string(),
                    user: user.trim().to_string(),
                });
            }
        }
        Ok(pairs)
    }
}
