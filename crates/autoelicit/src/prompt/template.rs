//! User-role templates with a `{feature_names}` placeholder.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ElicitError, Result};

/// Name of the only placeholder a template may use.
pub const FEATURE_NAMES_PLACEHOLDER: &str = "feature_names";

/// Separator between feature names in a rendered prompt.
pub const FEATURE_NAME_SEPARATOR: &str = ", ";

// Escaped braces, a `{placeholder}`, or a stray brace.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").unwrap());

/// A prompt string that may reference `{feature_names}`.
///
/// `{{` and `}}` render as literal braces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The unrendered template text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the template mentions the feature-name placeholder.
    pub fn has_feature_placeholder(&self) -> bool {
        TOKEN
            .captures_iter(&self.text)
            .any(|c| c.get(1).is_some_and(|m| m.as_str().trim() == FEATURE_NAMES_PLACEHOLDER))
    }

    /// Substitute the comma-joined feature names.
    pub fn render(&self, feature_names: &[String]) -> Result<String> {
        let joined = feature_names.join(FEATURE_NAME_SEPARATOR);
        let mut out = String::with_capacity(self.text.len() + joined.len());
        let mut last = 0;

        for caps in TOKEN.captures_iter(&self.text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&self.text[last..whole.start()]);
            last = whole.end();

            match whole.as_str() {
                "{{" => out.push('{'),
                "}}" => out.push('}'),
                "{" | "}" => {
                    return Err(ElicitError::Template(format!(
                        "unmatched '{}' at byte {}",
                        whole.as_str(),
                        whole.start()
                    )));
                }
                _ => {
                    let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                    if name != FEATURE_NAMES_PLACEHOLDER {
                        return Err(ElicitError::Template(format!(
                            "unknown placeholder '{{{}}}'",
                            name
                        )));
                    }
                    out.push_str(&joined);
                }
            }
        }
        out.push_str(&self.text[last..]);

        Ok(out)
    }
}

impl From<&str> for PromptTemplate {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for PromptTemplate {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["mean radius".to_string(), "worst area".to_string()]
    }

    #[test]
    fn test_render_substitutes_joined_names() {
        let t = PromptTemplate::new("Features: {feature_names}.");
        assert_eq!(t.render(&names()).unwrap(), "Features: mean radius, worst area.");
    }

    #[test]
    fn test_render_multiple_occurrences() {
        let t = PromptTemplate::new("{feature_names} / {feature_names}");
        let out = t.render(&names()).unwrap();
        assert_eq!(out.matches("worst area").count(), 2);
        assert!(!out.contains("{feature_names}"));
    }

    #[test]
    fn test_escaped_braces() {
        let t = PromptTemplate::new("Return {{\"x\": {{\"mean\": 0}}}} for {feature_names}");
        assert_eq!(
            t.render(&names()).unwrap(),
            "Return {\"x\": {\"mean\": 0}} for mean radius, worst area"
        );
    }

    #[test]
    fn test_unknown_placeholder_is_error() {
        let t = PromptTemplate::new("Predict {target} from {feature_names}");
        let err = t.render(&names()).unwrap_err();
        assert!(matches!(err, ElicitError::Template(ref m) if m.contains("target")));
    }

    #[test]
    fn test_stray_brace_is_error() {
        assert!(PromptTemplate::new("oops { here").render(&names()).is_err());
        assert!(PromptTemplate::new("oops } here").render(&names()).is_err());
    }

    #[test]
    fn test_template_without_placeholder_unchanged() {
        let t = PromptTemplate::new("You are a simulator.");
        assert!(!t.has_feature_placeholder());
        assert_eq!(t.render(&names()).unwrap(), "You are a simulator.");
    }
}
