//! Turning an LLM reply into per-feature priors.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ElicitError, Result};

use super::prior::Prior;

// Reasoning preamble emitted by DeepSeek-R1 style models.
static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

#[derive(Debug, Deserialize)]
struct RawPrior {
    mean: f64,
    #[serde(alias = "sd", alias = "stdev", alias = "standard_deviation")]
    std: f64,
}

/// Locate the JSON object in a reply that may carry code fences or a
/// reasoning preamble.
pub fn extract_json(response: &str) -> String {
    let cleaned = THINK_BLOCK.replace_all(response, "");
    let cleaned = cleaned.trim();

    let fenced = if cleaned.contains("```json") {
        cleaned
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
    } else if cleaned.contains("```") {
        cleaned.split("```").nth(1)
    } else {
        None
    };
    if let Some(body) = fenced {
        return body.trim().to_string();
    }

    // Prose before or after the object: keep the outermost braces.
    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => cleaned[start..=end].to_string(),
        _ => cleaned.to_string(),
    }
}

/// Parse a reply into one prior per feature, in `feature_names` order.
///
/// `pair` is the prompt-pair index, used only in error messages. Keys not in
/// `feature_names` are ignored.
pub fn parse_priors(response: &str, feature_names: &[String], pair: usize) -> Result<Vec<Prior>> {
    let json = extract_json(response);
    let object: IndexMap<String, Value> =
        serde_json::from_str(&json).map_err(|e| ElicitError::InvalidResponse {
            pair,
            message: format!("not a JSON object: {}", e),
        })?;

    let mut priors = Vec::with_capacity(feature_names.len());
    for name in feature_names {
        let value = object.get(name).ok_or_else(|| ElicitError::MissingFeature {
            pair,
            feature: name.clone(),
        })?;

        let raw = RawPrior::deserialize(value).map_err(|e| ElicitError::InvalidResponse {
            pair,
            message: format!("bad prior for '{}': {}", name, e),
        })?;
        if !raw.mean.is_finite() || !raw.std.is_finite() {
            return Err(ElicitError::InvalidResponse {
                pair,
                message: format!("non-finite prior for '{}'", name),
            });
        }
        priors.push(Prior::new(raw.mean, raw.std));
    }

    let extra = object.len().saturating_sub(feature_names.len());
    if extra > 0 {
        debug!(pair, extra, "response has keys beyond the requested features");
    }

    Ok(priors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_in_feature_order() {
        let reply = r#"{"b": {"mean": -0.5, "std": 0.2}, "a": {"mean": 1.0, "std": 0.3}}"#;
        let priors = parse_priors(reply, &names(&["a", "b"]), 0).unwrap();
        assert_eq!(priors, vec![Prior::new(1.0, 0.3), Prior::new(-0.5, 0.2)]);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"a\": {\"mean\": 1, \"std\": 2}}\n```";
        let priors = parse_priors(reply, &names(&["a"]), 0).unwrap();
        assert_eq!(priors, vec![Prior::new(1.0, 2.0)]);
    }

    #[test]
    fn test_parse_strips_think_block() {
        let reply =
            "<think>positive {correlation} likely</think>\n{\"a\": {\"mean\": 0.4, \"std\": 0.1}}";
        let priors = parse_priors(reply, &names(&["a"]), 0).unwrap();
        assert_eq!(priors[0].mean, 0.4);
    }

    #[test]
    fn test_parse_prose_wrapped_object() {
        let reply = "Sure! {\"a\": {\"mean\": 0.4, \"std\": 0.1}} Hope that helps.";
        assert!(parse_priors(reply, &names(&["a"]), 0).is_ok());
    }

    #[test]
    fn test_parse_object_followed_by_prose() {
        let reply =
            "{\"a\": {\"mean\": 0.4, \"std\": 0.1}}\n\nThese priors assume z-scored inputs.";
        let priors = parse_priors(reply, &names(&["a"]), 0).unwrap();
        assert_eq!(priors, vec![Prior::new(0.4, 0.1)]);
    }

    #[test]
    fn test_std_aliases() {
        let reply = r#"{"a": {"mean": 1, "standard_deviation": 0.5}, "b": {"mean": 0, "sd": 2}}"#;
        let priors = parse_priors(reply, &names(&["a", "b"]), 0).unwrap();
        assert_eq!(priors[0].std, 0.5);
        assert_eq!(priors[1].std, 2.0);
    }

    #[test]
    fn test_missing_feature() {
        let reply = r#"{"a": {"mean": 1, "std": 0.5}}"#;
        let err = parse_priors(reply, &names(&["a", "b"]), 3).unwrap_err();
        match err {
            ElicitError::MissingFeature { pair, feature } => {
                assert_eq!(pair, 3);
                assert_eq!(feature, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_priors("{\"a\": {\"mean\": 1,", &names(&["a"]), 1).unwrap_err();
        assert!(matches!(err, ElicitError::InvalidResponse { pair: 1, .. }));
    }

    #[test]
    fn test_non_numeric_prior() {
        let reply = r#"{"a": {"mean": "high", "std": 0.5}}"#;
        let err = parse_priors(reply, &names(&["a"]), 0).unwrap_err();
        assert!(matches!(err, ElicitError::InvalidResponse { .. }));
    }

    #[test]
    fn test_top_level_array_rejected() {
        assert!(parse_priors("[1, 2]", &names(&["a"]), 0).is_err());
    }
}
