//! Integration tests for autoelicit.

use std::io::Write;
use tempfile::NamedTempFile;

use autoelicit::dataset::breast_cancer;
use autoelicit::llm::{priors_json, ChatRequest, MockClient};
use autoelicit::prompt;
use autoelicit::{
    elicit_priors_for_dataset, Dataset, ElicitConfig, ElicitError, ElicitOptions, Elicitor, Result,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// A reply giving feature `j` the prior `(j * 0.1, 0.5)`.
fn ordered_reply(names: &[String]) -> String {
    let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let priors: Vec<(f64, f64)> = (0..names.len()).map(|j| (j as f64 * 0.1, 0.5)).collect();
    priors_json(&refs, &priors)
}

// =============================================================================
// Breast Cancer Workflow
// =============================================================================

#[test]
fn test_breast_cancer_elicitation_shape() {
    let data = breast_cancer::schema();
    let names = data.feature_names.clone();
    let client = MockClient::responder(move |_, _| Ok(ordered_reply(&names)));

    let mut elicitor = Elicitor::new(&client);
    let priors = elicitor
        .elicit(
            &prompt::breast_cancer::system_roles(),
            &prompt::breast_cancer::user_roles(),
            &data.feature_names,
        )
        .expect("Elicitation failed");

    assert_eq!(priors.shape(), (3, 30, 2));
    assert_eq!(client.call_count(), 3);
}

#[test]
fn test_feature_order_follows_input_not_response() {
    let names: Vec<String> = vec![
        "worst area".into(),
        "mean radius".into(),
        "texture error".into(),
    ];
    // Keys in reverse of the requested order.
    let reply = r#"{"texture error": {"mean": -0.3, "std": 0.1},
                    "mean radius": {"mean": 0.8, "std": 0.2},
                    "worst area": {"mean": 1.2, "std": 0.3}}"#;
    let client = MockClient::scripted([reply]);

    let priors = elicit_priors_for_dataset(&client, &["sys"], &["{feature_names}"], &names, false)
        .expect("Elicitation failed");

    let means: Vec<f64> = priors.pair(0).unwrap().iter().map(|p| p.mean).collect();
    assert_eq!(means, vec![1.2, 0.8, -0.3]);
}

#[test]
fn test_every_feature_name_reaches_the_model() {
    let data = breast_cancer::schema();
    let names = data.feature_names.clone();
    let client = MockClient::responder(move |_, _| Ok(ordered_reply(&names)));

    elicit_priors_for_dataset(
        &client,
        &["You simulate a model."],
        &["Features: {feature_names}."],
        &data.feature_names,
        true,
    )
    .expect("Elicitation failed");

    let request: ChatRequest = client.requests().remove(0);
    assert!(request.user.contains(&data.feature_names.join(", ")));
    assert!(!request.user.contains("{feature_names}"));
}

// =============================================================================
// Failure Reporting
// =============================================================================

#[test]
fn test_one_malformed_reply_fails_the_run() {
    let names: Vec<String> = vec!["a".into(), "b".into()];
    let good = ordered_reply(&names);
    let client = MockClient::responder(move |_, call| {
        if call == 1 {
            Ok("{\"a\": {\"mean\": 0.1".to_string())
        } else {
            Ok(good.clone())
        }
    });

    let options = ElicitOptions {
        retry: autoelicit::llm::RetryPolicy::none(),
        ..ElicitOptions::default()
    };
    let mut elicitor = Elicitor::with_options(&client, options);
    let result = elicitor.elicit(
        &[autoelicit::PromptTemplate::new("s")],
        &[
            autoelicit::PromptTemplate::new("u0 {feature_names}"),
            autoelicit::PromptTemplate::new("u1 {feature_names}"),
            autoelicit::PromptTemplate::new("u2 {feature_names}"),
        ],
        &names,
    );

    match result {
        Err(ElicitError::InvalidResponse { pair, .. }) => assert_eq!(pair, 1),
        other => panic!("expected invalid response, got {:?}", other.map(|p| p.shape())),
    }
    // The third pair is never requested.
    assert_eq!(client.call_count(), 2);
}

#[test]
fn test_missing_feature_reported_with_name() {
    let names: Vec<String> = vec!["a".into(), "b".into()];
    let client = MockClient::responder(|_, _| Ok(priors_json(&["a"], &[(0.0, 1.0)])));

    let err = elicit_priors_for_dataset(&client, &["s"], &["u"], &names, false).unwrap_err();
    assert!(err.to_string().contains("missing feature 'b'"));
}

#[test]
fn test_retries_then_succeeds() -> Result<()> {
    let names: Vec<String> = vec!["a".into()];
    let good = ordered_reply(&names);
    let client = MockClient::scripted(["I think a is positive.".to_string(), good]);

    let mut config = ElicitConfig::default();
    config.elicitation.retry = autoelicit::llm::RetryPolicy::immediate(3);

    let mut elicitor = Elicitor::with_options(&client, config.elicitation.clone());
    let record = elicitor.run(
        &[autoelicit::PromptTemplate::new("s")],
        &[autoelicit::PromptTemplate::new("{feature_names}")],
        &names,
    )?;

    assert_eq!(record.attempts, vec![2]);
    assert_eq!(record.prompts.len(), 1);
    assert_eq!(record.provider, "mock");
    Ok(())
}

// =============================================================================
// Datasets and Records
// =============================================================================

#[test]
fn test_delimited_dataset_standardized() {
    let content = "radius\ttexture\tdiagnosis\n\
                   10.0\t20.0\tB\n\
                   14.0\t22.0\tM\n\
                   18.0\t24.0\tM\n";
    let file = create_test_file(content);

    let data = Dataset::from_delimited(file.path(), Some("diagnosis")).expect("Load failed");
    assert_eq!(data.feature_names, vec!["radius", "texture"]);
    assert_eq!(data.target_names, vec!["B", "M"]);
    assert_eq!(data.source.as_ref().unwrap().format, "tsv");

    let z = data.standardized();
    let radius = z.column(0).expect("radius column");
    assert!(z.column(2).is_none());
    assert!(radius.iter().sum::<f64>().abs() < 1e-12);
    assert!(radius[0] < 0.0 && radius[2] > 0.0);
}

#[test]
fn test_record_saved_as_json() {
    let names: Vec<String> = vec!["a".into(), "b".into()];
    let client = MockClient::scripted([ordered_reply(&names)]);
    let mut elicitor = Elicitor::new(&client);
    let record = elicitor
        .run(
            &[autoelicit::PromptTemplate::new("s")],
            &[autoelicit::PromptTemplate::new("{feature_names}")],
            &names,
        )
        .expect("Elicitation failed");

    let out = NamedTempFile::new().unwrap();
    record.save(out.path()).expect("Save failed");

    let text = std::fs::read_to_string(out.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["feature_names"][1], "b");
    assert_eq!(value["priors"]["pairs"][0][1]["mean"], 0.1);
    assert_eq!(value["prompts"][0]["user"], "a, b");
}
