//! autoelicit: elicit logistic regression priors from large language models.
//!
//! An LLM is asked, through several paraphrased prompts, for a normal prior
//! (mean and standard deviation) on the coefficient of every feature in a
//! classification dataset. The replies are parsed and stacked into a
//! [`PriorArray`] of shape `(prompt pairs, features, 2)`, which can be used
//! directly or collapsed into a per-feature mixture.
//!
//! # Example
//!
//! ```no_run
//! use autoelicit::dataset::breast_cancer;
//! use autoelicit::llm::{LlmConfig, OpenAiClient};
//! use autoelicit::prompt;
//! use autoelicit::{ElicitOptions, Elicitor};
//!
//! let data = breast_cancer::schema();
//! let client = OpenAiClient::from_env(LlmConfig::default()).unwrap();
//!
//! let mut elicitor = Elicitor::with_options(&client, ElicitOptions::default());
//! let priors = elicitor
//!     .elicit(
//!         &prompt::breast_cancer::system_roles(),
//!         &prompt::breast_cancer::user_roles(),
//!         &data.feature_names,
//!     )
//!     .unwrap();
//!
//! println!("The shape of the prior is: {:?}", priors.shape());
//! println!("{}", priors);
//! ```

pub mod config;
pub mod dataset;
pub mod elicit;
pub mod error;
pub mod llm;
pub mod prompt;

pub use config::ElicitConfig;
pub use dataset::Dataset;
pub use elicit::{
    elicit_priors_for_dataset, ElicitOptions, ElicitationRecord, Elicitor, Prior, PriorArray,
};
pub use error::{ElicitError, Result};
pub use llm::{LlmClient, LlmConfig, ProviderKind};
pub use prompt::{PromptPair, PromptTemplate};
