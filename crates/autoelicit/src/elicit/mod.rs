//! Prior elicitation: prompting, parsing replies, and stacking results.

mod orchestrator;
mod parser;
mod prior;
mod record;

pub use orchestrator::{elicit_priors_for_dataset, ElicitOptions, Elicitor, DEFAULT_STD_LOWER_CLIP};
pub use parser::{extract_json, parse_priors};
pub use prior::{Prior, PriorArray};
pub use record::ElicitationRecord;
