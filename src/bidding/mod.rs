pub mod eligibility;
pub mod engine;
pub mod validator;

pub use engine::{evaluate, select_best_campaign, Evaluation};
pub use validator::validate_imp;
