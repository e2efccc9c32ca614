//! Credit Risk Core
//!
//! Scores a loan applicant's probability of default from a fixed, ordered
//! feature layout and explains the score with the strongest risk-raising
//! and risk-lowering factors.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{RiskError, RiskResult};
pub use logic::config::RiskConfig;
pub use logic::features::{RawInputs, RawValue};
pub use logic::model::{ModelBundle, ScoreResult, Verdict, RISK_THRESHOLD};
pub use logic::pipeline::{Assessment, Explanation, RiskPipeline};
