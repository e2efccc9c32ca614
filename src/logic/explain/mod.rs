//! Explain Module - Attribution ranking & rendering
//!
//! Optional stage: only runs when the bundle ships an attributor.

pub mod attributor;
pub mod engine;
pub mod render;
pub mod types;

pub use attributor::{Attribution, Attributor, LinearAttributor};
pub use engine::{explain, rank_entries};
pub use render::{CurrencyFormat, SentenceRenderer, NO_DOMINANT_FALLER, NO_DOMINANT_RISER};
pub use types::{AttributionEntry, ExplanationSection, ExplanationSet, Factor};
