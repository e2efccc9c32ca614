//! Logic Module - Credit risk scoring & attribution
//!
//! ## Modules
//! - `features` - ordered schema, raw inputs, feature vector assembly
//! - `categories` - enumeration tables, UI label resolution
//! - `model` - classifier backends, scorer, bundle loading
//! - `explain` - attribution ranking and sentence rendering
//! - `pipeline` - assemble → score → explain for one submission

pub mod categories;
pub mod config;
pub mod explain;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod presets;
