//! Features Module - Feature Vector Assembly
//!
//! - `layout` - ordered schema, catalog metadata, layout hash
//! - `inputs` - raw values as the form layer hands them over
//! - `vector` - immutable, fingerprinted feature vector
//! - `assemble` - raw inputs → feature vector

pub mod layout;
pub mod inputs;
pub mod vector;
pub mod assemble;


// Re-export common types
pub use layout::{FeatureKind, FeatureSchema, FeatureSpec, LayoutInfo, LayoutMismatchError};
pub use inputs::{RawInputs, RawValue};
pub use vector::FeatureVector;
pub use assemble::assemble;
