//! Parameter Management Module
//!
//! Translation of the abstract auto-tune knobs into provider-native sampling
//! parameters.

pub mod auto_tune;

pub use auto_tune::{AutoTuneKnobs, TuningFamily, auto_tune, auto_tune_anthropic, auto_tune_openai};
