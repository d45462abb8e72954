//! A linear regression training kernel: tabular datasets are normalised into column vectors on a
//! numeric backend and a single-target linear model is trained on them with batch gradient
//! descent, one externally driven step at a time.

pub mod backend;
pub mod config;
pub mod data;
pub mod error;
pub mod loss;
pub mod optimization;
pub mod training;

pub use error::{ModelErr, Result};
