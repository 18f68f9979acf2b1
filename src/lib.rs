//! Resume optimizer library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod rewrite;

pub use config::Config;
pub use error::{Result, ResumeOptimizerError};
pub use model::{JobRecord, OptimizationResult, ResumeRecord};
