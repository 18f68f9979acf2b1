//! Matching and optimization core
//! Keyword extraction, scoring, gap analysis, recommendations, and the
//! orchestrating optimizer

pub mod gaps;
pub mod job_analyzer;
pub mod keywords;
pub mod optimizer;
pub mod recommend;
pub mod scorer;
