//! Result rendering
//! Console, JSON, and markdown output for optimization results

pub mod formatter;
