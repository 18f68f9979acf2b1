//! Input handling
//! File type detection, text extraction, and resume loading

pub mod resume_reader;
pub mod text_extractor;
