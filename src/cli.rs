//! CLI interface for the resume optimizer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-optimizer")]
#[command(about = "Resume-to-job-description matching and ATS optimization tool")]
#[command(
    long_about = "Score a resume against a job posting, surface keyword gaps and recommendations, and produce a keyword-optimized copy"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Optimize a resume against a job posting
    Optimize {
        /// Path to resume file (TXT, MD, or structured JSON)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job posting file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Applicant name to apply to the optimized copy
        #[arg(short, long, default_value = "")]
        name: String,

        /// Target company name
        #[arg(short, long, default_value = "")]
        company: String,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show optimized resume details in console output
        #[arg(short, long)]
        detailed: bool,

        /// Skip any configured rewrite collaborator and use deterministic
        /// keyword injection only
        #[arg(long)]
        no_rewrite: bool,
    },

    /// Analyze a job posting into structured requirements
    Analyze {
        /// Path to job posting file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Company name hint
        #[arg(short, long)]
        company: Option<String>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert!(parse_output_format("console").is_ok());
        assert!(parse_output_format("MD").is_ok());
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_no_rewrite_flag_parses() {
        let cli = Cli::try_parse_from([
            "resume-optimizer",
            "optimize",
            "--resume",
            "resume.txt",
            "--job",
            "job.txt",
            "--no-rewrite",
        ])
        .unwrap();
        match cli.command {
            Commands::Optimize { no_rewrite, .. } => assert!(no_rewrite),
            _ => panic!("expected the optimize subcommand"),
        }
    }

    #[test]
    fn test_extension_validation() {
        let path = PathBuf::from("resume.txt");
        assert!(validate_file_extension(&path, &["txt", "md"]).is_ok());
        assert!(validate_file_extension(&path, &["json"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("noext"), &["txt"]).is_err());
    }
}
