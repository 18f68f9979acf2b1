//! Resume optimizer: resume-to-job matching and ATS optimization tool

mod analysis;
mod cli;
mod config;
mod error;
mod input;
mod model;
mod output;
mod rewrite;

use analysis::job_analyzer::{JobAnalyzer, KeywordJobAnalyzer};
use analysis::optimizer::Optimizer;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, ResumeOptimizerError};
use input::resume_reader::load_resume;
use input::text_extractor::extract_text;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Optimize {
            resume,
            job,
            name,
            company,
            output,
            save,
            detailed,
            no_rewrite,
        } => {
            info!("Starting resume optimization");

            if no_rewrite {
                config.rewrite.enabled = false;
            }

            cli::validate_file_extension(&resume, &["txt", "md", "json"])
                .map_err(|e| ResumeOptimizerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"]).map_err(|e| {
                ResumeOptimizerError::InvalidInput(format!("Job posting file: {}", e))
            })?;
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeOptimizerError::InvalidInput)?;

            let resume_record = load_resume(&resume).await?;
            info!(
                "Loaded resume: {} skills, {} experience entries",
                resume_record.skills.len(),
                resume_record.experience.len()
            );

            let job_text = extract_text(&job).await?;
            let analyzer = KeywordJobAnalyzer::new(&config.analysis);
            let company_hint = if company.trim().is_empty() {
                None
            } else {
                Some(company.as_str())
            };
            let job_record = analyzer.analyze(&job_text, company_hint)?;
            info!(
                "Analyzed posting: {} required, {} preferred, {} keywords",
                job_record.required_skills.len(),
                job_record.preferred_skills.len(),
                job_record.keywords.len()
            );

            // AI-backed rewriters plug in through the library API; the CLI
            // always runs the deterministic path.
            let optimizer = Optimizer::new(&config);
            let result = optimizer
                .optimize(&resume_record, &job_record, &name, &company)
                .await?;

            let rendered = output::formatter::render(
                &output_format,
                &result,
                &job_record,
                detailed || config.output.detailed,
                config.output.color_output,
            )?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Analyze { job, company } => {
            cli::validate_file_extension(&job, &["txt", "md"]).map_err(|e| {
                ResumeOptimizerError::InvalidInput(format!("Job posting file: {}", e))
            })?;

            let job_text = extract_text(&job).await?;
            let analyzer = KeywordJobAnalyzer::new(&config.analysis);
            let job_record = analyzer.analyze(&job_text, company.as_deref())?;

            println!("{}", serde_json::to_string_pretty(&job_record)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current configuration\n");
                println!("Scoring weights:");
                println!(
                    "  required skills: {:.1}",
                    config.scoring.required_skill_weight
                );
                println!(
                    "  preferred skills: {:.1}",
                    config.scoring.preferred_skill_weight
                );
                println!("  generic keywords: {:.1}", config.scoring.keyword_weight);
                println!(
                    "  coverage/structural split: {:.0}%/{:.0}%",
                    config.scoring.coverage_share * 100.0,
                    config.scoring.structural_share * 100.0
                );
                println!("\nAnalysis:");
                println!("  max keywords: {}", config.analysis.max_keywords);
                println!(
                    "  max missing keywords: {}",
                    config.analysis.max_missing_keywords
                );
                println!(
                    "  fuzzy matching: {} (threshold {:.2})",
                    if config.analysis.enable_fuzzy { "on" } else { "off" },
                    config.analysis.fuzzy_threshold
                );
                println!("\nRewrite collaborator:");
                println!("  enabled: {}", config.rewrite.enabled);
                println!("  timeout: {}s", config.rewrite.timeout_secs);
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
