//! Configuration management for the resume optimizer

use crate::error::{Result, ResumeOptimizerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub analysis: AnalysisConfig,
    pub rewrite: RewriteConfig,
    pub output: OutputConfig,
}

/// Scoring weights. The exact constants are heuristic and tunable, not a
/// behavioral contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub required_skill_weight: f32,
    pub preferred_skill_weight: f32,
    pub keyword_weight: f32,
    /// Share of the overall score taken by weighted keyword coverage
    pub coverage_share: f32,
    /// Share of the overall score taken by section completeness
    pub structural_share: f32,
    /// Points available across the structural section checks
    pub structural_ceiling: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Terms returned by the keyword extractor
    pub max_keywords: usize,
    /// Cap on reported keyword gaps, to keep output actionable
    pub max_missing_keywords: usize,
    /// Cap on per-keyword recommendations
    pub max_keyword_recommendations: usize,
    /// Bullets shorter than this many words trigger a quantification nudge
    pub min_bullet_words: usize,
    /// Overall scores below this trigger a general tailoring nudge
    pub low_score_threshold: f32,
    /// Similarity at or above this counts a near-miss spelling as present;
    /// toggle the pass with `enable_fuzzy`
    pub fuzzy_threshold: f32,
    pub enable_fuzzy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Whether a configured rewrite collaborator should be consulted at all
    pub enabled: bool,
    /// Bound on the rewrite call; on expiry the deterministic fallback runs
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                required_skill_weight: 2.0,
                preferred_skill_weight: 1.0,
                keyword_weight: 0.5,
                coverage_share: 0.7,
                structural_share: 0.3,
                structural_ceiling: 20.0,
            },
            analysis: AnalysisConfig {
                max_keywords: 20,
                max_missing_keywords: 20,
                max_keyword_recommendations: 5,
                min_bullet_words: 8,
                low_score_threshold: 60.0,
                fuzzy_threshold: 0.92,
                enable_fuzzy: true,
            },
            rewrite: RewriteConfig {
                enabled: true,
                timeout_secs: 30,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeOptimizerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeOptimizerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-optimizer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let shares = self.scoring.coverage_share + self.scoring.structural_share;
        if !(0.99..=1.01).contains(&shares) {
            return Err(ResumeOptimizerError::Configuration(format!(
                "coverage_share and structural_share must sum to 1.0, got {}",
                shares
            )));
        }
        if self.scoring.structural_ceiling <= 0.0 {
            return Err(ResumeOptimizerError::Configuration(
                "structural_ceiling must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
