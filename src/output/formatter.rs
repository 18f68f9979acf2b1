//! Output formatters for optimization results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::{JobRecord, OptimizationResult};
use colored::Colorize;

/// Trait for rendering optimization results
pub trait OutputFormatter {
    fn format(&self, result: &OptimizationResult, job: &JobRecord) -> Result<String>;
}

/// Console formatter with colored score bands
pub struct ConsoleFormatter {
    pub use_colors: bool,
    pub detailed: bool,
}

/// JSON formatter for downstream tooling
pub struct JsonFormatter {
    pub pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter;

impl ConsoleFormatter {
    fn score_line(&self, label: &str, score: f32) -> String {
        let value = format!("{:.1}", score);
        let value = if !self.use_colors {
            value.normal()
        } else if score >= 80.0 {
            value.green().bold()
        } else if score >= 60.0 {
            value.yellow().bold()
        } else {
            value.red().bold()
        };
        format!("  {:<22} {}", label, value)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &OptimizationResult, job: &JobRecord) -> Result<String> {
        let mut out = String::new();

        let title = job.title.as_deref().unwrap_or("(untitled posting)");
        out.push_str(&format!("Optimization report: {}\n\n", title));

        out.push_str("Scores:\n");
        out.push_str(&self.score_line("Original match", result.original_score));
        out.push('\n');
        out.push_str(&self.score_line("Optimized match", result.optimized_score));
        out.push('\n');
        out.push_str(&self.score_line("ATS compliance", result.ats_compliance_score));
        out.push('\n');

        if !result.missing_keywords.is_empty() {
            out.push_str("\nMissing keywords:\n");
            for (i, keyword) in result.missing_keywords.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, keyword));
            }
        }

        if !result.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for (i, rec) in result.recommendations.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, rec));
            }
        }

        if !result.improvements_applied.is_empty() {
            out.push_str("\nImprovements applied:\n");
            for improvement in &result.improvements_applied {
                out.push_str(&format!("  - {}\n", improvement));
            }
        }

        if self.detailed {
            out.push_str("\nOptimized skills section:\n");
            out.push_str(&format!(
                "  {}\n",
                result.optimized_resume.skills.join(", ")
            ));
        }

        Ok(out)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OptimizationResult, _job: &JobRecord) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(rendered)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, result: &OptimizationResult, job: &JobRecord) -> Result<String> {
        let mut out = String::new();
        let title = job.title.as_deref().unwrap_or("(untitled posting)");

        out.push_str(&format!("# Optimization Report: {}\n\n", title));
        out.push_str("## Scores\n\n");
        out.push_str("| Metric | Score |\n|---|---|\n");
        out.push_str(&format!("| Original match | {:.1} |\n", result.original_score));
        out.push_str(&format!("| Optimized match | {:.1} |\n", result.optimized_score));
        out.push_str(&format!(
            "| ATS compliance | {:.1} |\n",
            result.ats_compliance_score
        ));

        if !result.missing_keywords.is_empty() {
            out.push_str("\n## Missing Keywords\n\n");
            for keyword in &result.missing_keywords {
                out.push_str(&format!("- {}\n", keyword));
            }
        }

        if !result.recommendations.is_empty() {
            out.push_str("\n## Recommendations\n\n");
            for (i, rec) in result.recommendations.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, rec));
            }
        }

        if !result.improvements_applied.is_empty() {
            out.push_str("\n## Improvements Applied\n\n");
            for improvement in &result.improvements_applied {
                out.push_str(&format!("- {}\n", improvement));
            }
        }

        out.push_str(&format!(
            "\n---\nGenerated {}\n",
            result.created_at.format("%Y-%m-%d %H:%M UTC")
        ));
        Ok(out)
    }
}

/// Render a result in the requested format
pub fn render(
    format: &OutputFormat,
    result: &OptimizationResult,
    job: &JobRecord,
    detailed: bool,
    use_colors: bool,
) -> Result<String> {
    match format {
        OutputFormat::Console => ConsoleFormatter {
            use_colors,
            detailed,
        }
        .format(result, job),
        OutputFormat::Json => JsonFormatter { pretty: true }.format(result, job),
        OutputFormat::Markdown => MarkdownFormatter.format(result, job),
    }
}
