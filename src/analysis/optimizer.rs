//! Optimization orchestrator
//!
//! Composes the scorer, gap analyzer, and recommendation generator into one
//! pass over a resume/job pair, optionally consulting a content-rewriting
//! collaborator. Inputs are read-only; the result is a freshly constructed
//! record. Only validation failures propagate out of `optimize`; a broken
//! or slow rewriter degrades to the deterministic keyword-injection path.

use crate::analysis::gaps::GapAnalyzer;
use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::recommend::RecommendationGenerator;
use crate::analysis::scorer::Scorer;
use crate::config::Config;
use crate::error::Result;
use crate::model::{JobRecord, OptimizationResult, ResumeRecord};
use crate::rewrite::{ContentRewriter, RewriteError};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

pub struct Optimizer {
    scorer: Scorer,
    gap_analyzer: GapAnalyzer,
    recommender: RecommendationGenerator,
    extractor: KeywordExtractor,
    rewriter: Option<Arc<dyn ContentRewriter>>,
    rewrite_enabled: bool,
    rewrite_timeout: Duration,
}

/// Characters that trip up ATS text extraction when used as layout
const PROBLEMATIC_CHARS: &[char] = &['│', '─', '┌', '┐', '└', '┘', '■', '◆'];

/// Section headers an ATS expects to find in the raw text
const STANDARD_HEADERS: &[&str] = &["experience", "education", "skills", "summary"];

impl Optimizer {
    pub fn new(config: &Config) -> Self {
        Self {
            scorer: Scorer::new(&config.scoring),
            gap_analyzer: GapAnalyzer::new(&config.analysis),
            recommender: RecommendationGenerator::new(&config.analysis),
            extractor: KeywordExtractor::new(),
            rewriter: None,
            rewrite_enabled: config.rewrite.enabled,
            rewrite_timeout: Duration::from_secs(config.rewrite.timeout_secs),
        }
    }

    /// Attach a content-rewriting collaborator
    pub fn with_rewriter(mut self, rewriter: Arc<dyn ContentRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Run the full optimization pass. Fails only when an input record is
    /// structurally invalid; every other condition produces a complete,
    /// possibly low-scoring result.
    pub async fn optimize(
        &self,
        resume: &ResumeRecord,
        job: &JobRecord,
        applicant_name: &str,
        company_name: &str,
    ) -> Result<OptimizationResult> {
        resume.validate()?;
        job.validate()?;

        let original = self.scorer.score(resume, job);
        let missing_keywords = self.gap_analyzer.find_gaps(resume, job)?;
        let missing_sections = self.scorer.missing_sections(resume);
        let recommendations =
            self.recommender
                .generate(&original, &missing_keywords, resume, &missing_sections);

        let (optimized_resume, mut improvements) = self
            .produce_optimized_resume(resume, job, &missing_keywords, applicant_name)
            .await;

        let optimized = self.scorer.score(&optimized_resume, job);
        if optimized.overall > original.overall {
            improvements.push(format!(
                "Overall match score improved by {:.1} points",
                optimized.overall - original.overall
            ));
        }
        if !company_name.trim().is_empty() {
            improvements.push(format!("Tailored against the {} posting", company_name));
        }

        let ats_compliance_score = self.ats_compliance(resume);

        Ok(OptimizationResult {
            original_score: original.overall,
            optimized_score: optimized.overall,
            ats_compliance_score,
            missing_keywords,
            recommendations,
            improvements_applied: improvements,
            optimized_resume,
            created_at: Utc::now(),
        })
    }

    /// Collaborator rewrite when configured, deterministic keyword injection
    /// otherwise or on any collaborator failure
    async fn produce_optimized_resume(
        &self,
        resume: &ResumeRecord,
        job: &JobRecord,
        gaps: &[String],
        applicant_name: &str,
    ) -> (ResumeRecord, Vec<String>) {
        if self.rewrite_enabled {
            if let Some(rewriter) = &self.rewriter {
                match self.try_rewrite(rewriter.as_ref(), resume, job).await {
                    Ok(rewritten) => {
                        let mut improvements =
                            vec![format!("Content rewritten by {}", rewriter.name())];
                        let record = self.apply_name(rewritten, applicant_name, &mut improvements);
                        return (record, improvements);
                    }
                    Err(e) => {
                        log::warn!(
                            "rewrite collaborator '{}' failed, falling back to keyword injection: {}",
                            rewriter.name(),
                            e
                        );
                        let (record, mut improvements) =
                            self.inject_keywords(resume, gaps, applicant_name);
                        improvements.push(
                            "AI rewriting skipped; applied deterministic keyword injection"
                                .to_string(),
                        );
                        return (record, improvements);
                    }
                }
            }
        }
        self.inject_keywords(resume, gaps, applicant_name)
    }

    async fn try_rewrite(
        &self,
        rewriter: &dyn ContentRewriter,
        resume: &ResumeRecord,
        job: &JobRecord,
    ) -> std::result::Result<ResumeRecord, RewriteError> {
        let rewritten = tokio::time::timeout(self.rewrite_timeout, rewriter.rewrite(resume, job))
            .await
            .map_err(|_| RewriteError::Timeout)??;

        // A structurally broken rewrite is treated like a malformed response
        rewritten
            .validate()
            .map_err(|e| RewriteError::InvalidResponse(e.to_string()))?;
        Ok(rewritten)
    }

    /// Baseline optimization: merge missing terms into the skills section,
    /// preserving existing order and skipping terms already listed
    fn inject_keywords(
        &self,
        resume: &ResumeRecord,
        gaps: &[String],
        applicant_name: &str,
    ) -> (ResumeRecord, Vec<String>) {
        let mut improvements = Vec::new();
        let mut optimized = resume.clone();
        optimized.created_at = Utc::now();

        let existing: Vec<String> = optimized
            .skills
            .iter()
            .map(|s| self.extractor.normalize(s))
            .collect();

        let mut added = Vec::new();
        for term in gaps {
            let normalized = self.extractor.normalize(term);
            if normalized.is_empty() || existing.contains(&normalized) {
                continue;
            }
            optimized.skills.push(term.clone());
            added.push(term.as_str());
        }

        if !added.is_empty() {
            improvements.push(format!(
                "Added {} job keyword(s) to the skills section: {}",
                added.len(),
                added.join(", ")
            ));
        }

        let optimized = self.apply_name(optimized, applicant_name, &mut improvements);
        (optimized, improvements)
    }

    fn apply_name(
        &self,
        mut record: ResumeRecord,
        applicant_name: &str,
        improvements: &mut Vec<String>,
    ) -> ResumeRecord {
        let trimmed = applicant_name.trim();
        if !trimmed.is_empty() && record.contact.name.as_deref() != Some(trimmed) {
            record.contact.name = Some(trimmed.to_string());
            improvements.push("Updated applicant name in contact details".to_string());
        }
        record
    }

    /// Structural-only compliance check, independent of any job posting.
    /// Four equally weighted signals: standard section headers, bullet usage
    /// under experience entries, absence of layout characters that break
    /// text extraction, and contact details near the top of the document.
    pub fn ats_compliance(&self, resume: &ResumeRecord) -> f32 {
        let text_lower = resume.raw_text.to_lowercase();

        let headers_found = STANDARD_HEADERS
            .iter()
            .filter(|h| text_lower.contains(*h))
            .count();
        let header_score = headers_found as f32 / STANDARD_HEADERS.len() as f32 * 25.0;

        let bullet_score = if resume.experience.is_empty() {
            0.0
        } else {
            let with_bullets = resume
                .experience
                .iter()
                .filter(|e| !e.bullets.is_empty())
                .count();
            with_bullets as f32 / resume.experience.len() as f32 * 25.0
        };

        let bad_chars = PROBLEMATIC_CHARS
            .iter()
            .filter(|c| resume.raw_text.contains(**c))
            .count();
        let formatting_score = (25.0 - bad_chars as f32 * 5.0).max(0.0);

        let contact_score = match &resume.contact.email {
            Some(email) => {
                let top: String = resume
                    .raw_text
                    .lines()
                    .take(5)
                    .collect::<Vec<_>>()
                    .join("\n")
                    .to_lowercase();
                if top.contains(&email.to_lowercase()) {
                    25.0
                } else {
                    12.5
                }
            }
            None => 0.0,
        };

        (header_score + bullet_score + formatting_score + contact_score).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContactInfo, EducationEntry, ExperienceEntry};
    use async_trait::async_trait;

    fn sample_resume() -> ResumeRecord {
        ResumeRecord {
            contact: ContactInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
            summary: Some("Backend engineer with a data focus".to_string()),
            skills: vec!["Python".to_string()],
            experience: vec![ExperienceEntry {
                company: Some("Acme".to_string()),
                title: Some("Software Engineer".to_string()),
                duration: Some("2020-2024".to_string()),
                bullets: vec![
                    "Designed ingestion services processing 40TB per day".to_string(),
                ],
            }],
            education: vec![EducationEntry {
                institution: Some("State University".to_string()),
                degree: Some("BS Computer Science".to_string()),
                duration: None,
            }],
            raw_text: "jane@example.com\nSummary\nSkills\nExperience\nEducation".to_string(),
            ..Default::default()
        }
    }

    fn sample_job() -> JobRecord {
        JobRecord {
            title: Some("Data Engineer".to_string()),
            raw_text: "We need Python and SQL.".to_string(),
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            ..Default::default()
        }
    }

    struct FailingRewriter(RewriteError);

    #[async_trait]
    impl ContentRewriter for FailingRewriter {
        async fn rewrite(
            &self,
            _resume: &ResumeRecord,
            _job: &JobRecord,
        ) -> std::result::Result<ResumeRecord, RewriteError> {
            Err(match &self.0 {
                RewriteError::ServiceUnavailable(m) => {
                    RewriteError::ServiceUnavailable(m.clone())
                }
                RewriteError::RateLimited => RewriteError::RateLimited,
                RewriteError::InvalidResponse(m) => RewriteError::InvalidResponse(m.clone()),
                RewriteError::Timeout => RewriteError::Timeout,
            })
        }

        fn name(&self) -> &str {
            "failing-stub"
        }
    }

    #[tokio::test]
    async fn test_keyword_injection_adds_missing_terms_once() {
        let optimizer = Optimizer::new(&Config::default());
        let result = optimizer
            .optimize(&sample_resume(), &sample_job(), "", "")
            .await
            .unwrap();

        assert!(result.optimized_resume.skills.contains(&"SQL".to_string()));
        let python_count = result
            .optimized_resume
            .skills
            .iter()
            .filter(|s| s.eq_ignore_ascii_case("python"))
            .count();
        assert_eq!(python_count, 1);
    }

    #[tokio::test]
    async fn test_optimized_score_not_below_original() {
        let optimizer = Optimizer::new(&Config::default());
        let result = optimizer
            .optimize(&sample_resume(), &sample_job(), "", "")
            .await
            .unwrap();
        assert!(result.optimized_score >= result.original_score);
    }

    #[tokio::test]
    async fn test_rewriter_failure_falls_back() {
        let optimizer = Optimizer::new(&Config::default()).with_rewriter(Arc::new(
            FailingRewriter(RewriteError::ServiceUnavailable("down".to_string())),
        ));
        let result = optimizer
            .optimize(&sample_resume(), &sample_job(), "", "")
            .await
            .unwrap();

        assert!(result.optimized_resume.skills.contains(&"SQL".to_string()));
        assert!(result
            .improvements_applied
            .iter()
            .any(|i| i.contains("AI rewriting skipped")));
    }

    #[tokio::test]
    async fn test_disabled_rewrite_never_consults_the_collaborator() {
        let mut config = Config::default();
        config.rewrite.enabled = false;
        let optimizer = Optimizer::new(&config)
            .with_rewriter(Arc::new(FailingRewriter(RewriteError::RateLimited)));
        let result = optimizer
            .optimize(&sample_resume(), &sample_job(), "", "")
            .await
            .unwrap();

        // No fallback note: the collaborator was skipped, not recovered from
        assert!(!result
            .improvements_applied
            .iter()
            .any(|i| i.contains("AI rewriting skipped")));
        assert!(result.optimized_resume.skills.contains(&"SQL".to_string()));
    }

    #[tokio::test]
    async fn test_inputs_are_never_mutated() {
        let resume = sample_resume();
        let job = sample_job();
        let before = resume.clone();

        let optimizer = Optimizer::new(&Config::default());
        optimizer.optimize(&resume, &job, "New Name", "Acme").await.unwrap();

        assert_eq!(resume, before);
    }

    #[tokio::test]
    async fn test_applicant_name_applied_to_optimized_copy() {
        let optimizer = Optimizer::new(&Config::default());
        let result = optimizer
            .optimize(&sample_resume(), &sample_job(), "John Q. Public", "")
            .await
            .unwrap();
        assert_eq!(
            result.optimized_resume.contact.name.as_deref(),
            Some("John Q. Public")
        );
    }

    #[tokio::test]
    async fn test_validation_error_propagates() {
        let mut resume = sample_resume();
        resume.contact.email = Some("broken".to_string());
        let optimizer = Optimizer::new(&Config::default());
        let err = optimizer
            .optimize(&resume, &sample_job(), "", "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ResumeOptimizerError::Validation(_)
        ));
    }

    #[test]
    fn test_ats_compliance_rewards_clean_structure() {
        let optimizer = Optimizer::new(&Config::default());
        let clean = optimizer.ats_compliance(&sample_resume());

        let mut messy = sample_resume();
        messy.raw_text = "┌─────┐\n│ art │\n└─────┘".to_string();
        messy.experience[0].bullets.clear();
        let low = optimizer.ats_compliance(&messy);

        assert!(clean > low);
        assert!((0.0..=100.0).contains(&clean));
        assert!((0.0..=100.0).contains(&low));
    }
}
