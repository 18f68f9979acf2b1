//! Rule-based recommendation generation
//!
//! Produces plain, ranked suggestion strings from the score breakdown and
//! gap analysis. Rules run in a fixed order (most impactful first) so the
//! same inputs always yield the same list.

use crate::analysis::keywords::KeywordExtractor;
use crate::config::AnalysisConfig;
use crate::model::{ResumeRecord, ScoreBreakdown};

pub struct RecommendationGenerator {
    config: AnalysisConfig,
}

/// Ideal resume length band, in words; taken from common ATS guidance
const MIN_RESUME_WORDS: usize = 300;
const MAX_RESUME_WORDS: usize = 800;

impl RecommendationGenerator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn generate(
        &self,
        breakdown: &ScoreBreakdown,
        gaps: &[String],
        resume: &ResumeRecord,
        missing_sections: &[&str],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        // 1. Top missing keywords, most impactful first
        for term in gaps.iter().take(self.config.max_keyword_recommendations) {
            recommendations.push(format!(
                "Add experience or skills mentioning '{}'",
                term
            ));
        }

        // 2. Absent or empty sections
        for section in missing_sections {
            recommendations.push(format!(
                "Add a {} section with a clear header",
                section
            ));
        }

        // 3. Thin bullets read as unquantified claims
        if self.bullets_mostly_short(resume) {
            recommendations.push(
                "Expand experience bullets with quantified achievements (metrics, scale, outcomes)"
                    .to_string(),
            );
        }

        // 4. General tailoring nudge when the match is weak overall
        if breakdown.overall < self.config.low_score_threshold {
            recommendations.push(
                "Tailor the resume further toward this posting's required skills and terminology"
                    .to_string(),
            );
        }

        // 5. Length advice
        let words = KeywordExtractor::word_count(&resume.raw_text);
        if words > 0 && words < MIN_RESUME_WORDS {
            recommendations
                .push("Expand resume content with more detailed descriptions".to_string());
        } else if words > MAX_RESUME_WORDS {
            recommendations
                .push("Condense resume content to improve readability".to_string());
        }

        recommendations
    }

    /// True when at least half of all bullets fall under the word threshold
    fn bullets_mostly_short(&self, resume: &ResumeRecord) -> bool {
        let mut total = 0usize;
        let mut short = 0usize;
        for bullet in resume.all_bullets() {
            total += 1;
            if KeywordExtractor::word_count(bullet) < self.config.min_bullet_words {
                short += 1;
            }
        }
        total > 0 && short * 2 >= total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::ExperienceEntry;
    use std::collections::BTreeMap;

    fn generator() -> RecommendationGenerator {
        RecommendationGenerator::new(&Config::default().analysis)
    }

    fn breakdown(overall: f32) -> ScoreBreakdown {
        ScoreBreakdown {
            overall,
            coverage: overall / 100.0,
            structural: 20.0,
            categories: BTreeMap::new(),
        }
    }

    #[test]
    fn test_gap_recommendations_come_first_and_are_capped() {
        let gaps: Vec<String> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let recs = generator().generate(&breakdown(90.0), &gaps, &ResumeRecord::default(), &[]);
        assert_eq!(recs[0], "Add experience or skills mentioning 'a'");
        let keyword_recs = recs
            .iter()
            .filter(|r| r.starts_with("Add experience or skills"))
            .count();
        assert_eq!(keyword_recs, 5);
    }

    #[test]
    fn test_missing_section_recommendation() {
        let recs = generator().generate(
            &breakdown(90.0),
            &[],
            &ResumeRecord::default(),
            &["summary"],
        );
        assert!(recs.iter().any(|r| r.contains("summary section")));
    }

    #[test]
    fn test_short_bullets_trigger_quantification_nudge() {
        let resume = ResumeRecord {
            experience: vec![ExperienceEntry {
                company: Some("Acme".to_string()),
                title: Some("Engineer".to_string()),
                duration: None,
                bullets: vec!["Wrote code".to_string(), "Fixed bugs".to_string()],
            }],
            ..Default::default()
        };
        let recs = generator().generate(&breakdown(90.0), &[], &resume, &[]);
        assert!(recs.iter().any(|r| r.contains("quantified achievements")));
    }

    #[test]
    fn test_low_score_triggers_tailoring_nudge() {
        let recs = generator().generate(&breakdown(40.0), &[], &ResumeRecord::default(), &[]);
        assert!(recs.iter().any(|r| r.contains("Tailor the resume")));

        let recs = generator().generate(&breakdown(80.0), &[], &ResumeRecord::default(), &[]);
        assert!(!recs.iter().any(|r| r.contains("Tailor the resume")));
    }

    #[test]
    fn test_output_is_stable() {
        let gaps = vec!["Rust".to_string()];
        let resume = ResumeRecord::default();
        let first = generator().generate(&breakdown(50.0), &gaps, &resume, &["skills"]);
        let second = generator().generate(&breakdown(50.0), &gaps, &resume, &["skills"]);
        assert_eq!(first, second);
    }
}
