//! Keyword gap analysis
//!
//! Finds job terms the resume never mentions. Terms are checked against the
//! resume's combined text (structured fields plus raw text) so a keyword
//! buried in a bullet still counts as present. Output keeps the job's
//! priority order: required skills first, then preferred, then generic
//! keywords.

use crate::analysis::keywords::KeywordExtractor;
use crate::config::AnalysisConfig;
use crate::error::{Result, ResumeOptimizerError};
use crate::model::{JobRecord, ResumeRecord};
use aho_corasick::AhoCorasick;
use std::collections::HashSet;
use strsim::jaro_winkler;

pub struct GapAnalyzer {
    extractor: KeywordExtractor,
    max_gaps: usize,
    fuzzy_threshold: Option<f64>,
}

/// Fuzzy comparison is skipped for very short tokens, where edit-distance
/// similarity is too noisy to trust
const MIN_FUZZY_LEN: usize = 4;

impl GapAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            max_gaps: config.max_missing_keywords,
            fuzzy_threshold: config
                .enable_fuzzy
                .then_some(config.fuzzy_threshold as f64),
        }
    }

    /// Job terms absent from the resume, in priority order, capped at the
    /// configured maximum
    pub fn find_gaps(&self, resume: &ResumeRecord, job: &JobRecord) -> Result<Vec<String>> {
        // Priority-ordered union, deduplicated by normalized form
        let mut seen = HashSet::new();
        let mut terms: Vec<(String, String)> = Vec::new();
        for term in job.all_terms() {
            let normalized = self.extractor.normalize(term);
            if normalized.is_empty() || !seen.insert(normalized.clone()) {
                continue;
            }
            terms.push((term.to_string(), normalized));
        }
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let resume_text = self.extractor.normalize(&resume.combined_text());

        let patterns: Vec<&str> = terms.iter().map(|(_, n)| n.as_str()).collect();
        let matcher = AhoCorasick::builder()
            .build(&patterns)
            .map_err(|e| ResumeOptimizerError::AnalysisFailed(format!(
                "Failed to build gap matcher: {}",
                e
            )))?;

        let mut present = vec![false; terms.len()];
        for mat in matcher.find_overlapping_iter(&resume_text) {
            present[mat.pattern().as_usize()] = true;
        }

        let resume_tokens: Vec<&str> = resume_text.split_whitespace().collect();

        let gaps = terms
            .iter()
            .zip(present.iter())
            .filter(|(_, &found)| !found)
            .filter(|((_, normalized), _)| !self.fuzzy_present(normalized, &resume_tokens))
            .map(|((original, _), _)| original.clone())
            .take(self.max_gaps)
            .collect();

        Ok(gaps)
    }

    /// Deterministic near-miss check: a single-token term counts as present
    /// when some resume token is close enough under Jaro-Winkler
    fn fuzzy_present(&self, term: &str, resume_tokens: &[&str]) -> bool {
        let Some(threshold) = self.fuzzy_threshold else {
            return false;
        };
        if term.len() < MIN_FUZZY_LEN || term.contains(' ') {
            return false;
        }
        resume_tokens
            .iter()
            .filter(|t| t.len() >= MIN_FUZZY_LEN)
            .any(|t| jaro_winkler(term, t) >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn analyzer() -> GapAnalyzer {
        GapAnalyzer::new(&Config::default().analysis)
    }

    fn resume_with_text(text: &str) -> ResumeRecord {
        ResumeRecord {
            raw_text: text.to_string(),
            ..Default::default()
        }
    }

    fn job(required: Vec<&str>, preferred: Vec<&str>, keywords: Vec<&str>) -> JobRecord {
        JobRecord {
            raw_text: "posting".to_string(),
            required_skills: required.into_iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.into_iter().map(|s| s.to_string()).collect(),
            keywords: keywords.into_iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_present_terms_are_not_gaps() {
        let resume = ResumeRecord {
            skills: vec!["Python".to_string()],
            ..Default::default()
        };
        let gaps = analyzer()
            .find_gaps(&resume, &job(vec!["Python", "SQL"], vec![], vec![]))
            .unwrap();
        assert_eq!(gaps, vec!["SQL"]);
    }

    #[test]
    fn test_priority_order_preserved() {
        let resume = resume_with_text("nothing relevant here");
        let gaps = analyzer()
            .find_gaps(
                &resume,
                &job(vec!["Rust"], vec!["Docker"], vec!["Agile"]),
            )
            .unwrap();
        assert_eq!(gaps, vec!["Rust", "Docker", "Agile"]);
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let resume = resume_with_text("Built services with POSTGRESQL backends");
        let gaps = analyzer()
            .find_gaps(&resume, &job(vec!["postgresql", "sql"], vec![], vec![]))
            .unwrap();
        // "sql" appears inside "postgresql"; substring presence counts
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_duplicate_terms_reported_once() {
        let resume = resume_with_text("unrelated");
        let gaps = analyzer()
            .find_gaps(
                &resume,
                &job(vec!["Kafka"], vec!["kafka"], vec!["KAFKA"]),
            )
            .unwrap();
        assert_eq!(gaps, vec!["Kafka"]);
    }

    #[test]
    fn test_gap_cap_applies() {
        let mut config = Config::default().analysis;
        config.max_missing_keywords = 2;
        let analyzer = GapAnalyzer::new(&config);
        let resume = resume_with_text("unrelated");
        let gaps = analyzer
            .find_gaps(
                &resume,
                &job(vec!["a1", "b2", "c3", "d4"], vec![], vec![]),
            )
            .unwrap();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps, vec!["a1", "b2"]);
    }

    #[test]
    fn test_zero_term_job_yields_no_gaps() {
        let resume = resume_with_text("anything");
        let gaps = analyzer()
            .find_gaps(&resume, &job(vec![], vec![], vec![]))
            .unwrap();
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_fuzzy_match_counts_near_miss_spelling() {
        let resume = resume_with_text("Experienced with Kubernets deployments");
        let gaps = analyzer()
            .find_gaps(&resume, &job(vec!["Kubernetes"], vec![], vec![]))
            .unwrap();
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_fuzzy_disabled_reports_near_miss_as_gap() {
        let mut config = Config::default().analysis;
        config.enable_fuzzy = false;
        let analyzer = GapAnalyzer::new(&config);
        let resume = resume_with_text("Experienced with Kubernets deployments");
        let gaps = analyzer
            .find_gaps(&resume, &job(vec!["Kubernetes"], vec![], vec![]))
            .unwrap();
        assert_eq!(gaps, vec!["Kubernetes"]);
    }

    #[test]
    fn test_gaps_subset_of_job_terms() {
        let resume = resume_with_text("Python developer");
        let posting = job(vec!["Python", "Go"], vec!["Redis"], vec!["agile"]);
        let gaps = analyzer().find_gaps(&resume, &posting).unwrap();
        let all: Vec<&str> = posting.all_terms().collect();
        for gap in &gaps {
            assert!(all.contains(&gap.as_str()));
        }
    }
}
