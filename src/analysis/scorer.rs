//! Resume-to-job match scoring
//!
//! Two deterministic signals: weighted keyword coverage (how much of the
//! job's term list the resume actually carries) and structural completeness
//! (presence of the sections an ATS expects). No randomness, no external
//! calls; identical inputs always produce identical scores.

use crate::analysis::keywords::KeywordExtractor;
use crate::config::ScoringConfig;
use crate::model::{JobRecord, ResumeRecord, ScoreBreakdown};
use std::collections::{BTreeMap, HashSet};

pub struct Scorer {
    config: ScoringConfig,
    extractor: KeywordExtractor,
}

/// The five sections that feed the structural sub-score
const STRUCTURAL_SECTIONS: usize = 5;

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            config: config.clone(),
            extractor: KeywordExtractor::new(),
        }
    }

    pub fn score(&self, resume: &ResumeRecord, job: &JobRecord) -> ScoreBreakdown {
        let index = ResumeTermIndex::build(&self.extractor, resume);

        let mut matched_weight = 0.0f32;
        let mut total_weight = 0.0f32;
        let mut categories = BTreeMap::new();

        let groups: [(&str, &[String], f32); 3] = [
            (
                "required_skills",
                &job.required_skills,
                self.config.required_skill_weight,
            ),
            (
                "preferred_skills",
                &job.preferred_skills,
                self.config.preferred_skill_weight,
            ),
            ("keywords", &job.keywords, self.config.keyword_weight),
        ];

        for (name, terms, weight) in groups {
            if terms.is_empty() {
                continue;
            }
            let mut matched = 0usize;
            for term in terms {
                total_weight += weight;
                if index.contains(&self.extractor, term) {
                    matched_weight += weight;
                    matched += 1;
                }
            }
            categories.insert(name.to_string(), matched as f32 / terms.len() as f32);
        }

        let coverage = if total_weight > 0.0 {
            matched_weight / total_weight
        } else {
            log::debug!("job record carries no terms; coverage degrades to 0");
            0.0
        };

        let structural = self.structural_score(resume);
        let structural_pct = structural / self.config.structural_ceiling * 100.0;

        let overall = (self.config.coverage_share * coverage * 100.0
            + self.config.structural_share * structural_pct)
            .clamp(0.0, 100.0);

        ScoreBreakdown {
            overall,
            coverage,
            structural,
            categories,
        }
    }

    /// Points for present, non-empty sections; each of the five sections
    /// contributes an equal fraction of the configured ceiling
    pub fn structural_score(&self, resume: &ResumeRecord) -> f32 {
        let per_section = self.config.structural_ceiling / STRUCTURAL_SECTIONS as f32;
        let mut points = 0.0;

        if !resume.contact.is_empty() {
            points += per_section;
        }
        if resume.summary.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            points += per_section;
        }
        if !resume.skills.is_empty() {
            points += per_section;
        }
        if !resume.experience.is_empty() {
            points += per_section;
        }
        if !resume.education.is_empty() {
            points += per_section;
        }

        points
    }

    /// Sections currently missing or empty, by display name
    pub fn missing_sections(&self, resume: &ResumeRecord) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if resume.contact.is_empty() {
            missing.push("contact");
        }
        if !resume.summary.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            missing.push("summary");
        }
        if resume.skills.is_empty() {
            missing.push("skills");
        }
        if resume.experience.is_empty() {
            missing.push("experience");
        }
        if resume.education.is_empty() {
            missing.push("education");
        }
        missing
    }
}

/// Normalized view of the resume's scoring surface: skills, experience
/// bullets and titles, and the summary
struct ResumeTermIndex {
    tokens: HashSet<String>,
    normalized_text: String,
}

impl ResumeTermIndex {
    fn build(extractor: &KeywordExtractor, resume: &ResumeRecord) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(summary) = &resume.summary {
            parts.push(summary);
        }
        parts.extend(resume.skills.iter().map(|s| s.as_str()));
        for entry in &resume.experience {
            if let Some(title) = &entry.title {
                parts.push(title);
            }
            parts.extend(entry.bullets.iter().map(|b| b.as_str()));
        }

        let normalized_text = extractor.normalize(&parts.join("\n"));
        let tokens = normalized_text
            .split_whitespace()
            .map(|w| w.to_string())
            .collect();

        Self {
            tokens,
            normalized_text,
        }
    }

    fn contains(&self, extractor: &KeywordExtractor, term: &str) -> bool {
        let normalized = extractor.normalize(term);
        if normalized.is_empty() {
            return false;
        }
        if normalized.contains(' ') {
            contains_phrase(&self.normalized_text, &normalized)
        } else {
            self.tokens.contains(&normalized)
        }
    }
}

/// Whole-word phrase search over already-normalized text
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(phrase) {
        let start = search_from + offset;
        let end = start + phrase.len();
        let left_ok = start == 0 || haystack.as_bytes()[start - 1] == b' ';
        let right_ok = end == haystack.len() || haystack.as_bytes()[end] == b' ';
        if left_ok && right_ok {
            return true;
        }
        // step a whole character forward so the next slice stays on a
        // char boundary
        let step = haystack[start..]
            .chars()
            .next()
            .map_or(1, |c| c.len_utf8());
        search_from = start + step;
    }
    false
}
