//! Job posting analysis
//!
//! `JobAnalyzer` is the substitution seam for posting analysis: the
//! deterministic keyword-based implementation here can be swapped for an
//! AI-backed one implementing the same contract, and downstream components
//! depend only on the trait.

use crate::analysis::keywords::KeywordExtractor;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::model::JobRecord;
use regex::Regex;

pub trait JobAnalyzer {
    /// Turn raw posting text into a structured job record
    fn analyze(&self, text: &str, company_hint: Option<&str>) -> Result<JobRecord>;
}

pub struct KeywordJobAnalyzer {
    extractor: KeywordExtractor,
    max_keywords: usize,
    location_regex: Regex,
    city_state_regex: Regex,
    years_regex: Regex,
}

/// Section headers that start a skill list in a posting
#[derive(Debug, Clone, Copy, PartialEq)]
enum PostingSection {
    Required,
    Preferred,
    Education,
    Other,
}

impl KeywordJobAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            max_keywords: config.max_keywords,
            location_regex: Regex::new(r"(?i)(?:location|based in|located in)\s*:?\s*([^\n,.]+)")
                .expect("invalid location regex"),
            city_state_regex: Regex::new(r"\b([A-Z][a-z]+(?: [A-Z][a-z]+)*,\s*[A-Z]{2})\b")
                .expect("invalid city-state regex"),
            years_regex: Regex::new(r"(?i)\b(\d+\+?\s*years?)\b").expect("invalid years regex"),
        }
    }

    fn extract_title(&self, text: &str) -> Option<String> {
        for line in text.lines().take(5) {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.len() >= 100 {
                continue;
            }
            let lower = trimmed.to_lowercase();
            if lower.contains("we are") || lower.contains("about") || lower.contains("company") {
                continue;
            }
            return Some(trimmed.to_string());
        }
        None
    }

    fn extract_location(&self, text: &str) -> Option<String> {
        if let Some(cap) = self.location_regex.captures(text) {
            return Some(cap[1].trim().to_string());
        }
        self.city_state_regex
            .captures(text)
            .map(|cap| cap[1].trim().to_string())
    }

    fn extract_experience_level(&self, text: &str) -> Option<String> {
        if let Some(cap) = self.years_regex.captures(text) {
            return Some(cap[1].to_string());
        }
        let lower = text.to_lowercase();
        for level in ["principal", "staff", "senior", "mid-level", "junior", "entry level"] {
            if lower.contains(level) {
                return Some(level.to_string());
            }
        }
        None
    }

    /// Classify a line as a section header, if it is one
    fn classify_header(line: &str) -> Option<PostingSection> {
        let lower = line.trim().trim_end_matches(':').to_lowercase();
        if lower.len() > 60 {
            return None;
        }
        let required = ["required skills", "requirements", "must have", "must-have", "essential skills", "what you'll need", "qualifications"];
        let preferred = ["preferred skills", "preferred qualifications", "nice to have", "nice-to-have", "bonus points", "a plus"];
        let education = ["education", "education requirements", "academic requirements"];
        let other = ["responsibilities", "about the role", "about us", "benefits", "what you'll do", "compensation"];

        if required.iter().any(|h| lower.starts_with(h)) {
            Some(PostingSection::Required)
        } else if preferred.iter().any(|h| lower.starts_with(h)) {
            Some(PostingSection::Preferred)
        } else if education.iter().any(|h| lower.starts_with(h)) {
            Some(PostingSection::Education)
        } else if other.iter().any(|h| lower.starts_with(h)) {
            Some(PostingSection::Other)
        } else {
            None
        }
    }

    /// Split a list line ("Python, SQL, and Docker" or "- Kubernetes") into
    /// candidate skill strings
    fn split_items(line: &str) -> Vec<String> {
        let stripped = line
            .trim()
            .trim_start_matches(['-', '*', '•', '·'])
            .trim();
        stripped
            .split([',', ';', '/', '|'])
            .map(|part| part.trim().trim_end_matches('.').trim())
            .filter(|part| !part.is_empty() && part.len() < 100)
            .map(|part| part.to_string())
            .collect()
    }

    fn collect_sections(
        &self,
        text: &str,
    ) -> (Vec<String>, Vec<String>, Vec<String>) {
        let mut required = Vec::new();
        let mut preferred = Vec::new();
        let mut education = Vec::new();
        let mut current: Option<PostingSection> = None;

        for line in text.lines() {
            if let Some(section) = Self::classify_header(line) {
                current = Some(section);
                // Items may follow the header on the same line
                if let Some((_, rest)) = line.split_once(':') {
                    if !rest.trim().is_empty() {
                        Self::push_items(section, rest, &mut required, &mut preferred, &mut education);
                    }
                }
                continue;
            }

            if line.trim().is_empty() {
                current = None;
                continue;
            }

            if let Some(section) = current {
                Self::push_items(section, line, &mut required, &mut preferred, &mut education);
            }
        }

        (required, preferred, education)
    }

    fn push_items(
        section: PostingSection,
        line: &str,
        required: &mut Vec<String>,
        preferred: &mut Vec<String>,
        education: &mut Vec<String>,
    ) {
        let items = Self::split_items(line);
        // Skill lists get a word cap so prose bullets ("5+ years building
        // data pipelines") do not land in the term lists
        let skills_only = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .filter(|i| i.split_whitespace().count() <= 4)
                .collect()
        };
        match section {
            PostingSection::Required => required.extend(skills_only(items)),
            PostingSection::Preferred => preferred.extend(skills_only(items)),
            PostingSection::Education => education.extend(items),
            PostingSection::Other => {}
        }
    }

    fn clean_description(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl JobAnalyzer for KeywordJobAnalyzer {
    fn analyze(&self, text: &str, company_hint: Option<&str>) -> Result<JobRecord> {
        let (required_skills, preferred_skills, education_requirements) =
            self.collect_sections(text);

        let job = JobRecord {
            title: self.extract_title(text),
            company: company_hint.map(|c| c.to_string()),
            location: self.extract_location(text),
            experience_level: self.extract_experience_level(text),
            description: self.clean_description(text),
            required_skills,
            preferred_skills,
            keywords: self.extractor.extract(text, self.max_keywords),
            education_requirements,
            raw_text: text.to_string(),
            ..Default::default()
        };
        job.validate()?;
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const POSTING: &str = "\
Senior Data Engineer
Location: Austin, TX

We build analytics products used by millions.

Requirements:
- Python, SQL
- 5+ years building data pipelines
- Kafka

Nice to have:
- Rust
- Terraform

Education:
- Bachelor's degree in Computer Science or equivalent
";

    fn analyzer() -> KeywordJobAnalyzer {
        KeywordJobAnalyzer::new(&Config::default().analysis)
    }

    #[test]
    fn test_extracts_title_and_location() {
        let job = analyzer().analyze(POSTING, Some("Initech")).unwrap();
        assert_eq!(job.title.as_deref(), Some("Senior Data Engineer"));
        assert_eq!(job.location.as_deref(), Some("Austin"));
        assert_eq!(job.company.as_deref(), Some("Initech"));
    }

    #[test]
    fn test_extracts_required_and_preferred_skills() {
        let job = analyzer().analyze(POSTING, None).unwrap();
        assert!(job.required_skills.contains(&"Python".to_string()));
        assert!(job.required_skills.contains(&"SQL".to_string()));
        assert!(job.required_skills.contains(&"Kafka".to_string()));
        assert!(job.preferred_skills.contains(&"Rust".to_string()));
        assert!(job.preferred_skills.contains(&"Terraform".to_string()));
    }

    #[test]
    fn test_extracts_experience_level_and_education() {
        let job = analyzer().analyze(POSTING, None).unwrap();
        assert_eq!(job.experience_level.as_deref(), Some("5+ years"));
        assert!(!job.education_requirements.is_empty());
    }

    #[test]
    fn test_keywords_populated_from_body() {
        let job = analyzer().analyze(POSTING, None).unwrap();
        assert!(!job.keywords.is_empty());
        assert!(job.keywords.iter().any(|k| k == "data"));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let first = analyzer().analyze(POSTING, None).unwrap();
        let second = analyzer().analyze(POSTING, None).unwrap();
        assert_eq!(first.required_skills, second.required_skills);
        assert_eq!(first.keywords, second.keywords);
    }
}
