//! Structured records shared by all pipeline stages
//!
//! `ResumeRecord` and `JobRecord` are produced upstream (file loading, job
//! analysis) and consumed read-only by the optimizer, which constructs an
//! `OptimizationResult`. Records are value objects: edited copies are new
//! records, and `raw_text` is never touched after creation so the original
//! extracted text stays available for traceability.

use crate::error::{Result, ResumeOptimizerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
    }

    fn validate(&self) -> Result<()> {
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ResumeOptimizerError::Validation(format!(
                    "Invalid email format: {}",
                    email
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub contact: ContactInfo,
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Original extracted text, never mutated after creation
    #[serde(default)]
    pub raw_text: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            contact: ContactInfo::default(),
            summary: None,
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
            raw_text: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl ResumeRecord {
    /// Create a validated record; malformed sub-structure is rejected up front
    pub fn new(
        contact: ContactInfo,
        summary: Option<String>,
        skills: Vec<String>,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
        certifications: Vec<String>,
        languages: Vec<String>,
        raw_text: String,
    ) -> Result<Self> {
        let record = Self {
            contact,
            summary,
            skills,
            experience,
            education,
            certifications,
            languages,
            raw_text,
            created_at: Utc::now(),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<()> {
        self.contact.validate()?;
        for (idx, entry) in self.experience.iter().enumerate() {
            if entry.company.is_none() && entry.title.is_none() {
                return Err(ResumeOptimizerError::Validation(format!(
                    "Experience entry {} has neither company nor title",
                    idx
                )));
            }
        }
        for (idx, entry) in self.education.iter().enumerate() {
            if entry.institution.is_none() && entry.degree.is_none() {
                return Err(ResumeOptimizerError::Validation(format!(
                    "Education entry {} has neither institution nor degree",
                    idx
                )));
            }
        }
        Ok(())
    }

    /// All bullet lines across experience entries
    pub fn all_bullets(&self) -> impl Iterator<Item = &str> {
        self.experience
            .iter()
            .flat_map(|e| e.bullets.iter())
            .map(|b| b.as_str())
    }

    /// Structured fields plus raw text, joined for keyword presence checks
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(summary) = &self.summary {
            parts.push(summary);
        }
        parts.extend(self.skills.iter().map(|s| s.as_str()));
        for entry in &self.experience {
            if let Some(title) = &entry.title {
                parts.push(title);
            }
            parts.extend(entry.bullets.iter().map(|b| b.as_str()));
        }
        parts.extend(self.certifications.iter().map(|s| s.as_str()));
        parts.extend(self.languages.iter().map(|s| s.as_str()));
        parts.push(&self.raw_text);
        parts.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub education_requirements: Vec<String>,
    /// Original posting text, never mutated after creation
    #[serde(default)]
    pub raw_text: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            title: None,
            company: None,
            location: None,
            experience_level: None,
            description: String::new(),
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            keywords: Vec::new(),
            education_requirements: Vec::new(),
            raw_text: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl JobRecord {
    pub fn validate(&self) -> Result<()> {
        // Empty skill lists are valid inputs that simply score low. The only
        // structural requirement is that the record carries some text at all.
        if self.raw_text.trim().is_empty() && self.description.trim().is_empty() {
            return Err(ResumeOptimizerError::Validation(
                "Job record has neither raw text nor description".to_string(),
            ));
        }
        Ok(())
    }

    /// Priority-ordered term lists: required first, then preferred, then
    /// generic keywords
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.required_skills
            .iter()
            .chain(self.preferred_skills.iter())
            .chain(self.keywords.iter())
            .map(|s| s.as_str())
    }
}

/// Per-call score output of the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Overall match score in [0, 100]
    pub overall: f32,
    /// Weighted fraction of job terms found in the resume, in [0, 1]
    pub coverage: f32,
    /// Section completeness points out of the configured ceiling
    pub structural: f32,
    /// Per-category coverage ratios, deterministic iteration order
    pub categories: BTreeMap<String, f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub original_score: f32,
    pub optimized_score: f32,
    pub ats_compliance_score: f32,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
    pub improvements_applied: Vec<String>,
    pub optimized_resume: ResumeRecord,
    pub created_at: DateTime<Utc>,
}
