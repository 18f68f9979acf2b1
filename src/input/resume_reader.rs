//! Resume loading
//!
//! Structured resumes arrive as JSON; plain-text and markdown resumes get a
//! light header-based section split so the scorer has structured fields to
//! work with. Entity-level parsing (names, dates, employers from prose) is
//! deliberately left to upstream collaborators; this reader only recognizes
//! conventional section headers.

use crate::error::Result;
use crate::input::text_extractor::{extract_text, FileType};
use crate::model::{ContactInfo, EducationEntry, ExperienceEntry, ResumeRecord};
use regex::Regex;
use std::path::Path;

/// Load a resume record from a `.json`, `.txt`, or `.md` file
pub async fn load_resume(path: &Path) -> Result<ResumeRecord> {
    let file_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(FileType::from_extension)
        .unwrap_or(FileType::Unknown);

    if file_type == FileType::Json {
        let content = extract_text(path).await?;
        let record: ResumeRecord = serde_json::from_str(&content)?;
        record.validate()?;
        return Ok(record);
    }

    let text = extract_text(path).await?;
    resume_from_text(&text)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ResumeSection {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Languages,
    Other,
}

/// Build a record from raw resume text using section headers
pub fn resume_from_text(text: &str) -> Result<ResumeRecord> {
    let email_regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("invalid email regex");
    let phone_regex = Regex::new(r"\+?\(?[0-9][0-9()\-. ]{7,}[0-9]").expect("invalid phone regex");

    let mut contact = ContactInfo {
        email: email_regex.find(text).map(|m| m.as_str().to_string()),
        phone: phone_regex.find(text).map(|m| m.as_str().to_string()),
        ..Default::default()
    };
    // First non-empty line without an email/URL is taken as the name
    for line in text.lines().take(5) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.contains('@') || trimmed.contains("http") {
            continue;
        }
        if trimmed.len() < 60 && classify_header(trimmed).is_none() {
            contact.name = Some(trimmed.to_string());
        }
        break;
    }

    let mut summary_lines: Vec<String> = Vec::new();
    let mut skills: Vec<String> = Vec::new();
    let mut experience: Vec<ExperienceEntry> = Vec::new();
    let mut education: Vec<EducationEntry> = Vec::new();
    let mut certifications: Vec<String> = Vec::new();
    let mut languages: Vec<String> = Vec::new();
    let mut current = ResumeSection::Other;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(section) = classify_header(trimmed) {
            current = section;
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        match current {
            ResumeSection::Summary => summary_lines.push(trimmed.to_string()),
            ResumeSection::Skills => skills.extend(split_list_items(trimmed)),
            ResumeSection::Experience => append_experience_line(&mut experience, trimmed),
            ResumeSection::Education => append_education_line(&mut education, trimmed),
            ResumeSection::Certifications => certifications.extend(split_list_items(trimmed)),
            ResumeSection::Languages => languages.extend(split_list_items(trimmed)),
            ResumeSection::Other => {}
        }
    }

    let summary = if summary_lines.is_empty() {
        None
    } else {
        Some(summary_lines.join(" "))
    };

    ResumeRecord::new(
        contact,
        summary,
        skills,
        experience,
        education,
        certifications,
        languages,
        text.to_string(),
    )
}

fn classify_header(line: &str) -> Option<ResumeSection> {
    let lower = line.trim_end_matches(':').trim().to_lowercase();
    if lower.len() > 40 {
        return None;
    }
    let matches = |patterns: &[&str]| patterns.iter().any(|p| lower == *p || lower.starts_with(p));

    if matches(&["summary", "profile", "objective", "about"]) {
        Some(ResumeSection::Summary)
    } else if matches(&["skills", "technical skills", "core competencies"]) {
        Some(ResumeSection::Skills)
    } else if matches(&["experience", "work experience", "professional experience", "employment"])
    {
        Some(ResumeSection::Experience)
    } else if matches(&["education", "academic background"]) {
        Some(ResumeSection::Education)
    } else if matches(&["certifications", "certificates", "licenses"]) {
        Some(ResumeSection::Certifications)
    } else if matches(&["languages"]) {
        Some(ResumeSection::Languages)
    } else {
        None
    }
}

fn split_list_items(line: &str) -> Vec<String> {
    line.trim_start_matches(['-', '*', '•', '·'])
        .split([',', ';', '|'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Bulleted lines attach to the current entry; anything else starts a new
/// one, with "Title at Company (duration)" and "Title, Company" both handled
fn append_experience_line(experience: &mut Vec<ExperienceEntry>, line: &str) {
    let is_bullet = line.starts_with(['-', '*', '•', '·']);
    if is_bullet {
        let bullet = line.trim_start_matches(['-', '*', '•', '·']).trim();
        if let Some(entry) = experience.last_mut() {
            entry.bullets.push(bullet.to_string());
            return;
        }
    }

    let (head, duration) = split_trailing_duration(line);
    let (title, company) = if let Some((t, c)) = head.split_once(" at ") {
        (t.trim().to_string(), Some(c.trim().to_string()))
    } else if let Some((t, c)) = head.split_once(',') {
        (t.trim().to_string(), Some(c.trim().to_string()))
    } else {
        (head.trim().to_string(), None)
    };

    experience.push(ExperienceEntry {
        company,
        title: Some(title),
        duration,
        bullets: Vec::new(),
    });
}

fn append_education_line(education: &mut Vec<EducationEntry>, line: &str) {
    let cleaned = line.trim_start_matches(['-', '*', '•', '·']).trim();
    let (head, duration) = split_trailing_duration(cleaned);
    let (degree, institution) = if let Some((d, i)) = head.split_once(',') {
        (Some(d.trim().to_string()), Some(i.trim().to_string()))
    } else {
        (Some(head.trim().to_string()), None)
    };
    education.push(EducationEntry {
        institution,
        degree,
        duration,
    });
}

/// Split a trailing parenthesized duration: "Engineer at Acme (2020-2024)"
fn split_trailing_duration(line: &str) -> (&str, Option<String>) {
    let trimmed = line.trim();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            let duration = trimmed[open + 1..trimmed.len() - 1].trim();
            if !duration.is_empty() {
                return (trimmed[..open].trim(), Some(duration.to_string()));
            }
        }
    }
    (trimmed, None)
}
