//! Text extraction from supported file formats

use crate::error::{Result, ResumeOptimizerError};
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Text,
    Markdown,
    Json,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "json" => FileType::Json,
            _ => FileType::Unknown,
        }
    }
}

/// Read a file as plain text, flattening markdown formatting when present
pub async fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ResumeOptimizerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            ResumeOptimizerError::InvalidInput(format!(
                "File has no extension: {}",
                path.display()
            ))
        })?;

    match FileType::from_extension(extension) {
        FileType::Text | FileType::Json => {
            log::info!("Reading text file: {}", path.display());
            Ok(fs::read_to_string(path).await?)
        }
        FileType::Markdown => {
            log::info!("Processing markdown file: {}", path.display());
            let markdown = fs::read_to_string(path).await?;
            Ok(markdown_to_text(&markdown))
        }
        FileType::Unknown => Err(ResumeOptimizerError::UnsupportedFormat(format!(
            "Unsupported file type for: {}",
            path.display()
        ))),
    }
}

fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_to_text(&html_output)
}

fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let tag_regex = regex::Regex::new(r"<[^>]*>").expect("invalid tag regex");
    let clean_text = tag_regex.replace_all(&text, "");

    clean_text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_flattened_to_plain_text() {
        let text = markdown_to_text("# Jane Doe\n\n**Skills:** Python, *SQL*\n\n- Built things\n");
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Skills: Python, SQL"));
        assert!(text.contains("Built things"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("TXT"), FileType::Text);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("json"), FileType::Json);
        assert_eq!(FileType::from_extension("pdf"), FileType::Unknown);
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.xyz");
        std::fs::write(&path, "content").unwrap();
        assert!(extract_text(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let result = extract_text(Path::new("does/not/exist.txt")).await;
        assert!(result.is_err());
    }
}
