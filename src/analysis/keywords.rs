//! Text normalization and frequency-based keyword extraction

use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Top `max_terms` significant terms, ranked by frequency with ties
    /// broken by first occurrence so identical input always yields identical
    /// output. Empty text yields an empty list.
    pub fn extract(&self, text: &str, max_terms: usize) -> Vec<String> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

        for (position, token) in self.tokenize(text).into_iter().enumerate() {
            let entry = counts.entry(token).or_insert((0, position));
            entry.0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

        ranked
            .into_iter()
            .take(max_terms)
            .map(|(term, _)| term)
            .collect()
    }

    /// Lowercase, strip punctuation that carries no skill meaning, collapse
    /// whitespace. Characters like '+', '#' and inner '.' survive so tokens
    /// such as "c++", "c#", "node.js" and "3.8" stay intact.
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = String::with_capacity(text.len());
        for c in text.chars() {
            let c = match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                _ => c,
            };
            if c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '-' | '\'') {
                for lower in c.to_lowercase() {
                    normalized.push(lower);
                }
            } else {
                normalized.push(' ');
            }
        }

        normalized
            .split_whitespace()
            .map(Self::trim_edge_punctuation)
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalized, stop-word-filtered tokens in input order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .filter(|w| w.len() > 1 && !self.stop_words.contains(*w))
            .map(|w| w.to_string())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Word count for quality heuristics; Unicode-aware segmentation
    pub fn word_count(text: &str) -> usize {
        text.unicode_words().count()
    }

    fn trim_edge_punctuation(word: &str) -> &str {
        word.trim_matches(|c| matches!(c, '.' | '-' | '\''))
    }
}

static STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "can", "could",
    "did", "do", "does", "down", "during", "each", "for", "from", "further", "had", "has", "have",
    "he", "her", "here", "him", "his", "how", "if", "in", "into", "is", "it", "its", "just",
    "like", "may", "me", "might", "more", "most", "must", "my", "no", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "out", "over", "own", "per", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "us", "very",
    "was", "we", "well", "were", "what", "when", "where", "which", "while", "who", "why", "will",
    "with", "within", "would", "you", "your",
];
