//! Pattern Matcher: whole-term, case-insensitive detection of canonical terms.

use std::ops::Range;

use regex::Regex;

use crate::extraction::error::ExtractionError;
use crate::extraction::vocabulary::CLAUSE_DELIMITERS;

const LEADING_BOUNDARY: &str = "(?:^|[^0-9A-Za-z_])";
const TRAILING_BOUNDARY: &str = "(?:[^0-9A-Za-z_]|$)";

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Boundary guard for the start of `term`. Empty when the term starts with a
/// non-word character (`.NET`), so `ASP.NET` still contains `.NET`.
pub(crate) fn leading_boundary(term: &str) -> &'static str {
    match term.chars().next() {
        Some(c) if is_ascii_word(c) => LEADING_BOUNDARY,
        _ => "",
    }
}

pub(crate) fn trailing_boundary(term: &str) -> &'static str {
    match term.chars().last() {
        Some(c) if is_ascii_word(c) => TRAILING_BOUNDARY,
        _ => "",
    }
}

/// A compiled matcher for one literal term. The term itself is capture group 1.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    regex: Regex,
}

impl TermMatcher {
    pub fn new(term: &str) -> Result<Self, ExtractionError> {
        if term.trim().is_empty() {
            return Err(ExtractionError::Pattern {
                term: term.to_string(),
                reason: "term is empty".to_string(),
            });
        }

        let pattern = format!(
            "(?i){}({}){}",
            leading_boundary(term),
            regex::escape(term),
            trailing_boundary(term)
        );
        let regex = Regex::new(&pattern).map_err(|e| ExtractionError::Pattern {
            term: term.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            term: term.to_string(),
            regex,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte ranges of every occurrence of the term. Boundary characters are
    /// excluded, and adjacent occurrences sharing a separator are all found.
    pub fn occurrences(&self, text: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;
        while start <= text.len() {
            let Some(found) = self.regex.captures_at(text, start).and_then(|c| c.get(1)) else {
                break;
            };
            ranges.push(found.range());
            start = found.end();
        }
        ranges
    }
}

/// The clause of `text` containing `range`, bounded by `CLAUSE_DELIMITERS`.
pub fn clause_around(text: &str, range: Range<usize>) -> &str {
    let start = text[..range.start]
        .char_indices()
        .rev()
        .find(|(_, c)| CLAUSE_DELIMITERS.contains(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let end = text[range.end..]
        .find(|c: char| CLAUSE_DELIMITERS.contains(&c))
        .map(|i| range.end + i)
        .unwrap_or(text.len());
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_term(text: &str, term: &str) -> bool {
        TermMatcher::new(term).is_ok_and(|m| m.is_match(text))
    }

    #[test]
    fn test_matches_case_insensitively() {
        assert!(contains_term("experienced in PYTHON and go", "Python"));
        assert!(contains_term("experienced in PYTHON and go", "Go"));
    }

    #[test]
    fn test_japanese_neighbours_act_as_boundaries() {
        assert!(contains_term("Javaで5年", "Java"));
        assert!(contains_term("TypeScriptとReactを使った", "React"));
        assert!(contains_term("TypeScriptとReactを使った", "TypeScript"));
    }

    #[test]
    fn test_word_boundary_rejects_longer_words() {
        assert!(!contains_term("JavaScript only", "Java"));
        assert!(!contains_term("Django developer", "Go"));
        assert!(!contains_term("Rust and Ruby", "R"));
        assert!(contains_term("統計にはRを使用", "R"));
    }

    #[test]
    fn test_metacharacters_match_literally() {
        assert!(contains_term("C++ / C# で開発", "C++"));
        assert!(contains_term("C++ / C# で開発", "C#"));
        assert!(!contains_term("C and more", "C++"));
        assert!(contains_term("ASP.NET Core", ".NET"));
        assert!(contains_term("Next.js 13", "Next.js"));
        assert!(!contains_term("NextXjs", "Next.js"));
    }

    #[test]
    fn test_multi_word_terms() {
        assert!(contains_term("SQL Server 2019", "SQL Server"));
        assert!(contains_term("vs code and intellij", "VS Code"));
        assert!(!contains_term("SQL-Server", "SQL Server"));
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!contains_term("anything", ""));
        assert!(!contains_term("anything", "   "));
        assert!(TermMatcher::new("").is_err());
    }

    #[test]
    fn test_occurrences_find_adjacent_mentions() {
        let matcher = TermMatcher::new("Go").unwrap();
        let text = "Go Go、go";
        let ranges = matcher.occurrences(text);
        assert_eq!(ranges.len(), 3);
        assert_eq!(&text[ranges[0].clone()], "Go");
        assert_eq!(&text[ranges[2].clone()], "go");
    }

    #[test]
    fn test_clause_around_splits_on_japanese_punctuation() {
        let text = "Javaで5年、TypeScriptは勉強中。AWSも利用";
        let matcher = TermMatcher::new("TypeScript").unwrap();
        let range = matcher.occurrences(text)[0].clone();
        assert_eq!(clause_around(text, range), "TypeScriptは勉強中");
    }

    #[test]
    fn test_clause_around_whole_text_without_delimiters() {
        let text = "AWS Solutions Architect";
        assert_eq!(clause_around(text, 0..3), text);
    }
}
