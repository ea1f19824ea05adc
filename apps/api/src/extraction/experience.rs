//! Years-of-Experience Extractor.
//!
//! Looks for an explicit duration written next to a skill name. Patterns are
//! tried in a fixed priority order and the first one that matches wins:
//!
//! 1. `Skill（N年Mヶ月）` / `Skill(N年)` / `Skill（Mヶ月）`
//! 2. `Skill N年`, `SkillでN年` (half/full-width spaces, optional particle)
//! 3. `N年 Skill`
//! 4. `Skill: N年` / `Skill：N年`
//! 5. `Skill Nヶ月`
//!
//! Month counts become years divided by 12, rounded to one decimal. Plain year
//! counts are returned as written.

use regex::{Captures, Regex};

use crate::extraction::error::ExtractionError;
use crate::extraction::matcher::{leading_boundary, trailing_boundary};

const NUMBER: &str = r"([0-9]+(?:\.[0-9]+)?)";
const SPACE: &str = "[ \t\u{3000}]*";
const MONTHS: &str = "[ヶヵケかカ]月";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationShape {
    /// Group 1 = years, group 2 = months; at least one is present.
    Parenthesized,
    /// Group 1 = years.
    Years,
    /// Group 1 = months.
    Months,
}

/// Compiled duration patterns for one skill name.
#[derive(Debug, Clone)]
pub struct ExperiencePatterns {
    patterns: Vec<(DurationShape, Regex)>,
}

impl ExperiencePatterns {
    pub fn for_skill(skill: &str) -> Result<Self, ExtractionError> {
        let name = regex::escape(skill);
        let lead = leading_boundary(skill);
        let trail = trailing_boundary(skill);

        let sources = [
            (
                DurationShape::Parenthesized,
                format!(
                    "(?i){lead}{name}{SPACE}[（(]{SPACE}(?:{NUMBER}{SPACE}年(?:間|以上)?)?{SPACE}(?:{NUMBER}{SPACE}{MONTHS})?{SPACE}(?:以上|程度)?{SPACE}[）)]"
                ),
            ),
            (
                DurationShape::Years,
                format!("(?i){lead}{name}{SPACE}(?:で|を|歴|経験)?{SPACE}{NUMBER}{SPACE}年"),
            ),
            (
                DurationShape::Years,
                format!("(?i){NUMBER}{SPACE}年(?:間|以上)?{SPACE}{name}{trail}"),
            ),
            (
                DurationShape::Years,
                format!("(?i){lead}{name}{SPACE}[:：]{SPACE}{NUMBER}{SPACE}年"),
            ),
            (
                DurationShape::Months,
                format!("(?i){lead}{name}{SPACE}{NUMBER}{SPACE}{MONTHS}"),
            ),
        ];

        let patterns = sources
            .into_iter()
            .map(|(shape, source)| {
                Regex::new(&source)
                    .map(|regex| (shape, regex))
                    .map_err(|e| ExtractionError::Pattern {
                        term: skill.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Years of experience stated for this skill, or `None` when the text
    /// does not say.
    pub fn extract(&self, text: &str) -> Option<f64> {
        self.patterns.iter().find_map(|(shape, regex)| {
            let captures = regex.captures(text)?;
            duration_from(*shape, &captures)
        })
    }
}

fn capture_number(captures: &Captures<'_>, group: usize) -> Option<f64> {
    captures
        .get(group)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

fn duration_from(shape: DurationShape, captures: &Captures<'_>) -> Option<f64> {
    match shape {
        DurationShape::Years => capture_number(captures, 1),
        DurationShape::Months => capture_number(captures, 1).map(|m| round_one_decimal(m / 12.0)),
        DurationShape::Parenthesized => {
            let years = capture_number(captures, 1);
            let months = capture_number(captures, 2);
            match (years, months) {
                (None, None) => None,
                (Some(y), None) => Some(y),
                (y, Some(m)) => Some(round_one_decimal(y.unwrap_or(0.0) + m / 12.0)),
            }
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
