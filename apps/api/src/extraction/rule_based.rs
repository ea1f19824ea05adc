//! Rule-based Extraction Orchestrator.
//!
//! Pure-Rust, deterministic, no network call. Compiles every pattern once at
//! construction; afterwards the extractor is immutable and shared read-only
//! across requests.
//!
//! Algorithm:
//! 1. Match every canonical term of every category against the text.
//! 2. Derive basic-info and certification flags.
//! 3. Run the inference closure over the matched sets, skipping hedged triggers.
//! 4. Look up years of experience for each final skill in the full text.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::extraction::error::ExtractionError;
use crate::extraction::experience::ExperiencePatterns;
use crate::extraction::inference::infer_excluding;
use crate::extraction::matcher::{clause_around, TermMatcher};
use crate::extraction::strategy::ExtractionStrategy;
use crate::extraction::vocabulary::{
    canonical_terms, CertificationRule, CERTIFICATION_RULES, FULL_TIME_PATTERN,
    LIMITED_EXPERIENCE_PHRASES, OVERTIME_PATTERN,
};
use crate::models::profile::{
    BasicInfo, Certification, CertificationFlags, ExtractionMethod, ExtractionResult,
    SkillCategory, SkillMention, Skills, SkillsWithExperience,
};

struct CategoryTerm {
    category: SkillCategory,
    matcher: TermMatcher,
    experience: ExperiencePatterns,
}

struct CertificationMatcher {
    certification: Certification,
    phrases: Vec<TermMatcher>,
    ambiguous: Vec<TermMatcher>,
    qualifiers: Vec<TermMatcher>,
}

impl CertificationMatcher {
    fn compile(rule: &CertificationRule) -> Result<Self, ExtractionError> {
        let compile_all = |terms: &[&str]| {
            terms
                .iter()
                .map(|t| TermMatcher::new(t))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            certification: rule.certification,
            phrases: compile_all(rule.phrases)?,
            ambiguous: compile_all(rule.ambiguous)?,
            qualifiers: compile_all(rule.qualifiers)?,
        })
    }

    fn matches(&self, text: &str) -> bool {
        if self.phrases.iter().any(|p| p.is_match(text)) {
            return true;
        }
        self.ambiguous.iter().any(|token| {
            token.occurrences(text).into_iter().any(|range| {
                let clause = clause_around(text, range);
                self.qualifiers.iter().any(|q| q.is_match(clause))
            })
        })
    }
}

/// The rule-based extraction strategy.
pub struct RuleBasedExtractor {
    terms: Vec<CategoryTerm>,
    certifications: Vec<CertificationMatcher>,
    full_time: Regex,
    overtime: Regex,
}

impl RuleBasedExtractor {
    pub fn new() -> Result<Self, ExtractionError> {
        let mut terms = Vec::new();
        for category in SkillCategory::WITH_EXPERIENCE {
            for term in canonical_terms(category) {
                terms.push(CategoryTerm {
                    category,
                    matcher: TermMatcher::new(term)?,
                    experience: ExperiencePatterns::for_skill(term)?,
                });
            }
        }

        let certifications = CERTIFICATION_RULES
            .iter()
            .map(CertificationMatcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            terms,
            certifications,
            full_time: compile_flag_pattern(FULL_TIME_PATTERN)?,
            overtime: compile_flag_pattern(OVERTIME_PATTERN)?,
        })
    }

    /// Builds a complete result for `text`. Empty input yields an empty result.
    pub fn extract_profile(&self, text: &str) -> ExtractionResult {
        let (detected, hedged) = self.detect_skills(text);
        let skills = infer_excluding(&detected, &hedged);

        debug!(
            "Rule-based extraction: {} detected, {} inferred, {} hedged",
            detected.total(),
            skills.total() - detected.total(),
            hedged.len()
        );

        ExtractionResult {
            basic_info: self.detect_basic_info(text),
            certifications: self.detect_certifications(text),
            skills_with_experience: self.attach_experience(text, &skills),
            skills,
        }
    }

    /// Directly matched skills in canonical order, plus the subset whose every
    /// mention sits in a limited-experience clause.
    fn detect_skills(&self, text: &str) -> (Skills, HashSet<String>) {
        let mut detected = Skills::default();
        let mut hedged = HashSet::new();

        for term in &self.terms {
            let occurrences = term.matcher.occurrences(text);
            if occurrences.is_empty() {
                continue;
            }
            detected.insert(term.category, term.matcher.term());

            let all_limited = occurrences.into_iter().all(|range| {
                let clause = clause_around(text, range);
                LIMITED_EXPERIENCE_PHRASES.iter().any(|p| clause.contains(p))
            });
            if all_limited {
                hedged.insert(term.matcher.term().to_string());
            }
        }

        (detected, hedged)
    }

    fn detect_basic_info(&self, text: &str) -> BasicInfo {
        BasicInfo {
            is_full_time: self.full_time.is_match(text),
            has_overtime: self.overtime.is_match(text),
        }
    }

    fn detect_certifications(&self, text: &str) -> CertificationFlags {
        let mut flags = CertificationFlags::default();
        for matcher in &self.certifications {
            flags.set(matcher.certification, matcher.matches(text));
        }
        flags
    }

    fn attach_experience(&self, text: &str, skills: &Skills) -> SkillsWithExperience {
        let patterns: HashMap<(SkillCategory, &str), &ExperiencePatterns> = self
            .terms
            .iter()
            .map(|t| ((t.category, t.matcher.term()), &t.experience))
            .collect();

        let mut experience = SkillsWithExperience::default();
        for category in SkillCategory::WITH_EXPERIENCE {
            let Some(mentions) = experience.get_mut(category) else {
                continue;
            };
            for name in skills.get(category) {
                let years = patterns
                    .get(&(category, name.as_str()))
                    .and_then(|p| p.extract(text));
                mentions.push(SkillMention::new(name.clone(), years));
            }
        }
        experience
    }
}

fn compile_flag_pattern(pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern).map_err(|e| ExtractionError::Pattern {
        term: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl ExtractionStrategy for RuleBasedExtractor {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::RuleBased
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        Ok(self.extract_profile(text))
    }
}
