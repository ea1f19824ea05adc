//! Skill profile: the wire shape shared by every extraction strategy.

use serde::{Deserialize, Serialize};

/// Skill buckets, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frameworks,
    Databases,
    Infrastructure,
    Tools,
    Cloud,
    Other,
}

impl SkillCategory {
    /// Categories that carry a years-of-experience list. `Other` never does.
    pub const WITH_EXPERIENCE: [SkillCategory; 6] = [
        SkillCategory::Languages,
        SkillCategory::Frameworks,
        SkillCategory::Databases,
        SkillCategory::Infrastructure,
        SkillCategory::Tools,
        SkillCategory::Cloud,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Languages => "languages",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Databases => "databases",
            SkillCategory::Infrastructure => "infrastructure",
            SkillCategory::Tools => "tools",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Other => "other",
        }
    }
}

/// The ten certifications tracked on the skill sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Certification {
    AwsCertified,
    Ccna,
    Lpic,
    JavaGold,
    OracleMaster,
    FundamentalIt,
    AppliedIt,
    DatabaseSpecialist,
    NetworkSpecialist,
    SecuritySpecialist,
}

impl Certification {
    pub const ALL: [Certification; 10] = [
        Certification::AwsCertified,
        Certification::Ccna,
        Certification::Lpic,
        Certification::JavaGold,
        Certification::OracleMaster,
        Certification::FundamentalIt,
        Certification::AppliedIt,
        Certification::DatabaseSpecialist,
        Certification::NetworkSpecialist,
        Certification::SecuritySpecialist,
    ];

    /// JSON field name of the flag.
    pub fn flag_name(self) -> &'static str {
        match self {
            Certification::AwsCertified => "hasAWSCertified",
            Certification::Ccna => "hasCCNA",
            Certification::Lpic => "hasLPIC",
            Certification::JavaGold => "hasJavaGold",
            Certification::OracleMaster => "hasOracleMaster",
            Certification::FundamentalIt => "hasFE",
            Certification::AppliedIt => "hasAP",
            Certification::DatabaseSpecialist => "hasDBSpecialist",
            Certification::NetworkSpecialist => "hasNWSpecialist",
            Certification::SecuritySpecialist => "hasSCSpecialist",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub is_full_time: bool,
    pub has_overtime: bool,
}

/// All ten flags are required on the wire; a partial object is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationFlags {
    #[serde(rename = "hasAWSCertified")]
    pub has_aws_certified: bool,
    #[serde(rename = "hasCCNA")]
    pub has_ccna: bool,
    #[serde(rename = "hasLPIC")]
    pub has_lpic: bool,
    #[serde(rename = "hasJavaGold")]
    pub has_java_gold: bool,
    #[serde(rename = "hasOracleMaster")]
    pub has_oracle_master: bool,
    #[serde(rename = "hasFE")]
    pub has_fe: bool,
    #[serde(rename = "hasAP")]
    pub has_ap: bool,
    #[serde(rename = "hasDBSpecialist")]
    pub has_db_specialist: bool,
    #[serde(rename = "hasNWSpecialist")]
    pub has_nw_specialist: bool,
    #[serde(rename = "hasSCSpecialist")]
    pub has_sc_specialist: bool,
}

impl CertificationFlags {
    fn slot(&mut self, certification: Certification) -> &mut bool {
        match certification {
            Certification::AwsCertified => &mut self.has_aws_certified,
            Certification::Ccna => &mut self.has_ccna,
            Certification::Lpic => &mut self.has_lpic,
            Certification::JavaGold => &mut self.has_java_gold,
            Certification::OracleMaster => &mut self.has_oracle_master,
            Certification::FundamentalIt => &mut self.has_fe,
            Certification::AppliedIt => &mut self.has_ap,
            Certification::DatabaseSpecialist => &mut self.has_db_specialist,
            Certification::NetworkSpecialist => &mut self.has_nw_specialist,
            Certification::SecuritySpecialist => &mut self.has_sc_specialist,
        }
    }

    pub fn set(&mut self, certification: Certification, value: bool) {
        *self.slot(certification) = value;
    }

    pub fn get(&self, certification: Certification) -> bool {
        match certification {
            Certification::AwsCertified => self.has_aws_certified,
            Certification::Ccna => self.has_ccna,
            Certification::Lpic => self.has_lpic,
            Certification::JavaGold => self.has_java_gold,
            Certification::OracleMaster => self.has_oracle_master,
            Certification::FundamentalIt => self.has_fe,
            Certification::AppliedIt => self.has_ap,
            Certification::DatabaseSpecialist => self.has_db_specialist,
            Certification::NetworkSpecialist => self.has_nw_specialist,
            Certification::SecuritySpecialist => self.has_sc_specialist,
        }
    }

    pub fn held(&self) -> impl Iterator<Item = Certification> + '_ {
        Certification::ALL.into_iter().filter(|c| self.get(*c))
    }
}

/// A detected skill with an optional years-of-experience value.
/// `years: None` means "present, duration unknown" and is omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMention {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<f64>,
}

impl SkillMention {
    pub fn new(name: impl Into<String>, years: Option<f64>) -> Self {
        Self {
            name: name.into(),
            years,
        }
    }
}

/// Ordered, per-category skill names. Each name appears at most once per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub infrastructure: Vec<String>,
    pub tools: Vec<String>,
    pub cloud: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl Skills {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Languages => &self.languages,
            SkillCategory::Frameworks => &self.frameworks,
            SkillCategory::Databases => &self.databases,
            SkillCategory::Infrastructure => &self.infrastructure,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Cloud => &self.cloud,
            SkillCategory::Other => &self.other,
        }
    }

    fn list_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Languages => &mut self.languages,
            SkillCategory::Frameworks => &mut self.frameworks,
            SkillCategory::Databases => &mut self.databases,
            SkillCategory::Infrastructure => &mut self.infrastructure,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::Cloud => &mut self.cloud,
            SkillCategory::Other => &mut self.other,
        }
    }

    /// Names compare case-insensitively: "react" is already present if "React" is.
    pub fn contains(&self, category: SkillCategory, name: &str) -> bool {
        let name = name.to_lowercase();
        self.get(category).iter().any(|s| s.to_lowercase() == name)
    }

    /// Appends `name` unless it is already present. The first spelling wins.
    /// Returns whether it was added.
    pub fn insert(&mut self, category: SkillCategory, name: &str) -> bool {
        if self.contains(category, name) {
            return false;
        }
        self.list_mut(category).push(name.to_string());
        true
    }

    pub fn total(&self) -> usize {
        [
            SkillCategory::Languages,
            SkillCategory::Frameworks,
            SkillCategory::Databases,
            SkillCategory::Infrastructure,
            SkillCategory::Tools,
            SkillCategory::Cloud,
            SkillCategory::Other,
        ]
        .iter()
        .map(|c| self.get(*c).len())
        .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsWithExperience {
    pub languages: Vec<SkillMention>,
    pub frameworks: Vec<SkillMention>,
    pub databases: Vec<SkillMention>,
    pub infrastructure: Vec<SkillMention>,
    pub tools: Vec<SkillMention>,
    pub cloud: Vec<SkillMention>,
}

impl SkillsWithExperience {
    pub fn get_mut(&mut self, category: SkillCategory) -> Option<&mut Vec<SkillMention>> {
        match category {
            SkillCategory::Languages => Some(&mut self.languages),
            SkillCategory::Frameworks => Some(&mut self.frameworks),
            SkillCategory::Databases => Some(&mut self.databases),
            SkillCategory::Infrastructure => Some(&mut self.infrastructure),
            SkillCategory::Tools => Some(&mut self.tools),
            SkillCategory::Cloud => Some(&mut self.cloud),
            SkillCategory::Other => None,
        }
    }
}

#[cfg(test)]
impl SkillsWithExperience {
    /// `None` for `Other`, which carries no experience list.
    pub fn get(&self, category: SkillCategory) -> Option<&[SkillMention]> {
        match category {
            SkillCategory::Languages => Some(&self.languages),
            SkillCategory::Frameworks => Some(&self.frameworks),
            SkillCategory::Databases => Some(&self.databases),
            SkillCategory::Infrastructure => Some(&self.infrastructure),
            SkillCategory::Tools => Some(&self.tools),
            SkillCategory::Cloud => Some(&self.cloud),
            SkillCategory::Other => None,
        }
    }

    pub fn find(&self, category: SkillCategory, name: &str) -> Option<&SkillMention> {
        self.get(category)?.iter().find(|m| m.name == name)
    }
}

/// Complete result of one extraction call. Built fresh per input, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub basic_info: BasicInfo,
    pub certifications: CertificationFlags,
    pub skills: Skills,
    pub skills_with_experience: SkillsWithExperience,
}

/// Which strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "rule-based")]
    RuleBased,
}

impl ExtractionMethod {
    /// Fixed confidence reported alongside each result.
    pub fn confidence(self) -> f64 {
        match self {
            ExtractionMethod::Ai => 0.95,
            ExtractionMethod::RuleBased => 0.75,
        }
    }
}
