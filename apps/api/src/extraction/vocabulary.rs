//! Canonical term lists and rule tables.
//!
//! Everything here is read by both strategies: the rule-based engine applies it
//! directly and `extraction::prompts` renders it into the AI instructions.

use crate::models::profile::{Certification, SkillCategory};
use crate::models::profile::SkillCategory::{Frameworks, Infrastructure, Languages};

// ────────────────────────────────────────────────────────────────────────────
// Canonical term lists
// ────────────────────────────────────────────────────────────────────────────

pub const LANGUAGES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C#",
    "C++",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Scala",
    "Perl",
    "R",
    "MATLAB",
    "Objective-C",
    "Dart",
    "Lua",
];

pub const FRAMEWORKS: &[&str] = &[
    "React",
    "Vue",
    "Angular",
    "Next.js",
    "Nuxt",
    "Svelte",
    "Express",
    "FastAPI",
    "Django",
    "Flask",
    "Spring",
    "Rails",
    ".NET",
    "Laravel",
    "Symfony",
    "Nest.js",
    "Koa",
    "Gin",
    "Flutter",
    "React Native",
];

pub const DATABASES: &[&str] = &[
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "Oracle",
    "SQL Server",
    "DynamoDB",
    "Cassandra",
    "Elasticsearch",
    "Neo4j",
    "InfluxDB",
    "MariaDB",
    "SQLite",
    "CouchDB",
];

pub const INFRASTRUCTURE: &[&str] = &[
    "Docker",
    "Kubernetes",
    "Jenkins",
    "Terraform",
    "Ansible",
    "Nginx",
    "Apache",
    "RabbitMQ",
    "Kafka",
    "Prometheus",
    "Grafana",
    "ELK Stack",
    "Consul",
    "Vault",
    "Istio",
];

pub const TOOLS: &[&str] = &[
    "Git",
    "GitHub",
    "GitLab",
    "Bitbucket",
    "JIRA",
    "Confluence",
    "Slack",
    "VS Code",
    "IntelliJ",
    "Eclipse",
    "Postman",
    "Swagger",
    "SonarQube",
    "Datadog",
    "New Relic",
];

pub const CLOUD: &[&str] = &[
    "AWS",
    "Azure",
    "GCP",
    "Alibaba Cloud",
    "IBM Cloud",
    "Oracle Cloud",
    "Heroku",
    "Vercel",
    "Netlify",
    "Cloudflare",
    "DigitalOcean",
    "Linode",
    "Firebase",
    "Supabase",
];

/// Canonical list for a category. `Other` has no vocabulary.
pub fn canonical_terms(category: SkillCategory) -> &'static [&'static str] {
    match category {
        SkillCategory::Languages => LANGUAGES,
        SkillCategory::Frameworks => FRAMEWORKS,
        SkillCategory::Databases => DATABASES,
        SkillCategory::Infrastructure => INFRASTRUCTURE,
        SkillCategory::Tools => TOOLS,
        SkillCategory::Cloud => CLOUD,
        SkillCategory::Other => &[],
    }
}

pub fn is_recognized(category: SkillCategory, name: &str) -> bool {
    canonical_terms(category).contains(&name)
}

// ────────────────────────────────────────────────────────────────────────────
// Inference rules
// ────────────────────────────────────────────────────────────────────────────

/// `trigger` present in the family's trigger category implies every entry of `implies`.
#[derive(Debug)]
pub struct InferenceRule {
    pub trigger: &'static str,
    pub implies: &'static [(SkillCategory, &'static str)],
}

/// One ordered family of rules sharing a trigger category.
#[derive(Debug)]
pub struct RuleFamily {
    pub label: &'static str,
    pub trigger_category: SkillCategory,
    pub rules: &'static [InferenceRule],
}

const WEB_LANGUAGES: &[(SkillCategory, &str)] =
    &[(Languages, "JavaScript"), (Languages, "TypeScript")];

/// Framework → language/framework. A rule that implies another framework also
/// lists that framework's own implications, so a single pass is closed.
pub static FRAMEWORK_IMPLICATIONS: RuleFamily = RuleFamily {
    label: "フレームワークから言語を推論",
    trigger_category: Frameworks,
    rules: &[
        InferenceRule { trigger: "React", implies: WEB_LANGUAGES },
        InferenceRule {
            trigger: "Next.js",
            implies: &[
                (Frameworks, "React"),
                (Languages, "JavaScript"),
                (Languages, "TypeScript"),
            ],
        },
        InferenceRule { trigger: "Vue", implies: WEB_LANGUAGES },
        InferenceRule {
            trigger: "Nuxt",
            implies: &[
                (Frameworks, "Vue"),
                (Languages, "JavaScript"),
                (Languages, "TypeScript"),
            ],
        },
        InferenceRule {
            trigger: "Angular",
            implies: &[(Languages, "TypeScript"), (Languages, "JavaScript")],
        },
        InferenceRule { trigger: "Django", implies: &[(Languages, "Python")] },
        InferenceRule { trigger: "Flask", implies: &[(Languages, "Python")] },
        InferenceRule { trigger: "FastAPI", implies: &[(Languages, "Python")] },
        InferenceRule { trigger: "Spring", implies: &[(Languages, "Java")] },
        InferenceRule { trigger: "Rails", implies: &[(Languages, "Ruby")] },
        InferenceRule { trigger: "Laravel", implies: &[(Languages, "PHP")] },
        InferenceRule { trigger: "Symfony", implies: &[(Languages, "PHP")] },
        InferenceRule { trigger: ".NET", implies: &[(Languages, "C#")] },
        InferenceRule { trigger: "Express", implies: WEB_LANGUAGES },
        InferenceRule { trigger: "Nest.js", implies: WEB_LANGUAGES },
        InferenceRule { trigger: "Koa", implies: WEB_LANGUAGES },
        InferenceRule { trigger: "Gin", implies: &[(Languages, "Go")] },
        InferenceRule { trigger: "Flutter", implies: &[(Languages, "Dart")] },
        InferenceRule {
            trigger: "React Native",
            implies: &[
                (Frameworks, "React"),
                (Languages, "JavaScript"),
                (Languages, "TypeScript"),
            ],
        },
    ],
};

/// Language → base language.
pub static LANGUAGE_DEPENDENCIES: RuleFamily = RuleFamily {
    label: "上位スキルからの推論",
    trigger_category: Languages,
    rules: &[InferenceRule {
        trigger: "TypeScript",
        implies: &[(Languages, "JavaScript")],
    }],
};

pub static INFRASTRUCTURE_DEPENDENCIES: RuleFamily = RuleFamily {
    label: "インフラ関連の推論",
    trigger_category: Infrastructure,
    rules: &[InferenceRule {
        trigger: "Kubernetes",
        implies: &[(Infrastructure, "Docker")],
    }],
};

/// Evaluation order matters: later families consume earlier results.
pub static INFERENCE_FAMILIES: [&RuleFamily; 3] = [
    &FRAMEWORK_IMPLICATIONS,
    &LANGUAGE_DEPENDENCIES,
    &INFRASTRUCTURE_DEPENDENCIES,
];

/// Phrases marking a mention as limited experience; such skills trigger no inference.
pub const LIMITED_EXPERIENCE_PHRASES: &[&str] = &["触れた程度", "研修で学習", "勉強中", "学習中"];

// ────────────────────────────────────────────────────────────────────────────
// Certifications and basic info
// ────────────────────────────────────────────────────────────────────────────

/// `phrases` set the flag on their own. `ambiguous` tokens (bare brand names,
/// short codes) only count when one of `qualifiers` appears in the same clause.
#[derive(Debug)]
pub struct CertificationRule {
    pub certification: Certification,
    pub description: &'static str,
    pub phrases: &'static [&'static str],
    pub ambiguous: &'static [&'static str],
    pub qualifiers: &'static [&'static str],
}

// Role titles ("Solutions Architect", "DevOps Engineer") and plain level words
// ("Associate", "Professional") are not certification evidence on their own.
const AWS_QUALIFIERS: &[&str] = &["認定", "資格", "Certified", "Certification"];

// `試験` alone reads as "test" (試験環境) and `取得` as "fetch" (データ取得).
const EXAM_QUALIFIERS: &[&str] = &["合格", "資格", "情報処理技術者試験", "技術者試験", "Examination"];

pub static CERTIFICATION_RULES: &[CertificationRule] = &[
    CertificationRule {
        certification: Certification::AwsCertified,
        description: "AWS認定資格（ソリューションアーキテクト、デベロッパー等）",
        phrases: &["AWS認定", "AWS 認定", "AWS Certified", "Amazon Web Services Certified"],
        ambiguous: &["AWS", "Amazon Web Services"],
        qualifiers: AWS_QUALIFIERS,
    },
    CertificationRule {
        certification: Certification::Ccna,
        description: "CCNA（Cisco Certified Network Associate）",
        phrases: &["CCNA", "Cisco Certified", "シスコ認定"],
        ambiguous: &[],
        qualifiers: &[],
    },
    CertificationRule {
        certification: Certification::Lpic,
        description: "LPIC（Linux Professional Institute Certification）",
        phrases: &["LPIC", "Linux Professional", "Linux認定"],
        ambiguous: &[],
        qualifiers: &[],
    },
    CertificationRule {
        certification: Certification::JavaGold,
        description: "Java Gold/Silver",
        phrases: &[
            "Java Gold",
            "Java ゴールド",
            "Oracle Certified Java",
            "OCJP Gold",
            "Java SE Gold",
        ],
        ambiguous: &[],
        qualifiers: &[],
    },
    CertificationRule {
        certification: Certification::OracleMaster,
        description: "Oracle Master",
        phrases: &["Oracle Master", "オラクルマスター", "Oracle認定"],
        ambiguous: &["Oracle Certified"],
        qualifiers: &["Master", "Database", "DBA", "データベース"],
    },
    CertificationRule {
        certification: Certification::FundamentalIt,
        description: "基本情報技術者試験（FE）",
        phrases: &[
            "基本情報技術者",
            "基本情報処理",
            "基本情報試験",
            "Fundamental Information Technology",
        ],
        ambiguous: &["FE", "基本情報"],
        qualifiers: EXAM_QUALIFIERS,
    },
    CertificationRule {
        certification: Certification::AppliedIt,
        description: "応用情報技術者試験（AP）",
        phrases: &[
            "応用情報技術者",
            "応用情報処理",
            "応用情報試験",
            "Applied Information Technology",
        ],
        ambiguous: &["AP", "応用情報"],
        qualifiers: EXAM_QUALIFIERS,
    },
    CertificationRule {
        certification: Certification::DatabaseSpecialist,
        description: "データベーススペシャリスト",
        phrases: &["データベーススペシャリスト", "DB Specialist", "データベース専門", "DB技術者"],
        ambiguous: &[],
        qualifiers: &[],
    },
    CertificationRule {
        certification: Certification::NetworkSpecialist,
        description: "ネットワークスペシャリスト",
        phrases: &[
            "ネットワークスペシャリスト",
            "NW Specialist",
            "ネットワーク専門",
            "Network Specialist",
        ],
        ambiguous: &[],
        qualifiers: &[],
    },
    CertificationRule {
        certification: Certification::SecuritySpecialist,
        description: "情報セキュリティスペシャリスト",
        phrases: &[
            "情報セキュリティスペシャリスト",
            "SC Specialist",
            "セキュリティ専門",
            "Security Specialist",
            "情報セキュリティマネジメント",
            "情報処理安全確保支援士",
        ],
        ambiguous: &[],
        qualifiers: &[],
    },
];

pub const FULL_TIME_PATTERN: &str = r"(?i)正社員|フルタイム|full.?time";
pub const OVERTIME_PATTERN: &str = r"(?i)残業|過勤務|時間外労働|overtime";

/// Characters that end a clause for co-occurrence and hedge checks.
pub const CLAUSE_DELIMITERS: &[char] = &[
    '。', '、', '，', ',', '．', '！', '？', '!', '?', ';', '；', '\n', '\r',
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_lists_have_no_duplicates() {
        for category in SkillCategory::WITH_EXPERIENCE {
            let terms = canonical_terms(category);
            let unique: HashSet<_> = terms.iter().collect();
            assert_eq!(unique.len(), terms.len(), "duplicate in {category:?}");
        }
    }

    #[test]
    fn test_other_has_no_vocabulary() {
        assert!(canonical_terms(SkillCategory::Other).is_empty());
    }

    #[test]
    fn test_rule_triggers_and_targets_are_recognized() {
        for family in INFERENCE_FAMILIES {
            for rule in family.rules {
                assert!(
                    is_recognized(family.trigger_category, rule.trigger),
                    "unknown trigger {}",
                    rule.trigger
                );
                for (category, name) in rule.implies {
                    assert!(is_recognized(*category, name), "unknown target {name}");
                }
            }
        }
    }

    /// A framework implied by a framework rule must not bring implications of its
    /// own that the implying rule lacks; otherwise one pass would not be closed.
    #[test]
    fn test_framework_rules_are_closed() {
        let family = &FRAMEWORK_IMPLICATIONS;
        for rule in family.rules {
            for (category, name) in rule.implies {
                if *category != Frameworks {
                    continue;
                }
                if let Some(nested) = family.rules.iter().find(|r| r.trigger == *name) {
                    for implied in nested.implies {
                        assert!(
                            rule.implies.contains(implied),
                            "{} implies {} but misses {:?}",
                            rule.trigger,
                            name,
                            implied
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_language_rules_are_closed() {
        let family = &LANGUAGE_DEPENDENCIES;
        for rule in family.rules {
            for (_, name) in rule.implies {
                if let Some(nested) = family.rules.iter().find(|r| r.trigger == *name) {
                    for implied in nested.implies {
                        assert!(rule.implies.contains(implied));
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_certification_has_exactly_one_rule() {
        for certification in Certification::ALL {
            let count = CERTIFICATION_RULES
                .iter()
                .filter(|r| r.certification == certification)
                .count();
            assert_eq!(count, 1, "{certification:?}");
        }
    }

    #[test]
    fn test_ambiguous_tokens_always_have_qualifiers() {
        for rule in CERTIFICATION_RULES {
            if !rule.ambiguous.is_empty() {
                assert!(!rule.qualifiers.is_empty(), "{:?}", rule.certification);
            }
            assert!(!rule.phrases.is_empty());
        }
    }
}
