//! AI extraction strategy.
//!
//! Sends the first `AI_INPUT_CHAR_LIMIT` characters to the chat-completion
//! model and validates the reply into an `ExtractionResult`. The reply is
//! loosely shaped, so it is normalized here and never trusted as-is.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::extraction::error::ExtractionError;
use crate::extraction::prompts::{render_system_prompt, user_prompt};
use crate::extraction::strategy::ExtractionStrategy;
use crate::llm_client::LlmClient;
use crate::models::profile::{
    BasicInfo, CertificationFlags, ExtractionMethod, ExtractionResult, SkillCategory,
    SkillMention,
};

/// Characters (not bytes) of input the model sees.
pub const AI_INPUT_CHAR_LIMIT: usize = 3000;

/// Longest prefix of `text` holding at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiMention {
    pub name: String,
    #[serde(default)]
    pub years: Option<f64>,
}

/// Model reply as received. Booleans are strict; skill maps are keyed by
/// category name and unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiExtraction {
    pub basic_info: BasicInfo,
    pub certifications: CertificationFlags,
    pub skills: HashMap<String, Option<Vec<String>>>,
    #[serde(default)]
    pub skills_with_experience: Option<HashMap<String, Option<Vec<AiMention>>>>,
}

impl AiExtraction {
    pub fn into_result(self) -> ExtractionResult {
        let mut result = ExtractionResult {
            basic_info: self.basic_info,
            certifications: self.certifications,
            ..Default::default()
        };
        let experience = self.skills_with_experience.unwrap_or_default();

        for category in SkillCategory::WITH_EXPERIENCE {
            let key = category.as_str();

            for name in self.skills.get(key).into_iter().flatten().flatten() {
                let name = name.trim();
                if !name.is_empty() {
                    result.skills.insert(category, name);
                }
            }

            let mut years: HashMap<String, f64> = HashMap::new();
            for mention in experience.get(key).into_iter().flatten().flatten() {
                let name = mention.name.trim();
                if name.is_empty() {
                    continue;
                }
                if result.skills.insert(category, name) {
                    debug!("AI listed '{name}' only with experience; adding to {key}");
                }
                if let Some(y) = mention.years.filter(|y| y.is_finite() && *y >= 0.0) {
                    years.entry(name.to_lowercase()).or_insert(y);
                }
            }

            let mentions: Vec<SkillMention> = result
                .skills
                .get(category)
                .iter()
                .map(|name| {
                    let known = years.get(&name.to_lowercase()).copied();
                    SkillMention::new(name.as_str(), known)
                })
                .collect();
            if let Some(slot) = result.skills_with_experience.get_mut(category) {
                *slot = mentions;
            }
        }

        result
    }
}

/// The AI extraction strategy.
pub struct AiExtractor {
    llm: LlmClient,
    system_prompt: String,
}

impl AiExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system_prompt: render_system_prompt(),
        }
    }
}

#[async_trait]
impl ExtractionStrategy for AiExtractor {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Ai
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        let input = truncate_chars(text, AI_INPUT_CHAR_LIMIT);
        debug!(
            "Sending {} of {} characters to {}",
            input.chars().count(),
            text.chars().count(),
            self.llm.model()
        );

        let reply: AiExtraction = self
            .llm
            .call_json(&user_prompt(input), &self.system_prompt)
            .await?;
        let result = reply.into_result();

        info!("Extracted {} skills via AI", result.skills.total());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn reply(skills: Value, experience: Value) -> Value {
        json!({
            "basicInfo": { "isFullTime": true, "hasOvertime": false },
            "certifications": {
                "hasAWSCertified": true, "hasCCNA": false, "hasLPIC": false,
                "hasJavaGold": false, "hasOracleMaster": false, "hasFE": false,
                "hasAP": false, "hasDBSpecialist": false, "hasNWSpecialist": false,
                "hasSCSpecialist": false
            },
            "skills": skills,
            "skillsWithExperience": experience
        })
    }

    fn parse(value: Value) -> ExtractionResult {
        serde_json::from_value::<AiExtraction>(value)
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");

        let long = "あ".repeat(AI_INPUT_CHAR_LIMIT + 50);
        let cut = truncate_chars(&long, AI_INPUT_CHAR_LIMIT);
        assert_eq!(cut.chars().count(), AI_INPUT_CHAR_LIMIT);
    }

    #[test]
    fn test_well_formed_reply_is_kept() {
        let result = parse(reply(
            json!({ "languages": ["Java", "TypeScript"], "cloud": ["AWS"] }),
            json!({ "languages": [{ "name": "Java", "years": 5 }, { "name": "TypeScript" }] }),
        ));

        assert!(result.basic_info.is_full_time);
        assert!(result.certifications.has_aws_certified);
        assert_eq!(result.skills.languages, vec!["Java", "TypeScript"]);
        assert_eq!(
            result.skills_with_experience.languages,
            vec![
                SkillMention::new("Java", Some(5.0)),
                SkillMention::new("TypeScript", None)
            ]
        );
        assert_eq!(
            result.skills_with_experience.cloud,
            vec![SkillMention::new("AWS", None)]
        );
        assert!(result.skills.other.is_empty());
    }

    #[test]
    fn test_names_are_trimmed_and_deduplicated() {
        let result = parse(reply(
            json!({ "languages": [" Java ", "Java", "", "  "] }),
            json!(null),
        ));
        assert_eq!(result.skills.languages, vec!["Java"]);
        assert_eq!(result.skills_with_experience.languages.len(), 1);
    }

    #[test]
    fn test_names_differing_only_in_case_are_one_skill() {
        let result = parse(reply(
            json!({ "frameworks": ["React", "react"] }),
            json!({ "frameworks": [{ "name": "REACT", "years": 2 }] }),
        ));
        assert_eq!(result.skills.frameworks, vec!["React"]);
        assert_eq!(
            result.skills_with_experience.frameworks,
            vec![SkillMention::new("React", Some(2.0))]
        );
    }

    #[test]
    fn test_experience_only_names_join_skills() {
        let result = parse(reply(
            json!({ "databases": ["MySQL"] }),
            json!({ "databases": [{ "name": "PostgreSQL", "years": 2.5 }] }),
        ));
        assert_eq!(result.skills.databases, vec!["MySQL", "PostgreSQL"]);
        assert_eq!(
            result.skills_with_experience.find(SkillCategory::Databases, "PostgreSQL"),
            Some(&SkillMention::new("PostgreSQL", Some(2.5)))
        );
    }

    #[test]
    fn test_invalid_years_become_unknown() {
        let result = parse(reply(
            json!({ "tools": ["Git", "Jira"] }),
            json!({ "tools": [{ "name": "Git", "years": -1 }, { "name": "Jira", "years": null }] }),
        ));
        for mention in &result.skills_with_experience.tools {
            assert_eq!(mention.years, None);
        }
    }

    #[test]
    fn test_null_lists_and_unknown_categories_are_ignored() {
        let result = parse(reply(
            json!({ "languages": null, "other": ["COBOL"], "soft_skills": ["会話"] }),
            json!({ "frameworks": null }),
        ));
        assert_eq!(result.skills.total(), 0);
    }

    #[test]
    fn test_partial_certifications_are_rejected() {
        let mut value = reply(json!({}), json!(null));
        value["certifications"] = json!({ "hasAWSCertified": true });
        assert!(serde_json::from_value::<AiExtraction>(value).is_err());
    }

    fn client(server: &MockServer) -> LlmClient {
        LlmClient::new(&LlmConfig {
            api_key: Some("sk-test".to_string()),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1000,
            timeout: Duration::from_secs(5),
            base_url: server.base_url(),
        })
        .unwrap()
    }

    fn completion(content: Value) -> Value {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content.to_string() } }] })
    }

    #[tokio::test]
    async fn test_extract_through_llm() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(completion(reply(
                    json!({ "frameworks": ["React"] }),
                    json!({ "frameworks": [{ "name": "React", "years": 2.5 }] }),
                )));
            })
            .await;

        let extractor = AiExtractor::new(client(&server));
        assert_eq!(extractor.method(), ExtractionMethod::Ai);

        let result = extractor.extract("React（2年6ヶ月）").await.unwrap();
        assert_eq!(
            result.skills_with_experience.frameworks,
            vec![SkillMention::new("React", Some(2.5))]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_malformed_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .json_body(completion(json!({ "skills": ["Java"] })));
            })
            .await;

        let err = AiExtractor::new(client(&server))
            .extract("Java")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_rejected_key_is_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401)
                    .json_body(json!({ "error": { "message": "Incorrect API key provided" } }));
            })
            .await;

        let err = AiExtractor::new(client(&server))
            .extract("Java")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unauthorized(_)));
    }
}
