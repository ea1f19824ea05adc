//! Extraction strategies and the selector that owns the fallback policy.
//!
//! `AppState` holds one `Arc<StrategySelector>`. Handlers never branch on which
//! strategy is available; they call `StrategySelector::extract` and read the
//! method off the returned `Extraction`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::extraction::error::ExtractionError;
use crate::models::profile::{ExtractionMethod, ExtractionResult};

/// One way of turning plain text into an `ExtractionResult`.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn method(&self) -> ExtractionMethod;

    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError>;
}

/// A result together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub result: ExtractionResult,
    pub method: ExtractionMethod,
}

impl Extraction {
    pub fn confidence(&self) -> f64 {
        self.method.confidence()
    }
}

/// Prefers `primary` when present; any primary failure or timeout falls back to
/// `fallback` for the same input. Results are never merged.
pub struct StrategySelector {
    primary: Option<Arc<dyn ExtractionStrategy>>,
    fallback: Arc<dyn ExtractionStrategy>,
    primary_timeout: Duration,
}

impl StrategySelector {
    pub fn new(fallback: Arc<dyn ExtractionStrategy>, primary_timeout: Duration) -> Self {
        Self {
            primary: None,
            fallback,
            primary_timeout,
        }
    }

    pub fn with_primary(mut self, primary: Arc<dyn ExtractionStrategy>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub async fn extract(&self, text: &str) -> Result<Extraction, ExtractionError> {
        if let Some(primary) = &self.primary {
            let outcome = match timeout(self.primary_timeout, primary.extract(text)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ExtractionError::Timeout(self.primary_timeout)),
            };

            match outcome {
                Ok(result) => {
                    return Ok(Extraction {
                        result,
                        method: primary.method(),
                    })
                }
                Err(e) => warn!(
                    "{:?} extraction failed, falling back to {:?}: {e}",
                    primary.method(),
                    self.fallback.method()
                ),
            }
        }

        let result = self.fallback.extract(text).await?;
        info!(
            "Extracted {} skills via {:?}",
            result.skills.total(),
            self.fallback.method()
        );

        Ok(Extraction {
            result,
            method: self.fallback.method(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rule_based::RuleBasedExtractor;
    use crate::models::profile::SkillCategory;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SAMPLE: &str = "Javaで5年、TypeScriptとReactを使った開発経験があります。";

    struct FailingStrategy {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExtractionStrategy for FailingStrategy {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Ai
        }

        async fn extract(&self, _text: &str) -> Result<ExtractionResult, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ExtractionError::QuotaExceeded("simulated".to_string()))
        }
    }

    struct StaticStrategy(ExtractionResult);

    #[async_trait]
    impl ExtractionStrategy for StaticStrategy {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Ai
        }

        async fn extract(&self, _text: &str) -> Result<ExtractionResult, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    struct HangingStrategy;

    #[async_trait]
    impl ExtractionStrategy for HangingStrategy {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Ai
        }

        async fn extract(&self, _text: &str) -> Result<ExtractionResult, ExtractionError> {
            std::future::pending().await
        }
    }

    fn rule_based() -> Arc<RuleBasedExtractor> {
        Arc::new(RuleBasedExtractor::new().unwrap())
    }

    #[tokio::test]
    async fn test_without_primary_uses_rule_based() {
        let selector = StrategySelector::new(rule_based(), Duration::from_secs(30));
        assert!(!selector.has_primary());

        let extraction = selector.extract(SAMPLE).await.unwrap();
        assert_eq!(extraction.method, ExtractionMethod::RuleBased);
        assert_eq!(extraction.confidence(), 0.75);
    }

    #[tokio::test]
    async fn test_failing_primary_equals_direct_rule_based_output() {
        let fallback = rule_based();
        let failing = Arc::new(FailingStrategy {
            calls: AtomicUsize::new(0),
        });
        let selector = StrategySelector::new(fallback.clone(), Duration::from_secs(30))
            .with_primary(failing.clone());

        for text in [SAMPLE, "", "Kubernetes 2年、AWS認定"] {
            let extraction = selector.extract(text).await.unwrap();
            assert_eq!(extraction.result, fallback.extract_profile(text));
            assert_eq!(extraction.method, ExtractionMethod::RuleBased);
            assert_eq!(extraction.confidence(), 0.75);
        }
        assert_eq!(failing.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_successful_primary_is_not_merged_with_fallback() {
        let mut ai_result = ExtractionResult::default();
        ai_result.skills.insert(SkillCategory::Languages, "Elixir");
        let selector = StrategySelector::new(rule_based(), Duration::from_secs(30))
            .with_primary(Arc::new(StaticStrategy(ai_result.clone())));

        let extraction = selector.extract(SAMPLE).await.unwrap();
        assert_eq!(extraction.method, ExtractionMethod::Ai);
        assert_eq!(extraction.confidence(), 0.95);
        assert_eq!(extraction.result, ai_result);
        assert!(!extraction.result.skills.contains(SkillCategory::Languages, "Java"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_primary_times_out_into_fallback() {
        let selector = StrategySelector::new(rule_based(), Duration::from_secs(30))
            .with_primary(Arc::new(HangingStrategy));

        let extraction = selector.extract(SAMPLE).await.unwrap();
        assert_eq!(extraction.method, ExtractionMethod::RuleBased);
        assert!(extraction
            .result
            .skills
            .contains(SkillCategory::Languages, "Java"));
    }
}
