use std::sync::Arc;

use crate::config::Config;
use crate::extraction::strategy::StrategySelector;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in it is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub selector: Arc<StrategySelector>,
    pub config: Config,
}
