use std::sync::Arc;

use crate::assessments::AssessmentStore;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::insights::EnrichmentCache;
use crate::llm_client::LlmClient;
use crate::matching::CareerMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub catalog: Arc<Catalog>,
    /// Pluggable matcher. Default: RuleBasedMatcher.
    pub matcher: Arc<dyn CareerMatcher>,
    /// Postgres when DATABASE_URL is set, in-memory otherwise.
    pub store: Arc<dyn AssessmentStore>,
    /// None when GEMINI_API_KEY is unset; enrichment then serves static data.
    pub llm: Option<LlmClient>,
    pub cache: EnrichmentCache,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// Embedded catalog, in-memory store, no LLM, no cache.
    pub fn for_tests() -> Self {
        use crate::assessments::MemoryAssessmentStore;
        use crate::matching::RuleBasedMatcher;

        Self {
            catalog: Arc::new(Catalog::embedded().expect("embedded catalog is valid")),
            matcher: Arc::new(RuleBasedMatcher),
            store: Arc::new(MemoryAssessmentStore::new()),
            llm: None,
            cache: EnrichmentCache::disabled(),
            config: Config::default(),
        }
    }
}
