//! Statement service: year fallback plus the per-session selection slot.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use disclosure_core::{
    CompanyRef, DisclosureError, Result, RetrievalPolicy, Selection, SelectionCache,
    StatementProvider, StatementResult,
};

/// Finds the latest available statement of a company and remembers per-session selections.
///
/// Years are tried most recent first, as ordered by the [`RetrievalPolicy`]; the first
/// year for which the provider returns a statement wins. Failures of individual years are
/// logged and absorbed, so callers only ever see a statement,
/// [`DisclosureError::DataNotFound`], or a [`DisclosureError::Validation`] for bad input.
///
/// # Example
///
/// ```rust,ignore
/// use disclosure::{DartProvider, RetrievalPolicy, StatementService};
/// use std::sync::Arc;
///
/// let provider = Arc::new(DartProvider::new("your_api_key")?);
/// let service = StatementService::new(provider, RetrievalPolicy::default());
///
/// let statement = service.fetch_latest("00126380").await?;
/// println!("{} ({})", statement.fiscal_year_used, statement.consolidation_scope_used);
/// ```
#[derive(Clone)]
pub struct StatementService {
    provider: Arc<dyn StatementProvider>,
    policy: RetrievalPolicy,
    cache: Option<Arc<dyn SelectionCache>>,
}

impl std::fmt::Debug for StatementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementService")
            .field("provider", &self.provider.name())
            .field("policy", &self.policy)
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

impl StatementService {
    /// Create a service without a selection cache.
    #[must_use]
    pub fn new(provider: Arc<dyn StatementProvider>, policy: RetrievalPolicy) -> Self {
        Self {
            provider,
            policy,
            cache: None,
        }
    }

    /// Set the selection cache for this service.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn SelectionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the retrieval policy.
    #[must_use]
    pub const fn policy(&self) -> &RetrievalPolicy {
        &self.policy
    }

    /// Fetches the statement of the most recent candidate year that has one.
    ///
    /// The first year is always attempted. When the policy carries a deadline, no
    /// further year is started once it has elapsed; an attempt already in flight is
    /// never interrupted.
    pub async fn fetch_latest(&self, company_code: &str) -> Result<StatementResult> {
        let company_code = company_code.trim();
        if company_code.is_empty() {
            return Err(DisclosureError::Validation(
                "Company code must not be empty".to_string(),
            ));
        }

        let started = Instant::now();
        let mut attempted_years = Vec::new();

        for year in self.policy.candidate_years() {
            if let Some(deadline) = self.policy.deadline()
                && !attempted_years.is_empty()
                && started.elapsed() >= deadline
            {
                warn!(
                    company_code,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Retrieval deadline elapsed, not trying older years"
                );
                break;
            }

            attempted_years.push(year.clone());
            debug!(company_code, fiscal_year = %year, provider = self.provider.name(), "Trying fiscal year");

            match self.provider.get_statement(company_code, year).await {
                Ok(statement) => {
                    info!(
                        company_code,
                        fiscal_year = %statement.fiscal_year_used,
                        scope = %statement.consolidation_scope_used,
                        lines = statement.len(),
                        "Statement retrieved"
                    );
                    return Ok(statement);
                }
                Err(e) if e.is_not_found() => {
                    debug!(company_code, fiscal_year = %year, "No statement for year, trying previous year");
                }
                Err(e) => {
                    warn!(
                        company_code,
                        fiscal_year = %year,
                        error = %e,
                        "Statement retrieval failed, trying previous year"
                    );
                }
            }
        }

        Err(DisclosureError::DataNotFound {
            company_code: company_code.to_string(),
            attempted_years,
        })
    }

    /// Fetches the latest statement of `company` and makes it the session's selection.
    ///
    /// The previous selection of the session is replaced only when retrieval succeeds.
    pub async fn select(&self, session: &str, company: CompanyRef) -> Result<Selection> {
        let statement = self.fetch_latest(company.code()).await?;
        let selection = Selection { company, statement };

        if let Some(cache) = &self.cache
            && let Err(e) = cache.put(session, &selection).await
        {
            warn!(session, error = %e, "Failed to store selection");
        }

        Ok(selection)
    }

    /// Returns the session's current selection, if any.
    pub async fn current(&self, session: &str) -> Result<Option<Selection>> {
        match &self.cache {
            Some(cache) => cache.get(session).await,
            None => Ok(None),
        }
    }

    /// Drops the session's selection. Returns true if one was present.
    pub async fn forget(&self, session: &str) -> Result<bool> {
        match &self.cache {
            Some(cache) => cache.remove(session).await,
            None => Ok(false),
        }
    }
}
