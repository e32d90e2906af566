#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/disclosure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! OpenDART provider for company directory search and statement retrieval.
//!
//! # Example
//!
//! ```no_run
//! use disclosure_dart::DartProvider;
//! use disclosure_core::{DirectoryProvider, StatementProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DartProvider::new("your_api_key")?;
//!
//!     let companies = provider.search_companies("삼성전자").await?;
//!     for company in &companies {
//!         println!("{company}");
//!     }
//!
//!     if let Some(company) = companies.first() {
//!         let statement = provider.get_statement(company.code(), "2023").await?;
//!         println!("{} lines ({})", statement.len(), statement.consolidation_scope_used);
//!     }
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use disclosure_core::{
    CompanyRef, ConsolidationScope, DirectoryProvider, DisclosureError, DisclosureProvider,
    ReportKind, Result, RetrievalPolicy, StatementProvider, StatementQuery, StatementResult,
    Transport, policy::validate_fiscal_year, status,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Company directory unpacking, decoding and matching.
pub mod directory;
mod statement;
/// Rate-limited HTTP transport.
pub mod transport;

pub use transport::HttpTransport;

use statement::Attempt;

/// OpenDART API base URL
pub const DART_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// Registry endpoint, relative to the base URL.
const REGISTRY_ENDPOINT: &str = "corpCode.xml";

/// Single-company key accounts endpoint, relative to the base URL.
const STATEMENT_ENDPOINT: &str = "fnlttSinglAcnt.json";

/// OpenDART data provider.
///
/// Holds only immutable configuration and a shared transport, so one value can serve
/// any number of concurrent callers.
#[derive(Clone)]
pub struct DartProvider {
    transport: Arc<dyn Transport>,
    api_key: String,
    base_url: String,
    scopes: Vec<ConsolidationScope>,
    report_kind: ReportKind,
}

impl fmt::Debug for DartProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DartProvider")
            .field("transport", &self.transport)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("scopes", &self.scopes)
            .field("report_kind", &self.report_kind)
            .finish()
    }
}

impl DartProvider {
    /// Create a provider with the default HTTP transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_transport(Arc::new(HttpTransport::new()?), api_key)
    }

    /// Create a provider over a custom transport.
    ///
    /// # Example
    /// ```
    /// use disclosure_dart::{DartProvider, HttpTransport};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let transport = HttpTransport::with_settings(Duration::from_secs(30), Duration::from_millis(250))?;
    /// let provider = DartProvider::with_transport(Arc::new(transport), "your_api_key")?;
    /// # Ok::<(), disclosure_core::DisclosureError>(())
    /// ```
    pub fn with_transport(transport: Arc<dyn Transport>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DisclosureError::Configuration(
                "An OpenDART API key is required".to_string(),
            ));
        }

        Ok(Self {
            transport,
            api_key,
            base_url: DART_BASE_URL.to_string(),
            scopes: RetrievalPolicy::default().scopes().to_vec(),
            report_kind: ReportKind::Annual,
        })
    }

    /// Point the provider at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Take the scope order from a retrieval policy.
    #[must_use]
    pub fn with_policy(mut self, policy: &RetrievalPolicy) -> Self {
        self.scopes = policy.scopes().to_vec();
        self
    }

    /// Returns the scope order used by [`StatementProvider::get_statement`].
    #[must_use]
    pub fn scopes(&self) -> &[ConsolidationScope] {
        &self.scopes
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Fetch the raw registry payload.
    async fn fetch_registry(&self) -> Result<Vec<u8>> {
        debug!("Fetching company registry");
        self.transport
            .get(&self.url(REGISTRY_ENDPOINT), &[("crtfc_key", self.api_key.as_str())])
            .await
    }

    /// Checks the API key against the registry endpoint.
    ///
    /// Returns `Ok(false)` when the upstream rejects the key, and an error when the
    /// registry cannot be reached or read.
    pub async fn check_credentials(&self) -> Result<bool> {
        let payload = self.fetch_registry().await?;
        let xml = directory::decode(&directory::unpack(&payload)?)?;
        match directory::parse_registry(&xml)?.ensure_accepted() {
            Ok(()) => Ok(true),
            Err(DisclosureError::Rejected { code, message }) => {
                warn!(status = %code, upstream_message = %message, "API key rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Issue one statement request and classify its outcome.
    async fn attempt(&self, query: &StatementQuery) -> Attempt {
        let params = [
            ("crtfc_key", self.api_key.as_str()),
            ("corp_code", query.company_code.as_str()),
            ("bsns_year", query.fiscal_year.as_str()),
            ("reprt_code", query.report_kind.code()),
            ("fs_div", query.consolidation_scope.code()),
        ];

        match self.transport.get(&self.url(STATEMENT_ENDPOINT), &params).await {
            Ok(body) => Attempt::from_body(query, &body),
            Err(e) => Attempt::Failed(e),
        }
    }
}

impl DisclosureProvider for DartProvider {
    fn name(&self) -> &str {
        "OpenDART"
    }

    fn description(&self) -> &str {
        "Korean Financial Supervisory Service electronic disclosure system (OpenDART)"
    }
}

#[async_trait]
impl DirectoryProvider for DartProvider {
    async fn search_companies(&self, query: &str) -> Result<Vec<CompanyRef>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DisclosureError::Validation(
                "Company name must not be empty".to_string(),
            ));
        }

        let payload = self
            .fetch_registry()
            .await
            .map_err(DisclosureError::into_directory_unavailable)?;

        let companies = directory::read_directory(&payload, query)
            .map_err(DisclosureError::into_directory_unavailable)?;

        debug!(query, matches = companies.len(), "Directory search complete");
        Ok(companies)
    }
}

#[async_trait]
impl StatementProvider for DartProvider {
    async fn get_statement(
        &self,
        company_code: &str,
        fiscal_year: &str,
    ) -> Result<StatementResult> {
        let company_code = company_code.trim();
        if company_code.is_empty() {
            return Err(DisclosureError::Validation(
                "Company code must not be empty".to_string(),
            ));
        }
        validate_fiscal_year(fiscal_year)?;

        for scope in &self.scopes {
            let query = StatementQuery {
                company_code: company_code.to_string(),
                fiscal_year: fiscal_year.to_string(),
                report_kind: self.report_kind,
                consolidation_scope: *scope,
            };

            debug!(company_code, fiscal_year, scope = %scope, "Requesting statement");

            match self.attempt(&query).await {
                Attempt::Found(result) => {
                    debug!(
                        company_code,
                        fiscal_year,
                        scope = %scope,
                        lines = result.len(),
                        "Statement found"
                    );
                    return Ok(result);
                }
                Attempt::Empty => {
                    debug!(company_code, fiscal_year, scope = %scope, "No data, trying next scope");
                }
                Attempt::Rejected { code, message } => {
                    warn!(
                        company_code,
                        fiscal_year,
                        scope = %scope,
                        status = %code,
                        description = status::describe(&code).unwrap_or("unrecognized status"),
                        upstream_message = %message,
                        "Statement request rejected, trying next scope"
                    );
                }
                Attempt::Failed(e) => {
                    warn!(
                        company_code,
                        fiscal_year,
                        scope = %scope,
                        error = %e,
                        "Statement request failed, trying next scope"
                    );
                }
            }
        }

        Err(DisclosureError::StatementNotFound {
            company_code: company_code.to_string(),
            fiscal_year: fiscal_year.to_string(),
        })
    }
}
