//! Statement analyses driven by a [`TextGenerator`].

use disclosure_core::{DisclosureError, Result, Selection};
use tracing::{debug, instrument};

use crate::generator::TextGenerator;
use crate::prompts::{self, AnalysisKind};
use crate::sanitize::{sanitize_input, tidy_response};

/// Produces prose analyses of a selected company's statement.
#[derive(Debug, Clone)]
pub struct Analyzer<G> {
    generator: G,
}

impl<G: TextGenerator> Analyzer<G> {
    /// Create an analyzer over a generator.
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Returns the underlying generator.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Runs one of the fixed reports.
    #[instrument(skip(self, selection), fields(company = selection.company.code(), model = self.generator.model_name()))]
    pub async fn analyze(&self, kind: AnalysisKind, selection: &Selection) -> Result<String> {
        let prompt = prompts::analysis_prompt(kind, selection)?;
        self.complete(&prompt).await
    }

    /// What the company does and how it earns money.
    pub async fn business_overview(&self, selection: &Selection) -> Result<String> {
        self.analyze(AnalysisKind::Business, selection).await
    }

    /// Health, profitability and growth, with strengths and weaknesses.
    pub async fn financial_analysis(&self, selection: &Selection) -> Result<String> {
        self.analyze(AnalysisKind::Financial, selection).await
    }

    /// Audit risk areas.
    pub async fn audit_points(&self, selection: &Selection) -> Result<String> {
        self.analyze(AnalysisKind::Audit, selection).await
    }

    /// Answers a free-form question about the statement.
    ///
    /// The question is sanitized first; one that is empty afterwards is rejected
    /// without calling the generator.
    #[instrument(skip_all, fields(company = selection.company.code()))]
    pub async fn chat(&self, selection: &Selection, question: &str) -> Result<String> {
        let question = sanitize_input(question);
        if question.is_empty() {
            return Err(DisclosureError::Validation(
                "Question must not be empty".to_string(),
            ));
        }

        let prompt = prompts::chat_prompt(selection, &question)?;
        self.complete(&prompt).await
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let raw = self.generator.generate(prompt).await?;
        let answer = tidy_response(&raw);
        debug!(chars = answer.chars().count(), "Analysis generated");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use disclosure_core::{AccountLine, CompanyRef, ConsolidationScope, StatementResult};
    use std::sync::Mutex;

    /// Echoes a canned reply and remembers the prompts it saw.
    #[derive(Debug, Default)]
    struct FakeGenerator {
        reply: String,
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(DisclosureError::Upstream("quota exceeded".to_string()));
            }
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }

    fn selection() -> Selection {
        Selection {
            company: CompanyRef::new("00126380", "삼성전자", "005930"),
            statement: StatementResult {
                company_code: "00126380".to_string(),
                status_code: "000".to_string(),
                status_message: "정상".to_string(),
                consolidation_scope_used: ConsolidationScope::Consolidated,
                fiscal_year_used: "2023".to_string(),
                lines: vec![AccountLine::new("매출액", "258,935,494", "302,231,360")],
            },
        }
    }

    fn analyzer(reply: &str) -> Analyzer<FakeGenerator> {
        Analyzer::new(FakeGenerator {
            reply: reply.to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_reports_are_tidied() {
        let analyzer = analyzer("\n\n## 리포트\n\n\n\n내용\n");
        let out = analyzer.business_overview(&selection()).await.unwrap();
        assert_eq!(out, "## 리포트\n\n내용");

        analyzer.financial_analysis(&selection()).await.unwrap();
        analyzer.audit_points(&selection()).await.unwrap();

        let prompts = analyzer.generator().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("사업분석"));
        assert!(prompts[1].contains("재무분석"));
        assert!(prompts[2].contains("회계감사"));
    }

    #[tokio::test]
    async fn test_chat_sanitizes_question() {
        let analyzer = analyzer("답변");
        let out = analyzer
            .chat(&selection(), "  <b>부채비율</b>은 \"얼마\"?  ")
            .await
            .unwrap();
        assert_eq!(out, "답변");

        let prompts = analyzer.generator().prompts.lock().unwrap();
        assert!(prompts[0].contains("부채비율은 얼마?"));
        assert!(!prompts[0].contains("<b>"));
    }

    #[tokio::test]
    async fn test_empty_question_rejected_without_call() {
        let analyzer = analyzer("unused");
        let err = analyzer.chat(&selection(), "  <br/>  ").await.unwrap_err();
        assert!(matches!(err, DisclosureError::Validation(_)));
        assert!(analyzer.generator().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let analyzer = Analyzer::new(FakeGenerator {
            fail: true,
            ..Default::default()
        });
        let err = analyzer.audit_points(&selection()).await.unwrap_err();
        assert!(matches!(err, DisclosureError::Upstream(_)));
    }
}
