//! Prompt templates.
//!
//! Every prompt opens with the same context block: the company, the statement the
//! figures come from, the extracted key metrics and ratios, and the raw account lines.

use disclosure_core::{ConsolidationScope, DisclosureError, KeyMetrics, Result, Selection};
use serde_json::json;
use std::fmt::Write as _;

/// Which report to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    /// What the company does and how it earns money.
    Business,
    /// Health, profitability, growth, strengths and weaknesses.
    Financial,
    /// Audit risk areas.
    Audit,
}

impl AnalysisKind {
    /// All kinds, in presentation order.
    pub const ALL: [Self; 3] = [Self::Business, Self::Financial, Self::Audit];

    /// Short identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Financial => "financial",
            Self::Audit => "audit",
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalysisKind {
    type Err = DisclosureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DisclosureError::Validation(format!("Unknown analysis kind: {s}")))
    }
}

const BUSINESS_TASK: &str = "\
위 재무 데이터를 근거로 다음 순서의 사업분석 리포트를 작성하세요.

### 1. 주요 사업영역
계정과목과 매출 구성으로 본 핵심 사업과 업종 특성.

### 2. 매출 구조
매출 규모와 전년 대비 변화, 영업이익률로 본 수익성.

### 3. 비용 구조
매출원가와 판관비 구성, 비용 효율성.

### 4. 자산 운용
자산 구성과 투자 규모, 자산 대비 매출 창출 능력.

### 5. 사업 모델과 리스크
수익 창출 방식, 재무구조상 드러나는 위험 요소.";

const FINANCIAL_TASK: &str = "\
위 재무 데이터를 근거로 다음 순서의 재무분석 리포트를 작성하세요. 모든 비율은 계산식과 함께 제시하세요.

### 1. 재무 건전성
부채비율, 자기자본비율.

### 2. 수익성
매출액과 전년 대비 증감, 영업이익률, 순이익률.

### 3. 성장성
매출 증가율, 영업이익 증가율, 자산 증가율.

### 4. 강점
근거가 있는 강점 세 가지.

### 5. 약점 및 위험요인
개선이 필요한 약점 세 가지.

### 6. 종합 의견
핵심 모니터링 지표와 종합 평가.";

const AUDIT_TASK: &str = "\
회계감사 관점에서 다음 항목별로 위험도(높음/보통/낮음), 주요 검토사항, 권고 감사절차를 작성하세요.

### 1. 수익인식
### 2. 자산 손상 및 평가
### 3. 부채 및 충당금
### 4. 특수관계자 거래
### 5. 계속기업 가정
### 6. 업종별 특수 위험";

const CHAT_GUIDELINES: &str = "\
답변 지침:
1. 위 재무정보에 근거해 답하고, 구체적인 수치를 인용하세요.
2. 전문용어는 쉽게 풀어서 설명하세요.
3. 데이터로 답할 수 없는 질문이면 그렇다고 밝히세요.";

fn context_block(selection: &Selection) -> Result<String> {
    let metrics = KeyMetrics::from_statement(&selection.statement);
    let summary = json!({
        "key_metrics": metrics,
        "ratios": metrics.ratios(),
    });
    let summary = serde_json::to_string_pretty(&summary)
        .map_err(|e| DisclosureError::MalformedPayload(format!("Failed to render metrics: {e}")))?;
    let lines = serde_json::to_string_pretty(&selection.statement.lines)
        .map_err(|e| DisclosureError::MalformedPayload(format!("Failed to render statement: {e}")))?;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "다음은 {}의 {}년 사업보고서 재무제표({}) 데이터입니다. 금융감독원 전자공시로 제출된 확정 실적입니다.",
        selection.company.name(),
        selection.statement.fiscal_year_used,
        match selection.statement.consolidation_scope_used {
            ConsolidationScope::Consolidated => "연결",
            ConsolidationScope::Standalone => "별도",
        },
    );
    let _ = writeln!(out, "\n## 주요 지표\n{summary}");
    let _ = writeln!(out, "\n## 계정 목록\n{lines}");
    Ok(out)
}

/// Renders the prompt for one of the fixed reports.
pub fn analysis_prompt(kind: AnalysisKind, selection: &Selection) -> Result<String> {
    let name = selection.company.name();
    let (title, task) = match kind {
        AnalysisKind::Business => (format!("## {name} 사업분석 리포트"), BUSINESS_TASK),
        AnalysisKind::Financial => (format!("## {name} 재무분석 리포트"), FINANCIAL_TASK),
        AnalysisKind::Audit => (format!("## {name} 회계감사 유의사항"), AUDIT_TASK),
    };

    Ok(format!(
        "{}\n{task}\n\n리포트는 다음 제목으로 시작하세요:\n{title}\n",
        context_block(selection)?
    ))
}

/// Renders the prompt for a free-form question. `question` must already be sanitized.
pub fn chat_prompt(selection: &Selection, question: &str) -> Result<String> {
    Ok(format!(
        "당신은 {}의 재무제표를 분석하는 어시스턴트입니다.\n\n{}\n## 사용자 질문\n{question}\n\n{CHAT_GUIDELINES}\n",
        selection.company.name(),
        context_block(selection)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_core::{AccountLine, CompanyRef, StatementResult};
    use rstest::rstest;

    fn selection() -> Selection {
        Selection {
            company: CompanyRef::new("00126380", "삼성전자", "005930"),
            statement: StatementResult {
                company_code: "00126380".to_string(),
                status_code: "000".to_string(),
                status_message: "정상".to_string(),
                consolidation_scope_used: ConsolidationScope::Standalone,
                fiscal_year_used: "2023".to_string(),
                lines: vec![
                    AccountLine::new("매출액", "200", "100"),
                    AccountLine::new("영업이익", "20", "10"),
                ],
            },
        }
    }

    #[rstest]
    #[case(AnalysisKind::Business, "사업분석 리포트")]
    #[case(AnalysisKind::Financial, "재무분석 리포트")]
    #[case(AnalysisKind::Audit, "회계감사 유의사항")]
    fn test_analysis_prompt(#[case] kind: AnalysisKind, #[case] title: &str) {
        let prompt = analysis_prompt(kind, &selection()).unwrap();
        assert!(prompt.contains(&format!("## 삼성전자 {title}")));
        assert!(prompt.contains("2023년"));
        assert!(prompt.contains("별도"));
        assert!(prompt.contains("\"account_nm\": \"매출액\""));
        assert!(prompt.contains("\"operating_margin\": 10.0"));
    }

    #[test]
    fn test_chat_prompt_embeds_question() {
        let prompt = chat_prompt(&selection(), "영업이익률은?").unwrap();
        assert!(prompt.contains("## 사용자 질문\n영업이익률은?"));
        assert!(prompt.contains("삼성전자"));
    }

    #[rstest]
    #[case("business", AnalysisKind::Business)]
    #[case("Financial", AnalysisKind::Financial)]
    #[case(" audit ", AnalysisKind::Audit)]
    fn test_kind_from_str(#[case] raw: &str, #[case] expected: AnalysisKind) {
        assert_eq!(raw.parse::<AnalysisKind>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            "valuation".parse::<AnalysisKind>(),
            Err(DisclosureError::Validation(_))
        ));
    }
}
