//! Integration tests for directory search and scope fallback against a scripted transport.

use async_trait::async_trait;
use disclosure_core::{
    ConsolidationScope, DirectoryProvider, DisclosureError, Result, StatementProvider, Transport,
};
use disclosure_dart::DartProvider;
use encoding_rs::EUC_KR;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Debug, Clone)]
enum Reply {
    Body(Vec<u8>),
    Fail(&'static str),
}

/// Transport double keyed by `(endpoint, bsns_year, fs_div)`; unknown keys fail.
#[derive(Debug, Default)]
struct ScriptedTransport {
    replies: HashMap<(String, String, String), Reply>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl ScriptedTransport {
    fn registry(mut self, payload: Vec<u8>) -> Self {
        self.replies.insert(
            ("corpCode.xml".into(), String::new(), String::new()),
            Reply::Body(payload),
        );
        self
    }

    fn statement(mut self, year: &str, scope: &str, json: &str) -> Self {
        self.replies.insert(
            ("fnlttSinglAcnt.json".into(), year.into(), scope.into()),
            Reply::Body(json.as_bytes().to_vec()),
        );
        self
    }

    fn failing_statement(mut self, year: &str, scope: &str) -> Self {
        self.replies.insert(
            ("fnlttSinglAcnt.json".into(), year.into(), scope.into()),
            Reply::Fail("operation timed out"),
        );
        self
    }

    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        let endpoint = url.rsplit('/').next().unwrap_or_default().to_string();
        let param = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_string())
                .unwrap_or_default()
        };
        assert_eq!(param("crtfc_key"), "test_key");

        let key = (endpoint, param("bsns_year"), param("fs_div"));
        self.calls.lock().unwrap().push(key.clone());

        match self.replies.get(&key) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Fail(reason)) => Err(DisclosureError::Transport(reason.to_string())),
            None => Err(DisclosureError::Transport("connection refused".to_string())),
        }
    }
}

fn provider(transport: Arc<ScriptedTransport>) -> DartProvider {
    DartProvider::with_transport(transport, "test_key").unwrap()
}

fn registry_xml(names: &[&str]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<result>\n");
    for (i, name) in names.iter().enumerate() {
        xml.push_str(&format!(
            "<list><corp_code>{:08}</corp_code><corp_name>{name}</corp_name>\
             <stock_code></stock_code><modify_date>20240101</modify_date></list>\n",
            i + 1
        ));
    }
    xml.push_str("</result>\n");
    xml
}

fn zipped(contents: &[u8]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("CORPCODE.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(contents).unwrap();
    writer.finish().unwrap().into_inner()
}

const FOUND: &str = r#"{"status":"000","message":"정상","list":[
    {"account_nm":"매출액","thstrm_amount":"258,935,494,000,000","frmtrm_amount":"302,231,360,000,000"},
    {"account_nm":"영업이익","thstrm_amount":"6,566,976,000,000","frmtrm_amount":"43,376,630,000,000"}
]}"#;
const NO_DATA: &str = r#"{"status":"013","message":"조회된 데이타가 없습니다."}"#;
const EMPTY_SUCCESS: &str = r#"{"status":"000","message":"정상","list":[]}"#;

#[tokio::test]
async fn test_search_caps_results_in_registry_order() {
    let names: Vec<String> = (0..30)
        .map(|i| if i % 6 == 5 { format!("기타{i}") } else { format!("삼성{i}") })
        .collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let transport = Arc::new(ScriptedTransport::default().registry(registry_xml(&refs).into_bytes()));

    let hits = provider(transport).search_companies("삼성").await.unwrap();

    assert_eq!(hits.len(), 10);
    let expected: Vec<&str> = refs.iter().copied().filter(|n| n.starts_with("삼성")).take(10).collect();
    let actual: Vec<&str> = hits.iter().map(|c| c.name()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_search_no_match_is_empty() {
    let transport = Arc::new(
        ScriptedTransport::default().registry(registry_xml(&["삼성전자", "LG화학"]).into_bytes()),
    );
    let hits = provider(transport).search_companies("현대").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_search_zip_and_raw_agree() {
    let xml = registry_xml(&["삼성전자", "삼성SDI", "Samsung Co", "LG전자"]);

    let raw = Arc::new(ScriptedTransport::default().registry(xml.clone().into_bytes()));
    let zip = Arc::new(ScriptedTransport::default().registry(zipped(xml.as_bytes())));

    let from_raw = provider(raw).search_companies("samsung").await.unwrap();
    let from_zip = provider(zip).search_companies("samsung").await.unwrap();

    assert_eq!(from_raw.len(), 1);
    assert_eq!(from_raw, from_zip);
}

#[tokio::test]
async fn test_search_legacy_encoding() {
    let xml = registry_xml(&["현대자동차", "기아"]).replace("UTF-8", "EUC-KR");
    let (encoded, _, _) = EUC_KR.encode(&xml);
    let transport = Arc::new(ScriptedTransport::default().registry(zipped(&encoded)));

    let hits = provider(transport).search_companies("현대").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), "현대자동차");
    assert_eq!(hits[0].code(), "00000001");
}

#[tokio::test]
async fn test_search_failures_are_directory_unavailable() {
    // Transport failure
    let transport = Arc::new(ScriptedTransport::default());
    let err = provider(transport).search_companies("삼성").await.unwrap_err();
    match err {
        DisclosureError::DirectoryUnavailable(inner) => {
            assert!(matches!(*inner, DisclosureError::Transport(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Malformed XML
    let transport = Arc::new(
        ScriptedTransport::default().registry(b"<result><list></result>".to_vec()),
    );
    let err = provider(transport).search_companies("삼성").await.unwrap_err();
    match err {
        DisclosureError::DirectoryUnavailable(inner) => {
            assert!(matches!(*inner, DisclosureError::MalformedPayload(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_blank_inputs_make_no_calls() {
    let transport = Arc::new(ScriptedTransport::default());
    let dart = provider(transport.clone());

    assert!(matches!(
        dart.search_companies("   ").await,
        Err(DisclosureError::Validation(_))
    ));
    assert!(matches!(
        dart.get_statement("", "2023").await,
        Err(DisclosureError::Validation(_))
    ));
    assert!(matches!(
        dart.get_statement("00126380", "23").await,
        Err(DisclosureError::Validation(_))
    ));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_consolidated_preferred() {
    let transport = Arc::new(
        ScriptedTransport::default()
            .statement("2023", "CFS", FOUND)
            .statement("2023", "OFS", FOUND),
    );
    let result = provider(transport.clone())
        .get_statement("00126380", "2023")
        .await
        .unwrap();

    assert_eq!(result.consolidation_scope_used, ConsolidationScope::Consolidated);
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_falls_back_to_standalone() {
    let transport = Arc::new(
        ScriptedTransport::default()
            .statement("2023", "CFS", NO_DATA)
            .statement("2023", "OFS", FOUND),
    );
    let result = provider(transport.clone())
        .get_statement("00126380", "2023")
        .await
        .unwrap();

    assert_eq!(result.consolidation_scope_used, ConsolidationScope::Standalone);
    assert_eq!(result.fiscal_year_used, "2023");
    assert_eq!(result.lines[0].account_name, "매출액");

    let scopes: Vec<String> = transport.calls().into_iter().map(|(_, _, s)| s).collect();
    assert_eq!(scopes, vec!["CFS", "OFS"]);
}

#[tokio::test]
async fn test_empty_success_triggers_fallback() {
    let transport = Arc::new(
        ScriptedTransport::default()
            .statement("2023", "CFS", EMPTY_SUCCESS)
            .statement("2023", "OFS", FOUND),
    );
    let result = provider(transport).get_statement("00126380", "2023").await.unwrap();
    assert_eq!(result.consolidation_scope_used, ConsolidationScope::Standalone);
}

#[tokio::test]
async fn test_fatal_and_transport_errors_are_absorbed() {
    let rejected = r#"{"status":"020","message":"요청 제한을 초과하였습니다."}"#;
    let transport = Arc::new(
        ScriptedTransport::default()
            .statement("2023", "CFS", rejected)
            .statement("2023", "OFS", FOUND),
    );
    let result = provider(transport).get_statement("00126380", "2023").await.unwrap();
    assert_eq!(result.consolidation_scope_used, ConsolidationScope::Standalone);

    let transport = Arc::new(
        ScriptedTransport::default()
            .failing_statement("2023", "CFS")
            .statement("2023", "OFS", FOUND),
    );
    let result = provider(transport).get_statement("00126380", "2023").await.unwrap();
    assert_eq!(result.consolidation_scope_used, ConsolidationScope::Standalone);
}

#[tokio::test]
async fn test_year_exhausted_is_statement_not_found() {
    let transport = Arc::new(
        ScriptedTransport::default()
            .statement("2023", "CFS", NO_DATA)
            .failing_statement("2023", "OFS"),
    );
    let err = provider(transport.clone())
        .get_statement("00126380", "2023")
        .await
        .unwrap_err();

    match err {
        DisclosureError::StatementNotFound {
            company_code,
            fiscal_year,
        } => {
            assert_eq!(company_code, "00126380");
            assert_eq!(fiscal_year, "2023");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn test_check_credentials() {
    let rejected = "<result><status>010</status><message>등록되지 않은 키입니다.</message></result>";
    let transport = Arc::new(ScriptedTransport::default().registry(rejected.as_bytes().to_vec()));
    assert!(!provider(transport).check_credentials().await.unwrap());

    let transport = Arc::new(
        ScriptedTransport::default().registry(zipped(registry_xml(&["삼성전자"]).as_bytes())),
    );
    assert!(provider(transport).check_credentials().await.unwrap());

    let transport = Arc::new(ScriptedTransport::default());
    assert!(provider(transport).check_credentials().await.is_err());
}
