//! Company directory: unpacking, decoding and parsing the bulk registry.
//!
//! The registry arrives as one payload that is either a ZIP archive holding a single
//! XML file or the XML itself. Each `<list>` element is one company:
//!
//! ```xml
//! <result>
//!   <list>
//!     <corp_code>00126380</corp_code>
//!     <corp_name>삼성전자</corp_name>
//!     <stock_code>005930</stock_code>
//!     <modify_date>20230110</modify_date>
//!   </list>
//! </result>
//! ```
//!
//! A rejected request comes back as raw XML with a `<status>` and `<message>` and no
//! records.

use disclosure_core::{
    CompanyRef, DisclosureError, Result, Status, provider::MAX_SEARCH_RESULTS, status,
};
use encoding_rs::EUC_KR;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::borrow::Cow;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Leading bytes of a ZIP archive.
pub const ZIP_SIGNATURE: &[u8] = b"PK";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One raw `<list>` record. Fields are `None` when the element is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryEntry {
    /// `corp_code`
    pub code: Option<String>,
    /// `corp_name`
    pub name: Option<String>,
    /// `stock_code`
    pub stock_code: Option<String>,
}

impl RegistryEntry {
    /// Projects the entry into a [`CompanyRef`]. Entries without a code or name yield `None`.
    #[must_use]
    pub fn into_company(self) -> Option<CompanyRef> {
        let code = self.code?;
        let name = self.name?;
        Some(CompanyRef::new(
            code,
            name,
            self.stock_code.unwrap_or_default(),
        ))
    }
}

/// A parsed registry document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryDocument {
    /// Top-level `<status>`, present on rejections.
    pub status: Option<String>,
    /// Top-level `<message>`.
    pub message: Option<String>,
    /// Records in document order.
    pub entries: Vec<RegistryEntry>,
}

impl RegistryDocument {
    /// Fails with [`DisclosureError::Rejected`] when the document carries a rejection status.
    pub fn ensure_accepted(&self) -> Result<()> {
        let Some(code) = self.status.as_deref() else {
            return Ok(());
        };
        match status::classify(code, self.message.as_deref()) {
            Status::Success | Status::EmptyResult => Ok(()),
            Status::FatalError { code, message } => Err(DisclosureError::Rejected { code, message }),
        }
    }
}

/// Returns the XML bytes of a registry payload, unzipping it when it is an archive.
///
/// Only the first file of an archive is read.
pub fn unpack(payload: &[u8]) -> Result<Cow<'_, [u8]>> {
    if !payload.starts_with(ZIP_SIGNATURE) {
        return Ok(Cow::Borrowed(payload));
    }

    let mut archive = ZipArchive::new(Cursor::new(payload)).map_err(|e| {
        DisclosureError::MalformedPayload(format!("Failed to open registry archive: {e}"))
    })?;

    if archive.is_empty() {
        return Err(DisclosureError::MalformedPayload(
            "Registry archive is empty".to_string(),
        ));
    }

    let mut file = archive.by_index(0).map_err(|e| {
        DisclosureError::MalformedPayload(format!("Failed to read registry archive entry: {e}"))
    })?;

    let mut contents = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
    file.read_to_end(&mut contents).map_err(|e| {
        DisclosureError::MalformedPayload(format!("Failed to decompress registry: {e}"))
    })?;

    Ok(Cow::Owned(contents))
}

/// Decodes registry bytes as UTF-8, falling back to EUC-KR, and strips a leading BOM.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => EUC_KR
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| {
                DisclosureError::MalformedPayload(
                    "Registry is neither valid UTF-8 nor EUC-KR".to_string(),
                )
            })?,
    };

    Ok(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&*text).to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Code,
    Name,
    StockCode,
    Status,
    Message,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"corp_code" => Some(Self::Code),
            b"corp_name" => Some(Self::Name),
            b"stock_code" => Some(Self::StockCode),
            b"status" => Some(Self::Status),
            b"message" => Some(Self::Message),
            _ => None,
        }
    }
}

fn slot<'a>(
    doc: &'a mut RegistryDocument,
    entry: Option<&'a mut RegistryEntry>,
    field: Field,
) -> Option<&'a mut Option<String>> {
    match (entry, field) {
        (Some(entry), Field::Code) => Some(&mut entry.code),
        (Some(entry), Field::Name) => Some(&mut entry.name),
        (Some(entry), Field::StockCode) => Some(&mut entry.stock_code),
        (None, Field::Status) => Some(&mut doc.status),
        (None, Field::Message) => Some(&mut doc.message),
        _ => None,
    }
}

/// Parses registry XML.
pub fn parse_registry(xml: &str) -> Result<RegistryDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = RegistryDocument::default();
    let mut current: Option<RegistryEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            DisclosureError::MalformedPayload(format!(
                "XML parse error at position {}: {e}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(e) if e.name().as_ref() == b"list" => {
                current = Some(RegistryEntry::default());
                field = None;
            }
            Event::Start(e) => {
                field = Field::from_tag(e.name().as_ref());
                if let Some(f) = field
                    && let Some(target) = slot(&mut doc, current.as_mut(), f)
                {
                    *target = Some(String::new());
                }
            }
            Event::Empty(e) => {
                if let Some(f) = Field::from_tag(e.name().as_ref())
                    && let Some(target) = slot(&mut doc, current.as_mut(), f)
                {
                    *target = Some(String::new());
                }
            }
            Event::Text(t) => {
                if let Some(f) = field
                    && let Some(Some(value)) = slot(&mut doc, current.as_mut(), f)
                {
                    let text = t.unescape().map_err(|e| {
                        DisclosureError::MalformedPayload(format!("Invalid XML text: {e}"))
                    })?;
                    value.push_str(&text);
                }
            }
            Event::End(e) if e.name().as_ref() == b"list" => {
                if let Some(entry) = current.take() {
                    doc.entries.push(entry);
                }
                field = None;
            }
            Event::End(_) => field = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc)
}

/// Returns at most [`MAX_SEARCH_RESULTS`] companies whose name contains `query`,
/// case-insensitively, in document order. Incomplete entries are skipped.
#[must_use]
pub fn match_companies(entries: Vec<RegistryEntry>, query: &str) -> Vec<CompanyRef> {
    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter_map(RegistryEntry::into_company)
        .filter(|company| company.name().to_lowercase().contains(&needle))
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Runs the whole directory pipeline on a raw payload: unpack, decode, parse, match.
pub fn read_directory(payload: &[u8], query: &str) -> Result<Vec<CompanyRef>> {
    let xml = decode(&unpack(payload)?)?;
    let doc = parse_registry(&xml)?;
    doc.ensure_accepted()?;
    Ok(match_companies(doc.entries, query))
}
