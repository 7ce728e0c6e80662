// Test doubles for the store, the scraper and the completion client.

use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::ingest::placeholders::SenderIdentity;
use crate::llm_client::{Completer, CompletionStream, LlmError};
use crate::repository::{Filter, Repository, Sort, StoreError, Update, UpdateOutcome};
use crate::routes::build_router;
use crate::scrape_client::{Enricher, ScrapeError};
use crate::state::AppState;
use serde_json::Value;
use tower::ServiceExt;
use zip::write::FileOptions;
use zip::ZipWriter;

// =============================================================================
// In-memory document store
// =============================================================================

/// Equality-filter document store. Insert failures can be scripted by
/// attempt number, or the whole store can be made unavailable.
#[derive(Default)]
pub struct MemoryRepository {
    documents: Mutex<Vec<Document>>,
    insert_attempts: AtomicUsize,
    fail_insert_at: Option<usize>,
    unavailable: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents.into_iter().map(with_id).collect()),
            ..Self::default()
        }
    }

    /// The `n`th insert attempt (1-based) fails; all others succeed.
    pub fn failing_insert_at(n: usize) -> Self {
        Self {
            fail_insert_at: Some(n),
            ..Self::default()
        }
    }

    /// Every operation fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(offline("memory store offline"))
        } else {
            Ok(())
        }
    }
}

fn offline(message: &str) -> StoreError {
    let io = io::Error::new(io::ErrorKind::ConnectionRefused, message.to_string());
    StoreError::from(mongodb::error::Error::from(io))
}

fn with_id(mut document: Document) -> Document {
    if !document.contains_key("_id") {
        document.insert("_id", ObjectId::new());
    }
    document
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

fn matches(document: &Document, filter: &Filter) -> bool {
    filter
        .clone()
        .into_document()
        .iter()
        .all(|(key, value)| lookup(document, key) == Some(value))
}

/// Cross-type order as the server applies it: missing and null first,
/// then numbers, strings, and dates last.
fn sort_key(value: Option<&Bson>) -> (u8, i64, String) {
    match value {
        None | Some(Bson::Null) => (0, 0, String::new()),
        Some(Bson::Int32(n)) => (1, i64::from(*n), String::new()),
        Some(Bson::Int64(n)) => (1, *n, String::new()),
        Some(Bson::String(s)) => (2, 0, s.clone()),
        Some(Bson::DateTime(dt)) => (4, dt.timestamp_millis(), String::new()),
        Some(other) => (3, 0, other.to_string()),
    }
}

fn set_fields(update: Update) -> Document {
    update
        .into_document()
        .get_document("$set")
        .cloned()
        .unwrap_or_default()
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError> {
        self.check()?;
        let attempt = self.insert_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_insert_at == Some(attempt) {
            return Err(offline(&format!("insert {attempt} rejected")));
        }
        let document = with_id(document);
        let id = document.get("_id").cloned().unwrap_or(Bson::Null);
        self.documents.lock().unwrap().push(document);
        Ok(id)
    }

    async fn insert_many(&self, documents: Vec<Document>) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for document in documents {
            self.insert_one(document).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn find(&self, filter: Filter, sort: Option<Sort>) -> Result<Vec<Document>, StoreError> {
        self.check()?;
        let mut found: Vec<Document> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| matches(d, &filter))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            found.sort_by_key(|d| sort_key(lookup(d, sort.field.as_str())));
            found.reverse();
        }
        Ok(found)
    }

    async fn find_one(&self, filter: Filter) -> Result<Option<Document>, StoreError> {
        Ok(self.find(filter, None).await?.into_iter().next())
    }

    async fn update_one(
        &self,
        filter: Filter,
        update: Update,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        self.check()?;
        let fields = set_fields(update);
        let mut documents = self.documents.lock().unwrap();
        if let Some(existing) = documents.iter_mut().find(|d| matches(d, &filter)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome {
                matched: 1,
                modified: u64::from(modified),
            });
        }
        if upsert {
            let mut created = filter.into_document();
            for (key, value) in fields {
                created.insert(key, value);
            }
            documents.push(with_id(created));
        }
        Ok(UpdateOutcome::default())
    }

    async fn delete_many(&self, filter: Filter) -> Result<u64, StoreError> {
        self.check()?;
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| !matches(d, &filter));
        Ok((before - documents.len()) as u64)
    }
}

// =============================================================================
// Mock scraper
// =============================================================================

/// Serves canned pages by exact URL; unknown URLs fail with `NoContent`.
#[derive(Default)]
pub struct MockScraper {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }

    /// URLs requested, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Enricher for MockScraper {
    async fn enrich(&self, url: &str) -> Result<String, ScrapeError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or(ScrapeError::NoContent)
    }
}

// =============================================================================
// Mock completion client
// =============================================================================

/// Replays scripted responses in order, then answers `"generated"`.
#[derive(Default)]
pub struct MockCompleter {
    responses: Mutex<VecDeque<Option<String>>>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Option<Duration>,
}

impl MockCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push_back(Some(text.to_string()));
        self
    }

    pub fn with_failure(self) -> Self {
        self.responses.lock().unwrap().push_back(None);
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// `(system_rule, user_prompt)` pairs, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, system_rule: &str, user_prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_rule.to_string(), user_prompt.to_string()));
        match self.responses.lock().unwrap().pop_front() {
            Some(Some(text)) => Ok(text),
            Some(None) => Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            }),
            None => Ok("generated".to_string()),
        }
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(&self, system_rule: &str, user_prompt: &str) -> Result<String, LlmError> {
        self.pause().await;
        self.next(system_rule, user_prompt)
    }

    async fn stream(
        &self,
        system_rule: &str,
        user_prompt: &str,
    ) -> Result<CompletionStream, LlmError> {
        self.pause().await;
        let text = self.next(system_rule, user_prompt)?;
        Ok(stream::iter(vec![Ok(Bytes::from(text))]).boxed())
    }
}

// =============================================================================
// AppState
// =============================================================================

pub struct TestDeps {
    pub users: Arc<MemoryRepository>,
    pub prompts: Arc<MemoryRepository>,
    pub pain_points: Arc<MemoryRepository>,
    pub case_studies: Arc<MemoryRepository>,
    pub llm: Arc<MockCompleter>,
    pub scraper: Arc<MockScraper>,
}

impl Default for TestDeps {
    fn default() -> Self {
        Self {
            users: Arc::new(MemoryRepository::new()),
            prompts: Arc::new(MemoryRepository::new()),
            pain_points: Arc::new(MemoryRepository::new()),
            case_studies: Arc::new(MemoryRepository::new()),
            llm: Arc::new(MockCompleter::new()),
            scraper: Arc::new(MockScraper::new()),
        }
    }
}

impl TestDeps {
    pub fn state(&self) -> AppState {
        AppState {
            users: self.users.clone(),
            prompts: self.prompts.clone(),
            pain_points: self.pain_points.clone(),
            case_studies: self.case_studies.clone(),
            llm: self.llm.clone(),
            scraper: self.scraper.clone(),
            sender: SenderIdentity::default(),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state())
    }
}

// =============================================================================
// Request helpers
// =============================================================================

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send_raw(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

/// Sends the request and decodes the JSON envelope.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send_raw(router, request).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Workbook builder
// =============================================================================

/// Base64 xlsx with a single worksheet of inline-string cells. Rows are
/// numbered from `first_row`; rows above it are absent from the sheet.
pub fn xlsx_upload(first_row: u32, rows: &[&[&str]]) -> String {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (number, cells) in (first_row..).zip(rows) {
        sheet.push_str(&format!(r#"<row r="{number}">"#));
        for (i, cell) in cells.iter().enumerate() {
            let column = char::from(b'A' + i as u8);
            sheet.push_str(&format!(
                r#"<c r="{column}{number}" t="inlineStr"><is><t>{}</t></is></c>"#,
                xml_escape(cell)
            ));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let mut zip = ZipWriter::new(io::Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, body) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    STANDARD.encode(zip.finish().unwrap().into_inner())
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
