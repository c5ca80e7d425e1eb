use axum::http::{HeaderMap, Method};
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The raw pieces of an inbound request needed to build a capture
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub method: Method,
    /// Request target as received: path plus query string
    pub target: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Snapshot of one inbound webhook request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    received_at: DateTime<Utc>,
    method: String,
    path: String,
    query: IndexMap<String, Vec<String>>,
    headers: IndexMap<String, String>,
    body_raw: String,
    body_parsed: Option<Value>,
}

impl CaptureRecord {
    /// Builds the record for `request`, received at `received_at`
    #[must_use]
    pub fn from_request(request: CaptureRequest, received_at: DateTime<Utc>) -> Self {
        let body_raw = String::from_utf8_lossy(&request.body).into_owned();
        let body_parsed = parse_body(&body_raw);

        Self {
            received_at,
            method: request.method.as_str().to_string(),
            query: parse_target_query(&request.target),
            path: request.target,
            headers: flatten_headers(&request.headers),
            body_raw,
            body_parsed,
        }
    }

    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// `received_at` as written to the wire, e.g. `2025-02-01T10:20:30.123456Z`
    #[must_use]
    pub fn received_at_string(&self) -> String {
        format_timestamp(&self.received_at)
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn query(&self) -> &IndexMap<String, Vec<String>> {
        &self.query
    }

    #[must_use]
    pub const fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub fn body_raw(&self) -> &str {
        &self.body_raw
    }

    /// `None` when the body is blank or not JSON
    #[must_use]
    pub const fn body_parsed(&self) -> Option<&Value> {
        self.body_parsed.as_ref()
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(timestamp))
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

fn parse_target_query(target: &str) -> IndexMap<String, Vec<String>> {
    target
        .split_once('?')
        .map(|(_, query)| parse_query_string(query))
        .unwrap_or_default()
}

/// Parses a form-encoded query string into name -> values
///
/// Names keep first-seen order and values keep received order. Pairs with an
/// empty value (`a=` or a bare `a`) are dropped. Anything after `#` is ignored.
#[must_use]
pub fn parse_query_string(query: &str) -> IndexMap<String, Vec<String>> {
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    let mut parsed: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        parsed
            .entry(name.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    parsed
}

/// Flattens headers into name -> value; for repeated headers the last value wins
///
/// Names are kept as the HTTP layer delivers them, which is lowercase.
fn flatten_headers(headers: &HeaderMap) -> IndexMap<String, String> {
    let mut flat = IndexMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        flat.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    flat
}
