//! Request decoding shared by both services.
//!
//! Embedded HTTP stacks (SIM900 AT commands, ESP32 `HTTPClient`) are sloppy
//! about content types, so bodies are decoded by what they claim to be and
//! fall back to plain text.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Form, FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use fieldlink_domain::request_log::RequestMetadata;
use fieldlink_domain::submission::is_truthy;

use crate::error::ApiError;

/// A decoded request body.
///
/// - `application/json` → the parsed JSON value
/// - `application/x-www-form-urlencoded` → an object of string fields
/// - anything else → the body as a string
/// - empty body → `null`
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(pub Value);

impl Payload {
    /// The body as a key-value object; non-object bodies read as empty.
    #[must_use]
    pub fn into_object(self) -> Map<String, Value> {
        match self.0 {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl<S: Send + Sync> FromRequest<S> for Payload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers());

        if content_type == "application/x-www-form-urlencoded"
            && *req.method() != Method::GET
            && *req.method() != Method::HEAD
        {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            return Ok(Self(Value::Object(collect_pairs(pairs))));
        }

        let bytes = Bytes::from_request(req, state).await?;
        if bytes.is_empty() {
            return Ok(Self(Value::Null));
        }
        if content_type == "application/json" || content_type.ends_with("+json") {
            return serde_json::from_slice(&bytes)
                .map(Self)
                .map_err(|err| ApiError::malformed(format!("invalid JSON body: {err}")));
        }
        Ok(Self(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        )))
    }
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

fn collect_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Transport-level facts about a request, for the request log.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    pub method: String,
    pub path: String,
    pub origin: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

impl RequestInfo {
    /// Combine with the decoded body into loggable metadata.
    #[must_use]
    pub fn into_metadata(self, body: Value) -> RequestMetadata {
        RequestMetadata {
            method: self.method,
            path: self.path,
            origin: self.origin,
            headers: self.headers,
            query: self.query,
            body,
        }
    }

    /// The query string as a JSON object.
    #[must_use]
    pub fn query_object(&self) -> Map<String, Value> {
        self.query
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs.into_iter().collect())
            .unwrap_or_default();

        Ok(Self {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            origin: origin(parts),
            headers: collect_headers(&parts.headers),
            query,
        })
    }
}

/// First `X-Forwarded-For` hop, else the peer address.
fn origin(parts: &Parts) -> Option<String> {
    let forwarded = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    forwarded.or_else(|| {
        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
    })
}

/// Header names are lowercase; repeated headers are joined with `, `.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// Read a loosely-typed device value as text.
///
/// Strings, numbers and booleans are accepted; unset values (`null`, `false`,
/// zero, `""`) and containers give `None`.
#[must_use]
pub fn truthy_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Deserialize an optional field that devices may send as a string, a
/// number or a boolean, through [`truthy_text`].
///
/// # Errors
///
/// Only fails when the input is not valid for [`Value`].
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(truthy_text))
}
