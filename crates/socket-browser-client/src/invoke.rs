// crates/socket-browser-client/src/invoke.rs
// ============================================================================
// Module: Invocation Router
// Description: Resolves endpoint references and performs concrete HTTP calls.
// Purpose: Turn symbolic capability references and parameter bags into requests.
// Dependencies: socket-browser-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The invocation router resolves a symbolic endpoint reference against a
//! descriptor with deterministic precedence (operation id, then path, then
//! `method:path` composite), classifies each parameter into exactly one
//! role (path substitution, query, or body), assembles the concrete
//! request, and maps the response onto the invocation error taxonomy.
//! Exactly one network call per invocation; the caller decides retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::ACCEPT;
use serde_json::Value;
use socket_browser_core::DEFAULT_METHOD;
use socket_browser_core::Descriptor;
use socket_browser_core::EndpointInvoker;
use socket_browser_core::InvocationError;
use socket_browser_core::ParamMap;
use socket_browser_core::normalize_origin;
use url::Url;

use crate::policy::NetworkPolicy;
use crate::policy::PolicyError;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Method and path template selected for an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    /// Effective HTTP method.
    pub method: String,
    /// Path template before parameter substitution.
    pub path: String,
}

/// Resolves `endpoint_ref` against the descriptor's endpoint sequence.
///
/// Precedence is three ordered passes: exact `operationId` match, exact
/// `path` match, then exact `method:path` composite match; the first match
/// in descriptor order wins. Without a descriptor, or when nothing matches,
/// the reference is treated literally as a path with method GET.
#[must_use]
pub fn resolve_endpoint(descriptor: Option<&Descriptor>, endpoint_ref: &str) -> ResolvedCall {
    if let Some(descriptor) = descriptor {
        let by_operation = descriptor
            .endpoints
            .iter()
            .find(|ep| ep.operation_id.as_deref() == Some(endpoint_ref));
        let by_path = || descriptor.endpoints.iter().find(|ep| ep.path == endpoint_ref);
        let by_composite = || descriptor.endpoints.iter().find(|ep| ep.composite_ref() == endpoint_ref);
        if let Some(endpoint) = by_operation.or_else(by_path).or_else(by_composite) {
            return ResolvedCall {
                method: endpoint.effective_method().to_string(),
                path: endpoint.path.clone(),
            };
        }
    }
    ResolvedCall {
        method: DEFAULT_METHOD.to_string(),
        path: endpoint_ref.to_string(),
    }
}

// ============================================================================
// SECTION: Parameter Classification
// ============================================================================

/// Parameters split into their single request role each.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedParams {
    /// Path with every matching `{key}` placeholder substituted.
    pub path: String,
    /// Query parameters, for GET/DELETE methods.
    pub query: Vec<(String, String)>,
    /// Body fields, for all other methods.
    pub body: serde_json::Map<String, Value>,
}

/// Classifies each parameter into exactly one role.
///
/// Any key whose `{key}` placeholder appears in the path template becomes a
/// path substitution; substitution takes precedence over query or body
/// placement for the same key. Remaining keys become query parameters when
/// the effective method is GET or DELETE, body fields otherwise.
#[must_use]
pub fn classify_params(path: &str, method: &str, params: &ParamMap) -> ClassifiedParams {
    let is_query_method =
        method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("DELETE");
    let mut final_path = path.to_string();
    let mut query = Vec::new();
    let mut body = serde_json::Map::new();

    for (key, value) in params {
        let placeholder = format!("{{{key}}}");
        if final_path.contains(&placeholder) {
            final_path = final_path.replace(&placeholder, &plain_string(value));
        } else if is_query_method {
            query.push((key.clone(), plain_string(value)));
        } else {
            body.insert(key.clone(), value.clone());
        }
    }

    ClassifiedParams {
        path: final_path,
        query,
        body,
    }
}

/// Renders a JSON value as a bare string for path and query placement.
fn plain_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Invocation Router
// ============================================================================

/// HTTP router executing resolved endpoint invocations.
///
/// # Invariants
/// - Exactly one network call per invocation; no caching, no retries.
/// - 2xx bodies are returned decoded; non-JSON bodies pass through as JSON
///   strings.
pub struct InvocationRouter {
    /// Network limits applied to invocations.
    policy: NetworkPolicy,
    /// HTTP client configured with the invocation timeout.
    client: Client,
}

impl InvocationRouter {
    /// Creates an invocation router from the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the HTTP client cannot be built.
    pub fn new(policy: NetworkPolicy) -> Result<Self, PolicyError> {
        let client = policy.build_client(policy.invoke_timeout_ms)?;
        Ok(Self {
            policy,
            client,
        })
    }

    /// Resolves and performs one endpoint invocation.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] classified by status range (4xx client,
    /// 5xx server, with any server-supplied error text) or transport
    /// failure.
    pub async fn invoke(
        &self,
        base_url: &str,
        endpoint_ref: &str,
        params: &ParamMap,
        descriptor: Option<&Descriptor>,
    ) -> Result<Value, InvocationError> {
        let resolved = resolve_endpoint(descriptor, endpoint_ref);
        let classified = classify_params(&resolved.path, &resolved.method, params);

        let method = Method::from_bytes(resolved.method.as_bytes()).map_err(|_| {
            InvocationError::ConnectionFailed(format!("invalid http method: {}", resolved.method))
        })?;
        let target = format!("{}{}", normalize_origin(base_url), classified.path);
        let url = Url::parse(&target).map_err(|err| {
            InvocationError::ConnectionFailed(format!("invalid request url: {err}"))
        })?;

        let is_query_method = matches!(method, Method::GET | Method::DELETE);
        let mut request = self.client.request(method, url).header(ACCEPT, "application/json");
        if !classified.query.is_empty() {
            request = request.query(&classified.query);
        }
        if !is_query_method && !classified.body.is_empty() {
            request = request.json(&classified.body);
        }

        let response = request.send().await.map_err(|err| classify_transport(&err))?;
        let status = response.status().as_u16();
        match status {
            200..=299 => {
                let body = response.bytes().await.map_err(|err| classify_transport(&err))?;
                if body.len() > self.policy.max_response_bytes {
                    return Err(InvocationError::ConnectionFailed(
                        "response exceeds size limit".to_string(),
                    ));
                }
                Ok(decode_body(&body))
            }
            400..=499 => Err(InvocationError::ClientError {
                status,
                message: error_text(response).await,
            }),
            500..=599 => Err(InvocationError::ServerError {
                status,
                message: error_text(response).await,
            }),
            other => Err(InvocationError::ConnectionFailed(format!(
                "unexpected http status {other}"
            ))),
        }
    }
}

#[async_trait]
impl EndpointInvoker for InvocationRouter {
    async fn invoke(
        &self,
        base_url: &str,
        endpoint_ref: &str,
        params: &ParamMap,
        descriptor: Option<&Descriptor>,
    ) -> Result<Value, InvocationError> {
        Self::invoke(self, base_url, endpoint_ref, params, descriptor).await
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a 2xx body, passing non-JSON content through as a string.
fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Extracts any server-supplied error text from a failed response.
async fn error_text(response: reqwest::Response) -> Option<String> {
    match response.text().await {
        Ok(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

/// Maps a transport-level failure onto the invocation taxonomy.
fn classify_transport(err: &reqwest::Error) -> InvocationError {
    if err.is_timeout() {
        return InvocationError::TimedOut;
    }
    InvocationError::ConnectionFailed(err.to_string())
}
