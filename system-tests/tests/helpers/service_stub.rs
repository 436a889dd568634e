// system-tests/tests/helpers/service_stub.rs
// ============================================================================
// Module: Service Stub
// Description: Local socket-agent service fixture.
// Purpose: Serve a descriptor and a grocery endpoint set over real HTTP.
// Dependencies: tiny_http, serde_json
// ============================================================================

//! ## Overview
//! Runs a `tiny_http` server on an ephemeral port that behaves like a small
//! grocery service: it answers the well-known descriptor path and a handful
//! of declared endpoints, recording every request so suites can assert on
//! the wire traffic the browser produced.

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// One request the fixture service saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method as sent.
    pub method: String,
    /// Request URL including any query string.
    pub url: String,
    /// Raw request body.
    pub body: String,
}

/// A running grocery-service fixture.
pub struct ServiceFixture {
    /// Origin the fixture listens on, without a trailing slash.
    pub base_url: String,
    /// Requests seen so far.
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ServiceFixture {
    /// Starts the fixture on an ephemeral port.
    ///
    /// The serving thread runs for the life of the test process.
    pub fn start() -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", server.server_addr());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                seen.lock().unwrap().push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body,
                });
                let (status, payload) = route(request.method().as_str(), request.url());
                let header =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });
        Self { base_url, requests }
    }

    /// Returns a snapshot of the recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Routes a request to its canned grocery-service answer.
///
/// The descriptor omits `baseUrl` so discovery falls back to the probed
/// origin.
fn route(method: &str, url: &str) -> (u16, String) {
    let path = url.split('?').next().unwrap_or(url);
    match (method, path) {
        ("GET", "/.well-known/socket-agent") => (
            200,
            json!({
                "name": "Grocery API",
                "description": "Order groceries online",
                "endpoints": [
                    {
                        "operationId": "search_products",
                        "path": "/products",
                        "method": "GET",
                        "summary": "Search the catalog"
                    },
                    {
                        "operationId": "create_order",
                        "path": "/orders",
                        "method": "POST"
                    },
                    {
                        "operationId": "get_product",
                        "path": "/products/{id}",
                        "method": "GET"
                    }
                ]
            })
            .to_string(),
        ),
        ("GET", "/products") => (
            200,
            json!({"products": [{"id": "p1", "name": "Milk"}]}).to_string(),
        ),
        ("POST", "/orders") => (201, json!({"orderId": "o-1"}).to_string()),
        ("GET", p) if p.starts_with("/products/") => {
            let id = p.trim_start_matches("/products/");
            (200, json!({"id": id, "stock": 4}).to_string())
        }
        _ => (404, json!({"error": "not found"}).to_string()),
    }
}
