// crates/socket-browser-nav/tests/common/mod.rs
// ============================================================================
// Module: Navigation Test Helpers
// Description: Scriptable collaborator stubs and machine fixtures.
// Purpose: Drive the state machine deterministically without a network.
// ============================================================================

//! ## Overview
//! Provides scriptable implementations of every collaborator seam plus a
//! fixture builder that wires them into a [`NavigationMachine`]. Stubs log
//! their calls through shared handles so tests can assert on installed
//! markup, viewport activity, and invocation wiring after driving the
//! machine.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    dead_code,
    reason = "Test-only helpers; not every test file uses every helper."
)]

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use socket_browser_core::ActionOutcome;
use socket_browser_core::Clock;
use socket_browser_core::CredentialGate;
use socket_browser_core::Descriptor;
use socket_browser_core::Endpoint;
use socket_browser_core::EndpointInvoker;
use socket_browser_core::GeneratedSurface;
use socket_browser_core::GenerationError;
use socket_browser_core::InvocationError;
use socket_browser_core::ModeDecision;
use socket_browser_core::ModeProbe;
use socket_browser_core::ParamMap;
use socket_browser_core::SurfaceGenerator;
use socket_browser_core::Timestamp;
use socket_browser_core::Viewport;
use socket_browser_core::ViewportError;
use socket_browser_nav::Collaborators;
use socket_browser_nav::NavigationMachine;

// ============================================================================
// SECTION: Descriptor Fixtures
// ============================================================================

/// Returns a validated grocery-service descriptor with a normalized base URL.
pub fn grocery_descriptor() -> Descriptor {
    let mut descriptor = Descriptor {
        name: "Grocery API".to_string(),
        description: Some("Order groceries".to_string()),
        base_url: Some("https://grocery.example".to_string()),
        endpoints: vec![
            Endpoint {
                operation_id: Some("search_products".to_string()),
                path: "/products".to_string(),
                method: Some("GET".to_string()),
                summary: Some("Search the catalog".to_string()),
                description: None,
            },
            Endpoint {
                operation_id: Some("create_order".to_string()),
                path: "/orders".to_string(),
                method: Some("POST".to_string()),
                summary: None,
                description: None,
            },
        ],
        context: None,
    };
    descriptor.normalize_base_url("https://grocery.example");
    descriptor
}

// ============================================================================
// SECTION: Probe Stub
// ============================================================================

/// Mode probe answering from a URL-keyed script; unknown URLs vote
/// conventional.
pub struct ScriptedProbe {
    /// Scripted decision per exact URL.
    decisions: HashMap<String, ModeDecision>,
}

#[async_trait]
impl ModeProbe for ScriptedProbe {
    async fn detect(&self, url: &str) -> ModeDecision {
        self.decisions
            .get(url)
            .cloned()
            .unwrap_or(ModeDecision::Conventional)
    }
}

// ============================================================================
// SECTION: Invoker Stub
// ============================================================================

/// One invocation the stub invoker saw.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInvoke {
    /// Base URL the machine passed through.
    pub base_url: String,
    /// Endpoint reference to resolve.
    pub endpoint_ref: String,
    /// Parameter bag as collected from the surface.
    pub params: ParamMap,
}

/// Invoker answering a fixed response queue while recording every call.
pub struct StubInvoker {
    /// Queued responses, popped per call; exhausted queues answer null.
    responses: Mutex<VecDeque<Result<serde_json::Value, InvocationError>>>,
    /// Shared call log.
    calls: Arc<Mutex<Vec<RecordedInvoke>>>,
}

#[async_trait]
impl EndpointInvoker for StubInvoker {
    async fn invoke(
        &self,
        base_url: &str,
        endpoint_ref: &str,
        params: &ParamMap,
        _descriptor: Option<&Descriptor>,
    ) -> Result<serde_json::Value, InvocationError> {
        self.calls.lock().unwrap().push(RecordedInvoke {
            base_url: base_url.to_string(),
            endpoint_ref: endpoint_ref.to_string(),
            params: params.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}

// ============================================================================
// SECTION: Generator Stub
// ============================================================================

/// Generator answering a fixed result queue; exhausted queues synthesize
/// markup naming the descriptor and its regeneration context.
pub struct StubGenerator {
    /// Queued results, popped per call.
    results: Mutex<VecDeque<Result<String, GenerationError>>>,
}

#[async_trait]
impl SurfaceGenerator for StubGenerator {
    async fn generate(&self, descriptor: &Descriptor) -> Result<String, GenerationError> {
        if let Some(result) = self.results.lock().unwrap().pop_front() {
            return result;
        }
        let context = descriptor
            .context
            .as_ref()
            .map_or_else(String::new, ToString::to_string);
        Ok(format!("<surface name='{}' context='{context}'>", descriptor.name))
    }
}

// ============================================================================
// SECTION: Viewport Stub
// ============================================================================

/// Viewport recording load/show/hide calls and failing scripted URLs.
pub struct RecordingViewport {
    /// Shared call log, one string per call.
    log: Arc<Mutex<Vec<String>>>,
    /// Shared set of URLs whose loads fail; tests may mutate it mid-run.
    failing: Arc<Mutex<HashSet<String>>>,
}

#[async_trait]
impl Viewport for RecordingViewport {
    async fn load(&self, url: &str) -> Result<(), ViewportError> {
        self.log.lock().unwrap().push(format!("load {url}"));
        if self.failing.lock().unwrap().contains(url) {
            return Err(ViewportError(format!("load failed for {url}")));
        }
        Ok(())
    }

    fn show(&self) {
        self.log.lock().unwrap().push("show".to_string());
    }

    fn hide(&self) {
        self.log.lock().unwrap().push("hide".to_string());
    }
}

// ============================================================================
// SECTION: Gate and Surface Stubs
// ============================================================================

/// Credential gate with a fixed answer.
pub struct StaticGate(pub bool);

impl CredentialGate for StaticGate {
    fn is_authorized(&self) -> bool {
        self.0
    }
}

/// One call the recording surface saw.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// Full markup installation.
    Install(String),
    /// Inline outcome rendered at a control.
    Inline(String, ActionOutcome),
}

/// Surface recording installs and inline renders.
pub struct RecordingSurface {
    /// Shared call log.
    log: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl GeneratedSurface for RecordingSurface {
    fn install(&mut self, markup: &str) {
        self.log
            .lock()
            .unwrap()
            .push(SurfaceCall::Install(markup.to_string()));
    }

    fn render_inline(&mut self, control_id: &str, outcome: &ActionOutcome) {
        self.log
            .lock()
            .unwrap()
            .push(SurfaceCall::Inline(control_id.to_string(), outcome.clone()));
    }
}

// ============================================================================
// SECTION: Manual Clock
// ============================================================================

/// Deterministic clock handing out increasing logical timestamps.
pub struct ManualClock {
    /// Next logical value.
    next: AtomicU64,
}

impl ManualClock {
    /// Creates a clock starting at logical time 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::Logical(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// A wired machine plus the shared logs of its stub collaborators.
pub struct Fixture {
    /// Machine under test.
    pub machine: NavigationMachine,
    /// Surface call log.
    pub surface_log: Arc<Mutex<Vec<SurfaceCall>>>,
    /// Viewport call log.
    pub viewport_log: Arc<Mutex<Vec<String>>>,
    /// Invoker call log.
    pub invoker_calls: Arc<Mutex<Vec<RecordedInvoke>>>,
    /// Shared failing-load set of the viewport stub.
    failing_loads: Arc<Mutex<HashSet<String>>>,
}

impl Fixture {
    /// Starts a fixture builder with all-default stubs.
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::new()
    }

    /// Returns a snapshot of the surface log.
    pub fn surface_calls(&self) -> Vec<SurfaceCall> {
        self.surface_log.lock().unwrap().clone()
    }

    /// Returns a snapshot of the viewport log.
    pub fn viewport_calls(&self) -> Vec<String> {
        self.viewport_log.lock().unwrap().clone()
    }

    /// Returns a snapshot of the invoker log.
    pub fn invocations(&self) -> Vec<RecordedInvoke> {
        self.invoker_calls.lock().unwrap().clone()
    }

    /// Makes future viewport loads of `url` fail.
    pub fn fail_future_load(&self, url: &str) {
        self.failing_loads.lock().unwrap().insert(url.to_string());
    }
}

/// Builder scripting the stub collaborators before wiring a machine.
pub struct FixtureBuilder {
    /// Probe script.
    decisions: HashMap<String, ModeDecision>,
    /// Invoker response queue.
    invoker_responses: VecDeque<Result<serde_json::Value, InvocationError>>,
    /// Generator result queue.
    generator_results: VecDeque<Result<String, GenerationError>>,
    /// Viewport URLs whose loads fail.
    failing_loads: HashSet<String>,
    /// Gate answer.
    authorized: bool,
}

impl FixtureBuilder {
    /// Creates a builder with an authorized gate and empty scripts.
    pub fn new() -> Self {
        Self {
            decisions: HashMap::new(),
            invoker_responses: VecDeque::new(),
            generator_results: VecDeque::new(),
            failing_loads: HashSet::new(),
            authorized: true,
        }
    }

    /// Scripts the probe to vote socket-agent for `url` with `descriptor`.
    #[must_use]
    pub fn socket_agent(mut self, url: &str, descriptor: Descriptor) -> Self {
        self.decisions
            .insert(url.to_string(), ModeDecision::SocketAgent(descriptor));
        self
    }

    /// Queues an invoker response.
    #[must_use]
    pub fn invoker_response(
        mut self,
        response: Result<serde_json::Value, InvocationError>,
    ) -> Self {
        self.invoker_responses.push_back(response);
        self
    }

    /// Queues a generator result.
    #[must_use]
    pub fn generator_result(mut self, result: Result<String, GenerationError>) -> Self {
        self.generator_results.push_back(result);
        self
    }

    /// Scripts the viewport to fail loading `url`.
    #[must_use]
    pub fn fail_load(mut self, url: &str) -> Self {
        self.failing_loads.insert(url.to_string());
        self
    }

    /// Scripts the credential gate to deny.
    #[must_use]
    pub fn deny_auth(mut self) -> Self {
        self.authorized = false;
        self
    }

    /// Wires the scripted stubs into a machine with a logical clock.
    pub fn build(self) -> Fixture {
        let surface_log = Arc::new(Mutex::new(Vec::new()));
        let viewport_log = Arc::new(Mutex::new(Vec::new()));
        let invoker_calls = Arc::new(Mutex::new(Vec::new()));
        let failing_loads = Arc::new(Mutex::new(self.failing_loads));
        let collaborators = Collaborators {
            probe: Box::new(ScriptedProbe {
                decisions: self.decisions,
            }),
            invoker: Box::new(StubInvoker {
                responses: Mutex::new(self.invoker_responses),
                calls: Arc::clone(&invoker_calls),
            }),
            generator: Box::new(StubGenerator {
                results: Mutex::new(self.generator_results),
            }),
            viewport: Box::new(RecordingViewport {
                log: Arc::clone(&viewport_log),
                failing: Arc::clone(&failing_loads),
            }),
            gate: Box::new(StaticGate(self.authorized)),
            surface: Box::new(RecordingSurface {
                log: Arc::clone(&surface_log),
            }),
        };
        let machine = NavigationMachine::new(collaborators).with_clock(Box::new(ManualClock::new()));
        Fixture {
            machine,
            surface_log,
            viewport_log,
            invoker_calls,
            failing_loads,
        }
    }
}
