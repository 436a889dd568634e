// system-tests/tests/helpers/collaborators.rs
// ============================================================================
// Module: Collaborator Stubs
// Description: Host-side stand-ins wired around the real protocol clients.
// Purpose: Build a navigation machine whose network edges are genuine.
// Dependencies: socket-browser-{core,client,nav}, async-trait
// ============================================================================

//! ## Overview
//! End-to-end suites exercise the real discovery, detection, and invocation
//! clients over the wire while the host-side collaborators stay local: a
//! deterministic generator that embeds the descriptor and context into its
//! markup, a permissive viewport, an open credential gate, and a surface
//! that records what was installed.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use socket_browser_client::InvocationRouter;
use socket_browser_client::ModeDetector;
use socket_browser_client::NetworkPolicy;
use socket_browser_core::ActionOutcome;
use socket_browser_core::CredentialGate;
use socket_browser_core::Descriptor;
use socket_browser_core::GeneratedSurface;
use socket_browser_core::GenerationError;
use socket_browser_core::SurfaceGenerator;
use socket_browser_core::Viewport;
use socket_browser_core::ViewportError;
use socket_browser_nav::Collaborators;
use socket_browser_nav::NavigationMachine;

use system_tests::SUITE_DISCOVERY_TIMEOUT_MS;
use system_tests::SUITE_INVOKE_TIMEOUT_MS;

/// Generator embedding the service name and regeneration context.
pub struct TemplateGenerator;

#[async_trait]
impl SurfaceGenerator for TemplateGenerator {
    async fn generate(&self, descriptor: &Descriptor) -> Result<String, GenerationError> {
        let context = descriptor
            .context
            .as_ref()
            .map_or_else(String::new, ToString::to_string);
        Ok(format!(
            "<surface name='{}' endpoints='{}' context='{context}'>",
            descriptor.name,
            descriptor.endpoints.len()
        ))
    }
}

/// Viewport that accepts every load without rendering anything.
pub struct PassiveViewport;

#[async_trait]
impl Viewport for PassiveViewport {
    async fn load(&self, _url: &str) -> Result<(), ViewportError> {
        Ok(())
    }

    fn show(&self) {}

    fn hide(&self) {}
}

/// Credential gate that always authorizes.
pub struct OpenGate;

impl CredentialGate for OpenGate {
    fn is_authorized(&self) -> bool {
        true
    }
}

/// Surface recording every installed markup string.
pub struct RecordingSurface {
    /// Shared install log.
    installs: Arc<Mutex<Vec<String>>>,
}

impl GeneratedSurface for RecordingSurface {
    fn install(&mut self, markup: &str) {
        self.installs.lock().unwrap().push(markup.to_string());
    }

    fn render_inline(&mut self, _control_id: &str, _outcome: &ActionOutcome) {}
}

/// Network policy tightened to suite timeouts.
pub fn suite_policy() -> NetworkPolicy {
    NetworkPolicy {
        discovery_timeout_ms: SUITE_DISCOVERY_TIMEOUT_MS,
        invoke_timeout_ms: SUITE_INVOKE_TIMEOUT_MS,
        ..NetworkPolicy::default()
    }
}

/// Builds a machine over the real protocol clients and returns it with the
/// shared install log of its surface.
pub fn browser() -> (NavigationMachine, Arc<Mutex<Vec<String>>>) {
    let policy = suite_policy();
    let installs = Arc::new(Mutex::new(Vec::new()));
    let collaborators = Collaborators {
        probe: Box::new(ModeDetector::from_policy(policy.clone()).unwrap()),
        invoker: Box::new(InvocationRouter::new(policy).unwrap()),
        generator: Box::new(TemplateGenerator),
        viewport: Box::new(PassiveViewport),
        gate: Box::new(OpenGate),
        surface: Box::new(RecordingSurface {
            installs: Arc::clone(&installs),
        }),
    };
    (NavigationMachine::new(collaborators), installs)
}
