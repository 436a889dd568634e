// crates/socket-browser-nav/src/machine.rs
// ============================================================================
// Module: Navigation State Machine
// Description: Hybrid-mode navigation flow, history replay, and staleness.
// Purpose: Own the single navigation state and drive all collaborators.
// Dependencies: crate::{binder, telemetry}, socket-browser-core, serde_json
// ============================================================================

//! ## Overview
//! [`NavigationMachine`] exclusively owns [`NavigationState`] and sequences
//! every transition: mode detection, interface generation, conventional page
//! loads, history replay, and surface-event handling. Overlapping
//! navigations are disciplined with monotonic [`NavToken`]s rather than
//! request cancellation: starting a navigation issues a new live token, and
//! a resolution whose captured token is no longer live discards itself
//! without touching state. Failures always resolve to the ERROR screen and
//! never unwind into the host.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use serde_json::json;
use socket_browser_core::ActionOutcome;
use socket_browser_core::Clock;
use socket_browser_core::CredentialGate;
use socket_browser_core::Descriptor;
use socket_browser_core::EndpointInvoker;
use socket_browser_core::GeneratedSurface;
use socket_browser_core::ModeDecision;
use socket_browser_core::ModeProbe;
use socket_browser_core::NavToken;
use socket_browser_core::NavigationEntry;
use socket_browser_core::NavigationError;
use socket_browser_core::NavigationMode;
use socket_browser_core::NavigationState;
use socket_browser_core::ParamMap;
use socket_browser_core::ScreenState;
use socket_browser_core::SurfaceGenerator;
use socket_browser_core::SystemClock;
use socket_browser_core::Viewport;

use crate::binder::EventCommand;
use crate::binder::SurfaceEvent;
use crate::binder::route_event;
use crate::telemetry::HistoryDirection;
use crate::telemetry::InteractionKind;
use crate::telemetry::MetricMode;
use crate::telemetry::MetricOutcome;
use crate::telemetry::NavigationMetrics;
use crate::telemetry::NoopNavigationMetrics;

// ============================================================================
// SECTION: Collaborators
// ============================================================================

/// External collaborators driven by the machine.
///
/// Every effectful dependency enters through this bundle so hosts and tests
/// can substitute any seam independently.
pub struct Collaborators {
    /// Mode probe deciding between socket-agent and conventional.
    pub probe: Box<dyn ModeProbe>,
    /// Endpoint invoker for link, form, and action interactions.
    pub invoker: Box<dyn EndpointInvoker>,
    /// Generation backend producing interface markup.
    pub generator: Box<dyn SurfaceGenerator>,
    /// Viewport rendering conventional pages.
    pub viewport: Box<dyn Viewport>,
    /// Credential gate consulted before every generation call.
    pub gate: Box<dyn CredentialGate>,
    /// Host surface holding installed generated markup.
    pub surface: Box<dyn GeneratedSurface>,
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of one resolved navigation request.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// The navigation committed in the given mode.
    Committed(NavigationMode),
    /// The navigation failed and the ERROR screen was committed.
    Failed(NavigationError),
    /// A newer navigation superseded this one; state is untouched.
    Stale,
    /// The request had nothing to do, such as replay at a history boundary.
    NoOp,
}

/// Result of handling one surface event.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The event had no effect in the current state.
    Ignored,
    /// The event triggered a full navigation with this outcome.
    Navigated(NavOutcome),
    /// The event invoked an endpoint and regenerated the surface.
    Regenerated(NavOutcome),
    /// The event invoked an endpoint and rendered the outcome inline.
    InlineRendered,
}

// ============================================================================
// SECTION: Machine
// ============================================================================

/// Exclusive owner and driver of the navigation state.
pub struct NavigationMachine {
    /// The single process-wide navigation state.
    state: NavigationState,
    /// Effectful collaborator bundle.
    collaborators: Collaborators,
    /// Timestamp source for history entries.
    clock: Box<dyn Clock>,
    /// Metrics sink for navigation and interaction events.
    metrics: Box<dyn NavigationMetrics>,
    /// Monotonic counter backing token issuance.
    token_counter: u64,
    /// Whether the installed surface is currently routing events.
    bound: bool,
}

impl NavigationMachine {
    /// Creates a machine over the given collaborators with the system clock
    /// and a discarding metrics sink.
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            state: NavigationState::new(),
            collaborators,
            clock: Box::new(SystemClock),
            metrics: Box::new(NoopNavigationMetrics),
            token_counter: 0,
            bound: false,
        }
    }

    /// Replaces the history timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Box<dyn NavigationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns a read-only view of the navigation state.
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Returns whether the installed surface is currently routing events.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    // ------------------------------------------------------------------
    // Navigation lifecycle
    // ------------------------------------------------------------------

    /// Starts a navigation: issues the next live token, shows the LOADING
    /// screen, and unbinds the current surface.
    ///
    /// The caller resolves the navigation with [`Self::resolve_navigation`];
    /// issuing a newer token before then makes this one stale.
    pub fn begin(&mut self) -> NavToken {
        self.token_counter += 1;
        let token = NavToken::new(self.token_counter);
        self.state.screen = ScreenState::Loading;
        self.state.last_error = None;
        self.state.in_flight = Some(token);
        self.bound = false;
        token
    }

    /// Resolves a started navigation to `url` under the captured `token`.
    ///
    /// Staleness is re-checked after every suspension point; a superseded
    /// resolution returns [`NavOutcome::Stale`] without touching state.
    pub async fn resolve_navigation(&mut self, token: NavToken, url: &str) -> NavOutcome {
        let started = Instant::now();
        let decision = self.collaborators.probe.detect(url).await;
        if !self.is_live(token) {
            return self.record_stale(&decision, started);
        }
        match decision {
            ModeDecision::SocketAgent(descriptor) => {
                let outcome = self.resolve_socket_agent(token, url, descriptor).await;
                self.record_resolution(MetricMode::SocketAgent, &outcome, started);
                outcome
            }
            ModeDecision::Conventional => {
                let outcome = self.resolve_conventional(token, url).await;
                self.record_resolution(MetricMode::Conventional, &outcome, started);
                outcome
            }
        }
    }

    /// Runs a full navigation to `url`, beginning and resolving in one call.
    pub async fn navigate(&mut self, url: &str) -> NavOutcome {
        let token = self.begin();
        self.resolve_navigation(token, url).await
    }

    /// Resolves the socket-agent branch: gate, generate, install, commit.
    async fn resolve_socket_agent(
        &mut self,
        token: NavToken,
        url: &str,
        descriptor: Descriptor,
    ) -> NavOutcome {
        if !self.collaborators.gate.is_authorized() {
            return self.fail(token, NavigationError::AuthorizationRequired);
        }
        let markup = match self.collaborators.generator.generate(&descriptor).await {
            Ok(markup) => markup,
            Err(error) => return self.fail(token, NavigationError::Generation(error)),
        };
        if !self.is_live(token) {
            return NavOutcome::Stale;
        }
        self.commit_socket_agent(url, descriptor, markup)
    }

    /// Resolves the conventional branch: load the viewport and commit.
    async fn resolve_conventional(&mut self, token: NavToken, url: &str) -> NavOutcome {
        match self.collaborators.viewport.load(url).await {
            Ok(()) => {}
            Err(error) => return self.fail(token, NavigationError::Viewport(error)),
        }
        if !self.is_live(token) {
            return NavOutcome::Stale;
        }
        self.collaborators.viewport.show();
        self.state.mode = NavigationMode::Conventional;
        self.state.screen = ScreenState::Active;
        self.state.current_url = Some(url.to_owned());
        self.state.current_descriptor = None;
        self.state.last_error = None;
        self.state.in_flight = None;
        self.state.history.push(NavigationEntry {
            url: url.to_owned(),
            mode: NavigationMode::Conventional,
            descriptor: None,
            snapshot: None,
            created_at: self.clock.now(),
        });
        NavOutcome::Committed(NavigationMode::Conventional)
    }

    /// Installs generated markup and commits the socket-agent navigation.
    fn commit_socket_agent(
        &mut self,
        url: &str,
        descriptor: Descriptor,
        markup: String,
    ) -> NavOutcome {
        self.collaborators.surface.install(&markup);
        self.collaborators.viewport.hide();
        self.bound = true;
        self.state.mode = NavigationMode::SocketAgent;
        self.state.screen = ScreenState::Active;
        self.state.current_url = Some(url.to_owned());
        self.state.current_descriptor = Some(descriptor.clone());
        self.state.last_error = None;
        self.state.in_flight = None;
        self.state.history.push(NavigationEntry {
            url: url.to_owned(),
            mode: NavigationMode::SocketAgent,
            descriptor: Some(descriptor),
            snapshot: Some(markup),
            created_at: self.clock.now(),
        });
        NavOutcome::Committed(NavigationMode::SocketAgent)
    }

    /// Commits the ERROR screen for a live token, or discards a stale one.
    ///
    /// History and the current URL stay untouched; the failed navigation
    /// never becomes an entry.
    fn fail(&mut self, token: NavToken, error: NavigationError) -> NavOutcome {
        if !self.is_live(token) {
            return NavOutcome::Stale;
        }
        self.state.screen = ScreenState::Error;
        self.state.last_error = Some(error.clone());
        self.state.in_flight = None;
        NavOutcome::Failed(error)
    }

    /// Returns whether `token` is still the live navigation token.
    fn is_live(&self, token: NavToken) -> bool {
        self.state.in_flight == Some(token)
    }

    // ------------------------------------------------------------------
    // Regeneration
    // ------------------------------------------------------------------

    /// Regenerates the surface from `descriptor` carrying `context`, usually
    /// an invocation response the interface should reflect.
    ///
    /// A successful regeneration appends a fresh history entry for the
    /// current URL, so going back returns to the pre-interaction surface.
    pub async fn regenerate(
        &mut self,
        descriptor: Descriptor,
        context: serde_json::Value,
    ) -> NavOutcome {
        let url = self
            .state
            .current_url
            .clone()
            .unwrap_or_else(|| descriptor.base_url().to_owned());
        let token = self.begin();
        let started = Instant::now();
        let outcome = self
            .resolve_socket_agent(token, &url, descriptor.with_context(context))
            .await;
        self.record_resolution(MetricMode::SocketAgent, &outcome, started);
        outcome
    }

    // ------------------------------------------------------------------
    // History replay
    // ------------------------------------------------------------------

    /// Replays one history entry back, when any.
    pub async fn go_back(&mut self) -> NavOutcome {
        let Some(entry) = self.state.history.go_back().cloned() else {
            return NavOutcome::NoOp;
        };
        self.metrics.record_history_move(HistoryDirection::Back);
        self.replay(entry).await
    }

    /// Replays one history entry forward, when any.
    pub async fn go_forward(&mut self) -> NavOutcome {
        let Some(entry) = self.state.history.go_forward().cloned() else {
            return NavOutcome::NoOp;
        };
        self.metrics.record_history_move(HistoryDirection::Forward);
        self.replay(entry).await
    }

    /// Replays the first visited entry, when any.
    pub async fn go_home(&mut self) -> NavOutcome {
        let Some(entry) = self.state.history.go_home().cloned() else {
            return NavOutcome::NoOp;
        };
        self.metrics.record_history_move(HistoryDirection::Home);
        self.replay(entry).await
    }

    /// Applies a history entry without re-running discovery or generation.
    ///
    /// Replay supersedes any pending navigation: the live token is cleared
    /// so an in-flight resolution lands stale. Socket-agent entries restore
    /// their markup snapshot; conventional entries re-point the viewport at
    /// the entry URL, and a failed load commits the ERROR screen while the
    /// history position stays where the replay moved it.
    async fn replay(&mut self, entry: NavigationEntry) -> NavOutcome {
        self.state.in_flight = None;
        match entry.mode {
            NavigationMode::SocketAgent => {
                let markup = entry.snapshot.as_deref().unwrap_or_default();
                self.collaborators.surface.install(markup);
                self.collaborators.viewport.hide();
                self.bound = true;
                self.state.mode = NavigationMode::SocketAgent;
                self.state.screen = ScreenState::Active;
                self.state.current_url = Some(entry.url);
                self.state.current_descriptor = entry.descriptor;
                self.state.last_error = None;
                NavOutcome::Committed(NavigationMode::SocketAgent)
            }
            NavigationMode::Conventional | NavigationMode::Idle => {
                self.bound = false;
                match self.collaborators.viewport.load(&entry.url).await {
                    Ok(()) => {
                        self.collaborators.viewport.show();
                        self.state.mode = NavigationMode::Conventional;
                        self.state.screen = ScreenState::Active;
                        self.state.current_url = Some(entry.url);
                        self.state.current_descriptor = None;
                        self.state.last_error = None;
                        NavOutcome::Committed(NavigationMode::Conventional)
                    }
                    Err(error) => {
                        let error = NavigationError::Viewport(error);
                        self.state.screen = ScreenState::Error;
                        self.state.last_error = Some(error.clone());
                        NavOutcome::Failed(error)
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Surface events
    // ------------------------------------------------------------------

    /// Handles one surface event, executing the command it routes to.
    ///
    /// External links run a full navigation. Relative links and form
    /// submissions invoke the referenced endpoint and regenerate the whole
    /// surface from the response; an invocation failure there commits the
    /// ERROR screen without touching history. Declared actions invoke and
    /// render their outcome inline next to the control, leaving the screen
    /// state alone on success and failure alike.
    pub async fn handle_event(&mut self, event: &SurfaceEvent) -> EventOutcome {
        match route_event(event, &self.state, self.bound) {
            EventCommand::Ignore => EventOutcome::Ignored,
            EventCommand::Navigate { url } => {
                let outcome = self.navigate(&url).await;
                self.metrics.record_interaction(
                    InteractionKind::Link,
                    matches!(outcome, NavOutcome::Committed(_)),
                );
                EventOutcome::Navigated(outcome)
            }
            EventCommand::InvokeAndRegenerate {
                endpoint_ref,
                params,
            } => {
                let kind = match event {
                    SurfaceEvent::FormSubmitted { .. } => InteractionKind::Form,
                    SurfaceEvent::LinkActivated { .. } | SurfaceEvent::ActionInvoked { .. } => {
                        InteractionKind::Link
                    }
                };
                let outcome = self.invoke_and_regenerate(&endpoint_ref, &params).await;
                self.metrics
                    .record_interaction(kind, matches!(outcome, NavOutcome::Committed(_)));
                EventOutcome::Regenerated(outcome)
            }
            EventCommand::InvokeInline {
                control_id,
                endpoint_ref,
                params,
            } => {
                let ok = self.invoke_inline(&control_id, &endpoint_ref, &params).await;
                self.metrics.record_interaction(InteractionKind::Action, ok);
                EventOutcome::InlineRendered
            }
        }
    }

    /// Invokes an endpoint and regenerates the surface from its response.
    ///
    /// The regeneration context carries both the endpoint reference just
    /// invoked and the response payload, so the generator knows which
    /// interaction produced the new surface.
    async fn invoke_and_regenerate(&mut self, endpoint_ref: &str, params: &ParamMap) -> NavOutcome {
        let Some(descriptor) = self.state.current_descriptor.clone() else {
            return NavOutcome::NoOp;
        };
        let response = self
            .collaborators
            .invoker
            .invoke(descriptor.base_url(), endpoint_ref, params, Some(&descriptor))
            .await;
        match response {
            Ok(value) => {
                let context = json!({
                    "endpoint": endpoint_ref,
                    "response": value,
                });
                self.regenerate(descriptor, context).await
            }
            Err(error) => {
                let token = self.begin();
                self.fail(token, NavigationError::Invocation(error))
            }
        }
    }

    /// Invokes an endpoint and renders its outcome inline at `control_id`.
    ///
    /// Returns whether the invocation succeeded. The screen state never
    /// changes: failures surface next to the control, not as a full page.
    async fn invoke_inline(
        &mut self,
        control_id: &str,
        endpoint_ref: &str,
        params: &ParamMap,
    ) -> bool {
        let Some(descriptor) = self.state.current_descriptor.clone() else {
            return false;
        };
        let response = self
            .collaborators
            .invoker
            .invoke(descriptor.base_url(), endpoint_ref, params, Some(&descriptor))
            .await;
        match response {
            Ok(value) => {
                self.collaborators
                    .surface
                    .render_inline(control_id, &ActionOutcome::Success(value));
                true
            }
            Err(error) => {
                self.collaborators
                    .surface
                    .render_inline(control_id, &ActionOutcome::Failure(error.to_string()));
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Telemetry helpers
    // ------------------------------------------------------------------

    /// Records a resolution outcome against the detected branch.
    fn record_resolution(&self, mode: MetricMode, outcome: &NavOutcome, started: Instant) {
        let metric = match outcome {
            NavOutcome::Committed(_) => MetricOutcome::Committed,
            NavOutcome::Failed(_) => MetricOutcome::Failed,
            NavOutcome::Stale | NavOutcome::NoOp => MetricOutcome::Stale,
        };
        self.metrics
            .record_navigation(mode, metric, started.elapsed());
    }

    /// Records a pre-branch stale resolution and returns the outcome.
    fn record_stale(&self, decision: &ModeDecision, started: Instant) -> NavOutcome {
        let mode = match decision {
            ModeDecision::SocketAgent(_) => MetricMode::SocketAgent,
            ModeDecision::Conventional => MetricMode::Conventional,
        };
        self.metrics
            .record_navigation(mode, MetricOutcome::Stale, started.elapsed());
        NavOutcome::Stale
    }
}
