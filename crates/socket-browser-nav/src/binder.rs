// crates/socket-browser-nav/src/binder.rs
// ============================================================================
// Module: Surface Event Binder
// Description: Routing of generated-surface interactions to commands.
// Purpose: Translate DOM-level events into navigation or invocation intents.
// Dependencies: socket-browser-core
// ============================================================================

//! ## Overview
//! Generated surfaces emit three interaction shapes: link activations, form
//! submissions, and declared-action controls. This module classifies those
//! events against the current navigation state and produces a command the
//! machine executes. Routing is pure; all side effects live in the machine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use socket_browser_core::NavigationMode;
use socket_browser_core::NavigationState;
use socket_browser_core::ParamMap;
use socket_browser_core::ScreenState;

// ============================================================================
// SECTION: Event Types
// ============================================================================

/// Interaction raised by a generated surface.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// A hyperlink was activated.
    LinkActivated {
        /// Raw href attribute of the activated link.
        href: String,
    },
    /// A form was submitted.
    FormSubmitted {
        /// Endpoint reference from the form's action attribute.
        action: String,
        /// Collected field values keyed by field name.
        fields: ParamMap,
    },
    /// A declared-action control was invoked.
    ActionInvoked {
        /// Identifier of the originating control.
        control_id: String,
        /// Endpoint reference declared on the control.
        action: String,
        /// Collected field values keyed by field name.
        fields: ParamMap,
    },
}

/// Classification of a link href.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute URL pointing outside the current surface.
    External(String),
    /// In-page fragment reference; never navigates.
    Fragment,
    /// Path relative to the current service, normalized with a leading slash.
    Relative(String),
}

/// Command produced by routing a surface event.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq)]
pub enum EventCommand {
    /// Run a full navigation to the given URL.
    Navigate {
        /// Absolute URL to navigate to.
        url: String,
    },
    /// Invoke an endpoint and regenerate the whole surface from the result.
    InvokeAndRegenerate {
        /// Endpoint reference to resolve against the current descriptor.
        endpoint_ref: String,
        /// Parameters collected from the submitting form.
        params: ParamMap,
    },
    /// Invoke an endpoint and render the result inline at the control.
    InvokeInline {
        /// Identifier of the control that receives the inline result.
        control_id: String,
        /// Endpoint reference to resolve against the current descriptor.
        endpoint_ref: String,
        /// Parameters collected from the control's fields.
        params: ParamMap,
    },
    /// The event has no effect in the current state.
    Ignore,
}

// ============================================================================
// SECTION: Link Classification
// ============================================================================

/// Classifies a link href as external, fragment, or service-relative.
///
/// A href is external when it carries a URL scheme, a fragment when it starts
/// with `#`, and relative otherwise. Relative hrefs are normalized to carry a
/// leading slash so they can be resolved against the service base URL.
#[must_use]
pub fn classify_link(href: &str) -> LinkTarget {
    if href.starts_with('#') {
        return LinkTarget::Fragment;
    }
    if has_scheme(href) {
        return LinkTarget::External(href.to_owned());
    }
    if href.starts_with('/') {
        LinkTarget::Relative(href.to_owned())
    } else {
        LinkTarget::Relative(format!("/{href}"))
    }
}

/// Returns true when the href begins with a URL scheme such as `https:`.
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

// ============================================================================
// SECTION: Event Routing
// ============================================================================

/// Routes a surface event to the command the machine should execute.
///
/// Routing requires an active machine-generated surface: unless the screen is
/// [`ScreenState::Active`], the mode is [`NavigationMode::SocketAgent`], and
/// the surface is bound, every event resolves to [`EventCommand::Ignore`].
/// External links navigate; relative links and form submissions invoke and
/// regenerate; declared actions invoke inline.
#[must_use]
pub fn route_event(event: &SurfaceEvent, state: &NavigationState, bound: bool) -> EventCommand {
    if !bound
        || state.screen != ScreenState::Active
        || state.mode != NavigationMode::SocketAgent
    {
        return EventCommand::Ignore;
    }
    match event {
        SurfaceEvent::LinkActivated { href } => match classify_link(href) {
            LinkTarget::External(url) => EventCommand::Navigate { url },
            LinkTarget::Fragment => EventCommand::Ignore,
            LinkTarget::Relative(path) => EventCommand::InvokeAndRegenerate {
                endpoint_ref: path,
                params: ParamMap::new(),
            },
        },
        SurfaceEvent::FormSubmitted { action, fields } => EventCommand::InvokeAndRegenerate {
            endpoint_ref: action.clone(),
            params: fields.clone(),
        },
        SurfaceEvent::ActionInvoked {
            control_id,
            action,
            fields,
        } => EventCommand::InvokeInline {
            control_id: control_id.clone(),
            endpoint_ref: action.clone(),
            params: fields.clone(),
        },
    }
}
