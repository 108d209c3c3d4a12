//! # Host & Collaboration Contracts
//!
//! Capability seams between the composition layer and its environment.
//!
//! The host environment is injected rather than looked up globally: whether
//! this instance is a secondary embedded frame, and what the viewport width
//! is, are facts only the host can answer. Headless hosts answer "no" and
//! "none", which disables bootstrap suppression and viewport tracking.

/// Capabilities supplied by the hosting environment.
pub trait HostEnv {
    /// True when this instance runs as a secondary embedded frame whose
    /// parent already owns bootstrap responsibility for the shared
    /// document. Outside a browser-like host this is always false.
    fn is_secondary_embedded_instance(&self) -> bool {
        false
    }

    /// Current viewport width in logical pixels; `None` when the host has
    /// no layout capability.
    fn viewport_width(&self) -> Option<u32>;
}

/// Host with no layout or frame capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl HostEnv for HeadlessHost {
    fn viewport_width(&self) -> Option<u32> {
        None
    }
}

/// Handle to one participant's connection in a collaborative session.
///
/// Connection establishment is fully asynchronous and owned by the
/// provider; the session mounts the provider and continues immediately.
/// Retry policy also lives behind this seam.
pub trait ProviderHandle {
    fn session_id(&self) -> &str;

    /// Called once at mount. `should_bootstrap` is true when this
    /// participant is responsible for seeding the shared document.
    fn connect(&mut self, should_bootstrap: bool);

    /// Forward a locally produced update to the other participants.
    fn broadcast(&mut self, update: &[u8]);

    /// Called once at session teardown.
    fn disconnect(&mut self);
}

/// Creates provider handles bound to a session identifier.
pub trait ProviderFactory {
    fn create(&self, session_id: &str) -> Box<dyn ProviderHandle>;
}
