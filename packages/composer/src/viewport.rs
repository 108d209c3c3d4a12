//! # Viewport Responsiveness Tracker
//!
//! Classifies the viewport as narrow or wide against a fixed breakpoint and
//! re-evaluates on layout-resize signals.
//!
//! The classification only affects presentation composition (e.g. which
//! toolbar arrangement is used), never document state. Subscription is
//! scoped: the listener registered at mount is released when the tracker is
//! dropped, on every exit path, so it cannot outlive the component that
//! registered it.

use crate::collab::HostEnv;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Widths at or below this many logical pixels classify as narrow.
pub const NARROW_VIEWPORT_MAX_PX: u32 = 1025;

type WidthListener = Box<dyn FnMut(u32) + Send>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    active: HashMap<u64, WidthListener>,
}

/// Layout-resize signal source.
///
/// Cloning shares the same subscriber set; the host pushes width samples
/// through [`ResizeSignal::emit`].
#[derive(Clone, Default)]
pub struct ResizeSignal {
    listeners: Arc<Mutex<Listeners>>,
}

impl ResizeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; dropping the returned subscription removes it.
    pub fn subscribe(&self, listener: WidthListener) -> ResizeSubscription {
        let mut guard = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = guard.next_id;
        guard.next_id += 1;
        guard.active.insert(id, listener);
        ResizeSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver a width sample to every live listener.
    pub fn emit(&self, width: u32) {
        let mut guard = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in guard.active.values_mut() {
            listener(width);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
            .len()
    }
}

/// Scoped listener registration.
pub struct ResizeSubscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .active
                .remove(&self.id);
        }
    }
}

#[derive(Default)]
struct TrackerState {
    is_narrow: bool,
    transitions: u64,
}

/// Tracks the narrow/wide classification for one component instance.
pub struct ViewportTracker {
    state: Arc<Mutex<TrackerState>>,
    _subscription: Option<ResizeSubscription>,
}

impl ViewportTracker {
    /// Evaluate the current width synchronously and subscribe for resize
    /// signals.
    ///
    /// Hosts without layout capability get a tracker that is never narrow
    /// and registers no listener at all.
    pub fn mount(env: &dyn HostEnv, signal: &ResizeSignal) -> Self {
        let state = Arc::new(Mutex::new(TrackerState::default()));

        let Some(width) = env.viewport_width() else {
            return Self {
                state,
                _subscription: None,
            };
        };

        state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_narrow = width <= NARROW_VIEWPORT_MAX_PX;

        let shared = state.clone();
        let subscription = signal.subscribe(Box::new(move |width| {
            let narrow = width <= NARROW_VIEWPORT_MAX_PX;
            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            // Only a side-crossing counts as a change; same-side samples
            // must not trigger re-renders.
            if narrow != state.is_narrow {
                state.is_narrow = narrow;
                state.transitions += 1;
            }
        }));

        Self {
            state,
            _subscription: Some(subscription),
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_narrow
    }

    /// Number of narrow/wide flips observed since mount.
    pub fn transition_count(&self) -> u64 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .transitions
    }

    pub fn is_subscribed(&self) -> bool {
        self._subscription.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::HeadlessHost;

    struct FixedWidthHost(u32);

    impl HostEnv for FixedWidthHost {
        fn viewport_width(&self) -> Option<u32> {
            Some(self.0)
        }
    }

    #[test]
    fn test_initial_classification_is_synchronous() {
        let signal = ResizeSignal::new();

        let wide = ViewportTracker::mount(&FixedWidthHost(1200), &signal);
        assert!(!wide.is_narrow());

        let narrow = ViewportTracker::mount(&FixedWidthHost(800), &signal);
        assert!(narrow.is_narrow());

        // Breakpoint is inclusive
        let edge = ViewportTracker::mount(&FixedWidthHost(1025), &signal);
        assert!(edge.is_narrow());
    }

    #[test]
    fn test_transition_only_on_breakpoint_crossing() {
        let signal = ResizeSignal::new();
        let tracker = ViewportTracker::mount(&FixedWidthHost(1200), &signal);

        for width in [1200, 1100, 1000, 900] {
            signal.emit(width);
        }

        // 1100 stays wide, 1000 crosses, 900 stays narrow
        assert_eq!(tracker.transition_count(), 1);
        assert!(tracker.is_narrow());

        signal.emit(1400);
        assert_eq!(tracker.transition_count(), 2);
        assert!(!tracker.is_narrow());
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let signal = ResizeSignal::new();
        let tracker = ViewportTracker::mount(&FixedWidthHost(1200), &signal);
        assert_eq!(signal.listener_count(), 1);

        drop(tracker);
        assert_eq!(signal.listener_count(), 0);

        // Emitting after teardown reaches nobody
        signal.emit(500);
    }

    #[test]
    fn test_headless_host_skips_registration() {
        let signal = ResizeSignal::new();
        let tracker = ViewportTracker::mount(&HeadlessHost, &signal);

        assert!(!tracker.is_narrow());
        assert!(!tracker.is_subscribed());
        assert_eq!(signal.listener_count(), 0);

        signal.emit(100);
        assert!(!tracker.is_narrow());
    }
}
