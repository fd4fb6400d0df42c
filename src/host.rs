//! Host surface: element geometry and scroll notifications.
//!
//! A host (a browser binding, or the headless [`crate::page::HeadlessPage`])
//! exposes element geometry through [`ElementGeometry`] and delivers scroll
//! notifications through an [`EventBus`]. Listeners are held as
//! `Arc<dyn Fn + Send + Sync>` and released when their [`Subscription`]
//! guard is dropped.

use crate::{Rect, Viewport};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Read-only geometry queries a host answers
pub trait ElementGeometry {
    /// Bounding box of the element with `id`, relative to the viewport top.
    /// `None` when no such element exists.
    fn bounding_client_rect(&self, id: &str) -> Option<Rect>;

    /// Fraction of the document scrolled, 0.0 at top and 1.0 at bottom
    fn scroll_progress(&self) -> f64;
}

/// A host a view can mount on: geometry, scroll notifications and the
/// viewport size
pub trait Host: ElementGeometry {
    fn events(&self) -> &EventBus;

    fn viewport(&self) -> Viewport;
}

/// Fixed map of viewport-relative rects, handy for hosts that compute
/// geometry elsewhere.
impl ElementGeometry for HashMap<String, Rect> {
    fn bounding_client_rect(&self, id: &str) -> Option<Rect> {
        self.get(id).cloned()
    }

    fn scroll_progress(&self) -> f64 {
        0.0
    }
}

/// A scroll notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// Vertical scroll offset of the viewport in pixels
    pub scroll_y: f64,
    /// Viewport height in pixels
    pub viewport_height: f64,
    /// Raw document scroll fraction at the time of the event
    pub progress: f64,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
}

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ScrollListener = Arc<dyn Fn(&ScrollEvent, &dyn ElementGeometry) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, ScrollListener)>,
}

/// Scroll listener registry.
///
/// Cloning yields another handle to the same registry. Listeners run in
/// registration order, synchronously, on the dispatching thread.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a scroll listener. It stays registered until the returned
    /// guard is dropped or [`Subscription::unsubscribe`] is called.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ScrollEvent, &dyn ElementGeometry) + Send + Sync + 'static,
    {
        let mut reg = self.registry();
        reg.next_id += 1;
        let id = ListenerId(reg.next_id);
        reg.listeners.push((id, Arc::new(listener)));
        debug!("scroll listener {:?} registered ({} active)", id, reg.listeners.len());
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every registered listener.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while being called; such changes apply to the next event.
    pub fn dispatch(&self, event: &ScrollEvent, geometry: &dyn ElementGeometry) {
        let listeners: Vec<ScrollListener> = self
            .registry()
            .listeners
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(event, geometry);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry().listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for a registered scroll listener; removes it on drop
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener now
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    fn release(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut reg = registry.lock().unwrap_or_else(|e| e.into_inner());
        let before = reg.listeners.len();
        reg.listeners.retain(|(id, _)| *id != self.id);
        if reg.listeners.len() != before {
            debug!("scroll listener {:?} removed ({} active)", self.id, reg.listeners.len());
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
