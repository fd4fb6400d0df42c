//! Scroll-position tracker: which section is in focus.
//!
//! A section is in focus when the horizontal reference line, a fixed offset
//! below the viewport top, falls within its vertical extent (edges count).
//! Sections are scanned in declared order and the first match wins, so an
//! upper section takes slight overlaps. A section without an element is no
//! match; the scan moves on.

use crate::host::{ElementGeometry, ScrollEvent};
use crate::section::SectionList;
use crate::Rect;
use log::debug;
use std::collections::HashMap;

/// Default distance of the reference line from the viewport top, in pixels
pub const DEFAULT_REFERENCE_OFFSET: f64 = 100.0;

/// First section in `ids` whose viewport rect contains the line at `offset`
pub fn find_active<'a, I>(ids: I, offset: f64, geometry: &dyn ElementGeometry) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter().find(|id| {
        geometry
            .bounding_client_rect(id)
            .map(|rect| rect.top() <= offset && rect.bottom() >= offset)
            .unwrap_or(false)
    })
}

/// The currently active section id.
///
/// Only ever holds an id from the section list it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSection {
    id: String,
}

impl ActiveSection {
    /// Start at `initial`, falling back to the first section when `initial`
    /// is not a declared id
    pub fn new(sections: &SectionList, initial: &str) -> Self {
        let id = if sections.contains(initial) {
            initial.to_string()
        } else {
            sections.first().id.clone()
        };
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Apply a tracker result. `None` leaves the state as is. Returns whether
    /// the active id changed.
    pub fn apply(&mut self, sections: &SectionList, candidate: Option<&str>) -> bool {
        match candidate {
            Some(id) if id != self.id && sections.contains(id) => {
                debug!("active section {} -> {}", self.id, id);
                self.id = id.to_string();
                true
            }
            _ => false,
        }
    }
}

/// Latest event skipped by the throttle, with the section rects it saw
#[derive(Debug, Clone)]
struct PendingScroll {
    timestamp_ms: f64,
    rects: HashMap<String, Rect>,
}

/// Tracker state: the section list, reference line and optional throttle
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    sections: SectionList,
    offset: f64,
    throttle_ms: u64,
    last_evaluated_ms: Option<f64>,
    pending: Option<PendingScroll>,
    active: ActiveSection,
}

impl ScrollTracker {
    pub fn new(sections: SectionList, initial: &str, offset: f64) -> Self {
        let active = ActiveSection::new(&sections, initial);
        Self {
            sections,
            offset,
            throttle_ms: 0,
            last_evaluated_ms: None,
            pending: None,
            active,
        }
    }

    /// Skip events that arrive within `ms` of the last evaluated one.
    /// Zero (the default) evaluates every event.
    pub fn with_throttle(mut self, ms: u64) -> Self {
        self.throttle_ms = ms;
        self
    }

    pub fn active(&self) -> &str {
        self.active.id()
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Evaluate the current geometry and update the active section.
    /// Returns whether it changed.
    pub fn evaluate(&mut self, geometry: &dyn ElementGeometry) -> bool {
        let candidate = find_active(self.sections.ids(), self.offset, geometry);
        self.active.apply(&self.sections, candidate)
    }

    /// Scroll event handler: evaluates unless throttled.
    ///
    /// A throttled event is kept as pending (the latest one wins) and applied
    /// by [`ScrollTracker::flush_pending`] once the interval has passed, so the
    /// position scrolling stopped at is always reflected eventually.
    pub fn on_scroll(&mut self, event: &ScrollEvent, geometry: &dyn ElementGeometry) -> bool {
        if self.is_throttled(event.timestamp_ms) {
            let rects = self
                .sections
                .ids()
                .filter_map(|id| geometry.bounding_client_rect(id).map(|r| (id.to_string(), r)))
                .collect();
            self.pending = Some(PendingScroll {
                timestamp_ms: event.timestamp_ms,
                rects,
            });
            return false;
        }
        self.pending = None;
        self.last_evaluated_ms = Some(event.timestamp_ms);
        self.evaluate(geometry)
    }

    /// Whether a skipped event is waiting for the throttle interval to pass
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the pending event if the throttle interval has passed by
    /// `now_ms`. Returns whether the active section changed.
    pub fn flush_pending(&mut self, now_ms: f64) -> bool {
        if self.is_throttled(now_ms) {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        debug!("applying scroll event from {}ms after throttle", pending.timestamp_ms);
        self.last_evaluated_ms = Some(now_ms);
        self.evaluate(&pending.rects)
    }

    fn is_throttled(&self, now_ms: f64) -> bool {
        match self.last_evaluated_ms {
            Some(last) if self.throttle_ms > 0 => now_ms - last < self.throttle_ms as f64,
            _ => false,
        }
    }
}
