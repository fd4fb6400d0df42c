//! Headless page: a laid-out document behind a scrollable viewport.
//!
//! Implements [`Host`] so views can mount on it exactly as they would on a
//! browser binding. Scrolling clamps to the document and dispatches a
//! [`ScrollEvent`] to subscribers whenever the position changes.

use crate::host::{ElementGeometry, EventBus, Host, ScrollEvent};
use crate::rendering::layout::{layout_document, DocumentLayout};
use crate::{Rect, Result, Viewport};
use log::{debug, warn};
use scraper::Html;

pub struct HeadlessPage {
    source: Option<String>,
    layout: DocumentLayout,
    viewport: Viewport,
    scroll_y: f64,
    now_ms: f64,
    events: EventBus,
}

impl HeadlessPage {
    /// Parse and lay out `html` for `viewport`
    pub fn from_html(html: &str, viewport: Viewport) -> Result<Self> {
        let layout = layout_document(&Html::parse_document(html), viewport)?;
        debug!(
            "laid out {} blocks, document height {}px",
            layout.boxes.len(),
            layout.height
        );
        let mut page = Self::from_layout(layout, viewport);
        page.source = Some(html.to_string());
        Ok(page)
    }

    /// Use a precomputed layout (document coordinates)
    pub fn from_layout(layout: DocumentLayout, viewport: Viewport) -> Self {
        Self {
            source: None,
            layout,
            viewport,
            scroll_y: 0.0,
            now_ms: 0.0,
            events: EventBus::new(),
        }
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn document_height(&self) -> f64 {
        self.layout.height
    }

    /// Largest reachable scroll offset; 0 when the document fits
    pub fn max_scroll(&self) -> f64 {
        (self.layout.height - self.viewport.height as f64).max(0.0)
    }

    /// Host clock in milliseconds, stamped on dispatched events
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance the host clock
    pub fn advance_clock(&mut self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.now_ms += ms;
        }
    }

    /// Scroll to `y`, clamped to the document. Dispatches and returns the
    /// scroll event when the position changed.
    pub fn scroll_to(&mut self, y: f64) -> Option<ScrollEvent> {
        if !y.is_finite() {
            warn!("ignoring non-finite scroll target {}", y);
            return None;
        }
        let clamped = y.clamp(0.0, self.max_scroll());
        if clamped == self.scroll_y {
            return None;
        }
        self.scroll_y = clamped;
        Some(self.dispatch_scroll())
    }

    pub fn scroll_by(&mut self, dy: f64) -> Option<ScrollEvent> {
        self.scroll_to(self.scroll_y + dy)
    }

    /// Change the viewport. HTML-backed pages are laid out again; the scroll
    /// offset is re-clamped and a scroll event is dispatched so listeners can
    /// re-evaluate.
    pub fn resize(&mut self, viewport: Viewport) -> Result<ScrollEvent> {
        if let Some(source) = &self.source {
            self.layout = layout_document(&Html::parse_document(source), viewport)?;
        }
        self.viewport = viewport;
        self.scroll_y = self.scroll_y.min(self.max_scroll());
        Ok(self.dispatch_scroll())
    }

    fn dispatch_scroll(&self) -> ScrollEvent {
        let event = ScrollEvent {
            scroll_y: self.scroll_y,
            viewport_height: self.viewport.height as f64,
            progress: self.scroll_progress(),
            timestamp_ms: self.now_ms,
        };
        self.events.dispatch(&event, self);
        event
    }
}

impl ElementGeometry for HeadlessPage {
    fn bounding_client_rect(&self, id: &str) -> Option<Rect> {
        self.layout.rect_of(id).map(|r| r.translate_y(-self.scroll_y))
    }

    fn scroll_progress(&self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 {
            0.0
        } else {
            (self.scroll_y / max).clamp(0.0, 1.0)
        }
    }
}

impl Host for HeadlessPage {
    fn events(&self) -> &EventBus {
        &self.events
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl std::fmt::Debug for HeadlessPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessPage")
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("document_height", &self.layout.height)
            .field("events", &self.events)
            .finish()
    }
}
