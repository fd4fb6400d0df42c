//! The page view: owns the active section and progress state, subscribes to
//! the host's scroll events on mount and lets go of them on unmount.

use crate::content::Portfolio;
use crate::host::{Host, ScrollEvent, Subscription};
use crate::progress::ProgressIndicator;
use crate::rendering::{self, RenderState};
use crate::reveal::RevealTracker;
use crate::section::{Icon, SectionList};
use crate::tracker::ScrollTracker;
use crate::{ElementGeometry, PageConfig, Result};
use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard};

/// One entry of the navigation rail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub icon: Icon,
    pub active: bool,
}

#[derive(Debug)]
struct ViewState {
    tracker: ScrollTracker,
    progress: ProgressIndicator,
    reveal: RevealTracker,
    /// Host time in ms: the latest event timestamp plus frames ticked since
    clock_ms: f64,
}

impl ViewState {
    fn on_scroll(&mut self, event: &ScrollEvent, geometry: &dyn ElementGeometry) {
        let ViewState {
            tracker,
            progress,
            reveal,
            clock_ms,
        } = self;
        *clock_ms = clock_ms.max(event.timestamp_ms);
        tracker.on_scroll(event, geometry);
        progress.set_raw(event.progress);
        reveal.update(tracker.sections(), event.viewport_height, geometry);
    }

    fn tick(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.clock_ms += dt * 1000.0;
        }
        self.tracker.flush_pending(self.clock_ms);
        self.progress.tick(dt)
    }
}

/// A mounted portfolio page
#[derive(Debug)]
pub struct PortfolioView {
    portfolio: Portfolio,
    sections: SectionList,
    state: Arc<Mutex<ViewState>>,
    subscription: Option<Subscription>,
}

impl PortfolioView {
    /// Mount on `host`: start at the configured section, take the host's
    /// current scroll fraction as the initial progress and subscribe to
    /// scroll events.
    pub fn mount<H: Host>(host: &H, portfolio: Portfolio, config: &PageConfig) -> Result<Self> {
        config.validate()?;
        let tracker = ScrollTracker::new(
            config.sections.clone(),
            &config.initial_section,
            config.reference_offset,
        )
        .with_throttle(config.scroll_throttle_ms);
        let progress = ProgressIndicator::new(host.scroll_progress(), config.spring);
        let mut reveal = RevealTracker::new();
        reveal.update(&config.sections, host.viewport().height as f64, host);

        let state = Arc::new(Mutex::new(ViewState {
            tracker,
            progress,
            reveal,
            clock_ms: 0.0,
        }));

        let listener_state = Arc::clone(&state);
        let subscription = host.events().subscribe(move |event, geometry| {
            let mut s = listener_state.lock().unwrap_or_else(|e| e.into_inner());
            s.on_scroll(event, geometry);
        });
        info!(
            "view mounted with {} sections, reference line at {}px",
            config.sections.len(),
            config.reference_offset
        );

        Ok(Self {
            portfolio,
            sections: config.sections.clone(),
            state,
            subscription: Some(subscription),
        })
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Detach from the host. State stays readable; further scrolling no
    /// longer reaches this view.
    pub fn unmount(&mut self) {
        if let Some(sub) = self.subscription.take() {
            debug!("view unmounted (listener {:?})", sub.id());
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Advance one animation frame of `dt` seconds: apply a scroll event the
    /// throttle held back once its interval has passed, step the progress
    /// spring and return the smoothed value
    pub fn tick(&self, dt: f64) -> f64 {
        self.state().tick(dt)
    }

    pub fn active_section(&self) -> String {
        self.state().tracker.active().to_string()
    }

    /// Latest raw scroll fraction
    pub fn raw_progress(&self) -> f64 {
        self.state().progress.raw()
    }

    /// Smoothed scroll fraction
    pub fn progress(&self) -> f64 {
        self.state().progress.value()
    }

    /// Progress bar scale, clamped to `[0, 1]`
    pub fn progress_scale(&self) -> f64 {
        self.state().progress.scale_x()
    }

    pub fn progress_settled(&self) -> bool {
        self.state().progress.is_settled()
    }

    pub fn revealed(&self) -> Vec<String> {
        self.state().reveal.revealed().to_vec()
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Navigation rail entries with the active one marked
    pub fn nav_items(&self) -> Vec<NavItem> {
        let active = self.active_section();
        self.sections
            .nav_entries()
            .map(|s| NavItem {
                id: s.id.clone(),
                label: s.label.clone(),
                icon: s.icon,
                active: s.id == active,
            })
            .collect()
    }

    pub fn render_state(&self) -> RenderState {
        let s = self.state();
        RenderState {
            active_section: s.tracker.active().to_string(),
            progress_scale: s.progress.scale_x(),
            revealed: s.reveal.revealed().to_vec(),
        }
    }

    /// Render the page in its current state
    pub fn render(&self) -> String {
        rendering::render_page(&self.portfolio, &self.sections, &self.render_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HeadlessPage;
    use crate::rendering::layout::DocumentLayout;
    use crate::Viewport;

    fn page() -> HeadlessPage {
        let layout = DocumentLayout::stacked(
            1280.0,
            [
                ("home", 720.0),
                ("about", 600.0),
                ("education", 500.0),
                ("skills", 400.0),
                ("projects", 900.0),
                ("contact", 800.0),
            ],
        );
        HeadlessPage::from_layout(layout, Viewport::default())
    }

    #[test]
    fn scrolling_updates_active_section_and_nav() {
        let mut p = page();
        let view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
        assert_eq!(view.active_section(), "home");

        // about spans [720, 1320]; line at scroll + 100
        p.scroll_to(700.0);
        assert_eq!(view.active_section(), "about");
        let nav = view.nav_items();
        assert_eq!(nav.iter().filter(|n| n.active).count(), 1);
        assert!(nav.iter().any(|n| n.id == "about" && n.active));
    }

    #[test]
    fn contact_is_tracked_but_has_no_nav_entry() {
        let mut p = page();
        let view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
        p.scroll_to(p.max_scroll());
        assert_eq!(view.active_section(), "contact");
        assert!(view.nav_items().iter().all(|n| !n.active));
    }

    #[test]
    fn unmount_detaches_listener() {
        let mut p = page();
        let mut view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
        view.unmount();
        assert!(!view.is_mounted());
        assert_eq!(p.events().listener_count(), 0);
        p.scroll_to(2000.0);
        assert_eq!(view.active_section(), "home");
        assert_eq!(view.raw_progress(), 0.0);
    }

    #[test]
    fn dropping_view_detaches_listener() {
        let p = page();
        {
            let _view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
            assert_eq!(p.events().listener_count(), 1);
        }
        assert_eq!(p.events().listener_count(), 0);
    }

    #[test]
    fn progress_follows_scroll_through_spring() {
        let mut p = page();
        let view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
        p.scroll_to(p.max_scroll());
        assert_eq!(view.raw_progress(), 1.0);
        let first = view.tick(1.0 / 60.0);
        assert!(first > 0.0 && first < 1.0);
        for _ in 0..600 {
            view.tick(1.0 / 60.0);
        }
        assert!(view.progress_settled());
        assert_eq!(view.progress_scale(), 1.0);
    }

    #[test]
    fn reveal_happens_on_mount_and_scroll() {
        let mut p = page();
        let view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
        assert_eq!(view.revealed(), ["home".to_string()]);
        p.scroll_to(800.0);
        assert!(view.revealed().contains(&"education".to_string()));
        let html = view.render();
        assert!(html.contains(r#"<section id="about" data-revealed="true">"#));
        assert!(html.contains(r#"<section id="contact" data-revealed="false">"#));
    }

    #[test]
    fn throttled_scroll_lands_on_following_frames() {
        let mut p = page();
        let config = PageConfig {
            scroll_throttle_ms: 100,
            ..PageConfig::default()
        };
        let view = PortfolioView::mount(&p, Portfolio::default(), &config).unwrap();
        p.advance_clock(16.0);
        p.scroll_to(10.0);
        p.advance_clock(5.0);
        // education spans [1320, 1820]
        p.scroll_to(1300.0);
        assert_eq!(view.active_section(), "home");
        for _ in 0..10 {
            view.tick(1.0 / 60.0);
        }
        assert_eq!(view.active_section(), "education");
    }

    #[test]
    fn mounted_mid_page_starts_from_current_progress() {
        let mut p = page();
        p.scroll_to(p.max_scroll() / 2.0);
        let view = PortfolioView::mount(&p, Portfolio::default(), &PageConfig::default()).unwrap();
        assert_eq!(view.progress(), 0.5);
        assert!(view.progress_settled());
        // tracker waits for the first scroll event
        assert_eq!(view.active_section(), "home");
    }
}
