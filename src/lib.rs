//! Folio
//!
//! A scroll-driven single-page portfolio. The crate owns the page content,
//! renders it to HTML, lays the document out headlessly and drives the two
//! behaviors the page is built around:
//!
//! - **Active-section tracking**: the first section (in declared order) whose
//!   extent contains a reference line 100px below the viewport top is
//!   highlighted in the navigation rail.
//! - **Scroll progress**: the document scroll fraction, smoothed by a spring,
//!   scales a fixed bar across the top of the page.
//!
//! # Example
//!
//! ```
//! use folio::{PageConfig, Portfolio};
//!
//! # fn main() -> folio::Result<()> {
//! let (mut page, view) = folio::open(Portfolio::default(), PageConfig::default())?;
//! page.scroll_to(900.0);
//! for _ in 0..120 {
//!     view.tick(1.0 / 60.0);
//! }
//! println!("active: {}, bar: {:.3}", view.active_section(), view.progress_scale());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod content;
pub mod host;
pub mod page;
pub mod progress;
pub mod rendering;
pub mod reveal;
pub mod section;
pub mod spring;
pub mod tracker;
pub mod view;

pub use content::Portfolio;
pub use host::{ElementGeometry, EventBus, Host, ScrollEvent, Subscription};
pub use page::HeadlessPage;
pub use rendering::layout::Rect;
pub use section::{Icon, Section, SectionList};
pub use spring::SpringConfig;
pub use view::{NavItem, PortfolioView};

/// Page configuration
///
/// The defaults match the published page: a 1280x720 viewport, the six
/// built-in sections with `home` active first, a 100px reference line, an
/// over-damped progress spring and no scroll throttling.
///
/// # Examples
///
/// ```
/// let cfg = folio::PageConfig::default();
/// assert_eq!(cfg.reference_offset, 100.0);
/// assert_eq!(cfg.initial_section, "home");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Viewport dimensions
    pub viewport: Viewport,
    /// Tracked sections in declared order
    pub sections: SectionList,
    /// Section active before the first scroll event
    pub initial_section: String,
    /// Distance of the focus line from the viewport top, in pixels
    pub reference_offset: f64,
    /// Progress bar spring
    pub spring: SpringConfig,
    /// Minimum milliseconds between evaluated scroll events (0 => every event)
    pub scroll_throttle_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            sections: SectionList::default(),
            initial_section: "home".to_string(),
            reference_offset: tracker::DEFAULT_REFERENCE_OFFSET,
            spring: SpringConfig::default(),
            scroll_throttle_ms: 0,
        }
    }
}

impl PageConfig {
    /// Parse and validate a configuration from JSON. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: PageConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::ConfigError(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.reference_offset.is_finite() || self.reference_offset < 0.0 {
            return Err(Error::ConfigError(format!(
                "reference_offset must be a non-negative number, got {}",
                self.reference_offset
            )));
        }
        if !self.sections.contains(&self.initial_section) {
            return Err(Error::ConfigError(format!(
                "initial_section '{}' is not a declared section",
                self.initial_section
            )));
        }
        self.spring.validate()
    }

    /// Render state of a freshly opened page: the configured initial section
    /// highlighted, the progress bar empty
    pub fn initial_render_state(&self) -> rendering::RenderState {
        rendering::RenderState::initial(&self.sections, &self.initial_section)
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Render `portfolio`, lay it out headlessly and mount a view on it.
pub fn open(portfolio: Portfolio, config: PageConfig) -> Result<(HeadlessPage, PortfolioView)> {
    config.validate()?;
    portfolio.validate()?;
    let html = rendering::render_page(&portfolio, &config.sections, &config.initial_render_state());
    let page = HeadlessPage::from_html(&html, config.viewport)?;
    let view = PortfolioView::mount(&page, portfolio, &config)?;
    Ok((page, view))
}
