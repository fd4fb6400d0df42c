//! Reveal-once tracking for section entrance animations.
//!
//! A section is revealed the first time any part of it is inside the
//! viewport and stays revealed for the life of the page.

use crate::host::ElementGeometry;
use crate::section::SectionList;
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every section intersecting `[0, viewport_height]` as revealed.
    /// Returns the ids revealed by this call, in declared order.
    pub fn update(
        &mut self,
        sections: &SectionList,
        viewport_height: f64,
        geometry: &dyn ElementGeometry,
    ) -> Vec<String> {
        let mut newly = Vec::new();
        for id in sections.ids() {
            if self.is_revealed(id) {
                continue;
            }
            let Some(rect) = geometry.bounding_client_rect(id) else {
                continue;
            };
            if rect.bottom() > 0.0 && rect.top() < viewport_height {
                debug!("section {} revealed", id);
                self.revealed.push(id.to_string());
                newly.push(id.to_string());
            }
        }
        newly
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.iter().any(|r| r == id)
    }

    /// Revealed ids in reveal order
    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }
}
