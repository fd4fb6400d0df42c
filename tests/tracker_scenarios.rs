//! Active-section scenarios against hand-placed geometry

use folio::tracker::{find_active, ScrollTracker, DEFAULT_REFERENCE_OFFSET};
use folio::{Icon, Rect, Section, SectionList};
use std::collections::HashMap;

fn sections() -> SectionList {
    let ids = ["home", "about", "education", "skills", "projects"];
    SectionList::new(ids.iter().map(|id| Section::new(id, id, Icon::Home)).collect())
        .expect("valid sections")
}

fn rects(entries: &[(&str, f64, f64)]) -> HashMap<String, Rect> {
    entries
        .iter()
        .map(|(id, top, bottom)| (id.to_string(), Rect::new(0.0, *top, 1280.0, bottom - top)))
        .collect()
}

#[test]
fn about_spanning_reference_line_is_active() {
    let mut tracker = ScrollTracker::new(sections(), "home", DEFAULT_REFERENCE_OFFSET);
    let geometry = rects(&[
        ("home", -670.0, 50.0),
        ("about", 50.0, 400.0),
        ("education", 400.0, 800.0),
    ]);
    tracker.evaluate(&geometry);
    assert_eq!(tracker.active(), "about");
}

#[test]
fn no_anchors_keep_home() {
    let mut tracker = ScrollTracker::new(sections(), "home", DEFAULT_REFERENCE_OFFSET);
    for _ in 0..5 {
        assert!(!tracker.evaluate(&HashMap::<String, Rect>::new()));
    }
    assert_eq!(tracker.active(), "home");
}

#[test]
fn overlapping_extents_pick_first_declared() {
    let geometry = rects(&[("skills", 80.0, 500.0), ("education", 0.0, 120.0)]);
    let list = sections();
    assert_eq!(find_active(list.ids(), 100.0, &geometry), Some("education"));
}

#[test]
fn exactly_one_match_for_every_line_position() {
    // contiguous sections: every line position hits exactly the section below it
    let geometry = rects(&[
        ("home", 0.0, 700.0),
        ("about", 700.0, 1200.0),
        ("education", 1200.0, 1500.0),
        ("skills", 1500.0, 1900.0),
        ("projects", 1900.0, 2600.0),
    ]);
    let list = sections();
    for line in [10.0, 699.0, 701.0, 1300.0, 1600.0, 2599.0] {
        let expected = geometry
            .iter()
            .find(|(_, r)| r.top() < line && r.bottom() > line)
            .map(|(id, _)| id.as_str());
        assert_eq!(find_active(list.ids(), line, &geometry), expected, "line {}", line);
    }
}

#[test]
fn gap_between_sections_is_idempotent() {
    let mut tracker = ScrollTracker::new(sections(), "home", 100.0);
    tracker.evaluate(&rects(&[("skills", 0.0, 200.0)]));
    assert_eq!(tracker.active(), "skills");
    let gap = rects(&[("skills", -300.0, 90.0), ("projects", 110.0, 900.0)]);
    assert!(!tracker.evaluate(&gap));
    assert!(!tracker.evaluate(&gap));
    assert_eq!(tracker.active(), "skills");
}
