//! Headless block layout for the rendered page.
//!
//! This is an estimate, not a CSS engine: it stacks every top-level
//! `section[id]` and the `footer` vertically and sizes each from its text
//! blocks, wrapping words at a fixed glyph width. It is good enough to drive
//! scroll tracking without a browser.

use crate::{Error, Result, Viewport};
use scraper::{ElementRef, Html, Selector};

/// Widest the centered content column gets
pub const MAX_CONTENT_WIDTH: f64 = 896.0;
/// Horizontal padding either side of the content column
pub const GUTTER: f64 = 16.0;
/// Vertical padding of a section unless it sets `data-padding`
pub const DEFAULT_SECTION_PADDING: f64 = 80.0;
/// Body glyph advance used for wrapping
pub const GLYPH_WIDTH: f64 = 8.0;
/// Height given to an `<img>` without a `height` attribute
pub const DEFAULT_IMAGE_HEIGHT: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the horizontal line at `y` falls within the box, edges included
    pub fn contains_y(&self, y: f64) -> bool {
        self.top() <= y && self.bottom() >= y
    }

    /// The same box shifted vertically by `dy`
    pub fn translate_y(&self, dy: f64) -> Rect {
        Rect { y: self.y + dy, ..*self }
    }
}

/// A laid-out block in document coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// Element id; `None` for anonymous blocks such as the footer
    pub id: Option<String>,
    pub rect: Rect,
}

/// Result of laying out a whole document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub boxes: Vec<LayoutBox>,
    pub height: f64,
}

impl DocumentLayout {
    /// Build a layout by stacking `(id, height)` blocks from the top
    pub fn stacked<I, S>(width: f64, blocks: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut y = 0.0;
        let mut boxes = Vec::new();
        for (id, height) in blocks {
            let height = height.max(0.0);
            boxes.push(LayoutBox {
                id: Some(id.into()),
                rect: Rect::new(0.0, y, width, height),
            });
            y += height;
        }
        Self { boxes, height: y }
    }

    /// Document-space rect of the block with `id`
    pub fn rect_of(&self, id: &str) -> Option<Rect> {
        self.boxes
            .iter()
            .find(|b| b.id.as_deref() == Some(id))
            .map(|b| b.rect)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.boxes.iter().filter_map(|b| b.id.as_deref())
    }
}

/// Per-tag block metrics: (line height, bottom margin, glyph scale)
fn block_metrics(tag: &str) -> Option<(f64, f64, f64)> {
    match tag {
        "h1" => Some((48.0, 16.0, 3.0)),
        "h2" => Some((36.0, 32.0, 2.0)),
        "h3" => Some((28.0, 8.0, 1.5)),
        "p" => Some((24.0, 16.0, 1.0)),
        "li" => Some((24.0, 8.0, 1.0)),
        _ => None,
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::LayoutError(format!("bad selector '{}': {:?}", css, e)))
}

/// Number of lines `text` wraps to at `chars_per_line`
pub fn wrapped_line_count(text: &str, chars_per_line: usize) -> usize {
    let chars_per_line = chars_per_line.max(1);
    let mut lines = 0usize;
    let mut cur = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if cur > 0 && cur + 1 + len > chars_per_line {
            lines += 1;
            cur = len;
        } else {
            if cur > 0 {
                cur += 1;
            }
            cur += len;
        }
    }
    if cur > 0 {
        lines += 1;
    }
    lines
}

fn is_nested_block(el: &ElementRef<'_>) -> bool {
    el.ancestors().any(|a| {
        a.value()
            .as_element()
            .map(|e| e.name() == "section" || e.name() == "footer")
            .unwrap_or(false)
    })
}

fn block_height(block: &ElementRef<'_>, leaves: &Selector, content_w: f64, viewport: Viewport) -> f64 {
    let el = block.value();
    let padding = el
        .attr("data-padding")
        .and_then(|p| p.parse::<f64>().ok())
        .unwrap_or(if el.name() == "footer" { 32.0 } else { DEFAULT_SECTION_PADDING });

    let mut content = 0.0;
    for leaf in block.select(leaves) {
        let tag = leaf.value().name();
        if tag == "img" {
            content += leaf
                .value()
                .attr("height")
                .and_then(|h| h.parse::<f64>().ok())
                .unwrap_or(DEFAULT_IMAGE_HEIGHT);
            continue;
        }
        if let Some((line_h, margin, scale)) = block_metrics(tag) {
            let text = leaf.text().collect::<String>();
            let chars_per_line = (content_w / (GLYPH_WIDTH * scale)).floor() as usize;
            let lines = wrapped_line_count(&text, chars_per_line).max(1);
            content += lines as f64 * line_h + margin;
        }
    }

    let height = content + padding * 2.0;
    if el.attr("data-min-height") == Some("viewport") {
        height.max(viewport.height as f64)
    } else {
        height
    }
}

/// Compute a block layout for the provided HTML document and viewport.
/// - Top-level `section[id]` elements and the `footer` stack vertically
/// - Each block is its padding plus the wrapped height of its text leaves
/// - `data-min-height="viewport"` makes a block at least one viewport tall
pub fn layout_document(document: &Html, viewport: Viewport) -> Result<DocumentLayout> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(Error::LayoutError(format!(
            "viewport must be non-empty, got {}x{}",
            viewport.width, viewport.height
        )));
    }
    let page_width = viewport.width as f64;
    let content_w = (page_width.min(MAX_CONTENT_WIDTH) - GUTTER * 2.0).max(GLYPH_WIDTH);

    let blocks = selector("section[id], footer")?;
    let leaves = selector("h1, h2, h3, p, li, img")?;

    let mut y = 0.0;
    let mut boxes = Vec::new();
    for block in document.select(&blocks) {
        if is_nested_block(&block) {
            continue;
        }
        let height = block_height(&block, &leaves, content_w, viewport);
        boxes.push(LayoutBox {
            id: block.value().id().map(str::to_string),
            rect: Rect::new(0.0, y, page_width, height),
        });
        y += height;
    }

    Ok(DocumentLayout { boxes, height: y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn layout_document_stacks_sections_in_order() {
        let html = r#"<html><body>
            <section id="home" data-min-height="viewport"><h1>Hi</h1></section>
            <section id="about"><h2>About</h2><p>Hello world</p></section>
            <footer><p>Bye</p></footer>
        </body></html>"#;
        let doc = Html::parse_document(html);
        let v = Viewport { width: 800, height: 600 };
        let layout = layout_document(&doc, v).unwrap();
        let ids: Vec<&str> = layout.ids().collect();
        assert_eq!(ids, ["home", "about"]);
        assert_eq!(layout.boxes.len(), 3);

        let home = layout.rect_of("home").unwrap();
        assert_eq!(home.top(), 0.0);
        assert_eq!(home.height, 600.0);

        let about = layout.rect_of("about").unwrap();
        assert_eq!(about.top(), home.bottom());
        // padding 80*2 + h2 (36+32) + p (24+16)
        assert_eq!(about.height, 160.0 + 68.0 + 40.0);
        assert!(layout.height > about.bottom());
    }

    #[test]
    fn nested_sections_are_not_double_counted() {
        let html = r#"<section id="outer"><section id="inner"><p>x</p></section></section>"#;
        let doc = Html::parse_document(html);
        let layout = layout_document(&doc, Viewport::default()).unwrap();
        assert_eq!(layout.ids().collect::<Vec<_>>(), ["outer"]);
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let doc = Html::parse_document("<section id=a></section>");
        assert!(layout_document(&doc, Viewport { width: 0, height: 10 }).is_err());
    }

    #[test]
    fn wrapping_counts_lines() {
        assert_eq!(wrapped_line_count("", 10), 0);
        assert_eq!(wrapped_line_count("one two", 10), 1);
        assert_eq!(wrapped_line_count("one two three", 7), 2);
        assert_eq!(wrapped_line_count("abcdefghijkl", 4), 1);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(0.0, 100.0, 10.0, 50.0);
        assert!(r.contains_y(100.0));
        assert!(r.contains_y(150.0));
        assert!(!r.contains_y(150.5));
        assert_eq!(r.translate_y(-100.0).top(), 0.0);
    }

    #[test]
    fn stacked_layout_accumulates() {
        let l = DocumentLayout::stacked(100.0, [("a", 10.0), ("b", 20.0)]);
        assert_eq!(l.height, 30.0);
        assert_eq!(l.rect_of("b").unwrap().top(), 10.0);
    }
}
