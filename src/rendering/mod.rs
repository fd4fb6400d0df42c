//! Rendering: HTML output for the page, headless layout and text snapshots.

pub mod layout;
pub mod snapshot;

use crate::content::Portfolio;
use crate::section::{Section, SectionList};
use crate::tracker::ActiveSection;
use std::fmt::Write as _;

/// Presentation state folded into a render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Section whose navigation entry is highlighted
    pub active_section: String,
    /// Progress bar scale in `[0, 1]`
    pub progress_scale: f64,
    /// Sections that have entered the viewport at least once
    pub revealed: Vec<String>,
}

impl RenderState {
    /// State of a freshly mounted page: `active` highlighted (the first
    /// section when `active` is not declared), no progress
    pub fn initial(sections: &SectionList, active: &str) -> Self {
        Self {
            active_section: ActiveSection::new(sections, active).id().to_string(),
            progress_scale: 0.0,
            revealed: Vec::new(),
        }
    }

    fn is_revealed(&self, id: &str) -> bool {
        self.revealed.iter().any(|r| r == id)
    }
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn icon(name: &str) -> String {
    format!(r#"<i data-lucide="{}" aria-hidden="true"></i>"#, name)
}

/// Render the full page as an HTML document
pub fn render_page(portfolio: &Portfolio, sections: &SectionList, state: &RenderState) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, r#"<html lang="en">"#);
    let _ = writeln!(
        html,
        "<head><meta charset=\"utf-8\"><title>{}</title></head>",
        escape_html(&portfolio.name)
    );
    let _ = writeln!(html, "<body>");
    let _ = writeln!(
        html,
        r#"<div id="scroll-progress" class="progress-bar" style="transform: scaleX({:.4})"></div>"#,
        state.progress_scale.clamp(0.0, 1.0)
    );
    html.push_str(&render_nav(sections, &state.active_section));
    let _ = writeln!(html, "<main>");
    for section in sections {
        html.push_str(&render_section(portfolio, section, state.is_revealed(&section.id)));
    }
    let _ = writeln!(html, "</main>");
    let _ = writeln!(html, "<footer><p>{}</p></footer>", escape_html(&portfolio.footer));
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}

/// Render the navigation rail, marking `active` as current
pub fn render_nav(sections: &SectionList, active: &str) -> String {
    let mut html = String::from("<nav class=\"nav-rail\">\n");
    for s in sections.nav_entries() {
        let is_active = s.id == active;
        let _ = writeln!(
            html,
            r##"<a href="#{id}" class="nav-link{cls}" title="{label}"{current}>{icon}</a>"##,
            id = escape_html(&s.id),
            cls = if is_active { " active" } else { "" },
            label = escape_html(&s.label),
            current = if is_active { r#" aria-current="location""# } else { "" },
            icon = icon(s.icon.name()),
        );
    }
    html.push_str("</nav>\n");
    html
}

fn open_section(html: &mut String, section: &Section, revealed: bool, extra: &str) {
    let _ = writeln!(
        html,
        r#"<section id="{}" data-revealed="{}"{}>"#,
        escape_html(&section.id),
        revealed,
        extra
    );
}

fn render_section(p: &Portfolio, section: &Section, revealed: bool) -> String {
    let mut html = String::new();
    match section.id.as_str() {
        "home" => {
            open_section(&mut html, section, true, r#" data-min-height="viewport" data-padding="0""#);
            let _ = writeln!(html, "<h1>Hi, I'm {}</h1>", escape_html(&p.name));
            let phrases = p
                .roles
                .phrases
                .iter()
                .map(|r| escape_html(r))
                .collect::<Vec<_>>()
                .join("|");
            let _ = writeln!(
                html,
                r#"<p class="typewriter" data-phrases="{}" data-pause-ms="{}" data-speed="{}">{}</p>"#,
                phrases,
                p.roles.pause_ms,
                p.roles.speed,
                p.roles.phrases.first().map(|r| escape_html(r)).unwrap_or_default(),
            );
            let _ = writeln!(html, "<p>{}</p>", escape_html(&p.tagline));
            let _ = writeln!(
                html,
                r#"<div class="social"><a href="{}">{}</a><a href="{}">{}</a><a href="mailto:{}">{}</a></div>"#,
                escape_html(&p.social.github),
                icon("github"),
                escape_html(&p.social.linkedin),
                icon("linkedin"),
                escape_html(&p.social.email),
                icon("mail"),
            );
        }
        "about" => {
            open_section(&mut html, section, revealed, "");
            let _ = writeln!(html, "<h2>About Me</h2>");
            for para in &p.about {
                let _ = writeln!(html, "<p>{}</p>", escape_html(para));
            }
            let _ = writeln!(
                html,
                r#"<a class="button" href="{}">{}Download Resume</a>"#,
                escape_html(&p.resume_url),
                icon("download")
            );
            let _ = writeln!(
                html,
                r#"<img src="{}" alt="Profile" height="320">"#,
                escape_html(&p.image_url(&p.profile_image))
            );
        }
        "education" => {
            open_section(&mut html, section, revealed, "");
            let _ = writeln!(html, "<h2>Education</h2>");
            for e in &p.education {
                let _ = writeln!(
                    html,
                    r#"<div class="card"><h3>{}</h3><p>{}</p><p class="period">{}</p></div>"#,
                    escape_html(&e.institution),
                    escape_html(&e.degree),
                    escape_html(&e.period)
                );
            }
        }
        "skills" => {
            open_section(&mut html, section, revealed, "");
            let _ = writeln!(html, "<h2>Skills &amp; Technologies</h2>");
            let _ = writeln!(html, r#"<ul class="skills">"#);
            for s in &p.skills {
                let _ = writeln!(
                    html,
                    r#"<li><span class="emoji">{}</span> {}</li>"#,
                    escape_html(&s.emoji),
                    escape_html(&s.name)
                );
            }
            let _ = writeln!(html, "</ul>");
        }
        "projects" => {
            open_section(&mut html, section, revealed, "");
            let _ = writeln!(html, "<h2>Featured Projects</h2>");
            for pr in &p.projects {
                let tech = pr
                    .tech
                    .iter()
                    .map(|t| format!(r#"<span class="chip">{}</span>"#, escape_html(t.trim())))
                    .collect::<String>();
                let _ = writeln!(
                    html,
                    r#"<article class="project"><img src="{img}" alt="{title}" height="240"><h3>{title}</h3><div class="links"><a href="{gh}">{gh_icon}</a><a href="{live}">{live_icon}</a></div><p>{desc}</p><p class="tech">{tech}</p></article>"#,
                    img = escape_html(&p.image_url(&pr.image)),
                    title = escape_html(&pr.title),
                    gh = escape_html(&pr.github),
                    gh_icon = icon("github"),
                    live = escape_html(&pr.live),
                    live_icon = icon("external-link"),
                    desc = escape_html(&pr.description),
                    tech = tech,
                );
            }
        }
        "contact" => {
            open_section(&mut html, section, revealed, "");
            let _ = writeln!(html, "<h2>{}</h2>", escape_html(&p.contact.heading));
            let _ = writeln!(html, "<p>{}</p>", escape_html(&p.contact.blurb));
            let _ = writeln!(
                html,
                r#"<a class="button" href="mailto:{}">{}{}</a>"#,
                escape_html(&p.contact.email),
                icon("mail"),
                escape_html(&p.contact.cta)
            );
        }
        _ => {
            // Sections without built-in content still get an anchor
            open_section(&mut html, section, revealed, "");
            let _ = writeln!(html, "<h2>{}</h2>", escape_html(&section.label));
        }
    }
    let _ = writeln!(html, "</section>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Icon;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn page_contains_every_section_anchor() {
        let sections = SectionList::default();
        let html = render_page(&Portfolio::default(), &sections, &RenderState::initial(&sections, "home"));
        for id in sections.ids() {
            assert!(html.contains(&format!(r#"<section id="{}""#, id)), "missing {}", id);
        }
        assert!(html.contains("Hi, I'm Sudhanshu Kumar"));
        assert!(html.contains("/assets/project1.png"));
    }

    #[test]
    fn nav_marks_only_active_entry() {
        let sections = SectionList::default();
        let nav = render_nav(&sections, "skills");
        assert_eq!(nav.matches("nav-link active").count(), 1);
        assert!(nav.contains(r##"<a href="#skills" class="nav-link active""##));
        assert!(!nav.contains("#contact"));
    }

    #[test]
    fn progress_scale_is_clamped() {
        let sections = SectionList::default();
        let state = RenderState {
            progress_scale: 1.02,
            ..RenderState::initial(&sections, "home")
        };
        let html = render_page(&Portfolio::default(), &sections, &state);
        assert!(html.contains("scaleX(1.0000)"));
    }

    #[test]
    fn unknown_section_gets_placeholder() {
        let sections = SectionList::new(vec![
            Section::new("home", "Home", Icon::Home),
            Section::new("blog", "Blog", Icon::Briefcase),
        ])
        .unwrap();
        let html = render_page(&Portfolio::default(), &sections, &RenderState::initial(&sections, "home"));
        assert!(html.contains(r#"<section id="blog" data-revealed="false">"#));
        assert!(html.contains("<h2>Blog</h2>"));
    }

    #[test]
    fn initial_state_highlights_requested_section() {
        let sections = SectionList::default();
        let state = RenderState::initial(&sections, "about");
        assert_eq!(state.active_section, "about");
        let html = render_page(&Portfolio::default(), &sections, &state);
        assert!(html.contains(r##"<a href="#about" class="nav-link active""##));
        assert_eq!(RenderState::initial(&sections, "blog").active_section, "home");
    }
}
