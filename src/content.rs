//! Portfolio content: the static data the page presents.
//!
//! [`Portfolio::default`] is the built-in profile. A JSON document with the
//! same shape can replace it via [`Portfolio::from_json`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default base path for bundled images
pub const DEFAULT_ASSET_BASE: &str = "/assets";

/// Resolve an asset file name against `base`.
///
/// Absolute URLs pass through untouched.
pub fn image_url(base: &str, name: &str) -> String {
    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("data:") {
        return name.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), name.trim_start_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Image file name, resolved with [`image_url`]
    pub image: String,
    pub tech: Vec<String>,
    pub github: String,
    pub live: String,
}

/// Rotating role line under the name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typewriter {
    pub phrases: Vec<String>,
    /// Pause after each phrase is fully typed
    pub pause_ms: u64,
    /// Typing speed as understood by the front-end animation
    pub speed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub heading: String,
    pub blurb: String,
    pub email: String,
    pub cta: String,
}

/// Everything the page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub roles: Typewriter,
    pub tagline: String,
    pub social: SocialLinks,
    pub about: Vec<String>,
    pub resume_url: String,
    pub profile_image: String,
    #[serde(default = "default_asset_base")]
    pub asset_base: String,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub contact: Contact,
    pub footer: String,
}

fn default_asset_base() -> String {
    DEFAULT_ASSET_BASE.to_string()
}

impl Portfolio {
    /// Parse and validate portfolio content from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let p: Portfolio = serde_json::from_str(json)?;
        p.validate()?;
        Ok(p)
    }

    /// Load portfolio content from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ContentError("name must not be empty".into()));
        }
        if self.roles.phrases.is_empty() {
            return Err(Error::ContentError("at least one role phrase is required".into()));
        }
        if let Some(p) = self.projects.iter().find(|p| p.title.trim().is_empty()) {
            return Err(Error::ContentError(format!("project with image '{}' has no title", p.image)));
        }
        Ok(())
    }

    /// Resolve an image name against this portfolio's asset base
    pub fn image_url(&self, name: &str) -> String {
        image_url(&self.asset_base, name)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        let email = "Sudhanshukumar.072002@gmail.com".to_string();
        Self {
            name: "Sudhanshu Kumar".into(),
            roles: Typewriter {
                phrases: vec!["Front - End Developer".into(), "Problem Solver".into()],
                pause_ms: 2000,
                speed: 50,
            },
            tagline: "I build exceptional and accessible digital experiences for the web.".into(),
            social: SocialLinks {
                github: "https://github.com/sudhanshu1512".into(),
                linkedin: "https://www.linkedin.com/in/sudhanshu-kumar-b07c2002/".into(),
                email: email.clone(),
            },
            about: vec![
                "I'm a passionate full-stack developer with expertise in building modern web \
                 applications. I specialize in JavaScript/TypeScript, React, Node.js, and modern \
                 web technologies."
                    .into(),
                "Currently, I'm focused on building accessible, human-centered products that make \
                 a difference."
                    .into(),
            ],
            resume_url:
                "https://drive.google.com/file/d/1xun80MRrVZ5ps5dB-8i2kmwO7g2S3Lav/view?usp=drive_link"
                    .into(),
            profile_image: "profile2.jpg".into(),
            asset_base: default_asset_base(),
            education: vec![
                Education {
                    institution: "Marwadi Education Foundation".into(),
                    degree: "Bachelor of Technology ( Information Technology )".into(),
                    period: "2021 - 2025".into(),
                },
                Education {
                    institution: "Lyceum International School".into(),
                    degree: "Higher Secondary Education".into(),
                    period: "2019 - 2021".into(),
                },
            ],
            skills: [
                ("React", "\u{269b}\u{fe0f}"),
                ("TypeScript", "\u{1f4d8}"),
                ("Node.js", "\u{1f7e2}"),
                ("TailwindCSS", "\u{1f3a8}"),
                ("MongoDB", "\u{1f343}"),
            ]
            .into_iter()
            .map(|(name, emoji)| Skill {
                name: name.into(),
                emoji: emoji.into(),
            })
            .collect(),
            projects: vec![
                Project {
                    title: "Edusity".into(),
                    description: "This is a project made to learn and expand my understanding \
                                  optimal user experience across devices."
                        .into(),
                    image: "project1.png".into(),
                    tech: vec!["React".into(), "Tailwind CSS".into()],
                    github: "https://github.com/sudhanshu1512/Edu-web".into(),
                    live: "https://edusity-b240.netlify.app/".into(),
                },
                Project {
                    title: "Task Management App".into(),
                    description: "A collaborative task management application with real-time updates"
                        .into(),
                    image: "image.png".into(),
                    tech: vec!["ReactJs".into(), "Tailwind CSS".into(), "Firebase".into()],
                    github: "https://github.com/sudhanshu1512/project".into(),
                    live: "https://mytodos-0efb.netlify.app/".into(),
                },
            ],
            contact: Contact {
                heading: "Get In Touch".into(),
                blurb: "I'm currently looking for new opportunities. Whether you have a question or \
                        just want to say hi, I'll try my best to get back to you!"
                    .into(),
                email,
                cta: "Say Hello".into(),
            },
            footer: "Created By Sudhanshu | 2025 All rights reserved".into(),
        }
    }
}
