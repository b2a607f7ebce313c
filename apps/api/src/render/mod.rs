//! Built-in CV templates.
//!
//! Rendering is pure: the same document and template always produce the same
//! HTML. All text is HTML-escaped by askama; sections with no content are
//! left out.

use std::fmt;
use std::str::FromStr;

use askama::Template;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cv::CvData;

pub mod handlers;
pub mod styles;
pub mod templates;

use templates::{ClassicTemplate, MinimalTemplate, ModernTemplate};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("template rendering failed: {0}")]
    Askama(#[from] askama::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Modern,
    Classic,
    Minimal,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Modern,
        TemplateKind::Classic,
        TemplateKind::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Modern => "modern",
            TemplateKind::Classic => "classic",
            TemplateKind::Minimal => "minimal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateKind::Modern => "Two-column layout with a coloured banner and skill tags",
            TemplateKind::Classic => "Single-column serif layout suited to printing",
            TemplateKind::Minimal => "Plain monospace page with compact lists",
        }
    }

    pub fn stylesheet(self) -> &'static str {
        match self {
            TemplateKind::Modern => styles::MODERN_CSS,
            TemplateKind::Classic => styles::CLASSIC_CSS,
            TemplateKind::Minimal => styles::MINIMAL_CSS,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RenderError::UnknownTemplate(s.to_string()))
    }
}

/// Where the stylesheet goes in the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssMode {
    /// `<style>` in the head. Used for previews.
    Inline,
    /// `<link href="styles.css">`. Used for static-site export.
    Linked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub css: String,
}

fn contacts(cv: &CvData) -> Vec<&str> {
    let h = &cv.header;
    [&h.email, &h.phone, &h.location, &h.linkedin, &h.website]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn render(kind: TemplateKind, cv: &CvData, mode: CssMode) -> Result<RenderedPage, RenderError> {
    let css = kind.stylesheet();
    let inline_css = match mode {
        CssMode::Inline => Some(css),
        CssMode::Linked => None,
    };
    let summary = cv.summary_text().trim();
    let contacts = contacts(cv);

    let html = match kind {
        TemplateKind::Modern => ModernTemplate {
            cv,
            summary,
            contacts,
            inline_css,
        }
        .render()?,
        TemplateKind::Classic => ClassicTemplate {
            cv,
            summary,
            contacts,
            inline_css,
        }
        .render()?,
        TemplateKind::Minimal => MinimalTemplate {
            cv,
            summary,
            contacts,
            inline_css,
        }
        .render()?,
    };

    Ok(RenderedPage {
        html,
        css: css.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::model::{CustomSection, ExperienceEntry, Header};

    fn sample_cv() -> CvData {
        CvData {
            header: Header {
                full_name: "Ada Lovelace".to_string(),
                title: "Analyst".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            },
            experience: vec![ExperienceEntry {
                id: 1,
                position: "Programmer".to_string(),
                company: "Analytical Engines Ltd".to_string(),
                start_date: "1842".to_string(),
                current: true,
                achievements: vec!["Wrote Note G".to_string()],
                ..Default::default()
            }],
            programming_languages: vec!["Rust".to_string(), "Ada".to_string()],
            custom_sections: vec![CustomSection {
                id: 2,
                title: "Awards".to_string(),
                items: vec!["Turing Award".to_string()],
            }],
            profile_summary: "First programmer.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_template_kind_parsing() {
        assert_eq!("modern".parse::<TemplateKind>().unwrap(), TemplateKind::Modern);
        assert_eq!(" Classic ".parse::<TemplateKind>().unwrap(), TemplateKind::Classic);
        assert!(matches!(
            "fancy".parse::<TemplateKind>(),
            Err(RenderError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_every_template_renders_core_content() {
        let cv = sample_cv();
        for kind in TemplateKind::ALL {
            let page = render(kind, &cv, CssMode::Linked).unwrap();
            assert!(page.html.contains("Ada Lovelace"), "{kind}");
            assert!(page.html.contains("Analytical Engines Ltd"), "{kind}");
            assert!(page.html.contains("Turing Award"), "{kind}");
            assert!(page.html.contains("First programmer."), "{kind}");
            assert!(page.html.contains("href=\"styles.css\""), "{kind}");
            assert_eq!(page.css, kind.stylesheet());
        }
    }

    #[test]
    fn test_inline_mode_embeds_stylesheet() {
        let page = render(TemplateKind::Classic, &sample_cv(), CssMode::Inline).unwrap();
        assert!(page.html.contains("<style>"));
        assert!(page.html.contains("font-variant: small-caps"));
        assert!(!page.html.contains("styles.css"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut cv = sample_cv();
        cv.header.full_name = "<script>alert(1)</script>".to_string();
        let page = render(TemplateKind::Modern, &cv, CssMode::Linked).unwrap();
        assert!(!page.html.contains("<script>alert(1)</script>"));
        assert!(page.html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let page = render(TemplateKind::Modern, &CvData::default(), CssMode::Linked).unwrap();
        assert!(!page.html.contains("Experience"));
        assert!(!page.html.contains("Education"));
        assert!(page.html.contains("<title>Portfolio</title>"));
    }

    #[test]
    fn test_contacts_skip_blank_fields() {
        let mut cv = sample_cv();
        cv.header.phone = "   ".to_string();
        cv.header.location = "London".to_string();
        assert_eq!(contacts(&cv), vec!["ada@example.com", "London"]);
    }
}
