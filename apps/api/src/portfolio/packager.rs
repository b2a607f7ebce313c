//! Static-site ZIP packaging.

use std::io::{Cursor, Write};

use serde_json::json;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::cv::CvData;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Page contents for one site.
#[derive(Debug, Clone, Copy)]
pub struct SiteSource<'a> {
    pub template_name: &'a str,
    pub html: &'a str,
    pub css: &'a str,
    /// Bundle-provided script; the default loader is used when absent.
    pub js: Option<&'a str>,
}

/// Loads cv-data.json and fills elements tagged with `data-field`.
pub const DEFAULT_MAIN_JS: &str = r##"document.addEventListener('DOMContentLoaded', async () => {
  try {
    const response = await fetch('cv-data.json');
    if (!response.ok) return;
    const cv = await response.json();
    document.querySelectorAll('[data-field]').forEach((el) => {
      const value = cv.header && cv.header[el.dataset.field];
      if (value) el.textContent = value;
    });
  } catch (err) {
    console.warn('cv-data.json could not be loaded', err);
  }

  document.querySelectorAll('a[href^="#"]').forEach((link) => {
    link.addEventListener('click', (event) => {
      const target = document.querySelector(link.getAttribute('href'));
      if (!target) return;
      event.preventDefault();
      target.scrollIntoView({ behavior: 'smooth' });
    });
  });
});
"##;

/// Lowercase ASCII slug for package names and filenames.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "portfolio".to_string()
    } else {
        slug.to_string()
    }
}

fn package_json(cv: &CvData, template_name: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "name": format!("{}-portfolio", slugify(cv.display_name())),
        "version": "1.0.0",
        "private": true,
        "description": format!("Portfolio site for {} ({} template)", cv.display_name(), template_name),
        "scripts": {
            "start": "serve .",
            "dev": "serve . --listen 3000"
        },
        "devDependencies": {
            "serve": "^14.2.0"
        }
    }))
}

fn readme(cv: &CvData, template_name: &str) -> String {
    format!(
        "# {name}\n\n\
         Static portfolio generated from a CV with the `{template}` template on {date}.\n\n\
         ## Run locally\n\n\
         ```sh\nnpm install\nnpm start\n```\n\n\
         Or open `index.html` directly in a browser.\n\n\
         ## Files\n\n\
         - `index.html`: page markup\n\
         - `styles.css`: stylesheet\n\
         - `main.js`: page behaviour\n\
         - `cv-data.json`: the CV data the page was built from\n",
        name = cv.display_name(),
        template = template_name,
        date = chrono::Utc::now().format("%Y-%m-%d"),
    )
}

/// Builds the ZIP archive in memory.
pub fn package_site(source: SiteSource<'_>, cv: &CvData) -> Result<Vec<u8>, PackageError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let files: [(&str, String); 6] = [
        ("index.html", source.html.to_string()),
        ("styles.css", source.css.to_string()),
        ("main.js", source.js.unwrap_or(DEFAULT_MAIN_JS).to_string()),
        ("package.json", package_json(cv, source.template_name)?),
        ("README.md", readme(cv, source.template_name)),
        ("cv-data.json", serde_json::to_string_pretty(cv)?),
    ];

    for (name, contents) in &files {
        zip.start_file(*name, options)?;
        zip.write_all(contents.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
