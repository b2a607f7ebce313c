//! Template bundles returned by the model in step 4.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::analysis::{parse_ai_response, AiReply};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBundle {
    #[serde(default)]
    pub name: String,
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: Option<String>,
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Model reply did not contain a JSON object")]
    NoJson,

    #[error("Model reply has no \"templates\" array")]
    MissingTemplates,

    #[error("Model returned no usable templates")]
    Empty,
}

/// Extracts the `templates` array from a reply. Entries without HTML are
/// skipped; unnamed entries get `template-<n>`.
pub fn parse_bundles(reply: &str) -> Result<Vec<TemplateBundle>, BundleError> {
    let mut object = match parse_ai_response(reply) {
        AiReply::Parsed(map) => map,
        AiReply::Unparsed(_) => return Err(BundleError::NoJson),
    };
    let Some(Value::Array(entries)) = object.remove("templates") else {
        return Err(BundleError::MissingTemplates);
    };

    let bundles: Vec<TemplateBundle> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<TemplateBundle>(entry) {
            Ok(bundle) if !bundle.html.trim().is_empty() => Some(bundle),
            Ok(_) => {
                warn!("Skipping template {i}: empty html");
                None
            }
            Err(e) => {
                warn!("Skipping template {i}: {e}");
                None
            }
        })
        .enumerate()
        .map(|(i, mut bundle)| {
            if bundle.name.trim().is_empty() {
                bundle.name = format!("template-{}", i + 1);
            }
            bundle
        })
        .collect();

    if bundles.is_empty() {
        return Err(BundleError::Empty);
    }
    Ok(bundles)
}
