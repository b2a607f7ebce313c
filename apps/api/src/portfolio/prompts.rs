// Portfolio pipeline prompt templates.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{CV_SCHEMA, JSON_ONLY_INSTRUCTION};

/// Number of template bundles requested from the model.
pub const BUNDLE_COUNT: usize = 5;

/// Step 3: raw CV text → CV document. Replace `{cv_text}` last.
pub const CV_STRUCTURE_PROMPT: &str = r#"Convert the CV text below into a JSON object for building a personal portfolio website.

CV TEXT:
{cv_text}

OUTPUT SCHEMA (use exactly these keys):
{schema}

RULES:
1. Copy facts from the CV only. Never invent employers, dates, or qualifications.
2. Use an empty string or empty array for anything the CV does not mention.
3. Write "profileSummary" as two or three sentences in the third person, based on the CV.
4. {json_only}"#;

/// Step 4: CV document → portfolio template bundles. Replace `{cv_json}` last.
pub const BUNDLE_PROMPT: &str = r#"You are a senior front-end designer. Create {count} distinct single-page portfolio website designs for the person described by this CV data:

{cv_json}

Return a JSON object of this exact shape:
{
  "templates": [
    { "name": "short-kebab-case-name", "html": "complete HTML document", "css": "complete stylesheet", "js": "optional script" }
  ]
}

RULES:
1. Return exactly {count} entries in "templates", each with a different visual style.
2. Each "html" is a full document that links "styles.css" and "main.js" with relative paths.
3. Put the person's real data from the CV into the markup. Mark the name element with data-field="fullName" and the job title element with data-field="title".
4. No external frameworks, CDNs, or web fonts. Plain HTML, CSS and JavaScript only.
5. Include sections only for CV content that exists.
6. {json_only}"#;

pub fn build_structure_prompt(cv_text: &str) -> String {
    CV_STRUCTURE_PROMPT
        .replace("{schema}", CV_SCHEMA)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{cv_text}", cv_text)
}

pub fn build_bundle_prompt(cv_json: &str) -> String {
    BUNDLE_PROMPT
        .replace("{count}", &BUNDLE_COUNT.to_string())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{cv_json}", cv_json)
}
