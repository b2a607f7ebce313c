// Shared prompt fragments.
// Each module that calls the LLM keeps its own prompts.rs alongside it;
// only cross-cutting fragments live here.

/// Appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with a single valid JSON object only. \
    Do NOT wrap it in markdown code fences. \
    Do NOT include explanations before or after the JSON.";

/// Schema block describing the CV document shape, shared by the upload
/// analysis and the portfolio pipeline.
pub const CV_SCHEMA: &str = r#"{
  "header": {
    "fullName": "string", "title": "string", "email": "string", "phone": "string",
    "location": "string", "linkedin": "string", "website": "string", "summary": "string"
  },
  "experience": [{
    "position": "string", "company": "string", "location": "string",
    "startDate": "string", "endDate": "string", "current": false,
    "description": "string", "achievements": ["string"]
  }],
  "education": [{
    "institution": "string", "degree": "string", "field": "string",
    "startDate": "string", "endDate": "string", "grade": "string", "description": "string"
  }],
  "skills": { "technical": ["string"], "soft": ["string"] },
  "programmingLanguages": ["string"],
  "softwareTools": ["string"],
  "volunteering": [{
    "organization": "string", "role": "string", "startDate": "string",
    "endDate": "string", "description": "string"
  }],
  "profileSummary": "string",
  "customSections": [{ "title": "string", "items": ["string"] }]
}"#;
