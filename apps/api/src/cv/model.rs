//! CV document types.
//!
//! Every struct defaults field-by-field so partially filled documents (from
//! the editor or from an LLM reply) deserialize without errors. Empty strings
//! are valid values throughout. Scalar fields go through `lenient`, so a
//! numeric year or a `"true"` string still lands in the right type.

use serde::{Deserialize, Serialize};

use crate::cv::lenient;

/// Client-visible entry id. Millisecond timestamp, unique within one store.
pub type EntryId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Header {
    #[serde(deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub website: String,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub id: EntryId,
    #[serde(deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub id: EntryId,
    #[serde(deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub field: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub grade: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteeringEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub id: EntryId,
    #[serde(deserialize_with = "lenient::string")]
    pub organization: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomSection {
    #[serde(deserialize_with = "lenient::id")]
    pub id: EntryId,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "lenient::string_list")]
    pub technical: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub soft: Vec<String>,
}

/// The whole CV document as edited by one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvData {
    pub header: Header,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    #[serde(deserialize_with = "lenient::string_list")]
    pub programming_languages: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub software_tools: Vec<String>,
    pub volunteering: Vec<VolunteeringEntry>,
    #[serde(deserialize_with = "lenient::string")]
    pub profile_summary: String,
    pub custom_sections: Vec<CustomSection>,
}

impl CvData {
    /// The display name, or a neutral fallback for filenames and titles.
    pub fn display_name(&self) -> &str {
        let name = self.header.full_name.trim();
        if name.is_empty() {
            "Portfolio"
        } else {
            name
        }
    }

    /// Text shown in summary sections: the profile summary, else the header summary.
    pub fn summary_text(&self) -> &str {
        if self.profile_summary.trim().is_empty() {
            &self.header.summary
        } else {
            &self.profile_summary
        }
    }
}

/// Partial top-level document produced by the extraction step.
///
/// A field that is `Some` replaces the corresponding `CvData` field wholesale
/// when loaded; `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCv {
    pub header: Option<Header>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub skills: Option<Skills>,
    #[serde(default, deserialize_with = "lenient::opt_string_list")]
    pub programming_languages: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_string_list")]
    pub software_tools: Option<Vec<String>>,
    pub volunteering: Option<Vec<VolunteeringEntry>>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub profile_summary: Option<String>,
    pub custom_sections: Option<Vec<CustomSection>>,
}
