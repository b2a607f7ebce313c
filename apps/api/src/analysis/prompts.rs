// CV analysis prompt templates.

pub const CV_ANALYSIS_PROMPT: &str = r#"You are an expert CV parser. Extract the information in the CV text below into a structured JSON object.

CV TEXT:
{cv_text}

OUTPUT SCHEMA (use exactly these keys):
{schema}

RULES:
1. Copy facts from the CV only. Do not invent employers, dates, or degrees.
2. Use an empty string or empty array when a field is not present in the CV.
3. Keep dates as written in the CV (e.g. "Jan 2020", "2019").
4. Put programming languages in "programmingLanguages" and named software in "softwareTools", not in "skills".
5. {json_only}"#;

/// Fills the analysis template with the extracted CV text.
pub fn build_analysis_prompt(cv_text: &str) -> String {
    CV_ANALYSIS_PROMPT
        .replace("{schema}", crate::llm_client::prompts::CV_SCHEMA)
        .replace("{json_only}", crate::llm_client::prompts::JSON_ONLY_INSTRUCTION)
        .replace("{cv_text}", cv_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_and_schema() {
        let prompt = build_analysis_prompt("Ada Lovelace\nAnalyst");
        assert!(prompt.contains("Ada Lovelace\nAnalyst"));
        assert!(prompt.contains("\"programmingLanguages\""));
        assert!(!prompt.contains("{cv_text}"));
        assert!(!prompt.contains("{schema}"));
    }

    #[test]
    fn test_cv_text_with_placeholders_is_not_expanded() {
        // CV text is substituted last so its contents are never re-templated.
        let prompt = build_analysis_prompt("literal {schema} in a CV");
        assert!(prompt.contains("literal {schema} in a CV"));
    }
}
