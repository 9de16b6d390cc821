//! Prompt template for health advice

/// Fixed framing placed before every query
const SYSTEM_FRAMING: &str = "You are a helpful and empathetic healthcare assistant.\n\
Provide clear, accurate, and easy-to-understand health information.\n\
If the query is about a medical emergency, advise seeking immediate professional help.";

/// Heading introducing text extracted from an uploaded report
pub const RECORDS_HEADING: &str = "Additional information from user's health records:";

/// Prompt builder for advice queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the complete prompt for one turn
    ///
    /// The records section is only added when `supporting_text` has
    /// non-whitespace content.
    pub fn build(query: &str, supporting_text: Option<&str>) -> String {
        let mut prompt = String::with_capacity(
            SYSTEM_FRAMING.len() + query.len() + supporting_text.map_or(0, str::len) + 64,
        );

        prompt.push_str(SYSTEM_FRAMING);
        prompt.push_str("\n\nUser's query: ");
        prompt.push_str(query);
        prompt.push('\n');

        if let Some(text) = supporting_text.filter(|t| !t.trim().is_empty()) {
            prompt.push_str("\n\n");
            prompt.push_str(RECORDS_HEADING);
            prompt.push('\n');
            prompt.push_str(text);
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_records() {
        let prompt = PromptBuilder::build("What helps with a headache?", None);

        assert!(prompt.starts_with("You are a helpful and empathetic healthcare assistant."));
        assert!(prompt.contains("seeking immediate professional help"));
        assert!(prompt.contains("User's query: What helps with a headache?"));
        assert!(!prompt.contains(RECORDS_HEADING));
    }

    #[test]
    fn test_prompt_with_records() {
        let prompt = PromptBuilder::build("Explain my labs", Some("LDL 160 mg/dL\n"));

        let query_at = prompt.find("Explain my labs").unwrap();
        let heading_at = prompt.find(RECORDS_HEADING).unwrap();
        assert!(query_at < heading_at);
        assert!(prompt.ends_with(&format!("{}\nLDL 160 mg/dL\n", RECORDS_HEADING)));
    }

    #[test]
    fn test_blank_records_are_omitted() {
        let prompt = PromptBuilder::build("Explain my labs", Some(" \n\n "));
        assert!(!prompt.contains(RECORDS_HEADING));
    }
}
