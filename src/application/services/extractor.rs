use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{
    ports::ExtractionService, AnalysisError, KeywordRecord, KeywordSchema, Result,
};

const OUTPUT_MARKER: &str = "<|output|>";
const END_MARKER: &str = "<|end-output|>";

/// Extracts a structured keyword record from résumé text.
///
/// Builds the extraction model's prompt from the schema and optional
/// few-shot examples, makes one model call, and maps the response onto the
/// schema's field set. The model may phrase values differently across
/// calls; only the field set of the result is stable.
pub struct KeywordExtractor {
    extraction: Arc<dyn ExtractionService>,
}

impl KeywordExtractor {
    pub fn new(extraction: Arc<dyn ExtractionService>) -> Self {
        Self { extraction }
    }

    #[instrument(skip(self, text, examples), fields(text_len = text.len()))]
    pub async fn extract(
        &self,
        text: &str,
        schema: &KeywordSchema,
        examples: &[String],
    ) -> Result<KeywordRecord> {
        if text.trim().is_empty() {
            return Err(AnalysisError::configuration("resume text is empty"));
        }

        let prompt = build_prompt(text, schema, examples);
        let response = self.extraction.extract(&prompt).await?;
        debug!(response_len = response.len(), "Extraction model responded");

        let value = parse_response(&response)?;
        KeywordRecord::from_extracted(schema, &value)
    }
}

/// NuExtract-style prompt: template, optional examples, then the text.
fn build_prompt(text: &str, schema: &KeywordSchema, examples: &[String]) -> String {
    let mut prompt = String::from("<|input|>\n### Template:\n");
    prompt.push_str(&schema.template_json());
    prompt.push('\n');

    for example in examples {
        if example.trim().is_empty() {
            continue;
        }
        prompt.push_str("### Example:\n");
        prompt.push_str(example.trim());
        prompt.push('\n');
    }

    prompt.push_str("### Text:\n");
    prompt.push_str(text);
    prompt.push_str("\n<|output|>\n");
    prompt
}

/// Pulls the JSON object out of a model response.
///
/// The model may echo the prompt before an output marker and append
/// commentary after the object; both are tolerated. The object runs from
/// the first `{` of the output section to its balancing `}`, so commentary
/// containing stray braces does not break parsing.
fn parse_response(response: &str) -> Result<Value> {
    let after_marker = match response.rfind(OUTPUT_MARKER) {
        Some(pos) => &response[pos + OUTPUT_MARKER.len()..],
        None => response,
    };
    let section = match after_marker.find(END_MARKER) {
        Some(pos) => &after_marker[..pos],
        None => after_marker,
    };

    let start = section
        .find('{')
        .ok_or_else(|| AnalysisError::extraction_parse("no JSON object in model output"))?;
    let end = balancing_brace(&section[start..])
        .ok_or_else(|| AnalysisError::extraction_parse("unterminated JSON object in output"))?;

    serde_json::from_str(&section[start..=start + end])
        .map_err(|e| AnalysisError::extraction_parse(format!("invalid JSON in output: {e}")))
}

/// Byte offset of the `}` balancing the `{` that `text` starts with,
/// skipping braces inside JSON string literals.
fn balancing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
