use std::sync::Arc;

use tracing::instrument;

use crate::domain::{ports::LlmService, KeywordRecord, Result};

/// Produces a free-text candidate assessment from extracted keywords.
///
/// One completion call per assessment; the generated text is returned
/// unmodified. Retry policy belongs to the caller, not here.
pub struct AssessmentGenerator {
    llm: Arc<dyn LlmService>,
}

impl AssessmentGenerator {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    #[instrument(skip(self, keywords, context))]
    pub async fn generate(
        &self,
        keywords: &KeywordRecord,
        context: Option<&str>,
    ) -> Result<String> {
        let prompt = build_prompt(keywords, context);
        self.llm.complete(&prompt).await
    }
}

fn build_prompt(keywords: &KeywordRecord, context: Option<&str>) -> String {
    let mut prompt = String::from("Here are extracted keywords from a candidate's resume:\n");

    for (field, values) in keywords.iter() {
        if values.is_empty() {
            prompt.push_str(&format!("{field}: (none found)\n"));
        } else {
            prompt.push_str(&format!("{field}: {}\n", values.join(", ")));
        }
    }

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\nSupporting excerpts from the resume:\n");
        prompt.push_str(context);
        prompt.push('\n');
    }

    prompt.push_str(
        "\nPlease provide a professional assessment of the candidate's strengths, \
         weaknesses, and job suitability. If the extracted information is insufficient, \
         say so explicitly.",
    );
    prompt
}
