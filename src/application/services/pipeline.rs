use std::path::Path;

use tracing::{info, instrument};

use crate::application::services::{
    AssessmentGenerator, DocumentLoader, IndexService, KeywordExtractor,
};
use crate::domain::{AnalysisReport, EmbeddingIndex, KeywordRecord, KeywordSchema, Result};

const FALLBACK_QUERY: &str = "candidate qualifications, skills and experience";

/// Sequences the full analysis: load -> index -> extract -> assess.
///
/// All loaded résumés are analyzed together: their text is concatenated
/// before keyword extraction, producing one combined record per batch. The
/// first failing stage aborts the run; loader warnings pass through to the
/// report. Each run owns its document set and index, so concurrent runs
/// never share state.
pub struct AnalysisPipeline {
    loader: DocumentLoader,
    index: IndexService,
    extractor: KeywordExtractor,
    assessor: AssessmentGenerator,
    top_k: usize,
}

impl AnalysisPipeline {
    pub fn new(
        loader: DocumentLoader,
        index: IndexService,
        extractor: KeywordExtractor,
        assessor: AssessmentGenerator,
        top_k: usize,
    ) -> Self {
        Self {
            loader,
            index,
            extractor,
            assessor,
            top_k,
        }
    }

    #[instrument(skip(self, schema), fields(folder = %folder.display()))]
    pub async fn run(&self, folder: &Path, schema: &KeywordSchema) -> Result<AnalysisReport> {
        let outcome = self.loader.load(folder)?;
        info!(
            documents = outcome.documents.len(),
            skipped = outcome.warnings.len(),
            "Documents loaded"
        );

        let index = self.index.build(&outcome.documents).await?;
        info!(chunks = index.len(), "Embedding index built");

        let combined_text = outcome
            .documents
            .iter()
            .map(|d| d.text())
            .collect::<Vec<_>>()
            .join("\n\n");

        let keywords = self.extractor.extract(&combined_text, schema, &[]).await?;

        let context = self.retrieve_context(&index, &keywords).await?;
        let assessment = self.assessor.generate(&keywords, context.as_deref()).await?;

        Ok(AnalysisReport {
            keywords,
            assessment,
            warnings: outcome.warnings,
        })
    }

    /// Pulls the chunks most relevant to the extracted keywords, to ground
    /// the assessment in the résumé text itself.
    async fn retrieve_context(
        &self,
        index: &EmbeddingIndex,
        keywords: &KeywordRecord,
    ) -> Result<Option<String>> {
        if index.is_empty() || self.top_k == 0 {
            return Ok(None);
        }

        let query = keyword_query(keywords);
        let results = self.index.query(index, &query, self.top_k).await?;
        if results.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            results
                .iter()
                .map(|r| r.chunk.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
        ))
    }
}

fn keyword_query(keywords: &KeywordRecord) -> String {
    if keywords.is_blank() {
        return FALLBACK_QUERY.to_string();
    }

    keywords
        .iter()
        .flat_map(|(_, values)| values.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        EmbeddingService, ExtractionService, LlmService, ResumeParser,
    };
    use crate::domain::{AnalysisError, Embedding, Stage};
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Arc;

    struct LineParser;

    impl ResumeParser for LineParser {
        fn parse(&self, bytes: &[u8]) -> Result<Vec<String>> {
            Ok(String::from_utf8_lossy(bytes)
                .lines()
                .map(str::to_string)
                .collect())
        }
    }

    struct HashEmbedding;

    impl HashEmbedding {
        fn vector_for(text: &str) -> Embedding {
            let mut v = [0.0f32; 4];
            for (i, b) in text.bytes().enumerate() {
                v[i % 4] += f32::from(b) / 255.0;
            }
            Embedding::new(v.to_vec())
        }
    }

    #[async_trait]
    impl EmbeddingService for HashEmbedding {
        async fn embed(&self, text: &str) -> Result<Embedding> {
            Ok(Self::vector_for(text))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
            Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    struct UnreachableEmbedding;

    #[async_trait]
    impl EmbeddingService for UnreachableEmbedding {
        async fn embed(&self, _text: &str) -> Result<Embedding> {
            Err(AnalysisError::model_unavailable(Stage::Index, "connection refused"))
        }

        async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>> {
            Err(AnalysisError::model_unavailable(Stage::Index, "connection refused"))
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    struct UnreachableExtraction;

    #[async_trait]
    impl ExtractionService for UnreachableExtraction {
        async fn extract(&self, _prompt: &str) -> Result<String> {
            Err(AnalysisError::model_unavailable(
                Stage::Extract,
                "extraction request timed out",
            ))
        }
    }

    struct StubExtraction;

    #[async_trait]
    impl ExtractionService for StubExtraction {
        async fn extract(&self, _prompt: &str) -> Result<String> {
            Ok(r#"{"Skills": ["Python", "SQL"], "Experience Years": ["5"]}"#.to_string())
        }
    }

    struct EchoLlm;

    #[async_trait]
    impl LlmService for EchoLlm {
        async fn complete(&self, prompt: &str) -> Result<String> {
            Ok(format!("Assessment based on:\n{prompt}"))
        }
    }

    fn pipeline(embedding: Arc<dyn EmbeddingService>) -> AnalysisPipeline {
        AnalysisPipeline::new(
            DocumentLoader::new(Arc::new(LineParser)),
            IndexService::new(embedding, 1000),
            KeywordExtractor::new(Arc::new(StubExtraction)),
            AssessmentGenerator::new(Arc::new(EchoLlm)),
            2,
        )
    }

    fn schema() -> KeywordSchema {
        KeywordSchema::from_json(r#"{"Skills": [], "Experience Years": []}"#).unwrap()
    }

    #[tokio::test]
    async fn test_full_run_produces_combined_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), "Python, SQL\n5 years experience").unwrap();
        fs::write(dir.path().join("b.pdf"), "Backend services in Python").unwrap();

        let report = pipeline(Arc::new(HashEmbedding))
            .run(dir.path(), &schema())
            .await
            .unwrap();

        assert_eq!(report.keywords.get("Skills").unwrap(), ["Python", "SQL"]);
        assert_eq!(report.keywords.get("Experience Years").unwrap(), ["5"]);
        assert!(report.assessment.contains("Skills: Python, SQL"));
        assert!(report.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_assessment_receives_retrieved_context() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), "Python, SQL, databases").unwrap();

        let report = pipeline(Arc::new(HashEmbedding))
            .run(dir.path(), &schema())
            .await
            .unwrap();

        assert!(report.assessment.contains("Supporting excerpts"));
    }

    #[tokio::test]
    async fn test_loader_warnings_pass_through() {
        struct PickyParser;

        impl ResumeParser for PickyParser {
            fn parse(&self, bytes: &[u8]) -> Result<Vec<String>> {
                let text = String::from_utf8_lossy(bytes);
                if text.starts_with("BAD") {
                    return Err(AnalysisError::load("corrupt PDF"));
                }
                Ok(vec![text.into_owned()])
            }
        }

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.pdf"), "Python work").unwrap();
        fs::write(dir.path().join("broken.pdf"), "BAD bytes").unwrap();

        let p = AnalysisPipeline::new(
            DocumentLoader::new(Arc::new(PickyParser)),
            IndexService::new(Arc::new(HashEmbedding), 1000),
            KeywordExtractor::new(Arc::new(StubExtraction)),
            AssessmentGenerator::new(Arc::new(EchoLlm)),
            2,
        );

        let report = p.run(dir.path(), &schema()).await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("broken.pdf"));
    }

    #[tokio::test]
    async fn test_index_failure_aborts_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), "content").unwrap();

        let err = pipeline(Arc::new(UnreachableEmbedding))
            .run(dir.path(), &schema())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::ModelUnavailable { .. }));
        assert_eq!(err.stage().as_str(), "index");
    }

    #[tokio::test]
    async fn test_unreachable_extraction_reports_extract_stage() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), "content").unwrap();

        let p = AnalysisPipeline::new(
            DocumentLoader::new(Arc::new(LineParser)),
            IndexService::new(Arc::new(HashEmbedding), 1000),
            KeywordExtractor::new(Arc::new(UnreachableExtraction)),
            AssessmentGenerator::new(Arc::new(EchoLlm)),
            2,
        );

        let err = p.run(dir.path(), &schema()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::ModelUnavailable { .. }));
        assert_eq!(err.stage(), Stage::Extract);
    }

    #[tokio::test]
    async fn test_empty_folder_aborts_with_load_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = pipeline(Arc::new(HashEmbedding))
            .run(dir.path(), &schema())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Load(_)));
    }

    #[test]
    fn test_keyword_query_falls_back_when_blank() {
        let empty = KeywordRecord::empty(&schema());
        assert_eq!(keyword_query(&empty), FALLBACK_QUERY);
    }
}
