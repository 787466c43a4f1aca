//! LanceDB-backed evidence index.

use super::{EvidenceIndex, PASSAGES_TABLE};
use crate::embeddings::EmbeddingProvider;
use crate::types::Passage;
use arrow_array::{Array, Float32Array, RecordBatch, StringArray};
use assist_core::{AppError, AppResult};
use async_trait::async_trait;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::Table;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Column LanceDB adds to vector search results.
const DISTANCE_COLUMN: &str = "_distance";

/// Read-only view of the `passages` table.
///
/// The connection is opened on the first search; concurrent first callers
/// wait on the same initialization.
pub struct LanceEvidenceIndex {
    db_path: PathBuf,
    embedder: Arc<dyn EmbeddingProvider>,
    table: OnceCell<Table>,
}

impl LanceEvidenceIndex {
    pub fn new(db_path: PathBuf, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            db_path,
            embedder,
            table: OnceCell::new(),
        }
    }

    async fn table(&self) -> AppResult<&Table> {
        self.table.get_or_try_init(|| self.open_table()).await
    }

    async fn open_table(&self) -> AppResult<Table> {
        if !self.db_path.exists() {
            return Err(AppError::Index(format!(
                "Evidence index not found at {:?}",
                self.db_path
            )));
        }

        let uri = self.db_path.to_string_lossy().to_string();
        let conn = lancedb::connect(&uri)
            .execute()
            .await
            .map_err(|e| AppError::Index(format!("Failed to connect to LanceDB: {}", e)))?;

        let table = conn
            .open_table(PASSAGES_TABLE)
            .execute()
            .await
            .map_err(|e| {
                AppError::Index(format!("Failed to open table '{}': {}", PASSAGES_TABLE, e))
            })?;

        tracing::debug!("Opened LanceDB index at {:?}", self.db_path);
        Ok(table)
    }
}

#[async_trait]
impl EvidenceIndex for LanceEvidenceIndex {
    fn backend_name(&self) -> &str {
        "lancedb"
    }

    async fn similarity_search_with_score(&self, query: &str, k: usize) -> AppResult<Vec<Passage>> {
        let table = self.table().await?;
        let query_vec = self.embedder.embed(query).await?;

        let batches: Vec<RecordBatch> = table
            .query()
            .nearest_to(query_vec)
            .map_err(|e| AppError::Index(format!("Failed to create query: {}", e)))?
            .limit(k)
            .execute()
            .await
            .map_err(|e| AppError::Index(format!("Failed to execute search: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| AppError::Index(format!("Failed to collect results: {}", e)))?;

        let mut passages = Vec::new();
        for batch in &batches {
            passages.extend(batch_to_passages(batch)?);
        }

        tracing::debug!("LanceDB returned {} passages (k={})", passages.len(), k);
        Ok(passages)
    }

    async fn count(&self) -> AppResult<usize> {
        self.table()
            .await?
            .count_rows(None)
            .await
            .map_err(|e| AppError::Index(format!("Failed to count rows: {}", e)))
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> AppResult<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| AppError::Index(format!("Invalid or missing '{}' column", name)))
}

fn batch_to_passages(batch: &RecordBatch) -> AppResult<Vec<Passage>> {
    let text = string_column(batch, "text")?;
    let source = string_column(batch, "source")?;
    let distance = batch
        .column_by_name(DISTANCE_COLUMN)
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
        .ok_or_else(|| AppError::Index(format!("Invalid or missing '{}' column", DISTANCE_COLUMN)))?;

    Ok((0..batch.num_rows())
        .map(|row| {
            let src = (!source.is_null(row))
                .then(|| source.value(row))
                .filter(|s| !s.is_empty())
                .map(String::from);
            Passage::new(text.value(row), src, distance.value(row))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::MockProvider;
    use arrow_array::{FixedSizeListArray, RecordBatchIterator};
    use arrow_schema::{DataType, Field, Schema};
    use tempfile::TempDir;

    const DIMS: usize = 64;

    async fn build_table(dir: &TempDir, docs: &[(&str, Option<&str>)]) -> PathBuf {
        let embedder = MockProvider::new(DIMS);
        let item = Arc::new(Field::new("item", DataType::Float32, true));
        let schema = Arc::new(Schema::new(vec![
            Field::new("text", DataType::Utf8, false),
            Field::new("source", DataType::Utf8, true),
            Field::new(
                "embedding",
                DataType::FixedSizeList(item.clone(), DIMS as i32),
                false,
            ),
        ]));

        let mut values = Vec::new();
        for (text, _) in docs {
            values.extend(embedder.embed(text).await.unwrap());
        }

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(
                    docs.iter().map(|(t, _)| *t).collect::<Vec<_>>(),
                )),
                Arc::new(StringArray::from(
                    docs.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
                )),
                Arc::new(FixedSizeListArray::new(
                    item,
                    DIMS as i32,
                    Arc::new(Float32Array::from(values)),
                    None,
                )),
            ],
        )
        .unwrap();

        let path = dir.path().join("vector_index");
        let conn = lancedb::connect(&path.to_string_lossy())
            .execute()
            .await
            .unwrap();
        conn.create_table(
            PASSAGES_TABLE,
            RecordBatchIterator::new(vec![Ok(batch)], schema),
        )
        .execute()
        .await
        .unwrap();

        path
    }

    #[tokio::test]
    async fn test_search_returns_nearest_with_sources() {
        let temp = TempDir::new().unwrap();
        let path = build_table(
            &temp,
            &[
                ("Calibration of weighing scales takes three days.", Some("faq.pdf")),
                ("Scholarship grants open every semester.", Some("scholarship.pdf")),
                ("Holiday schedule for regional offices.", None),
            ],
        )
        .await;

        let index = LanceEvidenceIndex::new(path, Arc::new(MockProvider::new(DIMS)));
        let results = index
            .similarity_search_with_score("calibration of weighing scales", 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source.as_deref(), Some("faq.pdf"));
        assert!(results[0].score <= results[1].score);
        assert_eq!(index.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_index_directory() {
        let temp = TempDir::new().unwrap();
        let index = LanceEvidenceIndex::new(
            temp.path().join("absent"),
            Arc::new(MockProvider::new(DIMS)),
        );
        let result = index.similarity_search_with_score("hi", 8).await;
        assert!(matches!(result, Err(AppError::Index(_))));
    }
}
