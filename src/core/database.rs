use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use crate::analysis::analyzer::AnalyzerRegistry;
use crate::core::config::{Config, DatabaseConfig};
use crate::core::error::Result;
use crate::core::identifier::{IdentifierAssigner, InsertConfig};
use crate::core::stats::DatabaseStats;
use crate::core::types::{DocId, Document};
use crate::index::index_writer::IndexWriter;
use crate::index::posting::PostingList;
use crate::schema::schema::SchemaRegistry;
use crate::schema::validator::DocumentValidator;
use crate::writer::batch::{BatchOptions, BatchOutcome, BatchScheduler};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    pub id: DocId,
}

/// One database instance: schema, committed ids, index and stored documents.
///
/// Writes take `&mut self`, so a single caller (or a single running batch)
/// holds exclusive write access for as long as it runs.
pub struct Database {
    config: Config,
    schema: Arc<SchemaRegistry>,
    ids: IdentifierAssigner,
    writer: IndexWriter,
    documents: HashMap<DocId, Document>,
    created_at: DateTime<Utc>,
}

impl Database {
    pub fn create(config: DatabaseConfig) -> Result<Self> {
        let analyzers = AnalyzerRegistry::new(config.config.max_token_length);
        Self::create_with_analyzers(config, &analyzers)
    }

    /// Build the schema from a JSON mapping such as `{"title": "string"}`.
    pub fn create_from_json(schema: &Value, config: Config) -> Result<Self> {
        let schema = SchemaRegistry::from_json(schema)?;
        Self::create(DatabaseConfig::new(schema).with_config(config))
    }

    /// Like [`Database::create`], resolving `config.analyzer` in `analyzers`.
    pub fn create_with_analyzers(
        config: DatabaseConfig,
        analyzers: &AnalyzerRegistry,
    ) -> Result<Self> {
        let DatabaseConfig { schema, config } = config;
        config.validate()?;

        let analyzer = analyzers.resolve(&config.analyzer)?;
        let schema = Arc::new(schema);
        let writer = IndexWriter::new(&schema, analyzer);

        info!(
            fields = schema.len(),
            indexed_fields = writer.indexed_fields().count(),
            analyzer = %config.analyzer,
            "database created"
        );

        Ok(Database {
            ids: IdentifierAssigner::new(config.id_generation_attempts),
            config,
            schema,
            writer,
            documents: HashMap::new(),
            created_at: Utc::now(),
        })
    }

    /// Assign an id, validate against the schema, index and store `document`.
    ///
    /// Nothing is committed when any step fails.
    pub fn insert(&mut self, document: Document, insert_config: &InsertConfig) -> Result<InsertResult> {
        let id = self.ids.assign(&document, insert_config)?;

        let indexed = DocumentValidator::validate(&document, &self.schema)
            .and_then(|view| self.writer.insert(&id, &view));
        if let Err(err) = indexed {
            warn!(doc_id = %id, error = %err, "insertion rejected");
            return Err(err);
        }

        self.ids.commit(id.clone());
        self.documents.insert(id.clone(), document);
        debug!(doc_id = %id, total = self.documents.len(), "document inserted");

        Ok(InsertResult { id })
    }

    pub fn insert_json(&mut self, document: Value, insert_config: &InsertConfig) -> Result<InsertResult> {
        self.insert(Document::from_json(document)?, insert_config)
    }

    /// Insert `documents` in order, yielding to the runtime every `options.batch_size`
    /// insertions (`Config::batch_size` when `options` is `None`).
    ///
    /// Not atomic: on failure the error names the position of the failing
    /// document, everything before it stays committed and nothing after it is
    /// attempted. Dropping the future at a yield point behaves the same way.
    pub async fn insert_batch<I>(
        &mut self,
        documents: I,
        insert_config: &InsertConfig,
        options: Option<BatchOptions>,
    ) -> Result<Vec<DocId>>
    where
        I: IntoIterator<Item = Document>,
    {
        let outcome = self.run_batch(documents, insert_config, options).await?;
        Ok(outcome.ids)
    }

    /// [`Database::insert_batch`] that also reports where the scheduler yielded.
    pub async fn run_batch<I>(
        &mut self,
        documents: I,
        insert_config: &InsertConfig,
        options: Option<BatchOptions>,
    ) -> Result<BatchOutcome>
    where
        I: IntoIterator<Item = Document>,
    {
        let scheduler = BatchScheduler::new(self.batch_options(options))?;
        scheduler
            .run(documents, |document| {
                self.insert(document, insert_config).map(|result| result.id)
            })
            .await
    }

    /// Batch insertion over raw JSON values; a non-object value fails the
    /// batch at its position like any other invalid document.
    pub async fn insert_batch_json<I>(
        &mut self,
        documents: I,
        insert_config: &InsertConfig,
        options: Option<BatchOptions>,
    ) -> Result<Vec<DocId>>
    where
        I: IntoIterator<Item = Value>,
    {
        let scheduler = BatchScheduler::new(self.batch_options(options))?;
        let outcome = scheduler
            .run(documents, |value| {
                self.insert_json(value, insert_config).map(|result| result.id)
            })
            .await?;
        Ok(outcome.ids)
    }

    fn batch_options(&self, options: Option<BatchOptions>) -> BatchOptions {
        options.unwrap_or(BatchOptions {
            batch_size: self.config.batch_size,
        })
    }

    /// Remove a document from the index, the id set and the store.
    pub fn remove(&mut self, id: &DocId) -> Result<bool> {
        if self.documents.remove(id).is_none() {
            return Ok(false);
        }
        self.writer.remove(id);
        self.ids.release(id);
        debug!(doc_id = %id, "document removed");
        Ok(true)
    }

    /// The full stored record, including fields the schema does not know.
    pub fn get(&self, id: &DocId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn contains(&self, id: &DocId) -> bool {
        self.ids.contains(id)
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    /// Posting list for an already analyzed term of a string field.
    pub fn postings(&self, field: &str, term: &str) -> Option<&PostingList> {
        self.writer.postings(field, term)
    }

    /// Ids whose `field` contains every term of `text` once analyzed.
    pub fn lookup(&self, field: &str, text: &str) -> Result<Vec<DocId>> {
        self.writer.lookup(field, text)
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn index(&self) -> &IndexWriter {
        &self.writer
    }

    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            total_documents: self.documents.len(),
            indexed_fields: self.writer.indexed_fields().count(),
            total_terms: self.writer.total_terms(),
            total_postings: self.writer.total_postings(),
            created_at: self.created_at,
        }
    }
}
