use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, Result};
use crate::core::types::DocId;
use crate::index::inverted::InvertedIndex;
use crate::index::posting::PostingList;
use crate::schema::schema::SchemaRegistry;
use crate::schema::validator::IndexableView;

/// Terms one document contributed to one field.
type FieldTerms = (String, Vec<String>);

/// Owns the per-field inverted indexes of a database instance.
pub struct IndexWriter {
    fields: BTreeMap<String, InvertedIndex>,
    analyzer: Arc<Analyzer>,
    doc_terms: HashMap<DocId, Vec<FieldTerms>>,
}

impl IndexWriter {
    /// One empty index per string field of `schema`.
    pub fn new(schema: &SchemaRegistry, analyzer: Arc<Analyzer>) -> Self {
        let fields = schema
            .indexed_fields()
            .map(|name| (name.to_string(), InvertedIndex::new()))
            .collect();

        IndexWriter {
            fields,
            analyzer,
            doc_terms: HashMap::new(),
        }
    }

    /// Write every field of `view` under `doc_id`.
    ///
    /// All or nothing: if any field fails to tokenize, the fields already
    /// written for this call are removed again before the error is returned.
    pub fn insert(&mut self, doc_id: &DocId, view: &IndexableView<'_>) -> Result<()> {
        if self.doc_terms.contains_key(doc_id) {
            return Err(Error::DuplicateId(doc_id.clone()));
        }

        let mut written: Vec<FieldTerms> = Vec::with_capacity(view.len());

        for (field, value) in view.iter() {
            let tokens = match self.analyzer.analyze(value) {
                Ok(tokens) => tokens,
                Err(err) => {
                    self.rollback(doc_id, &written);
                    debug!(doc_id = %doc_id, field, rolled_back = written.len(), "tokenization failed");
                    return Err(Error::Tokenize {
                        field: field.to_string(),
                        reason: err.to_string(),
                    });
                }
            };

            let terms = self
                .fields
                .entry(field.to_string())
                .or_default()
                .add_document(doc_id, &tokens);
            trace!(doc_id = %doc_id, field, terms = terms.len(), "field indexed");
            written.push((field.to_string(), terms));
        }

        self.doc_terms.insert(doc_id.clone(), written);
        Ok(())
    }

    fn rollback(&mut self, doc_id: &DocId, written: &[FieldTerms]) {
        for (field, terms) in written {
            if let Some(index) = self.fields.get_mut(field) {
                index.remove_document(doc_id, terms);
            }
        }
    }

    /// Strip `doc_id` from every posting list. Returns `false` if it was never indexed.
    pub fn remove(&mut self, doc_id: &DocId) -> bool {
        match self.doc_terms.remove(doc_id) {
            Some(written) => {
                self.rollback(doc_id, &written);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, doc_id: &DocId) -> bool {
        self.doc_terms.contains_key(doc_id)
    }

    /// Posting list of an already analyzed term.
    pub fn postings(&self, field: &str, term: &str) -> Option<&PostingList> {
        self.fields.get(field).and_then(|index| index.search_term(term))
    }

    /// Documents whose `field` contains every term `text` analyzes to.
    pub fn lookup(&self, field: &str, text: &str) -> Result<Vec<DocId>> {
        let Some(index) = self.fields.get(field) else {
            return Ok(Vec::new());
        };

        let tokens = self.analyzer.analyze(text)?;
        let mut lists = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match index.search_term(&token.text) {
                Some(list) => lists.push(list),
                None => return Ok(Vec::new()),
            }
        }

        // Start from the rarest term to keep the intersection small.
        lists.sort_by_key(|list| list.len());
        let Some((first, rest)) = lists.split_first() else {
            return Ok(Vec::new());
        };

        let mut result: Vec<DocId> = first.doc_ids().cloned().collect();
        for list in rest {
            if result.is_empty() {
                break;
            }
            result = list.intersect(&result);
        }
        Ok(result)
    }

    pub fn field(&self, name: &str) -> Option<&InvertedIndex> {
        self.fields.get(name)
    }

    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn total_terms(&self) -> usize {
        self.fields.values().map(InvertedIndex::term_count).sum()
    }

    pub fn total_postings(&self) -> usize {
        self.fields.values().map(InvertedIndex::posting_count).sum()
    }
}
