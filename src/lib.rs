pub mod core;
pub mod analysis;
pub mod schema;
pub mod index;
pub mod writer;

pub use crate::core::config::{Config, DatabaseConfig};
pub use crate::core::database::{Database, InsertResult};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::identifier::{IdStrategy, InsertConfig};
pub use crate::core::types::{DocId, Document, FieldValue, ValueKind};
pub use crate::schema::schema::{FieldType, SchemaRegistry};
pub use crate::writer::batch::{BatchOptions, BatchOutcome};

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                         LUMENDEX INSERTION PIPELINE                          │
└──────────────────────────────────────────────────────────────────────────────┘

  caller ──insert()──────────────────────────────┐
  caller ──insert_batch()──► BatchScheduler ─────┤   yield_now() every batch_size
                                                 ▼
                          ┌──────────────────────────────────────┐
                          │ struct Database                      │
                          │  config:    Config                   │
                          │  schema:    Arc<SchemaRegistry>      │  immutable
                          │  ids:       IdentifierAssigner       │  committed id set
                          │  writer:    IndexWriter              │  field → InvertedIndex
                          │  documents: HashMap<DocId, Document> │  full records
                          └──────────────────────────────────────┘

  insert(doc):
    1. IdentifierAssigner::assign     derive fn │ doc["id"] │ uuid v4   → DuplicateId
    2. DocumentValidator::validate    schema fields only                 → TypeMismatch
    3. IndexWriter::insert            Analyzer per string field          → Tokenize (rolled back)
    4. commit id + store record

  IndexWriter
    fields:    BTreeMap<String, InvertedIndex>
                 └─ postings: HashMap<term, PostingList>   sorted by DocId
    doc_terms: HashMap<DocId, Vec<(field, terms)>>          used by remove()
*/
