use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Snapshot of a database instance for monitoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub total_documents: usize,
    pub indexed_fields: usize,   // String fields with an inverted index
    pub total_terms: usize,      // Distinct terms summed over fields
    pub total_postings: usize,
    pub created_at: DateTime<Utc>,
}
