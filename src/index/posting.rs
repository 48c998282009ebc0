use serde::{Serialize, Deserialize};
use crate::core::types::DocId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u32,       // Occurrences of the term in the field value
    pub positions: Vec<u32>,  // Token positions for phrase queries
}

/// Posting list for a term
/// Note: Sorted by doc_id for efficient merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingList {
    pub postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    pub fn add_posting(&mut self, posting: Posting) {
        match self.postings.binary_search_by(|p| p.doc_id.cmp(&posting.doc_id)) {
            Ok(pos) => self.postings[pos] = posting,
            Err(pos) => self.postings.insert(pos, posting),
        }
    }

    /// Returns `true` if the document had a posting here.
    pub fn remove(&mut self, doc_id: &DocId) -> bool {
        match self.postings.binary_search_by(|p| p.doc_id.cmp(doc_id)) {
            Ok(pos) => {
                self.postings.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn get(&self, doc_id: &DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by(|p| p.doc_id.cmp(doc_id))
            .ok()
            .map(|pos| &self.postings[pos])
    }

    pub fn contains(&self, doc_id: &DocId) -> bool {
        self.get(doc_id).is_some()
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = &DocId> {
        self.postings.iter().map(|p| &p.doc_id)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Ids present both here and in `doc_ids`, which must be sorted.
    /// Simple linear merge, so the result stays sorted as well.
    pub fn intersect(&self, doc_ids: &[DocId]) -> Vec<DocId> {
        let mut result = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < self.postings.len() && j < doc_ids.len() {
            let doc_id1 = &self.postings[i].doc_id;
            let doc_id2 = &doc_ids[j];

            if doc_id1 == doc_id2 {
                result.push(doc_id1.clone());
                i += 1;
                j += 1;
            } else if doc_id1 < doc_id2 {
                i += 1;
            } else {
                j += 1;
            }
        }

        result
    }
}
