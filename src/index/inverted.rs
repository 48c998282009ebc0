use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::analysis::token::Token;
use crate::core::types::DocId;
use crate::index::posting::{Posting, PostingList};

/// Inverted index of a single field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub postings: HashMap<String, PostingList>,
    pub doc_count: usize,
    pub total_tokens: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Add the tokens of one field value. Returns the distinct terms written.
    pub fn add_document(&mut self, doc_id: &DocId, tokens: &[Token]) -> Vec<String> {
        let mut term_positions: HashMap<&str, Vec<u32>> = HashMap::new();

        for token in tokens {
            term_positions.entry(token.text.as_str())
                .or_default()
                .push(token.position);
        }

        let mut terms = Vec::with_capacity(term_positions.len());
        for (term, positions) in term_positions {
            let posting = Posting {
                doc_id: doc_id.clone(),
                term_freq: positions.len() as u32,
                positions,
            };

            self.postings.entry(term.to_string())
                .or_default()
                .add_posting(posting);
            terms.push(term.to_string());
        }

        self.doc_count += 1;
        self.total_tokens += tokens.len();

        terms
    }

    /// Undo `add_document` for `doc_id`, given the terms it returned.
    pub fn remove_document(&mut self, doc_id: &DocId, terms: &[String]) {
        let mut removed_tokens = 0;

        for term in terms {
            let Some(list) = self.postings.get_mut(term) else {
                continue;
            };
            if let Some(posting) = list.get(doc_id) {
                removed_tokens += posting.term_freq as usize;
            }
            list.remove(doc_id);
            if list.is_empty() {
                self.postings.remove(term);
            }
        }

        self.doc_count = self.doc_count.saturating_sub(1);
        self.total_tokens = self.total_tokens.saturating_sub(removed_tokens);
    }

    pub fn search_term(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn posting_count(&self) -> usize {
        self.postings.values().map(PostingList::len).sum()
    }
}
