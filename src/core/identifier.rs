use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, Document, ID_FIELD};

/// Caller-supplied function deriving an identifier from the full document.
pub type IdDerivation = Arc<dyn Fn(&Document) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub enum IdStrategy {
    Fixed(String),
    Derive(IdDerivation),
}

impl fmt::Debug for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdStrategy::Fixed(id) => f.debug_tuple("Fixed").field(id).finish(),
            IdStrategy::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Per-insertion options.
#[derive(Debug, Clone, Default)]
pub struct InsertConfig {
    pub id: Option<IdStrategy>,
}

impl InsertConfig {
    pub fn with_id(id: impl Into<String>) -> Self {
        InsertConfig {
            id: Some(IdStrategy::Fixed(id.into())),
        }
    }

    pub fn derive_id<F>(derive: F) -> Self
    where
        F: Fn(&Document) -> Option<String> + Send + Sync + 'static,
    {
        InsertConfig {
            id: Some(IdStrategy::Derive(Arc::new(derive))),
        }
    }
}

/// Hands out identifiers and remembers which ones are committed.
#[derive(Debug)]
pub struct IdentifierAssigner {
    committed: HashSet<DocId>,
    generation_attempts: usize,
}

impl IdentifierAssigner {
    pub fn new(generation_attempts: usize) -> Self {
        IdentifierAssigner {
            committed: HashSet::new(),
            generation_attempts: generation_attempts.max(1),
        }
    }

    /// Resolve the identifier for `document` and check it is not taken.
    ///
    /// Nothing is registered here; the caller commits the id once the rest of
    /// the insertion succeeded.
    pub fn assign(&self, document: &Document, config: &InsertConfig) -> Result<DocId> {
        let explicit = match &config.id {
            Some(IdStrategy::Fixed(id)) => Some(Self::non_empty(id.clone())?),
            Some(IdStrategy::Derive(derive)) => {
                let id = (**derive)(document).ok_or_else(|| {
                    Error::InvalidConfig("id derivation returned no identifier".to_string())
                })?;
                Some(Self::non_empty(id)?)
            }
            // An empty or non-string `id` field does not name the document.
            None => document
                .get_text(ID_FIELD)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        };

        match explicit {
            Some(id) => {
                let id = DocId(id);
                if self.committed.contains(&id) {
                    return Err(Error::DuplicateId(id));
                }
                Ok(id)
            }
            None => self.generate(),
        }
    }

    fn non_empty(id: String) -> Result<String> {
        if id.is_empty() {
            return Err(Error::InvalidConfig("document identifier must not be empty".to_string()));
        }
        Ok(id)
    }

    fn generate(&self) -> Result<DocId> {
        let mut last = None;
        for _ in 0..self.generation_attempts {
            let id = DocId(Uuid::new_v4().simple().to_string());
            if !self.committed.contains(&id) {
                return Ok(id);
            }
            last = Some(id);
        }
        // Only reachable when every attempt collided.
        Err(Error::DuplicateId(last.unwrap_or_else(|| DocId::from(""))))
    }

    /// Returns `false` if `id` was already committed.
    pub fn commit(&mut self, id: DocId) -> bool {
        self.committed.insert(id)
    }

    pub fn release(&mut self, id: &DocId) -> bool {
        self.committed.remove(id)
    }

    pub fn contains(&self, id: &DocId) -> bool {
        self.committed.contains(id)
    }
}
