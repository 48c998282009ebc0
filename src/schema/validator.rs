use std::collections::BTreeMap;
use crate::core::error::{Error, Result};
use crate::core::types::{Document, FieldValue};
use crate::schema::schema::SchemaRegistry;

/// String-typed schema fields of a validated document, keyed by field name.
///
/// This is the only part of a document the index ever sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexableView<'a> {
    fields: BTreeMap<&'a str, &'a str>,
}

impl<'a> IndexableView<'a> {
    pub fn get(&self, field_name: &str) -> Option<&'a str> {
        self.fields.get(field_name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, *value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub struct DocumentValidator;

impl DocumentValidator {
    /// Check every schema field present in `document` against its declared type.
    ///
    /// Schema fields missing from the document are skipped. Fields unknown to
    /// the schema are neither checked nor returned.
    pub fn validate<'a>(
        document: &'a Document,
        schema: &'a SchemaRegistry,
    ) -> Result<IndexableView<'a>> {
        let mut view = IndexableView::default();

        for (field_name, declared) in schema.fields() {
            let Some(value) = document.classify(field_name) else {
                continue;
            };

            let actual = value.kind();
            if !declared.accepts(actual) {
                return Err(Error::TypeMismatch {
                    field: field_name.to_string(),
                    expected: declared,
                    actual,
                });
            }

            if let FieldValue::Text(text) = value {
                view.fields.insert(field_name, text);
            }
        }

        Ok(view)
    }
}
