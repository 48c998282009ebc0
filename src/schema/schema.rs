use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use crate::core::error::{Error, Result};
use crate::core::types::ValueKind;

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }

    /// Whether a runtime value of `kind` satisfies this declaration.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (FieldType::String, ValueKind::String)
                | (FieldType::Number, ValueKind::Number)
                | (FieldType::Boolean, ValueKind::Boolean)
        )
    }

    /// Only string fields feed the inverted index.
    pub fn is_indexed(&self) -> bool {
        matches!(self, FieldType::String)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "boolean" => Ok(FieldType::Boolean),
            other => Err(Error::Schema(format!("unsupported field type '{}'", other))),
        }
    }
}

/// Field name to declared type mapping of one database instance.
///
/// There is no way to change a registry once it is built, so every validation
/// decision made against it holds for the lifetime of the database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, FieldType>", into = "BTreeMap<String, FieldType>")]
pub struct SchemaRegistry {
    fields: BTreeMap<String, FieldType>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Build from `(name, type name)` pairs, e.g. `[("title", "string")]`.
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = SchemaBuilder::default();
        for (name, type_name) in declarations {
            builder = builder.add_field(name, type_name.parse()?);
        }
        builder.build()
    }

    /// Build from a JSON object such as `{"title": "string", "year": "number"}`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::Schema(format!("schema must be an object, got {}", ValueKind::of(value)))
        })?;

        let mut builder = SchemaBuilder::default();
        for (name, declared) in object {
            let type_name = declared.as_str().ok_or_else(|| {
                Error::Schema(format!(
                    "field '{}' must declare its type as a string, got {}",
                    name,
                    ValueKind::of(declared)
                ))
            })?;
            builder = builder.add_field(name, type_name.parse()?);
        }
        builder.build()
    }

    pub fn type_of(&self, field_name: &str) -> Option<FieldType> {
        self.fields.get(field_name).copied()
    }

    pub fn contains(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Names of the fields that end up in the inverted index.
    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> {
        self.fields()
            .filter(|(_, ty)| ty.is_indexed())
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<BTreeMap<String, FieldType>> for SchemaRegistry {
    type Error = Error;

    fn try_from(fields: BTreeMap<String, FieldType>) -> Result<Self> {
        fields
            .into_iter()
            .fold(SchemaBuilder::default(), |builder, (name, ty)| builder.add_field(&name, ty))
            .build()
    }
}

impl From<SchemaRegistry> for BTreeMap<String, FieldType> {
    fn from(schema: SchemaRegistry) -> Self {
        schema.fields
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<(String, FieldType)>,
}

impl SchemaBuilder {
    pub fn add_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push((name.to_string(), field_type));
        self
    }

    pub fn add_string_field(self, name: &str) -> Self {
        self.add_field(name, FieldType::String)
    }

    pub fn add_number_field(self, name: &str) -> Self {
        self.add_field(name, FieldType::Number)
    }

    pub fn add_boolean_field(self, name: &str) -> Self {
        self.add_field(name, FieldType::Boolean)
    }

    pub fn build(self) -> Result<SchemaRegistry> {
        let mut fields = BTreeMap::new();
        for (name, field_type) in self.fields {
            if name.is_empty() {
                return Err(Error::Schema("field names must not be empty".to_string()));
            }
            if let Some(previous) = fields.insert(name.clone(), field_type) {
                if previous != field_type {
                    return Err(Error::Schema(format!(
                        "field '{}' declared as both {} and {}",
                        name, previous, field_type
                    )));
                }
            }
        }
        Ok(SchemaRegistry { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn type_lookup() {
        let schema = SchemaRegistry::from_declarations([("title", "string"), ("year", "number")])
            .unwrap();

        assert_eq!(schema.type_of("title"), Some(FieldType::String));
        assert_eq!(schema.type_of("year"), Some(FieldType::Number));
        assert_eq!(schema.type_of("author"), None);
        assert_eq!(schema.indexed_fields().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn unsupported_types_are_schema_errors() {
        let err = SchemaRegistry::from_json(&json!({"tags": "array"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.to_string(), "schema error: unsupported field type 'array'");

        let err = SchemaRegistry::from_json(&json!({"author": {"name": "string"}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);

        let err = SchemaRegistry::from_json(&json!(["title"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn conflicting_and_empty_names() {
        let err = SchemaRegistry::builder()
            .add_string_field("title")
            .add_number_field("title")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);

        let err = SchemaRegistry::builder().add_boolean_field("").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn empty_schema_is_legal() {
        let schema = SchemaRegistry::from_json(&json!({})).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.indexed_fields().count(), 0);
    }

    #[test]
    fn serde_goes_through_validation() {
        let schema = SchemaRegistry::builder()
            .add_string_field("title")
            .add_boolean_field("draft")
            .build()
            .unwrap();
        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(encoded, json!({"draft": "boolean", "title": "string"}));

        let decoded: SchemaRegistry = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, schema);

        assert!(serde_json::from_value::<SchemaRegistry>(json!({"x": "date"})).is_err());
        assert!(serde_json::from_value::<SchemaRegistry>(json!({"": "string"})).is_err());
    }

    #[test]
    fn accepts_matches_runtime_kinds() {
        assert!(FieldType::String.accepts(ValueKind::String));
        assert!(!FieldType::Number.accepts(ValueKind::String));
        assert!(!FieldType::Boolean.accepts(ValueKind::Null));
    }
}
