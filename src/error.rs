//! Error taxonomy for schema loading and type extraction.
//!
//! Extraction failures are never fatal on their own: each one is recorded
//! next to a placeholder entry and surfaced once, joined, after the whole
//! schema has been walked.
use std::fmt;

use thiserror::Error;

/// Why a single schema kind could not be mapped to a target type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An object-kind node with no resolvable record name (an inline object
    /// that was never flattened).
    #[error("can't create an object of an empty subtype")]
    EmptyObject,

    /// A `$ref` whose target is not in the flattened collection.
    #[error("reference {0} does not resolve to a known type")]
    DanglingReference(String),

    /// An array whose `items` type could not itself be resolved.
    #[error("can't create an array of an empty subtype")]
    EmptyArrayElement,

    #[error("failed to get a primitive type for schemaType {kind:?} and subtype {subtype:?}")]
    UndefinedType { kind: String, subtype: String },
}

impl TypeError {
    /// Type string stored on the best-effort field that triggered this error.
    pub fn placeholder(&self) -> &'static str {
        match self {
            TypeError::EmptyArrayElement => "error_creating_array",
            TypeError::EmptyObject
            | TypeError::DanglingReference(_)
            | TypeError::UndefinedType { .. } => "undefined",
        }
    }
}

/// A [`TypeError`] tagged with the derived name of the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to get the type for {field} with error {source}")]
pub struct FieldError {
    pub field: String,
    #[source]
    pub source: TypeError,
}

/// Every failing field of one record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing types for {} in {id} with errors {fields}", join_field_names(.fields))]
pub struct RecordError {
    /// Pointer path of the record, e.g. `#/definitions/address`.
    pub id: String,
    pub fields: ErrorList<FieldError>,
}

fn join_field_names(fields: &ErrorList<FieldError>) -> String {
    fields.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(",")
}

/// Ordered collection of non-fatal errors, rendered comma-separated.
///
/// Insertion order is discovery order, which is deterministic because every
/// traversal iterates sorted keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList<E>(Vec<E>);

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E> ErrorList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: E) {
        self.0.push(err);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }

    /// `None` when nothing was recorded, so callers can treat the list as an
    /// optional aggregate error.
    pub fn into_option(self) -> Option<Self> {
        if self.0.is_empty() { None } else { Some(self) }
    }
}

impl<E: fmt::Display> fmt::Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl<E: std::error::Error> std::error::Error for ErrorList<E> {}

/// Failures loading a schema document before extraction starts.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("at JSON path {path} → {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_err(field: &str, source: TypeError) -> FieldError {
        FieldError { field: field.to_string(), source }
    }

    #[test]
    fn empty_list_is_no_error() {
        let errs = ErrorList::<FieldError>::new();
        assert!(errs.is_empty());
        assert!(errs.into_option().is_none());
    }

    #[test]
    fn list_joins_in_insertion_order() {
        let mut errs = ErrorList::new();
        errs.push(field_err("Zeta", TypeError::EmptyArrayElement));
        errs.push(field_err("Alpha", TypeError::EmptyObject));
        let msg = errs.to_string();
        assert_eq!(
            msg,
            "failed to get the type for Zeta with error can't create an array of an empty subtype, \
             failed to get the type for Alpha with error can't create an object of an empty subtype"
        );
    }

    #[test]
    fn record_error_names_every_failing_field() {
        let mut fields = ErrorList::new();
        fields.push(field_err("Owner", TypeError::DanglingReference("#/definitions/person".into())));
        fields.push(field_err("Kind", TypeError::UndefinedType { kind: "tuple".into(), subtype: String::new() }));
        let err = RecordError { id: "#/definitions/pet".into(), fields };
        let msg = err.to_string();
        assert!(msg.starts_with("missing types for Owner,Kind in #/definitions/pet with errors "), "{msg}");
        assert!(msg.contains("#/definitions/person"));
        assert!(msg.contains("\"tuple\""));
    }

    #[test]
    fn placeholders_match_error_kind() {
        assert_eq!(TypeError::EmptyArrayElement.placeholder(), "error_creating_array");
        assert_eq!(TypeError::EmptyObject.placeholder(), "undefined");
    }
}
