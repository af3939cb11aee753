//! JSON Schema input boundary.
//!
//! Only the keywords the extractor inspects are kept: kind, properties,
//! items, `$ref`, required, title/description, definitions/`$defs` and the
//! string/number/array constraints. Everything else in the document is
//! ignored.
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SchemaError;

/// Flattened view of a document: canonical pointer path → object-bearing node.
pub type TypeIndex<'a> = IndexMap<String, &'a SchemaNode>;

pub const ROOT_PATH: &str = "#";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct SchemaNode {
    /// Primitive kind: object/array/string/integer/number/boolean/null, or
    /// empty when the document doesn't say.
    pub kind: String,
    pub properties: IndexMap<String, SchemaNode>,
    pub items: Option<Box<SchemaNode>>,
    /// Pointer path of a `$ref`, empty when absent.
    pub reference: String,
    pub required: Vec<String>,
    pub title: String,
    pub description: String,
    pub definitions: IndexMap<String, SchemaNode>,
    /// `$defs`, kept apart so `#/$defs/<name>` references resolve.
    pub defs: IndexMap<String, SchemaNode>,

    pub min_length: u64,
    pub max_length: u64,
    pub pattern: String,

    pub multiple_of: f64,
    pub minimum: Option<f64>,
    pub exclusive_minimum: bool,
    pub maximum: Option<f64>,
    pub exclusive_maximum: bool,

    pub min_items: u64,
    pub max_items: u64,
}

// ————————————————————————————————————————————————————————————————————————————
// DESERIALIZATION
// ————————————————————————————————————————————————————————————————————————————

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKind {
    One(String),
    Many(Vec<String>),
}

/// draft-04 uses a flag next to `minimum`; draft-06+ carries the bound itself.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExclusive {
    Flag(bool),
    Bound(f64),
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type")]
    kind: Option<RawKind>,
    properties: IndexMap<String, SchemaNode>,
    items: Option<Box<SchemaNode>>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    required: Vec<String>,
    title: Option<String>,
    description: Option<String>,
    definitions: IndexMap<String, SchemaNode>,
    #[serde(rename = "$defs")]
    defs: IndexMap<String, SchemaNode>,
    min_length: Option<u64>,
    max_length: Option<u64>,
    pattern: Option<String>,
    multiple_of: Option<f64>,
    minimum: Option<f64>,
    exclusive_minimum: Option<RawExclusive>,
    maximum: Option<f64>,
    exclusive_maximum: Option<RawExclusive>,
    min_items: Option<u64>,
    max_items: Option<u64>,
}

impl From<RawNode> for SchemaNode {
    fn from(raw: RawNode) -> Self {
        let kind = match raw.kind {
            Some(RawKind::One(k)) => k,
            // ["string", "null"] → "string"; ["null"] → "null"
            Some(RawKind::Many(ks)) => ks
                .iter()
                .find(|k| k.as_str() != "null")
                .or_else(|| ks.first())
                .cloned()
                .unwrap_or_default(),
            None if !raw.properties.is_empty() => "object".to_string(),
            None => String::new(),
        };

        let mut minimum = raw.minimum;
        let exclusive_minimum = match raw.exclusive_minimum {
            Some(RawExclusive::Flag(flag)) => flag,
            Some(RawExclusive::Bound(bound)) => {
                minimum = Some(bound);
                true
            }
            None => false,
        };
        let mut maximum = raw.maximum;
        let exclusive_maximum = match raw.exclusive_maximum {
            Some(RawExclusive::Flag(flag)) => flag,
            Some(RawExclusive::Bound(bound)) => {
                maximum = Some(bound);
                true
            }
            None => false,
        };

        SchemaNode {
            kind,
            properties: raw.properties,
            items: raw.items,
            reference: raw.reference.unwrap_or_default(),
            required: raw.required,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            definitions: raw.definitions,
            defs: raw.defs,
            min_length: raw.min_length.unwrap_or_default(),
            max_length: raw.max_length.unwrap_or_default(),
            pattern: raw.pattern.unwrap_or_default(),
            multiple_of: raw.multiple_of.unwrap_or_default(),
            minimum,
            exclusive_minimum,
            maximum,
            exclusive_maximum,
            min_items: raw.min_items.unwrap_or_default(),
            max_items: raw.max_items.unwrap_or_default(),
        }
    }
}

impl SchemaNode {
    pub fn parse(src: &str) -> Result<Self, SchemaError> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        crate::path_de::from_value_with_path(value)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let src = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&src)
    }

    pub fn is_object(&self) -> bool {
        self.kind == "object" || !self.properties.is_empty()
    }

    /// Flatten the document rooted at `self` into every object-bearing node,
    /// keyed by pointer path.
    pub fn extract_types(&self) -> TypeIndex<'_> {
        let mut types = TypeIndex::new();
        collect_types(ROOT_PATH.to_string(), self, &mut types);
        types
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FLATTENING
// ————————————————————————————————————————————————————————————————————————————

/// Arrays register nothing themselves: their `items` are visited under the
/// array's own path, so an array of objects is found where the field
/// resolver looks for an embedded object (`<parent>/properties/<name>`).
fn collect_types<'a>(path: String, node: &'a SchemaNode, types: &mut TypeIndex<'a>) {
    if node.kind == "array" {
        if let Some(items) = node.items.as_deref() {
            collect_types(path, items, types);
        }
        return;
    }

    for (name, child) in &node.definitions {
        collect_types(child_path(&path, "definitions", name), child, types);
    }
    for (name, child) in &node.defs {
        collect_types(child_path(&path, "$defs", name), child, types);
    }
    for (name, child) in &node.properties {
        collect_types(child_path(&path, "properties", name), child, types);
    }

    if node.is_object() {
        types.insert(path, node);
    }
}

/// `<parent>/<keyword>/<name>` with `name` escaped as a JSON Pointer token.
pub fn child_path(parent: &str, keyword: &str, name: &str) -> String {
    format!("{parent}/{keyword}/{}", escape_token(name))
}

/// RFC 6901: `~` → `~0`, `/` → `~1`.
pub fn escape_token(name: &str) -> String {
    name.replace('~', "~0").replace('/', "~1")
}

pub fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(v: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(v).unwrap()
    }

    #[test]
    fn reads_inspected_keywords() {
        let n = node(json!({
            "title": "Thing",
            "type": "object",
            "required": ["a"],
            "properties": {
                "a": { "type": "string", "minLength": 2, "maxLength": 5, "pattern": "^x" },
                "b": { "type": "number", "multipleOf": 0.5, "maximum": 10, "exclusiveMaximum": true },
                "c": { "type": "array", "items": { "type": "integer" }, "minItems": 1, "maxItems": 3 },
                "d": { "$ref": "#/definitions/other" }
            },
            "uniqueItems": true
        }));
        assert_eq!(n.kind, "object");
        assert_eq!(n.title, "Thing");
        assert_eq!(n.required, vec!["a"]);
        let a = &n.properties["a"];
        assert_eq!((a.min_length, a.max_length, a.pattern.as_str()), (2, 5, "^x"));
        let b = &n.properties["b"];
        assert_eq!(b.multiple_of, 0.5);
        assert_eq!(b.maximum, Some(10.0));
        assert!(b.exclusive_maximum);
        assert_eq!(b.minimum, None);
        let c = &n.properties["c"];
        assert_eq!((c.min_items, c.max_items), (1, 3));
        assert_eq!(c.items.as_ref().unwrap().kind, "integer");
        assert_eq!(n.properties["d"].reference, "#/definitions/other");
        assert_eq!(n.properties["d"].kind, "");
    }

    #[test]
    fn numeric_exclusive_bounds_set_the_limit() {
        let n = node(json!({ "type": "integer", "exclusiveMinimum": 3, "exclusiveMaximum": 9 }));
        assert_eq!(n.minimum, Some(3.0));
        assert!(n.exclusive_minimum);
        assert_eq!(n.maximum, Some(9.0));
        assert!(n.exclusive_maximum);
    }

    #[test]
    fn kind_lists_and_implicit_objects() {
        assert_eq!(node(json!({ "type": ["null", "string"] })).kind, "string");
        assert_eq!(node(json!({ "type": ["null"] })).kind, "null");
        assert_eq!(node(json!({ "properties": { "x": { "type": "boolean" } } })).kind, "object");
    }

    #[test]
    fn defs_flatten_under_their_own_keyword() {
        let n = node(json!({
            "definitions": { "a": { "type": "object" } },
            "$defs": { "b": { "type": "object" } }
        }));
        assert_eq!(n.definitions.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(n.defs.keys().collect::<Vec<_>>(), vec!["b"]);

        let types = n.extract_types();
        assert!(types.contains_key("#/definitions/a"));
        assert!(types.contains_key("#/$defs/b"));
    }

    #[test]
    fn names_are_escaped_as_pointer_tokens() {
        let n = node(json!({
            "type": "object",
            "properties": { "a/b": { "type": "object" } },
            "definitions": { "x~y": { "type": "object" } }
        }));
        let types = n.extract_types();
        assert!(types.contains_key("#/properties/a~1b"));
        assert!(types.contains_key("#/definitions/x~0y"));
        assert_eq!(escape_token("~/"), "~0~1");
        assert_eq!(unescape_token("~01"), "~1");
        assert_eq!(unescape_token(&escape_token("a/~b")), "a/~b");
    }

    #[test]
    fn flattening_registers_nested_objects_and_array_items() {
        let n = node(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "address": {
                    "type": "object",
                    "properties": {
                        "geo": { "type": "object", "properties": { "lat": { "type": "number" } } }
                    }
                },
                "pets": { "type": "array", "items": { "type": "object", "properties": { "kind": { "type": "string" } } } },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "definitions": {
                "person": { "type": "object", "properties": { "name": { "type": "string" } } },
                "code": { "type": "string" }
            }
        }));
        let types = n.extract_types();
        let mut keys: Vec<&str> = types.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "#",
                "#/definitions/person",
                "#/properties/address",
                "#/properties/address/properties/geo",
                "#/properties/pets",
            ]
        );
        assert_eq!(types["#/properties/pets"].properties.len(), 1);
    }

    #[test]
    fn primitive_root_registers_nothing() {
        let n = node(json!({ "type": "string" }));
        assert!(n.extract_types().is_empty());
    }
}
