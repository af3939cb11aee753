use crate::schema::{ROOT_PATH, SchemaNode, unescape_token};

const SEPARATORS: [char; 4] = ['_', ' ', '.', '-'];

const FALLBACK_NAME: &str = "Root";

/// Record name for the node at `reference`, built from its last `depth` path
/// segments, e.g. `#/definitions/address` → `Address`.
///
/// The root pointer has no useful segment, so it is named after the node's
/// title, then its description, then `Root`.
pub fn type_name(reference: &str, node: &SchemaNode, depth: usize) -> String {
    if reference == ROOT_PATH {
        let root_name = [node.title.as_str(), node.description.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(FALLBACK_NAME);
        return identifier(root_name);
    }

    let clean = reference.replace("#/", "");
    let parts: Vec<&str> = clean.split('/').collect();
    let start = parts.len().saturating_sub(depth);

    let result: String = parts[start..].iter().map(|p| identifier(&unescape_token(p))).collect();
    if result.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        result
    }
}

/// Strips separators and capitalizes each segment: `address_line-1` →
/// `AddressLine1`. Distinct inputs may collapse to the same identifier.
pub fn identifier(s: &str) -> String {
    s.split(SEPARATORS).map(capitalize_first).collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str, description: &str) -> SchemaNode {
        SchemaNode {
            title: title.to_string(),
            description: description.to_string(),
            ..SchemaNode::default()
        }
    }

    #[test]
    fn identifiers_split_and_capitalize() {
        assert_eq!(identifier("id"), "Id");
        assert_eq!(identifier("address_line-1"), "AddressLine1");
        assert_eq!(identifier("first name.value"), "FirstNameValue");
        assert_eq!(identifier("__double__"), "Double");
        assert_eq!(identifier("alreadyCamel"), "AlreadyCamel");
        assert_eq!(identifier("ünïcode"), "Ünïcode");
        assert_eq!(identifier(""), "");
    }

    #[test]
    fn distinct_inputs_may_collide() {
        assert_eq!(identifier("a_b"), identifier("a-b"));
    }

    #[test]
    fn root_uses_title_then_description_then_fallback() {
        assert_eq!(type_name("#", &titled("Product", "ignored"), 1), "Product");
        assert_eq!(type_name("#", &titled("", "a product"), 1), "AProduct");
        assert_eq!(type_name("#", &titled("", ""), 1), "Root");
    }

    #[test]
    fn pointer_paths_use_last_segments() {
        let n = SchemaNode::default();
        assert_eq!(type_name("#/definitions/address", &n, 1), "Address");
        assert_eq!(type_name("#/properties/nested/properties/geo_point", &n, 1), "GeoPoint");
        assert_eq!(type_name("#/properties/nested/properties/geo", &n, 3), "NestedPropertiesGeo");
        assert_eq!(type_name("#/definitions/a", &n, 10), "DefinitionsA");
    }

    #[test]
    fn escaped_tokens_stay_one_segment() {
        let n = SchemaNode::default();
        assert_eq!(type_name("#/definitions/unit~1kind", &n, 1), "Unit/kind");
        assert_eq!(type_name("#/definitions/a~0b_c", &n, 1), "A~bC");
    }

    #[test]
    fn empty_segments_fall_back_to_root() {
        let n = SchemaNode::default();
        assert_eq!(type_name("#/", &n, 1), "Root");
        assert_eq!(type_name("#/definitions/_", &n, 1), "Root");
    }
}
