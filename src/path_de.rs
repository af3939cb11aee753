use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, SchemaError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        SchemaError::Parse { path, source: err.into_inner() }
    })
}

pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, SchemaError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        SchemaError::Parse { path, source: err.into_inner() }
    })
}
