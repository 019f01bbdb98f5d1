//! Dot-path access into configuration trees.
//!
//! Assignment configurations are free-form JSON object trees. The mapping
//! engine reads and writes them through dot-separated paths; these two
//! functions keep the distinction between "absent" and "present but null"
//! precise and testable.

use serde_json::{Map, Value};

/// Resolves a dot-separated path in a configuration tree.
///
/// Missing intermediate segments yield `None`, never an error. A path that
/// resolves to an explicit JSON `null` returns `Some(&Value::Null)`: the
/// path exists even though it carries no value. Callers decide how to treat
/// nulls.
///
/// # Example
///
/// ```
/// use loon_engine::forfait::get_path;
/// use serde_json::json;
///
/// let config = json!({"car": {"catalog_value": 42000}});
/// assert_eq!(get_path(&config, "car.catalog_value"), Some(&json!(42000)));
/// assert_eq!(get_path(&config, "car.license_plate"), None);
/// assert_eq!(get_path(&config, "house.address"), None);
/// ```
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Writes a value at a dot-separated path, creating intermediate objects as
/// needed.
///
/// A non-object value in the middle of the path is replaced by an object so
/// the write always succeeds.
///
/// # Example
///
/// ```
/// use loon_engine::forfait::{get_path, set_path};
/// use serde_json::json;
///
/// let mut config = json!({});
/// set_path(&mut config, "valuation.catalog_value", json!(42000));
/// assert_eq!(config, json!({"valuation": {"catalog_value": 42000}}));
/// ```
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let map = match current.as_object_mut() {
            Some(map) => map,
            None => return,
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
