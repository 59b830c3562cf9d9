use crate::EXTENSION_PREFIX;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Collects the `x-` keys of a wire object.
pub(crate) fn collect(object: &Map<String, Value>) -> HashMap<String, Value> {
    object
        .iter()
        .filter(|(k, _)| k.starts_with(EXTENSION_PREFIX))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Drops keys without the `x-` prefix from a map filled by `#[serde(flatten)]`.
pub(crate) fn retain(extensions: &mut HashMap<String, Value>) {
    extensions.retain(|k, _| {
        let keep = k.starts_with(EXTENSION_PREFIX);
        if !keep {
            log::debug!("Ignoring unknown field '{}'", k);
        }
        keep
    });
}

/// Writes the `x-` keys of `extensions` into a wire object. Other keys are
/// skipped so they cannot shadow real fields.
pub(crate) fn write(object: &mut Map<String, Value>, extensions: &HashMap<String, Value>) {
    for (key, value) in extensions {
        if key.starts_with(EXTENSION_PREFIX) {
            object.insert(key.clone(), value.clone());
        } else {
            log::warn!("Skipping extension '{}' without an 'x-' prefix", key);
        }
    }
}
