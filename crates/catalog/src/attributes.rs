//! Attribute key normalization and merging.

use indexmap::IndexMap;

/// Canonicalize an attribute key.
///
/// Lower-cases, replaces spaces and hyphens with underscores, and leaves
/// every other character untouched.
pub fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace([' ', '-'], "_")
}

/// Merge native attribute pairs with enhanced overrides.
///
/// Native keys are normalized on the way in; override keys arrive already
/// normalized. Overrides win on collision, and no key appears twice in the
/// result. Two native pairs that normalize to the same key keep the last
/// value.
pub fn merge(
    native: &[(String, String)],
    overrides: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let mut merged = IndexMap::with_capacity(native.len() + overrides.len());

    for (name, value) in native {
        let key = normalize_key(name);
        if !overrides.contains_key(&key) {
            merged.insert(key, value.clone());
        }
    }

    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }

    merged
}
