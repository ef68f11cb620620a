//! Active-tool list merging
//!
//! Both functions treat their inputs as ordered sequences of unique names
//! and never reorder what they keep.

use std::collections::HashSet;

/// `current` followed by every name in `additions` it does not already
/// contain, in the order given
pub fn activate_tools<S: AsRef<str>>(current: &[String], additions: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut result = current.to_vec();

    for name in additions {
        let name = name.as_ref();
        if seen.insert(name) {
            result.push(name.to_string());
        }
    }

    result
}

/// `current` without any name listed in `removals`
pub fn deactivate_tools<S: AsRef<str>>(current: &[String], removals: &[S]) -> Vec<String> {
    let removals: HashSet<&str> = removals.iter().map(AsRef::as_ref).collect();
    current
        .iter()
        .filter(|name| !removals.contains(name.as_str()))
        .cloned()
        .collect()
}
