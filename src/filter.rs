//! Client-side filtering of the instance list.
//!
//! A filter containing `=` is a tag filter: the part before the first `=` is
//! matched exactly against tag keys, the rest is a case-insensitive substring
//! of the tag value. Any other non-empty filter is a case-insensitive
//! substring match on the instance state.

use crate::models::Instance;

/// Returns the instances matching `filter`, in their original order.
pub fn filter_instances<'a>(instances: &'a [Instance], filter: &str) -> Vec<&'a Instance> {
    if filter.is_empty() {
        return instances.iter().collect();
    }

    match filter.split_once('=') {
        Some((key, value)) => {
            let value = value.to_lowercase();
            instances
                .iter()
                .filter(|inst| matches_tag(inst, key, &value))
                .collect()
        }
        None => {
            let needle = filter.to_lowercase();
            instances
                .iter()
                .filter(|inst| inst.state.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

fn matches_tag(instance: &Instance, key: &str, value_lower: &str) -> bool {
    instance
        .tags
        .iter()
        .any(|(k, v)| k == key && v.to_lowercase().contains(value_lower))
}
