//! Theme merging.
//!
//! A child theme is layered over a parent with [`merge_themes`]. For each
//! property defined by either theme:
//!
//! | parent      | child       | result                              |
//! |-------------|-------------|-------------------------------------|
//! | defined     | undefined   | parent value                        |
//! | undefined   | defined     | child value                         |
//! | mapping     | mapping     | shallow merge, child keys win       |
//! | anything    | anything    | child value                         |
//!
//! A JSON `null` counts as undefined, and an empty mapping does not count
//! as a mapping (it has no keys to merge). The shallow merge is one level
//! deep: a template redefined by the child replaces the parent's template
//! wholesale.

use serde_json::{Map, Value};

use super::theme::Theme;

/// Layers `child` over `parent`.
///
/// ```rust
/// use pagecraft::{merge_themes, Theme};
/// use serde_json::json;
///
/// let parent = Theme::from_value(json!({
///     "name": "Parent",
///     "templates": { "home": { "componentType": "A" }, "about": { "componentType": "B" } }
/// })).unwrap();
/// let child = Theme::from_value(json!({
///     "name": "Child",
///     "templates": { "home": { "componentType": "C" } }
/// })).unwrap();
///
/// let merged = merge_themes(&parent, &child);
/// assert_eq!(merged.name(), Some("Child"));
/// assert_eq!(merged.templates().unwrap()["home"]["componentType"], "C");
/// assert_eq!(merged.templates().unwrap()["about"]["componentType"], "B");
/// ```
pub fn merge_themes(parent: &Theme, child: &Theme) -> Theme {
    let mut merged = Map::new();
    for key in parent.keys().chain(child.keys()) {
        if merged.contains_key(key) {
            continue;
        }
        let value = merge_property(parent.get(key), child.get(key));
        merged.insert(key.to_string(), value);
    }
    Theme::from(merged)
}

fn merge_property(parent: Option<&Value>, child: Option<&Value>) -> Value {
    match (defined(parent), defined(child)) {
        (Some(parent), None) => parent.clone(),
        (None, Some(child)) => child.clone(),
        (Some(Value::Object(parent)), Some(Value::Object(child)))
            if !parent.is_empty() && !child.is_empty() =>
        {
            let mut merged = parent.clone();
            merged.extend(child.iter().map(|(k, v)| (k.clone(), v.clone())));
            Value::Object(merged)
        }
        (_, Some(child)) => child.clone(),
        (None, None) => Value::Null,
    }
}

fn defined(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn first_theme() -> Theme {
        Theme::from_value(json!({
            "name": "First Theme",
            "slug": "first",
            "templates": {
                "firstTemplate": { "id": "helloWorld", "componentType": "TextWidget", "props": { "text": "first text" } },
                "mergingTemplate": { "id": "toBeOverwritten", "componentType": "TextWidget" }
            }
        }))
        .unwrap()
    }

    fn second_theme() -> Theme {
        Theme::from_value(json!({
            "name": "Second Theme",
            "partials": {},
            "templates": {
                "secondTemplate": { "id": "helloWorld", "componentType": "TextWidget", "props": { "text": "second text" } },
                "mergingTemplate": { "id": "overwriter", "componentType": "TextWidget" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_includes_keys_of_both_themes() {
        let merged = merge_themes(&first_theme(), &second_theme());
        let keys: Vec<&str> = merged.keys().collect();
        for key in ["name", "slug", "partials", "templates"] {
            assert!(keys.contains(&key), "missing key {}", key);
        }
    }

    #[test]
    fn test_includes_templates_of_both_themes() {
        let merged = merge_themes(&first_theme(), &second_theme());
        let templates = merged.templates().unwrap();
        assert!(templates.contains_key("firstTemplate"));
        assert!(templates.contains_key("secondTemplate"));
    }

    #[test]
    fn test_scalar_properties_are_overwritten() {
        let merged = merge_themes(&first_theme(), &second_theme());
        assert_eq!(merged.name(), Some("Second Theme"));
        assert_eq!(merged.slug(), Some("first"));
    }

    #[test]
    fn test_mapping_entries_are_overwritten() {
        let merged = merge_themes(&first_theme(), &second_theme());
        assert_eq!(
            merged.templates().unwrap()["mergingTemplate"]["id"],
            "overwriter"
        );
    }

    #[test]
    fn test_merge_is_one_level_deep() {
        let parent = Theme::from_value(json!({
            "templates": { "home": { "componentType": "A", "props": { "x": 1, "y": 2 } } }
        }))
        .unwrap();
        let child = Theme::from_value(json!({
            "templates": { "home": { "componentType": "A", "props": { "x": 3 } } }
        }))
        .unwrap();

        let merged = merge_themes(&parent, &child);
        let props = &merged.templates().unwrap()["home"]["props"];
        assert_eq!(props, &json!({ "x": 3 }));
    }

    #[test]
    fn test_arrays_are_replaced() {
        let parent = Theme::from_value(json!({ "tags": ["a", "b"] })).unwrap();
        let child = Theme::from_value(json!({ "tags": ["c"] })).unwrap();
        assert_eq!(merge_themes(&parent, &child).get("tags"), Some(&json!(["c"])));
    }

    #[test]
    fn test_mapping_replaced_by_scalar_and_back() {
        let mapping = Theme::from_value(json!({ "meta": { "a": 1 } })).unwrap();
        let scalar = Theme::from_value(json!({ "meta": "plain" })).unwrap();
        assert_eq!(merge_themes(&mapping, &scalar).get("meta"), Some(&json!("plain")));
        assert_eq!(
            merge_themes(&scalar, &mapping).get("meta"),
            Some(&json!({ "a": 1 }))
        );
    }

    #[test]
    fn test_empty_mapping_replaces_instead_of_merging() {
        let parent = Theme::from_value(json!({ "partials": { "footer": {} } })).unwrap();
        let child = Theme::from_value(json!({ "partials": {} })).unwrap();
        assert_eq!(merge_themes(&parent, &child).get("partials"), Some(&json!({})));
    }

    #[test]
    fn test_null_counts_as_undefined() {
        let parent = Theme::from_value(json!({ "name": "Parent" })).unwrap();
        let child = Theme::from_value(json!({ "name": null })).unwrap();
        assert_eq!(merge_themes(&parent, &child).name(), Some("Parent"));
        assert_eq!(merge_themes(&child, &parent).name(), Some("Parent"));
    }

    #[test]
    fn test_method_form_matches_function() {
        let merged = first_theme().merge(second_theme());
        assert_eq!(merged, merge_themes(&first_theme(), &second_theme()));
    }
}
