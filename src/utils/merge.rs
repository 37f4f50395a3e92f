//! Deep merge of JSON documents, used for partial config updates.

use serde_json::Value;

/// Merge `patch` into `base`.
///
/// Objects merge key by key, arrays on both sides become their union (base
/// order first), anything else is replaced by the patch value.
pub fn merge_deep(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_deep(base_value, patch_value),
                    None => {
                        base_map.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(patch_items)) => {
            for item in patch_items {
                if !base_items.contains(item) {
                    base_items.push(item.clone());
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_nested_objects_without_dropping_siblings() {
        let mut base = json!({
            "ServiceSettings": {"SiteURL": "http://localhost:8065", "EnableOAuth": false},
            "TeamSettings": {"MaxUsersPerTeam": 50}
        });
        merge_deep(
            &mut base,
            &json!({"ServiceSettings": {"EnableOAuth": true}}),
        );

        assert_eq!(base["ServiceSettings"]["EnableOAuth"], true);
        assert_eq!(base["ServiceSettings"]["SiteURL"], "http://localhost:8065");
        assert_eq!(base["TeamSettings"]["MaxUsersPerTeam"], 50);
    }

    #[test]
    fn arrays_are_unioned() {
        let mut base = json!({"Plugins": ["a", "b"]});
        merge_deep(&mut base, &json!({"Plugins": ["b", "c"]}));
        assert_eq!(base["Plugins"], json!(["a", "b", "c"]));
    }

    #[test]
    fn scalars_and_type_changes_are_replaced() {
        let mut base = json!({"a": 1, "b": {"x": 1}, "c": [1]});
        merge_deep(&mut base, &json!({"a": 2, "b": "flat", "c": {"k": true}}));
        assert_eq!(base, json!({"a": 2, "b": "flat", "c": {"k": true}}));
    }

    #[test]
    fn new_keys_are_added() {
        let mut base = json!({});
        merge_deep(&mut base, &json!({"EmailSettings": {"SendEmailNotifications": false}}));
        assert_eq!(base["EmailSettings"]["SendEmailNotifications"], false);
    }
}
