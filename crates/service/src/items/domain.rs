use serde::{Deserialize, Serialize};

/// Item as exposed over the API. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl Item {
    /// A not-yet-persisted item.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id: None, name: name.into(), description: description.into() }
    }
}

/// Create/update payload. An `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

impl From<models::item::Model> for Item {
    fn from(m: models::item::Model) -> Self {
        Self { id: Some(m.id), name: m.name, description: m.description }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsaved_item_serializes_null_id() {
        let v = serde_json::to_value(Item::new("Laptop", "Gaming Laptop")).unwrap();
        assert_eq!(v, json!({"id": null, "name": "Laptop", "description": "Gaming Laptop"}));
    }

    #[test]
    fn input_ignores_client_id() {
        let input: ItemInput = serde_json::from_value(json!({"id": 7, "name": "n", "description": "d"})).unwrap();
        assert_eq!(input, ItemInput { name: "n".into(), description: "d".into() });
    }

    #[test]
    fn input_requires_both_fields() {
        let res = serde_json::from_value::<ItemInput>(json!({"name": "only name"}));
        assert!(res.is_err());
    }
}
