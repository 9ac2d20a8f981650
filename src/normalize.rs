use serde_json::Value;

use crate::error::AppError;

/// Decode, sort `cards.cards`, and pretty-print the settings document.
///
/// Cards sort by the `(name, id)` tuple, compared lexicographically per
/// component, so names that prefix one another ("A" vs "A1") cannot produce
/// ambiguous orderings. The sort is stable; the element set and every field
/// outside `cards.cards` pass through untouched. Output is 2-space-indented
/// UTF-8, and running the function on its own output is a no-op.
pub fn normalize(payload: &[u8]) -> Result<Vec<u8>, AppError> {
    let text = std::str::from_utf8(payload)
        .map_err(|err| AppError::Format(format!("payload is not UTF-8: {err}")))?;
    let mut doc: Value = serde_json::from_str(text)
        .map_err(|err| AppError::Format(format!("payload is not JSON: {err}")))?;

    let cards = doc
        .pointer_mut("/cards/cards")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| AppError::Format("no cards.cards array in document".into()))?;
    cards.sort_by_cached_key(card_key);

    serde_json::to_vec_pretty(&doc)
        .map_err(|err| AppError::Format(format!("re-encoding failed: {err}")))
}

/// Sort key for one card: its `name`, then its `id`.
fn card_key(card: &Value) -> (String, String) {
    (scalar(card.get("name")), scalar(card.get("id")))
}

// Missing and null components render as "None" so unnamed cards group
// together instead of interleaving with named ones.
fn scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(bytes: &[u8]) -> Vec<String> {
        let doc: Value = serde_json::from_slice(bytes).unwrap();
        doc["cards"]["cards"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| scalar(c.get("name")))
            .collect()
    }

    #[test]
    fn sorts_cards_by_name_then_id() {
        let raw = br#"{"cards":{"cards":[
            {"name":"B","id":1},
            {"name":"A","id":2},
            {"name":"A","id":1}
        ]}}"#;
        let out = normalize(raw).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();
        let keys: Vec<(String, String)> = doc["cards"]["cards"]
            .as_array()
            .unwrap()
            .iter()
            .map(card_key)
            .collect();
        assert_eq!(
            keys,
            [
                ("A".to_owned(), "1".to_owned()),
                ("A".to_owned(), "2".to_owned()),
                ("B".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn unnamed_cards_take_the_none_key() {
        let raw = br#"{"cards":{"cards":[
            {"name":"Zeta","id":1},
            {"id":9},
            {"name":"Alpha","id":1}
        ]}}"#;
        let out = normalize(raw).unwrap();
        assert_eq!(names(&out), ["Alpha", "None", "Zeta"]);
    }

    #[test]
    fn normalizing_twice_is_byte_identical() {
        let raw = br#"{"cards":{"cards":[{"name":"B","id":2},{"name":"A","id":1}]},"other":true}"#;
        let once = normalize(raw).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn any_permutation_normalizes_to_the_same_bytes() {
        let a = normalize(br#"{"cards":{"cards":[{"name":"B","id":2},{"name":"A","id":1}]}}"#)
            .unwrap();
        let b = normalize(br#"{"cards":{"cards":[{"name":"A","id":1},{"name":"B","id":2}]}}"#)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn equal_keys_keep_their_original_order() {
        let raw = br#"{"cards":{"cards":[
            {"name":"A","id":1,"color":"red"},
            {"name":"A","id":1,"color":"blue"}
        ]}}"#;
        let out = normalize(raw).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();
        let colors: Vec<&str> = doc["cards"]["cards"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["color"].as_str().unwrap())
            .collect();
        assert_eq!(colors, ["red", "blue"]);
    }

    #[test]
    fn content_outside_the_cards_array_survives() {
        let raw = br#"{"version":7,"cards":{"active":"x","cards":[{"name":"A","id":1}]},"profiles":{"list":[3,2,1]}}"#;
        let out = normalize(raw).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["version"], 7);
        assert_eq!(doc["cards"]["active"], "x");
        assert_eq!(doc["profiles"]["list"], serde_json::json!([3, 2, 1]));

        // Key order is insertion order, not alphabetical.
        let text = String::from_utf8(out).unwrap();
        assert!(text.find("\"version\"").unwrap() < text.find("\"profiles\"").unwrap());
        assert!(text.find("\"active\"").unwrap() < text.find("\"cards\": [").unwrap());
    }

    #[test]
    fn output_is_pretty_printed_with_two_spaces() {
        let out = normalize(br#"{"cards":{"cards":[{"name":"A","id":1}]}}"#).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("{\n  \"cards\""));
    }

    #[test]
    fn malformed_payloads_are_format_errors() {
        assert!(matches!(
            normalize(&[0xff, 0xfe]),
            Err(AppError::Format(_))
        ));
        assert!(matches!(normalize(b"not json"), Err(AppError::Format(_))));
        assert!(matches!(normalize(b"{}"), Err(AppError::Format(_))));
        assert!(matches!(
            normalize(br#"{"cards":{"cards":42}}"#),
            Err(AppError::Format(_))
        ));
    }
}
