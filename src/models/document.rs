use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use crate::error::StoreResult;

/// JSON object as received from or sent to clients.
pub type JsonDocument = Map<String, Value>;

pub const ID_FIELD: &str = "_id";

/// Converts a client JSON object into a BSON document for storage.
///
/// Integers become `Int64` and fractional numbers `Double`. Integers above
/// `i64::MAX` cannot be represented and fail with a serialization error.
pub fn json_to_document(json: &JsonDocument) -> StoreResult<Document> {
    Ok(bson::to_document(json)?)
}

/// Renders a stored document as JSON.
///
/// Values use relaxed extended JSON, except a top-level ObjectId `_id`,
/// which is flattened to its hex string so clients can put it straight into
/// a URL.
pub fn document_to_json(document: Document) -> Value {
    let id = match document.get(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
        _ => None,
    };

    let mut json = Bson::Document(document).into_relaxed_extjson();

    if let (Some(id), Value::Object(map)) = (id, &mut json) {
        map.insert(ID_FIELD.to_string(), Value::String(id));
    }

    json
}

/// True when `name` is present and truthy: not null, false, zero or an
/// empty string.
pub fn has_name(json: &JsonDocument) -> bool {
    match json.get("name") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Removes a client-supplied `_id` so an update can never rewrite it.
pub fn strip_id(json: &mut JsonDocument) {
    json.remove(ID_FIELD);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    fn object(value: Value) -> JsonDocument {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn test_json_to_document_types() {
        let json = object(json!({
            "name": "Ohio",
            "electors": 17,
            "turnout": 0.71,
            "swing": true,
            "counties": ["Franklin", "Cuyahoga"],
            "meta": { "region": "midwest" },
            "notes": null
        }));

        let document = json_to_document(&json).unwrap();

        assert_eq!(document.get_str("name").unwrap(), "Ohio");
        assert_eq!(document.get_i64("electors").unwrap(), 17);
        assert_eq!(document.get_f64("turnout").unwrap(), 0.71);
        assert!(document.get_bool("swing").unwrap());
        assert_eq!(document.get_array("counties").unwrap().len(), 2);
        assert_eq!(document.get_document("meta").unwrap().get_str("region").unwrap(), "midwest");
        assert_eq!(document.get("notes"), Some(&Bson::Null));
    }

    #[test]
    fn test_json_to_document_rejects_unrepresentable_integer() {
        let json = object(json!({ "name": "big", "count": u64::MAX }));
        assert!(json_to_document(&json).is_err());
    }

    #[test]
    fn test_document_to_json_flattens_object_id() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "name": "Ohio", "electors": 17_i64, "nested": { "x": 1 } };

        let json = document_to_json(document);

        assert_eq!(
            json,
            json!({ "_id": oid.to_hex(), "name": "Ohio", "electors": 17, "nested": { "x": 1 } })
        );
    }

    #[test]
    fn test_document_to_json_keeps_non_object_id() {
        let json = document_to_json(doc! { "_id": "custom", "name": "yes" });
        assert_eq!(json, json!({ "_id": "custom", "name": "yes" }));
    }

    #[test]
    fn test_has_name() {
        assert!(has_name(&object(json!({ "name": "Ohio" }))));
        assert!(has_name(&object(json!({ "name": 1 }))));
        assert!(has_name(&object(json!({ "name": true }))));
        assert!(has_name(&object(json!({ "name": [] }))));

        assert!(!has_name(&object(json!({}))));
        assert!(!has_name(&object(json!({ "title": "Ohio" }))));
        assert!(!has_name(&object(json!({ "name": null }))));
        assert!(!has_name(&object(json!({ "name": "" }))));
        assert!(!has_name(&object(json!({ "name": 0 }))));
        assert!(!has_name(&object(json!({ "name": false }))));
    }

    #[test]
    fn test_strip_id() {
        let mut json = object(json!({ "_id": "abc", "foo": "bar" }));
        strip_id(&mut json);
        assert_eq!(Value::Object(json), json!({ "foo": "bar" }));
    }
}
