pub mod case_study;
pub mod pain_point;
pub mod prompt;
pub mod record;

use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Renders a stored document for API responses: `_id` becomes a hex string
/// `id`, dates become RFC 3339 strings, everything else is relaxed extended
/// JSON.
pub fn document_to_json(mut document: Document) -> Value {
    let id = document.remove("_id");
    let mut value = render(Bson::Document(document));
    if let (Some(id), Value::Object(map)) = (id, &mut value) {
        let id = match id {
            Bson::ObjectId(oid) => Value::String(oid.to_hex()),
            other => other.into_relaxed_extjson(),
        };
        map.insert("id".to_string(), id);
    }
    value
}

fn render(value: Bson) -> Value {
    match value {
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(text) => Value::String(text),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, render(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(render).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn documents_to_json(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(document_to_json).collect()
}
