use serde::Serialize;

/// Fixed creation timestamp advertised for the single model entry
///
/// SDKs probing `/v1/models` only check for presence, not freshness.
const MODEL_CREATED: u64 = 1_700_000_000;

#[derive(Debug, Serialize)]
pub struct ModelList {
    object: &'static str,
    data: Vec<Model>,
}

#[derive(Debug, Serialize)]
pub struct Model {
    id: String,
    object: &'static str,
    created: u64,
    owned_by: &'static str,
}

/// Static single-entry capability probe naming the configured model
pub fn model_list(model: &str) -> ModelList {
    ModelList {
        object: "list",
        data: vec![Model {
            id: model.to_string(),
            object: "model",
            created: MODEL_CREATED,
            owned_by: "murmur",
        }],
    }
}
