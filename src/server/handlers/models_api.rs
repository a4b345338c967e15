//! 模型列表端点

use crate::models::openai::{ModelInfo, ModelList};
use crate::router;
use axum::Json;

/// GET /v1/models
pub async fn list_models() -> Json<ModelList> {
    let data = router::all()
        .iter()
        .map(|t| ModelInfo {
            id: t.public_name,
            object: "model",
            created: t.created,
            owned_by: t.owned_by,
        })
        .collect();

    Json(ModelList {
        object: "list",
        data,
    })
}
