use axum::{Extension, Json};
use postgen_core::Platform;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct PlatformItem {
    pub id: Platform,
    pub description: &'static str,
}

/// GET /api/v1/platforms: the platforms posts can be generated for.
pub(super) async fn list_platforms(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<PlatformItem>>> {
    let data = Platform::ALL
        .into_iter()
        .map(|p| PlatformItem {
            id: p,
            description: p.description(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
