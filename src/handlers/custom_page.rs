//! GET <mount>/<pageToken>[/<subpath>]: custom page entry points and resources.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Uri},
    response::Response,
};

use crate::page::PageRequest;
use crate::router::AppState;

const APPLICATION_ID_PARAM: &str = "applicationId";

/// Query pairs in request order. Repeated keys are kept, never rejected.
type QueryPairs = Vec<(String, String)>;

pub async fn serve(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path_info = uri
        .path()
        .strip_prefix(state.pages.mount_path())
        .unwrap_or_default()
        .to_string();
    let session = state.sessions.current_session(&headers).await;

    let request = PageRequest {
        path_info,
        query: uri.query().map(str::to_string),
        application_id: application_id(&params),
        headers,
        session,
    };
    state.pages.handle(request).await
}

/// First `applicationId` value; an empty value counts as absent.
fn application_id(params: &[(String, String)]) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| key == APPLICATION_ID_PARAM)
        .map(|(_, value)| value.clone())
        .filter(|id| !id.is_empty())
}
