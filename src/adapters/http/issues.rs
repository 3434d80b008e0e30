//! Issue routes: list, create, get, update, search.

use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::error::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiPath, ApiQuery, BaseUrl};
use super::params::{CreateIssueRequest, IssueListParams, SearchParams};
use super::state::AppState;
use crate::domain::models::{Issue, IssueChanges, SearchResults};

/// `GET /issues` and `GET /user/issues`.
pub async fn list_all(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<IssueListParams>,
) -> ApiResult<Json<Vec<Issue>>> {
    let query = params.into_query()?;
    Ok(Json(state.store.list_all(&query).await?))
}

/// `GET /orgs/{org}/issues`.
pub async fn list_for_org(
    State(state): State<Arc<AppState>>,
    ApiPath(org): ApiPath<String>,
    ApiQuery(params): ApiQuery<IssueListParams>,
) -> ApiResult<Json<Vec<Issue>>> {
    let query = params.into_query()?;
    Ok(Json(state.store.list_for_org(&org, &query).await?))
}

/// `GET /repos/{owner}/{repo}/issues`.
pub async fn list_for_repo(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo)): ApiPath<(String, String)>,
    ApiQuery(params): ApiQuery<IssueListParams>,
) -> ApiResult<Json<Vec<Issue>>> {
    let query = params.into_query()?;
    Ok(Json(state.store.list_for_repo(&owner, &repo, &query).await?))
}

/// `POST /repos/{owner}/{repo}/issues`.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo)): ApiPath<(String, String)>,
    base_url: BaseUrl,
    ApiJson(req): ApiJson<CreateIssueRequest>,
) -> ApiResult<Response> {
    let issue = state
        .store
        .create(&owner, &repo, req.into(), base_url.as_str())
        .await?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, issue.url.clone())],
        Json(issue),
    )
        .into_response())
}

/// `GET /repos/{owner}/{repo}/issues/{issue_number}`.
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, number)): ApiPath<(String, String, u64)>,
) -> ApiResult<Json<Issue>> {
    state
        .store
        .get(&owner, &repo, number)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `PATCH /repos/{owner}/{repo}/issues/{issue_number}`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, number)): ApiPath<(String, String, u64)>,
    base_url: BaseUrl,
    ApiJson(changes): ApiJson<IssueChanges>,
) -> ApiResult<Json<Issue>> {
    state
        .store
        .update(&owner, &repo, number, changes, base_url.as_str())
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `GET /search/issues`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<SearchResults>> {
    let query = params.into_query()?;
    Ok(Json(state.store.search(&query).await?))
}
