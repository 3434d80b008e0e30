//! Comment routes.

use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::error::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiPath, ApiQuery, BaseUrl};
use super::params::{CommentBody, CommentListParams, IssueCommentsParams};
use super::state::AppState;
use crate::domain::models::Comment;

type CommentPath = ApiPath<(String, String, u64)>;

/// `GET /repos/{owner}/{repo}/issues/comments`.
pub async fn list_for_repo(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo)): ApiPath<(String, String)>,
    ApiQuery(params): ApiQuery<CommentListParams>,
) -> ApiResult<Json<Vec<Comment>>> {
    let query = params.into_query()?;
    Ok(Json(
        state
            .store
            .list_comments_for_repo(&owner, &repo, &query)
            .await?,
    ))
}

/// `GET /repos/{owner}/{repo}/issues/comments/{comment_id}`.
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, comment_id)): CommentPath,
) -> ApiResult<Json<Comment>> {
    state
        .store
        .get_comment(&owner, &repo, comment_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `PATCH /repos/{owner}/{repo}/issues/comments/{comment_id}`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, comment_id)): CommentPath,
    ApiJson(req): ApiJson<CommentBody>,
) -> ApiResult<Json<Comment>> {
    state
        .store
        .update_comment(&owner, &repo, comment_id, req.body)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /repos/{owner}/{repo}/issues/comments/{comment_id}`.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, comment_id)): CommentPath,
) -> ApiResult<StatusCode> {
    if state.store.delete_comment(&owner, &repo, comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// `PUT /repos/{owner}/{repo}/issues/comments/{comment_id}/pin`.
pub async fn pin(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, comment_id)): CommentPath,
) -> ApiResult<Json<Comment>> {
    state
        .store
        .pin_comment(&owner, &repo, comment_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /repos/{owner}/{repo}/issues/comments/{comment_id}/pin`.
pub async fn unpin(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, comment_id)): CommentPath,
) -> ApiResult<StatusCode> {
    if state.store.unpin_comment(&owner, &repo, comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// `GET /repos/{owner}/{repo}/issues/{issue_number}/comments`.
pub async fn list_for_issue(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, number)): ApiPath<(String, String, u64)>,
    ApiQuery(params): ApiQuery<IssueCommentsParams>,
) -> ApiResult<Json<Vec<Comment>>> {
    let page = params.page()?;
    state
        .store
        .list_comments_for_issue(&owner, &repo, number, params.since.as_deref(), page)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /repos/{owner}/{repo}/issues/{issue_number}/comments`.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiPath((owner, repo, number)): ApiPath<(String, String, u64)>,
    base_url: BaseUrl,
    ApiJson(req): ApiJson<CommentBody>,
) -> ApiResult<Response> {
    let comment = state
        .store
        .create_comment(&owner, &repo, number, req.body, base_url.as_str())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, comment.url.clone())],
        Json(comment),
    )
        .into_response())
}
