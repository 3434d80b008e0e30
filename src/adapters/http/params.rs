//! Query strings and request bodies, validated into store queries.

use serde::Deserialize;

use super::error::{ApiError, ApiResult, FieldError};
use crate::domain::models::{
    CommentListQuery, CommentSort, IssueListQuery, IssueSort, NewIssue, Page, SearchQuery,
    SortDirection, StateFilter, TitleValue,
};

const MAX_PER_PAGE: i64 = 100;
const DEFAULT_PER_PAGE: i64 = 30;

/// `per_page` in 1..=100 (default 30) and `page` >= 1 (default 1).
fn page(per_page: Option<i64>, page: Option<i64>) -> ApiResult<Page> {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
    let page = page.unwrap_or(1);

    let mut errors = Vec::new();
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        errors.push(FieldError::invalid(
            "per_page",
            format!("per_page must be between 1 and {MAX_PER_PAGE}"),
        ));
    }
    if page < 1 {
        errors.push(FieldError::invalid("page", "page must be at least 1"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // both bounds checked above
    Ok(Page::new(
        usize::try_from(page).unwrap_or(1),
        usize::try_from(per_page).unwrap_or(1),
    ))
}

/// `GET .../issues` query string.
#[derive(Debug, Default, Deserialize)]
pub struct IssueListParams {
    /// `open`, `closed` or `all`
    pub state: Option<StateFilter>,
    /// `created`, `updated` or `comments`
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
    /// Comma-separated label names, all required
    pub labels: Option<String>,
    /// Only issues updated at or after this timestamp
    pub since: Option<String>,
    /// Page size, 1 to 100
    pub per_page: Option<i64>,
    /// 1-based page number
    pub page: Option<i64>,
}

impl IssueListParams {
    /// Validate into a store query.
    pub fn into_query(self) -> ApiResult<IssueListQuery> {
        Ok(IssueListQuery {
            state: self.state.unwrap_or_default(),
            sort: IssueSort::from_param_or_default(self.sort.as_deref()),
            direction: SortDirection::from_param_or_default(self.direction.as_deref()),
            labels: self.labels,
            since: self.since,
            page: page(self.per_page, self.page)?,
        })
    }
}

/// `GET /search/issues` query string. `q` is required.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search text
    pub q: String,
    /// Sort key
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
    /// Page size
    pub per_page: Option<i64>,
    /// Page number
    pub page: Option<i64>,
}

impl SearchParams {
    /// Validate into a search query.
    pub fn into_query(self) -> ApiResult<SearchQuery> {
        Ok(SearchQuery {
            sort: self.sort.as_deref().and_then(IssueSort::from_param),
            order: SortDirection::from_param_or_default(self.order.as_deref()),
            page: page(self.per_page, self.page)?,
            q: self.q,
        })
    }
}

/// `GET .../issues/comments` query string.
#[derive(Debug, Default, Deserialize)]
pub struct CommentListParams {
    /// `created` or `updated`
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
    /// Only comments updated at or after this timestamp
    pub since: Option<String>,
    /// Page size
    pub per_page: Option<i64>,
    /// Page number
    pub page: Option<i64>,
}

impl CommentListParams {
    /// Validate into a comment query.
    pub fn into_query(self) -> ApiResult<CommentListQuery> {
        Ok(CommentListQuery {
            sort: CommentSort::from_param_or_default(self.sort.as_deref()),
            direction: SortDirection::from_param_or_default(self.direction.as_deref()),
            since: self.since,
            page: page(self.per_page, self.page)?,
        })
    }
}

/// `GET .../issues/{n}/comments` query string.
#[derive(Debug, Default, Deserialize)]
pub struct IssueCommentsParams {
    /// Accepted and ignored
    pub since: Option<String>,
    /// Page size
    pub per_page: Option<i64>,
    /// Page number
    pub page: Option<i64>,
}

impl IssueCommentsParams {
    /// The validated page window.
    pub fn page(&self) -> ApiResult<Page> {
        page(self.per_page, self.page)
    }
}

/// `POST .../issues` body.
#[derive(Debug, Deserialize)]
pub struct CreateIssueRequest {
    /// Required; a string or a number
    pub title: TitleValue,
    /// Issue text
    #[serde(default)]
    pub body: Option<String>,
    /// Single assignee, merged into `assignees`
    #[serde(default)]
    pub assignee: Option<String>,
    /// Label names
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Assignee logins
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
}

impl From<CreateIssueRequest> for NewIssue {
    fn from(req: CreateIssueRequest) -> Self {
        Self {
            title: req.title.to_string(),
            body: req.body,
            labels: req.labels,
            assignee: req.assignee,
            assignees: req.assignees,
        }
    }
}

/// Body of comment create and update.
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    /// Comment text
    pub body: String,
}

/// `POST /api/auth/verify` body.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Candidate token
    pub token: String,
}
