//! Listing, sorting, pagination and search parameters.

use serde::{Deserialize, Serialize};

use super::issue::{Issue, IssueState};

/// Which issues a listing includes by state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    /// Open issues only
    #[default]
    Open,
    /// Closed issues only
    Closed,
    /// Every issue
    All,
}

impl StateFilter {
    /// Whether an issue in `state` passes this filter.
    pub fn matches(&self, state: IssueState) -> bool {
        match self {
            Self::All => true,
            Self::Open => state == IssueState::Open,
            Self::Closed => state == IssueState::Closed,
        }
    }
}

/// Sort key for issue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueSort {
    /// `created_at`
    #[default]
    Created,
    /// `updated_at`
    Updated,
    /// Comment count
    Comments,
}

impl IssueSort {
    /// Parse a `sort` query value; unknown values yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "comments" => Some(Self::Comments),
            _ => None,
        }
    }

    /// Parse a `sort` query value, falling back to `created`.
    pub fn from_param_or_default(value: Option<&str>) -> Self {
        value.and_then(Self::from_param).unwrap_or_default()
    }
}

/// Sort key for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    /// `created_at`
    #[default]
    Created,
    /// `updated_at`
    Updated,
}

impl CommentSort {
    /// Parse a `sort` query value, falling back to `created`.
    pub fn from_param_or_default(value: Option<&str>) -> Self {
        match value {
            Some("updated") => Self::Updated,
            _ => Self::Created,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a `direction`/`order` query value.
    ///
    /// Only the literal `desc` sorts descending; any other value that was
    /// sent sorts ascending. An absent value keeps the `desc` default.
    pub fn from_param_or_default(value: Option<&str>) -> Self {
        match value {
            None | Some("desc") => Self::Desc,
            Some(_) => Self::Asc,
        }
    }

    /// Descending order.
    pub fn is_desc(&self) -> bool {
        *self == Self::Desc
    }
}

/// 1-indexed page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-indexed page number
    pub page: usize,
    /// Items per page
    pub per_page: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 30,
        }
    }
}

impl Page {
    /// Page `page` (1-indexed) of `per_page` items.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// A single page large enough to hold every record.
    pub fn unbounded() -> Self {
        Self {
            page: 1,
            per_page: usize::MAX,
        }
    }

    /// Slice `items` to this page. Out-of-range pages are empty.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let start = self.page.saturating_sub(1).saturating_mul(self.per_page);
        items.into_iter().skip(start).take(self.per_page).collect()
    }
}

/// Filters, ordering and page for an issue listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueListQuery {
    /// Which states to include
    pub state: StateFilter,
    /// Sort key
    pub sort: IssueSort,
    /// Sort direction
    pub direction: SortDirection,
    /// Comma-separated label names; an issue must carry all of them.
    pub labels: Option<String>,
    /// ISO-8601 lower bound on `updated_at`, compared as a string.
    pub since: Option<String>,
    /// Page to return
    pub page: Page,
}

impl IssueListQuery {
    /// Replace the state filter.
    pub fn with_state(mut self, state: StateFilter) -> Self {
        self.state = state;
        self
    }

    /// Replace the page.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Label names required by the `labels` filter.
    pub fn required_labels(&self) -> Vec<&str> {
        self.labels
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.split(',').map(str::trim).collect())
            .unwrap_or_default()
    }
}

/// Ordering, filter and page for a repository-wide comment listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentListQuery {
    /// Sort key
    pub sort: CommentSort,
    /// Sort direction
    pub direction: SortDirection,
    /// ISO-8601 lower bound on `updated_at`
    pub since: Option<String>,
    /// Page to return
    pub page: Page,
}

/// Parameters for the issue search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring to find in titles and bodies
    pub q: String,
    /// `None` keeps matches in discovery order.
    pub sort: Option<IssueSort>,
    /// Direction used with `sort`
    pub order: SortDirection,
    /// Page to return
    pub page: Page,
}

impl SearchQuery {
    /// Search for `q` with default ordering and paging.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }
}

/// A search hit: the issue plus a relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    /// The matching issue
    #[serde(flatten)]
    pub issue: Issue,
    /// Relevance; always 1.0
    pub score: f64,
}

/// The search response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matches before pagination
    pub total_count: usize,
    /// Always false
    pub incomplete_results: bool,
    /// The requested page of matches
    pub items: Vec<SearchItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slices_and_handles_out_of_range() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(Page::new(1, 2).apply(items.clone()), vec![1, 2]);
        assert_eq!(Page::new(3, 2).apply(items.clone()), vec![5]);
        assert!(Page::new(4, 2).apply(items.clone()).is_empty());
        assert_eq!(Page::unbounded().apply(items.clone()), items);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_created() {
        assert_eq!(IssueSort::from_param_or_default(Some("bogus")), IssueSort::Created);
        assert_eq!(IssueSort::from_param_or_default(None), IssueSort::Created);
        assert_eq!(
            IssueSort::from_param_or_default(Some("comments")),
            IssueSort::Comments
        );
        assert_eq!(IssueSort::from_param("bogus"), None);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(SortDirection::from_param_or_default(None), SortDirection::Desc);
        assert_eq!(
            SortDirection::from_param_or_default(Some("desc")),
            SortDirection::Desc
        );
        assert_eq!(
            SortDirection::from_param_or_default(Some("asc")),
            SortDirection::Asc
        );
        assert_eq!(
            SortDirection::from_param_or_default(Some("sideways")),
            SortDirection::Asc
        );
    }

    #[test]
    fn test_required_labels_are_trimmed() {
        let query = IssueListQuery {
            labels: Some("bug, urgent".to_string()),
            ..IssueListQuery::default()
        };
        assert_eq!(query.required_labels(), vec!["bug", "urgent"]);
        assert!(IssueListQuery::default().required_labels().is_empty());

        let empty = IssueListQuery {
            labels: Some(String::new()),
            ..IssueListQuery::default()
        };
        assert!(empty.required_labels().is_empty());
    }

    #[test]
    fn test_state_filter() {
        assert!(StateFilter::All.matches(IssueState::Closed));
        assert!(StateFilter::Open.matches(IssueState::Open));
        assert!(!StateFilter::Open.matches(IssueState::Closed));
        assert!(!StateFilter::Closed.matches(IssueState::Open));
    }
}
