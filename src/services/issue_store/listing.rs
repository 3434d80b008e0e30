//! Listing and search across one repository, one owner, or everything.

use std::cmp::Ordering;
use tracing::debug;

use super::IssueStore;
use crate::domain::errors::StoreResult;
use crate::domain::models::timestamp::format_iso;
use crate::domain::models::{
    Issue, IssueListQuery, IssueSort, Page, SearchItem, SearchQuery, SearchResults, SortDirection,
};

/// Stable sort of `items` by `cmp`, reversed for descending order.
///
/// Equal keys keep their relative order in both directions.
pub(super) fn sort_stable<T, F>(items: &mut [T], direction: SortDirection, cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    if direction.is_desc() {
        items.sort_by(|a, b| cmp(b, a));
    } else {
        items.sort_by(cmp);
    }
}

fn compare_issues(sort: IssueSort, a: &Issue, b: &Issue) -> Ordering {
    match sort {
        IssueSort::Created => a.created_at.cmp(&b.created_at),
        IssueSort::Updated => a.updated_at.cmp(&b.updated_at),
        IssueSort::Comments => a.comments.cmp(&b.comments),
    }
}

/// Whether `updated_at` is at or after the `since` bound, compared as
/// ISO-8601 strings. An empty bound matches everything.
pub(super) fn updated_since(updated_at: &chrono::DateTime<chrono::Utc>, since: Option<&str>) -> bool {
    match since {
        Some(bound) if !bound.is_empty() => format_iso(updated_at).as_str() >= bound,
        _ => true,
    }
}

fn matches_filters(issue: &Issue, query: &IssueListQuery, required_labels: &[&str]) -> bool {
    query.state.matches(issue.state)
        && required_labels.iter().all(|name| issue.has_label(name))
        && updated_since(&issue.updated_at, query.since.as_deref())
}

impl IssueStore {
    /// Issues of one repository, filtered, sorted and paginated.
    pub async fn list_for_repo(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueListQuery,
    ) -> StoreResult<Vec<Issue>> {
        let required_labels = query.required_labels();
        let mut issues = Vec::new();

        for number in self.list_issue_numbers(owner, repo).await? {
            let Some(issue) = self.read_issue(owner, repo, number).await? else {
                continue;
            };
            if matches_filters(&issue, query, &required_labels) {
                issues.push(issue);
            }
        }

        sort_stable(&mut issues, query.direction, |a, b| {
            compare_issues(query.sort, a, b)
        });
        Ok(query.page.apply(issues))
    }

    /// Issues across every repository in storage.
    pub async fn list_all(&self, query: &IssueListQuery) -> StoreResult<Vec<Issue>> {
        self.list_across(None, query).await
    }

    /// Issues across every repository owned by `org`.
    pub async fn list_for_org(&self, org: &str, query: &IssueListQuery) -> StoreResult<Vec<Issue>> {
        self.list_across(Some(org), query).await
    }

    async fn list_across(
        &self,
        owner_filter: Option<&str>,
        query: &IssueListQuery,
    ) -> StoreResult<Vec<Issue>> {
        let per_repo = query.clone().with_page(Page::unbounded());
        let mut merged = Vec::new();

        for (owner, repo) in self.list_repos().await? {
            if owner_filter.is_some_and(|org| org != owner) {
                continue;
            }
            merged.extend(self.list_for_repo(&owner, &repo, &per_repo).await?);
        }

        sort_stable(&mut merged, query.direction, |a, b| {
            compare_issues(query.sort, a, b)
        });
        debug!(
            owner = owner_filter.unwrap_or("*"),
            matched = merged.len(),
            "listed issues across repos"
        );
        Ok(query.page.apply(merged))
    }

    /// Case-insensitive substring search over titles and bodies.
    pub async fn search(&self, query: &SearchQuery) -> StoreResult<SearchResults> {
        let needle = query.q.to_lowercase();
        let mut matches = Vec::new();

        for (owner, repo) in self.list_repos().await? {
            for number in self.list_issue_numbers(&owner, &repo).await? {
                let Some(issue) = self.read_issue(&owner, &repo, number).await? else {
                    continue;
                };
                let title = issue.title.to_lowercase();
                let body = issue.body.as_deref().unwrap_or_default().to_lowercase();
                if title.contains(&needle) || body.contains(&needle) {
                    matches.push(issue);
                }
            }
        }

        if let Some(sort) = query.sort {
            sort_stable(&mut matches, query.order, |a, b| compare_issues(sort, a, b));
        }

        let total_count = matches.len();
        let items = query
            .page
            .apply(matches)
            .into_iter()
            .map(|issue| SearchItem { issue, score: 1.0 })
            .collect();

        debug!(q = %query.q, total_count, "search");
        Ok(SearchResults {
            total_count,
            incomplete_results: false,
            items,
        })
    }
}
