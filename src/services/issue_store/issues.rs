//! Issue create, lookup and PATCH-style update.

use tracing::{debug, info};

use super::shaping::{self, IssueUrls};
use super::IssueStore;
use crate::domain::errors::StoreResult;
use crate::domain::models::issue::{REASON_COMPLETED, REASON_REOPENED};
use crate::domain::models::{timestamp, Issue, IssueChanges, IssueState, NewIssue};

impl IssueStore {
    /// Create an issue in `owner/repo` and return the stored record.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        new: NewIssue,
        base_url: &str,
    ) -> StoreResult<Issue> {
        let number = self.next_number(owner, repo).await?;
        let now = timestamp::now();
        let urls = IssueUrls::new(base_url, owner, repo, number);

        let labels = new
            .labels
            .as_deref()
            .map(|names| shaping::labels_from_names(names, number, base_url, owner, repo))
            .unwrap_or_default();
        let (assignee, assignees) =
            shaping::assignment(new.assignee.as_deref(), new.assignees.as_deref(), base_url);

        let issue = Issue {
            id: number,
            node_id: format!("I_{number}"),
            number,
            url: urls.url,
            repository_url: urls.repository_url,
            labels_url: urls.labels_url,
            comments_url: urls.comments_url,
            events_url: urls.events_url,
            html_url: urls.html_url,
            state: IssueState::Open,
            state_reason: None,
            title: new.title,
            body: new.body,
            user: shaping::local_user(base_url),
            labels,
            assignee,
            assignees,
            milestone: None,
            locked: false,
            active_lock_reason: None,
            comments: 0,
            created_at: now,
            updated_at: now,
            closed_at: None,
            closed_by: None,
            author_association: shaping::author_association(),
        };

        self.write_issue(owner, repo, &issue).await?;
        info!(owner, repo, number, "issue created");
        Ok(issue)
    }

    /// Look up one issue.
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> StoreResult<Option<Issue>> {
        self.read_issue(owner, repo, number).await
    }

    /// Apply a PATCH change-set. Only keys present in `changes` are touched;
    /// `updated_at` is refreshed on every call.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        changes: IssueChanges,
        base_url: &str,
    ) -> StoreResult<Option<Issue>> {
        let Some(mut issue) = self.read_issue(owner, repo, number).await? else {
            return Ok(None);
        };
        let now = timestamp::now();

        if let Some(Some(title)) = changes.title {
            issue.title = title.to_string();
        }

        if let Some(body) = changes.body {
            issue.body = body;
        }

        match changes.state {
            Some(Some(new_state)) => {
                let old_state = issue.state;
                issue.state = new_state;
                let closing = new_state == IssueState::Closed && old_state != IssueState::Closed;
                let reopening = new_state == IssueState::Open && old_state != IssueState::Open;

                if let Some(reason) = changes.state_reason {
                    issue.state_reason = reason;
                } else if closing {
                    issue.state_reason = Some(REASON_COMPLETED.to_string());
                } else if reopening {
                    issue.state_reason = Some(REASON_REOPENED.to_string());
                }

                if closing {
                    issue.closed_at = Some(now);
                    issue.closed_by = Some(issue.user.clone());
                } else if reopening {
                    issue.closed_at = None;
                    issue.closed_by = None;
                }
                debug!(number, from = old_state.as_str(), to = new_state.as_str(), "state change");
            }
            _ => {
                if let Some(reason) = changes.state_reason {
                    issue.state_reason = reason;
                }
            }
        }

        if let Some(labels) = changes.labels {
            issue.labels = labels
                .map(|names| shaping::labels_from_names(&names, number, base_url, owner, repo))
                .unwrap_or_default();
        }

        if let Some(assignees) = changes.assignees {
            issue.assignees = assignees
                .unwrap_or_default()
                .iter()
                .map(|login| shaping::user_for_login(login, base_url))
                .collect();
            issue.assignee = issue.assignees.first().cloned();
        } else if let Some(assignee) = changes.assignee {
            let user = assignee.map(|login| shaping::user_for_login(&login, base_url));
            issue.assignees = user.iter().cloned().collect();
            issue.assignee = user;
        }

        issue.updated_at = now;
        self.write_issue(owner, repo, &issue).await?;
        info!(owner, repo, number, "issue updated");
        Ok(Some(issue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStorage;
    use std::sync::Arc;

    const BASE: &str = "http://localhost:8000";

    fn store() -> IssueStore {
        IssueStore::new(Arc::new(InMemoryStorage::new()))
    }

    fn changes(json: &str) -> IssueChanges {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_create_shapes_a_fresh_issue() {
        let store = store();
        let issue = store
            .create(
                "octo",
                "hello",
                NewIssue::new("First").with_body("Body text").with_labels(["bug"]),
                BASE,
            )
            .await
            .unwrap();

        assert_eq!(issue.number, 1);
        assert_eq!(issue.id, 1);
        assert_eq!(issue.node_id, "I_1");
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.comments, 0);
        assert_eq!(issue.labels[0].id, 100);
        assert_eq!(issue.user.login, "local-user");
        assert_eq!(issue.author_association, "OWNER");
        assert!(issue.closed_at.is_none());
        assert_eq!(issue.created_at, issue.updated_at);
        assert_eq!(issue.url, "http://localhost:8000/repos/octo/hello/issues/1");
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrips() {
        let store = store();
        let created = store
            .create("octo", "hello", NewIssue::new("First"), BASE)
            .await
            .unwrap();
        let fetched = store.get("octo", "hello", 1).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert!(store.get("octo", "hello", 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_assignee_precedence() {
        let store = store();
        let mut new = NewIssue::new("t").with_assignees(["a", "b"]);
        new.assignee = Some("c".to_string());
        let issue = store.create("o", "r", new, BASE).await.unwrap();
        assert_eq!(issue.assignee.unwrap().login, "a");
        assert_eq!(issue.assignees.len(), 2);

        let mut new = NewIssue::new("t");
        new.assignee = Some("c".to_string());
        let issue = store.create("o", "r", new, BASE).await.unwrap();
        assert_eq!(issue.assignees.len(), 1);
        assert_eq!(issue.assignees[0].login, "c");
    }

    #[tokio::test]
    async fn test_update_missing_issue_is_none() {
        let store = store();
        let result = store
            .update("o", "r", 9, IssueChanges::default(), BASE)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_close_and_reopen_side_effects() {
        let store = store();
        store.create("o", "r", NewIssue::new("t"), BASE).await.unwrap();

        let closed = store
            .update("o", "r", 1, changes(r#"{"state":"closed"}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.state, IssueState::Closed);
        assert_eq!(closed.state_reason.as_deref(), Some("completed"));
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.closed_by.as_ref().unwrap().login, "local-user");

        let reopened = store
            .update("o", "r", 1, changes(r#"{"state":"open"}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reopened.state_reason.as_deref(), Some("reopened"));
        assert!(reopened.closed_at.is_none());
        assert!(reopened.closed_by.is_none());
    }

    #[tokio::test]
    async fn test_explicit_state_reason_wins() {
        let store = store();
        store.create("o", "r", NewIssue::new("t"), BASE).await.unwrap();

        let closed = store
            .update(
                "o",
                "r",
                1,
                changes(r#"{"state":"closed","state_reason":"not_planned"}"#),
                BASE,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.state_reason.as_deref(), Some("not_planned"));

        // same-state: no timestamp side effects, explicit reason still applied
        let first_closed_at = closed.closed_at;
        let again = store
            .update(
                "o",
                "r",
                1,
                changes(r#"{"state":"closed","state_reason":"duplicate"}"#),
                BASE,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.state_reason.as_deref(), Some("duplicate"));
        assert_eq!(again.closed_at, first_closed_at);
    }

    #[tokio::test]
    async fn test_state_reason_without_state() {
        let store = store();
        store.create("o", "r", NewIssue::new("t"), BASE).await.unwrap();
        let issue = store
            .update("o", "r", 1, changes(r#"{"state_reason":"reopened"}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.state_reason.as_deref(), Some("reopened"));
    }

    #[tokio::test]
    async fn test_absent_keys_are_untouched_and_null_body_clears() {
        let store = store();
        store
            .create("o", "r", NewIssue::new("t").with_body("keep").with_labels(["bug"]), BASE)
            .await
            .unwrap();

        let issue = store
            .update("o", "r", 1, changes(r#"{"title": 7}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(issue.title, "7");
        assert_eq!(issue.body.as_deref(), Some("keep"));
        assert!(issue.has_label("bug"));

        let issue = store
            .update("o", "r", 1, changes(r#"{"body": null, "title": null}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert!(issue.body.is_none());
        assert_eq!(issue.title, "7");
    }

    #[tokio::test]
    async fn test_labels_are_rebuilt_and_null_clears() {
        let store = store();
        store
            .create("o", "r", NewIssue::new("t").with_labels(["a", "b"]), BASE)
            .await
            .unwrap();

        let issue = store
            .update("o", "r", 1, changes(r#"{"labels":["b"]}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(issue.labels.len(), 1);
        assert_eq!(issue.labels[0].id, 100);

        let issue = store
            .update("o", "r", 1, changes(r#"{"labels":null}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert!(issue.labels.is_empty());
    }

    #[tokio::test]
    async fn test_assignee_changes_reset_both_fields() {
        let store = store();
        store
            .create("o", "r", NewIssue::new("t").with_assignees(["a", "b"]), BASE)
            .await
            .unwrap();

        let issue = store
            .update("o", "r", 1, changes(r#"{"assignee":"c"}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(issue.assignee.as_ref().unwrap().login, "c");
        assert_eq!(issue.assignees.len(), 1);

        let issue = store
            .update("o", "r", 1, changes(r#"{"assignees":null,"assignee":"d"}"#), BASE)
            .await
            .unwrap()
            .unwrap();
        assert!(issue.assignee.is_none());
        assert!(issue.assignees.is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_refreshes_updated_at_only() {
        let store = store();
        let created = store
            .create("o", "r", NewIssue::new("t"), BASE)
            .await
            .unwrap();
        let updated = store
            .update("o", "r", 1, IssueChanges::default(), BASE)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(
            Issue {
                updated_at: created.updated_at,
                ..updated
            },
            created
        );
    }
}
