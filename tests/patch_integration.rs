//! End-to-end tests for the patch layer against a recording mock delegate.

use std::sync::Mutex;

use redditions::client::{RedditApi, RedditClientError};
use redditions::models::WikiRevision;
use redditions::patch::{ExtendedClient, PatchError, PatchRegistry};

/// Records every delegate call; simulates a configurable number of wiki
/// edit conflicts before accepting an edit.
#[derive(Default)]
struct RecordingApi {
    messages: Mutex<Vec<(String, String, String)>>,
    wiki_content: String,
    wiki_revision: String,
    conflicts_remaining: Mutex<u32>,
    edits: Mutex<Vec<(String, String)>>,
}

impl RecordingApi {
    fn new() -> Self {
        Self {
            wiki_content: "original content".to_string(),
            wiki_revision: "rev-1".to_string(),
            ..Default::default()
        }
    }

    fn with_conflicts(conflicts: u32) -> Self {
        let api = Self::new();
        *api.conflicts_remaining.lock().unwrap() = conflicts;
        api
    }

    fn sent_messages(&self) -> Vec<(String, String, String)> {
        self.messages.lock().unwrap().clone()
    }

    fn recorded_edits(&self) -> Vec<(String, String)> {
        self.edits.lock().unwrap().clone()
    }
}

impl RedditApi for RecordingApi {
    async fn compose_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), RedditClientError> {
        self.messages
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }

    async fn wiki_page(
        &self,
        _subreddit: &str,
        _page: &str,
    ) -> Result<WikiRevision, RedditClientError> {
        Ok(WikiRevision {
            id: self.wiki_revision.clone(),
            content_md: self.wiki_content.clone(),
        })
    }

    async fn edit_wiki_page(
        &self,
        _subreddit: &str,
        _page: &str,
        content: &str,
        _reason: Option<&str>,
        previous: &str,
    ) -> Result<(), RedditClientError> {
        let mut conflicts = self.conflicts_remaining.lock().unwrap();
        if *conflicts > 0 {
            *conflicts -= 1;
            return Err(RedditClientError::EditConflict {
                new_content: "content from a competing edit".to_string(),
                new_revision: "rev-2".to_string(),
            });
        }
        self.edits
            .lock()
            .unwrap()
            .push((content.to_string(), previous.to_string()));
        Ok(())
    }
}

fn patched_client() -> ExtendedClient<RecordingApi> {
    let registry = PatchRegistry::new();
    let mut client = ExtendedClient::new(RecordingApi::new());
    registry.patch(&mut client).unwrap();
    client
}

#[tokio::test]
async fn message_with_user_sigil_takes_the_user_path() {
    let client = patched_client();
    client.message("u/someuser", "subj", "body").await.unwrap();

    let sent = client.inner().sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], ("someuser".to_string(), "subj".to_string(), "body".to_string()));
}

#[tokio::test]
async fn message_with_subreddit_sigil_takes_the_community_path() {
    let client = patched_client();
    client
        .message("r/somecommunity", "subj", "body")
        .await
        .unwrap();

    let sent = client.inner().sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "/r/somecommunity");
}

#[tokio::test]
async fn bare_target_is_messaged_as_a_user() {
    let client = patched_client();
    client.message("someuser", "subj", "body").await.unwrap();
    assert_eq!(client.inner().sent_messages()[0].0, "someuser");
}

#[tokio::test]
async fn message_requires_the_patch_to_be_applied() {
    let client = ExtendedClient::new(RecordingApi::new());
    let err = client.message("u/someuser", "subj", "body").await.unwrap_err();
    assert!(matches!(err, PatchError::MethodNotInstalled("message")));
    assert!(client.inner().sent_messages().is_empty());
}

#[tokio::test]
async fn unroutable_target_never_reaches_the_delegate() {
    let client = patched_client();
    let err = client.message("u/", "subj", "body").await.unwrap_err();
    assert!(matches!(err, PatchError::UnroutableTarget(_)));
    assert!(client.inner().sent_messages().is_empty());
}

#[tokio::test]
async fn methods_disappear_again_after_unpatch() {
    let registry = PatchRegistry::new();
    let mut client = ExtendedClient::new(RecordingApi::new());
    registry.patch(&mut client).unwrap();
    registry.unpatch(&mut client).unwrap();

    let err = client.message("u/someuser", "subj", "body").await.unwrap_err();
    assert!(matches!(err, PatchError::MethodNotInstalled("message")));
}

#[tokio::test]
async fn wiki_update_applies_the_transformation() {
    let client = patched_client();
    client
        .update_wiki("test", "index", Some("append"), |previous| {
            format!("{} + appended", previous)
        })
        .await
        .unwrap();

    let edits = client.inner().recorded_edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].0, "original content + appended");
    assert_eq!(edits[0].1, "rev-1");
}

#[tokio::test]
async fn wiki_update_retries_against_the_conflicting_revision() {
    let registry = PatchRegistry::new();
    let mut client = ExtendedClient::new(RecordingApi::with_conflicts(1));
    registry.patch(&mut client).unwrap();

    client
        .update_wiki("test", "index", None, |previous| {
            format!("{} + appended", previous)
        })
        .await
        .unwrap();

    // The retry transformed the competing edit's content and submitted
    // against the newer revision.
    let edits = client.inner().recorded_edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].0, "content from a competing edit + appended");
    assert_eq!(edits[0].1, "rev-2");
}

#[tokio::test]
async fn wiki_update_gives_up_after_bounded_attempts() {
    let registry = PatchRegistry::new();
    let mut client = ExtendedClient::new(RecordingApi::with_conflicts(u32::MAX));
    registry.patch(&mut client).unwrap();

    let err = client
        .update_wiki("test", "index", None, |previous| previous.to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PatchError::UpdateConflictUnresolved { attempts: 5 }
    ));
    assert!(client.inner().recorded_edits().is_empty());
}
