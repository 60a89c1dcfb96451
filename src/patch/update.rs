//! Conflict-safe wiki updates for the `update` extension method.

use log::debug;

use crate::client::{RedditApi, RedditClientError};
use crate::patch::PatchError;

/// Update a wiki page based on its current content.
///
/// Fetches the page's current revision, applies `transformation` to the
/// content, and submits the edit against that revision. If another edit
/// landed in between, the server's new content is re-transformed and the
/// edit resubmitted, up to `max_attempts` times.
pub(crate) async fn update_with_retries<C, F>(
    client: &C,
    subreddit: &str,
    page: &str,
    reason: Option<&str>,
    transformation: F,
    max_attempts: u32,
) -> Result<(), PatchError>
where
    C: RedditApi,
    F: Fn(&str) -> String,
{
    let revision = client.wiki_page(subreddit, page).await?;
    let mut content = revision.content_md;
    let mut revision_id = revision.id;

    for attempt in 1..=max_attempts {
        let new_content = transformation(&content);
        match client
            .edit_wiki_page(subreddit, page, &new_content, reason, &revision_id)
            .await
        {
            Ok(()) => return Ok(()),
            Err(RedditClientError::EditConflict {
                new_content: server_content,
                new_revision,
            }) => {
                debug!(
                    "Edit conflict on r/{}/wiki/{} (attempt {}), retrying against revision {}",
                    subreddit, page, attempt, new_revision
                );
                content = server_content;
                revision_id = new_revision;
            }
            Err(err) => return Err(PatchError::Client(err)),
        }
    }

    Err(PatchError::UpdateConflictUnresolved {
        attempts: max_attempts,
    })
}
