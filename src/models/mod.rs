//! Response models for the slice of the Reddit API this crate talks to.

use serde::Deserialize;

/// Top-level response for a `new.json` listing
#[derive(Deserialize, Debug)]
pub struct ListingResponse {
    pub kind: String,
    pub data: Listing,
}

/// Collection of posts in a listing
#[derive(Deserialize, Debug)]
pub struct Listing {
    pub after: Option<String>,
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<i32>,
    pub children: Vec<PostEntity>,
}

/// Reddit post entity with kind and data fields
#[derive(Deserialize, Debug)]
pub struct PostEntity {
    pub kind: String,
    pub data: PostData,
}

/// The post fields consumed by the filter factories and the CLI output.
///
/// Reddit sends far more than this; everything else is dropped during
/// deserialization.
#[derive(Deserialize, Debug, Clone)]
pub struct PostData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub title: String,
    pub author: String,
    pub subreddit: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub is_self: bool,
    pub created_utc: f64,
}

impl PostData {
    /// The API fullname for this post (t3_ prefix for posts).
    pub fn thing_id(&self) -> String {
        format!("t3_{}", self.id)
    }

    /// Format a multi-line summary of the post for CLI display
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Title: {}\n", self.title));
        out.push_str(&format!("Author: u/{}\n", self.author));
        out.push_str(&format!("Subreddit: r/{}\n", self.subreddit));
        out.push_str(&format!(
            "Score: {} | Comments: {}\n",
            self.score, self.num_comments
        ));
        if self.is_self {
            let text = self.selftext.trim();
            if !text.is_empty() {
                out.push_str(&format!("Text: {}\n", text));
            }
        } else {
            out.push_str(&format!("URL: {}\n", self.url));
        }
        out.push_str(&format!(
            "Permalink: https://reddit.com{}\n",
            self.permalink
        ));
        out
    }
}

/// A wiki page snapshot: the revision id edits must be submitted against,
/// plus the current markdown content.
#[derive(Deserialize, Debug, Clone)]
pub struct WikiRevision {
    pub id: String,
    pub content_md: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_deserializes_with_missing_optional_fields() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "after": null,
                "before": null,
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "id": "abc123",
                            "title": "hello",
                            "author": "someuser",
                            "subreddit": "rust",
                            "created_utc": 1700000000.0
                        }
                    }
                ]
            }
        }"#;

        let parsed: ListingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.children.len(), 1);
        let post = &parsed.data.children[0].data;
        assert_eq!(post.thing_id(), "t3_abc123");
        assert_eq!(post.score, 0);
        assert!(!post.over_18);
    }
}
