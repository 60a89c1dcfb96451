//! Ready-made filter factories for post listings.
//!
//! Each function returns a predicate over [`PostData`] for use with
//! [`Filterable`](crate::filters::Filterable) or a
//! [`FilterCapsule`](crate::filters::FilterCapsule).

use chrono::Utc;

use crate::filters::base::{filter_false, filter_number_symbol, filter_true, FilterError};
use crate::models::PostData;
use crate::util::get_seconds;

/// Keep posts written by the given author (case-insensitive, `u/` prefix
/// tolerated).
pub fn filter_author(author: impl Into<String>) -> impl Fn(&PostData) -> bool {
    let author = normalize_name(author.into(), "u/");
    move |post| post.author.eq_ignore_ascii_case(&author)
}

/// Keep posts in the given subreddit (case-insensitive, `r/` prefix
/// tolerated).
pub fn filter_subreddit(subreddit: impl Into<String>) -> impl Fn(&PostData) -> bool {
    let subreddit = normalize_name(subreddit.into(), "r/");
    move |post| post.subreddit.eq_ignore_ascii_case(&subreddit)
}

/// Keep posts whose score compares to `score` under the given symbol.
pub fn filter_score(symbol: &str, score: i64) -> Result<impl Fn(&PostData) -> bool, FilterError> {
    filter_number_symbol(|post: &PostData| post.score, symbol, score)
}

/// Keep posts whose comment count compares to `count` under the given symbol.
pub fn filter_comment_count(
    symbol: &str,
    count: i64,
) -> Result<impl Fn(&PostData) -> bool, FilterError> {
    filter_number_symbol(|post: &PostData| post.num_comments, symbol, count)
}

/// Keep posts marked over 18.
pub fn filter_nsfw() -> impl Fn(&PostData) -> bool {
    filter_true(|post: &PostData| post.over_18)
}

/// Keep posts not marked over 18.
pub fn filter_sfw() -> impl Fn(&PostData) -> bool {
    filter_false(|post: &PostData| post.over_18)
}

/// Keep self (text) posts.
pub fn filter_self_posts() -> impl Fn(&PostData) -> bool {
    filter_true(|post: &PostData| post.is_self)
}

/// Keep link posts.
pub fn filter_link_posts() -> impl Fn(&PostData) -> bool {
    filter_false(|post: &PostData| post.is_self)
}

/// Keep posts whose age compares to `amount` of `unit` under the given
/// symbol. `filter_post_age("<", 2.0, "days")` keeps posts younger than two
/// days.
///
/// Both the symbol and the time unit are validated here, before any post is
/// evaluated.
pub fn filter_post_age(
    symbol: &str,
    amount: f64,
    unit: &str,
) -> Result<impl Fn(&PostData) -> bool, FilterError> {
    let threshold = get_seconds(amount, unit)?;
    filter_number_symbol(
        |post: &PostData| Utc::now().timestamp() as f64 - post.created_utc,
        symbol,
        threshold,
    )
}

fn normalize_name(name: String, prefix: &str) -> String {
    let trimmed = name.trim_start_matches('/');
    trimmed
        .strip_prefix(prefix)
        .unwrap_or(trimmed)
        .to_string()
}
