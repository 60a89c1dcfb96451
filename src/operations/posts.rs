use crate::client::{RedditClient, RedditClientError};
use crate::filters::posts::{
    filter_author, filter_post_age, filter_score, filter_self_posts, filter_sfw,
};
use crate::filters::{Filterable, FilterError};
use crate::models::PostData;
use chrono::DateTime;
use log::{error, info};

/// Configuration options for fetching and filtering posts
#[derive(Debug, Clone)]
pub struct PostsOptions {
    /// The number of posts to retrieve before filtering
    pub count: i32,
    /// The name of the subreddit to fetch posts from (None for public frontpage)
    pub subreddit: Option<String>,
    /// Keep only posts by this author
    pub author: Option<String>,
    /// Keep only posts with at least this score
    pub min_score: Option<i64>,
    /// Keep only posts younger than this many days
    pub max_age_days: Option<f64>,
    /// Drop posts marked over 18
    pub sfw_only: bool,
    /// Keep only self (text) posts
    pub self_only: bool,
}

impl Default for PostsOptions {
    fn default() -> Self {
        Self {
            count: 25,
            subreddit: None,
            author: None,
            min_score: None,
            max_age_days: None,
            sfw_only: false,
            self_only: false,
        }
    }
}

/// Result of a filtered posts fetch
#[derive(Debug)]
pub struct PostsResult {
    /// How many posts the listing returned
    pub fetched: usize,
    /// How many posts survived the filters
    pub kept: usize,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
}

/// Operation for fetching posts and running them through a filter chain
pub struct PostsOperation {
    /// Configuration options for the operation
    options: PostsOptions,
    /// Reddit client for API interactions
    client: RedditClient,
}

impl PostsOperation {
    /// Create a new posts operation with the provided options
    pub fn new(options: PostsOptions) -> Self {
        let client = RedditClient::new();
        Self { options, client }
    }

    /// Create a new posts operation with a custom Reddit client
    pub fn with_client(options: PostsOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    /// Build the filter chain described by the options.
    fn build_filterable(
        &self,
        posts: Vec<PostData>,
    ) -> Result<Filterable<std::vec::IntoIter<PostData>>, FilterError> {
        let mut filterable = Filterable::new(posts);

        if let Some(author) = &self.options.author {
            filterable = filterable.filter(filter_author(author.clone()));
        }
        if let Some(min_score) = self.options.min_score {
            filterable = filterable.filter(filter_score(">=", min_score)?);
        }
        if let Some(max_age) = self.options.max_age_days {
            filterable = filterable.filter(filter_post_age("<", max_age, "days")?);
        }
        if self.options.sfw_only {
            filterable = filterable.filter(filter_sfw());
        }
        if self.options.self_only {
            filterable = filterable.filter(filter_self_posts());
        }

        Ok(filterable)
    }

    /// Execute the posts operation
    pub async fn execute(&self) -> Result<PostsResult, RedditClientError> {
        info!(
            "Fetching {} posts from {}",
            self.options.count,
            self.options
                .subreddit
                .as_deref()
                .unwrap_or("public frontpage")
        );

        let listing = match &self.options.subreddit {
            Some(sub) => self.client.fetch_new_posts(sub, self.options.count).await,
            None => self.client.fetch_public_new_posts(self.options.count).await,
        }?;

        let posts: Vec<PostData> = listing
            .data
            .children
            .into_iter()
            .map(|entity| entity.data)
            .collect();
        let fetched = posts.len();

        let filterable = self
            .build_filterable(posts)
            .map_err(|err| RedditClientError::ApiError(err.to_string()))?;
        let kept: Vec<PostData> = filterable.collect();

        let mut output = String::new();
        if kept.is_empty() {
            output.push_str("No posts matched the filters.\n");
        } else {
            output.push_str(&format!(
                "{} of {} posts matched the filters\n",
                kept.len(),
                fetched
            ));
            for (i, post) in kept.iter().enumerate() {
                output.push_str(&format!("{:2}. {}", i + 1, Self::format_line(post)));
            }
        }

        Ok(PostsResult {
            fetched,
            kept: kept.len(),
            formatted_output: output,
        })
    }

    // One line per post for listing output
    fn format_line(post: &PostData) -> String {
        let timestamp = DateTime::from_timestamp(post.created_utc as i64, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());

        let title = if post.title.chars().count() > 60 {
            let mut short: String = post.title.chars().take(57).collect();
            short.push_str("...");
            short
        } else {
            post.title.clone()
        };

        format!(
            "[{}] {} by u/{} in r/{} (score {}) | {}\n",
            timestamp,
            title,
            post.author,
            post.subreddit,
            post.score,
            post.thing_id()
        )
    }
}

/// CLI handler function for the posts command
pub async fn handle_posts_command(options: PostsOptions) -> Result<(), RedditClientError> {
    let operation = PostsOperation::new(options);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching posts: {}", err);
            Err(err)
        }
    }
}
