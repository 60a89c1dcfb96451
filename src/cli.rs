use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "redditions",
    version = "0.1",
    about = "Convenience extensions for the Reddit API: messaging, safe wiki updates, and post filtering."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Send a message to a user or a subreddit.
    /// Targets are disambiguated by sigil: u/name messages the user,
    /// r/name messages the subreddit, a bare name is treated as a username.
    /// Credentials are read from the environment or a .env file
    /// (REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET, REDDIT_USERNAME, REDDIT_PASSWORD).
    Message {
        /// Destination of the message.
        #[arg(help = "Target: u/name, r/name, or a bare username", required = true)]
        to: String,

        /// The subject line of the message.
        #[arg(help = "Message subject", required = true)]
        subject: String,

        /// The body of the message.
        #[arg(help = "Message body", required = true)]
        body: String,
    },

    /// Fetch new posts and run them through a filter chain.
    Posts {
        /// The number of posts to retrieve before filtering.
        #[arg(long, short, help = "Number of posts to retrieve", default_value = "25")]
        count: i32,

        /// The name of the subreddit to fetch posts from.
        /// If not provided, posts from the public Reddit frontpage will be retrieved.
        #[arg(long, short, help = "Subreddit name (optional)", required = false)]
        subreddit: Option<String>,

        /// Keep only posts by this author.
        #[arg(long, short, help = "Filter by author", required = false)]
        author: Option<String>,

        /// Keep only posts with at least this score.
        #[arg(long, help = "Minimum score", required = false)]
        min_score: Option<i64>,

        /// Keep only posts younger than this many days.
        #[arg(long, help = "Maximum age in days", required = false)]
        max_age_days: Option<f64>,

        /// Drop posts marked over 18.
        #[arg(long, help = "Hide NSFW posts", required = false)]
        sfw_only: bool,

        /// Keep only self (text) posts.
        #[arg(long, help = "Show only text posts", required = false)]
        self_only: bool,
    },

    /// Append text to a subreddit wiki page, retrying through edit conflicts.
    /// Uses the same environment credentials as the message command.
    WikiAppend {
        /// The subreddit owning the wiki.
        #[arg(help = "Subreddit name", required = true)]
        subreddit: String,

        /// The wiki page to update.
        #[arg(help = "Wiki page name", required = true)]
        page: String,

        /// Text appended to the end of the page.
        #[arg(help = "Text to append", required = true)]
        text: String,

        /// The reason recorded for the revision.
        #[arg(long, short, help = "Revision reason (optional)", required = false)]
        reason: Option<String>,
    },
}
