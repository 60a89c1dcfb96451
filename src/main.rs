use clap::Parser;
use log::error;
use redditions::cli::{Cli, Commands};
use redditions::config::AppConfig;
use redditions::operations::message::handle_message_command;
use redditions::operations::posts::{handle_posts_command, PostsOptions};
use redditions::operations::wiki::{handle_wiki_append_command, WikiAppendOptions};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    let outcome = match cli.command {
        Commands::Message { to, subject, body } => {
            handle_message_command(&config, to, subject, body)
                .await
                .map_err(|err| err.to_string())
        }
        Commands::Posts {
            count,
            subreddit,
            author,
            min_score,
            max_age_days,
            sfw_only,
            self_only,
        } => {
            let options = PostsOptions {
                count,
                subreddit,
                author,
                min_score,
                max_age_days,
                sfw_only,
                self_only,
            };
            handle_posts_command(options)
                .await
                .map_err(|err| err.to_string())
        }
        Commands::WikiAppend {
            subreddit,
            page,
            text,
            reason,
        } => {
            let options = WikiAppendOptions {
                subreddit,
                page,
                text,
                reason,
            };
            handle_wiki_append_command(&config, options)
                .await
                .map_err(|err| err.to_string())
        }
    };

    if let Err(err) = outcome {
        error!("{}", err);
        std::process::exit(1);
    }
}
