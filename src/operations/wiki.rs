use crate::config::AppConfig;
use crate::patch::{ExtendedClient, PatchError, PatchRegistry};
use log::{error, info};

/// Configuration options for appending to a wiki page
#[derive(Debug, Clone)]
pub struct WikiAppendOptions {
    /// The subreddit owning the wiki
    pub subreddit: String,
    /// The wiki page name
    pub page: String,
    /// Text appended to the end of the page
    pub text: String,
    /// Optional revision reason
    pub reason: Option<String>,
}

/// CLI handler function for the wiki-append command
pub async fn handle_wiki_append_command(
    config: &AppConfig,
    options: WikiAppendOptions,
) -> Result<(), PatchError> {
    let mut client = config.create_client();
    client
        .authenticate_with_api_credentials(
            &config.require_client_id(),
            &config.require_client_secret(),
            &config.require_username(),
            &config.require_password(),
        )
        .await?;

    let registry = PatchRegistry::new();
    let mut extended = ExtendedClient::new(client);
    registry.patch(&mut extended)?;

    info!(
        "Appending to r/{}/wiki/{}",
        options.subreddit, options.page
    );

    let text = options.text.clone();
    let result = extended
        .update_wiki(
            &options.subreddit,
            &options.page,
            options.reason.as_deref(),
            move |previous| format!("{}\n\n{}", previous.trim_end(), text),
        )
        .await;

    match result {
        Ok(()) => {
            println!(
                "Updated r/{}/wiki/{}",
                options.subreddit, options.page
            );
            Ok(())
        }
        Err(err) => {
            error!("Error updating wiki page: {}", err);
            Err(err)
        }
    }
}
