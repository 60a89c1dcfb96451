use crate::client::RedditClient;
use crate::config::AppConfig;
use crate::patch::{ExtendedClient, PatchError, PatchRegistry};
use log::{error, info};

/// Configuration options for sending a message
#[derive(Debug, Clone)]
pub struct MessageOptions {
    /// Destination: `u/name`, `r/name`, or a bare username
    pub to: String,
    /// The subject line of the message
    pub subject: String,
    /// The body of the message
    pub body: String,
}

/// Result of a message send operation
#[derive(Debug)]
pub struct MessageResult {
    /// Whether the message was successfully sent
    pub success: bool,
    /// Formatted message for CLI output
    pub message: String,
}

/// Operation for sending a message to a user or a subreddit
pub struct MessageOperation {
    /// Configuration options for the operation
    options: MessageOptions,
    /// Extended client carrying the message method
    client: ExtendedClient<RedditClient>,
}

impl MessageOperation {
    /// Create a new message operation with a prepared extended client
    pub fn with_client(options: MessageOptions, client: ExtendedClient<RedditClient>) -> Self {
        Self { options, client }
    }

    /// Execute the message send operation
    pub async fn execute(&mut self) -> Result<MessageResult, PatchError> {
        info!("Sending message to {}", self.options.to);

        match self
            .client
            .message(&self.options.to, &self.options.subject, &self.options.body)
            .await
        {
            Ok(()) => Ok(MessageResult {
                success: true,
                message: format!("Message sent to {}", self.options.to),
            }),
            Err(PatchError::Client(err)) => Ok(MessageResult {
                success: false,
                message: format!("Error sending message: {}", err),
            }),
            // Routing and patch-state errors are programmer misuse; let
            // them propagate.
            Err(err) => Err(err),
        }
    }
}

/// CLI handler function for the message command
pub async fn handle_message_command(
    config: &AppConfig,
    to: String,
    subject: String,
    body: String,
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

    let options = MessageOptions { to, subject, body };
    let mut operation = MessageOperation::with_client(options, extended);
    match operation.execute().await {
        Ok(result) => {
            if result.success {
                println!("{}", result.message);
            } else {
                eprintln!("{}", result.message);
            }
            Ok(())
        }
        Err(err) => {
            error!("Error executing message operation: {}", err);
            Err(err)
        }
    }
}
