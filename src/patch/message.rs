//! Target resolution for the `message` extension method.

use crate::patch::PatchError;

/// A named message-target resolver.
///
/// The name is the router's identity: two routers compare equal when
/// their names match. Function pointers are not compared, since the same
/// function can have different addresses across codegen units.
#[derive(Debug, Clone, Copy)]
pub struct MessageRouter {
    name: &'static str,
    route: fn(&str) -> Result<MessageRoute, PatchError>,
}

impl MessageRouter {
    pub const fn new(name: &'static str, route: fn(&str) -> Result<MessageRoute, PatchError>) -> Self {
        Self { name, route }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a target string to a message route.
    pub fn route(&self, target: &str) -> Result<MessageRoute, PatchError> {
        (self.route)(target)
    }
}

impl PartialEq for MessageRouter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MessageRouter {}

/// The router `patch()` installs: sigil-based target resolution via
/// [`route_message`].
pub const SIGIL_ROUTER: MessageRouter = MessageRouter::new("sigil", route_message);

/// Where a message is headed after resolving the target string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRoute {
    /// A private message to a user.
    User(String),
    /// A message to a subreddit's modmail.
    Subreddit(String),
}

/// Resolve a target string to a message route.
///
/// The rule: `u/name` or `/u/name` goes to the user path, `r/name` or
/// `/r/name` goes to the subreddit path, and a bare name is treated as a
/// username. An empty target, or a sigil with nothing after it, is
/// rejected before any network call happens.
pub fn route_message(target: &str) -> Result<MessageRoute, PatchError> {
    let trimmed = target.trim();
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);

    if let Some(name) = trimmed.strip_prefix("u/") {
        if name.is_empty() {
            return Err(PatchError::UnroutableTarget(target.to_string()));
        }
        return Ok(MessageRoute::User(name.to_string()));
    }
    if let Some(name) = trimmed.strip_prefix("r/") {
        if name.is_empty() {
            return Err(PatchError::UnroutableTarget(target.to_string()));
        }
        return Ok(MessageRoute::Subreddit(name.to_string()));
    }
    if trimmed.is_empty() {
        return Err(PatchError::UnroutableTarget(target.to_string()));
    }
    Ok(MessageRoute::User(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_sigil_routes_to_user() {
        assert_eq!(
            route_message("u/someuser").unwrap(),
            MessageRoute::User("someuser".to_string())
        );
        assert_eq!(
            route_message("/u/someuser").unwrap(),
            MessageRoute::User("someuser".to_string())
        );
    }

    #[test]
    fn subreddit_sigil_routes_to_subreddit() {
        assert_eq!(
            route_message("r/somecommunity").unwrap(),
            MessageRoute::Subreddit("somecommunity".to_string())
        );
        assert_eq!(
            route_message("/r/somecommunity").unwrap(),
            MessageRoute::Subreddit("somecommunity".to_string())
        );
    }

    #[test]
    fn bare_name_is_a_username() {
        assert_eq!(
            route_message("someuser").unwrap(),
            MessageRoute::User("someuser".to_string())
        );
    }

    #[test]
    fn router_identity_is_its_name() {
        fn other_router(_target: &str) -> Result<MessageRoute, PatchError> {
            Ok(MessageRoute::User("fixed".to_string()))
        }

        assert_eq!(SIGIL_ROUTER, MessageRouter::new("sigil", route_message));
        // Equality never consults the function pointer.
        assert_eq!(SIGIL_ROUTER, MessageRouter::new("sigil", other_router));
        assert_ne!(SIGIL_ROUTER, MessageRouter::new("custom", route_message));
    }

    #[test]
    fn empty_targets_are_rejected() {
        assert!(matches!(
            route_message(""),
            Err(PatchError::UnroutableTarget(_))
        ));
        assert!(matches!(
            route_message("u/"),
            Err(PatchError::UnroutableTarget(_))
        ));
        assert!(matches!(
            route_message("/r/"),
            Err(PatchError::UnroutableTarget(_))
        ));
    }
}
