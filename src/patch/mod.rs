//! Extension methods for the Reddit client, managed through an explicit
//! registry.
//!
//! The extension methods live in a per-adapter method table rather than on
//! the client type itself: [`ExtendedClient`] wraps any [`RedditApi`]
//! delegate and exposes the added methods, while [`PatchRegistry`] installs
//! and removes the bindings. Callers depend on the adapter, never on
//! mutating the wrapped client.
//!
//! ```no_run
//! use redditions::client::RedditClient;
//! use redditions::patch::{ExtendedClient, PatchRegistry};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = PatchRegistry::new();
//! let mut reddit = ExtendedClient::new(RedditClient::new());
//! registry.patch(&mut reddit)?;
//! reddit.message("u/someuser", "title", "body").await?;
//! registry.unpatch(&mut reddit)?;
//! # Ok(())
//! # }
//! ```

pub mod message;
mod update;

pub use message::{route_message, MessageRoute, MessageRouter, SIGIL_ROUTER};

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::client::{RedditApi, RedditClientError};

/// Errors raised by the patch layer itself.
///
/// Delegated failures from the wrapped client pass through unmodified in
/// the [`PatchError::Client`] variant.
#[derive(Debug)]
pub enum PatchError {
    /// `unpatch()` was called without a preceding `patch()`.
    NotPatched,
    /// An extension method was invoked on an adapter it is not installed on.
    MethodNotInstalled(&'static str),
    /// A message target string could not be resolved to a user or subreddit.
    UnroutableTarget(String),
    /// A wiki update kept conflicting after the allowed number of attempts.
    UpdateConflictUnresolved { attempts: u32 },
    /// A failure from the wrapped client, passed through.
    Client(RedditClientError),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PatchError::NotPatched => write!(f, "unpatch() called before patch()"),
            PatchError::MethodNotInstalled(name) => {
                write!(f, "extension method {:?} is not installed; call patch() first", name)
            }
            PatchError::UnroutableTarget(target) => write!(
                f,
                "cannot route message target {:?}: expected u/name, r/name, or a bare username",
                target
            ),
            PatchError::UpdateConflictUnresolved { attempts } => {
                write!(f, "wiki update still conflicting after {} attempts", attempts)
            }
            PatchError::Client(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatchError::Client(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RedditClientError> for PatchError {
    fn from(err: RedditClientError) -> Self {
        PatchError::Client(err)
    }
}

/// The kind of object an extension method is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchTarget {
    Client,
    WikiPage,
}

/// Identifies one extension method slot: target kind plus method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub target: PatchTarget,
    pub name: &'static str,
}

impl MethodKey {
    pub const MESSAGE: MethodKey = MethodKey {
        target: PatchTarget::Client,
        name: "message",
    };
    pub const WIKI_UPDATE: MethodKey = MethodKey {
        target: PatchTarget::WikiPage,
        name: "update",
    };
}

/// The behavior bound into an extension method slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodBinding {
    /// Routing function for `message`, identified by its name.
    MessageRouter(MessageRouter),
    /// Conflict-retrying wiki `update` with a bounded attempt count.
    WikiUpdate { max_attempts: u32 },
}

/// What a method slot held before patching.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SavedBinding {
    Absent,
    Bound(MethodBinding),
}

/// Adapter over a [`RedditApi`] delegate carrying the installed extension
/// methods.
pub struct ExtendedClient<C> {
    inner: C,
    methods: HashMap<MethodKey, MethodBinding>,
}

impl<C> ExtendedClient<C> {
    /// Wrap a delegate with an empty method table.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            methods: HashMap::new(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Install a binding directly, e.g. a custom message router. Bindings
    /// installed this way are saved and restored across a
    /// `patch()`/`unpatch()` cycle.
    pub fn install_method(&mut self, key: MethodKey, binding: MethodBinding) {
        self.methods.insert(key, binding);
    }

    pub fn method(&self, key: MethodKey) -> Option<MethodBinding> {
        self.methods.get(&key).copied()
    }

    pub fn has_method(&self, key: MethodKey) -> bool {
        self.methods.contains_key(&key)
    }

    fn require_method(&self, key: MethodKey) -> Result<MethodBinding, PatchError> {
        self.method(key)
            .ok_or(PatchError::MethodNotInstalled(key.name))
    }
}

impl<C: RedditApi> ExtendedClient<C> {
    /// Send a message to a user or a subreddit, chosen by the target
    /// string.
    ///
    /// `u/name` (or a bare name) goes to the user path; `r/name` goes to
    /// the subreddit path, with the destination prefixed `/r/` as the
    /// compose endpoint expects. Requires the `message` binding to be
    /// installed.
    pub async fn message(&self, to: &str, subject: &str, body: &str) -> Result<(), PatchError> {
        let MethodBinding::MessageRouter(router) = self.require_method(MethodKey::MESSAGE)? else {
            return Err(PatchError::MethodNotInstalled(MethodKey::MESSAGE.name));
        };

        match router.route(to)? {
            MessageRoute::User(name) => {
                self.inner.compose_message(&name, subject, body).await?;
            }
            MessageRoute::Subreddit(name) => {
                let dest = format!("/r/{}", name);
                self.inner.compose_message(&dest, subject, body).await?;
            }
        }
        Ok(())
    }

    /// Safely update a wiki page based on its current content.
    ///
    /// `transformation` receives the previous content and returns the new
    /// content; edit conflicts are retried against the server's newer
    /// content up to the bound carried in the `update` binding.
    pub async fn update_wiki<F>(
        &self,
        subreddit: &str,
        page: &str,
        reason: Option<&str>,
        transformation: F,
    ) -> Result<(), PatchError>
    where
        F: Fn(&str) -> String,
    {
        let MethodBinding::WikiUpdate { max_attempts } =
            self.require_method(MethodKey::WIKI_UPDATE)?
        else {
            return Err(PatchError::MethodNotInstalled(MethodKey::WIKI_UPDATE.name));
        };

        update::update_with_retries(
            &self.inner,
            subreddit,
            page,
            reason,
            transformation,
            max_attempts,
        )
        .await
    }
}

/// The fixed set of extension bindings `patch()` installs.
fn default_table() -> [(MethodKey, MethodBinding); 2] {
    [
        (MethodKey::MESSAGE, MethodBinding::MessageRouter(SIGIL_ROUTER)),
        (
            MethodKey::WIKI_UPDATE,
            MethodBinding::WikiUpdate { max_attempts: 5 },
        ),
    ]
}

#[derive(Default)]
struct RegistryState {
    patched: bool,
    saved: HashMap<MethodKey, SavedBinding>,
}

/// Applies and reverts the fixed extension table on an adapter,
/// remembering what each slot held before.
///
/// The registry is an explicitly constructed, explicitly passed object; a
/// mutex guards the patch/unpatch transitions so concurrent callers cannot
/// observe a half-applied state. One registry tracks one patch
/// application at a time.
pub struct PatchRegistry {
    state: Mutex<RegistryState>,
}

impl PatchRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Install the extension table on `client`.
    ///
    /// Each slot's current binding (or its absence) is recorded before the
    /// replacement goes in. Calling `patch()` again without an intervening
    /// `unpatch()` re-applies the table but never overwrites the originally
    /// recorded state.
    pub fn patch<C>(&self, client: &mut ExtendedClient<C>) -> Result<(), PatchError> {
        let mut state = self.state.lock().unwrap();
        for (key, binding) in default_table() {
            let previous = client.methods.insert(key, binding);
            state.saved.entry(key).or_insert(match previous {
                Some(binding) => SavedBinding::Bound(binding),
                None => SavedBinding::Absent,
            });
        }
        state.patched = true;
        Ok(())
    }

    /// Restore every slot recorded by `patch()`: previously bound methods
    /// are re-installed, previously absent slots are emptied.
    pub fn unpatch<C>(&self, client: &mut ExtendedClient<C>) -> Result<(), PatchError> {
        let mut state = self.state.lock().unwrap();
        if !state.patched {
            return Err(PatchError::NotPatched);
        }
        for (key, saved) in state.saved.drain() {
            match saved {
                SavedBinding::Absent => {
                    client.methods.remove(&key);
                }
                SavedBinding::Bound(binding) => {
                    client.methods.insert(key, binding);
                }
            }
        }
        state.patched = false;
        Ok(())
    }

    pub fn is_patched(&self) -> bool {
        self.state.lock().unwrap().patched
    }
}

impl Default for PatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}
