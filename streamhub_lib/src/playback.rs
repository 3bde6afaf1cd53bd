//! Resolution of directly playable media URLs.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::client::CachedClient;

/// Something the backend can resolve to a playable URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackTarget {
    Movie {
        id: String,
    },
    /// Episodes need their container extension (`mkv`, `mp4`, ...) to resolve.
    Episode {
        episode_id: String,
        container_extension: String,
    },
    LiveStream {
        stream_id: String,
    },
}

impl fmt::Display for PlaybackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie { id } => write!(f, "movie {}", id),
            Self::Episode {
                episode_id,
                container_extension,
            } => write!(f, "episode {} ({})", episode_id, container_extension),
            Self::LiveStream { stream_id } => write!(f, "live stream {}", stream_id),
        }
    }
}

/// Progress of one link resolution.
///
/// `Pending` is the only state in which a player should show a loading
/// indicator; `Unavailable` is terminal until the caller retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkState {
    Pending,
    Ready(String),
    Unavailable(String),
}

impl LinkState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Ready(link) => Some(link),
            _ => None,
        }
    }
}

/// Turns playback targets into [`LinkState`]s.
#[derive(Clone)]
pub struct LinkResolver {
    client: Arc<CachedClient>,
}

impl LinkResolver {
    pub fn new(client: Arc<CachedClient>) -> Self {
        Self { client }
    }

    /// Resolves `target`, folding failures into [`LinkState::Unavailable`].
    pub async fn resolve(&self, target: &PlaybackTarget) -> LinkState {
        match self.client.resolve_link(target).await {
            Ok(link) => LinkState::Ready(link),
            Err(e) => {
                tracing::warn!("Playback link for {} unavailable: {}", target, e);
                LinkState::Unavailable(e.to_string())
            }
        }
    }

    /// Starts resolving in the background. The receiver holds
    /// [`LinkState::Pending`] until the request finishes.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, target: PlaybackTarget) -> watch::Receiver<LinkState> {
        let (tx, rx) = watch::channel(LinkState::Pending);
        let resolver = self.clone();
        tokio::spawn(async move {
            let state = resolver.resolve(&target).await;
            tx.send_replace(state);
        });
        rx
    }
}
