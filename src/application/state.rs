//! Observable application state.
//!
//! Session, theme and loading state are held in `tokio::sync::watch` cells
//! owned by whoever builds the application and passed down explicitly.
//! Writes that only make sense with a local store behind them are gated on
//! [`Platform`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{Preference, Session, Theme, THEME_KEY, TOKEN_KEY};
use crate::ports::{ContentStore, ContentStoreError};

/// Whether client-side persistence is available in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// A local store backs session and theme writes.
    Available,
    /// Writes are ignored (e.g. while rendering on the server).
    Unavailable,
}

impl Platform {
    pub fn is_available(self) -> bool {
        self == Platform::Available
    }
}

/// Global "a fetch is in flight" flag.
#[derive(Debug, Clone)]
pub struct LoadingState {
    tx: Arc<watch::Sender<bool>>,
}

impl LoadingState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, loading: bool) {
        self.tx.send_replace(loading);
    }

    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Current session, if any.
#[derive(Clone)]
pub struct SessionState {
    platform: Platform,
    store: Arc<dyn ContentStore>,
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionState {
    pub fn new(platform: Platform, store: Arc<dyn ContentStore>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            platform,
            store,
            tx: Arc::new(tx),
        }
    }

    /// Persist the session token and publish the session.
    ///
    /// `None` removes the stored token. Does nothing without a platform.
    pub async fn set_session(&self, session: Option<Session>) -> Result<(), ContentStoreError> {
        if !self.platform.is_available() {
            return Ok(());
        }

        match &session {
            Some(session) => {
                self.store
                    .set(TOKEN_KEY, session.token.expose())
                    .await?
            }
            None => self.store.remove(TOKEN_KEY).await?,
        }

        self.tx.send_replace(session);
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

/// Client-side theme choice.
///
/// Starts from the stored value and falls back to dark, which differs from
/// the light default used when negotiating on the server.
#[derive(Clone)]
pub struct ThemeState {
    platform: Platform,
    store: Arc<dyn ContentStore>,
    tx: Arc<watch::Sender<Theme>>,
}

impl ThemeState {
    pub const INITIAL: Theme = Theme::Dark;

    pub async fn load(
        platform: Platform,
        store: Arc<dyn ContentStore>,
    ) -> Result<Self, ContentStoreError> {
        let initial = if platform.is_available() {
            store
                .get(THEME_KEY)
                .await?
                .and_then(|raw| raw.parse::<Theme>().ok())
                .unwrap_or(Self::INITIAL)
        } else {
            Self::INITIAL
        };

        let (tx, _rx) = watch::channel(initial);
        Ok(Self {
            platform,
            store,
            tx: Arc::new(tx),
        })
    }

    /// Persist and publish a new theme. Does nothing without a platform.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), ContentStoreError> {
        if !self.platform.is_available() {
            return Ok(());
        }

        self.store.set(THEME_KEY, theme.as_str()).await?;
        self.tx.send_replace(theme);
        tracing::debug!(theme = %theme, "Theme updated");
        Ok(())
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }
}
