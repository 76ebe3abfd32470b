//! Command line interface.
//!
//! `serve` runs the web tier. The other commands act as a client: they keep
//! the session token, theme and cached page payloads in the configured
//! local store and talk to the backend through the content loader.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::adapters::storage::{FileContentStore, InMemoryContentStore, RedisContentStore};
use crate::application::{
    ContentLoader, LoaderError, LoadingState, Platform, SessionState, ThemeState,
};
use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::domain::{BearerToken, Session, Theme, TOKEN_KEY};
use crate::ports::{BackendClient, BackendError, ContentStore, ContentStoreError};
use crate::server::{self, ServerError};

#[derive(Debug, Parser)]
#[command(
    name = "cogito",
    about = "Cogito AI tutor web tier and content client",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve,

    /// Fetch the profile for a token and store the session locally.
    Login {
        /// Bearer token issued by the backend.
        token: String,
    },

    /// End the backend session and forget the stored token.
    Logout,

    /// List courses (never cached).
    Courses,

    /// Print the weekly schedule for a course.
    Schedule { course_id: String },

    /// Print the flashcards for a course day (`day_1` .. `day_7`).
    Flashcards { course_id: String, day: String },

    /// Print the quiz for a course day (`day_1` .. `day_7`).
    Quiz { course_id: String, day: String },

    /// Show the stored theme, or set it.
    Theme { theme: Option<Theme> },

    /// Remove every locally stored value, including the session token.
    ClearCache,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("empty token")]
    EmptyToken,

    #[error("redis storage selected but no redis url configured")]
    MissingRedisUrl,

    #[error(transparent)]
    Store(#[from] ContentStoreError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Content store selected by `storage.backend`.
pub async fn build_store(config: &StorageConfig) -> Result<Arc<dyn ContentStore>, CliError> {
    let store: Arc<dyn ContentStore> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryContentStore::new()),
        StorageBackend::File => Arc::new(FileContentStore::new(&config.path)),
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or(CliError::MissingRedisUrl)?;
            Arc::new(RedisContentStore::connect(url, config.redis_prefix.clone()).await?)
        }
    };
    Ok(store)
}

pub async fn run(cli: Cli, config: &AppConfig) -> Result<(), CliError> {
    if let Command::Serve = cli.command {
        server::serve(config).await?;
        return Ok(());
    }

    let store = build_store(&config.storage).await?;
    let backend: Arc<dyn BackendClient> = Arc::new(server::backend_client(config)?);

    execute(cli.command, store, backend).await
}

/// Client commands against an explicit store and backend.
pub async fn execute(
    command: Command,
    store: Arc<dyn ContentStore>,
    backend: Arc<dyn BackendClient>,
) -> Result<(), CliError> {
    let loader = ContentLoader::new(store.clone(), backend.clone(), LoadingState::new());

    match command {
        Command::Serve => {}

        Command::Login { token } => {
            let token = BearerToken::new(token).ok_or(CliError::EmptyToken)?;
            let profile = backend.fetch_profile(&token).await?;
            let name = profile.display_name();

            SessionState::new(Platform::Available, store)
                .set_session(Some(Session::new(token, profile)))
                .await?;

            tracing::info!("Session stored");
            println!("Logged in as {name}");
        }

        Command::Logout => {
            let token = store
                .get(TOKEN_KEY)
                .await?
                .and_then(|raw| BearerToken::new(raw));
            if let Some(token) = token {
                if let Err(e) = backend.logout(&token).await {
                    tracing::warn!(error = %e, "Backend logout failed");
                }
            }

            SessionState::new(Platform::Available, store)
                .set_session(None)
                .await?;
            println!("Logged out");
        }

        Command::Courses => print_json(&loader.load_courses().await?)?,

        Command::Schedule { course_id } => print_json(&loader.load_schedule(&course_id).await?)?,

        Command::Flashcards { course_id, day } => {
            let content = loader.load_day_content(&course_id, &day).await?;
            print_json(&content.flashcards)?;
        }

        Command::Quiz { course_id, day } => {
            let content = loader.load_day_content(&course_id, &day).await?;
            print_json(&content.quiz)?;
        }

        Command::Theme { theme } => {
            let state = ThemeState::load(Platform::Available, store).await?;
            if let Some(theme) = theme {
                state.set_theme(theme).await?;
            }
            println!("{}", state.current());
        }

        Command::ClearCache => {
            store.clear().await?;
            tracing::info!("Local store cleared");
            println!("Cache cleared");
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::{MockBackendClient, RecordedCall};
    use crate::domain::{Profile, THEME_KEY};
    use clap::CommandFactory;

    fn profile() -> Profile {
        Profile {
            id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            avatar_url: String::new(),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_day_commands() {
        let cli = Cli::try_parse_from(["cogito", "quiz", "c-1", "day_3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Quiz { ref course_id, ref day } if course_id == "c-1" && day == "day_3"
        ));
    }

    #[test]
    fn parses_theme_values() {
        let cli = Cli::try_parse_from(["cogito", "theme", "light"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { theme: Some(Theme::Light) }));

        assert!(Cli::try_parse_from(["cogito", "theme", "purple"]).is_err());
    }

    #[tokio::test]
    async fn build_store_memory_and_file() {
        let memory = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        assert!(build_store(&memory).await.is_ok());

        let dir = tempfile::tempdir().unwrap();
        let file = StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().to_path_buf(),
            ..Default::default()
        };
        let store = build_store(&file).await.unwrap();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn build_store_redis_requires_url() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            redis_url: None,
            ..Default::default()
        };
        assert!(matches!(
            build_store(&config).await,
            Err(CliError::MissingRedisUrl)
        ));
    }

    #[tokio::test]
    async fn login_stores_token() {
        let store: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new());
        let backend = Arc::new(MockBackendClient::new().with_profile(profile()));

        execute(
            Command::Login {
                token: "tok-1".to_string(),
            },
            store.clone(),
            backend,
        )
        .await
        .unwrap();

        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), Some("tok-1".to_string()));
    }

    #[tokio::test]
    async fn failed_login_stores_nothing() {
        let store: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new());
        let backend = Arc::new(MockBackendClient::new().with_status(401));

        let result = execute(
            Command::Login {
                token: "tok-1".to_string(),
            },
            store.clone(),
            backend,
        )
        .await;

        assert!(matches!(result, Err(CliError::Backend(_))));
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_clears_token_and_notifies_backend() {
        let store: Arc<dyn ContentStore> =
            Arc::new(InMemoryContentStore::with_entries([(TOKEN_KEY, "tok-1")]));
        let backend = Arc::new(MockBackendClient::new());

        execute(Command::Logout, store.clone(), backend.clone())
            .await
            .unwrap();

        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        assert!(matches!(
            backend.calls().as_slice(),
            [RecordedCall::Logout { token }] if token == "tok-1"
        ));
    }

    #[tokio::test]
    async fn theme_command_persists_choice() {
        let store: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new());
        let backend = Arc::new(MockBackendClient::new());

        execute(
            Command::Theme {
                theme: Some(Theme::Light),
            },
            store.clone(),
            backend.clone(),
        )
        .await
        .unwrap();

        assert_eq!(store.get(THEME_KEY).await.unwrap(), Some("light".to_string()));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn clear_cache_empties_store() {
        let store: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::with_entries([
            (TOKEN_KEY, "tok-1"),
            ("c-1-content-day_1", "{}"),
        ]));
        let backend = Arc::new(MockBackendClient::new());

        let cli = Cli::try_parse_from(["cogito", "clear-cache"]).unwrap();
        execute(cli.command, store.clone(), backend.clone())
            .await
            .unwrap();

        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(store.get("c-1-content-day_1").await.unwrap(), None);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn courses_without_session_is_an_error() {
        let store: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new());
        let backend = Arc::new(MockBackendClient::new());

        let result = execute(Command::Courses, store, backend).await;

        assert!(matches!(
            result,
            Err(CliError::Loader(LoaderError::MissingToken))
        ));
    }
}
