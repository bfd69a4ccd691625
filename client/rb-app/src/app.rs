use crate::{
    AppError, AppErrorResult, Commands, FavoriteCommands, HistoryCommands, RecipeCommands,
    TermsCommands, ThemeCommands, timer,
};

use rb_api::{ApiClient, ApiError};
use rb_config::Config;
use rb_core::{
    ErrorKind, FavoriteRecipe, KitchenTimer, SessionCredential, SortOrder, extract_title,
    validate_prompt,
};
use rb_session::{
    CredentialStore, FileLocalStore, LocalStore, Preferences, ReadinessPolicy, SessionBootstrap,
    SessionState, UserFeedback,
};

use std::sync::Arc;

use log::{debug, warn};
use serde_json::{Value, json};

const SUGGEST_FAILED: &str = "Failed to fetch recipe suggestion.";
const STAR_FAILED: &str = "Failed to star recipe";
const STARRED: &str = "Recipe starred successfully!";
const FAVORITES_FAILED: &str = "Failed to load starred recipes.";
const REMOVE_FAILED: &str = "Failed to remove recipe from favorites";
const HISTORY_CLEARED: &str = "Conversation history cleared.";
const HISTORY_CLEAR_FAILED: &str = "Failed to clear history.";

/// One CLI invocation: the service client, the session and local preferences.
pub struct App {
    config: Config,
    client: Arc<ApiClient>,
    session: SessionBootstrap,
    preferences: Preferences,
}

impl App {
    /// Wire the app from config, storing state in the configured store file.
    ///
    /// `server` overrides `api.base_url`.
    pub fn new(config: Config, server: Option<String>) -> AppErrorResult<Self> {
        let store: Arc<dyn LocalStore> = Arc::new(FileLocalStore::open(config.store_path()?)?);
        Self::with_store(config, server, store)
    }

    /// Wire the app over an existing store.
    pub fn with_store(
        config: Config,
        server: Option<String>,
        store: Arc<dyn LocalStore>,
    ) -> AppErrorResult<Self> {
        let base_url = server.unwrap_or_else(|| config.api.base_url.clone());
        let credential = SessionCredential::new();

        let client = Arc::new(ApiClient::with_timeout(
            &base_url,
            credential.clone(),
            config.api.request_timeout(),
        )?);

        let credentials = CredentialStore::new(store.clone(), &config.session.credential_key);
        let policy = ReadinessPolicy::from(&config.readiness);
        let session = SessionBootstrap::new(client.clone(), credential, credentials, policy);
        let preferences = Preferences::new(store);

        debug!("App wired against {base_url}");

        Ok(Self {
            config,
            client,
            session,
            preferences,
        })
    }

    pub fn session(&self) -> &SessionBootstrap {
        &self.session
    }

    /// Execute one command and return its JSON output.
    pub async fn run(&self, command: Commands) -> AppErrorResult<Value> {
        match command {
            Commands::Login { id_token } => self.login(&id_token).await,
            Commands::Whoami => self.whoami().await,
            Commands::Logout => self.logout().await,

            Commands::Terms { action } => match action {
                TermsCommands::Accept => self.accept_terms().await,
                TermsCommands::Decline => self.decline_terms().await,
            },

            Commands::Recipe { action } => match action {
                RecipeCommands::Suggest { prompt, star } => {
                    self.suggest(&prompt.join(" "), star).await
                }
            },

            Commands::Favorites { action } => match action {
                FavoriteCommands::List { sort } => self.list_favorites(sort).await,
                FavoriteCommands::Show { id } => self.show_favorite(id).await,
                FavoriteCommands::Remove { id } => self.remove_favorite(id).await,
            },

            Commands::History { action } => match action {
                HistoryCommands::Clear => self.clear_history().await,
            },

            Commands::Timer {
                hours,
                minutes,
                seconds,
            } => {
                self.run_timer(
                    hours.as_deref().unwrap_or_default(),
                    minutes.as_deref().unwrap_or_default(),
                    seconds.as_deref().unwrap_or_default(),
                )
                .await
            }

            Commands::Theme { action } => match action {
                ThemeCommands::Show => Ok(json!({ "theme": self.preferences.theme()?.as_str() })),
                ThemeCommands::Toggle => {
                    Ok(json!({ "theme": self.preferences.toggle_theme()?.as_str() }))
                }
            },
        }
    }

    /// Decide what the user sees for a failed command.
    ///
    /// Session failures go through the bootstrap so an expired token is
    /// cleared and a terms rejection reopens the gate.
    pub fn feedback(&self, error: &AppError) -> UserFeedback {
        let duration = self.config.ui.alert_duration();

        match error {
            AppError::Session(e) => self.session.handle_error(e, duration),
            AppError::NotSignedIn { .. } => match error.kind() {
                ErrorKind::AcceptanceRequired => UserFeedback::ShowTerms,
                _ => UserFeedback::SignedOut,
            },
            other => UserFeedback::notice(other.user_message(), duration),
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    async fn login(&self, id_token: &str) -> AppErrorResult<Value> {
        match self.session.restore().await {
            Ok(state) if state.has_session() => return Ok(self.session_summary()),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Transient => {
                warn!("Stored session could not be resumed: {e}");
            }
            Err(e) => return Err(e.into()),
        }

        let mut states = self.session.subscribe();
        let progress = tokio::spawn(async move {
            while states.changed().await.is_ok() {
                let state = *states.borrow_and_update();
                if let SessionState::AwaitingBackend { attempts } = state {
                    eprintln!(
                        "Waking up the recipe service, please stand by (attempt {attempts})..."
                    );
                }
            }
        });

        let login = self.session.login(id_token);
        tokio::pin!(login);

        let result = tokio::select! {
            result = &mut login => result,
            _ = tokio::signal::ctrl_c() => {
                self.session.cancel();
                login.await
            }
        };
        progress.abort();

        result?;
        Ok(self.session_summary())
    }

    async fn whoami(&self) -> AppErrorResult<Value> {
        self.session.restore().await?;
        Ok(self.session_summary())
    }

    async fn logout(&self) -> AppErrorResult<Value> {
        if self.resume_for_sign_out().await? {
            self.session.logout().await?;
        } else {
            debug!("Logout requested with no stored session");
        }
        Ok(self.session_summary())
    }

    async fn accept_terms(&self) -> AppErrorResult<Value> {
        self.session.restore().await?;

        let notify = self.session.accept_terms()?;
        if let Err(e) = notify.await {
            warn!("Terms acceptance task did not complete: {e}");
        }

        Ok(self.session_summary())
    }

    async fn decline_terms(&self) -> AppErrorResult<Value> {
        match self.session.restore().await {
            Ok(_) => self.session.decline_terms().await?,
            Err(e) if e.kind() == ErrorKind::Transient => {
                warn!("Terms status could not be checked, signing out instead: {e}");
                self.session.logout().await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(self.session_summary())
    }

    /// Resume the stored session for a sign-out. An unreachable service
    /// still counts as signed in so the local teardown runs.
    async fn resume_for_sign_out(&self) -> AppErrorResult<bool> {
        match self.session.restore().await {
            Ok(state) => Ok(state.has_session()),
            Err(e) if e.kind() == ErrorKind::Transient => {
                warn!("Stored session could not be verified, signing out locally: {e}");
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resume the stored session and require it to be fully signed in.
    async fn require_session(&self) -> AppErrorResult<()> {
        match self.session.restore().await? {
            SessionState::Authenticated => Ok(()),
            other => Err(AppError::not_signed_in(other)),
        }
    }

    fn session_summary(&self) -> Value {
        let user = self
            .session
            .profile()
            .or_else(|| self.session.pending_profile());

        json!({
            "state": self.session.state().as_str(),
            "display_name": user.as_ref().map(|u| u.display_name().to_string()),
            "user": user,
        })
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    async fn suggest(&self, prompt: &str, star: bool) -> AppErrorResult<Value> {
        let prompt = validate_prompt(prompt)?;
        self.require_session().await?;

        let suggestion = self
            .client
            .suggest_recipe(prompt)
            .await
            .map_err(|e| AppError::from_request(e, SUGGEST_FAILED))?;

        let title = extract_title(&suggestion.recipe);
        let mut output = json!({
            "title": title,
            "recipe": suggestion.recipe,
        });

        if star {
            match self.client.add_favorite(&suggestion.recipe, &title).await {
                Ok(added) => {
                    output["favorite"] = json!(favorite_summary(&added.recipe));
                    output["message"] = json!(added.message.unwrap_or_else(|| STARRED.into()));
                }
                Err(e) if e.kind() == ErrorKind::Transient => {
                    let message = star_failure_message(&e);
                    warn!("{message}: {e}");
                    output["star_error"] = json!(message);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(output)
    }

    async fn clear_history(&self) -> AppErrorResult<Value> {
        self.require_session().await?;

        self.client
            .clear_history()
            .await
            .map_err(|e| AppError::from_request(e, HISTORY_CLEAR_FAILED))?;

        Ok(json!({ "message": HISTORY_CLEARED }))
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    async fn fetch_favorites(&self) -> AppErrorResult<Vec<FavoriteRecipe>> {
        self.require_session().await?;

        self.client
            .list_favorites()
            .await
            .map_err(|e| AppError::from_request(e, FAVORITES_FAILED))
    }

    async fn list_favorites(&self, sort: SortOrder) -> AppErrorResult<Value> {
        let mut favorites = self.fetch_favorites().await?;
        sort.sort(&mut favorites);

        Ok(json!({
            "sort": sort.label(),
            "favorites": favorites.iter().map(favorite_summary).collect::<Vec<_>>(),
        }))
    }

    async fn show_favorite(&self, id: i64) -> AppErrorResult<Value> {
        let favorite = self
            .fetch_favorites()
            .await?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::favorite_not_found(id))?;

        let mut output = favorite_summary(&favorite);
        output["content"] = json!(favorite.content);
        Ok(output)
    }

    async fn remove_favorite(&self, id: i64) -> AppErrorResult<Value> {
        self.require_session().await?;

        self.client
            .remove_favorite(id)
            .await
            .map_err(|e| AppError::from_request(e, REMOVE_FAILED))?;

        Ok(json!({ "removed": id }))
    }

    // =========================================================================
    // Timer
    // =========================================================================

    async fn run_timer(&self, hours: &str, minutes: &str, seconds: &str) -> AppErrorResult<Value> {
        let mut kitchen_timer = KitchenTimer::new();
        kitchen_timer.start(hours, minutes, seconds)?;

        Ok(timer::countdown(&mut kitchen_timer, self.config.ui.timer_finished_cue()).await)
    }
}

fn favorite_summary(favorite: &FavoriteRecipe) -> Value {
    json!({
        "id": favorite.id,
        "title": favorite.title,
        "date_added": favorite.added_date_label(),
        "starred": favorite.starred,
    })
}

/// A duplicate star keeps the service's wording; anything else is generic.
pub(crate) fn star_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Conflict { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => String::from(STAR_FAILED),
    }
}
