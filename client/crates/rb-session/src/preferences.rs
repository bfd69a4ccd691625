use crate::local_store::{LocalStore, error::Result as StoreResult};

use rb_core::Theme;

use std::sync::Arc;

use log::warn;

pub const THEME_KEY: &str = "theme";

/// Display preferences kept next to the credential in the local store.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn LocalStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Stored theme, light when unset or unreadable.
    pub fn theme(&self) -> StoreResult<Theme> {
        let Some(value) = self.store.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };

        Ok(value.parse().unwrap_or_else(|_| {
            warn!("Ignoring unknown stored theme '{value}'");
            Theme::default()
        }))
    }

    pub fn set_theme(&self, theme: Theme) -> StoreResult<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&self) -> StoreResult<Theme> {
        let theme = self.theme()?.toggle();
        self.set_theme(theme)?;
        Ok(theme)
    }
}
