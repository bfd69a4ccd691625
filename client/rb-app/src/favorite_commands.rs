use rb_core::SortOrder;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum FavoriteCommands {
    /// List starred recipes
    List {
        /// latest (newest first) or oldest
        #[arg(long, default_value = "latest")]
        sort: SortOrder,
    },

    /// Show one starred recipe
    Show {
        /// Favorite ID
        id: i64,
    },

    /// Remove a starred recipe
    Remove {
        /// Favorite ID
        id: i64,
    },
}
