use clap::Subcommand;

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Ask for a recipe from ingredients or a dish description
    Suggest {
        /// Ingredients you have, or the dish you're craving
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Star the suggested recipe
        #[arg(long)]
        star: bool,
    },
}
