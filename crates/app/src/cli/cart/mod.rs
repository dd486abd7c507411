use clap::{Args, Subcommand};
use medistore_app::{config::UserConfig, context::AppContext};

mod edit;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(flatten)]
    user: UserConfig,

    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with its total
    Show,

    /// Add a catalog medicine to the cart
    Add(edit::AddArgs),

    /// Set the quantity of a line; zero removes it
    Update(edit::UpdateArgs),

    /// Remove a line
    Remove(edit::RemoveArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    let user = command.user.user;

    match command.command {
        CartSubcommand::Show => show::run(ctx, &user).await,
        CartSubcommand::Add(args) => edit::add(ctx, &user, args).await,
        CartSubcommand::Update(args) => edit::update(ctx, &user, args).await,
        CartSubcommand::Remove(args) => edit::remove(ctx, &user, args).await,
    }
}
