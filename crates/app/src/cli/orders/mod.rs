use clap::{Args, Subcommand};
use medistore_app::context::AppContext;

mod list;
mod status;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, optionally for one shopper
    List(list::ListOrdersArgs),

    /// List orders waiting on review
    Pending,

    /// Move an order to its next status
    Status(status::StatusArgs),

    /// Count orders per status
    Counts,
}

pub(crate) async fn run(ctx: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(ctx, args).await,
        OrdersSubcommand::Pending => list::pending(ctx).await,
        OrdersSubcommand::Status(args) => status::run(ctx, args).await,
        OrdersSubcommand::Counts => list::counts(ctx).await,
    }
}
