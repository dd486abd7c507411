use clap::{Args, Subcommand};
use medistore_app::context::AppContext;

mod browse;
mod seed;
mod stock;

#[derive(Debug, Args)]
pub(crate) struct MedicinesCommand {
    #[command(subcommand)]
    command: MedicinesSubcommand,
}

#[derive(Debug, Subcommand)]
enum MedicinesSubcommand {
    /// Load medicines from a YAML fixture
    Seed(seed::SeedArgs),

    /// List the whole catalog
    List,

    /// Search by name, generic name or brand
    Search(browse::SearchArgs),

    /// List medicines in one category
    Category(browse::CategoryArgs),

    /// List the featured medicines
    Featured,

    /// List medicines running low or out of stock
    LowStock,

    /// Set the stock count of a medicine
    Stock(stock::StockArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: MedicinesCommand) -> Result<(), String> {
    match command.command {
        MedicinesSubcommand::Seed(args) => seed::run(ctx, args).await,
        MedicinesSubcommand::List => browse::list(ctx).await,
        MedicinesSubcommand::Search(args) => browse::search(ctx, args).await,
        MedicinesSubcommand::Category(args) => browse::category(ctx, args).await,
        MedicinesSubcommand::Featured => browse::featured(ctx).await,
        MedicinesSubcommand::LowStock => browse::low_stock(ctx).await,
        MedicinesSubcommand::Stock(args) => stock::run(ctx, args).await,
    }
}
