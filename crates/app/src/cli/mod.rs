use std::error::Error;

use clap::{Parser, Subcommand};
use medistore_app::{
    config::{LoggingConfig, StorageConfig},
    context::AppContext,
    observability,
};

mod cart;
mod checkout;
mod medicines;
mod orders;
mod tables;

#[derive(Debug, Parser)]
#[command(name = "medistore", about = "Medicine storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    storage: StorageConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage the medicine catalog
    Medicines(medicines::MedicinesCommand),

    /// Review orders and move them through their lifecycle
    Orders(orders::OrdersCommand),

    /// Inspect and edit a shopper's cart
    Cart(cart::CartCommand),

    /// Place an order from a shopper's cart
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.logging)
            .map_err(|error| describe("failed to initialise logging", &error))?;

        let ctx = AppContext::from_data_dir(&self.storage.data_dir, self.storage.id_policy)
            .await
            .map_err(|error| describe("failed to open data directory", &error))?;

        match self.command {
            Commands::Medicines(command) => medicines::run(&ctx, command).await,
            Commands::Orders(command) => orders::run(&ctx, command).await,
            Commands::Cart(command) => cart::run(&ctx, command).await,
            Commands::Checkout(args) => checkout::run(&ctx, args).await,
        }
    }
}

/// Render `error` and its sources after `context`.
fn describe(context: &str, error: &dyn Error) -> String {
    let mut message = format!("{context}: {error}");
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }

    message
}
