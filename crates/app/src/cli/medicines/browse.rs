use clap::Args;
use medistore::medicines::Medicine;
use medistore_app::{context::AppContext, medicines::MedicinesServiceError};

use crate::cli::{describe, tables};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Text to look for; blank lists everything
    #[arg(default_value = "")]
    query: String,
}

#[derive(Debug, Args)]
pub(crate) struct CategoryArgs {
    /// Category name, matched ignoring case
    category: String,
}

fn print(result: Result<Vec<Medicine>, MedicinesServiceError>) -> Result<(), String> {
    let medicines = result.map_err(|error| describe("failed to list medicines", &error))?;

    if medicines.is_empty() {
        println!("no medicines found");
        return Ok(());
    }

    let table = tables::medicines(&medicines)
        .map_err(|error| describe("failed to render medicines", &error))?;

    println!("{table}");

    Ok(())
}

pub(crate) async fn list(ctx: &AppContext) -> Result<(), String> {
    print(ctx.medicines.list_all().await)
}

pub(crate) async fn search(ctx: &AppContext, args: SearchArgs) -> Result<(), String> {
    print(ctx.medicines.search(&args.query).await)
}

pub(crate) async fn category(ctx: &AppContext, args: CategoryArgs) -> Result<(), String> {
    print(ctx.medicines.filter_by_category(&args.category).await)
}

pub(crate) async fn featured(ctx: &AppContext) -> Result<(), String> {
    print(ctx.medicines.list_featured().await)
}

pub(crate) async fn low_stock(ctx: &AppContext) -> Result<(), String> {
    print(ctx.medicines.list_low_stock().await)
}
