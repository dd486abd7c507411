use clap::Args;
use medistore::{ids::UserId, orders::Order};
use medistore_app::{context::AppContext, orders::OrdersServiceError};

use crate::cli::{describe, tables};

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// Only show orders placed by this shopper
    #[arg(long)]
    user: Option<UserId>,
}

fn print(result: Result<Vec<Order>, OrdersServiceError>) -> Result<(), String> {
    let orders = result.map_err(|error| describe("failed to list orders", &error))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    let table =
        tables::orders(&orders).map_err(|error| describe("failed to render orders", &error))?;

    println!("{table}");

    Ok(())
}

pub(crate) async fn run(ctx: &AppContext, args: ListOrdersArgs) -> Result<(), String> {
    match &args.user {
        Some(user) => print(ctx.orders.get_by_user(user).await),
        None => print(ctx.orders.list_all().await),
    }
}

pub(crate) async fn pending(ctx: &AppContext) -> Result<(), String> {
    print(ctx.orders.get_pending_orders().await)
}

pub(crate) async fn counts(ctx: &AppContext) -> Result<(), String> {
    let counts = ctx
        .orders
        .status_counts()
        .await
        .map_err(|error| describe("failed to count orders", &error))?;

    println!("{}", tables::status_counts(&counts));

    Ok(())
}
