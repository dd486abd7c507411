use clap::Args;
use medistore::orders::{OrderId, OrderStatus};
use medistore_app::context::AppContext;

use crate::cli::describe;

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    /// Order id
    id: OrderId,

    /// Target status (pending_verification, verified, dispatched, delivered)
    status: OrderStatus,
}

pub(crate) async fn run(ctx: &AppContext, args: StatusArgs) -> Result<(), String> {
    let order = ctx
        .orders
        .update_status(args.id, args.status)
        .await
        .map_err(|error| describe("failed to update order status", &error))?;

    println!("order_id: {}", order.id);
    println!("status: {}", order.status.label());
    println!("updated_at: {}", order.updated_at);

    Ok(())
}
