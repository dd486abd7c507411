use clap::Args;
use medistore::{address::DeliveryAddress, pricing};
use medistore_app::{checkout::CheckoutRequest, config::UserConfig, context::AppContext};

use crate::cli::describe;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    user: UserConfig,

    /// Street address
    #[arg(long)]
    street: String,

    /// City
    #[arg(long)]
    city: String,

    /// State
    #[arg(long)]
    state: String,

    /// Six digit PIN code
    #[arg(long)]
    pincode: String,

    /// Reference to the uploaded prescription
    #[arg(long)]
    prescription: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let request = CheckoutRequest {
        delivery_address: DeliveryAddress {
            street: args.street,
            city: args.city,
            state: args.state,
            pincode: args.pincode,
        },
        prescription_url: args.prescription,
    };

    let order = ctx
        .checkout
        .checkout(&args.user.user, request)
        .await
        .map_err(|error| describe("checkout failed", &error))?;

    let total = pricing::to_money(order.total_amount)
        .map_or_else(|_| order.total_amount.to_string(), |money| money.to_string());

    println!("order_id: {}", order.id);
    println!("status: {}", order.status.label());
    println!("total: {total}");
    println!("deliver_to: {}", order.delivery_address);

    Ok(())
}
