use clap::Args;
use medistore::{cart::CartItem, ids::UserId, medicines::MedicineId};
use medistore_app::context::AppContext;

use crate::cli::{cart::show, describe};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Medicine id
    medicine: MedicineId,

    /// Units to add
    #[arg(long, short, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Medicine id
    medicine: MedicineId,

    /// New quantity
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Medicine id
    medicine: MedicineId,
}

pub(crate) async fn add(ctx: &AppContext, user: &UserId, args: AddArgs) -> Result<(), String> {
    let medicine = ctx
        .medicines
        .get_by_id(args.medicine)
        .await
        .map_err(|error| describe("failed to look up medicine", &error))?;

    let item = CartItem::from_medicine(&medicine, args.quantity)
        .map_err(|error| describe("cannot add to cart", &error))?;

    let cart = ctx
        .carts
        .add_item(user, item)
        .await
        .map_err(|error| describe("failed to add to cart", &error))?;

    show::print(user, &cart)
}

pub(crate) async fn update(
    ctx: &AppContext,
    user: &UserId,
    args: UpdateArgs,
) -> Result<(), String> {
    let cart = ctx
        .carts
        .update_quantity(user, args.medicine, args.quantity)
        .await
        .map_err(|error| describe("failed to update cart", &error))?;

    show::print(user, &cart)
}

pub(crate) async fn remove(
    ctx: &AppContext,
    user: &UserId,
    args: RemoveArgs,
) -> Result<(), String> {
    let cart = ctx
        .carts
        .remove_item(user, args.medicine)
        .await
        .map_err(|error| describe("failed to remove from cart", &error))?;

    show::print(user, &cart)
}
