use medistore::{cart::Cart, ids::UserId};
use medistore_app::context::AppContext;

use crate::cli::{describe, tables};

pub(crate) fn print(user: &UserId, cart: &Cart) -> Result<(), String> {
    if cart.is_empty() {
        println!("cart for {user} is empty");
        return Ok(());
    }

    let table = tables::cart(cart).map_err(|error| describe("failed to render cart", &error))?;

    println!("{table}");

    Ok(())
}

pub(crate) async fn run(ctx: &AppContext, user: &UserId) -> Result<(), String> {
    let cart = ctx
        .carts
        .get_cart(user)
        .await
        .map_err(|error| describe("failed to read cart", &error))?;

    print(user, &cart)
}
