//! Table rendering for command output.

use std::ops::Range;

use medistore::{
    cart::Cart,
    medicines::Medicine,
    orders::{Order, OrderStatus},
    pricing::{self, PricingError},
};
use rustc_hash::FxHashMap;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

fn render(builder: Builder, numeric: Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    table.to_string()
}

fn money(amount: u64) -> Result<String, PricingError> {
    Ok(pricing::to_money(amount)?.to_string())
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

pub(crate) fn medicines(medicines: &[Medicine]) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record([
        "ID", "Name", "Generic", "Brand", "Category", "Price", "Stock", "Rx", "Level",
    ]);

    for medicine in medicines {
        builder.push_record([
            medicine.id.to_string(),
            medicine.name.clone(),
            medicine.generic_name.clone(),
            medicine.brand.clone(),
            medicine.category.clone(),
            money(medicine.price)?,
            medicine.stock.to_string(),
            yes_no(medicine.requires_prescription),
            medicine.stock_level().label().to_string(),
        ]);
    }

    Ok(render(builder, 5..7))
}

pub(crate) fn orders(orders: &[Order]) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "User", "Status", "Units", "Total", "Rx", "Placed"]);

    for order in orders {
        let units: u64 = order.items.iter().map(|item| u64::from(item.quantity)).sum();

        builder.push_record([
            order.id.to_string(),
            order.user_id.to_string(),
            order.status.label().to_string(),
            units.to_string(),
            money(order.total_amount)?,
            yes_no(order.requires_prescription),
            order.created_at.to_string(),
        ]);
    }

    Ok(render(builder, 3..5))
}

pub(crate) fn cart(cart: &Cart) -> Result<String, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["Medicine", "Name", "Qty", "Price", "Line Total", "Rx"]);

    for item in cart.items() {
        builder.push_record([
            item.medicine_id.to_string(),
            item.name.clone(),
            item.quantity.to_string(),
            money(item.price)?,
            money(item.line_total()?)?,
            yes_no(item.requires_prescription),
        ]);
    }

    Ok(format!(
        "{}\n Items: {}\n Total: {}",
        render(builder, 2..5),
        cart.item_count(),
        money(cart.total()?)?
    ))
}

pub(crate) fn status_counts(counts: &FxHashMap<OrderStatus, usize>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Status", "Orders"]);

    for status in OrderStatus::ALL {
        builder.push_record([
            status.label().to_string(),
            counts.get(&status).copied().unwrap_or_default().to_string(),
        ]);
    }

    render(builder, 1..2)
}
