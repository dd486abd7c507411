use clap::Args;
use medistore::medicines::MedicineId;
use medistore_app::context::AppContext;

use crate::cli::describe;

#[derive(Debug, Args)]
pub(crate) struct StockArgs {
    /// Medicine id
    id: MedicineId,

    /// New stock count
    stock: u32,
}

pub(crate) async fn run(ctx: &AppContext, args: StockArgs) -> Result<(), String> {
    let medicine = ctx
        .medicines
        .update_stock(args.id, args.stock)
        .await
        .map_err(|error| describe("failed to update stock", &error))?;

    println!("medicine_id: {}", medicine.id);
    println!("name: {}", medicine.name);
    println!("stock: {} ({})", medicine.stock, medicine.stock_level().label());

    Ok(())
}
