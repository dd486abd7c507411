use std::path::PathBuf;

use clap::Args;
use medistore::fixtures::CatalogFixture;
use medistore_app::context::AppContext;

use crate::cli::describe;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// YAML fixture to load; the bundled catalog when omitted
    #[arg(long)]
    file: Option<PathBuf>,
}

pub(crate) async fn run(ctx: &AppContext, args: SeedArgs) -> Result<(), String> {
    let fixture = match &args.file {
        Some(path) => CatalogFixture::from_path(path),
        None => CatalogFixture::bundled(),
    }
    .and_then(CatalogFixture::into_new_medicines)
    .map_err(|error| describe("failed to load catalog fixture", &error))?;

    let created = ctx
        .medicines
        .import(fixture)
        .await
        .map_err(|error| describe("failed to import medicines", &error))?;

    println!("imported {} medicines", created.len());

    Ok(())
}
