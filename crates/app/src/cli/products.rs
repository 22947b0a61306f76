use clap::{Args, Subcommand};
use tabled::{Table, Tabled};

use tillpoint::{catalog::Product, receipt};
use tillpoint_app::api::SalesApi;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// Search the catalog by name, brand, category, or barcode text
    Search(SearchArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search query
    query: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Barcode")]
    barcode: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Promotion")]
    promotion: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            price: receipt::format_amount(product.selling_price),
            stock: product.stock_quantity,
            promotion: product
                .promotion_id
                .map_or_else(|| "-".to_owned(), |id| format!("#{id}")),
        }
    }
}

pub(crate) async fn run(command: ProductsCommand, api: &dyn SalesApi) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::Search(args) => search(args, api).await,
    }
}

async fn search(args: SearchArgs, api: &dyn SalesApi) -> Result<(), String> {
    let products = api
        .search_products(&args.query)
        .await
        .map_err(|error| format!("product search failed: {error}"))?;

    if products.is_empty() {
        println!("no matches for '{}'", args.query);
        return Ok(());
    }

    let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
    println!("{}", Table::new(rows));

    Ok(())
}
