use std::sync::Arc;

use clap::{Parser, Subcommand};

use tillpoint_app::{
    api::{HttpSalesApi, SalesApi},
    config::StoreApiConfig,
};

mod member;
mod products;
mod sell;

#[derive(Debug, Parser)]
#[command(name = "tillpoint", about = "Tillpoint cashier terminal", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    store: StoreApiConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Catalog lookups
    Products(products::ProductsCommand),
    /// Membership operations
    Member(member::MemberCommand),
    /// Ring up and submit a sale
    Sell(sell::SellArgs),
}

impl Cli {
    pub(crate) fn log_level(&self) -> &str {
        &self.store.log_level
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let session = self.store.session();
        let api: Arc<dyn SalesApi> =
            Arc::new(HttpSalesApi::new(self.store.api_url.clone(), session.clone()));

        match self.command {
            Commands::Products(command) => products::run(command, api.as_ref()).await,
            Commands::Member(command) => member::run(command, api.as_ref()).await,
            Commands::Sell(args) => sell::run(args, api, session).await,
        }
    }
}
