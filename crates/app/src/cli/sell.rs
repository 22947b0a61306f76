use std::sync::Arc;

use clap::Args;
use tabled::{Table, Tabled};

use tillpoint::{
    cart::{Cart, CartLine},
    estimate::estimate,
    promotions::Promotion,
    receipt::{self, Receipt},
};
use tillpoint_app::{
    api::{SalesApi, models::PaymentMethod},
    auth::Session,
    checkout::CheckoutService,
    lookup,
};

#[derive(Debug, Args)]
pub(crate) struct SellArgs {
    /// Line item as BARCODE or BARCODE:QUANTITY; repeatable
    #[arg(long = "item", value_name = "BARCODE[:QTY]", required = true)]
    items: Vec<String>,

    /// Member phone to attach to the sale
    #[arg(long)]
    member_phone: Option<String>,

    /// Payment method
    #[arg(long, value_enum, default_value = "cash")]
    payment: PaymentMethod,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&CartLine> for LineRow {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.product().name.clone(),
            quantity: line.quantity(),
            unit: receipt::format_amount(line.product().selling_price),
            total: receipt::format_amount(line.line_total()),
        }
    }
}

pub(crate) async fn run(
    args: SellArgs,
    api: Arc<dyn SalesApi>,
    session: Session,
) -> Result<(), String> {
    let mut cart = Cart::new();

    for entry in &args.items {
        let (barcode, quantity) = parse_item(entry)?;
        let product = scan(api.as_ref(), barcode).await?;
        let product_id = product.product_id;

        cart.add(product).map_err(|error| error.to_string())?;
        if quantity > 1 {
            cart.set_quantity(product_id, quantity)
                .map_err(|error| error.to_string())?;
        }
    }

    let promotions = active_promotions(api.as_ref()).await?;
    let member_rate = match &args.member_phone {
        Some(phone) => lookup::resolve_member_rate(api.as_ref(), phone).await,
        None => rust_decimal::Decimal::ZERO,
    };

    let preview = estimate(&cart, &promotions, member_rate).map_err(|error| error.to_string())?;
    let provisional = Receipt::provisional(&preview);

    let rows: Vec<LineRow> = cart.lines().iter().map(LineRow::from).collect();
    println!("{}", Table::new(rows));
    println!("subtotal            {}", receipt::format_amount(preview.subtotal));
    println!("promotion discount  {}", receipt::format_amount(preview.promo_discount));
    println!("member discount     {}", receipt::format_amount(preview.member_discount));
    println!("estimated total     {}", receipt::format_amount(provisional.total()));

    let service = CheckoutService::new(api, session);
    let outcome = service
        .submit(&mut cart, args.payment, args.member_phone.as_deref())
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    let transaction = outcome.transaction;
    let confirmed = Receipt::confirmed(transaction.subtotal, transaction.total_amount);

    println!();
    println!("sale completed, TX #{}", transaction.transaction_id);
    println!("subtotal            {}", receipt::format_amount(transaction.subtotal));
    println!(
        "product discount    {}",
        receipt::format_amount(transaction.product_discount)
    );
    println!(
        "member discount     {}",
        receipt::format_amount(transaction.membership_discount)
    );
    println!("charged             {}", receipt::format_amount(confirmed.total()));
    println!("saved               {}", receipt::format_amount(confirmed.savings()));

    Ok(())
}

fn parse_item(entry: &str) -> Result<(&str, u32), String> {
    match entry.split_once(':') {
        Some((barcode, quantity)) => {
            let quantity: u32 = quantity
                .parse()
                .map_err(|_| format!("invalid quantity in item '{entry}'"))?;
            if quantity == 0 {
                return Err(format!("quantity must be at least 1 in item '{entry}'"));
            }
            Ok((barcode, quantity))
        }
        None => Ok((entry, 1)),
    }
}

async fn scan(api: &dyn SalesApi, barcode: &str) -> Result<tillpoint::catalog::Product, String> {
    let mut matches = api
        .product_by_barcode(barcode)
        .await
        .map_err(|error| format!("barcode lookup failed: {error}"))?;

    if matches.is_empty() {
        return Err(format!("no product with barcode {barcode}"));
    }

    Ok(matches.remove(0))
}

async fn active_promotions(api: &dyn SalesApi) -> Result<Vec<Promotion>, String> {
    let promotions = api
        .active_promotions()
        .await
        .map_err(|error| format!("promotion fetch failed: {error}"))?;

    // The endpoint already filters, but a stale cache or clock skew on the
    // server side must not resurrect an expired promotion here.
    let today = jiff::Zoned::now().date();

    Ok(promotions
        .into_iter()
        .filter(|promotion| promotion.is_active_on(today))
        .collect())
}
