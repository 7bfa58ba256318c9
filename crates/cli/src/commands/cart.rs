//! Cart commands.

use basket_cart::{CartChange, CartCommand, CartConfig, CartError};
use basket_core::{CurrencyCode, Price, ProductId};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::session::{self, Session};

/// Add a product looked up in the catalog.
///
/// # Errors
///
/// Returns an error if the quantity is zero or the product cannot be found.
#[instrument(skip(page))]
pub async fn add(page: &mut Session, id: &ProductId, quantity: u32) -> Result<(), CartError> {
    page.add_to_cart(id, quantity).await?;
    if let Some(message) = page.notice_at(Utc::now()) {
        info!("{message}");
    }
    Ok(())
}

/// Apply a quantity or remove command to the stored cart.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be opened.
pub fn apply(config: &CartConfig, command: &CartCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = session::open(config)?;
    match page.command(command) {
        CartChange::Unchanged => info!(?command, "Nothing to change"),
        change => info!(?change, "Cart updated"),
    }
    Ok(())
}

/// Print the cart as text or as the rendered popup.
#[allow(clippy::print_stdout)]
pub fn show(page: &Session, html: bool) {
    let popup = page.popup();
    if html {
        println!("{}", popup.html());
        return;
    }

    let cart = popup.cart();
    if cart.items.is_empty() {
        println!("Your cart is empty");
    }
    for item in &cart.items {
        println!(
            "{:<8} {:<32} {:>4} x {:>10} = {:>10}",
            item.id, item.name, item.quantity, item.price, item.line_price
        );
    }
    println!("Subtotal: {}", cart.subtotal);
}

/// Print the badge count.
#[allow(clippy::print_stdout)]
pub fn count(page: &Session) {
    println!("{}", page.badge().count());
}

/// Print the subtotal.
#[allow(clippy::print_stdout)]
pub fn subtotal(page: &Session) {
    println!("{}", format_amount(page.store().subtotal(), page.currency()));
}

/// Print the checkout summary.
///
/// # Errors
///
/// Returns [`CartError::EmptyCart`] if there is nothing to check out.
#[allow(clippy::print_stdout)]
pub fn checkout(page: &Session) -> Result<(), CartError> {
    let summary = page.checkout()?;
    println!("Items:    {}", summary.item_count);
    println!("Units:    {}", summary.total_quantity);
    println!(
        "Subtotal: {} {}",
        format_amount(summary.subtotal, page.currency()),
        page.currency().code()
    );
    Ok(())
}

fn format_amount(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}
