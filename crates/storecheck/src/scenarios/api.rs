//! REST API checks.

use super::{ensure, expect_status};
use crate::api::{normalize, CartDetails, CartSummary, QuantityUpdate, SearchResults};
use crate::fixture::Fixtures;
use crate::result::{ShopError, ShopResult};

/// Add a product, read the cart, clear it and expect zero units left
#[tracing::instrument(skip_all)]
pub(super) async fn cart_clear(fx: &Fixtures) -> ShopResult<()> {
    let cart = fx.cart_api()?;
    let product = fx.catalog_api()?.sample_product().await?;

    let added = cart.add_item(&product.id).await?;
    let before = cart.details().await?;
    let before_count = before.json::<CartDetails>()?.line_count();
    let cleared = cart.clear().await?;
    let after = cart.summary().await?;
    let after_count = after.json::<CartSummary>()?.quantity();

    expect_status(&added, 200, "add to cart")?;
    expect_status(&before, 200, "cart details before clearing")?;
    ensure(before_count > 0, || "cart was empty before clearing".to_string())?;
    expect_status(&cleared, 204, "clear cart")?;
    expect_status(&after, 200, "cart summary after clearing")?;
    ensure(after_count == 0, || {
        format!("cart holds {after_count} units after clearing")
    })
}

/// From an empty cart, adding one product adds exactly one line
#[tracing::instrument(skip_all)]
pub(super) async fn add_to_cart(fx: &Fixtures) -> ShopResult<()> {
    let cart = fx.cart_api()?;
    let product = fx.catalog_api()?.sample_product().await?;

    cart.clear().await?;
    let before = cart.summary().await?;
    let before_count = before.json::<CartSummary>()?.quantity();
    let added = cart.add_item(&product.id).await?;
    let after = cart.details().await?;
    let after_count = after.json::<CartDetails>()?.line_count() as i64;
    cart.clear().await?;

    expect_status(&before, 200, "cart summary before adding")?;
    expect_status(&added, 200, "add to cart")?;
    expect_status(&after, 200, "cart details after adding")?;
    let delta = after_count - before_count;
    ensure(delta == 1, || format!("cart grew by {delta}, expected 1"))
}

/// Removing the only line by id shrinks the cart by one
#[tracing::instrument(skip_all)]
pub(super) async fn delete_from_cart(fx: &Fixtures) -> ShopResult<()> {
    let cart = fx.cart_api()?;
    let product = fx.catalog_api()?.sample_product().await?;

    cart.clear().await?;
    let added = cart.add_item(&product.id).await?;
    expect_status(&added, 200, "add to cart")?;

    let before = cart.details().await?;
    let details = before.json::<CartDetails>()?;
    let before_count = details.line_count() as i64;
    let line = details
        .first()
        .ok_or_else(|| ShopError::parse("products[0]", "cart has no lines after adding"))?;
    let removed = cart.remove_item(&line.id).await?;
    let after = cart.summary().await?;
    let after_count = after.json::<CartSummary>()?.quantity();
    cart.clear().await?;

    expect_status(&before, 200, "cart details before removing")?;
    expect_status(&removed, 204, "remove from cart")?;
    expect_status(&after, 200, "cart summary after removing")?;
    let delta = before_count - after_count;
    ensure(delta == 1, || format!("cart shrank by {delta}, expected 1"))
}

/// Setting a line to one more unit changes its quantity
#[tracing::instrument(skip_all)]
pub(super) async fn change_quantity(fx: &Fixtures) -> ShopResult<()> {
    let cart = fx.cart_api()?;
    let product = fx.catalog_api()?.sample_product().await?;

    cart.clear().await?;
    let added = cart.add_item(&product.id).await?;
    expect_status(&added, 200, "add to cart")?;

    let before = cart.details().await?;
    let line = before
        .json::<CartDetails>()?
        .first()
        .cloned()
        .ok_or_else(|| ShopError::parse("products[0]", "cart has no lines after adding"))?;
    let update = [QuantityUpdate {
        id: line.id.clone(),
        quantity: line.quantity + 1,
    }];
    let updated = cart.set_quantity(&update).await?;
    let after = cart.details().await?;
    let after_quantity = after
        .json::<CartDetails>()?
        .first()
        .map(|l| l.quantity)
        .ok_or_else(|| ShopError::parse("products[0]", "cart emptied by quantity update"))?;
    cart.clear().await?;

    expect_status(&before, 200, "cart details before update")?;
    expect_status(&updated, 200, "set quantity")?;
    expect_status(&after, 200, "cart details after update")?;
    ensure(line.quantity != after_quantity, || {
        format!("quantity stayed at {after_quantity}")
    })
}

/// The first search hit's title contains the normalized phrase
#[tracing::instrument(skip(fx))]
pub(super) async fn search_positive(fx: &Fixtures, phrase: &str) -> ShopResult<()> {
    let response = fx.search_api()?.search(phrase).await?;
    expect_status(&response, 200, "search")?;

    let expected = normalize(phrase);
    let results = response.json::<SearchResults>()?;
    let title = results
        .first_title()
        .ok_or_else(|| ShopError::assertion(format!("search for '{expected}' returned nothing")))?;
    ensure(normalize(title).contains(&expected), || {
        format!("first result '{title}' does not contain '{expected}'")
    })
}
