//! Placing orders and reviewing them.

use retail_core::validation::{parse_id, parse_quantity, validate_product_name};
use retail_core::{CoreError, NewOrder, OrderSummary, User};
use retail_db::Table;

use crate::console::Terminal;
use crate::error::CliResult;
use crate::handlers::stores::nearby_stores;
use crate::handlers::{product_table, Context};

/// Menu 3: order units of one product from a nearby store.
///
/// ## Flow
/// ```text
/// nearby stores ──► print each store's products
///      │
///      ▼
/// store id ──► must be nearby, else StoreOutOfRange
/// product  ──► non-empty
/// units    ──► positive
///      │
///      ▼
/// OrderRepository::place (one transaction, stock checked)
/// ```
pub async fn place_order<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    ctx.term.say("Calculating possible stores you can order from...")?;
    ctx.term.say("")?;

    let nearby = nearby_stores(ctx, user).await?;
    if nearby.is_empty() {
        let line = format!(
            "There are no stores within {} units of you.",
            ctx.settings.nearby_radius
        );
        return ctx.term.say(&line);
    }

    for candidate in &nearby {
        let products = ctx.db.products().list_by_store(candidate.store.id).await?;
        ctx.term.say(&format!(
            "Store {} - {} ({:.2} away)",
            candidate.store.id, candidate.store.name, candidate.distance
        ))?;
        ctx.show(&product_table(&products))?;
        ctx.term.say("")?;
    }

    let store_id = parse_id("store id", &ctx.term.prompt("Please enter the store id: ")?)?;
    let store = nearby
        .iter()
        .find(|n| n.store.id == store_id)
        .map(|n| n.store.clone())
        .ok_or(CoreError::StoreOutOfRange {
            store_id,
            radius: ctx.settings.nearby_radius,
        })?;

    let product_name = validate_product_name(&ctx.term.prompt("Please enter product name: ")?)?;
    let units = parse_quantity(&ctx.term.prompt("Please enter number of units: ")?)?;

    let placed = ctx
        .db
        .orders()
        .place(&NewOrder {
            customer_id: user.id,
            store_id: store.id,
            product_name: product_name.clone(),
            units,
        })
        .await?;

    ctx.term.say(&format!(
        "Order #{} placed: {} x {} from {}. {} left in stock.",
        placed.order_number, units, product_name, store.name, placed.remaining_units
    ))
}

fn order_table(orders: &[OrderSummary]) -> Table {
    Table {
        headers: vec![
            "storeID".to_string(),
            "storeName".to_string(),
            "productName".to_string(),
            "unitsOrdered".to_string(),
            "orderTime".to_string(),
        ],
        rows: orders
            .iter()
            .map(|o| {
                vec![
                    o.store_id.to_string(),
                    o.store_name.clone(),
                    o.product_name.clone(),
                    o.units_ordered.to_string(),
                    o.order_time_text(),
                ]
            })
            .collect(),
    }
}

/// Menu 4: the user's most recent orders.
pub async fn recent_orders<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let orders = ctx
        .db
        .orders()
        .recent_for_customer(user.id, ctx.settings.recent_limit)
        .await?;

    if orders.is_empty() {
        return ctx.term.say("You have not placed any orders yet.");
    }

    ctx.show(&order_table(&orders))
}
