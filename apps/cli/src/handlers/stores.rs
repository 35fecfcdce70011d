//! Browsing stores and their products.

use retail_core::geo::{stores_within, NearbyStore};
use retail_core::validation::parse_id;
use retail_core::User;
use retail_db::Table;

use crate::console::Terminal;
use crate::error::CliResult;
use crate::handlers::{product_table, Context};

/// Stores closer to `user` than the configured radius, nearest first.
///
/// The user row is re-read so a location changed by an admin is used.
pub(crate) async fn nearby_stores<T: Terminal>(
    ctx: &Context<T>,
    user: &User,
) -> CliResult<Vec<NearbyStore>> {
    let origin = ctx
        .db
        .users()
        .get_by_id(user.id)
        .await?
        .map_or(user.location, |fresh| fresh.location);

    let stores = ctx.db.stores().list_all().await?;
    Ok(stores_within(origin, stores, ctx.settings.nearby_radius))
}

pub(crate) fn nearby_table(nearby: &[NearbyStore]) -> Table {
    Table {
        headers: vec![
            "storeID".to_string(),
            "name".to_string(),
            "latitude".to_string(),
            "longitude".to_string(),
            "distance".to_string(),
        ],
        rows: nearby
            .iter()
            .map(|n| {
                vec![
                    n.store.id.to_string(),
                    n.store.name.clone(),
                    n.store.location.latitude.to_string(),
                    n.store.location.longitude.to_string(),
                    format!("{:.2}", n.distance),
                ]
            })
            .collect(),
    }
}

/// Menu 1: stores within range of the user.
pub async fn view_stores<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let nearby = nearby_stores(ctx, user).await?;

    if nearby.is_empty() {
        let line = format!(
            "There are no stores within {} units of you.",
            ctx.settings.nearby_radius
        );
        return ctx.term.say(&line);
    }

    ctx.show(&nearby_table(&nearby))
}

/// Menu 2: products of one store.
pub async fn view_products<T: Terminal>(ctx: &mut Context<T>) -> CliResult<()> {
    let store_id = parse_id("store id", &ctx.term.prompt("Please input the store id: ")?)?;

    let products = ctx.db.products().list_by_store(store_id).await?;
    if products.is_empty() {
        return ctx.term.say(&format!("Store {store_id} has no products."));
    }

    ctx.show(&product_table(&products))
}
