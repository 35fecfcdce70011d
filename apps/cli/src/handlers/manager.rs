//! # Staff Screens
//!
//! Product updates, the update log and the popularity reports. What a user
//! sees depends on the role stored in their row *now*, not at login.
//!
//! ```text
//! ┌──────────────────┬───────────────────────┬────────────────────────────┐
//! │                  │ manager               │ admin                      │
//! ├──────────────────┼───────────────────────┼────────────────────────────┤
//! │ update product   │ own stores            │ any product, then any user │
//! │ recent updates   │ own stores            │ all stores                 │
//! │ popular reports  │ orders at own stores  │ all orders                 │
//! └──────────────────┴───────────────────────┴────────────────────────────┘
//! ```
//!
//! Customers get "You are not a manager" everywhere. So do admins after the
//! update-product screen: the notice is printed for every non-manager role,
//! admins included.

use retail_core::validation::{
    parse_coordinate, parse_id, parse_optional_id, parse_price, parse_units, validate_name,
    validate_password, validate_product_name,
};
use retail_core::{
    CoreError, Point, ProductChange, ProductUpdate, Store, User, UserRole, UserUpdate,
};
use retail_db::{ReportScope, Table};
use tracing::info;

use crate::console::Terminal;
use crate::error::CliResult;
use crate::handlers::{product_table, Context, NOT_A_MANAGER};

/// Which stores a role's reports cover. `None` for customers.
pub fn report_scope(role: UserRole, user_id: i32) -> Option<ReportScope> {
    if !role.is_staff() {
        return None;
    }

    Some(match role {
        UserRole::Manager => ReportScope::ManagedBy(user_id),
        _ => ReportScope::AllStores,
    })
}

// =============================================================================
// Update Product
// =============================================================================

/// Menu 5: change a product's stock and price (and, for admins, a user).
pub async fn update_product<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let role = ctx.current_role(user).await?;

    match role {
        UserRole::Manager => {
            ctx.term.say("You are a manager")?;
            manager_update(ctx, user).await?;
        }
        UserRole::Admin => {
            admin_update_product(ctx, user).await?;
            admin_update_user(ctx).await?;
        }
        UserRole::Customer => {}
    }

    if role != UserRole::Manager {
        ctx.term.say(NOT_A_MANAGER)?;
    }
    Ok(())
}

async fn manager_update<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let stores = ctx.db.stores().managed_by(user.id).await?;
    let Some(store) = choose_store(ctx, &stores)? else {
        return ctx.term.say("You do not manage any store.");
    };

    let products = ctx.db.products().list_by_store(store.id).await?;
    ctx.show(&product_table(&products))?;

    let change = prompt_change(ctx, store.id)?;
    apply_change(ctx, &change, user.id).await
}

/// Picks the store to work on: the only one, or the one the manager names.
fn choose_store<T: Terminal>(ctx: &mut Context<T>, stores: &[Store]) -> CliResult<Option<Store>> {
    match stores {
        [] => Ok(None),
        [only] => Ok(Some(only.clone())),
        several => {
            let table = Table {
                headers: vec!["storeID".to_string(), "name".to_string()],
                rows: several
                    .iter()
                    .map(|s| vec![s.id.to_string(), s.name.clone()])
                    .collect(),
            };
            ctx.show(&table)?;

            let store_id =
                parse_id("store id", &ctx.term.prompt("Please enter the store id: ")?)?;
            let store = several
                .iter()
                .find(|s| s.id == store_id)
                .cloned()
                .ok_or(CoreError::StoreNotManaged { store_id })?;
            Ok(Some(store))
        }
    }
}

fn prompt_change<T: Terminal>(ctx: &mut Context<T>, store_id: i32) -> CliResult<ProductChange> {
    let product_name =
        validate_product_name(&ctx.term.prompt("Please enter the product name: ")?)?;
    let units = parse_units(&ctx.term.prompt("Please enter number of units: ")?)?;
    let price_per_unit = parse_price(&ctx.term.prompt("Please enter price per unit: ")?)?;

    Ok(ProductChange {
        store_id,
        product_name,
        units,
        price_per_unit,
    })
}

async fn apply_change<T: Terminal>(
    ctx: &mut Context<T>,
    change: &ProductChange,
    updated_by: i32,
) -> CliResult<()> {
    let update_number = ctx.db.products().update(change, updated_by).await?;

    info!(update_number, store_id = change.store_id, "Product updated");
    ctx.term.say(&format!(
        "Product updated: {} in store {} now has {} units at {} each (update #{}).",
        change.product_name, change.store_id, change.units, change.price_per_unit, update_number
    ))
}

async fn admin_update_product<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let products = ctx.db.products().list_all().await?;
    ctx.show(&product_table(&products))?;

    let store_id = parse_id("store id", &ctx.term.prompt("Please enter the store id: ")?)?;
    let change = prompt_change(ctx, store_id)?;
    apply_change(ctx, &change, user.id).await
}

fn user_table(users: &[User]) -> Table {
    Table {
        headers: vec![
            "userID".to_string(),
            "name".to_string(),
            "latitude".to_string(),
            "longitude".to_string(),
            "type".to_string(),
        ],
        rows: users
            .iter()
            .map(|u| {
                vec![
                    u.id.to_string(),
                    u.name.clone(),
                    u.location.latitude.to_string(),
                    u.location.longitude.to_string(),
                    u.role.to_string(),
                ]
            })
            .collect(),
    }
}

async fn admin_update_user<T: Terminal>(ctx: &mut Context<T>) -> CliResult<()> {
    let users = ctx.db.users().list_all().await?;
    ctx.show(&user_table(&users))?;

    let raw = ctx.term.prompt("Please enter the user id (blank to skip): ")?;
    let Some(user_id) = parse_optional_id("user id", &raw)? else {
        return Ok(());
    };

    let name = validate_name(&ctx.term.prompt("Please enter name: ")?)?;
    let password = validate_password(&ctx.term.prompt("Please enter password: ")?)?;
    let latitude = parse_coordinate("latitude", &ctx.term.prompt("Please enter latitude: ")?)?;
    let longitude = parse_coordinate("longitude", &ctx.term.prompt("Please enter longitude: ")?)?;
    let role: UserRole = ctx.term.prompt("Please enter type: ")?.parse()?;

    ctx.db
        .users()
        .update(&UserUpdate {
            user_id,
            name,
            password,
            location: Point::new(latitude, longitude),
            role,
        })
        .await?;

    info!(user_id, role = %role, "User updated");
    ctx.term.say(&format!("User {user_id} updated."))
}

// =============================================================================
// Update Log & Reports
// =============================================================================

fn update_table(updates: &[ProductUpdate]) -> Table {
    Table {
        headers: vec![
            "updateNumber".to_string(),
            "managerID".to_string(),
            "storeID".to_string(),
            "storeName".to_string(),
            "productName".to_string(),
            "updatedOn".to_string(),
        ],
        rows: updates
            .iter()
            .map(|u| {
                vec![
                    u.update_number.to_string(),
                    u.manager_id.to_string(),
                    u.store_id.to_string(),
                    u.store_name.clone(),
                    u.product_name.clone(),
                    u.updated_on_text(),
                ]
            })
            .collect(),
    }
}

/// Menu 6: latest entries of the product update log.
pub async fn recent_updates<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let limit = ctx.settings.recent_limit;
    let role = ctx.current_role(user).await?;
    let updates = match role {
        UserRole::Manager => ctx.db.product_updates().recent_for_manager(user.id, limit).await?,
        UserRole::Admin => ctx.db.product_updates().recent_all(limit).await?,
        UserRole::Customer => return ctx.term.say(NOT_A_MANAGER),
    };

    if updates.is_empty() {
        return ctx.term.say("No product updates yet.");
    }
    ctx.show(&update_table(&updates))
}

/// Menu 7: most ordered products.
pub async fn popular_products<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let role = ctx.current_role(user).await?;
    let Some(scope) = report_scope(role, user.id) else {
        return ctx.term.say(NOT_A_MANAGER);
    };

    let table = ctx
        .db
        .reports()
        .popular_products(scope, ctx.settings.popular_limit)
        .await?;
    if table.is_empty() {
        return ctx.term.say("No orders yet.");
    }
    ctx.show(&table)
}

/// Menu 8: customers with the most orders.
pub async fn popular_customers<T: Terminal>(ctx: &mut Context<T>, user: &User) -> CliResult<()> {
    let role = ctx.current_role(user).await?;
    let Some(scope) = report_scope(role, user.id) else {
        return ctx.term.say(NOT_A_MANAGER);
    };

    let table = ctx
        .db
        .reports()
        .popular_customers(scope, ctx.settings.popular_limit)
        .await?;
    if table.is_empty() {
        return ctx.term.say("No orders yet.");
    }
    ctx.show(&table)
}

/// Menu 9: warehouse supply requests. Not wired to anything yet.
pub fn supply_request<T: Terminal>(ctx: &mut Context<T>) -> CliResult<()> {
    ctx.term
        .say("Product supply requests to the warehouse are not available yet.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_scope_by_role() {
        assert_eq!(
            report_scope(UserRole::Manager, 4),
            Some(ReportScope::ManagedBy(4))
        );
        assert_eq!(report_scope(UserRole::Admin, 3), Some(ReportScope::AllStores));
        assert_eq!(report_scope(UserRole::Customer, 2), None);
    }
}
