//! # Menus
//!
//! The two read-choose-dispatch loops.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main menu (Anonymous)                                                  │
//! │    1 create user ─► handlers::account::create_user                      │
//! │    2 log in ─────► Session::Authenticated ──┐                           │
//! │    9 exit                                    │                          │
//! │                                              ▼                          │
//! │                         user menu (Authenticated)                       │
//! │                           1-9  handlers                                 │
//! │                           20   log out ──► back to main menu            │
//! │                                                                         │
//! │  End of input: user menu logs out, main menu exits.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing command prints its error to stderr and the loop continues.

use retail_core::{Session, User};
use tracing::warn;

use crate::console::Terminal;
use crate::error::{CliError, CliResult};
use crate::handlers::{account, manager, orders, stores, Context};

/// Printed for a number with no menu entry.
pub const UNRECOGNIZED: &str = "Unrecognized choice!";

const MAIN_MENU: &[&str] = &["MAIN MENU", "---------", "1. Create user", "2. Log in", "9. < EXIT"];

const USER_MENU: &[&str] = &[
    "2. View Product List",
    "3. Place a Order",
    "4. View 5 recent orders",
    "5. Update Product",
    "6. View 5 recent Product Updates Info",
    "7. View 5 Popular Items",
    "8. View 5 Popular Customers",
    "9. Place Product Supply Request to Warehouse",
    ".........................",
    "20. Log out",
];

/// User menu lines, with the store search radius in the first entry.
fn user_menu_lines(radius: f64) -> Vec<String> {
    let mut lines = vec![
        "MAIN MENU".to_string(),
        "---------".to_string(),
        format!("1. View Stores within {radius} units"),
    ];
    lines.extend(USER_MENU.iter().map(|line| line.to_string()));
    lines
}

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    CreateUser,
    LogIn,
    Exit,
}

impl MainChoice {
    pub fn from_number(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(MainChoice::CreateUser),
            2 => Some(MainChoice::LogIn),
            9 => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

/// User menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    ViewStores,
    ViewProducts,
    PlaceOrder,
    RecentOrders,
    UpdateProduct,
    RecentUpdates,
    PopularProducts,
    PopularCustomers,
    SupplyRequest,
    LogOut,
}

impl UserChoice {
    pub fn from_number(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(UserChoice::ViewStores),
            2 => Some(UserChoice::ViewProducts),
            3 => Some(UserChoice::PlaceOrder),
            4 => Some(UserChoice::RecentOrders),
            5 => Some(UserChoice::UpdateProduct),
            6 => Some(UserChoice::RecentUpdates),
            7 => Some(UserChoice::PopularProducts),
            8 => Some(UserChoice::PopularCustomers),
            9 => Some(UserChoice::SupplyRequest),
            20 => Some(UserChoice::LogOut),
            _ => None,
        }
    }
}

/// Runs the menus until the user exits or input ends.
///
/// ## Errors
/// Only terminal I/O failures. Command errors are printed and swallowed.
pub async fn run<T: Terminal>(ctx: &mut Context<T>) -> CliResult<()> {
    let mut session = Session::default();

    loop {
        match main_menu(ctx, &mut session).await {
            Ok(true) => {}
            Ok(false) | Err(CliError::InputClosed) => break,
            Err(e) => return Err(e),
        }

        if session.is_authenticated() {
            match user_menu(ctx, &mut session).await {
                Ok(()) | Err(CliError::InputClosed) => {}
                Err(e) => return Err(e),
            }
            session.log_out();
        }
    }

    Ok(())
}

/// One pass of the main menu. `false` once the user chose exit.
async fn main_menu<T: Terminal>(ctx: &mut Context<T>, session: &mut Session) -> CliResult<bool> {
    print_menu(ctx, MAIN_MENU)?;

    let Some(choice) = MainChoice::from_number(ctx.term.read_choice()?) else {
        ctx.term.say(UNRECOGNIZED)?;
        return Ok(true);
    };

    match choice {
        MainChoice::CreateUser => {
            let result = account::create_user(ctx).await;
            settle(ctx, result)?;
        }
        MainChoice::LogIn => {
            let result = account::log_in(ctx).await;
            if let Some(Some(user)) = settle(ctx, result)? {
                session.log_in(user);
            }
        }
        MainChoice::Exit => return Ok(false),
    }

    Ok(true)
}

/// The authenticated menu. Returns when the user logs out.
async fn user_menu<T: Terminal>(ctx: &mut Context<T>, session: &mut Session) -> CliResult<()> {
    let lines = user_menu_lines(ctx.settings.nearby_radius);

    while let Some(user) = session.current().cloned() {
        print_menu(ctx, &lines)?;

        let Some(choice) = UserChoice::from_number(ctx.term.read_choice()?) else {
            ctx.term.say(UNRECOGNIZED)?;
            continue;
        };

        if choice == UserChoice::LogOut {
            session.log_out();
            break;
        }

        let result = dispatch(ctx, choice, &user).await;
        settle(ctx, result)?;
    }

    Ok(())
}

async fn dispatch<T: Terminal>(
    ctx: &mut Context<T>,
    choice: UserChoice,
    user: &User,
) -> CliResult<()> {
    match choice {
        UserChoice::ViewStores => stores::view_stores(ctx, user).await,
        UserChoice::ViewProducts => stores::view_products(ctx).await,
        UserChoice::PlaceOrder => orders::place_order(ctx, user).await,
        UserChoice::RecentOrders => orders::recent_orders(ctx, user).await,
        UserChoice::UpdateProduct => manager::update_product(ctx, user).await,
        UserChoice::RecentUpdates => manager::recent_updates(ctx, user).await,
        UserChoice::PopularProducts => manager::popular_products(ctx, user).await,
        UserChoice::PopularCustomers => manager::popular_customers(ctx, user).await,
        UserChoice::SupplyRequest => manager::supply_request(ctx),
        UserChoice::LogOut => Ok(()),
    }
}

fn print_menu<T: Terminal, S: AsRef<str>>(ctx: &mut Context<T>, lines: &[S]) -> CliResult<()> {
    for line in lines {
        ctx.term.say(line.as_ref())?;
    }
    Ok(())
}

/// Prints a command's error and turns it into `None`. Errors that end the
/// session are passed through.
fn settle<T: Terminal, V>(ctx: &mut Context<T>, result: CliResult<V>) -> CliResult<Option<V>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.ends_session() => Err(e),
        Err(e) => {
            warn!(error = %e, "Command failed");
            ctx.term.error(&e.user_message())?;
            Ok(None)
        }
    }
}
