//! Creating an account and logging in.

use retail_core::validation::{parse_coordinate, validate_name, validate_password};
use retail_core::{NewUser, Point, User, UserRole, ValidationError};
use tracing::info;

use crate::console::Terminal;
use crate::error::CliResult;
use crate::handlers::Context;

/// Registers a new customer.
///
/// Every answer is checked as soon as it is entered; the first bad one
/// aborts the command.
pub async fn create_user<T: Terminal>(ctx: &mut Context<T>) -> CliResult<()> {
    let name = validate_name(&ctx.term.prompt("\tEnter name: ")?)?;
    let password = validate_password(&ctx.term.prompt("\tEnter password: ")?)?;
    let latitude = parse_coordinate("latitude", &ctx.term.prompt("\tEnter latitude: ")?)?;
    let longitude = parse_coordinate("longitude", &ctx.term.prompt("\tEnter longitude: ")?)?;

    if ctx.db.users().name_taken(&name).await? {
        return Err(ValidationError::Duplicate {
            field: "name".to_string(),
            value: name,
        }
        .into());
    }

    let user = ctx
        .db
        .users()
        .create(&NewUser {
            name,
            password,
            location: Point::new(latitude, longitude),
            role: UserRole::Customer,
        })
        .await?;

    info!(user_id = user.id, "User created");
    ctx.term.say("User successfully created!")?;
    Ok(())
}

/// Asks for credentials. `None` when they don't match a user.
pub async fn log_in<T: Terminal>(ctx: &mut Context<T>) -> CliResult<Option<User>> {
    let name = ctx.term.prompt("\tEnter name: ")?;
    let password = ctx.term.prompt("\tEnter password: ")?;

    let user = ctx.db.users().authenticate(name.trim(), &password).await?;
    match &user {
        Some(user) => {
            info!(user_id = user.id, role = %user.role, "Logged in");
            ctx.term.say(&format!("Welcome, {}!", user.name))?;
        }
        None => ctx.term.say("Login failed: unknown name or wrong password.")?,
    }

    Ok(user)
}
