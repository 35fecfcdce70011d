//! Drives the menus end to end with a scripted console against an
//! in-memory database.

use std::io::Cursor;

use retail_cli::{menu, Console, Context, Settings};
use retail_core::{NewOrder, NewStore, NewUser, Point, Product, User, UserRole};
use retail_db::{Database, DbConfig};

type Scripted = Console<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

/// One store at (10, 10) selling 100 Widgets at 5 each.
async fn shop(manager_id: Option<i32>, db: Option<Database>) -> Database {
    let db = match db {
        Some(db) => db,
        None => Database::new(DbConfig::in_memory()).await.unwrap(),
    };

    let store = db
        .stores()
        .create(&NewStore {
            name: "Corner".to_string(),
            location: Point::new(10.0, 10.0),
            manager_id,
        })
        .await
        .unwrap();

    db.products()
        .create(&Product {
            store_id: store.id,
            name: "Widget".to_string(),
            units: 100,
            price_per_unit: 5,
        })
        .await
        .unwrap();

    db
}

async fn user(db: &Database, name: &str, password: &str, at: (f64, f64), role: UserRole) -> User {
    db.users()
        .create(&NewUser {
            name: name.to_string(),
            password: password.to_string(),
            location: Point::new(at.0, at.1),
            role,
        })
        .await
        .unwrap()
}

async fn drive(db: Database, script: &str) -> Context<Scripted> {
    let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), Vec::new());
    let mut ctx = Context::new(db, console, Settings::default());

    menu::run(&mut ctx).await.unwrap();
    ctx
}

#[tokio::test]
async fn test_create_login_and_order() {
    let db = shop(None, None).await;

    let script = concat!(
        "1\nalice\npw1\n10\n10\n", // create user
        "2\nalice\npw1\n",         // log in
        "1\n",                     // stores nearby
        "2\n1\n",                  // products of store 1
        "3\n1\nWidget\n3\n",       // order 3 Widgets from store 1
        "4\n",                     // recent orders
        "20\n",                    // log out
        "9\n",                     // exit
    );
    let ctx = drive(db, script).await;
    let out = ctx.term.output_text();

    assert!(out.contains("User successfully created!"));
    assert!(out.contains("Welcome, alice!"));
    assert!(out.contains("pricePerUnit"));
    assert!(out.contains("Calculating possible stores you can order from..."));
    assert!(out.contains("Order #1 placed: 3 x Widget from Corner. 97 left in stock."));
    assert_eq!(ctx.term.error_text(), "");

    let alice = ctx.db.users().authenticate("alice", "pw1").await.unwrap().unwrap();
    assert_eq!(alice.role, UserRole::Customer);
    assert_eq!(alice.location, Point::new(10.0, 10.0));

    let widget = ctx.db.products().get(1, "Widget").await.unwrap().unwrap();
    assert_eq!(widget.units, 97);

    let orders = ctx.db.orders().recent_for_customer(alice.id, 5).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].store_id, 1);
    assert_eq!(orders[0].product_name, "Widget");
    assert_eq!(orders[0].units_ordered, 3);
}

#[tokio::test]
async fn test_wrong_password_stays_logged_out() {
    let db = shop(None, None).await;
    user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let ctx = drive(db, "2\nalice\nnope\n9\n").await;
    let out = ctx.term.output_text();

    assert!(out.contains("Login failed"));
    assert!(!out.contains("20. Log out"));
}

#[tokio::test]
async fn test_duplicate_name_rejected() {
    let db = shop(None, None).await;
    user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let ctx = drive(db, "1\nalice\nother\n1\n1\n9\n").await;

    assert!(ctx.term.error_text().contains("name 'alice' already exists"));
    assert!(!ctx.term.output_text().contains("User successfully created!"));
    assert!(ctx.db.users().authenticate("alice", "other").await.unwrap().is_none());
}

#[tokio::test]
async fn test_bad_coordinate_rejected() {
    let db = shop(None, None).await;

    let ctx = drive(db, "1\nbob\npw\n150\n9\n").await;

    assert!(ctx.term.error_text().contains("Your input is invalid"));
    assert!(!ctx.db.users().name_taken("bob").await.unwrap());
}

#[tokio::test]
async fn test_insufficient_stock_leaves_everything() {
    let db = shop(None, None).await;
    let alice = user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let ctx = drive(db, "2\nalice\npw1\n3\n1\nWidget\n101\n20\n9\n").await;

    assert!(ctx
        .term
        .error_text()
        .contains("Insufficient stock for Widget: available 100, requested 101"));

    let widget = ctx.db.products().get(1, "Widget").await.unwrap().unwrap();
    assert_eq!(widget.units, 100);
    assert_eq!(ctx.db.orders().count_for_customer(alice.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_far_store_not_orderable() {
    let db = shop(None, None).await;
    let far = db
        .stores()
        .create(&NewStore {
            name: "Faraway".to_string(),
            location: Point::new(90.0, 90.0),
            manager_id: None,
        })
        .await
        .unwrap();
    db.products()
        .create(&Product {
            store_id: far.id,
            name: "Gizmo".to_string(),
            units: 5,
            price_per_unit: 100,
        })
        .await
        .unwrap();
    let alice = user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let ctx = drive(db, "2\nalice\npw1\n1\n3\n2\nGizmo\n1\n20\n9\n").await;

    assert!(!ctx.term.output_text().contains("Faraway"));
    assert!(ctx
        .term
        .error_text()
        .contains("Store 2 is not within 30 units of your location"));
    assert_eq!(ctx.db.orders().count_for_customer(alice.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_recent_orders_capped_at_five() {
    let db = shop(None, None).await;
    let alice = user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;
    for units in 1..=6 {
        db.orders()
            .place(&NewOrder {
                customer_id: alice.id,
                store_id: 1,
                product_name: "Widget".to_string(),
                units,
            })
            .await
            .unwrap();
    }

    let ctx = drive(db, "2\nalice\npw1\n4\n20\n9\n").await;
    let out = ctx.term.output_text();

    assert!(out.contains("orderTime"));
    assert_eq!(out.lines().filter(|line| line.contains("Corner")).count(), 5);
}

#[tokio::test]
async fn test_manager_updates_own_store() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let carol = user(&db, "carol", "pw", (10.0, 10.0), UserRole::Manager).await;
    let db = shop(Some(carol.id), Some(db)).await;

    let ctx = drive(db, "2\ncarol\npw\n5\nWidget\n80\n6\n6\n20\n9\n").await;
    let out = ctx.term.output_text();

    assert!(out.contains("You are a manager"));
    assert!(!out.contains("You are not a manager"));
    assert!(out.contains("updateNumber"));

    let widget = ctx.db.products().get(1, "Widget").await.unwrap().unwrap();
    assert_eq!((widget.units, widget.price_per_unit), (80, 6));

    let log = ctx.db.product_updates().recent_for_manager(carol.id, 5).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].manager_id, carol.id);
}

#[tokio::test]
async fn test_admin_update_ends_with_manager_notice() {
    let db = shop(None, None).await;
    let root = user(&db, "root", "admin", (50.0, 50.0), UserRole::Admin).await;

    // Product 1/Widget to 50 units at 7, then skip the user edit
    let ctx = drive(db, "2\nroot\nadmin\n5\n1\nWidget\n50\n7\n\n20\n9\n").await;
    let out = ctx.term.output_text();

    assert!(out.contains("Product updated: Widget in store 1 now has 50 units at 7 each"));
    assert!(out.contains("You are not a manager"));
    assert!(!out.contains("You are a manager"));

    let log = ctx.db.product_updates().recent_all(5).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].manager_id, root.id);
}

#[tokio::test]
async fn test_admin_edits_user() {
    let db = shop(None, None).await;
    user(&db, "root", "admin", (50.0, 50.0), UserRole::Admin).await;
    let alice = user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let script = format!(
        "2\nroot\nadmin\n5\n1\nWidget\n100\n5\n{}\nalicia\nnewpw\n20\n30\nmanager\n20\n9\n",
        alice.id
    );
    let ctx = drive(db, &script).await;

    assert_eq!(ctx.term.error_text(), "");
    let edited = ctx.db.users().get_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(edited.name, "alicia");
    assert_eq!(edited.location, Point::new(20.0, 30.0));
    assert_eq!(edited.role, UserRole::Manager);
    assert!(ctx.db.users().authenticate("alicia", "newpw").await.unwrap().is_some());
}

#[tokio::test]
async fn test_admin_cannot_rename_onto_existing_user() {
    let db = shop(None, None).await;
    user(&db, "root", "admin", (50.0, 50.0), UserRole::Admin).await;
    let alice = user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;
    let bob = user(&db, "bob", "pw2", (12.0, 12.0), UserRole::Customer).await;

    let script = format!(
        "2\nroot\nadmin\n5\n1\nWidget\n100\n5\n{}\nalice\npw1\n10\n10\ncustomer\n20\n9\n",
        bob.id
    );
    let ctx = drive(db, &script).await;

    assert!(ctx.term.error_text().contains("name 'alice' already exists"));
    assert_eq!(ctx.db.users().get_by_id(bob.id).await.unwrap().unwrap().name, "bob");

    let login = ctx.db.users().authenticate("alice", "pw1").await.unwrap().unwrap();
    assert_eq!(login.id, alice.id);
}

#[tokio::test]
async fn test_customer_cannot_see_staff_screens() {
    let db = shop(None, None).await;
    user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let ctx = drive(db, "2\nalice\npw1\n5\n6\n7\n8\n20\n9\n").await;
    let out = ctx.term.output_text();

    assert_eq!(out.matches("You are not a manager").count(), 4);
    assert_eq!(ctx.db.product_updates().recent_all(5).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_sees_popular_customers() {
    let db = shop(None, None).await;
    user(&db, "root", "admin", (50.0, 50.0), UserRole::Admin).await;
    let alice = user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;
    db.orders()
        .place(&NewOrder {
            customer_id: alice.id,
            store_id: 1,
            product_name: "Widget".to_string(),
            units: 2,
        })
        .await
        .unwrap();

    let ctx = drive(db, "2\nroot\nadmin\n7\n8\n20\n9\n").await;
    let out = ctx.term.output_text();

    assert!(out.lines().any(|l| l.starts_with("Widget") && l.contains('2')));
    assert!(out.lines().any(|l| l.contains("alice")));
    assert!(!out.contains("pw1"));
}

#[tokio::test]
async fn test_menu_input_errors() {
    let db = shop(None, None).await;
    user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    let ctx = drive(db, "abc\n42\n2\nalice\npw1\n11\n9\n20\n9\n").await;
    let out = ctx.term.output_text();

    assert!(out.contains("Your input is invalid!"));
    assert_eq!(out.matches("Unrecognized choice!").count(), 2);
    assert!(out.contains("not available yet"));
}

#[tokio::test]
async fn test_end_of_input_logs_out_and_exits() {
    let db = shop(None, None).await;
    user(&db, "alice", "pw1", (10.0, 10.0), UserRole::Customer).await;

    // Input ends inside the user menu, then again at the main menu
    let ctx = drive(db, "2\nalice\npw1\n").await;
    assert!(ctx.term.output_text().contains("20. Log out"));

    // Input ends halfway through creating a user
    let ctx = drive(ctx.db, "1\nbob\n").await;
    assert!(!ctx.db.users().name_taken("bob").await.unwrap());
}
