pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::item_service::ItemService;
use application::member_service::MemberService;
use application::order_service::OrderService;

pub use db::{create_pool, DbPool};
pub use infrastructure::{AppStore, DieselStore, InMemoryStore};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::members::create_member,
        handlers::members::list_members,
        handlers::members::get_member,
        handlers::items::create_item,
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::update_item,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::cancel_order,
        handlers::orders::complete_delivery,
    ),
    tags(
        (name = "members", description = "Member registration"),
        (name = "items", description = "Catalog and stock"),
        (name = "orders", description = "Ordering, cancellation and delivery"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Registers the services and routes backed by `store`.
pub fn configure(cfg: &mut web::ServiceConfig, store: AppStore) {
    use handlers::{items, members, orders};

    cfg.app_data(web::Data::new(MemberService::new(store.clone())))
        .app_data(web::Data::new(ItemService::new(store.clone())))
        .app_data(web::Data::new(OrderService::new(store)))
        .service(
            web::scope("/members")
                .route("", web::post().to(members::create_member))
                .route("", web::get().to(members::list_members))
                .route("/{id}", web::get().to(members::get_member)),
        )
        .service(
            web::scope("/items")
                .route("", web::post().to(items::create_item))
                .route("", web::get().to(items::list_items))
                .route("/{id}", web::get().to(items::get_item))
                .route("/{id}", web::put().to(items::update_item)),
        )
        .service(
            web::scope("/orders")
                .route("", web::post().to(orders::create_order))
                .route("", web::get().to(orders::list_orders))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}/cancel", web::post().to(orders::cancel_order))
                .route(
                    "/{id}/delivery/complete",
                    web::post().to(orders::complete_delivery),
                ),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    store: impl Into<AppStore>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let store: AppStore = store.into();
    Ok(HttpServer::new(move || {
        let store = store.clone();
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| configure(cfg, store))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
