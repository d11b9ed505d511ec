//! Route definitions for the Stride retail back-office

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (login public, rest protected)
        .nest("/auth", auth_routes())
        // Protected routes - items and groups
        .nest("/items", item_routes())
        .nest("/groups", group_routes())
        // Protected routes - stock ledger and adjustments
        .nest("/inventory", inventory_routes())
        // Protected routes - purchasing
        .nest("/purchases", purchase_routes())
        // Protected routes - invoicing
        .nest("/invoices", invoice_routes())
        // Protected routes - payments and closings
        .nest("/payments", payment_routes())
        .nest("/closings", closing_routes())
        // Protected routes - reports
        .nest("/reports", report_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .merge(protected_auth_routes())
}

/// Auth routes that require a valid token
fn protected_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Item routes (protected)
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:item_id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route(
            "/:item_id/move-to-group/:group_id",
            post(handlers::move_item_to_group),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Item group routes (protected)
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_groups).post(handlers::create_group))
        .route(
            "/:group_id",
            get(handlers::get_group).delete(handlers::delete_group),
        )
        .route("/:group_id/variants", post(handlers::add_variant))
        .route(
            "/:group_id/variants/:variant_id/extract",
            post(handlers::extract_variant),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock ledger and adjustment routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        // Direct batch stock updates
        .route("/adjust", post(handlers::adjust_stock))
        // Adjustment documents
        .route(
            "/adjustments",
            get(handlers::list_adjustments).post(handlers::create_adjustment),
        )
        .route(
            "/adjustments/:adjustment_id",
            get(handlers::get_adjustment)
                .put(handlers::update_adjustment)
                .delete(handlers::delete_adjustment),
        )
        .route(
            "/adjustments/:adjustment_id/apply",
            post(handlers::apply_adjustment),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase receiving routes (protected)
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/receives",
            get(handlers::list_receipts).post(handlers::receive_purchase),
        )
        .route("/receives/:receipt_id", get(handlers::get_receipt))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Invoicing routes (protected)
fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route("/:invoice_id", get(handlers::get_invoice))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Payment entry routes (protected)
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transactions).post(handlers::create_payment),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Closing routes (protected; the admin view checks the role itself)
fn closing_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::save_closing))
        .route("/admin-view", get(handlers::admin_close_view))
        .route("/:loc_code/:date", get(handlers::get_closing))
        .route("/:loc_code/:date/totals", get(handlers::day_totals))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Report routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/sales/summary", get(handlers::sales_summary))
        .route("/transactions/export", get(handlers::export_transactions))
        .route_layer(middleware::from_fn(auth_middleware))
}
