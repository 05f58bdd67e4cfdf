//! Route definitions for the Inventory & Quotation Management backend

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public + change-password)
        .nest("/auth", auth_routes())
        // Protected routes - user administration
        .nest("/users", user_routes())
        // Protected routes - customer management
        .nest("/customers", customer_routes())
        // Protected routes - supplier management
        .nest("/suppliers", supplier_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - category management
        .nest("/categories", category_routes())
        // Protected routes - stock movements
        .nest("/movements", movement_routes())
        // Protected routes - stock alerts
        .nest("/alerts", alert_routes())
        // Protected routes - quotations
        .nest("/quotations", quotation_routes())
        // Protected routes - reports
        .nest("/reports", report_routes())
        // Protected routes - dashboard
        .nest("/dashboard", dashboard_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .route("/forgot-password", post(handlers::forgot_password))
        .route("/reset-password", post(handlers::reset_password))
        .route(
            "/change-password",
            post(handlers::change_password).route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// User administration routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:user_id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Customer management routes (protected)
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_customers).post(handlers::create_customer))
        .route(
            "/:customer_id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier management routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Category management routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_categories).post(handlers::create_category))
        .route(
            "/:category_id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock movement routes (protected)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_movements).post(handlers::record_movement))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock alert routes (protected)
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/:alert_id/dismiss", patch(handlers::dismiss_alert))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Quotation routes (protected)
fn quotation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_quotations).post(handlers::create_quotation))
        .route("/:quotation_id", get(handlers::get_quotation))
        .route("/:quotation_id/export", get(handlers::export_quotation))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Report routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_reports))
        .route("/generate", post(handlers::generate_report))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_dashboard_summary))
        .route_layer(middleware::from_fn(auth_middleware))
}
