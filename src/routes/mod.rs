use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/upload", upload_routes())
        .nest("/ai", ai_routes())
        .nest("/recipes", recipe_routes())
        .nest("/admin", admin_routes())
        .routes(routes!(handlers::health::health))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
}

fn upload_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_fridge_image))
        .layer(handlers::upload::upload_body_limit())
}

fn ai_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::scan::scan_image))
}

fn recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::recipe::get_suggestions))
        .routes(routes!(handlers::recipe::save_recipe))
        .routes(routes!(handlers::recipe::get_saved_recipes))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::admin::list_users))
        .routes(routes!(handlers::admin::delete_user))
        .routes(routes!(handlers::admin::get_stats))
}
