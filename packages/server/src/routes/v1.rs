use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/accounts", account_routes(config))
}

fn account_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(handlers::account::create_account))
        .routes(routes!(
            handlers::account::get_account,
            handlers::account::delete_account
        ))
        .routes(routes!(
            handlers::solution::list_solutions,
            handlers::solution::create_solution
        ))
        .routes(routes!(
            handlers::solution::get_solution,
            handlers::solution::update_solution,
            handlers::solution::delete_solution
        ))
        .routes(routes!(
            handlers::solution::get_state,
            handlers::solution::set_state
        ))
        .routes(routes!(
            handlers::binary::get_binaries,
            handlers::binary::register_binaries,
            handlers::binary::replace_binaries
        ));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::binary::upload_binary))
        .layer(handlers::binary::binary_upload_body_limit(
            config.storage.max_blob_size,
        ));

    crud.merge(upload)
}
