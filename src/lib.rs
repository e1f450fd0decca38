pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod uploads;

use actix_web::web;

/// Mounts the full `/api` surface; shared between the binary and the
/// integration tests.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(routes::auth::register))
                    .route("/login", web::post().to(routes::auth::login)),
            )
            .service(
                web::scope("/users")
                    .route("/{user_id}/files", web::get().to(routes::files::list_user_files))
                    .route("/{user_id}/files", web::post().to(routes::files::upload_file))
                    .route(
                        "/{user_id}/files/{file_id}",
                        web::get().to(routes::files::get_file),
                    )
                    .route(
                        "/{user_id}/files/{file_id}",
                        web::put().to(routes::files::update_file),
                    )
                    .route(
                        "/{user_id}/files/{file_id}",
                        web::delete().to(routes::files::delete_file),
                    )
                    .route("/{user_id}/admin", web::put().to(routes::users::set_admin))
                    .route("/{user_id}", web::delete().to(routes::users::delete_user)),
            )
            .route("/files", web::get().to(routes::files::list_all_files))
            .route("/health", web::get().to(routes::health::health_check)),
    );
}
