//! Authentication endpoints
//!
//! Register and login are public. The other two routes sit behind the auth middleware.

mod login;
mod models;
mod password;
mod register;
mod user;

pub use login::login;
pub use models::{LoginResponse, MeResponse, RegisterResponse, UserDetail, UserSummary};
pub use password::change_password;
pub use register::register;
pub use user::get_current_user;

use crate::server::middleware::AuthMiddleware;
use actix_web::web;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .service(
                web::resource("/me")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(get_current_user)),
            )
            .service(
                web::resource("/change-password")
                    .wrap(AuthMiddleware)
                    .route(web::post().to(change_password)),
            ),
    );
}
