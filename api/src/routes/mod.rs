//! Route registration
//!
//! All routes are generic over the controller's collaborators so the
//! in-memory and MySQL/Redis stacks share one surface.

pub mod health;
pub mod me;
pub mod policy;
pub mod sessions;

use actix_web::web;

use tk_core::repositories::{
    CacheStore, ControlConfigStore, LockManager, TokenRecordRepository,
};

use crate::middleware::session_guard::SessionGuard;

/// Register every route on the given service config
pub fn configure<R, C, L, P>(cfg: &mut web::ServiceConfig)
where
    R: TokenRecordRepository + 'static,
    C: CacheStore + 'static,
    L: LockManager + 'static,
    P: ControlConfigStore + 'static,
{
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/sessions")
                        .route("", web::post().to(sessions::issue::issue_session::<R, C, L, P>))
                        .route(
                            "/{id}",
                            web::get().to(sessions::info::session_info::<R, C, L, P>),
                        )
                        .route(
                            "/{id}/status",
                            web::get().to(sessions::status::session_status::<R, C, L, P>),
                        )
                        .route(
                            "/{id}/renew",
                            web::post().to(sessions::renew::renew_session::<R, C, L, P>),
                        )
                        .route(
                            "/{id}/touch",
                            web::post().to(sessions::touch::touch_session::<R, C, L, P>),
                        ),
                )
                .service(
                    web::scope("/token-policy")
                        .route("", web::get().to(policy::get_policy::<R, C, L, P>))
                        .route("", web::put().to(policy::update_policy::<R, C, L, P>)),
                )
                .service(
                    web::scope("/me")
                        .wrap(SessionGuard::<R, C, L, P>::new())
                        .route("", web::get().to(me::me::<R, C, L, P>)),
                ),
        );
}
