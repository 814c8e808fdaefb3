use crate::{
    api::{attendance, dashboard, employee, history, leave},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_conf = build_limiter(config.rate_login_per_min);
    let register_conf = build_limiter(config.rate_register_per_min);
    let refresh_conf = build_limiter(config.rate_refresh_per_min);
    let protected_conf = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_conf))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                // employee sign-in shares the login limiter
                web::resource("/session")
                    .wrap(Governor::new(&login_conf))
                    .route(web::post().to(handlers::employee_session)),
            )
            .service(
                web::resource("/register")
                    .wrap(Governor::new(&register_conf))
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(Governor::new(&refresh_conf))
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(Governor::new(&login_conf))
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(Governor::new(&protected_conf)) // rate limiting
            .service(handlers::me)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::create_record)),
                    )
                    // /attendance/check-in
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    // /attendance/check-out
                    .service(
                        web::resource("/check-out").route(web::put().to(attendance::check_out)),
                    )
                    // /attendance/history
                    .service(web::resource("/history").route(web::get().to(history::history)))
                    // /attendance/today
                    .service(web::resource("/today").route(web::get().to(history::today)))
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(attendance::update_record))
                            .route(web::delete().to(attendance::delete_record)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(web::resource("").route(web::get().to(leave::leaves))),
            )
            .service(
                web::scope("/dashboard")
                    // /dashboard/stats
                    .service(web::resource("/stats").route(web::get().to(dashboard::admin_stats)))
                    // /dashboard/summary
                    .service(
                        web::resource("/summary").route(web::get().to(dashboard::range_summary)),
                    ),
            ),
    );
}

// ADMIN LOGIN            EMPLOYEE SIGN-IN
//  POST /auth/login       POST /auth/session (code only)
//  ├─ access_token        same token pair, Employee role
//  └─ refresh_token
//
// API REQUEST
//  └─ Authorization: Bearer access_token
//
// ACCESS EXPIRED
//  └─ POST /auth/refresh with refresh_token
//       └─ returns new access_token
