#![allow(dead_code, unused_macros)]

pub mod fixtures;

/// Initialize an actix test service with production routes and middleware.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(talker_backend::StructuredLogger)
                .wrap(talker_backend::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(talker_backend::routes::configure),
        )
    };
}
