use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};

use wanderplan_api::routes;

pub struct TestApp;

impl TestApp {
    pub fn new() -> Self {
        Self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/", web::get().to(|| async { "Wanderplan API is running" }))
            .route("/health", web::get().to(routes::health::health_check))
            .route("/personas", web::get().to(routes::persona::get_personas))
            .route(
                "/itineraries/generate",
                web::post().to(routes::itinerary::generate),
            )
            .route(
                "/itineraries/estimate-cost",
                web::post().to(routes::itinerary::estimate_cost),
            )
            .route(
                "/itineraries/suggestions",
                web::post().to(routes::itinerary::suggestions),
            )
    }
}
