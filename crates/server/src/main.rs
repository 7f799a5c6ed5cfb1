mod context;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use axum::{
    Router,
    routing::{delete, get, post},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{doc::ApiDoc, utils::shutdown::shutdown_signal};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = database::db::create_connection()
        .await
        .expect("failed to connect to database");

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route("/auth/login", post(routes::auth::login))
        .route(
            "/departments",
            get(routes::department::list_departments).post(routes::department::create_department),
        )
        .route(
            "/departments/{id}",
            get(routes::department::get_department)
                .put(routes::department::update_department)
                .delete(routes::department::delete_department),
        )
        .route(
            "/courses",
            get(routes::course::list_courses).post(routes::course::create_course),
        )
        .route(
            "/courses/{id}",
            get(routes::course::get_course)
                .put(routes::course::update_course)
                .delete(routes::course::delete_course),
        )
        .route(
            "/modules",
            get(routes::module::list_modules).post(routes::module::create_module),
        )
        .route(
            "/modules/{id}",
            get(routes::module::get_module)
                .put(routes::module::update_module)
                .delete(routes::module::delete_module),
        )
        .route("/catalog", get(routes::catalog::get_catalog))
        .route(
            "/students",
            get(routes::student::list_students).post(routes::student::create_student),
        )
        .route(
            "/students/{id}",
            get(routes::student::get_student)
                .put(routes::student::update_student)
                .delete(routes::student::delete_student),
        )
        .route(
            "/users",
            get(routes::user::list_users).post(routes::user::create_user),
        )
        .route(
            "/users/{id}",
            get(routes::user::get_user).put(routes::user::update_user),
        )
        .route(
            "/enrollments",
            get(routes::enrollment::list_enrollments).post(routes::enrollment::enroll),
        )
        .route(
            "/enrollments/{course_id}",
            delete(routes::enrollment::drop_enrollment),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(db);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind listener");
    info!("Running axum on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server exited with an error");
}
