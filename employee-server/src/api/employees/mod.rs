//! Employee API Module
//!
//! Static segments (`/delete-all`, `/salary-desc`, ...) take precedence over
//! `/{id}` in the router, so they never parse as an id.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    let crud_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/delete-all", delete(handler::delete_all));

    let query_routes = Router::new()
        .route("/city/{city}", get(handler::by_city))
        .route(
            "/city/{city}/designation/{designation}",
            get(handler::by_city_and_designation),
        )
        .route("/designation/{designation}", get(handler::by_designation))
        .route("/department/{department}", get(handler::by_department))
        .route(
            "/department/{department}/city/{city}",
            get(handler::by_department_and_city),
        )
        .route("/salary-between/{min}/{max}", get(handler::salary_between))
        .route("/salary-above/{amount}", get(handler::salary_above))
        .route("/salary-desc", get(handler::salary_desc))
        .route("/top-paid", get(handler::top_paid))
        .route("/name-search/{keyword}", get(handler::name_search))
        .route("/name-prefix/{prefix}", get(handler::name_prefix))
        .route("/email-domain/{suffix}", get(handler::email_domain))
        .route(
            "/high-earners/{department}/{salary}",
            get(handler::high_earners),
        )
        .route("/average-salary", get(handler::average_salary))
        .route("/count-by-city", get(handler::count_by_city));

    crud_routes.merge(query_routes)
}
