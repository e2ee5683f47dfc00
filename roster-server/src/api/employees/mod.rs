//! Employee API Module
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET    | /api/v1/employees/employees | list |
//! | POST   | /api/v1/employees/employees | create |
//! | GET    | /api/v1/employees/employees/{id} | get_by_id |
//! | PUT    | /api/v1/employees/employees/{id} | update |
//! | DELETE | /api/v1/employees/employees/{id} | delete |
//! | GET    | /api/v1/employees/search?name= | search_by_name |
//! | GET    | /api/v1/employees/departments | list_departments |
//! | GET    | /api/v1/employees/departments/{department}/employees | list_by_department |
//! | GET    | /api/v1/employees/departments/{department}/average-salary | average_salary |
//! | GET    | /api/v1/employees/top-earners?limit= | top_earners |
//! | GET    | /api/v1/employees/recent-hires?limit= | recent_hires |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub const API_PREFIX: &str = "/api/v1/employees";

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest(API_PREFIX, routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/employees", get(handler::list).post(handler::create))
        .route(
            "/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/search", get(handler::search_by_name))
        .route("/departments", get(handler::list_departments))
        .route(
            "/departments/{department}/employees",
            get(handler::list_by_department),
        )
        .route(
            "/departments/{department}/average-salary",
            get(handler::average_salary),
        )
        .route("/top-earners", get(handler::top_earners))
        .route("/recent-hires", get(handler::recent_hires))
}
