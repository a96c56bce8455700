pub mod certificate;
pub mod coordinator;
pub mod initiative;
pub mod organization;
pub mod participation;
pub mod statistics;
pub mod user;
pub mod volunteer;

use actix_web::web::{Data, Json};
use serde::Serialize;

use crate::database::sqlx::SqliteSqlxManager;

pub type DB = Data<SqliteSqlxManager>;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    initiatives: &'static str,
    users: &'static str,
    statistics: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Index {
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

pub async fn index() -> Json<Index> {
    Json(Index {
        message: "Volunteer Center API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            initiatives: "/initiatives",
            users: "/users",
            statistics: "/statistics",
        },
    })
}
