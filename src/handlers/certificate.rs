use actix_web::web::Json;

use crate::core::models::certificate::{Create, Issued};
use crate::core::ports::repository::Manager;
use crate::core::services::certificate;
use crate::error::Error;
use crate::handlers::DB;

pub async fn create(Json(body): Json<Create>, db: DB) -> Result<Json<Issued>, Error> {
    let issued = certificate::issue_certificate(db.tx().await?, body).await?;
    Ok(Json(issued))
}
