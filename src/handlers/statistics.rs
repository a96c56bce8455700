use actix_web::web::Json;

use crate::core::models::statistics::Statistics;
use crate::core::ports::repository::Manager;
use crate::core::services::statistics;
use crate::error::Error;
use crate::handlers::DB;

pub async fn overview(db: DB) -> Result<Json<Statistics>, Error> {
    let mut store = db.db().await?;
    Ok(Json(statistics::platform_statistics(&mut store).await?))
}
