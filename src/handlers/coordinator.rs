use actix_web::web::{Json, Path};

use crate::core::models::statistics::CoordinatorReport;
use crate::core::models::user::Student;
use crate::core::ports::repository::Manager;
use crate::core::services::coordinator;
use crate::error::Error;
use crate::handlers::DB;
use crate::response::List;

pub async fn students(coordinator_id: Path<(i64,)>, db: DB) -> Result<Json<List<Student>>, Error> {
    let coordinator_id = coordinator_id.into_inner().0;
    let mut store = db.db().await?;
    let students = coordinator::students(&mut store, coordinator_id).await?;
    Ok(Json(List::new(students)))
}

pub async fn report(coordinator_id: Path<(i64,)>, db: DB) -> Result<Json<CoordinatorReport>, Error> {
    let coordinator_id = coordinator_id.into_inner().0;
    let mut store = db.db().await?;
    let report = coordinator::report(&mut store, coordinator_id).await?;
    Ok(Json(report))
}
