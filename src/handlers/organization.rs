use actix_web::web::{Json, Path, Query};

use crate::core::models::initiative::InitiativeWithApplicationStats;
use crate::core::models::participation::Application;
use crate::core::ports::repository::Manager;
use crate::core::services::{initiative, participation};
use crate::error::Error;
use crate::handlers::DB;
use crate::request::ApplicationParams;
use crate::response::List;

pub async fn initiatives(organization_id: Path<(i64,)>, db: DB) -> Result<Json<List<InitiativeWithApplicationStats>>, Error> {
    let organization_id = organization_id.into_inner().0;
    let mut store = db.db().await?;
    let initiatives = initiative::organization_initiatives(&mut store, organization_id).await?;
    Ok(Json(List::new(initiatives)))
}

pub async fn applications(
    organization_id: Path<(i64,)>,
    Query(params): Query<ApplicationParams>,
    db: DB,
) -> Result<Json<List<Application>>, Error> {
    let organization_id = organization_id.into_inner().0;
    let query = params.into_query(organization_id)?;
    let mut store = db.db().await?;
    let applications = participation::organization_applications(&mut store, query).await?;
    Ok(Json(List::new(applications)))
}
