use actix_web::web::{Json, Path, Query};

use crate::core::models::initiative::{Create, InitiativeDetail, InitiativeWithOrganization, Query as InitiativeQuery};
use crate::core::models::participation::Apply;
use crate::core::ports::repository::Manager;
use crate::core::services::{initiative, participation};
use crate::error::Error;
use crate::handlers::DB;
use crate::request::InitiativeParams;
use crate::response::{ApplyResponse, CreateResponse, List};

pub async fn list(Query(params): Query<InitiativeParams>, db: DB) -> Result<Json<List<InitiativeWithOrganization>>, Error> {
    let query: InitiativeQuery = params.try_into()?;
    let mut store = db.db().await?;
    let initiatives = initiative::query_initiatives(&mut store, query).await?;
    Ok(Json(List::new(initiatives)))
}

pub async fn detail(initiative_id: Path<(i64,)>, db: DB) -> Result<Json<InitiativeDetail>, Error> {
    let initiative_id = initiative_id.into_inner().0;
    let mut store = db.db().await?;
    let detail = initiative::initiative_detail(&mut store, initiative_id).await?;
    Ok(Json(detail))
}

pub async fn create(Json(body): Json<Create>, db: DB) -> Result<Json<CreateResponse>, Error> {
    let id = initiative::create_initiative(db.tx().await?, body).await?;
    Ok(Json(CreateResponse { id }))
}

pub async fn apply(initiative_id: Path<(i64,)>, Json(body): Json<Apply>, db: DB) -> Result<Json<ApplyResponse>, Error> {
    let initiative_id = initiative_id.into_inner().0;
    let participation_id = participation::apply(db.tx().await?, initiative_id, body).await?;
    Ok(Json(ApplyResponse { participation_id }))
}
