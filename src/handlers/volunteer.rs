use actix_web::web::{Json, Path};

use crate::core::models::certificate::CertificateWithContext;
use crate::core::models::participation::VolunteerParticipation;
use crate::core::ports::repository::Manager;
use crate::core::services::{certificate, participation};
use crate::error::Error;
use crate::handlers::DB;
use crate::response::List;

pub async fn participations(volunteer_id: Path<(i64,)>, db: DB) -> Result<Json<List<VolunteerParticipation>>, Error> {
    let volunteer_id = volunteer_id.into_inner().0;
    let mut store = db.db().await?;
    let participations = participation::volunteer_participations(&mut store, volunteer_id).await?;
    Ok(Json(List::new(participations)))
}

pub async fn certificates(volunteer_id: Path<(i64,)>, db: DB) -> Result<Json<List<CertificateWithContext>>, Error> {
    let volunteer_id = volunteer_id.into_inner().0;
    let mut store = db.db().await?;
    let certificates = certificate::volunteer_certificates(&mut store, volunteer_id).await?;
    Ok(Json(List::new(certificates)))
}
