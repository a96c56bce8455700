use actix_web::web::{Data, Json, Path};

use crate::core::models::participation::{Review, TransitionPolicy};
use crate::core::ports::repository::Manager;
use crate::core::services::participation;
use crate::error::Error;
use crate::handlers::DB;
use crate::response::UpdateResponse;

pub async fn review(
    participation_id: Path<(i64,)>,
    Json(body): Json<Review>,
    policy: Data<TransitionPolicy>,
    db: DB,
) -> Result<Json<UpdateResponse>, Error> {
    let participation_id = participation_id.into_inner().0;
    let status = participation::review(db.tx().await?, *policy.get_ref(), participation_id, body).await?;
    Ok(Json(UpdateResponse {
        id: participation_id,
        status: status.to_string(),
    }))
}
