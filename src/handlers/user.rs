use actix_web::web::{Json, Path, Query};

use crate::core::models::user::{Query as UserQuery, User};
use crate::core::ports::repository::Manager;
use crate::core::services::user;
use crate::error::Error;
use crate::handlers::DB;
use crate::request::UserParams;
use crate::response::List;

pub async fn list(Query(params): Query<UserParams>, db: DB) -> Result<Json<List<User>>, Error> {
    let query: UserQuery = params.try_into()?;
    let mut store = db.db().await?;
    let users = user::query_users(&mut store, query).await?;
    Ok(Json(List::new(users)))
}

pub async fn detail(user_id: Path<(i64,)>, db: DB) -> Result<Json<User>, Error> {
    let user_id = user_id.into_inner().0;
    let mut store = db.db().await?;
    Ok(Json(user::user_detail(&mut store, user_id).await?))
}
