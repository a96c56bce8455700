use crate::core::models::user::{Query, User};
use crate::core::ports::repository::{Store, UserCommon};
use crate::error::Error;

pub async fn query_users<S>(store: &mut S, query: Query) -> Result<Vec<User>, Error>
where
    S: Store,
{
    UserCommon::query(store, &query).await
}

pub async fn user_detail<S>(store: &mut S, id: i64) -> Result<User, Error>
where
    S: Store,
{
    UserCommon::get(store, id).await?.ok_or_else(|| Error::not_found("user", id))
}
