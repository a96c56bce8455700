use log::{debug, info};

use crate::core::models::initiative::{Create, InitiativeDetail, InitiativeWithApplicationStats, InitiativeWithOrganization, Query};
use crate::core::models::user::UserType;
use crate::core::ports::repository::{InitiativeCommon, Store, TxStore, UserCommon};
use crate::error::Error;

pub(crate) async fn require_user<S>(store: &mut S, id: i64, user_type: UserType) -> Result<(), Error>
where
    S: Store,
{
    match UserCommon::get(store, id).await? {
        Some(user) if user.user_type == user_type => Ok(()),
        _ => Err(Error::not_found(user_type.as_str(), id)),
    }
}

pub async fn create_initiative<T>(mut store: T, data: Create) -> Result<i64, Error>
where
    T: TxStore,
{
    data.validate()?;
    require_user(&mut store, data.organization_id, UserType::Organization).await?;
    let organization_id = data.organization_id;
    let id = InitiativeCommon::insert(&mut store, data.into()).await?;
    store.commit().await?;
    info!("initiative {} created by organization {}", id, organization_id);
    Ok(id)
}

pub async fn query_initiatives<S>(store: &mut S, query: Query) -> Result<Vec<InitiativeWithOrganization>, Error>
where
    S: Store,
{
    debug!("querying initiatives with {:?}", query);
    InitiativeCommon::query(store, &query).await
}

pub async fn initiative_detail<S>(store: &mut S, id: i64) -> Result<InitiativeDetail, Error>
where
    S: Store,
{
    InitiativeCommon::detail(store, id).await?.ok_or_else(|| Error::not_found("initiative", id))
}

pub async fn organization_initiatives<S>(store: &mut S, organization_id: i64) -> Result<Vec<InitiativeWithApplicationStats>, Error>
where
    S: Store,
{
    require_user(store, organization_id, UserType::Organization).await?;
    InitiativeCommon::query_with_application_stats(store, organization_id).await
}
