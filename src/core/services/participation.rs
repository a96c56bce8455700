use chrono::Utc;
use log::{info, warn};

use crate::core::models::participation::{Application, ApplicationQuery, Apply, Insert, ParticipationStatus, Review, TransitionPolicy, Update, VolunteerParticipation};
use crate::core::models::user::UserType;
use crate::core::ports::repository::{InitiativeCommon, ParticipationCommon, Store, TxStore};
use crate::core::services::initiative::require_user;
use crate::error::Error;

pub async fn apply<T>(mut store: T, initiative_id: i64, data: Apply) -> Result<i64, Error>
where
    T: TxStore,
{
    if InitiativeCommon::get(&mut store, initiative_id).await?.is_none() {
        return Err(Error::not_found("initiative", initiative_id));
    }
    require_user(&mut store, data.volunteer_id, UserType::Volunteer).await?;
    if ParticipationCommon::exists(&mut store, data.volunteer_id, initiative_id).await? {
        warn!("volunteer {} has already applied to initiative {}", data.volunteer_id, initiative_id);
        return Err(Error::Conflict(format!(
            "volunteer(id: {}) has already applied to initiative(id: {})",
            data.volunteer_id, initiative_id
        )));
    }
    let id = ParticipationCommon::insert(
        &mut store,
        Insert {
            volunteer_id: data.volunteer_id,
            initiative_id,
            status: ParticipationStatus::Pending,
            applied_date: Utc::now().naive_utc(),
            message: data.message,
        },
    )
    .await?;
    store.commit().await?;
    info!("volunteer {} applied to initiative {}(participation {})", data.volunteer_id, initiative_id, id);
    Ok(id)
}

pub async fn review<T>(mut store: T, policy: TransitionPolicy, id: i64, data: Review) -> Result<ParticipationStatus, Error>
where
    T: TxStore,
{
    if matches!(data.hours_completed, Some(h) if h < 0) {
        return Err(Error::BusinessError("hours_completed must not be negative".into()));
    }
    let current = ParticipationCommon::get(&mut store, id).await?.ok_or_else(|| Error::not_found("participation", id))?;
    if !policy.allows(current.status, data.status) {
        warn!("rejected participation {} transition {} -> {}", id, current.status, data.status);
        return Err(Error::InvalidState(format!("participation(id: {}) cannot change from {} to {}", id, current.status, data.status)));
    }
    let approved_date = if data.status == ParticipationStatus::Approved {
        Some(Utc::now().naive_utc())
    } else {
        None
    };
    ParticipationCommon::update(
        &mut store,
        id,
        Update {
            status: data.status,
            hours_completed: data.hours_completed,
            approved_date,
            feedback: data.feedback,
        },
    )
    .await?;
    store.commit().await?;
    info!("participation {} changed from {} to {}", id, current.status, data.status);
    Ok(data.status)
}

pub async fn volunteer_participations<S>(store: &mut S, volunteer_id: i64) -> Result<Vec<VolunteerParticipation>, Error>
where
    S: Store,
{
    ParticipationCommon::query_by_volunteer(store, volunteer_id).await
}

pub async fn organization_applications<S>(store: &mut S, query: ApplicationQuery) -> Result<Vec<Application>, Error>
where
    S: Store,
{
    ParticipationCommon::query_applications(store, &query).await
}
