use chrono::Utc;
use log::info;

use crate::core::models::certificate::{CertificateWithContext, Create, Insert, Issued};
use crate::core::models::participation::ParticipationStatus;
use crate::core::models::user::UserType;
use crate::core::ports::repository::{CertificateCommon, ParticipationCommon, Store, TxStore};
use crate::core::services::initiative::require_user;
use crate::error::Error;

// Several certificates may be issued for one participation.
pub async fn issue_certificate<T>(mut store: T, data: Create) -> Result<Issued, Error>
where
    T: TxStore,
{
    let snapshot = ParticipationCommon::snapshot(&mut store, data.participation_id)
        .await?
        .ok_or_else(|| Error::not_found("participation", data.participation_id))?;
    if snapshot.participation.status != ParticipationStatus::Completed {
        return Err(Error::InvalidState(format!(
            "participation(id: {}) is {}, certificates are issued for completed participations only",
            data.participation_id, snapshot.participation.status
        )));
    }
    require_user(&mut store, data.organization_id, UserType::Organization).await?;
    let certificate_data = serde_json::to_string(&snapshot)?;
    let id = CertificateCommon::insert(
        &mut store,
        Insert {
            participation_id: data.participation_id,
            volunteer_id: snapshot.participation.volunteer_id,
            organization_id: data.organization_id,
            issued_date: Utc::now().naive_utc(),
            hours_completed: snapshot.participation.hours_completed,
            certificate_data,
        },
    )
    .await?;
    store.commit().await?;
    info!("certificate {} issued for participation {}", id, data.participation_id);
    Ok(Issued {
        certificate_id: id,
        volunteer_name: snapshot.volunteer_name,
        initiative_title: snapshot.initiative_title,
        hours: snapshot.participation.hours_completed,
    })
}

pub async fn volunteer_certificates<S>(store: &mut S, volunteer_id: i64) -> Result<Vec<CertificateWithContext>, Error>
where
    S: Store,
{
    CertificateCommon::query_by_volunteer(store, volunteer_id).await
}
