use chrono::Utc;

use crate::core::models::statistics::{CoordinatorReport, SchoolStatistics};
use crate::core::models::user::{Student, User, UserType};
use crate::core::ports::repository::{StatisticsCommon, Store, UserCommon};
use crate::error::Error;

const POPULAR_CATEGORIES: i64 = 5;

async fn coordinator<S>(store: &mut S, id: i64) -> Result<User, Error>
where
    S: Store,
{
    match UserCommon::get(store, id).await? {
        Some(user) if user.user_type == UserType::Coordinator => Ok(user),
        _ => Err(Error::not_found("coordinator", id)),
    }
}

/// Volunteers sharing the coordinator's school. A coordinator without a school has no students.
pub async fn students<S>(store: &mut S, coordinator_id: i64) -> Result<Vec<Student>, Error>
where
    S: Store,
{
    let coordinator = coordinator(store, coordinator_id).await?;
    match coordinator.school_id {
        Some(school_id) => UserCommon::students(store, school_id).await,
        None => Ok(Vec::new()),
    }
}

pub async fn report<S>(store: &mut S, coordinator_id: i64) -> Result<CoordinatorReport, Error>
where
    S: Store,
{
    let coordinator = coordinator(store, coordinator_id).await?;
    let (statistics, popular_categories) = match coordinator.school_id {
        Some(school_id) => (
            StatisticsCommon::school_statistics(store, school_id).await?,
            StatisticsCommon::school_categories(store, school_id, POPULAR_CATEGORIES).await?,
        ),
        None => (SchoolStatistics::default(), Vec::new()),
    };
    Ok(CoordinatorReport {
        school_id: coordinator.school_id,
        statistics,
        popular_categories,
        generated_at: Utc::now().naive_utc(),
    })
}
