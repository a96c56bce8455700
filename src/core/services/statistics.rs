use crate::core::models::statistics::Statistics;
use crate::core::ports::repository::{StatisticsCommon, Store};
use crate::error::Error;

const RECENT_INITIATIVES: i64 = 5;

pub async fn platform_statistics<S>(store: &mut S) -> Result<Statistics, Error>
where
    S: Store,
{
    let overview = StatisticsCommon::overview(store).await?;
    let categories = StatisticsCommon::initiative_categories(store).await?;
    let recent_initiatives = StatisticsCommon::recent_initiatives(store, RECENT_INITIATIVES).await?;
    Ok(Statistics {
        overview,
        categories,
        recent_initiatives,
    })
}
