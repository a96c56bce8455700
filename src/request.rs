use serde::Deserialize;

use crate::core::models::initiative::{InitiativeStatus, Query as InitiativeQuery};
use crate::core::models::participation::{ApplicationQuery, ParticipationStatus};
use crate::core::models::user::{Query as UserQuery, UserType};
use crate::error::Error;

/// Disables the status filter on the initiative list, as does an empty value.
const ALL_STATUSES: &str = "all";

#[derive(Debug, Default, Deserialize)]
pub struct InitiativeParams {
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub organization_id: Option<i64>,
}

impl TryFrom<InitiativeParams> for InitiativeQuery {
    type Error = Error;
    fn try_from(p: InitiativeParams) -> Result<Self, Self::Error> {
        let status_eq = match p.status.as_deref() {
            None => Some(InitiativeStatus::Active),
            Some("") | Some(ALL_STATUSES) => None,
            Some(s) => Some(s.parse()?),
        };
        Ok(InitiativeQuery {
            category_eq: p.category,
            location_like: p.location,
            status_eq,
            organization_id_eq: p.organization_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationParams {
    pub status: Option<String>,
}

impl ApplicationParams {
    pub fn into_query(self, organization_id: i64) -> Result<ApplicationQuery, Error> {
        let status_eq = self.status.as_deref().filter(|s| !s.is_empty()).map(str::parse::<ParticipationStatus>).transpose()?;
        Ok(ApplicationQuery {
            organization_id_eq: organization_id,
            status_eq,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserParams {
    pub user_type: Option<String>,
}

impl TryFrom<UserParams> for UserQuery {
    type Error = Error;
    fn try_from(p: UserParams) -> Result<Self, Self::Error> {
        Ok(UserQuery {
            user_type_eq: p.user_type.as_deref().filter(|s| !s.is_empty()).map(str::parse::<UserType>).transpose()?,
        })
    }
}
