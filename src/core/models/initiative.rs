use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InitiativeStatus {
    Active,
    Completed,
    Cancelled,
}

impl InitiativeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitiativeStatus::Active => "active",
            InitiativeStatus::Completed => "completed",
            InitiativeStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InitiativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitiativeStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Error::BusinessError(format!("invalid initiative status({})", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Initiative {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_required: i64,
    pub spots_available: i64,
    pub requirements: Option<String>,
    pub organization_id: i64,
    pub status: InitiativeStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InitiativeWithOrganization {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub initiative: Initiative,
    pub organization_name: String,
    pub organization_email: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InitiativeDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub initiative: Initiative,
    pub organization_name: String,
    pub organization_email: String,
    pub organization_phone: Option<String>,
    // pending + approved
    pub applications_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InitiativeWithApplicationStats {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub initiative: Initiative,
    pub pending_applications: i64,
    pub approved_volunteers: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_required: i64,
    pub spots_available: i64,
    pub requirements: Option<String>,
    pub organization_id: i64,
}

impl Create {
    pub fn validate(&self) -> Result<(), Error> {
        if self.end_date < self.start_date {
            return Err(Error::BusinessError(format!("end_date({}) is before start_date({})", self.end_date, self.start_date)));
        }
        if self.hours_required < 0 || self.spots_available < 0 {
            return Err(Error::BusinessError("hours_required and spots_available must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_required: i64,
    pub spots_available: i64,
    pub requirements: Option<String>,
    pub organization_id: i64,
    pub status: InitiativeStatus,
}

impl From<Create> for Insert {
    fn from(c: Create) -> Self {
        Self {
            title: c.title,
            description: c.description,
            category: c.category,
            location: c.location,
            latitude: c.latitude,
            longitude: c.longitude,
            start_date: c.start_date,
            end_date: c.end_date,
            hours_required: c.hours_required,
            spots_available: c.spots_available,
            requirements: c.requirements,
            organization_id: c.organization_id,
            status: InitiativeStatus::Active,
        }
    }
}

/// Every field maps to one fixed predicate; `None` leaves it out.
#[derive(Debug, Default, Clone)]
pub struct Query {
    pub category_eq: Option<String>,
    pub location_like: Option<String>,
    pub status_eq: Option<InitiativeStatus>,
    pub organization_id_eq: Option<i64>,
}

#[cfg(test)]
mod test {
    use super::*;

    fn create() -> Create {
        Create {
            title: "Sprzątanie Wisły".into(),
            description: "Sprzątanie bulwarów".into(),
            category: "Ekologia".into(),
            location: "Bulwary Wiślane, Kraków".into(),
            latitude: None,
            longitude: None,
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            hours_required: 4,
            spots_available: 20,
            requirements: None,
            organization_id: 1,
        }
    }

    #[test]
    fn test_validate_create() {
        assert!(create().validate().is_ok());

        let mut c = create();
        c.end_date = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        assert!(matches!(c.validate(), Err(Error::BusinessError(_))));

        let mut c = create();
        c.spots_available = -1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_insert_starts_active() {
        let insert: Insert = create().into();
        assert_eq!(insert.status, InitiativeStatus::Active);
        assert_eq!(insert.category, "Ekologia");
    }
}
