use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::core::models::user::AgeCategory;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ParticipationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationStatus::Pending => "pending",
            ParticipationStatus::Approved => "approved",
            ParticipationStatus::Rejected => "rejected",
            ParticipationStatus::Completed => "completed",
        }
    }

    /// pending -> approved | rejected, approved -> completed.
    pub fn can_transition_to(self, next: ParticipationStatus) -> bool {
        use ParticipationStatus::*;
        matches!((self, next), (Pending, Approved) | (Pending, Rejected) | (Approved, Completed))
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipationStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::BusinessError(format!("invalid participation status({})", s))),
        }
    }
}

/// How status updates are checked against the transition table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicy {
    // rejects moves outside the transition table
    Strict,
    // any target status is accepted
    #[default]
    Permissive,
}

impl FromStr for TransitionPolicy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(Error::ConfigError(format!("invalid participation transition policy({})", s))),
        }
    }
}

impl TransitionPolicy {
    pub fn allows(&self, from: ParticipationStatus, to: ParticipationStatus) -> bool {
        match self {
            TransitionPolicy::Strict => from.can_transition_to(to),
            TransitionPolicy::Permissive => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participation {
    pub id: i64,
    pub volunteer_id: i64,
    pub initiative_id: i64,
    pub status: ParticipationStatus,
    pub applied_date: NaiveDateTime,
    pub approved_date: Option<NaiveDateTime>,
    pub hours_completed: i64,
    pub message: Option<String>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VolunteerParticipation {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub participation: Participation,
    pub initiative_title: String,
    pub category: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub organization_name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub participation: Participation,
    pub initiative_title: String,
    pub volunteer_name: String,
    pub volunteer_email: String,
    pub volunteer_phone: Option<String>,
    pub age_category: Option<AgeCategory>,
}

/// Joined view of a participation, serialized into certificates.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Snapshot {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub participation: Participation,
    pub initiative_title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub volunteer_name: String,
    pub organization_id: i64,
    pub organization_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Apply {
    pub volunteer_id: i64,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub status: ParticipationStatus,
    pub hours_completed: Option<i64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub volunteer_id: i64,
    pub initiative_id: i64,
    pub status: ParticipationStatus,
    pub applied_date: NaiveDateTime,
    pub message: Option<String>,
}

/// `None` fields keep their stored value.
#[derive(Debug, Clone)]
pub struct Update {
    pub status: ParticipationStatus,
    pub hours_completed: Option<i64>,
    pub approved_date: Option<NaiveDateTime>,
    pub feedback: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ApplicationQuery {
    pub organization_id_eq: i64,
    pub status_eq: Option<ParticipationStatus>,
}
