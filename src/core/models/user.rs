use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserType {
    Volunteer,
    Organization,
    Coordinator,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Volunteer => "volunteer",
            UserType::Organization => "organization",
            UserType::Coordinator => "coordinator",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volunteer" => Ok(Self::Volunteer),
            "organization" => Ok(Self::Organization),
            "coordinator" => Ok(Self::Coordinator),
            _ => Err(Error::BusinessError(format!("invalid user type({})", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AgeCategory {
    Minor,
    Adult,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub age_category: Option<AgeCategory>,
    pub school_id: Option<i64>,
    pub organization_type: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Volunteer sharing a coordinator's school, with participation totals.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: User,
    pub total_participations: i64,
    pub total_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insert {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub age_category: Option<AgeCategory>,
    pub school_id: Option<i64>,
    pub organization_type: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl Insert {
    pub fn new(name: &str, email: &str, user_type: UserType) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            user_type,
            age_category: None,
            school_id: None,
            organization_type: None,
            address: None,
            description: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Query {
    pub user_type_eq: Option<UserType>,
}
