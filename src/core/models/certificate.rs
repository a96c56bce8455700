use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Certificate {
    pub id: i64,
    pub participation_id: i64,
    pub volunteer_id: i64,
    pub organization_id: i64,
    pub issued_date: NaiveDateTime,
    pub hours_completed: i64,
    pub certificate_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CertificateWithContext {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub certificate: Certificate,
    pub initiative_title: String,
    pub organization_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub participation_id: i64,
    pub organization_id: i64,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub participation_id: i64,
    pub volunteer_id: i64,
    pub organization_id: i64,
    pub issued_date: NaiveDateTime,
    pub hours_completed: i64,
    pub certificate_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Issued {
    pub certificate_id: i64,
    pub volunteer_name: String,
    pub initiative_title: String,
    pub hours: i64,
}
