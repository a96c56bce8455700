#![allow(async_fn_in_trait)]

use crate::core::models::{
    certificate::{CertificateWithContext, Insert as CertificateInsert},
    initiative::{Initiative, InitiativeDetail, InitiativeWithApplicationStats, InitiativeWithOrganization, Insert as InitiativeInsert, Query as InitiativeQuery},
    participation::{Application, ApplicationQuery, Insert as ParticipationInsert, Participation, Snapshot, Update as ParticipationUpdate, VolunteerParticipation},
    statistics::{CategoryCount, Overview, RecentInitiative, SchoolStatistics},
    user::{Insert as UserInsert, Query as UserQuery, Student, User},
};
use crate::error::Error;

pub trait UserCommon {
    async fn insert(&mut self, data: UserInsert) -> Result<i64, Error>;
    async fn get(&mut self, id: i64) -> Result<Option<User>, Error>;
    async fn query(&mut self, query: &UserQuery) -> Result<Vec<User>, Error>;
    async fn students(&mut self, school_id: i64) -> Result<Vec<Student>, Error>;
}

pub trait InitiativeCommon {
    async fn insert(&mut self, data: InitiativeInsert) -> Result<i64, Error>;
    async fn get(&mut self, id: i64) -> Result<Option<Initiative>, Error>;
    async fn detail(&mut self, id: i64) -> Result<Option<InitiativeDetail>, Error>;
    async fn query(&mut self, query: &InitiativeQuery) -> Result<Vec<InitiativeWithOrganization>, Error>;
    async fn query_with_application_stats(&mut self, organization_id: i64) -> Result<Vec<InitiativeWithApplicationStats>, Error>;
}

pub trait ParticipationCommon {
    async fn insert(&mut self, data: ParticipationInsert) -> Result<i64, Error>;
    async fn get(&mut self, id: i64) -> Result<Option<Participation>, Error>;
    async fn exists(&mut self, volunteer_id: i64, initiative_id: i64) -> Result<bool, Error>;
    async fn update(&mut self, id: i64, data: ParticipationUpdate) -> Result<(), Error>;
    async fn query_by_volunteer(&mut self, volunteer_id: i64) -> Result<Vec<VolunteerParticipation>, Error>;
    async fn query_applications(&mut self, query: &ApplicationQuery) -> Result<Vec<Application>, Error>;
    async fn snapshot(&mut self, id: i64) -> Result<Option<Snapshot>, Error>;
}

pub trait CertificateCommon {
    async fn insert(&mut self, data: CertificateInsert) -> Result<i64, Error>;
    async fn query_by_volunteer(&mut self, volunteer_id: i64) -> Result<Vec<CertificateWithContext>, Error>;
}

pub trait StatisticsCommon {
    async fn overview(&mut self) -> Result<Overview, Error>;
    async fn initiative_categories(&mut self) -> Result<Vec<CategoryCount>, Error>;
    async fn recent_initiatives(&mut self, limit: i64) -> Result<Vec<RecentInitiative>, Error>;
    async fn school_statistics(&mut self, school_id: i64) -> Result<SchoolStatistics, Error>;
    async fn school_categories(&mut self, school_id: i64, limit: i64) -> Result<Vec<CategoryCount>, Error>;
}

pub trait Common: UserCommon + InitiativeCommon + ParticipationCommon + CertificateCommon + StatisticsCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager<S, T>
where
    S: Store,
    T: TxStore,
{
    async fn db(&self) -> Result<S, Error>;
    async fn tx(&self) -> Result<T, Error>;
}
