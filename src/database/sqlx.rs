use std::ops::DerefMut;

use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::core::models::{
    certificate::{CertificateWithContext, Insert as CertificateInsert},
    initiative::{Initiative, InitiativeDetail, InitiativeWithApplicationStats, InitiativeWithOrganization, Insert as InitiativeInsert, Query as InitiativeQuery},
    participation::{Application, ApplicationQuery, Insert as ParticipationInsert, Participation, Snapshot, Update as ParticipationUpdate, VolunteerParticipation},
    statistics::{CategoryCount, Overview, RecentInitiative, SchoolStatistics},
    user::{Insert as UserInsert, Query as UserQuery, Student, User},
};
use crate::core::ports::repository::{CertificateCommon, Common, InitiativeCommon, Manager, ParticipationCommon, StatisticsCommon, Store, TxStore, UserCommon};
use crate::error::Error;

pub struct SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    executor: E,
}

impl<E> SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

/// Substring pattern for `LIKE ... ESCAPE '\'`.
fn like_pattern(s: &str) -> String {
    let mut pattern = String::with_capacity(s.len() + 2);
    pattern.push('%');
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl<E> UserCommon for SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    async fn insert(&mut self, data: UserInsert) -> Result<i64, Error> {
        let id = query_scalar(
            "
        INSERT INTO users (name, email, phone, user_type, age_category, school_id, organization_type, address, description)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        RETURNING id",
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.user_type)
        .bind(data.age_category)
        .bind(data.school_id)
        .bind(data.organization_type)
        .bind(data.address)
        .bind(data.description)
        .fetch_one(&mut *self.executor)
        .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i64) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE id = ?1").bind(id).fetch_optional(&mut *self.executor).await?;
        Ok(user)
    }

    async fn query(&mut self, query: &UserQuery) -> Result<Vec<User>, Error> {
        let users = query_as(
            "
        SELECT *
        FROM users
        WHERE (?1 IS NULL OR user_type = ?1)
        ORDER BY id",
        )
        .bind(query.user_type_eq)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(users)
    }

    async fn students(&mut self, school_id: i64) -> Result<Vec<Student>, Error> {
        let students = query_as(
            "
        SELECT
            u.*,
            COUNT(DISTINCT p.id) AS total_participations,
            COALESCE(SUM(CASE WHEN p.status = 'completed' THEN p.hours_completed ELSE 0 END), 0) AS total_hours
        FROM users AS u
        LEFT JOIN participations AS p ON u.id = p.volunteer_id
        WHERE u.user_type = 'volunteer'
            AND u.school_id = ?1
        GROUP BY u.id
        ORDER BY u.name, u.id",
        )
        .bind(school_id)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(students)
    }
}

impl<E> InitiativeCommon for SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    async fn insert(&mut self, data: InitiativeInsert) -> Result<i64, Error> {
        let id = query_scalar(
            "
        INSERT INTO initiatives
            (title, description, category, location, latitude, longitude, start_date, end_date,
             hours_required, spots_available, requirements, organization_id, status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        RETURNING id",
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.category)
        .bind(data.location)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.hours_required)
        .bind(data.spots_available)
        .bind(data.requirements)
        .bind(data.organization_id)
        .bind(data.status)
        .fetch_one(&mut *self.executor)
        .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i64) -> Result<Option<Initiative>, Error> {
        let initiative = query_as("SELECT * FROM initiatives WHERE id = ?1").bind(id).fetch_optional(&mut *self.executor).await?;
        Ok(initiative)
    }

    async fn detail(&mut self, id: i64) -> Result<Option<InitiativeDetail>, Error> {
        let detail = query_as(
            "
        SELECT
            i.*,
            u.name AS organization_name,
            u.email AS organization_email,
            u.phone AS organization_phone,
            (SELECT COUNT(*)
             FROM participations AS p
             WHERE p.initiative_id = i.id AND p.status IN ('pending', 'approved')) AS applications_count
        FROM initiatives AS i
        JOIN users AS u ON i.organization_id = u.id
        WHERE i.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.executor)
        .await?;
        Ok(detail)
    }

    async fn query(&mut self, query: &InitiativeQuery) -> Result<Vec<InitiativeWithOrganization>, Error> {
        let initiatives = query_as(
            r#"
        SELECT i.*, u.name AS organization_name, u.email AS organization_email
        FROM initiatives AS i
        JOIN users AS u ON i.organization_id = u.id
        WHERE (?1 IS NULL OR i.category = ?1)
            AND (?2 IS NULL OR i.location LIKE ?2 ESCAPE '\')
            AND (?3 IS NULL OR i.status = ?3)
            AND (?4 IS NULL OR i.organization_id = ?4)
        ORDER BY i.start_date DESC, i.id DESC"#,
        )
        .bind(&query.category_eq)
        .bind(query.location_like.as_deref().map(like_pattern))
        .bind(query.status_eq)
        .bind(query.organization_id_eq)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(initiatives)
    }

    async fn query_with_application_stats(&mut self, organization_id: i64) -> Result<Vec<InitiativeWithApplicationStats>, Error> {
        let initiatives = query_as(
            "
        SELECT
            i.*,
            COUNT(DISTINCT CASE WHEN p.status = 'pending' THEN p.id END) AS pending_applications,
            COUNT(DISTINCT CASE WHEN p.status = 'approved' THEN p.id END) AS approved_volunteers
        FROM initiatives AS i
        LEFT JOIN participations AS p ON i.id = p.initiative_id
        WHERE i.organization_id = ?1
        GROUP BY i.id
        ORDER BY i.start_date DESC, i.id DESC",
        )
        .bind(organization_id)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(initiatives)
    }
}

impl<E> ParticipationCommon for SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    async fn insert(&mut self, data: ParticipationInsert) -> Result<i64, Error> {
        let (volunteer_id, initiative_id) = (data.volunteer_id, data.initiative_id);
        let id = query_scalar(
            "
        INSERT INTO participations (volunteer_id, initiative_id, status, applied_date, message)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id",
        )
        .bind(data.volunteer_id)
        .bind(data.initiative_id)
        .bind(data.status)
        .bind(data.applied_date)
        .bind(data.message)
        .fetch_one(&mut *self.executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref d) if d.is_unique_violation() => Error::Conflict(format!(
                "volunteer(id: {}) has already applied to initiative(id: {})",
                volunteer_id, initiative_id
            )),
            e => e.into(),
        })?;
        Ok(id)
    }

    async fn get(&mut self, id: i64) -> Result<Option<Participation>, Error> {
        let participation = query_as("SELECT * FROM participations WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *self.executor)
            .await?;
        Ok(participation)
    }

    async fn exists(&mut self, volunteer_id: i64, initiative_id: i64) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT * FROM participations WHERE volunteer_id = ?1 AND initiative_id = ?2)")
            .bind(volunteer_id)
            .bind(initiative_id)
            .fetch_one(&mut *self.executor)
            .await?;
        Ok(exists)
    }

    async fn update(&mut self, id: i64, data: ParticipationUpdate) -> Result<(), Error> {
        let res = query(
            "
        UPDATE participations
        SET status = ?1,
            hours_completed = COALESCE(?2, hours_completed),
            approved_date = COALESCE(?3, approved_date),
            feedback = COALESCE(?4, feedback)
        WHERE id = ?5",
        )
        .bind(data.status)
        .bind(data.hours_completed)
        .bind(data.approved_date)
        .bind(data.feedback)
        .bind(id)
        .execute(&mut *self.executor)
        .await?;
        if res.rows_affected() == 0 {
            return Err(Error::not_found("participation", id));
        }
        Ok(())
    }

    async fn query_by_volunteer(&mut self, volunteer_id: i64) -> Result<Vec<VolunteerParticipation>, Error> {
        let participations = query_as(
            "
        SELECT
            p.*,
            i.title AS initiative_title,
            i.category,
            i.location,
            i.start_date,
            i.end_date,
            u.name AS organization_name
        FROM participations AS p
        JOIN initiatives AS i ON p.initiative_id = i.id
        JOIN users AS u ON i.organization_id = u.id
        WHERE p.volunteer_id = ?1
        ORDER BY p.applied_date DESC, p.id DESC",
        )
        .bind(volunteer_id)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(participations)
    }

    async fn query_applications(&mut self, query: &ApplicationQuery) -> Result<Vec<Application>, Error> {
        let applications = query_as(
            "
        SELECT
            p.*,
            i.title AS initiative_title,
            v.name AS volunteer_name,
            v.email AS volunteer_email,
            v.phone AS volunteer_phone,
            v.age_category
        FROM participations AS p
        JOIN initiatives AS i ON p.initiative_id = i.id
        JOIN users AS v ON p.volunteer_id = v.id
        WHERE i.organization_id = ?1
            AND (?2 IS NULL OR p.status = ?2)
        ORDER BY p.applied_date DESC, p.id DESC",
        )
        .bind(query.organization_id_eq)
        .bind(query.status_eq)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(applications)
    }

    async fn snapshot(&mut self, id: i64) -> Result<Option<Snapshot>, Error> {
        let snapshot = query_as(
            "
        SELECT
            p.*,
            i.title AS initiative_title,
            i.description,
            i.start_date,
            i.end_date,
            i.category,
            v.name AS volunteer_name,
            o.id AS organization_id,
            o.name AS organization_name
        FROM participations AS p
        JOIN initiatives AS i ON p.initiative_id = i.id
        JOIN users AS v ON p.volunteer_id = v.id
        JOIN users AS o ON i.organization_id = o.id
        WHERE p.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.executor)
        .await?;
        Ok(snapshot)
    }
}

impl<E> CertificateCommon for SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    async fn insert(&mut self, data: CertificateInsert) -> Result<i64, Error> {
        let id = query_scalar(
            "
        INSERT INTO certificates (participation_id, volunteer_id, organization_id, issued_date, hours_completed, certificate_data)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id",
        )
        .bind(data.participation_id)
        .bind(data.volunteer_id)
        .bind(data.organization_id)
        .bind(data.issued_date)
        .bind(data.hours_completed)
        .bind(data.certificate_data)
        .fetch_one(&mut *self.executor)
        .await?;
        Ok(id)
    }

    async fn query_by_volunteer(&mut self, volunteer_id: i64) -> Result<Vec<CertificateWithContext>, Error> {
        let certificates = query_as(
            "
        SELECT c.*, i.title AS initiative_title, o.name AS organization_name
        FROM certificates AS c
        JOIN participations AS p ON c.participation_id = p.id
        JOIN initiatives AS i ON p.initiative_id = i.id
        JOIN users AS o ON c.organization_id = o.id
        WHERE c.volunteer_id = ?1
        ORDER BY c.issued_date DESC, c.id DESC",
        )
        .bind(volunteer_id)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(certificates)
    }
}

impl<E> StatisticsCommon for SqliteSqlx<E>
where
    E: DerefMut<Target = SqliteConnection>,
{
    async fn overview(&mut self) -> Result<Overview, Error> {
        let overview = query_as(
            "
        SELECT
            (SELECT COUNT(*) FROM users WHERE user_type = 'volunteer') AS volunteers,
            (SELECT COUNT(*) FROM users WHERE user_type = 'organization') AS organizations,
            (SELECT COUNT(*) FROM users WHERE user_type = 'coordinator') AS coordinators,
            (SELECT COUNT(*) FROM initiatives WHERE status = 'active') AS active_initiatives,
            (SELECT COUNT(*) FROM participations WHERE status = 'completed') AS completed_participations,
            (SELECT COALESCE(SUM(hours_completed), 0) FROM participations WHERE status = 'completed') AS total_hours",
        )
        .fetch_one(&mut *self.executor)
        .await?;
        Ok(overview)
    }

    async fn initiative_categories(&mut self) -> Result<Vec<CategoryCount>, Error> {
        let categories = query_as(
            "
        SELECT category, COUNT(*) AS count
        FROM initiatives
        GROUP BY category
        ORDER BY count DESC, category",
        )
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(categories)
    }

    async fn recent_initiatives(&mut self, limit: i64) -> Result<Vec<RecentInitiative>, Error> {
        let initiatives = query_as(
            "
        SELECT i.title, i.category, i.start_date, u.name AS organization
        FROM initiatives AS i
        JOIN users AS u ON i.organization_id = u.id
        ORDER BY i.created_at DESC, i.id DESC
        LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(initiatives)
    }

    // one subquery per figure, a certificates join would multiply participation rows
    async fn school_statistics(&mut self, school_id: i64) -> Result<SchoolStatistics, Error> {
        let stats = query_as(
            "
        SELECT
            (SELECT COUNT(*)
             FROM users
             WHERE school_id = ?1 AND user_type = 'volunteer') AS total_students,
            (SELECT COUNT(*)
             FROM participations AS p
             JOIN users AS u ON p.volunteer_id = u.id
             WHERE u.school_id = ?1 AND u.user_type = 'volunteer') AS total_participations,
            (SELECT COALESCE(SUM(p.hours_completed), 0)
             FROM participations AS p
             JOIN users AS u ON p.volunteer_id = u.id
             WHERE u.school_id = ?1 AND u.user_type = 'volunteer' AND p.status = 'completed') AS total_hours,
            (SELECT COUNT(*)
             FROM certificates AS c
             JOIN users AS u ON c.volunteer_id = u.id
             WHERE u.school_id = ?1 AND u.user_type = 'volunteer') AS total_certificates",
        )
        .bind(school_id)
        .fetch_one(&mut *self.executor)
        .await?;
        Ok(stats)
    }

    async fn school_categories(&mut self, school_id: i64, limit: i64) -> Result<Vec<CategoryCount>, Error> {
        let categories = query_as(
            "
        SELECT i.category, COUNT(*) AS count
        FROM participations AS p
        JOIN initiatives AS i ON p.initiative_id = i.id
        JOIN users AS u ON p.volunteer_id = u.id
        WHERE u.school_id = ?1 AND u.user_type = 'volunteer'
        GROUP BY i.category
        ORDER BY count DESC, i.category
        LIMIT ?2",
        )
        .bind(school_id)
        .bind(limit)
        .fetch_all(&mut *self.executor)
        .await?;
        Ok(categories)
    }
}

impl Common for SqliteSqlx<PoolConnection<Sqlite>> {}
impl Common for SqliteSqlx<Transaction<'static, Sqlite>> {}
impl Store for SqliteSqlx<PoolConnection<Sqlite>> {}
impl Store for SqliteSqlx<Transaction<'static, Sqlite>> {}

impl TxStore for SqliteSqlx<Transaction<'static, Sqlite>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

/// Hands out one storage handle per request; the handle goes back to the pool when dropped.
#[derive(Clone)]
pub struct SqliteSqlxManager {
    pool: SqlitePool,
}

impl SqliteSqlxManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<SqliteSqlx<Transaction<'static, Sqlite>>, Error> {
        let tx = self.pool.begin().await?;
        Ok(SqliteSqlx { executor: tx })
    }

    pub async fn acquire(&self) -> Result<SqliteSqlx<PoolConnection<Sqlite>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(SqliteSqlx { executor: conn })
    }
}

impl Manager<SqliteSqlx<PoolConnection<Sqlite>>, SqliteSqlx<Transaction<'static, Sqlite>>> for SqliteSqlxManager {
    async fn db(&self) -> Result<SqliteSqlx<PoolConnection<Sqlite>>, Error> {
        let d = self.acquire().await?;
        Ok(d)
    }

    async fn tx(&self) -> Result<SqliteSqlx<Transaction<'static, Sqlite>>, Error> {
        let t = self.begin().await?;
        Ok(t)
    }
}
