use sqlx::{query, SqlitePool};

use crate::error::Error;

const STATEMENTS: [&str; 8] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT,
        user_type TEXT NOT NULL CHECK (user_type IN ('volunteer', 'organization', 'coordinator')),
        age_category TEXT CHECK (age_category IS NULL OR age_category IN ('minor', 'adult')),
        school_id INTEGER,
        organization_type TEXT,
        address TEXT,
        description TEXT,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS initiatives (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        location TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        hours_required INTEGER NOT NULL CHECK (hours_required >= 0),
        spots_available INTEGER NOT NULL CHECK (spots_available >= 0),
        requirements TEXT,
        organization_id INTEGER NOT NULL REFERENCES users (id),
        status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'completed', 'cancelled')),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS participations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        volunteer_id INTEGER NOT NULL REFERENCES users (id),
        initiative_id INTEGER NOT NULL REFERENCES initiatives (id),
        status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected', 'completed')),
        applied_date TIMESTAMP NOT NULL,
        approved_date TIMESTAMP,
        hours_completed INTEGER NOT NULL DEFAULT 0 CHECK (hours_completed >= 0),
        message TEXT,
        feedback TEXT,
        UNIQUE (volunteer_id, initiative_id)
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS certificates (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        participation_id INTEGER NOT NULL REFERENCES participations (id),
        volunteer_id INTEGER NOT NULL REFERENCES users (id),
        organization_id INTEGER NOT NULL REFERENCES users (id),
        issued_date TIMESTAMP NOT NULL,
        hours_completed INTEGER NOT NULL,
        certificate_data TEXT
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_initiatives_organization ON initiatives (organization_id)",
    "CREATE INDEX IF NOT EXISTS idx_participations_initiative ON participations (initiative_id)",
    "CREATE INDEX IF NOT EXISTS idx_certificates_volunteer ON certificates (volunteer_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_school ON users (school_id)",
];

/// Creates the tables and indexes that don't exist yet.
pub async fn init(pool: &SqlitePool) -> Result<(), Error> {
    let mut tx = pool.begin().await?;
    for stmt in STATEMENTS {
        query(stmt).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}
