//! Store lifecycle, schema and row CRUD

use crate::app::models::{ProfileRow, ProfileUpdate};
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

/// Table schema; CHECK constraints back up model-level validation so a
/// bad row can never land even through a partial update
const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    float_id     TEXT    NOT NULL,
    latitude     REAL    NOT NULL CHECK (latitude BETWEEN -90.0 AND 90.0),
    longitude    REAL    NOT NULL CHECK (longitude BETWEEN -180.0 AND 180.0),
    depth        REAL    NOT NULL CHECK (depth >= 0.0),
    pressure     REAL,
    temperature  REAL    NOT NULL,
    salinity     REAL    NOT NULL,
    month        INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year         INTEGER NOT NULL,
    date         TEXT,
    cycle_number INTEGER NOT NULL DEFAULT 0,
    level_number INTEGER NOT NULL DEFAULT 0,
    metadata     TEXT
)
"#;

const CREATE_INDEXES: [&str; 5] = [
    "CREATE INDEX IF NOT EXISTS idx_profiles_latitude ON profiles (latitude)",
    "CREATE INDEX IF NOT EXISTS idx_profiles_longitude ON profiles (longitude)",
    "CREATE INDEX IF NOT EXISTS idx_profiles_month ON profiles (month)",
    "CREATE INDEX IF NOT EXISTS idx_profiles_year ON profiles (year)",
    "CREATE INDEX IF NOT EXISTS idx_profiles_float_id ON profiles (float_id)",
];

const INSERT_ROW: &str = r#"
INSERT INTO profiles
    (float_id, latitude, longitude, depth, pressure, temperature, salinity,
     month, year, date, cycle_number, level_number, metadata)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Handle to the profile database
#[derive(Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    /// Open (creating if needed) a store backed by a database file
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = ProfileStore { pool };
        store.init().await?;
        info!(path = %path.display(), "Opened profile store");
        Ok(store)
    }

    /// Open an in-memory store; used by tests and dry runs
    pub async fn open_in_memory() -> Result<Self> {
        // One connection, or each pool checkout would see its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = ProfileStore { pool };
        store.init().await?;
        Ok(store)
    }

    /// Create the schema when absent
    async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        for statement in CREATE_INDEXES {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Pool accessor for the query module
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert one row, returning its assigned id
    pub async fn insert_row(&self, row: &ProfileRow) -> Result<i64> {
        row.validate()?;
        let result = bind_row(sqlx::query(INSERT_ROW), row)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Insert a batch of rows in one transaction
    ///
    /// Either every row lands or none does: any failure rolls the whole
    /// batch back.
    pub async fn insert_rows(&self, rows: &[ProfileRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut tx = self.pool.begin().await?;
        for row in rows {
            row.validate()?;
            bind_row(sqlx::query(INSERT_ROW), row)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        debug!(rows = rows.len(), "Committed row batch");
        Ok(rows.len())
    }

    /// Fetch one row by id
    pub async fn get_row(&self, id: i64) -> Result<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Overwrite the provided fields of an existing row
    ///
    /// Absent fields keep their stored value. Returns the updated row, or
    /// `None` when no row has this id.
    pub async fn update_row(&self, id: i64, update: &ProfileUpdate) -> Result<Option<ProfileRow>> {
        if update.is_empty() {
            return self.get_row(id).await;
        }

        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                float_id     = COALESCE(?, float_id),
                latitude     = COALESCE(?, latitude),
                longitude    = COALESCE(?, longitude),
                depth        = COALESCE(?, depth),
                pressure     = COALESCE(?, pressure),
                temperature  = COALESCE(?, temperature),
                salinity     = COALESCE(?, salinity),
                month        = COALESCE(?, month),
                year         = COALESCE(?, year),
                date         = COALESCE(?, date),
                cycle_number = COALESCE(?, cycle_number)
            WHERE id = ?
            "#,
        )
        .bind(&update.float_id)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.depth)
        .bind(update.pressure)
        .bind(update.temperature)
        .bind(update.salinity)
        .bind(update.month)
        .bind(update.year)
        .bind(update.date)
        .bind(update.cycle_number)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_row(id).await
    }

    /// Delete one row by id, reporting whether it existed
    pub async fn delete_row(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total row count
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Fetch up to `cap` rows in id order; used for whole-table scans
    pub async fn fetch_all(&self, cap: i64) -> Result<Vec<ProfileRow>> {
        let rows = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles ORDER BY id LIMIT ?")
            .bind(cap)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

type SqliteQuery<'q> =
    sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

fn bind_row<'q>(query: SqliteQuery<'q>, row: &'q ProfileRow) -> SqliteQuery<'q> {
    query
        .bind(&row.float_id)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.depth)
        .bind(row.pressure)
        .bind(row.temperature)
        .bind(row.salinity)
        .bind(row.month)
        .bind(row.year)
        .bind(row.date)
        .bind(row.cycle_number)
        .bind(row.level_number)
        .bind(&row.metadata)
}
