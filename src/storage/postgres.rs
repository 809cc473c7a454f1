//! PostgreSQL store
//!
//! Both repositories on a shared `sqlx::PgPool`. The schema lives in
//! `migrations/0001_init.sql` and is applied by [`PgStore::migrate`].

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::errors::StorageResult;
use crate::api::LeaderboardRow;
use crate::auth::{User, UserRepository};
use crate::tracking::{DateRange, DayRepository, RegisteredDay};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    display_name: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            username: row.username,
            display_name: row.display_name,
            password_hash: row.password,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DayRow {
    registered_day_id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    level: i32,
    comment: Option<String>,
}

impl From<DayRow> for RegisteredDay {
    fn from(row: DayRow) -> Self {
        RegisteredDay {
            registered_day_id: row.registered_day_id,
            user_id: row.user_id,
            date: row.date,
            level: row.level,
            comment: row.comment,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    user_id: Uuid,
    display_name: String,
    drink_days: i64,
    total_days: i64,
    total_score: i64,
}

impl From<ParticipantRow> for LeaderboardRow {
    fn from(row: ParticipantRow) -> Self {
        LeaderboardRow {
            user_id: row.user_id,
            display_name: row.display_name,
            drink_days: row.drink_days,
            total_days: row.total_days,
            total_score: row.total_score,
        }
    }
}

impl PgStore {
    /// Open a pool against `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!(max_connections, "Connected to PostgreSQL");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn migrate(&self) -> StorageResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        info!("Database schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_id(&self, user_id: Uuid) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"select user_id, username, display_name, password from users where user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"select user_id, username, display_name, password from users where lower(username) = lower($1)"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, user: &User) -> StorageResult<()> {
        sqlx::query(
            r#"insert into users (user_id, username, display_name, password) values ($1, $2, $3, $4)"#,
        )
        .bind(user.user_id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl DayRepository for PgStore {
    async fn upsert_day(&self, day: &RegisteredDay) -> StorageResult<()> {
        sqlx::query(
            r#"
    insert into registered_days (registered_day_id, user_id, date, level, comment)
    values ($1, $2, $3, $4, $5)
    on conflict (user_id, date) do update set level = excluded.level, comment = excluded.comment
    "#,
        )
        .bind(day.registered_day_id)
        .bind(day.user_id)
        .bind(day.date)
        .bind(day.level)
        .bind(&day.comment)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn days_in_range(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> StorageResult<Vec<RegisteredDay>> {
        let rows = sqlx::query_as::<_, DayRow>(
            r#"
    select registered_day_id, user_id, date, level, comment
    from registered_days
    where user_id = $1 and date >= $2 and date < $3
    order by date
    "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RegisteredDay::from).collect())
    }

    async fn participants_in_range(&self, range: DateRange) -> StorageResult<Vec<LeaderboardRow>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
    select
        users.user_id,
        users.display_name,
        sum(case when registered_days.level >= 1 then 1 else 0 end)::bigint as drink_days,
        count(registered_days.registered_day_id)::bigint as total_days,
        coalesce(sum(registered_days.level), 0)::bigint as total_score
    from
        registered_days
        inner join
            users on users.user_id = registered_days.user_id
    where registered_days.date >= $1 and registered_days.date < $2
    group by users.user_id, users.display_name
    order by drink_days desc, users.display_name asc
    "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LeaderboardRow::from).collect())
    }
}
