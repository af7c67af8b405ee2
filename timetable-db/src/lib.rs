/*
 * Copyright (c) 2025 Clément GRENNERAT
 *
 * This program is free software: you can redistribute it and/or modify it under the terms of the
 * GNU General Public License as published by the Free Software Foundation, version 3.
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without
 * even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
 * See the GNU General Public License for more details.
 * You should have received a copy of the GNU General Public License along with this program.
 * If not, see https://www.gnu.org/licenses/.
 *
 */

pub mod loader;
pub mod model;
#[cfg(feature = "testing")]
pub mod seed;
pub mod writer;

pub use loader::DbCatalogLoader;
pub use writer::DbScheduleWriter;

use log::info;
use sea_query::{InsertStatement, PostgresQueryBuilder, QueryBuilder, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::{SqlxBinder, SqlxValues};
use sqlx::any::{install_default_drivers, AnyRow};
use sqlx::pool::PoolOptions;
use sqlx::{Any, AnyPool, Error};
use tokio::runtime::Runtime;

enum Backend {
    Postgres,
    Sqlite,
}

impl From<&str> for Backend {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Backend::Postgres,
            "sqlite" | "sqlite3" => Backend::Sqlite,
            _ => panic!("unsupported database backend {s}"),
        }
    }
}

impl Backend {
    fn build_insert(&self, query: &InsertStatement) -> (String, SqlxValues) {
        match self {
            Backend::Postgres => query.build_sqlx(PostgresQueryBuilder),
            Backend::Sqlite => query.build_sqlx(SqliteQueryBuilder),
        }
    }
    fn build_select(&self, query: &SelectStatement) -> (String, SqlxValues) {
        match self {
            Backend::Postgres => query.build_sqlx(PostgresQueryBuilder),
            Backend::Sqlite => query.build_sqlx(SqliteQueryBuilder),
        }
    }
}

/// Owns the connection pool and the single-threaded runtime used to bridge `sqlx`'s async API
/// into the solver's synchronous call chain. One solve owns one `Session` for its lifetime.
pub struct Session {
    pool: AnyPool,
    backend: Backend,
    runtime: Runtime,
}

impl Session {
    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn new(database_url: &str) -> Session {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();

        let (pool, backend) = runtime.block_on(async {
            install_default_drivers();

            let pool = PoolOptions::<Any>::new()
                .max_connections(1) // one connection: the runtime is single-threaded and solves never overlap within a process.
                .connect(database_url)
                .await
                .expect("failed to create connection pool");

            let conn = pool.acquire().await.expect("failed to acquire connection");
            let backend = conn.backend_name().into();
            conn.close().await.unwrap();
            (pool, backend)
        });

        Session { pool, backend, runtime }
    }

    pub fn create_schema(&self) {
        let sql = match self.backend {
            Backend::Postgres => include_str!("sql/up-postgres.sql"),
            Backend::Sqlite => include_str!("sql/up-sqlite.sql"),
        };
        self.runtime.block_on(async {
            for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
                sqlx::query(statement).execute(&self.pool).await.expect("failed to create schema");
            }
        });
    }
}

trait SessionInsertStatement {
    async fn fetch_one<'q>(&'q self, session: &Session) -> Result<AnyRow, Error>;
    async fn execute<'q>(&'q self, session: &Session) -> Result<u64, Error>;
}
impl SessionInsertStatement for InsertStatement {
    async fn fetch_one<'q>(&'q self, session: &Session) -> Result<AnyRow, Error> {
        let (sql, values) = session.backend.build_insert(self);
        sqlx::query_with(sql.as_str(), values).fetch_one(&session.pool).await
    }
    async fn execute<'q>(&'q self, session: &Session) -> Result<u64, Error> {
        let (sql, values) = session.backend.build_insert(self);
        info!("SQL: {}   VALUES: {:?}", sql, values);
        let result = sqlx::query_with(sql.as_str(), values).execute(&session.pool).await?;
        Ok(result.rows_affected())
    }
}

trait SessionSelectStatement {
    async fn fetch_all<'q>(&'q self, session: &Session) -> Result<Vec<AnyRow>, Error>;
}
impl SessionSelectStatement for SelectStatement {
    async fn fetch_all<'q>(&'q self, session: &Session) -> Result<Vec<AnyRow>, Error> {
        let (sql, values) = session.backend.build_select(self);
        info!("SQL: {}   VALUES: {:?}", sql, values);
        sqlx::query_with(sql.as_str(), values).fetch_all(&session.pool).await
    }
}
