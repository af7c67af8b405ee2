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

use crate::model::TimetableEntries;
use crate::{Backend, Session};
use sea_query::{Expr, ExprTrait, PostgresQueryBuilder, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use timetable_dao::{Id, ScheduleWriter, ScheduledEntry, WriteError};

/// Atomically replaces a tenant's timetable entries: `DELETE ... WHERE tenant_id = ?` followed
/// by a bulk `INSERT`, both inside one transaction. A Postgres backend additionally takes a
/// per-tenant advisory lock for the duration of the transaction (§4.6/§5: at most one
/// in-flight solve per tenant); SQLite's single-connection pool already serialises writers.
pub struct DbScheduleWriter {
    session: Session,
}

impl DbScheduleWriter {
    pub fn new(session: Session) -> Self {
        DbScheduleWriter { session }
    }
}

impl ScheduleWriter for DbScheduleWriter {
    fn replace_schedule(&mut self, tenant: Id, entries: Vec<ScheduledEntry>) -> Result<(), WriteError> {
        let session = &self.session;

        session.block_on(async {
            let mut tx = session.pool.begin().await.map_err(|e| WriteError::Database(e.to_string()))?;

            if matches!(session.backend, Backend::Postgres) {
                sqlx::query("SELECT pg_advisory_xact_lock($1)")
                    .bind(tenant)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| WriteError::Database(e.to_string()))?;
            }

            let delete = Query::delete().from_table(TimetableEntries::Table).and_where(Expr::col(TimetableEntries::TenantId).eq(tenant)).to_owned();
            let (sql, values) = match session.backend {
                Backend::Postgres => delete.build_sqlx(PostgresQueryBuilder),
                Backend::Sqlite => delete.build_sqlx(SqliteQueryBuilder),
            };
            sqlx::query_with(sql.as_str(), values).execute(&mut *tx).await.map_err(|e| WriteError::Database(e.to_string()))?;

            for entry in &entries {
                let mut insert = Query::insert();
                insert
                    .into_table(TimetableEntries::Table)
                    .columns([
                        TimetableEntries::TenantId,
                        TimetableEntries::ClassGroupId,
                        TimetableEntries::SubjectId,
                        TimetableEntries::TeacherId,
                        TimetableEntries::RoomId,
                        TimetableEntries::PeriodId,
                        TimetableEntries::Weekday,
                        TimetableEntries::IsLocked,
                        TimetableEntries::Notes,
                    ])
                    .values_panic([
                        Expr::val(tenant),
                        Expr::val(entry.class_group_id),
                        Expr::val(entry.subject_id),
                        Expr::val(entry.teacher_id),
                        Expr::val(entry.room_id),
                        Expr::val(entry.period_id),
                        Expr::val(entry.weekday as i64),
                        Expr::val(entry.is_locked),
                        Expr::val(entry.notes.as_ref().map(|s| s.to_string())),
                    ]);

                let (sql, values) = match session.backend {
                    Backend::Postgres => insert.build_sqlx(PostgresQueryBuilder),
                    Backend::Sqlite => insert.build_sqlx(SqliteQueryBuilder),
                };
                sqlx::query_with(sql.as_str(), values).execute(&mut *tx).await.map_err(|e| WriteError::Database(e.to_string()))?;
            }

            tx.commit().await.map_err(|e| WriteError::Database(e.to_string()))?;
            Ok(())
        })
    }
}
