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

use crate::model::{Assignments, ClassGroups, Periods, Rooms, Subjects, Teachers};
use crate::{Session, SessionSelectStatement};
use sea_query::{Expr, ExprTrait, Query};
use sqlx::Row;
use std::collections::BTreeSet;
use timetable_dao::{
    model::resolve_effective_room, Assignment, CatalogLoader, ClassGroup, Id, LoadError, Period, PreferenceSet,
    ProblemInstance, Room, RoomUnresolvedPolicy, Subject, Teacher,
};

/// Loads a tenant's catalog from a `sqlx`-backed `Session`, decoding the comma-separated
/// preference columns the way the loader contract (`timetable-dao::loader`) requires.
pub struct DbCatalogLoader {
    session: Session,
}

impl DbCatalogLoader {
    pub fn new(session: Session) -> Self {
        DbCatalogLoader { session }
    }
}

fn db_err(e: sqlx::Error) -> LoadError {
    LoadError::Database(e.to_string())
}

impl CatalogLoader for DbCatalogLoader {
    fn load(&mut self, tenant: Id, room_unresolved_policy: RoomUnresolvedPolicy) -> Result<ProblemInstance, LoadError> {
        let session = &self.session;
        let mut problem = ProblemInstance::new(tenant);

        let room_rows = session.block_on(
            Query::select()
                .columns([Rooms::Id, Rooms::Name, Rooms::Kind, Rooms::Capacity])
                .from(Rooms::Table)
                .and_where(Expr::col(Rooms::TenantId).eq(tenant))
                .fetch_all(session),
        )
        .map_err(db_err)?;
        let room_ids: BTreeSet<i64> = room_rows.iter().map(|r| r.get::<i64, _>(0)).collect();
        for row in &room_rows {
            let id: i64 = row.get(0);
            problem.rooms.insert(
                id,
                Room {
                    id,
                    name: row.get::<String, _>(1).into(),
                    kind: row.get::<Option<String>, _>(2).map(Into::into),
                    capacity: row.get::<Option<i64>, _>(3).map(|c| c as u32),
                },
            );
        }

        let period_rows = session.block_on(
            Query::select()
                .columns([Periods::Id, Periods::Name, Periods::StartMinutes, Periods::EndMinutes])
                .from(Periods::Table)
                .and_where(Expr::col(Periods::TenantId).eq(tenant))
                .fetch_all(session),
        )
        .map_err(db_err)?;
        let period_ids: BTreeSet<i64> = period_rows.iter().map(|r| r.get::<i64, _>(0)).collect();
        for row in &period_rows {
            let id: i64 = row.get(0);
            problem.periods.insert(
                id,
                Period::new(id, row.get::<String, _>(1), row.get::<i64, _>(2) as u32, row.get::<i64, _>(3) as u32),
            );
        }

        let teacher_rows = session.block_on(
            Query::select()
                .columns([Teachers::Id, Teachers::Name, Teachers::WeeklyHours, Teachers::PreferredDays, Teachers::PreferredPeriods])
                .from(Teachers::Table)
                .and_where(Expr::col(Teachers::TenantId).eq(tenant))
                .fetch_all(session),
        )
        .map_err(db_err)?;
        let days_universe: BTreeSet<i64> = (1..=5).collect();
        for row in &teacher_rows {
            let id: i64 = row.get(0);
            problem.teachers.insert(
                id,
                Teacher {
                    id,
                    name: row.get::<String, _>(1).into(),
                    weekly_hours: row.get::<i64, _>(2) as u32,
                    preferred_days: PreferenceSet::from_csv("preferred_days", row.get::<Option<String>, _>(3).as_deref(), &days_universe)?,
                    preferred_periods: PreferenceSet::from_csv(
                        "preferred_periods",
                        row.get::<Option<String>, _>(4).as_deref(),
                        &period_ids,
                    )?,
                },
            );
        }

        let group_rows = session.block_on(
            Query::select()
                .columns([ClassGroups::Id, ClassGroups::Name, ClassGroups::DefaultRoomId, ClassGroups::AllowedPeriods])
                .from(ClassGroups::Table)
                .and_where(Expr::col(ClassGroups::TenantId).eq(tenant))
                .fetch_all(session),
        )
        .map_err(db_err)?;
        for row in &group_rows {
            let id: i64 = row.get(0);
            let default_room: Option<i64> = row.get(2);
            if let Some(room_id) = default_room {
                if !room_ids.contains(&room_id) {
                    return Err(LoadError::DanglingForeignKey { tenant, kind: "room", id: room_id });
                }
            }
            problem.class_groups.insert(
                id,
                ClassGroup {
                    id,
                    name: row.get::<String, _>(1).into(),
                    default_room,
                    allowed_periods: PreferenceSet::from_csv(
                        "allowed_periods",
                        row.get::<Option<String>, _>(3).as_deref(),
                        &period_ids,
                    )?,
                },
            );
        }

        let subject_rows = session.block_on(
            Query::select()
                .columns([Subjects::Id, Subjects::Name, Subjects::DefaultHoursPerWeek, Subjects::DefaultRoomId])
                .from(Subjects::Table)
                .and_where(Expr::col(Subjects::TenantId).eq(tenant))
                .fetch_all(session),
        )
        .map_err(db_err)?;
        for row in &subject_rows {
            let id: i64 = row.get(0);
            problem.subjects.insert(
                id,
                Subject {
                    id,
                    name: row.get::<String, _>(1).into(),
                    default_hours_per_week: row.get::<i64, _>(2) as u32,
                    default_room: row.get(3),
                },
            );
        }

        let assignment_rows = session.block_on(
            Query::select()
                .columns([
                    Assignments::Id,
                    Assignments::ClassGroupId,
                    Assignments::SubjectId,
                    Assignments::TeacherId,
                    Assignments::Hours,
                    Assignments::RoomId,
                ])
                .from(Assignments::Table)
                .and_where(Expr::col(Assignments::TenantId).eq(tenant))
                .fetch_all(session),
        )
        .map_err(db_err)?;
        for row in &assignment_rows {
            let id: i64 = row.get(0);
            let class_group_id: i64 = row.get(1);
            if !problem.class_groups.contains_key(&class_group_id) {
                return Err(LoadError::DanglingForeignKey { tenant, kind: "class_group", id: class_group_id });
            }
            let subject_id: i64 = row.get(2);
            if !problem.subjects.contains_key(&subject_id) {
                return Err(LoadError::DanglingForeignKey { tenant, kind: "subject", id: subject_id });
            }
            let teacher_id: Option<i64> = row.get(3);
            if let Some(teacher_id) = teacher_id {
                if !problem.teachers.contains_key(&teacher_id) {
                    return Err(LoadError::DanglingForeignKey { tenant, kind: "teacher", id: teacher_id });
                }
            }
            let assignment_room: Option<i64> = row.get(5);
            if let Some(room_id) = assignment_room {
                if !room_ids.contains(&room_id) {
                    return Err(LoadError::DanglingForeignKey { tenant, kind: "room", id: room_id });
                }
            }
            let class_group_default_room = problem.class_group(class_group_id).and_then(|g| g.default_room);
            let effective_room_id = resolve_effective_room(assignment_room, class_group_default_room, room_unresolved_policy, id)?;

            problem.requirements.push(Assignment {
                id,
                class_group_id,
                subject_id,
                teacher_id,
                hours: row.get::<i64, _>(4) as u32,
                effective_room_id,
            });
        }

        Ok(problem)
    }
}
