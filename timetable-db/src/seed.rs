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

//! Row-insert helpers for building fixtures against a live `Session` in integration tests.
//! Mirrors the teacher's `NewResource::insert` shape, not used by `timetable-meta`'s binary
//! itself (catalogs are populated by whatever application owns the database).

use crate::model::{Assignments, ClassGroups, Periods, Rooms, Subjects, Teachers, TimetableEntries};
use crate::{Session, SessionInsertStatement, SessionSelectStatement};
use sea_query::{Expr, ExprTrait, Query};
use sqlx::{Error, Row};
use timetable_dao::{Id, ScheduledEntry};

pub struct NewRoom {
    pub tenant: Id,
    pub name: String,
    pub kind: Option<String>,
    pub capacity: Option<i64>,
}
impl NewRoom {
    pub fn insert(&self, session: &Session) -> Result<Id, Error> {
        let row = session.block_on(
            Query::insert()
                .into_table(Rooms::Table)
                .columns([Rooms::TenantId, Rooms::Name, Rooms::Kind, Rooms::Capacity])
                .values_panic([Expr::val(self.tenant), Expr::val(&self.name), Expr::val(self.kind.clone()), Expr::val(self.capacity)])
                .returning_col(Rooms::Id)
                .fetch_one(session),
        )?;
        row.try_get::<i64, _>(0)
    }
}

pub struct NewPeriod {
    pub tenant: Id,
    pub name: String,
    pub start_minutes: i64,
    pub end_minutes: i64,
}
impl NewPeriod {
    pub fn insert(&self, session: &Session) -> Result<Id, Error> {
        let row = session.block_on(
            Query::insert()
                .into_table(Periods::Table)
                .columns([Periods::TenantId, Periods::Name, Periods::StartMinutes, Periods::EndMinutes])
                .values_panic([Expr::val(self.tenant), Expr::val(&self.name), Expr::val(self.start_minutes), Expr::val(self.end_minutes)])
                .returning_col(Periods::Id)
                .fetch_one(session),
        )?;
        row.try_get::<i64, _>(0)
    }
}

pub struct NewTeacher {
    pub tenant: Id,
    pub name: String,
    pub weekly_hours: i64,
    pub preferred_days: Option<String>,
    pub preferred_periods: Option<String>,
}
impl NewTeacher {
    pub fn insert(&self, session: &Session) -> Result<Id, Error> {
        let row = session.block_on(
            Query::insert()
                .into_table(Teachers::Table)
                .columns([Teachers::TenantId, Teachers::Name, Teachers::WeeklyHours, Teachers::PreferredDays, Teachers::PreferredPeriods])
                .values_panic([
                    Expr::val(self.tenant),
                    Expr::val(&self.name),
                    Expr::val(self.weekly_hours),
                    Expr::val(self.preferred_days.clone()),
                    Expr::val(self.preferred_periods.clone()),
                ])
                .returning_col(Teachers::Id)
                .fetch_one(session),
        )?;
        row.try_get::<i64, _>(0)
    }
}

pub struct NewClassGroup {
    pub tenant: Id,
    pub name: String,
    pub default_room: Option<Id>,
    pub allowed_periods: Option<String>,
}
impl NewClassGroup {
    pub fn insert(&self, session: &Session) -> Result<Id, Error> {
        let row = session.block_on(
            Query::insert()
                .into_table(ClassGroups::Table)
                .columns([ClassGroups::TenantId, ClassGroups::Name, ClassGroups::DefaultRoomId, ClassGroups::AllowedPeriods])
                .values_panic([
                    Expr::val(self.tenant),
                    Expr::val(&self.name),
                    Expr::val(self.default_room),
                    Expr::val(self.allowed_periods.clone()),
                ])
                .returning_col(ClassGroups::Id)
                .fetch_one(session),
        )?;
        row.try_get::<i64, _>(0)
    }
}

pub struct NewSubject {
    pub tenant: Id,
    pub name: String,
    pub default_hours_per_week: i64,
    pub default_room: Option<Id>,
}
impl NewSubject {
    pub fn insert(&self, session: &Session) -> Result<Id, Error> {
        let row = session.block_on(
            Query::insert()
                .into_table(Subjects::Table)
                .columns([Subjects::TenantId, Subjects::Name, Subjects::DefaultHoursPerWeek, Subjects::DefaultRoomId])
                .values_panic([Expr::val(self.tenant), Expr::val(&self.name), Expr::val(self.default_hours_per_week), Expr::val(self.default_room)])
                .returning_col(Subjects::Id)
                .fetch_one(session),
        )?;
        row.try_get::<i64, _>(0)
    }
}

/// Reads back a tenant's persisted timetable entries, for asserting on what
/// `DbScheduleWriter::replace_schedule` actually committed.
pub fn read_timetable_entries(session: &Session, tenant: Id) -> Result<Vec<ScheduledEntry>, Error> {
    let rows = session.block_on(
        Query::select()
            .columns([
                TimetableEntries::ClassGroupId,
                TimetableEntries::SubjectId,
                TimetableEntries::TeacherId,
                TimetableEntries::RoomId,
                TimetableEntries::PeriodId,
                TimetableEntries::Weekday,
                TimetableEntries::IsLocked,
                TimetableEntries::Notes,
            ])
            .from(TimetableEntries::Table)
            .and_where(Expr::col(TimetableEntries::TenantId).eq(tenant))
            .fetch_all(session),
    )?;

    Ok(rows
        .into_iter()
        .map(|row| ScheduledEntry {
            class_group_id: row.get(0),
            subject_id: row.get(1),
            teacher_id: row.get(2),
            room_id: row.get(3),
            period_id: row.get(4),
            weekday: row.get::<i64, _>(5) as u8,
            is_locked: row.get::<i64, _>(6) != 0,
            notes: row.get::<Option<String>, _>(7).map(Into::into),
        })
        .collect())
}

pub struct NewAssignment {
    pub tenant: Id,
    pub class_group_id: Id,
    pub subject_id: Id,
    pub teacher_id: Option<Id>,
    pub hours: i64,
    pub room_id: Option<Id>,
}
impl NewAssignment {
    pub fn insert(&self, session: &Session) -> Result<Id, Error> {
        let row = session.block_on(
            Query::insert()
                .into_table(Assignments::Table)
                .columns([
                    Assignments::TenantId,
                    Assignments::ClassGroupId,
                    Assignments::SubjectId,
                    Assignments::TeacherId,
                    Assignments::Hours,
                    Assignments::RoomId,
                ])
                .values_panic([
                    Expr::val(self.tenant),
                    Expr::val(self.class_group_id),
                    Expr::val(self.subject_id),
                    Expr::val(self.teacher_id),
                    Expr::val(self.hours),
                    Expr::val(self.room_id),
                ])
                .returning_col(Assignments::Id)
                .fetch_one(session),
        )?;
        row.try_get::<i64, _>(0)
    }
}
