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

use sea_query::Iden;

#[derive(Iden)]
pub enum Teachers {
    #[iden = "teachers"]
    Table,
    #[iden = "teacher_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "name"]
    Name,
    #[iden = "weekly_hours"]
    WeeklyHours,
    #[iden = "preferred_days"]
    PreferredDays,
    #[iden = "preferred_periods"]
    PreferredPeriods,
}

#[derive(Iden)]
pub enum ClassGroups {
    #[iden = "class_groups"]
    Table,
    #[iden = "class_group_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "name"]
    Name,
    #[iden = "default_room_id"]
    DefaultRoomId,
    #[iden = "allowed_periods"]
    AllowedPeriods,
}

#[derive(Iden)]
pub enum Subjects {
    #[iden = "subjects"]
    Table,
    #[iden = "subject_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "name"]
    Name,
    #[iden = "default_hours_per_week"]
    DefaultHoursPerWeek,
    #[iden = "default_room_id"]
    DefaultRoomId,
}

#[derive(Iden)]
pub enum Rooms {
    #[iden = "rooms"]
    Table,
    #[iden = "room_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "name"]
    Name,
    #[iden = "kind"]
    Kind,
    #[iden = "capacity"]
    Capacity,
}

#[derive(Iden)]
pub enum Periods {
    #[iden = "periods"]
    Table,
    #[iden = "period_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "name"]
    Name,
    #[iden = "start_minutes"]
    StartMinutes,
    #[iden = "end_minutes"]
    EndMinutes,
}

#[derive(Iden)]
pub enum Assignments {
    #[iden = "assignments"]
    Table,
    #[iden = "assignment_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "class_group_id"]
    ClassGroupId,
    #[iden = "subject_id"]
    SubjectId,
    #[iden = "teacher_id"]
    TeacherId,
    #[iden = "hours"]
    Hours,
    #[iden = "room_id"]
    RoomId,
}

#[derive(Iden)]
pub enum TimetableEntries {
    #[iden = "timetable_entries"]
    Table,
    #[iden = "timetable_entry_id"]
    Id,
    #[iden = "tenant_id"]
    TenantId,
    #[iden = "class_group_id"]
    ClassGroupId,
    #[iden = "subject_id"]
    SubjectId,
    #[iden = "teacher_id"]
    TeacherId,
    #[iden = "room_id"]
    RoomId,
    #[iden = "period_id"]
    PeriodId,
    #[iden = "weekday"]
    Weekday,
    #[iden = "is_locked"]
    IsLocked,
    #[iden = "notes"]
    Notes,
}
