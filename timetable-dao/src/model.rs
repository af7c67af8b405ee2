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

use crate::preference::PreferenceSet;
use crate::Id;

#[derive(Debug, Clone)]
pub struct Teacher {
    pub id: Id,
    pub name: Box<str>,
    pub weekly_hours: u32,
    pub preferred_days: PreferenceSet,
    pub preferred_periods: PreferenceSet,
}

#[derive(Debug, Clone)]
pub struct ClassGroup {
    pub id: Id,
    pub name: Box<str>,
    /// None if the class group has no default room.
    pub default_room: Option<Id>,
    pub allowed_periods: PreferenceSet,
}

#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Id,
    pub name: Box<str>,
    /// Template value only; `Assignment::hours` is authoritative.
    pub default_hours_per_week: u32,
    pub default_room: Option<Id>,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: Id,
    pub name: Box<str>,
    pub kind: Option<Box<str>>,
    pub capacity: Option<u32>,
}

/// Periods are identified by id, not by ordinal; the solver treats them as opaque labels.
#[derive(Debug, Clone)]
pub struct Period {
    pub id: Id,
    pub name: Box<str>,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

/// A stored directive that a (class-group, subject) pair needs `hours` lessons per week.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: Id,
    pub class_group_id: Id,
    pub subject_id: Id,
    pub teacher_id: Option<Id>,
    pub hours: u32,
    /// Already resolved: `assignment.room ?? class_group.default_room`.
    pub effective_room_id: Option<Id>,
}

/// The persisted record of a single scheduled lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEntry {
    pub class_group_id: Id,
    pub subject_id: Id,
    pub teacher_id: Option<Id>,
    pub room_id: Option<Id>,
    pub period_id: Id,
    pub weekday: u8,
    /// Always `false` for freshly solved entries; the solver never reads this back (open question, see DESIGN.md).
    pub is_locked: bool,
    pub notes: Option<Box<str>>,
}

impl Period {
    pub fn new(id: Id, name: impl Into<Box<str>>, start_minutes: u32, end_minutes: u32) -> Self {
        assert!(start_minutes < end_minutes, "period {} has start >= end", id);
        Period { id, name: name.into(), start_minutes, end_minutes }
    }
}

/// Computes the effective room for a requirement, applying `room_unresolved_policy`.
pub fn resolve_effective_room(
    assignment_room_id: Option<Id>,
    class_group_default_room: Option<Id>,
    policy: crate::loader::RoomUnresolvedPolicy,
    assignment_id: Id,
) -> Result<Option<Id>, crate::error::LoadError> {
    let effective = assignment_room_id.or(class_group_default_room);
    if effective.is_none() && policy == crate::loader::RoomUnresolvedPolicy::Reject {
        return Err(crate::error::LoadError::UnresolvedRoomRejected { assignment_id });
    }
    Ok(effective)
}
