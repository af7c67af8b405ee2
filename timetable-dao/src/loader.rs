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

use crate::error::{LoadError, WriteError};
use crate::model::ScheduledEntry;
use crate::problem::ProblemInstance;
use crate::Id;

/// What to do when an assignment resolves to no room at all (neither its own room nor its
/// class group's default room is set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomUnresolvedPolicy {
    /// The requirement is scheduled without a room constraint.
    Ignore,
    /// Loading fails with `LoadError::UnresolvedRoomRejected`.
    Reject,
}

impl Default for RoomUnresolvedPolicy {
    fn default() -> Self {
        RoomUnresolvedPolicy::Ignore
    }
}

/// Reads a tenant's catalog (teachers, class groups, subjects, rooms, periods and weekly
/// requirements) into an in-memory `ProblemInstance`. Implemented against a real database
/// by `timetable-db`, and against fixtures under the `testing` feature.
pub trait CatalogLoader {
    fn load(&mut self, tenant: Id, room_unresolved_policy: RoomUnresolvedPolicy) -> Result<ProblemInstance, LoadError>;
}

/// Persists a solved schedule for a tenant, replacing whatever was stored before.
pub trait ScheduleWriter {
    fn replace_schedule(&mut self, tenant: Id, entries: Vec<ScheduledEntry>) -> Result<(), WriteError>;
}
