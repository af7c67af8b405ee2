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

use crate::Id;
use thiserror::Error;

/// Raised while building a `ProblemInstance` from a catalog, before the solver ever runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("tenant {tenant}: {kind} {id} referenced but not found")]
    DanglingForeignKey { tenant: Id, kind: &'static str, id: Id },

    #[error("field {field}: malformed preference token {token:?}")]
    MalformedPreferenceList { field: Box<str>, token: Box<str> },

    #[error("assignment {assignment_id}: no room could be resolved and the policy rejects this")]
    UnresolvedRoomRejected { assignment_id: Id },

    #[error("database error: {0}")]
    Database(String),
}

/// Raised while persisting a solved schedule.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("database error: {0}")]
    Database(String),
}
