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

//! In-memory `CatalogLoader`/`ScheduleWriter` fixtures, used by `timetable-core`'s and
//! `timetable-meta`'s test suites so they don't need a real database.

use crate::error::{LoadError, WriteError};
use crate::loader::{CatalogLoader, RoomUnresolvedPolicy, ScheduleWriter};
use crate::model::ScheduledEntry;
use crate::problem::ProblemInstance;
use crate::Id;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct FixtureLoader {
    instances: HashMap<Id, ProblemInstance>,
}

impl FixtureLoader {
    pub fn new() -> Self {
        FixtureLoader { instances: HashMap::new() }
    }

    pub fn with_instance(mut self, instance: ProblemInstance) -> Self {
        self.instances.insert(instance.tenant, instance);
        self
    }
}

impl CatalogLoader for FixtureLoader {
    fn load(&mut self, tenant: Id, _room_unresolved_policy: RoomUnresolvedPolicy) -> Result<ProblemInstance, LoadError> {
        self.instances
            .get(&tenant)
            .cloned()
            .ok_or(LoadError::DanglingForeignKey { tenant, kind: "tenant", id: tenant })
    }
}

/// Records every write it receives; `fail_next` lets a test exercise the write-failure path
/// without touching a real database.
#[derive(Debug, Default)]
pub struct FixtureWriter {
    pub written: HashMap<Id, Vec<ScheduledEntry>>,
    pub fail_next: bool,
}

impl FixtureWriter {
    pub fn new() -> Self {
        FixtureWriter { written: HashMap::new(), fail_next: false }
    }

    pub fn failing() -> Self {
        FixtureWriter { written: HashMap::new(), fail_next: true }
    }
}

impl ScheduleWriter for FixtureWriter {
    fn replace_schedule(&mut self, tenant: Id, entries: Vec<ScheduledEntry>) -> Result<(), WriteError> {
        if self.fail_next {
            return Err(WriteError::Database("simulated write failure".into()));
        }
        self.written.insert(tenant, entries);
        Ok(())
    }
}
