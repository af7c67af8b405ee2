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

use crate::model::{Assignment, ClassGroup, Period, Room, Subject, Teacher};
use crate::Id;
use indexmap::IndexMap;

/// A tenant's catalog plus the set of weekly requirements the solver must place, loaded in
/// full before a solve attempt starts. Insertion order is preserved so branching and output
/// are deterministic for a given catalog snapshot.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub tenant: Id,
    pub teachers: IndexMap<Id, Teacher>,
    pub class_groups: IndexMap<Id, ClassGroup>,
    pub subjects: IndexMap<Id, Subject>,
    pub rooms: IndexMap<Id, Room>,
    pub periods: IndexMap<Id, Period>,
    pub requirements: Vec<Assignment>,
}

impl ProblemInstance {
    pub fn new(tenant: Id) -> Self {
        ProblemInstance {
            tenant,
            teachers: IndexMap::new(),
            class_groups: IndexMap::new(),
            subjects: IndexMap::new(),
            rooms: IndexMap::new(),
            periods: IndexMap::new(),
            requirements: Vec::new(),
        }
    }

    pub fn teacher(&self, id: Id) -> Option<&Teacher> {
        self.teachers.get(&id)
    }

    pub fn class_group(&self, id: Id) -> Option<&ClassGroup> {
        self.class_groups.get(&id)
    }

    pub fn subject(&self, id: Id) -> Option<&Subject> {
        self.subjects.get(&id)
    }

    pub fn room(&self, id: Id) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn period(&self, id: Id) -> Option<&Period> {
        self.periods.get(&id)
    }

    /// Total weekly lesson-hours demanded across every requirement.
    pub fn total_hours(&self) -> u32 {
        self.requirements.iter().map(|a| a.hours).sum()
    }
}
