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

use crate::model::ConstraintModel;
use timetable_dao::{ProblemInstance, ScheduledEntry};

/// Reads every `x[a,d,p]` set to true out of a satisfying assignment and materialises the
/// scheduled entries, stably sorted by `(weekday, period, group)` ascending.
pub fn extract_schedule(problem: &ProblemInstance, model: &ConstraintModel, assignment: &[bool]) -> Vec<ScheduledEntry> {
    let mut entries: Vec<ScheduledEntry> = model
        .variables
        .iter()
        .enumerate()
        .filter(|(var_id, _)| assignment[*var_id])
        .map(|(_, variable)| {
            let requirement = &problem.requirements[variable.requirement_index];
            ScheduledEntry {
                class_group_id: requirement.class_group_id,
                subject_id: requirement.subject_id,
                teacher_id: requirement.teacher_id,
                room_id: requirement.effective_room_id,
                period_id: variable.period_id,
                weekday: variable.day,
                is_locked: false,
                notes: None,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        (a.weekday, a.period_id, a.class_group_id).cmp(&(b.weekday, b.period_id, b.class_group_id))
    });

    entries
}
