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

use timetable_dao::{Assignment, Id, PreferenceSet, ProblemInstance};

pub const DAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// A single `(weekday, period)` cell a requirement may be placed into. `period_index` is the
/// period's position in the catalog's insertion order, used only for deterministic tie-breaking
/// since periods are otherwise identified by opaque id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub day: u8,
    pub period_index: usize,
    pub period_id: Id,
}

/// The admissible cells for one requirement, in deterministic (day, period_index) order.
#[derive(Debug, Clone)]
pub struct Domain {
    pub requirement_index: usize,
    pub cells: Vec<Cell>,
}

fn admissible_days(assignment: &Assignment, problem: &ProblemInstance) -> PreferenceSet {
    match assignment.teacher_id.and_then(|id| problem.teacher(id)) {
        Some(teacher) => teacher.preferred_days.clone(),
        None => PreferenceSet::universe(),
    }
}

fn admissible_periods(assignment: &Assignment, problem: &ProblemInstance) -> PreferenceSet {
    let group_allowed = problem
        .class_group(assignment.class_group_id)
        .map(|g| g.allowed_periods.clone())
        .unwrap_or_else(PreferenceSet::universe);

    let teacher_preferred = match assignment.teacher_id.and_then(|id| problem.teacher(id)) {
        Some(teacher) => teacher.preferred_periods.clone(),
        None => PreferenceSet::universe(),
    };

    teacher_preferred.intersect(&group_allowed)
}

/// Computes `Domain(a)` for every requirement, in requirement order.
pub fn build_domains(problem: &ProblemInstance) -> Vec<Domain> {
    problem
        .requirements
        .iter()
        .enumerate()
        .map(|(requirement_index, assignment)| {
            let days = admissible_days(assignment, problem);
            let periods = admissible_periods(assignment, problem);

            let mut cells = Vec::new();
            for day in DAYS {
                if !days.contains(day as i64) {
                    continue;
                }
                for (period_index, (period_id, _period)) in problem.periods.iter().enumerate() {
                    if periods.contains(*period_id) {
                        cells.push(Cell { day, period_index, period_id: *period_id });
                    }
                }
            }

            Domain { requirement_index, cells }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use timetable_dao::{ClassGroup, Period, Teacher};

    fn sample_problem() -> ProblemInstance {
        let mut problem = ProblemInstance::new(1);
        problem.teachers.insert(
            1,
            Teacher {
                id: 1,
                name: "Ada".into(),
                weekly_hours: 20,
                preferred_days: PreferenceSet::Only(BTreeSet::from([1, 2])),
                preferred_periods: PreferenceSet::universe(),
            },
        );
        problem.class_groups.insert(
            1,
            ClassGroup { id: 1, name: "G1".into(), default_room: None, allowed_periods: PreferenceSet::universe() },
        );
        for (id, name) in [(1, "P1"), (2, "P2"), (3, "P3")] {
            problem.periods.insert(id, Period::new(id, name, id as u32 * 60, id as u32 * 60 + 50));
        }
        problem.requirements.push(Assignment {
            id: 1,
            class_group_id: 1,
            subject_id: 1,
            teacher_id: Some(1),
            hours: 2,
            effective_room_id: None,
        });
        problem
    }

    #[test]
    fn restricts_to_teacher_preferred_days() {
        let problem = sample_problem();
        let domains = build_domains(&problem);
        let domain = &domains[0];
        assert!(domain.cells.iter().all(|c| c.day == 1 || c.day == 2));
        assert_eq!(domain.cells.len(), 2 * 3);
    }

    #[test]
    fn absent_teacher_means_universe_days() {
        let mut problem = sample_problem();
        problem.requirements[0].teacher_id = None;
        let domains = build_domains(&problem);
        assert_eq!(domains[0].cells.len(), DAYS.len() * 3);
    }
}
