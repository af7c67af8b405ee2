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

use crate::domain::build_domains;
use crate::extract::extract_schedule;
use crate::model::build_constraint_model;
use crate::model::configuration::Configuration;
use crate::scheduler::{search, SearchOutcome};
use log::info;
use std::time::{Duration, Instant};
use timetable_dao::{Id, ProblemInstance, ScheduledEntry};

/// The solver's final verdict for a tenant's catalog. `Unsat` and `Timeout` are kept as
/// distinct variants even though they are reported identically to end users (open question,
/// see DESIGN.md) — nothing about the solve itself loses information.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Sat(Vec<ScheduledEntry>),
    DomainTooSmall(Id),
    Unsat,
    Timeout(u64),
}

/// Runs the full Domain Builder → Constraint Model → Search Engine → Schedule Extractor
/// pipeline over an already-loaded problem instance.
pub fn solve(problem: &ProblemInstance, config: &Configuration) -> SolveOutcome {
    let domains = build_domains(problem);

    if config.fail_fast_on_domain {
        for domain in &domains {
            let requirement = &problem.requirements[domain.requirement_index];
            if domain.cells.len() < requirement.hours as usize {
                info!("requirement {} domain too small ({} < {})", requirement.id, domain.cells.len(), requirement.hours);
                return SolveOutcome::DomainTooSmall(requirement.id);
            }
        }
    }

    let model = build_constraint_model(problem, &domains);
    info!(
        "built constraint model: {} variables, {} constraints",
        model.variables.len(),
        model.constraints.len()
    );

    let deadline = Instant::now() + Duration::from_secs(config.time_budget_seconds);
    match search(&model, deadline) {
        SearchOutcome::Sat(assignment) => {
            let entries = extract_schedule(problem, &model, &assignment);
            info!("solve succeeded with {} entries", entries.len());
            SolveOutcome::Sat(entries)
        }
        SearchOutcome::Unsat => {
            info!("solve is unsatisfiable");
            SolveOutcome::Unsat
        }
        SearchOutcome::Timeout => {
            info!("solve exceeded the time budget");
            SolveOutcome::Timeout(config.time_budget_seconds * 1000)
        }
    }
}

/// True for the two outcomes that mean "no feasible schedule could be produced", collapsing
/// `Unsat`/`Timeout` the way a future product-facing surface would (open question #2).
pub fn is_infeasible(outcome: &SolveOutcome) -> bool {
    matches!(outcome, SolveOutcome::Unsat | SolveOutcome::Timeout(_) | SolveOutcome::DomainTooSmall(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use timetable_dao::{Assignment, ClassGroup, Period, PreferenceSet, Room, Teacher};

    fn base_problem() -> ProblemInstance {
        let mut problem = ProblemInstance::new(1);
        for p in 1..=5i64 {
            problem.periods.insert(p, Period::new(p, format!("P{p}"), (p as u32) * 60, (p as u32) * 60 + 50));
        }
        problem.rooms.insert(1, Room { id: 1, name: "R1".into(), kind: None, capacity: None });
        problem
    }

    fn add_teacher(problem: &mut ProblemInstance, id: Id, weekly_hours: u32) {
        problem.teachers.insert(
            id,
            Teacher {
                id,
                name: format!("T{id}").into(),
                weekly_hours,
                preferred_days: PreferenceSet::universe(),
                preferred_periods: PreferenceSet::universe(),
            },
        );
    }

    fn add_group(problem: &mut ProblemInstance, id: Id) {
        problem.class_groups.insert(
            id,
            ClassGroup { id, name: format!("G{id}").into(), default_room: None, allowed_periods: PreferenceSet::universe() },
        );
    }

    // Scenario A: trivial feasible.
    #[test]
    fn scenario_a_trivial_feasible() {
        let mut problem = base_problem();
        add_teacher(&mut problem, 1, 20);
        add_group(&mut problem, 1);
        problem.requirements.push(Assignment {
            id: 1,
            class_group_id: 1,
            subject_id: 1,
            teacher_id: Some(1),
            hours: 5,
            effective_room_id: Some(1),
        });

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::Sat(entries) => {
                assert_eq!(entries.len(), 5);
                let days: BTreeSet<u8> = entries.iter().map(|e| e.weekday).collect();
                assert_eq!(days.len(), 5);
            }
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    // Scenario B: domain too small.
    #[test]
    fn scenario_b_domain_too_small() {
        let mut problem = base_problem();
        add_teacher(&mut problem, 1, 20);
        problem.teachers.get_mut(&1).unwrap().preferred_days = PreferenceSet::Only(BTreeSet::from([1]));
        problem.teachers.get_mut(&1).unwrap().preferred_periods = PreferenceSet::Only(BTreeSet::from([1]));
        add_group(&mut problem, 1);
        problem.requirements.push(Assignment {
            id: 1,
            class_group_id: 1,
            subject_id: 1,
            teacher_id: Some(1),
            hours: 2,
            effective_room_id: None,
        });

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::DomainTooSmall(req_id) => assert_eq!(req_id, 1),
            other => panic!("expected DomainTooSmall, got {other:?}"),
        }
    }

    // Scenario C: teacher collision, Unsat.
    #[test]
    fn scenario_c_teacher_collision_is_unsat() {
        let mut problem = base_problem();
        problem.periods.clear();
        problem.periods.insert(1, Period::new(1, "P1", 0, 50));
        add_teacher(&mut problem, 1, 20);
        add_group(&mut problem, 1);
        add_group(&mut problem, 2);
        for group_id in [1, 2] {
            problem.requirements.push(Assignment {
                id: group_id,
                class_group_id: group_id,
                subject_id: 1,
                teacher_id: Some(1),
                hours: 5,
                effective_room_id: None,
            });
        }

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::Unsat => {}
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    // Property 3: class-group exclusion. Two requirements for the same class group (different
    // teachers/subjects) competing for the same single period can only ever place one lesson
    // per slot, so five hours apiece on a five-slot week is unsatisfiable.
    #[test]
    fn scenario_class_group_collision_is_unsat() {
        let mut problem = base_problem();
        problem.periods.clear();
        problem.periods.insert(1, Period::new(1, "P1", 0, 50));
        add_teacher(&mut problem, 1, 20);
        add_teacher(&mut problem, 2, 20);
        add_group(&mut problem, 1);
        for (idx, (teacher_id, subject_id)) in [(1, 1), (2, 2)].into_iter().enumerate() {
            problem.requirements.push(Assignment {
                id: (idx + 1) as Id,
                class_group_id: 1,
                subject_id,
                teacher_id: Some(teacher_id),
                hours: 5,
                effective_room_id: None,
            });
        }

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::Unsat => {}
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    // Property 5: room exclusion. Two requirements for different class groups and teachers, but
    // competing for the same room, can only place one lesson per slot in that room.
    #[test]
    fn scenario_room_collision_is_unsat() {
        let mut problem = base_problem();
        problem.periods.clear();
        problem.periods.insert(1, Period::new(1, "P1", 0, 50));
        add_teacher(&mut problem, 1, 20);
        add_teacher(&mut problem, 2, 20);
        add_group(&mut problem, 1);
        add_group(&mut problem, 2);
        for (idx, (teacher_id, group_id)) in [(1, 1), (2, 2)].into_iter().enumerate() {
            problem.requirements.push(Assignment {
                id: (idx + 1) as Id,
                class_group_id: group_id,
                subject_id: 1,
                teacher_id: Some(teacher_id),
                hours: 5,
                effective_room_id: Some(1),
            });
        }

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::Unsat => {}
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    // Scenario D: room sharing via null stays unconstrained.
    #[test]
    fn scenario_d_null_room_requirements_share_slots_freely() {
        let mut problem = base_problem();
        add_teacher(&mut problem, 1, 20);
        add_teacher(&mut problem, 2, 20);
        add_teacher(&mut problem, 3, 20);
        add_group(&mut problem, 1);
        add_group(&mut problem, 2);
        add_group(&mut problem, 3);
        for (idx, (teacher_id, group_id)) in [(1, 1), (2, 2), (3, 3)].into_iter().enumerate() {
            problem.requirements.push(Assignment {
                id: (idx + 1) as Id,
                class_group_id: group_id,
                subject_id: 1,
                teacher_id: Some(teacher_id),
                hours: 1,
                effective_room_id: None,
            });
        }

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::Sat(entries) => {
                assert!(entries.iter().all(|e| e.room_id.is_none()));
            }
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    // Scenario E: distinct-days enforcement makes repeated same-day lessons unsat.
    #[test]
    fn scenario_e_distinct_days_enforcement() {
        let mut problem = base_problem();
        add_teacher(&mut problem, 1, 20);
        problem.teachers.get_mut(&1).unwrap().preferred_days = PreferenceSet::Only(BTreeSet::from([1]));
        add_group(&mut problem, 1);
        problem.requirements.push(Assignment {
            id: 1,
            class_group_id: 1,
            subject_id: 1,
            teacher_id: Some(1),
            hours: 3,
            effective_room_id: None,
        });

        match solve(&problem, &Configuration::default()) {
            SolveOutcome::Unsat => {}
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    // Property 8: determinism across repeated runs on byte-identical inputs.
    #[test]
    fn determinism_across_repeated_runs() {
        let mut problem = base_problem();
        add_teacher(&mut problem, 1, 20);
        add_group(&mut problem, 1);
        problem.requirements.push(Assignment {
            id: 1,
            class_group_id: 1,
            subject_id: 1,
            teacher_id: Some(1),
            hours: 5,
            effective_room_id: Some(1),
        });

        let first = solve(&problem, &Configuration::default());
        let second = solve(&problem, &Configuration::default());
        match (first, second) {
            (SolveOutcome::Sat(a), SolveOutcome::Sat(b)) => assert_eq!(a, b),
            _ => panic!("expected both runs to be Sat"),
        }
    }
}
