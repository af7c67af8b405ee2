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

use super::*;
use crate::domain::build_domains;
use crate::model::build_constraint_model;
use std::time::Duration;
use timetable_dao::{Assignment, ClassGroup, Period, PreferenceSet, ProblemInstance, Teacher};

fn five_day_one_teacher_problem(hours: u32, periods: u32) -> ProblemInstance {
    let mut problem = ProblemInstance::new(1);
    problem.teachers.insert(
        1,
        Teacher {
            id: 1,
            name: "Ada".into(),
            weekly_hours: 40,
            preferred_days: PreferenceSet::universe(),
            preferred_periods: PreferenceSet::universe(),
        },
    );
    problem.class_groups.insert(
        1,
        ClassGroup { id: 1, name: "G1".into(), default_room: None, allowed_periods: PreferenceSet::universe() },
    );
    for p in 1..=periods as i64 {
        problem.periods.insert(p, Period::new(p, format!("P{p}"), (p as u32) * 60, (p as u32) * 60 + 50));
    }
    problem.requirements.push(Assignment {
        id: 1,
        class_group_id: 1,
        subject_id: 1,
        teacher_id: Some(1),
        hours,
        effective_room_id: None,
    });
    problem
}

fn run(problem: &ProblemInstance) -> SearchOutcome {
    let domains = build_domains(problem);
    let model = build_constraint_model(problem, &domains);
    search(&model, Instant::now() + Duration::from_secs(5))
}

#[test]
fn trivial_feasible_produces_a_solution() {
    let problem = five_day_one_teacher_problem(5, 5);
    match run(&problem) {
        SearchOutcome::Sat(assignment) => {
            assert_eq!(assignment.iter().filter(|&&v| v).count(), 5);
        }
        other => panic!("expected Sat, got {other:?}"),
    }
}

#[test]
fn one_lesson_per_day_forces_unsat_when_days_are_too_few() {
    // hours=3 but only one admissible day (via a single-day preference) makes constraint 2
    // (one lesson per day) unsatisfiable regardless of how many periods exist.
    let mut problem = five_day_one_teacher_problem(3, 5);
    problem.teachers.get_mut(&1).unwrap().preferred_days =
        PreferenceSet::Only(std::collections::BTreeSet::from([1]));
    match run(&problem) {
        SearchOutcome::Unsat => {}
        other => panic!("expected Unsat, got {other:?}"),
    }
}

#[test]
fn teacher_collision_is_unsat_when_capacity_is_insufficient() {
    let mut problem = five_day_one_teacher_problem(5, 1);
    problem.class_groups.insert(
        2,
        ClassGroup { id: 2, name: "G2".into(), default_room: None, allowed_periods: PreferenceSet::universe() },
    );
    problem.requirements.push(Assignment {
        id: 2,
        class_group_id: 2,
        subject_id: 1,
        teacher_id: Some(1),
        hours: 5,
        effective_room_id: None,
    });
    match run(&problem) {
        SearchOutcome::Unsat => {}
        other => panic!("expected Unsat, got {other:?}"),
    }
}

#[test]
fn search_respects_the_deadline() {
    let problem = five_day_one_teacher_problem(5, 5);
    let domains = build_domains(&problem);
    let model = build_constraint_model(&problem, &domains);
    let outcome = search(&model, Instant::now() - Duration::from_secs(1));
    assert!(matches!(outcome, SearchOutcome::Timeout));
}
