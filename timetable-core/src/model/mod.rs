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

pub mod configuration;

use crate::domain::Domain;
use indexmap::IndexMap;
use timetable_dao::{Id, ProblemInstance};

pub type VarId = usize;
pub type ConstraintId = usize;

/// One decision variable `x[a,d,p]`: "requirement `a` is scheduled at weekday `d`, period `p`".
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub requirement_index: usize,
    pub day: u8,
    pub period_index: usize,
    pub period_id: Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `sum(vars) <= k`
    AtMostK(u32),
    /// `sum(vars) == k`
    ExactlyK(u32),
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub vars: Vec<VarId>,
}

/// The static CSP: variables, constraints, and a reverse index from variable to the
/// constraints it participates in. Immutable once built; the search engine layers its own
/// mutable propagation state on top of this.
#[derive(Debug)]
pub struct ConstraintModel {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub var_constraints: Vec<Vec<ConstraintId>>,
    /// Variable ids grouped by requirement, in domain (day, period) order.
    pub requirement_vars: Vec<Vec<VarId>>,
}

impl ConstraintModel {
    fn new(num_requirements: usize) -> Self {
        ConstraintModel {
            variables: Vec::new(),
            constraints: Vec::new(),
            var_constraints: Vec::new(),
            requirement_vars: vec![Vec::new(); num_requirements],
        }
    }

    fn add_variable(&mut self, variable: Variable) -> VarId {
        let id = self.variables.len();
        self.variables.push(variable);
        self.var_constraints.push(Vec::new());
        self.requirement_vars[variable.requirement_index].push(id);
        id
    }

    fn add_constraint(&mut self, kind: ConstraintKind, vars: Vec<VarId>) -> ConstraintId {
        let id = self.constraints.len();
        for &v in &vars {
            self.var_constraints[v].push(id);
        }
        self.constraints.push(Constraint { kind, vars });
        id
    }
}

/// Builds the full constraint model for a problem instance from its per-requirement domains.
/// Domains must already be in deterministic (day, period_index) order; variable and
/// constraint creation then follows requirement ascending id, day ascending, period ascending,
/// matching §4.3's tie-breaking rule.
pub fn build_constraint_model(problem: &ProblemInstance, domains: &[Domain]) -> ConstraintModel {
    let mut model = ConstraintModel::new(problem.requirements.len());

    // Every other constraint family is keyed on (day, period) cells; accumulate the grouping
    // keys in first-seen order while creating variables, so the later `add_constraint` passes
    // stay deterministic without re-scanning the domains.
    let mut one_per_day: IndexMap<(usize, u8), Vec<VarId>> = IndexMap::new();
    let mut class_group_cell: IndexMap<(u8, usize, Id), Vec<VarId>> = IndexMap::new();
    let mut teacher_cell: IndexMap<(u8, usize, Id), Vec<VarId>> = IndexMap::new();
    let mut room_cell: IndexMap<(u8, usize, Id), Vec<VarId>> = IndexMap::new();
    let mut teacher_weekly: IndexMap<Id, Vec<VarId>> = IndexMap::new();

    for domain in domains {
        let assignment = &problem.requirements[domain.requirement_index];
        for cell in &domain.cells {
            let var_id = model.add_variable(Variable {
                requirement_index: domain.requirement_index,
                day: cell.day,
                period_index: cell.period_index,
                period_id: cell.period_id,
            });

            one_per_day.entry((domain.requirement_index, cell.day)).or_default().push(var_id);
            class_group_cell
                .entry((cell.day, cell.period_index, assignment.class_group_id))
                .or_default()
                .push(var_id);

            if let Some(teacher_id) = assignment.teacher_id {
                teacher_cell.entry((cell.day, cell.period_index, teacher_id)).or_default().push(var_id);
                teacher_weekly.entry(teacher_id).or_default().push(var_id);
            }
            // Unresolved rooms (effective_room_id == None) join no exclusion group at all,
            // matching the spec's "not mutually exclusive" rule for the null bucket.
            if let Some(room_id) = assignment.effective_room_id {
                room_cell.entry((cell.day, cell.period_index, room_id)).or_default().push(var_id);
            }
        }
    }

    // 1. Coverage: sum(vars in requirement) == hours.
    for domain in domains {
        let assignment = &problem.requirements[domain.requirement_index];
        let vars = model.requirement_vars[domain.requirement_index].clone();
        model.add_constraint(ConstraintKind::ExactlyK(assignment.hours), vars);
    }

    // 2. One lesson per day per requirement: sum(vars on that day) <= 1.
    for (_key, vars) in one_per_day {
        model.add_constraint(ConstraintKind::AtMostK(1), vars);
    }

    // 3. Class-group exclusion: sum(vars for that group at that cell) <= 1.
    for (_key, vars) in class_group_cell {
        model.add_constraint(ConstraintKind::AtMostK(1), vars);
    }

    // 4. Teacher exclusion: sum(vars for that teacher at that cell) <= 1.
    for (_key, vars) in teacher_cell {
        model.add_constraint(ConstraintKind::AtMostK(1), vars);
    }

    // 5. Room exclusion: sum(vars for that room at that cell) <= 1.
    for (_key, vars) in room_cell {
        model.add_constraint(ConstraintKind::AtMostK(1), vars);
    }

    // 6. Teacher weekly cap: sum(vars for that teacher, all cells) <= teacher.weekly_hours.
    for (teacher_id, vars) in teacher_weekly {
        let cap = problem.teacher(teacher_id).map(|t| t.weekly_hours).unwrap_or(0);
        model.add_constraint(ConstraintKind::AtMostK(cap), vars);
    }

    model
}
