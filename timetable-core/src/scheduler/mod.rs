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

#[cfg(test)]
mod tests;

use crate::model::{ConstraintKind, ConstraintModel, ConstraintId, VarId};
use log::debug;
use std::collections::VecDeque;
use std::time::Instant;
use timetable_hooks::{SolveState, notify_backtrack, notify_state_change};

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Sat(Vec<bool>),
    Unsat,
    Timeout,
}

struct Conflict;

#[derive(Clone, Copy)]
struct Frame {
    var: VarId,
    tried_false: bool,
    trail_mark: usize,
}

struct Engine<'m> {
    model: &'m ConstraintModel,
    assignment: Vec<Option<bool>>,
    true_count: Vec<u32>,
    assigned_count: Vec<u32>,
    unknown_total: usize,
    trail: Vec<(VarId, bool)>,
    frames: Vec<Frame>,
    queue: VecDeque<ConstraintId>,
    deadline: Instant,
}

impl<'m> Engine<'m> {
    fn new(model: &'m ConstraintModel, deadline: Instant) -> Self {
        Engine {
            model,
            assignment: vec![None; model.variables.len()],
            true_count: vec![0; model.constraints.len()],
            assigned_count: vec![0; model.constraints.len()],
            unknown_total: model.variables.len(),
            trail: Vec::new(),
            frames: Vec::new(),
            queue: VecDeque::new(),
            deadline,
        }
    }

    fn force(&mut self, var: VarId, value: bool) -> Result<(), Conflict> {
        match self.assignment[var] {
            Some(current) if current == value => Ok(()),
            Some(_) => Err(Conflict),
            None => {
                self.assignment[var] = Some(value);
                self.trail.push((var, value));
                self.unknown_total -= 1;
                for &cid in &self.model.var_constraints[var] {
                    self.assigned_count[cid] += 1;
                    if value {
                        self.true_count[cid] += 1;
                    }
                    self.queue.push_back(cid);
                }
                Ok(())
            }
        }
    }

    fn drain_queue(&mut self) -> Result<(), Conflict> {
        let model = self.model;
        while let Some(cid) = self.queue.pop_front() {
            let constraint = &model.constraints[cid];
            let total = constraint.vars.len() as u32;
            let true_count = self.true_count[cid];
            let unknown = total - self.assigned_count[cid];

            let (force_remaining_to, should_force) = match constraint.kind {
                ConstraintKind::AtMostK(k) => {
                    if true_count > k {
                        return Err(Conflict);
                    }
                    (false, true_count == k && unknown > 0)
                }
                ConstraintKind::ExactlyK(k) => {
                    if true_count > k {
                        return Err(Conflict);
                    }
                    let need = k - true_count;
                    if need > unknown {
                        return Err(Conflict);
                    }
                    if need == 0 && unknown > 0 {
                        (false, true)
                    } else if need == unknown && unknown > 0 {
                        (true, true)
                    } else {
                        (false, false)
                    }
                }
            };

            if should_force {
                for &v in &constraint.vars {
                    if self.assignment[v].is_none() {
                        self.force(v, force_remaining_to)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn force_and_propagate(&mut self, var: VarId, value: bool) -> Result<(), Conflict> {
        self.force(var, value)?;
        self.drain_queue()
    }

    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let (var, value) = self.trail.pop().unwrap();
            self.assignment[var] = None;
            self.unknown_total += 1;
            for &cid in &self.model.var_constraints[var] {
                self.assigned_count[cid] -= 1;
                if value {
                    self.true_count[cid] -= 1;
                }
            }
        }
        self.queue.clear();
    }

    /// Picks the unassigned variable belonging to the most-constrained requirement: smallest
    /// `remaining_domain / remaining_need` ratio (compared via cross-multiplication to stay in
    /// exact integer arithmetic), tied-broken by the variable's (day, period_index) order.
    fn pick_branch_var(&self) -> Option<VarId> {
        if self.unknown_total == 0 {
            return None;
        }

        let mut best: Option<(usize, u32, VarId)> = None; // (remaining_domain, remaining_need, var)
        for (requirement_index, vars) in self.model.requirement_vars.iter().enumerate() {
            let remaining_domain = vars.iter().filter(|&&v| self.assignment[v].is_none()).count();
            if remaining_domain == 0 {
                continue;
            }
            let coverage_true = self.true_count[requirement_index];
            let need = match self.model.constraints[requirement_index].kind {
                ConstraintKind::ExactlyK(k) => k.saturating_sub(coverage_true),
                _ => unreachable!("coverage constraints are created first, one per requirement"),
            };
            if need == 0 {
                continue;
            }
            let candidate_var = *vars.iter().find(|&&v| self.assignment[v].is_none()).unwrap();

            let is_better = match best {
                None => true,
                Some((best_domain, best_need, _)) => {
                    (remaining_domain as u64) * (best_need as u64) < (best_domain as u64) * (need as u64)
                }
            };
            if is_better {
                best = Some((remaining_domain, need, candidate_var));
            }
        }
        best.map(|(_, _, var)| var)
    }

    fn retreat(&mut self) -> bool {
        while let Some(frame) = self.frames.last().copied() {
            self.undo_to(frame.trail_mark);
            if !frame.tried_false {
                match self.force_and_propagate(frame.var, false) {
                    Ok(()) => {
                        self.frames.last_mut().unwrap().tried_false = true;
                        return true;
                    }
                    Err(Conflict) => {
                        self.undo_to(frame.trail_mark);
                        self.frames.pop();
                        notify_backtrack(self.frames.len() as u32);
                    }
                }
            } else {
                self.frames.pop();
                notify_backtrack(self.frames.len() as u32);
            }
        }
        false
    }

    fn run(&mut self) -> SearchOutcome {
        if self.drain_queue().is_err() {
            return SearchOutcome::Unsat;
        }

        loop {
            if Instant::now() >= self.deadline {
                return SearchOutcome::Timeout;
            }

            notify_state_change(&SolveState {
                assigned_variables: (self.model.variables.len() - self.unknown_total) as u32,
                total_variables: self.model.variables.len() as u32,
                branch_depth: self.frames.len() as u32,
            });

            let Some(var) = self.pick_branch_var() else {
                let assignment = self.assignment.iter().map(|v| v.unwrap_or(false)).collect();
                return SearchOutcome::Sat(assignment);
            };

            let mark = self.trail.len();
            self.frames.push(Frame { var, tried_false: false, trail_mark: mark });
            debug!("branching on var {var} at depth {}", self.frames.len());

            if self.force_and_propagate(var, true).is_err() && !self.retreat() {
                return SearchOutcome::Unsat;
            }
        }
    }
}

/// Runs the CP-SAT-style search described in the constraint model's module docs to completion,
/// subject to `deadline`.
pub fn search(model: &ConstraintModel, deadline: Instant) -> SearchOutcome {
    Engine::new(model, deadline).run()
}
