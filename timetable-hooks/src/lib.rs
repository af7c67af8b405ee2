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

use std::cell::OnceCell;
use std::rc::Rc;

thread_local! {
    static OBSERVER: Rc<ObserverManager> = Rc::new(ObserverManager::new());
}

/// A snapshot of solver progress, handed to the observer at every propagation fixpoint.
#[derive(Debug, Clone, Copy)]
pub struct SolveState {
    pub assigned_variables: u32,
    pub total_variables: u32,
    pub branch_depth: u32,
}

/// Instrumentation hook for a solve run. Never consulted for correctness: a solve produces
/// the same schedule whether or not an observer is registered.
pub trait SolveObserver {
    /// Called after every propagation fixpoint is reached.
    fn on_state_change(&self, state: &SolveState);

    /// Called whenever the search engine undoes a branch and tries the other side.
    fn on_backtrack(&self, branch_depth: u32);
}

pub(crate) struct ObserverManager {
    observer: OnceCell<Box<dyn SolveObserver>>,
}

impl ObserverManager {
    fn new() -> Self {
        ObserverManager { observer: OnceCell::new() }
    }

    fn set_observer<O>(&self, observer: O)
    where
        O: SolveObserver + 'static,
    {
        if self.observer.get().is_some() {
            panic!("solve observer is already set for this thread.");
        }
        let _ = self.observer.set(Box::new(observer));
    }

    pub fn on_state_change(&self, state: &SolveState) -> bool {
        match self.observer.get() {
            Some(observer) => {
                observer.on_state_change(state);
                true
            }
            None => false,
        }
    }

    pub fn on_backtrack(&self, branch_depth: u32) -> bool {
        match self.observer.get() {
            Some(observer) => {
                observer.on_backtrack(branch_depth);
                true
            }
            None => false,
        }
    }
}

/// Registers `observer` for the current thread. Panics if an observer is already set; a solve
/// runs on one thread for its whole lifetime, so this is meant to be called once up front.
pub fn set_observer<O>(observer: O)
where
    O: SolveObserver + 'static,
{
    OBSERVER.with(|manager| manager.set_observer(observer));
}

pub(crate) fn get_observer_manager() -> Rc<ObserverManager> {
    OBSERVER.with(|manager| manager.clone())
}

pub fn notify_state_change(state: &SolveState) {
    get_observer_manager().on_state_change(state);
}

pub fn notify_backtrack(branch_depth: u32) {
    get_observer_manager().on_backtrack(branch_depth);
}
