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

use crate::error::LoadError;
use std::collections::BTreeSet;

/// A restriction over a universe of ids. `Universe` and an empty `Only` are never both
/// reachable at once: construction always collapses an empty set down to `Universe`, per
/// the data model's "empty preferred set denotes all" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceSet {
    Universe,
    Only(BTreeSet<i64>),
}

impl PreferenceSet {
    pub fn universe() -> Self {
        PreferenceSet::Universe
    }

    /// Parses a comma-separated list of ids, dropping ids outside `valid` silently and
    /// coercing an empty or all-dropped result to `Universe`.
    pub fn from_csv(field: &str, raw: Option<&str>, valid: &BTreeSet<i64>) -> Result<Self, LoadError> {
        let raw = match raw {
            None => return Ok(PreferenceSet::Universe),
            Some(s) if s.trim().is_empty() => return Ok(PreferenceSet::Universe),
            Some(s) => s,
        };

        let mut ids = BTreeSet::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let id: i64 = token.parse().map_err(|_| LoadError::MalformedPreferenceList {
                field: field.into(),
                token: token.into(),
            })?;
            if valid.contains(&id) {
                ids.insert(id);
            }
        }

        if ids.is_empty() {
            Ok(PreferenceSet::Universe)
        } else {
            Ok(PreferenceSet::Only(ids))
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        match self {
            PreferenceSet::Universe => true,
            PreferenceSet::Only(ids) => ids.contains(&id),
        }
    }

    pub fn intersect(&self, other: &PreferenceSet) -> PreferenceSet {
        match (self, other) {
            (PreferenceSet::Universe, PreferenceSet::Universe) => PreferenceSet::Universe,
            (PreferenceSet::Universe, PreferenceSet::Only(ids)) => PreferenceSet::Only(ids.clone()),
            (PreferenceSet::Only(ids), PreferenceSet::Universe) => PreferenceSet::Only(ids.clone()),
            (PreferenceSet::Only(a), PreferenceSet::Only(b)) => {
                let inter: BTreeSet<i64> = a.intersection(b).copied().collect();
                PreferenceSet::Only(inter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn empty_and_missing_both_mean_universe() {
        let v = valid(&[1, 2, 3]);
        assert_eq!(PreferenceSet::from_csv("f", None, &v).unwrap(), PreferenceSet::Universe);
        assert_eq!(PreferenceSet::from_csv("f", Some(""), &v).unwrap(), PreferenceSet::Universe);
    }

    #[test]
    fn unknown_ids_dropped_and_empty_result_is_universe() {
        let v = valid(&[1, 2, 3]);
        let set = PreferenceSet::from_csv("f", Some("99"), &v).unwrap();
        assert_eq!(set, PreferenceSet::Universe);
    }

    #[test]
    fn malformed_token_is_rejected() {
        let v = valid(&[1, 2, 3]);
        let err = PreferenceSet::from_csv("f", Some("1,two"), &v).unwrap_err();
        assert!(matches!(err, LoadError::MalformedPreferenceList { .. }));
    }

    #[test]
    fn intersect_universe_is_identity() {
        let v = valid(&[1, 2, 3]);
        let set = PreferenceSet::from_csv("f", Some("1,2"), &v).unwrap();
        assert_eq!(set.intersect(&PreferenceSet::Universe), set);
    }
}
