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

use serde::{Deserialize, Serialize};
use timetable_dao::RoomUnresolvedPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "/etc/timetable/timetable.conf";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    pub time_budget_seconds: u64,
    pub fail_fast_on_domain: bool,
    pub room_unresolved_policy: RoomUnresolvedPolicy,
}

impl Configuration {
    /// Loads configuration from a file in `.conf` (key=value) format. The path defaults to
    /// `DEFAULT_CONFIG_FILE`, overridable through `TIMETABLE_CONF_FILE`.
    pub fn load() -> Self {
        let path = std::env::var("TIMETABLE_CONF_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let contents = std::fs::read_to_string(&path).ok();
        if let Some(contents) = contents {
            serde_envfile::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("could not parse configuration file '{}': {}, using default configuration.", path, e);
                Configuration::default()
            })
        } else {
            Configuration::default()
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            time_budget_seconds: 10,
            fail_fast_on_domain: true,
            room_unresolved_policy: RoomUnresolvedPolicy::Ignore,
        }
    }
}
