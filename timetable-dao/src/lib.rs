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

pub mod error;
pub mod loader;
pub mod model;
pub mod preference;
pub mod problem;

#[cfg(feature = "testing")]
pub mod testing;

pub use error::{LoadError, WriteError};
pub use loader::{CatalogLoader, RoomUnresolvedPolicy, ScheduleWriter};
pub use model::*;
pub use preference::PreferenceSet;
pub use problem::ProblemInstance;

pub type Id = i64;
