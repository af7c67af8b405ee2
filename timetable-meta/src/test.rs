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

use dotenvy::dotenv;
use log::LevelFilter;
use timetable_core::Configuration;
use timetable_db::Session;


/// Returns a fresh file-backed SQLite database URL rather than `sqlite::memory:`: tests need to
/// open a second `Session` against the same data (to write a schedule, then reload it to
/// assert on it), and an in-memory database does not survive past the connection that made it.
fn setup_for_tests() -> (Session, Configuration, String) {
    dotenv().ok();

    env_logger::Builder::new()
        .is_test(true)
        .filter(None, LevelFilter::Info)
        .filter(Some("timetable_core::scheduler"), LevelFilter::Debug)
        .try_init()
        .ok();

    let config = Configuration::load();

    let path = tempfile::NamedTempFile::new().expect("failed to create temp file for test database").into_temp_path();
    let database_url = format!("sqlite://{}?mode=rwc", path.keep().expect("failed to persist temp database path").display());

    let session = Session::new(&database_url);
    session.create_schema();

    (session, config, database_url)
}
