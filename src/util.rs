/*
 * Copyright 2025 Luc Lenôtre
 *
 * This file is part of SFS.
 *
 * SFS is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * SFS is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
 * A PARTICULAR PURPOSE. See the GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * SFS. If not, see <https://www.gnu.org/licenses/>.
 */

//! Small utilities shared between the CLI entry point and the shell.

use std::fmt;
use std::process::exit;

/// Writes an error to stderr, then exits the process.
///
/// Used for startup failures only (bad arguments, an image that cannot be opened); once the
/// shell loop is running, errors are reported with [`report`] instead so one bad command does
/// not kill the session.
pub fn fatal<M: fmt::Display>(bin: &str, msg: M) -> ! {
    eprintln!("{bin}: error: {msg}");
    exit(1);
}

/// Reports a non-fatal error for the command `cmd` to stderr.
pub fn report<M: fmt::Display>(cmd: &str, msg: M) {
    eprintln!("{cmd}: {msg}");
}
