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

//! Entry point: opens (or creates) a disk image and drops into the interactive shell.

mod disk;
mod sfs;
mod shell;
mod util;

use disk::Disk;
use sfs::{FileSystem, BLOCK_SIZE};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

#[derive(Default)]
struct Args {
    image: Option<OsString>,
    blocks: Option<u32>,
}

impl Args {
    fn parse() -> Self {
        let mut it = env::args_os().skip(1);
        let image = it.next();
        let blocks = it.next().map(|raw| {
            raw.into_string()
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| util::fatal("sfs", "block count must be a positive integer"))
        });
        Self { image, blocks }
    }
}

fn main() {
    let args = Args::parse();
    let image = args
        .image
        .unwrap_or_else(|| util::fatal("sfs", "usage: sfs <image> [blocks]"));
    let existing = Path::new(&image).exists();

    let blocks = match (args.blocks, existing) {
        (Some(b), _) => b,
        (None, true) => {
            let len = fs::metadata(&image)
                .unwrap_or_else(|e| util::fatal("sfs", e))
                .len();
            (len / BLOCK_SIZE as u64) as u32
        }
        (None, false) => util::fatal("sfs", "creating a new image requires a block count"),
    };

    let mut disk = Disk::open(&image, blocks).unwrap_or_else(|e| util::fatal("sfs", e));
    let mut fs = FileSystem::new();
    if !existing {
        fs.format(&mut disk).unwrap_or_else(|e| util::fatal("sfs", e));
    }
    fs.mount(disk).unwrap_or_else(|e| util::fatal("sfs", e));

    shell::run(fs);
}
