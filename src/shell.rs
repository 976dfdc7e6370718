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

//! The interactive shell: a line-oriented REPL sitting directly on top of the
//! [`crate::sfs::FileSystem`] operations. A bad command reports its error and keeps the session
//! running; only `quit`/`exit` or end-of-input end the loop.

use crate::sfs::FileSystem;
use crate::util;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  format                       erase and reinitialize the mounted disk
  debug                        print the superblock and every valid inode
  create                       allocate a new inode, printing its number
  remove   <inode>             release an inode's blocks and mark it free
  stat     <inode>             print an inode's size in bytes
  read     <inode> <len> <off> read up to <len> bytes at offset <off>, printing them
  write    <inode> <off> <data> write <data> at offset <off>
  help                         print this message
  quit, exit                   leave the shell";

/// Runs the shell loop over stdin/stdout until the user quits or stdin closes.
///
/// `fs` arrives already mounted. On exit the disk is unmounted and dropped, which flushes its
/// diagnostics via `Disk`'s `Drop` impl.
pub fn run(mut fs: FileSystem) {
    let stdin = io::stdin();
    print!("sfs> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => println!("{HELP}"),
            ["debug"] => {
                if let Err(e) = fs.debug() {
                    util::report("debug", e);
                }
            }
            ["format"] => {
                let result = match fs.unmount() {
                    Some(mut disk) => fs.format(&mut disk).and_then(|()| fs.mount(disk)),
                    None => Err(crate::sfs::Error::FsError),
                };
                match result {
                    Ok(()) => println!("disk formatted"),
                    Err(e) => util::report("format", e),
                }
            }
            ["create"] => match fs.create() {
                Ok(n) => println!("created inode {n}"),
                Err(e) => util::report("create", e),
            },
            ["remove", n] => match n.parse() {
                Ok(n) => match fs.remove(n) {
                    Ok(()) => println!("removed inode {n}"),
                    Err(e) => util::report("remove", e),
                },
                Err(_) => util::report("remove", "expected an inode number"),
            },
            ["stat", n] => match n.parse() {
                Ok(n) => match fs.stat(n) {
                    Ok(size) => println!("inode {n}: {size} bytes"),
                    Err(e) => util::report("stat", e),
                },
                Err(_) => util::report("stat", "expected an inode number"),
            },
            ["read", n, len, off] => match (n.parse(), len.parse(), off.parse()) {
                (Ok(n), Ok(len), Ok(off)) => {
                    let len: usize = len;
                    let mut buf = vec![0u8; len];
                    match fs.read(n, &mut buf, off) {
                        Ok(got) => {
                            buf.truncate(got);
                            println!("{}", String::from_utf8_lossy(&buf));
                        }
                        Err(e) => util::report("read", e),
                    }
                }
                _ => util::report("read", "usage: read <inode> <len> <offset>"),
            },
            ["write", n, off, data @ ..] if !data.is_empty() => {
                match (n.parse(), off.parse()) {
                    (Ok(n), Ok(off)) => {
                        let payload = data.join(" ");
                        match fs.write(n, payload.as_bytes(), off) {
                            Ok(written) => println!("wrote {written} bytes"),
                            Err(e) => util::report("write", e),
                        }
                    }
                    _ => util::report("write", "usage: write <inode> <offset> <data>"),
                }
            }
            _ => util::report(words[0], "unknown command, try 'help'"),
        }
        print!("sfs> ");
        let _ = io::stdout().flush();
    }
    drop(fs.unmount());
}
