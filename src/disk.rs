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

//! The `Disk` collaborator exposes a fixed-size image file as a random-access array of
//! equal-sized blocks.
//!
//! This is the only interface the `sfs` core consumes; it never touches a `File` directly.

use crate::sfs::BLOCK_SIZE;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// The index of a block on a [`Disk`].
pub type BlockNum = u32;

/// A block device backed by a single image file.
///
/// Opening a disk sizes the backing file to `blocks * BLOCK_SIZE` bytes. Reads and writes are
/// always exactly one block and fail when the requested block is out of range.
pub struct Disk {
    file: File,
    blocks: u32,
    reads: u64,
    writes: u64,
}

impl Disk {
    /// Opens the image file at `path`, creating it if it does not exist, and resizes it to hold
    /// exactly `blocks` blocks.
    pub fn open<P: AsRef<Path>>(path: P, blocks: u32) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.set_len(blocks as u64 * BLOCK_SIZE as u64)?;
        Ok(Self {
            file,
            blocks,
            reads: 0,
            writes: 0,
        })
    }

    /// Returns the total number of blocks on the disk.
    pub fn blocks(&self) -> u32 {
        self.blocks
    }

    /// Reads the block at index `block` into `buf`.
    pub fn read(&mut self, block: BlockNum, buf: &mut [u8; BLOCK_SIZE]) -> io::Result<()> {
        if block >= self.blocks {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "block index out of range",
            ));
        }
        self.file.seek(SeekFrom::Start(Self::offset(block)))?;
        self.file.read_exact(buf)?;
        self.reads += 1;
        Ok(())
    }

    /// Writes `buf` to the block at index `block`.
    pub fn write(&mut self, block: BlockNum, buf: &[u8; BLOCK_SIZE]) -> io::Result<()> {
        if block >= self.blocks {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "block index out of range",
            ));
        }
        self.file.seek(SeekFrom::Start(Self::offset(block)))?;
        self.file.write_all(buf)?;
        self.writes += 1;
        Ok(())
    }

    fn offset(block: BlockNum) -> u64 {
        block as u64 * BLOCK_SIZE as u64
    }
}

impl Drop for Disk {
    /// Reports cumulative read/write counts, mirroring what a `close()` call would log.
    fn drop(&mut self) {
        eprintln!(
            "disk: closed after {} reads, {} writes",
            self.reads, self.writes
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("sfs-disk-test-{tag}-{}-{n}.img", std::process::id()))
    }

    #[test]
    fn open_sizes_file() {
        let path = temp_path("open");
        {
            let disk = Disk::open(&path, 16).unwrap();
            assert_eq!(disk.blocks(), 16);
        }
        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.len(), 16 * BLOCK_SIZE as u64);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn read_write_roundtrip() {
        let path = temp_path("rw");
        let mut disk = Disk::open(&path, 4).unwrap();
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0] = 0xab;
        buf[BLOCK_SIZE - 1] = 0xcd;
        disk.write(2, &buf).unwrap();
        let mut out = [0u8; BLOCK_SIZE];
        disk.read(2, &mut out).unwrap();
        assert_eq!(buf, out);
        drop(disk);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn out_of_range_fails() {
        let path = temp_path("oob");
        let mut disk = Disk::open(&path, 4).unwrap();
        let mut buf = [0u8; BLOCK_SIZE];
        assert!(disk.read(4, &mut buf).is_err());
        assert!(disk.write(4, &buf).is_err());
        drop(disk);
        std::fs::remove_file(&path).unwrap();
    }
}
