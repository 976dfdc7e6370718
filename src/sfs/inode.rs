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

//! An inode describes one file's length and the blocks holding its content. Inodes carry no
//! name, permissions, or timestamps: the name is the inode's linear index in the table.

use super::POINTERS_PER_INODE;
use std::num::NonZeroU32;

/// A non-zero block index.
///
/// Block `0` is the superblock and can never be a data pointer, so it doubles as the "no
/// block here" sentinel on disk; in memory that sentinel is represented as `None` instead of a
/// magic zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockNumber(NonZeroU32);

impl BlockNumber {
    /// Wraps `n`, returning `None` if `n == 0`.
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the raw block index.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// The on-disk size, in bytes, of one inode record: `valid`, `size`, the direct pointers and
/// the indirect pointer, all packed as `u32`.
pub const RECORD_SIZE: usize = 4 * (2 + POINTERS_PER_INODE + 1);

/// A single inode slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inode {
    /// Whether the slot is in use. An invalid inode's other fields are meaningless.
    pub valid: bool,
    /// File length in bytes.
    pub size: u32,
    /// Direct data block pointers, zero-terminated on disk (`None` once one slot is empty, every
    /// later slot is `None` too).
    pub direct: [Option<BlockNumber>; POINTERS_PER_INODE],
    /// Pointer to a single indirect block holding further data block pointers.
    pub indirect: Option<BlockNumber>,
}

impl Default for Inode {
    fn default() -> Self {
        Self {
            valid: false,
            size: 0,
            direct: [None; POINTERS_PER_INODE],
            indirect: None,
        }
    }
}

impl Inode {
    /// Serializes the inode into a `RECORD_SIZE`-byte record.
    pub fn write_record(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= RECORD_SIZE);
        buf[0..4].copy_from_slice(&(self.valid as u32).to_le_bytes());
        buf[4..8].copy_from_slice(&self.size.to_le_bytes());
        for (i, ptr) in self.direct.iter().enumerate() {
            let off = 8 + i * 4;
            let raw = ptr.map_or(0, BlockNumber::get);
            buf[off..off + 4].copy_from_slice(&raw.to_le_bytes());
        }
        let ind_off = 8 + POINTERS_PER_INODE * 4;
        let raw = self.indirect.map_or(0, BlockNumber::get);
        buf[ind_off..ind_off + 4].copy_from_slice(&raw.to_le_bytes());
    }

    /// Deserializes an inode from a `RECORD_SIZE`-byte record.
    pub fn read_record(buf: &[u8]) -> Self {
        debug_assert!(buf.len() >= RECORD_SIZE);
        let valid = u32::from_le_bytes(buf[0..4].try_into().unwrap()) != 0;
        let size = u32::from_le_bytes(buf[4..8].try_into().unwrap());
        let mut direct = [None; POINTERS_PER_INODE];
        for (i, slot) in direct.iter_mut().enumerate() {
            let off = 8 + i * 4;
            let raw = u32::from_le_bytes(buf[off..off + 4].try_into().unwrap());
            *slot = BlockNumber::new(raw);
        }
        let ind_off = 8 + POINTERS_PER_INODE * 4;
        let raw = u32::from_le_bytes(buf[ind_off..ind_off + 4].try_into().unwrap());
        Self {
            valid,
            size,
            direct,
            indirect: BlockNumber::new(raw),
        }
    }

    /// Number of non-zero direct pointers (direct pointers are zero-terminated).
    #[cfg(test)]
    fn direct_count(&self) -> usize {
        self.direct.iter().take_while(|p| p.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_invalid_and_empty() {
        let inode = Inode::default();
        assert!(!inode.valid);
        assert_eq!(inode.size, 0);
        assert_eq!(inode.direct_count(), 0);
        assert!(inode.indirect.is_none());
    }

    #[test]
    fn record_roundtrip() {
        let mut inode = Inode {
            valid: true,
            size: 12345,
            direct: [None; POINTERS_PER_INODE],
            indirect: BlockNumber::new(99),
        };
        inode.direct[0] = BlockNumber::new(10);
        inode.direct[1] = BlockNumber::new(11);
        let mut buf = [0u8; RECORD_SIZE];
        inode.write_record(&mut buf);
        let back = Inode::read_record(&buf);
        assert_eq!(back, inode);
        assert_eq!(back.direct_count(), 2);
    }

    #[test]
    fn zero_pointer_is_none() {
        let inode = Inode::default();
        let mut buf = [0u8; RECORD_SIZE];
        inode.write_record(&mut buf);
        let back = Inode::read_record(&buf);
        assert!(back.direct.iter().all(Option::is_none));
    }
}
