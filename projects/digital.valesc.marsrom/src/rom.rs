// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Holds the abstraction over a binary ROM image.

pub mod image;

use thiserror::Error;

/// The address where the cartridge ROM is mapped on the GBA bus.
pub const ROM_BUS_OFFSET: u32 = 0x0800_0000;

/// The largest cartridge ROM the GBA bus can map (32 MiB).
pub const MAX_ROM_SIZE: usize = 0x0200_0000;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that may happen when accessing a ROM image.
pub enum RomError {
    #[error("Accessing {size} bytes @ {address:#X} falls outside the ROM image of {len:#X} bytes")]
    /// The accessed bytes are not inside the image.
    OutOfRange {
        /// First byte of the access.
        address: usize,

        /// Number of bytes accessed.
        size: usize,

        /// Length of the image.
        len: usize,
    },

    #[error("The value {0:#010X} is not a pointer into the ROM image")]
    /// A stored pointer does not point into the mapped ROM.
    InvalidPointer(u32),

    #[error("The offset {offset:#X} is outside the mapped ROM image of {len:#X} bytes")]
    /// An offset cannot be expressed as a pointer into the mapped ROM.
    UnmappableOffset {
        /// The offset to point at.
        offset: usize,

        /// Length of the image.
        len: usize,
    },
}

/// A byte addressable ROM image.
///
/// Every multi-byte access is little-endian. Implementations are not expected
/// to synchronise themselves: callers sharing an image between a reader and a
/// writer must serialise those accesses.
#[cfg_attr(test, mockall::automock)]
pub trait Rom {
    /// Number of bytes in the image.
    fn len(&self) -> usize;

    /// Read a little-endian word.
    fn read_u32(&self, address: usize) -> Result<u32, RomError>;

    /// Write a little-endian word.
    fn write_u32(&mut self, address: usize, value: u32) -> Result<(), RomError>;

    /// If the image holds no bytes at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a GBA bus pointer and translate it into an offset of this image.
    fn read_ptr(&self, address: usize) -> Result<usize, RomError> {
        let value = self.read_u32(address)?;

        pointer_to_offset(value, self.len())
    }

    /// Store the offset of this image as a GBA bus pointer.
    fn write_ptr(&mut self, address: usize, offset: usize) -> Result<(), RomError> {
        let len = self.len();

        if offset >= len.min(MAX_ROM_SIZE) {
            return Err(RomError::UnmappableOffset { offset, len });
        }

        self.write_u32(address, ROM_BUS_OFFSET + offset as u32)
    }
}

/// Translate a GBA bus pointer into an offset of an image of `len` bytes.
pub fn pointer_to_offset(value: u32, len: usize) -> Result<usize, RomError> {
    let offset = value
        .checked_sub(ROM_BUS_OFFSET)
        .ok_or(RomError::InvalidPointer(value))? as usize;

    if offset >= len.min(MAX_ROM_SIZE) {
        return Err(RomError::InvalidPointer(value));
    }

    Ok(offset)
}
