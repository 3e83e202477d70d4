// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Accessor over tables of fixed size records stored in a ROM image.

use log::trace;
use thiserror::Error;

use crate::rom::{Rom, RomError};
use crate::WORD_SIZE;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that may happen when accessing a record of a table.
pub enum TableError {
    #[error("Record {index} is out of the table bounds ({count} records)")]
    /// The index is not below the known record count.
    InvalidIndex {
        /// The requested record.
        index: usize,

        /// Number of records in the table.
        count: usize,
    },

    #[error("A field of {size} bytes at {offset:#X} does not fit in a record of {stride:#X} bytes")]
    /// The field crosses the end of its record.
    FieldOutsideRecord {
        /// Offset of the field from the start of the record.
        offset: usize,

        /// Size of the field.
        size: usize,

        /// Distance between two records.
        stride: usize,
    },

    #[error("Unable to read the ROM image: {0}")]
    /// The ROM image rejected the read.
    Rom(#[from] RomError),
}

/// A contiguous table of records of `stride` bytes starting at `base`.
///
/// The table never owns the image it describes, every read borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRecordTable {
    /// Address of the first record.
    base: usize,

    /// Distance in bytes between two consecutive records.
    stride: usize,

    /// Number of records, when the source of the table knows it.
    count: Option<usize>,
}

impl FixedRecordTable {
    /// Create a new [FixedRecordTable] with an unknown record count.
    pub const fn new(base: usize, stride: usize) -> FixedRecordTable {
        FixedRecordTable {
            base,
            stride,
            count: None,
        }
    }

    /// Bound the table to `count` records.
    pub const fn with_count(self, count: usize) -> FixedRecordTable {
        FixedRecordTable {
            count: Some(count),
            ..self
        }
    }

    /// Address of the first record.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Distance in bytes between two consecutive records.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of records, if known.
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Address of the first byte of the record `index`.
    ///
    /// Saturates at `usize::MAX` when the arithmetic overflows, an address no
    /// image contains, so the read that follows reports it as out of range.
    pub fn record_address(&self, index: usize) -> Result<usize, TableError> {
        if let Some(count) = self.count {
            if index >= count {
                return Err(TableError::InvalidIndex { index, count });
            }
        }

        Ok(self.base.saturating_add(index.saturating_mul(self.stride)))
    }

    /// Address of a field of `size` bytes at `offset` inside the record `index`.
    pub fn field_address(
        &self,
        index: usize,
        offset: usize,
        size: usize,
    ) -> Result<usize, TableError> {
        match offset.checked_add(size) {
            Some(end) if end <= self.stride => {}
            _ => {
                return Err(TableError::FieldOutsideRecord {
                    offset,
                    size,
                    stride: self.stride,
                })
            }
        }

        Ok(self.record_address(index)?.saturating_add(offset))
    }

    /// Read the little-endian word field at `offset` of the record `index`.
    pub fn read_u32_field<R: Rom + ?Sized>(
        &self,
        rom: &R,
        index: usize,
        offset: usize,
    ) -> Result<u32, TableError> {
        let address = self.field_address(index, offset, WORD_SIZE)?;
        let value = rom.read_u32(address);

        match value {
            Ok(value) => trace!(
                "Table {:#X}: Record {index} field +{offset:#X} @ {address:#X} = {value:#010X}",
                self.base
            ),
            Err(ref err) => trace!(
                "Table {:#X}: Record {index} field +{offset:#X} @ {address:#X} failed! ({err})",
                self.base
            ),
        };

        Ok(value?)
    }

    /// Read the GBA pointer field at `offset` of the record `index` as an image offset.
    pub fn read_ptr_field<R: Rom + ?Sized>(
        &self,
        rom: &R,
        index: usize,
        offset: usize,
    ) -> Result<usize, TableError> {
        let address = self.field_address(index, offset, WORD_SIZE)?;

        Ok(rom.read_ptr(address)?)
    }
}
