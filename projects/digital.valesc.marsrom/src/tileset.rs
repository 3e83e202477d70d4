// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Accessor over the entries of the tileset table.

use log::debug;
use thiserror::Error;

use crate::rom::Rom;
use crate::table::{FixedRecordTable, TableError};
use crate::tables::{TableLookup, TableLookupError, TableName};

/// Size in bytes of a tileset entry.
pub const TILESET_ENTRY_SIZE: usize = 0x14;

/// Offset of the pointer to the RLE compressed tilemap inside a tileset entry.
pub const RLE_TILEMAP_FIELD_OFFSET: usize = 0x0C;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that may happen when accessing a tileset.
pub enum TilesetError {
    #[error("Unable to access the tileset entry: {0}")]
    /// Accessing the entry failed.
    Table(#[from] TableError),

    #[error("Unable to locate the tileset entries: {0}")]
    /// The tileset entries table could not be located.
    Lookup(#[from] TableLookupError),
}

/// Read the RLE tilemap field of the tileset entry `index` of the table at
/// `table_base_address`, as stored in the image.
pub fn field_pointer<R: Rom + ?Sized>(
    rom: &R,
    table_base_address: usize,
    index: usize,
) -> Result<u32, TableError> {
    FixedRecordTable::new(table_base_address, TILESET_ENTRY_SIZE).read_u32_field(
        rom,
        index,
        RLE_TILEMAP_FIELD_OFFSET,
    )
}

/// A tileset entry of the ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tileset {
    /// Index of the tileset in the entries table.
    id: usize,

    /// The tileset entries table.
    entries: FixedRecordTable,
}

impl Tileset {
    /// Locate the tileset `id` through the tables of the ROM.
    pub fn new<L: TableLookup + ?Sized>(lookup: &L, id: usize) -> Result<Tileset, TilesetError> {
        let base = lookup.table_base_address(TableName::TilesetEntries)?;

        let mut entries = FixedRecordTable::new(base, TILESET_ENTRY_SIZE);
        if let Some(count) = lookup.record_count(TableName::TilesetEntries) {
            entries = entries.with_count(count);
        }

        let address = entries.record_address(id)?;
        debug!("Tileset {id:#X} @ {address:#X}");

        Ok(Tileset { id, entries })
    }

    /// Index of the tileset.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Address of the tileset entry.
    pub fn address(&self) -> Result<usize, TilesetError> {
        Ok(self.entries.record_address(self.id)?)
    }

    /// The pointer to the RLE compressed tilemap, as stored in the entry.
    pub fn rle_tilemap_pointer<R: Rom + ?Sized>(&self, rom: &R) -> Result<u32, TilesetError> {
        Ok(self
            .entries
            .read_u32_field(rom, self.id, RLE_TILEMAP_FIELD_OFFSET)?)
    }

    /// Offset in the image of the RLE compressed tilemap.
    pub fn rle_tilemap_offset<R: Rom + ?Sized>(&self, rom: &R) -> Result<usize, TilesetError> {
        Ok(self
            .entries
            .read_ptr_field(rom, self.id, RLE_TILEMAP_FIELD_OFFSET)?)
    }
}
