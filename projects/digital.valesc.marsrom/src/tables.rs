// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Directory of the data tables of a ROM version.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::rom::{Rom, RomError};

/// Logical name of a data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TableName {
    /// Entries describing the graphics, palette and tilemap of every tileset.
    TilesetEntries,
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableName::TilesetEntries => write!(f, "tileset entries"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that may happen when locating a table.
pub enum TableLookupError {
    #[error("The {0} table is not registered")]
    /// No table with that name is known.
    UnknownTable(TableName),

    #[error("Unable to resolve the table pointer: {0}")]
    /// The pointer to the table could not be read.
    Rom(#[from] RomError),
}

/// Source of the base address of the tables of a ROM.
#[cfg_attr(test, mockall::automock)]
pub trait TableLookup {
    /// Address of the first record of the table.
    fn table_base_address(&self, name: TableName) -> Result<usize, TableLookupError>;

    /// Number of records of the table, if known.
    fn record_count(&self, name: TableName) -> Option<usize>;
}

/// Location of a registered table.
#[derive(Debug, Clone, Copy)]
struct TableLocation {
    /// Address of the first record.
    base: usize,

    /// Number of records.
    count: Option<usize>,
}

/// An in-memory [TableLookup] filled by the caller for a given ROM version.
#[derive(Debug, Default)]
pub struct TableDirectory {
    /// Registered tables.
    tables: HashMap<TableName, TableLocation>,
}

impl TableDirectory {
    /// Create an empty [TableDirectory].
    pub fn new() -> TableDirectory {
        TableDirectory::default()
    }

    /// Register a table at a known address, replacing any previous entry.
    pub fn register(&mut self, name: TableName, base: usize, count: Option<usize>) -> &mut Self {
        debug!("Table directory: {name} @ {base:#X} ({count:?} records)");

        self.tables.insert(name, TableLocation { base, count });
        self
    }

    /// Register a table whose address is stored as a GBA pointer at `pointer_address`.
    pub fn register_from_pointer<R: Rom + ?Sized>(
        &mut self,
        rom: &R,
        name: TableName,
        pointer_address: usize,
        count: Option<usize>,
    ) -> Result<&mut Self, TableLookupError> {
        let base = rom.read_ptr(pointer_address)?;

        Ok(self.register(name, base, count))
    }

    /// Location of a registered table.
    fn location(&self, name: TableName) -> Result<&TableLocation, TableLookupError> {
        self.tables
            .get(&name)
            .ok_or(TableLookupError::UnknownTable(name))
    }
}

impl TableLookup for TableDirectory {
    fn table_base_address(&self, name: TableName) -> Result<usize, TableLookupError> {
        Ok(self.location(name)?.base)
    }

    fn record_count(&self, name: TableName) -> Option<usize> {
        self.location(name).ok().and_then(|location| location.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::image::RomImage;

    #[test]
    fn test_register() {
        let mut directory = TableDirectory::new();
        directory.register(TableName::TilesetEntries, 0x3BF888, Some(0x4F));

        assert_eq!(
            directory.table_base_address(TableName::TilesetEntries),
            Ok(0x3BF888)
        );
        assert_eq!(directory.record_count(TableName::TilesetEntries), Some(0x4F));
    }

    #[test]
    fn test_unknown_table() {
        let directory = TableDirectory::new();

        assert_eq!(
            directory.table_base_address(TableName::TilesetEntries),
            Err(TableLookupError::UnknownTable(TableName::TilesetEntries))
        );
        assert_eq!(directory.record_count(TableName::TilesetEntries), None);
    }

    #[test]
    fn test_register_from_pointer() {
        let mut image = RomImage::new(vec![0; 0x100]);
        image.write_u32(0x08, 0x0800_0040).unwrap();

        let mut directory = TableDirectory::new();
        directory
            .register_from_pointer(&image, TableName::TilesetEntries, 0x08, None)
            .unwrap();

        assert_eq!(
            directory.table_base_address(TableName::TilesetEntries),
            Ok(0x40)
        );
        assert_eq!(directory.record_count(TableName::TilesetEntries), None);
    }

    #[test]
    fn test_register_from_invalid_pointer() {
        let image = RomImage::new(vec![0; 0x100]);
        let mut directory = TableDirectory::new();

        assert!(matches!(
            directory.register_from_pointer(&image, TableName::TilesetEntries, 0x08, None),
            Err(TableLookupError::Rom(RomError::InvalidPointer(0)))
        ));
        assert!(directory
            .table_base_address(TableName::TilesetEntries)
            .is_err());
    }
}
