// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! In-memory ROM image.

use std::io::{self, Read};
use std::ops::Range;

use log::debug;
use thiserror::Error;

use crate::rom::{Rom, RomError};
use crate::WORD_SIZE;

/// A ROM image fully loaded in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    /// The raw bytes of the image.
    bytes: Vec<u8>,
}

#[derive(Debug, Error)]
/// Errors that may happen when loading a [RomImage].
pub enum RomImageError {
    #[error("Unable to read the ROM image: {0}")]
    /// The underlying reader failed.
    ReadingRomFailed(#[from] io::Error),

    #[error("The ROM image is empty")]
    /// The reader yielded no bytes.
    EmptyImage,
}

impl RomImage {
    /// Create a new [RomImage] from its raw bytes.
    pub fn new(bytes: Vec<u8>) -> RomImage {
        RomImage { bytes }
    }

    /// Load a [RomImage] reading the whole stream.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<RomImage, RomImageError> {
        debug!("Loading ROM image");

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        if bytes.is_empty() {
            return Err(RomImageError::EmptyImage);
        }

        debug!("ROM image size: {:#X}", bytes.len());

        Ok(RomImage { bytes })
    }

    /// The raw bytes of the image.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bounds check an access of `size` bytes starting at `address`.
    fn span(&self, address: usize, size: usize) -> Result<Range<usize>, RomError> {
        let len = self.bytes.len();

        match address.checked_add(size) {
            Some(end) if end <= len => Ok(address..end),
            _ => Err(RomError::OutOfRange { address, size, len }),
        }
    }
}

impl From<Vec<u8>> for RomImage {
    fn from(bytes: Vec<u8>) -> RomImage {
        RomImage::new(bytes)
    }
}

impl Rom for RomImage {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read_u32(&self, address: usize) -> Result<u32, RomError> {
        let bytes = &self.bytes[self.span(address, WORD_SIZE)?];

        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn write_u32(&mut self, address: usize, value: u32) -> Result<(), RomError> {
        let span = self.span(address, WORD_SIZE)?;
        self.bytes[span].copy_from_slice(&value.to_le_bytes());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_from_read() {
        let image = RomImage::from_read(&mut Cursor::new(vec![0x01, 0x02, 0x03])).unwrap();

        assert_eq!(image.as_bytes(), &[0x01, 0x02, 0x03]);
        assert_eq!(image.len(), 3);
    }

    #[test]
    fn test_from_read_empty() {
        let result = RomImage::from_read(&mut Cursor::new(Vec::new()));

        assert!(matches!(result, Err(RomImageError::EmptyImage)));
    }

    #[test]
    fn test_read_little_endian() {
        let image = RomImage::new(vec![0x10, 0x20, 0x30, 0x40, 0x50]);

        assert_eq!(image.read_u32(0), Ok(0x4030_2010));
        assert_eq!(image.read_u32(1), Ok(0x5040_3020));
    }

    #[test]
    fn test_read_u32_out_of_range() {
        let image = RomImage::new(vec![0; 8]);

        assert_eq!(
            image.read_u32(5),
            Err(RomError::OutOfRange {
                address: 5,
                size: 4,
                len: 8
            })
        );
        assert!(image.read_u32(usize::MAX - 1).is_err());
    }

    #[test]
    fn test_failed_write_leaves_image_untouched() {
        let mut image = RomImage::new(vec![0xAA; 6]);

        assert!(image.write_u32(4, 0x1234_5678).is_err());
        assert_eq!(image.as_bytes(), &[0xAA; 6]);
    }

    #[test]
    fn test_ptr_round_trip() {
        let mut image = RomImage::new(vec![0; 0x40]);

        image.write_ptr(0x10, 0x24).unwrap();

        assert_eq!(image.read_u32(0x10), Ok(0x0800_0024));
        assert_eq!(image.read_ptr(0x10), Ok(0x24));
    }

    #[test]
    fn test_write_ptr_past_image_end() {
        let mut image = RomImage::new(vec![0; 0x40]);

        assert_eq!(
            image.write_ptr(0x10, 0x40),
            Err(RomError::UnmappableOffset {
                offset: 0x40,
                len: 0x40
            })
        );
        assert_eq!(image.read_u32(0x10), Ok(0));
    }
}
