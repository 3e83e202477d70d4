// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Structured access to the fixed layout tables of a Metroid Fusion ROM image.

pub mod rom;
pub mod table;
pub mod tables;
pub mod tileset;

/// Size in bytes of a little-endian GBA word.
pub(crate) const WORD_SIZE: usize = 4;

#[cfg(test)]
/// Route the `log` output of the crate to the test harness.
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
