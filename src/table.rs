// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Packed string tables
//!
//! A compiled terminfo entry stores its strings as an array of 16-bit offsets
//! followed by a blob of NUL-terminated strings. [`StringTable`] walks the
//! offset array in order, so the extended section can read values first and
//! then continue with the capability names stored after them.

use crate::{parse::Error, reader::ByteReader};

const ABSENT_ENTRY: i16 = -1;
const CANCELED_ENTRY: i16 = -2;

/// Convert the absent and canceled markers to `None`
pub(crate) fn check_offset(raw: u16) -> Option<usize> {
    match raw as i16 {
        ABSENT_ENTRY | CANCELED_ENTRY => None,
        _ => Some(usize::from(raw)),
    }
}

/// Cursor over an offset array and the string data it points into
#[derive(Clone, Debug)]
pub struct StringTable<'a> {
    offsets: ByteReader<'a>,
    data: &'a [u8],
    /// End of the furthest string extracted from `data`, terminator included
    consumed: usize,
}

impl<'a> StringTable<'a> {
    /// `offsets` holds little-endian 16-bit offsets into `data`
    #[must_use]
    pub const fn new(offsets: &'a [u8], data: &'a [u8]) -> Self {
        Self {
            offsets: ByteReader::new(offsets),
            data,
            consumed: 0,
        }
    }

    /// Number of offsets not consumed yet
    #[must_use]
    pub const fn len(&self) -> usize {
        self.offsets.remaining() / 2
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extract the next `count` strings, `None` marking absent entries
    pub fn take(&mut self, count: usize) -> Result<Vec<Option<&'a [u8]>>, Error> {
        if count > self.len() {
            return Err(Error::UnsupportedFormat);
        }
        (0..count).map(|_| self.next_string()).collect()
    }

    /// Continue with the data following the strings extracted so far
    ///
    /// Later offsets are interpreted relative to the new start.
    pub fn rebase(&mut self) {
        self.data = self.data.get(self.consumed..).unwrap_or_default();
        self.consumed = 0;
    }

    fn next_string(&mut self) -> Result<Option<&'a [u8]>, Error> {
        let Some(offset) = check_offset(self.offsets.read_le16()?) else {
            return Ok(None);
        };
        let Some(tail) = self.data.get(offset..) else {
            return Err(Error::InvalidOffset(offset));
        };
        let Some(length) = tail.iter().position(|c| *c == b'\0') else {
            return Err(Error::UnterminatedString);
        };
        self.consumed = self.consumed.max(offset + length + 1);
        Ok(Some(&tail[..length]))
    }
}
