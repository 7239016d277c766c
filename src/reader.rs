// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Forward-only cursor over a compiled terminfo buffer

use crate::parse::Error;

/// Sequential reader that never short-reads
///
/// Every read either returns exactly the requested number of bytes or fails
/// with [`Error::Truncated`], leaving the position unchanged.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes consumed so far
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Borrow the next `count` bytes and advance past them
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], Error> {
        let end = self.position.checked_add(count);
        let Some(bytes) = end.and_then(|end| self.buffer.get(self.position..end)) else {
            return Err(Error::Truncated {
                offset: self.position,
                needed: count,
                available: self.remaining(),
            });
        };
        self.position += count;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    pub fn read_le16(&mut self) -> Result<u16, Error> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_le32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a number stored as 2 or 4 bytes, sign-extending the short form
    pub fn read_number(&mut self, width: NumberWidth) -> Result<i32, Error> {
        match width {
            NumberWidth::Short => Ok(i32::from(self.read_le16()? as i16)),
            NumberWidth::Long => self.read_le32(),
        }
    }

    /// Skip one byte if the position is odd
    pub fn align(&mut self) -> Result<(), Error> {
        if self.position & 1 == 1 {
            self.read_bytes(1)?;
        }
        Ok(())
    }
}

/// Storage size of numeric capabilities, selected by the header magic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberWidth {
    /// Legacy format, 16-bit numbers
    Short,
    /// Extended number format, 32-bit numbers
    Long,
}

impl NumberWidth {
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Short => 2,
            Self::Long => 4,
        }
    }
}
