// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Padding markers in expanded sequences
//!
//! Terminfo strings may contain `$<5>`, `$<2.5*>` or `$<20/>` to request a
//! delay (in milliseconds) after the preceding output. [`ExpandContext`]
//! leaves them in place, and this module separates them from the bytes to
//! be sent.
//!
//! [`ExpandContext`]: crate::ExpandContext

use std::{io, io::Write, thread, time::Duration};

/// Errors reported for malformed padding markers
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Padding marker at offset {0} is not terminated")]
    Unterminated(usize),
    #[error("Unexpected {found:?} in padding marker at offset {offset}")]
    InvalidCharacter { offset: usize, found: char },
    #[error("Padding marker at offset {0} has no delay value")]
    MissingDelay(usize),
    #[error("Padding delay too large")]
    DelayOverflow,
    #[error("Failed to write sequence")]
    Io(#[from] io::Error),
}

/// Bytes to be written, followed by a pause
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub bytes: &'a [u8],
    pub delay: Duration,
}

/// Split `sequence` at its padding markers
///
/// The `*` (proportional) and `/` (mandatory) flags are accepted and have
/// no effect on the delay. Only the first digit after a decimal point is
/// significant.
pub fn split(sequence: &[u8]) -> Result<Vec<Chunk<'_>>, Error> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while let Some(marker) = find_marker(sequence, start) {
        let (delay, end) = parse_marker(sequence, marker)?;
        chunks.push(Chunk {
            bytes: &sequence[start..marker],
            delay,
        });
        start = end;
    }
    if start < sequence.len() {
        chunks.push(Chunk {
            bytes: &sequence[start..],
            delay: Duration::ZERO,
        });
    }
    Ok(chunks)
}

/// Sequence with the padding markers removed
pub fn strip(sequence: &[u8]) -> Result<Vec<u8>, Error> {
    Ok(split(sequence)?
        .into_iter()
        .flat_map(|chunk| chunk.bytes.iter().copied())
        .collect())
}

/// Write `sequence`, sleeping where padding is requested
///
/// Nothing is written if any marker is malformed.
pub fn write(writer: &mut impl Write, sequence: &[u8]) -> Result<(), Error> {
    write_with(writer, sequence, thread::sleep)
}

/// Like [`write`], calling `pause` instead of sleeping
pub fn write_with(
    writer: &mut impl Write,
    sequence: &[u8],
    mut pause: impl FnMut(Duration),
) -> Result<(), Error> {
    for chunk in split(sequence)? {
        writer.write_all(chunk.bytes)?;
        if !chunk.delay.is_zero() {
            writer.flush()?;
            pause(chunk.delay);
        }
    }
    Ok(())
}

fn find_marker(sequence: &[u8], from: usize) -> Option<usize> {
    sequence
        .get(from..)?
        .windows(2)
        .position(|pair| pair == b"$<")
        .map(|index| from + index)
}

/// Delay requested by the marker at `at` and the offset following it
fn parse_marker(sequence: &[u8], at: usize) -> Result<(Duration, usize), Error> {
    let body_start = at + 2;
    let body = &sequence[body_start..];
    let Some(length) = body.iter().position(|c| *c == b'>') else {
        return Err(Error::Unterminated(at));
    };

    let mut millis: u32 = 0;
    let mut tenths: Option<u32> = None;
    let mut fraction = false;
    let mut has_digits = false;
    for (index, &c) in body[..length].iter().enumerate() {
        match c {
            b'0'..=b'9' if fraction => {
                tenths.get_or_insert(u32::from(c - b'0'));
                has_digits = true;
            }
            b'0'..=b'9' => {
                millis = millis
                    .checked_mul(10)
                    .and_then(|millis| millis.checked_add(u32::from(c - b'0')))
                    .ok_or(Error::DelayOverflow)?;
                has_digits = true;
            }
            b'.' if !fraction => fraction = true,
            b'*' | b'/' => {}
            _ => {
                return Err(Error::InvalidCharacter {
                    offset: body_start + index,
                    found: c as char,
                });
            }
        }
    }
    if !has_digits {
        return Err(Error::MissingDelay(at));
    }

    let micros = u64::from(millis) * 1000 + u64::from(tenths.unwrap_or(0)) * 100;
    Ok((Duration::from_micros(micros), body_start + length + 1))
}
