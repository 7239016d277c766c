// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing compiled terminfo entries

use std::str;

use tracing::{debug, trace};

use crate::{
    caps::{BooleanCap, NumberCap, StringCap},
    desc::{Capability, CapabilityValue, Extended, TermInfoDesc},
    reader::{ByteReader, NumberWidth},
    table::StringTable,
};

/// Magic number of the legacy format with 16-bit numbers
const MAGIC_SHORT: u16 = 0o432;
/// Magic number of the format with 32-bit numbers
const MAGIC_LONG: u16 = 0o1036;

/// Errors reported when parsing a terminfo file
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("Unknown magic number {0:#o}")]
    BadMagic(u16),
    #[error("Data truncated at offset {offset}: {needed} bytes needed, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("String without final NUL")]
    UnterminatedString,
    #[error("String offset {0} outside the string table")]
    InvalidOffset(usize),
    #[error("Unsupported terminfo format")]
    UnsupportedFormat,
    #[error("No terminal names")]
    EmptyNames,
    #[error("Invalid UTF-8 string")]
    Utf8(#[from] str::Utf8Error),
}

#[derive(Debug)]
struct Header {
    width: NumberWidth,
    name_size: usize,
    bool_count: usize,
    num_count: usize,
    str_count: usize,
    str_size: usize,
}

impl Header {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self, Error> {
        let width = match reader.read_le16()? {
            MAGIC_SHORT => NumberWidth::Short,
            MAGIC_LONG => NumberWidth::Long,
            magic => return Err(Error::BadMagic(magic)),
        };
        let mut fields = [0; 5];
        for field in &mut fields {
            *field = usize::from(reader.read_le16()?);
        }
        let [name_size, bool_count, num_count, str_count, str_size] = fields;
        if bool_count > BooleanCap::COUNT
            || num_count > NumberCap::COUNT
            || str_count > StringCap::COUNT
        {
            return Err(Error::UnsupportedFormat);
        }
        Ok(Self {
            width,
            name_size,
            bool_count,
            num_count,
            str_count,
            str_size,
        })
    }
}

/// Parse a compiled terminfo entry
///
/// Both the 16-bit and the 32-bit number formats are accepted. The
/// extended section is parsed if present, and errors in it are reported
/// like errors in the standard sections.
pub fn parse(buffer: &[u8]) -> Result<TermInfoDesc, Error> {
    let mut reader = ByteReader::new(buffer);
    let header = Header::read(&mut reader)?;
    trace!(?header, "terminfo header");

    let names = read_names(&mut reader, header.name_size)?;
    let booleans = read_booleans(&mut reader, header.bool_count)?;
    reader.align()?;
    let numbers = read_numbers(&mut reader, header.num_count, header.width)?;
    let offsets = reader.read_bytes(2 * header.str_count)?;
    let data = reader.read_bytes(header.str_size)?;
    let strings = StringTable::new(offsets, data).take(header.str_count)?;

    if !reader.is_eof() {
        reader.align()?;
    }
    let extended = if reader.is_eof() {
        Extended::default()
    } else {
        parse_extended(&mut reader, header.width)?
    };

    debug!(
        name = names[0].as_str(),
        booleans = header.bool_count,
        numbers = header.num_count,
        strings = header.str_count,
        extended = extended.len(),
        "parsed terminfo entry"
    );

    Ok(TermInfoDesc::new(
        names,
        standard(
            BooleanCap::ALL.iter().map(|cap| cap.short_name()),
            booleans,
            CapabilityValue::Boolean,
        ),
        standard(
            NumberCap::ALL.iter().map(|cap| cap.short_name()),
            numbers,
            CapabilityValue::Number,
        ),
        standard(
            StringCap::ALL.iter().map(|cap| cap.short_name()),
            owned(strings),
            CapabilityValue::String,
        ),
        extended,
    ))
}

/// Split the `|`-separated names, the last of which is usually a description
fn read_names(reader: &mut ByteReader<'_>, size: usize) -> Result<Vec<String>, Error> {
    let raw = reader.read_bytes(size)?;
    let raw = raw.split(|c| *c == b'\0').next().unwrap_or_default();
    let names: Vec<String> = str::from_utf8(raw)?
        .split('|')
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();
    if names.is_empty() {
        return Err(Error::EmptyNames);
    }
    Ok(names)
}

fn read_booleans(reader: &mut ByteReader<'_>, count: usize) -> Result<Vec<Option<bool>>, Error> {
    Ok(reader
        .read_bytes(count)?
        .iter()
        .map(|value| match *value as i8 {
            0 => Some(false),
            -1 | -2 => None,
            _ => Some(true),
        })
        .collect())
}

fn read_numbers(
    reader: &mut ByteReader<'_>,
    count: usize,
    width: NumberWidth,
) -> Result<Vec<Option<i32>>, Error> {
    (0..count)
        .map(|_| {
            let value = reader.read_number(width)?;
            Ok((value != -1 && value != -2).then_some(value))
        })
        .collect()
}

fn owned(strings: Vec<Option<&[u8]>>) -> Vec<Option<Vec<u8>>> {
    strings
        .into_iter()
        .map(|value| value.map(<[u8]>::to_vec))
        .collect()
}

/// Pair every predefined name with its value, absent past the end of `values`
fn standard<T>(
    names: impl Iterator<Item = &'static str>,
    values: Vec<Option<T>>,
    wrap: fn(Option<T>) -> CapabilityValue,
) -> Vec<Capability> {
    let mut values = values.into_iter();
    names
        .map(|name| Capability::new(name, wrap(values.next().flatten())))
        .collect()
}

/// Parse the section with user-defined capabilities
///
/// Value strings come first in the string table, followed by the names of
/// all extended booleans, numbers and strings, in that order.
fn parse_extended(reader: &mut ByteReader<'_>, width: NumberWidth) -> Result<Extended, Error> {
    let bool_count = usize::from(reader.read_le16()?);
    let num_count = usize::from(reader.read_le16()?);
    let str_count = usize::from(reader.read_le16()?);
    let _item_count = reader.read_le16()?;
    let table_size = usize::from(reader.read_le16()?);
    trace!(bool_count, num_count, str_count, table_size, "extended header");

    let booleans = read_booleans(reader, bool_count)?;
    reader.align()?;
    let numbers = read_numbers(reader, num_count, width)?;
    let name_count = bool_count + num_count + str_count;
    let offsets = reader.read_bytes(2 * (str_count + name_count))?;
    let data = reader.read_bytes(table_size)?;

    let mut table = StringTable::new(offsets, data);
    let strings = table.take(str_count)?;
    table.rebase();

    let mut named = |values: Vec<CapabilityValue>| -> Result<Vec<Capability>, Error> {
        let names = table.take(values.len())?;
        names
            .into_iter()
            .zip(values)
            .map(|(name, value)| {
                let name = name.ok_or(Error::UnsupportedFormat)?;
                Ok(Capability::new(str::from_utf8(name)?.to_owned(), value))
            })
            .collect()
    };
    let booleans = named(booleans.into_iter().map(CapabilityValue::Boolean).collect())?;
    let numbers = named(numbers.into_iter().map(CapabilityValue::Number).collect())?;
    let strings = named(
        owned(strings)
            .into_iter()
            .map(CapabilityValue::String)
            .collect(),
    )?;
    Ok(Extended::new(booleans, numbers, strings))
}
