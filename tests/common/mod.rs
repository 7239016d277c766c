//! Minimal terminfo compiler for building test entries

#![allow(dead_code)]

use termproto::{BooleanCap, NumberCap, StringCap};

const ABSENT: i16 = -1;
const CANCELLED: i16 = -2;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    Absent,
    Cancelled,
    Value(Vec<u8>),
}

#[derive(Clone, Debug, Default)]
pub struct EntryBuilder {
    names: String,
    long_numbers: bool,
    booleans: Vec<u8>,
    numbers: Vec<i32>,
    strings: Vec<Slot>,
    ext_booleans: Vec<(String, u8)>,
    ext_numbers: Vec<(String, i32)>,
    ext_strings: Vec<(String, Slot)>,
}

fn set<T: Clone>(values: &mut Vec<T>, index: usize, value: T, fill: T) {
    if values.len() <= index {
        values.resize(index + 1, fill);
    }
    values[index] = value;
}

fn push16(buffer: &mut Vec<u8>, value: i16) {
    buffer.extend(value.to_le_bytes());
}

fn push_count(buffer: &mut Vec<u8>, value: usize) {
    push16(buffer, i16::try_from(value).unwrap());
}

/// Offsets and contents of a string table
fn string_table<'a>(slots: impl Iterator<Item = &'a Slot>) -> (Vec<i16>, Vec<u8>) {
    let mut offsets = Vec::new();
    let mut table = Vec::new();
    for slot in slots {
        match slot {
            Slot::Absent => offsets.push(ABSENT),
            Slot::Cancelled => offsets.push(CANCELLED),
            Slot::Value(value) => {
                offsets.push(i16::try_from(table.len()).unwrap());
                table.extend(value);
                table.push(0);
            }
        }
    }
    (offsets, table)
}

fn align(buffer: &mut Vec<u8>) {
    if buffer.len() % 2 == 1 {
        buffer.push(0);
    }
}

impl EntryBuilder {
    pub fn new(names: &str) -> Self {
        Self {
            names: names.to_owned(),
            ..Self::default()
        }
    }

    /// Use the format with 32-bit numbers
    pub fn long_numbers(mut self) -> Self {
        self.long_numbers = true;
        self
    }

    pub fn boolean(mut self, cap: BooleanCap, value: bool) -> Self {
        set(&mut self.booleans, cap.index(), u8::from(value), 0);
        self
    }

    /// Store a raw boolean byte
    pub fn boolean_byte(mut self, cap: BooleanCap, value: u8) -> Self {
        set(&mut self.booleans, cap.index(), value, 0);
        self
    }

    pub fn number(mut self, cap: NumberCap, value: i32) -> Self {
        set(&mut self.numbers, cap.index(), value, -1);
        self
    }

    pub fn string(mut self, cap: StringCap, value: &[u8]) -> Self {
        set(&mut self.strings, cap.index(), Slot::Value(value.to_vec()), Slot::Absent);
        self
    }

    pub fn cancel_string(mut self, cap: StringCap) -> Self {
        set(&mut self.strings, cap.index(), Slot::Cancelled, Slot::Absent);
        self
    }

    pub fn ext_boolean(mut self, name: &str, value: bool) -> Self {
        self.ext_booleans.push((name.to_owned(), u8::from(value)));
        self
    }

    pub fn ext_number(mut self, name: &str, value: i32) -> Self {
        self.ext_numbers.push((name.to_owned(), value));
        self
    }

    pub fn ext_string(mut self, name: &str, value: &[u8]) -> Self {
        self.ext_strings
            .push((name.to_owned(), Slot::Value(value.to_vec())));
        self
    }

    pub fn ext_absent_string(mut self, name: &str) -> Self {
        self.ext_strings.push((name.to_owned(), Slot::Absent));
        self
    }

    /// Same entry without the extended section
    pub fn without_extended(&self) -> Self {
        Self {
            ext_booleans: Vec::new(),
            ext_numbers: Vec::new(),
            ext_strings: Vec::new(),
            ..self.clone()
        }
    }

    fn push_number(&self, buffer: &mut Vec<u8>, value: i32) {
        if self.long_numbers {
            buffer.extend(value.to_le_bytes());
        } else {
            push16(buffer, i16::try_from(value).unwrap());
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let magic: i16 = if self.long_numbers { 0o1036 } else { 0o432 };
        let names = format!("{}\0", self.names);
        let (offsets, table) = string_table(self.strings.iter());

        push16(&mut buffer, magic);
        push_count(&mut buffer, names.len());
        push_count(&mut buffer, self.booleans.len());
        push_count(&mut buffer, self.numbers.len());
        push_count(&mut buffer, offsets.len());
        push_count(&mut buffer, table.len());
        buffer.extend(names.as_bytes());
        buffer.extend(&self.booleans);
        align(&mut buffer);
        for &number in &self.numbers {
            self.push_number(&mut buffer, number);
        }
        for offset in offsets {
            push16(&mut buffer, offset);
        }
        buffer.extend(table);

        if self.ext_booleans.is_empty()
            && self.ext_numbers.is_empty()
            && self.ext_strings.is_empty()
        {
            return buffer;
        }

        let (value_offsets, values) = string_table(self.ext_strings.iter().map(|(_, slot)| slot));
        let names: Vec<Slot> = self
            .ext_booleans
            .iter()
            .map(|(name, _)| name)
            .chain(self.ext_numbers.iter().map(|(name, _)| name))
            .chain(self.ext_strings.iter().map(|(name, _)| name))
            .map(|name| Slot::Value(name.as_bytes().to_vec()))
            .collect();
        let (name_offsets, name_table) = string_table(names.iter());

        align(&mut buffer);
        push_count(&mut buffer, self.ext_booleans.len());
        push_count(&mut buffer, self.ext_numbers.len());
        push_count(&mut buffer, self.ext_strings.len());
        push_count(&mut buffer, value_offsets.len() + name_offsets.len());
        push_count(&mut buffer, values.len() + name_table.len());
        buffer.extend(self.ext_booleans.iter().map(|(_, value)| *value));
        align(&mut buffer);
        for &(_, number) in &self.ext_numbers {
            self.push_number(&mut buffer, number);
        }
        for offset in value_offsets.into_iter().chain(name_offsets) {
            push16(&mut buffer, offset);
        }
        buffer.extend(values);
        buffer.extend(name_table);
        buffer
    }
}

/// `ansi` entry with the capabilities most tests look at
pub fn ansi() -> EntryBuilder {
    EntryBuilder::new("ansi|ansi/pc-term compatible with color")
        .boolean(BooleanCap::AutoRightMargin, true)
        .boolean(BooleanCap::MoveStandoutMode, true)
        .number(NumberCap::Columns, 80)
        .number(NumberCap::Lines, 24)
        .number(NumberCap::MaxColors, 8)
        .number(NumberCap::MaxPairs, 64)
        .string(StringCap::Bell, b"\x07")
        .string(StringCap::ClearScreen, b"\x1b[H\x1b[J")
        .string(StringCap::CursorAddress, b"\x1b[%i%p1%d;%p2%dH")
        .string(StringCap::EnterBoldMode, b"\x1b[1m")
        .string(StringCap::SetAForeground, b"\x1b[3%p1%dm")
}
