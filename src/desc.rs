// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal descriptions and capability lookup

use std::{
    borrow::Cow,
    env,
    ffi::OsStr,
    fs,
    io::{self, Read},
    path::Path,
};

use tracing::debug;

use crate::{
    caps::{BooleanCap, CapabilityKind, NumberCap, StringCap},
    expand::{self, ExpandContext, Parameter},
    locate::{self, locate},
    parse::{self, parse},
    template::{ParameterInfo, Template},
};

/// Errors reported when loading a terminal description
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LoadError {
    #[error("TERM is not set")]
    NoTerminal,
    #[error(transparent)]
    Locate(#[from] locate::Error),
    #[error(transparent)]
    Parse(#[from] parse::Error),
    #[error("Failed to read terminfo file")]
    Io(#[from] io::Error),
}

/// Value of a capability, `None` when absent or cancelled
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CapabilityValue {
    Boolean(Option<bool>),
    Number(Option<i32>),
    String(Option<Vec<u8>>),
}

impl CapabilityValue {
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        match self {
            Self::Boolean(_) => CapabilityKind::Boolean,
            Self::Number(_) => CapabilityKind::Number,
            Self::String(_) => CapabilityKind::String,
        }
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        match self {
            Self::Boolean(value) => value.is_some(),
            Self::Number(value) => value.is_some(),
            Self::String(value) => value.is_some(),
        }
    }
}

/// Named capability value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capability {
    name: Cow<'static, str>,
    value: CapabilityValue,
}

impl Capability {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>, value: CapabilityValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Short terminfo name, e.g. `cup` or `kUP`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        self.value.kind()
    }

    #[must_use]
    pub const fn value(&self) -> &CapabilityValue {
        &self.value
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self.value {
            CapabilityValue::Boolean(value) => value,
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i32> {
        match self.value {
            CapabilityValue::Number(value) => value,
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.value {
            CapabilityValue::String(value) => value.as_deref(),
            _ => None,
        }
    }

    /// String value, or an error for booleans and numbers
    fn template_source(&self) -> Result<Option<&[u8]>, expand::Error> {
        match &self.value {
            CapabilityValue::String(value) => Ok(value.as_deref()),
            value => Err(expand::Error::NotAString {
                name: self.name.to_string(),
                kind: value.kind(),
            }),
        }
    }

    /// Elements of the string template, empty if the string is absent
    pub fn parameters(&self) -> Result<Vec<ParameterInfo>, expand::Error> {
        match self.template_source()? {
            Some(source) => Ok(Template::compile(source)?.parameters()),
            None => Ok(Vec::new()),
        }
    }

    /// Expand the string template, `None` if the string is absent
    pub fn expand(
        &self,
        context: &mut ExpandContext,
        params: &[Parameter],
    ) -> Result<Option<Vec<u8>>, expand::Error> {
        self.template_source()?
            .map(|source| context.expand(source, params))
            .transpose()
    }
}

fn find<'a>(caps: &'a [Capability], name: &str) -> Option<&'a Capability> {
    caps.iter().find(|cap| cap.name() == name)
}

/// User-defined capabilities, looked up by case-sensitive name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extended {
    booleans: Vec<Capability>,
    numbers: Vec<Capability>,
    strings: Vec<Capability>,
}

impl Extended {
    pub(crate) const fn new(
        booleans: Vec<Capability>,
        numbers: Vec<Capability>,
        strings: Vec<Capability>,
    ) -> Self {
        Self {
            booleans,
            numbers,
            strings,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.booleans.len() + self.numbers.len() + self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Capability> {
        find(&self.booleans, name)
            .or_else(|| find(&self.numbers, name))
            .or_else(|| find(&self.strings, name))
    }

    #[must_use]
    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        find(&self.booleans, name)?.as_bool()
    }

    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<i32> {
        find(&self.numbers, name)?.as_number()
    }

    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<&[u8]> {
        find(&self.strings, name)?.as_bytes()
    }

    /// Names of the capabilities of one kind, in file order
    pub fn names(&self, kind: CapabilityKind) -> impl Iterator<Item = &str> {
        let caps = match kind {
            CapabilityKind::Boolean => &self.booleans,
            CapabilityKind::Number => &self.numbers,
            CapabilityKind::String => &self.strings,
        };
        caps.iter().map(Capability::name)
    }

    /// All capabilities: booleans, then numbers, then strings
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.booleans
            .iter()
            .chain(&self.numbers)
            .chain(&self.strings)
    }
}

/// Parsed terminal description
///
/// Immutable once loaded. Standard capabilities are stored in file order,
/// one entry per predefined capability, so lookups are by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermInfoDesc {
    names: Vec<String>,
    booleans: Vec<Capability>,
    numbers: Vec<Capability>,
    strings: Vec<Capability>,
    extended: Extended,
}

impl TermInfoDesc {
    pub(crate) const fn new(
        names: Vec<String>,
        booleans: Vec<Capability>,
        numbers: Vec<Capability>,
        strings: Vec<Capability>,
        extended: Extended,
    ) -> Self {
        Self {
            names,
            booleans,
            numbers,
            strings,
            extended,
        }
    }

    /// Load by terminal name, or from a file if `name` is a path
    pub fn load(name: impl AsRef<OsStr>) -> Result<Self, LoadError> {
        let name = name.as_ref();
        let path = Path::new(name);
        if path.components().nth(1).is_some() {
            return Self::load_file(path);
        }
        Self::load_file(locate(name)?)
    }

    /// Load the description of the terminal named by `$TERM`
    pub fn load_from_env() -> Result<Self, LoadError> {
        let name = env::var_os("TERM")
            .filter(|name| !name.is_empty())
            .ok_or(LoadError::NoTerminal)?;
        Self::load(name)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading terminfo file");
        let buffer = fs::read(path)?;
        Ok(parse(&buffer)?)
    }

    /// Load from an open stream, reading it to the end
    pub fn load_from_reader(mut reader: impl Read) -> Result<Self, LoadError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(parse(&buffer)?)
    }

    pub fn from_bytes(buffer: &[u8]) -> Result<Self, parse::Error> {
        parse(buffer)
    }

    /// Terminal names, the last one usually being a description
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Primary terminal name
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn get_boolean(&self, cap: BooleanCap) -> Option<bool> {
        self.booleans.get(cap.index())?.as_bool()
    }

    #[must_use]
    pub fn get_number(&self, cap: NumberCap) -> Option<i32> {
        self.numbers.get(cap.index())?.as_number()
    }

    #[must_use]
    pub fn get_string(&self, cap: StringCap) -> Option<&[u8]> {
        self.strings.get(cap.index())?.as_bytes()
    }

    /// String capability with its metadata
    #[must_use]
    pub fn string_capability(&self, cap: StringCap) -> Option<&Capability> {
        self.strings.get(cap.index())
    }

    /// Expand a string capability, `None` if it is absent
    pub fn expand(
        &self,
        cap: StringCap,
        context: &mut ExpandContext,
        params: &[Parameter],
    ) -> Result<Option<Vec<u8>>, expand::Error> {
        match self.string_capability(cap) {
            Some(capability) => capability.expand(context, params),
            None => Ok(None),
        }
    }

    /// Boolean capabilities that are present
    pub fn booleans(&self) -> impl Iterator<Item = &Capability> {
        present(&self.booleans)
    }

    /// Numeric capabilities that are present
    pub fn numbers(&self) -> impl Iterator<Item = &Capability> {
        present(&self.numbers)
    }

    /// String capabilities that are present
    pub fn strings(&self) -> impl Iterator<Item = &Capability> {
        present(&self.strings)
    }

    #[must_use]
    pub const fn extended(&self) -> &Extended {
        &self.extended
    }
}

fn present(caps: &[Capability]) -> impl Iterator<Item = &Capability> {
    caps.iter().filter(|cap| cap.value().is_present())
}
