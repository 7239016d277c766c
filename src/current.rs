// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Process-wide current terminal description
//!
//! Applications that prefer not to pass a [`TermInfoDesc`] around can
//! install one here at startup. The description can be set only once.

use std::sync::OnceLock;

use crate::{
    caps::StringCap,
    desc::{LoadError, TermInfoDesc},
};

static CURRENT: OnceLock<TermInfoDesc> = OnceLock::new();

/// Install `desc` as the current description
///
/// Returns `desc` back if a description has already been installed.
pub fn set(desc: TermInfoDesc) -> Result<(), TermInfoDesc> {
    CURRENT.set(desc)
}

#[must_use]
pub fn get() -> Option<&'static TermInfoDesc> {
    CURRENT.get()
}

/// Current description, loading it for `$TERM` if none is installed
pub fn get_or_load() -> Result<&'static TermInfoDesc, LoadError> {
    if let Some(desc) = CURRENT.get() {
        return Ok(desc);
    }
    let desc = TermInfoDesc::load_from_env()?;
    Ok(CURRENT.get_or_init(|| desc))
}

/// Sequence turning on bold text, empty if unknown
#[must_use]
pub fn bold() -> &'static [u8] {
    get()
        .and_then(|desc| desc.get_string(StringCap::EnterBoldMode))
        .unwrap_or_default()
}
