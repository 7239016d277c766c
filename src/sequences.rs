// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Recognizing terminal control sequences in text
//!
//! Sequences are classified by their introducer. Both the 7-bit forms
//! (`ESC [`) and the single character C1 forms (U+009B) are recognized.

use std::{borrow::Cow, ops::Range, sync::OnceLock};

use bitflags::bitflags;
use regex::{NoExpand, Regex};

bitflags! {
    /// Categories of control sequences
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SequenceKind: u8 {
        /// Control Sequence Introducer, e.g. `ESC [ 3 1 m`
        const CSI = 0b0000_0001;
        /// Operating System Command, terminated by BEL or ST
        const OSC = 0b0000_0010;
        /// Other escape sequences: charsets, DEC line attributes, modes
        const ESC = 0b0000_0100;
        /// Application Program Command
        const APC = 0b0000_1000;
        /// Device Control String
        const DCS = 0b0001_0000;
        /// Privacy Message
        const PM  = 0b0010_0000;
        /// 7-bit forms of single C1 controls, e.g. `ESC D` (IND)
        const C1  = 0b0100_0000;
    }
}

/// Group name and pattern of each kind, in alternation order
const PATTERNS: [(SequenceKind, &str, &str); 7] = [
    (
        SequenceKind::OSC,
        "osc",
        r"(?:\x1b\]|\x{9d})[^\x07\x1b\x{9c}]*(?:\x07|\x1b\\|\x{9c})",
    ),
    (
        SequenceKind::DCS,
        "dcs",
        r"(?:\x1bP|\x{90})[^\x1b\x{9c}]*(?:\x1b\\|\x{9c})",
    ),
    (
        SequenceKind::APC,
        "apc",
        r"(?:\x1b_|\x{9f})[^\x1b\x{9c}]*(?:\x1b\\|\x{9c})",
    ),
    (
        SequenceKind::PM,
        "pm",
        r"(?:\x1b\^|\x{9e})[^\x1b\x{9c}]*(?:\x1b\\|\x{9c})",
    ),
    (
        SequenceKind::CSI,
        "csi",
        r"(?:\x1b\[|\x{9b})[\x30-\x3f]*[\x20-\x2f]*[\x40-\x7e]",
    ),
    (
        SequenceKind::ESC,
        "esc",
        r#"\x1b(?: [FGLMN]|#[3-8]|%[@G]|[()*+\-./][%&"]?[0-9A-Za-z<=>@`]|[6-9=>Fcl-o|}~])"#,
    ),
    (SequenceKind::C1, "c1", r"\x1b[DEHMNOVWXZ]"),
];

/// Compiled matchers, indexed by the bits of the kinds they recognize
static MATCHERS: [OnceLock<Regex>; 128] = [const { OnceLock::new() }; 128];

impl SequenceKind {
    /// Pattern recognizing sequences of any of these kinds
    ///
    /// Returns `None` for the empty set. Bits outside the defined kinds
    /// are ignored.
    #[must_use]
    pub fn regex(self) -> Option<&'static Regex> {
        let kinds = self & Self::all();
        if kinds.is_empty() {
            return None;
        }
        let matcher = MATCHERS[usize::from(kinds.bits())].get_or_init(|| {
            let pattern = PATTERNS
                .iter()
                .filter(|(kind, ..)| kinds.contains(*kind))
                .map(|(_, name, pattern)| format!("(?P<{name}>{pattern})"))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&pattern).expect("Invalid control sequence regex")
        });
        Some(matcher)
    }
}

/// Control sequence found in a text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceMatch<'t> {
    pub kind: SequenceKind,
    /// Byte range in the searched text
    pub range: Range<usize>,
    pub text: &'t str,
}

/// Iterate over the sequences of the given kinds, left to right
pub fn find_iter(text: &str, kinds: SequenceKind) -> impl Iterator<Item = SequenceMatch<'_>> {
    kinds.regex().into_iter().flat_map(move |regex| {
        regex.captures_iter(text).filter_map(|captures| {
            PATTERNS.iter().find_map(|(kind, name, _)| {
                let found = captures.name(name)?;
                Some(SequenceMatch {
                    kind: *kind,
                    range: found.range(),
                    text: found.as_str(),
                })
            })
        })
    })
}

#[must_use]
pub fn matches(text: &str, kinds: SequenceKind) -> Vec<SequenceMatch<'_>> {
    find_iter(text, kinds).collect()
}

#[must_use]
pub fn is_match(text: &str, kinds: SequenceKind) -> bool {
    kinds.regex().is_some_and(|regex| regex.is_match(text))
}

/// Replace every sequence of the given kinds with `replacement`
#[must_use]
pub fn filter<'t>(text: &'t str, replacement: &str, kinds: SequenceKind) -> Cow<'t, str> {
    match kinds.regex() {
        Some(regex) => regex.replace_all(text, NoExpand(replacement)),
        None => Cow::Borrowed(text),
    }
}

/// Remove every sequence of the given kinds
#[must_use]
pub fn strip(text: &str, kinds: SequenceKind) -> Cow<'_, str> {
    filter(text, "", kinds)
}

/// Text between the sequences, including empty pieces between adjacent ones
#[must_use]
pub fn split(text: &str, kinds: SequenceKind) -> Vec<&str> {
    match kinds.regex() {
        Some(regex) => regex.split(text).collect(),
        None => vec![text],
    }
}

/// Kinds of sequences present in `text`
///
/// Each kind is checked on its own, so a CSI inside an OSC string is
/// reported too.
#[must_use]
pub fn detect(text: &str) -> SequenceKind {
    SequenceKind::all()
        .iter()
        .filter(|kind| is_match(text, *kind))
        .collect()
}
