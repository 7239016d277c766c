// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal protocol layer: terminfo database reader, parameterized string
//! expansion and control sequence recognition
//!
//! ```no_run
//! use termproto::{ExpandContext, Parameter, StringCap, TermInfoDesc};
//!
//! let desc = TermInfoDesc::load("xterm")?;
//! let mut context = ExpandContext::new();
//! let params = [Parameter::from(4), Parameter::from(9)];
//! if let Some(sequence) = desc.expand(StringCap::CursorAddress, &mut context, &params)? {
//!     termproto::padding::write(&mut std::io::stdout(), &sequence)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod caps;
pub mod current;
pub mod desc;
pub mod expand;
pub mod locate;
pub mod padding;
pub mod parse;
pub mod reader;
pub mod sequences;
pub mod table;
pub mod template;

pub use caps::{BooleanCap, CapabilityKind, NumberCap, StringCap};
pub use desc::{Capability, CapabilityValue, Extended, LoadError, TermInfoDesc};
pub use expand::{ExpandContext, Parameter};
pub use locate::{locate, search_directories};
pub use parse::parse;
pub use sequences::SequenceKind;
pub use template::{ParameterInfo, ParameterKind, Signature, Template};
