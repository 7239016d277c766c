// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Print the capabilities of a terminfo entry

use std::{
    fmt::Write as _,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use termproto::{BooleanCap, CapabilityKind, CapabilityValue, NumberCap, StringCap, TermInfoDesc};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "terminfo-inspect")]
#[command(about = "Print the capabilities of a terminfo entry")]
#[command(version)]
struct Args {
    /// Terminal name, `$TERM` if neither a name nor a file is given
    #[arg(short, long, conflicts_with = "file")]
    name: Option<String>,

    /// Compiled terminfo file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log the database search and parsing
    #[arg(short, long)]
    verbose: bool,
}

struct Row {
    name: String,
    kind: CapabilityKind,
    value: String,
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::from_default_env().add_directive(format!("termproto={level}").parse()?);
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
    Ok(())
}

fn load(args: &Args) -> Result<TermInfoDesc> {
    if let Some(path) = &args.file {
        return TermInfoDesc::load_file(path)
            .with_context(|| format!("Cannot load {}", path.display()));
    }
    match &args.name {
        Some(name) => TermInfoDesc::load(name)
            .with_context(|| format!("Cannot load terminfo entry for {name}")),
        None => TermInfoDesc::load_from_env().context("Cannot load terminfo entry for $TERM"),
    }
}

/// Terminfo-style rendering of control characters
fn visible(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for &c in bytes {
        match c {
            0x1b => text.push_str("\\E"),
            b'\t' => text.push_str("\\t"),
            b'\r' => text.push_str("\\r"),
            b'\n' => text.push_str("\\n"),
            0x07 => text.push_str("\\a"),
            b'\\' => text.push_str("\\\\"),
            0..=0x1f => {
                text.push('^');
                text.push(char::from(c + 0x40));
            }
            0x7f => text.push_str("^?"),
            0x80.. => {
                let _ = write!(text, "\\x{c:02x}");
            }
            _ => text.push(char::from(c)),
        }
    }
    text
}

fn value_text(value: &CapabilityValue) -> Option<String> {
    match value {
        CapabilityValue::Boolean(value) => value.map(|value| value.to_string()),
        CapabilityValue::Number(value) => value.map(|value| value.to_string()),
        CapabilityValue::String(value) => value.as_deref().map(visible),
    }
}

fn extended_rows(desc: &TermInfoDesc) -> Vec<Row> {
    let extended = desc.extended();
    let mut rows = Vec::new();
    for kind in [CapabilityKind::Number, CapabilityKind::String, CapabilityKind::Boolean] {
        for cap in extended.iter().filter(|cap| cap.kind() == kind) {
            if let Some(value) = value_text(cap.value()) {
                rows.push(Row {
                    name: cap.name().to_owned(),
                    kind,
                    value,
                });
            }
        }
    }
    rows
}

fn standard_rows(desc: &TermInfoDesc) -> Vec<Row> {
    let mut rows = Vec::new();
    for &cap in NumberCap::ALL {
        if let Some(value) = desc.get_number(cap) {
            rows.push(Row {
                name: format!("{cap} ({})", cap.short_name()),
                kind: CapabilityKind::Number,
                value: value.to_string(),
            });
        }
    }
    for &cap in StringCap::ALL {
        if let Some(value) = desc.get_string(cap) {
            rows.push(Row {
                name: format!("{cap} ({})", cap.short_name()),
                kind: CapabilityKind::String,
                value: visible(value),
            });
        }
    }
    for &cap in BooleanCap::ALL {
        if let Some(value) = desc.get_boolean(cap) {
            rows.push(Row {
                name: format!("{cap} ({})", cap.short_name()),
                kind: CapabilityKind::Boolean,
                value: value.to_string(),
            });
        }
    }
    rows
}

fn write_table(out: &mut impl Write, title: &str, rows: &[Row]) -> io::Result<()> {
    let width = rows
        .iter()
        .map(|row| row.name.len())
        .chain([4])
        .max()
        .unwrap_or_default();
    writeln!(out, "{title}")?;
    writeln!(out, "{:<width$}  {:<7}  Value", "Name", "Type")?;
    for row in rows {
        writeln!(out, "{:<width$}  {:<7}  {}", row.name, row.kind, row.value)?;
    }
    writeln!(out)
}

fn print(desc: &TermInfoDesc, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Names: {}", desc.names().join(", "))?;
    writeln!(out, "Extended caps: {}", desc.extended().len())?;
    writeln!(out)?;
    if !desc.extended().is_empty() {
        write_table(out, "Extended capabilities", &extended_rows(desc))?;
    }
    write_table(out, "Default capabilities", &standard_rows(desc))
}

fn run(args: &Args) -> Result<()> {
    init_logging(args.verbose)?;
    let desc = load(args)?;
    debug!(name = desc.name(), "loaded terminal description");
    print(&desc, &mut io::stdout().lock())?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("terminfo-inspect: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
