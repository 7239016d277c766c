mod common;

use std::{fs, io::Cursor};

use collection_literals::collection;
use common::{EntryBuilder, ansi};
use pretty_assertions::assert_eq;
use termproto::{
    BooleanCap, CapabilityKind, ExpandContext, LoadError, NumberCap, Parameter, StringCap,
    TermInfoDesc, parse, parse::Error,
};

fn eterm() -> EntryBuilder {
    EntryBuilder::new("Eterm|Eterm-color|Eterm with xterm-style color support")
        .boolean(BooleanCap::AutoRightMargin, true)
        .number(NumberCap::MaxColors, 8)
        .string(StringCap::ClearScreen, b"\x1b[H\x1b[2J")
        .ext_boolean("AX", true)
        .ext_boolean("XT", true)
        .ext_number("U8", 0)
        .ext_string("kDN", b"\x1b[b")
        .ext_string("kUP", b"\x1b[a")
        .ext_absent_string("Ss")
        .ext_string("kLFT5", b"\x1bOd")
}

fn linux() -> EntryBuilder {
    EntryBuilder::new("linux|Linux console")
        .boolean(BooleanCap::AutoRightMargin, true)
        .number(NumberCap::MaxColors, 8)
        .ext_boolean("AX", true)
        .ext_boolean("G0", true)
        .ext_number("U8", 1)
}

#[test]
fn ansi_capabilities() {
    let desc = parse(&ansi().build()).unwrap();
    assert_eq!(desc.names(), ["ansi", "ansi/pc-term compatible with color"]);
    assert_eq!(desc.name(), "ansi");
    assert_eq!(desc.get_string(StringCap::ClearScreen), Some(&b"\x1b[H\x1b[J"[..]));
    assert_eq!(desc.get_number(NumberCap::MaxColors), Some(8));
    assert_eq!(desc.get_number(NumberCap::Columns), Some(80));
    assert_eq!(desc.get_boolean(BooleanCap::AutoRightMargin), Some(true));
    assert_eq!(desc.get_boolean(BooleanCap::AutoLeftMargin), Some(false));
    assert_eq!(desc.get_boolean(BooleanCap::BackspacesWithBs), None);
    assert_eq!(desc.get_number(NumberCap::LinesOfMemory), None);
    assert!(desc.extended().is_empty());
}

#[test]
fn ansi_cursor_address() {
    let desc = parse(&ansi().build()).unwrap();
    let mut context = ExpandContext::new();
    let params = [Parameter::from(0), Parameter::from(0)];
    assert_eq!(
        desc.expand(StringCap::CursorAddress, &mut context, &params)
            .unwrap(),
        Some(b"\x1b[1;1H".to_vec())
    );
    assert_eq!(
        desc.expand(StringCap::CursorHome, &mut context, &params)
            .unwrap(),
        None
    );
}

#[test]
fn present_capabilities_in_file_order() {
    let desc = parse(&ansi().build()).unwrap();
    let booleans: Vec<&str> = desc
        .booleans()
        .filter(|cap| cap.as_bool() == Some(true))
        .map(|cap| cap.name())
        .collect();
    assert_eq!(booleans, ["am", "msgr"]);
    let numbers: Vec<(&str, Option<i32>)> = desc
        .numbers()
        .map(|cap| (cap.name(), cap.as_number()))
        .collect();
    assert_eq!(
        numbers,
        [
            ("cols", Some(80)),
            ("lines", Some(24)),
            ("colors", Some(8)),
            ("pairs", Some(64)),
        ]
    );
    let strings: Vec<&str> = desc.strings().map(|cap| cap.name()).collect();
    assert_eq!(strings, ["bel", "clear", "cup", "bold", "setaf"]);
}

#[test]
fn color_depths() {
    let xterm = parse(&ansi().number(NumberCap::MaxColors, 256).build()).unwrap();
    assert_eq!(xterm.get_number(NumberCap::MaxColors), Some(256));
    let rxvt = parse(&ansi().number(NumberCap::MaxColors, 88).build()).unwrap();
    assert_eq!(rxvt.get_number(NumberCap::MaxColors), Some(88));
    let direct = parse(
        &ansi()
            .long_numbers()
            .number(NumberCap::MaxColors, 0x0100_0000)
            .number(NumberCap::MaxPairs, 0x0001_0000)
            .build(),
    )
    .unwrap();
    assert_eq!(direct.get_number(NumberCap::MaxColors), Some(0x0100_0000));
    assert_eq!(direct.get_number(NumberCap::MaxPairs), Some(0x0001_0000));
    assert_eq!(direct.get_number(NumberCap::Columns), Some(80));
}

#[test]
fn absent_and_cancelled() {
    let desc = parse(
        &ansi()
            .boolean_byte(BooleanCap::EatNewlineGlitch, 0xfe)
            .boolean_byte(BooleanCap::HardCopy, 2)
            .number(NumberCap::Lines, -2)
            .cancel_string(StringCap::Bell)
            .build(),
    )
    .unwrap();
    assert_eq!(desc.get_boolean(BooleanCap::EatNewlineGlitch), None);
    assert_eq!(desc.get_boolean(BooleanCap::HardCopy), Some(true));
    assert_eq!(desc.get_number(NumberCap::Lines), None);
    assert_eq!(desc.get_string(StringCap::Bell), None);
    assert_eq!(desc.get_string(StringCap::ClearScreen), Some(&b"\x1b[H\x1b[J"[..]));
}

#[test]
fn short_file_queries_beyond_end() {
    let desc = parse(
        &EntryBuilder::new("short")
            .boolean(BooleanCap::AutoRightMargin, true)
            .number(NumberCap::Columns, 40)
            .string(StringCap::BackTab, b"\x1b[Z")
            .build(),
    )
    .unwrap();
    assert_eq!(desc.get_boolean(BooleanCap::AutoRightMargin), Some(true));
    assert_eq!(desc.get_number(NumberCap::Columns), Some(40));
    assert_eq!(desc.get_string(StringCap::BackTab), Some(&b"\x1b[Z"[..]));
    assert_eq!(desc.get_boolean(BooleanCap::BackspacesWithBs), None);
    assert_eq!(desc.get_number(NumberCap::BitImageType), None);
    assert_eq!(desc.get_string(StringCap::BoxChars1), None);
}

#[test]
fn eterm_extended() {
    let desc = parse(&eterm().build()).unwrap();
    let extended = desc.extended();
    assert_eq!(extended.len(), 7);
    assert_eq!(extended.get_boolean("AX"), Some(true));
    assert_eq!(extended.get_boolean("XT"), Some(true));
    assert_eq!(extended.get_number("U8"), Some(0));
    assert_eq!(extended.get_string("kUP"), Some(&b"\x1b[a"[..]));
    assert_eq!(extended.get_string("kLFT5"), Some(&b"\x1bOd"[..]));
    assert_eq!(extended.get_string("Ss"), None);
    assert!(extended.get("Ss").is_some());
    assert_eq!(
        extended.names(CapabilityKind::String).collect::<Vec<_>>(),
        ["kDN", "kUP", "Ss", "kLFT5"]
    );
    assert_eq!(
        extended.names(CapabilityKind::Boolean).collect::<Vec<_>>(),
        ["AX", "XT"]
    );
    assert_eq!(desc.get_string(StringCap::ClearScreen), Some(&b"\x1b[H\x1b[2J"[..]));
}

#[test]
fn linux_extended_is_case_sensitive() {
    let desc = parse(&linux().build()).unwrap();
    let extended = desc.extended();
    assert_eq!(extended.get_boolean("AX"), Some(true));
    assert_eq!(extended.get_boolean("ax"), None);
    assert_eq!(extended.get_number("U8"), Some(1));
    assert_eq!(extended.get_number("u8"), None);
    assert_eq!(extended.get_string("AX"), None);
    assert_eq!(extended.get("nonexistent"), None);
}

#[test]
fn extended_with_long_numbers() {
    let desc = parse(&linux().long_numbers().ext_number("RGB", 0x00ff_ffff).build()).unwrap();
    assert_eq!(desc.extended().get_number("RGB"), Some(0x00ff_ffff));
    assert_eq!(desc.extended().get_number("U8"), Some(1));
}

#[test]
fn extended_names_by_kind() {
    let desc = parse(&linux().build()).unwrap();
    let names: std::collections::BTreeSet<&str> =
        desc.extended().iter().map(|cap| cap.name()).collect();
    assert_eq!(names, collection!("AX", "G0", "U8"));
}

#[test]
fn parse_is_deterministic() {
    let buffer = eterm().build();
    assert_eq!(parse(&buffer).unwrap(), parse(&buffer).unwrap());
}

#[test]
fn every_truncation_fails() {
    let buffer = ansi().build();
    for length in 0..buffer.len() {
        assert!(parse(&buffer[..length]).is_err(), "length {length}");
    }
}

#[test]
fn truncated_extended_section_fails() {
    let entry = eterm();
    let buffer = entry.build();
    let base = entry.without_extended().build().len();
    let start = base + base % 2;
    assert!(parse(&buffer[..base]).unwrap().extended().is_empty());
    for length in start + 1..buffer.len() {
        assert!(parse(&buffer[..length]).is_err(), "length {length}");
    }
}

#[test]
fn corrupted_offsets() {
    let mut buffer = EntryBuilder::new("x")
        .string(StringCap::BackTab, b"ab")
        .build();
    // Header, names "x\0", then the single string offset
    buffer[14] = 10;
    assert_eq!(parse(&buffer).unwrap_err(), Error::InvalidOffset(10));
    let mut buffer = EntryBuilder::new("x")
        .string(StringCap::BackTab, b"ab")
        .build();
    let last = buffer.len() - 1;
    buffer[last] = b'c';
    assert_eq!(parse(&buffer).unwrap_err(), Error::UnterminatedString);
}

#[test]
fn load_from_file_and_reader() {
    let buffer = ansi().build();
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("ansi");
    fs::write(&path, &buffer).unwrap();

    let from_file = TermInfoDesc::load_file(&path).unwrap();
    let from_path = TermInfoDesc::load(&path).unwrap();
    let from_reader = TermInfoDesc::load_from_reader(Cursor::new(&buffer)).unwrap();
    assert_eq!(from_file, from_path);
    assert_eq!(from_file, from_reader);
    assert_eq!(from_file, TermInfoDesc::from_bytes(&buffer).unwrap());
}

#[test]
fn load_by_name_from_search_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let leaf = temp_dir.path().join("l");
    fs::create_dir(&leaf).unwrap();
    fs::write(leaf.join("linux-test"), linux().build()).unwrap();

    temp_env::with_vars(
        [
            ("TERMINFO", Some(temp_dir.path().as_os_str())),
            ("TERMINFO_DIRS", None),
            ("TERM", Some(std::ffi::OsStr::new("linux-test"))),
        ],
        || {
            let desc = TermInfoDesc::load("linux-test").unwrap();
            assert_eq!(desc.name(), "linux");
            let desc = TermInfoDesc::load_from_env().unwrap();
            assert_eq!(desc.extended().get_number("U8"), Some(1));
        },
    );
}

#[test]
fn load_errors() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("garbage");
    fs::write(&path, b"not a terminfo file").unwrap();
    assert!(matches!(
        TermInfoDesc::load(&path),
        Err(LoadError::Parse(Error::BadMagic(_)))
    ));

    temp_env::with_vars(
        [
            ("TERMINFO", Some(temp_dir.path().as_os_str())),
            ("TERMINFO_DIRS", Some(temp_dir.path().as_os_str())),
        ],
        || {
            assert!(matches!(
                TermInfoDesc::load("termproto-no-such-terminal"),
                Err(LoadError::Locate(_))
            ));
        },
    );
}

#[test]
fn capability_metadata() {
    let desc = parse(&ansi().build()).unwrap();
    let cup = desc.string_capability(StringCap::CursorAddress).unwrap();
    assert_eq!(cup.name(), "cup");
    assert_eq!(cup.kind(), CapabilityKind::String);
    let representations: Vec<String> = cup
        .parameters()
        .unwrap()
        .into_iter()
        .map(|info| info.representation)
        .collect();
    assert_eq!(representations, ["%i", "%p1", "%d", "%p2", "%d"]);
}

#[test]
fn descriptions_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TermInfoDesc>();

    let desc = std::sync::Arc::new(parse(&ansi().build()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|row| {
            let desc = std::sync::Arc::clone(&desc);
            std::thread::spawn(move || {
                let mut context = ExpandContext::new();
                desc.expand(
                    StringCap::CursorAddress,
                    &mut context,
                    &[Parameter::from(row), Parameter::from(0)],
                )
                .unwrap()
                .unwrap()
            })
        })
        .collect();
    for (row, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("\x1b[{};1H", row + 1).into_bytes());
    }
}
