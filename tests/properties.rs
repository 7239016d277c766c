mod common;

use common::ansi;
use proptest::prelude::*;
use termproto::{ExpandContext, Parameter, SequenceKind, parse, sequences};

fn expand(cap: &[u8], params: &[Parameter]) -> Result<Vec<u8>, termproto::expand::Error> {
    ExpandContext::new().expand(cap, params)
}

proptest! {
    #[test]
    fn parse_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse(&bytes);
    }

    #[test]
    fn parse_corrupted_entry(index in 0usize..4096, value in any::<u8>()) {
        let mut buffer = ansi().build();
        let index = index % buffer.len();
        buffer[index] = value;
        let _ = parse(&buffer);
    }

    #[test]
    fn expand_arbitrary_template(
        cap in prop::collection::vec(any::<u8>(), 0..64),
        params in prop::collection::vec(any::<i32>(), 0..9),
    ) {
        let params: Vec<Parameter> = params.into_iter().map(Parameter::from).collect();
        let _ = expand(&cap, &params);
    }

    #[test]
    fn decimal_matches_display(n in any::<i32>()) {
        let expanded = expand(b"%p1%d", &[Parameter::from(n)]).unwrap();
        prop_assert_eq!(expanded, n.to_string().into_bytes());
    }

    #[test]
    fn zero_padding_matches_display(n in any::<i32>()) {
        let expanded = expand(b"%p1%08d", &[Parameter::from(n)]).unwrap();
        prop_assert_eq!(expanded, format!("{n:08}").into_bytes());
    }

    #[test]
    fn hex_matches_display(n in any::<i32>()) {
        let expanded = expand(b"%p1%x", &[Parameter::from(n)]).unwrap();
        prop_assert_eq!(expanded, format!("{n:x}").into_bytes());
    }

    #[test]
    fn addition_wraps(x in any::<i32>(), y in any::<i32>()) {
        let expanded = expand(b"%p1%p2%+%d", &[Parameter::from(x), Parameter::from(y)]).unwrap();
        prop_assert_eq!(expanded, x.wrapping_add(y).to_string().into_bytes());
    }

    #[test]
    fn comparison_is_boolean(x in any::<i32>(), y in any::<i32>()) {
        let expanded = expand(b"%p1%p2%<%d", &[Parameter::from(x), Parameter::from(y)]).unwrap();
        prop_assert_eq!(expanded, if x < y { b"1".to_vec() } else { b"0".to_vec() });
    }

    #[test]
    fn plain_text_survives_strip(text in "[^\\x1b\\x{80}-\\x{9f}]*") {
        prop_assert_eq!(sequences::strip(&text, SequenceKind::all()), text.as_str());
        prop_assert!(sequences::matches(&text, SequenceKind::all()).is_empty());
    }

    #[test]
    fn strip_removes_reported_ranges(text in "(\\x1b\\[[0-9;]{0,4}m|[a-z ]{0,4}){0,8}") {
        let stripped = sequences::strip(&text, SequenceKind::CSI);
        let removed: usize = sequences::matches(&text, SequenceKind::CSI)
            .iter()
            .map(|found| found.range.len())
            .sum();
        prop_assert_eq!(stripped.len() + removed, text.len());
        prop_assert!(!stripped.contains('\x1b'));
    }
}
