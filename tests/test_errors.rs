//! Diagnostic behavior: accumulate mode keeps the event stream balanced with
//! synthesized empties; throw mode raises the first diagnostic.

use pretty_assertions::assert_eq;
use yaml_events::{Event, EventLoader, Parser, ReaderOptions, ScanError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lenient() -> ReaderOptions {
    ReaderOptions {
        throw_on_error: false,
        ..ReaderOptions::default()
    }
}

/// Parse in accumulating mode, returning the events and diagnostics.
fn parse_lenient(input: &str) -> (Vec<Event>, Vec<ScanError>) {
    init_logging();
    let mut parser = Parser::with_options(input.chars(), lenient());
    let mut events = Vec::new();
    loop {
        let ev = parser.next_event().expect("lenient parse must not raise");
        let done = ev == Event::End;
        events.push(ev);
        if done {
            break;
        }
    }
    (events, parser.errors().to_vec())
}

fn assert_balanced(events: &[Event]) {
    let mut depth = 0i32;
    for ev in events {
        match ev {
            Event::StartObject | Event::StartArray => depth += 1,
            Event::EndObject | Event::EndArray => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
    assert_eq!(events.last(), Some(&Event::End));
}

#[test]
fn tab_indentation_is_reported_and_recovered() {
    // Seed scenario 7.
    let (events, errors) = parse_lenient("a:\n\tb: 1\n");
    assert!(
        errors.iter().any(|e| e.info.contains("tab")),
        "expected a tab diagnostic, got {errors:?}"
    );
    assert_balanced(&events);
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::PropertyName("a".to_string()),
            Event::String(String::new()),
            Event::PropertyName("b".to_string()),
            Event::String("1".to_string()),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn throw_mode_raises_the_first_diagnostic() {
    let mut parser = Parser::new("a:\n\tb: 1\n".chars());
    let err = loop {
        match parser.next_event() {
            Ok(Event::End) => panic!("expected an error"),
            Ok(_) => {}
            Err(e) => break e,
        }
    };
    assert!(err.info.contains("tab"));
    assert_eq!(err.mark.line, 1);
    assert!(err.to_string().starts_with("YAML(1,1): "));
}

#[test]
fn unterminated_single_quoted_scalar() {
    let (events, errors) = parse_lenient("k: 'abc\n");
    assert!(errors.iter().any(|e| e.info.contains("unterminated")));
    assert_balanced(&events);
}

#[test]
fn unterminated_double_quoted_scalar() {
    let (events, errors) = parse_lenient("k: \"abc");
    assert!(errors.iter().any(|e| e.info.contains("unterminated")));
    assert_balanced(&events);
}

#[test]
fn invalid_escape_is_skipped() {
    let (events, errors) = parse_lenient("k: \"a\\qb\"\n");
    assert!(errors.iter().any(|e| e.info.contains("invalid escape")));
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::PropertyName("k".to_string()),
            Event::String("ab".to_string()),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn invalid_hex_escape_is_reported() {
    let (events, errors) = parse_lenient("k: \"\\xZZ\"\n");
    assert!(errors.iter().any(|e| e.info.contains("hex")));
    assert_balanced(&events);
}

#[test]
fn junk_after_block_scalar_header() {
    let (events, errors) = parse_lenient("k: |junk\n  body\n");
    assert!(
        errors
            .iter()
            .any(|e| e.info.contains("block scalar header"))
    );
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::PropertyName("k".to_string()),
            Event::String("body\n".to_string()),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn overindented_blank_line_in_block_scalar() {
    let (events, errors) = parse_lenient("k: |\n    \n  a\n");
    assert!(errors.iter().any(|e| e.info.contains("blank line")));
    assert_balanced(&events);
}

#[test]
fn text_after_document_end_marker() {
    let (events, errors) = parse_lenient("a: 1\n... trailing\n");
    assert!(
        errors
            .iter()
            .any(|e| e.info.contains("document end marker"))
    );
    assert_balanced(&events);
}

#[test]
fn indentation_mismatch_on_close() {
    let (events, errors) = parse_lenient("a:\n    b: 1\n  c: 2\n");
    assert!(errors.iter().any(|e| e.info.contains("indentation")));
    assert_balanced(&events);
}

#[test]
fn scalar_in_key_slot_without_colon() {
    let (events, errors) = parse_lenient("a: 1\nb\n");
    assert!(errors.iter().any(|e| e.info.contains("key")));
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::PropertyName("a".to_string()),
            Event::String("1".to_string()),
            Event::PropertyName(String::new()),
            Event::String("b".to_string()),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn explicit_key_inside_sequence() {
    let (events, errors) = parse_lenient("- a\n? b\n");
    assert!(errors.iter().any(|e| e.info.contains("'?'")));
    assert_balanced(&events);
}

#[test]
fn diagnostics_arrive_in_occurrence_order() {
    let (_, errors) = parse_lenient("a:\n\tb: 'x\n");
    assert!(errors.len() >= 2);
    assert!(errors[0].info.contains("tab"));
    assert!(errors[1].info.contains("unterminated"));
}

#[test]
fn errors_are_exposed_without_raising_in_lenient_mode() {
    init_logging();
    let mut parser = Parser::with_options("a:\n\tb: 1\n".chars(), lenient());
    assert!(!parser.error_occurred());
    loop {
        if parser.next_event().unwrap() == Event::End {
            break;
        }
    }
    assert!(parser.error_occurred());
}
