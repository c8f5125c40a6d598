//! Document markers, directives, reader options, and newline normalization.

use indoc::indoc;
use pretty_assertions::assert_eq;
use yaml_events::{Event, EventLoader, ReaderOptions};

fn events(input: &str) -> Vec<Event> {
    EventLoader::load_from_str(input).expect("parse failed")
}

fn events_with(input: &str, options: ReaderOptions) -> Vec<Event> {
    EventLoader::load_from_str_with(input, options).expect("parse failed")
}

fn prop(name: &str) -> Event {
    Event::PropertyName(name.to_string())
}

fn string(value: &str) -> Event {
    Event::String(value.to_string())
}

#[test]
fn explicit_document_markers() {
    let yaml = indoc! {"
        ---
        a: 1
        ...
    "};
    assert_eq!(
        events(yaml),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn directives_are_consumed_silently() {
    let yaml = indoc! {"
        %YAML 1.2
        %TAG ! tag:example.com,2000:
        ---
        a: 1
    "};
    assert_eq!(
        events(yaml),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn tags_are_lexed_but_ignored() {
    assert_eq!(
        events("k: !!str plain\n"),
        vec![
            Event::StartObject,
            prop("k"),
            string("plain"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn second_document_ends_the_stream_by_default() {
    let yaml = indoc! {"
        a: 1
        ---
        b: 2
    "};
    assert_eq!(
        events(yaml),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn merge_documents_joins_streams() {
    let yaml = indoc! {"
        a: 1
        ---
        b: 2
    "};
    let options = ReaderOptions {
        merge_documents: true,
        ..ReaderOptions::default()
    };
    assert_eq!(
        events_with(yaml, options),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            prop("b"),
            string("2"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn ignore_text_outside_document_markers() {
    let input = indoc! {"
        This prologue is not YAML at all: [{&*
        ---
        a: 1
        ...
        Neither is this trailer.
    "};
    let options = ReaderOptions {
        ignore_text_outside_document_markers: true,
        ..ReaderOptions::default()
    };
    assert_eq!(
        events_with(input, options),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn accept_content_on_start_document_line() {
    let options = ReaderOptions {
        accept_content_on_start_document_line: true,
        ..ReaderOptions::default()
    };
    assert_eq!(
        events_with("--- a: 1\nb: 2\n", options),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            prop("b"),
            string("2"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn empty_document_between_markers() {
    assert_eq!(events("---\n...\n"), vec![Event::End]);
}

#[test]
fn newline_style_does_not_change_the_event_stream() {
    let unix = "a:\n  b: 1\n  c: |\n    text\nd: x\n";
    let dos = unix.replace('\n', "\r\n");
    let mac = unix.replace('\n', "\r");
    let reference = events(unix);
    assert_eq!(events(&dos), reference);
    assert_eq!(events(&mac), reference);
}

#[test]
fn document_end_resets_for_trailing_directives() {
    // After `...` the `%` line is a directive again, not content.
    let yaml = indoc! {"
        a: 1
        ...
        %YAML 1.2
    "};
    assert_eq!(
        events(yaml),
        vec![
            Event::StartObject,
            prop("a"),
            string("1"),
            Event::EndObject,
            Event::End,
        ]
    );
}

#[test]
fn three_dots_mid_line_are_scalar_text() {
    assert_eq!(
        events("k: a...b\n"),
        vec![
            Event::StartObject,
            prop("k"),
            string("a...b"),
            Event::EndObject,
            Event::End,
        ]
    );
}
