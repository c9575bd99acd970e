mod common;

use common::SectionsBuilder;

use reqtmpl::template::{CallData, SectionName};
use reqtmpl::types::Backend;

#[test]
fn assembles_url_headers_and_body() {
    let sections = SectionsBuilder::new()
        .line(SectionName::Host, "https://example.com")
        .line(SectionName::Host, "/users")
        .line(SectionName::Query, "page=2")
        .line(SectionName::Query, "sort=name")
        .line(SectionName::Headers, "Accept: application/json")
        .line(SectionName::Method, "PUT")
        .line(SectionName::Body, "{")
        .line(SectionName::Body, "")
        .line(SectionName::Body, "}")
        .build();

    let call = CallData::from_sections(&sections, Backend::Curl).unwrap();

    assert_eq!(call.url, "https://example.com/users?page=2&sort=name");
    assert_eq!(call.headers, vec!["Accept: application/json".to_string()]);
    assert_eq!(call.method.as_deref(), Some("PUT"));
    assert_eq!(call.body.as_deref(), Some("{\n\n}"));
    assert_eq!(call.backend, Backend::Curl);
    assert!(call.backend_options.is_empty());
}

#[test]
fn query_extends_existing_query_string() {
    let sections = SectionsBuilder::new()
        .line(SectionName::Host, "https://example.com/?a=1")
        .line(SectionName::Query, "b=2")
        .build();

    let call = CallData::from_sections(&sections, Backend::Curl).unwrap();

    assert_eq!(call.url, "https://example.com/?a=1&b=2");
    assert_eq!(call.body, None);
    assert_eq!(call.method, None);
}

#[test]
fn empty_body_section_is_an_empty_body() {
    let sections = SectionsBuilder::new()
        .line(SectionName::Host, "https://example.com")
        .empty(SectionName::Body)
        .build();

    let call = CallData::from_sections(&sections, Backend::Curl).unwrap();

    assert_eq!(call.body.as_deref(), Some(""));
}

#[test]
fn backend_section_wins_over_default() {
    let sections = SectionsBuilder::new()
        .line(SectionName::Host, "https://example.com")
        .line(SectionName::Backend, "HTTPie")
        .build();

    let call = CallData::from_sections(&sections, Backend::Wget).unwrap();
    assert_eq!(call.backend, Backend::Httpie);

    let without = SectionsBuilder::new()
        .line(SectionName::Host, "https://example.com")
        .build();
    let call = CallData::from_sections(&without, Backend::Wget).unwrap();
    assert_eq!(call.backend, Backend::Wget);
}

#[test]
fn backend_options_are_split_into_arguments() {
    let sections = SectionsBuilder::new()
        .line(SectionName::Host, "https://example.com")
        .line(SectionName::BackendOptions, "--max-time 5 -k")
        .line(SectionName::BackendOptions, r#"--user "me:secret pass""#)
        .build();

    let call = CallData::from_sections(&sections, Backend::Curl).unwrap();

    assert_eq!(
        call.backend_options,
        vec!["--max-time", "5", "-k", "--user", "me:secret pass"]
    );
}

#[test]
fn shape_errors_are_all_reported() {
    let sections = SectionsBuilder::new()
        .line(SectionName::Method, "GET")
        .line(SectionName::Method, "POST")
        .line(SectionName::Backend, "lynx")
        .line(SectionName::BackendOptions, "--data 'open")
        .build();

    let fatals = CallData::from_sections(&sections, Backend::Curl).unwrap_err();
    let got: Vec<_> = fatals
        .iter()
        .map(|f| (f.source_line_index, f.message.as_str()))
        .collect();

    assert_eq!(
        got,
        vec![
            (None, "Missing or empty [Host] section"),
            (Some(1), "Found several lines under [Method]"),
            (
                Some(2),
                "Unknown backend: lynx (expected \"curl\", \"httpie\" or \"wget\")"
            ),
            (Some(3), "Unterminated quote sequence: --data 'open"),
        ]
    );
}
