mod common;

use common::texts;

use reqtmpl::template::{SectionName, Template};

const FULL: &str = r#"# Create a user
[Host]
https://example.com/users # trailing comment
[Query]
  verbose=1
page=2

[Headers]
Accept: application/json
Authorization: Bearer ${TOKEN}
[method]
POST
[Body]

{"name": "`#1 user"}

{"id": "$(uuidgen)"}

"#;

#[test]
fn parses_sections_and_strips_comments() {
    let template = Template::parse(FULL).unwrap();
    let sections = &template.sections;

    assert_eq!(texts(sections, SectionName::Host), vec!["https://example.com/users"]);
    assert_eq!(texts(sections, SectionName::Query), vec!["verbose=1", "page=2"]);
    assert_eq!(
        texts(sections, SectionName::Headers),
        vec!["Accept: application/json", "Authorization: Bearer ${TOKEN}"]
    );
    assert_eq!(texts(sections, SectionName::Method), vec!["POST"]);
    assert_eq!(
        texts(sections, SectionName::Body),
        vec![r##"{"name": "#1 user"}"##, "", r#"{"id": "$(uuidgen)"}"#]
    );
}

#[test]
fn lines_keep_their_source_index() {
    let template = Template::parse(FULL).unwrap();

    let host = &template.sections[&SectionName::Host][0];
    assert_eq!(host.source_line_index, 2);

    let body: Vec<usize> = template.sections[&SectionName::Body]
        .iter()
        .map(|l| l.source_line_index)
        .collect();
    assert_eq!(body, vec![14, 15, 16]);
}

#[test]
fn reference_escapes_survive_parsing() {
    let template = Template::parse("[Body]\n`${HOME} `$(date)\n").unwrap();

    assert_eq!(
        texts(&template.sections, SectionName::Body),
        vec!["`${HOME} `$(date)"]
    );
}

#[test]
fn unknown_and_repeated_sections_are_fatal() {
    let text = "[Host]\na\n[Footer]\nb\n[Host]\nc\n";

    let fatals = Template::parse(text).unwrap_err();
    let got: Vec<_> = fatals
        .fatals
        .iter()
        .map(|f| (f.source_line_index, f.message.as_str()))
        .collect();

    assert_eq!(
        got,
        vec![
            (Some(2), "Unknown section [Footer]"),
            (Some(4), "Several [Host] sections found"),
        ]
    );
}

#[test]
fn content_before_first_section_is_fatal() {
    let fatals = Template::parse("# fine\n\noops\n[Host]\nx\n").unwrap_err();

    assert_eq!(fatals.len(), 1);
    assert_eq!(fatals.fatals[0].message, "Line outside of a section");
    assert_eq!(
        fatals.to_string(),
        "Error on line 3: Line outside of a section\n   3 > oops"
    );
}

#[test]
fn empty_section_is_present() {
    let template = Template::parse("[Host]\nx\n[Body]\n\n").unwrap();

    assert_eq!(template.sections.get(&SectionName::Body).map(Vec::len), Some(0));
}

#[test]
fn fatals_display_every_entry() {
    let template = Template::parse("[Host]\nhttps://${X}\n").unwrap();
    let fatals = template.fatals(vec![
        reqtmpl::template::Fatal::at_index(1, "Cannot find value for variable X"),
        reqtmpl::template::Fatal::general("Missing or empty [Host] section"),
    ]);

    assert_eq!(
        fatals.to_string(),
        "Error on line 2: Cannot find value for variable X\n   2 > https://${X}\nError: Missing or empty [Host] section"
    );
}
