#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rs_tagscrape::{
    can_extract, dom, extract, extract_bytes, extract_html, load_config, Config, Error, GroupData,
    Record, Scraper,
};

fn data_path(kind: &str, name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(kind)
        .join(name)
}

fn html(name: &str) -> String {
    fs::read_to_string(data_path("html", name)).expect("failed to read fixture")
}

fn config(name: &str) -> Config {
    load_config(data_path("config", name)).expect("failed to load config")
}

fn record(fields: &[(&str, &str)]) -> Record {
    fields.iter().copied().collect()
}

fn first_teaser() -> Record {
    record(&[
        ("article_link", "/dummy/article.html"),
        ("topline", "Test topline"),
        ("headline", "Test headline"),
        ("shorttext", "Test short text"),
        ("date", "08.10.2023 \u{2022} 13:17 Uhr"),
    ])
}

fn second_teaser() -> Record {
    record(&[
        ("article_link", "/dummy/article2.html"),
        ("topline", "Test topline 2"),
        ("headline", "Test headline 2"),
        ("shorttext", "Test short text 2"),
        ("date", "09.02.2024 \u{2022} 21:28 Uhr"),
    ])
}

#[test]
fn extracts_flat_record() {
    let result = extract_html(&html("valid.html"), &config("config.yml"));

    let expected = vec![GroupData {
        results: vec![first_teaser()],
        group_id: None,
    }];
    assert_eq!(result.expect("extraction failed"), expected);
}

#[test]
fn flat_record_keeps_declaration_order() {
    let data = extract_html(&html("valid.html"), &config("config.yml"))
        .expect("extraction failed");
    let ids: Vec<&str> = data[0].results[0].ids().collect();

    assert_eq!(ids, vec!["article_link", "topline", "headline", "shorttext", "date"]);
}

#[test]
fn flat_mode_reads_raw_attributes() {
    let data = extract_html(&html("valid.html"), &config("config-no-validation.yml"))
        .expect("extraction failed");
    let fields = &data[0].results[0];

    assert_eq!(fields.get("teaser_date"), Some("1696763839"));
    assert_eq!(fields.get("headline"), Some("Test headline"));
}

#[test]
fn flat_mode_fails_on_missing_element() {
    let result = extract_html(&html("valid.html"), &config("config-invalid.yml"));

    match result {
        Err(Error::ElementNotFound { tag }) => {
            assert_eq!(tag.name.as_deref(), Some("span"));
        }
        other => panic!("expected ElementNotFound, got {other:?}"),
    }
}

#[test]
fn flat_mode_joins_repeated_matches() {
    let data = extract_html(&html("valid-groups.html"), &config("config.yml"))
        .expect("extraction failed");
    let fields = &data[0].results[0];

    assert_eq!(fields.get("headline"), Some("Test headline|Test headline 2"));
    assert_eq!(
        fields.get("article_link"),
        Some("/dummy/article.html|/dummy/article2.html")
    );
}

#[test]
fn extracts_grouped_records() {
    let result = extract_html(&html("valid-groups.html"), &config("config-groups.yml"));

    let expected = vec![GroupData {
        results: vec![first_teaser(), second_teaser()],
        group_id: Some("teaser".to_string()),
    }];
    assert_eq!(result.expect("extraction failed"), expected);
}

#[test]
fn grouped_fields_follow_tags_order_not_contains_order() {
    let data = extract_html(&html("valid-groups.html"), &config("config-groups.yml"))
        .expect("extraction failed");
    let ids: Vec<&str> = data[0].results[0].ids().collect();

    assert_eq!(ids, vec!["article_link", "topline", "headline", "shorttext", "date"]);
}

#[test]
fn extracts_multiple_groups_in_declaration_order() {
    let result = extract_html(&html("valid-groups.html"), &config("config-multiple-groups.yml"));

    let expected = vec![
        GroupData {
            results: vec![first_teaser(), second_teaser()],
            group_id: Some("teaser".to_string()),
        },
        GroupData {
            results: vec![
                record(&[("topline", "Test topline"), ("headline", "Test headline")]),
                record(&[("topline", "Test topline 2"), ("headline", "Test headline 2")]),
            ],
            group_id: Some("line".to_string()),
        },
    ];
    assert_eq!(result.expect("extraction failed"), expected);
}

#[test]
fn incomplete_group_aborts_whole_extraction() {
    let result = extract_html(
        &html("valid-groups-group-not-complete.html"),
        &config("config-groups.yml"),
    );

    match result {
        Err(Error::ElementNotFound { tag }) => {
            assert_eq!(tag.to_string(), r#"name <any> and attrs {class="teaser-right__shorttext"}"#);
        }
        other => panic!("expected ElementNotFound, got {other:?}"),
    }
}

#[test]
fn missing_group_container_fails() {
    let result = extract_html(&html("invalid.html"), &config("config-groups.yml"));
    assert!(matches!(result, Err(Error::ElementNotFound { .. })));
}

#[test]
fn group_scope_limits_field_search() {
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: item
      tag: {name: li}
  groups:
    - id: list
      contains: [item]
      tag: {name: ul}
"#,
    )
    .expect("invalid config");
    let html = "<ul><li>a</li><li>b</li></ul><p><li>stray</li></p><ul><li>c</li></ul>";

    let data = extract_html(html, &config).expect("extraction failed");
    let values: Vec<Option<&str>> = data[0].results.iter().map(|r| r.get("item")).collect();

    assert_eq!(values, vec![Some("a|b"), Some("c")]);
}

#[test]
fn duplicate_group_ids_are_not_merged() {
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: text
      tag: {name: span}
  groups:
    - {id: g, contains: [text], tag: {name: div}}
    - {id: g, contains: [text], tag: {name: div}}
"#,
    )
    .expect("invalid config");

    let data = extract_html("<div><span>x</span></div>", &config)
        .expect("extraction failed");

    assert_eq!(data.len(), 2);
    assert_eq!(data[0], data[1]);
}

#[test]
fn group_with_only_unknown_fields_yields_empty_records() {
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: text
      tag: {name: span}
  groups:
    - {id: g, contains: [nope], tag: {name: div}}
"#,
    )
    .expect("invalid config");

    let data = extract_html("<div></div><div></div>", &config)
        .expect("extraction failed");

    assert_eq!(data[0].results, vec![Record::new(), Record::new()]);
}

#[test]
fn missing_attribute_aborts_extraction() {
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: link
      tag: {name: a}
      content_type: href
"#,
    )
    .expect("invalid config");

    let result = extract_html(r#"<a href="/ok">1</a><a>2</a>"#, &config);
    match result {
        Err(Error::AttributeMissing { attribute }) => assert_eq!(attribute, "href"),
        other => panic!("expected AttributeMissing, got {other:?}"),
    }
}

#[test]
fn empty_content_type_reads_text() {
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: body
      tag: {name: p}
      content_type: ""
"#,
    )
    .expect("invalid config");

    let data = extract_html("<p>hi</p>", &config).expect("extraction failed");

    assert_eq!(data[0].results[0].get("body"), Some("hi"));
}

#[test]
fn container_class_matches_across_line_breaks() {
    let config = config("config-groups.yml");
    let html = html("valid-groups.html").replace("teaser-right twelve", "teaser-right\n      twelve");

    let data = extract_html(&html, &config).expect("extraction failed");

    assert_eq!(data[0].results.len(), 2);
}

#[test]
fn validation_gate() {
    let config = config("config-groups.yml");

    assert!(can_extract(&dom::parse(&html("valid-groups.html")), &config));
    assert!(can_extract(&dom::parse(&html("valid.html")), &config));
    assert!(!can_extract(&dom::parse(&html("invalid.html")), &config));
}

#[test]
fn no_validation_section_always_passes() {
    let config = config("config-no-validation.yml");
    assert!(can_extract(&dom::parse(&html("invalid.html")), &config));
}

#[test]
fn scraper_works_on_selection_scope() {
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: headline
      tag: {attrs: {class: teaser-right__headline}}
    - id: link
      tag: {name: a}
      content_type: href
"#,
    )
    .expect("invalid config");
    let doc = dom::parse(&html("valid-groups.html"));
    let second = doc.select(r#"div[data-teaserdate="1707510480"]"#);

    let data = Scraper::new(&config)
        .extract(&second)
        .expect("extraction failed");

    assert_eq!(
        data[0].results,
        vec![record(&[("headline", "Test headline 2"), ("link", "/dummy/article2.html")])]
    );
}

#[test]
fn selection_scope_excludes_the_container_itself() {
    let config = config("config-no-validation.yml");
    let doc = dom::parse(&html("valid.html"));
    let teaser = doc.select("div.twelve");

    let result = Scraper::new(&config).extract(&teaser);
    assert!(matches!(result, Err(Error::ElementNotFound { .. })));
}

#[test]
fn extract_bytes_honours_declared_charset() {
    let bytes = fs::read(data_path("html", "latin1.html")).expect("failed to read fixture");
    let config = Config::from_yaml_str(
        r#"
scraping:
  tags:
    - id: title
      tag: {name: h1, attrs: {class: title}}
"#,
    )
    .expect("invalid config");

    let data = extract_bytes(&bytes, &config).expect("extraction failed");
    assert_eq!(data[0].results[0].get("title"), Some("München Café"));
}

#[test]
fn results_serialize_to_json() {
    let doc = dom::parse(&html("valid-groups.html"));
    let data = extract(&doc, &config("config-groups.yml")).expect("extraction failed");

    let json = serde_json::to_value(&data).unwrap_or_default();
    assert_eq!(json[0]["group_id"], "teaser");
    assert_eq!(json[0]["results"][1]["article_link"], "/dummy/article2.html");
}
