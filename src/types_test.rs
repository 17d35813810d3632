// Unit tests for types module

use super::*;

#[test]
fn test_viewport_size_parse() {
    // Valid formats
    let size = ViewportSize::parse("1920x1080").unwrap();
    assert_eq!(size.width, 1920);
    assert_eq!(size.height, 1080);

    // Invalid formats
    assert!(ViewportSize::parse("1920").is_err());
    assert!(ViewportSize::parse("1920x").is_err());
    assert!(ViewportSize::parse("x1080").is_err());
    assert!(ViewportSize::parse("1920X1080").is_err()); // uppercase X
}

#[test]
fn test_locate_report_serialization() {
    let report = LocateReport {
        locator: "Password".to_string(),
        capability: "field".to_string(),
        kind: None,
        strategy: Some("label-exact".to_string()),
        attempts: 1,
        elements: vec![ElementReport {
            index: 0,
            tag: "input".to_string(),
            text: None,
            displayed: true,
            selected: false,
        }],
    };

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["strategy"], "label-exact");
    assert_eq!(json["elements"][0]["tag"], "input");
    // Optional fields are omitted rather than null
    assert!(json.get("kind").is_none());
    assert!(json["elements"][0].get("text").is_none());
}

#[test]
fn test_output_format() {
    let json = OutputFormat::Json;
    assert!(matches!(json, OutputFormat::Json));
    assert!(!matches!(json, OutputFormat::Simple));
}
