// End-to-end resolution against a real WebDriver.
// Run with a driver listening: cargo test -- --ignored

mod common;

use common::{fixtures, open_page};
use std::time::{Duration, Instant};
use webseek::{Capability, Driver, LocateError, LocateOptions, LocatorConfig, LocatorInput};

#[tokio::test]
#[ignore = "requires a running WebDriver"]
async fn test_label_beats_name_for_fields() {
    let session = open_page(fixtures::LOGIN_PAGE, LocatorConfig::default()).await;

    let resolution = session
        .locate_traced("Password", LocateOptions::new(Capability::Field))
        .await
        .unwrap();
    assert_eq!(resolution.strategy, Some("label-exact"));
    let id = session
        .driver()
        .attribute(&resolution.elements[0], "id")
        .await
        .unwrap();
    assert_eq!(id.as_deref(), Some("pwd"));

    session.into_driver().close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running WebDriver"]
async fn test_within_scopes_clicks_and_fields() {
    let session = open_page(fixtures::LOGIN_PAGE, LocatorConfig::default()).await;

    let s = &session;
    session
        .within("#login", || async move {
            s.fill_field("Email", "ada@example.com").await?;
            s.check_option("Remember me").await?;
            s.click("Sign in").await
        })
        .await
        .unwrap();

    session.see_in("Signed in", "#status").await.unwrap();
    session.see_checkbox_is_checked("#remember").await.unwrap();

    session.into_driver().close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running WebDriver"]
async fn test_text_with_both_quote_kinds() {
    let session = open_page(fixtures::LOGIN_PAGE, LocatorConfig::default()).await;

    let found = session
        .locate(r#"It's "quoted""#, LocateOptions::new(Capability::Clickable))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    let id = session.driver().attribute(&found[0], "id").await.unwrap();
    assert_eq!(id.as_deref(), Some("quote"));

    session.into_driver().close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running WebDriver"]
async fn test_strict_name_locator() {
    let session = open_page(fixtures::LOGIN_PAGE, LocatorConfig::default()).await;

    let found = session
        .locate(
            LocatorInput::strict("name", "agree"),
            LocateOptions::new(Capability::Checkable),
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    session.see_checkbox_is_checked("agree").await.unwrap();

    session.into_driver().close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running WebDriver"]
async fn test_smart_wait_finds_late_element_and_resets() {
    let config = LocatorConfig {
        smart_wait_ms: Some(3000),
        ..LocatorConfig::default()
    };
    let session = open_page(fixtures::LATE_PAGE, config).await;

    let found = session
        .locate("#late", LocateOptions::default().smart_wait(true))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    // Implicit wait is back to zero: a miss returns at once
    let started = Instant::now();
    let missing = session.locate("#never", LocateOptions::default()).await.unwrap();
    assert!(missing.is_empty());
    assert!(started.elapsed() < Duration::from_millis(1500));

    session.into_driver().close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running WebDriver"]
async fn test_missing_element_reports_locator() {
    let session = open_page(fixtures::LOGIN_PAGE, LocatorConfig::default()).await;

    let err = session.see_element("#nonexistent").await.unwrap_err();
    assert!(matches!(err, LocateError::ElementNotFound { .. }));
    assert!(err.to_string().contains("#nonexistent"));

    session.into_driver().close().await.unwrap();
}
