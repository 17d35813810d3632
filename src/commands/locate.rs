use tracing::info;
use webseek::assertions::assert_element_exists;
use webseek::errors::DEFAULT_SUFFIX;
use webseek::types::{ElementReport, LocateReport};
use webseek::{
    Capability, Driver, LocateOptions, Locator, LocatorInput, OutputFormat, Result, Session,
    WebDriverBackend,
};

use super::utils::{SessionArgs, close_session, open_session, scoped};

pub async fn handle_locate(
    url: String,
    locator: String,
    capability: Capability,
    format: OutputFormat,
    args: SessionArgs,
) -> Result<()> {
    info!("Locating {} ({}) on {}", locator, capability, url);

    let raw = LocatorInput::from_arg(&locator);
    // Reject unusable locators before starting a browser
    let classified = Locator::classify(&raw)?;

    let session = open_session(&url, &args).await?;

    let s = &session;
    let result = scoped(s, args.within.as_deref(), || async move {
        build_report(s, raw, classified, capability).await
    })
    .await;
    close_session(session).await;

    print_report(&result?, format)
}

async fn build_report(
    session: &Session<WebDriverBackend>,
    raw: LocatorInput,
    classified: Locator,
    capability: Capability,
) -> Result<LocateReport> {
    let resolution = session
        .locate_traced(raw.clone(), LocateOptions::new(capability).smart_wait(true))
        .await?;
    let elements = assert_element_exists(
        resolution.elements,
        &raw,
        capability.not_found_prefix(),
        DEFAULT_SUFFIX,
    )?;

    let driver = session.driver();
    let mut reports = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let text = driver.text(element).await?;
        reports.push(ElementReport {
            index,
            tag: driver.tag_name(element).await?.to_lowercase(),
            text: (!text.trim().is_empty()).then_some(text),
            displayed: driver.is_displayed(element).await?,
            selected: driver.is_selected(element).await?,
        });
    }

    Ok(LocateReport {
        locator: raw.to_string(),
        capability: capability.to_string(),
        kind: classified.kind().map(str::to_string),
        strategy: resolution.strategy.map(str::to_string),
        attempts: resolution.attempts,
        elements: reports,
    })
}

fn print_report(report: &LocateReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| anyhow::anyhow!("Failed to serialize report: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Simple => {
            println!(
                "{} matched {} element(s) via {} after {} attempt(s)",
                report.locator,
                report.elements.len(),
                report.strategy.as_deref().unwrap_or("-"),
                report.attempts
            );
            for element in &report.elements {
                let mut flags = Vec::new();
                if !element.displayed {
                    flags.push("hidden");
                }
                if element.selected {
                    flags.push("selected");
                }
                println!(
                    "[{}] <{}> {}{}",
                    element.index,
                    element.tag,
                    element.text.as_deref().unwrap_or(""),
                    if flags.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", flags.join(", "))
                    }
                );
            }
        }
    }
    Ok(())
}
