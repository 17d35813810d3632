use tracing::info;
use webseek::{LocatorInput, Result};

use super::utils::{SessionArgs, close_session, open_session, scoped};

pub async fn handle_fill(
    url: String,
    locator: String,
    value: String,
    args: SessionArgs,
) -> Result<()> {
    info!("Filling {} on {}", locator, url);

    let raw = LocatorInput::from_arg(&locator);
    let label = raw.to_string();
    let session = open_session(&url, &args).await?;

    let s = &session;
    let value = value.as_str();
    let result = scoped(s, args.within.as_deref(), || async move {
        s.fill_field(raw, value).await
    })
    .await;
    close_session(session).await;
    result?;

    println!("Successfully filled field: {}", label);
    Ok(())
}
