use tracing::info;
use webseek::{LocatorInput, Result};

use super::utils::{SessionArgs, close_session, open_session, scoped};

pub async fn handle_click(url: String, locator: String, args: SessionArgs) -> Result<()> {
    info!("Clicking {} on {}", locator, url);

    let raw = LocatorInput::from_arg(&locator);
    let label = raw.to_string();
    let session = open_session(&url, &args).await?;

    let s = &session;
    let result = scoped(s, args.within.as_deref(), || async move { s.click(raw).await }).await;
    close_session(session).await;
    result?;

    println!("Successfully clicked element: {}", label);
    Ok(())
}
