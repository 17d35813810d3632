use tracing::info;
use webseek::{LocatorInput, Result};

use super::utils::{SessionArgs, close_session, open_session, scoped};

pub async fn handle_checked(
    url: String,
    locator: String,
    negate: bool,
    args: SessionArgs,
) -> Result<()> {
    info!("Checking state of {} on {}", locator, url);

    let raw = LocatorInput::from_arg(&locator);
    let label = raw.to_string();
    let session = open_session(&url, &args).await?;

    let s = &session;
    let result = scoped(s, args.within.as_deref(), || async move {
        if negate {
            s.dont_see_checkbox_is_checked(raw).await
        } else {
            s.see_checkbox_is_checked(raw).await
        }
    })
    .await;
    close_session(session).await;
    result?;

    println!(
        "{} is {}",
        label,
        if negate { "not checked" } else { "checked" }
    );
    Ok(())
}
