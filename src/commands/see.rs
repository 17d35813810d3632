use tracing::info;
use webseek::{LocatorInput, Result};

use super::utils::{SessionArgs, close_session, open_session, scoped};

/// Assert `text` is (or with `negate`, is not) present on the page
pub async fn handle_see(
    url: String,
    text: String,
    context: Option<String>,
    negate: bool,
    args: SessionArgs,
) -> Result<()> {
    info!("Checking for text '{}' on {}", text, url);

    let context = context.as_deref().map(LocatorInput::from_arg);
    let session = open_session(&url, &args).await?;

    let s = &session;
    let needle = text.as_str();
    let result = scoped(s, args.within.as_deref(), || async move {
        match (context, negate) {
            (Some(ctx), false) => s.see_in(needle, ctx).await,
            (Some(ctx), true) => s.dont_see_in(needle, ctx).await,
            (None, false) => s.see(needle).await,
            (None, true) => s.dont_see(needle).await,
        }
    })
    .await;
    close_session(session).await;
    result?;

    if negate {
        println!("Text not present: {}", text);
    } else {
        println!("Text present: {}", text);
    }
    Ok(())
}
