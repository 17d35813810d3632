#![allow(clippy::uninlined_format_args)]

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webseek::{Capability, OutputFormat, Result};

mod commands;

use commands::utils::SessionArgs;

const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "webseek")]
#[command(about = "Resolve loosely written locators against a live page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a locator and report the matching elements
    Locate {
        /// URL to open
        url: String,

        /// Locator: CSS, XPath, plain text, or a JSON object like {"name": "email"}
        locator: String,

        /// Kind of control to look for when the locator is plain text
        #[arg(short, long, default_value = "containment")]
        capability: Capability,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Assert that text is present on the page
    See {
        /// URL to open
        url: String,

        /// Text to look for
        text: String,

        /// Only look inside the elements matched by this locator
        #[arg(long)]
        context: Option<String>,

        /// Assert the text is absent instead
        #[arg(long)]
        not: bool,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Assert that a checkbox or radio button is checked
    Checked {
        /// URL to open
        url: String,

        /// Label, name, or selector of the checkbox
        locator: String,

        /// Assert it is not checked instead
        #[arg(long)]
        not: bool,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Click a button or link
    Click {
        /// URL to open
        url: String,

        /// Button text, link text, or selector
        locator: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Fill a form field
    Fill {
        /// URL to open
        url: String,

        /// Field label, name, placeholder, or selector
        locator: String,

        /// Value to enter
        value: String,

        #[command(flatten)]
        session: SessionArgs,
    },
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": err.to_string(),
                "exit_code": err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webseek=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            url,
            locator,
            capability,
            format,
            session,
        } => commands::locate::handle_locate(url, locator, capability, format, session).await,

        Commands::See {
            url,
            text,
            context,
            not,
            session,
        } => commands::see::handle_see(url, text, context, not, session).await,

        Commands::Checked {
            url,
            locator,
            not,
            session,
        } => commands::checked::handle_checked(url, locator, not, session).await,

        Commands::Click {
            url,
            locator,
            session,
        } => commands::click::handle_click(url, locator, session).await,

        Commands::Fill {
            url,
            locator,
            value,
            session,
        } => commands::fill::handle_fill(url, locator, value, session).await,
    }
}
