use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Browser viewport dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportSize {
    /// Parse viewport size from "WIDTHxHEIGHT" format (e.g., "1920x1080")
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid viewport format. Use WIDTHxHEIGHT (e.g., 1920x1080)");
        }

        let width = parts[0]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid width in viewport size"))?;
        let height = parts[1]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid height in viewport size"))?;

        Ok(ViewportSize { width, height })
    }
}

/// Summary of one resolved element
#[derive(Debug, Serialize, Deserialize)]
pub struct ElementReport {
    /// Position in the match list (0-based)
    pub index: usize,
    /// Lowercase tag name
    pub tag: String,
    /// Visible text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub displayed: bool,
    pub selected: bool,
}

/// Result of a `locate` run
#[derive(Debug, Serialize, Deserialize)]
pub struct LocateReport {
    /// Locator as given on the command line
    pub locator: String,
    /// Capability class used for fuzzy locators
    pub capability: String,
    /// Strategy type (`css`, `xpath`, ...), absent for fuzzy text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Strategy that produced the matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Number of queries sent to the driver
    pub attempts: usize,
    pub elements: Vec<ElementReport>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
