//! Fallback chains that turn fuzzy text into native queries
//!
//! Each [`Capability`] owns an ordered list of [`Strategy`] values. A chain is
//! run by [`first_non_empty`]: the first strategy whose query matches anything
//! wins and the remaining strategies are never built or sent.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use tracing::debug;

use crate::driver::Query;
use crate::xpath::{combine, literal};

/// Kind of UI control a locator is expected to point at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Links, buttons and submit-like inputs
    Clickable,
    /// Inputs, textareas and selects that accept text
    Field,
    /// Checkboxes and radio buttons
    Checkable,
    /// Any element, matched only by its literal selector
    Containment,
}

impl Capability {
    /// Ordered strategies tried for fuzzy locators of this capability
    pub fn chain(self) -> &'static [Strategy] {
        match self {
            Capability::Clickable => CLICKABLE,
            Capability::Field => FIELD,
            Capability::Checkable => CHECKABLE,
            Capability::Containment => CONTAINMENT,
        }
    }

    /// Word used in front of the locator when nothing was found
    pub fn not_found_prefix(self) -> &'static str {
        match self {
            Capability::Clickable => "Clickable element",
            Capability::Field => "Field",
            Capability::Checkable => "Checkbox or radio",
            Capability::Containment => crate::errors::DEFAULT_PREFIX,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Clickable => "clickable",
            Capability::Field => "field",
            Capability::Checkable => "checkable",
            Capability::Containment => "containment",
        };
        write!(f, "{}", name)
    }
}

/// One heuristic in a chain
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    build: fn(&str) -> Query,
}

impl Strategy {
    /// Native query for `text`
    pub fn query(&self, text: &str) -> Query {
        (self.build)(text)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// Outcome of running a chain
#[derive(Debug)]
pub struct Resolution<E> {
    /// Strategy that produced the matches, `None` when every strategy came up empty
    pub strategy: Option<&'static str>,
    /// Number of strategies whose query was sent
    pub attempts: usize,
    pub elements: Vec<E>,
}

/// Run `strategies` in order and stop at the first non-empty result.
///
/// `run` sends one query to the driver. Driver errors stop the chain and are
/// returned unchanged.
pub async fn first_non_empty<E, F, Fut>(
    strategies: &[Strategy],
    text: &str,
    mut run: F,
) -> Result<Resolution<E>>
where
    F: FnMut(Query) -> Fut,
    Fut: Future<Output = Result<Vec<E>>>,
{
    let mut attempts = 0;
    for strategy in strategies {
        let query = strategy.query(text);
        attempts += 1;
        debug!("Trying {} strategy: {}", strategy.name, query);

        let elements = run(query).await?;
        if !elements.is_empty() {
            debug!(
                "{} strategy matched {} element(s)",
                strategy.name,
                elements.len()
            );
            return Ok(Resolution {
                strategy: Some(strategy.name),
                attempts,
                elements,
            });
        }
    }

    Ok(Resolution {
        strategy: None,
        attempts,
        elements: Vec::new(),
    })
}

const FILLABLE: &str = "*[self::input | self::textarea | self::select]\
[not(./@type = 'submit' or ./@type = 'image' or ./@type = 'hidden' \
or ./@type = 'button' or ./@type = 'reset')]";

const CHECKABLE_INPUT: &str = "input[./@type = 'checkbox' or ./@type = 'radio']";

const BUTTON_INPUT: &str =
    "input[./@type = 'submit' or ./@type = 'image' or ./@type = 'button' or ./@type = 'reset']";

/// Controls labelled by a `<label>` matching `label_test`, either through
/// `for`/`id` or by nesting
fn labelled(control: &str, label_test: &str) -> String {
    combine([
        format!(".//{control}[./@id = //label[{label_test}]/@for]"),
        format!(".//label[{label_test}]//{control}"),
    ])
}

fn label_equals(lit: &str) -> String {
    format!("normalize-space(string(.)) = {lit}")
}

fn label_contains(lit: &str) -> String {
    format!("contains(normalize-space(string(.)), {lit})")
}

fn literal_selector(text: &str) -> Query {
    Query::css(text)
}

// Field

fn field_label_exact(text: &str) -> Query {
    Query::xpath(labelled(FILLABLE, &label_equals(&literal(text))))
}

fn field_label_contains(text: &str) -> Query {
    Query::xpath(labelled(FILLABLE, &label_contains(&literal(text))))
}

fn field_name(text: &str) -> Query {
    Query::xpath(format!(
        ".//*[self::input | self::textarea | self::select][./@name = {}]",
        literal(text)
    ))
}

fn field_placeholder(text: &str) -> Query {
    let lit = literal(text);
    Query::xpath(format!(
        ".//{FILLABLE}[./@placeholder = {lit} or ./@aria-label = {lit}]"
    ))
}

// Clickable

fn clickable_narrow(text: &str) -> Query {
    let lit = literal(text);
    Query::xpath(combine([
        format!(".//a[normalize-space(.) = {lit}]"),
        format!(".//button[normalize-space(.) = {lit}]"),
        format!(".//a/img[normalize-space(@alt) = {lit}]/ancestor::a"),
        format!(".//{BUTTON_INPUT}[normalize-space(@value) = {lit}]"),
        format!(".//*[self::a or self::button or self::input][normalize-space(@title) = {lit}]"),
    ]))
}

fn clickable_wide(text: &str) -> Query {
    let lit = literal(text);
    Query::xpath(combine([
        format!(
            ".//a[./@href][(contains(normalize-space(string(.)), {lit})) or .//img[contains(./@alt, {lit})]]"
        ),
        format!(".//{BUTTON_INPUT}[contains(./@value, {lit})]"),
        format!(".//input[./@type = 'image'][contains(./@alt, {lit})]"),
        format!(".//button[contains(normalize-space(string(.)), {lit})]"),
        format!(".//{BUTTON_INPUT}[./@name = {lit}]"),
        format!(".//button[./@name = {lit}]"),
    ]))
}

// Checkable

fn checkable_label(text: &str) -> Query {
    Query::xpath(labelled(CHECKABLE_INPUT, &label_contains(&literal(text))))
}

fn checkable_name(text: &str) -> Query {
    Query::xpath(format!(".//{CHECKABLE_INPUT}[./@name = {}]", literal(text)))
}

static FIELD: &[Strategy] = &[
    Strategy {
        name: "label-exact",
        build: field_label_exact,
    },
    Strategy {
        name: "label-contains",
        build: field_label_contains,
    },
    Strategy {
        name: "name",
        build: field_name,
    },
    Strategy {
        name: "placeholder",
        build: field_placeholder,
    },
    Strategy {
        name: "literal",
        build: literal_selector,
    },
];

static CLICKABLE: &[Strategy] = &[
    Strategy {
        name: "narrow",
        build: clickable_narrow,
    },
    Strategy {
        name: "wide",
        build: clickable_wide,
    },
    Strategy {
        name: "literal",
        build: literal_selector,
    },
];

static CHECKABLE: &[Strategy] = &[
    Strategy {
        name: "label",
        build: checkable_label,
    },
    Strategy {
        name: "name",
        build: checkable_name,
    },
    Strategy {
        name: "literal",
        build: literal_selector,
    },
];

static CONTAINMENT: &[Strategy] = &[Strategy {
    name: "literal",
    build: literal_selector,
}];

#[cfg(test)]
#[path = "strategy_test.rs"]
mod strategy_test;
