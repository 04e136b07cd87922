//! Parameter declaration probe for the Ratatouille plugin.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::config::Settings;
use crate::locator::{Located, PluginLocator};
use crate::printer::Printer;
use crate::reporter::{MarkerCategory, MetadataReporter};
use crate::utils::Runner;

pub const NAME: &str = "lv2-ratatouille-params";
pub const ABOUT: &str = "Check the Ratatouille LV2 plugin's parameter declarations";
pub const DEFAULT_TIMEOUT: Option<Duration> = None;

const FRAGMENT: &str = "ratatouille";

pub const EXPECTED_PARAMS: &[&str] = &["Neural Model A", "Neural Model B", "IR File", "IR File 1"];

const WRITABLE: MarkerCategory = MarkerCategory {
    title: Some("Checking for patch:writable parameters"),
    pattern: "patch:writable",
    context: 5,
    found_heading: "Found patch:writable declarations:",
    missing_message: "No patch:writable parameters found",
};

const PATH_RANGES: MarkerCategory = MarkerCategory {
    title: Some("Checking for atom:Path ranges"),
    pattern: "atom:Path",
    context: 5,
    found_heading: "Found atom:Path declarations:",
    missing_message: "No atom:Path ranges found",
};

const LABELS: MarkerCategory = MarkerCategory {
    title: Some("Checking parameter labels"),
    pattern: "rdfs:label",
    context: 2,
    found_heading: "Found parameter labels:",
    missing_message: "No parameter labels found",
};

const ATOM_PORTS: MarkerCategory = MarkerCategory {
    title: Some("Checking Atom ports"),
    pattern: "AtomPort",
    context: 5,
    found_heading: "Found Atom ports:",
    missing_message: "No Atom ports found",
};

pub async fn run<R: Runner, W: Write>(
    runner: &R,
    settings: &Settings,
    printer: &mut Printer<W>,
) -> Result<()> {
    printer.line("Testing Ratatouille LV2 plugin parameter detection...")?;

    // Without a URI there is nothing to inspect
    let uri = match PluginLocator::new(runner, &settings.lv2ls).locate(FRAGMENT).await {
        Located::Found(uri) => uri,
        Located::NotFound => {
            printer.failure("Ratatouille plugin not found")?;
            return printer.flush();
        }
    };
    printer.success(&format!("Found Ratatouille URI: {uri}"))?;

    let reporter = MetadataReporter::new(runner, &settings.lv2info);
    reporter.report(&uri, &[WRITABLE, PATH_RANGES, LABELS], printer).await?;

    // Static checklist, not derived from the dump
    printer.section("Expected Parameters")?;
    for param in EXPECTED_PARAMS {
        printer.bullet(param)?;
    }
    printer.line("")?;
    printer.success(&format!("Should detect {} file parameter controls", EXPECTED_PARAMS.len()))?;

    reporter.report_category(&uri, &ATOM_PORTS, printer).await?;
    printer.flush()
}
