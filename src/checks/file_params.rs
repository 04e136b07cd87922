//! File-typed parameter probe for the Neural Amp Modeler and Ratatouille.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::config::Settings;
use crate::locator::{Located, PluginLocator};
use crate::printer::Printer;
use crate::reporter::{MarkerCategory, MetadataReporter};
use crate::utils::Runner;

pub const NAME: &str = "lv2-file-params";
pub const ABOUT: &str = "Check LV2 plugins for file (atom:Path) parameters";
pub const DEFAULT_TIMEOUT: Option<Duration> = Some(Duration::from_secs(10));

struct PluginCheck {
    name: &'static str,
    fragment: &'static str,
    marker: MarkerCategory,
}

const fn path_marker(pattern: &'static str) -> MarkerCategory {
    MarkerCategory {
        title: None,
        pattern,
        context: 5,
        found_heading: "Parameters with atom:Path:",
        missing_message: "No atom:Path parameters found",
    }
}

const PLUGINS: &[PluginCheck] = &[
    PluginCheck {
        name: "Neural Amp Modeler",
        fragment: "neural",
        marker: path_marker("atom:Path|model"),
    },
    PluginCheck {
        name: "Ratatouille",
        fragment: "ratatouille",
        marker: path_marker("atom:Path|file"),
    },
];

const ARIEL_CHECKS: &[&str] = &[
    "Plugin loading messages",
    "File parameter support detection",
    "File dialog success/failure messages",
];

pub async fn run<R: Runner, W: Write>(
    runner: &R,
    settings: &Settings,
    printer: &mut Printer<W>,
) -> Result<()> {
    printer.line("Testing LV2 plugin file parameter support...")?;
    let locator = PluginLocator::new(runner, &settings.lv2ls);
    let reporter = MetadataReporter::new(runner, &settings.lv2info);

    for plugin in PLUGINS {
        printer.section(plugin.name)?;
        // A missing plugin only skips its own dump
        match locator.locate(plugin.fragment).await {
            Located::Found(uri) => {
                printer.success(&format!("Found URI: {uri}"))?;
                reporter.report_category(&uri, &plugin.marker, printer).await?;
            }
            Located::NotFound => printer.failure(&format!("{} plugin not found", plugin.name))?,
        }
    }

    printer.section("Testing Ariel's Detection")?;
    printer.line("Run Ariel and check the console output for:")?;
    printer.numbered(ARIEL_CHECKS)?;
    printer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::fake::ScriptedRunner;
    use crate::utils::CommandSpec;

    fn settings() -> Settings {
        Settings {
            lv2ls: "lv2ls".into(),
            lv2info: "lv2info".into(),
            timeout: DEFAULT_TIMEOUT,
            color: false,
        }
    }

    #[tokio::test]
    async fn missing_plugin_skips_its_dump() {
        let runner = ScriptedRunner::default()
            .reply(CommandSpec::new("lv2ls"), "http://example.org/neuralamp\n")
            .reply(
                CommandSpec::new("lv2info").arg("http://example.org/neuralamp"),
                "http://example.org/neuralamp\n\tParameter model\n\t\tRange: atom:Path\n",
            );
        let mut printer = Printer::new(Vec::new(), false);
        run(&runner, &settings(), &mut printer).await.unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();

        assert!(out.contains("✅ Found URI: http://example.org/neuralamp"));
        assert!(out.contains("Parameters with atom:Path:\nhttp://example.org/neuralamp\n\tParameter model"));
        assert!(out.contains("❌ Ratatouille plugin not found"));
        assert!(out.contains("3. File dialog success/failure messages"));
        assert_eq!(runner.programs(), vec!["lv2ls", "lv2info", "lv2ls"]);
    }

    #[tokio::test]
    async fn found_plugin_without_path_markers() {
        let runner = ScriptedRunner::default()
            .reply(CommandSpec::new("lv2ls"), "https://github.com/brummer10/Ratatouille#stereo\n")
            .reply(
                CommandSpec::new("lv2info").arg("https://github.com/brummer10/Ratatouille#stereo"),
                "Name: Ratatouille\nClass: Simulator\n",
            );
        let mut printer = Printer::new(Vec::new(), false);
        run(&runner, &settings(), &mut printer).await.unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();

        assert!(out.contains("❌ Neural Amp Modeler plugin not found"));
        assert!(out.contains("=== Ratatouille ===\n✅ Found URI: https://github.com/brummer10/Ratatouille#stereo\n❌ No atom:Path parameters found"));
    }
}
