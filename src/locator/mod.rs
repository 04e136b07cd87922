//! Plugin discovery through the listing tool.

use std::fmt;

use log::{debug, info};

use crate::utils::{lines_containing, CommandSpec, Runner};

/// URI identifying an installed plugin. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginUri(String);

impl PluginUri {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Found(PluginUri),
    NotFound,
}

/// First line of `listing` containing `fragment` (case-insensitive), trimmed.
pub fn first_match(listing: &str, fragment: &str) -> Option<PluginUri> {
    lines_containing(listing, fragment).find_map(PluginUri::new)
}

pub struct PluginLocator<'a, R> {
    runner: &'a R,
    program: &'a str,
}

impl<'a, R: Runner> PluginLocator<'a, R> {
    pub fn new(runner: &'a R, program: &'a str) -> Self {
        Self { runner, program }
    }

    /// Run the listing tool and pick the plugin matching `fragment`.
    ///
    /// A failed listing counts as an empty one.
    pub async fn locate(&self, fragment: &str) -> Located {
        let result = self.runner.run(&CommandSpec::new(self.program)).await;
        if !result.success() {
            debug!("{} exited with {}: {}", self.program, result.status, result.stderr.trim());
        }
        match first_match(&result.stdout, fragment) {
            Some(uri) => {
                info!("located `{fragment}` at {uri}");
                Located::Found(uri)
            }
            None => Located::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::command::fake::ScriptedRunner;

    #[test]
    fn single_line_listing() {
        let uri = first_match("http://example.org/neuralamp\n", "neural").unwrap();
        assert_eq!(uri.as_str(), "http://example.org/neuralamp");
    }

    #[test]
    fn first_of_several_matches_is_trimmed() {
        let listing = "http://x/other\n   https://github.com/brummer10/Ratatouille#stereo  \nhttp://y/ratatouille2\n";
        let uri = first_match(listing, "RATATOUILLE").unwrap();
        assert_eq!(uri.as_str(), "https://github.com/brummer10/Ratatouille#stereo");
        assert_eq!(first_match(listing, "RATATOUILLE"), Some(uri));
    }

    #[test]
    fn empty_listing_has_no_match() {
        assert_eq!(first_match("", "ratatouille"), None);
        assert_eq!(first_match("http://a/b\n", "ratatouille"), None);
    }

    #[test]
    fn blank_uri_rejected() {
        assert_eq!(PluginUri::new("  \t"), None);
    }

    #[tokio::test]
    async fn locate_runs_listing_tool() {
        let runner = ScriptedRunner::default()
            .reply(CommandSpec::new("lv2ls"), "http://a/x\nhttp://example.org/neuralamp\n");
        let located = PluginLocator::new(&runner, "lv2ls").locate("Neural").await;
        let expected = PluginUri::new("http://example.org/neuralamp").unwrap();
        assert_eq!(located, Located::Found(expected));
        assert_eq!(runner.programs(), vec!["lv2ls"]);
    }

    #[tokio::test]
    async fn failed_listing_is_not_found() {
        let runner = ScriptedRunner::default().fail(CommandSpec::new("lv2ls"), "Command timed out");
        let located = PluginLocator::new(&runner, "lv2ls").locate("neural").await;
        assert_eq!(located, Located::NotFound);
    }
}
