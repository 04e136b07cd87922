//! Filtered excerpts of a plugin's introspection dump.

use std::io::Write;

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;

use crate::locator::PluginUri;
use crate::printer::Printer;
use crate::utils::{grep_context, CommandSpec, Runner};

/// A marker searched for in the dump, with how to present it.
#[derive(Debug, Clone, Copy)]
pub struct MarkerCategory {
    /// Section header; `None` prints the result under the caller's section.
    pub title: Option<&'static str>,
    pub pattern: &'static str,
    /// Lines kept before and after each match.
    pub context: usize,
    pub found_heading: &'static str,
    pub missing_message: &'static str,
}

impl MarkerCategory {
    pub fn regex(&self) -> Result<Regex> {
        Regex::new(self.pattern)
            .with_context(|| format!("invalid marker pattern `{}`", self.pattern))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Matched(String),
    Missing,
}

pub struct MetadataReporter<'a, R> {
    runner: &'a R,
    program: &'a str,
}

impl<'a, R: Runner> MetadataReporter<'a, R> {
    pub fn new(runner: &'a R, program: &'a str) -> Self {
        Self { runner, program }
    }

    /// Dump `uri` and filter it by `category`. A failed dump is a miss.
    pub async fn inspect(&self, uri: &PluginUri, category: &MarkerCategory) -> Result<Finding> {
        let regex = category.regex()?;
        let spec = CommandSpec::new(self.program).arg(uri.as_str());
        let result = self.runner.run(&spec).await;
        if !result.success() {
            debug!("{spec} exited with {}: {}", result.status, result.stderr.trim());
        }
        Ok(match grep_context(&result.stdout, &regex, category.context) {
            Some(block) => Finding::Matched(block),
            None => Finding::Missing,
        })
    }

    pub async fn report_category<W: Write>(
        &self,
        uri: &PluginUri,
        category: &MarkerCategory,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        if let Some(title) = category.title {
            printer.section(title)?;
        }
        match self.inspect(uri, category).await? {
            Finding::Matched(block) => {
                printer.heading(category.found_heading)?;
                printer.block(&block)?;
            }
            Finding::Missing => printer.failure(category.missing_message)?,
        }
        Ok(())
    }

    /// Report every category in order; a miss never stops the rest.
    pub async fn report<W: Write>(
        &self,
        uri: &PluginUri,
        categories: &[MarkerCategory],
        printer: &mut Printer<W>,
    ) -> Result<()> {
        for category in categories {
            self.report_category(uri, category, printer).await?;
        }
        Ok(())
    }
}
