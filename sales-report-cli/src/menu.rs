//! Menu dispatch and report session
//!
//! Implements the fixed navigation menu (selection by exact label) and the
//! session that keeps the last rendered page. One selection triggers one
//! computation and one render.

use crate::report::{OutputFormat, Renderer};
use anyhow::Result;
use sales_report::{compute_report, Dataset, ReportError, ReportKind, ReportParameters};
use std::io::{BufRead, Write};

/// Label of the non-report landing page
pub const HOME_LABEL: &str = "Home";

/// A resolved menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Home,
    Report(ReportKind),
}

impl MenuChoice {
    /// Exact label match; unknown labels select nothing
    pub fn from_label(label: &str) -> Option<MenuChoice> {
        if label == HOME_LABEL {
            return Some(MenuChoice::Home);
        }
        ReportKind::from_label(label).map(MenuChoice::Report)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Home => HOME_LABEL,
            MenuChoice::Report(kind) => kind.label(),
        }
    }
}

/// All menu labels in display order
pub fn menu_labels() -> Vec<&'static str> {
    std::iter::once(HOME_LABEL)
        .chain(ReportKind::ALL.iter().map(|k| k.label()))
        .collect()
}

/// A rendered page kept by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub label: String,
    pub body: String,
}

/// What a selection did
#[derive(Debug)]
pub enum Outcome {
    /// A new page was rendered and is now current
    Rendered,
    /// The label matched no menu entry; nothing changed
    Ignored,
    /// The report could not be computed; the previous page stays current
    Failed(ReportError),
}

/// A report browsing session over one immutable dataset
pub struct Session<'a> {
    dataset: &'a Dataset,
    renderer: &'a dyn Renderer,
    params: ReportParameters,
    current: Option<RenderedPage>,
}

impl<'a> Session<'a> {
    pub fn new(dataset: &'a Dataset, renderer: &'a dyn Renderer) -> Self {
        Self {
            dataset,
            renderer,
            params: ReportParameters::new(),
            current: None,
        }
    }

    /// Output format of the pages this session renders
    pub fn format(&self) -> OutputFormat {
        self.renderer.format()
    }

    /// The most recently rendered page
    pub fn current(&self) -> Option<&RenderedPage> {
        self.current.as_ref()
    }

    /// Select a menu entry by label
    ///
    /// Aggregation failures are returned as [`Outcome::Failed`]; only
    /// rendering failures are errors.
    pub fn select(&mut self, label: &str) -> Result<Outcome> {
        let Some(choice) = MenuChoice::from_label(label) else {
            log::debug!("No menu entry for {:?}", label);
            return Ok(Outcome::Ignored);
        };

        let body = match choice {
            MenuChoice::Home => self.renderer.render_home(&menu_labels())?,
            MenuChoice::Report(kind) => match compute_report(self.dataset, kind, &self.params) {
                Ok(report) => self.renderer.render_report(&report)?,
                Err(e) => {
                    log::warn!("Report {} failed: {}", kind, e);
                    return Ok(Outcome::Failed(e));
                }
            },
        };

        self.current = Some(RenderedPage {
            label: choice.label().to_string(),
            body,
        });
        Ok(Outcome::Rendered)
    }
}

/// Read labels line by line and render each selection to `output`
///
/// `quit`, `exit` or end of input ends the session. Errors are printed to
/// `output` and leave the previous page in place.
pub fn run_interactive<R, W, F>(
    session: &mut Session<'_>,
    input: R,
    mut output: W,
    mut emit: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&RenderedPage, &mut W) -> Result<()>,
{
    writeln!(output, "Menu: {}", menu_labels().join(" | "))?;

    for line in input.lines() {
        let line = line?;
        let label = line.trim();
        if label.is_empty() {
            continue;
        }
        if label == "quit" || label == "exit" {
            break;
        }

        match session.select(label)? {
            Outcome::Rendered => {
                if let Some(page) = session.current() {
                    emit(page, &mut output)?;
                }
            }
            Outcome::Ignored => {}
            Outcome::Failed(e) => writeln!(output, "Error: {}", e)?,
        }
        output.flush()?;
    }

    log::debug!("Session ended");
    Ok(())
}
