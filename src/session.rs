//! Single-document session: current image, current options, last shown grid.
//!
//! Every render is tagged with a run id. Only the most recently started run
//! may replace the shown grid, so a slow stale run can never overwrite a
//! newer result.

use crate::grid::AsciiGrid;
use crate::options::RenderOptions;
use crate::resample::SourceImage;
use crate::{AsciixError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A self-contained pipeline run that can execute away from the session.
#[derive(Debug, Clone)]
pub struct RenderJob {
    ticket: RunTicket,
    source: Arc<SourceImage>,
    options: RenderOptions,
}

impl RenderJob {
    pub fn ticket(&self) -> RunTicket {
        self.ticket
    }

    pub fn run(self) -> (RunTicket, Result<AsciiGrid>) {
        (self.ticket, crate::convert(&self.source, &self.options))
    }
}

#[derive(Debug, Default)]
pub struct Session {
    source: Option<Arc<SourceImage>>,
    options: RenderOptions,
    last_started: u64,
    shown: Option<AsciiGrid>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, ..Self::default() })
    }

    /// Decode and adopt a new image. A failed decode keeps the previous one.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let source = SourceImage::decode(bytes)?;
        self.set_source(source);
        Ok(())
    }

    pub fn set_source(&mut self, source: SourceImage) {
        tracing::debug!(width = source.width(), height = source.height(), "image loaded");
        self.source = Some(Arc::new(source));
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replace the options snapshot. Invalid options are rejected and the
    /// current snapshot stays.
    pub fn set_options(&mut self, options: RenderOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Restore default options, keeping the loaded image.
    pub fn reset_options(&mut self) {
        self.options = RenderOptions::default();
    }

    /// Grid from the latest successful run, if any.
    pub fn output(&self) -> Option<&AsciiGrid> {
        self.shown.as_ref()
    }

    pub fn latest_run(&self) -> Option<RunTicket> {
        (self.last_started > 0).then_some(RunTicket(self.last_started))
    }

    /// Start a new run; any run started earlier becomes stale.
    pub fn start(&mut self) -> Result<RenderJob> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| AsciixError::InvalidInput("no image loaded".into()))?;
        self.last_started += 1;
        Ok(RenderJob {
            ticket: RunTicket(self.last_started),
            source,
            options: self.options.clone(),
        })
    }

    /// Accept a finished run. Stale results are dropped (`Ok(None)`); a failed
    /// latest run returns its error and leaves the shown grid untouched.
    pub fn complete(
        &mut self,
        ticket: RunTicket,
        result: Result<AsciiGrid>,
    ) -> Result<Option<&AsciiGrid>> {
        if ticket.0 != self.last_started {
            tracing::warn!(
                run = ticket.0,
                latest = self.last_started,
                "discarding stale render result"
            );
            return Ok(None);
        }
        self.shown = Some(result?);
        Ok(self.shown.as_ref())
    }

    /// Start, run and complete in one synchronous call.
    pub fn render(&mut self) -> Result<&AsciiGrid> {
        let (ticket, result) = self.start()?.run();
        self.complete(ticket, result)?
            .ok_or_else(|| AsciixError::InvalidInput("render superseded".into()))
    }
}
