//! Test utilities for the crate.

use std::{cell::RefCell, sync::Once};

use anyhow::Result;
use log::{Level, Log, Metadata, Record};

use crate::{figure::Figure, window::FigureWindow};

/// A window that remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingWindow {
    pub shows: usize,
    pub redraws: usize,
    pub closed: bool,
    /// How many subplots the figure had at the most recent show or redraw.
    pub last_subplot_count: usize,
}

impl FigureWindow for RecordingWindow {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.shows += 1;
        self.last_subplot_count = figure.subplot_count();
        Ok(())
    }

    fn redraw(&mut self, figure: &Figure) -> Result<()> {
        self.redraws += 1;
        self.last_subplot_count = figure.subplot_count();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

/// A logger which keeps records per thread, so that tests running in
/// parallel only ever see their own log output.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT_LOGGER: Once = Once::new();

/// Run `f` and return everything it logged at `level`.
pub fn capture_logs<T>(
    level: Level,
    f: impl FnOnce() -> T,
) -> (T, Vec<String>) {
    INIT_LOGGER.call_once(|| {
        // Only fails if another logger got there first, and then we'd
        // simply capture nothing.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let messages = CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    });
    (result, messages)
}
