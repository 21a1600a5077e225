//! The monitors that own our plots.

/// Anything that can own a [`crate::Plot`]. We only ever need to read its
/// display name, and only while building the figure title.
pub trait Monitor {
    /// The monitor's display name, if it has one.
    fn display_name(&self) -> Option<&str>;
}

/// A monitor that is nothing but a name. Handy for callers that have no
/// monitor object of their own, like our CLI.
#[derive(Debug, Clone, Default)]
pub struct NamedMonitor {
    pub name: Option<String>,
}

impl NamedMonitor {
    /// Create a monitor with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Create a monitor without a display name.
    pub fn anonymous() -> Self {
        Self { name: None }
    }
}

impl Monitor for NamedMonitor {
    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Build a figure title, prefixed with the monitor's name when it has one:
/// `"[name] title"`.
pub fn pretty_title(monitor: &dyn Monitor, title: &str) -> String {
    match monitor.display_name() {
        Some(name) => format!("[{}] {}", name, title),
        None => title.to_owned(),
    }
}
