//! Alert lines for success and error messages. Messages must be safe to render
//! and should never include secrets or tokens.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
    Info,
}

/// Renders a prefixed alert line.
#[must_use]
pub fn alert(kind: AlertKind, message: &str) -> String {
    let label = match kind {
        AlertKind::Error => "error",
        AlertKind::Success => "ok",
        AlertKind::Info => "info",
    };

    format!("[{label}] {message}")
}
