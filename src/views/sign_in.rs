use super::alert::{alert, AlertKind};
use crate::features::auth::{DEMO_IDENTITY, DEMO_SECRET};

/// Inputs for the sign-in surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignInState<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
}

#[must_use]
pub fn render_sign_in(state: SignInState<'_>) -> String {
    let mut lines = vec![
        "Get Started".to_string(),
        "Use demo credentials or register a new admin.".to_string(),
        format!("  Demo: {DEMO_IDENTITY} / {DEMO_SECRET}"),
        "  login [<email> <password>]    register <email> <password>".to_string(),
    ];

    if state.loading {
        lines.push(alert(AlertKind::Info, "Signing in..."));
    }
    if let Some(message) = state.error {
        lines.push(alert(AlertKind::Error, message));
    }

    lines.join("\n")
}
