//! Structural probe lists used to find the compose surface.

use serde::{Deserialize, Serialize};

/// Ordered probe lists. Each list is tried front to back and the first
/// match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Compose toolbar the controls are injected into.
    #[serde(default = "default_toolbar")]
    pub toolbar: Vec<String>,

    /// Read-only content of the email being replied to.
    #[serde(default = "default_email_content")]
    pub email_content: Vec<String>,

    /// Editable compose region receiving the reply.
    #[serde(default = "default_compose_box")]
    pub compose_box: Vec<String>,

    /// Added nodes matching one of these mean a compose surface may have appeared.
    #[serde(default = "default_compose_signature")]
    pub compose_signature: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            toolbar: default_toolbar(),
            email_content: default_email_content(),
            compose_box: default_compose_box(),
            compose_signature: default_compose_signature(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_toolbar() -> Vec<String> {
    strings(&["tr.btC", ".gU.Up", "[role=\"dialog\"]", ".aDh"])
}

fn default_email_content() -> Vec<String> {
    strings(&[".a3s.aiL", ".h7", ".gmail_quote", "[role=\"presentation\"]"])
}

fn default_compose_box() -> Vec<String> {
    strings(&["[role=\"textbox\"][g_editable=\"true\"]"])
}

fn default_compose_signature() -> Vec<String> {
    strings(&[".aDh", ".btC", "[role=\"dialog\"]"])
}
