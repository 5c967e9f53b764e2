//! Structural probes that find the compose surface in the host page.
//!
//! Every lookup walks an ordered probe list and returns the first match.
//! Nothing found is a normal answer; lookups never modify the page.

use compose_assist_config::LocatorConfig;
use compose_assist_dom::{Document, NodeId, Selector};
use tracing::trace;

use crate::error::AssistantError;

/// A named structural probe.
#[derive(Debug, Clone)]
pub struct Probe {
    name: String,
    selector: Selector,
}

impl Probe {
    pub fn parse(source: &str) -> Result<Self, AssistantError> {
        let selector = Selector::parse(source).map_err(|source_err| AssistantError::InvalidProbe {
            probe: source.to_string(),
            source: source_err,
        })?;
        Ok(Self {
            name: selector.as_str().to_string(),
            selector,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

fn parse_all(sources: &[String]) -> Result<Vec<Probe>, AssistantError> {
    sources.iter().map(|s| Probe::parse(s)).collect()
}

/// Ordered probe lists for each part of the compose surface.
#[derive(Debug, Clone)]
pub struct SurfaceLocator {
    toolbar: Vec<Probe>,
    email_content: Vec<Probe>,
    compose_box: Vec<Probe>,
    signature: Vec<Probe>,
}

impl SurfaceLocator {
    /// Build from configured probe lists. Any unparsable probe fails the
    /// whole locator.
    pub fn from_config(config: &LocatorConfig) -> Result<Self, AssistantError> {
        Ok(Self {
            toolbar: parse_all(&config.toolbar)?,
            email_content: parse_all(&config.email_content)?,
            compose_box: parse_all(&config.compose_box)?,
            signature: parse_all(&config.compose_signature)?,
        })
    }

    /// Locator with the built-in probe lists.
    pub fn with_defaults() -> Result<Self, AssistantError> {
        Self::from_config(&LocatorConfig::default())
    }

    pub fn toolbar_probes(&self) -> &[Probe] {
        &self.toolbar
    }

    pub fn email_content_probes(&self) -> &[Probe] {
        &self.email_content
    }

    pub fn compose_box_probes(&self) -> &[Probe] {
        &self.compose_box
    }

    pub fn signature_probes(&self) -> &[Probe] {
        &self.signature
    }

    fn first_match(doc: &Document, probes: &[Probe], what: &str) -> Option<NodeId> {
        probes.iter().find_map(|probe| {
            let found = doc.query_selector(probe.selector())?;
            trace!(probe = probe.name(), node = %found, "{what} found");
            Some(found)
        })
    }

    /// Toolbar of the open compose surface.
    pub fn find_compose_toolbar(&self, doc: &Document) -> Option<NodeId> {
        Self::first_match(doc, &self.toolbar, "compose toolbar")
    }

    /// Trimmed visible text of the email being replied to.
    pub fn find_email_content(&self, doc: &Document) -> Option<String> {
        Self::first_match(doc, &self.email_content, "email content")
            .map(|node| doc.inner_text(node).trim().to_string())
    }

    /// Editable region the reply is typed into.
    pub fn find_compose_box(&self, doc: &Document) -> Option<NodeId> {
        Self::first_match(doc, &self.compose_box, "compose box")
    }

    /// Whether `node` is, or contains, something that looks like a compose
    /// surface. Text nodes never qualify.
    pub fn is_compose_signature(&self, doc: &Document, node: NodeId) -> bool {
        if !doc.is_element(node) {
            return false;
        }
        self.signature.iter().any(|probe| {
            doc.matches(node, probe.selector())
                || doc.query_selector_within(node, probe.selector()).is_some()
        })
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
