//! Constructors and state helpers for the injected controls.
//!
//! Constructors build detached subtrees; the coordinator decides where they
//! go. The marker classes are how an earlier injection is recognized.

use compose_assist_dom::{Document, DomResult, NodeId, Selector, el};

use crate::tone::{DEFAULT_TONE, TONES};

pub const CONTAINER_CLASS: &str = "ai-reply-container";
pub const TONE_SELECTOR_CLASS: &str = "ai-tone-selector";
pub const TRIGGER_CLASS: &str = "ai-reply-button";

pub const TRIGGER_LABEL: &str = "AI Reply";
pub const BUSY_LABEL: &str = "Generating...";
pub const TRIGGER_TOOLTIP: &str = "Generate AI Reply";
pub const TONE_SELECTOR_HINT: &str = "Select AI Reply Tone";

/// Host toolbar button classes, so the controls blend in.
const HOST_BUTTON_CLASSES: &str = "T-I J-J5-Ji aoO v7 T-I-atl L3";

/// The three nodes of one injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedControlSet {
    pub container: NodeId,
    pub tone_selector: NodeId,
    pub trigger: NodeId,
}

/// Selector for the container marker.
pub fn container_marker() -> Selector {
    Selector::class(CONTAINER_CLASS)
}

/// `<select>` with one option per catalog tone, the default preselected.
pub fn create_tone_selector(doc: &mut Document) -> NodeId {
    let options = TONES.iter().map(|tone| {
        let option = el("option").attr("value", tone.id).text(tone.label);
        if tone.id == DEFAULT_TONE {
            option.attr("selected", "")
        } else {
            option
        }
    });

    el("select")
        .class(HOST_BUTTON_CLASSES)
        .class(TONE_SELECTOR_CLASS)
        .attr("aria-label", TONE_SELECTOR_HINT)
        .attr("data-tooltip", TONE_SELECTOR_HINT)
        .children(options)
        .build(doc)
}

/// Button-like trigger labelled "AI Reply".
pub fn create_trigger_control(doc: &mut Document) -> NodeId {
    el("div")
        .class(HOST_BUTTON_CLASSES)
        .class(TRIGGER_CLASS)
        .attr("role", "button")
        .attr("data-tooltip", TRIGGER_TOOLTIP)
        .text(TRIGGER_LABEL)
        .build(doc)
}

pub fn create_container(doc: &mut Document) -> NodeId {
    el("div").class(CONTAINER_CLASS).build(doc)
}

/// Tone selector followed by the trigger, wrapped in a tagged container.
/// The result is still detached.
pub fn create_control_set(doc: &mut Document) -> DomResult<InjectedControlSet> {
    let container = create_container(doc);
    let tone_selector = create_tone_selector(doc);
    let trigger = create_trigger_control(doc);
    doc.append_child(container, tone_selector)?;
    doc.append_child(container, trigger)?;
    Ok(InjectedControlSet {
        container,
        tone_selector,
        trigger,
    })
}

/// Controls already present in `doc`, if any.
pub fn find_control_set(doc: &Document) -> Option<InjectedControlSet> {
    let container = doc.query_selector(&container_marker())?;
    let child_with = |class: &str| {
        doc.children(container)
            .iter()
            .copied()
            .find(|&child| doc.has_class(child, class))
    };
    Some(InjectedControlSet {
        container,
        tone_selector: child_with(TONE_SELECTOR_CLASS)?,
        trigger: child_with(TRIGGER_CLASS)?,
    })
}

/// Value of the selected option, or the default tone.
pub fn selected_tone(doc: &Document, tone_selector: NodeId) -> String {
    doc.children(tone_selector)
        .iter()
        .find(|&&option| doc.attribute(option, "selected").is_some())
        .and_then(|&option| doc.attribute(option, "value"))
        .unwrap_or(DEFAULT_TONE)
        .to_string()
}

/// Select the option with `tone`. Returns `false`, changing nothing, when
/// the selector has no such option.
pub fn select_tone(doc: &mut Document, tone_selector: NodeId, tone: &str) -> DomResult<bool> {
    let options = doc.children(tone_selector).to_vec();
    if !options
        .iter()
        .any(|&option| doc.attribute(option, "value") == Some(tone))
    {
        return Ok(false);
    }
    for option in options {
        if doc.attribute(option, "value") == Some(tone) {
            doc.set_attribute(option, "selected", "")?;
        } else {
            doc.remove_attribute(option, "selected")?;
        }
    }
    Ok(true)
}

pub fn is_busy(doc: &Document, trigger: NodeId) -> bool {
    doc.attribute(trigger, "disabled").is_some()
}

/// Show progress and block further activation.
pub fn set_busy(doc: &mut Document, trigger: NodeId) -> DomResult<()> {
    doc.set_text(trigger, BUSY_LABEL)?;
    doc.set_attribute(trigger, "disabled", "")?;
    doc.set_attribute(trigger, "aria-disabled", "true")
}

/// Restore the label and re-enable activation.
pub fn set_idle(doc: &mut Document, trigger: NodeId) -> DomResult<()> {
    doc.set_text(trigger, TRIGGER_LABEL)?;
    doc.remove_attribute(trigger, "disabled")?;
    doc.remove_attribute(trigger, "aria-disabled")
}

#[cfg(test)]
#[path = "controls_tests.rs"]
mod tests;
