//! A reference webmail page for the simulator and for tests.
//!
//! The layout mirrors the structure the default probes expect: an open
//! message whose body is `.a3s.aiL`, and a reply compose dialog holding a
//! `tr.btC` toolbar and a `[role="textbox"][g_editable="true"]` editor.

use compose_assist_dom::{Document, DomError, DomResult, NodeId, Selector, SharedDocument, el};

/// Email shown in the reading pane when none is given.
pub const SAMPLE_EMAIL: &str =
    "Hi team,\nCould we move Thursday's review to Friday morning?\nThanks, Ann";

/// Nodes of an open compose window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeWindow {
    pub dialog: NodeId,
    pub toolbar: NodeId,
    pub compose_box: NodeId,
}

/// Inbox with one open message and no compose window.
pub fn inbox_page(email: &str) -> DomResult<Document> {
    let mut doc = Document::new();
    let body = doc.body();

    let message = email
        .lines()
        .fold(el("div").class("a3s").class("aiL"), |div, line| {
            div.child(el("div").text(line))
        });

    doc.append_spec(
        body,
        &el("div").class("nH").children([
            el("div")
                .attr("role", "navigation")
                .child(el("a").attr("href", "#inbox").text("Inbox")),
            el("div").attr("role", "main").child(
                el("div")
                    .class("adn")
                    .child(el("h2").class("hP").text("Review moved?"))
                    .child(message),
            ),
        ]),
    )?;
    Ok(doc)
}

/// Open a reply compose window the way the host does: a burst of separate
/// host tasks, each producing its own mutation batch.
pub fn open_reply_compose(page: &SharedDocument) -> DomResult<ComposeWindow> {
    let dialog = page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div").attr("role", "dialog").class("nH"))
    })?;

    let toolbar = page.mutate(|doc| {
        let wrapper = doc.append_spec(
            dialog,
            &el("div")
                .class("aDh")
                .child(el("table").child(el("tbody").child(el("tr").class("btC")))),
        )?;
        let toolbar = doc
            .query_selector_within(wrapper, &Selector::parse("tr.btC")?)
            .ok_or(DomError::NodeNotFound(wrapper))?;
        doc.append_spec(
            toolbar,
            &el("td").class("gU").class("Up").child(
                el("div")
                    .attr("role", "button")
                    .class("T-I")
                    .text("Send"),
            ),
        )?;
        doc.append_spec(toolbar, &el("td").class("gU").child(el("div").text("Formatting")))?;
        Ok::<_, DomError>(toolbar)
    })?;

    let compose_box = page.mutate(|doc| {
        doc.append_spec(
            dialog,
            &el("div")
                .attr("role", "textbox")
                .attr("g_editable", "true")
                .attr("contenteditable", "true")
                .attr("aria-label", "Message Body"),
        )
    })?;

    Ok(ComposeWindow {
        dialog,
        toolbar,
        compose_box,
    })
}

/// Close a compose window.
pub fn close_compose(page: &SharedDocument, window: &ComposeWindow) -> DomResult<()> {
    page.mutate(|doc| doc.remove(window.dialog))
}
