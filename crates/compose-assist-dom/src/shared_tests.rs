use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::builder::el;

fn page() -> SharedDocument {
    SharedDocument::new(Document::new())
}

#[tokio::test]
async fn test_one_batch_per_mutate() {
    let page = page();
    let mut rx = page.observe();

    page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div")).unwrap();
        doc.append_spec(body, &el("div")).unwrap();
    });

    let batch = rx.try_recv().unwrap();
    assert_eq!(batch.len(), 2);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_detached_changes_produce_no_batch() {
    let page = page();
    let mut rx = page.observe();

    page.mutate(|doc| {
        let a = doc.create_element("div");
        let b = doc.create_element("span");
        doc.append_child(a, b).unwrap();
    });

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_reobserve_closes_previous_receiver() {
    let page = page();
    let mut first = page.observe();
    let mut second = page.observe();

    page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("p")).unwrap();
    });

    assert!(first.recv().await.is_none());
    assert_eq!(second.try_recv().unwrap().len(), 1);
}

#[tokio::test]
async fn test_disconnect_closes_receiver() {
    let page = page();
    let mut rx = page.observe();
    page.disconnect();
    assert!(rx.recv().await.is_none());
}

#[test]
fn test_click_invokes_listeners() {
    let page = page();
    let button = page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div").attr("role", "button")).unwrap()
    });

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    page.add_click_listener(
        button,
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    assert!(page.click(button));
    assert!(page.click(button));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_click_without_listener_is_not_delivered() {
    let page = page();
    let node = page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div")).unwrap()
    });
    assert!(!page.click(node));
}

#[test]
fn test_click_blocked_when_disabled() {
    let page = page();
    let (wrapper, button) = page.mutate(|doc| {
        let body = doc.body();
        let wrapper = doc
            .append_spec(body, &el("div").child(el("div").attr("role", "button")))
            .unwrap();
        (wrapper, doc.first_child(wrapper).unwrap())
    });

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    page.add_click_listener(
        button,
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    page.mutate(|doc| doc.set_attribute(button, "aria-disabled", "true").unwrap());
    assert!(!page.click(button));

    page.mutate(|doc| {
        doc.remove_attribute(button, "aria-disabled").unwrap();
        doc.set_attribute(wrapper, "disabled", "").unwrap();
    });
    assert!(!page.click(button));

    page.mutate(|doc| doc.remove_attribute(wrapper, "disabled").unwrap());
    assert!(page.click(button));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_removed_node_loses_listeners() {
    let page = page();
    let (wrapper, button) = page.mutate(|doc| {
        let body = doc.body();
        let wrapper = doc
            .append_spec(body, &el("div").child(el("div").attr("role", "button")))
            .unwrap();
        (wrapper, doc.first_child(wrapper).unwrap())
    });

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    page.add_click_listener(
        button,
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert!(page.has_click_listener(button));

    page.mutate(|doc| doc.remove(wrapper).unwrap());

    assert!(!page.has_click_listener(button));
    assert!(!page.click(button));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_click_on_detached_node_is_not_delivered() {
    let page = page();
    let button = page.mutate(|doc| doc.create_element("div"));

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    page.add_click_listener(
        button,
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    assert!(!page.click(button));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unrelated_removal_keeps_connected_listeners() {
    let page = page();
    let (button, other) = page.mutate(|doc| {
        let body = doc.body();
        let button = doc.append_spec(body, &el("div").attr("role", "button")).unwrap();
        let other = doc.append_spec(body, &el("p")).unwrap();
        (button, other)
    });
    page.add_click_listener(button, Arc::new(|_| {}));

    page.mutate(|doc| doc.remove(other).unwrap());

    assert!(page.has_click_listener(button));
    assert!(page.click(button));
}

#[test]
fn test_listener_can_mutate_document() {
    let page = page();
    let button = page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div").text("AI Reply")).unwrap()
    });

    let handle = page.clone();
    page.add_click_listener(
        button,
        Arc::new(move |node| {
            handle.mutate(|doc| doc.set_text(node, "Generating...").unwrap());
        }),
    );

    assert!(page.click(button));
    assert_eq!(page.read(|doc| doc.inner_text(button)), "Generating...");
}

#[test]
fn test_snapshot_is_independent() {
    let page = page();
    let snapshot = page.snapshot();
    page.mutate(|doc| {
        let body = doc.body();
        doc.append_spec(body, &el("div")).unwrap();
    });

    assert!(snapshot.children(snapshot.body()).is_empty());
    assert_eq!(page.read(|doc| doc.children(doc.body()).len()), 1);
}
