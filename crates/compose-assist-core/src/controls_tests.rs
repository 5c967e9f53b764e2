use super::*;

#[test]
fn test_tone_selector_options() {
    let mut doc = Document::new();
    let select = create_tone_selector(&mut doc);

    assert_eq!(doc.tag_name(select), Some("select"));
    assert!(doc.has_class(select, TONE_SELECTOR_CLASS));
    assert_eq!(doc.attribute(select, "data-tooltip"), Some(TONE_SELECTOR_HINT));
    assert!(!doc.is_connected(select));

    let options = doc.children(select).to_vec();
    assert_eq!(options.len(), TONES.len());
    for (option, tone) in options.iter().zip(TONES.iter()) {
        assert_eq!(doc.attribute(*option, "value"), Some(tone.id));
        assert_eq!(doc.inner_text(*option), tone.label);
    }

    let selected: Vec<_> = options
        .iter()
        .filter(|&&o| doc.attribute(o, "selected").is_some())
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected_tone(&doc, select), DEFAULT_TONE);
}

#[test]
fn test_trigger_control() {
    let mut doc = Document::new();
    let trigger = create_trigger_control(&mut doc);

    assert_eq!(doc.attribute(trigger, "role"), Some("button"));
    assert!(doc.has_class(trigger, TRIGGER_CLASS));
    assert_eq!(doc.inner_text(trigger), TRIGGER_LABEL);
    assert_eq!(doc.attribute(trigger, "data-tooltip"), Some(TRIGGER_TOOLTIP));
    assert!(!is_busy(&doc, trigger));
}

#[test]
fn test_control_set_order() {
    let mut doc = Document::new();
    let set = create_control_set(&mut doc).unwrap();

    assert!(doc.has_class(set.container, CONTAINER_CLASS));
    assert_eq!(doc.children(set.container), &[set.tone_selector, set.trigger]);
    assert!(doc.matches(set.container, &container_marker()));
    assert!(!doc.is_connected(set.container));
}

#[test]
fn test_select_tone_keeps_single_selection() {
    let mut doc = Document::new();
    let select = create_tone_selector(&mut doc);

    assert!(select_tone(&mut doc, select, "friendly").unwrap());
    assert_eq!(selected_tone(&doc, select), "friendly");
    let selected = doc
        .children(select)
        .iter()
        .filter(|&&o| doc.attribute(o, "selected").is_some())
        .count();
    assert_eq!(selected, 1);

    assert!(!select_tone(&mut doc, select, "grumpy").unwrap());
    assert_eq!(selected_tone(&doc, select), "friendly");
}

#[test]
fn test_busy_and_idle() {
    let mut doc = Document::new();
    let trigger = create_trigger_control(&mut doc);

    set_busy(&mut doc, trigger).unwrap();
    assert!(is_busy(&doc, trigger));
    assert_eq!(doc.inner_text(trigger), BUSY_LABEL);
    assert!(doc.element(trigger).unwrap().is_disabled());

    set_idle(&mut doc, trigger).unwrap();
    assert!(!is_busy(&doc, trigger));
    assert_eq!(doc.inner_text(trigger), TRIGGER_LABEL);
    assert!(!doc.element(trigger).unwrap().is_disabled());
}

#[test]
fn test_find_control_set() {
    let mut doc = Document::new();
    assert_eq!(find_control_set(&doc), None);

    let set = create_control_set(&mut doc).unwrap();
    assert_eq!(find_control_set(&doc), None);

    let body = doc.body();
    doc.append_child(body, set.container).unwrap();
    assert_eq!(find_control_set(&doc), Some(set));
}
