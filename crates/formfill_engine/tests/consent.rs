use formfill_engine::{
    consent_haystack, consent_pass, fill_page, resolve_target, Document, EventKind, FillMapping,
    HeuristicSettings, Page,
};
use pretty_assertions::assert_eq;

#[test]
fn privacy_checkbox_is_checked_with_an_empty_mapping() {
    let mut page = Page::new(Document::parse_fragment(
        r#"<div class="form-group"><input type="checkbox" id="privacy"> I agree to the Privacy Policy</div>"#,
    ));

    let outcome = fill_page(&mut page, &FillMapping::new(), &HeuristicSettings::default());

    assert_eq!(outcome.filled, 0);
    assert_eq!(outcome.consented, 1);
    assert_eq!(outcome.count(), 1);
    let doc = page.top().document().expect("scriptable top");
    let node = resolve_target(doc, "privacy").unwrap();
    assert!(doc.is_checked(node));
    assert_eq!(doc.events().last().map(|event| event.kind), Some(EventKind::Click));
}

#[test]
fn unrelated_checkboxes_are_left_alone() {
    let mut doc = Document::parse_fragment(
        r#"
        <div><label><input type="checkbox" name="newsletter"> Send me the weekly digest</label></div>
        <div><label><input type="checkbox" name="gdpr"> GDPR data processing</label></div>
        "#,
    );
    let settings = HeuristicSettings::default();

    assert_eq!(consent_pass(&mut doc, &settings), 1);
    let newsletter = resolve_target(&doc, "newsletter").unwrap();
    let gdpr = resolve_target(&doc, "gdpr").unwrap();
    assert!(!doc.is_checked(newsletter));
    assert!(doc.is_checked(gdpr));
}

#[test]
fn box_checked_in_markup_is_neither_toggled_nor_counted() {
    let mut page = Page::new(Document::parse_fragment(
        r#"<p><label><input type="checkbox" name="terms" checked>Accept the terms</label></p>"#,
    ));

    let outcome = fill_page(&mut page, &FillMapping::new(), &HeuristicSettings::default());

    assert_eq!(outcome.consented, 0);
    let doc = page.top().document().unwrap();
    assert!(doc.is_checked(resolve_target(doc, "terms").unwrap()));
    assert!(doc.events().is_empty());
}

#[test]
fn consent_count_is_stable_across_passes() {
    let mut doc = Document::parse_fragment(
        r#"<p><label><input type="checkbox" name="terms">Accept the terms</label></p>"#,
    );
    let settings = HeuristicSettings::default();

    assert_eq!(consent_pass(&mut doc, &settings), 1);
    assert_eq!(consent_pass(&mut doc, &settings), 1);
    let clicks = doc
        .events()
        .iter()
        .filter(|event| event.kind == EventKind::Click)
        .count();
    assert_eq!(clicks, 1);
}

#[test]
fn disagreement_is_not_consent() {
    let mut doc = Document::parse_fragment(
        r#"<div><label><input type="checkbox" name="optout"> I disagree with sharing my data</label></div>"#,
    );
    assert_eq!(consent_pass(&mut doc, &HeuristicSettings::default()), 0);
    assert!(!doc.is_checked(resolve_target(&doc, "optout").unwrap()));
}

#[test]
fn haystack_combines_label_and_parent_text() {
    let doc = Document::parse_fragment(
        r#"<p><input type="checkbox" name="ack" aria-label="Confirm"> I ACKNOWLEDGE the notice</p>"#,
    );
    let checkbox = doc
        .element(resolve_target(&doc, "ack").unwrap())
        .unwrap();
    let haystack = consent_haystack(&doc, checkbox, &HeuristicSettings::default());

    assert!(haystack.starts_with("confirm "));
    assert!(haystack.contains("i acknowledge the notice"));
}

#[test]
fn consent_keywords_are_configurable() {
    let mut doc = Document::parse_fragment(
        r#"<div><label><input type="checkbox" name="optin"> Ich stimme zu</label></div>"#,
    );
    let settings = HeuristicSettings {
        consent_keywords: vec!["stimme zu".to_string()],
        ..HeuristicSettings::default()
    };
    assert_eq!(consent_pass(&mut doc, &settings), 1);
}
