use formfill_engine::{
    infer_group_label, infer_label, infer_option_label, resolve_target, Document,
    HeuristicSettings, InferredLabel, LabelSource,
};
use pretty_assertions::assert_eq;

fn label_of(html: &str, key: &str) -> Option<InferredLabel> {
    let doc = Document::parse_fragment(html);
    let node = resolve_target(&doc, key).expect("control present");
    let element = doc.element(node).expect("element");
    infer_label(&doc, element, &HeuristicSettings::default())
}

fn label(source: LabelSource, text: &str) -> Option<InferredLabel> {
    Some(InferredLabel {
        source,
        text: text.to_string(),
    })
}

#[test]
fn aria_label_beats_wrapping_label() {
    let html = r#"<label>Wrapped text <input name="q" aria-label="Search query"></label>"#;
    assert_eq!(label_of(html, "q"), label(LabelSource::AriaLabel, "Search query"));
}

#[test]
fn aria_label_is_used_verbatim() {
    let html = r#"<input name="q" aria-label=" Spaced  label ">"#;
    assert_eq!(label_of(html, "q"), label(LabelSource::AriaLabel, " Spaced  label "));
}

#[test]
fn labelledby_joins_every_referenced_element() {
    let html = r#"
        <span id="a">Billing</span><span id="b">  postcode </span>
        <input name="zip" aria-labelledby="a missing b">
    "#;
    assert_eq!(
        label_of(html, "zip"),
        label(LabelSource::AriaLabelledBy, "Billing postcode")
    );
}

#[test]
fn explicit_label_for_requires_markup_id() {
    let with_id = r#"<label for="email">Email address</label><div><input id="email"></div>"#;
    assert_eq!(
        label_of(with_id, "email"),
        label(LabelSource::LabelFor, "Email address")
    );

    let without_id = r#"<label for="email">Email address</label><p><input name="email"></p>"#;
    assert_eq!(label_of(without_id, "email"), None);
}

#[test]
fn wrapping_label_excludes_select_options() {
    let html = r#"<label>Country <select name="country"><option>Canada</option></select></label>"#;
    assert_eq!(label_of(html, "country"), label(LabelSource::WrappingLabel, "Country"));
}

#[test]
fn preceding_sibling_label_is_used() {
    let html = r#"<p><label>Phone</label><span>+1</span><input name="phone"></p>"#;
    assert_eq!(label_of(html, "phone"), label(LabelSource::SiblingLabel, "Phone"));
}

#[test]
fn sibling_label_bound_to_another_control_is_skipped() {
    let html = r#"<p><label>City</label><label for="other">Other</label><input name="city"></p>"#;
    assert_eq!(label_of(html, "city"), label(LabelSource::SiblingLabel, "City"));
}

#[test]
fn container_first_line_is_the_last_resort() {
    let html = r#"<div class="row"><span>Years of experience</span><p>Rounded down</p><input name="years"></div>"#;
    assert_eq!(
        label_of(html, "years"),
        label(LabelSource::ContainerText, "Years of experience")
    );
}

#[test]
fn long_container_text_is_not_a_label() {
    let prose = "word ".repeat(40);
    let html = format!(r#"<div>{prose}<input name="essay"></div>"#);
    assert_eq!(label_of(&html, "essay"), None);
}

#[test]
fn container_threshold_is_tunable() {
    let html = r#"<div>Preferred pronouns<input name="pronouns"></div>"#;
    let doc = Document::parse_fragment(html);
    let element = doc.element(resolve_target(&doc, "pronouns").unwrap()).unwrap();
    let strict = HeuristicSettings {
        label_fallback_max_chars: 5,
        ..HeuristicSettings::default()
    };
    assert_eq!(infer_label(&doc, element, &strict), None);
}

#[test]
fn option_cascade_stops_before_container_text() {
    let html = r#"<div>Remote work?<input type="radio" name="wfh" value="yes"></div>"#;
    let doc = Document::parse_fragment(html);
    let element = doc.element(resolve_target(&doc, "wfh").unwrap()).unwrap();
    assert_eq!(
        infer_option_label(&doc, element, &HeuristicSettings::default()),
        None
    );
}

#[test]
fn group_label_prefers_fieldset_legend() {
    let html = r#"
        <fieldset><legend>Do you need sponsorship?</legend>
            <label><input type="radio" name="visa" value="yes"> Yes</label>
            <label><input type="radio" name="visa" value="no"> No</label>
        </fieldset>
    "#;
    let doc = Document::parse_fragment(html);
    let element = doc.element(resolve_target(&doc, "visa").unwrap()).unwrap();
    assert_eq!(
        infer_group_label(&doc, element, &HeuristicSettings::default()),
        label(LabelSource::GroupLegend, "Do you need sponsorship?")
    );
}

#[test]
fn group_label_falls_back_to_the_enclosing_container() {
    let html = r#"
        <div>
            <p>Open to relocation?</p>
            <input type="radio" name="move" id="move-y"><label for="move-y">Yes</label>
            <input type="radio" name="move" id="move-n"><label for="move-n">No</label>
        </div>
    "#;
    let doc = Document::parse_fragment(html);
    let element = doc.element(resolve_target(&doc, "move").unwrap()).unwrap();
    assert_eq!(
        infer_group_label(&doc, element, &HeuristicSettings::default()),
        label(LabelSource::ContainerText, "Open to relocation?")
    );
}

#[test]
fn per_option_wrappers_are_not_the_group_container() {
    let html = r#"
        <section>
            <h3>Preferred shift</h3>
            <div class="option"><input type="radio" name="shift" value="day"> Day</div>
            <div class="option"><input type="radio" name="shift" value="night"> Night</div>
        </section>
    "#;
    let doc = Document::parse_fragment(html);
    let element = doc.element(resolve_target(&doc, "shift").unwrap()).unwrap();
    assert_eq!(
        infer_group_label(&doc, element, &HeuristicSettings::default()),
        label(LabelSource::ContainerText, "Preferred shift")
    );
}
