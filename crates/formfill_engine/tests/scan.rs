use std::sync::Once;

use formfill_engine::{
    dedupe_fields, scan_document, scan_page, Document, FieldDescriptor, Frame, HeuristicSettings,
    Page, ScanError,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn scan_fragment(html: &str) -> Vec<FieldDescriptor> {
    scan_document(&Document::parse_fragment(html), &HeuristicSettings::default())
}

const APPLICATION_FORM: &str = r#"
<html>
<head><title>Careers at Acme</title></head>
<body>
  <h1>Senior Rust Engineer</h1>
  <span class="company-name">Acme Robotics</span>
  <form>
    <div class="form-group">
      <label for="first">First name</label>
      <input id="first" name="first_name" required>
    </div>
    <div class="form-group">
      <input name="email" type="email" placeholder="you@example.com">
    </div>
    <input type="hidden" name="csrf" value="abc">
    <input type="submit" value="Apply">
    <div class="form-group">
      <label for="country">Country</label>
      <select id="country">
        <option value="us">United States</option>
        <option value="ca">Canada</option>
      </select>
    </div>
    <fieldset>
      <legend>Work arrangement</legend>
      <label><input type="radio" name="wfh" value="yes"> Remote</label>
      <label><input type="radio" name="wfh" value="no"> Office</label>
      <label><input type="radio" name="wfh" value="hybrid"> Hybrid</label>
    </fieldset>
    <div><textarea name="cover" aria-label="Cover letter"></textarea></div>
    <div role="combobox" aria-label="Preferred city" id="city-picker"></div>
    <div contenteditable="true" aria-label="Notes" id="notes"></div>
    <div contenteditable="false" aria-label="Read only" id="ro"></div>
  </form>
</body>
</html>
"#;

#[test]
fn selects_every_fillable_control_once() {
    init_logging();
    let doc = Document::parse(APPLICATION_FORM, Some("https://jobs.acme.test/apply"));
    let fields = scan_document(&doc, &HeuristicSettings::default());

    let summary: Vec<(&str, &str, &str)> = fields
        .iter()
        .map(|f| (f.id.as_str(), f.kind.as_str(), f.label.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("first", "text", "First name"),
            ("email", "email", ""),
            ("country", "select", "Country"),
            ("wfh", "radio", "Work arrangement"),
            ("cover", "textarea", "Cover letter"),
            ("city-picker", "combobox", "Preferred city"),
            ("notes", "textbox", "Notes"),
        ]
    );
}

#[test]
fn descriptor_carries_name_placeholder_options_and_required() {
    let doc = Document::parse(APPLICATION_FORM, Some("https://jobs.acme.test/apply"));
    let fields = scan_document(&doc, &HeuristicSettings::default());

    let first = &fields[0];
    assert_eq!(first.name, "first_name");
    assert!(first.required);

    let email = &fields[1];
    assert_eq!(email.placeholder, "you@example.com");
    assert!(!email.required);

    let country = &fields[2];
    assert_eq!(country.options, vec!["United States", "Canada"]);

    let wfh = &fields[3];
    assert_eq!(wfh.options, vec!["Remote", "Office", "Hybrid"]);
}

#[test]
fn radio_group_collapses_to_one_descriptor() {
    let fields = scan_fragment(
        r#"<div>Shift
            <input type="radio" name="shift" value="day" aria-label="Day">
            <input type="radio" name="shift" value="night" aria-label="Night">
            <input type="radio" name="shift" value="any" aria-label="Any">
        </div>"#,
    );
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].id, "shift");
    assert_eq!(fields[0].options, vec!["Day", "Night", "Any"]);
}

#[test]
fn controls_without_any_signal_are_dropped() {
    let fields = scan_fragment(r#"<p><input name="mystery"></p><p><input name="x" placeholder="Search"></p>"#);
    let ids: Vec<&str> = fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["x"]);
}

#[test]
fn context_is_collapsed_and_capped() {
    let long = "lorem   ipsum\n\n dolor ".repeat(60);
    let html = format!(r#"<section><h3>About you</h3><p>{long}</p><input name="bio"></section>"#);
    let fields = scan_fragment(&html);
    let context = &fields[0].context;

    assert!(context.chars().count() <= 500);
    assert!(context.starts_with("About you lorem ipsum dolor"));
    assert!(!context.contains("  "));
    assert!(!context.contains('\n'));
}

#[test]
fn every_descriptor_has_an_identifying_signal() {
    let doc = Document::parse(APPLICATION_FORM, None);
    for field in scan_document(&doc, &HeuristicSettings::default()) {
        assert!(
            !field.label.is_empty() || !field.placeholder.is_empty() || !field.context.is_empty(),
            "field without signal: {field:?}"
        );
    }
}

#[test]
fn anonymous_controls_get_a_stable_synthesized_id() {
    let html = r#"<div>Nickname <input></div><div>Pronouns <input></div>"#;
    let first = scan_fragment(html);
    let second = scan_fragment(html);

    assert_eq!(first.len(), 2);
    assert!(first[0].id.starts_with("field-"));
    assert_ne!(first[0].id, first[1].id);
    assert_eq!(first, second);
}

#[test]
fn dedupe_keeps_first_label_kind_pair_and_is_idempotent() {
    let html = r#"
        <div class="desktop"><label>First Name <input name="fn_desktop"></label></div>
        <div class="mobile"><label>First Name <input name="fn_mobile"></label></div>
        <div><label>First Name <input name="fn_other" type="email"></label></div>
    "#;
    let once = dedupe_fields(scan_fragment(html));
    let twice = dedupe_fields(once.clone());

    let ids: Vec<&str> = once.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["fn_desktop", "fn_other"]);
    assert_eq!(once, twice);
}

#[test]
fn scan_page_aggregates_frames_and_uses_top_metadata_only() {
    init_logging();
    let frame = Document::parse(
        r#"<html><head><title>Widget</title></head><body>
            <h1>Embedded survey</h1><span class="company-name">Other Co</span>
            <div><label>Referral source <input name="referral"></label></div>
        </body></html>"#,
        Some("https://survey.example.net/embed"),
    );
    let page = Page::new(Document::parse(APPLICATION_FORM, Some("https://jobs.acme.test/apply")))
        .with_frame(Frame::Scriptable(frame))
        .with_frame(Frame::Denied {
            url: "https://ads.example.org".to_string(),
            reason: "cross-origin".to_string(),
        });

    let report = scan_page(&page, &HeuristicSettings::default()).expect("scan");

    assert_eq!(report.frames_scanned, 2);
    assert_eq!(report.frames_denied, 1);
    assert_eq!(report.metadata.company_name, "Acme Robotics");
    assert_eq!(report.metadata.job_title, "Senior Rust Engineer");
    assert_eq!(report.fields.last().map(|f| f.id.as_str()), Some("referral"));
    assert!(report
        .fields
        .iter()
        .all(|f| f.company_name == "Acme Robotics" && f.job_title == "Senior Rust Engineer"));
}

#[test]
fn metadata_falls_back_to_hostname_and_title() {
    let page = Page::new(Document::parse(
        r#"<html><head><title>Apply now</title></head><body><div><input name="q" placeholder="Name"></div></body></html>"#,
        Some("https://careers.initech.test/jobs/42"),
    ));
    let report = scan_page(&page, &HeuristicSettings::default()).unwrap();
    assert_eq!(report.metadata.company_name, "careers.initech.test");
    assert_eq!(report.metadata.job_title, "Apply now");
}

#[test]
fn srcdoc_frames_are_discovered_and_scanned() {
    let html = r#"<html><body>
        <div><label>Full name <input name="name"></label></div>
        <iframe srcdoc="<div><label>Portfolio URL <input name='portfolio'></label></div>"></iframe>
    </body></html>"#;
    let page = Page::from_html(html, Some("https://jobs.acme.test/"));
    assert_eq!(page.frame_count(), 2);

    let report = scan_page(&page, &HeuristicSettings::default()).unwrap();
    let ids: Vec<&str> = report.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["name", "portfolio"]);
}

#[test]
fn denied_top_frame_fails_the_scan() {
    let page = Page::denied("chrome://settings", "restricted scheme");
    let err = scan_page(&page, &HeuristicSettings::default()).unwrap_err();
    assert_eq!(
        err,
        ScanError::TopFrameDenied {
            url: "chrome://settings".to_string(),
            reason: "restricted scheme".to_string(),
        }
    );
}

#[test]
fn descriptor_serializes_with_matcher_field_names() {
    let fields = scan_fragment(r#"<div><label>Email <input name="email" type="email"></label></div>"#);
    let json = serde_json::to_value(&fields[0]).unwrap();
    assert_eq!(json["type"], "email");
    assert_eq!(json["label"], "Email");
    assert!(json.get("companyName").is_some());
    assert!(json.get("jobTitle").is_some());
}

#[test]
fn yes_no_groups_without_fieldsets_keep_their_own_questions() {
    let html = r#"
        <div class="question">
          <p>Are you authorized to work here?</p>
          <input type="radio" name="auth" id="auth-y" value="yes"><label for="auth-y">Yes</label>
          <input type="radio" name="auth" id="auth-n" value="no"><label for="auth-n">No</label>
        </div>
        <div class="question">
          <p>Will you need visa sponsorship?</p>
          <input type="radio" name="visa" id="visa-y" value="yes"><label for="visa-y">Yes</label>
          <input type="radio" name="visa" id="visa-n" value="no"><label for="visa-n">No</label>
        </div>
    "#;
    let fields = dedupe_fields(scan_fragment(html));

    let summary: Vec<(&str, &str, Vec<String>)> = fields
        .iter()
        .map(|field| (field.id.as_str(), field.label.as_str(), field.options.clone()))
        .collect();
    let yes_no = vec!["Yes".to_string(), "No".to_string()];
    assert_eq!(
        summary,
        vec![
            ("auth-y", "Are you authorized to work here?", yes_no.clone()),
            ("visa-y", "Will you need visa sponsorship?", yes_no),
        ]
    );
}
