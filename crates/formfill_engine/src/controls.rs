use scraper::ElementRef;

use crate::text::compact_whitespace;

/// Input types that never take user-entered values.
const NON_FIELD_INPUT_TYPES: &[&str] = &["hidden", "submit", "button"];

/// True for the elements the scanner reports and the injector will write:
/// non-button inputs, textareas, selects, ARIA comboboxes and editable hosts.
pub fn is_form_control(element: ElementRef<'_>) -> bool {
    let attrs = element.value();
    match attrs.name() {
        "input" => !NON_FIELD_INPUT_TYPES.contains(&input_type(element).as_str()),
        "textarea" | "select" => true,
        _ => attrs.attr("role").is_some_and(|role| role.trim().eq_ignore_ascii_case("combobox"))
            || is_content_editable(element),
    }
}

pub fn is_content_editable(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("contenteditable")
        .is_some_and(|value| !value.trim().eq_ignore_ascii_case("false"))
}

/// Lowercased `type` attribute of an input, `text` when missing or blank.
pub fn input_type(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("type")
        .map(|ty| ty.trim().to_ascii_lowercase())
        .filter(|ty| !ty.is_empty())
        .unwrap_or_else(|| "text".to_string())
}

/// Normalized control type: the input type, the tag for textarea/select, else
/// the ARIA role, else `textbox` for bare editable hosts.
pub fn control_kind(element: ElementRef<'_>) -> String {
    let attrs = element.value();
    match attrs.name() {
        "input" => input_type(element),
        "textarea" => "textarea".to_string(),
        "select" => "select".to_string(),
        other => attrs
            .attr("role")
            .and_then(|role| role.split_whitespace().next())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| {
                if is_content_editable(element) {
                    "textbox".to_string()
                } else {
                    other.to_string()
                }
            }),
    }
}

pub fn is_radio(element: ElementRef<'_>) -> bool {
    element.value().name() == "input" && input_type(element) == "radio"
}

pub fn is_checkbox(element: ElementRef<'_>) -> bool {
    element.value().name() == "input" && input_type(element) == "checkbox"
}

pub fn is_checkable(element: ElementRef<'_>) -> bool {
    is_radio(element) || is_checkbox(element)
}

pub fn is_required(element: ElementRef<'_>) -> bool {
    let attrs = element.value();
    attrs.attr("required").is_some()
        || attrs
            .attr("aria-required")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

/// `<option>` descendants of a select, in document order.
pub fn select_options(select: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    select
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "option")
        .collect()
}

/// Visible option text with whitespace collapsed.
pub fn option_label(option: ElementRef<'_>) -> String {
    compact_whitespace(&option.text().collect::<String>())
}

/// The value an option submits: its `value` attribute, else its text.
pub fn option_value(option: ElementRef<'_>) -> String {
    match option.value().attr("value") {
        Some(value) => value.to_string(),
        None => option_label(option),
    }
}
