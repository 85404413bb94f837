use std::collections::HashMap;
use std::fmt;

use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use serde::Serialize;
use url::Url;

use crate::controls::{control_kind, is_checkable, option_value, select_options};
use crate::text::rendered_text;

/// DOM events the injector simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Input,
    Change,
    Blur,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub target: NodeId,
    pub kind: EventKind,
    pub bubbles: bool,
}

/// Live state of one control, as reported back to a host after a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Default)]
struct LiveState {
    values: HashMap<NodeId, String>,
    checked: HashMap<NodeId, bool>,
    focused: Option<NodeId>,
    events: Vec<DomEvent>,
}

/// A parsed page document plus the mutable form state layered over it.
///
/// Markup is never edited. Values, checked flags, focus and the event log live
/// in an overlay keyed by node id, the same split a browser keeps between
/// attributes and properties.
pub struct Document {
    html: Html,
    url: Option<Url>,
    live: LiveState,
}

enum ClickEffect {
    Toggle(bool),
    SelectRadio(Vec<NodeId>),
    Plain,
}

impl Document {
    pub fn parse(html: &str, url: Option<&str>) -> Self {
        Self {
            html: Html::parse_document(html),
            url: url.and_then(|raw| Url::parse(raw).ok()),
            live: LiveState::default(),
        }
    }

    /// Parses markup without a surrounding document, handy for snippets.
    pub fn parse_fragment(html: &str) -> Self {
        Self {
            html: Html::parse_fragment(html),
            url: None,
            live: LiveState::default(),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolves a node id to an element; `None` once the node is gone or is
    /// not an element.
    pub fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        if id.is_empty() {
            return None;
        }
        self.elements().find(|el| el.value().id() == Some(id))
    }

    pub fn elements_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements()
            .filter(move |el| !name.is_empty() && el.value().attr("name") == Some(name))
    }

    pub fn element_by_name<'a>(&'a self, name: &'a str) -> Option<ElementRef<'a>> {
        self.elements_by_name(name).next()
    }

    /// Loose lookup: first element whose name or id equals `key`, ignoring
    /// ASCII case.
    pub fn element_by_name_or_id_ignore_case(&self, key: &str) -> Option<ElementRef<'_>> {
        if key.is_empty() {
            return None;
        }
        self.elements().find(|el| {
            let element = el.value();
            element.attr("name").is_some_and(|name| name.eq_ignore_ascii_case(key))
                || element.id().is_some_and(|id| id.eq_ignore_ascii_case(key))
        })
    }

    /// Trimmed `<title>` text, if present and non-empty.
    pub fn title(&self) -> Option<String> {
        self.elements()
            .find(|el| el.value().name() == "title")
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// Current value: the live overlay if the control was written, otherwise
    /// the default its markup implies.
    pub fn value(&self, node: NodeId) -> Option<String> {
        let element = self.element(node)?;
        if let Some(value) = self.live.values.get(&node) {
            return Some(value.clone());
        }
        Some(default_value(element))
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        match self.live.checked.get(&node) {
            Some(checked) => *checked,
            None => self
                .element(node)
                .is_some_and(|el| el.value().attr("checked").is_some()),
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.live.focused
    }

    /// Assigns a value. Returns `false` if the node no longer resolves.
    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> bool {
        if self.element(node).is_none() {
            return false;
        }
        self.live.values.insert(node, value.into());
        true
    }

    /// Moves focus to `node` and records a non-bubbling `focus` event.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if self.element(node).is_none() {
            return false;
        }
        self.live.focused = Some(node);
        self.record(node, EventKind::Focus, false);
        true
    }

    /// Simulates a user click: checkboxes toggle, radios become the checked
    /// member of their group, then a bubbling `click` is recorded.
    pub fn click(&mut self, node: NodeId) -> bool {
        let effect = {
            let Some(element) = self.element(node) else {
                return false;
            };
            match control_kind(element).as_str() {
                "checkbox" => ClickEffect::Toggle(!self.is_checked(node)),
                "radio" => ClickEffect::SelectRadio(
                    radio_group(self, element).iter().map(|radio| radio.id()).collect(),
                ),
                _ => ClickEffect::Plain,
            }
        };

        match effect {
            ClickEffect::Toggle(checked) => {
                self.live.checked.insert(node, checked);
            }
            ClickEffect::SelectRadio(group) => {
                for member in group {
                    self.live.checked.insert(member, false);
                }
                self.live.checked.insert(node, true);
            }
            ClickEffect::Plain => {}
        }
        self.record(node, EventKind::Click, true);
        true
    }

    /// Dispatches a bubbling event of `kind` at `node`.
    pub fn dispatch(&mut self, node: NodeId, kind: EventKind) -> bool {
        if self.element(node).is_none() {
            return false;
        }
        if kind == EventKind::Blur && self.live.focused == Some(node) {
            self.live.focused = None;
        }
        self.record(node, kind, true);
        true
    }

    pub fn events(&self) -> &[DomEvent] {
        &self.live.events
    }

    /// Checked only because of a click on this document, not because the
    /// markup said so.
    pub fn checked_by_click(&self, node: NodeId) -> bool {
        self.live.checked.get(&node).copied().unwrap_or(false)
    }

    /// Live state of every control that received an event, in first-touched
    /// order.
    pub fn touched_controls(&self) -> Vec<ControlState> {
        let mut seen = Vec::new();
        for event in &self.live.events {
            if !seen.contains(&event.target) {
                seen.push(event.target);
            }
        }
        seen.into_iter()
            .filter_map(|node| self.control_state(node))
            .collect()
    }

    pub fn control_state(&self, node: NodeId) -> Option<ControlState> {
        let element = self.element(node)?;
        let attrs = element.value();
        let key = attrs
            .id()
            .or_else(|| attrs.attr("name"))
            .unwrap_or_default()
            .to_string();
        Some(ControlState {
            key,
            kind: control_kind(element),
            value: self.value(node).unwrap_or_default(),
            checked: is_checkable(element) && self.is_checked(node),
        })
    }

    fn record(&mut self, target: NodeId, kind: EventKind, bubbles: bool) {
        self.live.events.push(DomEvent {
            target,
            kind,
            bubbles,
        });
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("nodes", &self.html.tree.nodes().count())
            .field("events", &self.live.events.len())
            .finish()
    }
}

/// Radios sharing `radio`'s name anywhere in the document; an unnamed radio is
/// a group of one.
pub fn radio_group<'a>(doc: &'a Document, radio: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    match radio.value().attr("name").filter(|name| !name.is_empty()) {
        Some(name) => doc
            .elements_by_name(name)
            .filter(|el| control_kind(*el) == "radio")
            .collect(),
        None => vec![radio],
    }
}

fn default_value(element: ElementRef<'_>) -> String {
    match element.value().name() {
        "input" => element.value().attr("value").unwrap_or_default().to_string(),
        "textarea" => element.text().collect(),
        "select" => {
            let options = select_options(element);
            options
                .iter()
                .find(|option| option.value().attr("selected").is_some())
                .or_else(|| options.first())
                .map(|option| option_value(*option))
                .unwrap_or_default()
        }
        _ => rendered_text(element),
    }
}
