use std::fmt::{self, Write as _};
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::reconcile::ShapeBinding;
use super::transition::Transition;

/// Attribute value of an SVG element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Insertion-ordered attribute map; serialization keeps assignment order.
pub type AttrMap = IndexMap<String, AttrValue>;

/// Stable handle of an element inside one [`SvgContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Pointer interactions an element can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Over,
    Out,
    Click,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgNode {
    id: ElementId,
    tag: String,
    attrs: AttrMap,
    text: Option<String>,
    children: Vec<SvgNode>,
    transition: Option<Transition>,
    binding: Option<ShapeBinding>,
    listeners: Vec<PointerEventKind>,
}

impl SvgNode {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: ElementId(0),
            tag: tag.into(),
            attrs: AttrMap::new(),
            text: None,
            children: Vec::new(),
            transition: None,
            binding: None,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn children(&self) -> &[SvgNode] {
        &self.children
    }

    #[must_use]
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// Currently displayed value, mid-transition values included.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Value the element settles on once its transition completes.
    #[must_use]
    pub fn target_attr(&self, name: &str) -> Option<&AttrValue> {
        self.transition
            .as_ref()
            .and_then(|transition| transition.target().get(name))
            .or_else(|| self.attrs.get(name))
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.attrs.insert(name.to_owned(), value.into());
    }

    pub fn set_attrs(&mut self, attrs: &AttrMap) {
        for (name, value) in attrs {
            self.attrs.insert(name.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .and_then(AttrValue::as_text)
            .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
    }

    #[must_use]
    pub fn binding(&self) -> Option<&ShapeBinding> {
        self.binding.as_ref()
    }

    pub fn bind(&mut self, binding: ShapeBinding) {
        self.binding = Some(binding);
    }

    #[must_use]
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Starts a transition from the displayed values towards `target`,
    /// superseding any transition still in flight.
    pub fn transition_to(&mut self, target: AttrMap, duration: Duration) {
        let from = target
            .keys()
            .filter_map(|name| {
                self.attrs
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect();
        let transition = Transition::new(from, target, duration);
        if transition.is_finished() {
            self.set_attrs(transition.target());
            self.transition = None;
        } else {
            self.transition = Some(transition);
        }
    }

    pub fn listen(&mut self, kind: PointerEventKind) {
        if !self.listeners.contains(&kind) {
            self.listeners.push(kind);
        }
    }

    #[must_use]
    pub fn listens(&self, kind: PointerEventKind) -> bool {
        self.listeners.contains(&kind)
    }

    fn advance(&mut self, elapsed: Duration) -> usize {
        let mut running = 0;
        if let Some(transition) = self.transition.as_mut() {
            let values = transition.advance(elapsed);
            let finished = transition.is_finished();
            self.set_attrs(&values);
            if finished {
                self.transition = None;
            } else {
                running += 1;
            }
        }
        for child in &mut self.children {
            running += child.advance(elapsed);
        }
        running
    }

    fn assign_ids(&mut self, next_id: &mut u64) {
        *next_id += 1;
        self.id = ElementId(*next_id);
        for child in &mut self.children {
            child.assign_ids(next_id);
        }
    }

    fn find(&self, id: ElementId) -> Option<&SvgNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: ElementId) -> Option<&mut SvgNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn write_markup(&self, out: &mut String) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, " {name}=\"{}\"", escape(&value.to_string()))?;
        }
        if self.text.is_none() && self.children.is_empty() {
            return out.write_str("/>");
        }
        out.write_char('>')?;
        if let Some(text) = &self.text {
            out.write_str(&escape(text))?;
        }
        for child in &self.children {
            child.write_markup(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

/// The SVG region owned by one chart.
///
/// Only the chart's own render cycle and decorator write here.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgContainer {
    selector: String,
    width: f64,
    height: f64,
    children: Vec<SvgNode>,
    next_id: u64,
}

impl SvgContainer {
    #[must_use]
    pub fn new(selector: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            selector: selector.into(),
            width,
            height,
            children: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn children(&self) -> &[SvgNode] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends `node` (and its subtree) as the last child; returns its id.
    pub fn append(&mut self, mut node: SvgNode) -> ElementId {
        node.assign_ids(&mut self.next_id);
        let id = node.id;
        self.children.push(node);
        id
    }

    pub fn remove(&mut self, id: ElementId) -> Option<SvgNode> {
        let position = self.children.iter().position(|node| node.id == id)?;
        Some(self.children.remove(position))
    }

    /// Removes top-level children matching `predicate`; returns how many.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&SvgNode) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|node| !predicate(node));
        before - self.children.len()
    }

    pub fn remove_class(&mut self, class: &str) -> usize {
        self.remove_where(|node| node.has_class(class))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&SvgNode> {
        self.children.iter().find_map(|node| node.find(id))
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut SvgNode> {
        self.children.iter_mut().find_map(|node| node.find_mut(id))
    }

    pub fn select_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a SvgNode> + 'a {
        self.children.iter().filter(move |node| node.has_class(class))
    }

    /// Advances every running transition; returns how many are still running.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.children
            .iter_mut()
            .map(|node| node.advance(elapsed))
            .sum()
    }

    #[must_use]
    pub fn has_running_transitions(&self) -> bool {
        fn running(node: &SvgNode) -> bool {
            node.transition.is_some() || node.children.iter().any(running)
        }
        self.children.iter().any(running)
    }

    /// Serializes the container using the chart's outer `<svg>` template.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg id=\"{}\" x=\"5\" y=\"5\" height=\"{}\" width=\"{}\">",
            escape(&self.selector),
            self.height + 20.0,
            self.width + 20.0
        );
        for node in &self.children {
            let _ = node.write_markup(&mut out);
        }
        out.push_str("</svg>");
        out
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
