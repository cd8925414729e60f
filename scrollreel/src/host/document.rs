use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{
    animation::anim::{Prop, StyleMap},
    foundation::core::{LayoutBox, Rect},
    foundation::error::{ScrollreelError, ScrollreelResult},
};

/// Index of an element in a [`Document`], in document (pre-)order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

/// Identity of a component allowed to write inline styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u32);

/// Element selector, scoped to a subtree when queried through [`Document::query`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    /// The scope root itself (`:scope`).
    Scope,
    /// Elements carrying a class (`.name`).
    Class(String),
    /// The element with a given id (`#name`).
    Id(String),
    /// Union of several selectors (`.a, .b`).
    AnyOf(Vec<Selector>),
}

impl Selector {
    /// Class selector.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Id selector.
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    fn matches(&self, node: &Node, is_scope: bool) -> bool {
        match self {
            Self::Scope => is_scope,
            Self::Class(c) => !is_scope && node.classes.iter().any(|k| k == c),
            Self::Id(id) => !is_scope && node.name == *id,
            Self::AnyOf(all) => all.iter().any(|s| s.matches(node, is_scope)),
        }
    }
}

impl FromStr for Selector {
    type Err = ScrollreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() > 1 {
            return parts
                .into_iter()
                .map(Selector::from_str)
                .collect::<ScrollreelResult<Vec<_>>>()
                .map(Self::AnyOf);
        }
        let s = parts[0];
        if s == ":scope" {
            return Ok(Self::Scope);
        }
        let valid = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        if let Some(name) = s.strip_prefix('.')
            && valid(name)
        {
            return Ok(Self::Class(name.to_owned()));
        }
        if let Some(name) = s.strip_prefix('#')
            && valid(name)
        {
            return Ok(Self::Id(name.to_owned()));
        }
        Err(ScrollreelError::validation(format!(
            "unsupported selector '{s}'"
        )))
    }
}

impl TryFrom<String> for Selector {
    type Error = ScrollreelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Selector> for String {
    fn from(value: Selector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scope => f.write_str(":scope"),
            Self::Class(c) => write!(f, ".{c}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::AnyOf(all) => {
                for (i, s) in all.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{s}")?;
                }
                Ok(())
            }
        }
    }
}

/// User interaction bound to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ElementAction {
    /// Open the contact modal.
    OpenModal,
    /// Close the contact modal.
    CloseModal,
    /// Toggle one accordion item.
    ToggleAccordion(usize),
    /// Scroll to the next section.
    AdvanceSection,
    /// Toggle the floating bar between minimized and expanded.
    ToggleBar,
}

/// Authored element: identity, laid-out box and base style.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    /// Unique element id.
    pub id: String,
    /// Class list used by selectors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Laid-out box in document coordinates.
    #[serde(default)]
    pub layout: LayoutBox,
    /// Authored base style: the visible end state shown when no animation writes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
    /// Optional click action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ElementAction>,
    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Element with the given id and layout box.
    pub fn new(id: impl Into<String>, layout: LayoutBox) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
            layout,
            style: StyleMap::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a base style value.
    pub fn style(mut self, prop: Prop, value: f64) -> Self {
        self.style.insert(prop, value);
        self
    }

    /// Bind a click action.
    pub fn action(mut self, action: ElementAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Append a child.
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// One computed style write emitted by an animation source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleWrite {
    /// Target element.
    pub element: ElementId,
    /// Written property.
    pub prop: Prop,
    /// Written value.
    pub value: f64,
}

#[derive(Clone, Debug)]
struct Node {
    name: String,
    classes: Vec<String>,
    parent: Option<ElementId>,
    layout: LayoutBox,
    base: StyleMap,
    action: Option<ElementAction>,
    subtree_end: u32,
}

#[derive(Clone, Copy, Debug)]
struct InlineValue {
    value: f64,
    owner: OwnerId,
}

/// Vertical space inserted below a pinned element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacer {
    /// Authored document offset at which the space is inserted.
    pub anchor_y: f64,
    /// Inserted height in pixels.
    pub amount: f64,
}

/// Host document: element arena, layout, and owner-tagged inline styles.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    by_name: BTreeMap<String, ElementId>,
    authored_height: f64,
    spacers: Vec<Spacer>,
    inline: BTreeMap<(ElementId, Prop), InlineValue>,
}

impl Document {
    /// Build a document from an authored element tree.
    pub fn from_spec(root: &ElementSpec, height: Option<f64>) -> ScrollreelResult<Self> {
        let mut doc = Self {
            nodes: Vec::new(),
            by_name: BTreeMap::new(),
            authored_height: 0.0,
            spacers: Vec::new(),
            inline: BTreeMap::new(),
        };
        doc.push_rec(root, None)?;
        let max_bottom = doc
            .nodes
            .iter()
            .map(|n| n.layout.bottom())
            .fold(0.0, f64::max);
        doc.authored_height = match height {
            Some(h) if h.is_finite() && h >= 0.0 => h.max(max_bottom),
            Some(_) => {
                return Err(ScrollreelError::validation(
                    "document height must be finite and >= 0",
                ));
            }
            None => max_bottom,
        };
        Ok(doc)
    }

    fn push_rec(&mut self, spec: &ElementSpec, parent: Option<ElementId>) -> ScrollreelResult<()> {
        if spec.id.trim().is_empty() {
            return Err(ScrollreelError::validation("element id must be non-empty"));
        }
        let l = spec.layout;
        if ![l.x, l.y, l.width, l.height].iter().all(|v| v.is_finite()) {
            return Err(ScrollreelError::validation(format!(
                "element '{}' layout must be finite",
                spec.id
            )));
        }
        let id = ElementId(self.nodes.len() as u32);
        if self.by_name.insert(spec.id.clone(), id).is_some() {
            return Err(ScrollreelError::validation(format!(
                "duplicate element id '{}'",
                spec.id
            )));
        }
        self.nodes.push(Node {
            name: spec.id.clone(),
            classes: spec.classes.clone(),
            parent,
            layout: spec.layout,
            base: spec.style.clone(),
            action: spec.action,
            subtree_end: 0,
        });
        for child in &spec.children {
            self.push_rec(child, Some(id))?;
        }
        self.nodes[id.0 as usize].subtree_end = self.nodes.len() as u32;
        Ok(())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up an element by id.
    pub fn element(&self, name: &str) -> Option<ElementId> {
        self.by_name.get(name).copied()
    }

    /// Element id string.
    pub fn name(&self, el: ElementId) -> &str {
        &self.nodes[el.0 as usize].name
    }

    /// Parent element, if any.
    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes[el.0 as usize].parent
    }

    /// Click action bound to the element, if any.
    pub fn action(&self, el: ElementId) -> Option<ElementAction> {
        self.nodes[el.0 as usize].action
    }

    /// Return `true` when `el` is `root` or one of its descendants.
    pub fn is_within(&self, root: ElementId, el: ElementId) -> bool {
        let r = &self.nodes[root.0 as usize];
        root.0 <= el.0 && el.0 < r.subtree_end
    }

    /// All elements under `scope` matching `selector`, in document order.
    ///
    /// Only descendants match, except for [`Selector::Scope`] which yields `scope` itself.
    pub fn query(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        let end = self.nodes[scope.0 as usize].subtree_end;
        (scope.0..end)
            .filter(|&i| selector.matches(&self.nodes[i as usize], i == scope.0))
            .map(ElementId)
            .collect()
    }

    /// All matching elements in the whole document.
    pub fn query_global(&self, selector: &Selector) -> Vec<ElementId> {
        (0..self.nodes.len() as u32)
            .filter(|&i| selector.matches(&self.nodes[i as usize], false))
            .map(ElementId)
            .collect()
    }

    /// Resolve a section root selector to a single element.
    pub fn resolve_root(&self, selector: &Selector) -> Option<ElementId> {
        match selector {
            Selector::Id(name) => self.element(name),
            other => self.query_global(other).into_iter().next(),
        }
    }

    /// Authored layout box, ignoring pin spacing.
    pub fn authored_layout(&self, el: ElementId) -> LayoutBox {
        self.nodes[el.0 as usize].layout
    }

    /// Effective layout box with pin spacing applied.
    pub fn layout(&self, el: ElementId) -> LayoutBox {
        let authored = self.authored_layout(el);
        authored.shifted(self.spacing_above(authored.y))
    }

    /// Effective layout box grown by the pin spacing inserted within the element.
    pub fn spaced_layout(&self, el: ElementId) -> LayoutBox {
        let authored = self.authored_layout(el);
        let inside: f64 = self
            .spacers
            .iter()
            .filter(|s| s.anchor_y > authored.y && s.anchor_y <= authored.bottom())
            .map(|s| s.amount)
            .sum();
        let mut b = self.layout(el);
        b.height += inside;
        b
    }

    /// Viewport rect for a given scroll offset.
    pub fn viewport_rect(&self, el: ElementId, scroll_y: f64) -> Rect {
        self.layout(el).to_viewport_rect(scroll_y)
    }

    fn spacing_above(&self, authored_y: f64) -> f64 {
        self.spacers
            .iter()
            .filter(|s| authored_y >= s.anchor_y)
            .map(|s| s.amount)
            .sum()
    }

    /// Replace the pin spacers (set by the trigger registry on refresh).
    pub fn set_spacers(&mut self, spacers: Vec<Spacer>) {
        self.spacers = spacers;
    }

    /// Scrollable document height including pin spacing.
    pub fn scroll_height(&self) -> f64 {
        self.authored_height + self.spacers.iter().map(|s| s.amount).sum::<f64>()
    }

    /// Maximum scroll offset for a viewport of height `viewport_h`.
    pub fn max_scroll(&self, viewport_h: f64) -> f64 {
        (self.scroll_height() - viewport_h).max(0.0)
    }

    /// Authored base value of a property (what shows with no inline override).
    pub fn base_value(&self, el: ElementId, prop: Prop) -> f64 {
        self.nodes[el.0 as usize]
            .base
            .get(&prop)
            .copied()
            .unwrap_or_else(|| prop.neutral())
    }

    /// Computed value: inline override if present, else base.
    pub fn computed(&self, el: ElementId, prop: Prop) -> f64 {
        self.inline
            .get(&(el, prop))
            .map(|v| v.value)
            .unwrap_or_else(|| self.base_value(el, prop))
    }

    /// Inline override, if any.
    pub fn inline(&self, el: ElementId, prop: Prop) -> Option<f64> {
        self.inline.get(&(el, prop)).map(|v| v.value)
    }

    /// Write an inline style on behalf of `owner`, restricted to the `scope` subtree.
    ///
    /// Returns `false` (and writes nothing) when the target lies outside `scope`.
    pub fn write(&mut self, owner: OwnerId, scope: ElementId, w: StyleWrite) -> bool {
        if !self.is_within(scope, w.element) {
            tracing::warn!(
                scope = self.name(scope),
                target = self.name(w.element),
                "rejected style write outside owning subtree"
            );
            return false;
        }
        let value = w.prop.sanitize(w.value);
        self.inline
            .insert((w.element, w.prop), InlineValue { value, owner });
        true
    }

    /// Remove every inline style written by `owner`. Returns how many were removed.
    pub fn revert_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.inline.len();
        self.inline.retain(|_, v| v.owner != owner);
        before - self.inline.len()
    }

    /// Number of inline values currently written by `owner`.
    pub fn written_by(&self, owner: OwnerId) -> usize {
        self.inline.values().filter(|v| v.owner == owner).count()
    }

    /// Iterate all inline overrides in element/property order.
    pub fn inline_styles(&self) -> impl Iterator<Item = (ElementId, Prop, f64)> + '_ {
        self.inline.iter().map(|(&(el, prop), v)| (el, prop, v.value))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/document.rs"]
mod tests;
