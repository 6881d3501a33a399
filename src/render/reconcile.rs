use std::ops::AddAssign;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::SeriesDatum;

use super::svg::{AttrMap, ElementId, PointerEventKind, SvgContainer, SvgNode};
use super::transition::DEFAULT_TRANSITION_DURATION;

/// SVG element a mark is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    Circle,
    Path,
}

impl ShapeKind {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Path => "path",
        }
    }
}

/// Static style assigned once, when a shape enters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub class: String,
}

impl ShapeStyle {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: None,
            class: class.into(),
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Option<&str>) -> Self {
        self.fill = fill.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Option<&str>) -> Self {
        self.stroke = stroke.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }
}

/// Desired state of one shape for the current cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub geometry: AttrMap,
    pub style: ShapeStyle,
    /// Bound value; `None` for aggregate shapes (a whole line or area path),
    /// which get no interaction handlers.
    pub datum: Option<SeriesDatum>,
    /// Tooltip position used when no pointer position is available.
    pub anchor: (f64, f64),
}

/// Marks sharing one key space, usually one series of one shape layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkGroup {
    pub key: String,
    pub series: usize,
    pub shape: ShapeKind,
    pub marks: Vec<Mark>,
}

/// Data bound to a rendered shape; its `index` is the reconciliation key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBinding {
    pub group: String,
    pub series: usize,
    pub index: usize,
    pub datum: Option<SeriesDatum>,
    pub anchor: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl AddAssign for ReconcileStats {
    fn add_assign(&mut self, other: Self) {
        self.entered += other.entered;
        self.updated += other.updated;
        self.exited += other.exited;
    }
}

/// Index-keyed enter/update/exit over the shapes of one container.
///
/// Shapes are matched by position within their group, never by content: a
/// reordered dataset looks like a set of value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationRenderer {
    transition_duration: Duration,
}

impl Default for ReconciliationRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_DURATION)
    }
}

impl ReconciliationRenderer {
    #[must_use]
    pub fn new(transition_duration: Duration) -> Self {
        Self {
            transition_duration,
        }
    }

    #[must_use]
    pub fn transition_duration(self) -> Duration {
        self.transition_duration
    }

    /// Reconciles every group, then exits groups no longer produced.
    pub fn reconcile(self, container: &mut SvgContainer, groups: &[MarkGroup]) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        for group in groups {
            stats += self.reconcile_group(container, group);
        }

        let stale = container.remove_where(|node| {
            node.binding()
                .is_some_and(|binding| groups.iter().all(|group| group.key != binding.group))
        });
        if stale > 0 {
            warn!(
                selector = container.selector(),
                removed = stale,
                "exited shapes of stale groups"
            );
        }
        stats.exited += stale;
        stats
    }

    /// Enter, then update, then exit for one group.
    pub fn reconcile_group(self, container: &mut SvgContainer, group: &MarkGroup) -> ReconcileStats {
        let mut stats = ReconcileStats::default();

        // A shape of another kind under the same key cannot be updated in place.
        stats.exited += container.remove_where(|node| {
            node.binding().is_some_and(|binding| binding.group == group.key)
                && node.tag() != group.shape.tag()
        });

        let bound = bound_elements(container, &group.key);
        let previous = bound.len();

        for (index, mark) in group.marks.iter().enumerate().skip(previous) {
            container.append(enter_node(group, index, mark));
            stats.entered += 1;
        }

        for (id, (index, mark)) in bound.iter().zip(group.marks.iter().enumerate()) {
            if let Some(node) = container.get_mut(*id) {
                node.bind(binding_for(group, index, mark));
                node.transition_to(mark.geometry.clone(), self.transition_duration);
                stats.updated += 1;
            }
        }

        for id in bound.iter().skip(group.marks.len()) {
            if container.remove(*id).is_some() {
                stats.exited += 1;
            }
        }

        trace!(
            group = %group.key,
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "reconciled group"
        );
        stats
    }
}

/// Ids of the shapes bound to `group`, ordered by their bound index.
#[must_use]
pub fn bound_elements(container: &SvgContainer, group: &str) -> Vec<ElementId> {
    let mut bound: Vec<(usize, ElementId)> = container
        .children()
        .iter()
        .filter_map(|node| {
            node.binding()
                .filter(|binding| binding.group == group)
                .map(|binding| (binding.index, node.id()))
        })
        .collect();
    bound.sort_by_key(|(index, _)| *index);
    bound.into_iter().map(|(_, id)| id).collect()
}

fn binding_for(group: &MarkGroup, index: usize, mark: &Mark) -> ShapeBinding {
    ShapeBinding {
        group: group.key.clone(),
        series: group.series,
        index,
        datum: mark.datum.clone(),
        anchor: mark.anchor,
    }
}

fn enter_node(group: &MarkGroup, index: usize, mark: &Mark) -> SvgNode {
    let mut node = SvgNode::new(group.shape.tag());
    if let Some(fill) = &mark.style.fill {
        node.set_attr("fill", fill.as_str());
    }
    if let Some(stroke) = &mark.style.stroke {
        node.set_attr("stroke", stroke.as_str());
    }
    if let Some(width) = mark.style.stroke_width {
        node.set_attr("stroke-width", width);
    }
    node.set_attr("class", mark.style.class.as_str());
    node.set_attrs(&mark.geometry);

    if mark.datum.is_some() {
        node.listen(PointerEventKind::Over);
        node.listen(PointerEventKind::Out);
        node.listen(PointerEventKind::Click);
    }
    node.bind(binding_for(group, index, mark));
    node
}
