use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ChartType, CoordinateSystem, SeriesDatum};
use crate::error::{ChartError, ChartResult};
use crate::render::{AttrMap, ChartDecorator, ElementId, ReconcileStats, SvgNode};

use super::ChartHost;

/// One bound data shape, with the attributes it settles on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub element: ElementId,
    pub tag: String,
    pub group: String,
    pub series: usize,
    pub index: usize,
    pub datum: Option<SeriesDatum>,
    pub attrs: AttrMap,
}

impl ShapeSnapshot {
    fn from_node(node: &SvgNode) -> Option<Self> {
        let binding = node.binding()?;
        let mut attrs = node.attrs().clone();
        if let Some(transition) = node.transition() {
            for (name, value) in transition.target() {
                attrs.insert(name.clone(), value.clone());
            }
        }
        Some(Self {
            element: node.id(),
            tag: node.tag().to_owned(),
            group: binding.group.clone(),
            series: binding.series,
            index: binding.index,
            datum: binding.datum.clone(),
            attrs,
        })
    }
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub selector: String,
    pub chart_type: ChartType,
    pub layout: ChartLayout,
    pub coordinate_system: CoordinateSystem,
    pub shapes: Vec<ShapeSnapshot>,
    pub last_stats: ReconcileStats,
}

impl<D: ChartDecorator> ChartHost<D> {
    pub fn snapshot(&self) -> ChartResult<ChartSnapshot> {
        let (Some(spec), Some(layout), Some(coordinate_system)) =
            (self.spec.as_ref(), self.layout, self.coordinate_system.as_ref())
        else {
            return Err(ChartError::InvalidData(
                "chart has not been mounted".to_owned(),
            ));
        };

        Ok(ChartSnapshot {
            selector: spec.selector.clone(),
            chart_type: spec.chart_type,
            layout,
            coordinate_system: coordinate_system.clone(),
            shapes: self
                .container
                .children()
                .iter()
                .filter_map(ShapeSnapshot::from_node)
                .collect(),
            last_stats: self.last_stats,
        })
    }
}
