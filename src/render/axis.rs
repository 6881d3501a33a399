use crate::core::{AxisOrient, AxisSpec};

use super::svg::SvgNode;

pub const AXIS_CLASS: &str = "axis";
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Builds the `<g class="axis">` group for one resolved axis.
#[must_use]
pub fn axis_node(axis: &AxisSpec) -> SvgNode {
    let (tx, ty) = axis.translate;
    let anchor = match axis.orient {
        AxisOrient::Left => "end",
        AxisOrient::Bottom => "middle",
    };

    let mut group = SvgNode::new("g")
        .with_attr("class", AXIS_CLASS)
        .with_attr("transform", format!("translate({tx}, {ty})"))
        .with_attr("fill", "none")
        .with_attr("font-size", 10.0)
        .with_attr("text-anchor", anchor)
        .with_child(domain_path(axis));

    for tick in &axis.ticks {
        group = group.with_child(tick_node(axis.orient, tick.offset, &tick.label));
    }
    group
}

fn domain_path(axis: &AxisSpec) -> SvgNode {
    let (start, end) = axis.extent;
    let d = match axis.orient {
        AxisOrient::Left => format!("M{},{start}H0.5V{end}H{}", -TICK_SIZE, -TICK_SIZE),
        AxisOrient::Bottom => format!("M{start},{TICK_SIZE}V0.5H{end}V{TICK_SIZE}"),
    };
    SvgNode::new("path")
        .with_attr("class", "domain")
        .with_attr("stroke", "currentColor")
        .with_attr("d", d)
}

fn tick_node(orient: AxisOrient, offset: f64, label: &str) -> SvgNode {
    let spacing = TICK_SIZE + TICK_PADDING;
    let (transform, line, text) = match orient {
        AxisOrient::Left => (
            format!("translate(0, {offset})"),
            SvgNode::new("line").with_attr("x2", -TICK_SIZE),
            SvgNode::new("text")
                .with_attr("x", -spacing)
                .with_attr("dy", "0.32em"),
        ),
        AxisOrient::Bottom => (
            format!("translate({offset}, 0)"),
            SvgNode::new("line").with_attr("y2", TICK_SIZE),
            SvgNode::new("text")
                .with_attr("y", spacing)
                .with_attr("dy", "0.71em"),
        ),
    };

    SvgNode::new("g")
        .with_attr("class", "tick")
        .with_attr("transform", transform)
        .with_child(line.with_attr("stroke", "currentColor"))
        .with_child(text.with_attr("fill", "currentColor").with_text(label))
}

#[cfg(test)]
mod tests {
    use super::axis_node;
    use crate::core::{AxisOrient, AxisSpec, AxisTick};
    use crate::render::AttrValue;

    #[test]
    fn bottom_axis_places_ticks_horizontally() {
        let axis = AxisSpec {
            orient: AxisOrient::Bottom,
            translate: (30.0, 176.0),
            extent: (0.0, 95.0),
            ticks: vec![AxisTick {
                offset: 95.0,
                label: "b".to_owned(),
            }],
        };
        let node = axis_node(&axis);
        assert!(node.has_class("axis"));
        assert_eq!(
            node.attr("transform"),
            Some(&AttrValue::from("translate(30, 176)"))
        );
        assert_eq!(node.children().len(), 2);
        let tick = &node.children()[1];
        assert_eq!(tick.attr("transform"), Some(&AttrValue::from("translate(95, 0)")));
        assert_eq!(tick.children()[1].text(), Some("b"));
    }
}
