use crate::core::{ChartLayout, ChartSpec, GoalLine, Palette, SeriesDatum};

use super::svg::{SvgContainer, SvgNode};

pub const TOOLTIP_CLASS: &str = "tt";
pub const LEGEND_CLASS: &str = "legends";
pub const GOAL_ID: &str = "goal";
pub const GOAL_STROKE: &str = "#708090";

/// Fixed-geometry placements drawn around the data shapes.
///
/// The render cycle decides when each hook runs; implementations only place
/// nodes into the chart's own container.
pub trait ChartDecorator {
    fn draw_title(&mut self, container: &mut SvgContainer, spec: &ChartSpec, layout: ChartLayout);

    /// Replaces the previous goal line, if any.
    fn draw_goal_line(&mut self, container: &mut SvgContainer, goal: GoalLine);

    /// Removes the goal line drawn by an earlier cycle.
    fn clear_goal_line(&mut self, container: &mut SvgContainer);

    fn add_tooltip(&mut self, container: &mut SvgContainer, datum: &SeriesDatum, at: (f64, f64));

    fn remove_tooltip(&mut self, container: &mut SvgContainer);

    fn generate_legend(
        &mut self,
        container: &mut SvgContainer,
        spec: &ChartSpec,
        layout: ChartLayout,
        palette: &Palette,
    );
}

/// Decorator that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDecorator;

impl ChartDecorator for NullDecorator {
    fn draw_title(&mut self, _: &mut SvgContainer, _: &ChartSpec, _: ChartLayout) {}

    fn draw_goal_line(&mut self, _: &mut SvgContainer, _: GoalLine) {}

    fn clear_goal_line(&mut self, _: &mut SvgContainer) {}

    fn add_tooltip(&mut self, _: &mut SvgContainer, _: &SeriesDatum, _: (f64, f64)) {}

    fn remove_tooltip(&mut self, _: &mut SvgContainer) {}

    fn generate_legend(&mut self, _: &mut SvgContainer, _: &ChartSpec, _: ChartLayout, _: &Palette) {}
}

/// Default SVG decorations: centered title block, a white tooltip box above
/// the pointer, legend swatches in the bottom-right corner and a slate goal
/// line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgDecorator;

impl ChartDecorator for SvgDecorator {
    fn draw_title(&mut self, container: &mut SvgContainer, spec: &ChartSpec, layout: ChartLayout) {
        let x = layout.width / 2.0;
        let title_y = layout.title_height * 0.9;
        if let Some(title) = spec.title.as_deref() {
            container.append(
                SvgNode::new("text")
                    .with_attr("class", "title")
                    .with_attr("x", x)
                    .with_attr("y", title_y)
                    .with_attr("text-anchor", "middle")
                    .with_text(title),
            );
        }
        if let Some(subtitle) = spec.subtitle.as_deref() {
            container.append(
                SvgNode::new("text")
                    .with_attr("class", "subtitle")
                    .with_attr("x", x)
                    .with_attr("y", title_y + layout.subtitle_height)
                    .with_attr("text-anchor", "middle")
                    .with_text(subtitle),
            );
        }
    }

    fn draw_goal_line(&mut self, container: &mut SvgContainer, goal: GoalLine) {
        self.clear_goal_line(container);
        container.append(
            SvgNode::new("line")
                .with_attr("x1", goal.x1)
                .with_attr("x2", goal.x2)
                .with_attr("y1", goal.y1)
                .with_attr("y2", goal.y2)
                .with_attr("id", GOAL_ID)
                .with_attr("stroke", GOAL_STROKE)
                .with_attr("stroke-width", 1.0),
        );
    }

    fn clear_goal_line(&mut self, container: &mut SvgContainer) {
        container.remove_where(|node| {
            node.tag() == "line" && node.attr("id").and_then(|id| id.as_text()) == Some(GOAL_ID)
        });
    }

    fn add_tooltip(&mut self, container: &mut SvgContainer, datum: &SeriesDatum, at: (f64, f64)) {
        let (x, y) = at;
        let label = format!(
            "{}:{}",
            datum.dimension.as_deref().unwrap_or_default(),
            datum.metric
        );
        container.append(
            SvgNode::new("rect")
                .with_attr("x", x - 55.0)
                .with_attr("y", y - 38.0)
                .with_attr("height", "16px")
                .with_attr("width", "80px")
                .with_attr("class", TOOLTIP_CLASS)
                .with_attr("fill", "white"),
        );
        container.append(
            SvgNode::new("text")
                .with_attr("x", x - 50.0)
                .with_attr("y", y - 25.0)
                .with_attr("class", TOOLTIP_CLASS)
                .with_attr("font-size", "10px")
                .with_text(label),
        );
    }

    fn remove_tooltip(&mut self, container: &mut SvgContainer) {
        container.remove_class(TOOLTIP_CLASS);
    }

    fn generate_legend(
        &mut self,
        container: &mut SvgContainer,
        spec: &ChartSpec,
        layout: ChartLayout,
        palette: &Palette,
    ) {
        if !spec.legends_enabled() {
            return;
        }
        for series in 0..spec.series_count() {
            let baseline = layout.height * 0.95 - series as f64 * 15.0;
            container.append(
                SvgNode::new("text")
                    .with_attr("x", layout.width - 60.0)
                    .with_attr("y", baseline)
                    .with_attr("text-anchor", "middle")
                    .with_text(spec.metric.name(series)),
            );

            let mut swatch = SvgNode::new("rect")
                .with_attr("x", layout.width - 30.0)
                .with_attr("y", baseline - 10.0)
                .with_attr("width", 30.0)
                .with_attr("height", 10.0);
            if let Some(fill) = palette.line_at(series).or_else(|| palette.fill_at(series)) {
                swatch = swatch.with_attr("fill", fill);
            }
            container.append(
                SvgNode::new("g")
                    .with_attr("class", LEGEND_CLASS)
                    .with_child(swatch),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartDecorator, SvgDecorator, TOOLTIP_CLASS};
    use crate::core::SeriesDatum;
    use crate::render::{AttrValue, SvgContainer};

    #[test]
    fn tooltip_box_sits_above_and_left_of_pointer() {
        let mut container = SvgContainer::new("c1", 200.0, 200.0);
        let datum = SeriesDatum {
            metric: 7.0,
            dimension: Some("b".to_owned()),
        };
        SvgDecorator.add_tooltip(&mut container, &datum, (100.0, 80.0));

        let nodes: Vec<_> = container.select_class(TOOLTIP_CLASS).collect();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].attr("x"), Some(&AttrValue::Number(45.0)));
        assert_eq!(nodes[0].attr("y"), Some(&AttrValue::Number(42.0)));
        assert_eq!(nodes[1].text(), Some("b:7"));

        SvgDecorator.remove_tooltip(&mut container);
        assert!(container.is_empty());
    }
}
