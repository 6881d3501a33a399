use tracing::debug;

use crate::core::{
    ChartLayout, ChartSpec, CoordinateSystem, GeometryContext, GoalLine, build_coordinate_system,
    normalize,
};
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::interaction::InteractionState;
use crate::render::{
    AXIS_CLASS, ChartDecorator, MarkGroup, ReconcileStats, ReconciliationRenderer, SvgContainer,
    axis_node,
};
use crate::series::chart_kind;

use super::ChartHost;

/// Everything a cycle derives before the container is touched.
struct CyclePlan {
    layout: ChartLayout,
    coordinate_system: CoordinateSystem,
    groups: Vec<MarkGroup>,
    goal: Option<GoalLine>,
}

fn plan_cycle(spec: &ChartSpec) -> ChartResult<CyclePlan> {
    let dataset = normalize(spec);
    let layout = ChartLayout::from_spec(spec)?;
    let kind = chart_kind(spec.chart_type);
    let ctx = GeometryContext::new(spec, &dataset, layout);

    let coordinate_system = build_coordinate_system(kind, &ctx)?;
    let groups = kind.project(&ctx, &coordinate_system)?;
    let goal = match spec.goal {
        Some(goal) => kind.goal_line(goal, &ctx, &coordinate_system)?,
        None => None,
    };

    Ok(CyclePlan {
        layout,
        coordinate_system,
        groups,
        goal,
    })
}

impl<D: ChartDecorator> ChartHost<D> {
    /// First render: takes ownership of a fresh container, renders, then
    /// draws the title block and legend.
    pub fn mount(&mut self, spec: ChartSpec) -> ChartResult<ReconcileStats> {
        let plan = plan_cycle(&spec)?;
        let layout = plan.layout;

        self.container = SvgContainer::new(spec.selector.clone(), layout.width, layout.height);
        self.interaction = InteractionState::default();
        let stats = self.apply_plan(plan, spec);

        if let (Some(spec), Some(cs)) = (self.spec.as_ref(), self.coordinate_system.as_ref()) {
            self.decorator.draw_title(&mut self.container, spec, layout);
            self.decorator
                .generate_legend(&mut self.container, spec, layout, &cs.palette);
        }

        self.emit_plugin_event(ChartEvent::Mounted);
        Ok(stats)
    }

    /// Re-renders against the new spec, reusing surviving shapes.
    ///
    /// An unmounted host, or a spec addressing another selector, is mounted
    /// from scratch instead.
    pub fn update(&mut self, spec: ChartSpec) -> ChartResult<ReconcileStats> {
        let same_target = self
            .spec
            .as_ref()
            .is_some_and(|current| current.selector == spec.selector);
        if !same_target {
            return self.mount(spec);
        }

        let plan = plan_cycle(&spec)?;
        let stats = self.apply_plan(plan, spec);
        self.emit_plugin_event(ChartEvent::Refreshed { stats });
        Ok(stats)
    }

    /// Re-runs the cycle with the current spec.
    pub fn refresh(&mut self) -> ChartResult<ReconcileStats> {
        match self.spec.clone() {
            Some(spec) => self.update(spec),
            None => Ok(ReconcileStats::default()),
        }
    }

    fn apply_plan(&mut self, plan: CyclePlan, spec: ChartSpec) -> ReconcileStats {
        let CyclePlan {
            layout,
            coordinate_system,
            groups,
            goal,
        } = plan;

        self.container.set_size(layout.width, layout.height);
        self.container.remove_class(AXIS_CLASS);
        for axis in coordinate_system.axes() {
            self.container.append(axis_node(axis));
        }
        match goal {
            Some(goal) => self.decorator.draw_goal_line(&mut self.container, goal),
            None => self.decorator.clear_goal_line(&mut self.container),
        }

        let renderer = ReconciliationRenderer::new(self.config.transition_duration);
        let stats = renderer.reconcile(&mut self.container, &groups);

        let container = &self.container;
        self.interaction.forget_if(|id| container.get(id).is_none());

        debug!(
            selector = %spec.selector,
            chart_type = %spec.chart_type,
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "render cycle complete"
        );

        self.spec = Some(spec);
        self.layout = Some(layout);
        self.coordinate_system = Some(coordinate_system);
        self.last_stats = stats;
        stats
    }
}
