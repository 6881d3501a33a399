use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use serde_json::json;
use vchart_rs::api::{ChartHost, ChartHostConfig};
use vchart_rs::core::{ChartSpec, ChartType};
use vchart_rs::extensions::{ChartEvent, ChartPlugin, PluginContext};
use vchart_rs::interaction::InteractionMode;
use vchart_rs::render::{
    AXIS_CLASS, AttrValue, ElementId, SvgDecorator, TOOLTIP_CLASS, bound_elements,
};
use vchart_rs::ChartError;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(ChartEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(ChartEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &ChartEvent, context: &PluginContext) {
        self.events
            .borrow_mut()
            .push((event.clone(), context.clone()));
    }
}

fn spec(values: &[f64]) -> ChartSpec {
    ChartSpec::new("c1", ChartType::VerticalBar)
        .with_size(220.0, 220.0)
        .with_metric("v")
        .with_data(values.iter().map(|value| json!({ "v": value })).collect())
}

fn host() -> ChartHost<SvgDecorator> {
    ChartHost::new(SvgDecorator, ChartHostConfig::default())
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut host = host();
    let events = Rc::new(RefCell::new(Vec::new()));
    host.register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    host.mount(spec(&[3.0, 7.0])).expect("mount");
    host.update(spec(&[3.0, 7.0, 5.0])).expect("update");
    let first = bound_elements(host.surface(), "r0")[0];
    host.pointer_over(first, None).expect("pointer over");
    let clicked = host.click(first).expect("click");
    host.pointer_out(first).expect("pointer out");

    let events = events.borrow();
    let names: Vec<&'static str> = events.iter().map(|(event, _)| event.name()).collect();
    assert_eq!(
        names,
        vec![
            "mounted",
            "refreshed",
            "tooltip-shown",
            "chart-click",
            "tooltip-hidden"
        ]
    );

    match &events[1].0 {
        ChartEvent::Refreshed { stats } => assert_eq!(stats.entered, 1),
        other => panic!("unexpected event {other:?}"),
    }
    match clicked {
        Some(ChartEvent::Click {
            series,
            index,
            datum,
        }) => {
            assert_eq!((series, index), (0, 0));
            assert_eq!(datum.metric, 3.0);
            assert_eq!(datum.dimension, None);
        }
        other => panic!("unexpected click result {other:?}"),
    }

    let (_, hover_context) = &events[2];
    assert_eq!(hover_context.interaction_mode, InteractionMode::Hovering);
    assert_eq!(hover_context.records, 3);
    assert_eq!(hover_context.selector, "c1");
    assert_eq!(events[4].1.interaction_mode, InteractionMode::Idle);
}

#[test]
fn tooltip_without_pointer_anchors_on_the_shape() {
    let mut host = host();
    host.mount(spec(&[3.0, 7.0])).expect("mount");
    let first = bound_elements(host.surface(), "r0")[0];

    assert!(host.pointer_over(first, None).expect("pointer over"));

    let tooltip: Vec<_> = host.surface().select_class(TOOLTIP_CLASS).collect();
    assert_eq!(tooltip.len(), 2);
    assert_eq!(tooltip[0].attr("x"), Some(&AttrValue::Number(-25.0)));
    let y = tooltip[0].attr("y").and_then(AttrValue::as_number).expect("y");
    assert_relative_eq!(y, 220.0 - 220.0 * 3.0 / 7.0 - 38.0, epsilon = 1e-9);
    assert_eq!(tooltip[1].text(), Some(":3"));

    assert!(host.pointer_out(first).expect("pointer out"));
    assert_eq!(host.surface().select_class(TOOLTIP_CLASS).count(), 0);
}

#[test]
fn tooltip_follows_the_pointer_when_known() {
    let mut host = host();
    host.mount(spec(&[3.0, 7.0])).expect("mount");
    let second = bound_elements(host.surface(), "r0")[1];

    host.pointer_over(second, Some((150.0, 60.0)))
        .expect("pointer over");

    let rect = host
        .surface()
        .select_class(TOOLTIP_CLASS)
        .next()
        .expect("tooltip box");
    assert_eq!(rect.attr("x"), Some(&AttrValue::Number(95.0)));
    assert_eq!(rect.attr("y"), Some(&AttrValue::Number(22.0)));
    assert_eq!(host.interaction().cursor(), Some((150.0, 60.0)));
}

#[test]
fn elements_without_handlers_are_ignored() {
    let mut host = host();
    host.mount(spec(&[3.0, 7.0])).expect("mount");
    let axis = host
        .surface()
        .select_class(AXIS_CLASS)
        .next()
        .expect("axis")
        .id();

    assert!(host.click(axis).expect("known element").is_none());
    assert!(!host.pointer_over(axis, None).expect("known element"));
    assert_eq!(host.interaction().click_count(), 0);
}

#[test]
fn unknown_elements_are_rejected() {
    let mut host = host();
    host.mount(spec(&[3.0])).expect("mount");

    match host.click(ElementId(9999)) {
        Err(ChartError::UnknownElement(id)) => assert_eq!(id, 9999),
        other => panic!("expected unknown element, got {other:?}"),
    }
}

#[test]
fn hover_is_forgotten_when_the_shape_exits() {
    let mut host = host();
    host.mount(spec(&[3.0, 7.0])).expect("mount");
    let last = bound_elements(host.surface(), "r0")[1];
    host.pointer_over(last, None).expect("pointer over");

    host.update(spec(&[3.0])).expect("update");

    assert_eq!(host.interaction().mode(), InteractionMode::Idle);
    assert_eq!(host.interaction().hovered(), None);
}

#[test]
fn register_plugin_rejects_duplicate_ids() {
    let mut host = host();
    let events = Rc::new(RefCell::new(Vec::new()));

    host.register_plugin(Box::new(RecordingPlugin::new("dup", events.clone())))
        .expect("first register");
    let result = host.register_plugin(Box::new(RecordingPlugin::new("dup", events.clone())));
    assert!(matches!(result, Err(ChartError::DuplicatePlugin(id)) if id == "dup"));

    let empty = host.register_plugin(Box::new(RecordingPlugin::new("", events)));
    assert!(matches!(empty, Err(ChartError::InvalidData(_))));
    assert_eq!(host.plugin_count(), 1);
}

#[test]
fn unregister_plugin_stops_event_delivery() {
    let mut host = host();
    let events = Rc::new(RefCell::new(Vec::new()));
    host.register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    host.mount(spec(&[1.0])).expect("mount");
    assert!(host.unregister_plugin("recorder"));
    assert!(!host.unregister_plugin("recorder"));
    host.refresh().expect("refresh");

    assert_eq!(events.borrow().len(), 1);
    assert!(!host.has_plugin("recorder"));
}
