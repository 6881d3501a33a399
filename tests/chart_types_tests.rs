use std::time::Duration;

use approx::assert_relative_eq;
use serde_json::{Value, json};
use vchart_rs::core::{ChartSpec, ChartType};
use vchart_rs::render::{AttrValue, SvgContainer, SvgNode, bound_elements};
use vchart_rs::{ChartHost, ChartHostConfig, NullDecorator};

fn host() -> ChartHost<NullDecorator> {
    ChartHost::new(
        NullDecorator,
        ChartHostConfig::new().with_transition_duration(Duration::ZERO),
    )
}

fn group<'a>(container: &'a SvgContainer, key: &str) -> Vec<&'a SvgNode> {
    bound_elements(container, key)
        .into_iter()
        .map(|id| container.get(id).expect("bound shape"))
        .collect()
}

fn number(node: &SvgNode, name: &str) -> f64 {
    node.target_attr(name)
        .and_then(AttrValue::as_number)
        .unwrap_or(f64::NAN)
}

fn text<'a>(node: &'a SvgNode, name: &str) -> &'a str {
    node.target_attr(name)
        .and_then(AttrValue::as_text)
        .unwrap_or_default()
}

fn xyz(points: &[(f64, f64, f64)]) -> Vec<Value> {
    points
        .iter()
        .map(|(x, y, z)| json!({"x": x, "y": y, "z": z}))
        .collect()
}

#[test]
fn every_kind_rerenders_without_leaking_shapes() {
    let data = xyz(&[(1.0, 2.0, 10.0), (3.0, 6.0, 30.0), (2.0, 4.0, 20.0)]);
    for chart_type in ChartType::ALL {
        let spec = ChartSpec::new("c1", chart_type)
            .with_metric(["x", "y", "z"])
            .with_data(data.clone());
        let mut host = host();
        host.mount(spec.clone()).expect("mount");
        let mounted = host.surface().len();

        let stats = host.update(spec).expect("update");

        assert_eq!(stats.entered, 0, "{chart_type}");
        assert_eq!(stats.exited, 0, "{chart_type}");
        assert_eq!(host.surface().len(), mounted, "{chart_type}");
    }
}

#[test]
fn horizontal_bars_grow_from_the_category_axis() {
    let spec = ChartSpec::new("h", ChartType::Bar)
        .with_metric("v")
        .with_dim("k")
        .with_data(vec![json!({"k": "a", "v": 2}), json!({"k": "bb", "v": 4})]);
    let mut host = host();
    host.mount(spec).expect("mount");

    let cs = host.coordinate_system().expect("coordinates");
    assert_eq!(cs.y.axis_width, 24.0);
    assert!(cs.y.axis.is_some());

    let bars = group(host.surface(), "r0");
    assert_eq!(bars.len(), 2);
    assert_eq!(number(bars[0], "width"), 84.0);
    assert_eq!(number(bars[1], "width"), 168.0);
    assert_eq!(number(bars[0], "x"), 32.0);
    assert_eq!(number(bars[0], "y"), 0.0);
    assert_eq!(number(bars[1], "y"), 90.0);
    assert_eq!(number(bars[0], "height"), 85.0);
}

#[test]
fn line_chart_centers_points_in_their_slots() {
    let spec = ChartSpec::new("l", ChartType::Line)
        .with_metric("v")
        .with_data(vec![json!({"v": 1}), json!({"v": 3})]);
    let mut host = host();
    host.mount(spec).expect("mount");
    let container = host.surface();

    let points = group(container, "p0");
    assert_eq!(points.len(), 2);
    assert_eq!(number(points[0], "cx"), 72.5);
    assert_relative_eq!(number(points[0], "cy"), 400.0 / 3.0, epsilon = 1e-9);
    assert_eq!(number(points[1], "cx"), 157.5);
    assert_eq!(number(points[1], "cy"), 0.0);
    assert_eq!(number(points[0], "r"), 5.0);

    let line = group(container, "line0");
    assert_eq!(line.len(), 1);
    assert_eq!(line[0].tag(), "path");
    let d = text(line[0], "d");
    assert!(d.starts_with("M72.5,"), "{d}");
    assert!(d.contains("L157.5,0"), "{d}");
    assert_eq!(text(line[0], "fill"), "none");
}

#[test]
fn area_chart_closes_down_to_the_baseline() {
    let spec = ChartSpec::new("a", ChartType::Area)
        .with_metric("v")
        .with_data(vec![json!({"v": 1}), json!({"v": 3})]);
    let mut host = host();
    host.mount(spec).expect("mount");

    let area = group(host.surface(), "area0");
    assert_eq!(area.len(), 1);
    let d = text(area[0], "d");
    assert!(d.starts_with("M72.5,200L72.5,"), "{d}");
    assert!(d.ends_with("L157.5,200Z"), "{d}");
}

#[test]
fn scatter_maps_first_two_metrics_onto_the_plot() {
    let spec = ChartSpec::new("s", ChartType::Scatter)
        .with_metric(["x", "y"])
        .with_data(vec![json!({"x": 1, "y": 2}), json!({"x": 3, "y": 6})]);
    let mut host = host();
    host.mount(spec).expect("mount");

    let circles = group(host.surface(), "s0");
    assert_eq!(circles.len(), 2);
    assert_eq!((number(circles[0], "cx"), number(circles[0], "cy")), (30.0, 180.0));
    assert_eq!((number(circles[1], "cx"), number(circles[1], "cy")), (200.0, 0.0));
    assert_eq!(number(circles[0], "r"), 5.0);
}

#[test]
fn bubble_radius_encodes_third_metric() {
    let spec = ChartSpec::new("b", ChartType::Bubble)
        .with_metric(["x", "y", "z"])
        .with_data(xyz(&[(1.0, 2.0, 10.0), (3.0, 6.0, 30.0)]));
    let mut host = host();
    host.mount(spec).expect("mount");

    let bubbles = group(host.surface(), "b0");
    assert_eq!(number(bubbles[0], "r"), 2.0);
    assert_eq!(number(bubbles[1], "r"), 20.0);
    assert_eq!(number(bubbles[1], "cx"), 200.0);
}

#[test]
fn pie_slices_start_at_twelve_o_clock() {
    let spec = ChartSpec::new("p", ChartType::Pie).with_data(vec![json!(1), json!(3)]);
    let mut host = host();
    host.mount(spec).expect("mount");
    let container = host.surface();

    let arcs = group(container, "arc0");
    assert_eq!(arcs.len(), 2);
    assert!(
        text(arcs[0], "d").starts_with("M100,100L100,0A100,100 0 0,1 "),
        "{}",
        text(arcs[0], "d")
    );
    assert_eq!(text(arcs[0], "fill"), "#005792");
    assert_eq!(text(arcs[1], "fill"), "#ffcdcd");
    assert_eq!(text(arcs[0], "stroke"), "#ffffff");
    assert!(host.coordinate_system().expect("coordinates").x.axis.is_none());
    assert_eq!(container.len(), 2);
}

#[test]
fn pie_ignores_goal() {
    let spec = ChartSpec::new("p", ChartType::Pie)
        .with_data(vec![json!(1), json!(3)])
        .with_goal(2.0);
    let mut host = ChartHost::new(
        vchart_rs::SvgDecorator,
        ChartHostConfig::new().with_transition_duration(Duration::ZERO),
    );
    host.mount(spec).expect("mount");
    assert!(!host.surface().children().iter().any(|node| node.tag() == "line"));
}

#[test]
fn switching_chart_type_exits_the_previous_shapes() {
    let data = vec![json!({"v": 1}), json!({"v": 3})];
    let mut host = host();
    host.mount(
        ChartSpec::new("c1", ChartType::VerticalBar)
            .with_metric("v")
            .with_data(data.clone()),
    )
    .expect("mount");

    let stats = host
        .update(
            ChartSpec::new("c1", ChartType::Pie)
                .with_metric("v")
                .with_data(data),
        )
        .expect("update");

    assert_eq!(stats.exited, 2);
    assert_eq!(stats.entered, 2);
    let container = host.surface();
    assert!(group(container, "r0").is_empty());
    assert!(container.children().iter().all(|node| node.tag() == "path"));
}

#[test]
fn multi_series_bars_sit_side_by_side() {
    let spec = ChartSpec::new("c1", ChartType::VerticalBar)
        .with_size(220.0, 220.0)
        .with_metric(["a", "b"])
        .with_data(vec![json!({"a": 1, "b": 2}), json!({"a": 3, "b": 4})]);
    let mut host = host();
    host.mount(spec).expect("mount");
    let container = host.surface();

    let first = group(container, "r0");
    let second = group(container, "r1");
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(number(first[0], "width"), 47.0);
    assert_eq!(number(second[0], "x"), 77.0);
    assert_eq!(text(second[0], "fill"), "#ffcdcd");
}
