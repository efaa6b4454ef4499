use std::cmp::Ordering;

use super::p;
use crate::dla::{GuidePath, GuideSegment, NoopObserver, PipelineOrder, RadialDistanceOrder, SegmentOrder};

#[test]
fn pipeline_order_keeps_authoring_sequence() {
    let mut path = GuidePath::new().with_observer(NoopObserver);
    path.add_line(p(5.0, 0.0, 0.0), p(6.0, 0.0, 0.0))
        .unwrap()
        .add_line(p(-3.0, 0.0, 0.0), p(-2.0, 0.0, 0.0))
        .unwrap()
        .add_line(p(0.0, 9.0, 0.0), p(0.0, 8.0, 0.0))
        .unwrap();

    let starts: Vec<_> = path.segments().iter().map(GuideSegment::start).collect();
    assert_eq!(starts, vec![p(5.0, 0.0, 0.0), p(-3.0, 0.0, 0.0), p(0.0, 9.0, 0.0)]);
    assert_eq!(path.order_name(), "pipeline");
}

#[test]
fn pipeline_order_treats_same_endpoints_as_equal() {
    let a = GuideSegment::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)).unwrap();
    let b = GuideSegment::with_next(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)).unwrap();
    let reversed = GuideSegment::new(p(1.0, 0.0, 0.0), p(0.0, 0.0, 0.0)).unwrap();

    assert_eq!(PipelineOrder.compare(&a, &b), Ordering::Equal);
    assert_ne!(PipelineOrder.compare(&a, &reversed), Ordering::Equal);
}

#[test]
fn standalone_segments_never_compare_equal() {
    // Neither segment has been inserted into a path, so both carry the same
    // sequence number.
    let east = GuideSegment::new(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)).unwrap();
    let west = GuideSegment::new(p(-1.0, 0.0, 0.0), p(-1.0, -1.0, 0.0)).unwrap();

    let pipeline = PipelineOrder.compare(&east, &west);
    assert_ne!(pipeline, Ordering::Equal);
    assert_eq!(PipelineOrder.compare(&west, &east), pipeline.reverse());

    let radial = RadialDistanceOrder::default();
    let by_radius = radial.compare(&east, &west);
    assert_ne!(by_radius, Ordering::Equal);
    assert_eq!(radial.compare(&west, &east), by_radius.reverse());
    assert_eq!(radial.compare(&east, &east), Ordering::Equal);
}

#[test]
fn radial_order_sorts_by_midpoint_distance() {
    let mut path = GuidePath::with_order(RadialDistanceOrder::default()).with_observer(NoopObserver);
    path.add_line(p(10.0, 0.0, 0.0), p(11.0, 0.0, 0.0))
        .unwrap()
        .add_line(p(0.0, 1.0, 0.0), p(0.0, 2.0, 0.0))
        .unwrap()
        .add_line(p(0.0, 0.0, 4.0), p(0.0, 0.0, 5.0))
        .unwrap();

    let starts: Vec<_> = path.segments().iter().map(GuideSegment::start).collect();
    assert_eq!(starts, vec![p(0.0, 1.0, 0.0), p(0.0, 0.0, 4.0), p(10.0, 0.0, 0.0)]);
}

#[test]
fn flipped_radial_order_walks_outside_in() {
    let order = RadialDistanceOrder::new(p(0.0, 0.0, 0.0), true);
    let mut path = GuidePath::with_order(order).with_observer(NoopObserver);
    path.add_lines([
        (p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)),
        (p(7.0, 0.0, 0.0), p(8.0, 0.0, 0.0)),
        (p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)),
    ])
    .unwrap();

    let starts: Vec<_> = path.segments().iter().map(|s| s.start().x).collect();
    assert_eq!(starts, vec![7.0, 3.0, 1.0]);
}

#[test]
fn radial_ties_fall_back_to_authoring_order() {
    let mut path = GuidePath::with_order(RadialDistanceOrder::default()).with_observer(NoopObserver);
    path.add_line(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0))
        .unwrap()
        .add_line(p(-1.0, 0.0, 0.0), p(-1.0, -1.0, 0.0))
        .unwrap();

    assert_eq!(path.segments()[0].start(), p(1.0, 0.0, 0.0));
    assert_eq!(path.segments()[1].start(), p(-1.0, 0.0, 0.0));
}

#[test]
fn closure_order_is_accepted() {
    let by_x = |lhs: &GuideSegment, rhs: &GuideSegment| lhs.start().x.total_cmp(&rhs.start().x);
    let mut path = GuidePath::with_order(by_x).with_observer(NoopObserver);
    path.add_line(p(3.0, 0.0, 0.0), p(3.0, 1.0, 0.0))
        .unwrap()
        .add_line(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0))
        .unwrap()
        .add_line(p(1.0, 5.0, 0.0), p(1.0, 6.0, 0.0))
        .unwrap();

    // Equal x means equal under this order, so the third line collapses.
    assert_eq!(path.len(), 2);
    assert_eq!(path.segments()[0].start(), p(1.0, 0.0, 0.0));
    assert_eq!(path.order_name(), "custom");
}
