use crate::*;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use sticky_overlay::{
    BoundingRect, ClassifiedGroups, DEFAULT_ITEM_THRESHOLDS, Error, IntersectionSample,
    IntersectionTracker, ItemPosition, ItemRect, MarkerId, TrackedItem, TrackerOptions,
};

fn root() -> BoundingRect {
    BoundingRect::new(0.0, 400.0, 0.0, 300.0)
}

fn frame() -> Frame {
    Frame::new(root(), 2000.0)
}

fn field(id: &str, top: f64) -> TrackedItem {
    TrackedItem::new(id, ItemRect::new(top, 0.0, 200.0, 50.0))
}

fn ids(positions: &[ItemPosition]) -> Vec<&str> {
    positions.iter().map(|p| p.item.id.as_str()).collect()
}

fn form() -> Vec<TrackedItem> {
    vec![field("f0", 100.0), field("f1", 380.0), field("f2", 1000.0)]
}

#[test]
fn ratio_and_threshold_buckets() {
    let r = root();

    let inside = BoundingRect::new(10.0, 110.0, 0.0, 100.0);
    assert_eq!(intersection_ratio(&inside, &r), (true, 1.0));

    let half = BoundingRect::new(350.0, 450.0, 0.0, 100.0);
    assert_eq!(intersection_ratio(&half, &r), (true, 0.5));
    assert_eq!(threshold_index(0.5, true, &DEFAULT_ITEM_THRESHOLDS), 4);

    let touching = BoundingRect::new(400.0, 500.0, 0.0, 100.0);
    assert_eq!(intersection_ratio(&touching, &r), (true, 0.0));
    assert_eq!(threshold_index(0.0, true, &DEFAULT_ITEM_THRESHOLDS), 1);

    let outside = BoundingRect::new(401.0, 500.0, 0.0, 100.0);
    assert_eq!(intersection_ratio(&outside, &r), (false, 0.0));
    assert_eq!(threshold_index(0.0, false, &DEFAULT_ITEM_THRESHOLDS), 0);

    let line = BoundingRect::new(200.0, 200.0, 0.0, 100.0);
    assert_eq!(intersection_ratio(&line, &r), (true, 1.0));
    assert_eq!(threshold_index(1.0, true, &DEFAULT_ITEM_THRESHOLDS), 8);
}

#[test]
fn boundary_markers_stick_to_the_root_edges() {
    let obs = GeometryObserver::default();

    let f = frame().with_scroll_top(500.0);
    assert_eq!(
        obs.marker_rect(&MarkerId::TopBoundary, &f),
        Some(BoundingRect::new(0.0, 1.0, 0.0, 300.0))
    );
    assert_eq!(
        obs.marker_rect(&MarkerId::BottomBoundary, &f),
        Some(BoundingRect::new(399.0, 400.0, 0.0, 300.0))
    );

    // Content starts below the root top and ends above the root bottom.
    let short = Frame::new(root(), 200.0).with_content_offset(50.0, 0.0);
    assert_eq!(
        obs.marker_rect(&MarkerId::TopBoundary, &short).unwrap().top,
        50.0
    );
    assert_eq!(
        obs.marker_rect(&MarkerId::BottomBoundary, &short)
            .unwrap()
            .bottom,
        250.0
    );
}

#[test]
fn item_markers_are_padded_and_follow_scroll() {
    let mut obs = GeometryObserver::new(30.0);
    let item = field("f0", 100.0);
    let marker = MarkerId::Item(item.id.clone());
    assert_eq!(obs.marker_rect(&marker, &frame()), None);

    obs.set_item_rect(item.id.clone(), item.rect);
    assert_eq!(
        obs.marker_rect(&marker, &frame().with_scroll_top(20.0)),
        Some(BoundingRect::new(50.0, 160.0, 0.0, 200.0))
    );
    assert_eq!(
        obs.marker_rect(&marker, &frame().with_content_offset(10.0, 5.0)),
        Some(BoundingRect::new(80.0, 190.0, 5.0, 205.0))
    );
}

#[test]
fn collect_delivers_initially_then_only_on_crossings() {
    let mut t = IntersectionTracker::new(GeometryObserver::default(), TrackerOptions::default())
        .unwrap();
    let f = frame();

    let first = t.service_mut().collect(&f);
    let markers: Vec<&MarkerId> = first.iter().map(|(s, _)| s.marker()).collect();
    assert_eq!(
        markers,
        vec![&MarkerId::TopBoundary, &MarkerId::BottomBoundary]
    );
    assert!(t.service_mut().collect(&f).is_empty());

    // Moving the content does not move sticky boundaries: still no crossing.
    assert!(t.service_mut().collect(&f.with_scroll_top(300.0)).is_empty());
}

#[test]
fn controller_classifies_while_scrolling() {
    let mut c = Controller::new(TrackerOptions::default(), frame()).unwrap();
    c.set_items(form()).unwrap();

    let g = c.groups();
    assert!(g.above.is_empty());
    assert_eq!(ids(&g.inside), vec!["f0"]);
    assert_eq!(ids(&g.below), vec!["f1", "f2"]);

    c.on_scroll(200.0);
    let g = c.groups();
    assert_eq!(ids(&g.above), vec!["f0"]);
    assert_eq!(ids(&g.inside), vec!["f1"]);
    assert_eq!(ids(&g.below), vec!["f2"]);

    // Samples only arrive on threshold crossings, so scroll through rather than jump.
    for step in 3..=16 {
        c.on_scroll(f64::from(step) * 100.0);
    }
    let g = c.groups();
    assert_eq!(ids(&g.above), vec!["f0", "f1", "f2"]);
    assert!(g.inside.is_empty());
    assert!(g.below.is_empty());
}

#[test]
fn controller_notifies_once_per_frame() {
    let calls = Arc::new(AtomicUsize::new(0));
    let opts = TrackerOptions::default().with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &ClassifiedGroups| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut c = Controller::new(opts, frame()).unwrap();
    c.set_items(form()).unwrap();
    let before = calls.load(Ordering::Relaxed);

    c.on_scroll(200.0);
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);

    // Nothing crossed a threshold.
    c.on_scroll(200.0);
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
}

#[test]
fn removed_items_stop_being_observed() {
    let mut c = Controller::new(TrackerOptions::default(), frame()).unwrap();
    c.set_items(form()).unwrap();
    c.set_items(vec![field("f1", 380.0)]).unwrap();

    let tracker = c.tracker().unwrap();
    let observer = tracker.service();
    assert!(!observer.is_observing(&MarkerId::Item("f0".into())));
    assert!(observer.is_observing(&MarkerId::Item("f1".into())));
    assert_eq!(observer.observed().count(), 3);
    assert_eq!(ids(&c.groups().below), vec!["f1"]);
}

#[test]
fn invalid_items_leave_the_controller_untouched() {
    let mut c = Controller::new(TrackerOptions::default(), frame()).unwrap();
    c.set_items(form()).unwrap();

    let bad = vec![field("ok", 10.0), field("", 10.0)];
    assert!(matches!(c.set_items(bad), Err(Error::InvalidArgument(_))));
    assert_eq!(c.tracker().unwrap().items().len(), 3);
    assert_eq!(c.groups().len(), 3);
}

#[test]
fn unmount_ignores_late_input() {
    let mut c = Controller::new(TrackerOptions::default(), frame()).unwrap();
    c.set_items(form()).unwrap();
    let sub = c
        .tracker()
        .unwrap()
        .subscription(&MarkerId::TopBoundary)
        .unwrap()
        .clone();

    c.unmount();
    assert!(!c.is_mounted());
    assert!(c.groups().is_empty());
    assert!(!c.deliver(&sub, IntersectionSample::default()));
    c.on_scroll(100.0);
    assert!(c.groups().is_empty());
    assert_eq!(c.set_items(form()), Err(Error::Closed));

    c.unmount();
}

#[test]
fn render_pass_notifies_once_with_its_items() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(AtomicUsize::new(0));
    let opts = TrackerOptions::default().with_on_change(Some({
        let calls = Arc::clone(&calls);
        let seen = Arc::clone(&seen);
        move |g: &ClassifiedGroups| {
            calls.fetch_add(1, Ordering::Relaxed);
            seen.store(g.len(), Ordering::Relaxed);
        }
    }));
    let mut c = Controller::new(opts, frame()).unwrap();
    let before = calls.load(Ordering::Relaxed);

    c.set_items(form()).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
    assert_eq!(seen.load(Ordering::Relaxed), 3);

    // A rejected render pass changes nothing and stays silent.
    assert!(c.set_items(vec![field("", 0.0)]).is_err());
    assert_eq!(calls.load(Ordering::Relaxed), before + 1);
}
