use super::*;
use crate::{
    animation::spring::SpringConfig,
    timeline::transition::{Direction, TransitionTiming},
};

fn fps() -> Fps {
    Fps::whole(30).unwrap()
}

fn names(frame: &TimelineFrame) -> Vec<&str> {
    frame.active.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn back_to_back_scenes_are_mutually_exclusive() {
    let tl = TransitionSeries::new()
        .scene("a", 90)
        .scene("b", 90)
        .build(fps())
        .unwrap();
    assert_eq!(tl.duration(), 180);
    for g in 0..180 {
        let f = tl.frame(FrameIndex(g));
        assert_eq!(f.active.len(), 1, "frame {g}");
        assert!(f.transition.is_none());
        let expected = if g < 90 { "a" } else { "b" };
        assert_eq!(names(&f), vec![expected]);
    }
    assert_eq!(tl.frame(FrameIndex(90)).local("b"), Some(0));
    assert_eq!(tl.frame(FrameIndex(180)).active.len(), 0);
}

#[test]
fn transitions_overlap_neighbors() {
    let timing = TransitionTiming::spring(15, SpringConfig::physics(1.0, 80.0, 200.0));
    let tl = TransitionSeries::new()
        .scene("s1", 90)
        .transition(Transition::fade(timing))
        .scene("s2", 90)
        .transition(Transition::wipe(Direction::FromLeft, timing))
        .scene("s3", 130)
        .transition(Transition::wipe(Direction::FromRight, timing))
        .scene("s4", 110)
        .transition(Transition::fade(timing))
        .scene("s5", 90)
        .build(fps())
        .unwrap();

    assert_eq!(tl.duration(), 450);
    let starts: Vec<u64> = tl.scenes().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0, 75, 150, 265, 360]);

    let f = tl.frame(FrameIndex(74));
    assert_eq!(names(&f), vec!["s1"]);
    assert!(f.transition.is_none());

    let f = tl.frame(FrameIndex(75));
    assert_eq!(names(&f), vec!["s1", "s2"]);
    let t = f.transition.unwrap();
    assert_eq!((t.from, t.to, t.local), (0, 1, 0));
    assert_eq!(t.progress, 0.0);

    let f = tl.frame(FrameIndex(89));
    let t = f.transition.unwrap();
    assert_eq!(t.local, 14);
    assert!(t.progress > 0.9);

    let f = tl.frame(FrameIndex(90));
    assert_eq!(names(&f), vec!["s2"]);
    assert_eq!(f.local("s2"), Some(15));
}

#[test]
fn linear_transition_progress_rises_across_window() {
    let tl = TransitionSeries::new()
        .scene("a", 30)
        .transition(Transition::fade(TransitionTiming::linear(10)))
        .scene("b", 30)
        .build(fps())
        .unwrap();
    let progress: Vec<f64> = (20..30)
        .map(|g| tl.frame(FrameIndex(g)).transition.unwrap().progress)
        .collect();
    assert_eq!(progress[0], 0.0);
    assert!((progress[5] - 0.5).abs() < 1e-12);
    for w in progress.windows(2) {
        assert!(w[1] > w[0]);
    }
}

#[test]
fn premounting_scenes_are_reported_separately() {
    let tl = TransitionSeries::new()
        .scene("a", 60)
        .scene("b", 60)
        .premount(15)
        .build(fps())
        .unwrap();
    let f = tl.frame(FrameIndex(50));
    assert_eq!(names(&f), vec!["a"]);
    assert_eq!(f.premounting.len(), 1);
    assert_eq!(f.premounting[0].name, "b");
    assert_eq!(f.premounting[0].local, -10);
    assert!(!f.is_active("b"));
}

#[test]
fn frame_queries_are_order_independent() {
    let tl = TransitionSeries::new()
        .scene("a", 40)
        .transition(Transition::slide(
            Direction::FromBottom,
            TransitionTiming::linear(8),
        ))
        .scene("b", 40)
        .build(fps())
        .unwrap();
    let forward: Vec<TimelineFrame> = (0..72).map(|g| tl.frame(FrameIndex(g))).collect();
    let backward: Vec<TimelineFrame> = (0..72).rev().map(|g| tl.frame(FrameIndex(g))).collect();
    let mut backward = backward;
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn transition_wider_than_scene_is_rejected() {
    let err = TransitionSeries::new()
        .scene("a", 10)
        .transition(Transition::fade(TransitionTiming::linear(15)))
        .scene("b", 90)
        .build(fps())
        .unwrap_err();
    assert!(matches!(err, AdreelError::Validation(_)));

    let err = TransitionSeries::new()
        .scene("a", 90)
        .transition(Transition::fade(TransitionTiming::linear(15)))
        .scene("b", 20)
        .transition(Transition::fade(TransitionTiming::linear(15)))
        .scene("c", 90)
        .build(fps())
        .unwrap_err();
    assert!(err.to_string().contains("exceed"));
}

#[test]
fn malformed_series_are_rejected() {
    let t = Transition::fade(TransitionTiming::linear(5));
    assert!(TransitionSeries::new().build(fps()).is_err());
    assert!(
        TransitionSeries::new()
            .transition(t)
            .scene("a", 10)
            .build(fps())
            .is_err()
    );
    assert!(
        TransitionSeries::new()
            .scene("a", 10)
            .transition(t)
            .build(fps())
            .is_err()
    );
    assert!(
        TransitionSeries::new()
            .scene("a", 10)
            .scene("a", 10)
            .build(fps())
            .is_err()
    );
}

#[test]
fn misplaced_premount_is_rejected() {
    let t = Transition::fade(TransitionTiming::linear(5));
    let cases = [
        TransitionSeries::new().premount(5).scene("a", 10),
        TransitionSeries::new()
            .scene("a", 10)
            .transition(t)
            .premount(5)
            .scene("b", 10),
        TransitionSeries::new().scene("a", 10).premount(5).premount(3),
    ];
    for series in cases {
        let err = series.build(fps()).unwrap_err();
        assert!(matches!(err, AdreelError::Validation(_)), "{err}");
        assert!(err.to_string().contains("premount"));
    }
}

#[test]
fn premount_after_transition_scene_applies_to_that_scene() {
    let tl = TransitionSeries::new()
        .scene("a", 30)
        .transition(Transition::fade(TransitionTiming::linear(5)))
        .scene("b", 30)
        .premount(10)
        .build(fps())
        .unwrap();
    assert_eq!(tl.scene("a").unwrap().premount, 0);
    assert_eq!(tl.scene("b").unwrap().premount, 10);
}

#[test]
fn absolute_timeline_allows_free_placement() {
    let tl = Timeline::absolute(
        vec![
            Scene::new("bg", 0, 100).unwrap(),
            Scene::new("title", 20, 30).unwrap(),
        ],
        fps(),
    )
    .unwrap();
    assert_eq!(names(&tl.frame(FrameIndex(25))), vec!["bg", "title"]);
    assert_eq!(tl.scene("title").map(Scene::end), Some(50));
    assert!(tl.transition_after(0).is_none());
}
