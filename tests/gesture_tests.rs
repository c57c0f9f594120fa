// Scenario tests for the hand-gesture pipeline: landmarks in, rotation out.

use glam::Vec2;
use globe_core::*;
use std::collections::VecDeque;

/// Hand whose index tip sits at `index` (image coords) with the thumb tip
/// `gap` to its right.
fn hand(index: (f32, f32), gap: f32) -> Hand {
    let mut flat = vec![0.5_f32; HAND_LANDMARK_COUNT * 3];
    flat[INDEX_TIP * 3] = index.0;
    flat[INDEX_TIP * 3 + 1] = index.1;
    flat[THUMB_TIP * 3] = index.0 + gap;
    flat[THUMB_TIP * 3 + 1] = index.1;
    Hand::from_flat(&flat).unwrap()
}

/// Replays a fixed list of per-frame detector results.
struct Replay(VecDeque<Result<Option<Hand>, DetectionError>>);

impl LandmarkSource for Replay {
    fn detect(&mut self, _timestamp_ms: f64) -> Result<Option<Hand>, DetectionError> {
        self.0.pop_front().unwrap_or(Ok(None))
    }
}

fn close(a: Vec2, b: Vec2, tol: f32) -> bool {
    (a - b).abs().max_element() < tol
}

#[test]
fn smoothing_converges_geometrically() {
    let mut s = PointerSmoother::default();
    let target = Vec2::new(0.9, 0.1);
    let start_err = (target - s.current()).abs().max_element();
    for n in 1..=40 {
        let out = s.update(target);
        let err = (target - out).abs().max_element();
        let expected = start_err * (1.0 - SMOOTHING_ALPHA).powi(n);
        assert!((err - expected).abs() < 1e-5, "frame {n}: {err} vs {expected}");
        if n >= 27 {
            assert!(err < 1e-3, "frame {n}: {err}");
        }
    }
}

#[test]
fn no_jump_on_grab() {
    let mut t = GestureTracker::new();
    let frames = [
        (Vec2::new(0.2, 0.8), false),
        (Vec2::new(0.5, 0.5), true),
        (Vec2::new(0.6, 0.5), true),
        (Vec2::new(0.6, 0.6), true),
    ];
    let deltas: Vec<Option<Vec2>> = frames.iter().map(|(p, a)| t.step(*p, *a).delta).collect();
    assert_eq!(deltas[0], None);
    assert_eq!(deltas[1], Some(Vec2::ZERO));
    assert!(close(deltas[2].unwrap(), Vec2::new(0.1, 0.0), 1e-6));
    assert!(close(deltas[3].unwrap(), Vec2::new(0.0, 0.1), 1e-6));
}

#[test]
fn release_and_regrab_does_not_leak_delta() {
    let mut t = GestureTracker::new();
    t.step(Vec2::new(0.1, 0.1), true);
    t.step(Vec2::new(0.2, 0.1), true);
    t.step(Vec2::new(0.2, 0.1), false);
    let regrab = t.step(Vec2::new(0.8, 0.9), true);
    assert_eq!(regrab.delta, Some(Vec2::ZERO));
    assert_eq!(t.anchor(), Some(Vec2::new(0.8, 0.9)));
    let next = t.step(Vec2::new(0.85, 0.9), true).delta.unwrap();
    assert!(close(next, Vec2::new(0.05, 0.0), 1e-6));
}

#[test]
fn pinch_boundary_through_pipeline() {
    let (mut p, _) = GesturePipeline::new(GestureParams::default());
    let at = p.process(Ok(Some(hand((0.0, 0.5), 0.15))));
    assert!(!at.pointer.active);
    let inside = p.process(Ok(Some(hand((0.0, 0.5), 0.1499))));
    assert!(inside.pointer.active);
    assert!((inside.pinch_strength.unwrap() - 50.03).abs() < 0.01);
}

#[test]
fn end_to_end_scenario() {
    let control = LoopControl::new();
    control.start();
    let mut frame_loop = FrameLoop::new(control);
    let mut globe = Globe::default();
    let pointer = globe.pointer_reader();
    let mut source = Replay(VecDeque::from(vec![
        Ok(None),
        Ok(Some(hand((0.5, 0.5), 0.05))),
        Ok(Some(hand((0.25, 0.5), 0.05))),
    ]));

    // frame 1: no hand
    let TickOutcome::Continue(r1) = frame_loop.tick(0.0, &mut source, &mut globe) else {
        panic!("loop stopped");
    };
    assert!(!r1.pointer.active);
    assert_eq!(r1.delta, None);
    assert_eq!(globe.orientation(), Orientation::default());

    // frame 2: pinch starts, anchored at the smoothed pointer
    let TickOutcome::Continue(r2) = frame_loop.tick(16.0, &mut source, &mut globe) else {
        panic!("loop stopped");
    };
    assert!(r2.pointer.active);
    assert_eq!(r2.transition, Some(DragTransition::Started));
    assert_eq!(r2.delta, Some(Vec2::ZERO));
    assert_eq!(globe.pipeline().drag_anchor(), Some(Vec2::new(0.5, 0.5)));
    assert_eq!(globe.orientation().yaw, 0.0);

    // frame 3: raw x jumps 0.25 (mirrored), smoothed pointer moves 0.05
    let TickOutcome::Continue(r3) = frame_loop.tick(32.0, &mut source, &mut globe) else {
        panic!("loop stopped");
    };
    assert!(close(r3.delta.unwrap(), Vec2::new(0.05, 0.0), 1e-5));
    assert!((globe.orientation().yaw - 0.5).abs() < 1e-4);
    assert!(globe.orientation().pitch.abs() < 1e-6);

    assert_eq!(pointer.snapshot(), r3.pointer);
    assert!(!globe.manual_controls_enabled());
}

#[test]
fn hand_loss_keeps_last_pointer_and_ends_drag() {
    let mut globe = Globe::default();
    globe.frame(Ok(Some(hand((0.3, 0.3), 0.05))), 0.016);
    let held = globe.frame(Ok(Some(hand((0.3, 0.3), 0.05))), 0.016).pointer;

    let lost = globe.frame(Ok(None), 0.016);
    assert!(!lost.pointer.active);
    assert_eq!(lost.transition, Some(DragTransition::Ended));
    assert_eq!((lost.pointer.x, lost.pointer.y), (held.x, held.y));
    assert_eq!(lost.pinch, None);
    assert_eq!(lost.pinch_strength, None);
    assert_eq!(globe.pipeline().phase(), DragPhase::Idle);
}

#[test]
fn detection_failure_counts_as_no_hand() {
    let mut globe = Globe::default();
    globe.frame(Ok(Some(hand((0.5, 0.5), 0.05))), 0.016);
    let failed = globe.frame(Err(DetectionError::Source("boom".into())), 0.016);
    assert!(!failed.hand_present);
    assert!(!failed.pointer.active);
    assert_eq!(failed.transition, Some(DragTransition::Ended));

    // The next good frame re-anchors instead of jumping.
    let back = globe.frame(Ok(Some(hand((0.1, 0.5), 0.05))), 0.016);
    assert_eq!(back.delta, Some(Vec2::ZERO));
}

#[test]
fn malformed_frame_is_treated_as_absent() {
    let mut globe = Globe::default();
    let malformed = Hand::from_flat(&[0.5; 10]).map(Some);
    let report = globe.frame(malformed, 0.0);
    assert!(!report.hand_present);
    assert!(!report.pointer.active);
}

#[test]
fn smoothing_runs_without_pinch() {
    let mut globe = Globe::default();
    let open = globe.frame(Ok(Some(hand((0.0, 1.0), 0.3))), 0.016);
    assert!(!open.pointer.active);
    // raw pointer is (1.0, 1.0); one step from the centre
    assert!(close(Vec2::new(open.pointer.x, open.pointer.y), Vec2::new(0.6, 0.6), 1e-6));
}

#[test]
fn manual_drag_ignored_while_hand_drag_active() {
    let mut globe = Globe::default();
    globe.frame(Ok(Some(hand((0.5, 0.5), 0.05))), 0.016);
    assert!(!globe.begin_manual_drag(Vec2::new(0.5, 0.5)));

    globe.frame(Ok(None), 0.0);
    assert!(globe.begin_manual_drag(Vec2::new(0.5, 0.5)));
    globe.move_manual_drag(Vec2::new(0.51, 0.5));
    globe.frame(Ok(None), 0.0);
    assert!((globe.orientation().yaw - 0.1).abs() < 1e-5);
}

#[test]
fn idle_spin_stops_while_pinned() {
    let mut globe = Globe::default();
    globe.frame(Ok(None), 1.0);
    let spun = globe.orientation().yaw;
    assert!((spun - IDLE_SPIN_RATE).abs() < 1e-6);

    globe.pick_world(glam::Vec3::new(0.0, 0.0, GLOBE_RADIUS)).unwrap();
    globe.frame(Ok(None), 1.0);
    assert_eq!(globe.orientation().yaw, spun);

    globe.unpin();
    globe.frame(Ok(None), 1.0);
    assert!(globe.orientation().yaw > spun);
}
