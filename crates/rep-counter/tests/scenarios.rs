//! End-to-end frame sequences through the public counter API

use pose_geometry::testing::pose;
use pose_geometry::{FrameSample, Landmark};
use proptest::prelude::*;
use rep_counter::{
    CounterConfig, CounterEvent, FrameReport, MotionLabel, MotionPhase, PositionState, RepCounter,
    StatusColor,
};

fn feed(counter: &mut RepCounter, sample: &FrameSample, frames: usize) -> Vec<FrameReport> {
    (0..frames).map(|_| counter.process(sample)).collect()
}

/// Counter that has just become set with extended arms
fn set_counter() -> RepCounter {
    let mut counter = RepCounter::new(CounterConfig::default()).unwrap();
    feed(&mut counter, &pose(150.0, 60.0, 0.9), 5);
    assert_eq!(counter.position(), PositionState::Set);
    counter
}

#[test]
fn test_scenario_set_on_fifth_frame() {
    let mut counter = RepCounter::new(CounterConfig::default()).unwrap();
    let reports = feed(&mut counter, &pose(150.0, 60.0, 0.9), 5);

    for report in &reports[..4] {
        assert_eq!(report.position, PositionState::NotSet);
        assert!(report.events.is_empty());
    }
    assert_eq!(reports[4].position, PositionState::Set);
    assert_eq!(reports[4].position_change(), Some(PositionState::Set));
}

#[test]
fn test_scenario_one_rep() {
    let mut counter = set_counter();

    let down = feed(&mut counter, &pose(90.0, 60.0, 0.9), 5);
    assert!(down.iter().all(|r| r.motion.label == MotionLabel::Lower));
    assert_eq!(counter.state().phase, MotionPhase::Down);
    assert_eq!(counter.reps(), 0);

    let up = feed(&mut counter, &pose(150.0, 60.0, 0.9), 5);
    assert!(up[..4].iter().all(|r| r.rep_counted().is_none()));
    assert_eq!(up[4].rep_counted(), Some(1));
    assert_eq!(counter.reps(), 1);
}

#[test]
fn test_scenario_brief_rise_keeps_set() {
    let mut counter = set_counter();

    for _ in 0..5 {
        feed(&mut counter, &pose(150.0, 10.0, 0.9), 9);
        feed(&mut counter, &pose(150.0, 40.0, 0.9), 1);
        assert_eq!(counter.position(), PositionState::Set);
    }
}

#[test]
fn test_entry_margin_is_inclusive() {
    let mut counter = RepCounter::new(CounterConfig::default()).unwrap();
    let reports = feed(&mut counter, &pose(150.0, 50.0, 0.9), 5);
    assert_eq!(reports[4].position_change(), Some(PositionState::Set));
}

#[test]
fn test_hold_margin_is_inclusive() {
    let mut counter = set_counter();
    feed(&mut counter, &pose(150.0, 30.0, 0.9), 30);
    assert_eq!(counter.position(), PositionState::Set);
    assert_eq!(counter.state().loss_confirm.count(), 0);

    let reports = feed(&mut counter, &pose(150.0, 29.0, 0.9), 10);
    assert_eq!(reports[9].position_change(), Some(PositionState::NotSet));
}

#[test]
fn test_set_lost_on_tenth_frame() {
    let mut counter = set_counter();
    let reports = feed(&mut counter, &pose(150.0, 10.0, 0.9), 10);

    assert!(reports[..9].iter().all(|r| r.position == PositionState::Set));
    assert_eq!(reports[9].position_change(), Some(PositionState::NotSet));
    assert_eq!(counter.state().init_confirm.count(), 0);
}

#[test]
fn test_scenario_low_confidence_frame_is_inert() {
    let weak = pose(90.0, 60.0, 0.3);

    // NotSet: breaks the entry run
    let mut counter = RepCounter::new(CounterConfig::default()).unwrap();
    feed(&mut counter, &pose(150.0, 60.0, 0.9), 4);
    let report = counter.process(&weak);
    assert!(report.events.is_empty());
    assert_eq!(report.motion.label, MotionLabel::Hold);
    assert_eq!(report.motion.color, StatusColor::Gray);
    assert_eq!(counter.state().init_confirm.count(), 0);

    // Set, Up phase: breaks the lowering run
    let mut counter = set_counter();
    feed(&mut counter, &pose(90.0, 60.0, 0.9), 4);
    let report = counter.process(&weak);
    assert!(report.events.is_empty());
    assert_eq!(counter.state().phase, MotionPhase::Up);
    assert_eq!(counter.state().down_confirm.count(), 0);

    // Set, Down phase: breaks the extension run
    feed(&mut counter, &pose(90.0, 60.0, 0.9), 5);
    feed(&mut counter, &pose(150.0, 60.0, 0.9), 4);
    let report = counter.process(&pose(150.0, 60.0, 0.3));
    assert!(report.events.is_empty());
    assert_eq!(counter.state().up_confirm.count(), 0);
    assert_eq!(counter.reps(), 0);
}

#[test]
fn test_single_unconfident_landmark_blocks_entry() {
    let mut counter = RepCounter::new(CounterConfig::default()).unwrap();
    let mut sample = pose(150.0, 60.0, 0.9);
    sample.keypoints[Landmark::RightElbow.index()].score = 0.3;

    feed(&mut counter, &sample, 20);
    assert_eq!(counter.position(), PositionState::NotSet);
}

#[test]
fn test_four_up_frames_then_interruption() {
    let mut counter = set_counter();
    feed(&mut counter, &pose(90.0, 60.0, 0.9), 5);
    feed(&mut counter, &pose(150.0, 60.0, 0.9), 4);
    feed(&mut counter, &pose(120.0, 60.0, 0.9), 1);
    feed(&mut counter, &pose(150.0, 60.0, 0.9), 4);
    assert_eq!(counter.reps(), 0);

    let last = counter.process(&pose(150.0, 60.0, 0.9));
    assert_eq!(last.rep_counted(), Some(1));
}

/// Leaving "set" does not clear the phase or the rep confirmation counters,
/// so partial progress carries over when the subject gets back in position.
#[test]
fn test_progress_survives_leaving_set() {
    let mut counter = set_counter();
    feed(&mut counter, &pose(90.0, 60.0, 0.9), 5);
    assert_eq!(counter.state().phase, MotionPhase::Down);

    // Rising out of position: 6 hold frames, 3 extended, then the 10th loss frame
    feed(&mut counter, &pose(120.0, 10.0, 0.9), 6);
    feed(&mut counter, &pose(150.0, 10.0, 0.9), 3);
    assert_eq!(counter.state().up_confirm.count(), 3);
    let lost = counter.process(&pose(150.0, 10.0, 0.9));
    assert_eq!(lost.position_change(), Some(PositionState::NotSet));

    assert_eq!(counter.state().phase, MotionPhase::Down);
    assert_eq!(counter.state().up_confirm.count(), 3);

    // Back in position: the entry frame and one more finish the rep
    let reentry = feed(&mut counter, &pose(150.0, 60.0, 0.9), 5);
    assert_eq!(reentry[4].position_change(), Some(PositionState::Set));
    assert_eq!(counter.state().up_confirm.count(), 4);

    let report = counter.process(&pose(150.0, 60.0, 0.9));
    assert_eq!(report.rep_counted(), Some(1));
}

#[test]
fn test_report_json_for_presentation() {
    let mut counter = set_counter();
    feed(&mut counter, &pose(90.0, 60.0, 0.9), 5);
    let reports = feed(&mut counter, &pose(150.0, 60.0, 0.9), 5);

    let json = serde_json::to_value(&reports[4]).unwrap();
    assert_eq!(json["position"], "Set");
    assert_eq!(json["motion"]["label"], "Up");
    assert_eq!(json["motion"]["color"], "green");
    assert_eq!(json["reps"], 1);
    assert_eq!(json["events"][0]["event"], "rep_counted");
}

fn arb_frame() -> impl Strategy<Value = FrameSample> {
    (
        prop::sample::select(vec![80.0f32, 95.0, 120.0, 145.0, 165.0]),
        prop::sample::select(vec![-20.0f32, 10.0, 35.0, 55.0, 90.0]),
        prop::sample::select(vec![0.2f32, 0.3, 0.6, 0.9]),
    )
        .prop_map(|(deg, depth, score)| pose(deg, depth, score))
}

proptest! {
    #[test]
    fn prop_rep_count_steps_by_one(frames in prop::collection::vec(arb_frame(), 0..300)) {
        let mut counter = RepCounter::default();
        let mut last = 0u32;

        for frame in &frames {
            let report = counter.process(frame);
            prop_assert!(report.reps == last || report.reps == last + 1);
            match report.rep_counted() {
                Some(count) => prop_assert_eq!(count, last + 1),
                None => prop_assert_eq!(report.reps, last),
            }
            last = report.reps;
        }
    }

    #[test]
    fn prop_low_confidence_never_transitions(
        frames in prop::collection::vec(arb_frame(), 0..100),
        deg in prop::sample::select(vec![80.0f32, 120.0, 165.0]),
        depth in prop::sample::select(vec![10.0f32, 60.0]),
    ) {
        let mut counter = RepCounter::default();
        for frame in &frames {
            counter.process(frame);
        }

        let before = counter.state().clone();
        let report = counter.process(&pose(deg, depth, 0.3));

        let only_loss = report.events.iter().all(|e| matches!(
            e,
            CounterEvent::PositionChanged { to: PositionState::NotSet, .. }
        ));
        prop_assert!(only_loss);
        prop_assert_eq!(report.rep_counted(), None);
        prop_assert_eq!(counter.state().phase, before.phase);
        prop_assert_eq!(counter.state().init_confirm.count(), 0);

        // The rep step only ran if still set, and then reset the active counter
        let counted = counter.state().is_set();
        let expected_down = if counted && before.phase == MotionPhase::Up {
            0
        } else {
            before.down_confirm.count()
        };
        let expected_up = if counted && before.phase == MotionPhase::Down {
            0
        } else {
            before.up_confirm.count()
        };
        prop_assert_eq!(counter.state().down_confirm.count(), expected_down);
        prop_assert_eq!(counter.state().up_confirm.count(), expected_up);
    }
}
