use rov_nav::core::{Circle, CircleDetection, Observation};
use rov_nav::{DecisionAnalyzer, DecisionCategory, PerceptionResult};
use rstest::{fixture, rstest};

fn obs(velocity: f64, direction: f64) -> Observation {
    Observation {
        velocity,
        direction,
        frame: 0,
    }
}

fn detection(frame: i64, circles: usize, targets: usize) -> CircleDetection {
    let circle = Circle { x: 320.0, y: 240.0, r: 30.0 };
    CircleDetection {
        frame,
        circles_count: circles as u64,
        circles: vec![circle; circles],
        yellow_circles: vec![circle; targets],
    }
}

#[fixture]
fn analyzer() -> DecisionAnalyzer {
    DecisionAnalyzer::new()
}

#[rstest]
fn empty_run_is_all_zero(mut analyzer: DecisionAnalyzer) {
    let result = analyzer.analyze_decision_patterns(&PerceptionResult::default());

    assert_eq!(result.total_decisions, 0);
    assert_eq!(result.decision_accuracy, 0.0);
    assert_eq!(result.average_velocity, 0.0);
    assert!(result.decisions.is_empty());
    assert!(result.orientation_data.is_empty());
    assert!(analyzer.decision_history().is_empty());
}

#[rstest]
fn slow_down_without_obstacle_is_a_poor_stop(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(vec![obs(1.0, 0.0), obs(0.1, 0.0)], Vec::new());
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.decisions[0].category, DecisionCategory::Cruise);
    assert_eq!(result.decisions[0].quality, 0.5);
    assert_eq!(result.decisions[1].category, DecisionCategory::Stop);
    assert_eq!(result.decisions[1].quality, 0.4);
    assert_eq!(result.decision_accuracy, 0.0);
    assert_eq!(result.good_decisions_count, 0);
}

#[rstest]
#[case(1.0, 0, 0.6)]
#[case(0.1, 2, 0.6)]
#[case(5.0, 3, 0.9)]
fn target_in_view_outranks_every_other_rule(
    mut analyzer: DecisionAnalyzer,
    #[case] velocity: f64,
    #[case] other_circles: usize,
    #[case] quality: f64,
) {
    let data = PerceptionResult::new(vec![obs(velocity, 0.0)], vec![detection(0, other_circles, 1)]);
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.decisions[0].category, DecisionCategory::ApproachTarget);
    assert_eq!(result.decisions[0].quality, quality);
}

#[rstest]
#[case(2.0, 0.9)]
#[case(1.0, 0.6)]
#[case(0.5, 0.6)]
fn approach_quality_rewards_acceleration(
    mut analyzer: DecisionAnalyzer,
    #[case] velocity: f64,
    #[case] quality: f64,
) {
    let data = PerceptionResult::new(
        vec![obs(1.0, 0.0), obs(velocity, 0.0)],
        vec![detection(1, 0, 2)],
    );
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.decisions[1].category, DecisionCategory::ApproachTarget);
    assert_eq!(result.decisions[1].quality, quality);
}

#[rstest]
#[case(obs(0.2, 0.0), 1, DecisionCategory::Stop, 0.8)]
#[case(obs(0.2, 0.0), 0, DecisionCategory::Stop, 0.4)]
#[case(obs(4.0, 10.0), 0, DecisionCategory::Move, 0.8)]
#[case(obs(4.0, 20.0), 2, DecisionCategory::Move, 0.5)]
#[case(obs(1.5, 0.0), 1, DecisionCategory::Navigate, 0.8)]
#[case(obs(2.8, 0.0), 1, DecisionCategory::Navigate, 0.6)]
#[case(obs(1.5, 40.0), 1, DecisionCategory::Navigate, 0.6)]
#[case(obs(1.5, 0.0), 0, DecisionCategory::Cruise, 0.7)]
#[case(obs(1.5, 25.0), 0, DecisionCategory::Cruise, 0.5)]
#[case(obs(2.5, 0.0), 0, DecisionCategory::Cruise, 0.5)]
#[case(obs(0.3, 0.0), 0, DecisionCategory::Cruise, 0.5)]
#[case(obs(3.0, 0.0), 0, DecisionCategory::Cruise, 0.5)]
#[case(obs(4.0, 15.0), 0, DecisionCategory::Move, 0.5)]
#[case(obs(1.5, 30.0), 1, DecisionCategory::Navigate, 0.6)]
#[case(obs(1.5, 20.0), 0, DecisionCategory::Cruise, 0.5)]
fn second_frame_is_classified_by_priority(
    mut analyzer: DecisionAnalyzer,
    #[case] frame: Observation,
    #[case] other_circles: usize,
    #[case] category: DecisionCategory,
    #[case] quality: f64,
) {
    let data = PerceptionResult::new(
        vec![obs(1.0, 0.0), frame],
        vec![detection(1, other_circles, 0)],
    );
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.decisions[1].category, category);
    assert_eq!(result.decisions[1].quality, quality);
}

#[rstest]
fn cruise_at_threshold_quality_is_not_good(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(vec![obs(1.5, 0.0), obs(0.2, 0.0)], vec![detection(1, 1, 0)]);
    let result = analyzer.analyze_decision_patterns(&data);

    // 0.7 cruise does not count, 0.8 stop does
    assert_eq!(result.good_decisions_count, 1);
    assert_eq!(result.decision_accuracy, 0.5);
}

#[rstest]
fn only_the_first_record_of_a_frame_is_used(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(
        vec![obs(1.5, 0.0)],
        vec![detection(0, 0, 0), detection(0, 0, 1)],
    );
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.decisions[0].category, DecisionCategory::Cruise);
    // efficiency still counts every record carrying a target
    assert_eq!(result.movement_efficiency, 1.0);
}

#[rstest]
fn aggregates_cover_the_whole_run(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(
        vec![obs(1.0, 0.0), obs(2.0, 10.0), obs(3.0, -20.0), obs(2.0, -20.0)],
        vec![detection(0, 2, 0), detection(1, 1, 1), detection(2, 3, 0)],
    );
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.total_decisions, 4);
    assert_eq!(result.average_velocity, 2.0);
    assert_eq!(result.movement_efficiency, 0.25);
    assert_eq!(result.total_circles_detected, 6);
    assert!((result.average_direction_change - 40.0 / 3.0).abs() < 1e-12);
}

#[rstest]
fn trajectory_is_rebuilt_from_motion(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(vec![obs(0.0, 0.0), obs(1.0, 0.0), obs(2.0, 90.0)], Vec::new());
    let result = analyzer.analyze_decision_patterns(&data);
    let third = &result.orientation_data[2];

    assert_eq!(third.frame, 2);
    assert!((third.position.x - 15.0).abs() < 1e-12);
    assert!((third.position.y - 6.0).abs() < 1e-12);
    assert_eq!(third.position.z, 0.0);
    assert_eq!(third.orientation.yaw, 90.0);
    assert_eq!((third.orientation.roll, third.orientation.pitch), (0.0, 0.0));
}

#[rstest]
fn history_accumulates_until_cleared(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(vec![obs(0.1, 0.0), obs(5.0, 0.0)], Vec::new());
    analyzer.analyze_decision_patterns(&data);
    analyzer.analyze_decision_patterns(&data);

    assert_eq!(analyzer.decision_history().len(), 4);
    assert_eq!(
        analyzer.category_counts(),
        vec![(DecisionCategory::Stop, 2), (DecisionCategory::Move, 2)]
    );

    analyzer.clear_history();
    assert!(analyzer.decision_history().is_empty());
}

#[rstest]
fn missing_observation_fields_read_as_zero(mut analyzer: DecisionAnalyzer) {
    let json = r#"{"movement_data": [{"frame": 1}, {"velocity": 4.0}], "circle_detection_data": [{}]}"#;
    let data = PerceptionResult::from_json_str(json).unwrap();
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.decisions[0].category, DecisionCategory::Stop);
    assert_eq!(result.decisions[1].category, DecisionCategory::Move);
    assert_eq!(result.average_velocity, 2.0);
}

#[rstest]
fn single_frame_has_no_direction_change(mut analyzer: DecisionAnalyzer) {
    let data = PerceptionResult::new(vec![obs(4.0, 120.0)], Vec::new());
    let result = analyzer.analyze_decision_patterns(&data);

    assert_eq!(result.average_direction_change, 0.0);
    assert_eq!(result.decisions[0].category, DecisionCategory::Move);
    assert_eq!(result.decisions[0].quality, 0.8);
}

#[rstest]
#[case(r#"{"velocity": null, "direction": 10.0}"#, 0.0, 10.0)]
#[case(r#"{"velocity": 1.5, "direction": "north"}"#, 1.5, 0.0)]
#[case(r#"{"velocity": [1, 2], "direction": null, "frame": "x"}"#, 0.0, 0.0)]
fn malformed_observation_fields_read_as_zero(
    #[case] observation: &str,
    #[case] velocity: f64,
    #[case] direction: f64,
) {
    let json = format!(r#"{{"movement_data": [{}]}}"#, observation);
    let data = PerceptionResult::from_json_str(&json).unwrap();

    assert_eq!(data.movement_data[0].velocity, velocity);
    assert_eq!(data.movement_data[0].direction, direction);
}

#[rstest]
fn malformed_detection_fields_read_as_empty(mut analyzer: DecisionAnalyzer) {
    let json = r#"{
        "movement_data": [{"velocity": null, "direction": "north"}, {"velocity": 1.5}],
        "circle_detection_data": [
            {"frame": 0, "circles_count": "two", "circles": null, "yellow_circles": null},
            {"frame": 1, "circles_count": 2, "circles": [[1, 2, 3], [4, 5, 6]], "yellow_circles": "none"}
        ]
    }"#;
    let data = PerceptionResult::from_json_str(json).unwrap();
    let result = analyzer.analyze_decision_patterns(&data);

    assert!(data.circle_detection_data[0].circles.is_empty());
    assert!(!data.circle_detection_data[1].has_target());
    assert_eq!(result.total_decisions, 2);
    assert_eq!(result.decisions[0].category, DecisionCategory::Stop);
    assert_eq!(result.decisions[0].quality, 0.4);
    assert_eq!(result.decisions[1].category, DecisionCategory::Navigate);
    assert_eq!(result.total_circles_detected, 2);
    assert_eq!(result.movement_efficiency, 0.0);
}
