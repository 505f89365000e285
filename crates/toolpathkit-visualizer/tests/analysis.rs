use toolpathkit_visualizer::{analyze, parse_program, segment_events};

#[test]
fn test_travel_holds_omitted_axis() {
    let events = parse_program("G0 X0 Y0 Z0\nG1 X3 Y4").unwrap();
    let stats = analyze(&events);

    assert_eq!(stats.motion_events, 2);
    assert!(
        (stats.travel_distance - 5.0).abs() < 1e-9,
        "expected 3-4-5 travel, got {}",
        stats.travel_distance
    );
    assert_eq!((stats.min_z, stats.max_z), (0.0, 0.0));
}

#[test]
fn test_omitted_axis_is_not_reset() {
    let events = parse_program("G0 X10 Y0 Z-1\nG1 Y10\nG1 X0").unwrap();
    let stats = analyze(&events);

    // (0,0,0) -> (10,0,-1) -> (10,10,-1) -> (0,10,-1)
    let first = (100.0f64 + 1.0).sqrt();
    assert!((stats.travel_distance - (first + 20.0)).abs() < 1e-9);
    assert_eq!((stats.min_z, stats.max_z), (-1.0, -1.0));
}

#[test]
fn test_empty_program() {
    let events = parse_program("").unwrap();
    assert!(events.is_empty());

    let stats = analyze(&events);
    assert!(stats.is_empty());
    assert_eq!(stats.motion_events, 0);
    assert_eq!(stats.travel_distance, 0.0);
    assert_eq!((stats.min_z, stats.max_z), (0.0, 0.0));
    assert!(stats.bounds.is_none());

    assert!(segment_events(&events).is_empty());
}

#[test]
fn test_comment_only_program_is_empty() {
    let events = parse_program("; nothing here\n(still nothing)\n\n").unwrap();
    assert_eq!(events.len(), 3);
    assert!(analyze(&events).is_empty());
}
