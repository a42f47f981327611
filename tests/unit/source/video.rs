use super::*;

#[test]
fn two_seconds_at_ten_fps_is_twenty_samples() {
    let times = sample_times(2.0, 10.0).unwrap();
    assert_eq!(times.len(), 20);
    assert_eq!(times[0], 0.0);
    assert!(times.iter().all(|&t| t < 2.0));
    assert!((times[19] - 1.9).abs() < 1e-9);
}

#[test]
fn partial_interval_still_gets_a_sample() {
    // 1.05s at 10fps: 0.0 .. 1.0 inclusive.
    assert_eq!(sample_times(1.05, 10.0).unwrap().len(), 11);
    assert_eq!(sample_times(1.0, 30.0).unwrap().len(), 30);
}

#[test]
fn degenerate_inputs_yield_nothing() {
    assert!(sample_times(0.0, 30.0).unwrap().is_empty());
    assert!(sample_times(-1.0, 30.0).unwrap().is_empty());
    assert!(sample_times(f64::NAN, 30.0).unwrap().is_empty());
    assert!(sample_times(f64::INFINITY, 30.0).unwrap().is_empty());
    assert!(sample_times(2.0, 0.0).unwrap().is_empty());
}

#[test]
fn timestamps_are_strictly_increasing() {
    let times = sample_times(3.7, 29.97).unwrap();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
    assert!(*times.last().unwrap() < 3.7);
}

#[test]
fn oversized_timelines_are_rejected_without_allocating() {
    for fps in [1e300, 1e9, f64::MAX] {
        assert!(matches!(
            sample_times(2.0, fps),
            Err(ConvertError::InvalidConfig(_))
        ));
    }
    let at_limit = sample_times(1.0, MAX_VIDEO_SAMPLES as f64).unwrap();
    assert_eq!(at_limit.len(), MAX_VIDEO_SAMPLES);
}
