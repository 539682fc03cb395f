/*!
 * Tests for re-timing, gap enforcement and the lead-in offset
 */

use subnorm::app_config::Config;
use subnorm::subtitle_processor::SubtitleEntry;
use subnorm::timing::{OffsetApplier, TimeWindow, TimingAdjustment, TimingNormalizer};

/// Scenario A timing: four lines from a three-second window
#[test]
fn test_normalize_entry_withScenarioLines_shouldLayOutBackToBack() {
    let normalizer = TimingNormalizer::new(&Config::default());

    let timing = normalizer.normalize_entry(TimeWindow::new(1000, 4000), &[20, 7, 15, 18], None);

    assert_eq!(
        timing.windows,
        vec![
            TimeWindow::new(1000, 2000),
            TimeWindow::new(2120, 3120),
            TimeWindow::new(3240, 4240),
            TimeWindow::new(4360, 5360),
        ]
    );
    assert!(timing
        .adjustments
        .contains(&TimingAdjustment::ExtendedPastWindow { line: 3, by_ms: 1360 }));
}

#[test]
fn test_normalize_entry_withNoLines_shouldReturnNoWindows() {
    let normalizer = TimingNormalizer::new(&Config::default());

    let timing = normalizer.normalize_entry(TimeWindow::new(0, 1000), &[], Some(2000));

    assert!(timing.windows.is_empty());
    assert!(timing.adjustments.is_empty());
}

#[test]
fn test_normalize_entry_withReadingSpeed_shouldGiveLongLinesMoreTime() {
    let normalizer = TimingNormalizer::new(&Config::default());

    let timing = normalizer.normalize_entry(TimeWindow::new(0, 2000), &[60], None);

    assert_eq!(timing.windows[0], TimeWindow::new(0, 3000));
}

/// Scenario C: shrink when the minimum allows it
#[test]
fn test_enforce_gaps_withScenarioC_shouldShrinkToExactGap() {
    let normalizer = TimingNormalizer::new(&Config::default());
    let mut windows = vec![TimeWindow::new(2000, 5000), TimeWindow::new(5050, 8000)];

    let adjustments = normalizer.enforce_gaps(&mut windows);

    assert_eq!(windows[0].end_ms, 4930);
    assert_eq!(windows[1].start_ms - windows[0].end_ms, 120);
    assert_eq!(
        adjustments,
        vec![TimingAdjustment::ShrunkEnd { line: 0, from_ms: 5000, to_ms: 4930 }]
    );
}

/// Scenario C: push by the shortfall when shrinking is not enough
#[test]
fn test_enforce_gaps_withScenarioCAtMinimum_shouldPushByShortfall() {
    let normalizer = TimingNormalizer::new(&Config::default());
    let mut windows = vec![TimeWindow::new(3960, 5000), TimeWindow::new(5050, 8000)];

    normalizer.enforce_gaps(&mut windows);

    assert_eq!(windows[0].end_ms, 4960);
    assert_eq!(windows[1].start_ms, 5080);
}

#[test]
fn test_enforce_gaps_withDenseStream_shouldKeepBoundsOrderAndGaps() {
    let config = Config::default();
    let normalizer = TimingNormalizer::new(&config);
    let sources = [(0u64, 900u64, 12usize), (950, 1900, 30), (1910, 2300, 8), (2310, 9000, 80), (9000, 9500, 5)];

    let mut windows = Vec::new();
    for (i, &(start, end, chars)) in sources.iter().enumerate() {
        let next_start = sources.get(i + 1).map(|s| s.0);
        windows.extend(normalizer.normalize_entry(TimeWindow::new(start, end), &[chars], next_start).windows);
    }
    normalizer.enforce_gaps(&mut windows);

    for window in &windows {
        let duration = window.duration_ms();
        assert!(duration >= config.min_duration_ms, "duration {} below minimum", duration);
        assert!(duration <= config.max_duration_ms, "duration {} above maximum", duration);
    }

    for pair in windows.windows(2) {
        assert!(pair[1].start_ms >= pair[0].end_ms, "{:?} overlaps {:?}", pair[1], pair[0]);
        assert!(
            pair[1].start_ms - pair[0].end_ms >= config.transition_gap_ms,
            "gap between {:?} and {:?} below the transition gap",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(windows[1], TimeWindow::new(1120, 2120));
    assert_eq!(windows[3], TimeWindow::new(3360, 6310));
}

/// Scenario B: lead-in shifts the first entry
#[test]
fn test_offset_apply_withScenarioB_shouldStartAtLeadIn() {
    let config = Config {
        lead_in_offset: 1.5,
        ..Config::default()
    };
    let entries = vec![
        SubtitleEntry::new(1, 0, 1000, "Hello.".to_string()),
        SubtitleEntry::new(2, 1120, 3000, "Again.".to_string()),
    ];

    let shifted = OffsetApplier::new(config.lead_in_offset_ms().unwrap()).apply(entries.clone());

    assert_eq!(shifted[0].start_time_ms, 1500);
    assert_eq!(SubtitleEntry::format_timestamp(shifted[0].start_time_ms), "00:00:01,500");
    for (before, after) in entries.iter().zip(&shifted) {
        assert_eq!(before.duration_ms(), after.duration_ms());
        assert_eq!(before.text, after.text);
    }
    assert_eq!(
        shifted[1].start_time_ms - shifted[0].end_time_ms,
        entries[1].start_time_ms - entries[0].end_time_ms
    );
}
