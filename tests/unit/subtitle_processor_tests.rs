/*!
 * Tests for SubRip parsing and serialization
 */

use std::fmt::Write;
use anyhow::Result;
use subnorm::errors::InputError;
use subnorm::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

#[test]
fn test_timestamp_parsing_withGarbage_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("01:23").is_err());
    assert!(SubtitleEntry::parse_timestamp("aa:bb:cc,ddd").is_err());
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle".to_string());
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "1\n00:00:05,000 --> 00:00:10,000\nTest subtitle\n\n");
}

#[test]
fn test_subtitle_entry_helpers_withMultilineText_shouldFlattenAndCount() {
    let entry = SubtitleEntry::new(1, 1000, 3500, "Hello\nthere,  friend".to_string());

    assert_eq!(entry.duration_ms(), 2500);
    assert_eq!(entry.flattened_text(), "Hello there, friend");
    assert_eq!(entry.word_count(), 3);
}

/// Test parsing of a well-formed file
#[test]
fn test_parse_srt_string_withValidContent_shouldParseAllEntries() -> Result<()> {
    let content = "1\r\n00:00:01,000 --> 00:00:04,000\r\nFirst line\r\nsecond line\r\n\r\n2\r\n00:00:05.500 --> 00:00:07.000\r\nNext\r\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "First line\nsecond line");
    assert_eq!(entries[1].start_time_ms, 5500);
    assert_eq!(entries[1].end_time_ms, 7000);
    Ok(())
}

#[test]
fn test_parse_srt_string_withBomAndUnorderedEntries_shouldSortAndRenumber() -> Result<()> {
    let content = "\u{feff}7\n00:00:05,000 --> 00:00:06,000\nLater\n\n3\n00:00:01,000 --> 00:00:02,000\nEarlier\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries[0].text, "Earlier");
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[1].seq_num, 2);
    Ok(())
}

#[test]
fn test_parse_srt_string_withInvertedWindow_shouldRejectIt() {
    let content = "1\n00:00:04,000 --> 00:00:01,000\nBackwards\n";

    let result = SubtitleCollection::parse_srt_string(content);

    assert!(matches!(result, Err(InputError::Malformed { line: 2, .. })));
}

#[test]
fn test_parse_srt_string_withMissingIndex_shouldReportLine() {
    let content = "one\n00:00:01,000 --> 00:00:02,000\nText\n";

    assert!(matches!(
        SubtitleCollection::parse_srt_string(content),
        Err(InputError::Malformed { line: 1, .. })
    ));
}

#[test]
fn test_parse_srt_string_withEmptyContent_shouldReturnEmptyError() {
    assert!(matches!(SubtitleCollection::parse_srt_string(""), Err(InputError::Empty)));
    assert!(matches!(SubtitleCollection::parse_srt_string("\n\n"), Err(InputError::Empty)));
}

#[test]
fn test_parse_srt_string_withBlankEntry_shouldSkipIt() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n";

    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Kept");
    Ok(())
}

/// Test loading from disk
#[test]
fn test_from_file_withSampleFile_shouldCountWords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;

    let collection = SubtitleCollection::from_file(&path)?;

    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.word_count(), 12);
    assert_eq!(collection.source_file, path);
    Ok(())
}

#[test]
fn test_from_file_withMissingFile_shouldReturnNotFound() {
    let result = SubtitleCollection::from_file("/nonexistent/input.srt");
    assert!(matches!(result, Err(InputError::NotFound(_))));
}

#[test]
fn test_to_srt_string_shouldRoundTripThroughParser() -> Result<()> {
    let collection = SubtitleCollection {
        source_file: "out.srt".into(),
        entries: vec![
            SubtitleEntry::new(1, 0, 1500, "Hello".to_string()),
            SubtitleEntry::new(2, 2000, 3000, "Two\nlines".to_string()),
        ],
    };

    let reparsed = SubtitleCollection::parse_srt_string(&collection.to_srt_string())?;

    assert_eq!(reparsed, collection.entries);
    Ok(())
}
