/*!
 * Tests for file and directory utilities
 */

use std::fs;
use anyhow::Result;
use subnorm::file_utils::FileManager;
use crate::common;

#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.srt", "x")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

#[test]
fn test_find_subtitle_files_withMixedFiles_shouldReturnSortedInputsOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    FileManager::ensure_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "b.srt", "")?;
    common::create_test_file(temp_dir.path(), "a.SRT", "")?;
    common::create_test_file(temp_dir.path(), "a.adjusted.srt", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;
    common::create_test_file(&nested, "e01.srt", "")?;

    let files = FileManager::find_subtitle_files(temp_dir.path())?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.SRT", "b.srt", "season1/e01.srt"]);
    Ok(())
}

#[test]
fn test_write_atomically_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("movie.adjusted.srt");

    FileManager::write_atomically(&target, "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n")?;

    assert_eq!(fs::read_to_string(&target)?, "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n");
    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("/nonexistent/file.srt").is_err());
}
