use anyhow::{Result, Context, anyhow};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

/// Suffix inserted before the extension of every normalized file
pub const ADJUSTED_SUFFIX: &str = "adjusted";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: `<stem>.adjusted.srt` beside the input
    pub fn adjusted_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(ADJUSTED_SUFFIX);
        output_filename.push_str(".srt");

        input_file.with_file_name(output_filename)
    }

    // @checks: Whether a path is output of a previous run
    pub fn is_adjusted_output<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        let is_srt = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"));
        let stem_marked = path
            .file_stem()
            .and_then(|stem| Path::new(stem).extension().map(|ext| ext.to_string_lossy().to_string()))
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ADJUSTED_SUFFIX));
        is_srt && stem_marked
    }

    /// Find SubRip files under a directory, sorted, skipping previous output
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || Self::is_adjusted_output(path) {
                continue;
            }

            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("srt") {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file through a temporary file in the same directory
    ///
    /// The target only ever holds the old content or the complete new content.
    pub fn write_atomically<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temporary file for {:?}", path))?;
        temp.flush()?;

        temp.persist(path)
            .map_err(|e| anyhow!("Failed to move output into place at {:?}: {}", path, e.error))?;

        Ok(())
    }
}
