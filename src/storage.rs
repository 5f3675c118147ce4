// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for recorded videos

use crate::pipelines::video::FinishedRecording;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A recorded video and its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub path: PathBuf,
    pub name: String,
}

/// Ordered list of recorded videos, oldest first
#[derive(Debug, Clone, Default)]
pub struct VideoLibrary {
    entries: Vec<VideoEntry>,
}

impl VideoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a video with its display name
    pub fn add_video(&mut self, path: PathBuf, name: impl Into<String>) {
        let name = name.into();
        debug!(path = %path.display(), name = %name, "Added video to library");
        self.entries.push(VideoEntry { path, name });
    }

    /// Append a finished recording
    pub fn add_recording(&mut self, recording: &FinishedRecording) {
        self.add_video(recording.plan.output_path.clone(), recording.plan.name.clone());
    }

    /// Path of the video at `index`, `None` when out of range
    pub fn video(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(|e| e.path.as_path())
    }

    /// Display name of the video at `index`, `None` when out of range
    pub fn video_name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }

    /// Most recently added video
    pub fn latest(&self) -> Option<&VideoEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    /// Build a library from the MP4 and MOV files in a directory
    ///
    /// Files are ordered by modification time, oldest first. A missing
    /// directory yields an empty library.
    pub fn scan_directory(dir: &Path) -> Self {
        let mut files = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if let Some(ext) = path.extension() {
                    let ext_str = ext.to_string_lossy();
                    if ext_str.eq_ignore_ascii_case("mp4") || ext_str.eq_ignore_ascii_case("mov") {
                        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
                        files.push((modified, path));
                    }
                }
            }
        }

        // Sort by modification time, ties broken by path
        files.sort();

        let mut library = Self::new();
        for (_, path) in files {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            library.entries.push(VideoEntry { path, name });
        }
        debug!(dir = %dir.display(), count = library.len(), "Scanned video directory");
        library
    }
}
