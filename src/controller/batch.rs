//! Shots and the in-memory batch they accumulate in.

use std::path::{Path, PathBuf};

/// One captured screen. Immutable once created.
#[derive(Debug, Clone)]
pub struct Shot {
    png: Vec<u8>,
    width: u32,
    height: u32,
    path: PathBuf,
}

impl Shot {
    pub fn new(png: Vec<u8>, width: u32, height: u32, path: PathBuf) -> Self {
        Self {
            png,
            width,
            height,
            path,
        }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Where the image was persisted.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Ordered shots of one collection session.
#[derive(Debug, Default)]
pub struct Batch {
    shots: Vec<Shot>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// 1-based position the next shot will get.
    pub fn next_position(&self) -> usize {
        self.shots.len() + 1
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }
}
