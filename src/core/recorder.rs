//! Depth records across episodes.
//!
//! The longest walk that survived before its first self-intersection is
//! tracked by an [`EpisodeRecorder`] handed to the environment at
//! construction. Several environments can share one record through
//! [`SharedRecorder`].

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::lattice::Site;

pub trait EpisodeRecorder {
    /// Longest depth recorded so far (0 before any record).
    fn best_depth(&self) -> u32;

    /// Stores `trajectory` if `depth` beats the current record.
    ///
    /// Returns `Ok(true)` when a new record was set.
    fn record_if_new_max(&mut self, depth: u32, trajectory: &[Site]) -> Result<bool>;
}

/// Formats a trajectory the way the walk log stores it: `[(x, y), (x, y)]`.
pub fn format_trajectory(trajectory: &[Site]) -> String {
    let mut out = String::with_capacity(trajectory.len() * 8 + 2);
    out.push('[');
    for (i, site) in trajectory.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&site.to_string());
    }
    out.push(']');
    out
}

/// Appends one trajectory line per new record to a text file.
#[derive(Debug, Clone)]
pub struct FileRecorder {
    path: PathBuf,
    best: u32,
}

impl FileRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            best: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EpisodeRecorder for FileRecorder {
    fn best_depth(&self) -> u32 {
        self.best
    }

    fn record_if_new_max(&mut self, depth: u32, trajectory: &[Site]) -> Result<bool> {
        if depth <= self.best {
            return Ok(false);
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_trajectory(trajectory))?;
        self.best = depth;
        Ok(true)
    }
}

/// Keeps every record in memory, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    records: Vec<(u32, Vec<Site>)>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[(u32, Vec<Site>)] {
        &self.records
    }
}

impl EpisodeRecorder for MemoryRecorder {
    fn best_depth(&self) -> u32 {
        self.records.last().map(|(d, _)| *d).unwrap_or(0)
    }

    fn record_if_new_max(&mut self, depth: u32, trajectory: &[Site]) -> Result<bool> {
        if depth <= self.best_depth() {
            return Ok(false);
        }
        self.records.push((depth, trajectory.to_vec()));
        Ok(true)
    }
}

/// A recorder shared between environments.
///
/// The lock is held across the compare and the write, so two environments
/// can never both claim the same record.
#[derive(Debug, Default)]
pub struct SharedRecorder<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> Clone for SharedRecorder<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: EpisodeRecorder> SharedRecorder<R> {
    pub fn new(recorder: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(recorder)),
        }
    }

    /// Runs `f` against the wrapped recorder.
    pub fn with<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        let guard = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        f(&guard)
    }
}

impl<R: EpisodeRecorder> EpisodeRecorder for SharedRecorder<R> {
    fn best_depth(&self) -> u32 {
        self.with(|r| r.best_depth())
    }

    fn record_if_new_max(&mut self, depth: u32, trajectory: &[Site]) -> Result<bool> {
        // The record is a plain integer; a poisoned lock still holds a valid one.
        let mut guard = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        guard.record_if_new_max(depth, trajectory)
    }
}

impl<R: EpisodeRecorder + ?Sized> EpisodeRecorder for Box<R> {
    fn best_depth(&self) -> u32 {
        (**self).best_depth()
    }

    fn record_if_new_max(&mut self, depth: u32, trajectory: &[Site]) -> Result<bool> {
        (**self).record_if_new_max(depth, trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(sites: &[(usize, usize)]) -> Vec<Site> {
        sites.iter().copied().map(Site::from).collect()
    }

    #[test]
    fn trajectory_text_matches_log_format() {
        assert_eq!(format_trajectory(&[]), "[]");
        assert_eq!(
            format_trajectory(&path(&[(0, 1), (2, 3)])),
            "[(0, 1), (2, 3)]"
        );
    }

    #[test]
    fn memory_recorder_keeps_only_improvements() {
        let mut r = MemoryRecorder::new();
        assert_eq!(r.best_depth(), 0);
        assert!(r.record_if_new_max(3, &path(&[(0, 0)])).unwrap());
        assert!(!r.record_if_new_max(3, &path(&[(1, 1)])).unwrap());
        assert!(!r.record_if_new_max(2, &[]).unwrap());
        assert!(r.record_if_new_max(5, &[]).unwrap());
        assert_eq!(r.best_depth(), 5);
        assert_eq!(r.records().len(), 2);
    }

    #[test]
    fn zero_depth_is_never_a_record() {
        let mut r = MemoryRecorder::new();
        assert!(!r.record_if_new_max(0, &[]).unwrap());
    }

    #[test]
    fn file_recorder_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("walking.log");
        let mut r = FileRecorder::new(&log);

        assert!(r.record_if_new_max(2, &path(&[(0, 1), (0, 0)])).unwrap());
        assert!(!r.record_if_new_max(1, &path(&[(5, 5)])).unwrap());
        assert!(r.record_if_new_max(4, &path(&[(1, 1)])).unwrap());

        let text = std::fs::read_to_string(&log).unwrap();
        assert_eq!(text, "[(0, 1), (0, 0)]\n[(1, 1)]\n");
        assert_eq!(r.best_depth(), 4);
    }

    #[test]
    fn file_recorder_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let mut r = FileRecorder::new(dir.path());
        assert!(r.record_if_new_max(5, &[]).is_err());
        // Unwritten records do not count.
        assert_eq!(r.best_depth(), 0);

        r.path = dir.path().join("walking.log");
        assert!(r.record_if_new_max(5, &[Site::new(0, 1)]).unwrap());
        assert_eq!(r.best_depth(), 5);
        assert_eq!(std::fs::read_to_string(r.path()).unwrap(), "[(0, 1)]\n");
    }

    #[test]
    fn shared_recorder_sees_all_clones() {
        let shared = SharedRecorder::new(MemoryRecorder::new());
        let mut a = shared.clone();
        let mut b = shared.clone();

        assert!(a.record_if_new_max(4, &[]).unwrap());
        assert!(!b.record_if_new_max(3, &[]).unwrap());
        assert!(b.record_if_new_max(6, &[]).unwrap());
        assert_eq!(shared.best_depth(), 6);
        assert_eq!(shared.with(|r| r.records().len()), 2);
    }
}
