//! Record store persistence with file locking.
//!
//! The store keeps the four collections in memory and mirrors each one to
//! its own JSON file in the data directory. Every mutation rewrites the
//! affected file through a temp file + rename, so readers never observe a
//! partially written collection.

use crate::{
    CalorieEntry, CollectionKind, Error, Record, Result, StrengthLogEntry, UserProfile,
    WorkoutEntry,
};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Borrowed, read-only view of the store's current state
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Snapshot<'a> {
    pub workouts: &'a [WorkoutEntry],
    pub strength_logs: &'a [StrengthLogEntry],
    pub calories: &'a [CalorieEntry],
    #[serde(rename = "user_data", serialize_with = "profile_or_empty")]
    pub profile: Option<&'a UserProfile>,
}

/// An absent profile is written as `{}`, which is how the data files have
/// always represented it.
fn profile_or_empty<S: Serializer>(
    profile: &Option<&UserProfile>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    match profile {
        Some(profile) => profile.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// In-memory collections backed by one JSON file each
#[derive(Debug)]
pub struct RecordStore {
    dir: PathBuf,
    workouts: Vec<WorkoutEntry>,
    strength_logs: Vec<StrengthLogEntry>,
    calories: Vec<CalorieEntry>,
    profile: Option<UserProfile>,
}

impl RecordStore {
    /// Create an empty store rooted at `dir` without touching the disk
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            workouts: Vec::new(),
            strength_logs: Vec::new(),
            calories: Vec::new(),
            profile: None,
        }
    }

    /// Create a store rooted at `dir` and load whatever is persisted there
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(dir);
        store.load();
        store
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a collection
    pub fn path_for(&self, kind: CollectionKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Reload every collection from disk
    ///
    /// A missing, unreadable or corrupt file leaves that collection at its
    /// current in-memory value. Failures are logged, never returned.
    pub fn load(&mut self) {
        if let Some(workouts) = self.read_or_keep(CollectionKind::Workouts) {
            self.workouts = workouts;
        }
        if let Some(logs) = self.read_or_keep(CollectionKind::StrengthLogs) {
            self.strength_logs = logs;
        }
        if let Some(calories) = self.read_or_keep(CollectionKind::Calories) {
            self.calories = calories;
        }
        if let Some(profile) = self.read_or_keep::<ProfileFile>(CollectionKind::Profile) {
            self.profile = profile.into_profile();
        }

        tracing::info!(
            "Loaded {} workouts, {} strength logs, {} meals from {:?}",
            self.workouts.len(),
            self.strength_logs.len(),
            self.calories.len(),
            self.dir
        );
    }

    fn read_or_keep<T: DeserializeOwned>(&self, kind: CollectionKind) -> Option<T> {
        let path = self.path_for(kind);
        match read_collection(&path) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{}. Keeping current {}.", e, kind);
                None
            }
        }
    }

    /// Append an entry to its collection and persist that collection
    ///
    /// The entry is stored as given; range checks are the caller's job. If
    /// the write fails the entry stays in memory and the error is returned.
    pub fn append(&mut self, record: impl Into<Record>) -> Result<()> {
        let record = record.into();
        let kind = record.kind();
        match record {
            Record::Workout(entry) => self.workouts.push(entry),
            Record::Strength(entry) => self.strength_logs.push(entry),
            Record::Calorie(entry) => self.calories.push(entry),
        }
        self.persist_collection(kind)
    }

    /// Replace the profile and persist it
    pub fn set_profile(&mut self, profile: UserProfile) -> Result<()> {
        self.profile = Some(profile);
        self.persist_collection(CollectionKind::Profile)
    }

    /// Empty one collection and persist it
    pub fn clear(&mut self, kind: CollectionKind) -> Result<()> {
        match kind {
            CollectionKind::Workouts => self.workouts.clear(),
            CollectionKind::StrengthLogs => self.strength_logs.clear(),
            CollectionKind::Calories => self.calories.clear(),
            CollectionKind::Profile => self.profile = None,
        }
        tracing::info!("Cleared {}", kind);
        self.persist_collection(kind)
    }

    /// Write every collection to disk
    pub fn persist(&self) -> Result<()> {
        for kind in CollectionKind::ALL {
            self.persist_collection(kind)?;
        }
        Ok(())
    }

    /// Write one collection to disk
    pub fn persist_collection(&self, kind: CollectionKind) -> Result<()> {
        let path = self.path_for(kind);
        match kind {
            CollectionKind::Workouts => write_collection(&path, &self.workouts),
            CollectionKind::StrengthLogs => write_collection(&path, &self.strength_logs),
            CollectionKind::Calories => write_collection(&path, &self.calories),
            CollectionKind::Profile => {
                write_collection(&path, &ProfileFile::from(self.profile.as_ref()))
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            workouts: &self.workouts,
            strength_logs: &self.strength_logs,
            calories: &self.calories,
            profile: self.profile.as_ref(),
        }
    }
}

/// On-disk form of the profile file: either a profile or an empty object
#[derive(Serialize)]
#[serde(untagged)]
enum ProfileFile {
    Present(UserProfile),
    Empty {},
}

/// Only a literal `{}` means "no profile". Any other object must parse as a
/// full profile, so a damaged file is reported instead of read as absent.
impl<'de> Deserialize<'de> for ProfileFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_object().is_some_and(|map| map.is_empty()) {
            return Ok(ProfileFile::Empty {});
        }
        serde_json::from_value(value)
            .map(ProfileFile::Present)
            .map_err(serde::de::Error::custom)
    }
}

impl ProfileFile {
    fn into_profile(self) -> Option<UserProfile> {
        match self {
            ProfileFile::Present(profile) => Some(profile),
            ProfileFile::Empty {} => None,
        }
    }
}

impl From<Option<&UserProfile>> for ProfileFile {
    fn from(profile: Option<&UserProfile>) -> Self {
        match profile {
            Some(profile) => ProfileFile::Present(profile.clone()),
            None => ProfileFile::Empty {},
        }
    }
}

/// Read a JSON document under a shared lock
///
/// Returns `Ok(None)` when the file doesn't exist and `Error::StorageRead`
/// when it can't be opened, locked, read or parsed.
fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        tracing::debug!("No file at {:?}", path);
        return Ok(None);
    }

    let read_error = |reason: String| Error::StorageRead {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| read_error(e.to_string()))?;
    file.lock_shared().map_err(|e| read_error(e.to_string()))?;

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    let _ = file.unlock();
    read.map_err(|e| read_error(e.to_string()))?;

    let value = serde_json::from_str(&contents).map_err(|e| read_error(e.to_string()))?;
    tracing::debug!("Read {:?}", path);
    Ok(Some(value))
}

/// Atomically replace `path` with the JSON form of `value`
///
/// Writes to a temp file in the same directory under an exclusive lock,
/// syncs it, then renames it over the target.
pub(crate) fn write_collection<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string(value)?;
    write_atomic(path, contents.as_bytes()).map_err(|source| Error::StorageWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Saved {:?}", path);
    Ok(())
}

pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "path missing parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(contents)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
