use crate::editing::Cmd;
use crate::models::{Message, Point};
use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

const POINTS_DIR: &str = "points";
const MESSAGES_DIR: &str = "messages";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid record {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid data directory: {0}")]
    InvalidDataDir(String),
}

/// Everything persistence knows about, ready to hand to the engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    pub points: Vec<Point>,
    /// Newest first
    pub messages: Vec<Message>,
}

impl LoadedData {
    pub fn into_command(self) -> Cmd {
        Cmd::LoadComplete {
            points: self.points,
            messages: self.messages,
        }
    }
}

/// Storage for published messages and their points
pub trait Persistence {
    fn load_all(&self) -> Result<LoadedData, PersistenceError>;
    fn save(&self, message: &Message, points: &[Point]) -> Result<(), PersistenceError>;
}

/// One JSON file per record: `points/<id>.json` and `messages/<id>.json`
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(dir: &str, id: impl std::fmt::Display) -> RelativePathBuf {
        RelativePath::new(dir).join(format!("{id}.json"))
    }

    fn write_record<T: Serialize>(
        &self,
        relative_path: &RelativePath,
        record: &T,
    ) -> Result<(), PersistenceError> {
        let absolute_path = relative_path.to_path(&self.root);
        let json = serde_json::to_string_pretty(record).map_err(|source| {
            PersistenceError::InvalidRecord {
                path: absolute_path.clone(),
                source,
            }
        })?;

        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&absolute_path, json)?;
        Ok(())
    }

    fn read_records<T: DeserializeOwned>(&self, dir: &str) -> Result<Vec<T>, PersistenceError> {
        let dir_path = RelativePath::new(dir).to_path(&self.root);
        if !dir_path.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir_path)? {
            let path = entry?.path();
            if path.is_file()
                && let Some(ext) = path.extension()
                && ext == "json"
            {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| -> Result<T, PersistenceError> {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)
                    .map_err(|source| PersistenceError::InvalidRecord { path, source })
            })
            .collect()
    }
}

impl Persistence for JsonDirStore {
    fn load_all(&self) -> Result<LoadedData, PersistenceError> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(PersistenceError::InvalidDataDir(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let points: Vec<Point> = self.read_records(POINTS_DIR)?;
        let mut messages: Vec<Message> = self.read_records(MESSAGES_DIR)?;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        log::debug!(
            "Read {} messages and {} points from {}",
            messages.len(),
            points.len(),
            self.root.display()
        );
        Ok(LoadedData { points, messages })
    }

    fn save(&self, message: &Message, points: &[Point]) -> Result<(), PersistenceError> {
        for point in points {
            self.write_record(&Self::record_path(POINTS_DIR, point.id), point)?;
        }
        self.write_record(&Self::record_path(MESSAGES_DIR, message.id), message)?;
        log::info!("Saved message {} with {} points", message.id, points.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MessageId, PointContainer, Shape, Shapes};
    use crate::tests::{create_test_data_dir, sample_point};
    use pretty_assertions::assert_eq;
    use std::time::{Duration, SystemTime};

    fn message_with(points: &[Point], created_at: SystemTime) -> Message {
        let mut shapes = Shapes::default();
        for point in points {
            shapes[point.shape].push(point.id);
        }
        Message {
            id: MessageId::new(),
            author: "me".to_string(),
            main: shapes.first(),
            shapes,
            focus: None,
            created_at,
            is_persisted: true,
        }
    }

    #[test]
    fn test_load_from_missing_directory_is_empty() {
        // Given a data root that was never written to
        let data_dir = create_test_data_dir();
        let store = JsonDirStore::new(data_dir.path().join("fresh"));

        // When loading
        let loaded = store.load_all().unwrap();

        // Then there is nothing to show
        assert_eq!(loaded, LoadedData::default());
    }

    #[test]
    fn test_save_then_load_returns_newest_message_first() {
        let data_dir = create_test_data_dir();
        let store = JsonDirStore::new(data_dir.path());
        let older_point = sample_point("older", Shape::Facts);
        let newer_point = sample_point("newer", Shape::Needs);
        let older = message_with(std::slice::from_ref(&older_point), SystemTime::UNIX_EPOCH);
        let newer = message_with(
            std::slice::from_ref(&newer_point),
            SystemTime::UNIX_EPOCH + Duration::from_secs(60),
        );

        store.save(&older, &[older_point]).unwrap();
        store.save(&newer, &[newer_point]).unwrap();
        let loaded = store.load_all().unwrap();

        assert_eq!(loaded.messages, vec![newer, older]);
        assert_eq!(loaded.points.len(), 2);
    }

    #[test]
    fn test_save_writes_one_file_per_record() {
        let data_dir = create_test_data_dir();
        let store = JsonDirStore::new(data_dir.path());
        let point = sample_point("hello", Shape::People);
        let message = message_with(std::slice::from_ref(&point), SystemTime::UNIX_EPOCH);

        store.save(&message, std::slice::from_ref(&point)).unwrap();

        let point_file = JsonDirStore::record_path(POINTS_DIR, point.id).to_path(data_dir.path());
        let message_file =
            JsonDirStore::record_path(MESSAGES_DIR, message.id).to_path(data_dir.path());
        assert!(point_file.is_file());
        assert!(message_file.is_file());
        assert_eq!(message.point_ids(), vec![point.id]);
    }

    #[test]
    fn test_corrupt_record_names_the_file() {
        let data_dir = create_test_data_dir();
        std::fs::create_dir_all(data_dir.path().join(POINTS_DIR)).unwrap();
        std::fs::write(data_dir.path().join(POINTS_DIR).join("broken.json"), "{").unwrap();

        let result = JsonDirStore::new(data_dir.path()).load_all();

        let Err(PersistenceError::InvalidRecord { path, .. }) = result else {
            panic!("expected an invalid record error");
        };
        assert!(path.ends_with("broken.json"));
    }

    #[test]
    fn test_root_that_is_a_file_is_rejected() {
        let data_dir = create_test_data_dir();
        let file = data_dir.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();

        let result = JsonDirStore::new(file).load_all();
        assert!(matches!(result, Err(PersistenceError::InvalidDataDir(_))));
    }
}
