//! JSON file storage with timestamped backups.

use super::errors::StoreResult;
use super::snapshot::Snapshot;
use crate::ids::{IdGenerator, UuidIds};
use crate::registry::Registry;
use chrono::Local;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores a registry snapshot as pretty-printed JSON at a fixed path
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the registry, replacing the file only once the new content is
    /// fully on disk
    pub fn save(&self, registry: &Registry) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&Snapshot::capture(registry))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Saved registry to {}", self.path.display());
        Ok(())
    }

    /// Load the stored registry, or an empty one if nothing was saved yet
    pub fn load(&self) -> StoreResult<Registry> {
        self.load_with(UuidIds)
    }

    pub fn load_with(&self, ids: impl IdGenerator + 'static) -> StoreResult<Registry> {
        if !self.exists() {
            return Ok(Registry::new(ids));
        }
        read_snapshot(&self.path)?.restore(ids)
    }

    /// Copy the current file into `dir` under a timestamped name
    pub fn backup(&self, dir: &Path) -> StoreResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("tourney");
        let target = dir.join(format!(
            "{}_{}.json",
            stem,
            Local::now().format("%Y%m%d_%H%M%S%.3f")
        ));
        fs::copy(&self.path, &target)?;

        info!("Backed up {} to {}", self.path.display(), target.display());
        Ok(target)
    }

    /// Replace the stored registry with the contents of a backup
    pub fn restore(&self, backup: &Path) -> StoreResult<Registry> {
        let registry = read_snapshot(backup)?.restore(UuidIds)?;
        self.save(&registry)?;

        info!("Restored {} from {}", self.path.display(), backup.display());
        Ok(registry)
    }
}

fn read_snapshot(path: &Path) -> StoreResult<Snapshot> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::ids::SequentialIds;
    use crate::registry::{NewPlayer, TournamentFormat};
    use crate::results;
    use crate::store::StoreError;

    fn populated() -> Registry {
        let mut reg = Registry::new(SequentialIds::new());
        let t = reg.create_tournament("Cup", TournamentFormat::Knockout);
        for name in ["A", "B", "C"] {
            let team = reg.create_team(name, "coach", "555");
            reg.add_player(
                &team,
                NewPlayer {
                    name: format!("{name} striker"),
                    age: 21,
                    position: "Forward".to_string(),
                    jersey_number: 9,
                    contact: "555-9".to_string(),
                },
            )
            .unwrap();
            reg.register_team(&t, &team).unwrap();
        }
        let matches = fixtures::generate(&mut reg, &t).unwrap();
        results::record_result(&mut reg, &matches[0].id, 2, 1).unwrap();
        reg
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));
        let reg = populated();

        store.save(&reg).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(Snapshot::capture(&loaded), Snapshot::capture(&reg));
    }

    #[test]
    fn test_repeated_saves_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));
        let reg = populated();

        store.save(&reg).unwrap();
        let first = fs::read(store.path()).unwrap();
        for _ in 0..5 {
            store.save(&store.load().unwrap()).unwrap();
            assert_eq!(fs::read(store.path()).unwrap(), first);
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));
        let reg = store.load().unwrap();
        assert_eq!(reg.teams().count(), 0);
    }

    #[test]
    fn test_backup_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));
        let reg = populated();
        store.save(&reg).unwrap();

        let backup = store.backup(&dir.path().join("backups")).unwrap();
        assert!(backup.exists());

        store.save(&Registry::default()).unwrap();
        let restored = store.restore(&backup).unwrap();
        assert_eq!(restored.teams().count(), 3);
        assert_eq!(store.load().unwrap().teams().count(), 3);
    }

    #[test]
    fn test_version_mismatch() {
        let mut snapshot = Snapshot::capture(&populated());
        snapshot.version = 99;
        assert!(matches!(
            snapshot.restore(UuidIds),
            Err(StoreError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
