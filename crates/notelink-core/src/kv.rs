use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;
use walkdir::WalkDir;

/// Abstract interface for the string-keyed record storage.
///
/// The store accessor only ever enumerates keys, reads, writes, and removes
/// whole values; there is no query capability below full enumeration.
pub trait KvBackend: Send + Sync {
    /// All keys currently present, in no particular order.
    fn keys(&self) -> Vec<String>;

    /// Read the value stored under `key`.
    fn read(&self, key: &str) -> io::Result<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// In-memory implementation of [`KvBackend`].
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn keys(&self) -> Vec<String> {
        self.entries.read().unwrap().keys().cloned().collect()
    }

    fn read(&self, key: &str) -> io::Result<String> {
        self.entries
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no entry: {key}")))
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

/// Directory-backed implementation of [`KvBackend`].
///
/// One file per record (`<key>.json`) under the root directory, enumerated
/// recursively. Unreadable entries are simply skipped on enumeration.
pub struct DirBackend {
    root: PathBuf,
}

impl DirBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvBackend for DirBackend {
    fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }

        keys
    }

    fn read(&self, key: &str) -> io::Result<String> {
        std::fs::read_to_string(self.path_of(key))
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_of(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_of(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
