use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use lru::LruCache;

use crate::domain::presentation::DEFAULT_ICON;

pub const DEFAULT_BACKGROUND: &str = "sun-noon.png";

const CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Name of the file actually loaded; differs from the request on fallback.
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug, Clone, Copy)]
enum AssetKind {
    Icon,
    Background,
}

impl AssetKind {
    fn dir(self) -> &'static str {
        match self {
            AssetKind::Icon => "icons",
            AssetKind::Background => "bg",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            AssetKind::Icon => DEFAULT_ICON,
            AssetKind::Background => DEFAULT_BACKGROUND,
        }
    }
}

/// Icon and background loader owned by whoever renders. Keyed by
/// `(name, width, height)`; backgrounds use a zero size.
#[derive(Debug)]
pub struct AssetCache {
    root: PathBuf,
    entries: Mutex<LruCache<AssetKey, Arc<Asset>>>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Mutex::new(LruCache::new(CAPACITY)),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn icon(&self, name: &str, width: u32, height: u32) -> Option<Arc<Asset>> {
        self.get(AssetKind::Icon, name, width, height)
    }

    pub fn background(&self, name: &str) -> Option<Arc<Asset>> {
        self.get(AssetKind::Background, name, 0, 0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, kind: AssetKind, name: &str, width: u32, height: u32) -> Option<Arc<Asset>> {
        let key = AssetKey {
            name: name.to_string(),
            width,
            height,
        };
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = entries.get(&key) {
            return Some(Arc::clone(hit));
        }

        let asset = Arc::new(self.load(kind, &key)?);
        entries.put(key, Arc::clone(&asset));
        Some(asset)
    }

    fn load(&self, kind: AssetKind, key: &AssetKey) -> Option<Asset> {
        let dir = self.root.join(kind.dir());
        [key.name.as_str(), kind.fallback()]
            .into_iter()
            .find_map(|name| {
                let path = dir.join(name);
                let bytes = fs::read(&path).ok()?;
                if name != key.name {
                    tracing::debug!(requested = %key.name, fallback = name, "asset missing");
                }
                Some(Asset {
                    name: name.to_string(),
                    path,
                    width: key.width,
                    height: key.height,
                    bytes: bytes.into(),
                })
            })
    }
}
