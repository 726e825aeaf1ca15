//! Asset cache resource.
//!
//! Textures, sound buffers and fonts are requested by path. The first
//! request goes through the [`AssetLoader`]; later requests for the same
//! kind and path return the resident [`Arc`] without touching the loader.
//!
//! Decoding is the windowing backend's job, so an [`Asset`] only carries
//! the raw bytes it was loaded from.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    SoundBuffer,
    Font,
}

#[derive(Debug)]
pub struct Asset {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Source of asset bytes.
pub trait AssetLoader: Send + Sync {
    fn load(&mut self, kind: AssetKind, path: &Path) -> Result<Asset, EngineError>;
}

/// Reads assets from the filesystem.
#[derive(Debug, Default)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for FileLoader {
    fn load(&mut self, kind: AssetKind, path: &Path) -> Result<Asset, EngineError> {
        let full = self.root.join(path);
        let data = std::fs::read(&full).map_err(|source| EngineError::Asset {
            path: full.clone(),
            source,
        })?;
        Ok(Asset {
            kind,
            path: path.to_path_buf(),
            data,
        })
    }
}

/// Fabricates empty assets; used when running without asset files.
#[derive(Debug, Default)]
pub struct PlaceholderLoader;

impl AssetLoader for PlaceholderLoader {
    fn load(&mut self, kind: AssetKind, path: &Path) -> Result<Asset, EngineError> {
        Ok(Asset {
            kind,
            path: path.to_path_buf(),
            data: Vec::new(),
        })
    }
}

#[derive(Resource)]
pub struct Assets {
    loader: Box<dyn AssetLoader>,
    cache: FxHashMap<(AssetKind, PathBuf), Arc<Asset>>,
}

impl Assets {
    pub fn new(loader: impl AssetLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cache: FxHashMap::default(),
        }
    }

    pub fn get(&mut self, kind: AssetKind, path: impl AsRef<Path>) -> Result<Arc<Asset>, EngineError> {
        let key = (kind, path.as_ref().to_path_buf());
        if let Some(asset) = self.cache.get(&key) {
            return Ok(Arc::clone(asset));
        }
        let asset = Arc::new(self.loader.load(kind, &key.1)?);
        debug!("loaded {:?} {:?} ({} bytes)", kind, key.1, asset.data.len());
        self.cache.insert(key, Arc::clone(&asset));
        Ok(asset)
    }

    pub fn get_texture(&mut self, path: impl AsRef<Path>) -> Result<Arc<Asset>, EngineError> {
        self.get(AssetKind::Texture, path)
    }

    pub fn get_sound_buffer(&mut self, path: impl AsRef<Path>) -> Result<Arc<Asset>, EngineError> {
        self.get(AssetKind::SoundBuffer, path)
    }

    pub fn get_font(&mut self, path: impl AsRef<Path>) -> Result<Arc<Asset>, EngineError> {
        self.get(AssetKind::Font, path)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader(Arc<AtomicUsize>);

    impl AssetLoader for CountingLoader {
        fn load(&mut self, kind: AssetKind, path: &Path) -> Result<Asset, EngineError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            PlaceholderLoader.load(kind, path)
        }
    }

    #[test]
    fn test_same_path_returns_same_asset() {
        let loads = Arc::new(AtomicUsize::new(0));
        let mut assets = Assets::new(CountingLoader(Arc::clone(&loads)));
        let a = assets.get_texture("portraits.png").unwrap();
        let b = assets.get_texture("portraits.png").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_kind_is_part_of_the_key() {
        let mut assets = Assets::new(PlaceholderLoader);
        let tex = assets.get_texture("thing").unwrap();
        let snd = assets.get_sound_buffer("thing").unwrap();
        assert!(!Arc::ptr_eq(&tex, &snd));
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn test_file_loader_reads_bytes_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("font.ttf"), b"abc").unwrap();
        let mut assets = Assets::new(FileLoader::new(dir.path()));
        assert_eq!(assets.get_font("font.ttf").unwrap().data, b"abc");
        assert!(matches!(
            assets.get_font("missing.ttf"),
            Err(EngineError::Asset { .. })
        ));
        assert_eq!(assets.len(), 1);
    }
}
