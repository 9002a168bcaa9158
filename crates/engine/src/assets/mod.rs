mod menu_art;
mod paths;

use std::io;
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;

use crate::app::Sprite;

pub use menu_art::{ContentLoader, MenuArt};
pub use paths::AssetPathError;

use paths::validate_asset_path;

#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("invalid asset path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: AssetPathError,
    },
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Resolves logical asset paths below a root directory.
#[derive(Debug, Clone)]
pub struct AssetSource {
    root: PathBuf,
}

impl AssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, logical: &str) -> Result<PathBuf, AssetLoadError> {
        validate_asset_path(logical).map_err(|source| AssetLoadError::InvalidPath {
            path: logical.to_string(),
            source,
        })?;
        Ok(self.root.join(logical))
    }

    pub fn load_sprite(&self, logical: &str) -> Result<Sprite, AssetLoadError> {
        let path = self.resolve(logical)?;
        load_sprite_rgba(&path)
    }
}

fn load_sprite_rgba(path: &Path) -> Result<Sprite, AssetLoadError> {
    let reader = ImageReader::open(path).map_err(|source| AssetLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| AssetLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    Ok(Sprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}
