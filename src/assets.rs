//! # Asset Resolution
//!
//! All filesystem access for a generation call happens here, before any
//! drawing. The renderer downstream receives fully-loaded bytes and never
//! performs I/O, so presence/absence policy lives in exactly one place:
//!
//! - regular + bold fonts: mandatory, failure aborts generation
//! - logo, signature: optional to configure, but once configured they must
//!   load and decode (a broken path is a deployment error, not a feature)
//! - background: tolerated absent or broken; the border remains the backdrop
//!
//! Nothing is cached across calls; generation is user-triggered, not a hot
//! path, and re-resolving keeps every call independent.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::font::{FontFace, FontRole, FontSet};
use crate::image_loader::{self, LoadedImage};

/// Which raster asset an error or log line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Background,
    Logo,
    Signature,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Background => write!(f, "background"),
            ImageKind::Logo => write!(f, "logo"),
            ImageKind::Signature => write!(f, "signature"),
        }
    }
}

/// Where each asset comes from. Fonts are file paths; images accept file
/// paths or `data:image/...;base64,` URIs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPaths {
    pub regular_font: PathBuf,
    pub bold_font: PathBuf,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl AssetPaths {
    /// Conventional file names inside a single asset directory. The images
    /// are only configured if the files exist at setup time; the fonts are
    /// named unconditionally since generation cannot proceed without them.
    pub fn from_dir(dir: &Path) -> Self {
        let optional = |name: &str| {
            let p = dir.join(name);
            p.exists().then(|| p.to_string_lossy().into_owned())
        };
        Self {
            regular_font: dir.join("regular.ttf"),
            bold_font: dir.join("bold.ttf"),
            background: optional("background.png"),
            logo: optional("logo.png"),
            signature: optional("signature.png"),
        }
    }
}

/// Everything the renderer needs, fully loaded and decoded.
#[derive(Debug, Clone)]
pub struct AssetSet {
    pub fonts: FontSet,
    pub background: Option<LoadedImage>,
    pub logo: Option<LoadedImage>,
    pub signature: Option<LoadedImage>,
}

/// Resolve every asset for one generation call.
pub fn resolve(paths: &AssetPaths) -> Result<AssetSet, Error> {
    let regular = FontFace::from_file(&paths.regular_font, FontRole::Regular)?;
    let bold = FontFace::from_file(&paths.bold_font, FontRole::Bold)?;

    let background = match &paths.background {
        None => None,
        Some(src) if file_missing(src) => {
            log::info!("background image '{}' not found, skipping backdrop", src);
            None
        }
        Some(src) => match image_loader::load_image(src) {
            Ok(img) => Some(img),
            Err(reason) => {
                log::warn!("background image '{}' unusable ({}), skipping backdrop", src, reason);
                None
            }
        },
    };

    let logo = load_expected(&paths.logo, ImageKind::Logo)?;
    let signature = load_expected(&paths.signature, ImageKind::Signature)?;

    Ok(AssetSet {
        fonts: FontSet { regular, bold },
        background,
        logo,
        signature,
    })
}

fn load_expected(src: &Option<String>, kind: ImageKind) -> Result<Option<LoadedImage>, Error> {
    match src {
        None => Ok(None),
        Some(s) => image_loader::load_image(s)
            .map(Some)
            .map_err(|reason| Error::AssetLoad {
                kind,
                source_key: s.clone(),
                reason,
            }),
    }
}

fn file_missing(src: &str) -> bool {
    !src.starts_with("data:") && !Path::new(src).exists()
}
