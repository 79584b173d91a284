//! # Laurea
//!
//! A fixed-layout certificate PDF engine.
//!
//! Laurea produces one thing: a decorative one-page "Certificate of
//! Achievement" on a landscape A4 page, with the recipient's name and the
//! issue date substituted into an otherwise constant layout. Every border,
//! ornament row, text block, and image anchor sits at a fixed coordinate,
//! so the same request always yields the same page.
//!
//! ## Architecture
//!
//! ```text
//! CertificateRequest + AssetPaths
//!       ↓
//!   [assets]   — resolve fonts (mandatory) and images (per policy)
//!       ↓
//!   [layout]   — compose an ordered, declarative list of draw instructions
//!       ↓
//!   [pdf]      — serialize the instructions to PDF bytes
//!       ↓
//!   RenderedCertificate
//! ```
//!
//! The draw plan is plain data: rendering never touches the filesystem,
//! and asset presence policy lives entirely in [`assets::resolve`].

pub mod assets;
pub mod error;
pub mod font;
pub mod geometry;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;

use std::io::Write;
use std::path::{Path, PathBuf};

pub use assets::AssetPaths;
pub use error::Error;
pub use model::{CertificateRequest, RenderedCertificate, ARTIFACT_NAME};

use pdf::PdfWriter;

/// Generate a certificate in memory.
///
/// This is the primary entry point. Assets are re-resolved on every call;
/// fonts are mandatory, a configured logo/signature must decode, and a
/// missing background only skips the backdrop.
pub fn generate(
    request: &CertificateRequest,
    paths: &AssetPaths,
) -> Result<RenderedCertificate, Error> {
    let assets = assets::resolve(paths)?;
    let ops = layout::compose(request, &assets);
    let writer = PdfWriter::new();
    let bytes = writer.write(&ops, &assets.fonts);
    Ok(RenderedCertificate {
        file_name: ARTIFACT_NAME,
        bytes,
    })
}

/// Generate a certificate and write it under its fixed name into `dir`.
///
/// The write is atomic: bytes go to a temporary file in `dir` which is
/// renamed over the final name, so concurrent callers settle last-writer-
/// wins and a failed generation never leaves a partial artifact behind.
pub fn generate_to_file(
    request: &CertificateRequest,
    paths: &AssetPaths,
    dir: &Path,
) -> Result<PathBuf, Error> {
    let certificate = generate(request, paths)?;
    let target = dir.join(certificate.file_name);

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&certificate.bytes)?;
    tmp.persist(&target).map_err(|e| Error::Io(e.error))?;

    Ok(target)
}

/// Generate from a JSON request, for delivery surfaces that hand over
/// requests as text.
pub fn generate_json(json: &str, paths: &AssetPaths) -> Result<RenderedCertificate, Error> {
    let request: CertificateRequest = serde_json::from_str(json)?;
    generate(&request, paths)
}
