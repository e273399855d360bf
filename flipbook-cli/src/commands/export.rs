//! Export command implementation

use super::{parse_id, Session};
use anyhow::{bail, Context, Result};
use flipbook_core::{BlobId, PageImage};
use std::path::Path;

/// Write one of a book's page images to `output`
pub async fn export(session: &Session, id: &str, blob: &str, output: &Path) -> Result<()> {
    let id = parse_id(id)?;
    let blob: BlobId = blob
        .parse()
        .with_context(|| format!("Invalid blob id: {}", blob))?;

    let book = session
        .library
        .get_book(&session.user, id)
        .await
        .with_context(|| format!("Failed to load book {}", id))?;
    if !book.blob_ids().any(|b| b == blob) {
        bail!("Image {} is not part of '{}'", blob, book.title);
    }

    let data = match session.library.page_image(blob).await? {
        PageImage::Loaded(data) => data,
        PageImage::Missing => bail!("Image {} is missing from storage", blob),
    };

    std::fs::write(output, &data)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    println!("Wrote {} bytes to {}", data.len(), output.display());
    Ok(())
}
