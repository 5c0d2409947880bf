use std::path::Path;

use paperlens_core::{PDF_MIME, UploadedDocument};

const OCTET_STREAM: &str = "application/octet-stream";

/// Read a file from disk into an [`UploadedDocument`].
///
/// A local file carries no declared type, so one is derived the way a
/// browser would: from the `.pdf` extension, or from the `%PDF-` magic
/// bytes when the name has no extension at all.
pub fn read_upload(path: &Path) -> anyhow::Result<UploadedDocument> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let data = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = declared_mime(path, &data);
    tracing::debug!(file = %filename, mime_type, bytes = data.len(), "read input file");
    Ok(UploadedDocument::new(filename, mime_type, data))
}

fn declared_mime(path: &Path, data: &[u8]) -> &'static str {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME,
        Some(_) => OCTET_STREAM,
        None if data.starts_with(b"%PDF-") => PDF_MIME,
        None => OCTET_STREAM,
    }
}
