use axum::extract::Multipart;
use paperlens_core::{PDF_MIME, UploadedDocument};

/// Parse a multipart form upload, returning the file sent as the `pdf` field.
///
/// The declared type is the part's `Content-Type`. Clients that omit it
/// fall back to the file extension.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedDocument, String> {
    let mut file: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let mime_type = declared_mime(field.content_type(), &filename);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                file = Some(UploadedDocument::new(filename, mime_type, data));
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    file.ok_or_else(|| "No file uploaded".to_string())
}

fn declared_mime(content_type: Option<&str>, filename: &str) -> String {
    match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
        Some(ct) => ct.to_string(),
        None if filename.to_lowercase().ends_with(".pdf") => PDF_MIME.to_string(),
        None => "application/octet-stream".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_wins_over_extension() {
        assert_eq!(declared_mime(Some("text/plain"), "paper.pdf"), "text/plain");
        assert_eq!(declared_mime(Some(PDF_MIME), "paper.bin"), PDF_MIME);
    }

    #[test]
    fn missing_content_type_uses_extension() {
        assert_eq!(declared_mime(None, "Paper.PDF"), PDF_MIME);
        assert_eq!(declared_mime(Some("  "), "paper.pdf"), PDF_MIME);
        assert_eq!(declared_mime(None, "notes.txt"), "application/octet-stream");
    }
}
