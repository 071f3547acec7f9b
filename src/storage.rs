// src/storage.rs
//
// Product image files live on disk under the upload root; only the generated
// filenames are stored on the product row.
use crate::error::AppError;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted image extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Validates and writes one uploaded image, returning the generated filename.
pub fn save_image(
    upload_dir: &Path,
    original_name: &str,
    data: &[u8],
) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| {
            AppError::validation(format!("Invalid file extension for: {}", original_name))
        })?;

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    fs::create_dir_all(upload_dir)
        .map_err(|e| AppError::internal(format!("Failed to create upload directory: {}", e)))?;

    let filename = format!("{}.{}", Uuid::new_v4(), ext);
    let file_path = upload_dir.join(&filename);
    fs::write(&file_path, data)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(original_name = %original_name, stored = %filename, size = data.len(), "Image stored");
    Ok(filename)
}

/// Best-effort removal of stored images; a failure is logged, not surfaced.
/// The row delete has already succeeded at this point.
pub fn remove_images(upload_dir: &Path, filenames: &[String]) {
    for filename in filenames {
        let path = upload_dir.join(filename);
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!(file = %path.display(), error = %e, "Failed to remove stored image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_upload_dir() -> std::path::PathBuf {
        env::temp_dir().join(format!("lombard-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn stores_and_removes_a_file() {
        let dir = temp_upload_dir();
        let name = save_image(&dir, "ring.jpg", b"fake image bytes").unwrap();
        assert!(name.ends_with(".jpg"));
        assert!(dir.join(&name).exists());

        remove_images(&dir, &[name.clone()]);
        assert!(!dir.join(&name).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn generated_names_are_unique() {
        let dir = temp_upload_dir();
        let a = save_image(&dir, "a.png", b"x").unwrap();
        let b = save_image(&dir, "a.png", b"x").unwrap();
        assert_ne!(a, b);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = temp_upload_dir();
        assert!(save_image(&dir, "malware.exe", b"x").is_err());
        assert!(save_image(&dir, "noextension", b"x").is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_files() {
        let dir = temp_upload_dir();
        assert!(save_image(&dir, "a.jpg", b"").is_err());
        let big = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(save_image(&dir, "a.jpg", &big).is_err());
    }

    #[test]
    fn removing_missing_files_does_not_panic() {
        let dir = temp_upload_dir();
        remove_images(&dir, &["nope.jpg".to_string()]);
    }
}
