use uuid::Uuid;

/// Extensions accepted for fridge image uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Result of validating an uploaded image filename.
#[derive(Debug)]
pub enum UploadFilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains null bytes or control characters.
    ControlCharacter,
    /// Filename has no extension.
    MissingExtension,
    /// Extension is not an accepted image type.
    UnsupportedType,
}

impl UploadFilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::MissingExtension => "Filename must have an extension",
            Self::UnsupportedType => "Only .jpg, .jpeg, .png, and .webp files are allowed",
        }
    }
}

/// Validates an uploaded image filename and returns its lower-cased
/// extension.
pub fn validate_image_filename(filename: &str) -> Result<String, UploadFilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(UploadFilenameError::Empty);
    }

    // Reject control characters to prevent header injection via
    // Content-Disposition echoes.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(UploadFilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(UploadFilenameError::ContainsPathSeparator);
    }

    let ext = trimmed
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_lowercase()))
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext)
        .ok_or(UploadFilenameError::MissingExtension)?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(UploadFilenameError::UnsupportedType);
    }

    Ok(ext)
}

/// Generates the stored name for an uploaded fridge image.
///
/// The original filename only contributes its (validated) extension;
/// the stored name is unique per upload.
pub fn stored_image_name(original: &str) -> Result<String, UploadFilenameError> {
    let ext = validate_image_filename(original)?;
    Ok(format!("fridge-{}.{}", Uuid::now_v7(), ext))
}

/// Strips any directory components from a client-supplied image path,
/// leaving just the stored filename.
pub fn image_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
