use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::api::{ApiError, AvatarUpload};

/// First file chosen in a file input, if any.
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

/// Reads a picked image into memory and checks it against the upload limits.
pub async fn read_avatar(file: File) -> Result<AvatarUpload, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ApiError::unknown("Failed to read the selected file"))?;
    let upload = AvatarUpload {
        file_name: file.name(),
        mime: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    };
    upload.validate()?;
    Ok(upload)
}
