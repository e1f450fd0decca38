use crate::{config::Config, errors::ApiError};
use actix_multipart::Multipart;
use futures_util::TryStreamExt as _;
use sanitize_filename::sanitize;
use std::path::Path;

/// Upload allow-list: extension -> canonical content type.
const ALLOWED_TYPES: &[(&str, &str)] = &[("png", "image/png"), ("pdf", "application/pdf")];

pub fn content_type_for(ext: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(e, _)| ext.eq_ignore_ascii_case(e))
        .map(|(_, mime)| *mime)
}

/// Raw multipart form contents; either field may be missing.
pub struct UploadForm {
    pub file: Option<(String, Vec<u8>)>,
    pub comment: Option<String>,
}

/// An upload that passed the allow-list and field-presence checks.
#[derive(Debug)]
pub struct ValidUpload {
    pub extension: String,
    pub content_type: &'static str,
    pub comment: String,
    pub data: Vec<u8>,
}

pub async fn read_upload_form(
    cfg: &Config,
    payload: &mut Multipart,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm {
        file: None,
        comment: None,
    };
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|_| ApiError::BadRequest("invalid multipart".into()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|s| s.to_string()));
                let Some(filename) = filename else {
                    continue;
                };
                let mut data: Vec<u8> = Vec::new();
                while let Some(chunk) = field
                    .try_next()
                    .await
                    .map_err(|_| ApiError::BadRequest("upload read error".into()))?
                {
                    data.extend_from_slice(&chunk);
                    if data.len() > cfg.max_upload_size {
                        return Err(ApiError::BadRequest("file too large".into()));
                    }
                }
                form.file = Some((sanitize(&filename), data));
            }
            "comment" => {
                let mut data: Vec<u8> = Vec::new();
                while let Some(chunk) = field
                    .try_next()
                    .await
                    .map_err(|_| ApiError::BadRequest("upload read error".into()))?
                {
                    data.extend_from_slice(&chunk);
                }
                form.comment = Some(String::from_utf8_lossy(&data).into_owned());
            }
            _ => {}
        }
    }
    Ok(form)
}

pub fn validate_upload(form: UploadForm) -> Result<ValidUpload, ApiError> {
    let ((original_name, data), comment) = match (form.file, form.comment) {
        (Some(f), Some(c)) => (f, c),
        _ => {
            return Err(ApiError::BadRequest(
                "Comment and file field required in request.".into(),
            ));
        }
    };
    let extension = Path::new(&original_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let content_type = content_type_for(&extension)
        .ok_or_else(|| ApiError::BadRequest(format!("File type .{} not allowed.", extension)))?;
    Ok(ValidUpload {
        extension,
        content_type,
        comment,
        data,
    })
}
