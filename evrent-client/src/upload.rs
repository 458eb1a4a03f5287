use base64::prelude::{Engine, BASE64_STANDARD};
use eyre::{bail, eyre, Context, Result};
use reqwest::multipart::Part;
use std::path::Path;

/// A binary attachment sent next to the JSON `data` field of a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs_err::read(path)?;
        let file_name = path
            .file_name()
            .map(|x| x.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".into());
        let mime = mime_from_extension(path).to_string();

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    /// Parses `data:<mime>;base64,<payload>`, which is what signature pads export.
    pub fn from_data_url(name: &str, value: &str) -> Result<Self> {
        let rest = value
            .strip_prefix("data:")
            .ok_or_else(|| eyre!("Not a data url"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| eyre!("Malformed data url"))?;
        let Some(mime) = meta.strip_suffix(";base64") else {
            bail!("Only base64 data urls are supported");
        };

        let bytes = BASE64_STANDARD
            .decode(payload.trim())
            .wrap_err("Failed to decode base64 payload")?;
        let extension = mime.rsplit('/').next().unwrap_or("bin");

        Ok(Self {
            file_name: format!("{name}.{extension}"),
            mime: mime.to_string(),
            bytes,
        })
    }

    /// Accepts either a data url or a path on disk.
    pub fn from_arg(name: &str, value: &str) -> Result<Self> {
        if value.starts_with("data:") {
            Self::from_data_url(name, value)
        } else {
            Self::from_path(Path::new(value))
                .wrap_err_with(|| format!("Failed to read {name} from {value}"))
        }
    }

    pub fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?)
    }
}

/// Photo and signatures collected when a vehicle changes hands.
#[derive(Debug, Clone, Default)]
pub struct HandoverFiles {
    pub photo: Option<Upload>,
    pub staff_signature: Option<Upload>,
    pub customer_signature: Option<Upload>,
}

impl HandoverFiles {
    pub fn parts(self) -> Vec<(&'static str, Upload)> {
        [
            ("photo", self.photo),
            ("staff_signature", self.staff_signature),
            ("customer_signature", self.customer_signature),
        ]
        .into_iter()
        .filter_map(|(name, upload)| upload.map(|x| (name, x)))
        .collect()
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|x| x.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_signature_data_url() {
        let upload = Upload::from_data_url("customer_signature", "data:image/png;base64,aGVsbG8=")
            .unwrap();
        assert_eq!(upload.bytes, b"hello");
        assert_eq!(upload.mime, "image/png");
        assert_eq!(upload.file_name, "customer_signature.png");
    }

    #[test]
    fn rejects_non_base64_data_url() {
        assert!(Upload::from_data_url("x", "data:text/plain,hello").is_err());
        assert!(Upload::from_data_url("x", "hello").is_err());
    }

    #[test]
    fn reads_file_with_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.JPG");
        fs_err::write(&path, [1u8, 2, 3]).unwrap();

        let upload = Upload::from_arg("photo", path.to_str().unwrap()).unwrap();
        assert_eq!(upload.file_name, "front.JPG");
        assert_eq!(upload.mime, "image/jpeg");
        assert_eq!(upload.bytes, vec![1, 2, 3]);
    }
}
