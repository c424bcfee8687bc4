use std::path::Path;

use db::types::DbId;

use crate::config::Uploads;

fn extension(file_name: Option<&str>, content_type: Option<&str>) -> String {
    file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .filter(|extension| !extension.is_empty())
        .or_else(|| {
            content_type
                .and_then(mime_guess::get_mime_extensions_str)
                .and_then(|extensions| extensions.first())
                .map(|extension| extension.to_string())
        })
        .unwrap_or_else(|| String::from("bin"))
}

/// Stores an uploaded file under a fresh name and returns the public URL it
/// will be served from.
pub async fn store(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
    config: &Uploads,
) -> anyhow::Result<String> {
    let name = format!("{}.{}", DbId::default(), extension(file_name, content_type));

    tokio::fs::create_dir_all(&config.dir).await?;
    tokio::fs::write(Path::new(&config.dir).join(&name), bytes).await?;

    Ok(format!("/uploads/{name}"))
}

#[cfg(test)]
mod tests {
    use super::extension;

    #[test]
    fn extension_prefers_file_name() {
        assert_eq!(extension(Some("avatar.PNG"), Some("image/png")), "png");
        assert_eq!(extension(Some("photo.jpeg"), None), "jpeg");
    }

    #[test]
    fn extension_falls_back() {
        assert_eq!(extension(Some("noext"), None), "bin");
        assert_eq!(extension(None, None), "bin");
    }
}
