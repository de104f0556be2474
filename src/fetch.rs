//! Byte-buffer source for feeds. The pipeline only ever sees the resulting
//! buffer; whether it came over HTTP or from disk is decided here.

use crate::error::Result;

/// Loads feed bytes from an HTTP(S) URL or a local file path.
pub async fn load_bytes(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source).await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    } else {
        Ok(std::fs::read(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_local_files() {
        let path = std::env::temp_dir().join("gtfs-rtdb-fetch-test.pb");
        std::fs::write(&path, b"\x0a\x00").unwrap();

        let bytes = load_bytes(path.to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"\x0a\x00");

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        assert!(load_bytes("/nonexistent/feed.pb").await.is_err());
    }
}
