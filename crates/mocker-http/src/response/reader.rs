//! Canned response file loading.

use super::RouteResponse;
use crate::error::MockerError;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole response file as UTF-8 and wrap it as an XML response.
///
/// Fails with `NotFound` when the path is missing or not a regular file,
/// `Decode` on invalid UTF-8 and `Io` on any other read failure.
pub async fn read_response(path: &Path) -> Result<RouteResponse, MockerError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MockerError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(MockerError::io(path, e)),
    };
    if !metadata.is_file() {
        return Err(MockerError::NotFound(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        // Removed between the metadata check and the read
        ErrorKind::NotFound => MockerError::NotFound(path.to_path_buf()),
        _ => MockerError::io(path, e),
    })?;

    let body = String::from_utf8(bytes).map_err(|source| MockerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(RouteResponse::xml(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::XML_CONTENT_TYPE;

    #[tokio::test]
    async fn test_read_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customer.xml");
        std::fs::write(&path, "<customer>Zoë</customer>").unwrap();

        let response = read_response(&path).await.unwrap();
        assert_eq!(response.body, "<customer>Zoë</customer>");
        assert_eq!(response.content_type(), Some(XML_CONTENT_TYPE));
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xml");
        std::fs::write(&path, "").unwrap();

        let response = read_response(&path).await.unwrap();
        assert_eq!(response.body, "");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_response(&dir.path().join("nope.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, MockerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_response(dir.path()).await.unwrap_err();
        assert!(matches!(err, MockerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.dat");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = read_response(&path).await.unwrap_err();
        assert!(matches!(err, MockerError::Decode { .. }));
    }
}
