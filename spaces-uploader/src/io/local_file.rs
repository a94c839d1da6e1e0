/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use mime::Mime;
use path_clean::PathClean;
use tokio::io::AsyncReadExt;

use crate::error::{self, ErrorKind};
use crate::io::sniff::{self, SNIFF_LEN};

/// A local file ready to be uploaded.
///
/// Opening a `LocalFile` derives the object name from the path and classifies the
/// content type from the first [`SNIFF_LEN`] bytes of the file.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    object_name: String,
    content_type: Mime,
}

impl LocalFile {
    /// Open the file at `path` and sniff its content type.
    pub async fn open(path: impl AsRef<Path>) -> Result<LocalFile, error::Error> {
        let path = path.as_ref();
        let object_name = object_name(path)?;

        let mut file = tokio::fs::File::open(path)
            .await
            .map_err(error::from_kind(ErrorKind::IOError))?;
        let meta = file
            .metadata()
            .await
            .map_err(error::from_kind(ErrorKind::IOError))?;
        if meta.is_dir() {
            return Err(error::Error::new(
                ErrorKind::IOError,
                format!("{} is a directory", path.display()),
            ));
        }

        let mut head = Vec::with_capacity(SNIFF_LEN);
        (&mut file)
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut head)
            .await
            .map_err(error::from_kind(ErrorKind::ContentSniffFailed))?;

        let content_type = sniff::content_type(&head);
        tracing::trace!(
            "sniffed content type {content_type} for {} from {} bytes",
            path.display(),
            head.len()
        );

        Ok(LocalFile {
            path: path.to_path_buf(),
            object_name,
            content_type,
        })
    }

    /// Path of the file on the local filesystem
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Object name (key) the file is stored under: its base file name
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Content type detected from the leading bytes of the file
    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }
}

/// Derive the object name from the base name of the lexically cleaned path.
pub(crate) fn object_name(path: &Path) -> Result<String, error::Error> {
    let cleaned = path.clean();
    let name = cleaned.file_name().ok_or_else(|| {
        error::invalid_input(format!("{} does not name a file", path.display()))
    })?;
    name.to_str().map(str::to_owned).ok_or_else(|| {
        error::invalid_input(format!("{} is not valid UTF-8", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::{object_name, LocalFile};
    use crate::error::ErrorKind;
    use std::io::Write;
    use std::path::Path;
    use test_common::PNG_HEADER;

    #[test]
    fn test_object_name_is_base_name() {
        assert_eq!("test.png", object_name(Path::new("./test.png")).unwrap());
        assert_eq!(
            "report.pdf",
            object_name(Path::new("/var/tmp/reports/report.pdf")).unwrap()
        );
        assert_eq!("b.txt", object_name(Path::new("a/../b.txt")).unwrap());
    }

    #[test]
    fn test_object_name_requires_file_name() {
        for path in ["", ".", "..", "/"] {
            let err = object_name(Path::new(path)).unwrap_err();
            assert_eq!(&ErrorKind::InputInvalid, err.kind(), "path: {path:?}");
        }
    }

    #[tokio::test]
    async fn test_open_sniffs_content_type() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        file.write_all(PNG_HEADER).unwrap();

        let local = LocalFile::open(file.path()).await.unwrap();
        assert_eq!("image/png", local.content_type().to_string());
        assert!(local.object_name().ends_with(".bin"));
        assert_eq!(file.path(), local.path());
    }

    #[tokio::test]
    async fn test_open_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let local = LocalFile::open(file.path()).await.unwrap();
        assert_eq!(&mime::APPLICATION_OCTET_STREAM, local.content_type());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFile::open(dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::IOError, err.kind());
    }

    #[tokio::test]
    async fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        let err = LocalFile::open(&nested).await.unwrap_err();
        assert_eq!(&ErrorKind::IOError, err.kind());
    }
}
