/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Input type for uploading a single local file
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadInput {
    /// Path of the local file to upload. The object is stored under the file's base name.
    pub file_path: Option<PathBuf>,

    /// Deadline for the upload. Unset or zero falls back to the client default (180 seconds).
    pub timeout: Option<Duration>,

    /// Whether the object is made publicly readable.
    pub public: bool,

    /// User metadata stored with the object.
    pub metadata: Option<HashMap<String, String>>,
}

impl UploadInput {
    /// Creates a new builder-style object to manufacture [`UploadInput`](crate::operation::upload::UploadInput).
    pub fn builder() -> UploadInputBuilder {
        UploadInputBuilder::default()
    }

    /// Path of the local file to upload
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Deadline for the upload, if one was set
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the object is made publicly readable
    pub fn public(&self) -> bool {
        self.public
    }

    /// User metadata stored with the object
    pub fn metadata(&self) -> Option<&HashMap<String, String>> {
        self.metadata.as_ref()
    }
}

/// A builder for [`UploadInput`](crate::operation::upload::UploadInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadInputBuilder {
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) public: bool,
    pub(crate) metadata: Option<HashMap<String, String>>,
}

impl UploadInputBuilder {
    /// Path of the local file to upload.
    ///
    /// NOTE: A file path is required.
    pub fn file_path(mut self, input: impl Into<PathBuf>) -> Self {
        self.file_path = Some(input.into());
        self
    }

    /// Path of the local file to upload.
    ///
    /// NOTE: A file path is required.
    pub fn set_file_path(mut self, input: Option<PathBuf>) -> Self {
        self.file_path = input;
        self
    }

    /// Path of the local file to upload.
    pub fn get_file_path(&self) -> &Option<PathBuf> {
        &self.file_path
    }

    /// Deadline for the upload.
    ///
    /// A zero duration is treated as unset, in which case the client default applies.
    pub fn timeout(mut self, input: Duration) -> Self {
        self.timeout = Some(input);
        self
    }

    /// Deadline for the upload.
    pub fn set_timeout(mut self, input: Option<Duration>) -> Self {
        self.timeout = input;
        self
    }

    /// Deadline for the upload.
    pub fn get_timeout(&self) -> &Option<Duration> {
        &self.timeout
    }

    /// Make the object publicly readable (`public-read` ACL).
    pub fn public(mut self, input: bool) -> Self {
        self.public = input;
        self
    }

    /// Whether the object is made publicly readable.
    pub fn get_public(&self) -> bool {
        self.public
    }

    /// Adds a key-value pair to `metadata`.
    ///
    /// To override the contents of this collection use [`set_metadata`](Self::set_metadata).
    pub fn metadata(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        let mut hash_map = self.metadata.unwrap_or_default();
        hash_map.insert(k.into(), v.into());
        self.metadata = Some(hash_map);
        self
    }

    /// User metadata stored with the object.
    pub fn set_metadata(mut self, input: Option<HashMap<String, String>>) -> Self {
        self.metadata = input;
        self
    }

    /// User metadata stored with the object.
    pub fn get_metadata(&self) -> &Option<HashMap<String, String>> {
        &self.metadata
    }

    /// Consumes the builder and constructs a [`UploadInput`](crate::operation::upload::UploadInput).
    pub fn build(self) -> Result<UploadInput, BuildError> {
        if self.file_path.is_none() {
            return Err(BuildError::missing_field(
                "file_path",
                "A local file path is required",
            ));
        }

        Ok(UploadInput {
            file_path: self.file_path,
            timeout: self.timeout,
            public: self.public,
            metadata: self.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::UploadInput;
    use std::path::Path;

    #[test]
    fn test_no_file_path_error() {
        let err = UploadInput::builder().public(true).build().unwrap_err();
        assert!(err.to_string().contains("A local file path is required"));
    }

    #[test]
    fn test_metadata_accumulates() {
        let input = UploadInput::builder()
            .file_path("./test.png")
            .metadata("a", "1")
            .metadata("b", "2")
            .build()
            .unwrap();

        assert_eq!(Some(Path::new("./test.png")), input.file_path());
        assert_eq!(2, input.metadata().unwrap().len());
        assert!(!input.public());
        assert_eq!(None, input.timeout());
    }
}
