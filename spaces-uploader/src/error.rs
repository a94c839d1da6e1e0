/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of upload errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input or client configuration is invalid (e.g. empty bucket)
    InputInvalid,

    /// A storage client session could not be set up for the configured endpoint
    ConnectionFailed,

    /// The configured bucket does not exist or could not be checked
    BucketNotFound,

    /// The local file could not be opened
    IOError,

    /// The leading bytes of the local file could not be read for content type detection
    ContentSniffFailed,

    /// The storage service rejected or failed the `PutObject` request
    UploadFailed,

    /// The upload did not finish before its deadline
    TimedOut,

    /// Some kind of internal runtime issue (e.g. a panicked upload task)
    RuntimeError,
}

impl Error {
    /// Creates a new upload [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::ConnectionFailed => write!(f, "failed to connect to storage endpoint"),
            ErrorKind::BucketNotFound => write!(f, "bucket does not exist"),
            ErrorKind::IOError => write!(f, "I/O error"),
            ErrorKind::ContentSniffFailed => write!(f, "failed to detect content type"),
            ErrorKind::UploadFailed => write!(f, "upload failed"),
            ErrorKind::TimedOut => write!(f, "upload timed out"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(value: tokio::time::error::Elapsed) -> Self {
        Self::new(ErrorKind::TimedOut, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn connection_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ConnectionFailed, err)
}

pub(crate) fn bucket_not_found<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::BucketNotFound, err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NotFound" | "NoSuchBucket") => ErrorKind::BucketNotFound,
            _ => ErrorKind::UploadFailed,
        };

        Error::new(kind, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use std::error::Error as _;

    #[test]
    fn test_io_error_maps_to_io_kind() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert_eq!(&ErrorKind::IOError, err.kind());
        assert_eq!("I/O error", err.to_string());
        assert_eq!("no such file", err.source().unwrap().to_string());
    }

    #[tokio::test]
    async fn test_elapsed_maps_to_timed_out() {
        let elapsed = tokio::time::timeout(
            std::time::Duration::from_millis(1),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();
        let err: Error = elapsed.into();
        assert_eq!(&ErrorKind::TimedOut, err.kind());
    }
}
