/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error;
use crate::operation::upload::UploadInput;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Internal context used to drive a single Upload operation
#[derive(Debug, Clone)]
pub(crate) struct UploadContext {
    /// reference to client handle used to do actual work
    pub(crate) handle: Arc<crate::client::Handle>,
    /// the original request
    pub(crate) request: Arc<UploadInput>,
}

impl UploadContext {
    pub(crate) fn new(handle: Arc<crate::client::Handle>, request: UploadInput) -> Self {
        Self {
            handle,
            request: Arc::new(request),
        }
    }

    /// The original request
    pub(crate) fn request(&self) -> &UploadInput {
        self.request.deref()
    }

    /// Endpoint host the upload is sent to
    pub(crate) fn endpoint(&self) -> &str {
        self.handle.context().endpoint()
    }

    /// Bucket the upload is written to
    pub(crate) fn bucket(&self) -> Result<&str, error::Error> {
        match self.handle.context().bucket() {
            "" => Err(error::invalid_input("invalid bucket: bucket is empty")),
            bucket => Ok(bucket),
        }
    }

    /// Local file to upload
    pub(crate) fn file_path(&self) -> Result<&Path, error::Error> {
        self.request
            .file_path()
            .ok_or_else(|| error::invalid_input("a local file path is required"))
    }

    /// Effective deadline for this upload
    pub(crate) fn timeout(&self) -> Duration {
        self.handle.upload_timeout(self.request.timeout())
    }
}
