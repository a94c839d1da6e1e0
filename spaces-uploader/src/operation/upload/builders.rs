/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;

use super::{UploadHandle, UploadInputBuilder, UploadOutput};

/// Fluent builder for constructing a single file upload
#[derive(Debug)]
pub struct UploadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: UploadInputBuilder,
}

impl UploadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Upload the file and wait for it to complete
    pub async fn send(self) -> Result<UploadOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::upload::Upload::orchestrate(self.handle, input).await
    }

    /// Start the upload on a new task.
    ///
    /// Returns as soon as the task is spawned. Call [`UploadHandle::join`] on the returned
    /// handle to wait for the result. Must be called from within a tokio runtime.
    pub fn initiate(self) -> Result<UploadHandle, Error> {
        let input = self.inner.build()?;
        crate::operation::upload::Upload::initiate(self.handle, input)
    }

    /// Path of the local file to upload.
    pub fn file_path(mut self, input: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.file_path(input);
        self
    }

    /// Path of the local file to upload.
    pub fn set_file_path(mut self, input: Option<PathBuf>) -> Self {
        self.inner = self.inner.set_file_path(input);
        self
    }

    /// Path of the local file to upload.
    pub fn get_file_path(&self) -> &Option<PathBuf> {
        self.inner.get_file_path()
    }

    /// Deadline for the upload. Unset or zero falls back to 180 seconds.
    pub fn timeout(mut self, input: Duration) -> Self {
        self.inner = self.inner.timeout(input);
        self
    }

    /// Deadline for the upload.
    pub fn set_timeout(mut self, input: Option<Duration>) -> Self {
        self.inner = self.inner.set_timeout(input);
        self
    }

    /// Deadline for the upload.
    pub fn get_timeout(&self) -> &Option<Duration> {
        self.inner.get_timeout()
    }

    /// Make the object publicly readable.
    pub fn public(mut self, input: bool) -> Self {
        self.inner = self.inner.public(input);
        self
    }

    /// Whether the object is made publicly readable.
    pub fn get_public(&self) -> bool {
        self.inner.get_public()
    }

    /// Adds a key-value pair to the object's user metadata.
    pub fn metadata(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.inner = self.inner.metadata(k, v);
        self
    }

    /// User metadata stored with the object.
    pub fn set_metadata(mut self, input: Option<HashMap<String, String>>) -> Self {
        self.inner = self.inner.set_metadata(input);
        self
    }

    /// User metadata stored with the object.
    pub fn get_metadata(&self) -> &Option<HashMap<String, String>> {
        self.inner.get_metadata()
    }
}

impl crate::operation::upload::input::UploadInputBuilder {
    /// Upload a file with this input using the given client and wait for it to complete.
    pub async fn send_with(self, client: &crate::Client) -> Result<UploadOutput, Error> {
        let mut fluent_builder = client.upload();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }

    /// Start an upload with this input using the given client on a new task.
    pub fn initiate_with(self, client: &crate::Client) -> Result<UploadHandle, Error> {
        let mut fluent_builder = client.upload();
        fluent_builder.inner = self;
        fluent_builder.initiate()
    }
}
