/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::operation::upload::UploadOutput;
use tokio::task::JoinHandle;

/// Response type for an upload started with [`initiate`](crate::operation::upload::builders::UploadFluentBuilder::initiate).
///
/// The upload runs on its own task and yields exactly one result through [`Self::join`].
///
/// # Cancellation
///
/// There is no way to cancel the upload from the handle. The per-upload deadline still
/// applies. Dropping the handle detaches the task: the upload runs to completion (or to
/// its deadline) and the result is discarded.
#[derive(Debug)]
#[non_exhaustive]
pub struct UploadHandle {
    task: JoinHandle<Result<UploadOutput, crate::error::Error>>,
}

impl UploadHandle {
    pub(crate) fn new(task: JoinHandle<Result<UploadOutput, crate::error::Error>>) -> Self {
        Self { task }
    }

    /// Returns true once the upload task has finished
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Consume the handle and wait for the upload to complete
    #[tracing::instrument(skip_all, level = "debug", name = "join-upload")]
    pub async fn join(self) -> Result<UploadOutput, crate::error::Error> {
        self.task.await?
    }
}
