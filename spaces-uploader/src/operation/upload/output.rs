/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::types::ObjectMetadata;
use aws_smithy_types::error::operation::BuildError;

/// Response type for a single upload
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadOutput {
    /// Public URL of the object: `https://{endpoint}/{bucket}/{key}`
    pub location: String,

    /// Bucket the object was written to
    pub bucket: String,

    /// Object key (the base name of the uploaded file)
    pub key: String,

    /// Content type sent with the object
    pub content_type: String,

    /// Metadata sent with the object, including the ACL marker for public objects
    pub metadata: ObjectMetadata,

    /// Entity tag of the stored object, if the service returned one
    pub e_tag: Option<String>,
}

impl UploadOutput {
    /// Creates a new builder-style object to manufacture [`UploadOutput`](crate::operation::upload::UploadOutput).
    pub fn builder() -> UploadOutputBuilder {
        UploadOutputBuilder::default()
    }

    /// Public URL of the object
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Bucket the object was written to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Content type sent with the object
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Metadata sent with the object
    pub fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }

    /// Entity tag of the stored object
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }
}

/// A builder for [`UploadOutput`](crate::operation::upload::UploadOutput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct UploadOutputBuilder {
    pub(crate) endpoint: Option<String>,
    pub(crate) bucket: Option<String>,
    pub(crate) key: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) metadata: ObjectMetadata,
    pub(crate) e_tag: Option<String>,
}

impl UploadOutputBuilder {
    /// Host name of the endpoint the object was written to
    pub fn endpoint(mut self, input: impl Into<String>) -> Self {
        self.endpoint = Some(input.into());
        self
    }

    /// Bucket the object was written to
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// Object key
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.key = Some(input.into());
        self
    }

    /// Content type sent with the object
    pub fn content_type(mut self, input: impl Into<String>) -> Self {
        self.content_type = Some(input.into());
        self
    }

    /// Metadata sent with the object
    pub fn metadata(mut self, input: ObjectMetadata) -> Self {
        self.metadata = input;
        self
    }

    /// Entity tag of the stored object
    pub fn set_e_tag(mut self, input: Option<String>) -> Self {
        self.e_tag = input;
        self
    }

    /// Consumes the builder and constructs a [`UploadOutput`](crate::operation::upload::UploadOutput).
    ///
    /// Endpoint, bucket and key must all be non-empty, they make up the object location.
    pub fn build(self) -> Result<UploadOutput, BuildError> {
        let endpoint = required(self.endpoint, "endpoint")?;
        let bucket = required(self.bucket, "bucket")?;
        let key = required(self.key, "key")?;

        Ok(UploadOutput {
            location: format!("https://{endpoint}/{bucket}/{key}"),
            bucket,
            key,
            content_type: self
                .content_type
                .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string()),
            metadata: self.metadata,
            e_tag: self.e_tag,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, BuildError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BuildError::missing_field(
            field,
            "required to compose the object location",
        )),
    }
}
