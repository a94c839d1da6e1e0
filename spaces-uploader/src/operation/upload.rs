/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;
mod input;
mod output;

mod context;
mod handle;

use crate::error::{self, ErrorKind};
use crate::io::LocalFile;
use crate::types::ObjectMetadata;
use aws_sdk_s3::primitives::ByteStream;
use context::UploadContext;
pub use handle::UploadHandle;
/// Request type for uploads
pub use input::{UploadInput, UploadInputBuilder};
/// Response type for uploads
pub use output::{UploadOutput, UploadOutputBuilder};

use std::sync::Arc;
use tracing::Instrument;

/// Operation struct for single file upload
#[derive(Clone, Default, Debug)]
pub(crate) struct Upload;

impl Upload {
    /// Execute a single `Upload` operation, returning once the object is stored
    #[tracing::instrument(skip_all, level = "debug", name = "upload")]
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: UploadInput,
    ) -> Result<UploadOutput, error::Error> {
        let ctx = UploadContext::new(handle, input);

        let client = ctx.handle.s3_client()?;
        let bucket = ctx.bucket()?;
        check_bucket(&client, bucket).await?;

        let timeout = ctx.timeout();
        let file = LocalFile::open(ctx.file_path()?).await?;
        let metadata = ObjectMetadata::merge(ctx.request().metadata(), ctx.request().public());

        tracing::trace!(
            "uploading {} to bucket {bucket} as {} ({}) with a {timeout:?} deadline",
            file.path().display(),
            file.object_name(),
            file.content_type(),
        );

        let e_tag = tokio::time::timeout(timeout, put_object(&client, bucket, &file, &metadata))
            .await
            .inspect_err(|_| {
                tracing::debug!(
                    "upload of {} did not complete within {timeout:?}",
                    file.path().display()
                )
            })??;

        let output = UploadOutput::builder()
            .endpoint(ctx.endpoint())
            .bucket(bucket)
            .key(file.object_name())
            .content_type(file.content_type().to_string())
            .metadata(metadata)
            .set_e_tag(e_tag)
            .build()?;

        tracing::debug!("upload completed: {}", output.location());
        Ok(output)
    }

    /// Start a single `Upload` operation on a new task
    pub(crate) fn initiate(
        handle: Arc<crate::client::Handle>,
        input: UploadInput,
    ) -> Result<UploadHandle, error::Error> {
        let task = tokio::spawn(Upload::orchestrate(handle, input));
        Ok(UploadHandle::new(task))
    }
}

/// Verify the bucket exists by invoking `HeadBucket`
async fn check_bucket(client: &aws_sdk_s3::Client, bucket: &str) -> Result<(), error::Error> {
    client
        .head_bucket()
        .bucket(bucket)
        .send()
        .instrument(tracing::debug_span!("send-head-bucket"))
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::debug!("bucket {bucket} check failed: {err}");
            error::bucket_not_found(err)
        })
}

/// Send the file as the object body, returning the entity tag if one was returned
async fn put_object(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    file: &LocalFile,
    metadata: &ObjectMetadata,
) -> Result<Option<String>, error::Error> {
    let body = ByteStream::from_path(file.path())
        .await
        .map_err(error::from_kind(ErrorKind::IOError))?;

    let resp = client
        .put_object()
        .bucket(bucket)
        .key(file.object_name())
        .content_type(file.content_type().to_string())
        .set_acl(metadata.acl())
        .set_metadata(metadata.user_metadata())
        .body(body)
        .send()
        .instrument(tracing::debug_span!("send-put-object"))
        .await?;

    Ok(resp.e_tag)
}

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use crate::operation::upload::UploadInput;
    use aws_sdk_s3::operation::head_bucket::{HeadBucketError, HeadBucketOutput};
    use aws_sdk_s3::operation::put_object::PutObjectOutput;
    use aws_sdk_s3::types::error::NotFound;
    use aws_sdk_s3::types::ObjectCannedAcl;
    use aws_smithy_mocks_experimental::{mock, RuleMode};
    use std::io::Write;
    use test_common::{mock_client_with_stubbed_http_client, PNG_HEADER};

    fn test_client(s3: aws_sdk_s3::Client) -> crate::Client {
        let config = crate::Config::builder()
            .endpoint("sgp1.example.com")
            .bucket("mybucket")
            .client(s3)
            .build();
        crate::Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_basic_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(PNG_HEADER)
            .unwrap();

        let head_bucket = mock!(aws_sdk_s3::Client::head_bucket)
            .match_requests(|r| r.bucket() == Some("mybucket"))
            .then_output(|| HeadBucketOutput::builder().build());
        let put_object = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| {
                r.bucket() == Some("mybucket")
                    && r.key() == Some("test.png")
                    && r.content_type() == Some("image/png")
                    && r.acl() == Some(&ObjectCannedAcl::PublicRead)
            })
            .then_output(|| PutObjectOutput::builder().e_tag("test-etag").build());
        let s3 = mock_client_with_stubbed_http_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&head_bucket, &put_object]
        );
        let client = test_client(s3);

        let output = UploadInput::builder()
            .file_path(&path)
            .public(true)
            .send_with(&client)
            .await
            .unwrap();

        assert_eq!(
            "https://sgp1.example.com/mybucket/test.png",
            output.location()
        );
        assert_eq!(Some("test-etag"), output.e_tag());
        assert!(output.metadata().is_public());
        assert_eq!(1, put_object.num_calls());
    }

    #[tokio::test]
    async fn test_missing_bucket() {
        let head_bucket = mock!(aws_sdk_s3::Client::head_bucket)
            .then_error(|| HeadBucketError::NotFound(NotFound::builder().build()));
        let s3 = mock_client_with_stubbed_http_client!(aws_sdk_s3, &[&head_bucket]);
        let client = test_client(s3);

        let err = client
            .upload()
            .file_path("./does-not-matter.png")
            .send()
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::BucketNotFound, err.kind());
    }

    #[tokio::test]
    async fn test_empty_bucket_is_invalid() {
        let config = crate::Config::builder()
            .endpoint("sgp1.example.com")
            .build();
        let client = crate::Client::from_conf(config);

        let err = client
            .upload()
            .file_path("./test.png")
            .send()
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }

    #[tokio::test]
    async fn test_missing_file_path() {
        let client = crate::Client::new("key", "secret");
        let err = client.upload().public(true).send().await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}
