/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::config::Region;

use crate::error;
use crate::types::{ConnectionContext, Credentials};
use crate::Config;

/// Signing region used when none is configured
const DEFAULT_REGION: &str = "us-east-1";

/// Upload client for DigitalOcean Spaces and other S3-compatible object stores.
///
/// Cloning a client is cheap. Setters only affect uploads started after the call;
/// uploads already in flight keep the configuration they started with.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out an upload: connection context, credentials, defaults
#[derive(Debug, Clone)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// Connection context uploads are sent to
    pub(crate) fn context(&self) -> &ConnectionContext {
        self.config.context()
    }

    /// Resolve the deadline for a single upload.
    ///
    /// A positive request timeout wins; otherwise the configured default applies.
    pub(crate) fn upload_timeout(&self, requested: Option<Duration>) -> Duration {
        requested
            .filter(|t| !t.is_zero())
            .unwrap_or_else(|| self.config.default_timeout())
    }

    /// Create a storage client session for the configured endpoint over HTTPS.
    pub(crate) fn s3_client(&self) -> Result<aws_sdk_s3::Client, error::Error> {
        let endpoint = self.context().endpoint();
        if endpoint.is_empty() {
            return Err(error::connection_failed("invalid endpoint: endpoint is empty"));
        }
        if endpoint.contains("://") {
            return Err(error::connection_failed(format!(
                "invalid endpoint `{endpoint}`: expected a host name without a URL scheme"
            )));
        }

        if let Some(client) = self.config.client() {
            return Ok(client.clone());
        }

        let region = match self.context().region() {
            "" => DEFAULT_REGION.to_owned(),
            region => region.to_owned(),
        };
        tracing::trace!("creating storage client for https://{endpoint} in region {region}");

        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version_latest()
            .region(Region::new(region))
            .endpoint_url(format!("https://{endpoint}"))
            .credentials_provider(aws_sdk_s3::config::Credentials::from(
                self.config.credentials(),
            ))
            .force_path_style(true)
            .build();

        Ok(aws_sdk_s3::Client::from_conf(s3_config))
    }
}

impl Client {
    /// Creates a new client from an access key pair with an empty connection context.
    ///
    /// Set at least the endpoint and bucket before uploading.
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Client {
        let config = Config::builder()
            .credentials(Credentials::new(access_key, access_secret))
            .build();
        Client::from_conf(config)
    }

    /// Creates a new client from an upload client config.
    pub fn from_conf(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Set the storage endpoint host name, e.g. `sgp1.digitaloceanspaces.com`
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.context_mut().endpoint = endpoint.into();
    }

    /// The storage endpoint host name
    pub fn endpoint(&self) -> &str {
        self.handle.context().endpoint()
    }

    /// Set the bucket uploads are written to
    pub fn set_bucket(&mut self, bucket: impl Into<String>) {
        self.context_mut().bucket = bucket.into();
    }

    /// The bucket uploads are written to
    pub fn bucket(&self) -> &str {
        self.handle.context().bucket()
    }

    /// Set the signing region
    pub fn set_region(&mut self, region: impl Into<String>) {
        self.context_mut().region = region.into();
    }

    /// The signing region
    pub fn region(&self) -> &str {
        self.handle.context().region()
    }

    fn context_mut(&mut self) -> &mut ConnectionContext {
        Arc::make_mut(&mut self.handle).config.context_mut()
    }

    /// Upload a single local file.
    ///
    /// Constructs a fluent builder for the
    /// [`Upload`](crate::operation::upload::builders::UploadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// async fn upload_file(
    ///     client: &spaces_uploader::Client,
    /// ) -> Result<(), spaces_uploader::error::Error> {
    ///     let output = client
    ///         .upload()
    ///         .file_path("./photos/cat.jpg")
    ///         .public(true)
    ///         .timeout(Duration::from_secs(30))
    ///         .metadata("album", "pets")
    ///         .send()
    ///         .await?;
    ///
    ///     println!("public URL: {}", output.location());
    ///     Ok(())
    /// }
    /// ```
    pub fn upload(&self) -> crate::operation::upload::builders::UploadFluentBuilder {
        crate::operation::upload::builders::UploadFluentBuilder::new(self.handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::error::ErrorKind;
    use std::time::Duration;

    #[test]
    fn test_setters_and_getters() {
        let mut client = Client::new("key", "secret");
        assert_eq!("", client.endpoint());
        assert_eq!("", client.bucket());
        assert_eq!("", client.region());

        client.set_region("sgp1");
        client.set_endpoint("sgp1.digitaloceanspaces.com");
        client.set_bucket("dongfeng");

        assert_eq!("sgp1", client.region());
        assert_eq!("sgp1.digitaloceanspaces.com", client.endpoint());
        assert_eq!("dongfeng", client.bucket());
        assert_eq!("key", client.config().credentials().access_key());
    }

    #[test]
    fn test_setters_do_not_leak_into_clones() {
        let mut client = Client::new("key", "secret");
        client.set_bucket("first");
        let snapshot = client.clone();
        client.set_bucket("second");

        assert_eq!("first", snapshot.bucket());
        assert_eq!("second", client.bucket());
    }

    #[test]
    fn test_upload_timeout() {
        let client = Client::new("key", "secret");
        let handle = &client.handle;
        assert_eq!(Duration::from_secs(180), handle.upload_timeout(None));
        assert_eq!(
            Duration::from_secs(180),
            handle.upload_timeout(Some(Duration::ZERO))
        );
        assert_eq!(
            Duration::from_secs(42),
            handle.upload_timeout(Some(Duration::from_secs(42)))
        );
    }

    #[test]
    fn test_session_requires_endpoint() {
        let mut client = Client::new("key", "secret");
        let err = client.handle.s3_client().unwrap_err();
        assert_eq!(&ErrorKind::ConnectionFailed, err.kind());

        client.set_endpoint("https://sgp1.digitaloceanspaces.com");
        let err = client.handle.s3_client().unwrap_err();
        assert_eq!(&ErrorKind::ConnectionFailed, err.kind());
    }

    #[tokio::test]
    async fn test_session_uses_https_endpoint() {
        let mut client = Client::new("key", "secret");
        client.set_endpoint("sgp1.digitaloceanspaces.com");

        let s3 = client.handle.s3_client().unwrap();
        assert_eq!(Some("us-east-1"), s3.config().region().map(|r| r.as_ref()));
    }
}
