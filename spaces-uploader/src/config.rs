/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use crate::types::{ConnectionContext, Credentials};
use crate::DEFAULT_UPLOAD_TIMEOUT;

pub(crate) mod loader;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    context: ConnectionContext,
    credentials: Credentials,
    default_timeout: Duration,
    client: Option<aws_sdk_s3::Client>,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the connection context (endpoint, region, bucket)
    pub fn context(&self) -> &ConnectionContext {
        &self.context
    }

    /// Returns the credentials used to sign requests
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Deadline applied to an upload that does not set its own timeout
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// The explicit Amazon S3 client, if one was configured.
    ///
    /// When unset a client is created for every upload from the endpoint and credentials.
    pub fn client(&self) -> Option<&aws_sdk_s3::Client> {
        self.client.as_ref()
    }

    pub(crate) fn context_mut(&mut self) -> &mut ConnectionContext {
        &mut self.context
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    endpoint: Option<String>,
    region: Option<String>,
    bucket: Option<String>,
    credentials: Option<Credentials>,
    default_timeout: Option<Duration>,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Host name of the storage endpoint, e.g. `sgp1.digitaloceanspaces.com`.
    ///
    /// Requests are always sent over HTTPS, so the endpoint must not carry a URL scheme.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Region used when signing requests. Defaults to `us-east-1` when left empty.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Bucket that uploads are written to
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Access key pair used to sign requests
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Deadline applied to uploads that do not set their own timeout.
    ///
    /// A zero duration is ignored. Default is 180 seconds.
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Set an explicit S3 client to use instead of building one from the endpoint and credentials.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub(crate) fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub(crate) fn has_endpoint(&self) -> bool {
        self.endpoint.is_some()
    }

    pub(crate) fn has_region(&self) -> bool {
        self.region.is_some()
    }

    pub(crate) fn has_bucket(&self) -> bool {
        self.bucket.is_some()
    }

    /// Consumes the builder and constructs a [`Config`]
    pub fn build(self) -> Config {
        Config {
            context: ConnectionContext {
                endpoint: self.endpoint.unwrap_or_default(),
                region: self.region.unwrap_or_default(),
                bucket: self.bucket.unwrap_or_default(),
            },
            credentials: self
                .credentials
                .unwrap_or_else(|| Credentials::new("", "")),
            default_timeout: self
                .default_timeout
                .filter(|t| !t.is_zero())
                .unwrap_or(DEFAULT_UPLOAD_TIMEOUT),
            client: self.client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::builder().build();
        assert_eq!("", config.context().endpoint());
        assert_eq!("", config.context().bucket());
        assert_eq!(Duration::from_secs(180), config.default_timeout());
        assert!(config.client().is_none());
    }

    #[test]
    fn test_zero_default_timeout_is_ignored() {
        let config = Config::builder().default_timeout(Duration::ZERO).build();
        assert_eq!(Duration::from_secs(180), config.default_timeout());

        let config = Config::builder()
            .default_timeout(Duration::from_secs(5))
            .build();
        assert_eq!(Duration::from_secs(5), config.default_timeout());
    }
}
