/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use crate::config::Builder;
use crate::types::Credentials;
use crate::Config;

const ENV_ENDPOINT: &str = "SPACES_ENDPOINT";
const ENV_REGION: &str = "SPACES_REGION";
const ENV_BUCKET: &str = "SPACES_BUCKET";
const ENV_ACCESS_KEY: &str = "SPACES_ACCESS_KEY";
const ENV_SECRET_KEY: &str = "SPACES_SECRET_KEY";

/// Load upload client [`Config`] from the environment.
///
/// The following variables are read:
///
/// * `SPACES_ENDPOINT` - storage endpoint host name
/// * `SPACES_REGION` - signing region
/// * `SPACES_BUCKET` - target bucket
/// * `SPACES_ACCESS_KEY` / `SPACES_SECRET_KEY` - access key pair
///
/// Values set explicitly on the loader take precedence over the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
}

impl ConfigLoader {
    /// Host name of the storage endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.builder = self.builder.endpoint(endpoint);
        self
    }

    /// Region used when signing requests
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.builder = self.builder.region(region);
        self
    }

    /// Bucket that uploads are written to
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.builder = self.builder.bucket(bucket);
        self
    }

    /// Access key pair used to sign requests
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.builder = self.builder.credentials(credentials);
        self
    }

    /// Deadline applied to uploads that do not set their own timeout
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.default_timeout(timeout);
        self
    }

    /// Load the configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the values are read from the environment; unset variables leave the
    /// field empty.
    pub fn load(self) -> Config {
        self.load_with(|name| std::env::var(name).ok())
    }

    fn load_with(self, lookup: impl Fn(&str) -> Option<String>) -> Config {
        let mut builder = self.builder;
        if !builder.has_endpoint() {
            if let Some(endpoint) = lookup(ENV_ENDPOINT) {
                builder = builder.endpoint(endpoint);
            }
        }
        if !builder.has_region() {
            if let Some(region) = lookup(ENV_REGION) {
                builder = builder.region(region);
            }
        }
        if !builder.has_bucket() {
            if let Some(bucket) = lookup(ENV_BUCKET) {
                builder = builder.bucket(bucket);
            }
        }
        if !builder.has_credentials() {
            if let (Some(key), Some(secret)) = (lookup(ENV_ACCESS_KEY), lookup(ENV_SECRET_KEY)) {
                builder = builder.credentials(Credentials::new(key, secret));
            } else {
                tracing::debug!("no access key pair found in the environment");
            }
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigLoader;
    use std::collections::HashMap;

    fn env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("SPACES_ENDPOINT", "sgp1.digitaloceanspaces.com".to_owned()),
            ("SPACES_REGION", "sgp1".to_owned()),
            ("SPACES_BUCKET", "env-bucket".to_owned()),
            ("SPACES_ACCESS_KEY", "env-key".to_owned()),
            ("SPACES_SECRET_KEY", "env-secret".to_owned()),
        ])
    }

    #[test]
    fn test_load_from_environment() {
        let vars = env();
        let config = ConfigLoader::default().load_with(|name| vars.get(name).cloned());

        assert_eq!("sgp1.digitaloceanspaces.com", config.context().endpoint());
        assert_eq!("sgp1", config.context().region());
        assert_eq!("env-bucket", config.context().bucket());
        assert_eq!("env-key", config.credentials().access_key());
        assert_eq!("env-secret", config.credentials().access_secret());
    }

    #[test]
    fn test_explicit_values_win() {
        let vars = env();
        let config = ConfigLoader::default()
            .bucket("explicit-bucket")
            .load_with(|name| vars.get(name).cloned());

        assert_eq!("explicit-bucket", config.context().bucket());
        assert_eq!("sgp1", config.context().region());
    }

    #[test]
    fn test_partial_key_pair_is_ignored() {
        let mut vars = env();
        vars.remove("SPACES_SECRET_KEY");
        let config = ConfigLoader::default().load_with(|name| vars.get(name).cloned());

        assert_eq!("", config.credentials().access_key());
    }
}
