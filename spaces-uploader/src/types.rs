/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::fmt;

/// Metadata key used to carry the object ACL alongside user metadata.
pub const ACL_METADATA_KEY: &str = "x-amz-acl";

/// ACL value marking an object as publicly readable.
pub const PUBLIC_READ_ACL: &str = "public-read";

/// Where uploads are sent: the storage endpoint, its region and the target bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionContext {
    pub(crate) endpoint: String,
    pub(crate) region: String,
    pub(crate) bucket: String,
}

impl ConnectionContext {
    /// Host name (and optional port) of the storage endpoint, e.g. `sgp1.digitaloceanspaces.com`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Region used when signing requests
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Bucket that uploads are written to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Static access key pair used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    access_secret: String,
}

impl Credentials {
    /// Create a new access key pair
    pub fn new(access_key: impl Into<String>, access_secret: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            access_secret: access_secret.into(),
        }
    }

    /// The access key ID
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret access key
    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("access_secret", &"** redacted **")
            .finish()
    }
}

impl From<&Credentials> for aws_sdk_s3::config::Credentials {
    fn from(value: &Credentials) -> Self {
        aws_sdk_s3::config::Credentials::new(
            value.access_key.clone(),
            value.access_secret.clone(),
            None,
            None,
            "spaces-uploader",
        )
    }
}

/// Metadata attached to an uploaded object.
///
/// Holds the caller supplied user metadata plus the ACL marker (see [`ACL_METADATA_KEY`])
/// when the object is made public. The ACL marker is sent as the request's canned ACL,
/// everything else as user metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    entries: HashMap<String, String>,
}

impl ObjectMetadata {
    /// Merge user metadata, marking the object public-read if `public` is set.
    pub(crate) fn merge(user: Option<&HashMap<String, String>>, public: bool) -> Self {
        let mut entries = user.cloned().unwrap_or_default();
        if public {
            entries.insert(ACL_METADATA_KEY.to_owned(), PUBLIC_READ_ACL.to_owned());
        }
        Self { entries }
    }

    /// Look up a single entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True when the ACL marker grants public read access
    pub fn is_public(&self) -> bool {
        self.get(ACL_METADATA_KEY) == Some(PUBLIC_READ_ACL)
    }

    /// All entries, including the ACL marker
    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }

    /// The canned ACL carried by the ACL marker, if any
    pub(crate) fn acl(&self) -> Option<aws_sdk_s3::types::ObjectCannedAcl> {
        self.get(ACL_METADATA_KEY)
            .map(aws_sdk_s3::types::ObjectCannedAcl::from)
    }

    /// Entries to send as user metadata (the ACL marker excluded)
    pub(crate) fn user_metadata(&self) -> Option<HashMap<String, String>> {
        let user: HashMap<String, String> = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != ACL_METADATA_KEY)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if user.is_empty() {
            None
        } else {
            Some(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::ObjectCannedAcl;

    #[test]
    fn test_public_merge_adds_acl_marker() {
        let mut user = HashMap::new();
        user.insert("owner".to_owned(), "dongfeng".to_owned());

        let md = ObjectMetadata::merge(Some(&user), true);
        assert!(md.is_public());
        assert_eq!(Some("dongfeng"), md.get("owner"));
        assert_eq!(Some(ObjectCannedAcl::PublicRead), md.acl());

        let sent = md.user_metadata().unwrap();
        assert_eq!(1, sent.len());
        assert!(!sent.contains_key(ACL_METADATA_KEY));
    }

    #[test]
    fn test_private_merge_leaves_metadata_untouched() {
        let md = ObjectMetadata::merge(None, false);
        assert!(!md.is_public());
        assert!(md.entries().is_empty());
        assert_eq!(None, md.acl());
        assert_eq!(None, md.user_metadata());
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("AKIA", "very-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("AKIA"));
        assert!(!debug.contains("very-secret"));
    }
}
