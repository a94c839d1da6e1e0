/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! A small upload client for DigitalOcean Spaces and other S3-compatible object stores.
//!
//! The client holds an endpoint, region, bucket and a pair of access keys. Each upload
//! takes a local file, sniffs its content type from the leading bytes, checks that the
//! bucket exists and sends the file as a single `PutObject` request. Signing, request
//! construction and transport are delegated to [`aws_sdk_s3`].
//!
//! # Examples
//!
//! Upload a file and wait for it to finish:
//!
//! ```no_run
//! # async fn example() -> Result<(), spaces_uploader::error::Error> {
//! let mut client = spaces_uploader::Client::new("access-key", "secret-key");
//! client.set_region("sgp1");
//! client.set_endpoint("sgp1.digitaloceanspaces.com");
//! client.set_bucket("my-bucket");
//!
//! let output = client
//!     .upload()
//!     .file_path("./test.png")
//!     .public(true)
//!     .send()
//!     .await?;
//!
//! println!("uploaded to {}", output.location());
//! # Ok(())
//! # }
//! ```
//!
//! Run the upload on a background task and join it later:
//!
//! ```no_run
//! # async fn example(client: &spaces_uploader::Client) -> Result<(), spaces_uploader::error::Error> {
//! let handle = client.upload().file_path("./report.pdf").initiate()?;
//!
//! // ... do other work ...
//!
//! let output = handle.join().await?;
//! # Ok(())
//! # }
//! ```

/// Default deadline applied to a single upload when the request does not set one.
pub(crate) const DEFAULT_UPLOAD_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(180);

/// Error types emitted by `spaces-uploader`
pub mod error;

/// Common types used by `spaces-uploader`
pub mod types;

/// Types and helpers for local file I/O
pub mod io;

/// Upload client
pub mod client;

/// Upload operations
pub mod operation;

/// Client configuration
pub mod config;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader that reads connection settings from the environment
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
