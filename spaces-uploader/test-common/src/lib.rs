/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::{fs, io::Write, path::PathBuf};
use tempfile::{tempdir, TempDir};

#[doc(hidden)]
pub use aws_smithy_mocks_experimental;
#[doc(hidden)]
pub use aws_smithy_runtime;
#[doc(hidden)]
pub use http_02x;

/// PNG file signature followed by the start of an IHDR chunk
pub const PNG_HEADER: &[u8] = b"\x89PNG\x0D\x0A\x1A\x0A\x00\x00\x00\x0DIHDR";

/// Create an S3 client with the given mock rules whose HTTP client always answers `200 OK`
/// with an empty body, so requests never leave the process.
#[macro_export]
macro_rules! mock_client_with_stubbed_http_client {
    ($aws_crate: ident, $rules: expr) => {
        $crate::mock_client_with_stubbed_http_client!(
            $aws_crate,
            $crate::aws_smithy_mocks_experimental::RuleMode::Sequential,
            $rules
        )
    };
    ($aws_crate: ident, $rule_mode: expr, $rules: expr) => {{
        let client =
            $crate::aws_smithy_mocks_experimental::mock_client!($aws_crate, $rule_mode, $rules);
        $aws_crate::Client::from_conf(
            client
                .config()
                .to_builder()
                .http_client(
                    $crate::aws_smithy_runtime::client::http::test_util::infallible_client_fn(
                        |_req| {
                            $crate::http_02x::Response::builder()
                                .status(200)
                                .body("")
                                .unwrap()
                        },
                    ),
                )
                .build(),
        )
    }};
}

/// Create a temporary directory containing files with the given names and contents
pub fn create_test_files(files: &[(&str, &[u8])]) -> TempDir {
    let temp_dir = tempdir().unwrap();

    for (path, contents) in files {
        let full_path = temp_dir.path().join(path);
        let parent = full_path.parent().unwrap();

        // Create the parent directories if they don't exist
        fs::create_dir_all(parent).unwrap();

        let mut file = fs::File::create(&full_path).unwrap();
        file.write_all(contents).unwrap();
    }

    temp_dir
}

/// Path of `name` inside `dir`
pub fn path_in(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
