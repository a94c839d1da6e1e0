/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Content type detection
pub mod sniff;

mod local_file;

// re-exports
pub use self::local_file::LocalFile;
pub use self::sniff::content_type;
