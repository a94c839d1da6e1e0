/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;
use std::path::PathBuf;
use std::time;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use tracing::{debug_span, Instrument};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "upload")]
#[command(about = "Uploads local files to a DigitalOcean Spaces bucket.")]
pub struct Args {
    /// Local files to upload
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Storage endpoint host name (defaults to $SPACES_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Signing region (defaults to $SPACES_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Target bucket (defaults to $SPACES_BUCKET)
    #[arg(long)]
    bucket: Option<String>,

    /// Make the uploaded objects publicly readable
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    public: bool,

    /// Per-upload deadline in seconds (0 uses the 180 second default)
    #[arg(long, default_value_t = 0)]
    timeout: u64,
}

async fn do_upload(args: Args) -> Result<(), BoxError> {
    let mut loader = spaces_uploader::from_env();
    if let Some(endpoint) = args.endpoint {
        loader = loader.endpoint(endpoint);
    }
    if let Some(region) = args.region {
        loader = loader.region(region);
    }
    if let Some(bucket) = args.bucket {
        loader = loader.bucket(bucket);
    }
    let client = spaces_uploader::Client::from_conf(loader.load());

    let start = time::Instant::now();
    let mut handles = Vec::with_capacity(args.files.len());
    for path in args.files {
        let handle = client
            .upload()
            .file_path(&path)
            .public(args.public)
            .timeout(time::Duration::from_secs(args.timeout))
            .initiate()?;
        handles.push((path, handle));
    }

    let mut failed = 0;
    for (path, handle) in handles {
        match handle
            .join()
            .instrument(debug_span!("wait-upload"))
            .await
        {
            Ok(output) => println!(
                "{} -> {} ({})",
                path.display(),
                output.location(),
                output.content_type()
            ),
            Err(err) => {
                failed += 1;
                tracing::error!(
                    "upload of {} failed: {}",
                    path.display(),
                    DisplayErrorContext(&err)
                );
            }
        }
    }

    println!("finished in {:?}; {failed} failed", start.elapsed());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    if let Err(ref err) = do_upload(args).await {
        tracing::error!("upload failed: {}", DisplayErrorContext(err.as_ref()));
    }

    Ok(())
}
