use std::path::{Path, PathBuf};

use crate::s3;
use crate::cli;
use crate::shared_options::SharedOptions;

#[derive(clap::Args, Debug, Clone)]
pub struct OptionsTransfer {
    #[clap(flatten)]
    progress: cli::ArgProgress,
}

fn display_name(name: &str) -> String {
    s3::filename(name).unwrap_or(name).to_owned()
}

pub async fn upload(local_path: &Path, bucket: &str, object_name: Option<&str>, client: &s3::Client, opts: &SharedOptions, transfer: &OptionsTransfer) -> Result<String, s3::Error> {
    let progress = cli::Output::new(&transfer.progress);
    let update_fn = progress.add("initialising", display_name(&local_path.to_string_lossy()));

    match client.put(local_path, bucket, object_name, update_fn.clone()).await {
        Ok(key) => {
            tracing::debug!(bucket, key = %key, "upload complete");
            if opts.verbose && !progress.progress_enabled() {
                progress.println_done(format_args!("uploaded {} to s3://{bucket}/{key}", local_path.display()));
            }
            Ok(key)
        },
        Err(e) => {
            update_fn(cli::Update::Error(e.to_string()));
            tracing::error!(path = %local_path.display(), bucket, code = e.code(), "upload failed: {e}");
            Err(e)
        },
    }
}

pub async fn download(bucket: &str, object_name: &str, directory: Option<&Path>, client: &s3::Client, opts: &SharedOptions, transfer: &OptionsTransfer) -> Result<PathBuf, s3::Error> {
    let progress = cli::Output::new(&transfer.progress);
    let update_fn = progress.add("initialising", display_name(object_name));

    match client.get(bucket, object_name, directory, update_fn.clone()).await {
        Ok(path) => {
            tracing::debug!(bucket, key = object_name, path = %path.display(), "download complete");
            if opts.verbose && !progress.progress_enabled() {
                progress.println_done(format_args!("downloaded s3://{bucket}/{object_name} to {}", path.display()));
            }
            Ok(path)
        },
        Err(e) => {
            update_fn(cli::Update::Error(e.to_string()));
            tracing::error!(bucket, key = object_name, code = e.code(), "download failed: {e}");
            Err(e)
        },
    }
}
