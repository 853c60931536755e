use std::path::{Path, PathBuf};

use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_types::region::Region;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::cli;
use crate::credentials::Keys;

mod key;
mod partial_file;
#[cfg(test)]
pub(crate) mod test_support;

pub use key::filename;
use partial_file::PartialFile;

const DEFAULT_REGION: &str = "eu-west-1";

#[derive(Clone, Debug)]
pub struct Client {
    client: aws_sdk_s3::Client,
}

/// Build the client handle; `None` keys give an unsigned, anonymous client
pub async fn init(keys: Option<Keys>, region: Option<String>, endpoint: Option<&http::uri::Uri>) -> Client {
    let provided_region = region.map(Region::new);
    let region_provider = RegionProviderChain::first_try(provided_region)
        .or_default_provider()
        .or_else(DEFAULT_REGION);
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .retry_config(RetryConfig::disabled());
    loader = match keys {
        Some(keys) => loader.credentials_provider(Credentials::new(keys.access_key_id, keys.secret_key, None, None, "keys-file")),
        None => loader.no_credentials(),
    };
    if let Some(endpoint) = endpoint {
        loader = loader.endpoint_url(endpoint.to_string());
    }
    let config = loader.load().await;
    // Custom endpoints rarely support virtual-hosted buckets
    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .force_path_style(endpoint.is_some())
        .build();
    Client::from_conf(s3_config)
}

#[derive (thiserror::Error, Debug)]
pub enum Error {
    #[error("S3: {}", aws_sdk_s3::error::DisplayErrorContext(.source))]
    S3 {
        #[from]
        source: aws_sdk_s3::Error,
    },
    #[error("accessing local file: {}", .0)]
    File(#[from] std::io::Error),
    #[error("streaming body: {}", .0)]
    Body(#[from] aws_smithy_types::byte_stream::error::Error),
    #[error("no filename in object key")]
    NoFilename,
    #[error("specified local filename not unicode")]
    LocalFilenameNotUnicode,
}

impl Error {
    /// Service error code, e.g. `AccessDenied`
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::S3 { source } => source.code(),
            _ => None,
        }
    }
}

impl Client {
    pub fn from_conf(config: aws_sdk_s3::Config) -> Client {
        Client {
            client: aws_sdk_s3::Client::from_conf(config),
        }
    }

    /// Upload `path` to `bucket`, returning the object key written
    pub async fn put(&self, path: &Path, bucket: &str, object_name: Option<&str>, update: cli::ProgressFn) -> Result<String, Error> {
        let key = match object_name {
            Some(name) => name.to_owned(),
            None => key::from_local_path(path)?,
        };
        let stream = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::File(std::io::Error::other(e)))?;
        let (_, size_hint) = stream.size_hint();
        if let Some(size) = size_hint {
            update(cli::Update::StateLength(size as usize));
        }
        tracing::debug!(path = %path.display(), bucket, key = %key, size = ?size_hint, "uploading");
        update(cli::Update::State("uploading"));
        self.client.put_object()
            .bucket(bucket)
            .key(&key)
            .body(stream)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;
        if let Some(size) = size_hint {
            update(cli::Update::StateProgress(size as usize));
        }
        update(cli::Update::Finished());
        Ok(key)
    }

    /// Download `object_name` into `directory` (default: working directory),
    /// returning the local path written
    pub async fn get(&self, bucket: &str, object_name: &str, directory: Option<&Path>, update: cli::ProgressFn) -> Result<PathBuf, Error> {
        let target = key::download_target(directory, object_name)?;
        update(cli::Update::State("requesting"));
        let mut response = self.client.get_object()
            .bucket(bucket)
            .key(object_name)
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;
        if let Some(length) = response.content_length() {
            update(cli::Update::StateLength(length.max(0) as usize));
        }

        let mut file = PartialFile::new(target).await?;
        tracing::debug!(bucket, key = object_name, path = %file.path_printable(), "downloading");
        update(cli::Update::State("downloading"));
        match write_body(&mut response.body, &mut file.writer, &update).await {
            Ok(()) => {
                let path = file.finished().await?;
                update(cli::Update::Finished());
                Ok(path)
            },
            Err(e) => {
                if let Err(remove_err) = file.cancelled().await {
                    tracing::warn!("failed to remove incomplete download: {remove_err}");
                }
                Err(e)
            },
        }
    }

    /// Names of all buckets owned by the authenticated identity, in service order
    pub async fn list_buckets(&self) -> Result<Vec<String>, Error> {
        let response = self.client.list_buckets()
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;
        Ok(response.buckets()
            .iter()
            .filter_map(|bucket| bucket.name())
            .map(str::to_owned)
            .collect())
    }

    /// Object keys in `bucket`; only the first page unless `all_pages`
    pub async fn list_objects(&self, bucket: &str, all_pages: bool) -> Result<Vec<String>, Error> {
        let request = self.client.list_objects_v2().bucket(bucket);
        if !all_pages {
            let page = request.send()
                .await
                .map_err(aws_sdk_s3::Error::from)?;
            if page.is_truncated() == Some(true) {
                tracing::info!(bucket, "listing truncated to first page, use --all-pages for the rest");
            }
            return Ok(object_keys(&page));
        }

        let mut pages = request.into_paginator().send();
        let mut keys = vec![];
        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_s3::Error::from)?;
            keys.extend(object_keys(&page));
        }
        Ok(keys)
    }
}

fn object_keys(page: &aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output) -> Vec<String> {
    page.contents()
        .iter()
        .filter_map(|object| object.key())
        .map(str::to_owned)
        .collect()
}

async fn write_body(body: &mut ByteStream, writer: &mut (impl AsyncWrite + Unpin), update: &cli::ProgressFn) -> Result<(), Error> {
    while let Some(bytes) = body.try_next().await? {
        writer.write_all(&bytes).await?;
        update(cli::Update::StateProgress(bytes.len()));
    }
    writer.flush().await?;
    Ok(())
}
