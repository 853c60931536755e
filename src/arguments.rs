use clap::Parser;

use crate::shared_options::SharedOptions;
use crate::credentials::Keys;
use crate::{cli, s3, transfer};

pub(crate) fn clap3_help_style() -> clap::builder::Styles {
    use clap::builder::styling::AnsiColor;
    clap::builder::Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, styles = clap3_help_style())]
pub(crate) struct Arguments {
    /// The path of the file to be uploaded
    #[clap(long, short='u', conflicts_with = "download", requires = "filepath", value_hint=clap::ValueHint::FilePath)]
    pub upload: Option<std::path::PathBuf>,

    /// The bucket containing the file to download
    #[clap(long, short='d', requires = "filepath")]
    pub download: Option<String>,

    /// List all buckets
    #[clap(long, short='b')]
    pub blist: bool,

    /// The bucket to list objects of
    #[clap(long, short='o')]
    pub olist: Option<String>,

    /// Destination bucket when uploading, object name when downloading
    #[clap(long, short='f')]
    pub filepath: Option<String>,

    /// Directory to place downloaded files in
    #[clap(long, short='l', value_hint=clap::ValueHint::DirPath)]
    pub location: Option<std::path::PathBuf>,

    /// The path of your credentials file
    #[clap(long, short='k', value_hint=clap::ValueHint::FilePath)]
    pub keys: std::path::PathBuf,

    /// Object name for the upload, defaults to the local path
    #[clap(long, requires = "upload")]
    pub key: Option<String>,

    /// Follow continuation tokens when listing objects
    #[clap(long, short='a', requires = "olist")]
    pub all_pages: bool,

    /// Exit with a failure status if any operation failed
    #[clap(long)]
    pub fail_on_error: bool,

    #[clap(long, short='R')]
    pub region: Option<String>,

    #[clap(long, short='e')]
    /// Use custom endpoint URL for other S3 implementations
    pub endpoint: Option<http::uri::Uri>,

    #[clap(flatten)]
    pub transfer: transfer::OptionsTransfer,

    #[clap(flatten)]
    pub shared: SharedOptions,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MainResult {
    Success,
    ErrorArguments,
    ErrorSomeOperationsFailed,
}

impl MainResult {
    /// Operation failures only affect the exit status when `fail_on_error`
    pub fn from_error_count(count: u32, fail_on_error: bool) -> MainResult {
        match count {
            0 => MainResult::Success,
            _ if fail_on_error => MainResult::ErrorSomeOperationsFailed,
            _ => MainResult::Success,
        }
    }
}

impl std::process::Termination for MainResult {
    fn report(self) -> std::process::ExitCode {
        match self {
            Self::Success => std::process::ExitCode::SUCCESS,
            Self::ErrorArguments => std::process::ExitCode::from(1),
            Self::ErrorSomeOperationsFailed => std::process::ExitCode::from(2),
        }
    }
}

impl Arguments {
    /// Credentials errors end the run before any request is made
    pub(crate) fn load_keys(&self) -> Result<Option<Keys>, MainResult> {
        Keys::load(Some(self.keys.as_path())).map_err(|e| {
            cli::println_error(format_args!("{e}"));
            MainResult::ErrorArguments
        })
    }

    /// Run every requested operation in order, returning how many failed
    pub(crate) async fn run(&self, client: &s3::Client, out: &mut impl std::io::Write) -> u32 {
        let mut error_count = 0;
        let filepath = self.filepath.as_deref().unwrap_or_default();

        if let Some(local_path) = &self.upload {
            if transfer::upload(local_path, filepath, self.key.as_deref(), client, &self.shared, &self.transfer).await.is_err() {
                error_count += 1;
            }
        }
        if let Some(bucket) = &self.download {
            if transfer::download(bucket, filepath, self.location.as_deref(), client, &self.shared, &self.transfer).await.is_err() {
                error_count += 1;
            }
        }
        if self.blist {
            match client.list_buckets().await {
                Ok(buckets) => print_listing(out, "Existing buckets:", &buckets),
                Err(e) => {
                    tracing::error!(code = e.code(), "failed to list buckets: {e}");
                    error_count += 1;
                },
            }
        }
        if let Some(bucket) = &self.olist {
            match client.list_objects(bucket, self.all_pages).await {
                Ok(keys) => print_listing(out, &format!("Existing objects in {bucket}:"), &keys),
                Err(e) => {
                    tracing::error!(bucket, code = e.code(), "failed to list objects: {e}");
                    error_count += 1;
                },
            }
        }
        error_count
    }
}

fn print_listing(out: &mut impl std::io::Write, header: &str, names: &[String]) {
    let written = write_listing(out, header, names);
    if let Err(e) = written {
        tracing::warn!("writing listing: {e}");
    }
}

fn write_listing(out: &mut impl std::io::Write, header: &str, names: &[String]) -> std::io::Result<()> {
    writeln!(out, "{header}")?;
    for name in names {
        writeln!(out, "  {name}")?;
    }
    out.flush()
}
