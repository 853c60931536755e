mod arguments;
mod cli;
mod credentials;
mod s3;
mod shared_options;
mod transfer;

use clap::Parser;

use arguments::{Arguments, MainResult};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "ks3=debug" } else { "ks3=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> MainResult {
    let args = Arguments::parse();
    init_logging(args.shared.verbose);

    let keys = match args.load_keys() {
        Ok(keys) => keys,
        Err(result) => return result,
    };

    let client = s3::init(keys, args.region.clone(), args.endpoint.as_ref()).await;

    let error_count = args.run(&client, &mut std::io::stdout().lock()).await;
    MainResult::from_error_count(error_count, args.fail_on_error)
}
