use clap::Args;

#[derive(Args, Debug, Default)]
pub struct SharedOptions {
    /// Log request details and report each success
    #[clap(long, short='v', global = true)]
    pub verbose: bool,
}
