#[derive(clap::ValueEnum, Debug, Clone)]
pub enum ProgressOption {
    On,
    Off,
    /// Enable if stdout/stderr are a terminal
    Auto,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ArgProgress {
    /// Display transfer progress
    #[cfg(feature = "progress")]
    #[clap(long, short='p', value_enum, default_value="auto")]
    progress: ProgressOption,
}

#[derive(Debug)]
pub enum Update {
    State(&'static str),
    StateLength(usize),
    StateProgress(usize),
    Finished(),
    Error(String),
}

fn stderr_println(prefix: &impl std::fmt::Display, args: std::fmt::Arguments) {
    eprintln!("{prefix}{args}");
}

/// Use only if no Output extant
pub fn println_error(args: std::fmt::Arguments) {
    stderr_println(&PREFIX_ERROR, args)
}

#[cfg(feature = "progress")]
mod progress_enabled {
    use std::sync::Arc;
    use super::*;
    pub type ProgressFn = Arc<dyn Fn(Update) + Send + Sync + 'static>;

    pub const PREFIX_ERROR: console::Emoji = console::Emoji("❌ ", "");
    pub const PREFIX_DONE: console::Emoji = console::Emoji("✅ ", "");

    pub struct Output {
        enabled: bool,
        multi: indicatif::MultiProgress,
    }
    impl Output {
        pub fn new(args: &ArgProgress) -> Output {
            let draw_target = indicatif::ProgressDrawTarget::stderr_with_hz(6);
            let enabled = match args.progress {
                ProgressOption::On => true,
                ProgressOption::Off => false,
                ProgressOption::Auto => console::user_attended() && console::user_attended_stderr(),
            };
            Output {
                enabled: enabled && !draw_target.is_hidden(),
                multi: indicatif::MultiProgress::with_draw_target(draw_target),
            }
        }
        #[cfg(test)]
        pub fn hidden() -> Output {
            Output {
                enabled: false,
                multi: indicatif::MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden()),
            }
        }
        pub fn progress_enabled(&self) -> bool {
            self.enabled
        }
        pub fn add(&self, initial_state: impl Into<String>, name: String) -> ProgressFn {
            if !self.enabled {
                return Arc::new(|_update: Update| {});
            }

            let bar = indicatif::ProgressBar::new(1)
                .with_message(initial_state.into())
                .with_prefix(name);
            if let Ok(style) = indicatif::ProgressStyle::with_template("{prefix:20.dim} {msg:>11.bold} {bytes:>10.cyan}/{total_bytes:>10.italic.250} {binary_bytes_per_sec:>11} {elapsed:>4} [{wide_bar:.red/blue}]") {
                bar.set_style(style.progress_chars("#>-"));
            }

            let bar = self.multi.add(bar);

            Arc::new(move |update: Update| {
                match update {
                    Update::State(state_name) => bar.set_message(state_name),
                    Update::StateLength(total) => bar.set_length(total as u64),
                    Update::StateProgress(inc_completed) => bar.inc(inc_completed as u64),
                    Update::Finished() => bar.finish_with_message("done"),
                    Update::Error(err) => bar.abandon_with_message(format!("{PREFIX_ERROR}failed: {err}")),
                }
            })
        }
        pub fn println(&self, prefix: &impl std::fmt::Display, args: std::fmt::Arguments) {
            if !self.enabled || self.multi.println(format!("{prefix}{args}")).is_err() {
                stderr_println(prefix, args);
            }
        }
        pub fn println_done(&self, args: std::fmt::Arguments) {
            self.println(&PREFIX_DONE, args);
        }
    }
}

#[cfg(feature = "progress")]
pub use progress_enabled::*;

#[cfg(not(feature = "progress"))]
mod progress_disabled {
    use super::*;
    pub fn empty_progress_fn(_update: Update) { }
    pub type ProgressFn = fn(Update);

    pub const PREFIX_ERROR: &'static str = "❌ ";
    pub const PREFIX_DONE: &'static str = "✅ ";

    #[derive(Default)]
    pub struct Output {
    }
    impl Output {
        pub fn new(_args: &ArgProgress) -> Output {
            Output { }
        }
        #[cfg(test)]
        pub fn hidden() -> Output {
            Output { }
        }
        pub fn progress_enabled(&self) -> bool {
            false
        }
        pub fn add(&self, _initial_state: impl Into<String>, _name: String) -> ProgressFn {
            empty_progress_fn
        }
        pub fn println_done(&self, args: std::fmt::Arguments) {
            stderr_println(&PREFIX_DONE, args);
        }
    }
}

#[cfg(not(feature = "progress"))]
pub use progress_disabled::*;
