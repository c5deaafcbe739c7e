//! Progress reporting on stderr. Without the `progress` feature every
//! handle is inert.

use std::borrow::Cow;

/// A spinner or bar, or nothing at all
pub struct Progress {
    #[cfg(feature = "progress")]
    bar: Option<indicatif::ProgressBar>,
}

#[cfg(feature = "progress")]
mod styles {
    use std::time::Duration;

    pub const SPINNER: &str = "{spinner:.cyan} {msg}";
    pub const BAR: &str =
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";
    pub const BAR_CHARS: &str = "█▓▒░  ";
    pub const TICK: Duration = Duration::from_millis(80);
}

#[cfg(feature = "progress")]
impl Progress {
    /// A handle that draws nothing
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// An indeterminate spinner with a message
    pub fn spinner(message: impl Into<Cow<'static, str>>) -> Self {
        use indicatif::{ProgressBar, ProgressStyle};

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(styles::SPINNER) {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(styles::TICK);
        Self { bar: Some(spinner) }
    }

    /// A bar counting up to `len`
    pub fn bar(len: u64, message: impl Into<Cow<'static, str>>) -> Self {
        use indicatif::{ProgressBar, ProgressStyle};

        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar().template(styles::BAR) {
            bar.set_style(style.progress_chars(styles::BAR_CHARS));
        }
        bar.set_message(message);
        Self { bar: Some(bar) }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    /// Stop and leave `message` on screen
    pub fn finish(&self, message: impl Into<Cow<'static, str>>) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message);
        }
    }

    /// Stop and erase
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(not(feature = "progress"))]
impl Progress {
    pub fn hidden() -> Self {
        Self {}
    }

    pub fn spinner(_message: impl Into<Cow<'static, str>>) -> Self {
        Self::hidden()
    }

    pub fn bar(_len: u64, _message: impl Into<Cow<'static, str>>) -> Self {
        Self::hidden()
    }

    pub fn inc(&self, _delta: u64) {}

    pub fn finish(&self, _message: impl Into<Cow<'static, str>>) {}

    pub fn clear(&self) {}
}
