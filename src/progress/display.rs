//! Progress bar display management for one ranged download.
//!
//! [`ProgressDisplay`] owns a main bar sized to the whole resource and hands
//! out one child bar per range. Bytes received for a range advance both.

use crate::download::ByteRange;
use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Progress display manager that coordinates the main and per-range bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: MultiProgress,
    /// The main progress bar, in bytes of the whole resource.
    main: ProgressBar,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

/// Progress handle for a single range.
#[derive(Clone)]
pub struct RangeProgress {
    main: ProgressBar,
    child: ProgressBar,
}

impl RangeProgress {
    /// A handle that reports nowhere.
    pub fn hidden() -> Self {
        Self {
            main: ProgressBar::hidden(),
            child: ProgressBar::hidden(),
        }
    }

    /// Record `bytes` more bytes for the range.
    pub fn inc(&self, bytes: u64) {
        self.child.inc(bytes);
        self.main.inc(bytes);
    }
}

impl ProgressDisplay {
    /// Create a new progress display for a resource of `total_size` bytes.
    pub fn new(style_options: StyleOptions, total_size: u64) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = multi.add(style_options.main().clone().to_progress_bar(total_size));
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Create the progress handle of a range.
    pub fn create_range_progress(&self, range: &ByteRange) -> RangeProgress {
        let child = self
            .multi
            .add(self.style_options.child().clone().to_progress_bar(range.len()));
        child.set_message(format!("part {}", range.index));
        RangeProgress {
            main: self.main.clone(),
            child,
        }
    }

    /// Finish a range bar based on configuration.
    pub fn finish_range(&self, progress: &RangeProgress) {
        if self.style_options.child().clear {
            progress.child.finish_and_clear();
        } else {
            progress.child.finish();
        }
    }

    /// Label the main bar, usually with the file name.
    pub fn set_message(&self, message: impl Into<std::borrow::Cow<'static, str>>) {
        self.main.set_message(message);
    }

    /// Message currently shown on the main bar.
    pub fn message(&self) -> String {
        self.main.message()
    }

    /// Position of the main bar, in bytes.
    pub fn position(&self) -> u64 {
        self.main.position()
    }

    /// Finish the progress display, clearing or keeping bars based on configuration.
    pub fn finish(self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    /// Abandon the progress display after a failure.
    pub fn abandon(self, message: impl Into<std::borrow::Cow<'static, str>>) {
        self.main.abandon_with_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::range::plan;
    use crate::progress::ProgressBarOpts;

    #[test]
    fn test_range_progress_advances_main() {
        let style = StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
        let display = ProgressDisplay::new(style, 10);
        let plan = plan(10, 2).unwrap();

        let first = display.create_range_progress(&plan.ranges()[0]);
        let second = display.create_range_progress(&plan.ranges()[1]);
        first.inc(5);
        second.inc(3);

        assert_eq!(display.position(), 8);
        display.set_message("setup.exe");
        assert_eq!(display.message(), "setup.exe");
        display.finish_range(&first);
        display.finish();
    }
}
