use indicatif::ProgressBar;
use std::sync::Mutex;
use tokio::sync::watch;

pub fn progress_bar(len: u64, message: String) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap()
            .progress_chars("##-")
    );
    bar.set_message(message);

    bar
}

/// Shared progress counter for one recommendation run.
///
/// Increments arrive from many concurrent tasks; they are serialized behind
/// a mutex and published over a watch channel as monotonically increasing
/// values in `[0, 1]`.
pub struct ProgressReporter {
    total: Mutex<f64>,
    sender: watch::Sender<f64>
}

impl ProgressReporter {
    pub fn new() -> ProgressReporter {
        let (sender, _) = watch::channel(0.0);

        ProgressReporter {
            total: Mutex::new(0.0),
            sender
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.sender.subscribe()
    }

    /// Resets the counter to zero at the start of a run.
    pub fn reset(&self) {
        let mut total = self.total.lock().expect("progress mutex poisoned");
        *total = 0.0;
        let _ = self.sender.send(*total);
    }

    /// Adds `delta` to the running total, clamped to 1.0.
    pub fn add(&self, delta: f64) {
        let mut total = self.total.lock().expect("progress mutex poisoned");
        *total = (*total + delta).min(1.0);
        let _ = self.sender.send(*total);
    }

    /// Drives the counter to exactly 1.0 when a run completes.
    pub fn finish(&self) {
        let mut total = self.total.lock().expect("progress mutex poisoned");
        *total = 1.0;
        let _ = self.sender.send(*total);
    }

    pub fn current(&self) -> f64 {
        *self.total.lock().expect("progress mutex poisoned")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
