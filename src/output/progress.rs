use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::dashboard::LoadingStatus;

use super::styling::{bright, bright_green, bright_yellow};

/// Spinner on stderr that follows the loading status of a run.
pub struct PhaseProgress {
    pb: Option<ProgressBar>,
    current: Option<LoadingStatus>,
}

impl PhaseProgress {
    pub fn new() -> Self {
        eprintln!("{}  {}", bright("⚙️"), bright("Loading").underlined());
        Self {
            pb: None,
            current: None,
        }
    }

    /// Finishes the spinner of the previous stage and starts the next one.
    ///
    /// Statuses that do not move forward are ignored.
    pub fn advance(&mut self, status: LoadingStatus) {
        if self.current.is_some_and(|current| current >= status) {
            return;
        }

        if let (Some(pb), Some(previous)) = (self.pb.take(), self.current) {
            pb.finish_with_message(bright_green(finished_message(previous)).to_string());
        }

        self.current = Some(status);
        self.pb = running_message(status)
            .map(|message| create_spinner(bright_yellow(message).to_string()));

        if status == LoadingStatus::Done {
            eprintln!();
        }
    }
}

fn running_message(status: LoadingStatus) -> Option<&'static str> {
    match status {
        LoadingStatus::Projects => Some("Phase 1/3: Loading projects"),
        LoadingStatus::Environments => Some("Phase 2/3: Loading environments"),
        LoadingStatus::Deployments => Some("Phase 3/3: Loading deployments"),
        LoadingStatus::Done => None,
    }
}

fn finished_message(status: LoadingStatus) -> &'static str {
    match status {
        LoadingStatus::Projects => "Phase 1/3: Loaded projects ✓",
        LoadingStatus::Environments => "Phase 2/3: Loaded environments ✓",
        LoadingStatus::Deployments => "Phase 3/3: Loaded deployments ✓",
        LoadingStatus::Done => "Done ✓",
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {msg} {spinner}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
