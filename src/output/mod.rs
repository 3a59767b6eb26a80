mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::PhaseProgress;
pub use styling::{dim, magenta_bold};
pub use summary::{print_dashboard, render_dashboard};

/// Prints the deploydash banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🚀 deploydash"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("GitLab Deployment Dashboard")
    );
}
