use indicatif::{ProgressBar, ProgressStyle};

/// True when OPERON_SILENT is set to anything but "0"/"false"
pub fn is_silent() -> bool {
    std::env::var("OPERON_SILENT")
        .map(|v| !matches!(v.as_str(), "" | "0" | "false"))
        .unwrap_or(false)
}

/// Bar over `len` items; hidden when output is silenced
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    if is_silent() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb.set_message(message.to_string());
    pb
}
