use std::io::{stderr, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar on stderr, or `None` when stderr is not a terminal (tests,
/// pipes, log collectors).
pub fn progress_bar(len: u64, msg: String) -> Option<ProgressBar> {
    if !stderr().is_terminal() {
        return None;
    }

    let bar = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
    {
        bar.set_style(style.progress_chars("##-"));
    }
    bar.set_message(msg);

    Some(bar)
}
