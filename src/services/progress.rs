use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{percent:>3}% |{wide_bar}| {pos}/{len} ETA {eta}";

/// Progress bar on stderr; indicatif hides it when stderr is not a terminal.
pub fn working_on(label: &str) -> ProgressBar {
    println!("Working on '{}'..", label);
    let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        bar.set_style(style);
    }
    bar
}
