//! Terminal UI pieces for chatdoc-rs
//!
//! The renderer draws conversations, the form gates QA submissions, and the
//! spinner marks a pending remote call.

pub mod form;
pub mod render;

pub use form::QaForm;
pub use render::{MessageStyle, RenderedMessage, draw, render_transcript};

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Await `future` while a spinner with `message` ticks on stderr
pub async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}
