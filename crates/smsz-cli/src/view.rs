//! Plain-text rendering of session state.

use smsz_session::{RatioAnimator, SessionState};
use std::io::Write;

pub const HELP: &str = "\
Type a message to set the input, then:
  :c  compress     :d  decompress
  :s  status       :q  quit";

pub fn outcome_lines(state: &SessionState) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(outcome) = state.outcome.as_deref() else {
        lines.push("No compression yet.".to_string());
        return lines;
    };
    lines.push(format!("Compressed Output: {}", outcome.display_text()));
    if let Some(stats) = outcome.stats() {
        lines.push(format!("Compression completed in {} ms", stats.elapsed_ms));
        lines.push(format!(
            "Original Size: {} bytes, Compressed Size: {} bytes",
            stats.original_size, stats.compressed_size
        ));
    }
    lines
}

pub fn status_lines(state: &SessionState) -> Vec<String> {
    let mut lines = vec![
        format!("Phase: {}", state.phase()),
        format!("Input: {:?}", state.input_text),
    ];
    lines.extend(outcome_lines(state));
    if !state.decompressed_text.is_empty() {
        lines.push(format!("Decompressed Text: {}", state.decompressed_text));
    }
    lines
}

/// Follow the count-up until it settles, redrawing one line.
pub async fn follow_ratio(animator: &RatioAnimator) {
    let mut frames = animator.subscribe();
    loop {
        let frame = *frames.borrow_and_update();
        draw_ratio(frame.value);
        if frame.is_settled() || frames.changed().await.is_err() {
            break;
        }
    }
    println!();
}

fn draw_ratio(value: f64) {
    print!("\rCompression: {:>6.1}%", value);
    let _ = std::io::stdout().flush();
}
