//! Submission receipt dialog

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::submit::SubmitReceipt;
use ratatui::{style::Color, Frame};
use std::path::is_separator;

const MAX_WIDTH: u16 = 72;
/// Text columns inside the dialog border and padding
const TEXT_WIDTH: usize = MAX_WIDTH as usize - 4;

/// Split a path after separators so every piece fits on one dialog line
fn break_path(path: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for part in path.split_inclusive(is_separator) {
        if !current.is_empty() && current.chars().count() + part.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        for c in part.chars() {
            if current.chars().count() == width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
    }
    lines.push(current);
    lines
}

pub fn receipt_message(receipt: &SubmitReceipt) -> String {
    let mut message = format!(
        "Thank you for your submission.\n\nForm: {}\nId: {}\nAt: {}",
        receipt.form,
        receipt.id,
        receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    if let Some(path) = &receipt.location {
        message.push_str("\nSaved to:");
        for line in break_path(&path.display().to_string(), TEXT_WIDTH) {
            message.push('\n');
            message.push_str(&line);
        }
    }
    message
}

/// Render the receipt of the last submission
pub fn render_receipt_dialog(frame: &mut Frame, receipt: &SubmitReceipt) {
    let message = receipt_message(receipt);
    render_dialog(
        frame,
        DialogConfig {
            title: "Submitted",
            color: Color::Green,
            message: &message,
            hint: key_hint(&[("Enter", "new form"), ("y", "copy JSON"), ("Esc", "quit")]),
            max_width: MAX_WIDTH,
        },
    );
}
