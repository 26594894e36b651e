//! Widgets for the course card and the report/login dialogs

pub mod course_card;
pub mod login_dialog;
pub mod modal_overlay;
pub mod report_dialog;

pub use course_card::CourseCard;
pub use login_dialog::LoginDialog;
pub use report_dialog::ReportDialog;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Spinner frame for a tick counter
pub(crate) fn spinner_frame(tick: u64) -> char {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Cut `text` to at most `max_width` display columns, marking the cut with '…'
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Keep the last `max_width` columns of `text`, so the cursor end stays visible
pub(crate) fn tail_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut kept: Vec<char> = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        kept.push(c);
        used += w;
    }
    kept.into_iter().rev().collect()
}
