//! Plain-text rendering of panel views. Pure string building so the binary
//! (and any other frontend) never reaches into the reconciler's records.

use crate::controller::PanelView;
use crate::reconcile::{DeleteAction, InstallableOption, InstalledRow, UpgradeStatus};

/// Megabyte formatting used across the panel ("12.50 MB").
pub fn format_mb(bytes: u64) -> String {
    format!("{:5.2} MB", bytes as f64 / 1.0e6)
}

/// One table row: name and stats, then the action cells.
pub fn render_row(row: &InstalledRow) -> String {
    let default_cell = if row.can_set_default {
        "[set as default]"
    } else {
        "(default)"
    };

    let upgrade_cell = match &row.upgrade {
        UpgradeStatus::Available {
            percent_translated_diff,
            subtitle_count_diff,
            zip_size,
        } => format!(
            "[upgrade] {:+}% translated, {:+} subtitles, {}",
            percent_translated_diff,
            subtitle_count_diff,
            format_mb(*zip_size).trim()
        ),
        UpgradeStatus::UpToDate => "up to date".to_string(),
        UpgradeStatus::Unknown => String::new(),
    };

    let delete_cell = match row.delete {
        DeleteAction::Full => "[delete]",
        DeleteAction::SubtitlesOnly => "[delete subtitles]",
        DeleteAction::None => "",
    };

    let mut line = format!(
        "{} ({}) — {} subtitles, {}% translated — {}",
        row.name, row.code, row.subtitle_count, row.percent_translated, default_cell
    );
    if !upgrade_cell.is_empty() {
        line.push_str(&format!(" — {}", upgrade_cell));
    }
    if !delete_cell.is_empty() {
        line.push_str(&format!(" — {}", delete_cell));
    }
    line
}

pub fn render_option(option: &InstallableOption) -> String {
    if option.beta {
        format!("{} ({}) [beta]", option.name, option.code)
    } else {
        format!("{} ({})", option.name, option.code)
    }
}

/// Full panel snapshot: installed table, installable dropdown, and the
/// details pane when a selection is active.
pub fn render_panel(view: &PanelView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Installed languages (as of {}):\n",
        view.refreshed_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if view.rows.is_empty() {
        out.push_str("  (no languages)\n");
    }
    for row in &view.rows {
        out.push_str(&format!("  {}\n", render_row(row)));
    }

    out.push_str("\nInstallable languages:\n");
    if view.options.is_empty() {
        out.push_str("  (none available)\n");
    }
    for option in &view.options {
        out.push_str(&format!("  {}\n", render_option(option)));
    }

    if let Some(details) = &view.details {
        out.push_str(&format!(
            "\nSelection: {} subtitles, {:5.2}% translated, {} download, {} on disk, {} exercises\n",
            details.subtitle_count,
            details.percent_translated,
            format_mb(details.zip_size).trim(),
            format_mb(details.package_size).trim(),
            details.num_exercises
        ));
    }

    if view.downloading {
        out.push_str("\nDownload in progress...\n");
    }

    out
}
