use records_core::{AppViewModel, FetchControlView, FetchStatus, RecordListView};

use super::constants::{EMPTY_LIST_TEXT, HELP_TEXT};

/// Renders the fetch control followed by the record list.
pub fn render(view: &AppViewModel, refreshed_at: Option<&str>) -> Vec<String> {
    let mut lines = vec![render_control(&view.control, refreshed_at)];
    lines.extend(render_list(&view.list));
    lines
}

fn render_control(control: &FetchControlView, refreshed_at: Option<&str>) -> String {
    let status = match &control.status {
        FetchStatus::Idle => HELP_TEXT.to_string(),
        FetchStatus::Loading => "Loading...".to_string(),
        FetchStatus::Loaded { count } => {
            let noun = if *count == 1 { "record" } else { "records" };
            match refreshed_at {
                Some(at) => format!("{count} {noun} (refreshed {at})"),
                None => format!("{count} {noun}"),
            }
        }
        FetchStatus::Failed { message } => format!("Error: {message}"),
    };
    format!("[{}] {}", control.label, status)
}

fn render_list(list: &RecordListView) -> Vec<String> {
    if list.rows.is_empty() {
        return vec![format!("  {EMPTY_LIST_TEXT}")];
    }
    let id_width = list.rows.iter().map(|row| row.id.len()).max().unwrap_or(0);
    list.rows
        .iter()
        .map(|row| format!("  {:>width$}  {}", row.id, row.name, width = id_width))
        .collect()
}
