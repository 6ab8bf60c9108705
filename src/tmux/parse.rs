//! Line-oriented parsing of tmux `-F` output.

/// Split tmux output into lines, dropping the single trailing empty element
/// left by the final newline.
pub fn split_output_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Trim the `session:index` locator printed by `new-window -P`.
pub fn parse_window_locator(output: &str) -> Option<String> {
    let locator = output.lines().next()?.trim();
    if locator.is_empty() {
        None
    } else {
        Some(locator.to_string())
    }
}
