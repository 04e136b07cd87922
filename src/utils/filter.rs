//! Line filters over captured tool output.

use regex::Regex;

/// Lines of `text` containing `fragment`, compared case-insensitively.
pub fn lines_containing<'a>(text: &'a str, fragment: &str) -> impl Iterator<Item = &'a str> {
    let needle = fragment.to_lowercase();
    text.lines().filter(move |line| line.to_lowercase().contains(&needle))
}

/// Matching lines of `text` with `context` lines before and after each.
///
/// Overlapping or touching windows are merged; disjoint groups are separated
/// by a `--` line. Returns `None` when nothing matches.
pub fn grep_context(text: &str, pattern: &Regex, context: usize) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<&str> = Vec::new();
    let mut last: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        if !pattern.is_match(line) {
            continue;
        }
        let start = i.saturating_sub(context);
        let end = (i + context).min(lines.len() - 1);
        // Skip lines already emitted by the previous window
        let from = match last {
            Some(prev) if prev + 1 >= start => prev + 1,
            Some(_) => {
                out.push("--");
                start
            }
            None => start,
        };
        if from <= end {
            out.extend_from_slice(&lines[from..=end]);
        }
        last = Some(last.map_or(end, |prev| prev.max(end)));
    }

    if out.is_empty() {
        None
    } else {
        Some(out.join("\n"))
    }
}
