#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 5;
const GAP: &str = "  ";

/// Render rows as an aligned plain-text table.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|value| display_len(value))
                .chain(std::iter::once(display_len(header)))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    if let Some(max_width) = options.max_width {
        shrink(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let divider = "-".repeat(display_len(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let clipped = clip(value, *width);
                let padded = pad(&clipped, *width, is_numeric(&clipped));
                if options.color {
                    paint(&clipped, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Narrow the widest column one step at a time until the table fits.
fn shrink(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > display_len(headers[*index]).max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn display_len(value: &str) -> usize {
    value.chars().count()
}

fn clip(value: &str, width: usize) -> String {
    if display_len(value) <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_len(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}

/// Color selection tiers and submission outcomes; padding stays outside the
/// escape codes so alignment is preserved.
fn paint(plain: &str, padded: String) -> String {
    let code = match plain {
        "priority" | "submitted" | "true" => "32",
        "fallback" | "skipped" => "33",
        "false" => "31",
        _ => return padded,
    };
    padded.replacen(plain, &format!("\u{1b}[{code}m{plain}\u{1b}[0m"), 1)
}
