//! Terminal rendering helpers: aligned tables, the pagination strip, and
//! the position line shared by every list command.

use ongoctl_core::{PageLink, PageMeta};

/// Print rows as a left-aligned table with a header rule.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{header_line}");
    println!("{}", "-".repeat(header_line.chars().count()));

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{line}");
    }
}

/// Print the position line and the pagination strip.
///
/// Directional sentinels render as `<`/`>`, numbers as themselves; the
/// current page is bracketed and disabled links are parenthesized. URLs
/// for enabled links are listed so they can be fed back via `--page`.
pub fn print_pagination(meta: Option<&PageMeta>, links: &[PageLink]) {
    if let Some(meta) = meta {
        println!();
        println!(
            "page {}/{}, showing {}-{} of {}",
            meta.current_page, meta.last_page, meta.from, meta.to, meta.total
        );
    }

    if links.is_empty() {
        return;
    }

    let strip = links
        .iter()
        .map(|link| {
            let label = link.display_label();
            if link.active {
                format!("[{label}]")
            } else if link.is_enabled() {
                label.to_string()
            } else {
                format!("({label})")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("pages: {strip}");

    for link in links.iter().filter(|l| l.is_enabled() && !l.active) {
        if let Some(url) = &link.url {
            println!("  {:>2}  --page '{}'", link.display_label(), url);
        }
    }
}
