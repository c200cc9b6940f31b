// Stats extraction strategies: table layout and div-grid layout
// Author: kelexine (https://github.com/kelexine)

use super::{element_text, StatEntry, StatsStrategy};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("static selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static CAPTION: Lazy<Selector> = Lazy::new(|| Selector::parse("caption").expect("static selector"));
static CLASSED: Lazy<Selector> = Lazy::new(|| Selector::parse("[class]").expect("static selector"));

/// Numbers, ranks and percentages: `45.2`, `-3`, `1,204`, `87%`, `#12`.
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?[+-]?\d[\d.,]*%?$").expect("numeric pattern is valid"));

/// Inline markup allowed inside a grid label or value cell.
const INLINE_TAGS: &[&str] = &[
    "span", "b", "strong", "em", "i", "small", "sup", "sub", "a", "abbr",
];

/// Rows of label/value cells.
///
/// Tables tagged as stats (id, class, caption or a preceding heading
/// mentioning "stat") are tried before untagged ones; the first table that
/// yields rows is used. Two-column rows map directly to entries. Wider rows
/// under a header row produce one entry per column, labelled
/// `"<row label> <column header>"`. Blank labels and values are skipped.
pub struct TableStrategy;

impl StatsStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn extract(&self, document: &Html) -> Vec<StatEntry> {
        let (tagged, untagged): (Vec<_>, Vec<_>) =
            document.select(&TABLE).partition(|table| is_tagged_as_stats(table));

        tagged
            .into_iter()
            .chain(untagged)
            .map(|table| table_entries(&table))
            .find(|entries| !entries.is_empty())
            .unwrap_or_default()
    }
}

fn is_tagged_as_stats(table: &ElementRef<'_>) -> bool {
    let mentions_stats = |s: &str| s.to_ascii_lowercase().contains("stat");

    let element = table.value();
    if element.id().is_some_and(is_stat_token) || element.classes().any(is_stat_token) {
        return true;
    }
    if table
        .select(&CAPTION)
        .next()
        .is_some_and(|caption| mentions_stats(&element_text(&caption)))
    {
        return true;
    }

    table
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .is_some_and(|prev| {
            matches!(prev.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
                && mentions_stats(&element_text(&prev))
        })
}

fn table_entries(table: &ElementRef<'_>) -> Vec<StatEntry> {
    let mut header: Option<Vec<String>> = None;
    let mut entries = Vec::new();

    for row in table.select(&ROW) {
        let cells: Vec<ElementRef<'_>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .collect();

        if is_header_row(&row, &cells) {
            if header.is_none() {
                header = Some(cells.iter().map(element_text).collect());
            }
            continue;
        }
        if cells.len() < 2 {
            continue;
        }

        let label = element_text(&cells[0]);
        if label.is_empty() {
            continue;
        }
        let values: Vec<String> = cells[1..].iter().map(element_text).collect();

        match &header {
            Some(columns) if values.len() > 1 && columns.len() == cells.len() => {
                for (column, value) in columns[1..].iter().zip(values) {
                    if value.is_empty() {
                        continue;
                    }
                    let label = format!("{} {}", label, column).trim().to_string();
                    entries.push(StatEntry::new(label, value));
                }
            }
            _ => {
                // single value cell, or several joined when there's no header
                let value = values
                    .into_iter()
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
                    .join(" / ");
                if !value.is_empty() {
                    entries.push(StatEntry::new(label, value));
                }
            }
        }
    }

    entries
}

/// Rows inside `<thead>`, or rows made only of `<th>` cells.
fn is_header_row(row: &ElementRef<'_>, cells: &[ElementRef<'_>]) -> bool {
    let in_thead = row
        .parent()
        .and_then(|parent| parent.value().as_element().map(|e| e.name() == "thead"))
        .unwrap_or(false);

    in_thead || (!cells.is_empty() && cells.iter().all(|c| c.value().name() == "th"))
}

/// Sibling label/value elements inside a stats-classed container.
///
/// Matches any element with a `stat` or `stats` class token (`stat-card`,
/// `quick-stats`, but not `status`) and exactly two leaf children with text,
/// e.g.
/// `<div class="stat"><span>OPR</span><span>45.2</span></div>`.
/// Order comes from `label`/`value` class hints when present, otherwise a
/// numeric first child with a non-numeric second child is read as
/// value-then-label.
pub struct GridStrategy;

impl StatsStrategy for GridStrategy {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn extract(&self, document: &Html) -> Vec<StatEntry> {
        document
            .select(&CLASSED)
            .filter(|item| item.value().classes().any(is_stat_token))
            .filter_map(|item| grid_entry(&item))
            .collect()
    }
}

fn grid_entry(item: &ElementRef<'_>) -> Option<StatEntry> {
    let children: Vec<ElementRef<'_>> = item.children().filter_map(ElementRef::wrap).collect();
    let [first, second] = children.as_slice() else {
        return None;
    };
    if !is_leaf(first) || !is_leaf(second) || is_stat_pair(first) || is_stat_pair(second) {
        return None;
    }

    let first_text = element_text(first);
    let second_text = element_text(second);
    if first_text.is_empty() || second_text.is_empty() {
        return None;
    }

    let value_first = match (role_hint(first), role_hint(second)) {
        (Some(Role::Value), _) | (_, Some(Role::Label)) => true,
        (Some(Role::Label), _) | (_, Some(Role::Value)) => false,
        _ => NUMERIC.is_match(&first_text) && !NUMERIC.is_match(&second_text),
    };

    Some(if value_first {
        StatEntry::new(second_text, first_text)
    } else {
        StatEntry::new(first_text, second_text)
    })
}

fn is_leaf(element: &ElementRef<'_>) -> bool {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .all(|child| INLINE_TAGS.contains(&child.value().name()))
}

/// A nested stat item; its parent is a container, not a pair.
fn is_stat_pair(element: &ElementRef<'_>) -> bool {
    element.value().classes().any(is_stat_token)
        && element.children().filter_map(ElementRef::wrap).count() == 2
}

/// Class or id tokens like `stat`, `stats`, `stat-card` or `quick_stats`.
/// `status` and `static` don't count.
fn is_stat_token(token: &str) -> bool {
    token
        .split(|c: char| c == '-' || c == '_')
        .any(|part| part.eq_ignore_ascii_case("stat") || part.eq_ignore_ascii_case("stats"))
}

enum Role {
    Label,
    Value,
}

fn role_hint(element: &ElementRef<'_>) -> Option<Role> {
    element.value().classes().find_map(|class| {
        let class = class.to_ascii_lowercase();
        if class.contains("label") || class.contains("name") || class.contains("title") {
            Some(Role::Label)
        } else if class.contains("value") || class.contains("number") {
            Some(Role::Value)
        } else {
            None
        }
    })
}
