use std::borrow::Cow;
use std::fmt::{self, Write};

use jobs_core::{AppViewModel, BadgeView, JobCardView, ReadyView};

use crate::PageLocation;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Ansi,
    Plain,
}

/// Renders the view as terminal text.
pub fn render(view: &AppViewModel, location: &PageLocation, color: ColorMode) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = match view {
        AppViewModel::Loading => writeln!(out, "Loading jobs..."),
        AppViewModel::Ready(ready) => write_ready(&mut out, ready, location, color),
    };
    out
}

fn write_ready(
    out: &mut String,
    view: &ReadyView,
    location: &PageLocation,
    color: ColorMode,
) -> fmt::Result {
    let style = Style(color);

    if view.filters.search.is_empty() {
        writeln!(out, "Search: {}", style.dim("(none)"))?;
    } else {
        writeln!(out, "Search: {:?}", view.filters.search)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", style.bold("Visible Repositories"))?;
    for repo in &view.repositories {
        if repo.hidden {
            writeln!(out, "  [ ] {}", style.dim(&printable(&repo.full_name)))?;
        } else {
            writeln!(out, "  [x] {}", printable(&repo.full_name))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "{}", style.bold("Filter by Label (Match Any)"))?;
    if !view.has_labels {
        writeln!(
            out,
            "  {}",
            style.dim("No labels available from visible repositories.")
        )?;
    }
    for group in &view.label_groups {
        writeln!(out, "  {}", printable(&group.repository).to_uppercase())?;
        let chips: Vec<String> = group
            .labels
            .iter()
            .map(|chip| {
                if chip.selected {
                    style.bold(&format!("*{} {}", printable(&chip.name), chip.count))
                } else {
                    let count = style.dim(&chip.count.to_string());
                    format!("{} {}", printable(&chip.name), count)
                }
            })
            .collect();
        writeln!(out, "    {}", chips.join("  "))?;
    }
    if !view.filters.labels.is_empty() {
        writeln!(out, "  {}", style.dim("(clear labels with --clear-labels)"))?;
    }
    writeln!(out)?;

    write!(out, "{} ({})", style.bold("Job Listings"), view.job_count)?;
    if view.has_active_filters {
        write!(out, "  {}", style.dim("reset all filters with --reset"))?;
    }
    writeln!(out)?;

    if view.is_empty_result() {
        writeln!(out, "  No jobs found")?;
        writeln!(
            out,
            "  We couldn't find any jobs matching your current filters. \
             Try adjusting your search keywords or labels."
        )?;
        writeln!(out, "  Clear all filters with --reset")?;
    }
    for job in &view.jobs {
        write_job(out, job, style)?;
    }
    writeln!(out)?;

    writeln!(out, "Share: {}", location.href())
}

fn write_job(out: &mut String, job: &JobCardView, style: Style) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "  {}", style.bold(&printable(&job.title)))?;
    writeln!(
        out,
        "    {} \u{2022} {}",
        printable(&job.company),
        style.dim(&printable(&job.repository))
    )?;
    if !job.badges.is_empty() {
        let badges: Vec<String> = job.badges.iter().map(|badge| style.badge(badge)).collect();
        writeln!(out, "    {}", badges.join(" "))?;
    }
    writeln!(out, "    Posted {}  {}", job.posted, printable(&job.url))
}

/// Replaces control characters in fetched text so it cannot drive the
/// terminal.
fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

#[derive(Clone, Copy)]
struct Style(ColorMode);

impl Style {
    fn bold(self, text: &str) -> String {
        self.wrap(BOLD, text)
    }

    fn dim(self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    fn badge(self, badge: &BadgeView) -> String {
        let text = format!("[{}]", printable(&badge.name));
        match (self.0, badge.color.as_deref().and_then(parse_hex_color)) {
            (ColorMode::Ansi, Some((r, g, b))) => {
                format!("\x1b[38;2;{r};{g};{b}m{text}{RESET}")
            }
            _ => text,
        }
    }

    fn wrap(self, code: &str, text: &str) -> String {
        match self.0 {
            ColorMode::Ansi => format!("{code}{text}{RESET}"),
            ColorMode::Plain => text.to_string(),
        }
    }
}

/// Parses `#rrggbb`.
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
