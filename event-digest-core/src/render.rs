//! Renders the HTML schedule and the Markdown summary, and writes output files.

use askama::Template;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::contract::Event;
use crate::error::{DigestError, DigestResult};
use crate::style::{CategoryLookup, StyleTable};
use crate::transform::GroupedEvents;

pub const SUMMARY_TITLE: &str = "# Weekly Entertainment Summary";
pub const NO_EVENTS_TODAY: &str = "No events today.";

/// Bindings for `templates/schedule.html`. The page layout belongs to the template.
#[derive(Template)]
#[template(path = "schedule.html")]
struct ScheduleTemplate<'a> {
    events_grouped: &'a [(String, Vec<Event>)],
    icons: CategoryLookup<'a>,
    category_colors: CategoryLookup<'a>,
}

pub fn render_html(grouped: &GroupedEvents, styles: &StyleTable) -> DigestResult<String> {
    let template = ScheduleTemplate {
        events_grouped: grouped.as_slice(),
        icons: styles.icons(),
        category_colors: styles.colors(),
    };
    let html = template.render().map_err(|e| {
        error!(error = %e, "Failed to render schedule template");
        DigestError::Render(e)
    })?;
    debug!(bytes = html.len(), categories = grouped.len(), "Rendered HTML schedule");
    Ok(html)
}

/// Builds the Markdown summary: per-category counts, then today's events.
pub fn render_markdown(grouped: &GroupedEvents, today: &[Event], styles: &StyleTable) -> String {
    let mut lines = vec![format!("{SUMMARY_TITLE}\n")];
    for (category, events) in grouped.iter() {
        let icon = styles.style_for(category).icon.as_str();
        lines.push(format!("- {icon} {category}: {} events", events.len()));
    }

    lines.push("\n## Today's Events\n".to_string());
    if today.is_empty() {
        lines.push(NO_EVENTS_TODAY.to_string());
    } else {
        for event in today {
            lines.push(format!(
                "- {} at {} ({})",
                event.name,
                event.location_or_default(),
                event.datetime
            ));
        }
    }
    lines.join("\n")
}

/// Writes `contents` to `path`, creating missing parent directories first.
pub fn write_output(path: &Path, contents: &str) -> DigestResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| {
            error!(error = ?source, path = %parent.display(), "Failed to create output directory");
            DigestError::Io {
                path: parent.to_path_buf(),
                source,
            }
        })?;
    }
    fs::write(path, contents).map_err(|source| {
        error!(error = ?source, path = %path.display(), "Failed to write output file");
        DigestError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}
