//! Text rendering of view snapshots for the terminal.

use std::{
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use client_core::{Renderer, ViewState};

const EMPTY_STATE_TEXT: &str = "No dogs found. Try another search or load more dogs.";

pub struct TerminalRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    last: Mutex<Option<ViewState>>,
    /// Last view printed in full; loading snapshots never replace it.
    last_printed: Mutex<Option<ViewState>>,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            last: Mutex::new(None),
            last_printed: Mutex::new(None),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, view: &ViewState) {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_ref() == Some(view) {
            return;
        }
        *last = Some(view.clone());

        let mut last_printed = self
            .last_printed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let text = format_view(view, last_printed.as_ref());
        if !view.loading {
            *last_printed = Some(view.clone());
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!("failed to write view: {err}");
        }
    }
}

/// While loading only a status line is printed; otherwise the full view.
/// `previous` is the last view printed in full and decides whether the
/// breed list is repeated.
pub fn format_view(view: &ViewState, previous: Option<&ViewState>) -> String {
    if view.loading {
        return "Loading dogs...\n".to_string();
    }

    let mut lines = Vec::new();

    let options_changed = previous.map_or(view.breed_options.len() > 1, |prev| {
        prev.breed_options != view.breed_options
    });
    if options_changed {
        let values: Vec<_> = view
            .breed_options
            .iter()
            .filter(|option| !option.value.is_empty())
            .map(|option| option.value.as_str())
            .collect();
        lines.push(format!("Breeds ({}): {}", values.len(), values.join(", ")));
    }

    if let Some(error) = &view.error {
        lines.push(format!("! {error}"));
    }

    if let Some(summary) = &view.summary {
        lines.push(format!(
            "{} | {} | {}",
            summary.total_text(),
            summary.showing_text(),
            summary.selected_breed_label
        ));
    }
    if !view.search_text.is_empty() {
        lines.push(format!("Search: \"{}\"", view.search_text));
    }

    for (index, card) in view.gallery.iter().enumerate() {
        lines.push(format!("{:>2}. {} [{}]", index + 1, card.heading, card.chip));
        lines.push(format!("    {}", card.image_url));
    }
    if view.empty_state_visible {
        lines.push(EMPTY_STATE_TEXT.to_string());
    }

    lines.push("--".to_string());
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
