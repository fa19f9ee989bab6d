//! Plain-text roster rendering.
//!
//! Deterministic output used by the CLI probe and by tests that assert on
//! the rendered shape instead of widget internals.

use super::RosterView;
use std::fmt::Write as _;

/// Renders a snapshot as indented text, one place block per place.
pub fn render_text(view: &RosterView) -> String {
    let mut out = String::new();

    if view.places.is_empty() {
        out.push_str("No places added yet.\n");
        return out;
    }

    for place in &view.places {
        // Infallible: writing into a String cannot fail.
        let _ = writeln!(out, "[{:>3}] {}", place.reputation, place.name);

        if !place.people_visible {
            out.push_str("      (names hidden)\n");
            continue;
        }

        if place.people.is_empty() {
            out.push_str("      No people added yet.\n");
            continue;
        }

        for person in &place.people {
            let _ = writeln!(out, "      [{:>3}] {}", person.reputation, person.name);
        }
    }

    out
}
