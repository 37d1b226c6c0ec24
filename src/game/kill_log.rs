//! Append-only kill feed, newest entry first.

use std::collections::VecDeque;

use serde::Serialize;

use crate::game::types::Color;

/// Rich-text color tag understood by the overlay, e.g. `<color=#E53935>ABC</color>`.
pub fn colored_name(name: &str, color: Color) -> String {
    format!("<color={}>{}</color>", color.hex(), name)
}

pub fn defeat_line(killer: &str, victim: &str) -> String {
    format!("{killer} has defeated {victim}!")
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KillLog {
    entries: VecDeque<String>,
}

impl KillLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: String) {
        self.entries.push_front(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_prepended() {
        let mut log = KillLog::new();
        log.record(defeat_line("AAA", "BBB"));
        log.record(defeat_line("CCC", "AAA"));

        let entries: Vec<&str> = log.entries().collect();
        assert_eq!(entries, vec!["CCC has defeated AAA!", "AAA has defeated BBB!"]);
        assert_eq!(log.latest(), Some("CCC has defeated AAA!"));
    }

    #[test]
    fn colored_names_use_hex_tags() {
        assert_eq!(
            colored_name("ABC", Color::rgb(0x12, 0xAB, 0x00)),
            "<color=#12AB00>ABC</color>"
        );
    }
}
