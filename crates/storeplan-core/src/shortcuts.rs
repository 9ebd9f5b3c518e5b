//! Keyboard shortcut registry and documentation.
//!
//! The bindings themselves are applied by [`crate::Interaction::key_down`].

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl, or Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            command,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+C").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("A", true, false, "Select all elements"),
            Shortcut::new("C", true, false, "Copy selection"),
            Shortcut::new("X", true, false, "Cut selection"),
            Shortcut::new("V", true, false, "Paste"),
            Shortcut::new("Delete", false, false, "Delete selection"),
            Shortcut::new("Backspace", false, false, "Delete selection"),
            Shortcut::new("Escape", false, false, "Cancel wall, leave drawing mode or clear selection"),
            Shortcut::new("Arrows", false, false, "Nudge selection"),
            Shortcut::new("Arrows", false, true, "Nudge selection by one grid step"),
            Shortcut::new("W", false, false, "Draw walls"),
            Shortcut::new("G", false, false, "Toggle grid"),
        ]
    }

    /// Shortcuts whose description mentions `text`, ignoring case.
    pub fn search(text: &str) -> Vec<Shortcut> {
        let needle = text.to_lowercase();
        Self::all()
            .into_iter()
            .filter(|s| s.description.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("C", true, false, "Copy").format(), "Ctrl+C");
        assert_eq!(Shortcut::new("Arrows", false, true, "Nudge").format(), "Shift+Arrows");
    }

    #[test]
    fn test_search() {
        let found = ShortcutRegistry::search("delete");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| !s.command));
    }
}
