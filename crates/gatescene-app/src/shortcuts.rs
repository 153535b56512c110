//! Keyboard shortcut registry and documentation.

use gatescene_core::ASSISTANT_TOGGLE_KEY;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }

    /// Format the shortcut for display (e.g., "W", "Delete").
    pub fn format(&self) -> String {
        if self.key.chars().count() == 1 {
            self.key.to_uppercase()
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard and pointer shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(ASSISTANT_TOGGLE_KEY, "Toggle wiring assistant (on release)"),
            Shortcut::new("Delete", "Delete selected element"),
            Shortcut::new("Backspace", "Delete selected element"),
            Shortcut::new("Click", "Select topmost element"),
            Shortcut::new("Drag", "Move element"),
        ]
    }

    /// One-line hint for the status overlay.
    pub fn hint() -> String {
        Self::all()
            .iter()
            .take(2)
            .map(|s| format!("{}: {}", s.format(), s.description))
            .collect::<Vec<_>>()
            .join("  |  ")
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:12} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_toggle_registered() {
        let all = ShortcutRegistry::all();
        assert!(all.iter().any(|s| s.format() == "W"));
        assert!(all.iter().any(|s| s.key == "Delete"));
    }

    #[test]
    fn test_hint_mentions_toggle() {
        let hint = ShortcutRegistry::hint();
        assert!(hint.starts_with("W: "));
        assert!(hint.contains("Delete"));
    }
}
