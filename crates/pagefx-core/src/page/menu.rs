#![forbid(unsafe_code)]

//! Mobile menu open/closed state.
//!
//! The hamburger toggles the menu. Picking a menu item, clicking anywhere
//! outside both the hamburger and the menu, or pressing Escape closes it.

use tracing::debug;

/// Class set on the hamburger button while the menu is open.
pub const HAMBURGER_ACTIVE_CLASS: &str = "active";
/// Class set on the menu panel while it is open.
pub const MENU_OPEN_CLASS: &str = "open";

/// Input relevant to the mobile menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// Click on the hamburger button.
    ToggleClick,
    /// Click on a menu item.
    ItemClick,
    /// Click outside the hamburger and the menu panel.
    OutsideClick,
    /// Key press, by DOM `key` name.
    Key(String),
}

/// Result of feeding a [`MenuEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTransition {
    /// Whether the open state changed.
    pub changed: bool,
    /// Open state after the event.
    pub open: bool,
}

/// Mobile menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Closed menu.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Apply an event.
    pub fn handle(&mut self, event: &MenuEvent) -> MenuTransition {
        let next = match event {
            MenuEvent::ToggleClick => !self.open,
            MenuEvent::ItemClick => false,
            MenuEvent::OutsideClick => false,
            MenuEvent::Key(key) if key == "Escape" => false,
            MenuEvent::Key(_) => self.open,
        };
        let changed = next != self.open;
        self.open = next;
        if changed {
            debug!(open = next, ?event, "mobile menu transition");
        }
        MenuTransition {
            changed,
            open: next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        let mut menu = MobileMenu::new();
        assert_eq!(
            menu.handle(&MenuEvent::ToggleClick),
            MenuTransition {
                changed: true,
                open: true
            }
        );
        assert!(!menu.handle(&MenuEvent::ToggleClick).open);
    }

    #[test]
    fn item_click_closes() {
        let mut menu = MobileMenu::new();
        menu.handle(&MenuEvent::ToggleClick);
        let t = menu.handle(&MenuEvent::ItemClick);
        assert!(t.changed);
        assert!(!menu.is_open());
    }

    #[test]
    fn outside_click_when_closed_is_unchanged() {
        let mut menu = MobileMenu::new();
        assert!(!menu.handle(&MenuEvent::OutsideClick).changed);
    }

    #[test]
    fn escape_closes_other_keys_do_not() {
        let mut menu = MobileMenu::new();
        menu.handle(&MenuEvent::ToggleClick);
        assert!(!menu.handle(&MenuEvent::Key("Enter".into())).changed);
        assert!(menu.is_open());
        assert!(menu.handle(&MenuEvent::Key("Escape".into())).changed);
        assert!(!menu.is_open());
    }
}
