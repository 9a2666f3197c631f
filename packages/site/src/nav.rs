/// Open/closed state of the collapsible mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn class_name(self) -> &'static str {
        if self.open {
            "nav__menu is-open"
        } else {
            "nav__menu"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_and_close() {
        let mut menu = MobileMenu::default();
        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.class_name(), "nav__menu is-open");
        menu.close();
        assert!(!menu.is_open());
        assert_eq!(menu.aria_expanded(), "false");
    }
}
