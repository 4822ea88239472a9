//! Sidebar state, driven by viewport width and the toggle button.

use weatherph_core::NavigationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

impl SidebarState {
    /// CSS class applied to the sidebar element.
    pub fn class(self) -> &'static str {
        match self {
            Self::Expanded => "sidebar",
            Self::Collapsed => "sidebar collapsed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    breakpoint_px: u32,
    state: SidebarState,
    narrow: Option<bool>,
}

impl NavigationController {
    pub fn new(config: &NavigationConfig) -> Self {
        let state = if config.start_collapsed {
            SidebarState::Collapsed
        } else {
            SidebarState::Expanded
        };
        Self {
            breakpoint_px: config.collapse_breakpoint_px,
            state,
            narrow: None,
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    /// Apply a viewport width. Only crossing the breakpoint changes state,
    /// so a manual toggle survives resizes on the same side of it.
    pub fn resize(&mut self, width_px: u32) -> SidebarState {
        let narrow = width_px < self.breakpoint_px;
        if self.narrow != Some(narrow) {
            self.state = if narrow {
                SidebarState::Collapsed
            } else {
                SidebarState::Expanded
            };
            self.narrow = Some(narrow);
        }
        self.state
    }

    pub fn toggle(&mut self) -> SidebarState {
        self.state = match self.state {
            SidebarState::Expanded => SidebarState::Collapsed,
            SidebarState::Collapsed => SidebarState::Expanded,
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> NavigationController {
        NavigationController::new(&NavigationConfig::default())
    }

    #[test]
    fn test_initial_state_from_config() {
        assert_eq!(controller().state(), SidebarState::Expanded);

        let config = NavigationConfig {
            start_collapsed: true,
            ..Default::default()
        };
        assert_eq!(NavigationController::new(&config).state(), SidebarState::Collapsed);
    }

    #[test]
    fn test_collapses_below_breakpoint() {
        let mut nav = controller();
        assert_eq!(nav.resize(800), SidebarState::Collapsed);
        assert_eq!(nav.resize(1200), SidebarState::Expanded);
    }

    #[test]
    fn test_toggle_survives_resize_on_same_side() {
        let mut nav = controller();
        nav.resize(1200);
        assert_eq!(nav.toggle(), SidebarState::Collapsed);
        assert_eq!(nav.resize(1300), SidebarState::Collapsed);
        assert_eq!(nav.resize(600), SidebarState::Collapsed);
        assert_eq!(nav.toggle(), SidebarState::Expanded);
        assert_eq!(nav.resize(1000), SidebarState::Expanded);
    }

    #[test]
    fn test_sidebar_class() {
        assert_eq!(SidebarState::Collapsed.class(), "sidebar collapsed");
    }
}
