//! Dashboard navigation shell
//!
//! The static route table plus the shell's UI state: a desktop rail that can
//! collapse, a mobile overlay that opens and closes, and exact-match
//! highlighting of the current path. Nothing here is persisted.

/// Rail width when collapsed, in pixels
pub const COLLAPSED_WIDTH: u32 = 80;
/// Rail width when expanded, in pixels
pub const EXPANDED_WIDTH: u32 = 320;

/// Where signing out lands
pub const SIGN_OUT_CALLBACK: &str = "/signin";

/// What selecting a nav item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Route(&'static str),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub badge: Option<&'static str>,
    pub target: NavTarget,
}

impl NavItem {
    const fn route(label: &'static str, href: &'static str, badge: Option<&'static str>) -> Self {
        Self {
            label,
            href,
            badge,
            target: NavTarget::Route(href),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSection {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

pub const NAV_SECTIONS: &[NavSection] = &[
    NavSection {
        title: "Dashboard",
        items: &[
            NavItem::route("Home", "/home", Some("New")),
            NavItem::route("Profile", "/profile", None),
        ],
    },
    NavSection {
        title: "AI Study Tools",
        items: &[
            NavItem::route("AI Planner", "/study-plan", Some("AI")),
            NavItem::route("Resources", "/resources", Some("Curated")),
            NavItem::route("PDF Chat", "/pdf", Some("Pro")),
            NavItem::route("Focus Timer", "/timer", None),
            NavItem::route("Smart Notes", "/notes", None),
        ],
    },
    NavSection {
        title: "System",
        items: &[NavItem::route("Design System", "/design-system", Some("New"))],
    },
    NavSection {
        title: "Account",
        items: &[NavItem {
            label: "Sign Out",
            href: "#",
            badge: None,
            target: NavTarget::SignOut,
        }],
    },
];

/// Every item in display order
pub fn all_items() -> impl Iterator<Item = &'static NavItem> {
    NAV_SECTIONS.iter().flat_map(|s| s.items.iter())
}

/// Find the item whose href equals `pathname` exactly
pub fn find_item(pathname: &str) -> Option<&'static NavItem> {
    all_items().find(|item| item.href == pathname)
}

/// Fallback shown in the avatar when the user has no image
pub fn avatar_initial(name: Option<&str>) -> char {
    name.and_then(|n| n.chars().next()).unwrap_or('U')
}

/// Name shown under the avatar
pub fn display_name(name: Option<&str>) -> &str {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => "Welcome",
    }
}

type CollapseObserver = Box<dyn FnMut(bool) + Send>;

/// Navigation shell state
pub struct NavShell {
    pathname: String,
    collapsed: bool,
    mobile_open: bool,
    on_collapse: Option<CollapseObserver>,
}

impl std::fmt::Debug for NavShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavShell")
            .field("pathname", &self.pathname)
            .field("collapsed", &self.collapsed)
            .field("mobile_open", &self.mobile_open)
            .finish()
    }
}

impl NavShell {
    /// Expanded rail, closed overlay
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            collapsed: false,
            mobile_open: false,
            on_collapse: None,
        }
    }

    /// Register an observer notified with the new collapsed value on every toggle
    pub fn on_collapse(mut self, observer: impl FnMut(bool) + Send + 'static) -> Self {
        self.on_collapse = Some(Box::new(observer));
        self
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn rail_width(&self) -> u32 {
        if self.collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        }
    }

    /// Section titles are hidden on the collapsed rail
    pub fn show_section_titles(&self) -> bool {
        !self.collapsed
    }

    pub fn toggle_collapse(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        if let Some(observer) = self.on_collapse.as_mut() {
            observer(self.collapsed);
        }
        self.collapsed
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    pub fn close_mobile_menu(&mut self) {
        self.mobile_open = false;
    }

    pub fn is_active(&self, item: &NavItem) -> bool {
        item.href == self.pathname
    }

    /// Handle a click on `item`. Route items navigate; the overlay always closes.
    pub fn select(&mut self, item: &NavItem) -> NavTarget {
        if let NavTarget::Route(href) = item.target {
            self.pathname = href.to_string();
        }
        self.close_mobile_menu();
        item.target
    }
}
