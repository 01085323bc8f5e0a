//! Tab navigation visibility

use crate::filters::FilterState;
use crate::tabs::TabName;

/// How a tab is opened
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Filter to adopt; the tab must already be initialized
    pub filter: Option<FilterState>,
    /// Hide the whole navigation
    pub hide_navigation: bool,
    /// Show only these tabs (plus the opened one)
    pub show_tabs: Option<Vec<TabName>>,
}

impl OpenOptions {
    #[must_use]
    pub fn with_filter(filter: FilterState) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}

/// What the browser currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Tab(TabName),
    Settings,
}

impl ActiveView {
    #[must_use]
    pub const fn tab(self) -> Option<TabName> {
        match self {
            Self::Tab(name) => Some(name),
            Self::Settings => None,
        }
    }
}

/// Visible entries of the tab navigation, in navigation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    visible: Vec<TabName>,
}

impl Navigation {
    /// Recompute visibility after opening `active`
    ///
    /// `permitted` decides which tabs show when no explicit subset is
    /// requested.
    pub fn apply(
        &mut self,
        active: Option<TabName>,
        options: &OpenOptions,
        permitted: impl Fn(TabName) -> bool,
    ) {
        self.visible = if options.hide_navigation {
            Vec::new()
        } else if let Some(subset) = &options.show_tabs {
            TabName::ALL
                .into_iter()
                .filter(|name| subset.contains(name) || Some(*name) == active)
                .collect()
        } else {
            TabName::ALL.into_iter().filter(|name| permitted(*name)).collect()
        };
    }

    #[must_use]
    pub fn visible(&self) -> &[TabName] {
        &self.visible
    }

    #[must_use]
    pub fn is_visible(&self, name: TabName) -> bool {
        self.visible.contains(&name)
    }
}
