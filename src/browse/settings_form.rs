//! Submitted browser settings
//!
//! The settings view edits pack toggles per tab, source toggles and the
//! three source visibility flags. A submitted form is applied as a whole and
//! persisted before the initialized tabs are rebuilt.

use crate::settings::PackSettings;
use crate::sources::SourceRegistry;
use crate::tabs::TabName;

/// Changes made in the settings view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    /// `(tab, collection, load)`
    pub packs: Vec<(TabName, String, bool)>,
    /// `(source slug, load)`
    pub sources: Vec<(String, bool)>,
    pub ignore_as_gm: Option<bool>,
    pub show_empty_sources: Option<bool>,
    pub show_unknown_sources: Option<bool>,
}

impl SettingsForm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
            && self.sources.is_empty()
            && self.ignore_as_gm.is_none()
            && self.show_empty_sources.is_none()
            && self.show_unknown_sources.is_none()
    }

    /// Apply the form; returns the number of toggles that matched nothing
    pub fn apply(&self, packs: &mut PackSettings, sources: &mut SourceRegistry) -> usize {
        let mut unmatched = 0;
        for (tab, collection, load) in &self.packs {
            if !packs.set_load(*tab, collection, *load) {
                tracing::warn!(%tab, collection, "Pack toggle for unregistered pack");
                unmatched += 1;
            }
        }
        for (slug, load) in &self.sources {
            if !sources.set_source_load(slug, *load) {
                tracing::warn!(slug, "Source toggle for unknown source");
                unmatched += 1;
            }
        }
        sources.set_flags(
            self.ignore_as_gm,
            self.show_empty_sources,
            self.show_unknown_sources,
        );
        unmatched
    }
}
