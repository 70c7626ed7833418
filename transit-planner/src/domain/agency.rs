//! Agencies and modalities.

use super::{AgencyId, ModalityId};

/// An operator of one or more routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agency {
    pub id: AgencyId,
    pub name: String,
    pub abbr: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl Agency {
    /// Returns the abbreviation if set, otherwise the full name.
    pub fn display_name(&self) -> &str {
        self.abbr.as_deref().unwrap_or(&self.name)
    }
}

/// A mode of transport (rail, tram, ferry, ...).
///
/// Modalities own the presentation defaults for the nodes and routes that
/// reference them: the icon and the label used for a node of this kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modality {
    pub id: ModalityId,
    pub name: String,
    /// Label for a node of this modality, e.g. "Tramhalte".
    pub node_name: Option<String>,
    pub abbr: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}
