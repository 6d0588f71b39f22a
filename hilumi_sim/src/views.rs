//! Named views over the member population.

/// View identifiers, one per filter on the member-network screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    /// Every member, in id order
    All,

    /// Members within the configured radius of ATLAS
    NearAtlas,

    /// Members inside the configured angular sector around CERN
    Angular,
}

impl ViewId {
    /// Returns a list of all views.
    pub fn all() -> Vec<ViewId> {
        vec![ViewId::All, ViewId::NearAtlas, ViewId::Angular]
    }

    /// Returns the view name.
    pub fn name(&self) -> &'static str {
        match self {
            ViewId::All => "all",
            ViewId::NearAtlas => "near_atlas",
            ViewId::Angular => "angular",
        }
    }

    /// Returns the list heading used for the view.
    pub fn description(&self) -> &'static str {
        match self {
            ViewId::All => "All Members",
            ViewId::NearAtlas => "Members Near ATLAS Detector",
            ViewId::Angular => "Members in Angular Sector around CERN",
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ViewId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ViewId::All),
            "near_atlas" | "nearatlas" | "nearby" => Ok(ViewId::NearAtlas),
            "angular" | "sector" => Ok(ViewId::Angular),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_names_round_trip() {
        for view in ViewId::all() {
            assert_eq!(view.name().parse::<ViewId>().unwrap(), view);
            assert_eq!(view.to_string(), view.name());
        }
    }

    #[test]
    fn test_view_aliases() {
        assert_eq!("nearby".parse::<ViewId>().unwrap(), ViewId::NearAtlas);
        assert_eq!("SECTOR".parse::<ViewId>().unwrap(), ViewId::Angular);
        assert!("south".parse::<ViewId>().is_err());
    }
}
