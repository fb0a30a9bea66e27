//! Error types for catalog loading and orbit construction

/// Failures raised while turning catalog text into renderable entries
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Line count (after dropping one trailing blank line) is not a multiple of 3
    MalformedCatalog { line_count: usize },

    /// Propagator returned no position for this record at the requested instant
    PropagationFailure { id: String },

    /// Orbital elements cannot describe a closed ellipse
    InvalidOrbit { reason: String },

    /// A later record reused an identifier already in the store
    DuplicateIdentifier { id: String },

    /// Engine configuration is out of range
    InvalidConfig { message: String },
}

impl CatalogError {
    pub(crate) fn invalid_orbit(reason: impl Into<String>) -> Self {
        Self::InvalidOrbit {
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a whole dataset load rather than a single record
    pub fn is_dataset_level(&self) -> bool {
        matches!(
            self,
            Self::MalformedCatalog { .. } | Self::InvalidConfig { .. }
        )
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedCatalog { line_count } => {
                write!(
                    f,
                    "Malformed catalog: {} lines is not a whole number of 3-line records",
                    line_count
                )
            }
            Self::PropagationFailure { id } => {
                write!(f, "Propagation failed for '{}'", id)
            }
            Self::InvalidOrbit { reason } => {
                write!(f, "Invalid orbit: {}", reason)
            }
            Self::DuplicateIdentifier { id } => {
                write!(f, "Duplicate identifier '{}' (last record wins)", id)
            }
            Self::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
