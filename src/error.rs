//! Error types for starbough.
//!
//! The engine has a deliberately small recoverable-error surface: all
//! randomness is self-contained and every lookup is against a closed
//! enumeration. What remains are construction-time contract violations,
//! which must fail fast rather than be papered over.

use std::fmt;

/// Errors that can occur while configuring or constructing a [`Scene`].
///
/// [`Scene`]: crate::Scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A particle count of zero leaves nothing to animate.
    DegenerateParticleCount,
    /// A tier count of zero; the tree field formulas divide by it.
    DegenerateTierCount,
    /// A theme name outside the known set.
    ///
    /// Silently substituting a fallback theme would corrupt the recolor
    /// contract, so unknown names are rejected at the boundary.
    UnknownTheme(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DegenerateParticleCount => {
                write!(f, "particle count must be at least 1")
            }
            SceneError::DegenerateTierCount => {
                write!(f, "tier count must be at least 1")
            }
            SceneError::UnknownTheme(name) => {
                write!(
                    f,
                    "unknown theme '{}'. Known themes: classic, gold, ice, neon",
                    name
                )
            }
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_message_names_the_key() {
        let err = SceneError::UnknownTheme("vaporwave".to_string());
        assert!(err.to_string().contains("vaporwave"));
    }
}
