//! Named color sets for the scene.
//!
//! A [`Theme`] is a closed enumeration; each variant resolves to a
//! [`ThemePalette`] holding the handful of colors the generators sample
//! from. Switching themes recolors existing particles without touching
//! their descriptors (see [`Scene::set_theme`]).
//!
//! [`Scene::set_theme`]: crate::Scene::set_theme

use crate::error::SceneError;
use glam::Vec3;

/// Pre-defined color themes for the particle fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Deep greens, warm glow, red/gold ornaments (default).
    #[default]
    Classic,

    /// Amber needles and white-gold highlights.
    Gold,

    /// Frosted blues with pale glow.
    Ice,

    /// Saturated cyberpunk pinks and cyans.
    Neon,
}

/// The color set one theme provides to the generators.
///
/// All channels are linear RGB in 0.0-1.0 (highlights may exceed 1.0
/// slightly; the renderer's tone mapping handles that).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    /// Base foliage color for needle particles.
    pub needle: Vec3,
    /// Near-saturation highlight for branch-skeleton particles.
    pub glow: Vec3,
    /// Accent colors; a needle particle picks one with low probability.
    pub ornaments: [Vec3; 4],
    /// Drifting background dust.
    pub dust: Vec3,
    /// Floor ring particles.
    pub ring: Vec3,
}

impl Theme {
    /// Every known theme, in UI display order.
    pub fn all() -> [Theme; 4] {
        [Theme::Classic, Theme::Gold, Theme::Ice, Theme::Neon]
    }

    /// Canonical lowercase name, stable across releases.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Gold => "gold",
            Theme::Ice => "ice",
            Theme::Neon => "neon",
        }
    }

    /// Look up a theme by name.
    ///
    /// Unknown names are an error, never a silent default: a caller that
    /// passes a bad key would otherwise recolor the scene with colors it
    /// did not ask for.
    pub fn from_name(name: &str) -> Result<Theme, SceneError> {
        match name {
            "classic" => Ok(Theme::Classic),
            "gold" => Ok(Theme::Gold),
            "ice" => Ok(Theme::Ice),
            "neon" => Ok(Theme::Neon),
            other => Err(SceneError::UnknownTheme(other.to_string())),
        }
    }

    /// Get the color set for this theme.
    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Classic => ThemePalette {
                needle: Vec3::new(0.075, 0.35, 0.16),
                glow: Vec3::new(1.0, 0.84, 0.35),
                ornaments: [
                    Vec3::new(0.86, 0.12, 0.15), // Red
                    Vec3::new(0.95, 0.72, 0.18), // Gold
                    Vec3::new(0.16, 0.38, 0.78), // Blue
                    Vec3::new(0.9, 0.9, 0.95),   // Silver
                ],
                dust: Vec3::new(0.75, 0.78, 0.85),
                ring: Vec3::new(0.55, 0.68, 0.92),
            },
            Theme::Gold => ThemePalette {
                needle: Vec3::new(0.42, 0.3, 0.08),
                glow: Vec3::new(1.0, 0.93, 0.6),
                ornaments: [
                    Vec3::new(1.0, 0.78, 0.25),
                    Vec3::new(0.92, 0.6, 0.12),
                    Vec3::new(1.0, 0.95, 0.82),
                    Vec3::new(0.7, 0.45, 0.1),
                ],
                dust: Vec3::new(0.9, 0.82, 0.6),
                ring: Vec3::new(0.95, 0.8, 0.45),
            },
            Theme::Ice => ThemePalette {
                needle: Vec3::new(0.12, 0.3, 0.42),
                glow: Vec3::new(0.8, 0.95, 1.0),
                ornaments: [
                    Vec3::new(0.55, 0.8, 1.0),
                    Vec3::new(0.85, 0.92, 1.0),
                    Vec3::new(0.3, 0.55, 0.9),
                    Vec3::new(0.95, 0.98, 1.0),
                ],
                dust: Vec3::new(0.8, 0.88, 0.95),
                ring: Vec3::new(0.6, 0.8, 1.0),
            },
            Theme::Neon => ThemePalette {
                needle: Vec3::new(0.05, 0.32, 0.3),
                glow: Vec3::new(0.4, 1.0, 0.85),
                ornaments: [
                    Vec3::new(1.0, 0.1, 0.55),
                    Vec3::new(0.2, 0.9, 1.0),
                    Vec3::new(0.65, 0.25, 1.0),
                    Vec3::new(1.0, 0.85, 0.2),
                ],
                dust: Vec3::new(0.55, 0.5, 0.75),
                ring: Vec3::new(0.85, 0.3, 0.95),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips() {
        for theme in Theme::all() {
            assert_eq!(Theme::from_name(theme.name()), Ok(theme));
        }
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(
            Theme::from_name("sepia"),
            Err(SceneError::UnknownTheme("sepia".to_string()))
        );
    }

    #[test]
    fn test_palettes_are_distinct() {
        let classic = Theme::Classic.palette();
        let gold = Theme::Gold.palette();
        assert_ne!(classic.needle, gold.needle);
        assert_ne!(classic.glow, gold.glow);
    }
}
