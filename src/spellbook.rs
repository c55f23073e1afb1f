//! Spell database keyed by incantation.
//!
//! Defines the serde schema for spellbook YAML files:
//!
//! ```yaml
//! version: "1.0"
//! spells:
//!   - incantation: "ignis"
//!     gesture: [[-0.5, -0.5], [0.0, 0.5], [0.5, -0.5]]
//!     effect:
//!       message: "Fire!"
//!       lifetime_secs: 1.5
//! ```
//!
//! A `Spellbook` is an owned value handed to whichever component needs
//! lookups; nothing here is global.

use crate::error::SpellbookError;
use gesture_core::{GestureMatcher, Point2, Point3, Projector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Text shown on screen when a spell is cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellEffect {
    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Seconds the message stays on screen.
    #[serde(default = "default_lifetime")]
    pub lifetime_secs: f32,

    /// Normalized screen position, (0,0) bottom-left and (1,1) top-right.
    #[serde(default = "default_screen_position")]
    pub screen_position: Point2,
}

fn default_message() -> String {
    "Magic!".to_string()
}

fn default_font_size() -> u32 {
    24
}

fn default_lifetime() -> f32 {
    2.0
}

fn default_screen_position() -> Point2 {
    Point2::new(0.5, 0.5)
}

impl Default for SpellEffect {
    fn default() -> Self {
        Self {
            message: default_message(),
            font_size: default_font_size(),
            lifetime_secs: default_lifetime(),
            screen_position: default_screen_position(),
        }
    }
}

/// One spell: what to say, what to draw, what happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellData {
    pub incantation: String,

    /// Gesture template, conventionally within [-0.5, 0.5] on both axes.
    pub gesture: Vec<Point2>,

    #[serde(default)]
    pub effect: SpellEffect,
}

impl SpellData {
    pub fn new(incantation: impl Into<String>, gesture: Vec<Point2>) -> Self {
        Self {
            incantation: incantation.into(),
            gesture,
            effect: SpellEffect::default(),
        }
    }

    pub fn with_effect(mut self, effect: SpellEffect) -> Self {
        self.effect = effect;
        self
    }
}

/// Root of a spellbook YAML document.
#[derive(Debug, Deserialize)]
struct SpellbookFile {
    #[serde(default = "default_version")]
    #[allow(dead_code)]
    version: String,
    #[serde(default)]
    spells: Vec<SpellData>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// A spell's gesture score against one capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub incantation: String,
    pub score: f32,
}

/// All known spells, keyed by normalized incantation.
#[derive(Debug, Clone, Default)]
pub struct Spellbook {
    spells: HashMap<String, SpellData>,
}

/// Lookup key for an incantation: trimmed and lowercased.
pub fn incantation_key(incantation: &str) -> String {
    incantation.trim().to_lowercase()
}

impl Spellbook {
    /// Load a spellbook from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SpellbookError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SpellbookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load a spellbook from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpellbookError> {
        let file: SpellbookFile = serde_yaml::from_str(yaml)?;
        Ok(Self::from_spells(file.spells))
    }

    /// Build from spells in order. The first spell for an incantation wins;
    /// later duplicates are ignored with a warning.
    pub fn from_spells(spells: impl IntoIterator<Item = SpellData>) -> Self {
        let mut book = Self::default();
        for spell in spells {
            let key = incantation_key(&spell.incantation);
            if book.spells.contains_key(&key) {
                warn!(
                    incantation = %spell.incantation,
                    "duplicate incantation in spellbook, ignoring later spell"
                );
                continue;
            }
            book.spells.insert(key, spell);
        }
        info!("Loaded {} spells into the spellbook", book.spells.len());
        book
    }

    /// Look up a spell by what was said.
    pub fn get(&self, incantation: &str) -> Option<&SpellData> {
        self.spells.get(&incantation_key(incantation))
    }

    /// Sorted incantations, for voice grammars and UI lists.
    pub fn incantations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .spells
            .values()
            .map(|s| s.incantation.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellData> {
        self.spells.values()
    }

    /// Score a projected path against every spell's gesture, best first.
    ///
    /// Spells are scored in parallel; ties are ordered by incantation so the
    /// result is deterministic.
    pub fn rank(&self, matcher: &GestureMatcher, path: &[Point2]) -> Vec<Ranked> {
        let mut ranked: Vec<Ranked> = self
            .spells
            .par_iter()
            .map(|(_, spell)| Ranked {
                incantation: spell.incantation.clone(),
                score: matcher.recognize_2d(path, &spell.gesture),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.incantation.cmp(&b.incantation))
        });
        ranked
    }

    /// [`rank`](Self::rank) for a 3D capture, flattened with `projector` first.
    pub fn rank_captured<P>(
        &self,
        matcher: &GestureMatcher,
        captured: &[Point3],
        projector: &P,
    ) -> Vec<Ranked>
    where
        P: Projector + ?Sized,
    {
        let flattened: Vec<Point2> = captured.iter().map(|&p| projector.project(p)).collect();
        self.rank(matcher, &flattened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::OrthographicProjector;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const YAML: &str = r#"
version: "1.0"
spells:
  - incantation: "Ignis"
    gesture: [[-0.5, -0.5], [0.0, 0.5], [0.5, -0.5]]
    effect:
      message: "Fire!"
      font_size: 32
      lifetime_secs: 1.5
      screen_position: [0.5, 0.8]
  - incantation: "glacies"
    gesture: [[-0.5, 0.0], [0.5, 0.0]]
  - incantation: "ignis"
    gesture: [[0.0, -0.5], [0.0, 0.5]]
"#;

    #[test]
    fn parses_spells_with_defaults() {
        let book = Spellbook::from_yaml(YAML).unwrap();
        assert_eq!(book.len(), 2);

        let fire = book.get("ignis").unwrap();
        assert_eq!(fire.incantation, "Ignis");
        assert_eq!(fire.gesture.len(), 3);
        assert_eq!(fire.effect.message, "Fire!");
        assert_eq!(fire.effect.font_size, 32);
        assert_eq!(fire.effect.screen_position, Point2::new(0.5, 0.8));

        let ice = book.get("glacies").unwrap();
        assert_eq!(ice.effect, SpellEffect::default());
    }

    #[test]
    fn first_duplicate_wins() {
        let book = Spellbook::from_yaml(YAML).unwrap();
        let fire = book.get("IGNIS").unwrap();
        assert_eq!(fire.gesture[0], Point2::new(-0.5, -0.5));
    }

    #[test]
    fn lookup_normalizes_incantation() {
        let book = Spellbook::from_yaml(YAML).unwrap();
        assert!(book.get("  Glacies ").is_some());
        assert!(book.get("lumos").is_none());
    }

    #[test]
    fn incantations_are_sorted() {
        let book = Spellbook::from_yaml(YAML).unwrap();
        assert_eq!(book.incantations(), vec!["Ignis", "glacies"]);
    }

    #[test]
    fn empty_document() {
        let book = Spellbook::from_yaml("version: \"1.0\"").unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = Spellbook::from_yaml("spells: [ { incantation: 3, gesture: nope } ]");
        assert!(matches!(err, Err(SpellbookError::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", YAML).unwrap();
        let book = Spellbook::load(file.path()).unwrap();
        assert_eq!(book.len(), 2);

        let missing = Spellbook::load("/nonexistent/spellbook.yaml");
        assert!(matches!(missing, Err(SpellbookError::Io { .. })));
    }

    #[test]
    fn rank_puts_matching_gesture_first() {
        let book = Spellbook::from_yaml(YAML).unwrap();
        let matcher = GestureMatcher::new();
        let drawn = vec![
            Point2::new(0.0, 0.0),
            Point2::new(50.0, 100.0),
            Point2::new(100.0, 0.0),
        ];
        let ranked = book.rank(&matcher, &drawn);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].incantation, "Ignis");
        assert!(ranked[0].score > 0.99);
        assert!(ranked[1].score < ranked[0].score);
    }

    #[test]
    fn rank_captured_projects_first() {
        let book = Spellbook::from_yaml(YAML).unwrap();
        let matcher = GestureMatcher::new();
        let captured = vec![Point3::new(-1.0, 0.0, 4.0), Point3::new(1.0, 0.0, 4.0)];
        let ranked = book.rank_captured(&matcher, &captured, &OrthographicProjector::xy());
        assert_eq!(ranked[0].incantation, "glacies");
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
    }
}
