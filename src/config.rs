//! # Configuration Module
//!
//! This module defines the immutable configuration value the parser is built
//! from: the unit table, per-dimension formatting rules, language vocabulary,
//! and display settings. A configuration is constructed once, wrapped in an
//! `Arc` by the parser, and read as a snapshot everywhere downstream; swapping
//! configuration means building a new parser.
//!
//! All types serialize with serde, so unit tables and formatting rules can be
//! stored or shipped as data.

use serde::{Deserialize, Serialize};

use crate::unit_catalog;

/// One scaling prefix accepted in front of a unit's surface forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixSpec {
    /// The prefix text ("k", "kilo")
    pub prefix: String,
    /// What the prefix multiplies the unit scale by
    pub multiplier: f64,
}

impl PrefixSpec {
    pub fn new(prefix: &str, multiplier: f64) -> Self {
        Self {
            prefix: prefix.to_string(),
            multiplier,
        }
    }
}

/// One unit inside a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Canonical key, also the display form ("g", "cup")
    pub key: String,
    /// Plural display form; the key doubles as plural when empty
    pub plural: String,
    /// Additional surface forms that resolve to this unit
    pub variants: Vec<String>,
    /// Scaling prefixes combined with every surface form
    pub prefixes: Vec<PrefixSpec>,
    /// Scale against the dimension's base unit
    pub scale: f64,
}

impl UnitSpec {
    /// A unit with the given key and scale and no extra surface forms
    pub fn new(key: &str, scale: f64) -> Self {
        Self {
            key: key.to_string(),
            plural: String::new(),
            variants: Vec::new(),
            prefixes: Vec::new(),
            scale,
        }
    }

    pub fn with_plural(mut self, plural: &str) -> Self {
        self.plural = plural.to_string();
        self
    }

    pub fn with_variants(mut self, variants: &[&str]) -> Self {
        self.variants = variants.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_prefixes(mut self, prefixes: Vec<PrefixSpec>) -> Self {
        self.prefixes = prefixes;
        self
    }
}

/// A named dimension and its units, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub units: Vec<UnitSpec>,
}

impl DimensionSpec {
    pub fn new(name: &str, units: Vec<UnitSpec>) -> Self {
        Self {
            name: name.to_string(),
            units,
        }
    }
}

/// A single check a display-unit rule applies to the smallest value of an
/// amount, in the unit's base scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    LessThan(f64),
    LessOrEqual(f64),
    GreaterThan(f64),
    GreaterOrEqual(f64),
    EqualTo(f64),
    /// Passes when value / base lands on an intuitive fraction (or a whole
    /// number), using the same denominator search display splitting uses
    FractionOf(f64),
    AlwaysTrue,
}

/// One display-unit selection rule: the unit wins when every check passes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatRule {
    /// Surface form of the unit to display in ("cm", "kg", "dl")
    pub unit: String,
    pub checks: Vec<Predicate>,
}

impl FormatRule {
    pub fn new(unit: &str, checks: Vec<Predicate>) -> Self {
        Self {
            unit: unit.to_string(),
            checks,
        }
    }
}

/// Ordered display rules for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionFormatting {
    pub dimension: String,
    pub rules: Vec<FormatRule>,
}

impl DimensionFormatting {
    pub fn new(dimension: &str, rules: Vec<FormatRule>) -> Self {
        Self {
            dimension: dimension.to_string(),
            rules,
        }
    }
}

/// Language-dependent vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagePack {
    /// Prefix words marking an approximate amount ("ca. 1/2 gram"); only
    /// consumed when a number follows
    pub approx_prefixes: Vec<String>,
    /// Origin label used in records for components without a recipe
    pub no_recipe_name: String,
}

impl LanguagePack {
    /// English vocabulary
    pub fn english() -> Self {
        Self {
            approx_prefixes: ["ca.", "ca", "aprox.", "aprox", "aprx.", "aprx", "aproximately"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            no_recipe_name: "other".to_string(),
        }
    }

    /// Norwegian vocabulary; includes the english approximation prefixes
    pub fn norwegian() -> Self {
        let mut pack = Self::english();
        for p in ["omtrent", "minst", "circar"] {
            pack.approx_prefixes.push(p.to_string());
        }
        pack.no_recipe_name = "annet".to_string();
        pack
    }
}

impl Default for LanguagePack {
    fn default() -> Self {
        Self::english()
    }
}

/// Display settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Replace ascii fractions in formatted output with unicode glyphs
    /// ("1/2" becomes "½")
    pub small_fractions: bool,
}

/// A unicode fraction glyph and its ascii spelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionGlyph {
    pub glyph: String,
    pub ascii: String,
}

/// The complete, immutable parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryConfig {
    /// Unit table; dimension order is the disambiguation policy for unit
    /// tokens that appear in several dimensions
    pub units: Vec<DimensionSpec>,
    /// Display rules per dimension
    pub formatting: Vec<DimensionFormatting>,
    /// Language vocabulary
    pub language: LanguagePack,
    /// Display settings
    pub settings: Settings,
    /// Denominators tried when splitting values into fractions, in order
    pub intuitive_denominators: Vec<u32>,
    /// How far off a value may be and still count as an intuitive fraction
    pub fraction_epsilon: f64,
    /// Unicode fraction glyphs and their ascii spellings
    pub fraction_glyphs: Vec<FractionGlyph>,
    /// Default name-similarity threshold for containment checks (0..100)
    pub ingredient_match_limit: f64,
}

impl GroceryConfig {
    pub fn with_language(mut self, language: LanguagePack) -> Self {
        self.language = language;
        self
    }

    pub fn with_small_fractions(mut self, small_fractions: bool) -> Self {
        self.settings.small_fractions = small_fractions;
        self
    }

    pub fn with_match_limit(mut self, limit: f64) -> Self {
        self.ingredient_match_limit = limit;
        self
    }
}

impl Default for GroceryConfig {
    /// The built-in metric + imperial + Norwegian-household catalog with
    /// english vocabulary
    fn default() -> Self {
        Self {
            units: unit_catalog::metric_imperial_units(),
            formatting: unit_catalog::metric_imperial_formatting(),
            language: LanguagePack::english(),
            settings: Settings::default(),
            intuitive_denominators: vec![2, 3, 4, 8],
            fraction_epsilon: 0.001,
            fraction_glyphs: default_fraction_glyphs(),
            ingredient_match_limit: 90.0,
        }
    }
}

fn default_fraction_glyphs() -> Vec<FractionGlyph> {
    [
        ("½", "1/2"),
        ("⅓", "1/3"),
        ("⅔", "2/3"),
        ("¼", "1/4"),
        ("¾", "3/4"),
        ("⅕", "1/5"),
        ("⅖", "2/5"),
        ("⅗", "3/5"),
        ("⅘", "4/5"),
        ("⅙", "1/6"),
        ("⅚", "5/6"),
        ("⅛", "1/8"),
        ("⅜", "3/8"),
        ("⅝", "5/8"),
        ("⅞", "7/8"),
    ]
    .iter()
    .map(|(glyph, ascii)| FractionGlyph {
        glyph: glyph.to_string(),
        ascii: ascii.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_catalog() {
        let config = GroceryConfig::default();
        let names: Vec<&str> = config.units.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["length", "mass", "volume", "hvitløk", "other"]);
        assert!(config.formatting.iter().any(|f| f.dimension == "mass"));
    }

    #[test]
    fn test_language_packs() {
        let english = LanguagePack::english();
        assert!(english.approx_prefixes.iter().any(|p| p == "ca."));
        assert!(!english.approx_prefixes.iter().any(|p| p == "minst"));

        let norwegian = LanguagePack::norwegian();
        assert!(norwegian.approx_prefixes.iter().any(|p| p == "minst"));
        assert_eq!(norwegian.no_recipe_name, "annet");
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = GroceryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GroceryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_builder_methods() {
        let config = GroceryConfig::default()
            .with_language(LanguagePack::norwegian())
            .with_small_fractions(true)
            .with_match_limit(80.0);
        assert!(config.settings.small_fractions);
        assert_eq!(config.ingredient_match_limit, 80.0);
        assert_eq!(config.language.no_recipe_name, "annet");
    }
}
