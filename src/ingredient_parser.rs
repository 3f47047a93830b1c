//! # Ingredient Parser
//!
//! This module parses free-form ingredient text like
//! "ca. 1/2 gram safran, finhakket" into structured components.
//!
//! ## Features
//!
//! - Normalize unicode fraction glyphs (½, ¾) to ascii before scanning
//! - Scan the leading amount: single values, two-ended ranges, mixed
//!   fractions, and approximation prefixes ("ca.", "aprox.")
//! - Resolve a unit token against the first remaining word, falling back to
//!   the unitless dimension
//! - Extract comments in parentheses or after ", " and strip them from the
//!   name
//!
//! Parsing never fails: text without an amount becomes an unspecified
//! quantity of the whole text.
//!
//! ## Usage
//!
//! ```rust
//! use groceries::ingredient_parser::IngredientParser;
//!
//! let parser = IngredientParser::new()?;
//! let ingredient = parser.parse_ingredient("2 cups flour");
//!
//! assert_eq!(ingredient.name, "flour");
//! assert_eq!(ingredient.amount_formatted(), "2 cups");
//! # Ok::<(), groceries::error::GroceryError>(())
//! ```

use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::config::GroceryConfig;
use crate::error::GroceryError;
use crate::ingredient::{Ingredient, IngredientComponent};
use crate::number_parser::NumberParser;
use crate::units::UnitRegistry;

lazy_static! {
    /// Comment spans: a lazy parenthesized group, or ", " through end of line
    static ref COMMENT_PATTERN: Regex =
        Regex::new(r"\(.*?\)|, .*?$").expect("Comment pattern should be valid");
}

/// Input accepted wherever an ingredient can be added: raw text to parse,
/// or an already parsed ingredient moved in from elsewhere
#[derive(Debug, Clone)]
pub enum IngredientInput {
    Text(String),
    Existing(Ingredient),
}

impl From<&str> for IngredientInput {
    fn from(text: &str) -> Self {
        IngredientInput::Text(text.to_string())
    }
}

impl From<String> for IngredientInput {
    fn from(text: String) -> Self {
        IngredientInput::Text(text)
    }
}

impl From<&String> for IngredientInput {
    fn from(text: &String) -> Self {
        IngredientInput::Text(text.clone())
    }
}

impl From<Ingredient> for IngredientInput {
    fn from(ingredient: Ingredient) -> Self {
        IngredientInput::Existing(ingredient)
    }
}

/// Parser owning an immutable configuration snapshot and the unit registry
/// compiled from it. Cloning is cheap; clones share both.
#[derive(Debug, Clone)]
pub struct IngredientParser {
    config: Arc<GroceryConfig>,
    registry: Arc<UnitRegistry>,
    number: NumberParser,
}

impl IngredientParser {
    /// Create a parser with the default configuration
    pub fn new() -> Result<Self, GroceryError> {
        Self::with_config(GroceryConfig::default())
    }

    /// Create a parser with a custom configuration.
    ///
    /// The configuration is validated while compiling the unit registry;
    /// formatting rules that target undeclared units are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use groceries::config::{GroceryConfig, LanguagePack};
    /// use groceries::ingredient_parser::IngredientParser;
    ///
    /// let config = GroceryConfig::default().with_language(LanguagePack::norwegian());
    /// let parser = IngredientParser::with_config(config)?;
    /// let ingredient = parser.parse_ingredient("minst 2 dl fløte");
    ///
    /// assert_eq!(ingredient.name, "fløte");
    /// # Ok::<(), groceries::error::GroceryError>(())
    /// ```
    pub fn with_config(config: GroceryConfig) -> Result<Self, GroceryError> {
        let registry = Arc::new(UnitRegistry::from_config(&config)?);
        let number = NumberParser::new(&config.language.approx_prefixes);
        Ok(Self {
            config: Arc::new(config),
            registry,
            number,
        })
    }

    /// The configuration this parser was built from
    pub fn config(&self) -> &GroceryConfig {
        &self.config
    }

    /// The unit registry compiled from the configuration
    pub fn registry(&self) -> &Arc<UnitRegistry> {
        &self.registry
    }

    /// Parse one line of ingredient text into a component.
    ///
    /// `origin` names where the component came from, e.g. a recipe.
    pub fn parse_component(&self, text: &str, origin: Option<&str>) -> IngredientComponent {
        let mut working = text.trim().to_string();
        for glyph in &self.config.fraction_glyphs {
            if working.contains(glyph.glyph.as_str()) {
                working = working.replace(glyph.glyph.as_str(), glyph.ascii.as_str());
            }
        }

        let (amount, consumed) = self.number.leading_amount(&working);
        let mut remainder = working[consumed.len()..].trim().to_string();

        // only the first whitespace-delimited token can carry a unit
        let token = remainder.split_whitespace().next().unwrap_or("");
        let unit_match = self.registry.resolve(token);
        if !unit_match.text.is_empty() {
            remainder.replace_range(unit_match.range.clone(), "");
        }
        let mut name = remainder.trim().to_string();

        let mut comments = Vec::new();
        let spans: Vec<(usize, usize)> = COMMENT_PATTERN
            .find_iter(&name)
            .map(|m| (m.start(), m.end()))
            .collect();
        for (start, end) in &spans {
            let span = &name[*start..*end];
            let inner = if span.starts_with('(') {
                &span[1..span.len() - 1]
            } else {
                &span[2..]
            };
            if !inner.is_empty() {
                comments.push(inner.to_string());
            }
        }
        // remove back to front so earlier offsets stay valid
        for (start, end) in spans.iter().rev() {
            name.replace_range(*start..*end, "");
        }
        let name = name.trim().to_string();

        debug!(
            "Parsed '{}' into name '{}', amount {:?}, dimension '{}'",
            text,
            name,
            amount,
            unit_match.unit.name()
        );

        IngredientComponent {
            name,
            amount,
            unit: unit_match.unit,
            unit_scale: unit_match.scale,
            scale: 1.0,
            comments,
            recipe: origin.map(|o| o.to_string()),
            original_text: text.to_string(),
        }
    }

    /// Parse text into a single-component ingredient, or pass an existing
    /// ingredient through unchanged
    pub fn parse_ingredient<I: Into<IngredientInput>>(&self, input: I) -> Ingredient {
        self.parse_ingredient_with_origin(input, None)
    }

    /// Like [`parse_ingredient`](Self::parse_ingredient), tagging parsed
    /// components with an origin
    pub fn parse_ingredient_with_origin<I: Into<IngredientInput>>(
        &self,
        input: I,
        origin: Option<&str>,
    ) -> Ingredient {
        match input.into() {
            IngredientInput::Text(text) => {
                Ingredient::from_component(self.parse_component(&text, origin))
            }
            IngredientInput::Existing(ingredient) => ingredient,
        }
    }
}
