//! # Ingredient Model
//!
//! Data model for parsed ingredients:
//!
//! - [`IngredientComponent`]: one parsed line, keeping its amount, unit,
//!   comments, origin, and the original text
//! - [`Ingredient`]: one or more components under the same identity.
//!   Identity is the pair of name and dimension, so "2 dl melk" and
//!   "2 g melk" stay separate while "pakke" and "pakker" combine
//!
//! Amounts are normalized to each dimension's base unit when summed, and
//! formatted back through the dimension's display rules.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::GroceryError;
use crate::similarity::similarity;
use crate::units::UnitDimension;

/// One parsed ingredient line
#[derive(Debug, Clone)]
pub struct IngredientComponent {
    /// Ingredient name with amount, unit, and comments stripped
    pub name: String,
    /// Amount as written, in the matched unit
    pub amount: Amount,
    /// Dimension the component's unit belongs to
    pub unit: Arc<UnitDimension>,
    /// Scale of the matched unit against the dimension's base unit
    pub unit_scale: f64,
    /// List-level multiplier; -1 marks a subtracted component
    pub scale: f64,
    /// Comments stripped from the text, without their delimiters
    pub comments: Vec<String>,
    /// Where the component came from, e.g. a recipe name
    pub recipe: Option<String>,
    /// The unmodified input text
    pub original_text: String,
}

impl IngredientComponent {
    /// The component's amount normalized to the dimension's base unit
    pub fn amount(&self) -> Amount {
        self.amount.scaled(self.scale * self.unit_scale)
    }

    /// The normalized amount formatted through the dimension's display rules
    pub fn amount_formatted(&self) -> String {
        self.unit.format_amount(&self.amount())
    }

    /// Multiply the component's amount, keeping the written text intact
    pub fn scale_by(&mut self, factor: f64) {
        self.scale *= factor;
    }
}

/// An ingredient with one or more components sharing its identity.
///
/// An ingredient does not have to be a literal ingredient; it can be
/// anything a shopping list needs to carry.
#[derive(Debug, Clone)]
pub struct Ingredient {
    /// Name shared by all components
    pub name: String,
    /// Dimension shared by all components
    pub unit: Arc<UnitDimension>,
    /// The components this ingredient was collected from
    pub components: Vec<IngredientComponent>,
}

impl PartialEq for Ingredient {
    /// Ingredients are equal when name and dimension agree; amounts are
    /// what combining reconciles
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.unit == other.unit
    }
}

impl Ingredient {
    /// Wrap a single component
    pub fn from_component(component: IngredientComponent) -> Self {
        Self {
            name: component.name.clone(),
            unit: component.unit.clone(),
            components: vec![component],
        }
    }

    /// Build an ingredient from components that must all share one identity
    pub fn from_components(components: Vec<IngredientComponent>) -> Result<Self, GroceryError> {
        let mut iter = components.into_iter();
        let first = iter.next().ok_or_else(|| {
            GroceryError::InvalidInput("an ingredient needs at least one component".to_string())
        })?;
        let mut ingredient = Self::from_component(first);
        for component in iter {
            let id = format!("{}_{}", component.name, component.unit.name());
            if id != ingredient.id() {
                return Err(GroceryError::IdentityMismatch {
                    expected: ingredient.id(),
                    found: id,
                });
            }
            ingredient.components.push(component);
        }
        Ok(ingredient)
    }

    /// Identity used for collation: name and dimension
    pub fn id(&self) -> String {
        format!("{}_{}", self.name, self.unit.name())
    }

    /// Absorb another ingredient's components.
    ///
    /// Fails with [`GroceryError::IdentityMismatch`] when the identities
    /// differ.
    pub fn combine(&mut self, other: Ingredient) -> Result<(), GroceryError> {
        if *self != other {
            return Err(GroceryError::IdentityMismatch {
                expected: self.id(),
                found: other.id(),
            });
        }
        self.merge_unchecked(other);
        Ok(())
    }

    /// Merge components without the identity check; callers have already
    /// grouped by id
    pub(crate) fn merge_unchecked(&mut self, other: Ingredient) {
        self.components.extend(other.components);
    }

    /// Total amount in base units.
    ///
    /// When every component is unspecified but one of them was subtracted,
    /// the total is zero rather than unspecified: subtracting something you
    /// never counted still means you have it.
    pub fn amount(&self) -> Amount {
        let total = self
            .components
            .iter()
            .fold(Amount::Unspecified, |acc, component| {
                acc + component.amount()
            });
        if total.is_unspecified() {
            let positive = self.components.iter().filter(|c| c.scale > 0.0).count();
            if positive < self.components.len() {
                return Amount::Single(0.0);
            }
        }
        total
    }

    /// True when the ingredient carries any amount, including zero
    pub fn has_amount(&self) -> bool {
        !self.amount().is_unspecified()
    }

    /// The total amount formatted through the dimension's display rules
    pub fn amount_formatted(&self) -> String {
        self.unit.format_amount(&self.amount())
    }

    /// "amount name" line, optionally with all component comments appended
    pub fn formatted(&self, include_comments: bool) -> String {
        let amount_unit = if self.has_amount() {
            format!("{} ", self.amount_formatted())
        } else {
            String::new()
        };
        let comments = if include_comments {
            let all: Vec<&str> = self
                .components
                .iter()
                .flat_map(|c| c.comments.iter().map(|s| s.as_str()))
                .collect();
            if all.is_empty() {
                String::new()
            } else {
                format!(", {}", all.join(", "))
            }
        } else {
            String::new()
        };
        format!("{amount_unit}{}{comments}", self.name)
    }

    /// "amount name" with the amount right-aligned to `width`, for lists
    pub fn formatted_pretty(&self, width: usize) -> String {
        let amount_unit = if self.has_amount() {
            format!("{} ", self.amount_formatted())
        } else {
            String::new()
        };
        format!("{amount_unit:>width$}{}", self.name)
    }

    /// Multiply all component amounts
    pub fn scale_by(&mut self, factor: f64) {
        for component in &mut self.components {
            component.scale_by(factor);
        }
    }

    /// Tag every component with an origin
    pub fn set_origin(&mut self, origin: &str) {
        for component in &mut self.components {
            component.recipe = Some(origin.to_string());
        }
    }

    /// Serializable snapshot; components without an origin fall back to
    /// `fallback_origin`
    pub fn record(&self, fallback_origin: &str) -> IngredientRecord {
        IngredientRecord {
            name: self.name.clone(),
            amount: self.amount_formatted(),
            components: self
                .components
                .iter()
                .map(|component| ComponentRecord {
                    origin: component
                        .recipe
                        .clone()
                        .unwrap_or_else(|| fallback_origin.to_string()),
                    name: component.name.clone(),
                    amount: component.amount_formatted(),
                    comments: component.comments.clone(),
                })
                .collect(),
        }
    }

    /// Check whether this ingredient covers `other`.
    ///
    /// Names are compared with Ratcliff/Obershelp similarity against
    /// `threshold` (0 to 100). Short names tighten the threshold: below six
    /// characters it grows linearly toward 100 so that "salt" cannot match
    /// "malt". With `use_amount`, amounts must be comparable (same
    /// dimension) and this ingredient's maximum must cover the other's;
    /// unspecified amounts on either side always pass.
    pub fn contains(&self, other: &Ingredient, use_amount: bool, threshold: f64) -> ContainsMatch {
        let name_score = similarity(&self.name, &other.name);

        let min_len = self.name.chars().count().min(other.name.chars().count()) as f64;
        let tightened = threshold + (100.0 - threshold) * (6.0 - min_len) / 6.0;
        let effective = threshold.max(tightened).min(100.0);

        if name_score < effective {
            return ContainsMatch {
                matched: false,
                name_score,
                amount_score: 0.0,
            };
        }

        if !use_amount || self.amount().is_unspecified() || other.amount().is_unspecified() {
            return ContainsMatch {
                matched: true,
                name_score,
                amount_score: 100.0,
            };
        }

        let covers = self.unit == other.unit
            && self.amount().max().unwrap_or(0.0) >= other.amount().max().unwrap_or(0.0);
        ContainsMatch {
            matched: covers,
            name_score,
            amount_score: if covers { 100.0 } else { 0.0 },
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted(false))
    }
}

/// Result of an [`Ingredient::contains`] check, with both partial scores
#[derive(Debug, Clone, PartialEq)]
pub struct ContainsMatch {
    pub matched: bool,
    /// Name similarity, 0 to 100
    pub name_score: f64,
    /// 100 when amounts are covered or irrelevant, 0 otherwise
    pub amount_score: f64,
}

/// Serializable form of one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub origin: String,
    pub name: String,
    pub amount: String,
    pub comments: Vec<String>,
}

/// Serializable form of one ingredient with its components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub amount: String,
    pub components: Vec<ComponentRecord>,
}
