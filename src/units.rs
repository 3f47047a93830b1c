//! # Units Module
//!
//! This module turns the configured unit table into a matching and formatting
//! engine:
//!
//! - A lookup from every surface form (variants, plurals, prefixed forms) to
//!   its scale and display spellings, built per dimension
//! - Whole-token matching of unit tokens in text, with dimension declaration
//!   order deciding ambiguous tokens
//! - Display-unit selection through ordered predicate rules, evaluated
//!   against the smallest value of an amount
//! - Value splitting into integers and intuitive fractions, range rendering,
//!   pluralization, and the optional unicode-fraction post-pass

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use log::{debug, info};
use regex::Regex;

use crate::amount::Amount;
use crate::config::{FormatRule, GroceryConfig, Predicate, UnitSpec};
use crate::error::GroceryError;

/// Dimension name used when no unit token matched
pub const NONE_DIMENSION: &str = "none";

/// Display options shared by every dimension of a registry
#[derive(Debug, Clone)]
pub(crate) struct FormatStyle {
    /// Denominators tried when splitting values, in order
    denominators: Vec<u32>,
    /// Tolerance for snapping to integers and fractions
    epsilon: f64,
    /// Swap ascii fractions for unicode glyphs in output
    small_fractions: bool,
    /// (ascii, glyph) substitution pairs
    glyphs: Vec<(String, String)>,
}

impl FormatStyle {
    fn from_config(config: &GroceryConfig) -> Self {
        Self {
            denominators: config.intuitive_denominators.clone(),
            epsilon: config.fraction_epsilon,
            small_fractions: config.settings.small_fractions,
            glyphs: config
                .fraction_glyphs
                .iter()
                .map(|g| (g.ascii.clone(), g.glyph.clone()))
                .collect(),
        }
    }
}

/// Scale and display spellings behind one surface form
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    /// Multiplier against the dimension's base unit
    pub scale: f64,
    /// Singular display form ("kg", "cup")
    pub singular: String,
    /// Plural display form ("cups"); equals the singular when none declared
    pub plural: String,
}

/// One value of an amount, split for display in the chosen unit
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledAmountPart {
    /// Whole part of the scaled value
    pub integer: f64,
    /// Fractional part (0 when the value snapped to an integer)
    pub decimal: f64,
    /// Intuitive fraction numerator, 0 when none applied
    pub numerator: u32,
    /// Intuitive fraction denominator, 0 when none applied
    pub denominator: u32,
    /// Surface form the value is displayed in
    pub unit: String,
}

/// Result of resolving a unit token against the registry
#[derive(Debug, Clone)]
pub struct UnitMatch {
    /// The dimension the token belongs to
    pub unit: Arc<UnitDimension>,
    /// Scale of the matched surface form against the dimension's base unit
    pub scale: f64,
    /// The exact matched text (empty for the none dimension)
    pub text: String,
    /// Byte range of the match within the probed text
    pub range: Range<usize>,
}

/// One physical dimension with its surface forms and display rules
#[derive(Debug)]
pub struct UnitDimension {
    name: String,
    lookup: HashMap<String, UnitEntry>,
    /// Surface forms in insertion order, for deterministic fallback scans
    ordered_forms: Vec<String>,
    pattern: Option<Regex>,
    rules: Vec<FormatRule>,
    style: Arc<FormatStyle>,
}

impl PartialEq for UnitDimension {
    /// Dimensions are equal by name; lookups follow from the same config
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for UnitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl UnitDimension {
    fn from_spec(
        name: &str,
        units: &[UnitSpec],
        rules: &[FormatRule],
        style: Arc<FormatStyle>,
    ) -> Result<Self, GroceryError> {
        let mut lookup: HashMap<String, UnitEntry> = HashMap::new();
        let mut ordered_forms: Vec<String> = Vec::new();
        for unit in units {
            let mut forms: Vec<&str> = unit.variants.iter().map(|v| v.as_str()).collect();
            forms.push(unit.key.as_str());
            if !unit.plural.is_empty() {
                forms.push(unit.plural.as_str());
            }

            let mut insert = |surface: String, entry: UnitEntry| {
                // first declaration of a surface form wins
                if !lookup.contains_key(&surface) {
                    ordered_forms.push(surface.clone());
                    lookup.insert(surface, entry);
                }
            };

            for form in &forms {
                insert(
                    form.to_string(),
                    UnitEntry {
                        scale: unit.scale,
                        singular: unit.key.clone(),
                        plural: if unit.plural.is_empty() {
                            unit.key.clone()
                        } else {
                            unit.plural.clone()
                        },
                    },
                );
            }
            for prefix in &unit.prefixes {
                for form in &forms {
                    let singular = format!("{}{}", prefix.prefix, unit.key);
                    insert(
                        format!("{}{}", prefix.prefix, form),
                        UnitEntry {
                            scale: prefix.multiplier * unit.scale,
                            plural: if unit.plural.is_empty() {
                                singular.clone()
                            } else {
                                format!("{}{}", prefix.prefix, unit.plural)
                            },
                            singular,
                        },
                    );
                }
            }
        }

        for rule in rules {
            if !lookup.contains_key(&rule.unit) {
                return Err(GroceryError::InvalidUnitDefinition(format!(
                    "formatting rule for dimension '{name}' targets unknown unit '{}'",
                    rule.unit
                )));
            }
        }

        let mut alternatives: Vec<String> = ordered_forms
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| regex::escape(f))
            .collect();
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()));
        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))?)
        };

        Ok(Self {
            name: name.to_string(),
            lookup,
            ordered_forms,
            pattern,
            rules: rules.to_vec(),
            style,
        })
    }

    /// The dimension used when no unit token matched: a single, empty
    /// surface form with scale 1 that never matches anything
    fn none(style: Arc<FormatStyle>) -> Self {
        let mut lookup = HashMap::new();
        lookup.insert(
            String::new(),
            UnitEntry {
                scale: 1.0,
                singular: String::new(),
                plural: String::new(),
            },
        );
        Self {
            name: NONE_DIMENSION.to_string(),
            lookup,
            ordered_forms: vec![String::new()],
            pattern: None,
            rules: Vec::new(),
            style,
        }
    }

    /// Dimension name ("mass", "other_pakke", "none")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the fallback dimension of unitless amounts
    pub fn is_none(&self) -> bool {
        self.name == NONE_DIMENSION
    }

    /// Lookup entry behind a surface form
    pub fn entry(&self, form: &str) -> Option<&UnitEntry> {
        self.lookup.get(form)
    }

    /// First whole-token surface form in `text`, with its scale and range
    pub fn find(&self, text: &str) -> Option<(f64, Range<usize>)> {
        let pattern = self.pattern.as_ref()?;
        let hit = pattern.find(text)?;
        let entry = self.lookup.get(hit.as_str())?;
        Some((entry.scale, hit.range()))
    }

    /// Split every value of `amount` for display.
    ///
    /// Values are sorted ascending; the display unit is selected once, from
    /// the smallest value, and applies to the whole amount. Unspecified
    /// amounts yield no parts.
    pub fn scale_amount(&self, amount: &Amount) -> Vec<ScaledAmountPart> {
        let values = amount.sorted_values();
        if values.is_empty() {
            return Vec::new();
        }
        self.scale_values(&values)
    }

    fn scale_values(&self, values: &[f64]) -> Vec<ScaledAmountPart> {
        let form = self.display_form(values[0]);
        let scale = self.lookup.get(&form).map(|e| e.scale).unwrap_or(1.0);
        values
            .iter()
            .map(|value| {
                let (integer, decimal, numerator, denominator) = self.split_value(value / scale);
                ScaledAmountPart {
                    integer,
                    decimal,
                    numerator,
                    denominator,
                    unit: form.clone(),
                }
            })
            .collect()
    }

    /// The surface form the amount displays in: the first rule whose checks
    /// all pass on `smallest`, else the first form with scale 1, else the
    /// form with the smallest scale
    fn display_form(&self, smallest: f64) -> String {
        for rule in &self.rules {
            if rule.checks.iter().all(|check| check.holds(smallest, &self.style)) {
                return rule.unit.clone();
            }
        }
        let mut fallback: Option<(&String, f64)> = None;
        for form in &self.ordered_forms {
            let entry = match self.lookup.get(form) {
                Some(entry) => entry,
                None => continue,
            };
            if entry.scale == 1.0 {
                return form.clone();
            }
            if fallback.map_or(true, |(_, scale)| entry.scale < scale) {
                fallback = Some((form, entry.scale));
            }
        }
        fallback.map(|(form, _)| form.clone()).unwrap_or_default()
    }

    /// Split one scaled value into whole part, fractional part, and an
    /// intuitive fraction when one is close enough. Values within epsilon of
    /// an integer snap to it, which also keeps float noise out of display.
    fn split_value(&self, value: f64) -> (f64, f64, u32, u32) {
        let rounded = value.round();
        if (value - rounded).abs() < self.style.epsilon {
            return (rounded, 0.0, 0, 0);
        }
        let integer = value.trunc();
        let decimal = value.fract();
        if decimal > 0.0 {
            if let Some((numerator, denominator)) =
                intuitive_fraction(decimal, &self.style.denominators, self.style.epsilon)
            {
                return (integer, decimal, numerator, denominator);
            }
        }
        (integer, decimal, 0, 0)
    }

    /// Format `amount` in this dimension: scaled values joined with " - ",
    /// an all-negative amount shown as absolute values behind one minus, and
    /// the pluralized unit word appended. Unspecified formats as "".
    pub fn format_amount(&self, amount: &Amount) -> String {
        let mut values = amount.sorted_values();
        if values.is_empty() {
            return String::new();
        }
        let negative = values.iter().all(|v| *v < 0.0);
        if negative {
            for value in values.iter_mut() {
                *value = value.abs();
            }
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        }

        let parts = self.scale_values(&values);
        let rendered: Vec<String> = parts.iter().map(render_value).collect();
        let mut formatted = rendered.join(" - ");
        if negative {
            formatted = format!("-{formatted}");
        }

        if let Some(last) = parts.last() {
            let singular = (last.integer == 1.0 && last.decimal == 0.0) || last.numerator > 0;
            if let Some(entry) = self.lookup.get(&last.unit) {
                let unit_word = if singular { &entry.singular } else { &entry.plural };
                if !unit_word.is_empty() {
                    formatted = format!("{formatted} {unit_word}");
                }
            }
        }

        if self.style.small_fractions {
            for (ascii, glyph) in &self.style.glyphs {
                formatted = formatted.replace(ascii.as_str(), glyph.as_str());
            }
        }
        formatted
    }
}

/// Render one split value: "int n/d", "n/d", two decimals, or a whole number
fn render_value(part: &ScaledAmountPart) -> String {
    if part.numerator > 0 {
        if part.integer > 0.0 {
            format!("{:.0} {}/{}", part.integer, part.numerator, part.denominator)
        } else {
            format!("{}/{}", part.numerator, part.denominator)
        }
    } else if part.decimal != 0.0 {
        format!("{:.2}", part.integer + part.decimal)
    } else {
        format!("{:.0}", part.integer)
    }
}

/// Smallest configured denominator d where `fractional * d` is within epsilon
/// of a whole numerator
fn intuitive_fraction(fractional: f64, denominators: &[u32], epsilon: f64) -> Option<(u32, u32)> {
    for &denominator in denominators {
        let scaled = fractional * denominator as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() < epsilon && rounded >= 1.0 {
            return Some((rounded as u32, denominator));
        }
    }
    None
}

impl Predicate {
    /// Evaluate one display-rule check against a value in base units
    pub(crate) fn holds(&self, value: f64, style: &FormatStyle) -> bool {
        match *self {
            Predicate::LessThan(limit) => value < limit,
            Predicate::LessOrEqual(limit) => value <= limit,
            Predicate::GreaterThan(limit) => value > limit,
            Predicate::GreaterOrEqual(limit) => value >= limit,
            Predicate::EqualTo(target) => value == target,
            Predicate::FractionOf(base) => {
                if base == 0.0 {
                    return false;
                }
                let quotient = value / base;
                if (quotient - quotient.round()).abs() < style.epsilon {
                    return true;
                }
                let fractional = quotient.fract();
                fractional > 0.0
                    && intuitive_fraction(fractional, &style.denominators, style.epsilon).is_some()
            }
            Predicate::AlwaysTrue => true,
        }
    }
}

/// All configured dimensions in declaration order, plus the none fallback
#[derive(Debug)]
pub struct UnitRegistry {
    dimensions: Vec<Arc<UnitDimension>>,
    none: Arc<UnitDimension>,
}

impl UnitRegistry {
    /// Compile a registry from configuration.
    ///
    /// Fails with [`GroceryError::InvalidUnitDefinition`] when a formatting
    /// rule targets a surface form its dimension does not declare.
    pub fn from_config(config: &GroceryConfig) -> Result<Self, GroceryError> {
        let style = Arc::new(FormatStyle::from_config(config));
        let mut dimensions: Vec<Arc<UnitDimension>> = Vec::new();
        for spec in &config.units {
            let rules = config
                .formatting
                .iter()
                .find(|f| f.dimension == spec.name)
                .map(|f| f.rules.as_slice())
                .unwrap_or(&[]);
            if spec.name == "other" {
                // count-like units each get a private dimension so distinct
                // containers never combine
                for unit in &spec.units {
                    let name = format!("other_{}", unit.key);
                    dimensions.push(Arc::new(UnitDimension::from_spec(
                        &name,
                        std::slice::from_ref(unit),
                        rules,
                        style.clone(),
                    )?));
                }
            } else {
                dimensions.push(Arc::new(UnitDimension::from_spec(
                    &spec.name,
                    &spec.units,
                    rules,
                    style.clone(),
                )?));
            }
        }
        let surface_forms: usize = dimensions.iter().map(|d| d.lookup.len()).sum();
        info!(
            "Built unit registry with {} dimensions and {} surface forms",
            dimensions.len(),
            surface_forms
        );
        Ok(Self {
            dimensions,
            none: Arc::new(UnitDimension::none(style)),
        })
    }

    /// Resolve the first unit token in `text`.
    ///
    /// Dimensions are scanned in declaration order and the first whole-token
    /// hit wins. When nothing matches, the none dimension is returned with
    /// scale 1 and empty consumed text; resolution never fails.
    pub fn resolve(&self, text: &str) -> UnitMatch {
        for dimension in &self.dimensions {
            if let Some((scale, range)) = dimension.find(text) {
                debug!(
                    "Resolved unit token '{}' to dimension '{}' (scale {})",
                    &text[range.clone()],
                    dimension.name(),
                    scale
                );
                return UnitMatch {
                    unit: dimension.clone(),
                    scale,
                    text: text[range.clone()].to_string(),
                    range,
                };
            }
        }
        UnitMatch {
            unit: self.none.clone(),
            scale: 1.0,
            text: String::new(),
            range: 0..0,
        }
    }

    /// The fallback dimension for unitless amounts
    pub fn none_dimension(&self) -> Arc<UnitDimension> {
        self.none.clone()
    }

    /// A dimension by name, e.g. "mass" or "other_pakke"
    pub fn dimension(&self, name: &str) -> Option<Arc<UnitDimension>> {
        self.dimensions.iter().find(|d| d.name == name).cloned()
    }
}
