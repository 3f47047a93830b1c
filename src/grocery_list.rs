//! # Grocery List
//!
//! This module keeps a running list of ingredients and reconciles it:
//!
//! - Add and subtract ingredient text or parsed ingredients; subtraction
//!   marks components with a negative scale instead of deleting anything
//! - Collate by identity (name plus dimension), summing amounts in base
//!   units and dropping entries whose total fell to zero or below
//! - Sort alphabetically or by displayed amount
//! - Fuzzy containment and whole-list comparison for checking a list
//!   against what is already in the cupboard
//!
//! Lists combine with `+`, `-` and scale with `*`, mirroring how menus are
//! merged and portions adjusted.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use log::debug;

use crate::error::GroceryError;
use crate::ingredient::{ContainsMatch, Ingredient, IngredientRecord};
use crate::ingredient_parser::{IngredientInput, IngredientParser};

/// Offset used to right-align amounts in the display form
const PRETTY_AMOUNT_WIDTH: usize = 15;

/// Orderings accepted by [`GroceryList::ingredients`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Collation order: first occurrence of each identity
    None,
    /// By ingredient name
    Alphabetical,
    /// Ingredients without an amount first, then by displayed amount;
    /// equal amounts stay alphabetical
    Numerical,
}

/// A list of ingredients with a parser for turning text into entries.
///
/// Entries are kept as added; collation happens on read so the history of
/// additions and subtractions stays available.
#[derive(Debug, Clone)]
pub struct GroceryList {
    parser: IngredientParser,
    items: Vec<Ingredient>,
}

impl GroceryList {
    /// An empty list with the default parser configuration
    pub fn new() -> Result<Self, GroceryError> {
        Ok(Self {
            parser: IngredientParser::new()?,
            items: Vec::new(),
        })
    }

    /// An empty list sharing an existing parser
    pub fn with_parser(parser: IngredientParser) -> Self {
        Self {
            parser,
            items: Vec::new(),
        }
    }

    /// A list populated from ingredient text or parsed ingredients
    pub fn from_items<T, I>(items: T) -> Result<Self, GroceryError>
    where
        T: IntoIterator<Item = I>,
        I: Into<IngredientInput>,
    {
        let mut list = Self::new()?;
        list.add_ingredients(items);
        Ok(list)
    }

    /// The parser this list resolves text with
    pub fn parser(&self) -> &IngredientParser {
        &self.parser
    }

    /// Number of entries as added, before collation
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The entries as added, before collation
    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    /// Add one ingredient
    pub fn add_ingredient<I: Into<IngredientInput>>(&mut self, ingredient: I) {
        self.push(ingredient.into(), None, 1.0);
    }

    /// Add several ingredients
    pub fn add_ingredients<T, I>(&mut self, ingredients: T)
    where
        T: IntoIterator<Item = I>,
        I: Into<IngredientInput>,
    {
        for ingredient in ingredients {
            self.push(ingredient.into(), None, 1.0);
        }
    }

    /// Add several ingredients tagged with an origin, e.g. a recipe name
    pub fn add_ingredients_with_origin<T, I>(&mut self, ingredients: T, origin: &str)
    where
        T: IntoIterator<Item = I>,
        I: Into<IngredientInput>,
    {
        for ingredient in ingredients {
            self.push(ingredient.into(), Some(origin), 1.0);
        }
    }

    /// Subtract one ingredient: it is added with its amounts negated
    pub fn subtract_ingredient<I: Into<IngredientInput>>(&mut self, ingredient: I) {
        self.push(ingredient.into(), None, -1.0);
    }

    /// Subtract several ingredients
    pub fn subtract_ingredients<T, I>(&mut self, ingredients: T)
    where
        T: IntoIterator<Item = I>,
        I: Into<IngredientInput>,
    {
        for ingredient in ingredients {
            self.push(ingredient.into(), None, -1.0);
        }
    }

    fn push(&mut self, input: IngredientInput, origin: Option<&str>, factor: f64) {
        let mut ingredient = self.parser.parse_ingredient_with_origin(input, origin);
        if factor != 1.0 {
            ingredient.scale_by(factor);
        }
        self.items.push(ingredient);
    }

    /// Combine entries sharing an identity, in first-occurrence order.
    ///
    /// Entries whose summed amount fell to zero or below are dropped;
    /// unspecified entries are kept.
    pub fn collate(&self) -> Vec<Ingredient> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Ingredient> = HashMap::new();
        for ingredient in &self.items {
            let id = ingredient.id();
            match groups.get_mut(&id) {
                Some(existing) => existing.merge_unchecked(ingredient.clone()),
                None => {
                    order.push(id.clone());
                    groups.insert(id, ingredient.clone());
                }
            }
        }
        let collated: Vec<Ingredient> = order
            .into_iter()
            .filter_map(|id| groups.remove(&id))
            .filter(|ingredient| !ingredient.has_amount() || ingredient.amount().sum() > 0.0)
            .collect();
        debug!(
            "Collated {} entries into {} ingredients",
            self.items.len(),
            collated.len()
        );
        collated
    }

    /// Replace the entries with their collated form
    pub fn collate_in_place(&mut self) {
        self.items = self.collate();
    }

    /// The collated ingredients in the requested order
    pub fn ingredients(&self, sort: SortOrder) -> Vec<Ingredient> {
        let mut ingredients = self.collate();
        match sort {
            SortOrder::None => {}
            SortOrder::Alphabetical => ingredients.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Numerical => {
                ingredients.sort_by(|a, b| a.name.cmp(&b.name));
                let (without, with): (Vec<_>, Vec<_>) = ingredients
                    .into_iter()
                    .partition(|ingredient| !ingredient.has_amount());
                let mut keyed: Vec<(AmountKey, Ingredient)> = with
                    .into_iter()
                    .map(|ingredient| (amount_key(&ingredient), ingredient))
                    .collect();
                keyed.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                ingredients = without;
                ingredients.extend(keyed.into_iter().map(|(_, ingredient)| ingredient));
            }
        }
        ingredients
    }

    /// Formatted "amount name" lines in the requested order
    pub fn formatted(&self, sort: SortOrder) -> Vec<String> {
        self.ingredients(sort)
            .iter()
            .map(|ingredient| ingredient.formatted(false))
            .collect()
    }

    /// Serializable snapshots in the requested order
    pub fn records(&self, sort: SortOrder) -> Vec<IngredientRecord> {
        let fallback = self.parser.config().language.no_recipe_name.clone();
        self.ingredients(sort)
            .iter()
            .map(|ingredient| ingredient.record(&fallback))
            .collect()
    }

    /// Check whether the list covers an ingredient, by fuzzy name and
    /// optionally by amount. The first collated entry that covers it wins.
    pub fn contains<I: Into<IngredientInput>>(&self, ingredient: I, use_amount: bool) -> ContainsMatch {
        let needle = self.parser.parse_ingredient(ingredient.into());
        self.find_match(&needle, use_amount)
    }

    fn find_match(&self, needle: &Ingredient, use_amount: bool) -> ContainsMatch {
        let threshold = self.parser.config().ingredient_match_limit;
        for candidate in self.ingredients(SortOrder::None) {
            let hit = candidate.contains(needle, use_amount, threshold);
            if hit.matched {
                return hit;
            }
        }
        ContainsMatch {
            matched: false,
            name_score: 0.0,
            amount_score: 0.0,
        }
    }

    /// Score how well this list covers `other`, from 0 to 100.
    ///
    /// Each of the other list's collated ingredients scores its blended
    /// name and amount match when covered and zero when not; the result is
    /// the average. An empty `other` is trivially covered.
    pub fn compare_with(&self, other: &GroceryList, use_amount: bool) -> f64 {
        let others = other.ingredients(SortOrder::None);
        if others.is_empty() {
            return 100.0;
        }
        let mut total = 0.0;
        for other_ingredient in &others {
            let hit = self.find_match(other_ingredient, use_amount);
            if hit.matched {
                total += (hit.name_score * 0.7 + hit.amount_score * 0.3).min(100.0);
            }
        }
        total / others.len() as f64
    }

    /// Multiply all amounts, e.g. to double a menu
    pub fn scale_by(&mut self, factor: f64) {
        for ingredient in &mut self.items {
            ingredient.scale_by(factor);
        }
    }

    /// Tag every entry with an origin
    pub fn set_origin(&mut self, origin: &str) {
        for ingredient in &mut self.items {
            ingredient.set_origin(origin);
        }
    }
}

/// Sort key for the numerical order: the first displayed value of the
/// amount, compared field by field, with the display unit as tiebreak
type AmountKey = (f64, f64, u32, u32, String);

fn amount_key(ingredient: &Ingredient) -> AmountKey {
    match ingredient
        .unit
        .scale_amount(&ingredient.amount())
        .into_iter()
        .next()
    {
        Some(part) => (
            part.integer,
            part.decimal,
            part.numerator,
            part.denominator,
            part.unit,
        ),
        None => (0.0, 0.0, 0, 0, String::new()),
    }
}

impl fmt::Display for GroceryList {
    /// Alphabetical list with right-aligned amounts
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .ingredients(SortOrder::Alphabetical)
            .iter()
            .map(|ingredient| ingredient.formatted_pretty(PRETTY_AMOUNT_WIDTH))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl Add<&GroceryList> for &GroceryList {
    type Output = GroceryList;

    fn add(self, other: &GroceryList) -> GroceryList {
        let mut list = self.clone();
        list += other;
        list
    }
}

impl AddAssign<&GroceryList> for GroceryList {
    fn add_assign(&mut self, other: &GroceryList) {
        self.items.extend(other.items.iter().cloned());
    }
}

impl Sub<&GroceryList> for &GroceryList {
    type Output = GroceryList;

    fn sub(self, other: &GroceryList) -> GroceryList {
        let mut list = self.clone();
        list -= other;
        list
    }
}

impl SubAssign<&GroceryList> for GroceryList {
    fn sub_assign(&mut self, other: &GroceryList) {
        for ingredient in &other.items {
            let mut negated = ingredient.clone();
            negated.scale_by(-1.0);
            self.items.push(negated);
        }
    }
}

impl Mul<f64> for &GroceryList {
    type Output = GroceryList;

    fn mul(self, factor: f64) -> GroceryList {
        let mut list = self.clone();
        list *= factor;
        list
    }
}

impl MulAssign<f64> for GroceryList {
    fn mul_assign(&mut self, factor: f64) {
        self.scale_by(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;

    fn list_of(items: &[&str]) -> GroceryList {
        GroceryList::from_items(items.iter().copied()).unwrap()
    }

    #[test]
    fn test_collate_keeps_first_occurrence_order() {
        let list = list_of(&["2 dl melk", "1 g salt", "1 dl melk"]);
        let collated = list.collate();
        assert_eq!(collated.len(), 2);
        assert_eq!(collated[0].name, "melk");
        assert_eq!(collated[0].amount(), Amount::Single(0.30000000000000004));
        assert_eq!(collated[1].name, "salt");
    }

    #[test]
    fn test_collate_drops_zeroed_totals() {
        let mut list = list_of(&["2 dl melk"]);
        list.subtract_ingredient("2 dl melk");
        assert!(list.collate().is_empty());
        // the raw entries are still there
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_collate_keeps_unspecified_entries() {
        let list = list_of(&["bananer", "bananer"]);
        let collated = list.collate();
        assert_eq!(collated.len(), 1);
        assert!(!collated[0].has_amount());
    }

    #[test]
    fn test_subtracting_unspecified_drops_entry() {
        let mut list = list_of(&["salt"]);
        list.subtract_ingredient("salt");
        assert!(list.collate().is_empty());
    }

    #[test]
    fn test_alphabetical_sort() {
        let list = list_of(&["2 dl vann", "bananer", "1 g salt"]);
        let names: Vec<String> = list
            .ingredients(SortOrder::Alphabetical)
            .iter()
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(names, vec!["bananer", "salt", "vann"]);
    }

    #[test]
    fn test_numerical_sort_puts_unspecified_first() {
        let list = list_of(&["2 dl melk", "1 g salt", "bananer", "3 dl vann"]);
        let names: Vec<String> = list
            .ingredients(SortOrder::Numerical)
            .iter()
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(names, vec!["bananer", "salt", "melk", "vann"]);
    }

    #[test]
    fn test_subtraction_operator_leaves_operands_alone() {
        let pantry = list_of(&["1 dl melk"]);
        let needed = list_of(&["2 dl melk"]);
        let to_buy = &needed - &pantry;
        assert_eq!(to_buy.formatted(SortOrder::None), vec!["1 dl melk"]);
        assert_eq!(needed.formatted(SortOrder::None), vec!["2 dl melk"]);
        assert_eq!(pantry.formatted(SortOrder::None), vec!["1 dl melk"]);
    }

    #[test]
    fn test_addition_and_scaling_operators() {
        let one = list_of(&["1 dl melk"]);
        let two = list_of(&["2 dl melk"]);
        let both = &one + &two;
        assert_eq!(both.formatted(SortOrder::None), vec!["3 dl melk"]);

        let doubled = &both * 2.0;
        assert_eq!(doubled.formatted(SortOrder::None), vec!["6 dl melk"]);

        let mut halved = doubled;
        halved *= 0.25;
        assert_eq!(halved.formatted(SortOrder::None), vec!["1 1/2 dl melk"]);
    }

    #[test]
    fn test_contains_scans_collated_entries() {
        let list = list_of(&["100 g smør", "100 g smør"]);
        assert!(list.contains("200 g smør", true).matched);
        assert!(!list.contains("500 g smør", true).matched);
        assert!(list.contains("500 g smør", false).matched);
    }

    #[test]
    fn test_compare_with_empty_other_is_full_score() {
        let list = list_of(&["2 dl melk"]);
        let empty = GroceryList::new().unwrap();
        assert_eq!(list.compare_with(&empty, true), 100.0);
    }

    #[test]
    fn test_set_origin_tags_every_component() {
        let mut list = list_of(&["2 dl melk", "1 g salt"]);
        list.set_origin("vafler");
        for record in list.records(SortOrder::None) {
            for component in record.components {
                assert_eq!(component.origin, "vafler");
            }
        }
    }

    #[test]
    fn test_display_aligns_amounts() {
        let list = list_of(&["2 dl melk", "bananer"]);
        let display = list.to_string();
        assert_eq!(display, "               bananer\n          2 dl melk");
    }
}
