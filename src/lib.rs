//! # Groceries
//!
//! Parse free-form ingredient text like "ca. 1/2 gram safran, finhakket"
//! into structured amounts, and reconcile grocery lists built from it:
//! collate lines that name the same thing, subtract what the cupboard
//! already holds, scale menus up and down, and compare lists with fuzzy
//! name matching.
//!
//! ## Usage
//!
//! ```
//! use groceries::{GroceryList, SortOrder};
//!
//! let mut list = GroceryList::new()?;
//! list.add_ingredients(["2 dl melk", "2 dl melk", "3 pakker spaghetti"]);
//! list.subtract_ingredient("1 dl melk");
//!
//! assert_eq!(
//!     list.formatted(SortOrder::Alphabetical),
//!     ["3 dl melk", "3 pakker spaghetti"],
//! );
//! # Ok::<(), groceries::GroceryError>(())
//! ```

pub mod amount;
pub mod config;
pub mod error;
pub mod grocery_list;
pub mod ingredient;
pub mod ingredient_parser;
pub mod number_parser;
pub mod similarity;
pub mod unit_catalog;
pub mod units;

pub use amount::Amount;
pub use config::{GroceryConfig, LanguagePack};
pub use error::GroceryError;
pub use grocery_list::{GroceryList, SortOrder};
pub use ingredient::{ContainsMatch, Ingredient, IngredientComponent, IngredientRecord};
pub use ingredient_parser::{IngredientInput, IngredientParser};
pub use units::{UnitDimension, UnitRegistry};
