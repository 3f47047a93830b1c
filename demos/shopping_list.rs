//! # Shopping List Example
//!
//! This example builds a weekly menu from two recipes, subtracts what the
//! cupboard already holds, and prints the resulting shopping list a few
//! different ways: pretty-printed, sorted, doubled for guests, and as JSON
//! records.

use anyhow::Result;
use log::info;

use groceries::{GroceryList, SortOrder};

fn main() -> Result<()> {
    env_logger::init();

    info!("Building menu from two recipes");

    let mut menu = GroceryList::new()?;
    menu.add_ingredients_with_origin(
        [
            "400 g spaghetti",
            "2 bokser hakkede tomater",
            "1 løk",
            "2 fedd hvitløk",
            "salt og pepper",
        ],
        "pasta med tomatsaus",
    );
    menu.add_ingredients_with_origin(
        ["2 dl melk", "2 fedd hvitløk", "1/2 løk", "ca. 100 g smør"],
        "potetmos",
    );

    println!("Menu for the week:\n{menu}\n");

    let cupboard = GroceryList::from_items(["50 g smør", "1 løk", "salt og pepper"])?;
    let shopping = &menu - &cupboard;

    println!("Left to buy:");
    for line in shopping.formatted(SortOrder::Alphabetical) {
        println!("  {line}");
    }

    let doubled = &shopping * 2.0;
    println!("\nDoubled for guests:");
    for line in doubled.formatted(SortOrder::Alphabetical) {
        println!("  {line}");
    }

    let coverage = cupboard.compare_with(&menu, false);
    println!("\nCupboard coverage of the menu by name: {coverage:.0}/100");

    let records = shopping.records(SortOrder::Alphabetical);
    println!("\nAs JSON:\n{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
