#[cfg(test)]
mod tests {
    use groceries::{
        GroceryConfig, GroceryList, IngredientParser, LanguagePack, SortOrder,
    };

    fn list_of(items: &[&str]) -> GroceryList {
        GroceryList::from_items(items.iter().copied()).unwrap()
    }

    #[test]
    fn test_collation_merges_reordered_ranges() {
        let list = list_of(&["50 - 100 g smør", "2,45 kg smør"]);
        assert_eq!(list.formatted(SortOrder::None), vec!["2 1/2 - 2.55 kg smør"]);
    }

    #[test]
    fn test_collation_sums_count_units() {
        let list = list_of(&["1 pakke spaghetti", "2 pakker spaghetti"]);
        assert_eq!(list.formatted(SortOrder::None), vec!["3 pakker spaghetti"]);
    }

    #[test]
    fn test_cupboard_subtraction_walkthrough() {
        let mut menu = GroceryList::new().unwrap();
        menu.add_ingredients([
            "ca. 10-12 g safran",
            "ca. 1/2 gram safran, finhakket",
            "50 - 100 g smør",
            "1 dl soyasaus",
            "2 pakker spaghetti",
            "salt og pepper",
        ]);

        let cupboard = list_of(&[
            "50 g smør",
            "43 ml soyasaus",
            "1 pakke spaghetti",
            "salt og pepper",
        ]);

        let shopping = &menu - &cupboard;
        assert_eq!(
            shopping.formatted(SortOrder::None),
            vec![
                "10 1/2 - 12 1/2 g safran",
                "0 - 50 g smør",
                "0.57 dl soyasaus",
                "1 pakke spaghetti",
            ]
        );

        // doubling the guest count doubles what is left to buy
        let doubled = &shopping * 2.0;
        assert_eq!(
            doubled.formatted(SortOrder::None),
            vec![
                "21 - 25 g safran",
                "0 - 100 g smør",
                "1.14 dl soyasaus",
                "2 pakker spaghetti",
            ]
        );

        // the operands are untouched
        assert_eq!(menu.len(), 6);
        assert_eq!(
            cupboard.formatted(SortOrder::None),
            vec!["50 g smør", "0.43 dl soyasaus", "1 pakke spaghetti", "salt og pepper"]
        );
    }

    #[test]
    fn test_subtraction_across_metric_prefixes_drops_entry() {
        let mut list = list_of(&["2 kg bøtte"]);
        list.subtract_ingredient("200 g bøtte");
        list.subtract_ingredient("18 hg bøtte");
        assert!(list.collate().is_empty());
    }

    #[test]
    fn test_subtracting_more_than_available_drops_entry() {
        let mut list = list_of(&["1 dl fløte"]);
        list.subtract_ingredient("2 dl fløte");
        assert!(list.collate().is_empty());
    }

    #[test]
    fn test_alphabetical_and_numerical_orders() {
        let list = list_of(&[
            "10.05 m skolisser",
            "1 kg tyttebær",
            "2 dl melk",
            "bananer",
            "2/3 løk",
        ]);

        assert_eq!(
            list.formatted(SortOrder::Alphabetical),
            vec![
                "bananer",
                "2/3 løk",
                "2 dl melk",
                "10.05 m skolisser",
                "1 kg tyttebær",
            ]
        );

        // no amount first, then by displayed value
        assert_eq!(
            list.formatted(SortOrder::Numerical),
            vec![
                "bananer",
                "2/3 løk",
                "1 kg tyttebær",
                "2 dl melk",
                "10.05 m skolisser",
            ]
        );
    }

    #[test]
    fn test_contains_with_and_without_amounts() {
        let list = list_of(&["2 dl sukker", "100 g smør"]);

        let by_name = list.contains("sukker", true);
        assert!(by_name.matched);
        assert_eq!(by_name.name_score, 100.0);
        assert_eq!(by_name.amount_score, 100.0);

        assert!(list.contains("1 dl sukker", true).matched);
        assert!(!list.contains("3 dl sukker", true).matched);
        assert!(list.contains("3 dl sukker", false).matched);
    }

    #[test]
    fn test_contains_rejects_close_but_different_names() {
        let list = list_of(&["2 dl sukker"]);
        let miss = list.contains("suketter", false);
        assert!(!miss.matched);
        // a miss reports zero scores, not the best failed candidate
        assert_eq!(miss.name_score, 0.0);
        assert_eq!(miss.amount_score, 0.0);
    }

    #[test]
    fn test_contains_needs_matching_dimension() {
        let list = list_of(&["100 g smør"]);
        assert!(!list.contains("1 dl smør", true).matched);
        assert!(list.contains("1 dl smør", false).matched);
    }

    #[test]
    fn test_compare_with_scores_coverage() {
        let pantry = list_of(&["2 dl melk", "100 g smør"]);

        let covered = list_of(&["1 dl melk", "50 g smør"]);
        assert_eq!(pantry.compare_with(&covered, true), 100.0);

        let half = list_of(&["1 dl melk", "1 kg ost"]);
        assert_eq!(pantry.compare_with(&half, true), 50.0);

        let unrelated = list_of(&["1 kg ost"]);
        assert_eq!(pantry.compare_with(&unrelated, true), 0.0);

        // amounts only count when asked for
        let too_much = list_of(&["1 l melk"]);
        assert_eq!(pantry.compare_with(&too_much, true), 0.0);
        assert_eq!(pantry.compare_with(&too_much, false), 100.0);
    }

    #[test]
    fn test_compare_with_covers_a_pantry_subset() {
        let pantry = list_of(&[
            "50-100g smør",
            "salt",
            "chili",
            "1 ts kanel",
            "10 ounces sukker",
        ]);
        let needed = list_of(&["0.05 kg smør", "salt", "chili", "3/4 teskje kanel"]);
        assert_eq!(pantry.compare_with(&needed, true), 100.0);
    }

    #[test]
    fn test_contains_is_exact_at_full_threshold() {
        let config = GroceryConfig::default().with_match_limit(100.0);
        let parser = IngredientParser::with_config(config).unwrap();
        let mut list = GroceryList::with_parser(parser);
        list.add_ingredients(["2 dl sukker", "salt"]);

        assert!(list.contains("2 dl sukker", true).matched);
        assert!(list.contains("salt", true).matched);
        assert!(!list.contains("sukkar", false).matched);
    }

    #[test]
    fn test_records_carry_origins() {
        let mut list = GroceryList::new().unwrap();
        list.add_ingredients_with_origin(["2 dl melk"], "pannekaker");
        list.add_ingredient("1 dl melk");

        let records = list.records(SortOrder::None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "melk");
        assert_eq!(records[0].amount, "3 dl");
        assert_eq!(records[0].components[0].origin, "pannekaker");
        assert_eq!(records[0].components[1].origin, "other");

        let json = serde_json::to_string(&records).unwrap();
        assert!(json.contains("\"origin\":\"pannekaker\""));
    }

    #[test]
    fn test_norwegian_pack_changes_fallback_origin() {
        let config = GroceryConfig::default().with_language(LanguagePack::norwegian());
        let parser = IngredientParser::with_config(config).unwrap();
        let mut list = GroceryList::with_parser(parser);
        list.add_ingredient("minst 2 dl fløte");

        let records = list.records(SortOrder::None);
        assert_eq!(records[0].amount, "2 dl");
        assert_eq!(records[0].components[0].origin, "annet");
    }

    #[test]
    fn test_in_place_operators() {
        let mut list = list_of(&["2 pakker spaghetti", "4 dl melk"]);
        list -= &list_of(&["1 pakke spaghetti"]);
        list *= 0.5;
        list.collate_in_place();
        assert_eq!(
            list.formatted(SortOrder::None),
            vec!["1/2 pakke spaghetti", "2 dl melk"]
        );
    }

    #[test]
    fn test_adding_parsed_ingredients_directly() {
        let parser = IngredientParser::new().unwrap();
        let butter = parser.parse_ingredient("100 g smør");

        let mut list = GroceryList::with_parser(parser);
        list.add_ingredient(butter.clone());
        list.add_ingredient(butter);
        assert_eq!(list.formatted(SortOrder::None), vec!["200 g smør"]);
    }
}
