//! # Unit Catalog Module
//!
//! The built-in unit table: metric and imperial units plus the
//! Norwegian-household vocabulary, and the display rules that pick which unit
//! an amount renders in. `GroceryConfig::default()` is assembled from here; a
//! caller with different needs supplies its own `DimensionSpec` list instead.

use crate::config::{
    DimensionFormatting, DimensionSpec, FormatRule, Predicate, PrefixSpec, UnitSpec,
};

/// Metric scaling prefixes, long and short forms
pub fn metric_prefixes() -> Vec<PrefixSpec> {
    [
        ("k", 1000.0),
        ("kilo", 1000.0),
        ("h", 100.0),
        ("hekto", 100.0),
        ("de", 10.0),
        ("da", 10.0),
        ("deca", 10.0),
        ("d", 0.1),
        ("deci", 0.1),
        ("c", 0.01),
        ("centi", 0.01),
        ("m", 0.001),
        ("milli", 0.001),
    ]
    .iter()
    .map(|(prefix, multiplier)| PrefixSpec::new(prefix, *multiplier))
    .collect()
}

/// The built-in dimensions in declaration order. Order matters: a token
/// appearing in several dimensions resolves to the first one declared.
pub fn metric_imperial_units() -> Vec<DimensionSpec> {
    vec![
        DimensionSpec::new(
            "length",
            vec![
                UnitSpec::new("m", 1.0)
                    .with_variants(&["meter", "meters"])
                    .with_prefixes(metric_prefixes()),
                UnitSpec::new("inch", 0.0254)
                    .with_plural("inches")
                    .with_variants(&["tomme", "tommer", "inch", "inches", "in"]),
                UnitSpec::new("foot", 0.3048)
                    .with_plural("feet")
                    .with_variants(&["fot", "ft"]),
            ],
        ),
        DimensionSpec::new(
            "mass",
            vec![
                UnitSpec::new("g", 1.0)
                    .with_variants(&["gram", "grams"])
                    .with_prefixes(metric_prefixes()),
                UnitSpec::new("tonn", 1_000_000.0),
                UnitSpec::new("oz", 28.349_523_125).with_variants(&["ounce", "ounces"]),
                UnitSpec::new("lb", 453.592_37).with_variants(&["pound", "pounds"]),
            ],
        ),
        DimensionSpec::new(
            "volume",
            vec![
                UnitSpec::new("l", 1.0)
                    .with_variants(&["liter", "litre", "liters", "litres"])
                    .with_prefixes(metric_prefixes()),
                UnitSpec::new("floz", 0.02957).with_variants(&["fluid ounce", "fluid ounces"]),
                UnitSpec::new("cup", 0.2366).with_plural("cups"),
                UnitSpec::new("pint", 0.4732)
                    .with_plural("pints")
                    .with_variants(&["pt"]),
                UnitSpec::new("ss", 0.015).with_variants(&[
                    "spiseskje",
                    "spiseskjeer",
                    "tablespoon",
                    "tbsp",
                    "tbs",
                    "tbl",
                ]),
                UnitSpec::new("ts", 0.005)
                    .with_variants(&["teskje", "teskjeer", "teaspoon", "tsp"]),
                UnitSpec::new("kryddermål", 0.001).with_variants(&["krm"]),
                UnitSpec::new("dram", 0.003_697),
            ],
        ),
        DimensionSpec::new(
            "hvitløk",
            vec![
                UnitSpec::new("hel", 8.0).with_plural("hele"),
                UnitSpec::new("fedd", 1.0),
            ],
        ),
        // Count-like units; the registry turns each into its own dimension
        // so a "pakke" never combines with a "pose"
        DimensionSpec::new(
            "other",
            vec![
                UnitSpec::new("pakke", 1.0).with_plural("pakker"),
                UnitSpec::new("boks", 1.0).with_plural("bokser"),
                UnitSpec::new("tube", 1.0).with_plural("tuber"),
                UnitSpec::new("eske", 1.0).with_plural("esker"),
                UnitSpec::new("glass", 1.0),
                UnitSpec::new("pose", 1.0).with_plural("poser"),
                UnitSpec::new("porsjon", 1.0).with_plural("porsjoner"),
            ],
        ),
    ]
}

/// Display rules for the built-in dimensions. Rules run in order against the
/// smallest value of an amount; the first rule with every check passing picks
/// the display unit.
pub fn metric_imperial_formatting() -> Vec<DimensionFormatting> {
    use Predicate::{AlwaysTrue, EqualTo, FractionOf, GreaterOrEqual, LessThan};

    vec![
        DimensionFormatting::new(
            "length",
            vec![
                FormatRule::new("cm", vec![EqualTo(0.0)]),
                FormatRule::new("inch", vec![LessThan(0.5), FractionOf(0.0254)]),
                FormatRule::new("cm", vec![GreaterOrEqual(0.01), LessThan(1.0)]),
                FormatRule::new("mm", vec![LessThan(0.01)]),
                FormatRule::new("m", vec![AlwaysTrue]),
            ],
        ),
        DimensionFormatting::new(
            "mass",
            vec![
                FormatRule::new("g", vec![EqualTo(0.0)]),
                FormatRule::new("lb", vec![LessThan(2000.0), FractionOf(453.592_37)]),
                FormatRule::new("oz", vec![LessThan(1000.0), FractionOf(28.349_523_125)]),
                FormatRule::new("kg", vec![GreaterOrEqual(1000.0)]),
                FormatRule::new(
                    "g",
                    vec![LessThan(1000.0), GreaterOrEqual(0.5), FractionOf(1.0)],
                ),
                FormatRule::new("mg", vec![LessThan(1.0)]),
            ],
        ),
        DimensionFormatting::new(
            "volume",
            vec![
                FormatRule::new("l", vec![EqualTo(0.0)]),
                FormatRule::new("cup", vec![FractionOf(0.2366)]),
                FormatRule::new("l", vec![GreaterOrEqual(1.0)]),
                FormatRule::new("l", vec![GreaterOrEqual(0.5), FractionOf(1.0)]),
                FormatRule::new("dl", vec![GreaterOrEqual(0.01), LessThan(1.0)]),
                FormatRule::new(
                    "ts",
                    vec![
                        LessThan(0.015),
                        GreaterOrEqual(0.005 / 4.0),
                        FractionOf(0.005),
                    ],
                ),
                FormatRule::new(
                    "ss",
                    vec![
                        LessThan(0.01),
                        GreaterOrEqual(0.015 / 4.0),
                        FractionOf(0.015),
                    ],
                ),
                FormatRule::new("ml", vec![LessThan(0.1)]),
            ],
        ),
        DimensionFormatting::new("hvitløk", vec![FormatRule::new("hel", vec![GreaterOrEqual(8.0)])]),
    ]
}
