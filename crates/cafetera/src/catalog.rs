//! The drink catalog and tabular fixture loaders.
//!
//! The menu of the application under test is fixed: nine drinks, each with
//! a price and a stack of ingredients. Scenarios compare what the page
//! displays against this catalog. Ingredients are listed in display order,
//! top of the cup first; heights are the percentage each layer occupies.

use serde::Deserialize;
use std::path::Path;

use crate::money::Price;
use crate::result::CafeteraResult;

/// One ingredient layer of a drink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogIngredient {
    /// Displayed ingredient name
    pub name: &'static str,
    /// Layer height as a percentage of the cup body
    pub height_percent: f64,
    /// Expected background color, `rgb(r, g, b)` form
    pub color: &'static str,
}

/// One drink on the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogDrink {
    /// Displayed (English) name
    pub name: &'static str,
    /// Name shown after a double-click on the heading
    pub translated_name: &'static str,
    /// Unit price in cents
    pub price_cents: u64,
    /// Ingredients in display order, top of the cup first
    pub ingredients: &'static [CatalogIngredient],
}

impl CatalogDrink {
    /// Unit price
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::from_cents(self.price_cents)
    }

    /// Ingredient names in display order
    #[must_use]
    pub fn ingredient_names(&self) -> Vec<&'static str> {
        self.ingredients.iter().map(|i| i.name).collect()
    }
}

const ESPRESSO: CatalogIngredient = CatalogIngredient {
    name: "espresso",
    height_percent: 30.0,
    color: "rgb(122, 74, 22)",
};

const STEAMED_MILK: CatalogIngredient = CatalogIngredient {
    name: "steamed milk",
    height_percent: 35.0,
    color: "rgb(253, 253, 243)",
};

const MILK_FOAM: CatalogIngredient = CatalogIngredient {
    name: "milk foam",
    height_percent: 15.0,
    color: "rgb(251, 246, 237)",
};

const WHIPPED_CREAM: CatalogIngredient = CatalogIngredient {
    name: "whipped cream",
    height_percent: 25.0,
    color: "rgb(255, 255, 255)",
};

const CHOCOLATE_SYRUP: CatalogIngredient = CatalogIngredient {
    name: "chocolate syrup",
    height_percent: 20.0,
    color: "rgb(109, 52, 0)",
};

const WATER: CatalogIngredient = CatalogIngredient {
    name: "water",
    height_percent: 40.0,
    color: "rgb(203, 232, 250)",
};

const STEAMED_CREAM: CatalogIngredient = CatalogIngredient {
    name: "steamed cream",
    height_percent: 20.0,
    color: "rgb(228, 216, 192)",
};

/// The fixed menu, in page order
pub const MENU: &[CatalogDrink] = &[
    CatalogDrink {
        name: "Espresso",
        translated_name: "特浓咖啡",
        price_cents: 10_00,
        ingredients: &[ESPRESSO],
    },
    CatalogDrink {
        name: "Espresso Macchiato",
        translated_name: "浓缩玛奇朵",
        price_cents: 12_00,
        ingredients: &[MILK_FOAM, ESPRESSO],
    },
    CatalogDrink {
        name: "Cappuccino",
        translated_name: "卡布奇诺",
        price_cents: 19_00,
        ingredients: &[MILK_FOAM, STEAMED_MILK, ESPRESSO],
    },
    CatalogDrink {
        name: "Mocha",
        translated_name: "摩卡",
        price_cents: 8_00,
        ingredients: &[
            WHIPPED_CREAM,
            CatalogIngredient {
                height_percent: 25.0,
                ..STEAMED_MILK
            },
            CHOCOLATE_SYRUP,
            ESPRESSO,
        ],
    },
    CatalogDrink {
        name: "Flat White",
        translated_name: "平白咖啡",
        price_cents: 18_00,
        ingredients: &[STEAMED_MILK, ESPRESSO],
    },
    CatalogDrink {
        name: "Americano",
        translated_name: "美式咖啡",
        price_cents: 7_00,
        ingredients: &[WATER, ESPRESSO],
    },
    CatalogDrink {
        name: "Cafe Latte",
        translated_name: "拿铁",
        price_cents: 16_00,
        ingredients: &[MILK_FOAM, STEAMED_MILK, ESPRESSO],
    },
    CatalogDrink {
        name: "Espresso Con Panna",
        translated_name: "浓缩康宝蓝",
        price_cents: 14_00,
        ingredients: &[WHIPPED_CREAM, ESPRESSO],
    },
    CatalogDrink {
        name: "Cafe Breve",
        translated_name: "半拿铁",
        price_cents: 15_00,
        ingredients: &[
            MILK_FOAM,
            STEAMED_CREAM,
            CatalogIngredient {
                height_percent: 25.0,
                ..STEAMED_MILK
            },
            ESPRESSO,
        ],
    },
];

/// Name of the promo drink offered at every third cup
pub const PROMO_DRINK: &str = "Mocha";

/// Name the promo drink carries as a cart line
pub const PROMO_CART_NAME: &str = "(Discounted) Mocha";

/// Discounted promo price in cents
pub const PROMO_PRICE_CENTS: u64 = 4_00;

/// Full promo banner message
pub const PROMO_TEXT: &str = "It's your lucky day! Get an extra cup of Mocha for $4.";

/// Promo accept button label
pub const PROMO_YES_TEXT: &str = "Yes, of course!";

/// Promo decline button label
pub const PROMO_NO_TEXT: &str = "Nah, I'll skip.";

/// Look up a drink by displayed name
#[must_use]
pub fn drink_by_name(name: &str) -> Option<&'static CatalogDrink> {
    MENU.iter().find(|d| d.name == name)
}

/// Look up a drink by 1-based menu position
#[must_use]
pub fn drink_by_order(order: usize) -> Option<&'static CatalogDrink> {
    order.checked_sub(1).and_then(|i| MENU.get(i))
}

/// Row of the price expectation table (`drink_name, expected_price`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PriceRow {
    /// Drink name
    pub drink_name: String,
    /// Expected price, e.g. `10.00`
    pub expected_price: f64,
}

impl PriceRow {
    /// Expected price as exact cents
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn expected(&self) -> Price {
        Price::from_cents((self.expected_price * 100.0).round() as u64)
    }
}

/// Row of the ingredient color expectation table
/// (`drink_name, ingredient_name, expected_color`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IngredientColorRow {
    /// Drink name
    pub drink_name: String,
    /// Ingredient name
    pub ingredient_name: String,
    /// Expected color, `rgb(...)` or `rgba(...)`
    pub expected_color: String,
}

/// Load the price expectation table from a CSV file
pub fn load_price_rows(path: impl AsRef<Path>) -> CafeteraResult<Vec<PriceRow>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Load the ingredient color expectation table from a CSV file
pub fn load_ingredient_color_rows(
    path: impl AsRef<Path>,
) -> CafeteraResult<Vec<IngredientColorRow>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_menu_has_nine_drinks() {
        assert_eq!(MENU.len(), 9);
    }

    #[test]
    fn test_lookup_by_name() {
        let mocha = drink_by_name("Mocha").unwrap();
        assert_eq!(mocha.price(), Price::from_dollars(8));
        assert_eq!(
            mocha.ingredient_names(),
            vec!["whipped cream", "steamed milk", "chocolate syrup", "espresso"]
        );
        assert!(drink_by_name("Tea").is_none());
    }

    #[test]
    fn test_lookup_by_order_is_one_based() {
        assert_eq!(drink_by_order(1).unwrap().name, "Espresso");
        assert_eq!(drink_by_order(6).unwrap().name, "Americano");
        assert!(drink_by_order(0).is_none());
        assert!(drink_by_order(10).is_none());
    }

    #[test]
    fn test_espresso_macchiato_display_order_is_top_down() {
        let drink = drink_by_name("Espresso Macchiato").unwrap();
        assert_eq!(drink.ingredient_names(), vec!["milk foam", "espresso"]);
    }

    #[test]
    fn test_promo_mocha_layer_heights() {
        let mocha = drink_by_name("Mocha").unwrap();
        let heights: Vec<(&str, f64)> = mocha
            .ingredients
            .iter()
            .map(|i| (i.name, i.height_percent))
            .collect();
        assert_eq!(
            heights,
            vec![
                ("whipped cream", 25.0),
                ("steamed milk", 25.0),
                ("chocolate syrup", 20.0),
                ("espresso", 30.0),
            ]
        );
    }

    #[test]
    fn test_load_price_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "drink_name,expected_price").unwrap();
        writeln!(file, "Espresso,10.00").unwrap();
        writeln!(file, "Mocha,8.00").unwrap();
        let rows = load_price_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].drink_name, "Espresso");
        assert_eq!(rows[0].expected(), Price::from_dollars(10));
    }

    #[test]
    fn test_load_ingredient_color_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "drink_name,ingredient_name,expected_color").unwrap();
        writeln!(file, "Americano,water,\"rgb(203, 232, 250)\"").unwrap();
        let rows = load_ingredient_color_rows(file.path()).unwrap();
        assert_eq!(rows[0].ingredient_name, "water");
        assert_eq!(rows[0].expected_color, "rgb(203, 232, 250)");
    }
}
