//! Static lookup tables for rule-based explanations
//!
//! Ingredient entries are matched by substring against normalized ingredient
//! tokens, first match wins, so compound and more specific keywords come
//! before the generic ones they contain ("kókusztej" before "tej").

use crate::explanation::types::Impact;
use crate::recipe::Category;

/// Broad food group, used for composition heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodGroup {
    RedMeat,
    Poultry,
    Fish,
    Dairy,
    Egg,
    Legume,
    Vegetable,
    Fruit,
    Grain,
    Other,
}

impl FoodGroup {
    pub fn is_meat(&self) -> bool {
        matches!(self, FoodGroup::RedMeat | FoodGroup::Poultry | FoodGroup::Fish)
    }

    pub fn is_animal(&self) -> bool {
        self.is_meat() || matches!(self, FoodGroup::Dairy | FoodGroup::Egg)
    }
}

/// Environmental profile of an ingredient keyword
#[derive(Debug, Clone, Copy)]
pub struct IngredientImpact {
    pub keyword: &'static str,
    pub display: &'static str,
    pub group: FoodGroup,
    /// 0-100, higher = more sustainable
    pub score: f64,
    pub explanation: &'static str,
    pub substitute: Option<&'static str>,
}

impl IngredientImpact {
    /// ≥ 60 positive, ≤ 40 negative
    pub fn impact(&self) -> Impact {
        if self.score >= 60.0 {
            Impact::Positive
        } else if self.score <= 40.0 {
            Impact::Negative
        } else {
            Impact::Neutral
        }
    }

    /// Distance from neutral (50), scaled to [0, 1]
    pub fn importance(&self) -> f64 {
        ((self.score - 50.0).abs() / 50.0).min(1.0)
    }
}

macro_rules! entry {
    ($kw:expr, $display:expr, $group:ident, $score:expr, $expl:expr) => {
        IngredientImpact {
            keyword: $kw,
            display: $display,
            group: FoodGroup::$group,
            score: $score,
            explanation: $expl,
            substitute: None,
        }
    };
    ($kw:expr, $display:expr, $group:ident, $score:expr, $expl:expr, $sub:expr) => {
        IngredientImpact {
            keyword: $kw,
            display: $display,
            group: FoodGroup::$group,
            score: $score,
            explanation: $expl,
            substitute: Some($sub),
        }
    };
}

const BEEF: &str = "Beef has the highest greenhouse-gas footprint of common foods, driven by cattle methane and land use.";
const LAMB: &str = "Lamb is nearly as emission-intensive as beef.";
const PORK: &str = "Pork has a moderate to high footprint from feed production and manure.";
const CHEESE: &str = "Cheese takes around ten litres of milk per kilogram, which concentrates dairy emissions.";
const BUTTER: &str = "Butter is one of the most emission-dense dairy products.";
const CREAM: &str = "Cream is a concentrated dairy product with a high footprint per gram.";
const MILK: &str = "Dairy milk carries a moderate footprint from cattle.";
const CHOCOLATE: &str = "Cocoa farming is linked to deforestation in the tropics.";
const COFFEE: &str = "Coffee has a sizeable footprint from land use and processing.";
const RICE: &str = "Flooded rice paddies release methane.";
const FISH: &str = "Fish footprint depends strongly on species and fishing method.";
const CHICKEN: &str = "Poultry has a much smaller footprint than red meat.";
const EGG: &str = "Eggs are a relatively efficient animal protein.";
const LENTIL: &str = "Lentils fix nitrogen and are among the lowest-footprint proteins.";
const BEAN: &str = "Beans fix nitrogen and deliver protein at a fraction of meat's footprint.";
const CHICKPEA: &str = "Chickpeas are a low-footprint, protein-rich legume.";
const PEA: &str = "Peas enrich the soil with nitrogen and need little input.";
const TOFU: &str = "Tofu provides complete protein with a low footprint.";
const OAT: &str = "Oats are a hardy, low-input grain.";
const MUSHROOM: &str = "Mushrooms grow on agricultural by-products with minimal land.";
const POTATO: &str = "Potatoes yield a lot of food per hectare with low emissions.";
const VEGETABLE: &str = "Field vegetables have a low footprint, especially when seasonal.";
const FRUIT: &str = "Fruit has a low footprint when not air-freighted.";
const COCONUT: &str = "Coconut products travel far but have a moderate footprint.";
const OLIVE_OIL: &str = "Olive oil is a plant fat with a moderate footprint.";
const NUT_BUTTER: &str = "Nut butters are plant protein with a low footprint, peanuts also fix nitrogen.";
const HERB: &str = "Herbs and spices are used in small amounts and barely affect the footprint.";

pub static INGREDIENT_IMPACTS: &[IngredientImpact] = &[
    // Compound keywords first
    entry!("kókusztej", "coconut milk", Other, 55.0, COCONUT),
    entry!("coconut milk", "coconut milk", Other, 55.0, COCONUT),
    entry!("zabtej", "oat milk", Grain, 85.0, OAT),
    entry!("oat milk", "oat milk", Grain, 85.0, OAT),
    entry!("édesburgonya", "sweet potato", Vegetable, 82.0, POTATO),
    entry!("sweet potato", "sweet potato", Vegetable, 82.0, POTATO),
    entry!("csicseriborsó", "chickpeas", Legume, 90.0, CHICKPEA),
    entry!("chickpea", "chickpeas", Legume, 90.0, CHICKPEA),
    entry!("olívaolaj", "olive oil", Other, 60.0, OLIVE_OIL),
    entry!("olive oil", "olive oil", Other, 60.0, OLIVE_OIL),
    entry!("fokhagyma", "garlic", Vegetable, 80.0, VEGETABLE),
    entry!("padlizsán", "aubergine", Vegetable, 80.0, VEGETABLE),
    entry!("eggplant", "aubergine", Vegetable, 80.0, VEGETABLE),
    // plant words that contain "bab", "vaj", "butter" or "pea"
    entry!("babérlevél", "bay leaf", Other, 70.0, HERB),
    entry!("babér", "bay leaf", Other, 70.0, HERB),
    entry!("bay leaf", "bay leaf", Other, 70.0, HERB),
    entry!("vajbab", "wax beans", Legume, 90.0, BEAN),
    entry!("mogyoróvaj", "peanut butter", Legume, 75.0, NUT_BUTTER),
    entry!("peanut butter", "peanut butter", Legume, 75.0, NUT_BUTTER),
    entry!("peanut", "peanuts", Legume, 75.0, NUT_BUTTER),
    entry!("kakaóvaj", "cocoa butter", Other, 35.0, CHOCOLATE, "Choose certified cocoa butter (kakaóvaj)"),
    // Red meat
    entry!("marha", "beef", RedMeat, 10.0, BEEF, "Replace beef (marha) with lentils or beans to cut emissions sharply"),
    entry!("beef", "beef", RedMeat, 10.0, BEEF, "Replace beef with lentils or beans to cut emissions sharply"),
    entry!("borjú", "veal", RedMeat, 12.0, BEEF, "Replace veal (borjú) with mushrooms or legumes"),
    entry!("bárány", "lamb", RedMeat, 15.0, LAMB, "Swap lamb (bárány) for chickpeas or mushrooms"),
    entry!("lamb", "lamb", RedMeat, 15.0, LAMB, "Swap lamb for chickpeas or mushrooms"),
    entry!("sertés", "pork", RedMeat, 35.0, PORK, "Swap pork (sertés) for a plant protein like tofu or beans"),
    entry!("pork", "pork", RedMeat, 35.0, PORK, "Swap pork for a plant protein like tofu or beans"),
    entry!("kolbász", "sausage", RedMeat, 30.0, PORK, "Try a smoked-paprika bean dish instead of sausage (kolbász)"),
    entry!("szalonna", "bacon", RedMeat, 30.0, PORK, "Use smoked paprika instead of bacon (szalonna) for flavour"),
    entry!("bacon", "bacon", RedMeat, 30.0, PORK, "Use smoked paprika instead of bacon for flavour"),
    // Poultry and fish
    entry!("csirke", "chicken", Poultry, 50.0, CHICKEN),
    entry!("chicken", "chicken", Poultry, 50.0, CHICKEN),
    entry!("pulyka", "turkey", Poultry, 50.0, CHICKEN),
    entry!("turkey", "turkey", Poultry, 50.0, CHICKEN),
    entry!("hal", "fish", Fish, 48.0, FISH),
    entry!("fish", "fish", Fish, 48.0, FISH),
    entry!("lazac", "salmon", Fish, 45.0, FISH),
    entry!("salmon", "salmon", Fish, 45.0, FISH),
    // Dairy and eggs
    entry!("sajt", "cheese", Dairy, 35.0, CHEESE, "Use less cheese (sajt) or a plant-based alternative"),
    entry!("parmezán", "cheese", Dairy, 35.0, CHEESE, "Use less cheese (parmezán) or nutritional yeast"),
    entry!("feta", "cheese", Dairy, 35.0, CHEESE, "Use less feta or try marinated tofu"),
    entry!("cheese", "cheese", Dairy, 35.0, CHEESE, "Use less cheese or a plant-based alternative"),
    entry!("vaj", "butter", Dairy, 35.0, BUTTER, "Cook with vegetable oil instead of butter (vaj)"),
    entry!("butter", "butter", Dairy, 35.0, BUTTER, "Cook with vegetable oil instead of butter"),
    entry!("tejszín", "cream", Dairy, 38.0, CREAM, "Use oat cream or yogurt instead of cream (tejszín)"),
    entry!("cream", "cream", Dairy, 38.0, CREAM, "Use oat cream or yogurt instead of cream"),
    entry!("tejföl", "sour cream", Dairy, 40.0, CREAM, "Use a plant-based yogurt instead of sour cream (tejföl)"),
    entry!("tej", "milk", Dairy, 40.0, MILK, "Try oat or soy milk instead of dairy milk (tej)"),
    entry!("milk", "milk", Dairy, 40.0, MILK, "Try oat or soy milk instead of dairy milk"),
    entry!("tojás", "egg", Egg, 55.0, EGG),
    entry!("egg", "egg", Egg, 55.0, EGG),
    // Other high-impact
    entry!("csokoládé", "chocolate", Other, 30.0, CHOCOLATE, "Choose Fairtrade or Rainforest Alliance certified chocolate"),
    entry!("chocolate", "chocolate", Other, 30.0, CHOCOLATE, "Choose Fairtrade or Rainforest Alliance certified chocolate"),
    entry!("kakaó", "cocoa", Other, 35.0, CHOCOLATE, "Choose certified cocoa (kakaó)"),
    entry!("kávé", "coffee", Other, 35.0, COFFEE, "Choose shade-grown, certified coffee"),
    entry!("coffee", "coffee", Other, 35.0, COFFEE, "Choose shade-grown, certified coffee"),
    entry!("rizs", "rice", Grain, 45.0, RICE),
    entry!("rice", "rice", Grain, 45.0, RICE),
    // Legumes
    entry!("lencse", "lentils", Legume, 92.0, LENTIL),
    entry!("lentil", "lentils", Legume, 92.0, LENTIL),
    entry!("bab", "beans", Legume, 90.0, BEAN),
    entry!("bean", "beans", Legume, 90.0, BEAN),
    entry!("borsó", "peas", Legume, 88.0, PEA),
    entry!("pea", "peas", Legume, 88.0, PEA),
    entry!("tofu", "tofu", Legume, 85.0, TOFU),
    // Grains, fungi, vegetables, fruit
    entry!("zab", "oats", Grain, 85.0, OAT),
    entry!("oat", "oats", Grain, 85.0, OAT),
    entry!("gomba", "mushrooms", Vegetable, 85.0, MUSHROOM),
    entry!("mushroom", "mushrooms", Vegetable, 85.0, MUSHROOM),
    entry!("burgonya", "potatoes", Vegetable, 80.0, POTATO),
    entry!("krumpli", "potatoes", Vegetable, 80.0, POTATO),
    entry!("potato", "potatoes", Vegetable, 80.0, POTATO),
    entry!("hagyma", "onion", Vegetable, 80.0, VEGETABLE),
    entry!("onion", "onion", Vegetable, 80.0, VEGETABLE),
    entry!("sárgarépa", "carrot", Vegetable, 82.0, VEGETABLE),
    entry!("répa", "carrot", Vegetable, 82.0, VEGETABLE),
    entry!("carrot", "carrot", Vegetable, 82.0, VEGETABLE),
    entry!("káposzta", "cabbage", Vegetable, 82.0, VEGETABLE),
    entry!("cabbage", "cabbage", Vegetable, 82.0, VEGETABLE),
    entry!("spenót", "spinach", Vegetable, 80.0, VEGETABLE),
    entry!("spinach", "spinach", Vegetable, 80.0, VEGETABLE),
    entry!("paradicsom", "tomato", Vegetable, 75.0, VEGETABLE),
    entry!("tomato", "tomato", Vegetable, 75.0, VEGETABLE),
    entry!("paprika", "pepper", Vegetable, 75.0, VEGETABLE),
    entry!("pepper", "pepper", Vegetable, 75.0, VEGETABLE),
    entry!("uborka", "cucumber", Vegetable, 78.0, VEGETABLE),
    entry!("cucumber", "cucumber", Vegetable, 78.0, VEGETABLE),
    entry!("cukkini", "courgette", Vegetable, 80.0, VEGETABLE),
    entry!("zucchini", "courgette", Vegetable, 80.0, VEGETABLE),
    entry!("alma", "apple", Fruit, 78.0, FRUIT),
    entry!("apple", "apple", Fruit, 78.0, FRUIT),
    entry!("áfonya", "berries", Fruit, 70.0, FRUIT),
    entry!("banán", "banana", Fruit, 62.0, FRUIT),
    entry!("banana", "banana", Fruit, 62.0, FRUIT),
];

/// First table entry whose keyword occurs in the ingredient token
pub fn lookup_ingredient(ingredient: &str) -> Option<&'static IngredientImpact> {
    INGREDIENT_IMPACTS
        .iter()
        .find(|entry| ingredient.contains(entry.keyword))
}

/// General statement about a recipe category
pub fn category_statement(category: Category) -> &'static str {
    match category {
        Category::Salad => "Salads are plant-forward and need little or no cooking energy.",
        Category::Soup => "Soups stretch a few ingredients far and are usually vegetable-based.",
        Category::Main => "Main dishes often centre on animal protein, the largest footprint driver.",
        Category::Dessert => "Desserts tend to rely on sugar, dairy and cocoa.",
        Category::Drink => "Drinks are small portions with a modest footprint.",
        Category::Breakfast => "Breakfasts are typically grain- and fruit-based.",
        Category::Side => "Side dishes are mostly vegetables or starches.",
        Category::Other => "No category-specific pattern applies.",
    }
}
