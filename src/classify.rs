//! Category classification for recipes.
//!
//! Scores every category by the summed character length of its keywords
//! found in `name + ingredients`. Longer, more specific keywords outweigh
//! short generic ones ("húsleves" beats "hal").

use crate::recipe::Category;

// ============================================================================
// Keyword Table
// ============================================================================

/// Category keyword table, in tie-break order (earlier wins a tie)
static CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Salad,
        &[
            "saláta", "salad", "uborka", "cucumber", "rukkola", "arugula", "lettuce",
            "öntet", "vinaigrette", "coleslaw",
        ],
    ),
    (
        Category::Soup,
        &[
            "leves", "soup", "alaplé", "broth", "húsleves", "krémleves", "gulyás", "stock",
            "bouillon", "chowder",
        ],
    ),
    (
        Category::Main,
        &[
            "pörkölt", "stew", "rántott", "sült", "roast", "marha", "beef", "sertés", "pork",
            "csirke", "chicken", "pulyka", "turkey", "hal", "fish", "tészta", "pasta",
            "rizottó", "risotto", "lasagne", "burger", "curry",
        ],
    ),
    (
        Category::Dessert,
        &[
            "torta", "cake", "sütemény", "süti", "cookie", "csokoládé", "chocolate", "cukor",
            "sugar", "vanília", "vanilla", "fagylalt", "ice cream", "pite", "pie", "rétes",
        ],
    ),
    (
        Category::Drink,
        &[
            "limonádé", "lemonade", "smoothie", "turmix", "kávé", "coffee", "juice", "shake",
            "koktél", "cocktail", "szörp",
        ],
    ),
    (
        Category::Breakfast,
        &[
            "reggeli", "breakfast", "zabpehely", "oatmeal", "müzli", "granola", "omlett",
            "omelette", "rántotta", "pirítós", "toast", "joghurt", "yogurt",
        ],
    ),
    (
        Category::Side,
        &[
            "köret", "side dish", "püré", "mash", "hasábburgonya", "fries", "párolt", "steamed",
            "rizs", "rice", "krokett",
        ],
    ),
];

// ============================================================================
// Classification
// ============================================================================

/// Per-category keyword score for `name + ingredients`
pub fn category_scores(ingredients_text: &str, name: &str) -> Vec<(Category, usize)> {
    let haystack = format!("{} {}", name, ingredients_text).to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let score = keywords
                .iter()
                .filter(|kw| haystack.contains(*kw))
                .map(|kw| kw.chars().count())
                .sum();
            (*category, score)
        })
        .collect()
}

/// Classify a recipe from ingredient text and name.
/// Returns `Category::Other` when no keyword matches.
pub fn classify(ingredients_text: &str, name: &str) -> Category {
    let mut best = Category::Other;
    let mut best_score = 0;

    for (category, score) in category_scores(ingredients_text, name) {
        if score > best_score {
            best = category;
            best_score = score;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soup_by_name() {
        assert_eq!(classify("lencse, hagyma, sárgarépa", "Lencseleves"), Category::Soup);
    }

    #[test]
    fn test_main_from_ingredients() {
        assert_eq!(classify("marha, hagyma, paprika", "Marhapörkölt"), Category::Main);
    }

    #[test]
    fn test_longer_keywords_dominate() {
        // main: marha (5); soup: gulyás (6) + leves (5)
        assert_eq!(classify("marha, burgonya", "Gulyásleves"), Category::Soup);
    }

    #[test]
    fn test_no_match_is_other() {
        assert_eq!(classify("xyz, qwe", "Ismeretlen"), Category::Other);
        assert_eq!(classify("", ""), Category::Other);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("ZABPEHELY, tej", "Reggeli tál"), Category::Breakfast);
    }

    #[test]
    fn test_deterministic() {
        let first = classify("csokoládé, liszt, tojás", "Brownie");
        for _ in 0..10 {
            assert_eq!(classify("csokoládé, liszt, tojás", "Brownie"), first);
        }
        assert_eq!(first, Category::Dessert);
    }

    #[test]
    fn test_tie_prefers_table_order() {
        // "leves" (soup, 5) and "torta" (dessert, 5) tie; soup comes first
        assert_eq!(classify("torta", "leves"), Category::Soup);
    }
}
