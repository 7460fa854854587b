//! Built-in fixture catalog
//!
//! Hand-authored recipes spanning every category and the full score range.
//! Substituted when the primary catalog cannot be loaded, and used by tests.

use crate::recipe::RawRecipe;

struct FixtureRecipe {
    id: i64,
    name: &'static str,
    ingredients: &'static str,
    category: &'static str,
    env: f64,
    nutri: f64,
    instructions: &'static str,
}

static FIXTURE_RECIPES: &[FixtureRecipe] = &[
    FixtureRecipe {
        id: 1,
        name: "Lencseleves",
        ingredients: r#"c("lencse", "vöröshagyma", "sárgarépa", "fokhagyma", "paradicsom")"#,
        category: "soup",
        env: 15.0,
        nutri: 82.0,
        instructions: "Párold meg a hagymát, add hozzá a lencsét és a zöldségeket, főzd puhára.",
    },
    FixtureRecipe {
        id: 2,
        name: "Marhapörkölt",
        ingredients: r#"c("marha", "vöröshagyma", "paprika", "paradicsom", "zsír")"#,
        category: "main",
        env: 88.0,
        nutri: 38.0,
        instructions: "Pirítsd a hagymát zsíron, add hozzá a húst és a paprikát, párold két órán át.",
    },
    FixtureRecipe {
        id: 3,
        name: "Görög saláta",
        ingredients: r#"c("uborka", "paradicsom", "feta sajt", "olívabogyó", "vöröshagyma", "olívaolaj")"#,
        category: "salad",
        env: 30.0,
        nutri: 70.0,
        instructions: "Vágd fel a zöldségeket, morzsold rá a sajtot, locsold meg olajjal.",
    },
    FixtureRecipe {
        id: 4,
        name: "Csirkés rizottó",
        ingredients: r#"c("csirkemell", "rizs", "hagyma", "parmezán sajt", "vaj")"#,
        category: "main",
        env: 55.0,
        nutri: 58.0,
        instructions: "Pirítsd a rizst, öntsd fel alaplével fokozatosan, a végén keverd bele a csirkét.",
    },
    FixtureRecipe {
        id: 5,
        name: "Csokoládés brownie",
        ingredients: r#"c("csokoládé", "vaj", "cukor", "tojás", "liszt")"#,
        category: "dessert",
        env: 62.0,
        nutri: 22.0,
        instructions: "Olvaszd össze a csokoládét és a vajat, keverd hozzá a többit, süsd 25 percig.",
    },
    FixtureRecipe {
        id: 6,
        name: "Zabkása áfonyával",
        ingredients: r#"c("zabpehely", "zabtej", "áfonya", "méz")"#,
        category: "breakfast",
        env: 12.0,
        nutri: 75.0,
        instructions: "Főzd a zabpelyhet zabtejben, tálald áfonyával és mézzel.",
    },
    FixtureRecipe {
        id: 7,
        name: "Zöld smoothie",
        ingredients: r#"c("spenót", "banán", "alma", "zabtej")"#,
        category: "drink",
        env: 10.0,
        nutri: 80.0,
        instructions: "Turmixold simára az összes hozzávalót.",
    },
    FixtureRecipe {
        id: 8,
        name: "Sült édesburgonya",
        ingredients: r#"c("édesburgonya", "olívaolaj", "rozmaring", "só")"#,
        category: "side",
        env: 18.0,
        nutri: 68.0,
        instructions: "Vágd cikkekre, forgasd olajba, süsd ropogósra.",
    },
    FixtureRecipe {
        id: 9,
        name: "Sertéssült",
        ingredients: r#"c("sertés", "burgonya", "fokhagyma", "kömény")"#,
        category: "main",
        env: 75.0,
        nutri: 42.0,
        instructions: "Dörzsöld be a húst fűszerekkel, süsd a burgonyával együtt.",
    },
    FixtureRecipe {
        id: 10,
        name: "Csicseriborsó curry",
        ingredients: r#"c("csicseriborsó", "kókusztej", "paradicsom", "hagyma", "spenót", "rizs")"#,
        category: "main",
        env: 22.0,
        nutri: 77.0,
        instructions: "Párold a hagymát fűszerekkel, add hozzá a csicseriborsót és a kókusztejet.",
    },
    FixtureRecipe {
        id: 11,
        name: "Rántott hal",
        ingredients: r#"c("hal", "liszt", "tojás", "zsemlemorzsa", "napraforgóolaj")"#,
        category: "main",
        env: 48.0,
        nutri: 55.0,
        instructions: "Forgasd a halat lisztbe, tojásba, morzsába, süsd forró olajban.",
    },
];

/// Fixture records in raw form, so they pass through normal preparation
pub fn builtin_recipes() -> Vec<RawRecipe> {
    FIXTURE_RECIPES
        .iter()
        .map(|f| RawRecipe {
            id: Some(f.id),
            name: Some(f.name.to_string()),
            ingredients: Some(f.ingredients.to_string()),
            category: Some(f.category.to_string()),
            env_score: Some(f.env),
            nutri_score: Some(f.nutri),
            instructions: Some(f.instructions.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{Category, Recipe};
    use crate::scorer::SustainabilityScorer;

    #[test]
    fn test_fixtures_all_prepare() {
        let scorer = SustainabilityScorer::default();
        let recipes: Vec<Recipe> = builtin_recipes()
            .into_iter()
            .map(|raw| Recipe::prepare(raw, &scorer).unwrap())
            .collect();

        assert_eq!(recipes.len(), FIXTURE_RECIPES.len());
        for category in Category::ALL.iter().filter(|c| **c != Category::Other) {
            assert!(recipes.iter().any(|r| r.category == *category), "{category} missing");
        }
    }
}
