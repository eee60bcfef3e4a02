// Recipe generation - a deterministic stand-in behind a pluggable seam

use thiserror::Error;

use crate::species::{self, Species};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error("select at least one known ingredient")]
    EmptySelection,
    #[error("refusing to cook with {}", .names.join(", "))]
    DangerousIngredients { names: Vec<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Master,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Master => "master",
        }
    }

    /// Every caveat on the shopping list raises the bar.
    fn from_warning_count(count: usize) -> Self {
        match count {
            0 => Difficulty::Beginner,
            1 => Difficulty::Intermediate,
            2 => Difficulty::Advanced,
            _ => Difficulty::Master,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub species_id: String,
    pub name: String,
    pub quantity: &'static str,
    /// The first selected species carries the dish.
    pub main: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeStep {
    pub number: u32,
    pub instruction: String,
    pub minutes: u32,
    pub heat: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafetyWarning {
    pub text: String,
    /// Poisoning risk rather than a quality note.
    pub critical: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub total_minutes: u32,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
    pub warnings: Vec<SafetyWarning>,
    /// 1 (handle with care) to 5 (nothing to watch for).
    pub safety_level: u8,
}

/// Seam for recipe authorship. The shipped implementation is a local stub;
/// a model-backed generator can slot in here without touching callers.
pub trait RecipeGenerator: Send {
    fn generate(&self, species_ids: &[String]) -> Result<Recipe, RecipeError>;
}

/// Template-based generator. It never invents beyond the catalog: the
/// safety gate, cooking floors and warnings all come straight from the
/// species records.
pub struct StubRecipeGenerator;

impl RecipeGenerator for StubRecipeGenerator {
    fn generate(&self, species_ids: &[String]) -> Result<Recipe, RecipeError> {
        let picks: Vec<&Species> = species_ids
            .iter()
            .filter_map(|id| species::find(id))
            .collect();
        if picks.is_empty() {
            return Err(RecipeError::EmptySelection);
        }

        let dangerous: Vec<String> = picks
            .iter()
            .filter(|s| s.edibility.is_dangerous())
            .map(|s| s.name.to_string())
            .collect();
        if !dangerous.is_empty() {
            return Err(RecipeError::DangerousIngredients { names: dangerous });
        }

        let warnings: Vec<SafetyWarning> = picks
            .iter()
            .filter_map(|s| {
                let notes = s.cooking.as_ref()?;
                let text = notes.warning?;
                Some(SafetyWarning {
                    text: format!("{}: {text}", s.name),
                    critical: notes.warning_critical,
                })
            })
            .collect();
        let critical_count = warnings.iter().filter(|w| w.critical).count();
        let safety_level = 5u8
            .saturating_sub((warnings.len() + critical_count) as u8)
            .max(1);

        // The cook step never undershoots the slowest ingredient.
        let cook_minutes = picks
            .iter()
            .filter_map(|s| s.cooking.as_ref().and_then(|notes| notes.min_cook_minutes))
            .max()
            .unwrap_or(8);

        let main = picks[0];
        let title = if picks.len() == 1 {
            format!("{} with Forest Herbs", main.name)
        } else {
            format!("{} Medley", main.name)
        };
        let description = if picks.len() == 1 {
            format!("A simple pan dish built to showcase {}.", main.name)
        } else {
            format!(
                "A simple pan dish that lets {} lead, backed by {} more species \
                 from the selection.",
                main.name,
                picks.len() - 1
            )
        };

        let ingredients: Vec<RecipeIngredient> = picks
            .iter()
            .enumerate()
            .map(|(i, s)| RecipeIngredient {
                species_id: s.id.to_string(),
                name: s.name.to_string(),
                quantity: if i == 0 { "300 g" } else { "150 g" },
                main: i == 0,
            })
            .collect();

        let steps = vec![
            RecipeStep {
                number: 1,
                instruction: "Brush the caps clean and slice everything to an even thickness."
                    .to_string(),
                minutes: 10,
                heat: None,
            },
            RecipeStep {
                number: 2,
                instruction: format!(
                    "Pan-fry for {cook_minutes} minutes until cooked through; do not shorten this step."
                ),
                minutes: cook_minutes,
                heat: Some("medium-high"),
            },
            RecipeStep {
                number: 3,
                instruction: "Rest off the heat, season and serve.".to_string(),
                minutes: 2,
                heat: None,
            },
        ];

        Ok(Recipe {
            title,
            description,
            difficulty: Difficulty::from_warning_count(warnings.len()),
            total_minutes: steps.iter().map(|s| s.minutes).sum(),
            servings: 2,
            ingredients,
            steps,
            warnings,
            safety_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(slice: &[&str]) -> Vec<String> {
        slice.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_or_unresolvable_selections_are_refused() {
        let gen = StubRecipeGenerator;
        assert_eq!(gen.generate(&[]), Err(RecipeError::EmptySelection));
        assert_eq!(
            gen.generate(&ids(&["not-a-mushroom", "also-unknown"])),
            Err(RecipeError::EmptySelection)
        );
    }

    #[test]
    fn toxic_ingredients_are_named_in_the_refusal() {
        let gen = StubRecipeGenerator;
        let err = gen
            .generate(&ids(&[
                "amanita-muscaria",
                "boletus-edulis",
                "amanita-phalloides",
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            RecipeError::DangerousIngredients {
                names: vec!["Fly Amanita".to_string(), "Death Cap".to_string()],
            }
        );
        assert!(err.to_string().contains("Fly Amanita"));
    }

    #[test]
    fn medicinal_species_pass_the_safety_gate() {
        let gen = StubRecipeGenerator;
        let recipe = gen.generate(&ids(&["ganoderma-lucidum"])).unwrap();
        assert_eq!(recipe.title, "Lingzhi with Forest Herbs");
        assert_eq!(recipe.difficulty, Difficulty::Beginner);
        assert_eq!(recipe.safety_level, 5);
    }

    #[test]
    fn unknown_ids_are_skipped_not_fatal() {
        let gen = StubRecipeGenerator;
        let recipe = gen
            .generate(&ids(&["mystery-spore", "boletus-edulis"]))
            .unwrap();
        assert_eq!(recipe.title, "King Bolete with Forest Herbs");
    }

    #[test]
    fn the_main_ingredient_leads_the_shopping_list() {
        let gen = StubRecipeGenerator;
        let recipe = gen
            .generate(&ids(&["boletus-edulis", "cantharellus-cibarius"]))
            .unwrap();

        assert_eq!(recipe.ingredients.len(), 2);
        assert!(recipe.ingredients[0].main);
        assert_eq!(recipe.ingredients[0].species_id, "boletus-edulis");
        assert_eq!(recipe.ingredients[0].quantity, "300 g");
        assert!(!recipe.ingredients[1].main);
        assert_eq!(recipe.ingredients[1].name, "Golden Chanterelle");
        assert_eq!(recipe.ingredients[1].quantity, "150 g");
        assert!(recipe.description.contains("King Bolete"));
    }

    #[test]
    fn difficulty_scales_with_safety_warnings() {
        let gen = StubRecipeGenerator;

        let plain = gen.generate(&ids(&["boletus-edulis"])).unwrap();
        assert_eq!(plain.difficulty, Difficulty::Beginner);
        assert!(plain.warnings.is_empty());

        let careful = gen
            .generate(&ids(&["morchella-esculenta", "boletus-edulis"]))
            .unwrap();
        assert_eq!(careful.difficulty, Difficulty::Intermediate);
        assert_eq!(
            careful.warnings,
            vec![SafetyWarning {
                text: "True Morel: Must be cooked, never eat raw.".to_string(),
                critical: true,
            }]
        );

        let expert = gen
            .generate(&ids(&["lanmaoa-asiatica", "morchella-esculenta"]))
            .unwrap();
        assert_eq!(expert.difficulty, Difficulty::Advanced);
        assert_eq!(expert.warnings.len(), 2);

        assert_eq!(Difficulty::from_warning_count(3), Difficulty::Master);
        assert_eq!(Difficulty::from_warning_count(7), Difficulty::Master);
    }

    #[test]
    fn safety_level_drops_fastest_for_poisoning_risks() {
        let gen = StubRecipeGenerator;

        // Advisory note only: one step down.
        let medicinal = gen.generate(&ids(&["trametes-versicolor"])).unwrap();
        assert!(!medicinal.warnings[0].critical);
        assert_eq!(medicinal.safety_level, 4);

        // A critical warning costs two.
        let morel = gen.generate(&ids(&["morchella-esculenta"])).unwrap();
        assert!(morel.warnings[0].critical);
        assert_eq!(morel.safety_level, 3);

        // Two critical warnings bottom out at the floor.
        let risky = gen
            .generate(&ids(&["lanmaoa-asiatica", "morchella-esculenta"]))
            .unwrap();
        assert_eq!(risky.safety_level, 1);
    }

    #[test]
    fn the_cook_step_honours_the_longest_minimum() {
        let gen = StubRecipeGenerator;
        let recipe = gen
            .generate(&ids(&["boletus-edulis", "lanmaoa-asiatica"]))
            .unwrap();

        assert_eq!(recipe.title, "King Bolete Medley");
        assert_eq!(recipe.steps.len(), 3);
        assert_eq!(
            recipe.steps.iter().map(|s| s.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(recipe.steps[1].minutes, 15);
        assert_eq!(recipe.steps[1].heat, Some("medium-high"));
        assert_eq!(recipe.total_minutes, 27);
        assert_eq!(recipe.servings, 2);
    }

    #[test]
    fn quick_ingredients_get_the_default_cook_time() {
        let gen = StubRecipeGenerator;
        let recipe = gen
            .generate(&ids(&["pleurotus-ostreatus", "hericium-erinaceus"]))
            .unwrap();
        assert_eq!(recipe.title, "Pearl Oyster Medley");
        assert_eq!(recipe.steps[1].minutes, 8);
        assert_eq!(recipe.total_minutes, 20);
    }
}
