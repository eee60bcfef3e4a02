// Species catalog backing the specimen shelf, the map labels and the recipes

/// How safely a specimen can be handled in the kitchen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edibility {
    Edible,
    Toxic,
    Deadly,
    Medicinal,
    Unknown,
}

impl Edibility {
    /// Toxic and deadly entries never reach a recipe.
    pub fn is_dangerous(&self) -> bool {
        matches!(self, Edibility::Toxic | Edibility::Deadly)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Edibility::Edible => "edible",
            Edibility::Toxic => "toxic",
            Edibility::Deadly => "deadly",
            Edibility::Medicinal => "medicinal",
            Edibility::Unknown => "unknown",
        }
    }
}

/// A species this one is commonly mistaken for, and why the mix-up matters.
#[derive(Clone, Copy, Debug)]
pub struct Lookalike {
    pub name: &'static str,
    pub warning: &'static str,
}

/// Bench identification characters, recorded where the archive has them.
#[derive(Clone, Copy, Debug)]
pub struct Anatomy {
    pub koh_reaction: Option<&'static str>,
    pub spore_print: Option<&'static str>,
    pub ring_type: Option<&'static str>,
    pub gill_attachment: Option<&'static str>,
}

/// How the species makes its living and the trees it keeps company with.
#[derive(Clone, Copy, Debug)]
pub struct Ecology {
    pub relationship: &'static str,
    pub host_trees: &'static [&'static str],
}

/// Preparation guidance kept as data so the recipe generator can reason
/// over it instead of parsing prose.
#[derive(Clone, Copy, Debug)]
pub struct CookingNotes {
    pub method: &'static str,
    /// Minimum safe cook time, when a species demands one.
    pub min_cook_minutes: Option<u32>,
    pub warning: Option<&'static str>,
    /// True when ignoring the warning risks poisoning rather than a ruined
    /// dish.
    pub warning_critical: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Species {
    pub id: &'static str,
    pub name: &'static str,
    pub scientific_name: &'static str,
    pub family: &'static str,
    pub edibility: Edibility,
    pub description: &'static str,
    pub seasons: &'static [&'static str],
    pub habitats: &'static [&'static str],
    pub cap_shape: &'static str,
    pub odor: &'static str,
    pub spore_color: &'static str,
    pub color_change: Option<&'static str>,
    pub lookalikes: &'static [Lookalike],
    pub anatomy: Option<Anatomy>,
    pub ecology: Option<Ecology>,
    pub cooking: Option<CookingNotes>,
}

pub const CATALOG: [Species; 14] = [
    Species {
        id: "psilocybe-cubensis",
        name: "Psilocybe Cubensis",
        scientific_name: "Psilocybe cubensis",
        family: "Hymenogastraceae",
        edibility: Edibility::Unknown,
        description: "The reference culture of the growth lab. Colonizes fast \
                      and forgives rough handling, which makes it the default \
                      specimen for new researchers.",
        seasons: &["Spring", "Summer"],
        habitats: &["Pasture", "Subtropical Grassland"],
        cap_shape: "Conical to Convex",
        odor: "Farinaceous",
        spore_color: "Purple Brown",
        color_change: Some("Bruises blue where handled"),
        lookalikes: &[],
        anatomy: None,
        ecology: None,
        cooking: None,
    },
    Species {
        id: "lanmaoa-asiatica",
        name: "Blue Staining Boletus",
        scientific_name: "Lanmaoa asiatica",
        family: "Boletales",
        edibility: Edibility::Edible,
        description: "A precious edible fungus unique to Yunnan. It turns blue \
                      immediately upon touch and must be fully cooked before \
                      consumption.",
        seasons: &["Summer", "Autumn"],
        habitats: &["Mixed Coniferous Broad-leaved Forest", "Pine Forest"],
        cap_shape: "Hemispherical to Flat",
        odor: "Mild Fungus Scent",
        spore_color: "Olive Brown",
        color_change: Some("Turns blue on touch"),
        lookalikes: &[Lookalike {
            name: "Satan's Bolete",
            warning: "Hallucinogenic if undercooked",
        }],
        anatomy: Some(Anatomy {
            koh_reaction: Some("Turns Red"),
            spore_print: Some("Olive Brown"),
            ring_type: Some("No Ring"),
            gill_attachment: Some("Adnate"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Yunnan Pine", "Armand Pine", "Oak"],
        }),
        cooking: Some(CookingNotes {
            method: "Stir-fry",
            min_cook_minutes: Some(15),
            warning: Some(
                "Must be stir-fried thoroughly for at least 15 minutes, \
                 otherwise it may cause neurological discomfort.",
            ),
            warning_critical: true,
        }),
    },
    Species {
        id: "cantharellus-cibarius",
        name: "Golden Chanterelle",
        scientific_name: "Cantharellus cibarius",
        family: "Cantharellaceae",
        edibility: Edibility::Edible,
        description: "A golden-yellow delicious edible fungus with a unique \
                      apricot aroma.",
        seasons: &["Summer", "Autumn"],
        habitats: &["Mixed Forest", "Beech Forest"],
        cap_shape: "Funnel-shaped",
        odor: "Apricot Aroma",
        spore_color: "White to Pale Yellow",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White"),
            ring_type: None,
            gill_attachment: Some("Decurrent"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Pine", "Oak", "Beech"],
        }),
        cooking: Some(CookingNotes {
            method: "Stir-fry, Soup",
            min_cook_minutes: None,
            warning: None,
            warning_critical: false,
        }),
    },
    Species {
        id: "tricholoma-matsutake",
        name: "Pine Mushroom",
        scientific_name: "Tricholoma matsutake",
        family: "Tricholomataceae",
        edibility: Edibility::Edible,
        description: "A world-class rare edible fungus with a unique aroma and \
                      high nutritional value.",
        seasons: &["Autumn"],
        habitats: &["Coniferous Forest", "Pine Forest"],
        cap_shape: "Hemispherical to Flat",
        odor: "Strong Pine Scent",
        spore_color: "White",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White"),
            ring_type: Some("Membranous Ring"),
            gill_attachment: Some("Adnexed"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Red Pine", "Hemlock", "Spruce"],
        }),
        cooking: Some(CookingNotes {
            method: "Sashimi, Charcoal Grilled, Soup",
            min_cook_minutes: None,
            warning: Some("Best consumed fresh. Drying may diminish its unique aroma."),
            warning_critical: false,
        }),
    },
    Species {
        id: "amanita-muscaria",
        name: "Fly Amanita",
        scientific_name: "Amanita muscaria",
        family: "Amanitaceae",
        edibility: Edibility::Toxic,
        description: "Iconic red-capped white-spotted poisonous mushroom \
                      containing hallucinogenic toxins. Strictly forbidden to \
                      eat.",
        seasons: &["Summer", "Autumn"],
        habitats: &["Coniferous Forest", "Birch Forest"],
        cap_shape: "Hemispherical to Flat",
        odor: "Slightly Unpleasant",
        spore_color: "White",
        color_change: None,
        lookalikes: &[Lookalike {
            name: "Caesar's Mushroom",
            warning: "The edible double; confusing the two has caused many poisonings",
        }],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White"),
            ring_type: Some("Membranous Ring"),
            gill_attachment: Some("Free"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Birch", "Pine", "Spruce", "Fir"],
        }),
        cooking: Some(CookingNotes {
            method: "Do Not Eat",
            min_cook_minutes: None,
            warning: Some(
                "Contains ibotenic acid and muscimol, can cause \
                 hallucinations, vomiting, and nervous system damage.",
            ),
            warning_critical: true,
        }),
    },
    Species {
        id: "morchella-esculenta",
        name: "True Morel",
        scientific_name: "Morchella esculenta",
        family: "Morchellaceae",
        edibility: Edibility::Edible,
        description: "Precious edible fungus with honeycomb-like cap, one of \
                      the four famous mushrooms in the world.",
        seasons: &["Spring"],
        habitats: &["Broad-leaved Forest", "River Bank", "Burned Area"],
        cap_shape: "Honeycomb",
        odor: "Pleasant",
        spore_color: "Pale Yellow",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("Pale Yellow to Cream"),
            ring_type: Some("No Ring"),
            gill_attachment: Some("Honeycomb ridges (no true gills)"),
        }),
        ecology: Some(Ecology {
            relationship: "Saprophytic",
            host_trees: &["Various Broad-leaved Trees"],
        }),
        cooking: Some(CookingNotes {
            method: "Soup, Stir-fry",
            min_cook_minutes: None,
            warning: Some("Must be cooked, never eat raw."),
            warning_critical: true,
        }),
    },
    Species {
        id: "ganoderma-lucidum",
        name: "Lingzhi",
        scientific_name: "Ganoderma lucidum",
        family: "Ganodermataceae",
        edibility: Edibility::Medicinal,
        description: "Traditional medicinal fungus, known for strengthening \
                      the body and prolonging life.",
        seasons: &["All Year"],
        habitats: &["Broad-leaved Forest", "Decaying Wood"],
        cap_shape: "Fan to Kidney Shaped",
        odor: "Slightly Bitter",
        spore_color: "Brown",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("Brown"),
            ring_type: None,
            gill_attachment: Some("Pores (polypore)"),
        }),
        ecology: Some(Ecology {
            relationship: "Wood-decaying",
            host_trees: &["Oak", "Birch", "Willow"],
        }),
        cooking: Some(CookingNotes {
            method: "Decoction, Tea, Soup",
            min_cook_minutes: None,
            warning: None,
            warning_critical: false,
        }),
    },
    Species {
        id: "amanita-phalloides",
        name: "Death Cap",
        scientific_name: "Amanita phalloides",
        family: "Amanitaceae",
        edibility: Edibility::Deadly,
        description: "One of the most poisonous mushrooms in the world, \
                      containing deadly amatoxins.",
        seasons: &["Summer", "Autumn"],
        habitats: &["Broad-leaved Forest", "Mixed Forest"],
        cap_shape: "Hemispherical to Flat",
        odor: "First Odorless",
        spore_color: "White",
        color_change: None,
        lookalikes: &[Lookalike {
            name: "Paddy Straw Mushroom",
            warning: "Easily confused, requires professional identification",
        }],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White"),
            ring_type: Some("Membranous Ring"),
            gill_attachment: Some("Free"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Oak", "Beech", "Chestnut", "Hazel"],
        }),
        cooking: Some(CookingNotes {
            method: "Do Not Eat",
            min_cook_minutes: None,
            warning: Some(
                "Deadly toxic. Contains alpha-amanitin, extremely high \
                 mortality rate, no specific antidote.",
            ),
            warning_critical: true,
        }),
    },
    Species {
        id: "trametes-versicolor",
        name: "Turkey Tail",
        scientific_name: "Trametes versicolor",
        family: "Polyporaceae",
        edibility: Edibility::Medicinal,
        description: "A common polypore mushroom found throughout the world, \
                      known for its layered, colorful cap resembling a \
                      turkey's tail.",
        seasons: &["All Year"],
        habitats: &["Decaying Wood", "Mixed Forest"],
        cap_shape: "Fan to Kidney Shaped",
        odor: "Mild",
        spore_color: "White",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White"),
            ring_type: None,
            gill_attachment: Some("Pores (polypore)"),
        }),
        ecology: Some(Ecology {
            relationship: "Saprophytic",
            host_trees: &["Oak", "Beech", "Maple"],
        }),
        cooking: Some(CookingNotes {
            method: "Tea, Decoction, Extract",
            min_cook_minutes: None,
            warning: Some(
                "Too tough to eat directly. Best used for medicinal teas and \
                 extracts.",
            ),
            warning_critical: false,
        }),
    },
    Species {
        id: "boletus-edulis",
        name: "King Bolete",
        scientific_name: "Boletus edulis",
        family: "Boletales",
        edibility: Edibility::Edible,
        description: "One of the most prized edible mushrooms, known for its \
                      meaty texture and nutty flavor.",
        seasons: &["Summer", "Autumn"],
        habitats: &["Coniferous Forest", "Broad-leaved Forest"],
        cap_shape: "Hemispherical to Flat",
        odor: "Nutty",
        spore_color: "Olive Brown",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("Olive Brown"),
            ring_type: Some("No Ring"),
            gill_attachment: Some("Pores (bolete)"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Spruce", "Pine", "Chestnut", "Beech"],
        }),
        cooking: Some(CookingNotes {
            method: "Grilled, Risotto, Dried",
            min_cook_minutes: None,
            warning: None,
            warning_critical: false,
        }),
    },
    Species {
        id: "pleurotus-ostreatus",
        name: "Pearl Oyster",
        scientific_name: "Pleurotus ostreatus",
        family: "Pleurotaceae",
        edibility: Edibility::Edible,
        description: "A common edible mushroom with a mild flavor and a faint \
                      scent of anise.",
        seasons: &["Autumn", "Winter"],
        habitats: &["Decaying Wood", "Broad-leaved Forest"],
        cap_shape: "Fan to Kidney Shaped",
        odor: "Anise-like",
        spore_color: "White to Lilac Gray",
        color_change: None,
        lookalikes: &[Lookalike {
            name: "Ghost Fungus",
            warning: "Toxic double on dead wood; it glows faintly in the dark",
        }],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White to Lilac Gray"),
            ring_type: None,
            gill_attachment: Some("Decurrent"),
        }),
        ecology: Some(Ecology {
            relationship: "Saprophytic",
            host_trees: &["Beech", "Aspen", "Oak", "Various Hardwoods"],
        }),
        cooking: Some(CookingNotes {
            method: "Sauteed, Stir-fry",
            min_cook_minutes: None,
            warning: None,
            warning_critical: false,
        }),
    },
    Species {
        id: "lactarius-indigo",
        name: "Indigo Milk Cap",
        scientific_name: "Lactarius indigo",
        family: "Russulaceae",
        edibility: Edibility::Edible,
        description: "A striking blue mushroom that exudes a blue milky juice \
                      when cut.",
        seasons: &["Summer", "Autumn"],
        habitats: &["Coniferous Forest", "Mixed Forest"],
        cap_shape: "Funnel-shaped",
        odor: "Mild",
        spore_color: "Cream",
        color_change: Some("Exudes blue milk when cut"),
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("Cream to Pale Yellow"),
            ring_type: None,
            gill_attachment: Some("Adnate to Slightly Decurrent"),
        }),
        ecology: Some(Ecology {
            relationship: "Ectomycorrhizal",
            host_trees: &["Pine", "Oak"],
        }),
        cooking: Some(CookingNotes {
            method: "Grilled, Sauteed",
            min_cook_minutes: None,
            warning: Some("The blue color fades when cooked."),
            warning_critical: false,
        }),
    },
    Species {
        id: "omphalotus-nidiformis",
        name: "Ghost Fungus",
        scientific_name: "Omphalotus nidiformis",
        family: "Omphalotaceae",
        edibility: Edibility::Toxic,
        description: "A bioluminescent mushroom that glows pale green in the \
                      dark. Highly toxic if consumed.",
        seasons: &["Autumn", "Winter"],
        habitats: &["Decaying Wood", "Broad-leaved Forest"],
        cap_shape: "Fan to Kidney Shaped",
        odor: "Mild",
        spore_color: "White",
        color_change: Some("Bioluminescent, glows in the dark"),
        lookalikes: &[Lookalike {
            name: "Pearl Oyster",
            warning: "Often confused with oyster mushrooms",
        }],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White to Cream"),
            ring_type: None,
            gill_attachment: Some("Decurrent"),
        }),
        ecology: Some(Ecology {
            relationship: "Saprophytic",
            host_trees: &["Eucalyptus", "Various Dead Hardwoods"],
        }),
        cooking: Some(CookingNotes {
            method: "Do Not Eat",
            min_cook_minutes: None,
            warning: Some(
                "Highly toxic. Causes severe cramps, vomiting, and diarrhea. \
                 Often confused with oyster mushrooms.",
            ),
            warning_critical: true,
        }),
    },
    Species {
        id: "hericium-erinaceus",
        name: "Lion's Mane",
        scientific_name: "Hericium erinaceus",
        family: "Hericiaceae",
        edibility: Edibility::Edible,
        description: "A unique mushroom with cascading white spines, known for \
                      its seafood-like flavor and cognitive benefits.",
        seasons: &["Late Summer", "Autumn"],
        habitats: &["Decaying Wood", "Broad-leaved Forest"],
        cap_shape: "Cushion-like with Hanging Spines",
        odor: "Mild, Seafood-like",
        spore_color: "White",
        color_change: None,
        lookalikes: &[],
        anatomy: Some(Anatomy {
            koh_reaction: None,
            spore_print: Some("White"),
            ring_type: None,
            gill_attachment: Some("Teeth (hanging spines)"),
        }),
        ecology: Some(Ecology {
            relationship: "Saprophytic",
            host_trees: &["Oak", "Beech", "Maple"],
        }),
        cooking: Some(CookingNotes {
            method: "Pan-fried, Seared",
            min_cook_minutes: None,
            warning: None,
            warning_critical: false,
        }),
    },
];

pub fn find(id: &str) -> Option<&'static Species> {
    CATALOG.iter().find(|s| s.id == id)
}

/// Lookup for read paths: a miss falls back to the reference entry instead
/// of failing. Validation paths use [`find`] and handle the miss themselves.
pub fn find_or_default(id: &str) -> &'static Species {
    find(id).unwrap_or(&CATALOG[0])
}

pub fn all() -> &'static [Species] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn find_resolves_known_ids_and_rejects_unknown() {
        assert_eq!(find("boletus-edulis").map(|s| s.name), Some("King Bolete"));
        assert!(find("tricholoma-imposter").is_none());
    }

    #[test]
    fn read_lookup_falls_back_to_the_reference_entry() {
        assert_eq!(find_or_default("no-such-species").id, "psilocybe-cubensis");
        assert_eq!(find_or_default("boletus-edulis").id, "boletus-edulis");
    }

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<&str> = CATALOG.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn shelf_specimens_exist_in_the_catalog() {
        for id in ["psilocybe-cubensis", "amanita-muscaria", "hericium-erinaceus"] {
            assert!(find(id).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn dangerous_flag_covers_toxic_and_deadly_only() {
        assert!(find("amanita-muscaria").unwrap().edibility.is_dangerous());
        assert!(find("amanita-phalloides").unwrap().edibility.is_dangerous());
        assert!(!find("ganoderma-lucidum").unwrap().edibility.is_dangerous());
        assert!(!find("psilocybe-cubensis").unwrap().edibility.is_dangerous());
        assert!(!find("boletus-edulis").unwrap().edibility.is_dangerous());
    }

    #[test]
    fn safety_minimum_cook_times_are_carried_as_data() {
        let boletus = find("lanmaoa-asiatica").unwrap();
        let notes = boletus.cooking.unwrap();
        assert_eq!(notes.min_cook_minutes, Some(15));
        assert!(notes.warning.is_some());
    }

    #[test]
    fn deadly_lookalikes_carry_confusion_warnings() {
        let death_cap = find("amanita-phalloides").unwrap();
        assert!(death_cap.edibility.is_dangerous());
        assert_eq!(death_cap.lookalikes.len(), 1);
        assert_eq!(death_cap.lookalikes[0].name, "Paddy Straw Mushroom");
        assert!(!death_cap.lookalikes[0].warning.is_empty());

        let oyster = find("pleurotus-ostreatus").unwrap();
        assert!(oyster.lookalikes.iter().any(|l| l.name == "Ghost Fungus"));
    }

    #[test]
    fn color_changes_are_recorded_where_observed() {
        assert_eq!(
            find("lanmaoa-asiatica").unwrap().color_change,
            Some("Turns blue on touch")
        );
        assert_eq!(find("boletus-edulis").unwrap().color_change, None);
    }

    #[test]
    fn bench_characters_cover_most_of_the_archive() {
        let with_anatomy = CATALOG.iter().filter(|s| s.anatomy.is_some()).count();
        assert!(with_anatomy > 0 && with_anatomy < CATALOG.len());

        let morel = find("morchella-esculenta").unwrap().anatomy.unwrap();
        assert_eq!(morel.ring_type, Some("No Ring"));
        let bolete = find("lanmaoa-asiatica").unwrap().anatomy.unwrap();
        assert_eq!(bolete.koh_reaction, Some("Turns Red"));
    }

    #[test]
    fn critical_warnings_mark_poisoning_risks_only() {
        assert!(find("lanmaoa-asiatica").unwrap().cooking.unwrap().warning_critical);
        assert!(find("morchella-esculenta").unwrap().cooking.unwrap().warning_critical);

        let turkey_tail = find("trametes-versicolor").unwrap().cooking.unwrap();
        assert!(turkey_tail.warning.is_some());
        assert!(!turkey_tail.warning_critical);
    }
}
