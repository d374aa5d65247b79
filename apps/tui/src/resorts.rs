//! Static registry of the French resorts shown on the map.

use crate::data::{apostrophe_variants, BluebirdDataset};
use crate::domain::{MapPosition, Month, Rgb, Week};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resort {
    pub id: &'static str,
    pub name: &'static str,
    pub length_km: u16,
    pub suitable_for: &'static str,
    pub color: Rgb,
    pub position: MapPosition,
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("duplicate resort id: {0}")]
    DuplicateId(String),
    #[error("resort {id} is positioned outside the map ({x}, {y})")]
    PositionOutOfBounds { id: String, x: f64, y: f64 },
}

/// Immutable resort list, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ResortRegistry {
    resorts: Vec<Resort>,
}

impl ResortRegistry {
    pub fn builtin() -> Self {
        Self {
            resorts: BUILTIN_RESORTS.to_vec(),
        }
    }

    pub fn new(resorts: Vec<Resort>) -> Result<Self, RegistryError> {
        let registry = Self { resorts };
        registry.validate()?;
        Ok(registry)
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for resort in &self.resorts {
            if !seen.insert(resort.id) {
                return Err(RegistryError::DuplicateId(resort.id.to_string()));
            }
            if !resort.position.in_bounds() {
                return Err(RegistryError::PositionOutOfBounds {
                    id: resort.id.to_string(),
                    x: resort.position.x,
                    y: resort.position.y,
                });
            }
        }
        Ok(())
    }

    pub fn all(&self) -> &[Resort] {
        &self.resorts
    }

    pub fn len(&self) -> usize {
        self.resorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resorts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Resort> {
        self.resorts.iter().find(|resort| resort.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.resorts.iter().position(|resort| resort.id == id)
    }

    /// Exact name lookup, tolerant of curly vs straight apostrophes.
    pub fn find_by_name(&self, name: &str) -> Option<&Resort> {
        let variants = apostrophe_variants(name);
        self.resorts
            .iter()
            .find(|resort| variants.iter().any(|variant| variant == resort.name))
    }

    /// Resorts ordered by descending bluebird days for the given week.
    /// Equal values keep registry order.
    pub fn by_value_desc(&self, dataset: &BluebirdDataset, month: Month, week: Week) -> Vec<&Resort> {
        let mut ranked: Vec<(&Resort, f64)> = self
            .resorts
            .iter()
            .map(|resort| (resort, dataset.value(month, week, resort.name)))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        ranked.into_iter().map(|(resort, _)| resort).collect()
    }

    /// Resorts ordered north to south (ascending map y).
    pub fn north_to_south(&self) -> Vec<&Resort> {
        let mut ordered: Vec<&Resort> = self.resorts.iter().collect();
        ordered.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
        ordered
    }

    /// Best fuzzy match for a free-text query, used by the map's jump prompt.
    pub fn search(&self, query: &str) -> Option<&Resort> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let matcher = SkimMatcherV2::default().ignore_case();
        self.resorts
            .iter()
            .filter_map(|resort| {
                matcher
                    .fuzzy_match(resort.name, query)
                    .or_else(|| matcher.fuzzy_match(resort.id, query))
                    .map(|score| (resort, score))
            })
            .max_by_key(|(_, score)| *score)
            .map(|(resort, _)| resort)
    }
}

impl Default for ResortRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_RESORTS: [Resort; 30] = [
    Resort {
        id: "avoriaz",
        name: "Avoriaz",
        length_km: 78,
        suitable_for: "families, intermediates, snowboarding",
        color: Rgb(0x02, 0xF8, 0xF4),
        position: MapPosition::new(51.9, 14.4),
    },
    Resort {
        id: "morzine",
        name: "Morzine",
        length_km: 120,
        suitable_for: "beginners, intermediates",
        color: Rgb(0x02, 0xFE, 0xF3),
        position: MapPosition::new(50.8, 14.8),
    },
    Resort {
        id: "les-gets",
        name: "Les Gets",
        length_km: 120,
        suitable_for: "families, intermediates",
        color: Rgb(0x01, 0xED, 0xF7),
        position: MapPosition::new(49.8, 15.9),
    },
    Resort {
        id: "les-carroz",
        name: "Les Carroz",
        length_km: 28,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x00, 0xE2, 0xF9),
        position: MapPosition::new(49.8, 19.3),
    },
    Resort {
        id: "flaine",
        name: "Flaine",
        length_km: 265,
        suitable_for: "versatile",
        color: Rgb(0x00, 0xDD, 0xFB),
        position: MapPosition::new(51.4, 19.6),
    },
    Resort {
        id: "les-houches",
        name: "Les Houches",
        length_km: 55,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x00, 0xD8, 0xFD),
        position: MapPosition::new(56.0, 20.7),
    },
    Resort {
        id: "chamonix",
        name: "Chamonix",
        length_km: 155,
        suitable_for: "advanced, off-piste",
        color: Rgb(0x00, 0xD3, 0xFF),
        position: MapPosition::new(54.5, 22.0),
    },
    Resort {
        id: "saint-gervais",
        name: "Saint Gervais les Bains",
        length_km: 65,
        suitable_for: "beginners, intermediates, advanced",
        color: Rgb(0x04, 0xCB, 0xFC),
        position: MapPosition::new(52.6, 22.3),
    },
    Resort {
        id: "la-clusaz",
        name: "La Clusaz",
        length_km: 132,
        suitable_for: "versatile",
        color: Rgb(0x0C, 0xC1, 0xF6),
        position: MapPosition::new(46.1, 23.9),
    },
    Resort {
        id: "les-saisies",
        name: "Les Saisies",
        length_km: 77,
        suitable_for: "beginners, intermediates",
        color: Rgb(0x23, 0xA5, 0xE6),
        position: MapPosition::new(50.0, 27.7),
    },
    Resort {
        id: "la-rosiere",
        name: "La Rosière",
        length_km: 152,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x2A, 0x9A, 0xDF),
        position: MapPosition::new(58.0, 29.7),
    },
    Resort {
        id: "les-arcs",
        name: "Les Arcs",
        length_km: 200,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x3A, 0x87, 0xD4),
        position: MapPosition::new(57.9, 31.8),
    },
    Resort {
        id: "la-plagne",
        name: "La Plagne",
        length_km: 225,
        suitable_for: "intermediates, families",
        color: Rgb(0x45, 0x79, 0xCC),
        position: MapPosition::new(55.1, 34.6),
    },
    Resort {
        id: "tignes",
        name: "Tignes",
        length_km: 300,
        suitable_for: "versatile",
        color: Rgb(0x47, 0x74, 0xCF),
        position: MapPosition::new(60.8, 34.4),
    },
    Resort {
        id: "val-disere",
        name: "Val d'Isère",
        length_km: 300,
        suitable_for: "versatile",
        color: Rgb(0x48, 0x66, 0xD5),
        position: MapPosition::new(62.9, 34.6),
    },
    Resort {
        id: "st-martin-belleville",
        name: "St Martin de Belleville",
        length_km: 100,
        suitable_for: "intermediates, families",
        color: Rgb(0x49, 0x59, 0xDA),
        position: MapPosition::new(54.4, 37.8),
    },
    Resort {
        id: "meribel",
        name: "Méribel",
        length_km: 150,
        suitable_for: "versatile",
        color: Rgb(0x4C, 0x3F, 0xE5),
        position: MapPosition::new(53.4, 39.5),
    },
    Resort {
        id: "valmorel",
        name: "Valmorel",
        length_km: 165,
        suitable_for: "intermediates, families",
        color: Rgb(0x4D, 0x31, 0xEA),
        position: MapPosition::new(51.8, 40.5),
    },
    Resort {
        id: "courchevel",
        name: "Courchevel",
        length_km: 150,
        suitable_for: "versatile",
        color: Rgb(0x4A, 0x4B, 0xDF),
        position: MapPosition::new(49.8, 38.1),
    },
    Resort {
        id: "val-thorens",
        name: "Val Thorens",
        length_km: 150,
        suitable_for: "versatile",
        color: Rgb(0x4F, 0x25, 0xEF),
        position: MapPosition::new(60.9, 41.6),
    },
    Resort {
        id: "val-cenis",
        name: "Val Cenis",
        length_km: 100,
        suitable_for: "intermediates, families",
        color: Rgb(0x51, 0x18, 0xF5),
        position: MapPosition::new(53.2, 42.4),
    },
    Resort {
        id: "les-menuires",
        name: "Les Menuires",
        length_km: 160,
        suitable_for: "intermediates, families",
        color: Rgb(0x52, 0x0B, 0xFA),
        position: MapPosition::new(54.8, 43.5),
    },
    Resort {
        id: "vaujany",
        name: "Vaujany",
        length_km: 249,
        suitable_for: "families, beginners, experts",
        color: Rgb(0x5D, 0x00, 0xFF),
        position: MapPosition::new(42.3, 53.1),
    },
    Resort {
        id: "alpe-dhuez",
        name: "Alpe d'Huez",
        length_km: 250,
        suitable_for: "versatile",
        color: Rgb(0x65, 0x01, 0xFF),
        position: MapPosition::new(42.6, 56.0),
    },
    Resort {
        id: "les-deux-alpes",
        name: "Les Deux Alpes",
        length_km: 225,
        suitable_for: "versatile",
        color: Rgb(0x76, 0x01, 0xFF),
        position: MapPosition::new(44.8, 58.9),
    },
    Resort {
        id: "serre-chevalier",
        name: "Serre Chevalier",
        length_km: 250,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x7E, 0x00, 0xFF),
        position: MapPosition::new(57.9, 59.4),
    },
    Resort {
        id: "montgenevre",
        name: "Montgenèvre",
        length_km: 100,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x6D, 0x00, 0xFF),
        position: MapPosition::new(62.3, 56.6),
    },
    Resort {
        id: "risoul",
        name: "Risoul",
        length_km: 185,
        suitable_for: "intermediates, advanced",
        color: Rgb(0x87, 0x00, 0xFF),
        position: MapPosition::new(63.6, 71.8),
    },
    Resort {
        id: "les-orres",
        name: "Les Orres",
        length_km: 63,
        suitable_for: "beginners, intermediates",
        color: Rgb(0x8F, 0x00, 0xFF),
        position: MapPosition::new(63.0, 80.5),
    },
    Resort {
        id: "isola-2000",
        name: "Isola 2000",
        length_km: 120,
        suitable_for: "intermediates, families",
        color: Rgb(0x97, 0x00, 0xFF),
        position: MapPosition::new(58.5, 75.2),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BluebirdDataset;

    #[test]
    fn builtin_registry_is_valid() {
        let registry = ResortRegistry::builtin();
        assert_eq!(registry.len(), 30);
        assert_eq!(registry.validate(), Ok(()));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut resorts = BUILTIN_RESORTS[..2].to_vec();
        resorts[1].id = resorts[0].id;
        assert_eq!(
            ResortRegistry::new(resorts).err(),
            Some(RegistryError::DuplicateId("avoriaz".to_string()))
        );
    }

    #[test]
    fn out_of_bounds_position_is_rejected() {
        let mut resorts = BUILTIN_RESORTS[..1].to_vec();
        resorts[0].position = MapPosition::new(101.0, 10.0);
        assert!(matches!(
            ResortRegistry::new(resorts),
            Err(RegistryError::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn find_by_name_tolerates_apostrophe_style() {
        let registry = ResortRegistry::builtin();
        let straight = registry.find_by_name("Val d'Isère").map(|r| r.id);
        let curly = registry.find_by_name("Val d’Isère").map(|r| r.id);
        assert_eq!(straight, Some("val-disere"));
        assert_eq!(curly, Some("val-disere"));
    }

    #[test]
    fn north_to_south_starts_with_avoriaz_and_ends_with_les_orres() {
        let registry = ResortRegistry::builtin();
        let ordered = registry.north_to_south();
        assert_eq!(ordered.first().map(|r| r.id), Some("avoriaz"));
        assert_eq!(ordered.last().map(|r| r.id), Some("les-orres"));
        assert!(ordered
            .windows(2)
            .all(|pair| pair[0].position.y <= pair[1].position.y));
    }

    #[test]
    fn by_value_desc_orders_by_metric_and_keeps_ties_stable() {
        let registry = ResortRegistry::builtin();
        let mut dataset = BluebirdDataset::default();
        dataset.insert(Month::January, Week::First, "Tignes", 6.0);
        dataset.insert(Month::January, Week::First, "Chamonix", 4.5);

        let ranked = registry.by_value_desc(&dataset, Month::January, Week::First);
        assert_eq!(ranked[0].id, "tignes");
        assert_eq!(ranked[1].id, "chamonix");
        // Everything else is zero and stays in registry order.
        assert_eq!(ranked[2].id, "avoriaz");
        assert_eq!(ranked[3].id, "morzine");
    }

    #[test]
    fn search_finds_resort_from_partial_query() {
        let registry = ResortRegistry::builtin();
        assert_eq!(registry.search("thorens").map(|r| r.id), Some("val-thorens"));
        assert_eq!(registry.search("cham").map(|r| r.id), Some("chamonix"));
        assert_eq!(registry.search("   "), None);
    }
}
