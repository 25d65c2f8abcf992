//! Catalog queries: the API's fixed vocabularies of type words and keywords.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::CatalogResponse;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Catalog {
    CardMechanics,
    Supertypes,
    CardTypes,
    CreatureTypes,
    ArtifactTypes,
    EnchantmentTypes,
    PlaneswalkerTypes,
    LandTypes,
    SpellTypes,
}

impl Catalog {
    /// The catalogs that together make up the type vocabulary, in the order
    /// they are fetched.
    pub const TYPE_CATALOGS: [Catalog; 8] = [
        Catalog::Supertypes,
        Catalog::CardTypes,
        Catalog::CreatureTypes,
        Catalog::ArtifactTypes,
        Catalog::EnchantmentTypes,
        Catalog::PlaneswalkerTypes,
        Catalog::LandTypes,
        Catalog::SpellTypes,
    ];

    /// Endpoint name under `/catalog/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Catalog::CardMechanics => "card-mechanics",
            Catalog::Supertypes => "supertypes",
            Catalog::CardTypes => "card-types",
            Catalog::CreatureTypes => "creature-types",
            Catalog::ArtifactTypes => "artifact-types",
            Catalog::EnchantmentTypes => "enchantment-types",
            Catalog::PlaneswalkerTypes => "planeswalker-types",
            Catalog::LandTypes => "land-types",
            Catalog::SpellTypes => "spell-types",
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

// ---------------------------------------------------------------------------
// TypeVocabulary
// ---------------------------------------------------------------------------

/// Every known type word, grouped by the catalog it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVocabulary {
    pub supertypes: Vec<String>,
    pub card_types: Vec<String>,
    pub creature_types: Vec<String>,
    pub artifact_types: Vec<String>,
    pub enchantment_types: Vec<String>,
    pub planeswalker_types: Vec<String>,
    pub land_types: Vec<String>,
    pub spell_types: Vec<String>,
}

impl TypeVocabulary {
    fn slot_mut(&mut self, catalog: Catalog) -> Option<&mut Vec<String>> {
        match catalog {
            Catalog::Supertypes => Some(&mut self.supertypes),
            Catalog::CardTypes => Some(&mut self.card_types),
            Catalog::CreatureTypes => Some(&mut self.creature_types),
            Catalog::ArtifactTypes => Some(&mut self.artifact_types),
            Catalog::EnchantmentTypes => Some(&mut self.enchantment_types),
            Catalog::PlaneswalkerTypes => Some(&mut self.planeswalker_types),
            Catalog::LandTypes => Some(&mut self.land_types),
            Catalog::SpellTypes => Some(&mut self.spell_types),
            Catalog::CardMechanics => None,
        }
    }

    /// All words, supertypes first, without duplicates.
    pub fn all(&self) -> Vec<&str> {
        let lists = [
            &self.supertypes,
            &self.card_types,
            &self.creature_types,
            &self.artifact_types,
            &self.enchantment_types,
            &self.planeswalker_types,
            &self.land_types,
            &self.spell_types,
        ];
        let mut out: Vec<&str> = Vec::new();
        for word in lists.into_iter().flatten() {
            if !out.contains(&word.as_str()) {
                out.push(word);
            }
        }
        out
    }

    /// Words containing `term`, case-insensitively. A blank term suggests nothing.
    pub fn suggest(&self, term: &str) -> Vec<&str> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.all()
            .into_iter()
            .filter(|w| w.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn is_creature_type(&self, word: &str) -> bool {
        self.creature_types.iter().any(|w| w == word)
    }

    pub fn is_artifact_type(&self, word: &str) -> bool {
        self.artifact_types.iter().any(|w| w == word)
    }

    pub fn is_land_type(&self, word: &str) -> bool {
        self.land_types.iter().any(|w| w == word)
    }

    pub fn is_spell_type(&self, word: &str) -> bool {
        self.spell_types.iter().any(|w| w == word)
    }
}

// ---------------------------------------------------------------------------
// CatalogQuery
// ---------------------------------------------------------------------------

/// Query interface for `/catalog/<name>`.
pub struct CatalogQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch one catalog through the rate limiter.
    pub async fn get(&self, catalog: Catalog) -> Result<Vec<String>> {
        let resp: CatalogResponse = self
            .conn
            .get_json_throttled(&config::catalog_path(catalog.endpoint()), &[])
            .await?;
        log::debug!("catalog {}: {} entries", catalog, resp.data.len());
        Ok(resp.data)
    }

    /// Mechanic names offered for `is:` terms.
    pub async fn mechanics(&self) -> Result<Vec<String>> {
        self.get(Catalog::CardMechanics).await
    }

    /// Fetch every type catalog, one after another.
    pub async fn type_vocabulary(&self) -> Result<TypeVocabulary> {
        let mut vocab = TypeVocabulary::default();
        for catalog in Catalog::TYPE_CATALOGS {
            let words = self.get(catalog).await?;
            if let Some(slot) = vocab.slot_mut(catalog) {
                *slot = words;
            }
        }
        log::info!("loaded {} type words", vocab.all().len());
        Ok(vocab)
    }
}
