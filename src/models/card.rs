use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::color::Color;

// ---------------------------------------------------------------------------
// CardRecord — a card object as returned by the search API
// ---------------------------------------------------------------------------

/// A card as returned by `/cards/search`. Fields not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: String,
    pub oracle_text: Option<String>,
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    pub released_at: Option<String>,
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
    #[serde(default)]
    pub prices: Prices,
    pub card_faces: Option<Vec<CardFace>>,
    pub image_uris: Option<ImageUris>,
    pub flavor_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Prices — decimal strings keyed by currency/finish
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub usd_etched: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
    pub tix: Option<String>,
}

impl Prices {
    /// Lowest positive price among usd, usd_foil and usd_etched.
    pub fn cheapest_usd(&self) -> Option<f64> {
        [&self.usd, &self.usd_foil, &self.usd_etched]
            .into_iter()
            .filter_map(|p| parse_price(p.as_deref()))
            .filter(|p| *p > 0.0)
            .min_by(|a, b| a.total_cmp(b))
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
}

// ---------------------------------------------------------------------------
// CardFace / ImageUris
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub colors: Option<Vec<String>>,
    pub image_uris: Option<ImageUris>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>,
}

impl CardRecord {
    fn front_face(&self) -> Option<&CardFace> {
        self.card_faces.as_ref().and_then(|faces| faces.first())
    }

    /// Mana cost of the card, taken from the front face for multi-faced cards.
    pub fn display_mana_cost(&self) -> Option<&str> {
        match self.front_face() {
            Some(face) => face.mana_cost.as_deref().or(self.mana_cost.as_deref()),
            None => self.mana_cost.as_deref(),
        }
    }

    /// Oracle text, taken from the front face for multi-faced cards.
    pub fn display_oracle_text(&self) -> Option<&str> {
        match self.front_face() {
            Some(face) => face.oracle_text.as_deref().or(self.oracle_text.as_deref()),
            None => self.oracle_text.as_deref(),
        }
    }

    /// Normal-size image URL; double-faced cards carry their images per face.
    pub fn image_url(&self) -> Option<&str> {
        if let Some(ref uris) = self.image_uris {
            return uris.normal.as_deref();
        }
        self.front_face()
            .and_then(|face| face.image_uris.as_ref())
            .and_then(|uris| uris.normal.as_deref())
    }

    /// Name shown to users: `"Flavor Name (Name)"` when a flavor name exists.
    pub fn display_name(&self) -> String {
        match self.flavor_name {
            Some(ref flavor) => format!("{} ({})", flavor, self.name),
            None => self.name.clone(),
        }
    }

    /// Name of the front face (the part before `//`).
    pub fn front_name(&self) -> &str {
        self.name.split("//").next().unwrap_or(&self.name).trim()
    }

    /// Card colors; falls back to the union of face colors when the card
    /// object itself carries none (transform and modal double-faced cards).
    pub fn colors(&self) -> Vec<String> {
        if let Some(ref colors) = self.colors {
            return colors.clone();
        }
        let mut out: Vec<String> = Vec::new();
        for face in self.card_faces.iter().flatten() {
            for c in face.colors.iter().flatten() {
                if !out.contains(c) {
                    out.push(c.clone());
                }
            }
        }
        out
    }

    /// Color identity parsed into [`Color`] values; unknown symbols are skipped.
    pub fn identity(&self) -> Vec<Color> {
        self.color_identity
            .iter()
            .filter_map(|s| s.parse::<Color>().ok())
            .collect()
    }

    /// USD price as a number; `None` when absent or unparseable.
    pub fn usd_price(&self) -> Option<f64> {
        parse_price(self.prices.usd.as_deref())
    }

    pub fn mana_value(&self) -> f64 {
        self.cmc.unwrap_or(0.0)
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.released_at
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// True when the card's status in `format` is `legal`.
    pub fn is_legal_in(&self, format: &str) -> bool {
        self.legalities.get(format).map(|s| s == "legal").unwrap_or(false)
    }
}
