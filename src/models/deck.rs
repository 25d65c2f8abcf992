use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::CardRecord;
use super::color::Color;

// ---------------------------------------------------------------------------
// DeckEntry — a card and how many copies the deck runs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardRecord,
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// Deck — a user-built deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub format: String,
    pub colors: Vec<Color>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub cards: Vec<DeckEntry>,
    pub created: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: &str, format: &str, colors: &[Color], notes: &str) -> Self {
        let mut colors = colors.to_vec();
        colors.sort();
        colors.dedup();
        Self {
            name: name.trim().to_string(),
            format: format.trim().to_string(),
            colors,
            notes: notes.to_string(),
            cards: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Add copies of `card`, merging with an existing entry of the same id.
    pub fn add_card(&mut self, card: CardRecord, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.cards.iter_mut().find(|e| e.card.id == card.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.cards.push(DeckEntry { card, quantity }),
        }
    }

    /// Remove up to `quantity` copies of the card with `id`. Entries that
    /// reach zero are dropped. Returns the number of copies removed.
    pub fn remove_card(&mut self, id: &str, quantity: u32) -> u32 {
        let Some(pos) = self.cards.iter().position(|e| e.card.id == id) else {
            return 0;
        };
        let entry = &mut self.cards[pos];
        let removed = quantity.min(entry.quantity);
        entry.quantity -= removed;
        if entry.quantity == 0 {
            self.cards.remove(pos);
        }
        removed
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.cards
            .iter()
            .find(|e| e.card.id == id)
            .map_or(0, |e| e.quantity)
    }

    /// Total number of cards, counting copies.
    pub fn card_count(&self) -> u32 {
        self.cards
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.quantity))
    }

    /// Colors as a WUBRG string such as `"WU"`.
    pub fn color_string(&self) -> String {
        super::color::color_string(&self.colors)
    }
}
