//! In-memory collection of user decks with one active deck.

use serde::{Deserialize, Serialize};

use crate::error::{DeckBuilderError, Result};
use crate::models::{Color, Deck};

/// Holds the user's decks. Cards added from search results go to the
/// active deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckBuilder {
    decks: Vec<Deck>,
    active: Option<usize>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck and make it active. Returns its index.
    pub fn create_deck(
        &mut self,
        name: &str,
        format: &str,
        colors: &[Color],
        notes: &str,
    ) -> Result<usize> {
        if name.trim().is_empty() {
            return Err(DeckBuilderError::InvalidArgument(
                "Deck name must not be empty".to_string(),
            ));
        }
        self.decks.push(Deck::new(name, format, colors, notes));
        let index = self.decks.len() - 1;
        self.active = Some(index);
        log::info!("created deck {:?} ({})", name.trim(), format);
        Ok(index)
    }

    pub fn activate(&mut self, index: usize) -> Result<()> {
        if index >= self.decks.len() {
            return Err(DeckBuilderError::NotFound(format!("deck #{}", index)));
        }
        self.active = Some(index);
        Ok(())
    }

    /// Remove a deck. The active deck stays the same deck when possible.
    pub fn remove_deck(&mut self, index: usize) -> Result<Deck> {
        if index >= self.decks.len() {
            return Err(DeckBuilderError::NotFound(format!("deck #{}", index)));
        }
        let deck = self.decks.remove(index);
        self.active = match self.active {
            Some(a) if a == index => None,
            Some(a) if a > index => Some(a - 1),
            other => other,
        };
        Ok(deck)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_deck(&self) -> Option<&Deck> {
        self.active.and_then(|i| self.decks.get(i))
    }

    pub fn active_deck_mut(&mut self) -> Option<&mut Deck> {
        self.active.and_then(move |i| self.decks.get_mut(i))
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let builder: DeckBuilder = serde_json::from_str(json)?;
        if let Some(i) = builder.active {
            if i >= builder.decks.len() {
                return Err(DeckBuilderError::InvalidArgument(format!(
                    "active deck #{} out of range",
                    i
                )));
            }
        }
        Ok(builder)
    }
}
