//! Client-side ordering of result records.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::CardRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    Name,
    Price,
    ColorIdentity,
    ManaValue,
    ReleaseDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Lowest WUBRG position among the identity colors, `-1` for colorless.
fn color_score(card: &CardRecord) -> i32 {
    card.identity()
        .iter()
        .map(|c| c.index() as i32)
        .min()
        .unwrap_or(-1)
}

fn positive_price(card: &CardRecord) -> Option<f64> {
    card.usd_price().filter(|p| *p > 0.0)
}

fn release_or_epoch(card: &CardRecord) -> NaiveDate {
    card.release_date().unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
    })
}

fn compare_names(a: &CardRecord, b: &CardRecord) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Compare two records under `key` and `direction`.
///
/// Price order is highest first when ascending. Cards without a positive
/// USD price sort after every priced card in both directions.
pub fn compare(key: SortKey, direction: SortDirection, a: &CardRecord, b: &CardRecord) -> Ordering {
    match key {
        SortKey::Name => direction.apply(compare_names(a, b)),
        SortKey::Price => match (positive_price(a), positive_price(b)) {
            (Some(pa), Some(pb)) => direction.apply(pb.total_cmp(&pa)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::ColorIdentity => direction.apply(color_score(a).cmp(&color_score(b))),
        SortKey::ManaValue => direction.apply(a.mana_value().total_cmp(&b.mana_value())),
        SortKey::ReleaseDate => direction.apply(release_or_epoch(a).cmp(&release_or_epoch(b))),
    }
}

/// Stable sort of `records` in place.
pub fn sort_records(records: &mut [&CardRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| compare(key, direction, a, b));
}
