// src/offer.rs
// Domain types for the offers feed: one Offer per course/scholarship listing,
// plus the closed kind/level vocabularies and the sort key selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Course delivery mode, as encoded in the feed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Presencial,
    Ead,
}

impl Kind {
    /// Display order for the filter panel.
    pub const ALL: [Kind; 2] = [Kind::Presencial, Kind::Ead];

    /// Checkbox label in the filter panel.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Presencial => "Presencial",
            Kind::Ead => "A distância - EaD",
        }
    }

    /// Long form for the offer detail card.
    pub fn card_label(&self) -> &'static str {
        match self {
            Kind::Presencial => "Presencial",
            Kind::Ead => "EaD",
        }
    }
}

/// Academic degree track, as encoded in the feed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Bacharelado,
    Licenciatura,
    Tecnologo,
}

impl Level {
    /// Display order for the filter panel.
    pub const ALL: [Level; 3] = [Level::Bacharelado, Level::Licenciatura, Level::Tecnologo];

    /// Checkbox label in the filter panel.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Bacharelado => "Bacharelado",
            Level::Licenciatura => "Licenciatura",
            Level::Tecnologo => "Tecnólogo",
        }
    }

    /// Long form for the offer detail card.
    pub fn card_label(&self) -> &'static str {
        match self {
            Level::Bacharelado => "Graduação (bacharelado)",
            Level::Licenciatura => "Graduação (licenciatura)",
            Level::Tecnologo => "Graduação (tecnólogo)",
        }
    }
}

/// Ordering applied to the derived list. `Unsorted` is the fallback for an
/// unrecognized configured key: input order is preserved and no error is
/// raised.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Rating,
    Unsorted,
}

impl SortKey {
    /// The keys offered as radio rows (the fallback is not selectable).
    pub const SELECTABLE: [SortKey; 3] = [SortKey::Name, SortKey::Price, SortKey::Rating];

    /// Radio row label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Cursos de A-Z",
            SortKey::Price => "Menor preço",
            SortKey::Rating => "Melhor avaliados",
            SortKey::Unsorted => "Sem ordenação",
        }
    }

    /// Parses a configured sort key, falling back to `Unsorted` (with a
    /// warning) for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "rating" => SortKey::Rating,
            "unsorted" | "" => SortKey::Unsorted,
            other => {
                warn!("Unknown sort key '{}'; leaving offers unsorted.", other);
                SortKey::Unsorted
            }
        }
    }
}

/// One course/scholarship listing as served by the offers endpoint.
/// Immutable once fetched; all filtering and sorting works on copies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub course_name: String,
    pub rating: f64,
    pub full_price: f64,
    pub offered_price: f64,
    pub kind: Kind,
    pub level: Level,
    pub ies_logo: String,
    pub ies_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "42",
            "courseName": "Ciência da Computação",
            "rating": 4.5,
            "fullPrice": 1000.0,
            "offeredPrice": 450.0,
            "kind": "presencial",
            "level": "bacharelado",
            "iesLogo": "logo-unifoo.png",
            "iesName": "UNIFOO"
        }"#
    }

    #[test]
    fn decodes_camel_case_wire_fields() {
        let offer: Offer = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(offer.id, "42");
        assert_eq!(offer.course_name, "Ciência da Computação");
        assert_eq!(offer.kind, Kind::Presencial);
        assert_eq!(offer.level, Level::Bacharelado);
        assert_eq!(offer.offered_price, 450.0);
    }

    #[test]
    fn enum_wire_values_are_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Ead).unwrap(), "\"ead\"");
        assert_eq!(
            serde_json::to_string(&Level::Tecnologo).unwrap(),
            "\"tecnologo\""
        );
        let level: Level = serde_json::from_str("\"licenciatura\"").unwrap();
        assert_eq!(level, Level::Licenciatura);
    }

    #[test]
    fn rejects_unknown_level() {
        let result: Result<Level, _> = serde_json::from_str("\"mestrado\"");
        assert!(result.is_err());
    }

    #[test]
    fn sort_key_parses_leniently() {
        assert_eq!(SortKey::parse_lenient("name"), SortKey::Name);
        assert_eq!(SortKey::parse_lenient("PRICE"), SortKey::Price);
        assert_eq!(SortKey::parse_lenient(" rating "), SortKey::Rating);
        assert_eq!(SortKey::parse_lenient("newest"), SortKey::Unsorted);
        assert_eq!(SortKey::parse_lenient(""), SortKey::Unsorted);
    }

    #[test]
    fn labels_use_the_expected_wording() {
        assert_eq!(Level::Tecnologo.label(), "Tecnólogo");
        assert_eq!(Level::Tecnologo.card_label(), "Graduação (tecnólogo)");
        assert_eq!(Kind::Ead.label(), "A distância - EaD");
        assert_eq!(SortKey::Rating.label(), "Melhor avaliados");
    }
}
