// src/store.rs
// The offer store: holds the authoritative fetched list and derives the
// displayed list from it. Every criteria change re-projects from the full
// list, never from a previous projection.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::offer::{Kind, Level, Offer, SortKey};

/// Upper bound of the price ceiling control when no configuration says
/// otherwise.
pub const DEFAULT_PRICE_CEILING: f64 = 700.0;

/// The user's current search/filter/sort selections, as one value object.
/// Empty level/kind sets mean "no restriction", same as every box ticked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub levels: HashSet<Level>,
    pub kinds: HashSet<Kind>,
    pub max_price: f64,
    pub search_text: String,
    pub sort_key: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            levels: HashSet::new(),
            kinds: HashSet::new(),
            max_price: DEFAULT_PRICE_CEILING,
            search_text: String::new(),
            sort_key: SortKey::default(),
        }
    }
}

impl FilterCriteria {
    /// True when the offer passes every active predicate. The predicates are
    /// independent and ANDed; an empty set or empty search text passes
    /// everything. A NaN price fails the price bound.
    pub fn matches(&self, offer: &Offer) -> bool {
        let level_ok = self.levels.is_empty() || self.levels.contains(&offer.level);
        let kind_ok = self.kinds.is_empty() || self.kinds.contains(&offer.kind);
        let price_ok = offer.offered_price <= self.max_price;
        let search_ok = self.search_text.is_empty()
            || offer
                .course_name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());
        level_ok && kind_ok && price_ok && search_ok
    }
}

fn compare(sort_key: SortKey, a: &Offer, b: &Offer) -> Ordering {
    match sort_key {
        SortKey::Name => a
            .course_name
            .to_lowercase()
            .cmp(&b.course_name.to_lowercase()),
        // partial_cmp keeps a NaN price or rating from poisoning the order.
        SortKey::Price => a
            .offered_price
            .partial_cmp(&b.offered_price)
            .unwrap_or(Ordering::Equal),
        SortKey::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
        SortKey::Unsorted => Ordering::Equal,
    }
}

/// Pure projection: filter, then sort. `sort_by` is stable, so offers that
/// compare equal keep their feed order and `Unsorted` is the identity.
pub fn project(offers: &[Offer], criteria: &FilterCriteria) -> Vec<Offer> {
    let mut derived: Vec<Offer> = offers
        .iter()
        .filter(|offer| criteria.matches(offer))
        .cloned()
        .collect();
    derived.sort_by(|a, b| compare(criteria.sort_key, a, b));
    derived
}

/// Owns the full offer list for the session plus the derived list currently
/// on screen. All mutations go through the setters below so the derived list
/// can never drift from `project(offers, criteria)`.
pub struct OfferStore {
    offers: Vec<Offer>,
    criteria: FilterCriteria,
    derived: Vec<Offer>,
    price_ceiling: f64,
}

impl OfferStore {
    pub fn new(price_ceiling: f64, sort_key: SortKey) -> Self {
        let price_ceiling = if price_ceiling.is_finite() {
            price_ceiling.max(0.0)
        } else {
            DEFAULT_PRICE_CEILING
        };
        let criteria = FilterCriteria {
            max_price: price_ceiling,
            sort_key,
            ..FilterCriteria::default()
        };
        Self {
            offers: Vec::new(),
            criteria,
            derived: Vec::new(),
            price_ceiling,
        }
    }

    /// Replaces the authoritative list (one fetch per load) and re-projects
    /// under whatever criteria are already active.
    pub fn load(&mut self, offers: Vec<Offer>) {
        self.offers = offers;
        self.recompute();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.recompute();
    }

    pub fn toggle_level(&mut self, level: Level) {
        if !self.criteria.levels.remove(&level) {
            self.criteria.levels.insert(level);
        }
        self.recompute();
    }

    pub fn toggle_kind(&mut self, kind: Kind) {
        if !self.criteria.kinds.remove(&kind) {
            self.criteria.kinds.insert(kind);
        }
        self.recompute();
    }

    /// Sets the price ceiling, clamped to `[0, price_ceiling]`. A non-finite
    /// value resets to the ceiling rather than wedging the filter.
    pub fn set_max_price(&mut self, value: f64) {
        self.criteria.max_price = if value.is_finite() {
            value.clamp(0.0, self.price_ceiling)
        } else {
            self.price_ceiling
        };
        self.recompute();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.criteria.sort_key = sort_key;
        self.recompute();
    }

    pub fn derived(&self) -> &[Offer] {
        &self.derived
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn price_ceiling(&self) -> f64 {
        self.price_ceiling
    }

    /// Size of the authoritative list (not the derived one).
    pub fn total(&self) -> usize {
        self.offers.len()
    }

    fn recompute(&mut self) {
        self.derived = project(&self.offers, &self.criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str, name: &str, price: f64, rating: f64, kind: Kind, level: Level) -> Offer {
        Offer {
            id: id.to_string(),
            course_name: name.to_string(),
            rating,
            full_price: price * 2.0,
            offered_price: price,
            kind,
            level,
            ies_logo: String::new(),
            ies_name: "IES".to_string(),
        }
    }

    fn sample_pair() -> Vec<Offer> {
        vec![
            offer("a", "Administração", 100.0, 4.5, Kind::Presencial, Level::Bacharelado),
            offer("b", "Biomedicina", 50.0, 3.0, Kind::Ead, Level::Tecnologo),
        ]
    }

    fn ids(offers: &[Offer]) -> Vec<&str> {
        offers.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn derived_is_a_subsequence_of_the_input() {
        let offers = sample_pair();
        let criteria = FilterCriteria {
            sort_key: SortKey::Unsorted,
            ..FilterCriteria::default()
        };
        let derived = project(&offers, &criteria);
        // Nothing invented, nothing duplicated, input order kept.
        assert_eq!(ids(&derived), ids(&offers));
    }

    #[test]
    fn projection_is_idempotent() {
        let offers = sample_pair();
        let criteria = FilterCriteria {
            search_text: "i".to_string(),
            ..FilterCriteria::default()
        };
        let once = project(&offers, &criteria);
        let twice = project(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn name_sort_applied_twice_is_a_no_op() {
        let offers = sample_pair();
        let criteria = FilterCriteria::default();
        let once = project(&offers, &criteria);
        assert_eq!(project(&once, &criteria), once);
    }

    #[test]
    fn equal_names_keep_feed_order() {
        let offers = vec![
            offer("first", "Direito", 300.0, 4.0, Kind::Presencial, Level::Bacharelado),
            offer("second", "Direito", 200.0, 5.0, Kind::Ead, Level::Bacharelado),
        ];
        let derived = project(&offers, &FilterCriteria::default());
        assert_eq!(ids(&derived), vec!["first", "second"]);
    }

    #[test]
    fn empty_selection_sets_match_everything() {
        let offers = sample_pair();
        let empty_sets = FilterCriteria::default();
        let all_ticked = FilterCriteria {
            levels: Level::ALL.into_iter().collect(),
            kinds: Kind::ALL.into_iter().collect(),
            ..FilterCriteria::default()
        };
        assert_eq!(project(&offers, &empty_sets), project(&offers, &all_ticked));
    }

    #[test]
    fn ceiling_below_the_cheapest_offer_empties_the_list() {
        let offers = sample_pair();
        let criteria = FilterCriteria {
            max_price: 49.0,
            ..FilterCriteria::default()
        };
        assert!(project(&offers, &criteria).is_empty());
    }

    #[test]
    fn sort_orders_match_the_worked_examples() {
        let offers = sample_pair();
        let by = |sort_key| {
            let criteria = FilterCriteria {
                sort_key,
                ..FilterCriteria::default()
            };
            project(&offers, &criteria)
        };
        assert_eq!(ids(&by(SortKey::Price)), vec!["b", "a"]);
        assert_eq!(ids(&by(SortKey::Rating)), vec!["a", "b"]);
        assert_eq!(ids(&by(SortKey::Name)), vec!["a", "b"]);
    }

    #[test]
    fn search_is_a_case_insensitive_substring_match() {
        let offers = sample_pair();
        let criteria = FilterCriteria {
            search_text: "b".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&project(&offers, &criteria)), vec!["b"]);

        let criteria = FilterCriteria {
            search_text: "BIOME".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&project(&offers, &criteria)), vec!["b"]);
    }

    #[test]
    fn nan_ratings_do_not_panic_the_sort() {
        let mut offers = sample_pair();
        offers[0].rating = f64::NAN;
        let criteria = FilterCriteria {
            sort_key: SortKey::Rating,
            ..FilterCriteria::default()
        };
        // Ratings are not filtered, so both entries reach the comparator.
        // Order with NaN involved is unspecified; completing without a panic
        // and keeping both entries is what matters.
        assert_eq!(project(&offers, &criteria).len(), 2);
    }

    #[test]
    fn nan_prices_fail_the_price_predicate() {
        let mut offers = sample_pair();
        offers[0].offered_price = f64::NAN;
        let criteria = FilterCriteria {
            max_price: f64::INFINITY,
            ..FilterCriteria::default()
        };
        // `NaN <= bound` is false for every bound, so a NaN price fails the
        // filter instead of reaching the sort.
        assert_eq!(ids(&project(&offers, &criteria)), vec!["b"]);
    }

    #[test]
    fn store_mutations_recompute_from_the_authoritative_list() {
        let mut store = OfferStore::new(DEFAULT_PRICE_CEILING, SortKey::Name);
        store.load(sample_pair());
        assert_eq!(store.derived().len(), 2);

        store.set_search_text("bio");
        assert_eq!(ids(store.derived()), vec!["b"]);

        // Clearing the search restores the full list: the projection ran
        // against the full fetched list, not the previous derived one.
        store.set_search_text("");
        assert_eq!(store.derived().len(), 2);
    }

    #[test]
    fn toggling_twice_restores_the_full_list() {
        let mut store = OfferStore::new(DEFAULT_PRICE_CEILING, SortKey::Name);
        store.load(sample_pair());

        store.toggle_level(Level::Bacharelado);
        assert_eq!(ids(store.derived()), vec!["a"]);
        store.toggle_level(Level::Bacharelado);
        assert_eq!(store.derived().len(), 2);

        store.toggle_kind(Kind::Ead);
        assert_eq!(ids(store.derived()), vec!["b"]);
        store.toggle_kind(Kind::Ead);
        assert_eq!(store.derived().len(), 2);
    }

    #[test]
    fn max_price_is_clamped_to_the_configured_range() {
        let mut store = OfferStore::new(500.0, SortKey::Name);
        store.set_max_price(9_999.0);
        assert_eq!(store.criteria().max_price, 500.0);
        store.set_max_price(-10.0);
        assert_eq!(store.criteria().max_price, 0.0);
        store.set_max_price(f64::NAN);
        assert_eq!(store.criteria().max_price, 500.0);
    }

    #[test]
    fn empty_feed_projects_to_an_empty_list() {
        let mut store = OfferStore::new(DEFAULT_PRICE_CEILING, SortKey::Name);
        store.load(Vec::new());
        store.set_search_text("anything");
        assert!(store.derived().is_empty());
        assert_eq!(store.total(), 0);
    }
}
