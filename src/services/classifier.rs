//! Keyword/regex reading of free-text place queries.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::search_intent::{Category, SearchIntent, DEFAULT_RADIUS_METERS};

pub const METERS_PER_MILE: f64 = 1609.34;
pub const METERS_PER_KILOMETER: f64 = 1000.0;

const NEARBY_PHRASES: [&str; 4] = ["near me", "nearby", "close", "around"];

fn distance_regex() -> &'static Regex {
    static DISTANCE: OnceLock<Regex> = OnceLock::new();
    DISTANCE.get_or_init(|| {
        Regex::new(r"([0-9]+)\s*(miles?|mi|kilometers?|km|meters?|m)\b")
            .expect("distance pattern is valid")
    })
}

/// Never fails: an unrecognised query yields no category and the default radius.
pub fn classify(query: &str) -> SearchIntent {
    let lowered = query.to_lowercase();

    SearchIntent {
        original_query: query.to_string(),
        category: detect_category(&lowered),
        radius_meters: extract_radius_meters(&lowered).unwrap_or(DEFAULT_RADIUS_METERS),
        is_nearby: NEARBY_PHRASES.iter().any(|phrase| lowered.contains(phrase)),
    }
}

/// First category in declaration order with any keyword present, regardless
/// of where in the text the keyword occurs.
pub fn detect_category(lowered: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|category| {
        category
            .keywords()
            .iter()
            .any(|keyword| lowered.contains(keyword))
    })
}

/// First distance phrase whose number fits a `u64`, in meters.
pub fn extract_radius_meters(lowered: &str) -> Option<f64> {
    distance_regex().captures_iter(lowered).find_map(|captures| {
        let value: u64 = captures.get(1)?.as_str().parse().ok()?;
        let value = value as f64;

        let meters = match captures.get(2)?.as_str() {
            "mile" | "miles" | "mi" => value * METERS_PER_MILE,
            "km" | "kilometer" | "kilometers" => value * METERS_PER_KILOMETER,
            _ => value,
        };
        Some(meters)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn find_cafes_near_me() {
        let intent = classify("Find cafes near me");

        assert_eq!(intent.category, Some(Category::Cafe));
        assert!(intent.is_nearby);
        assert_eq!(intent.radius_meters, DEFAULT_RADIUS_METERS);
        assert_eq!(intent.original_query, "Find cafes near me");
    }

    #[test]
    fn restaurants_within_two_miles() {
        let intent = classify("restaurants within 2 miles");

        assert_eq!(intent.category, Some(Category::Restaurant));
        assert!(approx_eq(intent.radius_meters, 3218.68));
        assert!(!intent.is_nearby);
    }

    #[test]
    fn every_category_is_found_by_its_own_name() {
        for category in Category::ALL {
            assert_eq!(
                detect_category(&format!("show me a {category} please")),
                Some(category)
            );
        }
    }

    #[test]
    fn earlier_category_wins_regardless_of_position() {
        assert_eq!(
            classify("pizza place next to a coffee roaster").category,
            Some(Category::Cafe)
        );
        assert_eq!(
            classify("hotel with a pharmacy").category,
            Some(Category::Pharmacy)
        );
        assert_eq!(
            classify("Coffee shop inside the mall").category,
            Some(Category::Cafe)
        );
    }

    #[test]
    fn non_ascii_keyword_matches_after_lowercasing() {
        assert_eq!(classify("Best CAFÉ in town").category, Some(Category::Cafe));
    }

    #[test]
    fn unknown_query_has_no_category_and_default_radius() {
        let intent = classify("somewhere quiet to read");

        assert_eq!(intent.category, None);
        assert_eq!(intent.radius_meters, DEFAULT_RADIUS_METERS);
        assert!(!intent.is_nearby);
    }

    #[test]
    fn converts_each_distance_unit() {
        for n in [1_u32, 3, 25] {
            let n_f = f64::from(n);
            assert!(approx_eq(
                classify(&format!("parks within {n} miles")).radius_meters,
                n_f * METERS_PER_MILE
            ));
            assert!(approx_eq(
                classify(&format!("parks within {n}mi")).radius_meters,
                n_f * METERS_PER_MILE
            ));
            assert!(approx_eq(
                classify(&format!("parks within {n} km")).radius_meters,
                n_f * 1000.0
            ));
            assert!(approx_eq(
                classify(&format!("parks within {n} kilometers")).radius_meters,
                n_f * 1000.0
            ));
            assert!(approx_eq(
                classify(&format!("parks within {n} meters")).radius_meters,
                n_f
            ));
            assert!(approx_eq(
                classify(&format!("parks within {n}m")).radius_meters,
                n_f
            ));
        }
    }

    #[test]
    fn words_starting_with_a_unit_letter_are_not_distances() {
        assert_eq!(
            classify("lunch in 10 minutes").radius_meters,
            DEFAULT_RADIUS_METERS
        );
    }

    #[test]
    fn later_distance_is_used_when_an_earlier_one_is_unusable() {
        let intent = classify("cafes 99999999999999999999999 miles away, ideally within 2 miles");
        assert!(approx_eq(intent.radius_meters, 2.0 * METERS_PER_MILE));

        // Arabic-Indic digits are not distance digits
        let intent = classify("parks ٣ km or 4 km");
        assert!(approx_eq(intent.radius_meters, 4000.0));
    }

    #[test]
    fn nearby_phrases_set_the_flag() {
        for query in ["gas nearby", "bank close to work", "hotels around here"] {
            assert!(classify(query).is_nearby, "{query}");
        }
    }

    #[test]
    fn search_text_is_rebuilt_from_the_category() {
        assert_eq!(classify("Find cafes near me").search_text(), "cafe near me");
        assert_eq!(
            classify("  museum of modern art ").search_text(),
            "museum of modern art"
        );
    }
}
