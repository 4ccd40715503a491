use crate::models::place::{Coordinate, PlaceRecord};
use crate::models::search_intent::Category;

/// Base position for mock results when the user location is unknown (New York).
pub const DEFAULT_BASE_LOCATION: Coordinate = Coordinate::new(-74.006, 40.7128);

struct MockPlace {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    offset: (f64, f64),
    description: &'static str,
    rating: Option<(f64, u64)>,
}

const CAFES: &[MockPlace] = &[
    MockPlace {
        id: "cafe-1",
        name: "Blue Bottle Coffee",
        address: "123 Main St, New York, NY",
        offset: (0.01, 0.01),
        description: "Artisan coffee shop serving specialty brews",
        rating: Some((4.5, 234)),
    },
    MockPlace {
        id: "cafe-2",
        name: "Starbucks",
        address: "456 Broadway, New York, NY",
        offset: (-0.01, 0.01),
        description: "Popular coffee chain",
        rating: Some((4.2, 567)),
    },
    MockPlace {
        id: "cafe-3",
        name: "Local Coffee House",
        address: "789 Park Ave, New York, NY",
        offset: (0.005, -0.015),
        description: "Cozy neighborhood coffee shop",
        rating: None,
    },
];

const RESTAURANTS: &[MockPlace] = &[
    MockPlace {
        id: "rest-1",
        name: "The French Bistro",
        address: "789 Park Ave, New York, NY",
        offset: (0.015, -0.01),
        description: "Fine dining French cuisine",
        rating: Some((4.7, 890)),
    },
    MockPlace {
        id: "rest-2",
        name: "Joe's Pizza",
        address: "321 5th Ave, New York, NY",
        offset: (-0.015, -0.01),
        description: "Classic New York pizza",
        rating: Some((4.4, 1234)),
    },
    MockPlace {
        id: "rest-3",
        name: "Sushi Paradise",
        address: "555 Lexington Ave, New York, NY",
        offset: (0.02, 0.005),
        description: "Fresh sushi and Japanese cuisine",
        rating: None,
    },
];

const PARKS: &[MockPlace] = &[MockPlace {
    id: "park-1",
    name: "Central Park",
    address: "Central Park, New York, NY",
    offset: (0.01, 0.02),
    description: "Iconic urban park",
    rating: None,
}];

const PHARMACIES: &[MockPlace] = &[MockPlace {
    id: "pharm-1",
    name: "CVS Pharmacy",
    address: "100 Main St, New York, NY",
    offset: (-0.005, 0.01),
    description: "24-hour pharmacy",
    rating: None,
}];

/// Categories that have their own mock table; everything else gets cafes.
pub const MOCKED_CATEGORIES: [Category; 4] = [
    Category::Cafe,
    Category::Restaurant,
    Category::Park,
    Category::Pharmacy,
];

fn table_for(category: Option<Category>) -> (Category, &'static [MockPlace]) {
    match category {
        Some(Category::Restaurant) => (Category::Restaurant, RESTAURANTS),
        Some(Category::Park) => (Category::Park, PARKS),
        Some(Category::Pharmacy) => (Category::Pharmacy, PHARMACIES),
        _ => (Category::Cafe, CAFES),
    }
}

/// Static places placed around `user_location` (or the default base).
pub fn mock_places(category: Option<Category>, user_location: Option<Coordinate>) -> Vec<PlaceRecord> {
    let base = user_location.unwrap_or(DEFAULT_BASE_LOCATION);
    let (table_category, entries) = table_for(category);

    entries
        .iter()
        .map(|entry| {
            let mut place = PlaceRecord::new(
                entry.id,
                entry.name,
                entry.address,
                base.offset(entry.offset.0, entry.offset.1),
                table_category.as_str(),
            );
            place.description = entry.description.to_string();
            if let Some((rating, reviews)) = entry.rating {
                place.rating = Some(rating);
                place.review_count = Some(reviews);
            }
            place
        })
        .collect()
}
