//! The static location catalog and its query operations.
//!
//! The catalog is built once at startup and never mutated afterwards. Each
//! record's clue points at the *following* location, so the list order is
//! the hunt order.

use crate::types::{LocationId, LocationRecord};

/// Ordered list of hunt locations with id lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<LocationRecord>,
}

impl Catalog {
    /// Build a catalog from an ordered list of records.
    ///
    /// Ids are expected to be 1..=N in list order; lookups rely on it.
    pub fn new(locations: Vec<LocationRecord>) -> Self {
        debug_assert!(locations
            .iter()
            .enumerate()
            .all(|(i, loc)| loc.id == i as LocationId + 1));
        Self { locations }
    }

    /// The full catalog in hunt order.
    pub fn get_all(&self) -> &[LocationRecord] {
        &self.locations
    }

    /// Look up a single location. `None` for ids outside 1..=N.
    pub fn get_by_id(&self, id: LocationId) -> Option<&LocationRecord> {
        if id == 0 {
            return None;
        }
        self.locations.get(id as usize - 1)
    }

    /// Number of locations in the hunt.
    pub fn count(&self) -> u32 {
        self.locations.len() as u32
    }

    /// The ten campus locations of the default hunt.
    pub fn campus() -> Self {
        let loc = |id: LocationId, name: &str, clue: &str, fun_fact: &str| LocationRecord {
            id,
            name: name.to_string(),
            clue: clue.to_string(),
            fun_fact: fun_fact.to_string(),
            start_clue: None,
            is_last: false,
        };

        let mut locations = vec![
            LocationRecord {
                start_clue: Some(
                    "Begin your quest where the bronze beast has prowled for 50 years of \
                     Panther pride"
                        .to_string(),
                ),
                ..loc(
                    1,
                    "Panther Statue (Enderis Hall)",
                    "Seek the golden tower of wisdom where millions of stories await and \
                     late-night scholars unite",
                    "The iconic Panther statue has been a symbol of UWM pride since the 1960s \
                     and is a favorite photo spot for students and alumni.",
                )
            },
            loc(
                2,
                "Golda Meir Library",
                "Find where Panthers gather to make a splash in the center of campus life",
                "At 14 stories tall, the Golda Meir Library is one of Milwaukee's most \
                 recognizable buildings and houses over 2 million items.",
            ),
            loc(
                3,
                "UWM Fountain Courtyard",
                "Journey to where films are born and dancers leap through history's halls",
                "The fountain courtyard is a popular gathering spot during warm weather and \
                 hosts various campus events throughout the year.",
            ),
            loc(
                4,
                "Mitchell Hall",
                "Strike your way to where Panthers unite, grab a bite, and community comes alive",
                "Mitchell Hall is home to UWM's Peck School of the Arts, including the Film, \
                 Video, Animation & New Genres department and the Dance department.",
            ),
            loc(
                5,
                "UWM Student Union",
                "Navigate to where four towers stand tall and Panthers rest their heads each night",
                "The Student Union features a bowling alley, movie theater, dining options, and \
                 is the social hub of campus life.",
            ),
            loc(
                6,
                "Sandburg Residence Halls",
                "Venture into where ancient oaks whisper secrets and nature's path winds \
                 through time",
                "The Sandburg Halls complex consists of four towers and houses over 2,000 \
                 students, making it one of Wisconsin's largest residence hall communities.",
            ),
            loc(
                7,
                "Downer Woods Natural Area",
                "Return to the heart where all paths converge and campus life pulses with energy",
                "Downer Woods is a preserved 9-acre forest in the heart of campus with oak \
                 trees over 150 years old, providing a natural escape for students.",
            ),
            loc(
                8,
                "Spaights Plaza",
                "Look up to find where stars shine bright even in daylight, under cosmic domes",
                "Spaights Plaza is the central gathering point on campus, named after UWM's \
                 first African American student who graduated in 1957.",
            ),
            loc(
                9,
                "UWM Planetarium",
                "Complete your quest where future deals are made and innovation meets ambition",
                "The Manfred Olson Planetarium, built in 1968, features one of the finest \
                 planetarium projection systems and hosts public shows throughout the year.",
            ),
            loc(
                10,
                "Lubar Entrepreneurship Center",
                "Congratulations! You've completed the UWM Treasure Hunt!",
                "The Lubar Entrepreneurship Center supports student innovation and startups, \
                 providing resources, mentorship, and funding opportunities for aspiring \
                 entrepreneurs.",
            ),
        ];
        if let Some(last) = locations.last_mut() {
            last.is_last = true;
        }

        Self::new(locations)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::campus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campus_catalog_has_ten_sequential_locations() {
        let catalog = Catalog::campus();
        assert_eq!(catalog.count(), 10);

        for (i, loc) in catalog.get_all().iter().enumerate() {
            assert_eq!(loc.id, i as LocationId + 1);
        }
    }

    #[test]
    fn test_get_by_id_returns_matching_record() {
        let catalog = Catalog::campus();

        for id in 1..=10 {
            let loc = catalog.get_by_id(id).expect("id in range");
            assert_eq!(loc.id, id);
        }
    }

    #[test]
    fn test_get_by_id_out_of_range() {
        let catalog = Catalog::campus();

        assert!(catalog.get_by_id(0).is_none());
        assert!(catalog.get_by_id(11).is_none());
        assert!(catalog.get_by_id(u32::MAX).is_none());
    }

    #[test]
    fn test_only_first_location_has_start_clue() {
        let catalog = Catalog::campus();

        assert!(catalog.get_by_id(1).unwrap().start_clue.is_some());
        for id in 2..=10 {
            assert!(catalog.get_by_id(id).unwrap().start_clue.is_none());
        }
    }

    #[test]
    fn test_only_last_location_is_flagged_last() {
        let catalog = Catalog::campus();

        for id in 1..=9 {
            assert!(!catalog.get_by_id(id).unwrap().is_last);
        }
        assert!(catalog.get_by_id(10).unwrap().is_last);
    }

    #[test]
    fn test_wire_format_uses_camel_case_and_omits_absent_fields() {
        let catalog = Catalog::campus();

        let first = serde_json::to_value(catalog.get_by_id(1).unwrap()).unwrap();
        assert!(first.get("startClue").is_some());
        assert!(first.get("funFact").is_some());
        assert!(first.get("isLast").is_none());

        let last = serde_json::to_value(catalog.get_by_id(10).unwrap()).unwrap();
        assert!(last.get("startClue").is_none());
        assert_eq!(last.get("isLast"), Some(&serde_json::Value::Bool(true)));
    }
}
