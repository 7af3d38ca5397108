use chrono::Datelike;
use serde::Serialize;

use crate::error::Error;

/// 1900 was a Rat year; the cycle repeats every twelve years.
pub const CYCLE_ANCHOR_YEAR: i32 = 1900;

/// Earliest birth year the product accepts.
pub const MIN_BIRTH_YEAR: i32 = 1900;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ZodiacSign {
    pub name: &'static str,
    pub emoji: &'static str,
    pub element: &'static str,
    pub traits: [&'static str; 4],
    /// Recent sample years for display, one cycle apart.
    pub years: [i32; 9],
}

/// The twelve signs in cycle order starting from the anchor year.
pub const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign {
        name: "Rat",
        emoji: "\u{1F400}",
        element: "Water",
        traits: ["Quick-witted", "Resourceful", "Versatile", "Kind"],
        years: [1924, 1936, 1948, 1960, 1972, 1984, 1996, 2008, 2020],
    },
    ZodiacSign {
        name: "Ox",
        emoji: "\u{1F402}",
        element: "Earth",
        traits: ["Diligent", "Dependable", "Strong", "Determined"],
        years: [1925, 1937, 1949, 1961, 1973, 1985, 1997, 2009, 2021],
    },
    ZodiacSign {
        name: "Tiger",
        emoji: "\u{1F405}",
        element: "Wood",
        traits: ["Brave", "Confident", "Competitive", "Charming"],
        years: [1926, 1938, 1950, 1962, 1974, 1986, 1998, 2010, 2022],
    },
    ZodiacSign {
        name: "Rabbit",
        emoji: "\u{1F407}",
        element: "Wood",
        traits: ["Quiet", "Elegant", "Kind", "Responsible"],
        years: [1927, 1939, 1951, 1963, 1975, 1987, 1999, 2011, 2023],
    },
    ZodiacSign {
        name: "Dragon",
        emoji: "\u{1F409}",
        element: "Earth",
        traits: ["Confident", "Intelligent", "Enthusiastic", "Ambitious"],
        years: [1928, 1940, 1952, 1964, 1976, 1988, 2000, 2012, 2024],
    },
    ZodiacSign {
        name: "Snake",
        emoji: "\u{1F40D}",
        element: "Fire",
        traits: ["Enigmatic", "Intelligent", "Wise", "Intuitive"],
        years: [1929, 1941, 1953, 1965, 1977, 1989, 2001, 2013, 2025],
    },
    ZodiacSign {
        name: "Horse",
        emoji: "\u{1F40E}",
        element: "Fire",
        traits: ["Animated", "Active", "Energetic", "Independent"],
        years: [1930, 1942, 1954, 1966, 1978, 1990, 2002, 2014, 2026],
    },
    ZodiacSign {
        name: "Goat",
        emoji: "\u{1F410}",
        element: "Earth",
        traits: ["Calm", "Gentle", "Sympathetic", "Creative"],
        years: [1931, 1943, 1955, 1967, 1979, 1991, 2003, 2015, 2027],
    },
    ZodiacSign {
        name: "Monkey",
        emoji: "\u{1F412}",
        element: "Metal",
        traits: ["Sharp", "Smart", "Curious", "Playful"],
        years: [1932, 1944, 1956, 1968, 1980, 1992, 2004, 2016, 2028],
    },
    ZodiacSign {
        name: "Rooster",
        emoji: "\u{1F413}",
        element: "Metal",
        traits: ["Observant", "Hardworking", "Courageous", "Talented"],
        years: [1933, 1945, 1957, 1969, 1981, 1993, 2005, 2017, 2029],
    },
    ZodiacSign {
        name: "Dog",
        emoji: "\u{1F415}",
        element: "Earth",
        traits: ["Loyal", "Honest", "Prudent", "Lively"],
        years: [1934, 1946, 1958, 1970, 1982, 1994, 2006, 2018, 2030],
    },
    ZodiacSign {
        name: "Pig",
        emoji: "\u{1F416}",
        element: "Water",
        traits: ["Compassionate", "Generous", "Diligent", "Optimistic"],
        years: [1935, 1947, 1959, 1971, 1983, 1995, 2007, 2019, 2031],
    },
];

/// Maps any year onto the twelve-year cycle. Total over all integers, so
/// callers wanting range enforcement go through [`validate_birth_year`]
/// first.
pub fn resolve(year: i32) -> &'static ZodiacSign {
    let idx = (year - CYCLE_ANCHOR_YEAR).rem_euclid(12) as usize;
    &SIGNS[idx]
}

/// Case-insensitive lookup by sign name ("horse", "Horse", ...).
pub fn find_by_name(name: &str) -> Option<&'static ZodiacSign> {
    SIGNS.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

/// Rejects years outside `MIN_BIRTH_YEAR..=current year`. There is no
/// silent default sign; out-of-range input is the caller's error.
pub fn validate_birth_year(year: i32) -> Result<(), Error> {
    let current = chrono::Utc::now().year();
    if year < MIN_BIRTH_YEAR || year > current {
        return Err(Error::Validation(format!(
            "birth year {} out of range ({}..={})",
            year, MIN_BIRTH_YEAR, current
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_repeats_every_twelve_years() {
        for year in 1850..2150 {
            assert_eq!(resolve(year).name, resolve(year + 12).name);
        }
    }

    #[test]
    fn known_years_resolve_to_known_signs() {
        assert_eq!(resolve(1900).name, "Rat");
        assert_eq!(resolve(1984).name, "Rat");
        assert_eq!(resolve(1990).name, "Horse");
        assert_eq!(resolve(2000).name, "Dragon");
        assert_eq!(resolve(2008).name, "Rat");
        assert_eq!(resolve(1995).name, "Pig");
    }

    #[test]
    fn years_table_agrees_with_resolver() {
        for sign in &SIGNS {
            for &year in &sign.years {
                assert_eq!(resolve(year).name, sign.name, "year {}", year);
            }
        }
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(find_by_name("horse").map(|s| s.name), Some("Horse"));
        assert_eq!(find_by_name(" DRAGON ").map(|s| s.name), Some("Dragon"));
        assert!(find_by_name("unicorn").is_none());
    }

    #[test]
    fn birth_year_bounds() {
        assert!(validate_birth_year(1900).is_ok());
        assert!(validate_birth_year(1990).is_ok());
        assert!(validate_birth_year(1899).is_err());
        assert!(validate_birth_year(2525).is_err());
    }

    #[test]
    fn every_sign_has_display_data() {
        for sign in &SIGNS {
            assert!(!sign.name.is_empty());
            assert!(!sign.emoji.is_empty());
            assert!(!sign.element.is_empty());
            assert!(sign.traits.iter().all(|t| !t.is_empty()));
        }
    }
}
