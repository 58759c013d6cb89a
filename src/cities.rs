use crate::error::CityError;

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub flag: &'static str,
}

impl City {
    /// Selector label, e.g. `🇨🇦 Calgary`.
    pub fn label(&self) -> String {
        format!("{} {}", self.flag, self.name)
    }
}

const CITIES: [City; 5] = [
    City {
        name: "Calgary",
        latitude: 51.0501,
        longitude: -114.0853,
        flag: "🇨🇦",
    },
    City {
        name: "New York",
        latitude: 40.7128,
        longitude: -74.0060,
        flag: "🇺🇸",
    },
    City {
        name: "London",
        latitude: 51.5074,
        longitude: -0.1278,
        flag: "🇬🇧",
    },
    City {
        name: "Paris",
        latitude: 48.8566,
        longitude: 2.3522,
        flag: "🇫🇷",
    },
    City {
        name: "Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
        flag: "🇯🇵",
    },
];

/// Fixed list of selectable cities plus the index of the current one.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: &'static [City],
    selected: usize,
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self {
            cities: &CITIES,
            selected: 0,
        }
    }
}

impl CityRegistry {
    pub fn cities(&self) -> &[City] {
        self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> &City {
        &self.cities[self.selected]
    }

    pub fn select(&mut self, index: usize) -> Result<&City, CityError> {
        if index >= self.cities.len() {
            return Err(CityError::OutOfRange {
                index,
                len: self.cities.len(),
            });
        }
        self.selected = index;
        Ok(&self.cities[index])
    }

    pub fn next_index(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.selected + 1) % self.cities.len()
    }

    pub fn prev_index(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.selected + self.cities.len() - 1) % self.cities.len()
    }

    /// Case-insensitive lookup by city name.
    pub fn position(&self, name: &str) -> Result<usize, CityError> {
        self.cities
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CityError::Unknown {
                name: name.to_string(),
                available: self
                    .cities
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[test]
fn test_select_bounds() {
    let mut reg = CityRegistry::default();
    assert_eq!(reg.current().name, "Calgary");
    assert_eq!(reg.select(4).map(|c| c.name), Ok("Tokyo"));
    assert_eq!(reg.selected_index(), 4);
    assert_eq!(
        reg.select(5),
        Err(CityError::OutOfRange { index: 5, len: 5 })
    );
    assert_eq!(reg.selected_index(), 4);
}

#[test]
fn test_cycle() {
    let mut reg = CityRegistry::default();
    assert_eq!(reg.prev_index(), 4);
    assert_eq!(reg.next_index(), 1);
    reg.select(4).unwrap();
    assert_eq!(reg.next_index(), 0);
}

#[test]
fn test_lookup_by_name() {
    let reg = CityRegistry::default();
    assert_eq!(reg.position("new york"), Ok(1));
    assert_eq!(reg.position(" Paris "), Ok(3));
    match reg.position("Oslo") {
        Err(CityError::Unknown { available, .. }) => assert!(available.contains("Tokyo")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(reg.cities()[0].label(), "🇨🇦 Calgary");
    assert_eq!(reg.len(), 5);
    assert!(!reg.is_empty());
}
