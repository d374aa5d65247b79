use serde::Serialize;
use std::fmt;

/// Ski season months in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Month {
    November,
    December,
    January,
    February,
    March,
    April,
}

impl Month {
    pub const ALL: [Self; 6] = [
        Self::November,
        Self::December,
        Self::January,
        Self::February,
        Self::March,
        Self::April,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::November => "November",
            Self::December => "December",
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
        }
    }

    /// Three letter label used by the month selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::November => "Nov",
            Self::December => "Dec",
            Self::January => "Jan",
            Self::February => "Feb",
            Self::March => "Mar",
            Self::April => "Apr",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::November),
            1 => Some(Self::December),
            2 => Some(Self::January),
            3 => Some(Self::February),
            4 => Some(Self::March),
            5 => Some(Self::April),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|month| {
            let name = month.as_str().to_lowercase();
            value == name || value == month.label().to_lowercase()
        })
    }

    pub const fn next(self) -> Self {
        match Self::from_index((self.index() + 1) % Self::ALL.len()) {
            Some(month) => month,
            None => self,
        }
    }

    pub const fn prev(self) -> Self {
        match Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len()) {
            Some(month) => month,
            None => self,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Week within a month; every month carries exactly four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Week {
    First,
    Second,
    Third,
    Fourth,
}

impl Week {
    pub const ALL: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::Fourth];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "Week 1",
            Self::Second => "Week 2",
            Self::Third => "Week 3",
            Self::Fourth => "Week 4",
        }
    }

    pub const fn number(self) -> usize {
        self as usize + 1
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            2 => Some(Self::Third),
            3 => Some(Self::Fourth),
            _ => None,
        }
    }

    /// Accepts `Week 2`, `week2`, `w2` and `2`.
    pub fn parse(value: &str) -> Option<Self> {
        let compact: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let digits = compact
            .strip_prefix("week")
            .or_else(|| compact.strip_prefix('w'))
            .unwrap_or(&compact);
        digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(Self::from_index)
    }

    pub const fn next(self) -> Self {
        match Self::from_index((self.index() + 1) % Self::ALL.len()) {
            Some(week) => week,
            None => self,
        }
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One full-viewport page of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Home,
    Map,
    Chart,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Home, Self::Map, Self::Chart];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Map => "map",
            Self::Chart => "chart",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Home),
            1 => Some(Self::Map),
            2 => Some(Self::Chart),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Map => "Map",
            Self::Chart => "Bluebird Days",
        }
    }

    /// Accepts the id, the label or the 1-based position.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if let Ok(number) = value.parse::<usize>() {
            return number.checked_sub(1).and_then(Self::from_index);
        }
        Self::ALL
            .into_iter()
            .find(|section| value == section.as_str() || value == section.label().to_lowercase())
    }

    pub const fn next(self) -> Self {
        match Self::from_index((self.index() + 1) % Self::ALL.len()) {
            Some(section) => section,
            None => self,
        }
    }

    pub const fn prev(self) -> Self {
        match Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len()) {
            Some(section) => section,
            None => self,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit display colour shared by map icons and chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Linear blend toward `other`; `amount` 0 keeps `self`, 1 yields `other`.
    pub fn mix(self, other: Self, amount: f64) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(b) - f64::from(a)).mul_add(t, f64::from(a)).round() as u8;
        Self(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Percentage coordinates on the background map, both in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

impl MapPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parse_accepts_names_and_labels() {
        assert_eq!(Month::parse("november"), Some(Month::November));
        assert_eq!(Month::parse(" Feb "), Some(Month::February));
        assert_eq!(Month::parse("July"), None);
    }

    #[test]
    fn month_navigation_wraps_across_season() {
        assert_eq!(Month::April.next(), Month::November);
        assert_eq!(Month::November.prev(), Month::April);
        assert_eq!(Month::January.next(), Month::February);
    }

    #[test]
    fn week_parse_accepts_short_forms() {
        assert_eq!(Week::parse("Week 1"), Some(Week::First));
        assert_eq!(Week::parse("w3"), Some(Week::Third));
        assert_eq!(Week::parse("4"), Some(Week::Fourth));
        assert_eq!(Week::parse("0"), None);
        assert_eq!(Week::parse("Week 5"), None);
    }

    #[test]
    fn rgb_formats_hex_and_mixes() {
        assert_eq!(Rgb(0x45, 0x79, 0xCC).to_hex(), "#4579CC");
        assert_eq!(Rgb(0x0B, 0x17, 0x48).to_hex(), "#0B1748");

        let black = Rgb(0, 0, 0);
        let white = Rgb(255, 255, 255);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        assert_eq!(black.mix(white, 2.0), white);
    }

    #[test]
    fn section_parse_and_wrap() {
        assert_eq!(Section::parse("Map"), Some(Section::Map));
        assert_eq!(Section::parse(" bluebird days "), Some(Section::Chart));
        assert_eq!(Section::parse("chart"), Some(Section::Chart));
        assert_eq!(Section::parse("1"), Some(Section::Home));
        assert_eq!(Section::parse("0"), None);
        assert_eq!(Section::parse("slopes"), None);

        assert_eq!(Section::Chart.next(), Section::Home);
        assert_eq!(Section::Home.prev(), Section::Chart);
        assert_eq!(Section::Home.next(), Section::Map);
        assert_eq!(Section::Map.to_string(), "map");
    }
}
