//! Display names and selectable values per bet type.
//!
//! The tables are built once on first access and shared read-only for the
//! lifetime of the process.

use once_cell::sync::Lazy;
use serde::Serialize;
use strum::IntoEnumIterator;

use super::types::{BetTag, BetType};

/// One selectable value of a bet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetOption {
    /// Value stored on the bet.
    pub value: &'static str,
    /// Text shown in selection forms.
    pub text: &'static str,
}

const fn opt(value: &'static str, text: &'static str) -> BetOption {
    BetOption { value, text }
}

const RESULT_OPTIONS: &[BetOption] = &[
    opt("1", "Ev Sahibi Kazanır (1)"),
    opt("X", "Beraberlik (X)"),
    opt("2", "Deplasman Kazanır (2)"),
];

const DOUBLE_CHANCE_OPTIONS: &[BetOption] = &[
    opt("1X", "1X (Ev Sahibi veya Beraberlik)"),
    opt("12", "12 (Ev Sahibi veya Deplasman)"),
    opt("X2", "X2 (Beraberlik veya Deplasman)"),
];

const HANDICAP_OPTIONS: &[BetOption] = &[
    opt("1:-1", "Ev Sahibi (-1)"),
    opt("1:-2", "Ev Sahibi (-2)"),
    opt("1:+1", "Ev Sahibi (+1)"),
    opt("1:+2", "Ev Sahibi (+2)"),
    opt("X:-1", "Beraberlik (Ev -1)"),
    opt("X:+1", "Beraberlik (Ev +1)"),
    opt("2:-1", "Deplasman (Ev -1)"),
    opt("2:-2", "Deplasman (Ev -2)"),
    opt("2:+1", "Deplasman (Ev +1)"),
    opt("2:+2", "Deplasman (Ev +2)"),
];

const FULL_TIME_LINES: &[BetOption] = &[
    opt("0.5", "0.5"),
    opt("1.5", "1.5"),
    opt("2.5", "2.5"),
    opt("3.5", "3.5"),
    opt("4.5", "4.5"),
    opt("5.5", "5.5"),
];

const SHORT_LINES: &[BetOption] = &[opt("0.5", "0.5"), opt("1.5", "1.5"), opt("2.5", "2.5")];

const HALF_TIME_FULL_TIME_OPTIONS: &[BetOption] = &[
    opt("1/1", "1/1"),
    opt("1/X", "1/X"),
    opt("1/2", "1/2"),
    opt("X/1", "X/1"),
    opt("X/X", "X/X"),
    opt("X/2", "X/2"),
    opt("2/1", "2/1"),
    opt("2/X", "2/X"),
    opt("2/2", "2/2"),
];

const ODD_EVEN_OPTIONS: &[BetOption] = &[opt("tek", "Tek"), opt("cift", "Çift")];

/// Catalog entry for one bet type.
#[derive(Debug, Clone, Serialize)]
pub struct BetTypeEntry {
    /// Bet type.
    #[serde(rename = "code")]
    pub bet_type: BetType,
    /// Display name.
    pub label: &'static str,
    /// Selectable values, in form order.
    pub options: &'static [BetOption],
}

/// Read-only bet-type catalog.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<BetTypeEntry>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

/// Process-wide catalog instance.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    fn build() -> Self {
        let entries = BetType::iter()
            .map(|bet_type| BetTypeEntry {
                bet_type,
                label: label_of(bet_type),
                options: options_of(bet_type),
            })
            .collect();
        Self { entries }
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[BetTypeEntry] {
        &self.entries
    }

    /// Entry for a bet type.
    pub fn entry(&self, bet_type: BetType) -> &BetTypeEntry {
        // entries are built from BetType::iter(), so the discriminant is the index
        &self.entries[bet_type as usize]
    }

    /// Display name for a bet type.
    pub fn label(&self, bet_type: BetType) -> &'static str {
        self.entry(bet_type).label
    }

    /// Selectable values for a bet type.
    pub fn options(&self, bet_type: BetType) -> &'static [BetOption] {
        self.entry(bet_type).options
    }

    /// Whether `value` is one of the listed selections for `bet_type`.
    pub fn is_listed(&self, bet_type: BetType, value: &str) -> bool {
        self.options(bet_type).iter().any(|o| o.value == value)
    }
}

fn label_of(bet_type: BetType) -> &'static str {
    match bet_type {
        BetType::MatchResult => "Maç Sonucu",
        BetType::HalfTimeResult => "İlk Yarı Sonucu",
        BetType::DoubleChance => "Çifte Şans",
        BetType::HandicapResult => "Handikaplı MS",
        BetType::TotalOver => "Toplam Gol Üst",
        BetType::TotalUnder => "Toplam Gol Alt",
        BetType::FirstHalfOver => "İY Üst",
        BetType::FirstHalfUnder => "İY Alt",
        BetType::SecondHalfOver => "2Y Üst",
        BetType::SecondHalfUnder => "2Y Alt",
        BetType::BothScore => "KG Var",
        BetType::BothScoreNo => "KG Yok",
        BetType::FirstHalfBothScore => "İY KG Var",
        BetType::FirstHalfBothScoreNo => "İY KG Yok",
        BetType::HomeScores => "Ev Sahibi Gol Atar",
        BetType::HomeScoresNo => "Ev Sahibi Gol Atmaz",
        BetType::AwayScores => "Deplasman Gol Atar",
        BetType::AwayScoresNo => "Deplasman Gol Atmaz",
        BetType::HomeOver => "Ev Sahibi Gol Üst",
        BetType::HomeUnder => "Ev Sahibi Gol Alt",
        BetType::AwayOver => "Deplasman Gol Üst",
        BetType::AwayUnder => "Deplasman Gol Alt",
        BetType::HalfTimeFullTime => "İY/MS",
        BetType::OddEven => "Tek/Çift",
    }
}

fn options_of(bet_type: BetType) -> &'static [BetOption] {
    match bet_type {
        BetType::MatchResult | BetType::HalfTimeResult => RESULT_OPTIONS,
        BetType::DoubleChance => DOUBLE_CHANCE_OPTIONS,
        BetType::HandicapResult => HANDICAP_OPTIONS,
        BetType::TotalOver | BetType::TotalUnder => FULL_TIME_LINES,
        BetType::FirstHalfOver
        | BetType::FirstHalfUnder
        | BetType::SecondHalfOver
        | BetType::SecondHalfUnder
        | BetType::HomeOver
        | BetType::HomeUnder
        | BetType::AwayOver
        | BetType::AwayUnder => SHORT_LINES,
        BetType::BothScore => &[BetOption { value: "var", text: "Karşılıklı Gol Var" }],
        BetType::BothScoreNo => &[BetOption { value: "yok", text: "Karşılıklı Gol Yok" }],
        BetType::FirstHalfBothScore => &[BetOption { value: "var", text: "İlk Yarı KG Var" }],
        BetType::FirstHalfBothScoreNo => &[BetOption { value: "yok", text: "İlk Yarı KG Yok" }],
        BetType::HomeScores => &[BetOption { value: "var", text: "Ev Sahibi Gol Atar" }],
        BetType::HomeScoresNo => &[BetOption { value: "yok", text: "Ev Sahibi Gol Atmaz" }],
        BetType::AwayScores => &[BetOption { value: "var", text: "Deplasman Gol Atar" }],
        BetType::AwayScoresNo => &[BetOption { value: "yok", text: "Deplasman Gol Atmaz" }],
        BetType::HalfTimeFullTime => HALF_TIME_FULL_TIME_OPTIONS,
        BetType::OddEven => ODD_EVEN_OPTIONS,
    }
}

fn side_text(selection: &str) -> &'static str {
    match selection {
        "1" => "Ev Sahibi",
        "X" => "Beraberlik",
        _ => "Deplasman",
    }
}

/// Human-readable rendering of a bet value.
///
/// Presentation only; never feeds back into resolution.
pub fn format_bet_value(tag: &BetTag, value: &str) -> String {
    let Some(bet_type) = tag.known() else {
        return value.to_string();
    };

    match bet_type {
        BetType::MatchResult | BetType::HalfTimeResult => side_text(value).to_string(),
        BetType::HandicapResult => match value.split_once(':') {
            Some((selection, handicap)) => format!("{} ({})", side_text(selection), handicap),
            None => value.to_string(),
        },
        BetType::OddEven => match value {
            "tek" => "Tek".to_string(),
            _ => "Çift".to_string(),
        },
        _ => value.to_string(),
    }
}

/// Display name for any tag; unknown tags show their raw code.
pub fn tag_label(tag: &BetTag) -> String {
    match tag.known() {
        Some(bet_type) => catalog().label(bet_type).to_string(),
        None => tag.as_str().to_string(),
    }
}

/// Full "`<type>: <value>`" label for a leg.
pub fn describe_bet(tag: &BetTag, value: &str) -> String {
    format!("{}: {}", tag_label(tag), format_bet_value(tag, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bet_type_has_entry_and_options() {
        let catalog = catalog();
        assert_eq!(catalog.entries().len(), 24);
        for entry in catalog.entries() {
            assert_eq!(catalog.entry(entry.bet_type).bet_type, entry.bet_type);
            assert!(!entry.options.is_empty(), "{} has no options", entry.bet_type);
            assert!(!entry.label.is_empty());
        }
    }

    #[test]
    fn lines_differ_between_full_time_and_halves() {
        let catalog = catalog();
        assert_eq!(catalog.options(BetType::TotalOver).len(), 6);
        assert_eq!(catalog.options(BetType::FirstHalfOver).len(), 3);
        assert!(catalog.is_listed(BetType::TotalUnder, "5.5"));
        assert!(!catalog.is_listed(BetType::SecondHalfUnder, "5.5"));
    }

    #[test]
    fn formats_result_and_handicap_values() {
        let ms = BetTag::Known(BetType::MatchResult);
        assert_eq!(format_bet_value(&ms, "1"), "Ev Sahibi");
        assert_eq!(format_bet_value(&ms, "X"), "Beraberlik");
        assert_eq!(format_bet_value(&ms, "2"), "Deplasman");

        let hms = BetTag::Known(BetType::HandicapResult);
        assert_eq!(format_bet_value(&hms, "2:+1"), "Deplasman (+1)");
    }

    #[test]
    fn formats_parity_and_passthrough_values() {
        let odd_even = BetTag::Known(BetType::OddEven);
        assert_eq!(format_bet_value(&odd_even, "tek"), "Tek");
        assert_eq!(format_bet_value(&odd_even, "cift"), "Çift");

        let htft = BetTag::Known(BetType::HalfTimeFullTime);
        assert_eq!(format_bet_value(&htft, "1/X"), "1/X");
    }

    #[test]
    fn describe_bet_uses_raw_code_for_unknown_tags() {
        assert_eq!(
            describe_bet(&BetTag::Known(BetType::TotalOver), "2.5"),
            "Toplam Gol Üst: 2.5"
        );
        assert_eq!(describe_bet(&BetTag::from("korner"), "9.5"), "korner: 9.5");
    }
}
