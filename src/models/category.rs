/// The categories offered by the entry form's picker.
///
/// The storage layer keeps `category` as an open string so rows written by
/// hand or through the CLI with an unlisted label still load and aggregate;
/// this enum only closes the set the picker cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Travel,
    Bills,
    Shopping,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup; `None` for labels outside the picker set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "travel" => Some(Self::Travel),
            "bills" => Some(Self::Bills),
            "shopping" => Some(Self::Shopping),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Canonical capitalization for known labels, the input otherwise.
    pub fn normalize(s: &str) -> String {
        match Self::parse(s) {
            Some(cat) => cat.as_str().to_string(),
            None => s.trim().to_string(),
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Travel,
            Self::Bills,
            Self::Shopping,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
