use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meals,
    Exercise,
    Supplements,
    Water,
    Skin,
    Alcohol,
    Mood,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Meals,
        Category::Exercise,
        Category::Supplements,
        Category::Water,
        Category::Skin,
        Category::Alcohol,
        Category::Mood,
    ];

    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "meals" | "meal" => Some(Self::Meals),
            "exercise" => Some(Self::Exercise),
            "supplements" | "supplement" => Some(Self::Supplements),
            "water" => Some(Self::Water),
            "skin" => Some(Self::Skin),
            "alcohol" => Some(Self::Alcohol),
            "mood" => Some(Self::Mood),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Meals => "meals",
            Self::Exercise => "exercise",
            Self::Supplements => "supplements",
            Self::Water => "water",
            Self::Skin => "skin",
            Self::Alcohol => "alcohol",
            Self::Mood => "mood",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Category selection for the timeline. `All` is a filter value only;
/// a record always carries a concrete `Category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Category::parse(token).map(Self::Only)
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category.tag()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Favorable,
    Neutral,
    Cautionary,
    Adverse,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Neutral => "neutral",
            Self::Cautionary => "cautionary",
            Self::Adverse => "adverse",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assessment {
    pub status: Status,
    pub note: String,
}

/// One labelled, unit-tagged display value. A record's metrics keep
/// their insertion order; that order is the display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: Uuid,

    pub category: Category,

    pub occurred_at: NaiveDateTime,

    pub title: String,

    #[serde(default)]
    pub details: String,

    #[serde(default)]
    pub metrics: Vec<Metric>,

    pub assessment: Assessment,
}

impl Entry {
    pub fn new(
        category: Category,
        occurred_at: NaiveDateTime,
        title: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            occurred_at,
            title: title.into(),
            details: String::new(),
            metrics: vec![],
            assessment: Assessment {
                status,
                note: String::new(),
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_metric(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.metrics.push(Metric::new(label, value));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.assessment.note = note.into();
        self
    }
}
