//! Action and category domain models.
//!
//! Actions are the morally-weighted moves a player can make. Each action
//! belongs to a category whose weight scales the action's base value.

use serde::{Deserialize, Serialize};

/// Moral category of a karmic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Compassion,
    Kindness,
    Generosity,
    Justice,
    Mercy,
    Healing,
    Violence,
    Greed,
    Deception,
    Treachery,
    Sacrilege,
    Neglect,
    Survival,
    Commerce,
    Discovery,
    Wisdom,
}

impl Category {
    /// All categories, in registry order.
    pub const ALL: [Category; 16] = [
        Self::Compassion,
        Self::Kindness,
        Self::Generosity,
        Self::Justice,
        Self::Mercy,
        Self::Healing,
        Self::Violence,
        Self::Greed,
        Self::Deception,
        Self::Treachery,
        Self::Sacrilege,
        Self::Neglect,
        Self::Survival,
        Self::Commerce,
        Self::Discovery,
        Self::Wisdom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compassion => "compassion",
            Self::Kindness => "kindness",
            Self::Generosity => "generosity",
            Self::Justice => "justice",
            Self::Mercy => "mercy",
            Self::Healing => "healing",
            Self::Violence => "violence",
            Self::Greed => "greed",
            Self::Deception => "deception",
            Self::Treachery => "treachery",
            Self::Sacrilege => "sacrilege",
            Self::Neglect => "neglect",
            Self::Survival => "survival",
            Self::Commerce => "commerce",
            Self::Discovery => "discovery",
            Self::Wisdom => "wisdom",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compassion" => Some(Self::Compassion),
            "kindness" => Some(Self::Kindness),
            "generosity" => Some(Self::Generosity),
            "justice" => Some(Self::Justice),
            "mercy" => Some(Self::Mercy),
            "healing" => Some(Self::Healing),
            "violence" => Some(Self::Violence),
            "greed" => Some(Self::Greed),
            "deception" => Some(Self::Deception),
            "treachery" => Some(Self::Treachery),
            "sacrilege" => Some(Self::Sacrilege),
            "neglect" => Some(Self::Neglect),
            "survival" => Some(Self::Survival),
            "commerce" => Some(Self::Commerce),
            "discovery" => Some(Self::Discovery),
            "wisdom" => Some(Self::Wisdom),
            _ => None,
        }
    }

    /// Oracle insight sentence for this category, where one exists.
    ///
    /// Only a handful of categories carry an insight; the rest return None
    /// and the oracle speaks the tier phrase alone.
    pub fn insight(&self) -> Option<&'static str> {
        match self {
            Self::Compassion => {
                Some("Your acts of mercy will be remembered by the universe...")
            }
            Self::Violence => {
                Some("The echoes of violence return to haunt the perpetrator...")
            }
            Self::Greed => Some("What you take from others, others will take from you..."),
            Self::Wisdom => Some("Knowledge gained through suffering becomes wisdom..."),
            Self::Healing => {
                Some("The healer's touch leaves traces of light that never fade...")
            }
            _ => None,
        }
    }
}

/// Definition of a recordable action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Action identifier (upper snake case, e.g. `SAVE_LIFE`).
    pub id: String,
    /// Base karma value before category weighting.
    pub base_value: i32,
    /// Moral category of the action.
    pub category: Category,
    /// Human-readable description shown to the player.
    pub description: String,
}

impl ActionDefinition {
    pub fn new(
        id: impl Into<String>,
        base_value: i32,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            base_value,
            category,
            description: description.into(),
        }
    }
}

/// Definition of a category with its weight and display tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// The category this definition describes.
    pub category: Category,
    /// Multiplier applied to base values of actions in this category.
    pub weight: f64,
    /// Opaque display tag for UI collaborators (hex color).
    pub display_color: String,
}

impl CategoryDefinition {
    pub fn new(category: Category, weight: f64, display_color: impl Into<String>) -> Self {
        Self {
            category,
            weight,
            display_color: display_color.into(),
        }
    }
}
