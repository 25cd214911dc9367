//! Validated action/category registry.
//!
//! The registry is the static lookup table behind the ledger: every action id
//! maps to a base value and category, every category to a positive weight.
//! It is validated once at construction and read-only afterwards.
//!
//! The builtin table is a published boundary contract: UI collaborators
//! select actions by id and display their described effect, so changing a
//! value changes game balance.

use std::collections::{BTreeMap, HashMap};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::action::{ActionDefinition, Category, CategoryDefinition};

/// Immutable registry of actions and categories.
///
/// Actions are keyed by their case-sensitive id. Construction validates that
/// every action's category resolves to a definition, every weight is
/// positive, and no action id appears twice.
#[derive(Debug, Clone)]
pub struct KarmaRegistry {
    actions: BTreeMap<String, ActionDefinition>,
    categories: HashMap<Category, CategoryDefinition>,
}

impl KarmaRegistry {
    /// Build a registry from explicit definitions, validating the tables.
    pub fn new(
        actions: Vec<ActionDefinition>,
        categories: Vec<CategoryDefinition>,
    ) -> DomainResult<Self> {
        let mut category_map = HashMap::new();
        for definition in categories {
            if definition.weight <= 0.0 {
                return Err(DomainError::InvalidWeight {
                    category: definition.category.as_str().to_string(),
                    weight: definition.weight,
                });
            }
            category_map.insert(definition.category, definition);
        }

        let mut action_map = BTreeMap::new();
        for definition in actions {
            if !category_map.contains_key(&definition.category) {
                return Err(DomainError::UnknownCategory {
                    action: definition.id.clone(),
                    category: definition.category.as_str().to_string(),
                });
            }
            if action_map.contains_key(&definition.id) {
                return Err(DomainError::DuplicateAction(definition.id));
            }
            action_map.insert(definition.id.clone(), definition);
        }

        Ok(Self {
            actions: action_map,
            categories: category_map,
        })
    }

    /// The builtin action/category tables.
    ///
    /// These values are the published game-balance contract; a unit test
    /// proves they pass the same validation as caller-supplied tables.
    pub fn builtin() -> Self {
        let mut categories = HashMap::new();
        for definition in builtin_categories() {
            categories.insert(definition.category, definition);
        }

        let mut actions = BTreeMap::new();
        for definition in builtin_actions() {
            actions.insert(definition.id.clone(), definition);
        }

        Self { actions, categories }
    }

    /// Look up an action definition by id.
    pub fn action(&self, id: &str) -> Option<&ActionDefinition> {
        self.actions.get(id)
    }

    /// Look up a category definition.
    pub fn category(&self, category: Category) -> Option<&CategoryDefinition> {
        self.categories.get(&category)
    }

    /// Whether the given action id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// Compute the weighted karma value for an action id.
    ///
    /// `karma_value = base_value × weight(category)`, deterministic.
    pub fn karma_value(&self, id: &str) -> DomainResult<f64> {
        let action = self
            .actions
            .get(id)
            .ok_or_else(|| DomainError::UnknownAction(id.to_string()))?;
        let category = self.categories.get(&action.category).ok_or_else(|| {
            DomainError::UnknownCategory {
                action: action.id.clone(),
                category: action.category.as_str().to_string(),
            }
        })?;
        Ok(f64::from(action.base_value) * category.weight)
    }

    /// Iterate all action definitions in id order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }

    /// Iterate all category definitions.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.values()
    }

    /// Number of registered actions.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

fn builtin_actions() -> Vec<ActionDefinition> {
    vec![
        // Positive actions
        ActionDefinition::new("SAVE_LIFE", 50, Category::Compassion, "Saved a life"),
        ActionDefinition::new("HELP_STRANGER", 15, Category::Kindness, "Helped a stranger"),
        ActionDefinition::new("DONATE", 10, Category::Generosity, "Donated to charity"),
        ActionDefinition::new(
            "PROTECT_INNOCENT",
            25,
            Category::Justice,
            "Protected the innocent",
        ),
        ActionDefinition::new("FORGIVE", 20, Category::Mercy, "Showed forgiveness"),
        ActionDefinition::new("HEAL", 30, Category::Healing, "Healed someone"),
        // Negative actions
        ActionDefinition::new("KILL_INNOCENT", -100, Category::Violence, "Killed an innocent"),
        ActionDefinition::new("STEAL", -20, Category::Greed, "Stole something"),
        ActionDefinition::new("LIE", -5, Category::Deception, "Told a lie"),
        ActionDefinition::new("BETRAY", -40, Category::Treachery, "Betrayed trust"),
        ActionDefinition::new(
            "DESTROY_SACRED",
            -60,
            Category::Sacrilege,
            "Destroyed sacred site",
        ),
        ActionDefinition::new("ABANDON", -15, Category::Neglect, "Abandoned someone in need"),
        // Neutral and complex actions
        ActionDefinition::new("SELF_DEFENSE", 0, Category::Survival, "Acted in self-defense"),
        ActionDefinition::new("TRADE", 0, Category::Commerce, "Made a trade"),
        ActionDefinition::new("EXPLORE", 2, Category::Discovery, "Explored new areas"),
        ActionDefinition::new("LEARN", 5, Category::Wisdom, "Gained knowledge"),
    ]
}

fn builtin_categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(Category::Compassion, 1.2, "#4ade80"),
        CategoryDefinition::new(Category::Kindness, 1.0, "#60a5fa"),
        CategoryDefinition::new(Category::Generosity, 1.1, "#fbbf24"),
        CategoryDefinition::new(Category::Justice, 1.3, "#a78bfa"),
        CategoryDefinition::new(Category::Mercy, 1.1, "#f472b6"),
        CategoryDefinition::new(Category::Healing, 1.4, "#34d399"),
        CategoryDefinition::new(Category::Violence, 1.5, "#ef4444"),
        CategoryDefinition::new(Category::Greed, 1.2, "#f59e0b"),
        CategoryDefinition::new(Category::Deception, 1.0, "#8b5cf6"),
        CategoryDefinition::new(Category::Treachery, 1.6, "#dc2626"),
        CategoryDefinition::new(Category::Sacrilege, 1.8, "#7c2d12"),
        CategoryDefinition::new(Category::Neglect, 1.1, "#6b7280"),
        CategoryDefinition::new(Category::Survival, 0.8, "#059669"),
        CategoryDefinition::new(Category::Commerce, 0.9, "#0891b2"),
        CategoryDefinition::new(Category::Discovery, 0.7, "#7c3aed"),
        CategoryDefinition::new(Category::Wisdom, 1.0, "#10b981"),
    ]
}
