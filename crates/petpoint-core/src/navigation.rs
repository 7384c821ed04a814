//! # Navigation State Machine
//!
//! Decides which catalog drill-down screen is mounted and which selections
//! are live.
//!
//! ## State Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   home ──goto_category──► category ──goto_products(clean)──► products  │
//! │    ▲                         │                                  ▲       │
//! │    │                         │ goto_products(food)              │       │
//! │    │                         ▼                                  │       │
//! │    │                 food_sub_category ──select_food_parent──┐  │       │
//! │    │                   (parent level)                        │  │       │
//! │    │                         ▲                               ▼  │       │
//! │    │                         └──select_food_parent(None)── (sub level)  │
//! │    │                                                         │          │
//! │    │                                       select_food_sub───┘          │
//! │    │                                                                    │
//! │   any ──goto_home──► home                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! Every transition takes `&self` and returns the next state. Nothing is
//! mutated in place, so the app layer can swap snapshots atomically and
//! tests can walk the whole state space without mounting a screen.
//!
//! ## Ignored Intents
//! Food drill-down intents that would leave the state inconsistent (for
//! example picking a food leaf with no animal selected) return the state
//! unchanged. [`NavigationState::is_consistent`] holds after every
//! transition from any reachable state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Animal, Category, CategoryKey, FoodParent, FoodSub};

// =============================================================================
// Screen
// =============================================================================

/// The drill-down view currently mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Screen {
    #[default]
    Home,
    Category,
    FoodSubCategory,
    Products,
}

// =============================================================================
// Navigation State
// =============================================================================

/// A snapshot of the drill-down.
///
/// ## Invariants
/// - `Products` ⇒ `selected_animal` and `selected_category` are set
/// - `Home` ⇒ every selection is cleared
/// - a compound `selected_category` on `Products` matches
///   `food_parent` / `food_sub`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationState {
    pub screen: Screen,
    pub selected_animal: Option<Animal>,
    #[ts(as = "Option<String>")]
    pub selected_category: Option<CategoryKey>,
    pub food_parent: Option<FoodParent>,
    pub food_sub: Option<FoodSub>,
}

impl NavigationState {
    /// The state a fresh session starts in.
    pub const fn home() -> Self {
        NavigationState {
            screen: Screen::Home,
            selected_animal: None,
            selected_category: None,
            food_parent: None,
            food_sub: None,
        }
    }

    /// Resets every selection and returns to the home screen. Idempotent.
    pub fn goto_home(&self) -> Self {
        NavigationState::home()
    }

    /// Opens the category grid for `animal`, clearing deeper selections.
    pub fn goto_category(&self, animal: Animal) -> Self {
        NavigationState {
            screen: Screen::Category,
            selected_animal: Some(animal),
            ..NavigationState::home()
        }
    }

    /// Opens the product list for a flat category.
    ///
    /// `Food` detours through the food sub-category screen instead, with
    /// `selected_category = food` and both food selections cleared, so the
    /// actual list waits for a leaf.
    pub fn goto_products(&self, animal: Animal, category: Category) -> Self {
        let screen = match category {
            Category::Food => Screen::FoodSubCategory,
            Category::Clean | Category::Accessories => Screen::Products,
        };

        NavigationState {
            screen,
            selected_animal: Some(animal),
            selected_category: Some(CategoryKey::simple(category)),
            food_parent: None,
            food_sub: None,
        }
    }

    /// Shows the top level (dry / wet) of the food screen.
    ///
    /// Animal and category are left as they are. Ignored when no animal is
    /// selected.
    pub fn goto_food_sub_category(&self) -> Self {
        if self.selected_animal.is_none() {
            return *self;
        }

        NavigationState {
            screen: Screen::FoodSubCategory,
            food_parent: None,
            food_sub: None,
            ..*self
        }
    }

    /// Picks (or with `None`, un-picks) the dry/wet level.
    ///
    /// A new parent clears the leaf so it must be chosen again. Only valid
    /// on the food screen.
    pub fn select_food_parent(&self, parent: Option<FoodParent>) -> Self {
        if !self.on_food_screen() {
            return *self;
        }

        NavigationState {
            food_parent: parent,
            food_sub: if parent.is_some() { None } else { self.food_sub },
            ..*self
        }
    }

    /// Picks a food leaf and opens its product list.
    ///
    /// The compound key is built here from the leaf, and `food_parent` is
    /// set to the leaf's own parent. Only valid on the food screen.
    pub fn select_food_sub(&self, sub: FoodSub) -> Self {
        if !self.on_food_screen() {
            return *self;
        }

        NavigationState {
            screen: Screen::Products,
            selected_animal: self.selected_animal,
            selected_category: Some(CategoryKey::food(sub)),
            food_parent: Some(sub.parent()),
            food_sub: Some(sub),
        }
    }

    /// One step back, derived from the current state (no history stack).
    ///
    /// ```text
    /// products (food leaf)         ──► food_sub_category (parent level)
    /// products (flat category)     ──► category
    /// food_sub_category (sub level)──► food_sub_category (parent level)
    /// food_sub_category (top)      ──► home
    /// category                     ──► home
    /// home                         ──► home
    /// ```
    pub fn back(&self) -> Self {
        match self.screen {
            Screen::Home | Screen::Category => self.goto_home(),
            Screen::FoodSubCategory => {
                if self.food_parent.is_some() {
                    self.select_food_parent(None)
                } else {
                    self.goto_home()
                }
            }
            Screen::Products => match (self.selected_category, self.selected_animal) {
                (Some(CategoryKey::Food { .. }), _) => self.goto_food_sub_category(),
                (_, Some(animal)) => self.goto_category(animal),
                (_, None) => self.goto_home(),
            },
        }
    }

    /// Applies a single user intent.
    pub fn apply(&self, intent: NavIntent) -> Self {
        match intent {
            NavIntent::GoHome => self.goto_home(),
            NavIntent::GoCategory { animal } => self.goto_category(animal),
            NavIntent::GoProducts { animal, category } => self.goto_products(animal, category),
            NavIntent::GoFoodSubCategory => self.goto_food_sub_category(),
            NavIntent::SelectFoodParent { parent } => self.select_food_parent(parent),
            NavIntent::SelectFoodSub { sub } => self.select_food_sub(sub),
            NavIntent::Back => self.back(),
        }
    }

    /// The category the product list should query, once on `Products`.
    pub fn product_filter(&self) -> Option<(Animal, CategoryKey)> {
        match (self.screen, self.selected_animal, self.selected_category) {
            (Screen::Products, Some(animal), Some(category)) => Some((animal, category)),
            _ => None,
        }
    }

    /// Checks the invariants listed on the type.
    pub fn is_consistent(&self) -> bool {
        match self.screen {
            Screen::Home => *self == NavigationState::home(),
            Screen::Category => {
                self.selected_animal.is_some()
                    && self.selected_category.is_none()
                    && self.food_parent.is_none()
                    && self.food_sub.is_none()
            }
            Screen::FoodSubCategory => self.selected_animal.is_some() && self.food_sub.is_none(),
            Screen::Products => match (self.selected_animal, self.selected_category) {
                (Some(_), Some(CategoryKey::Food { parent, sub })) => {
                    self.food_parent == Some(parent) && self.food_sub == Some(sub)
                }
                (Some(_), Some(CategoryKey::Simple { key })) => {
                    key != Category::Food && self.food_parent.is_none() && self.food_sub.is_none()
                }
                _ => false,
            },
        }
    }

    fn on_food_screen(&self) -> bool {
        self.screen == Screen::FoodSubCategory && self.selected_animal.is_some()
    }
}

// =============================================================================
// Intents
// =============================================================================

/// A user-initiated navigation request.
///
/// Serialized with a `type` tag so a session can be replayed from JSON:
/// `{"type": "goProducts", "animal": "cats", "category": "food"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum NavIntent {
    GoHome,
    GoCategory { animal: Animal },
    GoProducts { animal: Animal, category: Category },
    GoFoodSubCategory,
    SelectFoodParent { parent: Option<FoodParent> },
    SelectFoodSub { sub: FoodSub },
    Back,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at_food_screen(animal: Animal) -> NavigationState {
        NavigationState::home()
            .goto_category(animal)
            .goto_products(animal, Category::Food)
    }

    #[test]
    fn test_starts_at_home() {
        let state = NavigationState::default();
        assert_eq!(state, NavigationState::home());
        assert_eq!(state.screen, Screen::Home);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_goto_home_clears_everything() {
        let deep = at_food_screen(Animal::Cats).select_food_sub(FoodSub::Kilograms);
        let home = deep.goto_home();
        assert_eq!(home, NavigationState::home());
        assert_eq!(home.goto_home(), home);
    }

    #[test]
    fn test_goto_category() {
        let state = NavigationState::home().goto_category(Animal::Birds);
        assert_eq!(state.screen, Screen::Category);
        assert_eq!(state.selected_animal, Some(Animal::Birds));
        assert_eq!(state.selected_category, None);
    }

    #[test]
    fn test_food_drill_down_reaches_compound_category() {
        let state = NavigationState::home()
            .goto_products(Animal::Cats, Category::Food)
            .select_food_parent(Some(FoodParent::Dry))
            .select_food_sub(FoodSub::Kilograms);

        assert_eq!(
            state,
            NavigationState {
                screen: Screen::Products,
                selected_animal: Some(Animal::Cats),
                selected_category: Some(CategoryKey::food(FoodSub::Kilograms)),
                food_parent: Some(FoodParent::Dry),
                food_sub: Some(FoodSub::Kilograms),
            }
        );
        assert_eq!(
            state.selected_category.map(|c| c.to_string()).as_deref(),
            Some("dry.kilograms")
        );
    }

    #[test]
    fn test_goto_products_food_detours() {
        let state = NavigationState::home().goto_products(Animal::Dogs, Category::Food);
        assert_eq!(state.screen, Screen::FoodSubCategory);
        assert_eq!(state.selected_category, Some(CategoryKey::simple(Category::Food)));
        assert_eq!(state.food_parent, None);
        assert_eq!(state.food_sub, None);
    }

    #[test]
    fn test_goto_products_flat_category_goes_straight_to_list() {
        let state = NavigationState::home().goto_products(Animal::Dogs, Category::Clean);
        assert_eq!(state.screen, Screen::Products);
        assert_eq!(state.selected_animal, Some(Animal::Dogs));
        assert_eq!(state.selected_category, Some(CategoryKey::simple(Category::Clean)));
        assert_eq!(
            state.product_filter(),
            Some((Animal::Dogs, CategoryKey::simple(Category::Clean)))
        );
    }

    #[test]
    fn test_select_food_parent_clears_leaf_only_when_set() {
        let state = at_food_screen(Animal::Cats).select_food_parent(Some(FoodParent::Wet));
        assert_eq!(state.food_parent, Some(FoodParent::Wet));
        assert_eq!(state.food_sub, None);

        let state = state.select_food_parent(None);
        assert_eq!(state.food_parent, None);
        assert_eq!(state.screen, Screen::FoodSubCategory);
    }

    #[test]
    fn test_select_food_sub_takes_parent_from_leaf() {
        let state = at_food_screen(Animal::Cats)
            .select_food_parent(Some(FoodParent::Dry))
            .select_food_sub(FoodSub::Cans);
        assert_eq!(state.food_parent, Some(FoodParent::Wet));
        assert_eq!(state.selected_category, Some(CategoryKey::food(FoodSub::Cans)));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_food_intents_ignored_off_the_food_screen() {
        let home = NavigationState::home();
        assert_eq!(home.goto_food_sub_category(), home);
        assert_eq!(home.select_food_parent(Some(FoodParent::Dry)), home);
        assert_eq!(home.select_food_sub(FoodSub::Bag), home);

        let list = home.goto_products(Animal::Fishes, Category::Accessories);
        assert_eq!(list.select_food_sub(FoodSub::Bag), list);
    }

    #[test]
    fn test_goto_food_sub_category_keeps_selections() {
        let list = at_food_screen(Animal::Cats).select_food_sub(FoodSub::Snacks);
        let state = list.goto_food_sub_category();
        assert_eq!(state.screen, Screen::FoodSubCategory);
        assert_eq!(state.selected_animal, Some(Animal::Cats));
        assert_eq!(state.selected_category, Some(CategoryKey::food(FoodSub::Snacks)));
        assert_eq!(state.food_parent, None);
        assert_eq!(state.food_sub, None);
    }

    #[test]
    fn test_back_navigation() {
        // products (food leaf) → food screen, parent level
        let leaf = at_food_screen(Animal::Cats)
            .select_food_parent(Some(FoodParent::Dry))
            .select_food_sub(FoodSub::Bag);
        let back = leaf.back();
        assert_eq!(back.screen, Screen::FoodSubCategory);
        assert_eq!(back.food_parent, None);

        // food screen sub level → parent level
        let sub_level = at_food_screen(Animal::Cats).select_food_parent(Some(FoodParent::Wet));
        let back = sub_level.back();
        assert_eq!(back.screen, Screen::FoodSubCategory);
        assert_eq!(back.food_parent, None);

        // food screen top → home
        assert_eq!(at_food_screen(Animal::Cats).back(), NavigationState::home());

        // products (flat) → category
        let flat = NavigationState::home().goto_products(Animal::Dogs, Category::Clean);
        assert_eq!(flat.back(), NavigationState::home().goto_category(Animal::Dogs));

        // category → home, home → home
        let category = NavigationState::home().goto_category(Animal::Dogs);
        assert_eq!(category.back(), NavigationState::home());
        assert_eq!(NavigationState::home().back(), NavigationState::home());
    }

    #[test]
    fn test_product_filter_only_on_products() {
        assert_eq!(at_food_screen(Animal::Cats).product_filter(), None);
        assert_eq!(NavigationState::home().product_filter(), None);
    }

    #[test]
    fn test_intent_json() {
        let intent: NavIntent = serde_json::from_str(
            r#"{"type":"goProducts","animal":"cats","category":"food"}"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            NavIntent::GoProducts {
                animal: Animal::Cats,
                category: Category::Food
            }
        );

        let intent: NavIntent =
            serde_json::from_str(r#"{"type":"selectFoodParent","parent":null}"#).unwrap();
        assert_eq!(intent, NavIntent::SelectFoodParent { parent: None });

        let state = NavigationState::home().apply(NavIntent::GoCategory {
            animal: Animal::Fishes,
        });
        assert_eq!(state.screen, Screen::Category);
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = NavigationState::home().goto_products(Animal::Cats, Category::Food);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["screen"], "foodSubCategory");
        assert_eq!(json["selectedAnimal"], "cats");
        assert_eq!(json["selectedCategory"], "food");
        assert!(json["foodParent"].is_null());
    }
}
