//! Resource-specific API facades
//!
//! | Module | API methods |
//! |--------|-------------|
//! | `foods` | `foods.search`, `foods.autocomplete`, `food.get` |
//! | `recipes` | `recipes.search`, `recipe.get` |

pub mod foods;
pub mod recipes;

pub use foods::FoodsApi;
pub use recipes::RecipesApi;
