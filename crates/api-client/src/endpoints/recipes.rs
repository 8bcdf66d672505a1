//! Recipe endpoints

use crate::client::FatSecretClient;
use crate::error::ApiResult;
use crate::request::{Resource, SearchQuery};
use serde_json::Value;

/// Recipes API interface
#[derive(Clone)]
pub struct RecipesApi {
    client: FatSecretClient,
}

impl RecipesApi {
    pub(crate) fn new(client: FatSecretClient) -> Self {
        Self { client }
    }

    /// `recipes.search`
    pub async fn search(&self, query: &SearchQuery) -> ApiResult<Value> {
        self.client.search(Resource::Recipe, query).await
    }

    /// `recipe.get`
    pub async fn get(&self, recipe_id: u64) -> ApiResult<Value> {
        self.client.get(Resource::Recipe, recipe_id).await
    }
}
