//! Food endpoints
//!
//! Besides the raw `foods.search`, `foods.autocomplete` and `food.get`
//! calls, this facade exposes the serving helpers built on `food.get`:
//! - [`FoodsApi::servings`]: per-description and per-metric-unit nutrients
//! - [`FoodsApi::measurements`]: just the keys of that table

use crate::client::FatSecretClient;
use crate::error::ApiResult;
use crate::request::{Resource, SearchQuery};
use crate::servings::{extract_servings, normalize_servings, ServingTable};
use serde_json::Value;
use tracing::debug;

/// Foods API interface
#[derive(Clone)]
pub struct FoodsApi {
    client: FatSecretClient,
}

impl FoodsApi {
    pub(crate) fn new(client: FatSecretClient) -> Self {
        Self { client }
    }

    /// `foods.search`
    pub async fn search(&self, query: &SearchQuery) -> ApiResult<Value> {
        self.client.search(Resource::Food, query).await
    }

    /// `foods.autocomplete`; `max_results` outside `1..=10` becomes 10
    pub async fn autocomplete(&self, expression: &str, max_results: i64) -> ApiResult<Value> {
        self.client
            .autocomplete(Resource::Food, expression, max_results)
            .await
    }

    /// `food.get`
    pub async fn get(&self, food_id: u64) -> ApiResult<Value> {
        self.client.get(Resource::Food, food_id).await
    }

    /// Serving table for a food.
    ///
    /// A food without servings (or a response without a `food` object, such
    /// as an API error payload) yields an empty table.
    pub async fn servings(&self, food_id: u64) -> ApiResult<ServingTable> {
        let response = self.get(food_id).await?;
        let servings = extract_servings(&response);
        debug!(food_id, servings = servings.len(), "Normalizing servings");
        Ok(normalize_servings(servings))
    }

    /// Keys of [`FoodsApi::servings`], in table order
    pub async fn measurements(&self, food_id: u64) -> ApiResult<Vec<String>> {
        let table = self.servings(food_id).await?;
        Ok(table.keys().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::*;
    use crate::error::ApiError;
    use crate::request::SearchQuery;

    const MULTI_SERVING: &str = r#"{
        "food": {
            "food_id": "33691",
            "food_name": "Milk",
            "servings": {
                "serving": [
                    {
                        "serving_id": "29441",
                        "serving_description": "1 cup",
                        "measurement_description": "cup",
                        "metric_serving_amount": "244.000",
                        "metric_serving_unit": "g",
                        "number_of_units": "1.000",
                        "calories": "122",
                        "protein": "8.05",
                        "fat": "4.81"
                    },
                    {
                        "serving_id": "29442",
                        "serving_description": "100 ml",
                        "measurement_description": "ml",
                        "metric_serving_amount": "100.000",
                        "metric_serving_unit": "ml",
                        "number_of_units": "100.000",
                        "calories": "50",
                        "protein": "3.3",
                        "fat": "1.97"
                    }
                ]
            }
        }
    }"#;

    const SINGLE_SERVING: &str = r#"{
        "food": {
            "food_id": "1",
            "servings": {
                "serving": {
                    "serving_description": "1 bar",
                    "measurement_description": "serving",
                    "metric_serving_amount": "28",
                    "metric_serving_unit": "g",
                    "number_of_units": "1",
                    "calories": "140"
                }
            }
        }
    }"#;

    #[test]
    fn test_food_search() {
        let transport = MockTransport::body(r#"{"foods": {"food": []}}"#);
        let foods = client_with(transport.clone()).foods();
        tokio_test::block_on(foods.search(&SearchQuery::new("oat milk"))).unwrap();

        let params = query_params(&transport.last_url());
        assert_eq!(params["method"], "foods.search");
        assert_eq!(params["search_expression"], "oatmilk");
        assert_eq!(params["page_number"], "0");
        assert_eq!(params["max_results"], "10");
    }

    #[test]
    fn test_food_get() {
        let transport = MockTransport::body(MULTI_SERVING);
        let foods = client_with(transport.clone()).foods();
        let value = tokio_test::block_on(foods.get(33691)).unwrap();
        assert_eq!(value["food"]["food_name"], "Milk");

        let params = query_params(&transport.last_url());
        assert_eq!(params["method"], "food.get");
        assert_eq!(params["food_id"], "33691");
    }

    #[test]
    fn test_servings_multi() {
        let foods = client_with(MockTransport::body(MULTI_SERVING)).foods();
        let table = tokio_test::block_on(foods.servings(33691)).unwrap();

        let keys: Vec<&str> = table.keys().collect();
        // "ml" is already a description key, so only "g" is synthesized
        assert_eq!(keys, vec!["cup", "ml", "g"]);

        let per_gram = table.get("g").unwrap();
        assert_eq!(per_gram.calories, Some(0.5));
        assert_eq!(per_gram.protein, Some(0.033));
        assert_eq!(per_gram.fat, Some(0.02));
        assert_eq!(per_gram.number_of_units, Some(1.0));
    }

    #[test]
    fn test_servings_single_object_shape() {
        let foods = client_with(MockTransport::body(SINGLE_SERVING)).foods();
        let table = tokio_test::block_on(foods.servings(1)).unwrap();

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["serving(1 bar)", "g"]);
        assert_eq!(table.get("g").unwrap().calories, Some(5.0));
    }

    #[test]
    fn test_measurements_match_servings_keys() {
        let foods = client_with(MockTransport::body(MULTI_SERVING)).foods();
        let table = tokio_test::block_on(foods.servings(33691)).unwrap();
        let measurements = tokio_test::block_on(foods.measurements(33691)).unwrap();

        let keys: Vec<String> = table.keys().map(str::to_string).collect();
        assert_eq!(measurements, keys);
    }

    #[test]
    fn test_servings_empty_on_api_error_payload() {
        let body = r#"{"error": {"code": 106, "message": "Invalid ID"}}"#;
        let foods = client_with(MockTransport::body(body)).foods();
        assert!(tokio_test::block_on(foods.servings(0)).unwrap().is_empty());
        assert!(tokio_test::block_on(foods.measurements(0)).unwrap().is_empty());
    }

    #[test]
    fn test_servings_empty_on_malformed_body() {
        let foods = client_with(MockTransport::body("not json")).foods();
        assert!(tokio_test::block_on(foods.servings(1)).unwrap().is_empty());
    }

    #[test]
    fn test_servings_transport_error() {
        let foods = client_with(MockTransport::failing("dns failure")).foods();
        let err = tokio_test::block_on(foods.servings(1)).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_autocomplete() {
        let transport = MockTransport::body(r#"{"suggestions": {"suggestion": ["chicken"]}}"#);
        let foods = client_with(transport.clone()).foods();
        let value = tokio_test::block_on(foods.autocomplete("chick", 3)).unwrap();
        assert_eq!(value["suggestions"]["suggestion"][0], "chicken");

        let params = query_params(&transport.last_url());
        assert_eq!(params["expression"], "chick");
        assert_eq!(params["max_results"], "3");
    }
}
