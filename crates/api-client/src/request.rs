//! Per-call request descriptions and URL construction

use crate::params::ParameterStore;
use serde::Serialize;
use std::fmt;

/// Default `max_results` for search and autocomplete
pub const DEFAULT_MAX_RESULTS: i64 = 10;

/// Autocomplete accepts 1..=10 results
const AUTOCOMPLETE_MAX_RESULTS: i64 = 10;

/// The resource family a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Foods (`food.*` / `foods.*`)
    Food,
    /// Recipes (`recipe.*` / `recipes.*`)
    Recipe,
}

impl Resource {
    /// Singular name, as used in `<resource>.get` and `<resource>_id`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Recipe => "recipe",
        }
    }

    /// Name of the id parameter for `<resource>.get`
    #[must_use]
    pub fn id_param(self) -> &'static str {
        match self {
            Self::Food => "food_id",
            Self::Recipe => "recipe_id",
        }
    }
}

/// API method names supported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiMethod {
    /// `foods.search`
    FoodsSearch,
    /// `foods.autocomplete`
    FoodsAutocomplete,
    /// `food.get`
    FoodGet,
    /// `recipes.search`
    RecipesSearch,
    /// `recipe.get`
    RecipeGet,
}

impl ApiMethod {
    /// The search method for a resource
    #[must_use]
    pub fn search(resource: Resource) -> Self {
        match resource {
            Resource::Food => Self::FoodsSearch,
            Resource::Recipe => Self::RecipesSearch,
        }
    }

    /// The lookup method for a resource
    #[must_use]
    pub fn get(resource: Resource) -> Self {
        match resource {
            Resource::Food => Self::FoodGet,
            Resource::Recipe => Self::RecipeGet,
        }
    }

    /// Wire value of the `method` parameter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodsSearch => "foods.search",
            Self::FoodsAutocomplete => "foods.autocomplete",
            Self::FoodGet => "food.get",
            Self::RecipesSearch => "recipes.search",
            Self::RecipeGet => "recipe.get",
        }
    }

    /// Parse a wire method name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "foods.search" => Some(Self::FoodsSearch),
            "foods.autocomplete" => Some(Self::FoodsAutocomplete),
            "food.get" => Some(Self::FoodGet),
            "recipes.search" => Some(Self::RecipesSearch),
            "recipe.get" => Some(Self::RecipeGet),
            _ => None,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: the method plus its method-specific parameters.
///
/// Built fresh for every call. The client merges in the OAuth and format
/// parameters and stamps the timestamp and nonce when it signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Method being invoked
    pub method: ApiMethod,
    /// Method-specific parameters
    pub params: ParameterStore,
}

impl ApiRequest {
    /// Create a request with no extra parameters
    #[must_use]
    pub fn new(method: ApiMethod) -> Self {
        Self {
            method,
            params: ParameterStore::new(),
        }
    }

    /// Builder-style parameter insert
    #[must_use]
    pub fn with_param(mut self, key: impl AsRef<str>, value: impl fmt::Display) -> Self {
        self.params.set(key, value);
        self
    }

    /// `<resource>s.search`
    #[must_use]
    pub fn search(resource: Resource, query: &SearchQuery) -> Self {
        Self::new(ApiMethod::search(resource))
            .with_param("search_expression", &query.expression)
            .with_param("page_number", query.page_number)
            .with_param("max_results", query.max_results)
    }

    /// `<resource>.get`
    #[must_use]
    pub fn get(resource: Resource, id: impl fmt::Display) -> Self {
        Self::new(ApiMethod::get(resource)).with_param(resource.id_param(), id)
    }

    /// `foods.autocomplete`; out-of-range `max_results` falls back to 10
    #[must_use]
    pub fn autocomplete(expression: &str, max_results: i64) -> Self {
        Self::new(ApiMethod::FoodsAutocomplete)
            .with_param("expression", expression)
            .with_param("max_results", autocomplete_max_results(max_results))
    }
}

/// Values in `1..=10` pass through; anything else becomes 10, not the
/// nearest bound.
#[must_use]
pub fn autocomplete_max_results(requested: i64) -> i64 {
    if requested > 0 && requested <= AUTOCOMPLETE_MAX_RESULTS {
        requested
    } else {
        AUTOCOMPLETE_MAX_RESULTS
    }
}

/// Parameters for a search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Search terms
    pub expression: String,
    /// Zero-based page
    pub page_number: u32,
    /// Results per page
    pub max_results: i64,
}

impl SearchQuery {
    /// Search for `expression`, first page, 10 results
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            page_number: 0,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the page
    #[must_use]
    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Append `params` to `base_url` as query arguments
#[must_use]
pub fn build_url(base_url: &str, params: &ParameterStore) -> String {
    append_query(base_url, &params.to_query_string())
}

/// Append `params` and the already percent-encoded `signature` as
/// `oauth_signature` to `base_url`
#[must_use]
pub fn build_signed_url(base_url: &str, params: &ParameterStore, signature: &str) -> String {
    let url = build_url(base_url, params);
    append_query(&url, &format!("oauth_signature={signature}"))
}

fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
