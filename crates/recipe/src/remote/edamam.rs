use std::time::Duration;

use recipebook_shared::{RecipeType, RemoteRecipe};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{RecipeSearch, SearchPage, SearchQuery};

const RECIPE_URI_MARKER: &str = "#recipe_";

#[derive(Debug, Clone)]
pub struct EdamamConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_key: String,
    pub timeout: Duration,
}

/// Client for the Edamam recipe search API (v2).
#[derive(Clone)]
pub struct EdamamClient {
    client: Client,
    config: EdamamConfig,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
    #[serde(rename = "_links", default)]
    links: Links,
}

#[derive(Deserialize, Default)]
struct Links {
    next: Option<Link>,
}

#[derive(Deserialize)]
struct Link {
    href: String,
}

#[derive(Deserialize)]
struct Hit {
    recipe: ApiRecipe,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecipe {
    uri: String,
    label: String,
    image: Option<String>,
    #[serde(default)]
    source: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    ingredient_lines: Vec<String>,
    #[serde(default)]
    meal_type: Vec<String>,
    #[serde(default)]
    total_time: f64,
}

impl From<ApiRecipe> for RemoteRecipe {
    fn from(value: ApiRecipe) -> Self {
        let mut types = Vec::new();
        for tag in value.meal_type.iter().flat_map(|t| RecipeType::parse_tags(t)) {
            if !types.contains(&tag) {
                types.push(tag);
            }
        }

        RemoteRecipe {
            id: value.uri,
            name: value.label,
            types,
            prep_time: value.total_time.max(0.0).round() as u32,
            image: value.image,
            favorite: false,
            source: value.source,
            url: value.url,
            ingredients: value.ingredient_lines,
        }
    }
}

impl EdamamClient {
    pub fn new(config: EdamamConfig) -> recipebook_shared::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("recipebook/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    fn credentials(&self) -> [(&'static str, &str); 3] {
        [
            ("type", "public"),
            ("app_id", &self.config.app_id),
            ("app_key", &self.config.app_key),
        ]
    }

    fn recipes_url(&self) -> String {
        format!("{}/api/recipes/v2", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl RecipeSearch for EdamamClient {
    async fn search(&self, query: &SearchQuery) -> recipebook_shared::Result<SearchPage> {
        let request = match &query.next {
            Some(next) => self.client.get(next),
            None => {
                let mut request = self
                    .client
                    .get(self.recipes_url())
                    .query(&self.credentials())
                    .query(&[("q", query.query.as_str())]);

                if let Some(meal_type) = query.meal_type {
                    let meal_type: &str = meal_type.as_ref();
                    request = request.query(&[("mealType", meal_type)]);
                }

                request
            }
        };

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), q = %query.query, "recipe search failed");
            recipebook_shared::bail!("recipe search failed with status {status}");
        }

        let body: SearchResponse = resp.json().await?;

        tracing::debug!(q = %query.query, hits = body.hits.len(), "recipe search");

        Ok(SearchPage {
            recipes: body.hits.into_iter().map(|h| h.recipe.into()).collect(),
            next: body.links.next.map(|l| l.href),
        })
    }

    async fn find(&self, id: &str) -> recipebook_shared::Result<Option<RemoteRecipe>> {
        let fragment = id
            .rsplit_once(RECIPE_URI_MARKER)
            .map(|(_, fragment)| fragment)
            .unwrap_or(id);

        let url = format!("{}/{}", self.recipes_url(), urlencoding::encode(fragment));
        let resp = self
            .client
            .get(url)
            .query(&self.credentials())
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), recipe.id = id, "recipe lookup failed");
            recipebook_shared::bail!("recipe lookup failed with status {status}");
        }

        let hit: Hit = resp.json().await?;

        Ok(Some(hit.recipe.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_api_recipe() {
        let json = serde_json::json!({
            "recipe": {
                "uri": "http://www.edamam.com/ontologies/edamam.owl#recipe_abc",
                "label": "Chicken Vesuvio",
                "image": "https://img/abc.jpg",
                "source": "Serious Eats",
                "url": "https://www.seriouseats.com/chicken-vesuvio",
                "ingredientLines": ["1/2 cup olive oil", "5 cloves garlic"],
                "mealType": ["lunch/dinner", "dinner"],
                "totalTime": 59.6
            }
        });

        let hit: Hit = serde_json::from_value(json).unwrap();
        let recipe = RemoteRecipe::from(hit.recipe);

        assert_eq!(
            recipe.id,
            "http://www.edamam.com/ontologies/edamam.owl#recipe_abc"
        );
        assert_eq!(recipe.name, "Chicken Vesuvio");
        assert_eq!(recipe.types, vec![RecipeType::Lunch, RecipeType::Dinner]);
        assert_eq!(recipe.prep_time, 60);
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(!recipe.favorite);
    }

    #[test]
    fn missing_optional_fields() {
        let json = serde_json::json!({
            "hits": [{ "recipe": { "uri": "u#recipe_1", "label": "Toast" } }]
        });

        let body: SearchResponse = serde_json::from_value(json).unwrap();
        assert!(body.links.next.is_none());

        let recipe = RemoteRecipe::from(body.hits.into_iter().next().unwrap().recipe);
        assert_eq!(recipe.prep_time, 0);
        assert!(recipe.types.is_empty());
        assert!(recipe.image.is_none());
    }
}
