use std::{
    borrow::Cow,
    collections::BTreeMap,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::{Validate, ValidationError};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum RecipeType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Teatime,
}

impl RecipeType {
    /// Parses a tag as returned by the search API. Composite tags such as
    /// `lunch/dinner` expand to every known part, unknown parts are dropped.
    pub fn parse_tags(value: &str) -> Vec<RecipeType> {
        value
            .split('/')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }
}

/// Ingredient name, normalized so that "Flour " and "flour" are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ingredient(String);

impl Ingredient {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<String> for Ingredient {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Ingredient {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Ingredient> for String {
    fn from(value: Ingredient) -> Self {
        value.0
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recipe authored on the device.
///
/// `id` is assigned by the store of each device, `key` is generated once
/// when the recipe is authored and identifies it in the cloud document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecipe {
    pub id: i64,
    #[serde(default)]
    pub key: String,
    pub name: String,
    pub types: Vec<RecipeType>,
    pub prep_time: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub ingredients: BTreeMap<Ingredient, String>,
}

impl PartialEq for LocalRecipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LocalRecipe {}

impl Hash for LocalRecipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Recipe returned by the search API. Rebuilt from every response, only its
/// favorite flag is tracked locally.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecipe {
    pub id: String,
    pub name: String,
    pub types: Vec<RecipeType>,
    pub prep_time: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl PartialEq for RemoteRecipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RemoteRecipe {}

impl Hash for RemoteRecipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeId {
    Local(i64),
    Remote(String),
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeId::Local(id) => write!(f, "{id}"),
            RecipeId::Remote(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Recipe {
    Local(LocalRecipe),
    Remote(RemoteRecipe),
}

impl Recipe {
    pub fn id(&self) -> RecipeId {
        match self {
            Recipe::Local(r) => RecipeId::Local(r.id),
            Recipe::Remote(r) => RecipeId::Remote(r.id.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Recipe::Local(r) => &r.name,
            Recipe::Remote(r) => &r.name,
        }
    }

    pub fn types(&self) -> &[RecipeType] {
        match self {
            Recipe::Local(r) => &r.types,
            Recipe::Remote(r) => &r.types,
        }
    }

    pub fn prep_time(&self) -> u32 {
        match self {
            Recipe::Local(r) => r.prep_time,
            Recipe::Remote(r) => r.prep_time,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Recipe::Local(r) => r.image.as_deref(),
            Recipe::Remote(r) => r.image.as_deref(),
        }
    }

    pub fn is_favorite(&self) -> bool {
        match self {
            Recipe::Local(r) => r.favorite,
            Recipe::Remote(r) => r.favorite,
        }
    }

    pub fn set_favorite(&mut self, value: bool) {
        match self {
            Recipe::Local(r) => r.favorite = value,
            Recipe::Remote(r) => r.favorite = value,
        }
    }
}

impl From<LocalRecipe> for Recipe {
    fn from(value: LocalRecipe) -> Self {
        Recipe::Local(value)
    }
}

impl From<RemoteRecipe> for Recipe {
    fn from(value: RemoteRecipe) -> Self {
        Recipe::Remote(value)
    }
}

/// Fields of a local recipe as entered in the recipe form.
#[derive(Validate, Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(range(min = 1, max = 10080))]
    pub prep_time: u32,
    #[validate(length(min = 1))]
    pub types: Vec<RecipeType>,
    pub image: Option<String>,
    #[validate(length(min = 1), custom(function = "validate_steps"))]
    pub steps: Vec<String>,
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: BTreeMap<Ingredient, String>,
}

impl NewRecipe {
    pub fn into_recipe(self, id: i64, key: impl Into<String>, favorite: bool) -> LocalRecipe {
        LocalRecipe {
            id,
            key: key.into(),
            name: self.name,
            types: self.types,
            prep_time: self.prep_time,
            image: self.image,
            favorite,
            description: self.description,
            steps: self.steps,
            ingredients: self.ingredients,
        }
    }
}

impl From<&LocalRecipe> for NewRecipe {
    fn from(value: &LocalRecipe) -> Self {
        Self {
            name: value.name.to_owned(),
            description: value.description.to_owned(),
            prep_time: value.prep_time,
            types: value.types.to_owned(),
            image: value.image.to_owned(),
            steps: value.steps.to_owned(),
            ingredients: value.ingredients.to_owned(),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("Must not be blank")));
    }

    Ok(())
}

fn validate_steps(steps: &[String]) -> Result<(), ValidationError> {
    if steps.iter().any(|step| step.trim().is_empty()) {
        return Err(ValidationError::new("blank_step")
            .with_message(Cow::from("Steps must not be blank")));
    }

    Ok(())
}

fn validate_ingredients(ingredients: &BTreeMap<Ingredient, String>) -> Result<(), ValidationError> {
    if ingredients.is_empty() {
        return Err(ValidationError::new("length")
            .with_message(Cow::from("At least one ingredient is required")));
    }

    if ingredients.keys().any(|i| i.name().is_empty()) {
        return Err(ValidationError::new("blank_ingredient")
            .with_message(Cow::from("Ingredient names must not be blank")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn local(id: i64, name: &str, favorite: bool) -> LocalRecipe {
        LocalRecipe {
            id,
            key: format!("key-{id}"),
            name: name.to_owned(),
            types: vec![RecipeType::Dinner],
            prep_time: 10,
            image: None,
            favorite,
            description: String::new(),
            steps: vec![],
            ingredients: BTreeMap::new(),
        }
    }

    fn remote(id: &str, name: &str) -> RemoteRecipe {
        RemoteRecipe {
            id: id.to_owned(),
            name: name.to_owned(),
            types: vec![],
            prep_time: 0,
            image: None,
            favorite: false,
            source: String::new(),
            url: String::new(),
            ingredients: vec![],
        }
    }

    #[test]
    fn local_equality_ignores_mutable_fields() {
        assert_eq!(local(1, "Soup", false), local(1, "Stew", true));
        assert_ne!(local(1, "Soup", false), local(2, "Soup", false));
    }

    #[test]
    fn remote_equality_is_by_uri() {
        assert_eq!(remote("uri#1", "a"), remote("uri#1", "b"));
        assert_ne!(remote("uri#1", "a"), remote("uri#2", "a"));
    }

    #[test]
    fn toggling_favorite_keeps_set_membership() {
        let mut set = HashSet::new();
        set.insert(Recipe::from(local(7, "Pie", false)));

        let mut toggled = Recipe::from(local(7, "Pie", false));
        toggled.set_favorite(true);

        assert!(set.contains(&toggled));
        assert!(!set.contains(&Recipe::from(remote("7", "Pie"))));
    }

    #[test]
    fn ingredient_names_are_normalized() {
        assert_eq!(Ingredient::new(" Flour "), Ingredient::new("flour"));

        let json = serde_json::json!({ "Sugar": "1 cup" });
        let map: BTreeMap<Ingredient, String> = serde_json::from_value(json).unwrap();
        assert_eq!(map.get(&Ingredient::new("sugar")).unwrap(), "1 cup");
    }

    #[test]
    fn composite_meal_tags() {
        assert_eq!(
            RecipeType::parse_tags("lunch/dinner"),
            vec![RecipeType::Lunch, RecipeType::Dinner]
        );
        assert_eq!(RecipeType::parse_tags("brunch"), vec![]);
    }

    #[test]
    fn new_recipe_validation() {
        let mut input = NewRecipe {
            name: "Pancakes".to_owned(),
            description: "Fluffy".to_owned(),
            prep_time: 20,
            types: vec![RecipeType::Breakfast],
            image: None,
            steps: vec!["Mix".to_owned(), "Fry".to_owned()],
            ingredients: BTreeMap::from([(Ingredient::new("Flour"), "200 g".to_owned())]),
        };
        assert!(input.validate().is_ok());

        input.name = "   ".to_owned();
        assert!(input.validate().is_err());

        input.name = "Pancakes".to_owned();
        input.ingredients.clear();
        assert!(input.validate().is_err());

        input
            .ingredients
            .insert(Ingredient::new("egg"), "2".to_owned());
        input.prep_time = 0;
        assert!(input.validate().is_err());
    }
}
