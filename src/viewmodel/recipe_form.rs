use std::collections::{BTreeMap, BTreeSet};

use recipebook_shared::{Ingredient, LocalRecipe, NewRecipe, RecipeId, RecipeType};
use tokio::sync::{mpsc, watch};

use super::{Destination, Events, ScreenState, UiEvent, state_channel};
use crate::usecase::{CreateRecipe, UpdateRecipe};

const MAX_PREP_TIME: u32 = 10080;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientRow {
    pub name: String,
    pub quantity: String,
}

impl IngredientRow {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Create and edit form of a local recipe.
pub struct RecipeFormViewModel {
    uid: String,
    editing: Option<LocalRecipe>,
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub image: Option<String>,
    pub types: BTreeSet<RecipeType>,
    pub ingredients: Vec<IngredientRow>,
    pub steps: Vec<String>,
    create: CreateRecipe,
    update: UpdateRecipe,
    state: watch::Sender<ScreenState<LocalRecipe>>,
    events: Events,
}

impl RecipeFormViewModel {
    pub fn new(
        uid: impl Into<String>,
        create: CreateRecipe,
        update: UpdateRecipe,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = Events::channel();

        (
            Self {
                uid: uid.into(),
                editing: None,
                name: String::new(),
                description: String::new(),
                prep_time: String::new(),
                image: None,
                types: BTreeSet::new(),
                ingredients: vec![IngredientRow::default()],
                steps: vec![String::new()],
                create,
                update,
                state: state_channel(),
                events,
            },
            rx,
        )
    }

    /// Fills the form from an existing recipe, saving then updates it.
    pub fn edit(&mut self, recipe: LocalRecipe) {
        self.name = recipe.name.to_owned();
        self.description = recipe.description.to_owned();
        self.prep_time = recipe.prep_time.to_string();
        self.image = recipe.image.to_owned();
        self.types = recipe.types.iter().copied().collect();
        self.ingredients = recipe
            .ingredients
            .iter()
            .map(|(name, quantity)| IngredientRow {
                name: name.to_string(),
                quantity: quantity.to_owned(),
            })
            .collect();
        self.steps = recipe.steps.to_owned();
        self.editing = Some(recipe);
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn state(&self) -> watch::Receiver<ScreenState<LocalRecipe>> {
        self.state.subscribe()
    }

    pub fn toggle_type(&mut self, value: RecipeType) {
        if !self.types.remove(&value) {
            self.types.insert(value);
        }
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients.push(IngredientRow::default());
    }

    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    pub fn add_step(&mut self) {
        self.steps.push(String::new());
    }

    pub fn remove_step(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    fn parsed_prep_time(&self) -> Option<u32> {
        self.prep_time
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|minutes| (1..=MAX_PREP_TIME).contains(minutes))
    }

    pub fn prep_time_error(&self) -> Option<&'static str> {
        (!self.prep_time.is_empty() && self.parsed_prep_time().is_none())
            .then_some("Preparation time must be between 1 and 10080 minutes")
    }

    pub fn is_save_enabled(&self) -> bool {
        !self.name.trim().is_empty()
            && self.parsed_prep_time().is_some()
            && !self.types.is_empty()
            && self.ingredients.iter().any(|row| !row.is_blank())
            && self.steps.iter().any(|step| !step.trim().is_empty())
    }

    /// Form content as a recipe input. Blank ingredient rows and steps are
    /// left out.
    pub fn input(&self) -> NewRecipe {
        NewRecipe {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            prep_time: self.parsed_prep_time().unwrap_or_default(),
            types: self.types.iter().copied().collect(),
            image: self.image.to_owned(),
            steps: self
                .steps
                .iter()
                .map(|step| step.trim())
                .filter(|step| !step.is_empty())
                .map(str::to_owned)
                .collect(),
            ingredients: self
                .ingredients
                .iter()
                .filter(|row| !row.is_blank())
                .map(|row| (Ingredient::new(&row.name), row.quantity.trim().to_owned()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    pub async fn save(&self) -> Option<LocalRecipe> {
        if !self.is_save_enabled() {
            return None;
        }

        self.state.send_replace(ScreenState::Loading);

        let result = match &self.editing {
            Some(recipe) => self.update.execute(&self.uid, recipe.id, self.input()).await,
            None => self.create.execute(&self.uid, self.input()).await,
        };

        match result {
            Ok(recipe) => {
                self.state.send_replace(ScreenState::Loaded(recipe.clone()));
                self.events.message("Recipe saved");
                self.events
                    .navigate(Destination::Recipe(RecipeId::Local(recipe.id)));
                Some(recipe)
            }
            Err(err) => {
                self.state.send_replace(ScreenState::Idle);
                self.events.error(&err);
                None
            }
        }
    }
}
