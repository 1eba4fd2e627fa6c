use recipebook_recipe::SearchQuery;
use recipebook_shared::{Recipe, RecipeId, RecipeType, RemoteRecipe};
use tokio::sync::{mpsc, watch};

use super::{Destination, Events, ScreenState, UiEvent, state_channel};
use crate::usecase::{SearchRecipes, ToggleFavorite};

pub struct SearchViewModel {
    uid: String,
    pub query: String,
    pub meal_type: Option<RecipeType>,
    next: Option<String>,
    search: SearchRecipes,
    toggle_favorite: ToggleFavorite,
    state: watch::Sender<ScreenState<Vec<RemoteRecipe>>>,
    events: Events,
}

impl SearchViewModel {
    pub fn new(
        uid: impl Into<String>,
        search: SearchRecipes,
        toggle_favorite: ToggleFavorite,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = Events::channel();

        (
            Self {
                uid: uid.into(),
                query: String::new(),
                meal_type: None,
                next: None,
                search,
                toggle_favorite,
                state: state_channel(),
                events,
            },
            rx,
        )
    }

    pub fn state(&self) -> watch::Receiver<ScreenState<Vec<RemoteRecipe>>> {
        self.state.subscribe()
    }

    pub fn is_search_enabled(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub async fn search(&mut self) {
        if !self.is_search_enabled() {
            return;
        }

        let mut query = SearchQuery::new(self.query.trim());
        if let Some(meal_type) = self.meal_type {
            query = query.meal_type(meal_type);
        }

        self.next = None;
        self.state.send_replace(ScreenState::Loading);

        match self.search.execute(&self.uid, &query).await {
            Ok(page) => {
                self.next = page.next;
                self.state.send_replace(ScreenState::from_items(page.recipes));
            }
            Err(err) => {
                self.state.send_replace(ScreenState::Idle);
                self.events.error(&err);
            }
        }
    }

    /// Appends the next page of results to the current ones.
    pub async fn load_more(&mut self) {
        let Some(next) = self.next.to_owned() else {
            return;
        };

        let query = SearchQuery::new(self.query.trim()).next(next);

        match self.search.execute(&self.uid, &query).await {
            Ok(page) => {
                self.next = page.next;
                self.state.send_modify(|state| {
                    let mut recipes = match std::mem::replace(state, ScreenState::Idle) {
                        ScreenState::Loaded(recipes) => recipes,
                        _ => vec![],
                    };
                    for recipe in page.recipes {
                        if !recipes.contains(&recipe) {
                            recipes.push(recipe);
                        }
                    }
                    *state = ScreenState::from_items(recipes);
                });
            }
            Err(err) => self.events.error(&err),
        }
    }

    /// Flips the favorite flag of the result at `index` in place.
    pub async fn toggle_favorite(&self, index: usize) {
        let Some(recipe) = self
            .state
            .borrow()
            .loaded()
            .and_then(|recipes| recipes.get(index).cloned())
        else {
            return;
        };

        match self
            .toggle_favorite
            .execute(&self.uid, Recipe::Remote(recipe))
            .await
        {
            Ok(Recipe::Remote(updated)) => {
                self.state.send_modify(|state| {
                    if let ScreenState::Loaded(recipes) = state {
                        for recipe in recipes.iter_mut().filter(|r| **r == updated) {
                            recipe.favorite = updated.favorite;
                        }
                    }
                });
            }
            Ok(Recipe::Local(_)) => {}
            Err(err) => self.events.error(&err),
        }
    }

    pub fn open(&self, index: usize) {
        if let Some(recipe) = self
            .state
            .borrow()
            .loaded()
            .and_then(|recipes| recipes.get(index))
        {
            self.events
                .navigate(Destination::Recipe(RecipeId::Remote(recipe.id.to_owned())));
        }
    }
}
