use recipebook_shared::{Page, Recipe, RecipeId};
use tokio::sync::{mpsc, watch};

use super::{Destination, Events, ScreenState, UiEvent, state_channel};
use crate::usecase::{GetFavoriteRecipes, ToggleFavorite};

/// Favorites of the user, local and remote, loaded one page at a time.
pub struct FavoritesViewModel {
    uid: String,
    page: Page,
    has_more: bool,
    get_favorites: GetFavoriteRecipes,
    toggle_favorite: ToggleFavorite,
    state: watch::Sender<ScreenState<Vec<Recipe>>>,
    events: Events,
}

impl FavoritesViewModel {
    pub fn new(
        uid: impl Into<String>,
        page_size: u32,
        get_favorites: GetFavoriteRecipes,
        toggle_favorite: ToggleFavorite,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = Events::channel();

        (
            Self {
                uid: uid.into(),
                page: Page::first(page_size),
                has_more: false,
                get_favorites,
                toggle_favorite,
                state: state_channel(),
                events,
            },
            rx,
        )
    }

    pub fn state(&self) -> watch::Receiver<ScreenState<Vec<Recipe>>> {
        self.state.subscribe()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub async fn load(&mut self) {
        self.page = Page::first(self.page.limit);
        self.state.send_replace(ScreenState::Loading);

        match self.get_favorites.execute(&self.uid, self.page).await {
            Ok(recipes) => {
                self.has_more = !recipes.is_empty();
                self.state.send_replace(ScreenState::from_items(recipes));
            }
            Err(err) => {
                self.state.send_replace(ScreenState::Idle);
                self.events.error(&err);
            }
        }
    }

    pub async fn load_more(&mut self) {
        if !self.has_more {
            return;
        }

        let page = self.page.next();

        match self.get_favorites.execute(&self.uid, page).await {
            Ok(recipes) => {
                self.page = page;
                self.has_more = !recipes.is_empty();
                self.state.send_modify(|state| {
                    let mut current = match std::mem::replace(state, ScreenState::Idle) {
                        ScreenState::Loaded(current) => current,
                        _ => vec![],
                    };
                    for recipe in recipes {
                        if !current.contains(&recipe) {
                            current.push(recipe);
                        }
                    }
                    *state = ScreenState::from_items(current);
                });
            }
            Err(err) => self.events.error(&err),
        }
    }

    /// Unfavorites the recipe, it leaves the list.
    pub async fn remove(&self, id: &RecipeId) {
        let Some(recipe) = self
            .state
            .borrow()
            .loaded()
            .and_then(|recipes| recipes.iter().find(|r| &r.id() == id).cloned())
        else {
            return;
        };

        if !recipe.is_favorite() {
            return;
        }

        match self.toggle_favorite.execute(&self.uid, recipe).await {
            Ok(updated) => {
                self.state.send_modify(|state| {
                    if let ScreenState::Loaded(recipes) = state {
                        recipes.retain(|r| r.id() != updated.id());
                        if recipes.is_empty() {
                            *state = ScreenState::Empty;
                        }
                    }
                });
            }
            Err(err) => self.events.error(&err),
        }
    }

    pub fn open(&self, id: RecipeId) {
        self.events.navigate(Destination::Recipe(id));
    }
}
