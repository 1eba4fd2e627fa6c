use recipebook_shared::{LocalRecipe, RecipeId};
use tokio::sync::{mpsc, watch};

use super::{Destination, Events, ScreenState, UiEvent, state_channel};
use crate::usecase::{DeleteRecipe, GetRecipes};

/// Recipes authored by the user.
pub struct RecipesViewModel {
    uid: String,
    get_recipes: GetRecipes,
    delete_recipe: DeleteRecipe,
    state: watch::Sender<ScreenState<Vec<LocalRecipe>>>,
    events: Events,
}

impl RecipesViewModel {
    pub fn new(
        uid: impl Into<String>,
        get_recipes: GetRecipes,
        delete_recipe: DeleteRecipe,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = Events::channel();

        (
            Self {
                uid: uid.into(),
                get_recipes,
                delete_recipe,
                state: state_channel(),
                events,
            },
            rx,
        )
    }

    pub fn state(&self) -> watch::Receiver<ScreenState<Vec<LocalRecipe>>> {
        self.state.subscribe()
    }

    pub async fn load(&self) {
        self.state.send_replace(ScreenState::Loading);

        match self.get_recipes.execute(&self.uid).await {
            Ok(recipes) => {
                self.state.send_replace(ScreenState::from_items(recipes));
            }
            Err(err) => {
                self.state.send_replace(ScreenState::Idle);
                self.events.error(&err);
            }
        }
    }

    pub async fn delete(&self, id: i64) {
        match self.delete_recipe.execute(&self.uid, id).await {
            Ok(()) => {
                self.state.send_modify(|state| {
                    if let ScreenState::Loaded(recipes) = state {
                        recipes.retain(|r| r.id != id);
                        if recipes.is_empty() {
                            *state = ScreenState::Empty;
                        }
                    }
                });
                self.events.message("Recipe deleted");
            }
            Err(err) => self.events.error(&err),
        }
    }

    pub fn create(&self) {
        self.events.navigate(Destination::NewRecipe);
    }

    pub fn open(&self, id: i64) {
        self.events.navigate(Destination::Recipe(RecipeId::Local(id)));
    }
}
