//! Headless screen logic.
//!
//! Each view model owns the fields of its form, derives its flags from them
//! and turns use-case results into a [`ScreenState`] published on a
//! `watch` channel, or into one-shot [`UiEvent`]s for the front end.

mod favorites;
mod login;
mod recipe_form;
mod recipes;
mod search;
mod signup;

pub use favorites::FavoritesViewModel;
pub use login::LoginViewModel;
pub use recipe_form::{IngredientRow, RecipeFormViewModel};
pub use recipes::RecipesViewModel;
pub use search::SearchViewModel;
pub use signup::SignupViewModel;

use recipebook_shared::{Error, ErrorKind, RecipeId};
use tokio::sync::{mpsc, watch};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Idle,
    Loading,
    Loaded(T),
    Empty,
}

impl<T> ScreenState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            ScreenState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<I> ScreenState<Vec<I>> {
    pub fn from_items(items: Vec<I>) -> Self {
        if items.is_empty() {
            ScreenState::Empty
        } else {
            ScreenState::Loaded(items)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Login,
    Signup,
    Home,
    Recipes,
    Favorites,
    NewRecipe,
    Recipe(RecipeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Navigate(Destination),
    ShowError(ErrorKind),
    ShowMessage(String),
}

/// Sending half of the one-shot event channel of a view model.
#[derive(Clone)]
pub struct Events(mpsc::UnboundedSender<UiEvent>);

impl Events {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }

    pub fn send(&self, event: UiEvent) {
        // a closed receiver means the screen is gone
        let _ = self.0.send(event);
    }

    pub fn navigate(&self, destination: Destination) {
        self.send(UiEvent::Navigate(destination));
    }

    pub fn message(&self, message: impl Into<String>) {
        self.send(UiEvent::ShowMessage(message.into()));
    }

    /// Messages meant for the user are shown as is, anything else only
    /// surfaces its kind. The full error goes to the log.
    pub fn error(&self, err: &Error) {
        match err {
            Error::User(message) => self.message(message.to_owned()),
            Error::Validate(errors) => self.message(errors.to_string()),
            _ => {
                tracing::error!(err = ?err, kind = ?err.kind(), "action failed");
                self.send(UiEvent::ShowError(err.kind()));
            }
        }
    }
}

pub(crate) fn state_channel<T>() -> watch::Sender<ScreenState<T>> {
    watch::Sender::new(ScreenState::Idle)
}
