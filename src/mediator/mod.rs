//! Routing between presentation regions.
//!
//! The [`Mediator`] keeps non-owning handles to the list, detail and search
//! regions of a host UI. Views own themselves; once a view is dropped the
//! mediator silently stops routing to it.

use crate::book::RecipeBook;
use crate::model::Recipe;
use log::trace;
use std::rc::{Rc, Weak};

/// Region showing a list of recipes.
pub trait ListView {
    fn update_list(&self, recipes: &[&Recipe]);
}

/// Region showing a single recipe.
pub trait DetailView {
    fn display_recipe(&self, recipe: &Recipe);
}

/// Region where the user types a search query.
pub trait SearchBar {
    fn show_query(&self, query: &str);
}

#[derive(Default)]
pub struct Mediator {
    list_view: Option<Weak<dyn ListView>>,
    detail_view: Option<Weak<dyn DetailView>>,
    search_bar: Option<Weak<dyn SearchBar>>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_list_view<V: ListView + 'static>(&mut self, view: &Rc<V>) {
        let view: Weak<dyn ListView> = Rc::downgrade(view) as Weak<V>;
        self.list_view = Some(view);
    }

    pub fn set_detail_view<V: DetailView + 'static>(&mut self, view: &Rc<V>) {
        let view: Weak<dyn DetailView> = Rc::downgrade(view) as Weak<V>;
        self.detail_view = Some(view);
    }

    pub fn set_search_bar<V: SearchBar + 'static>(&mut self, view: &Rc<V>) {
        let view: Weak<dyn SearchBar> = Rc::downgrade(view) as Weak<V>;
        self.search_bar = Some(view);
    }

    /// Forwards the selected recipe to the detail region.
    ///
    /// Returns `false` if no live detail region is registered.
    pub fn recipe_selected(&self, recipe: &Recipe) -> bool {
        let Some(detail) = upgrade(&self.detail_view) else {
            return false;
        };
        trace!("event=recipe_selected module=mediator id={}", recipe.id());
        detail.display_recipe(recipe);
        true
    }

    /// Runs `query` against `book` and forwards the matches to the list
    /// region. Returns the number of matches.
    pub fn search_performed(&self, book: &RecipeBook, query: &str) -> usize {
        let results = book.search(query);
        trace!(
            "event=search_performed module=mediator matches={}",
            results.len()
        );
        if let Some(bar) = upgrade(&self.search_bar) {
            bar.show_query(query);
        }
        if let Some(list) = upgrade(&self.list_view) {
            list.update_list(&results);
        }
        results.len()
    }
}

fn upgrade<T: ?Sized>(handle: &Option<Weak<T>>) -> Option<Rc<T>> {
    handle.as_ref().and_then(Weak::upgrade)
}
