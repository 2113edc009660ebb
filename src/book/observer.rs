use crate::model::Recipe;

/// Handle returned by [`super::RecipeBook::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(super) u64);

/// Listener notified after every change to a [`super::RecipeBook`].
///
/// The observer receives the ordered collection, not the book itself, so it
/// cannot mutate the book from inside the callback.
pub trait CollectionObserver: Send {
    fn update(&mut self, recipes: &[Recipe]);
}

impl<F> CollectionObserver for F
where
    F: FnMut(&[Recipe]) + Send,
{
    fn update(&mut self, recipes: &[Recipe]) {
        self(recipes)
    }
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(super) struct Observers {
    entries: Vec<(ObserverId, Box<dyn CollectionObserver>)>,
    next_id: u64,
}

impl Observers {
    pub(super) fn subscribe(&mut self, observer: Box<dyn CollectionObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(super) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(super) fn notify(&mut self, recipes: &[Recipe]) {
        for (_, observer) in &mut self.entries {
            observer.update(recipes);
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
