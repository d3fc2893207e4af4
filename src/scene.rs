use std::{
    fmt::{self, Debug, Display},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crate::Drawable;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an item in a [`Scene`].
///
/// IDs are allocated from a process-wide counter, so an ID is never
/// reused, even across scenes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A drawable together with its identity.
///
/// Cloning an item is cheap: the drawable is shared.
#[derive(Clone)]
pub struct Item {
    id: ItemId,
    drawable: Arc<dyn Drawable>,
}

impl Item {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn drawable(&self) -> &Arc<dyn Drawable> {
        &self.drawable
    }
}

impl Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Selects an item for removal, either by identity or by position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Id(ItemId),
    Index(usize),
}

impl From<ItemId> for Target {
    fn from(id: ItemId) -> Self {
        Target::Id(id)
    }
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Target::Index(index)
    }
}

/// An ordered collection of drawables.
///
/// Appends go to the end. Removal takes out exactly one matching item
/// and is a no-op if nothing matches.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    items: Vec<Item>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a drawable and returns its fresh identity.
    pub fn append(&mut self, drawable: Arc<dyn Drawable>) -> ItemId {
        let id = ItemId::next();
        self.items.push(Item { id, drawable });
        id
    }

    /// Removes the item selected by `target`, returning it if it existed.
    pub fn remove(&mut self, target: impl Into<Target>) -> Option<Item> {
        let index = self.index_of(target.into())?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, target: impl Into<Target>) -> Option<&Item> {
        self.index_of(target.into()).map(|i| &self.items[i])
    }

    /// The most recently appended item still in the scene.
    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    /// Copies the current contents in order.
    ///
    /// The returned items are independent of later mutations.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(Item::id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_of(&self, target: Target) -> Option<usize> {
        match target {
            Target::Id(id) => self.items.iter().position(|item| item.id == id),
            Target::Index(index) => (index < self.items.len()).then_some(index),
        }
    }
}

impl<D> FromIterator<D> for Scene
where
    D: Drawable,
{
    fn from_iter<T: IntoIterator<Item = D>>(iter: T) -> Self {
        let mut scene = Scene::new();
        for drawable in iter {
            scene.append(Arc::new(drawable));
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Circle, Shape};

    fn shape() -> Arc<dyn Drawable> {
        Arc::new(Shape::new(Circle::default()))
    }

    #[test]
    fn append_assigns_increasing_ids() {
        let mut scene = Scene::new();
        let a = scene.append(shape());
        let b = scene.append(shape());
        assert!(b > a);
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(scene.last().map(Item::id), Some(b));
    }

    #[test]
    fn ids_are_not_reused_across_scenes() {
        let mut first = Scene::new();
        let mut second = Scene::new();
        let a = first.append(shape());
        first.remove(a);
        let b = second.append(shape());
        assert_ne!(a, b);
    }

    #[test]
    fn remove_by_id_and_index() {
        let mut scene = Scene::new();
        let a = scene.append(shape());
        let b = scene.append(shape());
        let c = scene.append(shape());

        assert_eq!(scene.remove(b).map(|item| item.id()), Some(b));
        assert_eq!(scene.remove(1).map(|item| item.id()), Some(c));
        assert_eq!(scene.ids().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn removing_missing_items_is_a_no_op() {
        let mut scene = Scene::new();
        let a = scene.append(shape());
        scene.remove(a);

        assert!(scene.remove(a).is_none());
        assert!(scene.remove(0).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let mut scene = Scene::new();
        let a = scene.append(shape());
        let snapshot = scene.snapshot();
        scene.append(shape());
        scene.remove(a);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), a);
        assert_eq!(scene.len(), 1);
    }
}
