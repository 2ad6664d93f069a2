use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::{RecycliError, RecyclerItem, TypeTag, ViewType};

/// View construction and binding for one or more item types.
///
/// `V` is the host's view handle and `C` the context views are created in.
pub trait Binder<I, V, C> {
    /// Tags of the items this binder renders.
    fn type_tags(&self) -> &[TypeTag];

    fn create_view(&self, tag: TypeTag, context: &C) -> V;

    fn bind(&self, view: &mut V, item: &I);

    /// Pre-materializes whatever `create_view` needs for `context`.
    fn warm_up(&self, _context: &C) {}
}

pub type CreateViewFn<V, C> = Arc<dyn Fn(&C) -> V>;
pub type BindFn<I, V> = Arc<dyn Fn(&mut V, &I)>;
pub type WarmUpFn<C> = Arc<dyn Fn(&C)>;

/// A [`Binder`] assembled from closures.
pub struct Binding<I, V, C> {
    tags: Vec<TypeTag>,
    create: CreateViewFn<V, C>,
    bind: BindFn<I, V>,
    warm_up: Option<WarmUpFn<C>>,
}

impl<I, V, C> Binding<I, V, C> {
    pub fn new(
        tag: TypeTag,
        create: impl Fn(&C) -> V + 'static,
        bind: impl Fn(&mut V, &I) + 'static,
    ) -> Self {
        Self {
            tags: vec![tag],
            create: Arc::new(create),
            bind: Arc::new(bind),
            warm_up: None,
        }
    }

    /// Renders an additional tag with the same view and bind logic.
    pub fn with_tag(mut self, tag: TypeTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_warm_up(mut self, warm_up: impl Fn(&C) + 'static) -> Self {
        self.warm_up = Some(Arc::new(warm_up));
        self
    }
}

impl<I, V, C> Clone for Binding<I, V, C> {
    fn clone(&self) -> Self {
        Self {
            tags: self.tags.clone(),
            create: Arc::clone(&self.create),
            bind: Arc::clone(&self.bind),
            warm_up: self.warm_up.clone(),
        }
    }
}

impl<I, V, C> Binder<I, V, C> for Binding<I, V, C> {
    fn type_tags(&self) -> &[TypeTag] {
        &self.tags
    }

    fn create_view(&self, _tag: TypeTag, context: &C) -> V {
        (self.create)(context)
    }

    fn bind(&self, view: &mut V, item: &I) {
        (self.bind)(view, item)
    }

    fn warm_up(&self, context: &C) {
        if let Some(f) = &self.warm_up {
            f(context);
        }
    }
}

impl<I, V, C> core::fmt::Debug for Binding<I, V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Binding")
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    tag: TypeTag,
    binder: usize,
}

/// An immutable type tag → binder table.
///
/// Built once; view types are assigned densely in registration order.
pub struct BinderRegistry<I, V, C> {
    binders: Vec<Box<dyn Binder<I, V, C>>>,
    slots: Vec<Slot>,
    by_tag: BTreeMap<TypeTag, ViewType>,
    warmed: bool,
}

impl<I: RecyclerItem, V, C> BinderRegistry<I, V, C> {
    /// Builds the table, rejecting tags claimed by more than one binder.
    pub fn new(
        binders: impl IntoIterator<Item = Box<dyn Binder<I, V, C>>>,
    ) -> Result<Self, RecycliError> {
        let binders: Vec<_> = binders.into_iter().collect();
        let mut slots = Vec::new();
        let mut by_tag = BTreeMap::new();
        for (index, binder) in binders.iter().enumerate() {
            for &tag in binder.type_tags() {
                let view_type = ViewType(slots.len());
                if by_tag.insert(tag, view_type).is_some() {
                    return Err(RecycliError::DuplicateTypeTag { tag });
                }
                slots.push(Slot { tag, binder: index });
            }
        }
        rdebug!(
            binders = binders.len(),
            view_types = slots.len(),
            "BinderRegistry::new"
        );
        Ok(Self {
            binders,
            slots,
            by_tag,
            warmed: false,
        })
    }

    /// Shorthand for registries made only of closure [`Binding`]s.
    pub fn from_bindings(
        bindings: impl IntoIterator<Item = Binding<I, V, C>>,
    ) -> Result<Self, RecycliError>
    where
        V: 'static,
        C: 'static,
    {
        Self::new(
            bindings
                .into_iter()
                .map(|b| Box::new(b) as Box<dyn Binder<I, V, C>>),
        )
    }

    /// Number of registered view types.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn view_type_for_tag(&self, tag: TypeTag) -> Result<ViewType, RecycliError> {
        self.by_tag
            .get(&tag)
            .copied()
            .ok_or(RecycliError::UnregisteredType { tag })
    }

    pub fn resolve_type(&self, item: &I) -> Result<ViewType, RecycliError> {
        self.view_type_for_tag(item.type_tag())
    }

    pub fn tag_of(&self, view_type: ViewType) -> Result<TypeTag, RecycliError> {
        self.slot(view_type).map(|s| s.tag)
    }

    pub fn create_view(&self, view_type: ViewType, context: &C) -> Result<V, RecycliError> {
        let slot = self.slot(view_type)?;
        Ok(self.binders[slot.binder].create_view(slot.tag, context))
    }

    pub fn bind(&self, view: &mut V, item: &I) -> Result<(), RecycliError> {
        let slot = self.slot(self.resolve_type(item)?)?;
        self.binders[slot.binder].bind(view, item);
        Ok(())
    }

    /// Warms every binder for `context`. Only the first call after construction or after
    /// [`BinderRegistry::reset_warm_up`] has an effect.
    pub fn warm_up(&mut self, context: &C) {
        if self.warmed {
            return;
        }
        self.warmed = true;
        for binder in &self.binders {
            binder.warm_up(context);
        }
        rtrace!(binders = self.binders.len(), "BinderRegistry::warm_up");
    }

    /// Arms the next [`BinderRegistry::warm_up`] call, for a new host context.
    pub fn reset_warm_up(&mut self) {
        self.warmed = false;
    }

    pub fn is_warmed(&self) -> bool {
        self.warmed
    }

    fn slot(&self, view_type: ViewType) -> Result<Slot, RecycliError> {
        self.slots
            .get(view_type.0)
            .copied()
            .ok_or(RecycliError::UnknownViewType { view_type })
    }
}

impl<I, V, C> core::fmt::Debug for BinderRegistry<I, V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BinderRegistry")
            .field("view_types", &self.slots)
            .field("warmed", &self.warmed)
            .finish_non_exhaustive()
    }
}
