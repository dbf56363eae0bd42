//! # Category Filter View
//!
//! A [`FilterView`] narrows an ordered list of entities to one category, or shows all of
//! them. It holds exactly one piece of state, the active [`Selection`], which starts as
//! [`Selection::All`] and changes only through [`FilterView::select_category`].
//!
//! The entity list is borrowed for the lifetime of the view and is never reordered or
//! modified. Every selection change recomputes the visible set in one linear pass before
//! returning, so readers never observe a stale set.
//!
//! The control strip ([`FilterView::controls`]) is derived from the category's declared
//! order (`Category::ALL`), never from the data, so a category with no entries is still
//! offered. Exactly one control is active at any time.

use crate::model::{Category, Entity};
use std::fmt;
use std::str::FromStr;

pub const ALL_ID: &str = "all";
pub const ALL_LABEL: &str = "All";

/// The active filter value: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<C> {
    All,
    Only(C),
}

impl<C> Default for Selection<C> {
    fn default() -> Self {
        Selection::All
    }
}

impl<C: Category> Selection<C> {
    /// Every selectable value in control order: `All` first, then the declared categories.
    pub fn options() -> Vec<Self> {
        std::iter::once(Selection::All)
            .chain(C::ALL.iter().copied().map(Selection::Only))
            .collect()
    }

    pub fn id(self) -> &'static str {
        match self {
            Selection::All => ALL_ID,
            Selection::Only(c) => c.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Selection::All => ALL_LABEL,
            Selection::Only(c) => c.label(),
        }
    }

    pub fn matches(self, category: C) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(c) => c == category,
        }
    }
}

impl<C: Category> fmt::Display for Selection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A selection id outside `all` and the category set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSelection {
    pub value: String,
    pub allowed: Vec<&'static str>,
}

impl fmt::Display for UnknownSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown filter `{}` (expected one of: {})",
            self.value,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownSelection {}

impl<C: Category> FromStr for Selection<C> {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_ID {
            return Ok(Selection::All);
        }
        C::from_id(s).map(Selection::Only).ok_or_else(|| UnknownSelection {
            value: s.to_string(),
            allowed: Selection::<C>::options().into_iter().map(|o| o.id()).collect(),
        })
    }
}

/// One entry of the control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control<C> {
    pub selection: Selection<C>,
    pub active: bool,
}

impl<C: Category> Control<C> {
    pub fn id(&self) -> &'static str {
        self.selection.id()
    }

    pub fn label(&self) -> &'static str {
        self.selection.label()
    }
}

/// Filtered view over a borrowed, ordered entity list.
#[derive(Debug, Clone)]
pub struct FilterView<'a, E: Entity> {
    entities: &'a [E],
    selection: Selection<E::Category>,
    // indexes into `entities`, ascending
    visible: Vec<usize>,
}

impl<'a, E: Entity> FilterView<'a, E> {
    /// Creates a view showing every entity.
    pub fn new(entities: &'a [E]) -> Self {
        Self {
            entities,
            selection: Selection::All,
            visible: (0..entities.len()).collect(),
        }
    }

    /// Replaces the selection and recomputes the visible set.
    ///
    /// Selecting the active value again yields the same visible set.
    pub fn select_category(&mut self, selection: Selection<E::Category>) {
        self.selection = selection;
        self.visible = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| selection.matches(e.category()))
            .map(|(i, _)| i)
            .collect();
    }

    /// Builder form of [`select_category`](Self::select_category).
    pub fn selected(mut self, selection: Selection<E::Category>) -> Self {
        self.select_category(selection);
        self
    }

    pub fn current_selection(&self) -> Selection<E::Category> {
        self.selection
    }

    /// Entities matching the selection, in their original relative order.
    pub fn visible_entities(&self) -> Vec<&'a E> {
        self.visible.iter().map(|&i| &self.entities[i]).collect()
    }

    /// True when nothing matches; the placeholder replaces the card grid.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The full entity list the view was built from.
    pub fn entities(&self) -> &'a [E] {
        self.entities
    }

    /// The control strip in declared order, exactly one of them active.
    pub fn controls(&self) -> Vec<Control<E::Category>> {
        Selection::options()
            .into_iter()
            .map(|selection| Control {
                selection,
                active: selection == self.selection,
            })
            .collect()
    }
}
