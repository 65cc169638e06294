//! Dashboard: selected cards, their hex grids, and the layout editor.
//!
//! DESIGN
//! ======
//! `Dashboard` is the single owner of layout state on the UI thread. It
//! routes container-resize notifications to the right packer, item refreshes
//! to the cards they belong to, and pointer events to the editor. It is also
//! the only writer of the persisted card layout: on submit (fresh flow) and
//! on save.
//!
//! Container resizes never re-flow card positions; the new width only
//! bounds future resizes and flows. Refreshes replace status items and
//! re-pack grids but leave card geometry alone.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::card::{CardId, CardSpec, LayoutSnapshot, effective_container_width, layout};
use crate::editor::{Action, LayoutEditor};
use crate::error::LayoutError;
use crate::geom::{Point, Rect};
use crate::hex::{HexGrid, HexLayout};
use crate::hover::{HoverTransform, Magnifier};
use crate::input::EditMode;
use crate::store::{KeyValueStore, load_stored_layout, save_snapshot};
use crate::visibility::SettingsVisibility;

/// Per-card view state: the spec, its packer, and its hover state.
#[derive(Debug, Clone)]
pub struct CardView {
    pub spec: CardSpec,
    pub grid: HexGrid,
    pub magnifier: Magnifier,
}

pub struct Dashboard<S: KeyValueStore> {
    store: S,
    cards: Vec<CardView>,
    index: HashMap<CardId, usize>,
    editor: LayoutEditor,
    container_width: f64,
    hover_scale: f64,
}

impl<S: KeyValueStore> Dashboard<S> {
    #[must_use]
    pub fn new(store: S, container_width: f64, hover_scale: f64) -> Self {
        let container_width = effective_container_width(Some(container_width));
        Self {
            store,
            cards: Vec::new(),
            index: HashMap::new(),
            editor: LayoutEditor::new(container_width),
            container_width,
            hover_scale,
        }
    }

    // --- Card set ---

    /// Show `cards`, restoring sizes and positions from the stored layout.
    pub fn restore(&mut self, cards: Vec<CardSpec>) {
        let stored = load_stored_layout(&self.store);
        let snapshot = layout(&cards, self.container_width, stored.as_ref());
        self.install(cards, snapshot);
    }

    /// Show a newly submitted selection with a fresh default flow and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout cannot be written to the store.
    pub fn submit(&mut self, cards: Vec<CardSpec>) -> Result<(), LayoutError> {
        let snapshot = layout(&cards, self.container_width, None);
        save_snapshot(&mut self.store, &snapshot)?;
        self.install(cards, snapshot);
        Ok(())
    }

    /// Submit from the selection panel: show `cards` as [`Self::submit`]
    /// does, then hide the panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout or the panel flag cannot be persisted.
    /// The panel stays open when the layout write fails.
    pub fn submit_from_panel<P: KeyValueStore>(
        &mut self,
        cards: Vec<CardSpec>,
        panel: &mut SettingsVisibility<P>,
    ) -> Result<(), LayoutError> {
        self.submit(cards)?;
        panel.set(false)
    }

    fn install(&mut self, cards: Vec<CardSpec>, snapshot: LayoutSnapshot) {
        let order: Vec<CardId> = cards.iter().map(|c| c.id.clone()).collect();
        self.index = order.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();
        self.cards = cards
            .into_iter()
            .map(|spec| CardView {
                grid: HexGrid::new(spec.items.clone()),
                magnifier: Magnifier::new(self.hover_scale),
                spec,
            })
            .collect();
        info!(cards = self.cards.len(), container_width = self.container_width, "dashboard cards installed");
        self.editor.reset(snapshot, order);
    }

    /// Replace status items of known cards. Unknown ids are ignored.
    /// Returns the number of cards updated.
    pub fn apply_refresh(&mut self, batch: Vec<CardSpec>) -> usize {
        let mut updated = 0;
        for incoming in batch {
            let Some(&i) = self.index.get(&incoming.id) else {
                debug!(card_id = %incoming.id, "refresh for unselected card ignored");
                continue;
            };
            let view = &mut self.cards[i];
            view.grid.set_items(incoming.items.clone());
            view.spec.items = incoming.items;
            view.spec.item_count_hint = incoming.item_count_hint;
            updated += 1;
        }
        debug!(updated, "item refresh applied");
        updated
    }

    // --- Resize notifications ---

    /// The card container was resized.
    pub fn observe_container_resize(&mut self, width: f64) {
        self.container_width = effective_container_width(Some(width));
        self.editor.set_container_width(self.container_width);
    }

    /// A card's grid area was resized; re-pack its cells.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCard` if `id` is not shown.
    pub fn observe_grid_resize(&mut self, id: &str, width: f64, height: f64) -> Result<&HexLayout, LayoutError> {
        let view = self.view_mut(id)?;
        Ok(view.grid.observe_resize(width, height))
    }

    // --- Hover ---

    /// # Errors
    ///
    /// Returns `UnknownCard` if `card_id` is not shown.
    pub fn hover_enter(
        &mut self,
        card_id: &str,
        cell_id: &str,
        cell: Rect,
        container: Rect,
    ) -> Result<HoverTransform, LayoutError> {
        Ok(self.view_mut(card_id)?.magnifier.enter(cell_id, cell, container))
    }

    /// # Errors
    ///
    /// Returns `UnknownCard` if `card_id` is not shown.
    pub fn hover_exit(&mut self, card_id: &str, cell_id: &str) -> Result<HoverTransform, LayoutError> {
        Ok(self.view_mut(card_id)?.magnifier.exit(cell_id))
    }

    // --- Edit mode ---

    pub fn begin_edit(&mut self) -> Vec<Action> {
        self.editor.begin_edit()
    }

    /// Commit the edited layout and persist it.
    ///
    /// # Errors
    ///
    /// Returns `NotEditing` outside edit mode, or a store error if the write fails.
    pub fn save(&mut self) -> Result<Vec<Action>, LayoutError> {
        let actions = self.editor.save()?;
        save_snapshot(&mut self.store, self.editor.persisted())?;
        Ok(actions)
    }

    /// Discard edits and reload the last persisted layout.
    ///
    /// # Errors
    ///
    /// Returns `NotEditing` outside edit mode.
    pub fn cancel(&mut self) -> Result<Vec<Action>, LayoutError> {
        let reloaded = load_stored_layout(&self.store).map(|stored| {
            let specs: Vec<CardSpec> = self.cards.iter().map(|v| v.spec.clone()).collect();
            layout(&specs, self.container_width, Some(&stored))
        });
        self.editor.cancel(reloaded)
    }

    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        self.editor.on_pointer_down(pt)
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.editor.on_pointer_move(pt)
    }

    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        self.editor.on_pointer_up(pt)
    }

    // --- Queries ---

    #[must_use]
    pub fn layout(&self) -> &LayoutSnapshot {
        self.editor.layout()
    }

    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.editor.mode()
    }

    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&CardView> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn view_mut(&mut self, id: &str) -> Result<&mut CardView, LayoutError> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.cards[i]),
            None => Err(LayoutError::UnknownCard(id.to_owned())),
        }
    }
}
