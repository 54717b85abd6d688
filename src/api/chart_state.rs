use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::Orientation;
use crate::error::ChartResult;
use crate::import::ImportedRecord;
use crate::render::RenderFrame;

use super::validation::validate_style;
use super::{DataItem, ItemId, StyleConfig, build_render_frame, palette_color};

/// Largest item id accepted from storage; bigger ids are reassigned on load.
pub const MAX_ITEM_ID: u64 = 1 << 53;

/// Root editor model: ordered items plus global style.
///
/// Items are only ever replaced as whole values, and the list never becomes
/// empty. `focus` is a host-side intent (which item an editor should scroll to)
/// and is ignored by layout and persistence.
///
/// Deserialization goes through [`ChartState::from_parts`], so payloads with an
/// empty item list, duplicate ids or a stale `next_id` are normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChartStateRepr")]
pub struct ChartState {
    items: Vec<DataItem>,
    style: StyleConfig,
    next_id: u64,
    #[serde(skip)]
    focus: Option<ItemId>,
}

/// Wire shape of [`ChartState`] before normalization.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ChartStateRepr {
    items: Vec<DataItem>,
    style: StyleConfig,
    next_id: u64,
}

impl From<ChartStateRepr> for ChartState {
    fn from(repr: ChartStateRepr) -> Self {
        let mut state = Self::from_parts(repr.items, repr.style);
        state.set_next_id(repr.next_id);
        state
    }
}

impl Default for ChartState {
    fn default() -> Self {
        let mut state = Self {
            items: Vec::new(),
            style: StyleConfig::default(),
            next_id: 1,
            focus: None,
        };
        for (label, value) in [("Alpha", 12.0), ("Beta", 19.0), ("Gamma", 7.0)] {
            let item = state.create_item(label, value);
            state.items.push(item);
        }
        state
    }
}

impl ChartState {
    /// Builds a state from existing items. Falls back to the default items when
    /// `items` is empty; duplicate ids are reassigned.
    #[must_use]
    pub fn from_parts(items: Vec<DataItem>, style: StyleConfig) -> Self {
        let mut state = Self {
            items: Vec::new(),
            style,
            next_id: 1,
            focus: None,
        };
        state.adopt_items(items);
        state
    }

    #[must_use]
    pub fn items(&self) -> &[DataItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&DataItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    #[must_use]
    pub fn focus(&self) -> Option<ItemId> {
        self.focus
    }

    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Factory: fresh id, palette fill cycled by creation order, global opacity
    /// and border width. The item is not inserted.
    pub fn create_item(&mut self, label: impl Into<String>, value: f64) -> DataItem {
        let id = self.allocate_id();
        let palette_index = usize::try_from(id.0.saturating_sub(1)).unwrap_or(0);
        DataItem {
            opacity: self.style.opacity,
            border_width: self.style.border_width,
            border_color: self.style.border_color.clone(),
            ..DataItem::new(id, label, value).with_fill(palette_color(palette_index))
        }
    }

    /// Appends a new item and focuses it.
    pub fn add_item(&mut self) -> ItemId {
        let label = format!("Item {}", self.items.len() + 1);
        let item = self.create_item(label, 10.0);
        let id = item.id;
        self.items.push(item);
        self.focus = Some(id);
        debug!(item_id = %id, item_count = self.items.len(), "added item");
        id
    }

    /// Inserts a copy of `id` right after it under a fresh id.
    pub fn duplicate_item(&mut self, id: ItemId) -> Option<ItemId> {
        let index = self.index_of(id)?;
        let new_id = self.allocate_id();
        let copy = DataItem {
            id: new_id,
            ..self.items[index].clone()
        };
        self.items.insert(index + 1, copy);
        self.focus = Some(new_id);
        debug!(source_id = %id, item_id = %new_id, "duplicated item");
        Some(new_id)
    }

    /// Copy-on-write update: `update` receives the current value and returns its
    /// replacement. The id is preserved whatever the closure returns.
    pub fn update_item<F>(&mut self, id: ItemId, update: F) -> bool
    where
        F: FnOnce(&DataItem) -> DataItem,
    {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let replacement = update(&self.items[index]);
        self.items[index] = DataItem { id, ..replacement };
        trace!(item_id = %id, "updated item");
        true
    }

    /// Replaces the item carrying `item.id`.
    pub fn replace_item(&mut self, item: DataItem) -> bool {
        let id = item.id;
        self.update_item(id, move |_| item)
    }

    /// Removes `id`. Removing the last remaining item is rejected.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if self.items.len() <= 1 {
            warn!(item_id = %id, "refusing to remove the last item");
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.items.remove(index);
        if self.focus == Some(id) {
            self.focus = None;
        }
        debug!(item_id = %id, item_count = self.items.len(), "removed item");
        true
    }

    /// Moves `id` to `to_index` (clamped to the list), keeping the others in order.
    pub fn move_item(&mut self, id: ItemId, to_index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let to = to_index.min(self.items.len() - 1);
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            debug!(item_id = %id, from, to, "moved item");
        }
        true
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.style.orientation != orientation {
            self.style.set_orientation(orientation);
            debug!(?orientation, "switched orientation");
        }
    }

    /// Replaces the style after strict validation.
    pub fn set_style(&mut self, style: StyleConfig) -> ChartResult<()> {
        self.style = validate_style(style)?;
        Ok(())
    }

    pub fn set_focus(&mut self, focus: Option<ItemId>) {
        self.focus = focus.filter(|id| self.index_of(*id).is_some());
    }

    /// Replaces every item with the imported records.
    ///
    /// Records with a group share one palette color per group, in first-seen
    /// order; ungrouped records cycle the palette by row. An empty import is a
    /// no-op so the item list never empties.
    pub fn apply_import(&mut self, records: &[ImportedRecord]) -> Vec<ItemId> {
        if records.is_empty() {
            warn!("ignoring empty import");
            return Vec::new();
        }

        let mut group_colors: IndexMap<&str, usize> = IndexMap::new();
        let mut items = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let color_index = match record.group.as_deref() {
                Some(group) => {
                    let next = group_colors.len();
                    *group_colors.entry(group).or_insert(next)
                }
                None => row,
            };
            let mut item = self.create_item(record.label.clone(), record.value);
            item.error = record.error.abs();
            item.fill_color = palette_color(color_index).to_owned();
            items.push(item);
        }

        let ids = items.iter().map(|item| item.id).collect();
        self.items = items;
        self.focus = None;
        debug!(
            item_count = self.items.len(),
            group_count = group_colors.len(),
            "applied import"
        );
        ids
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_render_frame(self)
    }

    /// Takes `items` as the item list. Zero, out-of-range and duplicate ids get
    /// fresh ones; an empty list falls back to the default items.
    pub(crate) fn adopt_items(&mut self, items: Vec<DataItem>) {
        let usable = |id: ItemId| id.0 != 0 && id.0 <= MAX_ITEM_ID;
        let mut next_id = items
            .iter()
            .map(|item| item.id)
            .filter(|id| usable(*id))
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(1)
            .max(self.next_id)
            .max(1);
        let mut seen = std::collections::HashSet::new();
        self.items = items
            .into_iter()
            .map(|mut item| {
                if !usable(item.id) || !seen.insert(item.id) {
                    debug!(item_id = %item.id, new_id = next_id, "reassigning item id");
                    item.id = ItemId(next_id);
                    seen.insert(item.id);
                    next_id = next_id.saturating_add(1);
                }
                item
            })
            .collect();
        self.next_id = next_id;
        if self.items.is_empty() {
            let defaults = Self::default();
            self.next_id = self.next_id.max(defaults.next_id);
            self.items = defaults.items;
        }
    }

    /// Raises the id counter; values past [`MAX_ITEM_ID`] are capped.
    pub(crate) fn set_next_id(&mut self, next_id: u64) {
        self.next_id = self.next_id.max(next_id.min(MAX_ITEM_ID + 1));
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}
