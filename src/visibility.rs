//! Session-scoped visibility of the group selection panel.
//!
//! The flag lives in session storage so it survives a reload within the same
//! session, and changes are pushed to explicit subscribers so sibling UI
//! regions react without polling.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

use tracing::debug;

use crate::error::LayoutError;
use crate::store::{KeyValueStore, SETTINGS_VISIBLE_KEY};

/// Handle returned by [`SettingsVisibility::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(bool)>;

pub struct SettingsVisibility<S: KeyValueStore> {
    session: S,
    visible: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: KeyValueStore> SettingsVisibility<S> {
    /// Restore the flag from `session`; anything but `"true"` means hidden.
    #[must_use]
    pub fn load(session: S) -> Self {
        let visible = session.get(SETTINGS_VISIBLE_KEY).as_deref() == Some("true");
        Self { session, visible, listeners: Vec::new(), next_id: 0 }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the flag, persist it, and notify subscribers if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write; the in-memory
    /// flag is left unchanged in that case.
    pub fn set(&mut self, visible: bool) -> Result<(), LayoutError> {
        if visible == self.visible {
            return Ok(());
        }
        self.session.set(SETTINGS_VISIBLE_KEY, visible.to_string())?;
        self.visible = visible;
        debug!(visible, listeners = self.listeners.len(), "settings visibility changed");
        for (_, listener) in &mut self.listeners {
            listener(visible);
        }
        Ok(())
    }

    /// Flip the flag. Returns the new value.
    ///
    /// # Errors
    ///
    /// See [`Self::set`].
    pub fn toggle(&mut self) -> Result<bool, LayoutError> {
        self.set(!self.visible)?;
        Ok(self.visible)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(bool) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn session(&self) -> &S {
        &self.session
    }
}
