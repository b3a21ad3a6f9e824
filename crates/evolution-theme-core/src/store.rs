//! The theme store: one active theme key, persisted and reflected.
//!
//! A [`ThemeStore`] owns the active [`ThemeKey`] for one provider. On
//! construction it reads the persisted key (falling back to the configured
//! default) and reflects it onto the presentation surface. Every
//! [`set_theme`](ThemeStore::set_theme) then:
//!
//! 1. rejects blank keys with [`ThemeError::EmptyKey`],
//! 2. commits the key in memory,
//! 3. writes it through to persistence (failures are logged, never raised),
//! 4. reflects it onto the surface if it differs from the previous key,
//! 5. notifies subscribers if it differs from the previous key.
//!
//! The store is a handle: clones share the same state, which is how the
//! selector and navbar components receive it.
//!
//! ```rust
//! use evolution_theme_core::{DocumentRoot, MemoryStorage, PresentationSurface, ThemeStore};
//!
//! let root = DocumentRoot::new();
//! let store = ThemeStore::builder()
//!     .default_theme("dark")
//!     .storage(MemoryStorage::new())
//!     .surface(root.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.theme(), "dark");
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("dark"));
//!
//! store.set_theme("forest").unwrap();
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("forest"));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::{DefaultTheme, StoreConfig};
use crate::error::ThemeError;
use crate::key::ThemeKey;
use crate::storage::{JsonFileStorage, MemoryStorage, Persistence};
use crate::surface::{DocumentRoot, PresentationSurface};

/// Reads the initial theme for a store.
///
/// Returns the value persisted under `storage_key` when it is present and
/// non-blank, otherwise `default`. A failing backend is treated as empty.
pub fn initial_theme(default: &ThemeKey, storage_key: &str, storage: &dyn Persistence) -> ThemeKey {
    match storage.get(storage_key) {
        Ok(Some(stored)) => match ThemeKey::new(stored) {
            Ok(key) => key,
            Err(_) => default.clone(),
        },
        Ok(None) => default.clone(),
        Err(err) => {
            tracing::warn!(
                storage_key,
                error = %err,
                "theme storage unreadable, using default theme"
            );
            default.clone()
        }
    }
}

/// Identifies a listener registered with [`ThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&ThemeKey)>;

struct Inner {
    config: StoreConfig,
    default_key: ThemeKey,
    active: RefCell<ThemeKey>,
    storage: Box<dyn Persistence>,
    surface: Box<dyn PresentationSurface>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_listener: Cell<u64>,
}

/// Shared handle to one provider's theme state.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<Inner>,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &*self.inner.active.borrow())
            .field("storage_key", &self.inner.config.storage_key)
            .field("attribute", &self.inner.config.attribute)
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Creates a store, reads its initial theme and reflects it onto `surface`.
    pub fn new<P, S>(config: StoreConfig, storage: P, surface: S) -> Self
    where
        P: Persistence + 'static,
        S: PresentationSurface + 'static,
    {
        let default_key = config.default_theme.resolve();
        let initial = initial_theme(&default_key, &config.storage_key, &storage);
        tracing::debug!(
            theme = %initial,
            storage_key = %config.storage_key,
            "theme store initialized"
        );

        let store = Self {
            inner: Rc::new(Inner {
                config,
                default_key,
                active: RefCell::new(initial),
                storage: Box::new(storage),
                surface: Box::new(surface),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        };
        store.apply();
        store
    }

    /// Starts building a store with default configuration, in-memory storage
    /// and an in-memory document root.
    pub fn builder() -> ThemeStoreBuilder {
        ThemeStoreBuilder::default()
    }

    /// Returns the active theme key.
    pub fn theme(&self) -> ThemeKey {
        self.inner.active.borrow().clone()
    }

    /// Returns true if `key` is the active theme.
    pub fn is_active(&self, key: &str) -> bool {
        self.inner.active.borrow().as_str() == key
    }

    /// Makes `key` the active theme.
    ///
    /// Blank keys are rejected and leave the store untouched. Setting the
    /// already-active key still writes it through to persistence but does
    /// not touch the surface or notify subscribers.
    pub fn set_theme(&self, key: &str) -> Result<(), ThemeError> {
        let key = ThemeKey::new(key)?;
        let changed = {
            let mut active = self.inner.active.borrow_mut();
            let changed = *active != key;
            *active = key.clone();
            changed
        };

        if let Err(err) = self.inner.storage.set(&self.inner.config.storage_key, key.as_str()) {
            tracing::warn!(
                theme = %key,
                storage_key = %self.inner.config.storage_key,
                error = %err,
                "failed to persist theme"
            );
        }

        if changed {
            tracing::debug!(theme = %key, "theme changed");
            self.apply();
            self.notify(&key);
        }
        Ok(())
    }

    /// Reflects the active theme onto the presentation surface.
    ///
    /// The attribute is only written when it does not already hold the
    /// active key. Returns whether a write happened.
    pub fn apply(&self) -> bool {
        let active = self.theme();
        let attribute = &self.inner.config.attribute;
        if self.inner.surface.attribute(attribute).as_deref() == Some(active.as_str()) {
            return false;
        }
        tracing::debug!(theme = %active, attribute = %attribute, "applying theme to surface");
        self.inner.surface.set_attribute(attribute, active.as_str());
        true
    }

    /// Registers a listener called after every committed theme change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ThemeKey) + 'static,
    {
        let id = SubscriptionId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// The key the theme is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.inner.config.storage_key
    }

    /// The root attribute the theme is reflected onto.
    pub fn attribute(&self) -> &str {
        &self.inner.config.attribute
    }

    /// The default theme, as resolved when the store was created.
    pub fn default_theme(&self) -> &ThemeKey {
        &self.inner.default_key
    }

    /// The store's configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    fn notify(&self, key: &ThemeKey) {
        // Listeners may call back into the store.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(key);
        }
    }
}

/// Builder for [`ThemeStore`].
#[derive(Default)]
pub struct ThemeStoreBuilder {
    config: StoreConfig,
    default_theme: Option<String>,
    storage: Option<Box<dyn Persistence>>,
    surface: Option<Box<dyn PresentationSurface>>,
}

impl ThemeStoreBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets a fixed default theme. Validated in [`build`](Self::build).
    pub fn default_theme(mut self, key: impl Into<String>) -> Self {
        self.default_theme = Some(key.into());
        self
    }

    /// Sets the persistence key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Sets the root attribute name.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.config.attribute = name.into();
        self
    }

    /// Sets the persistence backend, overriding any configured
    /// `storage_file`.
    pub fn storage<P: Persistence + 'static>(mut self, storage: P) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Sets the presentation surface.
    pub fn surface<S: PresentationSurface + 'static>(mut self, surface: S) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Builds the store.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::EmptyKey`] if a blank default theme was given.
    pub fn build(self) -> Result<ThemeStore, ThemeError> {
        let mut config = self.config;
        if let Some(default) = self.default_theme {
            config.default_theme = DefaultTheme::Fixed(ThemeKey::new(default)?);
        }
        let storage: Box<dyn Persistence> = match (self.storage, &config.storage_file) {
            (Some(storage), _) => storage,
            (None, Some(file)) => Box::new(JsonFileStorage::new(file)),
            (None, None) => Box::new(MemoryStorage::new()),
        };
        let surface = self
            .surface
            .unwrap_or_else(|| Box::new(DocumentRoot::new()));
        Ok(ThemeStore::new(config, storage, surface))
    }
}
