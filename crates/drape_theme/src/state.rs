//! Active theme state
//!
//! [`ThemeContext`] holds the active (design language, mode) selection and the
//! theme resolved for it. Every change re-resolves and publishes a new
//! `Arc<Theme>` in a single swap, so a reader sees either the old theme or the
//! new one. A failed change leaves the published theme untouched.
//!
//! Contexts are plain values and can be created per scope (a preview pane, a
//! test). [`ThemeContext::init_global`] installs one for the whole process.

use crate::error::Result;
use crate::language::{DesignLanguage, Mode};
use crate::overrides::ThemeOverrides;
use crate::registry::TokenRegistry;
use crate::theme::Theme;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, TryLockError};
use tracing::{debug, warn};

/// Process-wide context, if one was installed
static THEME_CONTEXT: OnceLock<ThemeContext> = OnceLock::new();

new_key_type! {
    /// Handle returned by [`ThemeContext::subscribe`]
    pub struct SubscriptionId;
}

/// Called with the newly published theme
pub type ThemeListener = Arc<dyn Fn(&Arc<Theme>) + Send + Sync>;

/// A published theme and its position in the publish order
struct Published {
    generation: u64,
    theme: Arc<Theme>,
}

pub struct ThemeContext {
    registry: Arc<TokenRegistry>,

    /// The published theme; only ever replaced whole
    active: RwLock<Published>,

    /// Serializes resolve-then-publish so concurrent updates cannot interleave
    update: Mutex<()>,

    listeners: Mutex<SlotMap<SubscriptionId, ThemeListener>>,

    /// Generation last handed to listeners; held while notifying
    delivered: Mutex<u64>,
}

impl ThemeContext {
    /// Resolve the initial selection; fails if it cannot be resolved
    pub fn new(
        registry: Arc<TokenRegistry>,
        language: impl Into<DesignLanguage>,
        mode: Mode,
    ) -> Result<Self> {
        let language = language.into();
        let theme = registry.resolve(&language, mode, None)?;
        debug!("theme context starting with `{}` ({})", language, mode);
        Ok(Self {
            registry,
            active: RwLock::new(Published {
                generation: 0,
                theme: Arc::new(theme),
            }),
            update: Mutex::new(()),
            listeners: Mutex::new(SlotMap::with_key()),
            delivered: Mutex::new(0),
        })
    }

    /// Install `context` as the process-wide context.
    ///
    /// The first call wins; later calls return the context already installed.
    pub fn init_global(context: ThemeContext) -> &'static ThemeContext {
        let mut installed = false;
        let global = THEME_CONTEXT.get_or_init(|| {
            installed = true;
            context
        });
        if !installed {
            warn!("global theme context already initialized, keeping the existing one");
        }
        global
    }

    /// The process-wide context (panics if not initialized)
    pub fn global() -> &'static ThemeContext {
        THEME_CONTEXT
            .get()
            .expect("ThemeContext not initialized. Call ThemeContext::init_global() at app startup.")
    }

    /// The process-wide context (returns None if not initialized)
    pub fn try_global() -> Option<&'static ThemeContext> {
        THEME_CONTEXT.get()
    }

    pub fn registry(&self) -> &Arc<TokenRegistry> {
        &self.registry
    }

    /// The currently published theme
    pub fn active_theme(&self) -> Arc<Theme> {
        self.published().1
    }

    fn published(&self) -> (u64, Arc<Theme>) {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        (active.generation, Arc::clone(&active.theme))
    }

    pub fn design_language(&self) -> DesignLanguage {
        self.active_theme().design_language().clone()
    }

    pub fn mode(&self) -> Mode {
        self.active_theme().mode()
    }

    /// Switch design language, keeping the active mode
    pub fn set_design_language(&self, language: impl Into<DesignLanguage>) -> Result<()> {
        let language = language.into();
        self.update(|current| (language, current.mode()))
    }

    /// Switch mode, keeping the active design language.
    ///
    /// Fails when the language has no table for `mode` or when one of its
    /// references does not resolve in that mode.
    pub fn set_mode(&self, mode: Mode) -> Result<()> {
        self.update(|current| (current.design_language().clone(), mode))
    }

    /// Flip between light and dark; returns the new mode
    pub fn toggle_mode(&self) -> Result<Mode> {
        let mut next = Mode::default();
        self.update(|current| {
            next = current.mode().toggle();
            (current.design_language().clone(), next)
        })?;
        Ok(next)
    }

    /// Change language and mode with a single re-resolve
    pub fn select(&self, language: impl Into<DesignLanguage>, mode: Mode) -> Result<()> {
        let language = language.into();
        self.update(|_| (language, mode))
    }

    /// Resolve `language` in the active mode without touching the context
    pub fn resolve_for(&self, language: &DesignLanguage) -> Result<Theme> {
        self.registry.resolve(language, self.mode(), None)
    }

    /// Resolve the active selection with `overrides` without touching the context
    pub fn resolve_with_overrides(&self, overrides: &ThemeOverrides) -> Result<Theme> {
        let active = self.active_theme();
        self.registry
            .resolve(active.design_language(), active.mode(), Some(overrides))
    }

    /// Call `listener` after every published change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Arc<Theme>) + Send + Sync + 'static,
    {
        self.listeners().insert(Arc::new(listener))
    }

    /// Stop notifying a listener; returns false if it was already removed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners().remove(id).is_some()
    }

    fn listeners(&self) -> MutexGuard<'_, SlotMap<SubscriptionId, ThemeListener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve the selection chosen by `select` from the active theme and
    /// publish it
    fn update(&self, select: impl FnOnce(&Theme) -> (DesignLanguage, Mode)) -> Result<()> {
        let guard = self.update.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.active_theme();
        let (language, mode) = select(&current);
        if *current.design_language() == language && current.mode() == mode {
            return Ok(());
        }

        let theme = match self.registry.resolve(&language, mode, None) {
            Ok(theme) => Arc::new(theme),
            Err(err) => {
                warn!(
                    "keeping `{}` ({}): {}",
                    current.design_language(),
                    current.mode(),
                    err
                );
                return Err(err);
            }
        };

        {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            active.generation += 1;
            active.theme = theme;
        }
        debug!(
            "published theme `{}` ({}), was `{}` ({})",
            language,
            mode,
            current.design_language(),
            current.mode()
        );

        drop(guard);
        self.notify();
        Ok(())
    }

    /// Hand the newest published theme to every listener.
    ///
    /// One thread notifies at a time. A publish that lands while another
    /// thread is notifying is picked up by that thread once its round ends, so
    /// the last theme a listener sees is always the published one. Listeners
    /// may skip intermediate themes but never receive an older theme after a
    /// newer one. Listeners that update the context re-enter here and return
    /// at once.
    fn notify(&self) {
        loop {
            let mut delivered = match self.delivered.try_lock() {
                Ok(delivered) => delivered,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            let (generation, theme) = self.published();
            if generation <= *delivered {
                return;
            }
            *delivered = generation;

            let listeners: Vec<ThemeListener> = self.listeners().values().cloned().collect();
            for listener in listeners {
                listener(&theme);
            }
            drop(delivered);

            if self.published().0 == generation {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentTokens;
    use crate::semantic::tests::sample_semantic;
    use crate::tokens::Color;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    fn registry() -> Arc<TokenRegistry> {
        let mut registry = TokenRegistry::new();
        for (language, light, dark) in [
            ("alpha", Color::WHITE, Color::BLACK),
            ("beta", Color::from_hex(0xEEEEEE), Color::from_hex(0x222222)),
        ] {
            registry.install_semantic(language, Mode::Light, sample_semantic(light));
            registry.install_semantic(language, Mode::Dark, sample_semantic(dark));
            registry.install_components(language, ComponentTokens::new());
        }
        registry.install_semantic("lightOnly", Mode::Light, sample_semantic(Color::WHITE));
        registry.install_components("lightOnly", ComponentTokens::new());
        Arc::new(registry)
    }

    #[test]
    fn set_mode_publishes_the_matching_semantic_set() {
        let context = ThemeContext::new(registry(), "alpha", Mode::Light).unwrap();
        context.set_mode(Mode::Dark).unwrap();

        let theme = context.active_theme();
        assert_eq!(theme.mode(), Mode::Dark);
        assert_eq!(theme.semantic().color("surface.elevated"), Some(Color::BLACK));
    }

    #[test]
    fn failed_updates_keep_the_previous_theme() {
        let context = ThemeContext::new(registry(), "alpha", Mode::Light).unwrap();
        let before = context.active_theme();

        assert!(context.set_design_language("doesNotExist").is_err());
        assert!(Arc::ptr_eq(&before, &context.active_theme()));

        context.set_design_language("lightOnly").unwrap();
        assert!(context.set_mode(Mode::Dark).is_err());
        assert_eq!(context.mode(), Mode::Light);
        assert_eq!(context.design_language().as_str(), "lightOnly");
    }

    #[test]
    fn per_call_resolution_does_not_touch_the_context() {
        let context = ThemeContext::new(registry(), "alpha", Mode::Dark).unwrap();
        let before = context.active_theme();

        let beta = context.resolve_for(&"beta".into()).unwrap();
        assert_eq!(beta.mode(), Mode::Dark);
        assert_eq!(beta.design_language().as_str(), "beta");

        let overrides = ThemeOverrides::new().semantic("spacing.component.gap", 4.0);
        let themed = context.resolve_with_overrides(&overrides).unwrap();
        assert_eq!(themed.semantic().spacing("component.gap"), Some(4.0));

        assert!(Arc::ptr_eq(&before, &context.active_theme()));
    }

    #[test]
    fn listeners_see_each_published_theme() {
        let context = ThemeContext::new(registry(), "alpha", Mode::Light).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = context.subscribe(move |theme| {
            assert_eq!(theme.mode(), Mode::Dark);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(context.toggle_mode().unwrap(), Mode::Dark);
        // unchanged selection publishes nothing
        context.set_mode(Mode::Dark).unwrap();
        // failed updates publish nothing
        assert!(context.set_design_language("missing").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(context.unsubscribe(id));
        assert!(!context.unsubscribe(id));
        context.select("beta", Mode::Dark).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn readers_never_see_a_mixed_theme() {
        let context = Arc::new(ThemeContext::new(registry(), "alpha", Mode::Light).unwrap());

        let reader = {
            let context = Arc::clone(&context);
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    let theme = context.active_theme();
                    let expected = match theme.mode() {
                        Mode::Light => Color::WHITE,
                        Mode::Dark => Color::BLACK,
                    };
                    assert_eq!(theme.semantic().color("surface.elevated"), Some(expected));
                }
            })
        };
        for _ in 0..200 {
            context.toggle_mode().unwrap();
        }
        reader.join().unwrap();
    }

    #[test]
    fn listeners_end_on_the_published_theme_when_updates_overlap() {
        let context = Arc::new(ThemeContext::new(registry(), "alpha", Mode::Light).unwrap());

        // First listener stalls the first notification until the second update
        // has been published.
        let (entered_tx, entered_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel::<()>();
        let gate = Mutex::new(Some((entered_tx, resume_rx)));
        context.subscribe(move |_| {
            let gate = gate.lock().unwrap().take();
            if let Some((entered, resume)) = gate {
                entered.send(()).unwrap();
                resume.recv().unwrap();
            }
        });

        let last_seen = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&last_seen);
        context.subscribe(move |theme| seen.lock().unwrap().push(theme.mode()));

        let to_dark = {
            let context = Arc::clone(&context);
            std::thread::spawn(move || context.set_mode(Mode::Dark).unwrap())
        };
        entered_rx.recv().unwrap();
        context.set_mode(Mode::Light).unwrap();
        resume_tx.send(()).unwrap();
        to_dark.join().unwrap();

        assert_eq!(context.mode(), Mode::Light);
        assert_eq!(*last_seen.lock().unwrap(), vec![Mode::Dark, Mode::Light]);
    }

    #[test]
    fn listeners_may_update_the_context() {
        let context = Arc::new(ThemeContext::new(registry(), "alpha", Mode::Light).unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&context);
        let log = Arc::clone(&seen);
        context.subscribe(move |theme| {
            log.lock().unwrap().push(theme.design_language().as_str().to_string());
            if theme.design_language().as_str() == "alpha" {
                if let Some(context) = weak.upgrade() {
                    context.set_design_language("beta").unwrap();
                }
            }
        });

        context.set_mode(Mode::Dark).unwrap();
        assert_eq!(context.design_language().as_str(), "beta");
        assert_eq!(*seen.lock().unwrap(), vec!["alpha", "beta"]);
    }
}
