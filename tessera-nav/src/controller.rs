//! The navigation controller.
//!
//! [`NavController`] owns the [`BackStack`] and is the only writer to it.
//! Each successful [`NavController::navigate`] or
//! [`NavController::pop_back_stack`] call mutates the stack and then notifies
//! every subscribed [`NavigationListener`] exactly once, synchronously, before
//! returning. Failed calls leave the stack untouched and notify nobody.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tessera_nav::{NavController, NavError, NavOptions, RouteMatcher};
//!
//! let mut matcher = RouteMatcher::new();
//! matcher.register("home").unwrap();
//! matcher.register("detail/{itemId}").unwrap();
//!
//! let mut nav = NavController::new(Arc::new(matcher), "home", NavOptions::default()).unwrap();
//! nav.navigate("detail/123").unwrap();
//! assert_eq!(nav.current_destination().params().get("itemId"), Some("123"));
//!
//! nav.pop_back_stack().unwrap();
//! assert_eq!(nav.pop_back_stack(), Err(NavError::CannotPopRoot));
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, trace};

use crate::{
    back_stack::{BackStack, BackStackEntry, EntryId},
    error::NavError,
    matcher::RouteMatcher,
    options::NavOptions,
};

/// Change notification delivered to listeners.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NavEvent {
    /// A new entry became the top of the stack.
    Pushed { entry: EntryId },
    /// The top entry was removed; the entry below it is now current.
    Popped { removed: BackStackEntry },
}

/// Observer of back stack changes.
///
/// Listeners only get read access to the stack. Navigation triggered in
/// response to an event must go back through the controller after the
/// current call returns.
pub trait NavigationListener: Send {
    fn on_navigate(&mut self, event: &NavEvent, back_stack: &BackStack);
}

impl<F> NavigationListener for F
where
    F: FnMut(&NavEvent, &BackStack) + Send,
{
    fn on_navigate(&mut self, event: &NavEvent, back_stack: &BackStack) {
        self(event, back_stack)
    }
}

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned by [`NavController::subscribe`].
///
/// Unique across all controllers in the process.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn new() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A navigation request expressed as data.
///
/// Screen descriptions carry these so that user actions can be applied with
/// [`NavController::dispatch`] once rendering is done.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NavAction {
    Navigate(String),
    Back,
}

impl NavAction {
    /// Shorthand for [`NavAction::Navigate`].
    pub fn navigate(path: impl Into<String>) -> Self {
        Self::Navigate(path.into())
    }
}

/// Owner of the back stack.
pub struct NavController {
    matcher: Arc<RouteMatcher>,
    back_stack: BackStack,
    options: NavOptions,
    listeners: Vec<(SubscriptionId, Box<dyn NavigationListener>)>,
    version: u64,
}

impl NavController {
    /// Create a controller whose stack is seeded with `start_path`.
    ///
    /// Fails with [`NavError::NoMatchingRoute`] if `start_path` does not
    /// resolve against `matcher`.
    pub fn new(
        matcher: Arc<RouteMatcher>,
        start_path: &str,
        options: NavOptions,
    ) -> Result<Self, NavError> {
        let root = matcher.resolve(start_path)?;
        debug!(
            path = start_path,
            template = root.template.pattern(),
            "seeding back stack"
        );
        Ok(Self {
            back_stack: BackStack::with_root(root, start_path),
            matcher,
            options,
            listeners: Vec::new(),
            version: 0,
        })
    }

    /// Resolve `path`, push a new entry and notify listeners.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn navigate(&mut self, path: &str) -> Result<(), NavError> {
        let matched = self.matcher.resolve(path)?;

        if self.options.launch_single_top {
            let top = self.back_stack.peek();
            if top.template_id() == matched.template_id && *top.params() == matched.params {
                debug!(entry = top.id().get(), "already on top, skipping push");
                return Ok(());
            }
        }

        let entry = self.back_stack.push(matched, path).id();
        debug!(
            entry = entry.get(),
            depth = self.back_stack.len(),
            "pushed entry"
        );
        self.notify(NavEvent::Pushed { entry });
        Ok(())
    }

    /// Pop the top entry and notify listeners.
    ///
    /// Fails with [`NavError::CannotPopRoot`] when only the start destination
    /// is left.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn pop_back_stack(&mut self) -> Result<(), NavError> {
        let removed = self.back_stack.pop()?;
        debug!(
            entry = removed.id().get(),
            depth = self.back_stack.len(),
            "popped entry"
        );
        self.notify(NavEvent::Popped { removed });
        Ok(())
    }

    /// Apply a [`NavAction`].
    pub fn dispatch(&mut self, action: &NavAction) -> Result<(), NavError> {
        match action {
            NavAction::Navigate(path) => self.navigate(path),
            NavAction::Back => self.pop_back_stack(),
        }
    }

    /// Top of the back stack.
    pub fn current_destination(&self) -> &BackStackEntry {
        self.back_stack.peek()
    }

    /// Entry directly below the top, if any.
    pub fn previous_destination(&self) -> Option<&BackStackEntry> {
        self.back_stack.previous()
    }

    /// Read-only view of the whole stack.
    pub fn back_stack(&self) -> &BackStack {
        &self.back_stack
    }

    /// Whether [`Self::pop_back_stack`] would succeed.
    pub fn can_pop(&self) -> bool {
        !self.back_stack.is_root()
    }

    /// Counter bumped on every stack mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Options this controller was created with.
    pub fn options(&self) -> NavOptions {
        self.options
    }

    /// Registry used to resolve paths.
    pub fn matcher(&self) -> &RouteMatcher {
        &self.matcher
    }

    /// Register a listener. Listeners run in subscription order.
    pub fn subscribe(&mut self, listener: impl NavigationListener + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(subscription, _)| *subscription != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: NavEvent) {
        self.version = self.version.wrapping_add(1);
        trace!(
            version = self.version,
            listeners = self.listeners.len(),
            ?event,
            "notifying listeners"
        );
        for (_, listener) in &mut self.listeners {
            listener.on_navigate(&event, &self.back_stack);
        }
    }
}

impl std::fmt::Debug for NavController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavController")
            .field("back_stack", &self.back_stack)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .field("version", &self.version)
            .finish()
    }
}
