//! Binding between the controller and screen handlers.
//!
//! A [`NavHost`] owns its [`NavController`] and a table of screen handlers,
//! one per registered route template. It renders the start destination when
//! built, then re-renders the top entry every time the controller reports a
//! change. Rendering produces a screen description of type `S`; what `S` is
//! and how it reaches the display is up to the application.
//!
//! # Responsibilities
//!
//! - Validate `(template, handler)` registrations as they arrive.
//! - Seed the controller with the start path, failing fast if it does not
//!   resolve.
//! - Keep the latest rendered screen in sync with the back stack top.
//! - Forward navigation requests to the controller; the host never touches
//!   the back stack itself.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    back_stack::{BackStack, EntryId},
    controller::{NavAction, NavController, NavEvent, NavigationListener, SubscriptionId},
    error::NavError,
    matcher::{RouteMatcher, TemplateId},
    options::NavOptions,
    route::RouteParams,
};

/// Produces a screen description from route parameters.
pub trait ScreenHandler<S>: Send + Sync {
    fn render(&self, params: &RouteParams) -> S;
}

impl<S, F> ScreenHandler<S> for F
where
    F: Fn(&RouteParams) -> S + Send + Sync,
{
    fn render(&self, params: &RouteParams) -> S {
        self(params)
    }
}

/// Handlers indexed by [`TemplateId`].
struct Destinations<S> {
    handlers: Vec<Box<dyn ScreenHandler<S>>>,
}

impl<S> Destinations<S> {
    fn render(&self, template_id: TemplateId, params: &RouteParams) -> Option<S> {
        self.handlers
            .get(template_id.index())
            .map(|handler| handler.render(params))
    }
}

struct Rendered<S> {
    entry: EntryId,
    screen: S,
    count: u64,
}

/// Render listener subscribed by [`NavHost`].
struct RenderBinding<S> {
    destinations: Arc<Destinations<S>>,
    rendered: Arc<RwLock<Rendered<S>>>,
}

impl<S> NavigationListener for RenderBinding<S>
where
    S: Send + Sync + 'static,
{
    fn on_navigate(&mut self, _event: &NavEvent, back_stack: &BackStack) {
        let entry = back_stack.peek();
        let Some(screen) = self.destinations.render(entry.template_id(), entry.params()) else {
            warn!(
                template = entry.template().pattern(),
                "no screen handler for current entry"
            );
            return;
        };
        let mut rendered = self.rendered.write();
        rendered.entry = entry.id();
        rendered.screen = screen;
        rendered.count += 1;
        debug!(entry = entry.id().get(), path = entry.path(), "rendered screen");
    }
}

/// Collects destinations for a [`NavHost`].
pub struct NavHostBuilder<S> {
    matcher: RouteMatcher,
    handlers: Vec<Box<dyn ScreenHandler<S>>>,
    options: NavOptions,
}

impl<S> Default for NavHostBuilder<S> {
    fn default() -> Self {
        Self {
            matcher: RouteMatcher::new(),
            handlers: Vec::new(),
            options: NavOptions::default(),
        }
    }
}

impl<S> NavHostBuilder<S>
where
    S: Send + Sync + 'static,
{
    /// Create an empty builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `template`.
    ///
    /// Fails immediately on an invalid or ambiguous template.
    pub fn destination(
        mut self,
        template: &str,
        handler: impl ScreenHandler<S> + 'static,
    ) -> Result<Self, NavError> {
        let id = self.matcher.register(template)?;
        debug_assert_eq!(id.index(), self.handlers.len());
        self.handlers.push(Box::new(handler));
        Ok(self)
    }

    /// Set the controller options.
    pub fn options(mut self, options: NavOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the host with its back stack seeded from `start_path`.
    pub fn build(self, start_path: &str) -> Result<NavHost<S>, NavError> {
        let mut controller = NavController::new(Arc::new(self.matcher), start_path, self.options)?;
        let destinations = Arc::new(Destinations {
            handlers: self.handlers,
        });

        let start = controller.current_destination();
        let screen = destinations
            .render(start.template_id(), start.params())
            .ok_or_else(|| NavError::NoMatchingRoute {
                path: start_path.to_owned(),
            })?;
        let rendered = Arc::new(RwLock::new(Rendered {
            entry: start.id(),
            screen,
            count: 1,
        }));

        let render_subscription = controller.subscribe(RenderBinding {
            destinations: Arc::clone(&destinations),
            rendered: Arc::clone(&rendered),
        });
        debug!(
            start = start_path,
            destinations = destinations.handlers.len(),
            "nav host ready"
        );

        Ok(NavHost {
            controller,
            rendered,
            render_subscription,
        })
    }
}

/// Owns the navigation controller and the current rendered screen.
pub struct NavHost<S> {
    controller: NavController,
    rendered: Arc<RwLock<Rendered<S>>>,
    render_subscription: SubscriptionId,
}

impl<S> NavHost<S>
where
    S: Send + Sync + 'static,
{
    /// Start collecting destinations.
    pub fn builder() -> NavHostBuilder<S> {
        NavHostBuilder::new()
    }

    /// See [`NavController::navigate`].
    pub fn navigate(&mut self, path: &str) -> Result<(), NavError> {
        self.controller.navigate(path)
    }

    /// See [`NavController::pop_back_stack`].
    pub fn pop_back_stack(&mut self) -> Result<(), NavError> {
        self.controller.pop_back_stack()
    }

    /// See [`NavController::dispatch`].
    pub fn dispatch(&mut self, action: &NavAction) -> Result<(), NavError> {
        self.controller.dispatch(action)
    }

    /// Subscribe an application observer. It runs after the host has
    /// rendered the new top entry.
    pub fn subscribe(&mut self, listener: impl NavigationListener + 'static) -> SubscriptionId {
        self.controller.subscribe(listener)
    }

    /// Remove an application observer.
    ///
    /// The host's own render listener cannot be removed; passing its id
    /// returns `false`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if id == self.render_subscription {
            warn!("refusing to remove the host render listener");
            return false;
        }
        self.controller.unsubscribe(id)
    }

    /// Read-only access to the controller.
    pub fn controller(&self) -> &NavController {
        &self.controller
    }

    /// Execute a closure with the current screen.
    pub fn with_screen<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let rendered = self.rendered.read();
        f(&rendered.screen)
    }

    /// Get a cloned copy of the current screen. Requires `S: Clone`.
    pub fn screen(&self) -> S
    where
        S: Clone,
    {
        self.with_screen(Clone::clone)
    }

    /// Entry the current screen was rendered from.
    pub fn rendered_entry(&self) -> EntryId {
        self.rendered.read().entry
    }

    /// Number of renders so far, including the start screen.
    pub fn render_count(&self) -> u64 {
        self.rendered.read().count
    }
}
