//! Route-based navigation for tessera-ui apps.
//!
//! Screens are registered as `(template, handler)` pairs on a [`NavHost`].
//! Templates are `/`-separated paths where `{name}` segments capture
//! parameters:
//!
//! ```
//! use tessera_nav::{NavHost, RouteParams};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Screen {
//!     Home,
//!     Detail(String),
//! }
//!
//! let mut host = NavHost::builder()
//!     .destination("home", |_: &RouteParams| Screen::Home)?
//!     .destination("detail/{itemId}", |params: &RouteParams| {
//!         Screen::Detail(params.get("itemId").unwrap_or_default().to_owned())
//!     })?
//!     .build("home")?;
//!
//! host.navigate("detail/123")?;
//! assert_eq!(host.screen(), Screen::Detail("123".into()));
//!
//! host.pop_back_stack()?;
//! assert_eq!(host.screen(), Screen::Home);
//! # Ok::<(), tessera_nav::NavError>(())
//! ```
//!
//! The pieces can also be used on their own: [`RouteMatcher`] resolves paths,
//! [`NavController`] owns the [`BackStack`] and notifies listeners.

pub mod back_stack;
pub mod controller;
pub mod error;
pub mod host;
pub mod matcher;
pub mod options;
pub mod route;

pub use back_stack::{BackStack, BackStackEntry, EntryId};
pub use controller::{NavAction, NavController, NavEvent, NavigationListener, SubscriptionId};
pub use error::{NavError, ParamError, TemplateError};
pub use host::{NavHost, NavHostBuilder, ScreenHandler};
pub use matcher::{RouteMatch, RouteMatcher, TemplateId};
pub use options::NavOptions;
pub use route::{RouteParams, RouteTemplate, Segment};
