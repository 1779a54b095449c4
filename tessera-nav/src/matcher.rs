//! Registry of route templates and path resolution.
//!
//! All validation happens in [`RouteMatcher::register`]: templates that could
//! both match some path are rejected there, so [`RouteMatcher::resolve`] is a
//! lookup that can find at most one template.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    error::NavError,
    route::{RouteParams, RouteTemplate, SEGMENT_SEPARATOR},
};

/// Index of a template inside its [`RouteMatcher`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TemplateId(usize);

impl TemplateId {
    /// Registration order of the template, starting at zero.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Successful resolution of a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub template_id: TemplateId,
    pub template: Arc<RouteTemplate>,
    pub params: RouteParams,
}

/// Ordered set of registered templates.
#[derive(Debug, Default)]
pub struct RouteMatcher {
    templates: Vec<Arc<RouteTemplate>>,
    by_segment_count: FxHashMap<usize, SmallVec<[TemplateId; 4]>>,
}

impl RouteMatcher {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a template.
    ///
    /// Fails with [`NavError::InvalidTemplate`] if the pattern does not parse
    /// and with [`NavError::DuplicateRoute`] if it overlaps an existing one.
    pub fn register(&mut self, pattern: &str) -> Result<TemplateId, NavError> {
        let template =
            RouteTemplate::parse(pattern).map_err(|source| NavError::InvalidTemplate {
                template: pattern.to_owned(),
                source,
            })?;

        let bucket = self
            .by_segment_count
            .get(&template.segment_count())
            .map(SmallVec::as_slice)
            .unwrap_or_default();
        if let Some(existing) = bucket
            .iter()
            .map(|id| &self.templates[id.0])
            .find(|existing| existing.overlaps(&template))
        {
            return Err(NavError::DuplicateRoute {
                template: pattern.to_owned(),
                existing: existing.pattern().to_owned(),
            });
        }

        let id = TemplateId(self.templates.len());
        self.by_segment_count
            .entry(template.segment_count())
            .or_default()
            .push(id);
        debug!(template = pattern, id = id.0, "registered route template");
        self.templates.push(Arc::new(template));
        Ok(id)
    }

    /// Resolve a concrete path to its template and parameters.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch, NavError> {
        let segments: SmallVec<[&str; 4]> = path.split(SEGMENT_SEPARATOR).collect();
        self.by_segment_count
            .get(&segments.len())
            .into_iter()
            .flatten()
            .find_map(|&id| {
                let template = &self.templates[id.0];
                template.match_segments(&segments).map(|params| RouteMatch {
                    template_id: id,
                    template: Arc::clone(template),
                    params,
                })
            })
            .ok_or_else(|| NavError::NoMatchingRoute {
                path: path.to_owned(),
            })
    }

    /// Template registered under `id`.
    pub fn template(&self, id: TemplateId) -> Option<&Arc<RouteTemplate>> {
        self.templates.get(id.0)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template has been registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &RouteTemplate)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(index, template)| (TemplateId(index), &**template))
    }
}

#[cfg(test)]
mod tests {
    use super::RouteMatcher;
    use crate::error::{NavError, TemplateError};

    fn matcher(patterns: &[&str]) -> RouteMatcher {
        let mut matcher = RouteMatcher::new();
        for pattern in patterns {
            matcher.register(pattern).unwrap();
        }
        matcher
    }

    #[test]
    fn identical_shapes_are_duplicates() {
        let mut matcher = matcher(&["a/{x}"]);
        assert_eq!(
            matcher.register("a/{y}"),
            Err(NavError::DuplicateRoute {
                template: "a/{y}".into(),
                existing: "a/{x}".into(),
            })
        );
        assert_eq!(matcher.len(), 1);
    }

    #[test]
    fn overlapping_shapes_are_duplicates() {
        let mut matcher = matcher(&["a/{x}"]);
        assert!(matches!(
            matcher.register("{y}/b"),
            Err(NavError::DuplicateRoute { .. })
        ));
        assert!(matches!(
            matcher.register("a/b"),
            Err(NavError::DuplicateRoute { .. })
        ));
    }

    #[test]
    fn disjoint_templates_coexist() {
        let matcher = matcher(&["home", "settings", "detail/{itemId}", "user/{id}/posts"]);
        assert_eq!(matcher.len(), 4);
        let patterns: Vec<_> = matcher.iter().map(|(_, t)| t.pattern().to_owned()).collect();
        assert_eq!(
            patterns,
            ["home", "settings", "detail/{itemId}", "user/{id}/posts"]
        );
    }

    #[test]
    fn invalid_template_is_reported_with_source() {
        let mut matcher = RouteMatcher::new();
        let err = matcher.register("a/{}").unwrap_err();
        assert_eq!(
            err,
            NavError::InvalidTemplate {
                template: "a/{}".into(),
                source: TemplateError::EmptyPlaceholder { index: 1 },
            }
        );
        assert!(err.is_configuration_error());
        assert!(matcher.is_empty());
    }

    #[test]
    fn resolves_to_template_and_params() {
        let matcher = matcher(&["home", "detail/{itemId}"]);
        let found = matcher.resolve("detail/123").unwrap();
        assert_eq!(found.template.pattern(), "detail/{itemId}");
        assert_eq!(found.template_id.index(), 1);
        assert_eq!(found.params.get("itemId"), Some("123"));

        let home = matcher.resolve("home").unwrap();
        assert_eq!(home.template_id.index(), 0);
        assert!(home.params.is_empty());
    }

    #[test]
    fn unresolvable_paths_fail() {
        let matcher = matcher(&["home", "detail/{itemId}"]);
        for path in ["unknown_screen", "detail", "detail/", "detail/1/2", "", "/home"] {
            assert_eq!(
                matcher.resolve(path),
                Err(NavError::NoMatchingRoute { path: path.into() }),
                "{path}"
            );
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let matcher = matcher(&["home", "detail/{itemId}", "user/{id}/post/{postId}"]);
        let first = matcher.resolve("user/7/post/9").unwrap();
        let second = matcher.resolve("user/7/post/9").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.params.get("id"), Some("7"));
        assert_eq!(first.params.get("postId"), Some("9"));
    }
}
