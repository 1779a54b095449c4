//! Route templates and the parameters extracted from them.
//!
//! A template is a `/`-separated list of segments. A segment written as
//! `{name}` is a placeholder that accepts any non-empty value; every other
//! segment is a literal that must match exactly.
//!
//! ```
//! use tessera_nav::route::RouteTemplate;
//!
//! let template: RouteTemplate = "detail/{itemId}".parse().unwrap();
//! let params = template.match_path("detail/123").unwrap();
//! assert_eq!(params.get("itemId"), Some("123"));
//! ```

use std::{fmt, str::FromStr};

use smallvec::SmallVec;

use crate::error::{ParamError, TemplateError};

/// Separator between path segments.
pub const SEGMENT_SEPARATOR: char = '/';

/// One segment of a [`RouteTemplate`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Captures the path segment under this name.
    Placeholder(String),
}

impl Segment {
    fn parse(index: usize, raw: &str) -> Result<Self, TemplateError> {
        if raw.is_empty() {
            return Err(TemplateError::EmptySegment { index });
        }
        if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            if name.is_empty() {
                return Err(TemplateError::EmptyPlaceholder { index });
            }
            if name.contains(['{', '}']) {
                return Err(TemplateError::Malformed {
                    segment: raw.to_owned(),
                });
            }
            return Ok(Self::Placeholder(name.to_owned()));
        }
        if raw.contains(['{', '}']) {
            return Err(TemplateError::Malformed {
                segment: raw.to_owned(),
            });
        }
        Ok(Self::Literal(raw.to_owned()))
    }

    /// Whether this segment is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// A compiled route pattern such as `detail/{itemId}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteTemplate {
    pattern: String,
    segments: SmallVec<[Segment; 4]>,
}

impl RouteTemplate {
    /// Parse and validate a template string.
    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        if pattern.is_empty() {
            return Err(TemplateError::Empty);
        }
        let mut segments: SmallVec<[Segment; 4]> = SmallVec::new();
        for (index, raw) in pattern.split(SEGMENT_SEPARATOR).enumerate() {
            let segment = Segment::parse(index, raw)?;
            if let Segment::Placeholder(name) = &segment {
                let seen = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Placeholder(n) if n == name));
                if seen {
                    return Err(TemplateError::DuplicatePlaceholder { name: name.clone() });
                }
            }
            segments.push(segment);
        }
        Ok(Self {
            pattern: pattern.to_owned(),
            segments,
        })
    }

    /// The template string as registered.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parsed segments in path order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether some concrete path could match both templates.
    ///
    /// Two templates are disjoint only if their segment counts differ or
    /// they hold different literals at some position.
    pub fn overlaps(&self, other: &RouteTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }

    /// Match an already split path against this template.
    pub fn match_segments(&self, path: &[&str]) -> Option<RouteParams> {
        if path.len() != self.segments.len() {
            return None;
        }
        let mut params = RouteParams::default();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Placeholder(_) if value.is_empty() => return None,
                Segment::Placeholder(name) => params.insert(name.clone(), (*value).to_owned()),
            }
        }
        Some(params)
    }

    /// Match a concrete path string against this template.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let segments: SmallVec<[&str; 4]> = path.split(SEGMENT_SEPARATOR).collect();
        self.match_segments(&segments)
    }

    /// Build a concrete path by substituting every placeholder.
    ///
    /// Values must be non-empty and must not contain the segment separator.
    /// Extra names that are not placeholders of this template are ignored.
    pub fn build_path<I, K, V>(&self, params: I) -> Result<String, ParamError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let values: SmallVec<[(K, V); 4]> = params.into_iter().collect();
        let mut path = String::with_capacity(self.pattern.len());
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                path.push(SEGMENT_SEPARATOR);
            }
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Placeholder(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key.as_ref() == name)
                        .map(|(_, value)| value.as_ref())
                        .ok_or_else(|| ParamError::Missing { name: name.clone() })?;
                    if value.is_empty() || value.contains(SEGMENT_SEPARATOR) {
                        return Err(ParamError::Invalid {
                            name: name.clone(),
                            value: value.to_owned(),
                            reason: "value must be a single non-empty segment".to_owned(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

impl FromStr for RouteTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Values captured by placeholders, in template order.
///
/// Values are raw path text. Converting them into typed values is up to the
/// screen handler, see [`RouteParams::parse`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RouteParams {
    values: SmallVec<[(String, String); 2]>,
}

impl RouteParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: String, value: String) {
        self.values.push((name, value));
    }

    /// Raw value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parse the value for `name` into `T`.
    pub fn parse<T>(&self, name: &str) -> Result<T, ParamError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.get(name).ok_or_else(|| ParamError::Missing {
            name: name.to_owned(),
        })?;
        value.parse().map_err(|err: T::Err| ParamError::Invalid {
            name: name.to_owned(),
            value: value.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the template had no placeholders.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::default();
        for (name, value) in iter {
            params.insert(name.into(), value.into());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteParams, RouteTemplate, Segment};
    use crate::error::{ParamError, TemplateError};

    #[test]
    fn parses_literals_and_placeholders() {
        let template = RouteTemplate::parse("user/{userId}/post/{postId}").unwrap();
        assert_eq!(template.segment_count(), 4);
        assert_eq!(template.segments()[0], Segment::Literal("user".into()));
        assert_eq!(template.segments()[1], Segment::Placeholder("userId".into()));
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            ["userId", "postId"]
        );
        assert_eq!(template.to_string(), "user/{userId}/post/{postId}");
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(RouteTemplate::parse(""), Err(TemplateError::Empty));
        assert_eq!(
            RouteTemplate::parse("a//b"),
            Err(TemplateError::EmptySegment { index: 1 })
        );
        assert_eq!(
            RouteTemplate::parse("/home"),
            Err(TemplateError::EmptySegment { index: 0 })
        );
        assert_eq!(
            RouteTemplate::parse("a/{}"),
            Err(TemplateError::EmptyPlaceholder { index: 1 })
        );
        assert_eq!(
            RouteTemplate::parse("item-{id}"),
            Err(TemplateError::Malformed {
                segment: "item-{id}".into()
            })
        );
        assert_eq!(
            RouteTemplate::parse("{{id}}"),
            Err(TemplateError::Malformed {
                segment: "{{id}}".into()
            })
        );
        assert_eq!(
            RouteTemplate::parse("{id}/x/{id}"),
            Err(TemplateError::DuplicatePlaceholder { name: "id".into() })
        );
    }

    #[test]
    fn overlap_requires_equal_length_and_compatible_literals() {
        let parse = |s: &str| RouteTemplate::parse(s).unwrap();
        assert!(parse("a/{x}").overlaps(&parse("a/{y}")));
        assert!(parse("a/{x}").overlaps(&parse("{y}/b")));
        assert!(parse("detail/{id}").overlaps(&parse("detail/new")));
        assert!(!parse("a/{x}").overlaps(&parse("b/{x}")));
        assert!(!parse("a/{x}").overlaps(&parse("a/{x}/c")));
        assert!(!parse("home").overlaps(&parse("settings")));
    }

    #[test]
    fn extracts_placeholder_values() {
        let template = RouteTemplate::parse("detail/{itemId}").unwrap();
        let params = template.match_path("detail/123").unwrap();
        assert_eq!(params.get("itemId"), Some("123"));
        assert_eq!(params.len(), 1);

        assert!(template.match_path("detail").is_none());
        assert!(template.match_path("detail/").is_none());
        assert!(template.match_path("details/123").is_none());
        assert!(template.match_path("detail/1/2").is_none());
    }

    #[test]
    fn literal_only_template_yields_no_params() {
        let template = RouteTemplate::parse("home").unwrap();
        assert!(template.match_path("home").unwrap().is_empty());
        assert!(template.match_path("/home").is_none());
        assert!(template.match_path("home/").is_none());
    }

    #[test]
    fn builds_paths_from_params() {
        let template = RouteTemplate::parse("user/{userId}/post/{postId}").unwrap();
        let path = template
            .build_path([("postId", "9"), ("userId", "alice")])
            .unwrap();
        assert_eq!(path, "user/alice/post/9");
        assert!(template.match_path(&path).is_some());

        assert_eq!(
            template.build_path([("userId", "alice")]),
            Err(ParamError::Missing {
                name: "postId".into()
            })
        );
        assert!(matches!(
            template.build_path([("userId", "a/b"), ("postId", "1")]),
            Err(ParamError::Invalid { name, .. }) if name == "userId"
        ));
    }

    #[test]
    fn typed_param_access() {
        let params: RouteParams = [("itemId", "42"), ("slug", "abc")].into_iter().collect();
        assert_eq!(params.parse::<u32>("itemId"), Ok(42));
        assert!(matches!(
            params.parse::<u32>("slug"),
            Err(ParamError::Invalid { value, .. }) if value == "abc"
        ));
        assert_eq!(
            params.parse::<u32>("missing"),
            Err(ParamError::Missing {
                name: "missing".into()
            })
        );
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            [("itemId", "42"), ("slug", "abc")]
        );
    }
}
