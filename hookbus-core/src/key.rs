//! Listener keys.
//!
//! A [`ListenerKey`] identifies one chain of listeners: the topic name plus
//! an ordered list of extra segments. Two keys are equal exactly when their
//! canonical forms are equal.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;
use std::{borrow::Cow, fmt};

/// One extra key segment. `None` is an explicit "absent" marker and is
/// distinct from every textual segment, including `"null"` and `""`.
pub type Segment = Option<String>;

/// The identity of a listener chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    name: Cow<'static, str>,
    segments: Vec<Segment>,
}

impl ListenerKey {
    /// Create a key from a name and extra segments.
    pub fn new(name: impl Into<Cow<'static, str>>, segments: impl Into<KeySegments>) -> Self {
        Self {
            name: name.into(),
            segments: segments.into().0,
        }
    }

    /// The event or channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The extra segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The canonical serialization: a JSON array of the name followed by each
    /// segment, with `null` for absent segments.
    ///
    /// ```
    /// use hookbus_core::ListenerKey;
    ///
    /// let key = ListenerKey::new("before", ["registerUser", "tenantA"]);
    /// assert_eq!(key.canonical(), r#"["before","registerUser","tenantA"]"#);
    /// ```
    pub fn canonical(&self) -> String {
        let mut parts = Vec::with_capacity(self.segments.len() + 1);
        parts.push(Value::String(self.name.to_string()));
        parts.extend(
            self.segments
                .iter()
                .map(|segment| segment.clone().map_or(Value::Null, Value::String)),
        );
        Value::Array(parts).to_string()
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl Serialize for ListenerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.segments.len() + 1))?;
        seq.serialize_element(self.name.as_ref())?;
        for segment in &self.segments {
            seq.serialize_element(segment)?;
        }
        seq.end()
    }
}

/// The optional extra segments of a key.
///
/// Converts from `()` (no segments), a single string (one segment), an
/// optional string, and arrays, slices or vectors of strings or optional
/// strings.
///
/// ```
/// use hookbus_core::KeySegments;
///
/// assert!(KeySegments::from(()).is_empty());
/// assert_eq!(KeySegments::from("tenantA").len(), 1);
/// assert_eq!(KeySegments::from([Some("a"), None]).len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeySegments(Vec<Segment>);

impl KeySegments {
    /// No extra segments.
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// `head` followed by `rest`.
    pub fn prefixed(head: impl Into<String>, rest: impl Into<KeySegments>) -> Self {
        let rest = rest.into().0;
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(Some(head.into()));
        segments.extend(rest);
        Self(segments)
    }

    /// Append one segment.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments, in order.
    pub fn as_slice(&self) -> &[Segment] {
        &self.0
    }

    /// Unwrap into the underlying vector.
    pub fn into_inner(self) -> Vec<Segment> {
        self.0
    }
}

impl From<()> for KeySegments {
    fn from(_: ()) -> Self {
        Self::none()
    }
}

impl From<&str> for KeySegments {
    fn from(segment: &str) -> Self {
        Self(vec![Some(segment.to_string())])
    }
}

impl From<String> for KeySegments {
    fn from(segment: String) -> Self {
        Self(vec![Some(segment)])
    }
}

impl From<Option<&str>> for KeySegments {
    fn from(segment: Option<&str>) -> Self {
        Self(vec![segment.map(str::to_string)])
    }
}

impl From<Vec<Segment>> for KeySegments {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl From<Vec<String>> for KeySegments {
    fn from(segments: Vec<String>) -> Self {
        Self(segments.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for KeySegments {
    fn from(segments: Vec<&str>) -> Self {
        segments.as_slice().into()
    }
}

impl From<&[&str]> for KeySegments {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| Some((*s).to_string())).collect())
    }
}

impl From<&[Option<&str>]> for KeySegments {
    fn from(segments: &[Option<&str>]) -> Self {
        Self(segments.iter().map(|s| s.map(str::to_string)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySegments {
    fn from(segments: [&str; N]) -> Self {
        segments.as_slice().into()
    }
}

impl<const N: usize> From<[Option<&str>; N]> for KeySegments {
    fn from(segments: [Option<&str>; N]) -> Self {
        segments.as_slice().into()
    }
}

impl FromIterator<Segment> for KeySegments {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_form() {
        assert_eq!(ListenerKey::new("logout", ()).canonical(), r#"["logout"]"#);
        assert_eq!(
            ListenerKey::new("userUpdated", [Some("tenantA"), None]).canonical(),
            r#"["userUpdated","tenantA",null]"#
        );
        assert_eq!(
            ListenerKey::new("logout", ()).to_string(),
            ListenerKey::new("logout", ()).canonical()
        );
    }

    #[test]
    fn test_single_string_is_one_segment() {
        let key = ListenerKey::new("before", "registerUser");
        assert_eq!(key.segments(), &[Some("registerUser".to_string())]);
    }

    #[test]
    fn test_distinct_tuples_never_collide() {
        let keys = vec![
            ListenerKey::new("a", ()),
            ListenerKey::new("a", [""]),
            ListenerKey::new("a", [None::<&str>]),
            ListenerKey::new("a", ["null"]),
            ListenerKey::new("a", ["b"]),
            ListenerKey::new("a", [Some("b"), None]),
            ListenerKey::new("a", ["b", ""]),
            ListenerKey::new("a,b", ()),
            ListenerKey::new("a", ["b,c"]),
            ListenerKey::new("a", ["b", "c"]),
            ListenerKey::new("a", ["c", "b"]),
            ListenerKey::new("a", [r#"b","c"#]),
            ListenerKey::new(r#"a"]"#, ()),
            ListenerKey::new("b", ["a"]),
        ];

        let canonical: HashSet<String> = keys.iter().map(ListenerKey::canonical).collect();
        assert_eq!(canonical.len(), keys.len(), "canonical forms must be unique");

        let structural: HashSet<&ListenerKey> = keys.iter().collect();
        assert_eq!(structural.len(), keys.len());
    }

    #[test]
    fn test_equal_tuples_share_a_key() {
        let from_array = ListenerKey::new("userUpdated", ["tenantA"]);
        let from_str = ListenerKey::new("userUpdated", "tenantA");
        let from_vec = ListenerKey::new("userUpdated", vec!["tenantA".to_string()]);
        let from_owned = ListenerKey::new(String::from("userUpdated"), [Some("tenantA")]);

        assert_eq!(from_array, from_str);
        assert_eq!(from_array, from_vec);
        assert_eq!(from_array, from_owned);
        assert_eq!(from_array.canonical(), from_owned.canonical());
    }

    #[test]
    fn test_prefixed_segments() {
        let segments = KeySegments::prefixed("registerUser", ["form-1", "step-2"]);
        assert_eq!(
            segments.as_slice(),
            &[
                Some("registerUser".to_string()),
                Some("form-1".to_string()),
                Some("step-2".to_string())
            ]
        );
        assert_eq!(KeySegments::prefixed("registerUser", ()).len(), 1);
    }

    #[test]
    fn test_serialize_matches_canonical() {
        let key = ListenerKey::new("after", [Some("registerUser"), None]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, key.canonical());
    }
}
