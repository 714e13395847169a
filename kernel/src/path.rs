//! Parsing of OData-style resource segments such as `Books`, `Books()` and `Books(201)`.

use error_stack::Report;
use uuid::Uuid;

use crate::KernelError;

/// Length of the canonical hyphenated UUID form.
const UUID_LENGTH: usize = 36;
const NAMED_KEY_PREFIX: &str = "ID=";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EntitySet {
    Authors,
    Books,
    Orders,
}

impl EntitySet {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Authors" => Some(Self::Authors),
            "Books" => Some(Self::Books),
            "Orders" => Some(Self::Orders),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Authors => "Authors",
            Self::Books => "Books",
            Self::Orders => "Orders",
        }
    }

    pub fn key_kind(&self) -> KeyKind {
        match self {
            Self::Authors | Self::Books => KeyKind::Integer,
            Self::Orders => KeyKind::Uuid,
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Authors, Self::Books, Self::Orders]
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyKind {
    None,
    Integer,
    Uuid,
}

/// Parenthesized part of a segment, before any type check.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeySegment<'a> {
    /// `Books`
    Absent,
    /// `Books()`
    Empty,
    /// `Books(201)`, with the text between the parentheses.
    Present(&'a str),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EntityKey {
    Collection,
    Integer(i32),
    Uuid(Uuid),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ResourcePath<'a> {
    entity_set: EntitySet,
    key: KeySegment<'a>,
}

impl<'a> ResourcePath<'a> {
    pub fn parse(segment: &'a str) -> error_stack::Result<Self, KernelError> {
        let (name, key) = split_segment(segment)?;
        let entity_set = EntitySet::parse(name).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("unknown entity set `{name}`"))
        })?;
        Ok(Self { entity_set, key })
    }

    pub fn entity_set(&self) -> EntitySet {
        self.entity_set
    }

    pub fn key_segment(&self) -> KeySegment<'a> {
        self.key
    }

    /// Key checked against the key type of the addressed entity set.
    pub fn key(&self) -> error_stack::Result<EntityKey, KernelError> {
        parse_key(self.key, self.entity_set.key_kind())
    }
}

fn split_segment(segment: &str) -> error_stack::Result<(&str, KeySegment<'_>), KernelError> {
    let Some(open) = segment.find('(') else {
        if segment.contains(')') {
            return Err(invalid(segment, "unbalanced parenthesis"));
        }
        return Ok((segment, KeySegment::Absent));
    };
    let name = &segment[..open];
    let inner = segment[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| invalid(segment, "key segment is not closed"))?;
    if inner.contains(['(', ')']) {
        return Err(invalid(segment, "nested parenthesis"));
    }
    let key = match inner.trim() {
        "" => KeySegment::Empty,
        key => KeySegment::Present(key),
    };
    Ok((name, key))
}

/// Checks a key segment against the expected key type.
///
/// An absent segment addresses the collection and is always accepted. An empty
/// segment `()` is always rejected.
pub fn parse_key(segment: KeySegment<'_>, kind: KeyKind) -> error_stack::Result<EntityKey, KernelError> {
    let raw = match segment {
        KeySegment::Absent => return Ok(EntityKey::Collection),
        KeySegment::Empty => return Err(invalid("()", "empty key")),
        KeySegment::Present(raw) => raw.strip_prefix(NAMED_KEY_PREFIX).unwrap_or(raw),
    };
    match kind {
        KeyKind::None => Err(invalid(raw, "no key expected")),
        KeyKind::Integer => match raw.parse::<i32>() {
            Ok(key) if key > 0 => Ok(EntityKey::Integer(key)),
            _ => Err(invalid(raw, "expected a positive integer")),
        },
        KeyKind::Uuid => {
            if raw.len() != UUID_LENGTH {
                return Err(invalid(raw, "expected a hyphenated uuid"));
            }
            Uuid::try_parse(raw)
                .map(EntityKey::Uuid)
                .map_err(|_| invalid(raw, "expected a hyphenated uuid"))
        }
    }
}

fn invalid(raw: &str, reason: &str) -> Report<KernelError> {
    Report::new(KernelError::InvalidKey).attach_printable(format!("`{raw}`: {reason}"))
}
