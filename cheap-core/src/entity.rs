use uuid::Uuid;

///
/// Entity
///
/// An opaque RFC 4122 identifier — it carries no data of its own. Two
/// `Entity` values are the same entity iff their UUIDs are equal;
/// canonicalizing a UUID to a single, stable `Entity` value across a
/// process is the factory's job, not this type's.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Entity(Uuid);

impl Entity {
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.0
    }

    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for Entity {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(Entity::from_uuid(id), Entity::from_uuid(id));
    }

    #[test]
    fn distinct_uuids_are_distinct_entities() {
        assert_ne!(Entity::new_v4(), Entity::new_v4());
    }
}
