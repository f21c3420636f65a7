/// A collection property filled with every `target` whose `mapped_by`
/// column references the owner's primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneToMany {
    property: String,
    target: String,
    mapped_by: String,
}

/// A single-object property resolved through the owner's `foreign_key`
/// column against the target's primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManyToOne {
    property: String,
    target: String,
    foreign_key: String,
}

impl OneToMany {
    /// `property` holds every `target` whose `mapped_by` column equals the
    /// owner's primary key
    pub fn new<P, T, M>(property: P, target: T, mapped_by: M) -> Self
    where
        P: Into<String>,
        T: Into<String>,
        M: Into<String>,
    {
        Self {
            property: property.into(),
            target: target.into(),
            mapped_by: mapped_by.into(),
        }
    }

    /// Name of the collection property on the owner
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Class of the collection items
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Column on the target table referencing the owner
    pub fn mapped_by(&self) -> &str {
        &self.mapped_by
    }
}

impl ManyToOne {
    /// `property` holds the `target` whose primary key equals the owner's
    /// `foreign_key` column
    pub fn new<P, T, F>(property: P, target: T, foreign_key: F) -> Self
    where
        P: Into<String>,
        T: Into<String>,
        F: Into<String>,
    {
        Self {
            property: property.into(),
            target: target.into(),
            foreign_key: foreign_key.into(),
        }
    }

    /// Name of the related object property on the owner
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Class of the related object
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Column on the owner table referencing the target
    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }
}
