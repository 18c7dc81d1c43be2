//! Entity trait for records keyed by a natural identifier.

/// Something looked up by key, such as a catalog product by its barcode.
///
/// Two entities with the same key describe the same thing even when other
/// attributes (a price, a name) differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Lookup key of this record.
    fn id(&self) -> &Self::Id;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shelf {
        code: String,
        label: &'static str,
    }

    impl Entity for Shelf {
        type Id = String;

        fn id(&self) -> &String {
            &self.code
        }
    }

    #[test]
    fn identity_ignores_other_attributes() {
        let a = Shelf { code: "A1".into(), label: "Fruit" };
        let b = Shelf { code: "A1".into(), label: "Vegetables" };
        assert_ne!(a.label, b.label);
        assert_eq!(a.id(), b.id());
    }
}
