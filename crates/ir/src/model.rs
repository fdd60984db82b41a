//! The model: entity types and their inheritance hierarchies
//!
//! Entity types are kept in insertion order, which is the "model order" the
//! conventions rely on for stable output.

use crate::entity::EntityType;
use checkwright_core::{CheckError, CheckResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A finalized-or-finalizing relational model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Entity types in model order
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity type (builder style)
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_types.push(entity_type);
        self
    }

    /// Add an entity type, rejecting duplicate names
    pub fn add_entity_type(&mut self, entity_type: EntityType) -> CheckResult<()> {
        if self.find_entity_type(&entity_type.name).is_some() {
            return Err(CheckError::DuplicateEntity(entity_type.name));
        }
        self.entity_types.push(entity_type);
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Entity types in model order
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    /// Find an entity type by name
    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    /// Find a mutable entity type by name
    pub fn find_entity_type_mut(&mut self, name: &str) -> Option<&mut EntityType> {
        self.entity_types.iter_mut().find(|e| e.name == name)
    }

    /// Get the number of entity types
    pub fn entity_count(&self) -> usize {
        self.entity_types.len()
    }

    // ========================================================================
    // Inheritance
    // ========================================================================

    /// Direct base type of an entity type
    pub fn base_of(&self, entity_type: &EntityType) -> Option<&EntityType> {
        entity_type
            .base_type
            .as_deref()
            .and_then(|base| self.find_entity_type(base))
    }

    /// Root of the hierarchy containing an entity type.
    ///
    /// Stops walking after as many steps as there are entity types, so a
    /// malformed cyclic chain cannot loop forever.
    pub fn root_of<'a>(&'a self, entity_type: &'a EntityType) -> &'a EntityType {
        let mut current = entity_type;
        for _ in 0..self.entity_types.len() {
            match self.base_of(current) {
                Some(base) => current = base,
                None => break,
            }
        }
        current
    }

    /// Check if an entity type has no base type in the model
    pub fn is_root(&self, entity_type: &EntityType) -> bool {
        self.base_of(entity_type).is_none()
    }

    /// Entity types directly deriving from the named type
    pub fn derived_types_of(&self, name: &str) -> Vec<&EntityType> {
        self.entity_types
            .iter()
            .filter(|e| e.base_type.as_deref() == Some(name))
            .collect()
    }

    /// Every entity type whose root is the named type, in model order
    /// (including the root itself)
    pub fn hierarchy_of(&self, root_name: &str) -> Vec<&EntityType> {
        self.entity_types
            .iter()
            .filter(|e| self.root_of(e).name == root_name)
            .collect()
    }

    /// Entity types without a base type, in model order
    pub fn root_entity_types(&self) -> Vec<&EntityType> {
        self.entity_types.iter().filter(|e| self.is_root(e)).collect()
    }

    /// Total number of registered check constraints
    pub fn check_constraint_count(&self) -> usize {
        self.entity_types
            .iter()
            .map(|e| e.check_constraints.len())
            .sum()
    }
}

impl Validatable for Model {
    fn validate(&self) -> CheckResult<()> {
        let mut names = HashSet::new();
        for entity_type in &self.entity_types {
            entity_type.validate()?;
            if !names.insert(entity_type.name.as_str()) {
                return Err(CheckError::DuplicateEntity(entity_type.name.clone()));
            }
        }

        for entity_type in &self.entity_types {
            if let Some(base) = &entity_type.base_type {
                if self.find_entity_type(base).is_none() {
                    return Err(CheckError::UnknownBaseType {
                        entity: entity_type.name.clone(),
                        base: base.clone(),
                    });
                }
            }

            let mut seen = HashSet::new();
            let mut current = entity_type;
            while let Some(base) = self.base_of(current) {
                if !seen.insert(current.name.as_str()) || base.name == entity_type.name {
                    return Err(CheckError::InheritanceCycle(entity_type.name.clone()));
                }
                current = base;
            }

            if let Some(discriminator) = &entity_type.discriminator {
                if entity_type.base_type.is_some() {
                    return Err(CheckError::entity_validation(
                        &entity_type.name,
                        "Only the root of a hierarchy can configure a discriminator",
                    ));
                }
                if entity_type
                    .find_declared_property(&discriminator.property)
                    .is_none()
                {
                    return Err(CheckError::PropertyNotFound {
                        entity: entity_type.name.clone(),
                        property: discriminator.property.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use pretty_assertions::assert_eq;

    fn animals() -> Model {
        Model::new()
            .with_entity_type(
                EntityType::new("Animal")
                    .abstract_type()
                    .with_property(Property::string("Discriminator"))
                    .with_discriminator("Discriminator", true),
            )
            .with_entity_type(EntityType::new("Blog"))
            .with_entity_type(
                EntityType::new("Cat")
                    .with_table_name("Animal")
                    .with_base_type("Animal")
                    .with_discriminator_value("Cat"),
            )
            .with_entity_type(
                EntityType::new("Kitten")
                    .with_table_name("Animal")
                    .with_base_type("Cat")
                    .with_discriminator_value("Kitten"),
            )
    }

    fn names(entity_types: Vec<&EntityType>) -> Vec<&str> {
        entity_types.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_root_of() {
        let model = animals();
        let kitten = model.find_entity_type("Kitten").unwrap();
        assert_eq!(model.root_of(kitten).name, "Animal");
        assert_eq!(model.base_of(kitten).unwrap().name, "Cat");
        assert!(model.is_root(model.find_entity_type("Blog").unwrap()));
    }

    #[test]
    fn test_hierarchy_in_model_order() {
        let model = animals();
        assert_eq!(names(model.hierarchy_of("Animal")), vec!["Animal", "Cat", "Kitten"]);
        assert_eq!(names(model.derived_types_of("Animal")), vec!["Cat"]);
        assert_eq!(names(model.root_entity_types()), vec!["Animal", "Blog"]);
    }

    #[test]
    fn test_valid_model() {
        assert!(animals().validate().is_ok());
    }

    #[test]
    fn test_duplicate_entity() {
        let mut model = Model::new();
        model.add_entity_type(EntityType::new("Blog")).unwrap();
        assert!(matches!(
            model.add_entity_type(EntityType::new("Blog")),
            Err(CheckError::DuplicateEntity(_))
        ));
    }

    #[test]
    fn test_unknown_base_type() {
        let model = Model::new().with_entity_type(EntityType::new("Cat").with_base_type("Animal"));
        assert!(matches!(
            model.validate(),
            Err(CheckError::UnknownBaseType { .. })
        ));
    }

    #[test]
    fn test_inheritance_cycle() {
        let model = Model::new()
            .with_entity_type(EntityType::new("A").with_base_type("B"))
            .with_entity_type(EntityType::new("B").with_base_type("A"));
        assert!(matches!(model.validate(), Err(CheckError::InheritanceCycle(_))));

        // Walking a cyclic chain still terminates
        let a = model.find_entity_type("A").unwrap();
        let _ = model.root_of(a);
    }

    #[test]
    fn test_missing_discriminator_property() {
        let model = Model::new()
            .with_entity_type(EntityType::new("Animal").with_discriminator("Kind", true));
        assert!(matches!(
            model.validate(),
            Err(CheckError::PropertyNotFound { .. })
        ));
    }
}
