//! Discriminator domain constraints, end to end through the plugin

mod common;

use checkwright_core::{DatabaseProvider, Value};
use checkwright_ir::{EntityType, Model, Property};
use common::{discriminators, finalize, names, sql};
use pretty_assertions::assert_eq;

fn parent(complete: bool) -> EntityType {
    EntityType::new("Parent")
        .with_property(Property::int("Id"))
        .with_property(Property::string("Discriminator"))
        .with_discriminator("Discriminator", complete)
        .with_discriminator_value("Parent")
}

fn child(table: &str) -> EntityType {
    EntityType::new("Child")
        .with_table_name(table)
        .with_base_type("Parent")
        .with_property(Property::string("ChildProperty"))
        .with_discriminator_value("Child")
}

#[test]
fn test_discriminator_values_in_model_order() {
    let mut model = Model::new()
        .with_entity_type(child("Parent"))
        .with_entity_type(parent(true));

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(names(&model, "Parent"), vec!["CK_Parent_Discriminator"]);
    assert_eq!(
        sql(&model, "Parent", "CK_Parent_Discriminator").as_deref(),
        Some("[Discriminator] IN (N'Child', N'Parent')")
    );
    assert!(names(&model, "Child").is_empty());
}

#[test]
fn test_root_first_model_order() {
    let mut model = Model::new()
        .with_entity_type(parent(true))
        .with_entity_type(child("Parent"));

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(
        sql(&model, "Parent", "CK_Parent_Discriminator").as_deref(),
        Some("[Discriminator] IN (N'Parent', N'Child')")
    );
}

#[test]
fn test_incomplete_discriminator_is_skipped() {
    let mut model = Model::new()
        .with_entity_type(parent(false))
        .with_entity_type(child("Parent"));

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_abstract_types_contribute_nothing() {
    let mut model = Model::new()
        .with_entity_type(
            EntityType::new("Animal")
                .abstract_type()
                .with_property(Property::string("Kind"))
                .with_discriminator("Kind", true)
                .with_discriminator_value("Animal"),
        )
        .with_entity_type(
            EntityType::new("Pet")
                .abstract_type()
                .with_table_name("Animal")
                .with_base_type("Animal")
                .with_discriminator_value("Pet"),
        )
        .with_entity_type(
            EntityType::new("Cat")
                .with_table_name("Animal")
                .with_base_type("Pet")
                .with_discriminator_value("Cat"),
        )
        .with_entity_type(
            EntityType::new("Dog")
                .with_table_name("Animal")
                .with_base_type("Pet")
                .with_discriminator_value("Dog"),
        );

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(
        sql(&model, "Animal", "CK_Animal_Discriminator").as_deref(),
        Some("[Kind] IN (N'Cat', N'Dog')")
    );
}

#[test]
fn test_integer_discriminator() {
    let mut model = Model::new()
        .with_entity_type(
            EntityType::new("Vehicle")
                .with_property(Property::int("Type"))
                .with_discriminator("Type", true)
                .with_discriminator_value(1),
        )
        .with_entity_type(
            EntityType::new("Truck")
                .with_table_name("Vehicle")
                .with_base_type("Vehicle")
                .with_discriminator_value(2),
        )
        .with_entity_type(
            EntityType::new("Ghost")
                .with_table_name("Vehicle")
                .with_base_type("Vehicle")
                .with_discriminator_value(Value::Null),
        );

    finalize(&mut model, discriminators(), DatabaseProvider::sqlite()).unwrap();

    assert_eq!(
        sql(&model, "Vehicle", "CK_Vehicle_Discriminator").as_deref(),
        Some("\"Type\" IN (1, 2)")
    );
}

#[test]
fn test_hierarchy_without_values_is_skipped() {
    let mut model = Model::new().with_entity_type(
        EntityType::new("Parent")
            .with_property(Property::string("Discriminator"))
            .with_discriminator("Discriminator", true),
    );

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_table_per_type_constrains_root_only() {
    let mut model = Model::new()
        .with_entity_type(parent(true))
        .with_entity_type(child("Child"));

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(names(&model, "Parent"), vec!["CK_Parent_Discriminator"]);
    assert!(names(&model, "Child").is_empty());
}

#[test]
fn test_view_root_is_skipped() {
    let mut model = Model::new()
        .with_entity_type(parent(true).with_view_name("ParentView"))
        .with_entity_type(child("Parent"));

    finalize(&mut model, discriminators(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_discriminator_disabled() {
    let mut model = Model::new()
        .with_entity_type(parent(true))
        .with_entity_type(child("Parent"));

    finalize(&mut model, common::enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}
