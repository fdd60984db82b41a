//! Enum domain constraints, end to end through the plugin

mod common;

use checkwright_core::{DatabaseProvider, ValueKind};
use checkwright_ir::{EntityType, EnumType, Model, Property, ValueConverter};
use common::{enums, finalize, names, sql};
use pretty_assertions::assert_eq;

fn order_status() -> EnumType {
    EnumType::new("OrderStatus")
        .with_member("Active", 0)
        .with_member("Completed", 1)
}

fn single_enum_model(entity: &str, property: Property) -> Model {
    Model::new().with_entity_type(EntityType::new(entity).with_property(property))
}

fn enum_sql(enum_type: EnumType) -> Option<String> {
    let mut model = single_enum_model("Customer", Property::enumeration("Kind", enum_type));
    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();
    sql(&model, "Customer", "CK_Customer_Kind_Enum")
}

#[test]
fn test_enum_values_two_members() {
    let customer_type = EnumType::new("CustomerType")
        .with_member("Standard", 0)
        .with_member("Premium", 1);
    let mut model = single_enum_model(
        "Customer",
        Property::enumeration("CustomerType", customer_type),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(
        sql(&model, "Customer", "CK_Customer_CustomerType_Enum").as_deref(),
        Some("[CustomerType] BETWEEN 0 AND 1")
    );
}

#[test]
fn test_enum_values_with_gap() {
    let kind = EnumType::new("Kind").with_member("A", 0).with_member("C", 2);
    assert_eq!(enum_sql(kind).as_deref(), Some("[Kind] IN (0, 2)"));
}

#[test]
fn test_enum_values_contiguous_run() {
    let kind = (12..=16i32).fold(EnumType::new("Kind"), |kind, n| {
        kind.with_member(format!("V{}", n), n)
    });
    assert_eq!(enum_sql(kind).as_deref(), Some("[Kind] BETWEEN 12 AND 16"));
}

#[test]
fn test_enum_values_negative_run() {
    let kind = EnumType::new("Kind")
        .with_member("MinusTwo", -2)
        .with_member("MinusOne", -1);
    assert_eq!(enum_sql(kind).as_deref(), Some("[Kind] BETWEEN -2 AND -1"));
}

#[test]
fn test_enum_values_single_member() {
    let kind = EnumType::new("Kind").with_member("Only", 7);
    assert_eq!(enum_sql(kind).as_deref(), Some("[Kind] BETWEEN 7 AND 7"));
}

#[test]
fn test_enum_values_in_declaration_order() {
    let kind = EnumType::new("Kind")
        .with_member("Ten", 10)
        .with_member("One", 1)
        .with_member("Five", 5);
    assert_eq!(enum_sql(kind).as_deref(), Some("[Kind] IN (10, 1, 5)"));
}

#[test]
fn test_enum_names_with_string_converter() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status())
            .with_converter(ValueConverter::EnumToString),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(
        sql(&model, "Order", "CK_Order_OrderStatus_Enum").as_deref(),
        Some("[OrderStatus] IN (N'Active', N'Completed')")
    );
}

#[test]
fn test_enum_names_on_postgresql() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status())
            .with_converter(ValueConverter::EnumToString),
    );

    finalize(&mut model, enums(), DatabaseProvider::postgresql()).unwrap();

    assert_eq!(
        sql(&model, "Order", "CK_Order_OrderStatus_Enum").as_deref(),
        Some("\"OrderStatus\" IN ('Active', 'Completed')")
    );
}

#[test]
fn test_enum_with_number_converter() {
    let kind = EnumType::new("Kind").with_member("A", 1).with_member("B", 3);
    let mut model = single_enum_model(
        "Customer",
        Property::enumeration("Kind", kind).with_converter(ValueConverter::EnumToNumber(ValueKind::Int64)),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(
        sql(&model, "Customer", "CK_Customer_Kind_Enum").as_deref(),
        Some("[Kind] IN (CAST(1 AS bigint), CAST(3 AS bigint))")
    );
}

// ============================================================================
// Underlying Kinds
// ============================================================================

fn enum_sql_on(provider: DatabaseProvider, enum_type: EnumType) -> Option<String> {
    let mut model = single_enum_model("Customer", Property::enumeration("Kind", enum_type));
    finalize(&mut model, enums(), provider).unwrap();
    sql(&model, "Customer", "CK_Customer_Kind_Enum")
}

#[test]
fn test_byte_enum_uses_tinyint_literals() {
    let kind = EnumType::new("Kind")
        .with_underlying(ValueKind::UInt8)
        .with_member("A", 0)
        .with_member("B", 5);
    assert_eq!(
        enum_sql_on(DatabaseProvider::sql_server(), kind).as_deref(),
        Some("[Kind] IN (CAST(0 AS tinyint), CAST(5 AS tinyint))")
    );

    let run = EnumType::new("Kind")
        .with_underlying(ValueKind::UInt8)
        .with_member("A", 0)
        .with_member("B", 1)
        .with_member("C", 2);
    assert_eq!(
        enum_sql_on(DatabaseProvider::sql_server(), run).as_deref(),
        Some("[Kind] BETWEEN 0 AND 2")
    );
}

#[test]
fn test_long_enum_dedupes_mixed_member_kinds() {
    let kind = EnumType::new("Kind")
        .with_underlying(ValueKind::Int64)
        .with_member("A", 0i64)
        .with_member("Alias", 0)
        .with_member("B", 7i64);
    assert_eq!(
        enum_sql_on(DatabaseProvider::sql_server(), kind).as_deref(),
        Some("[Kind] IN (CAST(0 AS bigint), CAST(7 AS bigint))")
    );
}

#[test]
fn test_decimal_enum() {
    let kind = EnumType::new("Kind")
        .with_underlying(ValueKind::Decimal)
        .with_member("A", 1)
        .with_member("B", 3);
    assert_eq!(
        enum_sql_on(DatabaseProvider::postgresql(), kind).as_deref(),
        Some("\"Kind\" IN (1.0, 3.0)")
    );

    let run = EnumType::new("Kind")
        .with_underlying(ValueKind::Decimal)
        .with_member("A", 0)
        .with_member("B", 1)
        .with_member("C", 2);
    assert_eq!(
        enum_sql_on(DatabaseProvider::postgresql(), run).as_deref(),
        Some("\"Kind\" BETWEEN 0 AND 2")
    );
}

#[test]
fn test_member_outside_underlying_kind_skips() {
    let kind = EnumType::new("Kind")
        .with_underlying(ValueKind::UInt8)
        .with_member("A", 0)
        .with_member("Huge", 1000);
    assert_eq!(enum_sql_on(DatabaseProvider::sql_server(), kind), None);
}

#[test]
fn test_nullable_enum_is_constrained() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status()).nullable(),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(
        sql(&model, "Order", "CK_Order_OrderStatus_Enum").as_deref(),
        Some("[OrderStatus] BETWEEN 0 AND 1")
    );
}

#[test]
fn test_enum_uses_configured_column_name() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status()).with_column_name("status"),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(names(&model, "Order"), vec!["CK_Order_status_Enum"]);
}

#[test]
fn test_empty_enum_is_skipped() {
    let seller_status = EnumType::new("SellerStatus");
    let mut model = Model::new().with_entity_type(
        EntityType::new("Seller")
            .with_property(
                Property::enumeration("SellerStatusString", seller_status.clone())
                    .with_converter(ValueConverter::EnumToString),
            )
            .with_property(Property::enumeration("SellerStatusInt", seller_status)),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_flags_enum_is_skipped() {
    let file_status = EnumType::new("FileStatus")
        .flags()
        .with_member("Opened", 0)
        .with_member("Closed", 1)
        .with_member("ReadOnly", 2)
        .with_member("WriteOnly", 4);
    let mut model = single_enum_model("File", Property::enumeration("FileStatus", file_status));

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_native_database_enum_is_skipped() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status())
            .with_provider_kind(ValueKind::Enum("order_status".to_string())),
    );

    finalize(&mut model, enums(), DatabaseProvider::postgresql()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_view_is_skipped() {
    let mut model = Model::new().with_entity_type(
        EntityType::new("OrderSummary")
            .with_view_name("OrderSummaries")
            .with_property(Property::enumeration("OrderStatus", order_status())),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_property_excluded_from_table_is_skipped() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status()).without_table_column("Order"),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

#[test]
fn test_finalize_twice_is_idempotent() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status()),
    );

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();
    let first = model.clone();
    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(model, first);
    assert_eq!(model.check_constraint_count(), 1);
}

#[test]
fn test_disabled_enum_constraints() {
    let mut model = single_enum_model(
        "Order",
        Property::enumeration("OrderStatus", order_status()),
    );

    finalize(
        &mut model,
        common::discriminators(),
        DatabaseProvider::sql_server(),
    )
    .unwrap();

    assert_eq!(model.check_constraint_count(), 0);
}

// ============================================================================
// Inheritance
// ============================================================================

fn hierarchy(child_table: &str) -> Model {
    Model::new()
        .with_entity_type(
            EntityType::new("Parent").with_property(Property::enumeration("Status", order_status())),
        )
        .with_entity_type(
            EntityType::new("Child")
                .with_table_name(child_table)
                .with_base_type("Parent")
                .with_property(Property::enumeration(
                    "Mood",
                    EnumType::new("Mood").with_member("Happy", 0).with_member("Sad", 5),
                )),
        )
}

#[test]
fn test_table_per_hierarchy_naming() {
    let mut model = hierarchy("Parent");

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(names(&model, "Parent"), vec!["CK_Parent_Status_Enum"]);
    assert_eq!(names(&model, "Child"), vec!["CK_Parent_Mood_Enum"]);
    assert_eq!(
        sql(&model, "Child", "CK_Parent_Mood_Enum").as_deref(),
        Some("[Mood] IN (0, 5)")
    );
}

#[test]
fn test_table_per_type_naming() {
    let mut model = hierarchy("Child");

    finalize(&mut model, enums(), DatabaseProvider::sql_server()).unwrap();

    assert_eq!(names(&model, "Parent"), vec!["CK_Parent_Status_Enum"]);
    assert_eq!(names(&model, "Child"), vec!["CK_Child_Mood_Enum"]);
}
