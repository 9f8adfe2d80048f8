///
/// The dialect-independent relational schema shape a concrete `Dao`
/// implementation maps onto its own SQL dialect. This module names
/// tables and columns; it emits no DDL and binds to no SQL dialect —
/// that translation is left to the host application.
///
/// Four groups (spec §4.5):
/// - definition tables: `aspect_def`, `property_def` (keyed by
///   `(aspect_def_id, name)`), `catalog_def`, `hierarchy_def`, plus the
///   many-to-many link tables binding a `CatalogDef` to the
///   `AspectDef`s/`HierarchyDef`s it informationally names.
/// - instance tables: `entity`, `catalog` (the one row per live
///   `Catalog`, carrying its species/upstream/strict/version),
///   `catalog_aspect_def` (the aspectage a *specific catalog instance*
///   has extended into, as opposed to the def-level link above),
///   `hierarchy` (one row per hierarchy instance), `aspect_instance`.
/// - a single generic value table (`property_value`) with one
///   populated column per `ValueType`, selected by a `value_type`
///   discriminator column.
/// - the five hierarchy-content tables holding each collection
///   variant's membership.
///

pub const ASPECT_DEF_TABLE: &str = "aspect_def";
pub const PROPERTY_DEF_TABLE: &str = "property_def";
pub const CATALOG_DEF_TABLE: &str = "catalog_def";
pub const HIERARCHY_DEF_TABLE: &str = "hierarchy_def";
pub const CATALOG_DEF_ASPECT_DEF_TABLE: &str = "catalog_def_aspect_def";
pub const CATALOG_DEF_HIERARCHY_DEF_TABLE: &str = "catalog_def_hierarchy_def";

pub const ENTITY_TABLE: &str = "entity";
pub const CATALOG_TABLE: &str = "catalog";
pub const CATALOG_ASPECT_DEF_TABLE: &str = "catalog_aspect_def";
pub const HIERARCHY_TABLE: &str = "hierarchy";
pub const ASPECT_INSTANCE_TABLE: &str = "aspect_instance";
pub const PROPERTY_VALUE_TABLE: &str = "property_value";

pub const ENTITY_LIST_TABLE: &str = "hierarchy_entity_list";
pub const ENTITY_SET_TABLE: &str = "hierarchy_entity_set";
pub const ENTITY_DIRECTORY_TABLE: &str = "hierarchy_entity_directory";
pub const ENTITY_TREE_TABLE: &str = "hierarchy_entity_tree";
pub const ASPECT_MAP_TABLE: &str = "hierarchy_aspect_map";

/// `property_value` carries one nullable column per `ValueType` (spec
/// §6: "a generic `property_value` table with one populated value
/// column per row"). Exactly one of these is non-null on any given row,
/// selected by that row's `value_type` discriminator.
pub const PROPERTY_VALUE_COLUMNS: &[&str] = &[
    "value_integer",
    "value_float",
    "value_boolean",
    "value_string",
    "value_text",
    "value_big_integer",
    "value_big_decimal",
    "value_date_time",
    "value_uri",
    "value_uuid",
    "value_clob",
    "value_blob",
];

/// The column name `property_value` uses for a given `ValueType`'s
/// payload, mirroring [`crate::value::ValueType::code3`]'s ordering.
#[must_use]
pub const fn value_column(value_type: crate::value::ValueType) -> &'static str {
    use crate::value::ValueType;
    match value_type {
        ValueType::Integer => "value_integer",
        ValueType::Float => "value_float",
        ValueType::Boolean => "value_boolean",
        ValueType::String => "value_string",
        ValueType::Text => "value_text",
        ValueType::BigInteger => "value_big_integer",
        ValueType::BigDecimal => "value_big_decimal",
        ValueType::DateTime => "value_date_time",
        ValueType::Uri => "value_uri",
        ValueType::Uuid => "value_uuid",
        ValueType::Clob => "value_clob",
        ValueType::Blob => "value_blob",
    }
}

/// The table backing one `HierarchyKind`'s membership content.
#[must_use]
pub const fn hierarchy_content_table(kind: crate::model::HierarchyKind) -> &'static str {
    use crate::model::HierarchyKind;
    match kind {
        HierarchyKind::EntityList => ENTITY_LIST_TABLE,
        HierarchyKind::EntitySet => ENTITY_SET_TABLE,
        HierarchyKind::EntityDirectory => ENTITY_DIRECTORY_TABLE,
        HierarchyKind::EntityTree => ENTITY_TREE_TABLE,
        HierarchyKind::AspectMap => ASPECT_MAP_TABLE,
    }
}
