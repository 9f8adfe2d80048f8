use std::rc::Rc;

use cheap::prelude::*;

#[test]
fn prelude_covers_a_basic_catalog_workflow() {
    let mut def = CatalogDef::new();
    def.extend_aspectage(
        AspectDef::new("person")
            .with_property(PropertyDef::new("name", ValueType::String))
            .with_property(PropertyDef::new("age", ValueType::Integer).nullable()),
    )
    .unwrap();

    let mut catalog = Catalog::new(def, Species::Sink, Some(Upstream::External("origin".into())), false).unwrap();

    let person_def = Rc::new(catalog.def().aspect_def("person").unwrap().clone());
    let mut aspect = Aspect::new(person_def);
    aspect.put("name", Value::string("Alice").unwrap()).unwrap();

    let entity = Entity::new_v4();
    let mut map = AspectMap::new("people", "person");
    map.put(entity, aspect).unwrap();

    catalog
        .add_hierarchy(HierarchyDef::aspect_map("people", "person"), Hierarchy::AspectMap(map))
        .unwrap();

    let hierarchy = catalog.hierarchy("people").unwrap();
    assert_eq!(hierarchy.kind(), HierarchyKind::AspectMap);
    assert_eq!(hierarchy.len(), 1);
}

#[test]
fn value_round_trips_through_the_cbor_atom_codec() {
    let value = Value::string("Alice").unwrap();
    let bytes = value_to_cbor(&value).unwrap();

    // also confirm the bytes are plain, well-formed CBOR, readable without this
    // crate's own `Value` type in scope
    assert!(serde_cbor::from_slice::<serde_cbor::Value>(&bytes).is_ok());

    assert_eq!(value_from_cbor(&bytes).unwrap(), value);
}

#[test]
fn public_error_reports_not_found_for_missing_hierarchy() {
    let catalog = Catalog::new(CatalogDef::new(), Species::Source, Some(Upstream::External("origin".into())), false)
        .unwrap();
    assert!(catalog.hierarchy("missing").is_none());

    let factory = Factory::new();
    let err: Error = factory.aspect_def("missing").unwrap_err().into();
    assert_eq!(err.origin, ErrorOrigin::Factory);
}
