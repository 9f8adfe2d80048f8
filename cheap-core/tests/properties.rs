use std::rc::Rc;

use cheap_core::aspect::Aspect;
use cheap_core::dao::{Dao, MemoryDao};
use cheap_core::entity::Entity;
use cheap_core::factory::Factory;
use cheap_core::hierarchy::EntitySet;
use cheap_core::model::{AspectDef, CatalogDef, PropertyDef};
use cheap_core::serialize::{catalog_def_from_json, catalog_def_to_json};
use cheap_core::value::{Value, ValueType};
use proptest::prelude::*;
use uuid::Uuid;

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<[u8; 16]>().prop_map(Uuid::from_bytes)
}

proptest! {
    /// Entity canonicalization: `get_or_register_entity(u)` returns the
    /// same handle on repeated calls within one factory (spec §8).
    #[test]
    fn entity_canonicalization_is_stable(id in arb_uuid()) {
        let factory = Factory::new();
        let first = factory.get_or_register_entity(id);
        let second = factory.get_or_register_entity(id);
        prop_assert_eq!(first, second);
    }

    /// Multi-valued properties: a read after a write returns a sequence
    /// whose length and element order match the last write (spec §8).
    #[test]
    fn multivalued_round_trip(values in prop::collection::vec(any::<i64>(), 0..8)) {
        let def = AspectDef::new("tags").with_property(
            PropertyDef::new("labels", ValueType::Integer).multivalued().nullable(),
        );
        let mut aspect = Aspect::new(Rc::new(def));
        let list = Value::list(ValueType::Integer, values.iter().copied().map(Value::Integer).collect()).unwrap();
        aspect.put("labels", list).unwrap();

        match aspect.get("labels").unwrap() {
            Value::List(ValueType::Integer, items) => {
                let read_back: Vec<i64> = items
                    .iter()
                    .map(|v| match v {
                        Value::Integer(i) => *i,
                        _ => panic!("expected Integer"),
                    })
                    .collect();
                prop_assert_eq!(read_back, values);
            }
            other => prop_assert!(false, "expected a List, got {other:?}"),
        }
    }

    /// EntitySet membership is insertion-ordered and duplicate-free
    /// regardless of how many times each entity is inserted.
    #[test]
    fn entity_set_insertion_order_is_stable(repeats in prop::collection::vec(0usize..4, 1..6)) {
        let entities: Vec<Entity> = (0..4).map(|_| Entity::new_v4()).collect();
        let mut set = EntitySet::new("members");
        let mut expected = Vec::new();
        for idx in &repeats {
            let e = entities[*idx];
            if set.insert(e) {
                expected.push(e);
            }
        }
        prop_assert_eq!(set.iter().collect::<Vec<_>>(), expected);
        prop_assert_eq!(set.len(), expected.len());
    }

    /// Serialize/deserialize round trip law for an AspectDef inside a
    /// CatalogDef (spec §8): every property definition survives the
    /// trip unchanged.
    #[test]
    fn catalog_def_json_round_trip(
        prop_names in prop::collection::hash_set("[a-z]{1,8}", 1..5),
    ) {
        let mut def_builder = AspectDef::new("widget");
        let mut names: Vec<String> = prop_names.into_iter().collect();
        names.sort();
        for name in &names {
            def_builder = def_builder.with_property(PropertyDef::new(name.clone(), ValueType::String));
        }
        let mut def = CatalogDef::new();
        def.extend_aspectage(def_builder).unwrap();

        let json = catalog_def_to_json(&def);
        let restored = catalog_def_from_json(&json).unwrap();
        let restored_widget = restored.aspect_def("widget").unwrap();
        let restored_names: Vec<String> = restored_widget.properties().iter().map(|p| p.name.clone()).collect();
        prop_assert_eq!(restored_names, names);
    }

    /// DAO save/load round-trip law (spec §8): whatever bytes were
    /// saved come back unchanged.
    #[test]
    fn dao_round_trip_preserves_bytes(payload in prop::collection::vec(any::<u8>(), 0..64)) {
        let dao = MemoryDao::new();
        let id = Uuid::new_v4();
        dao.save(id, &payload).unwrap();
        let loaded = dao.load(id).unwrap();
        prop_assert_eq!(loaded, payload);
    }
}
