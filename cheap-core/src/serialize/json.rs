use std::rc::Rc;

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value as Json};
use std::str::FromStr;
use url::Url;
use uuid::Uuid;

use crate::aspect::Aspect;
use crate::catalog::{Catalog, Species, Upstream};
use crate::entity::Entity;
use crate::error::{InternalError, SerializeError};
use crate::hierarchy::{AspectMap, EntityDirectory, EntityList, EntitySet, EntityTree, Hierarchy, TreeNode};
use crate::model::{AspectDef, CatalogDef, HierarchyDef, HierarchyKind, PropertyDef};
use crate::value::{Value, ValueType};

///
/// DeserializeContext
///
/// The three-slot thread carried explicitly through deserialization:
/// the `AspectDef` currently in scope (so a bare property
/// value JSON can be read back against its declared type without
/// re-stating the type on every value), the `Entity` currently in scope
/// (for hierarchy entries that nest aspect content under their owning
/// entity), and the path of the tree branch currently being walked (for
/// `EntityTree`, so a deeply nested leaf can report its full path in an
/// error). Explicit and passed by value/reference at each call site —
/// never thread-local or global state.
///
#[derive(Clone, Debug, Default)]
pub struct DeserializeContext {
    pub current_aspect_def: Option<Rc<AspectDef>>,
    pub current_entity: Option<Entity>,
    pub current_tree_parent: Vec<String>,
}

impl DeserializeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_aspect_def(mut self, def: Rc<AspectDef>) -> Self {
        self.current_aspect_def = Some(def);
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.current_entity = Some(entity);
        self
    }

    #[must_use]
    pub fn push_segment(&self, segment: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.current_tree_parent.push(segment.into());
        next
    }
}

///
/// Catalog document ordering law: `aspectDefs` must appear
/// before any hierarchy entry that references one, and `hierarchyDefs`
/// before `hierarchies`. `aspectDefs` and `hierarchies` are JSON objects
/// keyed by name (spec §6, normative); their registration/insertion
/// order survives the round trip only because `serde_json`'s
/// `preserve_order` feature is enabled — without it this codec would be
/// relying on JSON object key order, which the grammar leaves
/// unspecified. `hierarchyDefs` stays an array, as spec §6 states.
///

/// Serialize a catalog's schema and hierarchy contents to a JSON tree.
pub fn catalog_def_to_json(def: &CatalogDef) -> Json {
    let mut aspect_defs = Map::new();
    for aspect_def in def.aspect_defs() {
        aspect_defs.insert(aspect_def.name.clone(), aspect_def_to_json(aspect_def));
    }
    let hierarchy_defs: Vec<Json> = def.hierarchy_defs().iter().map(hierarchy_def_to_json).collect();
    json!({
        "aspectDefs": Json::Object(aspect_defs),
        "hierarchyDefs": hierarchy_defs,
    })
}

/// Deserialize a `CatalogDef` from its JSON form, enforcing that no
/// `HierarchyDef` names an `AspectDef` that has not already appeared
/// earlier in `aspectDefs`.
pub fn catalog_def_from_json(json: &Json) -> Result<CatalogDef, InternalError> {
    let obj = expect_object(json)?;
    let mut def = CatalogDef::new();

    let aspect_defs = expect_object(field(obj, "aspectDefs")?)?;
    for entry in aspect_defs.values() {
        let aspect_def = aspect_def_from_json(entry)?;
        def.extend_aspectage(aspect_def)?;
    }

    let hierarchy_defs = expect_array(field(obj, "hierarchyDefs")?)?;
    for entry in hierarchy_defs {
        let hierarchy_def = hierarchy_def_from_json(entry)?;
        def.add_hierarchy_def(hierarchy_def)?;
    }

    Ok(def)
}

fn aspect_def_to_json(def: &AspectDef) -> Json {
    let properties: Vec<Json> = def.properties().iter().map(property_def_to_json).collect();
    json!({
        "name": def.name,
        "globalId": def.global_id.map(|id| id.to_string()),
        "uri": def.uri,
        "version": def.version,
        "readable": def.is_readable,
        "writable": def.is_writable,
        "canAddProperties": def.can_add_properties,
        "canRemoveProperties": def.can_remove_properties,
        "properties": properties,
    })
}

fn aspect_def_from_json(json: &Json) -> Result<AspectDef, InternalError> {
    let obj = expect_object(json)?;
    let name = expect_str(field(obj, "name")?)?;
    let mut def = AspectDef::new(name);
    def.is_readable = expect_bool(field(obj, "readable")?)?;
    def.is_writable = expect_bool(field(obj, "writable")?)?;
    def.can_add_properties = expect_bool(field(obj, "canAddProperties")?)?;
    def.can_remove_properties = expect_bool(field(obj, "canRemoveProperties")?)?;
    if let Some(Json::String(id)) = obj.get("globalId") {
        def.global_id = Some(Uuid::parse_str(id).map_err(|e| SerializeError::MalformedInput(e.to_string()))?);
    }
    if let Some(Json::String(uri)) = obj.get("uri") {
        def.uri = Some(uri.clone());
    }
    if let Some(Json::Number(v)) = obj.get("version") {
        def.version = v.as_u64().map(|v| v as u32);
    }
    let properties = expect_array(field(obj, "properties")?)?;
    let mut built = def;
    for entry in properties {
        built = built.with_property(property_def_from_json(entry)?);
    }
    Ok(built)
}

fn property_def_to_json(prop: &PropertyDef) -> Json {
    json!({
        "name": prop.name,
        "type": prop.value_type.wire_name(),
        "multivalued": prop.is_multivalued,
        "nullable": prop.is_nullable,
        "readable": prop.is_readable,
        "writable": prop.is_writable,
        "removable": prop.is_removable,
        "default": prop.default_value.as_ref().map(|v| value_to_json(v)),
        "doc": prop.doc,
    })
}

fn property_def_from_json(json: &Json) -> Result<PropertyDef, InternalError> {
    let obj = expect_object(json)?;
    let name = expect_str(field(obj, "name")?)?;
    let type_name = expect_str(field(obj, "type")?)?;
    let value_type = ValueType::from_wire_name(&type_name)
        .ok_or_else(|| SerializeError::MalformedInput(format!("unknown value type '{type_name}'")))?;
    let mut prop = PropertyDef::new(name, value_type);
    prop.is_multivalued = expect_bool(field(obj, "multivalued")?)?;
    prop.is_nullable = expect_bool(field(obj, "nullable")?)?;
    prop.is_readable = expect_bool(field(obj, "readable")?)?;
    prop.is_writable = expect_bool(field(obj, "writable")?)?;
    prop.is_removable = expect_bool(field(obj, "removable")?)?;
    if let Some(default_json) = obj.get("default").filter(|v| !v.is_null()) {
        prop.default_value = Some(value_from_json(default_json, value_type)?);
    }
    if let Some(Json::String(doc)) = obj.get("doc") {
        prop.doc = Some(doc.clone());
    }
    Ok(prop)
}

fn hierarchy_def_to_json(def: &HierarchyDef) -> Json {
    json!({
        "name": def.name,
        "kind": def.kind.wire_name(),
        "aspectDefName": def.aspect_def_name,
    })
}

fn hierarchy_def_from_json(json: &Json) -> Result<HierarchyDef, InternalError> {
    let obj = expect_object(json)?;
    let name = expect_str(field(obj, "name")?)?;
    let kind_name = expect_str(field(obj, "kind")?)?;
    let kind = HierarchyKind::from_wire_name(&kind_name)
        .ok_or_else(|| SerializeError::MalformedInput(format!("unknown hierarchy kind '{kind_name}'")))?;
    let aspect_def_name = match obj.get("aspectDefName") {
        Some(Json::String(s)) => Some(s.clone()),
        _ => None,
    };
    if kind == HierarchyKind::AspectMap && aspect_def_name.is_none() {
        return Err(SerializeError::MissingRequiredField("aspectDefName".into()).into());
    }
    Ok(HierarchyDef { name, kind, aspect_def_name })
}

/// Serialize one concrete `Hierarchy`'s *content* — the variant-shaped
/// payload spec §6 describes, not the `{type, name, content}` envelope
/// a catalog document wraps it in (see [`catalog_to_json`]). Members
/// referencing an aspect (`AspectMap`) are written with their property
/// values inline, not by re-stating the whole `AspectDef` — the reader
/// resolves value types through the `current_aspect_def` context slot.
pub fn hierarchy_to_json(hierarchy: &Hierarchy) -> Json {
    match hierarchy {
        Hierarchy::EntityList(h) => entity_list_to_json(h),
        Hierarchy::EntitySet(h) => entity_set_to_json(h),
        Hierarchy::EntityDirectory(h) => entity_directory_to_json(h),
        Hierarchy::EntityTree(h) => entity_tree_to_json(h),
        Hierarchy::AspectMap(h) => aspect_map_to_json(h),
    }
}

/// EntityList/EntitySet content: a bare array of UUID strings (spec §6).
fn entity_list_to_json(h: &EntityList) -> Json {
    Json::Array(h.iter().map(|e| Json::String(e.uuid().to_string())).collect())
}

fn entity_set_to_json(h: &EntitySet) -> Json {
    Json::Array(h.iter().map(|e| Json::String(e.uuid().to_string())).collect())
}

/// EntityDirectory content: a bare map of key→UUID string (spec §6).
/// Relies on `serde_json`'s `preserve_order` feature so the map
/// round-trips in the directory's own insertion order.
fn entity_directory_to_json(h: &EntityDirectory) -> Json {
    let mut entries = Map::new();
    for (key, entity) in h.iter() {
        entries.insert(key.to_string(), Json::String(entity.uuid().to_string()));
    }
    Json::Object(entries)
}

/// A tree node: `{entityId}` for a leaf, `{children: {name: node}}` for
/// a branch (spec §6's `{entityId?, isLeaf?, children{name→node}?}`).
fn tree_node_to_json(node: &TreeNode) -> Json {
    match node {
        TreeNode::Leaf(e) => json!({ "entityId": e.uuid().to_string(), "isLeaf": true }),
        TreeNode::Branch(children) => {
            let mut map = Map::new();
            for (key, child) in children {
                map.insert(key.clone(), tree_node_to_json(child));
            }
            json!({ "children": Json::Object(map) })
        }
    }
}

/// EntityTree content: the root is itself a node — an implicit branch
/// holding its named children, recursing through [`tree_node_to_json`].
/// Relies on `serde_json`'s `preserve_order` feature so children stay in
/// insertion order.
fn entity_tree_to_json(h: &EntityTree) -> Json {
    let mut map = Map::new();
    for (key, child) in h.root_children() {
        map.insert(key.clone(), tree_node_to_json(child));
    }
    json!({ "children": Json::Object(map) })
}

/// AspectMap content: a bare map of entity-UUID→aspect-record, where a
/// record is the flat `{<propName>: <value>, ...}` spec §6 describes
/// (`aspectDefName`/`entityId` are omitted — both are derivable from
/// context, the hierarchy's own `aspectDefName` and the outer map key).
fn aspect_map_to_json(h: &AspectMap) -> Json {
    let mut entries = Map::new();
    for (entity, aspect) in h.iter() {
        let mut record = Map::new();
        for (name, value) in aspect.iter() {
            record.insert(name.to_string(), value_to_json(value));
        }
        entries.insert(entity.uuid().to_string(), Json::Object(record));
    }
    Json::Object(entries)
}

/// Deserialize one `Hierarchy`'s content, given the `HierarchyDef` it
/// belongs to and (for `AspectMap`) the already-registered `AspectDef`
/// it binds to. `json` is the bare content value [`hierarchy_to_json`]
/// produces, not a `{type, name, content}` envelope.
pub fn hierarchy_from_json(
    json: &Json,
    def: &HierarchyDef,
    ctx: &DeserializeContext,
) -> Result<Hierarchy, InternalError> {
    match def.kind {
        HierarchyKind::EntityList => {
            let mut list = EntityList::new(def.name.clone());
            for entity_json in expect_array(json)? {
                list.push(Entity::from_uuid(parse_uuid(entity_json)?));
            }
            Ok(Hierarchy::EntityList(list))
        }
        HierarchyKind::EntitySet => {
            let mut set = EntitySet::new(def.name.clone());
            for entity_json in expect_array(json)? {
                set.insert(Entity::from_uuid(parse_uuid(entity_json)?));
            }
            Ok(Hierarchy::EntitySet(set))
        }
        HierarchyKind::EntityDirectory => {
            let mut dir = EntityDirectory::new(def.name.clone());
            let entries = expect_object(json)?;
            for (key, entity_json) in entries {
                dir.put(key.clone(), Entity::from_uuid(parse_uuid(entity_json)?));
            }
            Ok(Hierarchy::EntityDirectory(dir))
        }
        HierarchyKind::EntityTree => {
            let mut tree = EntityTree::new(def.name.clone());
            let root_obj = expect_object(json)?;
            if let Some(Json::Object(children)) = root_obj.get("children") {
                populate_tree(&mut tree, children, ctx)?;
            }
            Ok(Hierarchy::EntityTree(tree))
        }
        HierarchyKind::AspectMap => {
            let aspect_def_name = def
                .aspect_def_name
                .as_ref()
                .ok_or_else(|| SerializeError::MissingRequiredField("aspectDefName".into()))?;
            let aspect_def = ctx
                .current_aspect_def
                .clone()
                .ok_or_else(|| SerializeError::OrderingViolationAspect(aspect_def_name.clone()))?;
            if &aspect_def.name != aspect_def_name {
                return Err(SerializeError::UnknownAspectDef(aspect_def_name.clone()).into());
            }
            let mut map = AspectMap::new(def.name.clone(), aspect_def_name.clone());
            let entries = expect_object(json)?;
            for (entity_key, record_json) in entries {
                let entity = Entity::from_uuid(parse_uuid_str(entity_key)?);
                let mut aspect = Aspect::new(aspect_def.clone());
                let record = expect_object(record_json)?;
                for (name, value_json) in record {
                    let prop = aspect_def
                        .property(name)
                        .ok_or_else(|| SerializeError::MissingRequiredField(name.clone()))?;
                    let value = value_from_json(value_json, prop.value_type)?;
                    aspect
                        .put(name, value)
                        .map_err(|_| SerializeError::TypeMismatch { field: name.clone() })?;
                }
                map.put(entity, aspect)
                    .map_err(|_| SerializeError::TypeMismatch { field: entity.to_string() })?;
            }
            Ok(Hierarchy::AspectMap(map))
        }
    }
}

///
/// Catalog <-> JSON
///
/// The full document, with sections in a fixed order: `globalId`,
/// `species`, `strict`, `def`, `upstream`, `hierarchies`. `upstream` is
/// a bare string (or null) — whatever `catalog.upstream()` holds,
/// untagged, since `species.backs_external()` already disambiguates an
/// external URI from a catalog UUID on the way back in. `hierarchies`
/// is a JSON object keyed by hierarchy name (spec §6, normative);
/// relies on `serde_json`'s `preserve_order` feature so registration
/// order survives the round trip.
///

pub fn catalog_to_json(catalog: &Catalog) -> Json {
    let upstream = match catalog.upstream() {
        Some(Upstream::External(uri)) => Json::String(uri.clone()),
        Some(Upstream::Catalog(id)) => Json::String(id.to_string()),
        None => Json::Null,
    };
    let mut hierarchies = Map::new();
    for h in catalog.hierarchies() {
        hierarchies.insert(
            hierarchy_name(h).to_string(),
            json!({
                "type": hierarchy_kind(h).wire_name(),
                "name": hierarchy_name(h),
                "content": hierarchy_to_json(h),
            }),
        );
    }
    json!({
        "globalId": catalog.global_id().to_string(),
        "species": catalog.species().label(),
        "strict": catalog.is_strict(),
        "def": catalog_def_to_json(catalog.def()),
        "upstream": upstream,
        "hierarchies": Json::Object(hierarchies),
    })
}

fn hierarchy_kind(hierarchy: &Hierarchy) -> HierarchyKind {
    match hierarchy {
        Hierarchy::EntityList(_) => HierarchyKind::EntityList,
        Hierarchy::EntitySet(_) => HierarchyKind::EntitySet,
        Hierarchy::EntityDirectory(_) => HierarchyKind::EntityDirectory,
        Hierarchy::EntityTree(_) => HierarchyKind::EntityTree,
        Hierarchy::AspectMap(_) => HierarchyKind::AspectMap,
    }
}

fn hierarchy_name(hierarchy: &Hierarchy) -> &str {
    match hierarchy {
        Hierarchy::EntityList(h) => h.name(),
        Hierarchy::EntitySet(h) => h.name(),
        Hierarchy::EntityDirectory(h) => h.name(),
        Hierarchy::EntityTree(h) => h.name(),
        Hierarchy::AspectMap(h) => h.name(),
    }
}

/// Rebuild a catalog from its document form. `def` is deserialized and
/// registered first, so every hierarchy entry can resolve its
/// `HierarchyDef` (and, for an `AspectMap`, its `AspectDef`) before the
/// hierarchy content referencing it is read.
pub fn catalog_from_json(json: &Json) -> Result<Catalog, InternalError> {
    let obj = expect_object(json)?;
    let global_id = parse_uuid(field(obj, "globalId")?)?;
    let species_name = expect_str(field(obj, "species")?)?;
    let species = species_from_wire_name(&species_name)
        .ok_or_else(|| SerializeError::MalformedInput(format!("unknown species '{species_name}'")))?;
    let strict = expect_bool(field(obj, "strict")?)?;
    let def = catalog_def_from_json(field(obj, "def")?)?;
    let hierarchy_defs: Vec<HierarchyDef> = def.hierarchy_defs().to_vec();
    let upstream = match obj.get("upstream") {
        None | Some(Json::Null) => None,
        Some(Json::String(s)) if species.backs_external() => Some(Upstream::External(s.clone())),
        Some(Json::String(s)) => Some(Upstream::Catalog(
            Uuid::parse_str(s).map_err(|e| SerializeError::MalformedInput(e.to_string()))?,
        )),
        Some(_) => return Err(SerializeError::MalformedInput("upstream must be a string or null".into()).into()),
    };

    let mut catalog = Catalog::with_global_id(global_id, def, species, upstream, strict)?;

    let hierarchies = expect_object(field(obj, "hierarchies")?)?;
    for (name, entry) in hierarchies {
        let entry_obj = expect_object(entry)?;
        let hierarchy_def = hierarchy_defs
            .iter()
            .find(|h| &h.name == name)
            .cloned()
            .ok_or_else(|| SerializeError::UnknownHierarchyDef(name.clone()))?;
        let ctx = match &hierarchy_def.aspect_def_name {
            Some(aspect_def_name) => {
                let aspect_def = catalog
                    .def()
                    .aspect_def(aspect_def_name)
                    .cloned()
                    .ok_or_else(|| SerializeError::UnknownAspectDef(aspect_def_name.clone()))?;
                DeserializeContext::new().with_aspect_def(Rc::new(aspect_def))
            }
            None => DeserializeContext::new(),
        };
        let hierarchy = hierarchy_from_json(field(entry_obj, "content")?, &hierarchy_def, &ctx)?;
        catalog.restore_hierarchy(hierarchy_def, hierarchy)?;
    }

    Ok(catalog)
}

fn species_from_wire_name(name: &str) -> Option<Species> {
    match name {
        "source" => Some(Species::Source),
        "sink" => Some(Species::Sink),
        "mirror" => Some(Species::Mirror),
        "cache" => Some(Species::Cache),
        "clone" => Some(Species::Clone),
        "fork" => Some(Species::Fork),
        _ => None,
    }
}

fn populate_tree(
    tree: &mut EntityTree,
    children: &Map<String, Json>,
    ctx: &DeserializeContext,
) -> Result<(), InternalError> {
    for (key, node) in children {
        let path: Vec<&str> = ctx
            .current_tree_parent
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(key.as_str()))
            .collect();
        let node_obj = expect_object(node)?;
        if let Some(entity_id) = node_obj.get("entityId") {
            tree.insert(&path, Entity::from_uuid(parse_uuid(entity_id)?))?;
        } else if let Some(Json::Object(children)) = node_obj.get("children") {
            let child_ctx = ctx.push_segment(key.clone());
            populate_tree(tree, children, &child_ctx)?;
        } else {
            return Err(SerializeError::MalformedInput(format!("tree node '{key}' is neither a leaf nor a branch")).into());
        }
    }
    Ok(())
}

///
/// Value <-> JSON
///

pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null(_) => Json::Null,
        Value::Integer(i) => json!(i),
        Value::Float(f) => Json::from(*f),
        Value::Boolean(b) => Json::Bool(*b),
        Value::String(s) | Value::Text(s) | Value::Clob(s) => Json::String(s.clone()),
        Value::BigInteger(i) => Json::String(i.to_string()),
        Value::BigDecimal(d) => Json::String(d.to_string()),
        Value::DateTime(dt) => Json::String(dt.to_rfc3339()),
        Value::Uri(u) => Json::String(u.to_string()),
        Value::Uuid(u) => Json::String(u.to_string()),
        Value::Blob(bytes) => Json::String(hex_encode(bytes)),
        Value::List(_, items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}

pub fn value_from_json(json: &Json, expected: ValueType) -> Result<Value, InternalError> {
    if json.is_null() {
        return Ok(Value::Null(expected));
    }
    match expected {
        ValueType::Integer => json
            .as_i64()
            .map(Value::Integer)
            .ok_or_else(|| malformed("Integer")),
        ValueType::Float => json.as_f64().map(Value::Float).ok_or_else(|| malformed("Float")),
        ValueType::Boolean => json.as_bool().map(Value::Boolean).ok_or_else(|| malformed("Boolean")),
        ValueType::String => Value::string(expect_str(json)?),
        ValueType::Text => Ok(Value::Text(expect_str(json)?)),
        ValueType::Clob => Ok(Value::Clob(expect_str(json)?)),
        ValueType::BigInteger => BigInt::from_str(&expect_str(json)?)
            .map(Value::BigInteger)
            .map_err(|e| SerializeError::MalformedInput(e.to_string()).into()),
        ValueType::BigDecimal => Decimal::from_str(&expect_str(json)?)
            .map(Value::BigDecimal)
            .map_err(|e| SerializeError::MalformedInput(e.to_string()).into()),
        ValueType::DateTime => DateTime::parse_from_rfc3339(&expect_str(json)?)
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc)))
            .map_err(|e| SerializeError::MalformedInput(e.to_string()).into()),
        ValueType::Uri => Url::parse(&expect_str(json)?)
            .map(Value::Uri)
            .map_err(|e| SerializeError::MalformedInput(e.to_string()).into()),
        ValueType::Uuid => parse_uuid(json).map(Value::Uuid),
        ValueType::Blob => hex_decode(&expect_str(json)?).map(Value::Blob),
    }
}

fn malformed(type_name: &str) -> InternalError {
    SerializeError::MalformedInput(format!("expected a {type_name} value")).into()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Result<Vec<u8>, InternalError> {
    if !s.is_ascii() || s.len() % 2 != 0 {
        return Err(SerializeError::MalformedInput("odd-length or non-ASCII hex string".into()).into());
    }
    let bytes = s.as_bytes();
    (0..bytes.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| SerializeError::MalformedInput(e.to_string()).into())
        })
        .collect()
}

fn parse_uuid(json: &Json) -> Result<Uuid, InternalError> {
    Uuid::parse_str(&expect_str(json)?).map_err(|e| SerializeError::MalformedInput(e.to_string()).into())
}

fn parse_uuid_str(s: &str) -> Result<Uuid, InternalError> {
    Uuid::parse_str(s).map_err(|e| SerializeError::MalformedInput(e.to_string()).into())
}

///
/// Small JSON-shape helpers. `serde_json::Value` does not give useful
/// errors on shape mismatch by itself; these translate that into the
/// `SerializeError::MalformedInput`/`MissingRequiredField` vocabulary.
///

fn expect_object(json: &Json) -> Result<&Map<String, Json>, InternalError> {
    json.as_object()
        .ok_or_else(|| SerializeError::MalformedInput("expected a JSON object".into()).into())
}

fn expect_array(json: &Json) -> Result<&Vec<Json>, InternalError> {
    json.as_array()
        .ok_or_else(|| SerializeError::MalformedInput("expected a JSON array".into()).into())
}

fn expect_str(json: &Json) -> Result<String, InternalError> {
    json.as_str()
        .map(ToString::to_string)
        .ok_or_else(|| SerializeError::MalformedInput("expected a JSON string".into()).into())
}

fn expect_bool(json: &Json) -> Result<bool, InternalError> {
    json.as_bool()
        .ok_or_else(|| SerializeError::MalformedInput("expected a JSON boolean".into()).into())
}

fn field<'a>(obj: &'a Map<String, Json>, name: &str) -> Result<&'a Json, InternalError> {
    obj.get(name)
        .ok_or_else(|| SerializeError::MissingRequiredField(name.to_string()).into())
}
