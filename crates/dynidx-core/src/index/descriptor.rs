use serde::Serialize;

///
/// GlobalIndexDescriptor
///
/// Structural request for creating one native composite index on an
/// entity's table. Serializes to the shape table-migration tooling expects:
///
/// ```text
/// { index_name, key_schema: [{attribute_name, key_type}],
///   projection: {projection_type, non_key_attributes?},
///   provisioned_throughput: {read_capacity_units, write_capacity_units} }
/// ```
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GlobalIndexDescriptor {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub projection: Projection,
    pub provisioned_throughput: ProvisionedThroughput,
}

///
/// KeySchemaElement
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

///
/// KeyType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

///
/// Projection
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "projection_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Projection {
    KeysOnly,
    Include { non_key_attributes: Vec<String> },
}

///
/// ProvisionedThroughput
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ProvisionedThroughput {
    pub read_capacity_units: u64,
    pub write_capacity_units: u64,
}
