//! Serde helpers for SurrealDB record ids
//!
//! Record ids cross the API boundary as `"table:key"` strings but come back
//! from the database in the SDK's native representation; these adapters
//! accept both.

use serde::{Deserialize, Deserializer, Serializer};
use serde::de::Error as DeError;
use surrealdb::RecordId;

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Native(RecordId),
    Text(String),
}

impl IdRepr {
    fn into_record_id<E: DeError>(self) -> Result<RecordId, E> {
        match self {
            IdRepr::Native(id) => Ok(id),
            IdRepr::Text(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid record id: {s}"))),
        }
    }
}

/// `Option<RecordId>` as an optional `"table:key"` string
pub mod option_record_id {
    use super::*;

    pub fn serialize<S>(id: &Option<RecordId>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&id.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<IdRepr>::deserialize(d)? {
            Some(repr) => repr.into_record_id().map(Some),
            None => Ok(None),
        }
    }
}
