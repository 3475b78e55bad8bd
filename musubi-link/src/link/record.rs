use std::path::Path;
use itertools::Itertools;
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error as _;
use musubi::util::err::{Result as ErrResult, err};

use super::{CrossingType, EdgeId, Link, XCode};

/// Serialized form `{ "name": .., "code": [[..], ..] }`.
#[derive(Serialize, Deserialize)]
struct LinkRecord {
    name: String,
    code: Vec<Vec<EdgeId>>
}

impl Serialize for Link {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        // only diagrams given by a PD code can be recovered from their code.
        if let Some(x) = self.crossings().iter().find(|x| x.ctype() != CrossingType::Xn) {
            return Err(ser::Error::custom(format!("cannot serialize a modified crossing {x}.")))
        }

        let record = LinkRecord {
            name: self.name().to_string(),
            code: self.crossings().iter().map(|x| x.edges().to_vec()).collect()
        };
        record.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let record = LinkRecord::deserialize(deserializer)?;
        let code: Vec<XCode> = record.code.iter().map(|c|
            XCode::try_from(c.as_slice()).map_err(|_|
                D::Error::custom(format!("expected 4 edges, found {}.", c.len()))
            )
        ).try_collect()?;

        let l = Link::try_from_pd_code(code).map_err(D::Error::custom)?;
        Ok(l.with_name(record.name))
    }
}

impl Link {
    pub fn from_json(json: &str) -> ErrResult<Self> {
        serde_json::from_str(json).map_err(|e| err!("{e}"))
    }

    pub fn to_json(&self) -> ErrResult<String> {
        serde_json::to_string(self).map_err(|e| err!("{e}"))
    }

    pub fn load<P>(path: P) -> ErrResult<Self>
    where P: AsRef<Path> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| err!("{}: {e}", path.display()))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use musubi::bitseq::Bit;
    use super::*;

    #[test]
    fn to_json() {
        let l = Link::from_pd_code([[0,0,1,1]]).with_name("K");
        assert_eq!(l.to_json(), Ok(r#"{"name":"K","code":[[0,0,1,1]]}"#.to_string()));
    }

    #[test]
    fn from_json() {
        let l = Link::from_json(r#"{ "name": "3_1", "code": [[1,4,2,5],[3,6,4,1],[5,2,6,3]] }"#).unwrap();
        assert_eq!(l, Link::trefoil());
        assert_eq!(l.name(), "3_1");
    }

    #[test]
    fn json_round_trip() {
        let l = Link::figure8();
        let json = l.to_json().unwrap();
        assert_eq!(Link::from_json(&json), Ok(l));
    }

    #[test]
    fn to_json_resolved() {
        let l = Link::trefoil().resolved_at(0, Bit::Bit0);
        assert!(l.to_json().is_err());

        let l = Link::trefoil().mirror();
        assert!(l.to_json().is_err());

        assert!(Link::unknot().to_json().is_err());
    }

    #[test]
    fn from_json_invalid() {
        assert!(Link::from_json(r#"{ "name": "K", "code": [[0,0,1]] }"#).is_err());
        assert!(Link::from_json(r#"{ "name": "K", "code": [[0,1,2,3]] }"#).is_err());
        assert!(Link::from_json(r#"{ "code": [[0,0,1,1]] }"#).is_err());
    }

    #[test]
    fn load_missing() {
        assert!(Link::load("no/such/file.json").is_err());
    }
}
