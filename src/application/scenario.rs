//! Mansion scenarios: the layout of rooms plus the clue -> suspect mapping.
//!
//! A scenario is plain data. [`Scenario::build`] turns it into the domain
//! structures the game runs on. Scenarios can be written as TOML:
//!
//! ```toml
//! title = "Casa Silva"
//!
//! [mansion]
//! name = "Hall de Entrada"
//! clue = "Luvas jogadas no chao"
//!
//! [mansion.left]
//! name = "Sala de Estar"
//!
//! [suspects]
//! "Luvas jogadas no chao" = "Sr. Silva"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainResult, ExplorationTree, LookupTable};

/// One room and the rooms reachable from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<RoomSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<RoomSpec>>,
}

impl RoomSpec {
    pub fn new(name: &str, clue: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            clue: clue.map(str::to_string),
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, room: RoomSpec) -> Self {
        self.left = Some(Box::new(room));
        self
    }

    pub fn with_right(mut self, room: RoomSpec) -> Self {
        self.right = Some(Box::new(room));
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    #[serde(default)]
    pub title: String,
    pub mansion: RoomSpec,
    /// Clue text -> suspect name.
    #[serde(default)]
    pub suspects: BTreeMap<String, String>,
}

impl Scenario {
    /// The built-in seven room mansion.
    ///
    /// ```text
    /// Hall de Entrada [Luvas jogadas no chao]
    /// ├── Sala de Estar [Copo quebrado]
    /// │   ├── Biblioteca [Livro rasgado]
    /// │   └── Escritorio [Carta sem assinatura]
    /// └── Cozinha [Faca sem cabo]
    ///     ├── Sala de Jantar [Guardanapo com monograma]
    ///     └── Jardim [Pegadas de lama]
    /// ```
    pub fn reference() -> Self {
        let mansion = RoomSpec::new("Hall de Entrada", Some("Luvas jogadas no chao"))
            .with_left(
                RoomSpec::new("Sala de Estar", Some("Copo quebrado"))
                    .with_left(RoomSpec::new("Biblioteca", Some("Livro rasgado")))
                    .with_right(RoomSpec::new("Escritorio", Some("Carta sem assinatura"))),
            )
            .with_right(
                RoomSpec::new("Cozinha", Some("Faca sem cabo"))
                    .with_left(RoomSpec::new("Sala de Jantar", Some("Guardanapo com monograma")))
                    .with_right(RoomSpec::new("Jardim", Some("Pegadas de lama"))),
            );

        let suspects = [
            ("Luvas jogadas no chao", "Sr. Silva"),
            ("Livro rasgado", "Sr. Silva"),
            ("Guardanapo com monograma", "Sr. Silva"),
            ("Copo quebrado", "Sra. Pereira"),
            ("Pegadas de lama", "Sra. Pereira"),
            ("Carta sem assinatura", "Dr. Costa"),
            ("Faca sem cabo", "Dr. Costa"),
        ]
        .into_iter()
        .map(|(clue, suspect)| (clue.to_string(), suspect.to_string()))
        .collect();

        Self {
            title: "O Misterio da Mansao".to_string(),
            mansion,
            suspects,
        }
    }

    /// Parses a scenario from TOML. `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::Scenario {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Scenario {
            origin: self.title.clone(),
            message: format!("serialize: {e}"),
        })
    }

    /// Builds the room tree and a lookup table with `bucket_count` buckets.
    #[instrument(level = "debug", skip(self), fields(title = %self.title))]
    pub fn build(&self, bucket_count: usize) -> DomainResult<(ExplorationTree, LookupTable)> {
        let mut tree = ExplorationTree::new();
        let root = tree.create_room(&self.mansion.name, self.mansion.clue.as_deref())?;

        let mut stack = vec![(&self.mansion, root)];
        while let Some((room, id)) = stack.pop() {
            if let Some(left) = room.left.as_deref() {
                let child = tree.add_left(id, &left.name, left.clue.as_deref())?;
                stack.push((left, child));
            }
            if let Some(right) = room.right.as_deref() {
                let child = tree.add_right(id, &right.name, right.clue.as_deref())?;
                stack.push((right, child));
            }
        }

        let mut table = LookupTable::with_buckets(bucket_count)?;
        table.extend(&self.suspects);
        debug!("built {} rooms, {} associations", tree.len(), table.len());

        Ok((tree, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_has_seven_rooms_two_levels() {
        let (tree, table) = Scenario::reference().build(101).unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_names().len(), 4);
        assert_eq!(table.len(), 7);
        assert_eq!(table.suspects(), vec!["Dr. Costa", "Sr. Silva", "Sra. Pereira"]);
    }

    #[test]
    fn test_toml_round_trip_keeps_layout() {
        let scenario = Scenario::reference();
        let text = scenario.to_toml().unwrap();
        let parsed = Scenario::from_toml_str(&text, "test").unwrap();
        assert_eq!(parsed, scenario);
    }

    #[test]
    fn test_invalid_room_fails_build() {
        let scenario = Scenario {
            title: String::new(),
            mansion: RoomSpec::new("Hall", None).with_left(RoomSpec::new("", None)),
            suspects: BTreeMap::new(),
        };
        assert!(scenario.build(101).is_err());
    }

    #[test]
    fn test_missing_mansion_is_error() {
        let result = Scenario::from_toml_str("title = \"x\"\n", "inline");
        assert!(matches!(result, Err(ApplicationError::Scenario { .. })));
    }
}
