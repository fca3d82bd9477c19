//! Fetch results handed over by the network layer

pub mod loader;
pub mod preprocessing;

use serde::{Deserialize, Serialize};

/// An item as returned by the influence API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, alias = "auto_detected_type")]
    pub item_type: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year: None,
            description: None,
            item_type: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// A person, organization or collective credited on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,

    pub name: String,

    /// person, organization or collective
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// One influence relation between two items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(alias = "from_item")]
    pub from: Item,

    #[serde(alias = "to_item")]
    pub to: Item,

    pub confidence: f64,

    #[serde(default)]
    pub influence_type: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub explanation: String,

    /// Explicit cluster tags; derived from the category when absent
    #[serde(default)]
    pub clusters: Option<Vec<String>>,

    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub year_of_influence: Option<i32>,
}

impl Relation {
    pub fn new(from: Item, to: Item, confidence: f64, category: impl Into<String>) -> Self {
        Self {
            from,
            to,
            confidence,
            influence_type: String::new(),
            category: category.into(),
            explanation: String::new(),
            clusters: None,
            scope: None,
            source: None,
            year_of_influence: None,
        }
    }
}

/// Which API call produced a fetch result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchDirection {
    /// `fetchInfluences`: neighbors sit on the `from` side
    #[default]
    Incoming,
    /// `fetchOutgoingInfluences`: neighbors sit on the `to` side
    Outgoing,
}

/// A focal item plus its direct relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    #[serde(alias = "mainItem")]
    pub main_item: Item,

    #[serde(default, alias = "influences")]
    pub relations: Vec<Relation>,

    #[serde(default)]
    pub direction: FetchDirection,

    /// Creators credited on the main item
    #[serde(default)]
    pub creators: Vec<Creator>,
}

impl FetchResult {
    pub fn incoming(main_item: Item, relations: Vec<Relation>) -> Self {
        Self {
            main_item,
            relations,
            direction: FetchDirection::Incoming,
            creators: Vec::new(),
        }
    }

    pub fn outgoing(main_item: Item, relations: Vec<Relation>) -> Self {
        Self {
            main_item,
            relations,
            direction: FetchDirection::Outgoing,
            creators: Vec::new(),
        }
    }

    /// The neighbor end of `relation`, or `None` when the relation's focal
    /// end does not match this result's main item.
    pub fn neighbor<'a>(&self, relation: &'a Relation) -> Option<&'a Item> {
        let (focal_end, neighbor) = match self.direction {
            FetchDirection::Incoming => (&relation.to, &relation.from),
            FetchDirection::Outgoing => (&relation.from, &relation.to),
        };

        if focal_end.id != self.main_item.id || neighbor.id == self.main_item.id {
            return None;
        }
        Some(neighbor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_field_names() {
        let json = r#"{
            "main_item": {"id": "m1", "name": "Main"},
            "influences": [{
                "from_item": {"id": "a1", "name": "A", "year": 1959, "auto_detected_type": "film"},
                "to_item": {"id": "m1", "name": "Main"},
                "confidence": 0.8,
                "influence_type": "stylistic",
                "category": "Cinema",
                "explanation": "shots",
                "scope": "macro"
            }]
        }"#;

        let fetch: FetchResult = serde_json::from_str(json).unwrap();
        assert_eq!(fetch.direction, FetchDirection::Incoming);
        assert_eq!(fetch.relations.len(), 1);
        assert_eq!(fetch.relations[0].from.item_type.as_deref(), Some("film"));
        assert_eq!(fetch.relations[0].clusters, None);
        assert!(fetch.creators.is_empty());
    }

    #[test]
    fn decodes_creators_and_empty_tag_lists() {
        let json = r#"{
            "main_item": {"id": "m1", "name": "Main"},
            "influences": [{
                "from_item": {"id": "a1", "name": "A"},
                "to_item": {"id": "m1", "name": "Main"},
                "confidence": 0.8,
                "influence_type": "stylistic",
                "category": "Cinema",
                "explanation": "shots",
                "clusters": []
            }],
            "categories": ["Cinema"],
            "creators": [
                {"id": "c1", "name": "Eric B. & Rakim", "type": "collective"},
                {"id": "c2", "name": "Marley Marl"}
            ]
        }"#;

        let fetch: FetchResult = serde_json::from_str(json).unwrap();
        assert_eq!(fetch.relations[0].clusters, Some(Vec::new()));
        assert_eq!(fetch.creators.len(), 2);
        assert_eq!(fetch.creators[0].kind, "collective");
        assert_eq!(fetch.creators[1].kind, "");
    }

    #[test]
    fn neighbor_follows_direction() {
        let main = Item::new("m", "Main");
        let other = Item::new("o", "Other");

        let incoming = FetchResult::incoming(
            main.clone(),
            vec![Relation::new(other.clone(), main.clone(), 0.5, "x")],
        );
        assert_eq!(incoming.neighbor(&incoming.relations[0]).map(|i| i.id.as_str()), Some("o"));

        let outgoing = FetchResult::outgoing(
            main.clone(),
            vec![Relation::new(main.clone(), other.clone(), 0.5, "x")],
        );
        assert_eq!(outgoing.neighbor(&outgoing.relations[0]).map(|i| i.id.as_str()), Some("o"));

        // Wrong shape for the declared direction
        assert!(incoming.neighbor(&outgoing.relations[0]).is_none());
    }

    #[test]
    fn self_relation_has_no_neighbor() {
        let main = Item::new("m", "Main");
        let fetch = FetchResult::incoming(
            main.clone(),
            vec![Relation::new(main.clone(), main.clone(), 0.5, "x")],
        );
        assert!(fetch.neighbor(&fetch.relations[0]).is_none());
    }
}
