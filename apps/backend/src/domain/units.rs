use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::domain::formation::{Formation, UnitId};
use crate::errors::domain::{DomainError, ValidationKind};

/// A character or pet. Both share this shape for formation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub game_id: Uuid,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    pub element: Option<String>,
    pub rarity: Option<String>,
}

/// An equipment database entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub id: Uuid,
    pub game_id: Uuid,
    pub name: String,
    pub name_en: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub equip_type: String,
    pub rarity: String,
    pub stats: Option<serde_json::Value>,
    pub special_effect: Option<String>,
    pub how_to_obtain: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EquipmentFilter {
    pub query: Option<String>,
    pub equip_type: Option<String>,
}

impl EquipmentFilter {
    pub fn matches(&self, equipment: &Equipment) -> bool {
        let type_ok = self
            .equip_type
            .as_deref()
            .is_none_or(|t| t == "all" || t == equipment.equip_type);
        let query_ok = self.query.as_deref().is_none_or(|q| {
            matches_query(&equipment.name, q)
                || equipment
                    .name_en
                    .as_deref()
                    .is_some_and(|en| matches_query(en, q))
        });
        type_ok && query_ok
    }
}

fn fold(s: &str) -> String {
    s.nfkc().collect::<String>().to_lowercase()
}

/// Case-insensitive substring match after NFKC normalization.
///
/// A blank query matches everything.
pub fn matches_query(haystack: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || fold(haystack).contains(&fold(query))
}

fn optional(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn required(raw: &str, field: &str) -> Result<String, DomainError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Other(format!("Empty{field}")),
            format!("{} must not be empty", field.to_lowercase()),
        ));
    }
    Ok(value.to_string())
}

/// Admin-submitted character or pet fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitDraft {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
}

/// Unit fields ready to be written. Blank optional fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnit {
    pub name: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    pub element: Option<String>,
    pub rarity: Option<String>,
}

impl UnitDraft {
    pub fn validate(&self) -> Result<NewUnit, DomainError> {
        Ok(NewUnit {
            name: required(&self.name, "Name")?,
            image_url: optional(&self.image_url),
            description: optional(&self.description),
            role: optional(&self.role),
            element: optional(&self.element),
            rarity: optional(&self.rarity),
        })
    }
}

/// Admin-submitted equipment fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentDraft {
    pub name: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub equip_type: String,
    pub rarity: String,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(default)]
    pub special_effect: Option<String>,
    #[serde(default)]
    pub how_to_obtain: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub name: String,
    pub name_en: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub equip_type: String,
    pub rarity: String,
    pub stats: Option<Value>,
    pub special_effect: Option<String>,
    pub how_to_obtain: Option<String>,
}

impl EquipmentDraft {
    pub fn validate(&self) -> Result<NewEquipment, DomainError> {
        let stats = match &self.stats {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(Value::Object(map.clone())),
            Some(_) => {
                return Err(DomainError::validation(
                    ValidationKind::Other("InvalidStats".into()),
                    "stats must be a JSON object",
                ))
            }
        };

        Ok(NewEquipment {
            name: required(&self.name, "Name")?,
            name_en: optional(&self.name_en),
            image_url: optional(&self.image_url),
            description: optional(&self.description),
            equip_type: required(&self.equip_type, "Type")?,
            rarity: required(&self.rarity, "Rarity")?,
            stats,
            special_effect: optional(&self.special_effect),
            how_to_obtain: optional(&self.how_to_obtain),
        })
    }
}

/// One formation slot resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub unit_id: UnitId,
    /// `None` when the unit no longer exists in the game's roster.
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormationView {
    pub front: Vec<SlotView>,
    pub back: Vec<SlotView>,
}

/// Join formation slots against the roster so images always reflect the
/// current unit records.
pub fn resolve_formation(formation: &Formation, roster: &[Unit]) -> FormationView {
    let by_id: HashMap<UnitId, &Unit> = roster.iter().map(|u| (u.id, u)).collect();
    let view = |ids: &[UnitId]| -> Vec<SlotView> {
        ids.iter()
            .map(|id| {
                let unit = by_id.get(id);
                SlotView {
                    unit_id: *id,
                    name: unit.map(|u| u.name.clone()),
                    image_url: unit.and_then(|u| u.image_url.clone()),
                }
            })
            .collect()
    };

    FormationView {
        front: view(&formation.front),
        back: view(&formation.back),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, image: Option<&str>) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            name: name.into(),
            game_id: Uuid::nil(),
            image_url: image.map(Into::into),
            description: None,
            role: None,
            element: None,
            rarity: None,
        }
    }

    #[test]
    fn query_matching_is_case_and_width_insensitive() {
        assert!(matches_query("Rudy", "rud"));
        assert!(matches_query("Ｒｕｄｙ", "rudy"));
        assert!(matches_query("อัศวิน", "อัศ"));
        assert!(matches_query("anything", "  "));
        assert!(!matches_query("Rudy", "eileene"));
    }

    #[test]
    fn resolves_images_from_current_roster() {
        let rudy = unit("Rudy", Some("https://cdn/rudy-v2.png"));
        let ghost = Uuid::new_v4();
        let formation = Formation {
            front: vec![rudy.id],
            back: vec![ghost],
        };

        let view = resolve_formation(&formation, std::slice::from_ref(&rudy));
        assert_eq!(
            view.front[0].image_url.as_deref(),
            Some("https://cdn/rudy-v2.png")
        );
        assert_eq!(view.front[0].name.as_deref(), Some("Rudy"));
        assert_eq!(view.back[0].unit_id, ghost);
        assert_eq!(view.back[0].name, None);
    }

    #[test]
    fn equipment_filter_matches_english_name_and_type() {
        let sword = Equipment {
            id: Uuid::new_v4(),
            game_id: Uuid::nil(),
            name: "ดาบ".into(),
            name_en: Some("Blade of Dawn".into()),
            image_url: None,
            description: None,
            equip_type: "Weapon".into(),
            rarity: "Legendary".into(),
            stats: None,
            special_effect: None,
            how_to_obtain: None,
        };
        let by_en = EquipmentFilter {
            query: Some("dawn".into()),
            equip_type: None,
        };
        assert!(by_en.matches(&sword));

        let wrong_type = EquipmentFilter {
            query: None,
            equip_type: Some("Armor".into()),
        };
        assert!(!wrong_type.matches(&sword));

        let all = EquipmentFilter {
            query: None,
            equip_type: Some("all".into()),
        };
        assert!(all.matches(&sword));
    }

    #[test]
    fn unit_drafts_trim_and_require_a_name() {
        let draft = UnitDraft {
            name: "  Rudy ".into(),
            role: Some("Defense".into()),
            element: Some("   ".into()),
            ..Default::default()
        };
        let unit = draft.validate().unwrap();
        assert_eq!(unit.name, "Rudy");
        assert_eq!(unit.role.as_deref(), Some("Defense"));
        assert_eq!(unit.element, None);

        let blank = UnitDraft {
            name: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            blank.validate(),
            Err(DomainError::Validation(ValidationKind::Other(_), _))
        ));
    }

    #[test]
    fn equipment_drafts_need_type_rarity_and_object_stats() {
        let draft: EquipmentDraft = serde_json::from_value(serde_json::json!({
            "name": "ดาบ",
            "type": "Weapon",
            "rarity": "Legendary",
            "stats": {"atk": 120}
        }))
        .unwrap();
        let equipment = draft.validate().unwrap();
        assert_eq!(equipment.equip_type, "Weapon");
        assert_eq!(equipment.stats, Some(serde_json::json!({"atk": 120})));

        let no_type = EquipmentDraft {
            equip_type: "".into(),
            ..draft.clone()
        };
        assert!(no_type.validate().is_err());

        let list_stats = EquipmentDraft {
            stats: Some(serde_json::json!([1, 2])),
            ..draft
        };
        assert!(matches!(
            list_stats.validate(),
            Err(DomainError::Validation(ValidationKind::Other(kind), _)) if kind == "InvalidStats"
        ));
    }
}
