use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::{dao::models::QuoteGameEntity, state::quote_game::QUOTES_PER_GAME};

/// Shape of a quote game inside the `quote_games` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoQuoteGameDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub quote_ids: Vec<i64>,
    pub created_at: DateTime,
    #[serde(default)]
    pub completed_at: Option<DateTime>,
    #[serde(default)]
    pub correct: Option<Vec<bool>>,
}

impl From<QuoteGameEntity> for MongoQuoteGameDocument {
    fn from(value: QuoteGameEntity) -> Self {
        Self {
            id: value.id.to_string(),
            quote_ids: value.quote_ids.to_vec(),
            created_at: DateTime::from_system_time(value.created_at),
            completed_at: value.completed_at.map(DateTime::from_system_time),
            correct: value.correct.map(|flags| flags.to_vec()),
        }
    }
}

impl TryFrom<MongoQuoteGameDocument> for QuoteGameEntity {
    type Error = MongoDaoError;

    fn try_from(doc: MongoQuoteGameDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&doc.id).map_err(|_| MongoDaoError::MalformedDocument {
            id: doc.id.clone(),
            reason: "invalid UUID",
        })?;

        let quote_ids: [i64; QUOTES_PER_GAME] =
            doc.quote_ids
                .try_into()
                .map_err(|_| MongoDaoError::MalformedDocument {
                    id: doc.id.clone(),
                    reason: "unexpected number of quote ids",
                })?;

        let correct = doc
            .correct
            .map(<[bool; QUOTES_PER_GAME]>::try_from)
            .transpose()
            .map_err(|_| MongoDaoError::MalformedDocument {
                id: doc.id.clone(),
                reason: "unexpected number of correctness flags",
            })?;

        Ok(Self {
            id,
            quote_ids,
            created_at: doc.created_at.to_system_time(),
            completed_at: doc.completed_at.map(DateTime::to_system_time),
            correct,
        })
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn entity_survives_document_conversion() {
        // BSON dates keep millisecond precision only.
        let created_at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        let entity = QuoteGameEntity {
            id: Uuid::new_v4(),
            quote_ids: [70, 905, 451],
            created_at,
            completed_at: Some(created_at + Duration::from_secs(12)),
            correct: Some([true, false, true]),
        };

        let document = MongoQuoteGameDocument::from(entity.clone());
        assert_eq!(document.id, entity.id.to_string());

        let restored = QuoteGameEntity::try_from(document).unwrap();
        assert_eq!(restored, entity);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let document = MongoQuoteGameDocument {
            id: Uuid::new_v4().to_string(),
            quote_ids: vec![1, 2],
            created_at: DateTime::from_system_time(SystemTime::now()),
            completed_at: None,
            correct: None,
        };
        let err = QuoteGameEntity::try_from(document).unwrap_err();
        assert!(matches!(
            err,
            MongoDaoError::MalformedDocument {
                reason: "unexpected number of quote ids",
                ..
            }
        ));

        let document = MongoQuoteGameDocument {
            id: "not-a-uuid".into(),
            quote_ids: vec![1, 2, 3],
            created_at: DateTime::from_system_time(SystemTime::now()),
            completed_at: None,
            correct: None,
        };
        assert!(QuoteGameEntity::try_from(document).is_err());
    }
}
