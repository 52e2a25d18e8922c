use crate::dbs::{Database, DbError, DbResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Character, CreateCharacterRequest, Greeting};
use std::path::PathBuf;
use std::sync::RwLock;

const DB_PATH: &str = "db.json";

#[derive(Serialize, Deserialize, Default, Clone)]
struct LocalData {
    characters: Vec<Character>,
    greetings: Vec<Greeting>,
}

/// File-backed store for running without Postgres. With no path it is a
/// plain in-memory store, which is what the handler tests use.
pub struct LocalDatabase {
    data: RwLock<LocalData>,
    path: Option<PathBuf>,
}

impl LocalDatabase {
    pub fn load(path: Option<PathBuf>) -> Self {
        let path = path.or_else(|| Some(PathBuf::from(DB_PATH)));
        let data = match &path {
            Some(p) => std::fs::read_to_string(p)
                .ok()
                .and_then(|content| serde_json::from_str(&content).ok())
                .unwrap_or_default(),
            None => LocalData::default(),
        };
        Self {
            data: RwLock::new(data),
            path,
        }
    }

    /// In-memory only, nothing touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(LocalData::default()),
            path: None,
        }
    }

    fn save(&self, data: &LocalData) {
        if let Some(path) = &self.path
            && let Ok(content) = serde_json::to_string_pretty(data)
        {
            let _ = std::fs::write(path, content);
        }
    }
}

#[async_trait]
impl Database for LocalDatabase {
    async fn get_characters(&self) -> DbResult<Vec<Character>> {
        let data = self.data.read().unwrap();
        Ok(data.characters.clone())
    }

    async fn get_character(&self, character_id: i64) -> DbResult<Character> {
        let data = self.data.read().unwrap();
        data.characters
            .iter()
            .find(|c| c.id == character_id)
            .cloned()
            .ok_or_else(|| DbError::NotFound(format!("character {character_id}")))
    }

    async fn create_character(&self, character: CreateCharacterRequest) -> DbResult<Character> {
        let mut data = self.data.write().unwrap();
        let id = data.characters.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let character = Character {
            id,
            name: character.name,
            personality: character.personality,
            occupation: character.occupation,
            age: character.age,
        };
        data.characters.push(character.clone());
        self.save(&data);
        Ok(character)
    }

    async fn get_greetings(&self, character_id: i64) -> DbResult<Vec<Greeting>> {
        let data = self.data.read().unwrap();
        Ok(data
            .greetings
            .iter()
            .filter(|g| g.character_id == character_id)
            .cloned()
            .collect())
    }

    async fn add_greetings(&self, character_id: i64, texts: Vec<String>) -> DbResult<Vec<Greeting>> {
        let mut data = self.data.write().unwrap();

        if !data.characters.iter().any(|c| c.id == character_id) {
            return Err(DbError::NotFound(format!("character {character_id}")));
        }
        if data.greetings.iter().any(|g| g.character_id == character_id) {
            return Err(DbError::Conflict(format!(
                "greetings already generated for character {character_id}"
            )));
        }

        let mut next_id = data.greetings.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let mut added = Vec::with_capacity(texts.len());
        for text in texts {
            let greeting = Greeting {
                id: next_id,
                greeting_text: text,
                character_id,
            };
            next_id += 1;
            data.greetings.push(greeting.clone());
            added.push(greeting);
        }

        self.save(&data);
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateCharacterRequest {
        CreateCharacterRequest {
            name: name.to_string(),
            personality: "gruff".to_string(),
            occupation: "blacksmith".to_string(),
            age: 52,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let db = LocalDatabase::in_memory();
        let a = db.create_character(request("Brom")).await.unwrap();
        let b = db.create_character(request("Eda")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(db.get_characters().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_character_is_not_found() {
        let db = LocalDatabase::in_memory();
        assert!(matches!(
            db.get_character(42).await,
            Err(DbError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn second_greeting_batch_conflicts() {
        let db = LocalDatabase::in_memory();
        let brom = db.create_character(request("Brom")).await.unwrap();

        let added = db
            .add_greetings(brom.id, vec!["Well met.".to_string(), "Aye.".to_string()])
            .await
            .unwrap();
        assert_eq!(added.len(), 2);
        assert!(added.iter().all(|g| g.character_id == brom.id));

        let again = db.add_greetings(brom.id, vec!["Hm.".to_string()]).await;
        assert!(matches!(again, Err(DbError::Conflict(_))));
        assert_eq!(db.get_greetings(brom.id).await.unwrap().len(), 2);
    }
}
