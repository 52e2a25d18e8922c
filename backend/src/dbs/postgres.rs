use crate::dbs::{Database, DbError, DbResult};
use async_trait::async_trait;
use shared::models::{Character, CreateCharacterRequest, Greeting};
use sqlx::{Pool, Postgres, Row, postgres::PgPoolOptions};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new().connect(database_url).await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> DbResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS characters (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                personality TEXT NOT NULL,
                occupation TEXT NOT NULL,
                age INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS greetings (
                id BIGSERIAL PRIMARY KEY,
                greeting_text TEXT NOT NULL,
                character_id BIGINT NOT NULL,
                FOREIGN KEY(character_id) REFERENCES characters(id)
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn character_from_row(row: &sqlx::postgres::PgRow) -> Character {
    Character {
        id: row.get("id"),
        name: row.get("name"),
        personality: row.get("personality"),
        occupation: row.get("occupation"),
        age: row.get("age"),
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn get_characters(&self) -> DbResult<Vec<Character>> {
        let rows = sqlx::query("SELECT id, name, personality, occupation, age FROM characters")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(character_from_row).collect())
    }

    async fn get_character(&self, character_id: i64) -> DbResult<Character> {
        let row = sqlx::query(
            "SELECT id, name, personality, occupation, age FROM characters WHERE id = $1",
        )
        .bind(character_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(character_from_row(&row)),
            None => Err(DbError::NotFound(format!("character {character_id}"))),
        }
    }

    async fn create_character(&self, character: CreateCharacterRequest) -> DbResult<Character> {
        let row = sqlx::query(
            "INSERT INTO characters (name, personality, occupation, age)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&character.name)
        .bind(&character.personality)
        .bind(&character.occupation)
        .bind(character.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(Character {
            id: row.get("id"),
            name: character.name,
            personality: character.personality,
            occupation: character.occupation,
            age: character.age,
        })
    }

    async fn get_greetings(&self, character_id: i64) -> DbResult<Vec<Greeting>> {
        let rows = sqlx::query(
            "SELECT id, greeting_text, character_id FROM greetings
             WHERE character_id = $1 ORDER BY id",
        )
        .bind(character_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Greeting {
                id: row.get("id"),
                greeting_text: row.get("greeting_text"),
                character_id: row.get("character_id"),
            })
            .collect())
    }

    async fn add_greetings(&self, character_id: i64, texts: Vec<String>) -> DbResult<Vec<Greeting>> {
        let mut tx = self.pool.begin().await?;

        // Lock the owning character row, then re-check. Two racing
        // generation requests must not both insert a greeting set.
        sqlx::query("SELECT id FROM characters WHERE id = $1 FOR UPDATE")
            .bind(character_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("character {character_id}")))?;

        let existing: i64 =
            sqlx::query("SELECT COUNT(*) AS count FROM greetings WHERE character_id = $1")
                .bind(character_id)
                .fetch_one(&mut *tx)
                .await?
                .get("count");

        if existing > 0 {
            return Err(DbError::Conflict(format!(
                "greetings already generated for character {character_id}"
            )));
        }

        let mut greetings = Vec::with_capacity(texts.len());
        for text in texts {
            let row = sqlx::query(
                "INSERT INTO greetings (greeting_text, character_id)
                 VALUES ($1, $2) RETURNING id",
            )
            .bind(&text)
            .bind(character_id)
            .fetch_one(&mut *tx)
            .await?;

            greetings.push(Greeting {
                id: row.get("id"),
                greeting_text: text,
                character_id,
            });
        }

        tx.commit().await?;
        Ok(greetings)
    }
}
