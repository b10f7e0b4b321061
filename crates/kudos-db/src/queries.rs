use crate::Database;
use crate::models::{FeedbackRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    /// Insert a new user. Returns false when the username is already taken
    /// (the primary-key constraint fires and the statement is rolled back).
    pub fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (username, password, email, first_name, last_name)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (username, password_hash, email, first_name, last_name),
            );
            match inserted {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    /// Delete a user; owned feedback rows go with it via ON DELETE CASCADE.
    /// Returns false when no such user exists.
    pub fn delete_user(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM users WHERE username = ?1", [username])?;
            Ok(deleted > 0)
        })
    }

    // -- Feedback --

    /// Insert a feedback row and return its generated id.
    pub fn insert_feedback(&self, title: &str, content: &str, username: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO feedback (title, content, username) VALUES (?1, ?2, ?3)",
                (title, content, username),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_feedback(&self, id: i64) -> Result<Option<FeedbackRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, title, content, username, created_at
                     FROM feedback WHERE id = ?1",
                    [id],
                    feedback_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_feedback_for_user(&self, username: &str) -> Result<Vec<FeedbackRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, content, username, created_at
                 FROM feedback WHERE username = ?1
                 ORDER BY created_at, id",
            )?;

            let rows = stmt
                .query_map([username], feedback_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn update_feedback(&self, id: i64, title: &str, content: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE feedback SET title = ?1, content = ?2 WHERE id = ?3",
                (title, content, id),
            )?;
            Ok(updated > 0)
        })
    }

    pub fn delete_feedback(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM feedback WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT username, password, email, first_name, last_name, created_at
         FROM users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                password: row.get(1)?,
                email: row.get(2)?,
                first_name: row.get(3)?,
                last_name: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn feedback_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackRow> {
    Ok(FeedbackRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        username: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn db_with_user(username: &str) -> Database {
        let db = Database::open_in_memory().unwrap();
        assert!(
            db.create_user(username, "digest", "a@example.com", "Alice", "Smith")
                .unwrap()
        );
        db
    }

    #[test]
    fn duplicate_username_rejected_without_second_row() {
        let db = db_with_user("alice");

        let inserted = db
            .create_user("alice", "other-digest", "b@example.com", "Bob", "Jones")
            .unwrap();
        assert!(!inserted);

        // Original row untouched
        let user = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(user.password, "digest");
        assert_eq!(user.first_name, "Alice");
    }

    #[test]
    fn missing_user_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn deleting_user_cascades_to_feedback() {
        let db = db_with_user("alice");
        db.insert_feedback("Hi", "Hello", "alice").unwrap();
        db.insert_feedback("Again", "More", "alice").unwrap();
        assert_eq!(db.list_feedback_for_user("alice").unwrap().len(), 2);

        assert!(db.delete_user("alice").unwrap());

        assert!(db.get_user_by_username("alice").unwrap().is_none());
        assert!(db.list_feedback_for_user("alice").unwrap().is_empty());
    }

    #[test]
    fn delete_missing_user_reports_false() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.delete_user("ghost").unwrap());
    }

    #[test]
    fn feedback_round_trip_and_update() {
        let db = db_with_user("alice");

        let id = db.insert_feedback("Hi", "Hello", "alice").unwrap();
        let row = db.get_feedback(id).unwrap().unwrap();
        assert_eq!(row.title, "Hi");
        assert_eq!(row.content, "Hello");
        assert_eq!(row.username, "alice");

        assert!(db.update_feedback(id, "New title", "New content").unwrap());
        let row = db.get_feedback(id).unwrap().unwrap();
        assert_eq!(row.title, "New title");
        assert_eq!(row.content, "New content");

        assert!(db.delete_feedback(id).unwrap());
        assert!(db.get_feedback(id).unwrap().is_none());
        assert!(!db.delete_feedback(id).unwrap());
    }

    #[test]
    fn feedback_requires_existing_user() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.insert_feedback("Hi", "Hello", "nobody").is_err());
    }

    #[test]
    fn feedback_listed_per_user_only() {
        let db = db_with_user("alice");
        db.create_user("bob", "digest", "b@example.com", "Bob", "Jones")
            .unwrap();
        db.insert_feedback("From alice", "a", "alice").unwrap();
        db.insert_feedback("From bob", "b", "bob").unwrap();

        let rows = db.list_feedback_for_user("alice").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "From alice");
    }
}
