//! User persistence
//!
//! Users load shallow by default (empty favorites and authored lists);
//! [`load_profile`] fills both relations.

use rusqlite::{params, Connection, Row};

use crate::db::{DbError, DbResult};
use crate::models::User;

use super::recipes;

/// Raw column values for one user row
fn columns_from_row(row: &Row) -> rusqlite::Result<(i64, String, String, String)> {
    Ok((
        row.get("id")?,
        row.get("name")?,
        row.get("description")?,
        row.get("password_hash")?,
    ))
}

/// Rebuild a shallow domain user from row columns
fn build_user(columns: (i64, String, String, String)) -> DbResult<User> {
    let (id, name, description, password_hash) = columns;
    let mut user = User::new(&name, Some(&description), &password_hash, &[], &[])
        .map_err(|e| DbError::Corrupt(format!("user {id}: {e}")))?;
    user.set_id(id);
    Ok(user)
}

/// Insert a new user and return it with its assigned id
pub fn create(conn: &Connection, user: &User) -> DbResult<User> {
    conn.execute(
        "INSERT INTO users (name, description, password_hash) VALUES (?1, ?2, ?3)",
        params![user.name(), user.description(), user.password_hash()],
    )?;

    let id = conn.last_insert_rowid();
    get_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
}

/// Get a user by id (shallow)
pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

    match stmt.query_row([id], columns_from_row) {
        Ok(columns) => Ok(Some(build_user(columns)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Get a user by exact name (shallow)
pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE name = ?1")?;

    match stmt.query_row([name], columns_from_row) {
        Ok(columns) => Ok(Some(build_user(columns)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List every user (shallow), ordered by name
pub fn list_all(conn: &Connection) -> DbResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY name")?;

    let rows = stmt
        .query_map([], columns_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(build_user).collect()
}

/// Check whether a user row exists
pub fn exists(conn: &Connection, id: i64) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Get a user with favorites and authored recipes filled in
pub fn load_profile(conn: &Connection, id: i64) -> DbResult<Option<User>> {
    let user = match get_by_id(conn, id)? {
        Some(user) => user,
        None => return Ok(None),
    };

    let favorites = recipes::favorites_for_user(conn, id)?;
    let made = recipes::list_for_author(conn, id)?;

    let mut user = user;
    user.set_favorites(&favorites);
    user.set_made_recipes(&made);
    Ok(Some(user))
}

/// Delete a user; favorites, ratings, and authored recipes cascade.
/// Returns false if no such user existed.
pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
    let rows = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    Ok(rows > 0)
}
