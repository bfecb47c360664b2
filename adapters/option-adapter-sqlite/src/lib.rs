//! SQLite-backed option adapter.
//!
//! Stores each settings record as one row holding the JSON-serialized
//! blob. Suitable for standalone hosts that have no platform option
//! store of their own.

use std::{fmt::Debug, path::Path};

use async_trait::async_trait;
use sqlx::{
	sqlite::{self, SqlitePool},
	Row,
};

use tabula::{prelude::*, OptionAdapter};

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

#[derive(Debug)]
pub struct OptionAdapterSqlite {
	db: SqlitePool,
}

impl OptionAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> TbResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.or(Err(Error::DbError))?;

		init_db(&db).await.inspect_err(inspect).or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS options (
			name TEXT NOT NULL PRIMARY KEY,
			value TEXT NOT NULL
		)",
	)
	.execute(db)
	.await?;
	Ok(())
}

#[async_trait]
impl OptionAdapter for OptionAdapterSqlite {
	async fn read_option(&self, name: &str) -> TbResult<Option<SettingsBlob>> {
		let row = sqlx::query("SELECT value FROM options WHERE name = ?")
			.bind(name)
			.fetch_optional(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		Ok(row.and_then(|r| {
			let value: String = r.get("value");
			serde_json::from_str(&value).ok()
		}))
	}

	async fn write_option(&self, name: &str, blob: &SettingsBlob) -> TbResult<bool> {
		let value = serde_json::to_string(blob).map_err(|_| Error::DbError)?;
		let res = sqlx::query(
			"INSERT INTO options (name, value) VALUES (?, ?)
			ON CONFLICT (name) DO UPDATE SET value = excluded.value",
		)
		.bind(name)
		.bind(value)
		.execute(&self.db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		Ok(res.rows_affected() > 0)
	}

	async fn create_option(&self, name: &str, initial: &SettingsBlob) -> TbResult<bool> {
		let value = serde_json::to_string(initial).map_err(|_| Error::DbError)?;
		let res = sqlx::query("INSERT OR IGNORE INTO options (name, value) VALUES (?, ?)")
			.bind(name)
			.bind(value)
			.execute(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		Ok(res.rows_affected() > 0)
	}
}

// vim: ts=4
