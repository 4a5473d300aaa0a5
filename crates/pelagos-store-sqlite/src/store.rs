//! [`SqliteStore`] — the SQLite implementation of [`DataStore`].

use std::{
  path::Path,
  sync::{Arc, Mutex},
};

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::SaltString;
use chrono::Utc;
use rand_core::OsRng;
use rusqlite::OptionalExtension as _;
use tokio::sync::broadcast;
use uuid::Uuid;

use pelagos_core::{
  event::{AuthEvent, AuthSession, ResourceChange},
  identity::{Identity, IdentityPatch, NewAccount, Role},
  resource::ResourceRecord,
  store::{AdminUserUpdate, DataStore, ProfileRow, TableSample},
};

use crate::{
  Error, Result,
  encode::{RawAccount, RawResource, decode_dt, decode_uuid, encode_dt, encode_uuid},
  schema::{SCHEMA, TABLES},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pelagos data store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection and channels are shared. All
/// clones see the same current session and feed the same subscribers.
#[derive(Clone)]
pub struct SqliteStore {
  conn:          tokio_rusqlite::Connection,
  auth_tx:       broadcast::Sender<AuthEvent>,
  resource_tx:   broadcast::Sender<ResourceChange>,
  /// Token of the session most recently minted by this store, mirroring
  /// the hosted store's persisted client session.
  current_token: Arc<Mutex<Option<String>>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::from_conn(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::from_conn(conn).await
  }

  async fn from_conn(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let (auth_tx, _) = broadcast::channel(64);
    let (resource_tx, _) = broadcast::channel(64);
    let store = Self {
      conn,
      auth_tx,
      resource_tx,
      current_token: Arc::new(Mutex::new(None)),
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map(|h| h.to_string())
      .map_err(|e| Error::PasswordHash(e.to_string()))
  }

  fn verify_password(password: &str, phc: &str) -> Result<bool> {
    let parsed =
      PasswordHash::new(phc).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(
      Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok(),
    )
  }

  /// Read one account row. Returns `None` if the account does not exist.
  async fn raw_account(&self, user_id: Uuid) -> Result<Option<RawAccount>> {
    let id_str = encode_uuid(user_id);

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, email, display_name, avatar_url, role, is_banned, created_at
               FROM accounts WHERE user_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawAccount {
                  user_id:      row.get(0)?,
                  email:        row.get(1)?,
                  display_name: row.get(2)?,
                  avatar_url:   row.get(3)?,
                  role:         row.get(4)?,
                  is_banned:    row.get(5)?,
                  created_at:   row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw)
  }

  /// Assemble an [`Identity`] from the account row plus the favorites
  /// edge table.
  async fn load_identity(&self, user_id: Uuid) -> Result<Option<Identity>> {
    let Some(raw) = self.raw_account(user_id).await? else {
      return Ok(None);
    };

    let favorites = self.list_favorites(user_id).await?;

    Ok(Some(Identity {
      id:               decode_uuid(&raw.user_id)?,
      display_name:     raw.display_name,
      email:            raw.email,
      avatar_url:       raw.avatar_url,
      role:             Role::parse(&raw.role).map_err(Error::Core)?,
      join_date:        decode_dt(&raw.created_at)?,
      favorite_species: favorites,
    }))
  }

  /// Resolve a token to its session without touching the current-token
  /// pointer.
  async fn lookup_session(&self, token: &str) -> Result<Option<AuthSession>> {
    let token_owned = token.to_string();

    let user_id_str: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id FROM sessions WHERE token = ?1",
              rusqlite::params![token_owned],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    let Some(user_id_str) = user_id_str else {
      return Ok(None);
    };

    let user_id = decode_uuid(&user_id_str)?;
    let Some(user) = self.load_identity(user_id).await? else {
      return Ok(None);
    };

    Ok(Some(AuthSession {
      token: token.to_string(),
      user,
    }))
  }
}

// ─── DataStore impl ──────────────────────────────────────────────────────────

impl DataStore for SqliteStore {
  type Error = Error;

  // ── Auth ──────────────────────────────────────────────────────────────────

  async fn sign_up(&self, new: NewAccount) -> Result<Identity> {
    let user_id = Uuid::new_v4();
    let created_at = Utc::now();

    let id_str = encode_uuid(user_id);
    let at_str = encode_dt(created_at);
    let email = new.email.clone();
    let display_name = new.display_name.clone();
    let hash = Self::hash_password(&new.password)?;

    let taken_email = new.email.clone();
    let inserted: bool = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM accounts WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO accounts (
             user_id, email, password_hash, display_name, avatar_url,
             role, is_banned, created_at
           ) VALUES (?1, ?2, ?3, ?4, NULL, 'user', 0, ?5)",
          rusqlite::params![id_str, email, hash, display_name, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::EmailTaken(taken_email));
    }

    Ok(Identity {
      id:               user_id,
      display_name:     new.display_name,
      email:            new.email,
      avatar_url:       None,
      role:             Role::User,
      join_date:        created_at,
      favorite_species: vec![],
    })
  }

  async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
    let email_owned = email.to_string();

    let found: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, password_hash FROM accounts WHERE email = ?1",
              rusqlite::params![email_owned],
              |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    let Some((user_id_str, hash)) = found else {
      return Err(Error::InvalidCredentials);
    };

    if !Self::verify_password(password, &hash)? {
      return Err(Error::InvalidCredentials);
    }

    let user_id = decode_uuid(&user_id_str)?;
    let user = self
      .load_identity(user_id)
      .await?
      .ok_or(Error::AccountNotFound(user_id))?;

    let token = Uuid::new_v4().hyphenated().to_string();
    let token_row = token.clone();
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![token_row, user_id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    let session = AuthSession { token: token.clone(), user };

    if let Ok(mut current) = self.current_token.lock() {
      *current = Some(token);
    }
    // No subscribers yet is fine; the event is simply dropped.
    let _ = self.auth_tx.send(AuthEvent::SignedIn(session.clone()));

    Ok(session)
  }

  async fn sign_out(&self, token: &str) -> Result<()> {
    let token_owned = token.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM sessions WHERE token = ?1",
          rusqlite::params![token_owned],
        )?;
        Ok(())
      })
      .await?;

    if let Ok(mut current) = self.current_token.lock()
      && current.as_deref() == Some(token)
    {
      *current = None;
    }

    // Emitted even for an already-revoked token so every subscriber
    // settles on the signed-out state.
    let _ = self.auth_tx.send(AuthEvent::SignedOut);

    Ok(())
  }

  async fn current_session(&self) -> Result<Option<AuthSession>> {
    let token = match self.current_token.lock() {
      Ok(current) => current.clone(),
      Err(_) => None,
    };
    let Some(token) = token else {
      return Ok(None);
    };
    self.lookup_session(&token).await
  }

  async fn session_for_token(&self, token: &str) -> Result<Option<AuthSession>> {
    self.lookup_session(token).await
  }

  async fn update_metadata(
    &self,
    user_id: Uuid,
    patch: IdentityPatch,
  ) -> Result<Identity> {
    let id_str = encode_uuid(user_id);
    let display_name = patch.display_name.clone();
    let avatar_url = patch.avatar_url.clone();
    let role = patch.role.map(|r| r.as_str().to_owned());
    let favorites = patch.favorite_species.clone();

    self
      .conn
      .call(move |conn| {
        // One transaction: a failed favorites replacement must not leave
        // the set half-wiped after the DELETE.
        let tx = conn.transaction()?;
        if let Some(name) = display_name {
          tx.execute(
            "UPDATE accounts SET display_name = ?1 WHERE user_id = ?2",
            rusqlite::params![name, id_str],
          )?;
        }
        if let Some(url) = avatar_url {
          tx.execute(
            "UPDATE accounts SET avatar_url = ?1 WHERE user_id = ?2",
            rusqlite::params![url, id_str],
          )?;
        }
        if let Some(role) = role {
          tx.execute(
            "UPDATE accounts SET role = ?1 WHERE user_id = ?2",
            rusqlite::params![role, id_str],
          )?;
        }
        if let Some(favorites) = favorites {
          tx.execute(
            "DELETE FROM favorites WHERE user_id = ?1",
            rusqlite::params![id_str],
          )?;
          for species in favorites {
            tx.execute(
              "INSERT OR IGNORE INTO favorites (user_id, species_id) VALUES (?1, ?2)",
              rusqlite::params![id_str, species],
            )?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    self
      .load_identity(user_id)
      .await?
      .ok_or(Error::AccountNotFound(user_id))
  }

  fn auth_events(&self) -> broadcast::Receiver<AuthEvent> {
    self.auth_tx.subscribe()
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  async fn is_favorited(&self, user_id: Uuid, species_id: &str) -> Result<bool> {
    let id_str = encode_uuid(user_id);
    let species = species_id.to_string();

    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM favorites WHERE user_id = ?1 AND species_id = ?2",
              rusqlite::params![id_str, species],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(exists)
  }

  async fn add_favorite(&self, user_id: Uuid, species_id: &str) -> Result<()> {
    let id_str = encode_uuid(user_id);
    let species = species_id.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO favorites (user_id, species_id) VALUES (?1, ?2)",
          rusqlite::params![id_str, species],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn remove_favorite(&self, user_id: Uuid, species_id: &str) -> Result<()> {
    let id_str = encode_uuid(user_id);
    let species = species_id.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM favorites WHERE user_id = ?1 AND species_id = ?2",
          rusqlite::params![id_str, species],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<String>> {
    let id_str = encode_uuid(user_id);

    let favorites: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT species_id FROM favorites WHERE user_id = ?1 ORDER BY species_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(favorites)
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  async fn list_resources(&self) -> Result<Vec<ResourceRecord>> {
    let raws: Vec<RawResource> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, category, excerpt, author, image_url, read_time, published, featured
           FROM resources ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawResource {
              id:        row.get(0)?,
              title:     row.get(1)?,
              category:  row.get(2)?,
              excerpt:   row.get(3)?,
              author:    row.get(4)?,
              image_url: row.get(5)?,
              read_time: row.get(6)?,
              published: row.get(7)?,
              featured:  row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawResource::into_record).collect()
  }

  async fn create_resource(&self, record: ResourceRecord) -> Result<()> {
    let id = record.id.clone();
    let category = record.category.as_str().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resources (
             id, title, category, excerpt, author, image_url, read_time, published, featured
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            record.id,
            record.title,
            category,
            record.excerpt,
            record.author,
            record.image_url,
            record.read_time,
            record.date,
            record.featured,
          ],
        )?;
        Ok(())
      })
      .await?;

    let _ = self.resource_tx.send(ResourceChange::Inserted(id));
    Ok(())
  }

  async fn update_resource(&self, record: ResourceRecord) -> Result<()> {
    let id = record.id.clone();
    let category = record.category.as_str().to_owned();

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE resources SET
             title = ?2, category = ?3, excerpt = ?4, author = ?5,
             image_url = ?6, read_time = ?7, published = ?8, featured = ?9
           WHERE id = ?1",
          rusqlite::params![
            record.id,
            record.title,
            category,
            record.excerpt,
            record.author,
            record.image_url,
            record.read_time,
            record.date,
            record.featured,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ResourceNotFound(id));
    }

    let _ = self.resource_tx.send(ResourceChange::Updated(id));
    Ok(())
  }

  async fn delete_resource(&self, id: &str) -> Result<()> {
    let id_owned = id.to_string();

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM resources WHERE id = ?1",
          rusqlite::params![id_owned],
        )?)
      })
      .await?;

    if changed > 0 {
      let _ = self.resource_tx.send(ResourceChange::Deleted(id.to_string()));
    }
    Ok(())
  }

  fn resource_events(&self) -> broadcast::Receiver<ResourceChange> {
    self.resource_tx.subscribe()
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  async fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
    let raws: Vec<RawAccount> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, email, display_name, avatar_url, role, is_banned, created_at
           FROM accounts ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAccount {
              user_id:      row.get(0)?,
              email:        row.get(1)?,
              display_name: row.get(2)?,
              avatar_url:   row.get(3)?,
              role:         row.get(4)?,
              is_banned:    row.get(5)?,
              created_at:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAccount::into_profile_row).collect()
  }

  async fn update_profile(
    &self,
    id: Uuid,
    update: AdminUserUpdate,
  ) -> Result<Option<ProfileRow>> {
    let id_str = encode_uuid(id);
    let display_name = update.display_name.clone();
    let role = update.role.map(|r| r.as_str().to_owned());
    let is_banned = update.is_banned;

    self
      .conn
      .call(move |conn| {
        if let Some(name) = display_name {
          conn.execute(
            "UPDATE accounts SET display_name = ?1 WHERE user_id = ?2",
            rusqlite::params![name, id_str],
          )?;
        }
        if let Some(role) = role {
          conn.execute(
            "UPDATE accounts SET role = ?1 WHERE user_id = ?2",
            rusqlite::params![role, id_str],
          )?;
        }
        if let Some(banned) = is_banned {
          conn.execute(
            "UPDATE accounts SET is_banned = ?1 WHERE user_id = ?2",
            rusqlite::params![banned, id_str],
          )?;
        }
        Ok(())
      })
      .await?;

    self
      .raw_account(id)
      .await?
      .map(RawAccount::into_profile_row)
      .transpose()
  }

  // ── Diagnostics ───────────────────────────────────────────────────────────

  fn table_names(&self) -> Vec<String> {
    TABLES.iter().map(|t| (*t).to_string()).collect()
  }

  async fn table_count(&self, table: &str) -> Result<u64> {
    // Table names are interpolated into SQL, so only the fixed set is
    // accepted.
    if !TABLES.contains(&table) {
      return Err(Error::UnknownTable(table.to_string()));
    }
    let sql = format!("SELECT COUNT(*) FROM {table}");

    let count: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))
      .await?;

    Ok(u64::try_from(count).unwrap_or(0))
  }

  async fn table_sample(&self, table: &str, limit: u32) -> Result<TableSample> {
    if !TABLES.contains(&table) {
      return Err(Error::UnknownTable(table.to_string()));
    }
    let count = self.table_count(table).await?;
    let sql = format!("SELECT * FROM {table} LIMIT {limit}");

    let (columns, rows) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let columns: Vec<String> =
          stmt.column_names().iter().map(|c| (*c).to_string()).collect();

        let mut rows_out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
          let mut object = serde_json::Map::new();
          for (i, column) in columns.iter().enumerate() {
            let value = match row.get_ref(i)? {
              rusqlite::types::ValueRef::Null => serde_json::Value::Null,
              rusqlite::types::ValueRef::Integer(n) => serde_json::Value::from(n),
              rusqlite::types::ValueRef::Real(f) => serde_json::Value::from(f),
              rusqlite::types::ValueRef::Text(t) => {
                serde_json::Value::from(String::from_utf8_lossy(t).into_owned())
              }
              rusqlite::types::ValueRef::Blob(_) => serde_json::Value::Null,
            };
            object.insert(column.clone(), value);
          }
          rows_out.push(serde_json::Value::Object(object));
        }
        Ok((columns, rows_out))
      })
      .await?;

    Ok(TableSample { count, columns, rows })
  }
}
