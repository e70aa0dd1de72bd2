use crate::database::{users, SqlitePool};
use async_trait::async_trait;
use diesel::dsl::{exists, sql};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use domain::{DomainError, User, UserId, UserRepository};

// Database model
#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: i64,
    name: String,
    email: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    name: String,
    email: String,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::with_id(model.id, model.name, model.email)
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out a connection and run `f`, both on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(DomainError::repository)?;
            f(&mut *conn).map_err(DomainError::repository)
        })
        .await
        .map_err(DomainError::repository)?
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let name = user.name.clone();
        let email = user.email.clone();

        let result = match user.id {
            Some(id) => {
                self.with_conn(move |conn| {
                    let row = UserModel { id, name, email };
                    diesel::replace_into(users::table)
                        .values(&row)
                        .execute(conn)?;
                    Ok(row)
                })
                .await?
            }
            None => {
                self.with_conn(move |conn| {
                    // Take the write lock up front so the busy timeout applies
                    conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
                        diesel::insert_into(users::table)
                            .values(&NewUserModel { name, email })
                            .execute(conn)?;

                        // Row id of the insert made on this connection
                        let id = diesel::select(sql::<BigInt>("last_insert_rowid()"))
                            .get_result::<i64>(conn)?;

                        users::table
                            .filter(users::id.eq(id))
                            .select(UserModel::as_select())
                            .first::<UserModel>(conn)
                    })
                })
                .await?
            }
        };

        Ok(result.into())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let result = self
            .with_conn(move |conn| {
                users::table
                    .filter(users::id.eq(id))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()
            })
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let result = self
            .with_conn(|conn| {
                users::table
                    .order(users::id.asc())
                    .select(UserModel::as_select())
                    .load::<UserModel>(conn)
            })
            .await?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, DomainError> {
        self.with_conn(move |conn| {
            diesel::select(exists(users::table.filter(users::id.eq(id)))).get_result(conn)
        })
        .await
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), DomainError> {
        self.with_conn(move |conn| {
            diesel::delete(users::table.filter(users::id.eq(id))).execute(conn)
        })
        .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        self.with_conn(|conn| diesel::delete(users::table).execute(conn))
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count = self
            .with_conn(|conn| users::table.count().get_result::<i64>(conn))
            .await?;
        Ok(count as u64)
    }
}
