use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use ratehub_domain::{PageRequest, Sort};
use ratehub_schema::{ratings, stores, transactions, users};

use crate::domain::repository::{
    RatingRepository, StoreRepository, TransactionRepository, UserRepository,
};
use crate::domain::types::{
    Rating, RatingAggregate, RatingOutcome, RatingUpsert, Store, StoreFilter, StoreSortBy,
    Transaction, TransactionStats, User, UserFilter, UserSortBy,
};
use crate::error::ApiError;

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Two unique indexes guard store inserts; Postgres names the violated one
// in the error, and both names are set by the stores migration.
fn store_unique_conflict(err: &sea_orm::DbErr) -> ApiError {
    if err.to_string().contains("idx-stores-owner") {
        ApiError::OwnerHasStore
    } else {
        ApiError::EmailTaken
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            address: Set(user.address.clone()),
            role: Set(user.role.as_i16()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password hash")?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        let PageRequest { per_page, page } = page.clamped();

        let mut condition = Condition::all();
        if let Some(term) = &filter.search {
            // One term, matched against any searchable column.
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(users::Column::Name).ilike(contains(term)))
                    .add(Expr::col(users::Column::Email).ilike(contains(term)))
                    .add(Expr::col(users::Column::Address).ilike(contains(term))),
            );
        }
        if let Some(name) = &filter.name {
            condition = condition.add(Expr::col(users::Column::Name).ilike(contains(name)));
        }
        if let Some(email) = &filter.email {
            condition = condition.add(Expr::col(users::Column::Email).ilike(contains(email)));
        }
        if let Some(address) = &filter.address {
            condition = condition.add(Expr::col(users::Column::Address).ilike(contains(address)));
        }
        if let Some(role) = filter.role {
            condition = condition.add(users::Column::Role.eq(role.as_i16()));
        }

        let (column, sort) = match sort_by {
            UserSortBy::Id(s) => (users::Column::Id, s),
            UserSortBy::Name(s) => (users::Column::Name, s),
            UserSortBy::Email(s) => (users::Column::Email, s),
            UserSortBy::Address(s) => (users::Column::Address, s),
            UserSortBy::Role(s) => (users::Column::Role, s),
        };
        let mut query = users::Entity::find().filter(condition);
        query = match sort {
            Sort::Desc => query.order_by_desc(column),
            Sort::Asc => query.order_by_asc(column),
        };
        // Secondary id sort keeps pages stable when the sort key has duplicates.
        if !matches!(sort_by, UserSortBy::Id(_)) {
            query = query.order_by_asc(users::Column::Id);
        }

        let models = query
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn count(&self) -> Result<i64, ApiError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count as i64)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = ratehub_domain::Role::from_i16(model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role value {} for user {}", model.role, model.id))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        address: model.address,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn contains(term: &str) -> String {
    // LIKE metacharacters in user input are matched literally.
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

// ── Store repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStoreRepository {
    pub db: DatabaseConnection,
}

impl StoreRepository for DbStoreRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, ApiError> {
        let model = stores::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find store by id")?;
        Ok(model.map(store_from_model))
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Option<Store>, ApiError> {
        let model = stores::Entity::find()
            .filter(stores::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .context("find store by owner id")?;
        Ok(model.map(store_from_model))
    }

    async fn create(&self, store: &Store) -> Result<(), ApiError> {
        let result = stores::ActiveModel {
            id: Set(store.id),
            name: Set(store.name.clone()),
            email: Set(store.email.clone()),
            address: Set(store.address.clone()),
            owner_id: Set(store.owner_id),
            created_at: Set(store.created_at),
            updated_at: Set(store.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(store_unique_conflict(&e)),
            Err(e) => Err(anyhow::Error::new(e).context("create store").into()),
        }
    }

    async fn list(
        &self,
        filter: &StoreFilter,
        sort_by: StoreSortBy,
        page: PageRequest,
    ) -> Result<Vec<Store>, ApiError> {
        let PageRequest { per_page, page } = page.clamped();

        let mut condition = Condition::all();
        if let Some(term) = &filter.search {
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(stores::Column::Name).ilike(contains(term)))
                    .add(Expr::col(stores::Column::Email).ilike(contains(term)))
                    .add(Expr::col(stores::Column::Address).ilike(contains(term))),
            );
        }
        if let Some(name) = &filter.name {
            condition = condition.add(Expr::col(stores::Column::Name).ilike(contains(name)));
        }
        if let Some(email) = &filter.email {
            condition = condition.add(Expr::col(stores::Column::Email).ilike(contains(email)));
        }
        if let Some(address) = &filter.address {
            condition = condition.add(Expr::col(stores::Column::Address).ilike(contains(address)));
        }

        let (column, sort) = match sort_by {
            StoreSortBy::Id(s) => (stores::Column::Id, s),
            StoreSortBy::Name(s) => (stores::Column::Name, s),
            StoreSortBy::Email(s) => (stores::Column::Email, s),
            StoreSortBy::Address(s) => (stores::Column::Address, s),
        };
        let mut query = stores::Entity::find().filter(condition);
        query = match sort {
            Sort::Desc => query.order_by_desc(column),
            Sort::Asc => query.order_by_asc(column),
        };
        if !matches!(sort_by, StoreSortBy::Id(_)) {
            query = query.order_by_asc(stores::Column::Id);
        }

        let models = query
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list stores")?;
        Ok(models.into_iter().map(store_from_model).collect())
    }

    async fn count(&self) -> Result<i64, ApiError> {
        let count = stores::Entity::find()
            .count(&self.db)
            .await
            .context("count stores")?;
        Ok(count as i64)
    }
}

fn store_from_model(model: stores::Model) -> Store {
    Store {
        id: model.id,
        name: model.name,
        email: model.email,
        address: model.address,
        owner_id: model.owner_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

impl DbRatingRepository {
    async fn replace_value(
        &self,
        existing: ratings::Model,
        value: i16,
    ) -> Result<RatingUpsert, ApiError> {
        let rating_id = existing.id;
        let mut rating = existing.into_active_model();
        rating.value = Set(value);
        rating.updated_at = Set(Utc::now());
        rating
            .update(&self.db)
            .await
            .context("update rating value")?;
        Ok(RatingUpsert {
            rating_id,
            outcome: RatingOutcome::Modified,
        })
    }
}

impl RatingRepository for DbRatingRepository {
    async fn upsert(&self, rating: &Rating) -> Result<RatingUpsert, ApiError> {
        let existing = ratings::Entity::find()
            .filter(ratings::Column::UserId.eq(rating.user_id))
            .filter(ratings::Column::StoreId.eq(rating.store_id))
            .one(&self.db)
            .await
            .context("find rating for upsert")?;

        if let Some(row) = existing {
            return self.replace_value(row, rating.value).await;
        }

        let result = ratings::ActiveModel {
            id: Set(rating.id),
            user_id: Set(rating.user_id),
            store_id: Set(rating.store_id),
            value: Set(rating.value),
            created_at: Set(rating.created_at),
            updated_at: Set(rating.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(RatingUpsert {
                rating_id: rating.id,
                outcome: RatingOutcome::Created,
            }),
            Err(e) if is_unique_violation(&e) => {
                // Lost the race against a concurrent insert for the same
                // (user, store). The winner's row is now the one to update.
                let row = ratings::Entity::find()
                    .filter(ratings::Column::UserId.eq(rating.user_id))
                    .filter(ratings::Column::StoreId.eq(rating.store_id))
                    .one(&self.db)
                    .await
                    .context("re-find rating after conflict")?
                    .context("rating row vanished after unique conflict")?;
                self.replace_value(row, rating.value).await
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert rating").into()),
        }
    }

    async fn find_by_user_and_store(
        &self,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<Rating>, ApiError> {
        let model = ratings::Entity::find()
            .filter(ratings::Column::UserId.eq(user_id))
            .filter(ratings::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await
            .context("find rating by user and store")?;
        Ok(model.map(rating_from_model))
    }

    async fn list_for_store(&self, store_id: Uuid) -> Result<Vec<Rating>, ApiError> {
        let models = ratings::Entity::find()
            .filter(ratings::Column::StoreId.eq(store_id))
            .order_by_desc(ratings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list ratings for store")?;
        Ok(models.into_iter().map(rating_from_model).collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Rating>, ApiError> {
        let models = ratings::Entity::find()
            .filter(ratings::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list ratings for user")?;
        Ok(models.into_iter().map(rating_from_model).collect())
    }

    async fn aggregate_for_store(&self, store_id: Uuid) -> Result<RatingAggregate, ApiError> {
        let row: Option<(Option<i64>, i64)> = ratings::Entity::find()
            .select_only()
            .column_as(ratings::Column::Value.sum(), "sum")
            .column_as(ratings::Column::Id.count(), "count")
            .filter(ratings::Column::StoreId.eq(store_id))
            .into_tuple()
            .one(&self.db)
            .await
            .context("aggregate ratings for store")?;

        let (sum, count) = row.unwrap_or((None, 0));
        Ok(RatingAggregate {
            sum: sum.unwrap_or(0),
            count,
        })
    }

    async fn aggregates_for_stores(
        &self,
        store_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, RatingAggregate)>, ApiError> {
        if store_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(Uuid, Option<i64>, i64)> = ratings::Entity::find()
            .select_only()
            .column(ratings::Column::StoreId)
            .column_as(ratings::Column::Value.sum(), "sum")
            .column_as(ratings::Column::Id.count(), "count")
            .filter(ratings::Column::StoreId.is_in(store_ids.iter().copied()))
            .group_by(ratings::Column::StoreId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("aggregate ratings for stores")?;

        Ok(rows
            .into_iter()
            .map(|(store_id, sum, count)| {
                (
                    store_id,
                    RatingAggregate {
                        sum: sum.unwrap_or(0),
                        count,
                    },
                )
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, ApiError> {
        let count = ratings::Entity::find()
            .count(&self.db)
            .await
            .context("count ratings")?;
        Ok(count as i64)
    }
}

fn rating_from_model(model: ratings::Model) -> Rating {
    Rating {
        id: model.id,
        user_id: model.user_id,
        store_id: model.store_id,
        value: model.value,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Transaction repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTransactionRepository {
    pub db: DatabaseConnection,
}

fn sale_month_eq(month: u32) -> sea_orm::sea_query::SimpleExpr {
    Expr::cust(r#"CAST(EXTRACT(MONTH FROM "date_of_sale") AS INTEGER)"#).eq(month as i32)
}

impl TransactionRepository for DbTransactionRepository {
    async fn list(
        &self,
        month: Option<u32>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<Transaction>, i64), ApiError> {
        let PageRequest { per_page, page } = page.clamped();

        let mut condition = Condition::all();
        if let Some(month) = month {
            condition = condition.add(sale_month_eq(month));
        }
        if let Some(term) = search {
            let mut any = Condition::any()
                .add(Expr::col(transactions::Column::Title).ilike(contains(term)))
                .add(Expr::col(transactions::Column::Description).ilike(contains(term)));
            if let Ok(price) = term.trim().parse::<f64>() {
                any = any.add(transactions::Column::Price.eq(price));
            }
            condition = condition.add(any);
        }

        let query = transactions::Entity::find().filter(condition);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count matching transactions")?;

        let models = query
            .order_by_asc(transactions::Column::Id)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list transactions")?;

        Ok((
            models.into_iter().map(transaction_from_model).collect(),
            total as i64,
        ))
    }

    async fn statistics(&self, month: u32) -> Result<TransactionStats, ApiError> {
        let rows: Vec<(bool, Option<f64>, i64)> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Sold)
            .column_as(transactions::Column::Price.sum(), "sum")
            .column_as(transactions::Column::Id.count(), "count")
            .filter(sale_month_eq(month))
            .group_by(transactions::Column::Sold)
            .into_tuple()
            .all(&self.db)
            .await
            .context("transaction statistics")?;

        let mut stats = TransactionStats::default();
        for (sold, sum, count) in rows {
            if sold {
                stats.total_sale_amount = sum.unwrap_or(0.0);
                stats.sold_count = count;
            } else {
                stats.unsold_count = count;
            }
        }
        Ok(stats)
    }

    async fn count(&self) -> Result<i64, ApiError> {
        let count = transactions::Entity::find()
            .count(&self.db)
            .await
            .context("count transactions")?;
        Ok(count as i64)
    }

    async fn insert_many(&self, records: &[Transaction]) -> Result<(), ApiError> {
        if records.is_empty() {
            return Ok(());
        }
        let models = records.iter().map(|t| transactions::ActiveModel {
            id: Set(t.id),
            title: Set(t.title.clone()),
            price: Set(t.price),
            description: Set(t.description.clone()),
            category: Set(t.category.clone()),
            image: Set(t.image.clone()),
            sold: Set(t.sold),
            date_of_sale: Set(t.date_of_sale),
        });
        transactions::Entity::insert_many(models)
            .exec_without_returning(&self.db)
            .await
            .context("bulk insert transactions")?;
        Ok(())
    }
}

fn transaction_from_model(model: transactions::Model) -> Transaction {
    Transaction {
        id: model.id,
        title: model.title,
        price: model.price,
        description: model.description,
        category: model.category,
        image: model.image,
        sold: model.sold,
        date_of_sale: model.date_of_sale,
    }
}
