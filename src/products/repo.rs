use crate::products::dto::ListProductsQuery;
use crate::products::repo_types::Product;
use sqlx::PgPool;
use uuid::Uuid;

impl Product {
    /// List products newest first, applying the optional filters.
    pub async fn list(db: &PgPool, q: &ListProductsQuery) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, image, rating, num_reviews, created_at
            FROM products
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::float8 IS NULL OR price >= $2)
              AND ($3::float8 IS NULL OR price <= $3)
              AND ($4::text IS NULL OR name ILIKE '%' || $4 || '%')
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(q.category.as_deref())
        .bind(q.min_price)
        .bind(q.max_price)
        .bind(q.q.as_deref())
        .bind(q.limit)
        .bind(q.offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, image, rating, num_reviews, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn insert(
        db: &PgPool,
        name: &str,
        description: &str,
        price: f64,
        category: &str,
        image: &str,
    ) -> anyhow::Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, category, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, category, image, rating, num_reviews, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image)
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    /// Partial update; absent fields keep their stored value. Returns None
    /// when the product does not exist.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<f64>,
        category: Option<&str>,
        image: Option<&str>,
    ) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                image = COALESCE($6, image)
            WHERE id = $1
            RETURNING id, name, description, price, category, image, rating, num_reviews, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    /// Returns false when the product does not exist.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let deleted =
            sqlx::query_scalar::<_, Uuid>("DELETE FROM products WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(deleted.is_some())
    }

    /// Persist a recomputed rating average and review count.
    pub async fn set_rating(
        db: &PgPool,
        id: Uuid,
        rating: f64,
        num_reviews: i64,
    ) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET rating = $2, num_reviews = $3
            WHERE id = $1
            RETURNING id, name, description, price, category, image, rating, num_reviews, created_at
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(num_reviews)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }
}
