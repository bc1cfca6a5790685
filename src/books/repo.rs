use anyhow::Context;
use async_trait::async_trait;

use super::{
    dto::NewBook,
    repo_types::{Book, RankedBook},
};
use crate::db::PgStore;

#[async_trait]
pub trait BookRepo: Send + Sync {
    /// Insert a book; the id is generated by storage.
    async fn insert_book(&self, book: &NewBook) -> anyhow::Result<Book>;

    /// All books with their rounded average rating, best rated first.
    async fn list_ranked(&self) -> anyhow::Result<Vec<RankedBook>>;
}

#[async_trait]
impl BookRepo for PgStore {
    async fn insert_book(&self, book: &NewBook) -> anyhow::Result<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, summary, cover_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, genre, summary, cover_url, created_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.summary)
        .bind(&book.cover_url)
        .fetch_one(&self.db)
        .await
        .context("insert book")?;
        Ok(row)
    }

    async fn list_ranked(&self) -> anyhow::Result<Vec<RankedBook>> {
        let rows = sqlx::query_as::<_, RankedBook>(
            r#"
            SELECT b.id, b.title, b.author, b.genre, b.summary, b.cover_url, b.created_at,
                   round(avg(r.rating))::int AS avg_rating
              FROM books b
              LEFT JOIN reads r ON r.book_id = b.id
             GROUP BY b.id
             ORDER BY coalesce(avg(r.rating), 0) DESC, b.title ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list books")?;
        Ok(rows)
    }
}
