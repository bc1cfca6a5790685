use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::Identity,
    books::{Book, BookRepo, NewBook, RankedBook},
    reads::{Read, ReadRepo, ReadUpdate},
    users::{User, UserRepo},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    books: Vec<Book>,
    reads: HashMap<(Uuid, Uuid), Read>,
}

/// In-process stand-in for Postgres with the same keys, foreign keys and
/// listing order. Title ties compare case-insensitively, then byte-wise; this
/// approximates a linguistic collation, and Postgres may still order some
/// titles differently depending on the database locale.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_count(&self) -> usize {
        self.tables.lock().reads.len()
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.tables.lock().users.get(&id).cloned()
    }
}

#[async_trait]
impl BookRepo for MemoryStore {
    async fn insert_book(&self, book: &NewBook) -> anyhow::Result<Book> {
        anyhow::ensure!(!book.title.trim().is_empty(), "books_title_check violated");
        let row = Book {
            id: Uuid::new_v4(),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            summary: book.summary.clone(),
            cover_url: book.cover_url.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables.lock().books.push(row.clone());
        Ok(row)
    }

    async fn list_ranked(&self) -> anyhow::Result<Vec<RankedBook>> {
        let tables = self.tables.lock();
        let mut rows: Vec<(f64, RankedBook)> = tables
            .books
            .iter()
            .map(|book| {
                let ratings: Vec<i32> = tables
                    .reads
                    .values()
                    .filter(|r| r.book_id == book.id)
                    .filter_map(|r| r.rating)
                    .collect();
                let avg = (!ratings.is_empty()).then(|| {
                    ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
                });
                let ranked = RankedBook {
                    book: book.clone(),
                    avg_rating: avg.map(|a| a.round() as i32),
                };
                (avg.unwrap_or(0.0), ranked)
            })
            .collect();

        rows.sort_by(|(a, x), (b, y)| {
            b.total_cmp(a)
                .then_with(|| title_order(&x.book.title, &y.book.title))
        });
        Ok(rows.into_iter().map(|(_, r)| r).collect())
    }
}

fn title_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[async_trait]
impl ReadRepo for MemoryStore {
    async fn upsert_read(&self, user_id: Uuid, update: &ReadUpdate) -> anyhow::Result<Read> {
        let mut tables = self.tables.lock();
        anyhow::ensure!(
            tables.users.contains_key(&user_id),
            "reads_user_id_fkey violated: unknown user {user_id}"
        );
        anyhow::ensure!(
            tables.books.iter().any(|b| b.id == update.book_id),
            "reads_book_id_fkey violated: unknown book {}",
            update.book_id
        );
        let row = Read {
            user_id,
            book_id: update.book_id,
            progress_pct: update.progress_pct,
            rating: update.rating,
            updated_at: OffsetDateTime::now_utc(),
        };
        tables.reads.insert((user_id, update.book_id), row.clone());
        Ok(row)
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn upsert_user(&self, identity: &Identity) -> anyhow::Result<User> {
        let row = User {
            id: identity.id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            updated_at: OffsetDateTime::now_utc(),
        };
        self.tables.lock().users.insert(identity.id, row.clone());
        Ok(row)
    }
}
