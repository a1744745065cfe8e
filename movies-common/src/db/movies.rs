//! `movies` table load and read operations

use crate::db::schema::{MoviesTable, TableSchema};
use crate::{Movie, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

/// Drop and recreate the `movies` table from `movies`, then build its indexes
///
/// Runs in one transaction: either the whole new table (with indexes) is
/// committed, or the previous table is left untouched. Returns the number
/// of rows inserted.
pub async fn replace_movies(pool: &SqlitePool, movies: &[Movie]) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query(&MoviesTable::drop_table_sql())
        .execute(&mut *tx)
        .await?;
    sqlx::query(&MoviesTable::create_table_sql())
        .execute(&mut *tx)
        .await?;

    let inserted = insert_movies(&mut tx, movies).await?;

    for index in MoviesTable::indexes() {
        sqlx::query(&index.create_sql(MoviesTable::table_name()))
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        "Replaced table '{}' with {} rows",
        MoviesTable::table_name(),
        inserted
    );
    Ok(inserted)
}

async fn insert_movies(tx: &mut Transaction<'_, Sqlite>, movies: &[Movie]) -> Result<u64> {
    let sql = MoviesTable::insert_sql();
    let mut inserted = 0;

    // Bind order follows MoviesTable::columns()
    for movie in movies {
        let result = sqlx::query(&sql)
            .bind(&movie.title)
            .bind(&movie.main_genre)
            .bind(movie.budget)
            .bind(movie.revenue)
            .bind(movie.roi)
            .bind(movie.vote_average)
            .bind(movie.vote_count)
            .bind(movie.popularity)
            .bind(movie.runtime)
            .bind(movie.release_date)
            .bind(movie.year)
            .execute(&mut **tx)
            .await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// Create the secondary indexes if missing
///
/// Safe to call repeatedly; `replace_movies` already builds them.
pub async fn ensure_indexes(pool: &SqlitePool) -> Result<()> {
    for index in MoviesTable::indexes() {
        sqlx::query(&index.create_sql(MoviesTable::table_name()))
            .execute(pool)
            .await?;
        debug!("Index ready: {}", index.name);
    }
    Ok(())
}

/// Every row of `movies`, in insertion order
pub async fn fetch_all_movies(pool: &SqlitePool) -> Result<Vec<Movie>> {
    let movies = sqlx::query_as::<_, Movie>(
        r#"
        SELECT title, main_genre, budget, revenue, roi, vote_average,
               vote_count, popularity, runtime, release_date, year
        FROM movies
        ORDER BY rowid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(movies)
}

/// Number of rows in `movies`
pub async fn row_count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
