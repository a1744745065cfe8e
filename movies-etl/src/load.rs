//! Loader: intermediate file → `movies` table
//!
//! Batch re-materialization: the table is dropped and rebuilt from the
//! intermediate file on every run. A type or store error aborts the run
//! and leaves the previous table in place.

use csv::ReaderBuilder;
use movies_common::config::DataPaths;
use movies_common::{db, Movie, Result};
use std::path::Path;
use tracing::info;

/// Read clean records back from the intermediate file
pub fn read_clean(path: &Path) -> Result<Vec<Movie>> {
    let mut rdr = ReaderBuilder::new().from_path(path)?;

    let mut movies = Vec::new();
    for result in rdr.deserialize::<Movie>() {
        movies.push(result?);
    }
    Ok(movies)
}

/// Load stage: intermediate file → store
///
/// The store connection lives only for the duration of this call.
pub async fn run(paths: &DataPaths) -> Result<u64> {
    let movies = read_clean(&paths.clean_csv)?;
    info!("Read {} clean rows from {}", movies.len(), paths.clean_csv.display());

    let pool = db::connect(&paths.database).await?;
    let loaded = db::replace_movies(&pool, &movies).await;
    pool.close().await;

    let loaded = loaded?;
    info!("Loaded into DB: {} ({} rows)", paths.database.display(), loaded);
    Ok(loaded)
}
