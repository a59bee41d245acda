use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Initialize the database.
/// Opening the pool runs the migration engine, which owns all schema
/// creation, so this only has to force the first open. Returns `true`
/// when the schema was created by this call.
pub fn init_db(pool: &DbPool) -> AppResult<bool> {
    pool.with_conn(|_| Ok(()))?;
    Ok(pool.created_schema())
}
