// SPDX-FileCopyrightText: 2026 Pico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.

use pico_core::PicoError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), PicoError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| PicoError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
