// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
///
/// Tables are created when missing. Setting `RESET_DB=true` drops them first.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("⚠️  RESET_DB=true - Dropping all tables and recreating schema...");
        drop_all_tables(pool).await?;
        info!("✅ Dropped old tables");
    }

    create_schema(pool).await?;
    seed_cheerups(pool).await?;

    info!("✅ Database migration completed successfully!");
    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Children before parents so foreign keys never dangle mid-drop
    let tables = [
        "post_like",
        "workout_post",
        "workout_record",
        "study_record",
        "memo",
        "todolist",
        "cheerup",
        "users",
    ];

    for table in tables {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            nickname TEXT NOT NULL,
            gender TEXT,
            phone TEXT,
            address TEXT,
            address_detail TEXT,
            post_code TEXT,
            profile_image TEXT,
            role TEXT NOT NULL DEFAULT 'ROLE_USER',
            oauth_provider TEXT,
            oauth_provider_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS todolist (
            todo_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            is_completed INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS memo (
            memo_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            category TEXT,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS study_record (
            record_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            subject TEXT NOT NULL,
            duration INTEGER NOT NULL,
            start_time TEXT,
            end_time TEXT,
            memo TEXT,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS workout_record (
            record_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            workout_type TEXT NOT NULL,
            duration INTEGER NOT NULL,
            calories INTEGER NOT NULL,
            workout_date TEXT NOT NULL,
            memo TEXT,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS workout_post (
            post_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            workout_category TEXT,
            image_url TEXT,
            view_count INTEGER NOT NULL DEFAULT 0,
            like_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS post_like (
            like_id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL REFERENCES workout_post(post_id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            UNIQUE (post_id, user_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS cheerup (
            cheerup_id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL UNIQUE,
            author TEXT
        )
        "#,
        "DROP INDEX IF EXISTS idx_users_oauth",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_oauth_identity ON users(oauth_provider, oauth_provider_id)",
        "CREATE INDEX IF NOT EXISTS idx_todolist_user ON todolist(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_memo_user ON memo(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_study_record_user ON study_record(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_workout_record_user ON workout_record(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_workout_post_user ON workout_post(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_workout_post_popular ON workout_post(like_count DESC, post_id DESC)",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

async fn seed_cheerups(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let quotes = [
        ("The secret of getting ahead is getting started.", "Mark Twain"),
        ("It always seems impossible until it's done.", "Nelson Mandela"),
        ("Small daily improvements are the key to staggering long-term results.", "Robin Sharma"),
        ("Discipline is choosing between what you want now and what you want most.", "Abraham Lincoln"),
        ("The body achieves what the mind believes.", "Napoleon Hill"),
    ];

    for (content, author) in quotes {
        sqlx::query("INSERT OR IGNORE INTO cheerup (content, author) VALUES (?, ?)")
            .bind(content)
            .bind(author)
            .execute(pool)
            .await?;
    }

    Ok(())
}
