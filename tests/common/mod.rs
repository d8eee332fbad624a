#![allow(dead_code)]

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use verger_api::config::AppConfig;

/// Config pointing at nothing in particular; tests override the URLs they
/// exercise.
pub fn test_config() -> AppConfig {
    AppConfig {
        db_host: "localhost".into(),
        db_port: 3306,
        db_user: "dolibarr".into(),
        db_password: "dolibarrpass".into(),
        db_name: "dolibarr".into(),
        dolibarr_api_url: "http://127.0.0.1:1".into(),
        dolibarr_api_key: "test_key".into(),
        api_url: "http://127.0.0.1:1".into(),
        host: "127.0.0.1".into(),
        api_port: 0,
        storefront_port: 0,
        backoffice_port: 0,
        environment: "test".into(),
        log_level: "debug".into(),
        log_json: false,
        admin_username: "admin".into(),
        admin_password: "admin123".into(),
        db_max_connections: 5,
        db_min_connections: 1,
        db_connect_timeout_secs: 5,
        db_idle_timeout_secs: 60,
        db_acquire_timeout_secs: 5,
        http_timeout_secs: 5,
        cors_allowed_origins: None,
    }
}

/// In-memory SQLite mirroring the slice of the Dolibarr schema the services
/// touch.
pub async fn setup_schema() -> DatabaseConnection {
    // A pooled in-memory SQLite would give every connection its own empty
    // database; pin the pool to one connection.
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options).await.expect("sqlite connection");

    let statements = [
        "CREATE TABLE llx_product (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            ref TEXT NOT NULL,
            label TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            entity INTEGER NOT NULL
        )",
        "CREATE TABLE llx_product_stock (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            fk_product INTEGER NOT NULL,
            fk_entrepot INTEGER NOT NULL,
            reel REAL NOT NULL,
            tms TEXT
        )",
        "CREATE TABLE llx_societe (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            nom TEXT
        )",
        "CREATE TABLE llx_commande (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            ref TEXT NOT NULL,
            fk_soc INTEGER NOT NULL,
            date_commande TEXT,
            fk_statut INTEGER NOT NULL,
            total_ttc REAL NOT NULL
        )",
        "CREATE TABLE llx_commandedet (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            fk_commande INTEGER NOT NULL,
            fk_product INTEGER NOT NULL,
            qty REAL NOT NULL,
            total_ttc REAL NOT NULL
        )",
        "CREATE TABLE llx_user (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname TEXT,
            lastname TEXT,
            email TEXT,
            user_mobile TEXT,
            datec TEXT,
            fk_soc INTEGER
        )",
        "CREATE TABLE llx_bank (
            rowid INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT,
            amount REAL NOT NULL,
            datev TEXT
        )",
    ];

    for sql in statements {
        db.execute(Statement::from_string(DbBackend::Sqlite, sql))
            .await
            .expect("schema statement");
    }

    db
}

pub async fn execute(db: &DatabaseConnection, sql: &str) {
    db.execute(Statement::from_string(DbBackend::Sqlite, sql))
        .await
        .expect("sql statement");
}
