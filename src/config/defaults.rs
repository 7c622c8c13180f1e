pub const HOST: &str = "127.0.0.1";
pub const PORT: u16 = 3000;
pub const RUST_LOG: &str = "todo_server=debug,tower_http=debug";
pub const DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";
pub const DB_MAX_CONNECTIONS: u32 = 10;
pub const DB_MIN_IDLE: u32 = 1;
