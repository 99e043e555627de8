use sea_orm_migration::prelude::*;

// 手动执行迁移：DATABASE_URL=... cargo run -p migration -- up
#[async_std::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
