pub use mediator::DefaultAsyncMediator;
use sqlx::PgPool;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(pool: PgPool) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Datasets
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::datasets::commands::create::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::datasets::commands::delete::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::datasets::queries::get::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::datasets::queries::list::handle(pool, query).await }
            }
        })
        // Feature Models
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::feature_models::commands::add::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::feature_models::commands::delete::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::feature_models::queries::get::handle(pool, query).await }
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_mediator_builds() {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost".to_string());

        if let Ok(pool) = PgPool::connect(&database_url).await {
            let _mediator = build_mediator(pool);
        }
    }
}
