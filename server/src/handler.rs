use driver::database::PostgresDatabase;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

/// Shared axum state. Every application service is reachable through
/// [`Handler::database`], which implements the kernel's `DependOn*` traits.
#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let handler = Handler::init().await?;
        tracing::info!("application module initialized");
        Ok(Self(Arc::new(handler)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    database: PostgresDatabase,
}

impl Handler {
    async fn init() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        Ok(Self { database })
    }
}
