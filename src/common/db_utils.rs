use std::sync::Arc;

use crate::common::error::AppError;
use crate::config::StorageBackend;
use crate::db::{InventoryStore, PgInventoryRepository, SqliteInventoryRepository};

// ---
// Helper: escolhe o backend de armazenamento
// ---
/// Abre a pool do backend configurado (já com as migrações aplicadas).
///
/// As conexões ficam na pool: cada operação do repositório pega uma conexão
/// e a devolve ao terminar, então nenhum handler segura conexão entre requisições.
pub(crate) async fn connect_store(
    backend: &StorageBackend,
) -> Result<Arc<dyn InventoryStore>, AppError> {
    match backend {
        StorageBackend::Postgres {
            url,
            max_connections,
        } => {
            let repo = PgInventoryRepository::connect(url, *max_connections).await?;
            Ok(Arc::new(repo))
        }
        StorageBackend::Sqlite {
            path,
            max_connections,
            enforce_foreign_keys,
        } => {
            let repo =
                SqliteInventoryRepository::connect(path, *max_connections, *enforce_foreign_keys)
                    .await?;
            Ok(Arc::new(repo))
        }
    }
}
