// src/config.rs

use anyhow::{anyhow, bail, Context};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::{env, path::PathBuf};

use crate::{common::db_utils::connect_store, services::inventory_service::InventoryService};

const MIN_SECRET_KEY_LEN: usize = 32;

/// Qual banco guarda o inventário.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Servidor de rede; a FK de `type_id` é sempre verificada.
    Postgres { url: String, max_connections: u32 },
    /// Arquivo local; a FK só é verificada se `enforce_foreign_keys` for verdadeiro.
    Sqlite {
        path: PathBuf,
        max_connections: u32,
        enforce_foreign_keys: bool,
    },
}

// Configuração lida uma única vez na inicialização
#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_key: String,
    pub bind_addr: String,
    pub backend: StorageBackend,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Monta a configuração a partir de uma função de busca (o ambiente, ou um mapa nos testes).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY").context("SECRET_KEY deve ser definida")?;
        if secret_key.len() < MIN_SECRET_KEY_LEN {
            bail!("SECRET_KEY deve ter pelo menos {MIN_SECRET_KEY_LEN} bytes");
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            None => 5,
        };

        let backend_name = lookup("DATABASE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let backend = match backend_name.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => StorageBackend::Postgres {
                url: lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
                max_connections,
            },
            "sqlite" => StorageBackend::Sqlite {
                path: lookup("SQLITE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("inventory.db")),
                max_connections,
                enforce_foreign_keys: parse_flag(
                    "SQLITE_FOREIGN_KEYS",
                    lookup("SQLITE_FOREIGN_KEYS"),
                )?,
            },
            other => bail!("DATABASE_BACKEND desconhecido: {other} (use postgres ou sqlite)"),
        };

        Ok(Self {
            secret_key,
            bind_addr,
            backend,
        })
    }
}

fn parse_flag(name: &str, raw: Option<String>) -> anyhow::Result<bool> {
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => bail!("{name} inválido: {other}"),
    }
}

// O estado compartilhado, acessível em todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory_service: InventoryService,
    /// Chave que assina o cookie das mensagens de feedback.
    pub cookie_key: Key,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco e aplica as migrações, usando '?' para propagar erros
        let store = connect_store(&settings.backend)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        Ok(Self {
            inventory_service: InventoryService::new(store),
            cookie_key: Key::derive_from(settings.secret_key.as_bytes()),
        })
    }
}

// Permite que o `SignedCookieJar` encontre a chave dentro do estado
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
